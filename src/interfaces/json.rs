use crate::domain::receipt::PurchaseReceipt;
use crate::error::Result;
use crate::interfaces::csv::line_item_writer::LineItemRecord;
use std::io::Write;

/// Writes reconciled receipt rows as a pretty-printed JSON array.
pub fn write_receipts<W: Write>(mut sink: W, receipts: &[PurchaseReceipt]) -> Result<()> {
    serde_json::to_writer_pretty(&mut sink, &LineItemRecord::from_receipts(receipts))?;
    writeln!(sink)?;
    Ok(())
}
