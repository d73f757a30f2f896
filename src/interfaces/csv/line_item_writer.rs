use crate::domain::receipt::PurchaseReceipt;
use crate::error::Result;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;

/// One output line: a receipt row with its reconciled quantities.
#[derive(Debug, Serialize, PartialEq)]
pub struct LineItemRecord {
    pub receipt: u32,
    pub row: usize,
    pub qty: Decimal,
    pub received_qty: Decimal,
    pub rejected_qty: Decimal,
    pub conversion_factor: Decimal,
    pub stock_qty: Decimal,
}

impl LineItemRecord {
    /// Flattens receipts into records, rows in table order.
    pub fn from_receipts(receipts: &[PurchaseReceipt]) -> Vec<Self> {
        receipts
            .iter()
            .flat_map(|receipt| {
                receipt.items.iter().enumerate().map(|(index, item)| Self {
                    receipt: receipt.id,
                    row: index + 1,
                    qty: item.qty.value().normalize(),
                    received_qty: item.received_qty.value().normalize(),
                    rejected_qty: item.rejected_qty.value().normalize(),
                    conversion_factor: item.conversion_factor().normalize(),
                    stock_qty: item.stock_qty.value().normalize(),
                })
            })
            .collect()
    }
}

/// Writes reconciled receipt rows as CSV.
pub struct LineItemWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> LineItemWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_receipts(&mut self, receipts: &[PurchaseReceipt]) -> Result<()> {
        for record in LineItemRecord::from_receipts(receipts) {
            self.writer.serialize(record)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
