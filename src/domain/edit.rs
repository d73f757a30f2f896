use super::line_item::QtyField;
use rust_decimal::Decimal;
use serde::Deserialize;

/// A cell of a receipt row that an edit may target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditField {
    Qty,
    ReceivedQty,
    RejectedQty,
    ConversionFactor,
}

impl EditField {
    /// The quantity field this edit reconciles, if any.
    pub fn quantity_field(self) -> Option<QtyField> {
        match self {
            EditField::Qty => Some(QtyField::Qty),
            EditField::ReceivedQty => Some(QtyField::ReceivedQty),
            EditField::RejectedQty => Some(QtyField::RejectedQty),
            EditField::ConversionFactor => None,
        }
    }
}

/// A single user edit of one cell on a receipt row.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct FieldEdit {
    pub receipt: u32,
    /// 1-based row index within the receipt's item table.
    pub row: usize,
    pub field: EditField,
    /// An empty cell counts as zero for quantities and as 1 for the conversion factor.
    pub value: Option<Decimal>,
}
