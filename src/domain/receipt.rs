use super::line_item::{FieldPrecision, ReceiptLineItem};
use crate::error::{ReconcileError, Result};
use serde::{Deserialize, Serialize};

/// A purchase receipt: the parent document that owns the item rows.
///
/// Rows are addressed by their 1-based position, matching how the form
/// numbers child-table rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseReceipt {
    pub id: u32,
    pub items: Vec<ReceiptLineItem>,
    #[serde(skip, default)]
    pub precision: FieldPrecision,
}

impl PurchaseReceipt {
    pub fn new(id: u32, precision: FieldPrecision) -> Self {
        Self {
            id,
            items: Vec::new(),
            precision,
        }
    }

    /// Returns the row at `row`, appending a blank one when `row` is just
    /// past the end of the table.
    pub fn row_mut(&mut self, row: usize) -> Result<&mut ReceiptLineItem> {
        if row == self.items.len() + 1 {
            self.items.push(ReceiptLineItem::new(self.precision));
        }
        match row.checked_sub(1) {
            Some(index) if index < self.items.len() => Ok(&mut self.items[index]),
            _ => Err(ReconcileError::UnknownRow {
                receipt: self.id,
                row,
            }),
        }
    }

    /// 1-based indices of rows whose quantities do not add up.
    ///
    /// A receipt with any such row must not be submitted.
    pub fn validate(&self) -> Vec<usize> {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| !item.is_consistent())
            .map(|(index, _)| index + 1)
            .collect()
    }
}
