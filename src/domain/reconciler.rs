use super::line_item::{QtyField, ReceiptLineItem};
use super::quantity::{Quantity, RoundingRule};
use thiserror::Error;

/// Raised when a rounded quantity would exceed the received quantity.
///
/// Always recoverable: by the time the caller sees it, the row has been put
/// back into the safe state `(0, received_qty, 0)`.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Error: {field} > {limit_field} ({value} > {limit})")]
pub struct QuantityMismatch {
    pub field: QtyField,
    pub limit_field: QtyField,
    pub value: Quantity,
    pub limit: Quantity,
}

/// Keeps the accepted, received and rejected quantities of a receipt row in
/// step whenever one of them is edited.
///
/// Every entry point rounds the fields it reads before comparing them, then
/// derives the dependent field. A successful call leaves
/// `qty + rejected_qty == received_qty` (up to field precision).
#[derive(Debug, Clone, Copy, Default)]
pub struct ReceiptLineReconciler {
    rule: RoundingRule,
}

impl ReceiptLineReconciler {
    pub fn new(rule: RoundingRule) -> Self {
        Self { rule }
    }

    /// Runs the entry point belonging to `field`.
    pub fn apply(&self, item: &mut ReceiptLineItem, field: QtyField) -> Result<(), QuantityMismatch> {
        match field {
            QtyField::Qty => self.on_ordered_qty_changed(item),
            QtyField::ReceivedQty => self.on_received_qty_changed(item),
            QtyField::RejectedQty => self.on_rejected_qty_changed(item),
        }
    }

    /// The received quantity changed: the accepted quantity may not exceed it.
    pub fn on_received_qty_changed(&self, item: &mut ReceiptLineItem) -> Result<(), QuantityMismatch> {
        self.round_fields(item, [QtyField::Qty, QtyField::ReceivedQty]);
        item.qty = item.qty.min(item.received_qty);
        self.on_ordered_qty_changed(item)
    }

    /// The accepted quantity changed: rejected becomes whatever is left of received,
    /// and the stock quantity follows the accepted one.
    pub fn on_ordered_qty_changed(&self, item: &mut ReceiptLineItem) -> Result<(), QuantityMismatch> {
        self.round_fields(item, [QtyField::Qty, QtyField::ReceivedQty]);

        // First entry on a blank row: assume everything received was accepted.
        if item.received_qty.is_zero() && item.rejected_qty.is_zero() && !item.qty.is_zero() {
            item.received_qty = item.qty;
        }

        match item.received_qty.checked_sub(item.qty) {
            Some(rejected) => {
                item.rejected_qty = self.round(item, QtyField::RejectedQty, rejected);
                item.refresh_stock_qty();
                Ok(())
            }
            None => Err(Self::reset(item, QtyField::Qty)),
        }
    }

    /// The rejected quantity changed: accepted becomes whatever is left of received.
    pub fn on_rejected_qty_changed(&self, item: &mut ReceiptLineItem) -> Result<(), QuantityMismatch> {
        self.round_fields(item, [QtyField::ReceivedQty, QtyField::RejectedQty]);

        match item.received_qty.checked_sub(item.rejected_qty) {
            Some(accepted) => {
                item.qty = self.round(item, QtyField::Qty, accepted);
                self.on_ordered_qty_changed(item)
            }
            None => Err(Self::reset(item, QtyField::RejectedQty)),
        }
    }

    fn round(&self, item: &ReceiptLineItem, field: QtyField, value: Quantity) -> Quantity {
        value.round(item.precision.of(field), self.rule)
    }

    fn round_fields<const N: usize>(&self, item: &mut ReceiptLineItem, fields: [QtyField; N]) {
        for field in fields {
            let rounded = self.round(item, field, item.get(field));
            item.set(field, rounded);
        }
    }

    fn reset(item: &mut ReceiptLineItem, field: QtyField) -> QuantityMismatch {
        let mismatch = QuantityMismatch {
            field,
            limit_field: QtyField::ReceivedQty,
            value: item.get(field),
            limit: item.received_qty,
        };
        item.qty = Quantity::ZERO;
        item.rejected_qty = Quantity::ZERO;
        item.refresh_stock_qty();
        mismatch
    }
}
