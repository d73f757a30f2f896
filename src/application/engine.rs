use crate::domain::edit::FieldEdit;
use crate::domain::line_item::FieldPrecision;
use crate::domain::ports::{NotifierBox, ReceiptStoreBox};
use crate::domain::quantity::Quantity;
use crate::domain::receipt::PurchaseReceipt;
use crate::domain::reconciler::{QuantityMismatch, ReceiptLineReconciler};
use crate::error::Result;
use tracing::debug;

/// What happened to the row an edit was applied to.
#[derive(Debug, Clone, PartialEq)]
pub enum EditOutcome {
    /// The row was reconciled and is consistent.
    Applied,
    /// The row was reset to its safe state and the user was notified.
    Mismatch(QuantityMismatch),
}

/// Applies field edits to purchase receipts.
///
/// `ReceiptEngine` owns the receipt storage and the channel used to tell the
/// user about mismatches. Edits are applied one at a time, each running to
/// completion (lookup, reconcile, persist) before the next is accepted.
pub struct ReceiptEngine {
    store: ReceiptStoreBox,
    notifier: NotifierBox,
    reconciler: ReceiptLineReconciler,
    precision: FieldPrecision,
}

impl ReceiptEngine {
    /// Creates a new `ReceiptEngine`.
    ///
    /// # Arguments
    ///
    /// * `store` - The store holding receipts and their rows.
    /// * `notifier` - Where recovered mismatches are reported.
    /// * `reconciler` - The row reconciler, carrying the rounding rule.
    /// * `precision` - Field precision given to receipts created by this engine.
    pub fn new(
        store: ReceiptStoreBox,
        notifier: NotifierBox,
        reconciler: ReceiptLineReconciler,
        precision: FieldPrecision,
    ) -> Self {
        Self {
            store,
            notifier,
            reconciler,
            precision,
        }
    }

    /// Writes the edited value into its cell and reconciles the row.
    ///
    /// A mismatch is not an error: the row is reset, the notifier is told,
    /// and the receipt is stored as usual. Errors are reserved for edits that
    /// cannot be applied at all (negative values, unknown rows, storage).
    /// Conversion factor edits skip reconciliation and only re-derive the
    /// stock quantity.
    pub async fn process_edit(&self, edit: FieldEdit) -> Result<EditOutcome> {
        let mut receipt = self
            .store
            .get(edit.receipt)
            .await?
            .unwrap_or_else(|| PurchaseReceipt::new(edit.receipt, self.precision));

        let item = receipt.row_mut(edit.row)?;
        let outcome = match edit.field.quantity_field() {
            Some(field) => {
                item.set(field, Quantity::from_optional(edit.value)?);
                match self.reconciler.apply(item, field) {
                    Ok(()) => EditOutcome::Applied,
                    Err(mismatch) => {
                        self.notifier.notify(edit.receipt, edit.row, &mismatch);
                        EditOutcome::Mismatch(mismatch)
                    }
                }
            }
            None => {
                item.set_conversion_factor(edit.value)?;
                EditOutcome::Applied
            }
        };
        debug!(
            receipt = edit.receipt,
            row = edit.row,
            field = ?edit.field,
            qty = %item.qty,
            received_qty = %item.received_qty,
            rejected_qty = %item.rejected_qty,
            stock_qty = %item.stock_qty,
            "edit applied"
        );

        self.store.store(receipt).await?;
        Ok(outcome)
    }

    /// Consumes the engine and returns every receipt, ordered by id.
    pub async fn into_results(self) -> Result<Vec<PurchaseReceipt>> {
        self.store.get_all().await
    }
}
