use crate::domain::ports::MismatchNotifier;
use crate::domain::reconciler::QuantityMismatch;
use tracing::warn;

/// Reports mismatches as `warn` events, the CLI's equivalent of a message box.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl MismatchNotifier for TracingNotifier {
    fn notify(&self, receipt_id: u32, row: usize, mismatch: &QuantityMismatch) {
        warn!(
            receipt = receipt_id,
            row,
            field = ?mismatch.field,
            "{mismatch}; row reset"
        );
    }
}
