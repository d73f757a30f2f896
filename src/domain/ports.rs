use super::reconciler::QuantityMismatch;
use super::receipt::PurchaseReceipt;
use crate::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait ReceiptStore: Send + Sync {
    /// Inserts the receipt, replacing any stored receipt with the same id.
    async fn store(&self, receipt: PurchaseReceipt) -> Result<()>;
    async fn get(&self, receipt_id: u32) -> Result<Option<PurchaseReceipt>>;
    /// Every stored receipt, by ascending id.
    async fn get_all(&self) -> Result<Vec<PurchaseReceipt>>;
}

/// Surfaces a recovered mismatch to whoever is editing the receipt.
pub trait MismatchNotifier: Send + Sync {
    fn notify(&self, receipt_id: u32, row: usize, mismatch: &QuantityMismatch);
}

pub type ReceiptStoreBox = Box<dyn ReceiptStore>;
pub type NotifierBox = Box<dyn MismatchNotifier>;
