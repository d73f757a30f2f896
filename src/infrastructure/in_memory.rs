use crate::domain::ports::{MismatchNotifier, ReceiptStore};
use crate::domain::receipt::PurchaseReceipt;
use crate::domain::reconciler::QuantityMismatch;
use crate::error::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use tokio::sync::RwLock;

/// Receipts kept for the lifetime of the process, keyed by receipt id.
///
/// The map is ordered, so `get_all` hands receipts back by ascending id
/// without a separate sort. Clones share the same map.
#[derive(Default, Clone)]
pub struct InMemoryReceiptStore {
    receipts: Arc<RwLock<BTreeMap<u32, PurchaseReceipt>>>,
}

impl InMemoryReceiptStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReceiptStore for InMemoryReceiptStore {
    async fn store(&self, receipt: PurchaseReceipt) -> Result<()> {
        self.receipts.write().await.insert(receipt.id, receipt);
        Ok(())
    }

    async fn get(&self, receipt_id: u32) -> Result<Option<PurchaseReceipt>> {
        Ok(self.receipts.read().await.get(&receipt_id).cloned())
    }

    async fn get_all(&self) -> Result<Vec<PurchaseReceipt>> {
        Ok(self.receipts.read().await.values().cloned().collect())
    }
}

/// Records every reported mismatch; clones share the same record.
#[derive(Default, Clone)]
pub struct CollectingNotifier {
    reported: Arc<Mutex<Vec<(u32, usize, QuantityMismatch)>>>,
}

impl CollectingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// `(receipt, row, mismatch)` in the order they were reported.
    pub fn reported(&self) -> Vec<(u32, usize, QuantityMismatch)> {
        self.reported
            .lock()
            .map(|reported| reported.clone())
            .unwrap_or_default()
    }
}

impl MismatchNotifier for CollectingNotifier {
    fn notify(&self, receipt_id: u32, row: usize, mismatch: &QuantityMismatch) {
        if let Ok(mut reported) = self.reported.lock() {
            reported.push((receipt_id, row, mismatch.clone()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::line_item::{FieldPrecision, QtyField};
    use crate::domain::quantity::Quantity;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_in_memory_receipt_store() {
        let store = InMemoryReceiptStore::new();
        let mut receipt = PurchaseReceipt::new(1, FieldPrecision::default());
        receipt.row_mut(1).unwrap().received_qty = Quantity::new(dec!(100)).unwrap();

        store.store(receipt.clone()).await.unwrap();
        let retrieved = store.get(1).await.unwrap().unwrap();
        assert_eq!(retrieved, receipt);

        assert!(store.get(2).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_all_orders_by_receipt_id() {
        let store = InMemoryReceiptStore::new();
        for id in [9, 2, 5] {
            store
                .store(PurchaseReceipt::new(id, FieldPrecision::default()))
                .await
                .unwrap();
        }

        let ids: Vec<u32> = store.get_all().await.unwrap().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 5, 9]);
    }

    #[tokio::test]
    async fn test_store_replaces_existing_receipt() {
        let store = InMemoryReceiptStore::new();
        let shared = store.clone();
        let mut receipt = PurchaseReceipt::new(1, FieldPrecision::default());
        store.store(receipt.clone()).await.unwrap();

        receipt.row_mut(1).unwrap().qty = Quantity::new(dec!(3)).unwrap();
        shared.store(receipt.clone()).await.unwrap();

        assert_eq!(store.get_all().await.unwrap(), vec![receipt]);
    }

    #[test]
    fn test_collecting_notifier_shares_record() {
        let notifier = CollectingNotifier::new();
        let handle = notifier.clone();
        let mismatch = QuantityMismatch {
            field: QtyField::Qty,
            limit_field: QtyField::ReceivedQty,
            value: Quantity::new(dec!(12)).unwrap(),
            limit: Quantity::new(dec!(10)).unwrap(),
        };

        notifier.notify(3, 2, &mismatch);

        assert_eq!(handle.reported(), vec![(3, 2, mismatch)]);
    }
}
