use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use receipt_reconciler::domain::line_item::{FieldPrecision, QtyField, ReceiptLineItem};
use receipt_reconciler::domain::quantity::Quantity;
use receipt_reconciler::domain::reconciler::ReceiptLineReconciler;
use rust_decimal::Decimal;

fn random_quantity(rng: &mut StdRng) -> Quantity {
    Quantity::new(Decimal::new(rng.gen_range(0..100_000), 2)).unwrap()
}

fn row(qty: Quantity, received: Quantity, rejected: Quantity) -> ReceiptLineItem {
    ReceiptLineItem::with_quantities(qty, received, rejected, FieldPrecision::uniform(2).unwrap())
}

fn random_precision(rng: &mut StdRng) -> FieldPrecision {
    FieldPrecision::new(rng.gen_range(0..=4), rng.gen_range(0..=4), rng.gen_range(0..=4)).unwrap()
}

#[test]
fn test_consistent_rows_are_fixed_points() {
    let mut rng = StdRng::seed_from_u64(7);
    let reconciler = ReceiptLineReconciler::default();

    for _ in 0..1_000 {
        let accepted = random_quantity(&mut rng);
        let rejected = random_quantity(&mut rng);
        let received = Quantity::new(accepted.value() + rejected.value()).unwrap();
        let original = row(accepted, received, rejected);

        let mut item = original.clone();
        reconciler.on_received_qty_changed(&mut item).unwrap();
        reconciler.on_ordered_qty_changed(&mut item).unwrap();
        assert_eq!(item.quantities(), original.quantities());

        reconciler.on_received_qty_changed(&mut item).unwrap();
        reconciler.on_ordered_qty_changed(&mut item).unwrap();
        assert_eq!(item.quantities(), original.quantities());
    }
}

#[test]
fn test_every_edit_ends_consistent_or_reset() {
    let mut rng = StdRng::seed_from_u64(11);
    let reconciler = ReceiptLineReconciler::default();
    let fields = [QtyField::Qty, QtyField::ReceivedQty, QtyField::RejectedQty];

    for _ in 0..1_000 {
        let mut item = ReceiptLineItem::with_quantities(
            random_quantity(&mut rng),
            random_quantity(&mut rng),
            random_quantity(&mut rng),
            random_precision(&mut rng),
        );
        let field = fields[rng.gen_range(0..fields.len())];

        match reconciler.apply(&mut item, field) {
            Ok(()) => {
                assert!(item.is_consistent(), "{item:?} after {field:?}");
                assert_eq!(item.stock_qty, item.qty);
            }
            Err(mismatch) => {
                assert_eq!(item.qty, Quantity::ZERO);
                assert_eq!(item.rejected_qty, Quantity::ZERO);
                assert!(mismatch.value > mismatch.limit);
            }
        }
    }
}
