use super::quantity::{MAX_PRECISION, Quantity};
use crate::error::{ReconcileError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The three quantity fields of a receipt row a user may edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QtyField {
    /// Accepted quantity, shown as "qty" on the form.
    Qty,
    ReceivedQty,
    RejectedQty,
}

impl QtyField {
    /// Field label as displayed on the receipt item table.
    pub fn label(self) -> &'static str {
        match self {
            QtyField::Qty => "Accepted Quantity",
            QtyField::ReceivedQty => "Received Quantity",
            QtyField::RejectedQty => "Rejected Quantity",
        }
    }
}

impl fmt::Display for QtyField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Decimal places each quantity field is rounded to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldPrecision {
    pub qty: u32,
    pub received_qty: u32,
    pub rejected_qty: u32,
}

impl FieldPrecision {
    pub const DEFAULT_DIGITS: u32 = 3;

    /// Same precision for all three fields.
    pub fn uniform(digits: u32) -> Result<Self> {
        Self::new(digits, digits, digits)
    }

    pub fn new(qty: u32, received_qty: u32, rejected_qty: u32) -> Result<Self> {
        for digits in [qty, received_qty, rejected_qty] {
            if digits > MAX_PRECISION {
                return Err(ReconcileError::ValidationError(format!(
                    "Precision must be between 0 and {MAX_PRECISION}, got {digits}"
                )));
            }
        }
        Ok(Self {
            qty,
            received_qty,
            rejected_qty,
        })
    }

    pub fn of(&self, field: QtyField) -> u32 {
        match field {
            QtyField::Qty => self.qty,
            QtyField::ReceivedQty => self.received_qty,
            QtyField::RejectedQty => self.rejected_qty,
        }
    }
}

impl Default for FieldPrecision {
    fn default() -> Self {
        Self {
            qty: Self::DEFAULT_DIGITS,
            received_qty: Self::DEFAULT_DIGITS,
            rejected_qty: Self::DEFAULT_DIGITS,
        }
    }
}

/// One row of a purchase receipt's item table.
///
/// `qty` is the accepted quantity; once reconciled, `qty + rejected_qty`
/// equals `received_qty` to within the last decimal place of `rejected_qty`.
/// `stock_qty` is the accepted quantity in the item's stock unit.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReceiptLineItem {
    pub qty: Quantity,
    pub received_qty: Quantity,
    pub rejected_qty: Quantity,
    /// Purchase unit to stock unit; a missing factor counts as 1.
    pub conversion_factor: Option<Decimal>,
    pub stock_qty: Quantity,
    /// Supplied by the embedding document, never by the row data itself.
    #[serde(skip, default)]
    pub precision: FieldPrecision,
}

impl ReceiptLineItem {
    pub fn new(precision: FieldPrecision) -> Self {
        Self {
            precision,
            ..Self::default()
        }
    }

    pub fn with_quantities(
        qty: Quantity,
        received_qty: Quantity,
        rejected_qty: Quantity,
        precision: FieldPrecision,
    ) -> Self {
        let mut item = Self {
            qty,
            received_qty,
            rejected_qty,
            precision,
            ..Self::default()
        };
        item.refresh_stock_qty();
        item
    }

    pub fn get(&self, field: QtyField) -> Quantity {
        match field {
            QtyField::Qty => self.qty,
            QtyField::ReceivedQty => self.received_qty,
            QtyField::RejectedQty => self.rejected_qty,
        }
    }

    pub fn set(&mut self, field: QtyField, value: Quantity) {
        match field {
            QtyField::Qty => self.qty = value,
            QtyField::ReceivedQty => self.received_qty = value,
            QtyField::RejectedQty => self.rejected_qty = value,
        }
    }

    /// The triple `(qty, received_qty, rejected_qty)`.
    pub fn quantities(&self) -> (Quantity, Quantity, Quantity) {
        (self.qty, self.received_qty, self.rejected_qty)
    }

    pub fn conversion_factor(&self) -> Decimal {
        self.conversion_factor.unwrap_or(Decimal::ONE)
    }

    /// Sets the unit conversion factor and re-derives `stock_qty`.
    ///
    /// The factor must be positive; `None` falls back to 1.
    pub fn set_conversion_factor(&mut self, factor: Option<Decimal>) -> Result<()> {
        if let Some(value) = factor
            && value <= Decimal::ZERO
        {
            return Err(ReconcileError::ValidationError(format!(
                "Conversion factor must be positive, got {value}"
            )));
        }
        self.conversion_factor = factor;
        self.refresh_stock_qty();
        Ok(())
    }

    /// Recomputes `stock_qty = qty * conversion_factor`.
    pub fn refresh_stock_qty(&mut self) {
        self.stock_qty = self.qty.scaled(self.conversion_factor());
    }

    /// True when `qty <= received_qty` and `received_qty - qty` matches
    /// `rejected_qty` once the difference is taken to the rejected field's
    /// precision.
    pub fn is_consistent(&self) -> bool {
        let Some(remainder) = self.received_qty.checked_sub(self.qty) else {
            return false;
        };
        let last_place = Decimal::new(1, self.precision.rejected_qty.min(MAX_PRECISION));
        (remainder.value() - self.rejected_qty.value()).abs() < last_place
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn qty(value: Decimal) -> Quantity {
        Quantity::new(value).unwrap()
    }

    #[test]
    fn test_precision_bounds() {
        assert!(FieldPrecision::uniform(0).is_ok());
        assert!(FieldPrecision::uniform(MAX_PRECISION).is_ok());
        assert!(matches!(
            FieldPrecision::new(2, 10, 2),
            Err(ReconcileError::ValidationError(_))
        ));
    }

    #[test]
    fn test_precision_per_field() {
        let precision = FieldPrecision::new(1, 2, 3).unwrap();
        assert_eq!(precision.of(QtyField::Qty), 1);
        assert_eq!(precision.of(QtyField::ReceivedQty), 2);
        assert_eq!(precision.of(QtyField::RejectedQty), 3);
    }

    #[test]
    fn test_set_and_get() {
        let mut item = ReceiptLineItem::default();
        item.set(QtyField::RejectedQty, qty(dec!(2)));
        assert_eq!(item.get(QtyField::RejectedQty), qty(dec!(2)));
        assert_eq!(item.get(QtyField::Qty), Quantity::ZERO);
    }

    #[test]
    fn test_consistency() {
        let precision = FieldPrecision::default();
        let ok = ReceiptLineItem::with_quantities(qty(dec!(7)), qty(dec!(10)), qty(dec!(3.0)), precision);
        assert!(ok.is_consistent());

        let short = ReceiptLineItem::with_quantities(qty(dec!(7)), qty(dec!(10)), qty(dec!(2)), precision);
        assert!(!short.is_consistent());

        let over = ReceiptLineItem::with_quantities(qty(dec!(12)), qty(dec!(10)), Quantity::ZERO, precision);
        assert!(!over.is_consistent());
    }

    #[test]
    fn test_field_labels() {
        assert_eq!(QtyField::Qty.to_string(), "Accepted Quantity");
        assert_eq!(QtyField::ReceivedQty.label(), "Received Quantity");
    }

    #[test]
    fn test_consistency_with_coarser_rejected_precision() {
        // 10.5 - 3 = 7.5 is held as 8 when rejected quantities are whole numbers.
        let precision = FieldPrecision::new(2, 2, 0).unwrap();
        let rounded = ReceiptLineItem::with_quantities(qty(dec!(3)), qty(dec!(10.5)), qty(dec!(8)), precision);
        assert!(rounded.is_consistent());

        let off_by_one = ReceiptLineItem::with_quantities(qty(dec!(3)), qty(dec!(10.5)), qty(dec!(9)), precision);
        assert!(!off_by_one.is_consistent());
    }

    #[test]
    fn test_stock_qty_follows_conversion_factor() {
        let mut item = ReceiptLineItem::with_quantities(
            qty(dec!(4)),
            qty(dec!(5)),
            qty(dec!(1)),
            FieldPrecision::default(),
        );
        assert_eq!(item.stock_qty, qty(dec!(4)));

        item.set_conversion_factor(Some(dec!(12))).unwrap();
        assert_eq!(item.stock_qty, qty(dec!(48)));

        item.set_conversion_factor(None).unwrap();
        assert_eq!(item.conversion_factor(), Decimal::ONE);
        assert_eq!(item.stock_qty, qty(dec!(4)));
    }

    #[test]
    fn test_conversion_factor_must_be_positive() {
        let mut item = ReceiptLineItem::default();
        assert!(matches!(
            item.set_conversion_factor(Some(dec!(0))),
            Err(ReconcileError::ValidationError(_))
        ));
        assert_eq!(item.conversion_factor, None);
    }
}
