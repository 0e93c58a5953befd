//! Supply drafts and the frozen total-price snapshot.

use crate::{EngineError, Money, ResultEngine, validation};

/// One product line in a draft order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineItem {
    pub product_id: i64,
    pub quantity: u32,
    pub unit_price: Money,
    /// Supplier's on-hand stock at selection time, when known.
    pub available: Option<u32>,
}

impl LineItem {
    pub fn new(product_id: i64, quantity: u32, unit_price: Money) -> Self {
        Self {
            product_id,
            quantity,
            unit_price,
            available: None,
        }
    }

    #[must_use]
    pub fn with_available(mut self, available: u32) -> Self {
        self.available = Some(available);
        self
    }
}

/// An order under construction on the company side.
///
/// The draft collects the supplier, the delivery address and the selected
/// products; [`SupplyDraft::build`] re-validates everything and freezes the
/// total, so a stale selection cannot slip through at submission time.
#[derive(Clone, Debug, Default)]
pub struct SupplyDraft {
    supplier_id: i64,
    delivery_address: String,
    items: Vec<LineItem>,
}

impl SupplyDraft {
    pub fn new(supplier_id: i64, delivery_address: impl Into<String>) -> Self {
        Self {
            supplier_id,
            delivery_address: delivery_address.into(),
            items: Vec::new(),
        }
    }

    pub fn item(mut self, item: LineItem) -> Self {
        self.items.push(item);
        self
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Validates the draft and freezes the total price.
    pub fn build(self) -> ResultEngine<SupplyOrder> {
        let delivery_address =
            validation::normalize_required_text(&self.delivery_address, "delivery address")?;

        if self.items.is_empty() {
            return Err(EngineError::Validation(
                "a supply needs at least one product".to_string(),
            ));
        }

        let mut seen: Vec<i64> = Vec::with_capacity(self.items.len());
        for item in &self.items {
            if seen.contains(&item.product_id) {
                return Err(EngineError::Validation(format!(
                    "product {} is listed twice",
                    item.product_id
                )));
            }
            seen.push(item.product_id);

            if item.quantity == 0 {
                return Err(EngineError::Validation(format!(
                    "quantity must be at least 1 for product {}",
                    item.product_id
                )));
            }
            if let Some(available) = item.available
                && item.quantity > available
            {
                return Err(EngineError::Validation(format!(
                    "only {} of product {} in stock, requested {}",
                    available, item.product_id, item.quantity
                )));
            }
            if item.unit_price.is_negative() {
                return Err(EngineError::Validation(format!(
                    "product {} has a negative price",
                    item.product_id
                )));
            }
        }

        let total_price = total_price(&self.items)?;

        Ok(SupplyOrder {
            supplier_id: self.supplier_id,
            delivery_address,
            items: self.items,
            total_price,
        })
    }
}

/// A validated order together with its price snapshot.
///
/// `total_price` is computed once here and never recomputed: later edits to
/// the referenced products leave existing orders untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SupplyOrder {
    pub supplier_id: i64,
    pub delivery_address: String,
    pub items: Vec<LineItem>,
    pub total_price: Money,
}

/// Sum of `unit_price x quantity` over the items.
pub fn total_price(items: &[LineItem]) -> ResultEngine<Money> {
    items.iter().try_fold(Money::ZERO, |acc, item| {
        let line = item
            .unit_price
            .checked_mul(item.quantity)
            .ok_or_else(|| EngineError::InvalidAmount("line subtotal too large".to_string()))?;
        acc.checked_add(line)
            .ok_or_else(|| EngineError::InvalidAmount("order total too large".to_string()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(product_id: i64, quantity: u32, price_kopecks: i64) -> LineItem {
        LineItem::new(product_id, quantity, Money::new(price_kopecks))
    }

    #[test]
    fn freezes_the_total() {
        let order = SupplyDraft::new(1, "г. Москва, ул. Ленина, д. 10")
            .item(item(7, 3, 1200_00))
            .build()
            .unwrap();

        assert_eq!(order.total_price, Money::new(3600_00));
        assert_eq!(order.delivery_address, "г. Москва, ул. Ленина, д. 10");
    }

    #[test]
    fn total_sums_every_line() {
        let items = [item(1, 2, 100_00), item(2, 1, 49_90), item(3, 10, 5_00)];
        assert_eq!(total_price(&items).unwrap(), Money::new(299_90));
    }

    #[test]
    fn rejects_blank_address() {
        let err = SupplyDraft::new(1, "   ")
            .item(item(7, 1, 100))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            EngineError::Validation("delivery address must not be empty".to_string())
        );
    }

    #[test]
    fn rejects_empty_cart() {
        assert!(matches!(
            SupplyDraft::new(1, "addr").build(),
            Err(EngineError::Validation(_))
        ));
    }

    #[test]
    fn rejects_zero_quantity() {
        assert!(
            SupplyDraft::new(1, "addr")
                .item(item(7, 0, 100))
                .build()
                .is_err()
        );
    }

    #[test]
    fn rejects_quantity_over_stock() {
        let over = LineItem::new(7, 4, Money::new(100)).with_available(3);
        assert!(SupplyDraft::new(1, "addr").item(over).build().is_err());

        let exact = LineItem::new(7, 3, Money::new(100)).with_available(3);
        assert!(SupplyDraft::new(1, "addr").item(exact).build().is_ok());
    }

    #[test]
    fn rejects_duplicate_products() {
        assert!(
            SupplyDraft::new(1, "addr")
                .item(item(7, 1, 100))
                .item(item(7, 2, 100))
                .build()
                .is_err()
        );
    }

    #[test]
    fn total_overflow_is_an_error() {
        let items = [item(1, u32::MAX, i64::MAX / 2)];
        assert!(total_price(&items).is_err());
    }
}
