//! Catalog Models

use rust_decimal::Decimal;

use crate::uuids::TypedUuid;

/// Item UUID
pub type ItemUuid = TypedUuid<Item>;

/// Catalog Item
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub uuid: ItemUuid,

    /// Base price, never negative.
    pub price: Decimal,

    /// Whether user discounts apply to this item.
    pub discountable: bool,
}

impl Item {
    /// Price of this item for a user with the given discount rate.
    ///
    /// Rates are fractions and are clamped into `[0, 1]`, so the result lies
    /// between zero and the base price and never increases with the rate.
    #[must_use]
    pub fn discounted_price(&self, rate: Decimal) -> Decimal {
        if !self.discountable {
            return self.price;
        }

        let discounted = self.price * (Decimal::ONE - clamp_rate(rate));

        discounted.max(Decimal::ZERO)
    }
}

/// Clamp a discount rate into the `[0, 1]` fraction range.
#[must_use]
pub fn clamp_rate(rate: Decimal) -> Decimal {
    rate.clamp(Decimal::ZERO, Decimal::ONE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(price: Decimal, discountable: bool) -> Item {
        Item {
            uuid: ItemUuid::new(),
            price,
            discountable,
        }
    }

    #[test]
    fn ten_percent_off_twenty() {
        let price = item(Decimal::new(20_00, 2), true).discounted_price(Decimal::new(10, 2));

        assert_eq!(price, Decimal::new(18_00, 2));
    }

    #[test]
    fn zero_rate_keeps_base_price() {
        let price = item(Decimal::new(5_00, 2), true).discounted_price(Decimal::ZERO);

        assert_eq!(price, Decimal::new(5_00, 2));
    }

    #[test]
    fn non_discountable_item_ignores_rate() {
        let price = item(Decimal::new(5_00, 2), false).discounted_price(Decimal::new(50, 2));

        assert_eq!(price, Decimal::new(5_00, 2));
    }

    #[test]
    fn rates_out_of_range_are_clamped() {
        let base = item(Decimal::new(12_50, 2), true);

        assert_eq!(base.discounted_price(Decimal::new(15, 1)), Decimal::ZERO);
        assert_eq!(base.discounted_price(Decimal::new(-3, 1)), base.price);
    }

    #[test]
    fn higher_rate_never_costs_more() {
        let base = item(Decimal::new(9_99, 2), true);

        let mut previous = base.price;

        for percent in 0..=100 {
            let price = base.discounted_price(Decimal::new(percent, 2));

            assert!(price <= previous, "price rose at {percent}%");
            assert!(price >= Decimal::ZERO, "price went negative at {percent}%");

            previous = price;
        }
    }
}
