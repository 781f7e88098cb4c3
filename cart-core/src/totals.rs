//! Checkout totals: subtotal over the cart plus the flat shipping fee.
//!
//! Amounts are summed exactly, with no rounding at any intermediate step.
//! Rounding to two decimals happens only in [`crate::currency::format_php`],
//! so per-item prices finer than a centavo accumulate precisely and can
//! legitimately display a total one centavo away from a naive
//! round-each-line-then-sum result.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::CartItem;

/// Derived totals for the current cart and shipping fee.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use cart_core::models::CartItem;
/// use cart_core::totals::CheckoutSummary;
///
/// let cart = vec![
///     CartItem { name: "Mango".to_string(), price: dec!(10.00), quantity: 2 },
///     CartItem { name: "Dried Fish".to_string(), price: dec!(5.50), quantity: 1 },
/// ];
///
/// let summary = CheckoutSummary::compute(&cart, dec!(50));
///
/// assert_eq!(summary.subtotal, dec!(25.50));
/// assert_eq!(summary.grand_total, dec!(75.50));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSummary {
    pub subtotal: Decimal,
    pub shipping_fee: Decimal,
    pub grand_total: Decimal,
}

impl CheckoutSummary {
    /// Computes totals as a pure function of the cart and the current fee.
    pub fn compute(items: &[CartItem], shipping_fee: Decimal) -> Self {
        let subtotal = subtotal(items);
        Self {
            subtotal,
            shipping_fee,
            grand_total: subtotal + shipping_fee,
        }
    }
}

/// Exact sum of `price × quantity` over all items.
pub fn subtotal(items: &[CartItem]) -> Decimal {
    items
        .iter()
        .fold(Decimal::ZERO, |acc, item| acc + item.line_total())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::currency::format_php;

    fn item(name: &str, price: Decimal, quantity: u32) -> CartItem {
        CartItem {
            name: name.to_string(),
            price,
            quantity,
        }
    }

    // =========================================================================
    // subtotal tests
    // =========================================================================

    #[test]
    fn subtotal_of_empty_cart_is_zero() {
        assert_eq!(subtotal(&[]), Decimal::ZERO);
    }

    #[test]
    fn subtotal_sums_price_times_quantity() {
        let cart = vec![
            item("Mango", dec!(10.00), 2),
            item("Dried Fish", dec!(5.50), 1),
        ];

        assert_eq!(subtotal(&cart), dec!(25.50));
    }

    #[test]
    fn subtotal_is_exact_for_repeating_fractions() {
        let cart = vec![item("Candy", dec!(0.1), 3)];

        assert_eq!(subtotal(&cart), dec!(0.3));
    }

    // =========================================================================
    // CheckoutSummary tests
    // =========================================================================

    #[test]
    fn grand_total_adds_shipping_fee_to_subtotal() {
        let cart = vec![
            item("Mango", dec!(10.00), 2),
            item("Dried Fish", dec!(5.50), 1),
        ];

        let summary = CheckoutSummary::compute(&cart, dec!(50));

        assert_eq!(summary.subtotal, dec!(25.50));
        assert_eq!(summary.shipping_fee, dec!(50));
        assert_eq!(summary.grand_total, dec!(75.50));
        assert_eq!(format_php(summary.grand_total), "₱75.50");
    }

    #[test]
    fn zero_fee_grand_total_equals_subtotal() {
        let cart = vec![item("Mango", dec!(10.00), 2)];

        let summary = CheckoutSummary::compute(&cart, Decimal::ZERO);

        assert_eq!(summary.grand_total, summary.subtotal);
    }

    #[test]
    fn summation_happens_before_any_rounding() {
        // Two lines at 10.004 sum to 20.008, displaying as ₱20.01.
        // Rounding each line first would give 10.00 + 10.00 = ₱20.00.
        let cart = vec![
            item("Thread", dec!(10.004), 1),
            item("Needle", dec!(10.004), 1),
        ];

        let summary = CheckoutSummary::compute(&cart, Decimal::ZERO);
        let rounded_then_summed = cart
            .iter()
            .fold(Decimal::ZERO, |acc, i| {
                acc + crate::currency::round_half_up(i.line_total())
            });

        assert_eq!(summary.subtotal, dec!(20.008));
        assert_eq!(format_php(summary.subtotal), "₱20.01");
        assert_eq!(format_php(rounded_then_summed), "₱20.00");
    }
}
