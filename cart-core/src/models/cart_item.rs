use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One cart line: item name, unit price, quantity.
///
/// This struct is also the persisted wire format: the saved cart is a JSON
/// array of these objects under a single storage key, with `price` as a JSON
/// number. Items carry no id; a row is identified by its position in the
/// cart, and deleting row *i* shifts every later row left by one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub quantity: u32,
}

impl CartItem {
    /// Price × quantity, exact. Display rounding happens at formatting time.
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use cart_core::models::CartItem;
    ///
    /// let item = CartItem { name: "Mango".to_string(), price: dec!(10.50), quantity: 3 };
    /// assert_eq!(item.line_total(), dec!(31.50));
    /// ```
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use serde_json::json;

    use super::*;

    fn item(name: &str, price: Decimal, quantity: u32) -> CartItem {
        CartItem {
            name: name.to_string(),
            price,
            quantity,
        }
    }

    // =========================================================================
    // line_total tests
    // =========================================================================

    #[test]
    fn line_total_multiplies_price_by_quantity() {
        let result = item("Mango", dec!(10.00), 2).line_total();

        assert_eq!(result, dec!(20.00));
    }

    #[test]
    fn line_total_keeps_sub_centavo_precision() {
        // 3 × 0.1 is exactly 0.3 in decimal arithmetic, and prices finer
        // than two decimals are carried through unrounded.
        assert_eq!(item("Rice", dec!(0.1), 3).line_total(), dec!(0.3));
        assert_eq!(item("Thread", dec!(10.004), 2).line_total(), dec!(20.008));
    }

    // =========================================================================
    // persisted layout tests
    // =========================================================================

    #[test]
    fn serializes_price_as_json_number() {
        let value = serde_json::to_value(item("Mango", dec!(10.50), 2))
            .expect("cart item should serialize");

        assert_eq!(
            value,
            json!({ "name": "Mango", "price": 10.5, "quantity": 2 })
        );
    }

    #[test]
    fn deserializes_fractional_and_integer_prices() {
        let fractional: CartItem = serde_json::from_str(
            r#"{"name":"Mango","price":10.5,"quantity":2}"#,
        )
        .expect("fractional price should deserialize");
        let integer: CartItem =
            serde_json::from_str(r#"{"name":"Rice","price":100,"quantity":1}"#)
                .expect("integer price should deserialize");

        assert_eq!(fractional.price, dec!(10.5));
        assert_eq!(integer.price, dec!(100));
    }

    #[test]
    fn round_trips_through_json() {
        let items = vec![
            item("Mango", dec!(10.00), 2),
            item("Dried Fish", dec!(5.50), 1),
        ];

        let encoded = serde_json::to_string(&items).expect("cart should serialize");
        let decoded: Vec<CartItem> =
            serde_json::from_str(&encoded).expect("cart should deserialize");

        assert_eq!(decoded, items);
    }

    #[test]
    fn rejects_rows_missing_required_fields() {
        let result = serde_json::from_str::<CartItem>(r#"{"name":"Mango","price":10.5}"#);

        assert!(result.is_err());
    }
}
