use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Shipping reference row: delivery town and its flat fee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Town {
    pub name: String,
    pub fee: Decimal,
}
