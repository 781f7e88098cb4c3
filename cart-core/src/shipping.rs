//! Town-to-fee shipping lookup.

use rust_decimal::Decimal;
use tracing::debug;

use crate::models::Town;

/// Flat shipping fee per delivery town.
///
/// Lookups are exact (case-sensitive) name matches. A name that is not in
/// the table resolves to `None`, which callers treat as "leave the current
/// fee alone" rather than resetting it.
///
/// The two built-in towns ship with the application; rows loaded from the
/// `towns` reference table extend or override them at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShippingTable {
    towns: Vec<Town>,
}

impl ShippingTable {
    /// The built-in mapping: Tubigon ₱50, Calape ₱100.
    pub fn builtin() -> Self {
        Self {
            towns: vec![
                Town {
                    name: "Tubigon".to_string(),
                    fee: Decimal::from(50),
                },
                Town {
                    name: "Calape".to_string(),
                    fee: Decimal::from(100),
                },
            ],
        }
    }

    /// An empty table. Useful when the full mapping comes from the database.
    pub fn empty() -> Self {
        Self { towns: Vec::new() }
    }

    /// Adds a town, or replaces the fee of an existing town with the same
    /// name. Insertion order is preserved for display.
    pub fn upsert(&mut self, town: Town) {
        match self.towns.iter_mut().find(|t| t.name == town.name) {
            Some(existing) => {
                debug!(town = %town.name, fee = %town.fee, "shipping fee overridden");
                existing.fee = town.fee;
            }
            None => self.towns.push(town),
        }
    }

    /// The flat fee for `name`, or `None` when the town is unknown.
    pub fn fee_for(&self, name: &str) -> Option<Decimal> {
        self.towns.iter().find(|t| t.name == name).map(|t| t.fee)
    }

    /// All known towns, in display order.
    pub fn towns(&self) -> &[Town] {
        &self.towns
    }

    pub fn len(&self) -> usize {
        self.towns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.towns.is_empty()
    }
}

impl Default for ShippingTable {
    fn default() -> Self {
        Self::builtin()
    }
}
