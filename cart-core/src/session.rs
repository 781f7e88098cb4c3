//! Input and edit-mode handling for the cart form.
//!
//! A [`CartSession`] holds what the page held between clicks: the three text
//! inputs, the optional editing index, the shipping table, and the current
//! shipping fee. It owns no cart rows; a successful [`CartSession::commit`]
//! hands back a [`Commit`] for the caller to apply to the [`crate::CartStore`].

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

use crate::currency::parse_amount;
use crate::models::CartItem;
use crate::shipping::ShippingTable;

/// Identifies which input a change event came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    Name,
    Price,
    Quantity,
    Town,
    Payment,
}

/// Whether a commit will append a new row or replace an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    Adding,
    Editing(usize),
}

/// Outcome of a commit whose inputs parsed cleanly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Commit {
    /// All three fields were filled in add mode: append this item.
    Append(CartItem),
    /// All three fields were filled in edit mode: replace the row at `index`.
    Replace { index: usize, item: CartItem },
    /// At least one field was empty. Nothing was parsed, cleared, or
    /// committed, and no message is owed to the user.
    Incomplete,
}

/// A filled-in form whose numeric fields did not parse. The form keeps its
/// values so the user can fix the offending field.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("price '{0}' is not a valid amount")]
    InvalidPrice(String),
    #[error("quantity '{0}' is not a whole number")]
    InvalidQuantity(String),
}

/// Form state plus the shipping fee it steers.
#[derive(Debug, Clone)]
pub struct CartSession {
    name: String,
    price: String,
    quantity: String,
    editing: Option<usize>,
    shipping: ShippingTable,
    shipping_fee: Decimal,
}

impl CartSession {
    /// A fresh session in add mode with an empty form and a zero fee.
    pub fn new(shipping: ShippingTable) -> Self {
        Self {
            name: String::new(),
            price: String::new(),
            quantity: String::new(),
            editing: None,
            shipping,
            shipping_fee: Decimal::ZERO,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> &str {
        &self.price
    }

    pub fn quantity(&self) -> &str {
        &self.quantity
    }

    pub fn mode(&self) -> EditMode {
        match self.editing {
            Some(index) => EditMode::Editing(index),
            None => EditMode::Adding,
        }
    }

    pub fn shipping_fee(&self) -> Decimal {
        self.shipping_fee
    }

    pub fn shipping_table(&self) -> &ShippingTable {
        &self.shipping
    }

    /// Routes a change event to its input field.
    ///
    /// One handler serves every input on the page, and the town check runs on
    /// every event: any value that names a known town moves the shipping fee,
    /// whichever field it arrived through. Unknown towns leave the fee alone,
    /// and the payment selection sets no state at all.
    pub fn on_field_change(&mut self, field: InputField, value: &str) {
        match field {
            InputField::Name => self.name = value.to_string(),
            InputField::Price => self.price = value.to_string(),
            InputField::Quantity => self.quantity = value.to_string(),
            InputField::Town | InputField::Payment => {}
        }
        if let Some(fee) = self.shipping.fee_for(value) {
            debug!(town = value, fee = %fee, "shipping fee updated");
            self.shipping_fee = fee;
        }
    }

    /// Loads a cart row into the form and switches to edit mode.
    ///
    /// Numeric values appear as their stored text (`10.00` stays `10.00`).
    /// Calling this while already editing simply retargets the session;
    /// there is no cancel, only committing or editing something else.
    pub fn begin_edit(&mut self, index: usize, item: &CartItem) {
        self.name = item.name.clone();
        self.price = item.price.to_string();
        self.quantity = item.quantity.to_string();
        self.editing = Some(index);
        debug!(index, "editing cart row");
    }

    /// Tries to turn the form into a cart mutation.
    ///
    /// The guard is presence only: if any of the three fields is empty this
    /// is a silent no-op ([`Commit::Incomplete`]) and the form keeps its
    /// state. With all fields present, price and quantity must parse; a
    /// parse failure reports a [`SessionError`] and also leaves the form
    /// untouched. On success the form and editing index are cleared and the
    /// caller receives the append/replace to apply.
    pub fn commit(&mut self) -> Result<Commit, SessionError> {
        if self.name.is_empty() || self.price.is_empty() || self.quantity.is_empty() {
            debug!("commit skipped: form incomplete");
            return Ok(Commit::Incomplete);
        }

        let price = parse_amount(&self.price)
            .map_err(|_| SessionError::InvalidPrice(self.price.clone()))?;
        let quantity = self
            .quantity
            .trim()
            .parse::<u32>()
            .map_err(|_| SessionError::InvalidQuantity(self.quantity.clone()))?;

        let item = CartItem {
            name: self.name.clone(),
            price,
            quantity,
        };

        let target = self.editing.take();
        self.name.clear();
        self.price.clear();
        self.quantity.clear();

        Ok(match target {
            Some(index) => Commit::Replace { index, item },
            None => Commit::Append(item),
        })
    }
}
