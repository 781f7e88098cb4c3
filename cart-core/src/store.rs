//! The persisted cart.
//!
//! [`CartStore`] owns the in-memory row sequence and the injected storage
//! backend. Every mutating call writes the whole cart back through the
//! repository before returning, so the saved state always mirrors the
//! in-memory state an operation leaves behind.

use thiserror::Error;
use tracing::debug;

use crate::db::repository::{CartRepository, RepositoryError};
use crate::models::CartItem;

#[derive(Debug, Error)]
pub enum CartError {
    #[error("no cart row at index {index} (cart has {len} rows)")]
    OutOfBounds { index: usize, len: usize },

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Ordered cart rows backed by a storage repository.
///
/// Row position is identity: `remove(1)` shifts every later row left, and a
/// row's number in the UI is just its index plus one.
pub struct CartStore {
    items: Vec<CartItem>,
    repo: Box<dyn CartRepository>,
}

impl CartStore {
    /// Loads the saved cart, or starts empty when nothing usable is saved.
    ///
    /// The repository contract makes corrupt saved state indistinguishable
    /// from no saved state, so this only fails on real backend errors.
    pub async fn load(repo: Box<dyn CartRepository>) -> Result<Self, CartError> {
        let items = repo.load_cart().await?;
        debug!(rows = items.len(), "cart loaded");
        Ok(Self { items, repo })
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&CartItem> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Appends a row and saves.
    pub async fn add(&mut self, item: CartItem) -> Result<(), CartError> {
        self.items.push(item);
        self.persist().await
    }

    /// Replaces the row at `index` in place and saves. Order and length are
    /// unchanged.
    pub async fn update(&mut self, index: usize, item: CartItem) -> Result<(), CartError> {
        let len = self.items.len();
        let slot = self
            .items
            .get_mut(index)
            .ok_or(CartError::OutOfBounds { index, len })?;
        *slot = item;
        self.persist().await
    }

    /// Removes and returns the row at `index`, shifting later rows left, and
    /// saves.
    pub async fn remove(&mut self, index: usize) -> Result<CartItem, CartError> {
        if index >= self.items.len() {
            return Err(CartError::OutOfBounds {
                index,
                len: self.items.len(),
            });
        }
        let removed = self.items.remove(index);
        self.persist().await?;
        Ok(removed)
    }

    /// Empties the cart and saves the empty state.
    pub async fn clear(&mut self) -> Result<(), CartError> {
        self.items.clear();
        self.persist().await
    }

    // If the save errors, the in-memory change stands and the error
    // propagates; the next successful mutation rewrites the full state.
    async fn persist(&self) -> Result<(), CartError> {
        self.repo.save_cart(&self.items).await?;
        debug!(rows = self.items.len(), "cart saved");
        Ok(())
    }
}
