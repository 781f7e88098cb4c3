use async_trait::async_trait;
use thiserror::Error;

use crate::models::{CartItem, Town};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Record not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Storage backend for the cart and the shipping reference data.
#[async_trait]
pub trait CartRepository: Send + Sync {
    // Saved cart: one serialized document under a single fixed key

    /// Reads the saved cart. A missing entry, or an entry whose contents do
    /// not decode, counts as "no saved cart" and yields an empty list rather
    /// than an error; only genuine backend failures may error.
    async fn load_cart(&self) -> Result<Vec<CartItem>, RepositoryError>;

    /// Replaces the saved cart with `items` in full. Called after every
    /// mutation; there is no partial write.
    async fn save_cart(&self, items: &[CartItem]) -> Result<(), RepositoryError>;

    // Shipping reference data
    async fn list_towns(&self) -> Result<Vec<Town>, RepositoryError>;
    async fn get_town(&self, name: &str) -> Result<Town, RepositoryError>;
    async fn upsert_town(&self, town: &Town) -> Result<(), RepositoryError>;
}
