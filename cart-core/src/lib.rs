pub mod currency;
pub mod db;
pub mod models;
pub mod session;
pub mod shipping;
pub mod store;
pub mod totals;

pub use db::repository::{CartRepository, RepositoryError};
pub use models::*;
pub use session::{CartSession, Commit, EditMode, InputField, SessionError};
pub use shipping::ShippingTable;
pub use store::{CartError, CartStore};
pub use totals::CheckoutSummary;
