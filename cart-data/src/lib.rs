pub mod loader;

pub use loader::{ShippingRateLoader, ShippingRateLoaderError, ShippingRateRecord};
