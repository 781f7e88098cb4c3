pub mod app;
pub mod config;
pub mod logging;
pub mod render;

pub use app::CartApp;
