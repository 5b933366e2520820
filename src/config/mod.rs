//! Configuration modules.

pub mod cache;
pub mod database;
pub mod logging;
pub mod settings;

pub use cache::CacheSettings;
pub use database::{mask_url, DatabaseSettings};
pub use logging::LoggingConfig;
pub use settings::Settings;
