/// Database connection and table creation
pub mod database;

/// Default category configuration from config.toml
pub mod categories;

pub use categories::{CategoryConfig, Config};
