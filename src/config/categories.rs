//! Default category configuration loaded from config.toml
//!
//! The categories listed here seed the category table on first run. When no
//! configuration file exists the built-in list is used.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Categories created when the category table is empty.
pub const DEFAULT_CATEGORIES: [&str; 14] = [
    "Ready meals",
    "Fruit and vegetables",
    "Dairy",
    "Sweets and desserts",
    "Meat and poultry",
    "Bread and bakery",
    "Fish and seafood",
    "Cheese",
    "Frozen food",
    "Drinks",
    "Cafes and restaurants",
    "Household chemicals",
    "Pharmacy and doctors",
    "Travel",
];

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Categories to seed, in order
    #[serde(default)]
    pub categories: Vec<CategoryConfig>,
}

/// Configuration for a single category
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct CategoryConfig {
    /// Name of the category
    pub name: String,
    /// Name of an earlier entry to nest this category under
    #[serde(default)]
    pub parent: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            categories: DEFAULT_CATEGORIES
                .iter()
                .map(|name| CategoryConfig {
                    name: (*name).to_string(),
                    parent: None,
                })
                .collect(),
        }
    }
}

/// Loads category configuration from a TOML file
///
/// # Errors
/// Returns an error if the file cannot be read or the TOML is invalid.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();
    debug!("Loading configuration from {:?}", path);
    let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path.display()),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse {}: {e}", path.display()),
    })
}

/// Loads `path` if it exists, otherwise returns the built-in defaults.
pub fn load_config_or_default<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();
    if path.exists() {
        load_config(path)
    } else {
        info!(
            "No configuration at {}; using built-in categories.",
            path.display()
        );
        Ok(Config::default())
    }
}
