use crate::catalog::{DEFAULT_EARLIEST_RELEASE, DEFAULT_LATEST_RELEASE};

const DEFAULT_CATALOG_SOURCE: &str = "data.csv";

/// Configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub catalog_source: String,
    pub default_latest_release: String,
    pub default_earliest_release: String,
}

impl Config {
    /// Build a config from a variable lookup. Missing or blank values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Config {
            catalog_source: var("PUMP_CATALOG_SOURCE", DEFAULT_CATALOG_SOURCE),
            default_latest_release: var("PUMP_DEFAULT_LATEST_RELEASE", DEFAULT_LATEST_RELEASE),
            default_earliest_release: var("PUMP_DEFAULT_EARLIEST_RELEASE", DEFAULT_EARLIEST_RELEASE),
        }
    }
}

/// Load configuration from `.env` and environment
pub fn load_config() -> Config {
    // Load `.env` file if present
    dotenv::dotenv().ok();
    Config::from_lookup(|key| std::env::var(key).ok())
}
