//! Data source configuration
//!
//! Connection details for the database the rendered dashboard points at.
//! Every value is required: a missing variable is an explicit error rather
//! than a silent fallback to baked-in defaults.

use thiserror::Error;

/// Configuration error type
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Required environment variable absent or empty
    #[error("missing required environment variable: {0}")]
    Missing(&'static str),
}

/// Connection details embedded in built dashboard documents and used to
/// resolve data source credentials
#[derive(Debug, Clone)]
pub struct DataSourceSettings {
    /// Database host the dashboard renderer connects to
    pub host: String,

    /// Database name
    pub database: String,

    /// Username for the data source credential
    pub username: String,

    /// Password for the data source credential
    pub password: String,
}

impl DataSourceSettings {
    /// Create settings from explicit values
    pub fn new(
        host: impl Into<String>,
        database: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            database: database.into(),
            username: username.into(),
            password: password.into(),
        }
    }

    /// Read settings from `GRID_DB_HOST`, `GRID_DB_NAME`, `GRID_DB_USERNAME`
    /// and `GRID_DB_PASSWORD`, failing on the first missing value
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let require = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        Ok(Self {
            host: require("GRID_DB_HOST")?,
            database: require("GRID_DB_NAME")?,
            username: require("GRID_DB_USERNAME")?,
            password: require("GRID_DB_PASSWORD")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn reads_all_values() {
        let vars = lookup_from(&[
            ("GRID_DB_HOST", "db.example.com"),
            ("GRID_DB_NAME", "northwind"),
            ("GRID_DB_USERNAME", "reader"),
            ("GRID_DB_PASSWORD", "s3cret"),
        ]);

        let settings = DataSourceSettings::from_lookup(|name| vars.get(name).cloned()).unwrap();
        assert_eq!(settings.host, "db.example.com");
        assert_eq!(settings.database, "northwind");
    }

    #[test]
    fn missing_value_fails_fast() {
        let vars = lookup_from(&[("GRID_DB_HOST", "db.example.com")]);

        let error = DataSourceSettings::from_lookup(|name| vars.get(name).cloned()).unwrap_err();
        assert_eq!(error, ConfigError::Missing("GRID_DB_NAME"));
    }

    #[test]
    fn empty_value_counts_as_missing() {
        let vars = lookup_from(&[
            ("GRID_DB_HOST", "db.example.com"),
            ("GRID_DB_NAME", "northwind"),
            ("GRID_DB_USERNAME", ""),
            ("GRID_DB_PASSWORD", "s3cret"),
        ]);

        let error = DataSourceSettings::from_lookup(|name| vars.get(name).cloned()).unwrap_err();
        assert_eq!(error, ConfigError::Missing("GRID_DB_USERNAME"));
    }
}
