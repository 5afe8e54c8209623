//! Service configuration loaded from the environment

use std::{net::SocketAddr, path::PathBuf};

use common::{
    database::{DEFAULT_DATABASE, DatabaseConfig},
    error::DatabaseError,
};
use config::{Config, ConfigError, Environment};
use serde::Deserialize;

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 5000;

/// Cap on request bodies, which carry inline photos
pub const BODY_LIMIT_BYTES: usize = 10 * 1024 * 1024;

/// Service configuration
///
/// # Environment Variables
/// - `MONGO_URI`: MongoDB connection string (required outside serverless mode)
/// - `MONGO_DATABASE`: Database name when the URI names none (default: "employee_management")
/// - `MONGO_MAX_POOL_SIZE`: Maximum pooled connections (default: 10)
/// - `PORT`: HTTP port (default: 5000)
/// - `UPLOADS_DIR`: Directory for stored photos (default: "uploads")
/// - `VERCEL` / `SERVERLESS`: Serverless platform marker
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub mongo_uri: Option<String>,
    pub mongo_database: String,
    pub mongo_max_pool_size: u32,
    pub port: u16,
    pub uploads_dir: PathBuf,
    #[serde(default)]
    pub vercel: Option<String>,
    #[serde(default)]
    pub serverless: Option<String>,
}

impl AppConfig {
    /// Load configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_environment(Environment::default())
    }

    /// Load configuration from an explicit environment source
    pub fn from_environment(environment: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("mongo_database", DEFAULT_DATABASE)?
            .set_default("mongo_max_pool_size", 10)?
            .set_default("port", i64::from(DEFAULT_PORT))?
            .set_default("uploads_dir", "uploads")?
            .add_source(environment)
            .build()?
            .try_deserialize()
    }

    /// Whether a serverless platform marker is set
    pub fn is_serverless(&self) -> bool {
        [&self.vercel, &self.serverless]
            .into_iter()
            .flatten()
            .any(|flag| is_truthy(flag))
    }

    /// Static `/uploads` serving only happens outside serverless mode
    pub fn serve_uploads(&self) -> bool {
        !self.is_serverless()
    }

    pub fn bind_address(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }

    /// Document store settings; fails when `MONGO_URI` is missing
    pub fn database_config(&self) -> Result<DatabaseConfig, DatabaseError> {
        let mongo_uri = self
            .mongo_uri
            .clone()
            .filter(|uri| !uri.is_empty())
            .ok_or_else(|| {
                DatabaseError::Configuration(
                    "MONGO_URI is undefined. Check your .env file.".to_string(),
                )
            })?;

        Ok(DatabaseConfig {
            mongo_uri,
            database_name: self.mongo_database.clone(),
            max_pool_size: self.mongo_max_pool_size,
        })
    }
}

fn is_truthy(flag: &str) -> bool {
    !matches!(
        flag.trim().to_ascii_lowercase().as_str(),
        "" | "0" | "false" | "no"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn load(vars: &[(&str, &str)]) -> AppConfig {
        let source = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        AppConfig::from_environment(Environment::default().source(Some(source))).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("MONGO_URI", "mongodb://localhost:27017")]);

        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.uploads_dir, PathBuf::from("uploads"));
        assert_eq!(config.mongo_database, DEFAULT_DATABASE);
        assert_eq!(config.mongo_max_pool_size, 10);
        assert!(!config.is_serverless());
        assert!(config.serve_uploads());
        assert_eq!(config.bind_address().to_string(), "0.0.0.0:5000");
    }

    #[test]
    fn test_custom_values() {
        let config = load(&[
            ("MONGO_URI", "mongodb://db:27017/hr"),
            ("MONGO_DATABASE", "staff"),
            ("PORT", "8080"),
            ("UPLOADS_DIR", "/var/lib/photos"),
        ]);

        assert_eq!(config.port, 8080);
        assert_eq!(config.uploads_dir, PathBuf::from("/var/lib/photos"));

        let database = config.database_config().unwrap();
        assert_eq!(database.mongo_uri, "mongodb://db:27017/hr");
        assert_eq!(database.database_name, "staff");
    }

    #[test]
    fn test_missing_mongo_uri() {
        let config = load(&[]);
        assert!(config.mongo_uri.is_none());
        assert!(matches!(
            config.database_config(),
            Err(DatabaseError::Configuration(_))
        ));
    }

    #[test]
    fn test_serverless_markers() {
        assert!(load(&[("VERCEL", "1")]).is_serverless());
        assert!(load(&[("SERVERLESS", "true")]).is_serverless());
        assert!(!load(&[("SERVERLESS", "false")]).is_serverless());
        assert!(!load(&[("VERCEL", "1")]).serve_uploads());
    }

    #[test]
    #[serial]
    fn test_from_env() {
        unsafe {
            std::env::set_var("MONGO_URI", "mongodb://env-host:27017");
            std::env::set_var("PORT", "5055");
        }

        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.mongo_uri.as_deref(), Some("mongodb://env-host:27017"));
        assert_eq!(config.port, 5055);

        unsafe {
            std::env::remove_var("MONGO_URI");
            std::env::remove_var("PORT");
        }
    }
}
