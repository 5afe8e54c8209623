//! Database module for handling MongoDB connections
//!
//! This module provides connection configuration, client initialization and
//! health checks for the document store.

use crate::error::{DatabaseError, DatabaseResult};
use mongodb::{Client, Database, bson::doc, options::ClientOptions};
use std::env;
use tracing::info;

/// Database used when the connection string does not name one
pub const DEFAULT_DATABASE: &str = "employee_management";

/// Database configuration struct
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// MongoDB connection string
    pub mongo_uri: String,
    /// Fallback database name
    pub database_name: String,
    /// Maximum number of pooled connections per server
    pub max_pool_size: u32,
}

impl DatabaseConfig {
    /// Create a new DatabaseConfig with default pool settings
    pub fn new(mongo_uri: impl Into<String>) -> Self {
        Self {
            mongo_uri: mongo_uri.into(),
            database_name: DEFAULT_DATABASE.to_string(),
            max_pool_size: 10,
        }
    }

    /// Create a new DatabaseConfig from environment variables
    ///
    /// # Environment Variables
    /// - `MONGO_URI`: MongoDB connection string (required)
    /// - `MONGO_DATABASE`: Database name when the URI names none (default: "employee_management")
    /// - `MONGO_MAX_POOL_SIZE`: Maximum number of connections (default: 10)
    pub fn from_env() -> DatabaseResult<Self> {
        let mongo_uri = env::var("MONGO_URI").map_err(|_| {
            DatabaseError::Configuration(
                "MONGO_URI is undefined. Check your .env file.".to_string(),
            )
        })?;

        let database_name =
            env::var("MONGO_DATABASE").unwrap_or_else(|_| DEFAULT_DATABASE.to_string());

        let max_pool_size = env::var("MONGO_MAX_POOL_SIZE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(10);

        Ok(Self {
            mongo_uri,
            database_name,
            max_pool_size,
        })
    }
}

/// Initialize a MongoDB client and select the application database
///
/// The database named in the connection string wins over
/// [`DatabaseConfig::database_name`].
///
/// # Arguments
///
/// * `config` - Database configuration
///
/// # Returns
///
/// * `DatabaseResult<Database>` - Handle to the application database or error
pub async fn init_database(config: &DatabaseConfig) -> DatabaseResult<Database> {
    let mut options = ClientOptions::parse(&config.mongo_uri)
        .await
        .map_err(DatabaseError::Connection)?;

    options.max_pool_size = Some(config.max_pool_size);
    if options.app_name.is_none() {
        options.app_name = Some("employee-api".to_string());
    }

    let database_name = options
        .default_database
        .clone()
        .unwrap_or_else(|| config.database_name.clone());

    let client = Client::with_options(options).map_err(DatabaseError::Connection)?;
    info!("MongoDB client initialized for database: {}", database_name);

    Ok(client.database(&database_name))
}

/// Check database connectivity
///
/// # Arguments
///
/// * `database` - Application database handle
///
/// # Returns
///
/// * `DatabaseResult<bool>` - True if the server answered the ping
pub async fn health_check(database: &Database) -> DatabaseResult<bool> {
    database
        .run_command(doc! { "ping": 1 })
        .await
        .map_err(DatabaseError::Query)?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_database_config_from_env() {
        unsafe {
            std::env::set_var("MONGO_URI", "mongodb://localhost:27017");
            std::env::remove_var("MONGO_DATABASE");
            std::env::remove_var("MONGO_MAX_POOL_SIZE");
        }

        let config = DatabaseConfig::from_env().expect("Failed to create database config");
        assert_eq!(config.mongo_uri, "mongodb://localhost:27017");
        assert_eq!(config.database_name, DEFAULT_DATABASE);
        assert_eq!(config.max_pool_size, 10);

        unsafe {
            std::env::remove_var("MONGO_URI");
        }
    }

    #[test]
    #[serial]
    fn test_database_config_requires_uri() {
        unsafe {
            std::env::remove_var("MONGO_URI");
        }

        let result = DatabaseConfig::from_env();
        assert!(matches!(result, Err(DatabaseError::Configuration(_))));
    }

    #[test]
    fn test_database_config_new_defaults() {
        let config = DatabaseConfig::new("mongodb://db:27017/hr");
        assert_eq!(config.database_name, DEFAULT_DATABASE);
        assert_eq!(config.max_pool_size, 10);
    }
}
