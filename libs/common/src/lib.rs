//! Common library for the Employee Management API
//!
//! This crate provides shared functionality used by the services of the
//! workspace, including document store connectivity and error handling.
//!
//! ```rust,no_run
//! use common::database::{DatabaseConfig, init_database, health_check};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::from_env()?;
//!     let database = init_database(&config).await?;
//!     let is_healthy = health_check(&database).await?;
//!     println!("Database health check: {}", is_healthy);
//!     Ok(())
//! }
//! ```

pub mod database;
pub mod error;
