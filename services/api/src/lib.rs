//! Employee Management API
//!
//! GraphQL service over MongoDB for employee records and user accounts,
//! with inline base64 photo uploads stored on local disk.

pub mod app;
pub mod config;
pub mod error;
pub mod graphql;
pub mod models;
pub mod password;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod uploads;
pub mod validation;

pub use state::AppState;
