//! Application assembly
//!
//! [`init`] wires the document store, photo storage and GraphQL schema into
//! a router. The binary serves it; serverless hosts drive it directly.

use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use common::database::{health_check, init_database};
use tracing::info;

use crate::{
    config::AppConfig,
    password::BcryptHasher,
    repositories::{EmployeeRepository, UserRepository},
    routes,
    state::AppState,
    uploads::PhotoStorage,
};

/// Connect to MongoDB and build the application router
pub async fn init(config: &AppConfig) -> Result<Router> {
    let database = init_database(&config.database_config()?).await?;

    if health_check(&database).await? {
        info!("MongoDB connected successfully");
    } else {
        anyhow::bail!("Failed to connect to MongoDB");
    }

    let user_repository = UserRepository::new(&database);
    user_repository.ensure_indexes().await?;

    let employee_repository = EmployeeRepository::new(&database);
    employee_repository.ensure_indexes().await?;

    let photos = PhotoStorage::init(&config.uploads_dir).await?;

    let state = AppState::new(
        Arc::new(user_repository),
        Arc::new(employee_repository),
        Arc::new(BcryptHasher::default()),
        photos,
    )
    .with_database(database);

    info!("API service initialized successfully");
    Ok(routes::create_router(state, config.serve_uploads()))
}
