//! Application state shared across resolvers and handlers

use std::sync::Arc;

use mongodb::Database;

use crate::{
    password::CredentialHasher,
    repositories::{EmployeeStore, UserStore},
    uploads::PhotoStorage,
};

/// Application state shared across resolvers and handlers
#[derive(Clone)]
pub struct AppState {
    pub user_store: Arc<dyn UserStore>,
    pub employee_store: Arc<dyn EmployeeStore>,
    pub hasher: Arc<dyn CredentialHasher>,
    pub photos: PhotoStorage,
    /// Present when backed by MongoDB; used for health reporting
    pub database: Option<Database>,
}

impl AppState {
    pub fn new(
        user_store: Arc<dyn UserStore>,
        employee_store: Arc<dyn EmployeeStore>,
        hasher: Arc<dyn CredentialHasher>,
        photos: PhotoStorage,
    ) -> Self {
        Self {
            user_store,
            employee_store,
            hasher,
            photos,
            database: None,
        }
    }

    pub fn with_database(mut self, database: Database) -> Self {
        self.database = Some(database);
        self
    }
}
