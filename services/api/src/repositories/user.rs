//! User repository for MongoDB

use async_trait::async_trait;
use common::error::{DatabaseError, DatabaseResult};
use mongodb::{
    Collection, Database,
    bson::{doc, oid::ObjectId},
};
use tracing::info;

use super::{USER_UNIQUE_FIELDS, UserStore, ensure_unique_indexes};
use crate::models::{NewUser, User};

const COLLECTION: &str = "users";

/// User repository
#[derive(Clone)]
pub struct UserRepository {
    collection: Collection<User>,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection(COLLECTION),
        }
    }

    /// Create the unique indexes on email and username
    pub async fn ensure_indexes(&self) -> DatabaseResult<()> {
        ensure_unique_indexes(&self.collection, USER_UNIQUE_FIELDS).await
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn create(&self, new_user: &NewUser) -> DatabaseResult<User> {
        info!("Creating new user: {}", new_user.username);

        let user = new_user.clone().into_user(ObjectId::new());
        self.collection
            .insert_one(&user)
            .await
            .map_err(|e| DatabaseError::from_write(e, USER_UNIQUE_FIELDS))?;

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> DatabaseResult<Option<User>> {
        info!("Finding user by email: {}", email);

        self.collection
            .find_one(doc! { "email": email })
            .await
            .map_err(DatabaseError::Query)
    }
}
