//! User model and related functionality

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// User entity as stored in the `users` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub username: String,
    pub email: String,
    /// Password digest, never the plaintext
    pub password: String,
}

/// New user creation payload
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

impl NewUser {
    pub fn into_user(self, id: ObjectId) -> User {
        User {
            id,
            username: self.username,
            email: self.email,
            password: self.password_hash,
        }
    }
}
