//! Custom error types for the API service

use common::error::DatabaseError;
use thiserror::Error;

use crate::{password::PasswordError, uploads::UploadError};

/// Errors raised while resolving GraphQL operations
///
/// Resolvers return `async_graphql::Result`; the message of each variant is
/// what clients see in the `errors` array.
#[derive(Error, Debug)]
pub enum ApiError {
    /// No user is registered under the given email
    #[error("User not found")]
    UserNotFound,

    /// Password did not match the stored digest
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Identifier is not a valid ObjectId
    #[error("Invalid id: {0}")]
    InvalidId(String),

    /// Schema-level validation failure
    #[error("{entity} validation failed: {details}")]
    Validation {
        entity: &'static str,
        details: String,
    },

    /// Database error
    #[error(transparent)]
    Database(#[from] DatabaseError),

    /// Photo storage error
    #[error(transparent)]
    Upload(#[from] UploadError),

    /// Password hashing error
    #[error(transparent)]
    Password(#[from] PasswordError),
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
