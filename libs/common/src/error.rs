//! Custom error types for the common library
//!
//! This module defines application-specific error types that can be used
//! throughout the application.

use mongodb::error::{Error as MongoError, ErrorKind, WriteFailure};
use thiserror::Error;

/// Server error code reported for unique index violations
pub const DUPLICATE_KEY_CODE: i32 = 11000;

/// Custom error type for database operations
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error occurred while connecting to the document store
    #[error("Database connection error: {0}")]
    Connection(#[source] MongoError),

    /// Error occurred during query execution
    #[error("Database query error: {0}")]
    Query(#[source] MongoError),

    /// A unique index rejected the write
    #[error("Duplicate value for {field}")]
    Duplicate { field: String },

    /// Configuration error
    #[error("Database configuration error: {0}")]
    Configuration(String),
}

impl DatabaseError {
    /// Classify a failed write, turning unique index violations into
    /// [`DatabaseError::Duplicate`].
    ///
    /// Unique indexes are expected to be named `<field>_unique`; the first
    /// entry of `unique_fields` whose index name appears in the server
    /// message is reported.
    pub fn from_write(error: MongoError, unique_fields: &[&str]) -> Self {
        match duplicate_key_message(&error) {
            Some(message) => {
                let field = unique_fields
                    .iter()
                    .find(|field| message.contains(&unique_index_name(field)))
                    .map(|field| field.to_string())
                    .unwrap_or_else(|| "key".to_string());
                DatabaseError::Duplicate { field }
            }
            None => DatabaseError::Query(error),
        }
    }
}

/// Name given to the unique index on `field`
pub fn unique_index_name(field: &str) -> String {
    format!("{field}_unique")
}

fn duplicate_key_message(error: &MongoError) -> Option<&str> {
    match error.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(e)) if e.code == DUPLICATE_KEY_CODE => {
            Some(&e.message)
        }
        ErrorKind::Command(e) if e.code == DUPLICATE_KEY_CODE => Some(&e.message),
        _ => None,
    }
}

/// Type alias for Result with DatabaseError
pub type DatabaseResult<T> = Result<T, DatabaseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_index_name() {
        assert_eq!(unique_index_name("email"), "email_unique");
    }

    #[test]
    fn test_duplicate_display() {
        let error = DatabaseError::Duplicate {
            field: "email".to_string(),
        };
        assert_eq!(error.to_string(), "Duplicate value for email");
    }
}
