//! GraphQL schema for the Employee Management API
//!
//! The schema is assembled once at startup by [`build_schema`]; resolvers
//! reach the stores and photo storage through the [`AppState`] registered as
//! schema data.

use async_graphql::{EmptySubscription, ID, Schema};
use mongodb::bson::oid::ObjectId;

use crate::{error::ApiError, state::AppState};

pub mod mutation;
pub mod query;
pub mod types;

pub use mutation::MutationRoot;
pub use query::QueryRoot;
pub use types::{EmployeeObject, UserObject};

/// The GraphQL schema served at `/graphql`
pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the GraphQL schema around the shared application state
pub fn build_schema(state: AppState) -> AppSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(state)
        .finish()
}

/// Parse a GraphQL ID into a document ObjectId
pub(crate) fn parse_id(id: &ID) -> Result<ObjectId, ApiError> {
    ObjectId::parse_str(id.as_str()).map_err(|_| ApiError::InvalidId(id.to_string()))
}
