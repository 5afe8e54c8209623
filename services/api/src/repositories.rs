//! Repositories for document store operations
//!
//! Resolvers talk to the [`UserStore`] and [`EmployeeStore`] traits. The
//! MongoDB repositories back the running service. `MemoryStore` keeps the
//! same contract in process memory for tests and is not part of the
//! documented API.

use async_trait::async_trait;
use common::error::{DatabaseError, DatabaseResult, unique_index_name};
use mongodb::{
    Collection, IndexModel,
    bson::{Document, oid::ObjectId},
    options::IndexOptions,
};

use crate::models::{Employee, EmployeeFilter, NewEmployee, NewUser, UpdateEmployee, User};

pub mod employee;
#[doc(hidden)]
pub mod memory;
pub mod user;

pub use employee::EmployeeRepository;
#[doc(hidden)]
pub use memory::MemoryStore;
pub use user::UserRepository;

/// Unique fields of the `users` collection
pub const USER_UNIQUE_FIELDS: &[&str] = &["email", "username"];

/// Unique fields of the `employees` collection
pub const EMPLOYEE_UNIQUE_FIELDS: &[&str] = &["email"];

/// Persistence for user accounts
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new user; fails with a duplicate error on email or username
    async fn create(&self, new_user: &NewUser) -> DatabaseResult<User>;

    /// Find a user by email
    async fn find_by_email(&self, email: &str) -> DatabaseResult<Option<User>>;
}

/// Persistence for employee records
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    /// Every employee record
    async fn get_all(&self) -> DatabaseResult<Vec<Employee>>;

    /// Find an employee by ID
    async fn find_by_id(&self, id: ObjectId) -> DatabaseResult<Option<Employee>>;

    /// Employees matching every present filter
    async fn search(&self, filter: &EmployeeFilter) -> DatabaseResult<Vec<Employee>>;

    /// Insert a new employee; fails with a duplicate error on email
    async fn create(&self, new_employee: &NewEmployee) -> DatabaseResult<Employee>;

    /// Apply a partial update, returning the updated record if it exists
    async fn update(
        &self,
        id: ObjectId,
        changes: &UpdateEmployee,
    ) -> DatabaseResult<Option<Employee>>;

    /// Delete an employee, returning the removed record if it existed
    async fn delete(&self, id: ObjectId) -> DatabaseResult<Option<Employee>>;
}

/// Create one unique index named `<field>_unique` per field
///
/// Index creation is idempotent, so this runs on every startup.
pub(crate) async fn ensure_unique_indexes<T>(
    collection: &Collection<T>,
    fields: &[&str],
) -> DatabaseResult<()>
where
    T: Send + Sync,
{
    for field in fields {
        let mut keys = Document::new();
        keys.insert(*field, 1);

        let index = IndexModel::builder()
            .keys(keys)
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name(unique_index_name(field))
                    .build(),
            )
            .build();

        collection
            .create_index(index)
            .await
            .map_err(DatabaseError::Query)?;
    }

    Ok(())
}
