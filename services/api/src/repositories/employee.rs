//! Employee repository for MongoDB

use async_trait::async_trait;
use common::error::{DatabaseError, DatabaseResult};
use futures::TryStreamExt;
use mongodb::{
    Collection, Database,
    bson::{self, Document, doc, oid::ObjectId},
    options::ReturnDocument,
};
use tracing::info;

use super::{EMPLOYEE_UNIQUE_FIELDS, EmployeeStore, ensure_unique_indexes};
use crate::models::{Employee, EmployeeFilter, NewEmployee, UpdateEmployee};

const COLLECTION: &str = "employees";

/// Employee repository
#[derive(Clone)]
pub struct EmployeeRepository {
    collection: Collection<Employee>,
}

impl EmployeeRepository {
    /// Create a new employee repository
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection(COLLECTION),
        }
    }

    /// Create the unique index on email
    pub async fn ensure_indexes(&self) -> DatabaseResult<()> {
        ensure_unique_indexes(&self.collection, EMPLOYEE_UNIQUE_FIELDS).await
    }

    async fn find(&self, filter: Document) -> DatabaseResult<Vec<Employee>> {
        self.collection
            .find(filter)
            .await
            .map_err(DatabaseError::Query)?
            .try_collect()
            .await
            .map_err(DatabaseError::Query)
    }
}

/// Query document for an employee search
///
/// Filter text is escaped so it matches literally, case-insensitively.
pub fn search_document(filter: &EmployeeFilter) -> Document {
    let mut query = Document::new();

    if let Some(designation) = &filter.designation {
        query.insert("designation", contains_pattern(designation));
    }
    if let Some(department) = &filter.department {
        query.insert("department", contains_pattern(department));
    }

    query
}

fn contains_pattern(text: &str) -> Document {
    doc! { "$regex": regex::escape(text), "$options": "i" }
}

/// `$set` document for a partial update
pub fn update_document(changes: &UpdateEmployee) -> Document {
    let mut set = Document::new();

    if let Some(first_name) = &changes.first_name {
        set.insert("first_name", first_name);
    }
    if let Some(last_name) = &changes.last_name {
        set.insert("last_name", last_name);
    }
    if let Some(email) = &changes.email {
        set.insert("email", email);
    }
    if let Some(gender) = changes.gender {
        set.insert("gender", gender.as_str());
    }
    if let Some(designation) = &changes.designation {
        set.insert("designation", designation);
    }
    if let Some(salary) = changes.salary {
        set.insert("salary", salary);
    }
    if let Some(date_of_joining) = changes.date_of_joining {
        set.insert("date_of_joining", bson::DateTime::from_chrono(date_of_joining));
    }
    if let Some(department) = &changes.department {
        set.insert("department", department);
    }
    if let Some(photo) = &changes.employee_photo {
        set.insert("employee_photo", photo);
    }

    doc! { "$set": set }
}

#[async_trait]
impl EmployeeStore for EmployeeRepository {
    async fn get_all(&self) -> DatabaseResult<Vec<Employee>> {
        self.find(Document::new()).await
    }

    async fn find_by_id(&self, id: ObjectId) -> DatabaseResult<Option<Employee>> {
        info!("Finding employee by ID: {}", id);

        self.collection
            .find_one(doc! { "_id": id })
            .await
            .map_err(DatabaseError::Query)
    }

    async fn search(&self, filter: &EmployeeFilter) -> DatabaseResult<Vec<Employee>> {
        info!("Searching employees: {:?}", filter);
        self.find(search_document(filter)).await
    }

    async fn create(&self, new_employee: &NewEmployee) -> DatabaseResult<Employee> {
        info!("Creating new employee: {}", new_employee.email);

        let employee = new_employee.clone().into_employee(ObjectId::new());
        self.collection
            .insert_one(&employee)
            .await
            .map_err(|e| DatabaseError::from_write(e, EMPLOYEE_UNIQUE_FIELDS))?;

        Ok(employee)
    }

    async fn update(
        &self,
        id: ObjectId,
        changes: &UpdateEmployee,
    ) -> DatabaseResult<Option<Employee>> {
        info!("Updating employee: {}", id);

        // An empty $set is rejected by the server
        if changes.is_empty() {
            return self.find_by_id(id).await;
        }

        self.collection
            .find_one_and_update(doc! { "_id": id }, update_document(changes))
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| DatabaseError::from_write(e, EMPLOYEE_UNIQUE_FIELDS))
    }

    async fn delete(&self, id: ObjectId) -> DatabaseResult<Option<Employee>> {
        info!("Deleting employee: {}", id);

        self.collection
            .find_one_and_delete(doc! { "_id": id })
            .await
            .map_err(DatabaseError::Query)
    }
}
