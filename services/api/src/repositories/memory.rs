//! In-memory store implementing the repository contracts
//!
//! Test double only; the service itself always runs on MongoDB.
//!
//! Uniqueness rules match the MongoDB unique indexes, so resolvers behave the
//! same against either backend.

use std::sync::Arc;

use async_trait::async_trait;
use common::error::{DatabaseError, DatabaseResult};
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use super::{EmployeeStore, UserStore};
use crate::models::{Employee, EmployeeFilter, NewEmployee, NewUser, UpdateEmployee, User};

/// Process-local user and employee collections
#[derive(Clone, Default)]
pub struct MemoryStore {
    users: Arc<RwLock<Vec<User>>>,
    employees: Arc<RwLock<Vec<Employee>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a fully formed employee record, bypassing validation
    pub async fn insert_employee(&self, employee: Employee) {
        self.employees.write().await.push(employee);
    }
}

fn duplicate(field: &str) -> DatabaseError {
    DatabaseError::Duplicate {
        field: field.to_string(),
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create(&self, new_user: &NewUser) -> DatabaseResult<User> {
        let mut users = self.users.write().await;

        if users.iter().any(|user| user.email == new_user.email) {
            return Err(duplicate("email"));
        }
        if users.iter().any(|user| user.username == new_user.username) {
            return Err(duplicate("username"));
        }

        let user = new_user.clone().into_user(ObjectId::new());
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> DatabaseResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|user| user.email == email).cloned())
    }
}

#[async_trait]
impl EmployeeStore for MemoryStore {
    async fn get_all(&self) -> DatabaseResult<Vec<Employee>> {
        Ok(self.employees.read().await.clone())
    }

    async fn find_by_id(&self, id: ObjectId) -> DatabaseResult<Option<Employee>> {
        let employees = self.employees.read().await;
        Ok(employees.iter().find(|employee| employee.id == id).cloned())
    }

    async fn search(&self, filter: &EmployeeFilter) -> DatabaseResult<Vec<Employee>> {
        let employees = self.employees.read().await;
        Ok(employees
            .iter()
            .filter(|employee| filter.matches(employee))
            .cloned()
            .collect())
    }

    async fn create(&self, new_employee: &NewEmployee) -> DatabaseResult<Employee> {
        let mut employees = self.employees.write().await;

        if employees
            .iter()
            .any(|employee| employee.email == new_employee.email)
        {
            return Err(duplicate("email"));
        }

        let employee = new_employee.clone().into_employee(ObjectId::new());
        employees.push(employee.clone());
        Ok(employee)
    }

    async fn update(
        &self,
        id: ObjectId,
        changes: &UpdateEmployee,
    ) -> DatabaseResult<Option<Employee>> {
        let mut employees = self.employees.write().await;

        if let Some(email) = &changes.email {
            if employees
                .iter()
                .any(|employee| employee.id != id && &employee.email == email)
            {
                return Err(duplicate("email"));
            }
        }

        Ok(employees
            .iter_mut()
            .find(|employee| employee.id == id)
            .map(|employee| {
                changes.apply_to(employee);
                employee.clone()
            }))
    }

    async fn delete(&self, id: ObjectId) -> DatabaseResult<Option<Employee>> {
        let mut employees = self.employees.write().await;
        Ok(employees
            .iter()
            .position(|employee| employee.id == id)
            .map(|index| employees.remove(index)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn new_employee(email: &str) -> NewEmployee {
        NewEmployee {
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            email: email.to_string(),
            gender: None,
            designation: "Engineer".to_string(),
            salary: 5000.0,
            date_of_joining: Utc::now(),
            department: "Compilers".to_string(),
            employee_photo: None,
        }
    }

    fn new_user(username: &str, email: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            email: email.to_string(),
            password_hash: "digest".to_string(),
        }
    }

    #[tokio::test]
    async fn test_user_uniqueness() {
        let store = MemoryStore::new();
        UserStore::create(&store, &new_user("grace", "grace@example.com"))
            .await
            .unwrap();

        let err = UserStore::create(&store, &new_user("other", "grace@example.com"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Duplicate value for email");

        let err = UserStore::create(&store, &new_user("grace", "other@example.com"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Duplicate value for username");

        let found = store.find_by_email("grace@example.com").await.unwrap();
        assert_eq!(found.map(|user| user.username).as_deref(), Some("grace"));
    }

    #[tokio::test]
    async fn test_employee_email_unique_on_create_and_update() {
        let store = MemoryStore::new();
        let first = EmployeeStore::create(&store, &new_employee("a@example.com"))
            .await
            .unwrap();
        EmployeeStore::create(&store, &new_employee("b@example.com"))
            .await
            .unwrap();

        assert!(
            EmployeeStore::create(&store, &new_employee("a@example.com"))
                .await
                .is_err()
        );

        let clash = UpdateEmployee {
            email: Some("b@example.com".to_string()),
            ..Default::default()
        };
        assert!(store.update(first.id, &clash).await.is_err());

        let same = UpdateEmployee {
            email: Some("a@example.com".to_string()),
            ..Default::default()
        };
        assert!(store.update(first.id, &same).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_update_and_delete_unknown_id() {
        let store = MemoryStore::new();
        let changes = UpdateEmployee {
            salary: Some(2000.0),
            ..Default::default()
        };

        assert!(store.update(ObjectId::new(), &changes).await.unwrap().is_none());
        assert!(store.delete(ObjectId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_returns_removed_record() {
        let store = MemoryStore::new();
        let employee = EmployeeStore::create(&store, &new_employee("a@example.com"))
            .await
            .unwrap();

        let removed = store.delete(employee.id).await.unwrap();
        assert_eq!(removed, Some(employee));
        assert!(store.get_all().await.unwrap().is_empty());
    }
}
