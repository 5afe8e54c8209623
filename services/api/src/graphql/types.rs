//! GraphQL object types

use async_graphql::{ID, SimpleObject};
use chrono::SecondsFormat;

use crate::models::{Employee, User};

/// A registered user
///
/// `password` carries the stored digest.
#[derive(SimpleObject, Debug, Clone)]
#[graphql(name = "User")]
pub struct UserObject {
    pub id: ID,
    pub username: String,
    pub email: String,
    pub password: String,
}

impl From<User> for UserObject {
    fn from(user: User) -> Self {
        Self {
            id: ID(user.id.to_hex()),
            username: user.username,
            email: user.email,
            password: user.password,
        }
    }
}

/// An employee record
#[derive(SimpleObject, Debug, Clone)]
#[graphql(name = "Employee", rename_fields = "snake_case")]
pub struct EmployeeObject {
    pub id: ID,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub gender: Option<String>,
    pub designation: String,
    pub salary: f64,
    /// ISO-8601 UTC timestamp
    pub date_of_joining: String,
    pub department: String,
    /// Filename under `/uploads`
    pub employee_photo: Option<String>,
}

impl From<Employee> for EmployeeObject {
    fn from(employee: Employee) -> Self {
        Self {
            id: ID(employee.id.to_hex()),
            first_name: employee.first_name,
            last_name: employee.last_name,
            email: employee.email,
            gender: employee.gender.map(|gender| gender.to_string()),
            designation: employee.designation,
            salary: employee.salary,
            date_of_joining: employee
                .date_of_joining
                .to_rfc3339_opts(SecondsFormat::Millis, true),
            department: employee.department,
            employee_photo: employee.employee_photo,
        }
    }
}
