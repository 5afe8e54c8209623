//! Employee model and related functionality

use std::{fmt, str::FromStr};

use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::{
    error::ApiResult,
    validation::{FieldErrors, parse_date, parse_gender, validate_required, validate_salary},
};

/// Lowest salary accepted for an employee
pub const MIN_SALARY: f64 = 1000.0;

/// Gender values accepted by the employee schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Male" => Ok(Gender::Male),
            "Female" => Ok(Gender::Female),
            "Other" => Ok(Gender::Other),
            other => Err(format!("unknown gender: {}", other)),
        }
    }
}

/// Employee entity as stored in the `employees` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    pub designation: String,
    pub salary: f64,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub date_of_joining: DateTime<Utc>,
    pub department: String,
    /// Filename inside the uploads directory, or a value stored verbatim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_photo: Option<String>,
}

/// Validated employee creation payload
#[derive(Debug, Clone, PartialEq)]
pub struct NewEmployee {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub gender: Option<Gender>,
    pub designation: String,
    pub salary: f64,
    pub date_of_joining: DateTime<Utc>,
    pub department: String,
    pub employee_photo: Option<String>,
}

impl NewEmployee {
    pub fn into_employee(self, id: ObjectId) -> Employee {
        Employee {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            gender: self.gender,
            designation: self.designation,
            salary: self.salary,
            date_of_joining: self.date_of_joining,
            department: self.department,
            employee_photo: self.employee_photo,
        }
    }
}

/// Validated partial update; `None` fields keep their stored value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateEmployee {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub gender: Option<Gender>,
    pub designation: Option<String>,
    pub salary: Option<f64>,
    pub date_of_joining: Option<DateTime<Utc>>,
    pub department: Option<String>,
    pub employee_photo: Option<String>,
}

impl UpdateEmployee {
    pub fn is_empty(&self) -> bool {
        *self == UpdateEmployee::default()
    }

    pub fn apply_to(&self, employee: &mut Employee) {
        if let Some(first_name) = &self.first_name {
            employee.first_name = first_name.clone();
        }
        if let Some(last_name) = &self.last_name {
            employee.last_name = last_name.clone();
        }
        if let Some(email) = &self.email {
            employee.email = email.clone();
        }
        if let Some(gender) = self.gender {
            employee.gender = Some(gender);
        }
        if let Some(designation) = &self.designation {
            employee.designation = designation.clone();
        }
        if let Some(salary) = self.salary {
            employee.salary = salary;
        }
        if let Some(date_of_joining) = self.date_of_joining {
            employee.date_of_joining = date_of_joining;
        }
        if let Some(department) = &self.department {
            employee.department = department.clone();
        }
        if let Some(photo) = &self.employee_photo {
            employee.employee_photo = Some(photo.clone());
        }
    }
}

/// Raw employee fields as received from a client, before validation
#[derive(Debug, Clone, Default)]
pub struct EmployeeFields {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub gender: Option<String>,
    pub designation: Option<String>,
    pub salary: Option<f64>,
    pub date_of_joining: Option<String>,
    pub department: Option<String>,
    pub employee_photo: Option<String>,
}

impl EmployeeFields {
    /// Validate a full record; every required field must be present
    pub fn into_new_employee(self) -> ApiResult<NewEmployee> {
        let mut errors = FieldErrors::new("Employee");

        let first_name = required(&mut errors, "first_name", self.first_name);
        let last_name = required(&mut errors, "last_name", self.last_name);
        let email = required(&mut errors, "email", self.email);
        let designation = required(&mut errors, "designation", self.designation);
        let department = required(&mut errors, "department", self.department);
        let gender = self
            .gender
            .and_then(|value| errors.check("gender", parse_gender(&value)));
        let salary = errors.check(
            "salary",
            self.salary
                .ok_or_else(|| "Path `salary` is required.".to_string())
                .and_then(|salary| validate_salary(salary).map(|_| salary)),
        );
        let date_of_joining = errors.check(
            "date_of_joining",
            self.date_of_joining
                .ok_or_else(|| "Path `date_of_joining` is required.".to_string())
                .and_then(|value| parse_date("date_of_joining", &value)),
        );

        errors.finish()?;

        Ok(NewEmployee {
            first_name,
            last_name,
            email,
            gender,
            designation,
            salary: salary.unwrap_or_default(),
            date_of_joining: date_of_joining.unwrap_or_default(),
            department,
            employee_photo: self.employee_photo.filter(|photo| !photo.is_empty()),
        })
    }

    /// Validate the fields present in a partial update
    pub fn into_update(self) -> ApiResult<UpdateEmployee> {
        let mut errors = FieldErrors::new("Employee");

        let first_name = present(&mut errors, "first_name", self.first_name);
        let last_name = present(&mut errors, "last_name", self.last_name);
        let email = present(&mut errors, "email", self.email);
        let designation = present(&mut errors, "designation", self.designation);
        let department = present(&mut errors, "department", self.department);
        let gender = self
            .gender
            .and_then(|value| errors.check("gender", parse_gender(&value)));
        let salary = self
            .salary
            .and_then(|salary| errors.check("salary", validate_salary(salary)).map(|_| salary));
        let date_of_joining = self
            .date_of_joining
            .and_then(|value| errors.check("date_of_joining", parse_date("date_of_joining", &value)));

        errors.finish()?;

        Ok(UpdateEmployee {
            first_name,
            last_name,
            email,
            gender,
            designation,
            salary,
            date_of_joining,
            department,
            employee_photo: self.employee_photo.filter(|photo| !photo.is_empty()),
        })
    }
}

fn required(errors: &mut FieldErrors, field: &str, value: Option<String>) -> String {
    let value = value.unwrap_or_default();
    errors.check(field, validate_required(field, &value));
    value
}

fn present(errors: &mut FieldErrors, field: &str, value: Option<String>) -> Option<String> {
    value.and_then(|value| {
        errors
            .check(field, validate_required(field, &value))
            .map(|_| value)
    })
}

/// Search criteria for employees
///
/// Each present filter is a case-insensitive substring match; filters
/// combine with AND. Empty strings are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeFilter {
    pub designation: Option<String>,
    pub department: Option<String>,
}

impl EmployeeFilter {
    pub fn new(designation: Option<String>, department: Option<String>) -> Self {
        Self {
            designation: designation.filter(|value| !value.is_empty()),
            department: department.filter(|value| !value.is_empty()),
        }
    }

    pub fn matches(&self, employee: &Employee) -> bool {
        contains_ignore_case(&employee.designation, self.designation.as_deref())
            && contains_ignore_case(&employee.department, self.department.as_deref())
    }
}

fn contains_ignore_case(haystack: &str, needle: Option<&str>) -> bool {
    match needle {
        Some(needle) => haystack.to_lowercase().contains(&needle.to_lowercase()),
        None => true,
    }
}
