//! Input validation utilities

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::{
    error::{ApiError, ApiResult},
    models::{Gender, MIN_SALARY},
};

/// Validate that a required string field is present
pub fn validate_required(field: &str, value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Err(format!("Path `{}` is required.", field));
    }

    Ok(())
}

/// Validate salary against the schema minimum
pub fn validate_salary(salary: f64) -> Result<(), String> {
    if !salary.is_finite() {
        return Err(format!("Cast to Number failed for value \"{}\" at path `salary`", salary));
    }

    if salary < MIN_SALARY {
        return Err(format!(
            "Path `salary` ({}) is less than minimum allowed value ({}).",
            salary, MIN_SALARY
        ));
    }

    Ok(())
}

/// Parse a gender value
pub fn parse_gender(value: &str) -> Result<Gender, String> {
    value
        .parse()
        .map_err(|_| format!("`{}` is not a valid enum value for path `gender`.", value))
}

/// Parse a date field
///
/// Accepts RFC 3339 timestamps, `YYYY-MM-DDTHH:MM:SS[.fff]` (read as UTC)
/// and plain `YYYY-MM-DD` dates (midnight UTC).
pub fn parse_date(field: &str, value: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Ok(timestamp.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }

    Err(format!(
        "Cast to date failed for value \"{}\" at path `{}`",
        value, field
    ))
}

/// Accumulates per-field failures so a single error reports all of them
#[derive(Debug)]
pub struct FieldErrors {
    entity: &'static str,
    errors: Vec<String>,
}

impl FieldErrors {
    pub fn new(entity: &'static str) -> Self {
        Self {
            entity,
            errors: Vec::new(),
        }
    }

    /// Record the outcome of a field check, keeping the parsed value on success
    pub fn check<T>(&mut self, field: &str, result: Result<T, String>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(message) => {
                self.errors.push(format!("{}: {}", field, message));
                None
            }
        }
    }

    pub fn finish(self) -> ApiResult<()> {
        if self.errors.is_empty() {
            return Ok(());
        }

        Err(ApiError::Validation {
            entity: self.entity,
            details: self.errors.join(", "),
        })
    }
}
