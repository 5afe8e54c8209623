//! Mutation resolvers

use async_graphql::{Context, ID, Object, Result};
use chrono::Utc;
use tracing::{error, info};

use super::{
    parse_id,
    types::{EmployeeObject, UserObject},
};
use crate::{
    models::{EmployeeFields, NewUser},
    state::AppState,
    uploads::{PhotoStorage, is_image_data_uri, photo_filename},
    validation::{FieldErrors, validate_required},
};

/// Fallback name stem for photos of employees without a first name
const DEFAULT_PHOTO_STEM: &str = "employee";

/// Root mutation type
pub struct MutationRoot;

#[Object(name = "Mutation", rename_args = "snake_case")]
impl MutationRoot {
    /// Register a new user account
    async fn signup(
        &self,
        ctx: &Context<'_>,
        username: String,
        email: String,
        password: String,
    ) -> Result<UserObject> {
        let state = ctx.data::<AppState>()?;

        let mut errors = FieldErrors::new("User");
        errors.check("username", validate_required("username", &username));
        errors.check("email", validate_required("email", &email));
        errors.check("password", validate_required("password", &password));
        errors.finish()?;

        let new_user = NewUser {
            username,
            email,
            password_hash: state.hasher.hash(&password)?,
        };

        let user = state.user_store.create(&new_user).await?;
        Ok(user.into())
    }

    /// Create an employee record, storing an inline photo if one is given
    #[allow(clippy::too_many_arguments)]
    async fn add_employee(
        &self,
        ctx: &Context<'_>,
        first_name: String,
        last_name: String,
        email: String,
        gender: Option<String>,
        designation: String,
        salary: f64,
        date_of_joining: String,
        department: String,
        employee_photo: Option<String>,
    ) -> Result<EmployeeObject> {
        let state = ctx.data::<AppState>()?;

        let mut new_employee = EmployeeFields {
            first_name: Some(first_name),
            last_name: Some(last_name),
            email: Some(email),
            gender,
            designation: Some(designation),
            salary: Some(salary),
            date_of_joining: Some(date_of_joining),
            department: Some(department),
            employee_photo,
        }
        .into_new_employee()?;

        let mut stored_photo = None;
        if let Some(photo) = new_employee
            .employee_photo
            .as_deref()
            .filter(|photo| is_image_data_uri(photo))
        {
            let filename = photo_filename(&new_employee.first_name, Utc::now());
            let filename = state.photos.save(photo, &filename).await?;
            new_employee.employee_photo = Some(filename.clone());
            stored_photo = Some(filename);
        }

        match state.employee_store.create(&new_employee).await {
            Ok(employee) => Ok(employee.into()),
            Err(e) => {
                if let Some(filename) = stored_photo {
                    discard_photo(&state.photos, &filename).await;
                }
                Err(e.into())
            }
        }
    }

    /// Apply a partial update to an employee record
    ///
    /// Returns null when no employee has this id.
    #[allow(clippy::too_many_arguments)]
    async fn update_employee(
        &self,
        ctx: &Context<'_>,
        id: ID,
        first_name: Option<String>,
        last_name: Option<String>,
        email: Option<String>,
        gender: Option<String>,
        designation: Option<String>,
        salary: Option<f64>,
        date_of_joining: Option<String>,
        department: Option<String>,
        employee_photo: Option<String>,
    ) -> Result<Option<EmployeeObject>> {
        let state = ctx.data::<AppState>()?;
        let id = parse_id(&id)?;

        let mut changes = EmployeeFields {
            first_name,
            last_name,
            email,
            gender,
            designation,
            salary,
            date_of_joining,
            department,
            employee_photo,
        }
        .into_update()?;

        let mut stored_photo = None;
        let mut previous_photo = None;
        if let Some(photo) = changes
            .employee_photo
            .as_deref()
            .filter(|photo| is_image_data_uri(photo))
        {
            let Some(existing) = state.employee_store.find_by_id(id).await? else {
                return Ok(None);
            };

            let stem = changes
                .first_name
                .as_deref()
                .unwrap_or(&existing.first_name);
            let stem = if stem.is_empty() { DEFAULT_PHOTO_STEM } else { stem };

            let filename = state
                .photos
                .save(photo, &photo_filename(stem, Utc::now()))
                .await?;
            changes.employee_photo = Some(filename.clone());
            stored_photo = Some(filename);
            previous_photo = existing.employee_photo;
        }

        let updated = match state.employee_store.update(id, &changes).await {
            Ok(updated) => updated,
            Err(e) => {
                if let Some(filename) = &stored_photo {
                    discard_photo(&state.photos, filename).await;
                }
                return Err(e.into());
            }
        };

        match (&updated, stored_photo) {
            (Some(_), Some(stored)) => {
                if let Some(previous) = previous_photo.filter(|previous| *previous != stored) {
                    discard_photo(&state.photos, &previous).await;
                }
            }
            (None, Some(stored)) => discard_photo(&state.photos, &stored).await,
            (_, None) => {}
        }

        Ok(updated.map(Into::into))
    }

    /// Delete an employee record and its stored photo
    ///
    /// Returns null when no employee has this id.
    async fn delete_employee(
        &self,
        ctx: &Context<'_>,
        id: ID,
    ) -> Result<Option<EmployeeObject>> {
        let state = ctx.data::<AppState>()?;
        let id = parse_id(&id)?;

        let deleted = state.employee_store.delete(id).await?;

        if let Some(photo) = deleted
            .as_ref()
            .and_then(|employee| employee.employee_photo.as_deref())
        {
            discard_photo(&state.photos, photo).await;
        }

        Ok(deleted.map(Into::into))
    }
}

/// Remove a stored photo, logging rather than propagating failures
async fn discard_photo(photos: &PhotoStorage, filename: &str) {
    match photos.remove(filename).await {
        Ok(true) => info!("Deleted photo {}", filename),
        Ok(false) => {}
        Err(e) => error!("Failed to delete photo {}: {}", filename, e),
    }
}
