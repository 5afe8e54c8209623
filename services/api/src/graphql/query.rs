//! Query resolvers

use async_graphql::{Context, ID, Object, Result};
use tracing::{info, warn};

use super::{
    parse_id,
    types::{EmployeeObject, UserObject},
};
use crate::{error::ApiError, models::EmployeeFilter, state::AppState};

/// Root query type
pub struct QueryRoot;

#[Object(name = "RootQueryType")]
impl QueryRoot {
    /// Check a user's credentials and return the account
    async fn login(
        &self,
        ctx: &Context<'_>,
        email: String,
        password: String,
    ) -> Result<UserObject> {
        let state = ctx.data::<AppState>()?;
        info!("Login attempt for user: {}", email);

        let user = state
            .user_store
            .find_by_email(&email)
            .await?
            .ok_or(ApiError::UserNotFound)?;

        if !state.hasher.verify(&password, &user.password)? {
            warn!("Invalid credentials for user: {}", email);
            return Err(ApiError::InvalidCredentials.into());
        }

        Ok(user.into())
    }

    /// Every employee record
    async fn get_all_employees(&self, ctx: &Context<'_>) -> Result<Vec<EmployeeObject>> {
        let state = ctx.data::<AppState>()?;
        let employees = state.employee_store.get_all().await?;

        Ok(employees.into_iter().map(Into::into).collect())
    }

    /// A single employee, or null when no record has this id
    async fn get_employee_by_id(
        &self,
        ctx: &Context<'_>,
        id: Option<ID>,
    ) -> Result<Option<EmployeeObject>> {
        let state = ctx.data::<AppState>()?;
        let Some(id) = id else {
            return Ok(None);
        };

        let employee = state.employee_store.find_by_id(parse_id(&id)?).await?;
        Ok(employee.map(Into::into))
    }

    /// Employees whose designation and department contain the given text
    async fn search_employees(
        &self,
        ctx: &Context<'_>,
        designation: Option<String>,
        department: Option<String>,
    ) -> Result<Vec<EmployeeObject>> {
        let state = ctx.data::<AppState>()?;
        let filter = EmployeeFilter::new(designation, department);
        let employees = state.employee_store.search(&filter).await?;

        Ok(employees.into_iter().map(Into::into).collect())
    }
}
