//! Departments. Listing is unpaginated.

use super::types::{CreateDepartmentRequest, Department, DepartmentFilter, DepartmentList, UpdateDepartmentRequest};
use crate::client::ApiClient;
use crate::error::ApiError;
use crate::types::MessageResponse;

#[derive(Clone, Copy)]
pub struct DepartmentsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> DepartmentsApi<'a> {
    #[must_use]
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// `GET /departments`.
    ///
    /// # Errors
    ///
    /// Returns the backend's error.
    pub async fn list(&self, filter: &DepartmentFilter) -> Result<Vec<Department>, ApiError> {
        let list: DepartmentList = self.client.get_with("/departments", filter).await?;
        Ok(list.departments)
    }

    /// # Errors
    ///
    /// Fails with HTTP 404 for an unknown id.
    pub async fn get(&self, id: u64) -> Result<Department, ApiError> {
        self.client.get(&format!("/departments/{id}")).await
    }

    /// # Errors
    ///
    /// Fails with HTTP 409 when the name is taken.
    pub async fn create(&self, request: &CreateDepartmentRequest) -> Result<Department, ApiError> {
        self.client.post("/departments", request).await
    }

    /// # Errors
    ///
    /// Fails with HTTP 409 when renaming onto an existing name.
    pub async fn update(&self, id: u64, request: &UpdateDepartmentRequest) -> Result<Department, ApiError> {
        self.client
            .put(&format!("/departments/{id}"), request)
            .await
    }

    /// # Errors
    ///
    /// Fails with HTTP 409 while the department still has employees.
    pub async fn delete(&self, id: u64) -> Result<MessageResponse, ApiError> {
        self.client.delete(&format!("/departments/{id}")).await
    }
}

#[cfg(test)]
#[path = "departments_test.rs"]
mod tests;
