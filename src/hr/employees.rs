//! Employee directory.

use super::types::{CreateEmployeeRequest, Employee, EmployeeFilter, UpdateEmployeeRequest};
use crate::client::ApiClient;
use crate::error::ApiError;
use crate::types::{MessageResponse, Page};

#[derive(Clone, Copy)]
pub struct EmployeesApi<'a> {
    client: &'a ApiClient,
}

impl<'a> EmployeesApi<'a> {
    #[must_use]
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// `GET /employees` with pagination and optional filters.
    ///
    /// # Errors
    ///
    /// Returns the backend's error.
    pub async fn list(&self, filter: &EmployeeFilter) -> Result<Page<Employee>, ApiError> {
        self.client.get_with("/employees", filter).await
    }

    /// `GET /employees/{id}`.
    ///
    /// # Errors
    ///
    /// Fails with HTTP 404 for an unknown id.
    pub async fn get(&self, id: u64) -> Result<Employee, ApiError> {
        self.client.get(&format!("/employees/{id}")).await
    }

    /// `POST /employees`. The backend assigns the staff number.
    ///
    /// # Errors
    ///
    /// Fails with HTTP 403 unless admin or HR, 409 on a duplicate email.
    pub async fn create(&self, request: &CreateEmployeeRequest) -> Result<Employee, ApiError> {
        self.client.post("/employees", request).await
    }

    /// `PUT /employees/{id}`.
    ///
    /// # Errors
    ///
    /// Fails with HTTP 403 unless admin or HR.
    pub async fn update(&self, id: u64, request: &UpdateEmployeeRequest) -> Result<Employee, ApiError> {
        self.client
            .put(&format!("/employees/{id}"), request)
            .await
    }

    /// `DELETE /employees/{id}`.
    ///
    /// # Errors
    ///
    /// Fails with HTTP 403 unless admin or HR.
    pub async fn delete(&self, id: u64) -> Result<MessageResponse, ApiError> {
        self.client.delete(&format!("/employees/{id}")).await
    }
}

#[cfg(test)]
#[path = "employees_test.rs"]
mod tests;
