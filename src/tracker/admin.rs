//! Admin-only user and attendance management.

use super::types::{AdminAttendanceQuery, Attendance, UpdateUserRequest, User};
use crate::client::ApiClient;
use crate::error::ApiError;
use crate::types::{MessageResponse, Page, PageQuery};

#[derive(Clone, Copy)]
pub struct AdminApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AdminApi<'a> {
    #[must_use]
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// `GET /admin/users`.
    ///
    /// # Errors
    ///
    /// Fails with HTTP 403 for non-admins.
    pub async fn users(&self, query: PageQuery) -> Result<Page<User>, ApiError> {
        self.client.get_with("/admin/users", &query).await
    }

    /// `GET /admin/attendance` across all users.
    ///
    /// # Errors
    ///
    /// Fails with HTTP 403 for non-admins.
    pub async fn attendance(&self, query: &AdminAttendanceQuery) -> Result<Page<Attendance>, ApiError> {
        self.client.get_with("/admin/attendance", query).await
    }

    /// `PUT /admin/users/{id}`.
    ///
    /// # Errors
    ///
    /// Returns the backend's error, e.g. an invalid role.
    pub async fn update_user(&self, id: u64, request: &UpdateUserRequest) -> Result<User, ApiError> {
        self.client.put(&format!("/admin/users/{id}"), request).await
    }

    /// `DELETE /admin/users/{id}`.
    ///
    /// # Errors
    ///
    /// Returns the backend's error, e.g. deleting the last admin.
    pub async fn delete_user(&self, id: u64) -> Result<MessageResponse, ApiError> {
        self.client.delete(&format!("/admin/users/{id}")).await
    }
}

#[cfg(test)]
#[path = "admin_test.rs"]
mod tests;
