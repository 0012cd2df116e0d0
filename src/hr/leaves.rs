//! Leave requests and their review.

use super::types::{
    CreateLeaveRequest, Leave, LeaveApproval, LeaveFilter, LeaveStatus, LeaveStatuses, LeaveType, LeaveTypes,
    UpdateLeaveRequest,
};
use crate::client::ApiClient;
use crate::error::ApiError;
use crate::types::{MessageResponse, Page};

#[derive(Clone, Copy)]
pub struct LeavesApi<'a> {
    client: &'a ApiClient,
}

impl<'a> LeavesApi<'a> {
    #[must_use]
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// `GET /leaves`, newest first.
    ///
    /// # Errors
    ///
    /// Returns the backend's error.
    pub async fn list(&self, filter: &LeaveFilter) -> Result<Page<Leave>, ApiError> {
        self.client.get_with("/leaves", filter).await
    }

    /// # Errors
    ///
    /// Fails with HTTP 404 for an unknown id.
    pub async fn get(&self, id: u64) -> Result<Leave, ApiError> {
        self.client.get(&format!("/leaves/{id}")).await
    }

    /// `POST /leaves`. The backend computes `days` from the date range.
    ///
    /// # Errors
    ///
    /// Fails with HTTP 400 for an inverted range, 409 on overlap.
    pub async fn create(&self, request: &CreateLeaveRequest) -> Result<Leave, ApiError> {
        self.client.post("/leaves", request).await
    }

    /// # Errors
    ///
    /// Fails with HTTP 400 unless the leave is still pending.
    pub async fn update(&self, id: u64, request: &UpdateLeaveRequest) -> Result<Leave, ApiError> {
        self.client
            .put(&format!("/leaves/{id}"), request)
            .await
    }

    /// # Errors
    ///
    /// Fails with HTTP 400 unless the leave is still pending.
    pub async fn delete(&self, id: u64) -> Result<MessageResponse, ApiError> {
        self.client.delete(&format!("/leaves/{id}")).await
    }

    /// `POST /leaves/{id}/approve` with an approve or reject decision.
    ///
    /// # Errors
    ///
    /// Fails with HTTP 403 for plain employees, 400 once already reviewed.
    pub async fn approve(&self, id: u64, approval: &LeaveApproval) -> Result<MessageResponse, ApiError> {
        self.client
            .post(&format!("/leaves/{id}/approve"), approval)
            .await
    }

    /// `GET /leaves/types`.
    ///
    /// # Errors
    ///
    /// Returns the backend's error.
    pub async fn types(&self) -> Result<Vec<LeaveType>, ApiError> {
        let listing: LeaveTypes = self.client.get("/leaves/types").await?;
        Ok(listing.leave_types)
    }

    /// `GET /leaves/statuses`.
    ///
    /// # Errors
    ///
    /// Returns the backend's error.
    pub async fn statuses(&self) -> Result<Vec<LeaveStatus>, ApiError> {
        let listing: LeaveStatuses = self.client.get("/leaves/statuses").await?;
        Ok(listing.leave_statuses)
    }
}

#[cfg(test)]
#[path = "leaves_test.rs"]
mod tests;
