//! Check-in, check-out, history and statistics.

use super::types::{Attendance, AttendanceNote, AttendanceStats, StatsQuery, TodayAttendance};
use crate::client::ApiClient;
use crate::error::ApiError;
use crate::types::{Page, PageQuery};

#[derive(Clone, Copy)]
pub struct AttendanceApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AttendanceApi<'a> {
    #[must_use]
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// `POST /attendance/checkin`.
    ///
    /// # Errors
    ///
    /// Fails with HTTP 400 when already checked in today.
    pub async fn check_in(&self, note: &AttendanceNote) -> Result<Attendance, ApiError> {
        self.client.post("/attendance/checkin", note).await
    }

    /// `POST /attendance/checkout`.
    ///
    /// # Errors
    ///
    /// Fails when there is no open check-in for today.
    pub async fn check_out(&self, note: &AttendanceNote) -> Result<Attendance, ApiError> {
        self.client.post("/attendance/checkout", note).await
    }

    /// `GET /attendance/today`.
    ///
    /// # Errors
    ///
    /// Returns the backend's error.
    pub async fn today(&self) -> Result<TodayAttendance, ApiError> {
        self.client.get("/attendance/today").await
    }

    /// `GET /attendance?page=&limit=`, newest first.
    ///
    /// # Errors
    ///
    /// Returns the backend's error.
    pub async fn history(&self, query: PageQuery) -> Result<Page<Attendance>, ApiError> {
        self.client.get_with("/attendance", &query).await
    }

    /// `GET /attendance/stats`.
    ///
    /// # Errors
    ///
    /// Returns the backend's error.
    pub async fn stats(&self, query: &StatsQuery) -> Result<AttendanceStats, ApiError> {
        self.client.get_with("/attendance/stats", query).await
    }
}

#[cfg(test)]
#[path = "attendance_test.rs"]
mod tests;
