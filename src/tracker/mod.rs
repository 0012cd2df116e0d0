//! Attendance tracker backend.
//!
//! Base URL defaults to `http://localhost:8080/api`. Users check in and out
//! once per day; admins see everyone.

pub mod admin;
pub mod attendance;
pub mod auth;
pub mod types;

use crate::client::ApiClient;

pub use admin::AdminApi;
pub use attendance::AttendanceApi;
pub use auth::AuthApi;

/// Entry point for the tracker's resources.
#[derive(Clone, Copy)]
pub struct Tracker<'a> {
    client: &'a ApiClient,
}

impl<'a> Tracker<'a> {
    #[must_use]
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    #[must_use]
    pub fn auth(self) -> AuthApi<'a> {
        AuthApi::new(self.client)
    }

    #[must_use]
    pub fn attendance(self) -> AttendanceApi<'a> {
        AttendanceApi::new(self.client)
    }

    #[must_use]
    pub fn admin(self) -> AdminApi<'a> {
        AdminApi::new(self.client)
    }
}

impl ApiClient {
    /// Tracker resources over this client.
    #[must_use]
    pub fn tracker(&self) -> Tracker<'_> {
        Tracker::new(self)
    }
}
