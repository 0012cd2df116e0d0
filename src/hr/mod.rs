//! HR management backend.
//!
//! Base URL defaults to `http://localhost:8080/api/v1`. Reads are open to any
//! signed-in user; writes to employees and departments need the admin or hr
//! role, and leave review also admits managers. The client does not enforce
//! roles itself: a 403 comes back as [`crate::ApiError::Status`].

pub mod auth;
pub mod departments;
pub mod employees;
pub mod leaves;
pub mod types;

use crate::client::ApiClient;

pub use auth::AuthApi;
pub use departments::DepartmentsApi;
pub use employees::EmployeesApi;
pub use leaves::LeavesApi;

/// Entry point for the HR resources.
#[derive(Clone, Copy)]
pub struct Hr<'a> {
    client: &'a ApiClient,
}

impl<'a> Hr<'a> {
    #[must_use]
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    #[must_use]
    pub fn auth(self) -> AuthApi<'a> {
        AuthApi::new(self.client)
    }

    #[must_use]
    pub fn employees(self) -> EmployeesApi<'a> {
        EmployeesApi::new(self.client)
    }

    #[must_use]
    pub fn departments(self) -> DepartmentsApi<'a> {
        DepartmentsApi::new(self.client)
    }

    #[must_use]
    pub fn leaves(self) -> LeavesApi<'a> {
        LeavesApi::new(self.client)
    }
}

impl ApiClient {
    /// HR resources over this client.
    #[must_use]
    pub fn hr(&self) -> Hr<'_> {
        Hr::new(self)
    }
}
