//! Login, accounts and profile for the HR backend.
//!
//! Login issues an access token and a refresh token; both are persisted. The
//! refresh token is kept for the backend's benefit only: the client never
//! exchanges it, and a 401 clears it along with everything else.

use super::types::{
    ChangePasswordRequest, HrPrincipal, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse,
};
use crate::client::ApiClient;
use crate::error::ApiError;
use crate::session::Session;
use crate::types::MessageResponse;

/// Fallback shown when a failed login carries no backend message.
pub const LOGIN_FAILED: &str = "Login failed";

#[derive(Clone, Copy)]
pub struct AuthApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthApi<'a> {
    #[must_use]
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// `POST /auth/login`.
    ///
    /// # Errors
    ///
    /// Returns the backend's error (`Invalid credentials`, `Account is
    /// inactive`); nothing is stored on failure.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session<HrPrincipal>, ApiError> {
        let body = LoginRequest { email: email.to_owned(), password: password.to_owned() };
        let response: LoginResponse = self.client.post("/auth/login", &body).await?;

        self.client
            .begin_session(&response.token, Some(&response.refresh_token))?;
        let principal = HrPrincipal { user: response.user, employee: response.employee };
        self.client.store_principal(&principal)?;
        tracing::info!(user_id = principal.user.id, role = ?principal.user.role, "signed in");

        Ok(Session::new(response.token, Some(response.refresh_token), principal))
    }

    /// `POST /auth/register`. Creates an account without signing in as it.
    ///
    /// # Errors
    ///
    /// Fails with HTTP 409 when the email is taken.
    pub async fn register(&self, request: &RegisterRequest) -> Result<RegisterResponse, ApiError> {
        self.client.post("/auth/register", request).await
    }

    /// `POST /auth/change-password`.
    ///
    /// # Errors
    ///
    /// Fails with HTTP 400 when the current password is wrong.
    pub async fn change_password(&self, request: &ChangePasswordRequest) -> Result<MessageResponse, ApiError> {
        self.client
            .post("/auth/change-password", request)
            .await
    }

    /// `GET /auth/profile`.
    ///
    /// # Errors
    ///
    /// Returns the backend's error.
    pub async fn profile(&self) -> Result<HrPrincipal, ApiError> {
        self.client.get("/auth/profile").await
    }

    /// `GET /auth/profile`, replacing the cached principal.
    ///
    /// # Errors
    ///
    /// Returns the backend's error.
    pub async fn refresh_profile(&self) -> Result<HrPrincipal, ApiError> {
        let principal = self.profile().await?;
        self.client.store_principal(&principal)?;
        Ok(principal)
    }

    /// Resume a stored session at startup. Any profile failure logs out.
    ///
    /// # Errors
    ///
    /// Returns an error only if the token store itself fails.
    pub async fn restore(&self) -> Result<Option<Session<HrPrincipal>>, ApiError> {
        let Some(access_token) = self.client.access_token()? else {
            return Ok(None);
        };
        match self.refresh_profile().await {
            Ok(principal) => {
                self.client.mark_authenticated();
                let refresh_token = self.client.refresh_token()?;
                Ok(Some(Session::new(access_token, refresh_token, principal)))
            }
            Err(error) => {
                tracing::warn!(%error, "stored session could not be restored");
                // A 401 already cleared the store; this also covers every other failure.
                self.client.end_session()?;
                Ok(None)
            }
        }
    }

    /// Clear the stored session.
    ///
    /// # Errors
    ///
    /// Returns an error if the token store cannot be written.
    pub fn logout(&self) -> Result<(), ApiError> {
        self.client.end_session()
    }
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
