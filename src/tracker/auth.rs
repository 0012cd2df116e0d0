//! Login, registration and profile for the tracker.

use super::types::{AuthResponse, LoginRequest, RegisterRequest, UpdateProfileRequest, User};
use crate::client::ApiClient;
use crate::error::ApiError;
use crate::session::Session;

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

    /// `POST /auth/login`. On success the token and user are stored and the
    /// session becomes authenticated; on failure nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns the backend's error; use [`ApiError::user_message`] with
    /// [`LOGIN_FAILED`] to present it.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session<User>, ApiError> {
        let body = LoginRequest { email: email.to_owned(), password: password.to_owned() };
        let response: AuthResponse = self.client.post("/auth/login", &body).await?;
        self.establish(response)
    }

    /// `POST /auth/register`. The backend signs the new user in directly.
    ///
    /// # Errors
    ///
    /// Returns the backend's error, e.g. a duplicate email.
    pub async fn register(&self, request: &RegisterRequest) -> Result<Session<User>, ApiError> {
        let response: AuthResponse = self.client.post("/auth/register", request).await?;
        self.establish(response)
    }

    /// `GET /profile`.
    ///
    /// # Errors
    ///
    /// Returns the backend's error.
    pub async fn profile(&self) -> Result<User, ApiError> {
        self.client.get("/profile").await
    }

    /// `GET /profile`, replacing the cached principal.
    ///
    /// # Errors
    ///
    /// Returns the backend's error.
    pub async fn refresh_profile(&self) -> Result<User, ApiError> {
        let user = self.profile().await?;
        self.client.store_principal(&user)?;
        Ok(user)
    }

    /// `PUT /profile`; refreshes the cached principal.
    ///
    /// # Errors
    ///
    /// Returns the backend's error.
    pub async fn update_profile(&self, request: &UpdateProfileRequest) -> Result<User, ApiError> {
        let user: User = self.client.put("/profile", request).await?;
        self.client.store_principal(&user)?;
        Ok(user)
    }

    /// Resume a stored session at startup. A stored token is only trusted
    /// once the profile fetch succeeds; any failure logs the session out.
    ///
    /// # Errors
    ///
    /// Returns an error only if the token store itself fails.
    pub async fn restore(&self) -> Result<Option<Session<User>>, ApiError> {
        let Some(access_token) = self.client.access_token()? else {
            return Ok(None);
        };
        match self.refresh_profile().await {
            Ok(user) => {
                self.client.mark_authenticated();
                let refresh_token = self.client.refresh_token()?;
                Ok(Some(Session::new(access_token, refresh_token, user)))
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

    fn establish(&self, response: AuthResponse) -> Result<Session<User>, ApiError> {
        self.client.begin_session(&response.token, None)?;
        self.client.store_principal(&response.user)?;
        tracing::info!(user_id = response.user.id, "signed in");
        Ok(Session::new(response.token, None, response.user))
    }
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
