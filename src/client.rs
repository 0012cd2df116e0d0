//! Authenticated HTTP client.
//!
//! DESIGN
//! ======
//! One `reqwest::Client` per process, built from [`ClientConfig`]. Every send
//! reads the access token from the [`TokenStore`] and attaches it as a bearer
//! credential. Responses are split three ways:
//!
//! - 2xx: body decoded into the caller's type.
//! - 401: stored session cleared, observers told the session ended, and the
//!   call still fails with [`ApiError::Unauthorized`].
//! - anything else: [`ApiError::Status`] with the decoded payload.
//!
//! No retries, no backoff, no deduplication. Each call is at-most-once.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::watch;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::session::SessionState;
use crate::store::TokenStore;

/// Shared handle to the backend. Cheap to clone.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<Inner>,
}

struct Inner {
    http: reqwest::Client,
    config: ClientConfig,
    store: Arc<dyn TokenStore>,
    state: watch::Sender<SessionState>,
}

impl ApiClient {
    /// Build the client. The session starts unauthenticated until a login or
    /// restore confirms the stored token.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: ClientConfig, store: Arc<dyn TokenStore>) -> Result<Self, ApiError> {
        let mut headers = config.default_headers.clone();
        headers.remove(AUTHORIZATION);

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build()?;
        let (state, _) = watch::channel(SessionState::Unauthenticated);

        Ok(Self { inner: Arc::new(Inner { http, config, store, state }) })
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn store(&self) -> &Arc<dyn TokenStore> {
        &self.inner.store
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        *self.inner.state.borrow()
    }

    /// Watch session transitions. A change to `Unauthenticated` is the signal
    /// to navigate to [`ClientConfig::login_path`].
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.inner.state.subscribe()
    }

    // =========================================================================
    // SESSION STORAGE
    // =========================================================================

    /// Stored access token, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the token store cannot be read.
    pub fn access_token(&self) -> Result<Option<String>, ApiError> {
        let key = self.inner.config.storage_keys().access_token;
        Ok(self.inner.store.get(key)?)
    }

    /// Stored refresh token, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the token store cannot be read.
    pub fn refresh_token(&self) -> Result<Option<String>, ApiError> {
        let key = self.inner.config.storage_keys().refresh_token;
        Ok(self.inner.store.get(key)?)
    }

    /// Persist credentials and mark the session authenticated.
    ///
    /// A failed write leaves no partial session behind: whatever was stored
    /// is cleared again and the state is unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the token store cannot be written.
    pub fn begin_session(&self, access_token: &str, refresh_token: Option<&str>) -> Result<(), ApiError> {
        if let Err(error) = self.write_tokens(access_token, refresh_token) {
            if let Err(cleanup) = self.clear_stored_session() {
                tracing::error!(error = %cleanup, "failed to clear partially written session");
            }
            return Err(error);
        }
        self.mark_authenticated();
        Ok(())
    }

    fn write_tokens(&self, access_token: &str, refresh_token: Option<&str>) -> Result<(), ApiError> {
        let keys = self.inner.config.storage_keys();
        self.inner.store.set(keys.access_token, access_token)?;
        match refresh_token {
            Some(token) => self.inner.store.set(keys.refresh_token, token)?,
            None => self.inner.store.remove(keys.refresh_token)?,
        }
        Ok(())
    }

    /// Cache the principal next to the tokens.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the store write fails.
    pub fn store_principal<P: Serialize>(&self, principal: &P) -> Result<(), ApiError> {
        let key = self.inner.config.storage_keys().principal;
        let text = serde_json::to_string(principal)?;
        Ok(self.inner.store.set(key, &text)?)
    }

    /// Cached principal, if one was stored and still decodes.
    ///
    /// # Errors
    ///
    /// Returns an error if the token store cannot be read.
    pub fn cached_principal<P: DeserializeOwned>(&self) -> Result<Option<P>, ApiError> {
        let key = self.inner.config.storage_keys().principal;
        let Some(text) = self.inner.store.get(key)? else {
            return Ok(None);
        };
        match serde_json::from_str(&text) {
            Ok(principal) => Ok(Some(principal)),
            Err(error) => {
                tracing::debug!(%error, "ignoring undecodable cached principal");
                Ok(None)
            }
        }
    }

    /// Remove every stored session entry and mark the session ended.
    ///
    /// # Errors
    ///
    /// Returns an error if the token store cannot be written.
    pub fn end_session(&self) -> Result<(), ApiError> {
        self.clear_stored_session()?;
        self.mark_unauthenticated();
        Ok(())
    }

    pub(crate) fn mark_authenticated(&self) {
        self.inner.state.send_replace(SessionState::Authenticated);
    }

    /// Returns `true` only for the call that performed the transition.
    fn mark_unauthenticated(&self) -> bool {
        self.inner.state.send_if_modified(|state| {
            let was_authenticated = state.is_authenticated();
            *state = SessionState::Unauthenticated;
            was_authenticated
        })
    }

    fn clear_stored_session(&self) -> Result<(), ApiError> {
        for key in self.inner.config.storage_keys().all() {
            self.inner.store.remove(key)?;
        }
        Ok(())
    }

    // =========================================================================
    // REQUESTS
    // =========================================================================

    /// Issue a call with an optional JSON body and query pairs.
    ///
    /// # Errors
    ///
    /// See the module docs for the failure policy.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let mut request = self.builder(method, path)?;
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(json) = body {
            request = request.json(json);
        }
        self.dispatch(request).await
    }

    /// `GET path`.
    ///
    /// # Errors
    ///
    /// See the module docs for the failure policy.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.dispatch(self.builder(Method::GET, path)?).await
    }

    /// `GET path?query`; unset optional fields are left out of the query.
    ///
    /// # Errors
    ///
    /// See the module docs for the failure policy.
    pub async fn get_with<Q, T>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.dispatch(self.builder(Method::GET, path)?.query(query))
            .await
    }

    /// `POST path` with a JSON body.
    ///
    /// # Errors
    ///
    /// See the module docs for the failure policy.
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.dispatch(self.builder(Method::POST, path)?.json(body))
            .await
    }

    /// `PUT path` with a JSON body.
    ///
    /// # Errors
    ///
    /// See the module docs for the failure policy.
    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.dispatch(self.builder(Method::PUT, path)?.json(body))
            .await
    }

    /// `DELETE path`.
    ///
    /// # Errors
    ///
    /// See the module docs for the failure policy.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.dispatch(self.builder(Method::DELETE, path)?).await
    }

    fn builder(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let request = self
            .inner
            .http
            .request(method, self.inner.config.url(path));
        match self.access_token()? {
            Some(token) => Ok(request.bearer_auth(token)),
            None => Ok(request),
        }
    }

    async fn dispatch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let request = request.build()?;
        let method = request.method().clone();
        let path = request.url().path().to_owned();

        let response = self.inner.http.execute(request).await?;
        let status = response.status();
        tracing::debug!(%method, %path, status = status.as_u16(), "api response");

        if status.is_success() {
            return decode_success(&response.bytes().await?);
        }

        // Cleanup runs before the body read: a truncated 401 still ends the session.
        if status == StatusCode::UNAUTHORIZED {
            self.handle_unauthorized(&path);
            let body = read_error_body(response).await;
            return Err(ApiError::Unauthorized { login_path: self.inner.config.login_path.clone(), body });
        }
        let body = read_error_body(response).await;
        Err(ApiError::Status { status, body })
    }

    fn handle_unauthorized(&self, path: &str) {
        if let Err(error) = self.clear_stored_session() {
            tracing::error!(%error, "failed to clear stored session after 401");
        }
        if self.mark_unauthenticated() {
            tracing::warn!(
                %path,
                login_path = %self.inner.config.login_path,
                "session rejected by server; credentials cleared"
            );
        }
    }
}

fn decode_success<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ApiError> {
    let bytes = if bytes.iter().all(u8::is_ascii_whitespace) { b"null".as_slice() } else { bytes };
    Ok(serde_json::from_slice(bytes)?)
}

async fn read_error_body(response: reqwest::Response) -> Value {
    match response.bytes().await {
        Ok(bytes) => decode_error_body(&bytes),
        Err(error) => {
            tracing::debug!(%error, "error body could not be read");
            Value::Null
        }
    }
}

/// Error payloads are kept as-is: JSON when it parses, raw text otherwise.
fn decode_error_body(bytes: &[u8]) -> Value {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Value::Null;
    }
    serde_json::from_slice(bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
