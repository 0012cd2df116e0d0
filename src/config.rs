//! Client configuration parsed from environment variables.
//!
//! Two backend variants are supported. They differ in base URL, in the keys
//! used to persist the session, and in where a 401 sends the user.

use std::str::FromStr;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};

use crate::error::ConfigError;

pub const DEFAULT_TRACKER_BASE_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_HR_BASE_URL: &str = "http://localhost:8080/api/v1";

/// Which backend the client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    /// Attendance tracker (`/api`).
    #[default]
    Tracker,
    /// HR management (`/api/v1`).
    Hr,
}

impl Variant {
    #[must_use]
    pub fn default_base_url(self) -> &'static str {
        match self {
            Self::Tracker => DEFAULT_TRACKER_BASE_URL,
            Self::Hr => DEFAULT_HR_BASE_URL,
        }
    }

    /// Login entry point a 401 redirects to.
    #[must_use]
    pub fn login_path(self) -> &'static str {
        match self {
            Self::Tracker => "/auth/login",
            Self::Hr => "/login",
        }
    }

    #[must_use]
    pub fn storage_keys(self) -> StorageKeys {
        match self {
            Self::Tracker => StorageKeys { access_token: "token", refresh_token: "refresh_token", principal: "user" },
            Self::Hr => StorageKeys { access_token: "auth_token", refresh_token: "refresh_token", principal: "user" },
        }
    }
}

impl FromStr for Variant {
    type Err = ConfigError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "tracker" | "attendance" => Ok(Self::Tracker),
            "hr" => Ok(Self::Hr),
            other => Err(ConfigError::UnknownVariant(other.to_owned())),
        }
    }
}

/// Fixed key names under which session data is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorageKeys {
    pub access_token: &'static str,
    pub refresh_token: &'static str,
    pub principal: &'static str,
}

impl StorageKeys {
    /// Every key cleared when the session ends.
    #[must_use]
    pub fn all(self) -> [&'static str; 3] {
        [self.access_token, self.refresh_token, self.principal]
    }
}

/// Process-wide transport configuration, established once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub variant: Variant,
    pub base_url: String,
    pub login_path: String,
    pub default_headers: HeaderMap,
    pub request_timeout_secs: Option<u64>,
}

impl ClientConfig {
    /// Defaults for `variant`: its base URL, login path, and a JSON
    /// `Content-Type` default header. No request timeout.
    #[must_use]
    pub fn new(variant: Variant) -> Self {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Self {
            variant,
            base_url: variant.default_base_url().to_owned(),
            login_path: variant.login_path().to_owned(),
            default_headers,
            request_timeout_secs: None,
        }
    }

    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `STAFFDESK_VARIANT`: `tracker` (default) or `hr`
    /// - `STAFFDESK_API_URL`, else `NEXT_PUBLIC_API_URL`: base URL
    /// - `STAFFDESK_LOGIN_PATH`: login entry point
    /// - `STAFFDESK_REQUEST_TIMEOUT_SECS`: request timeout, none when unset
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown variant or a non-numeric timeout.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_var)
    }

    /// [`ClientConfig::from_env`] with the variant pinned by the caller;
    /// `STAFFDESK_VARIANT` is not consulted.
    ///
    /// # Errors
    ///
    /// Returns an error for a non-numeric timeout.
    pub fn from_env_for(variant: Variant) -> Result<Self, ConfigError> {
        Self::from_lookup_for(variant, env_var)
    }

    /// Same as [`ClientConfig::from_env`] with an injectable variable source.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown variant or a non-numeric timeout.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let variant = match non_empty(lookup("STAFFDESK_VARIANT")) {
            Some(raw) => raw.parse()?,
            None => Variant::default(),
        };
        Self::from_lookup_for(variant, lookup)
    }

    /// Same as [`ClientConfig::from_env_for`] with an injectable variable source.
    ///
    /// # Errors
    ///
    /// Returns an error for a non-numeric timeout.
    pub fn from_lookup_for(variant: Variant, lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| non_empty(lookup(key));
        let mut config = Self::new(variant);

        if let Some(url) = var("STAFFDESK_API_URL").or_else(|| var("NEXT_PUBLIC_API_URL")) {
            config = config.with_base_url(&url);
        }
        if let Some(path) = var("STAFFDESK_LOGIN_PATH") {
            config.login_path = path;
        }
        if let Some(raw) = var("STAFFDESK_REQUEST_TIMEOUT_SECS") {
            let secs = raw.trim().parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: "STAFFDESK_REQUEST_TIMEOUT_SECS",
                value: raw.clone(),
            })?;
            config.request_timeout_secs = Some(secs);
        }
        Ok(config)
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim().trim_end_matches('/').to_owned();
        self
    }

    /// Add an extra default header sent with every request.
    ///
    /// `Authorization` is refused: the bearer credential only ever comes from
    /// the token store.
    ///
    /// # Errors
    ///
    /// Returns an error if the name or value is not a valid header.
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self, ConfigError> {
        let name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| ConfigError::InvalidHeader(name.to_owned()))?;
        if name == AUTHORIZATION {
            return Err(ConfigError::InvalidHeader(name.to_string()));
        }
        let value = HeaderValue::from_str(value).map_err(|_| ConfigError::InvalidHeader(name.to_string()))?;
        self.default_headers.insert(name, value);
        Ok(self)
    }

    #[must_use]
    pub fn storage_keys(&self) -> StorageKeys {
        self.variant.storage_keys()
    }

    /// Absolute URL for an endpoint path such as `/attendance/checkin`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }
}

/// An unset or non-UTF-8 variable reads as unset.
fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(Variant::default())
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
