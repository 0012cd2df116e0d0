//! Authenticated REST client for the staff attendance tracker and the HR
//! management backend.
//!
//! One [`ApiClient`] per process holds the transport configuration and a
//! [`TokenStore`]. Every call attaches the stored bearer token; a 401 from
//! either backend clears the stored session and flips the observable
//! [`SessionState`] to unauthenticated. Resource operations hang off
//! [`ApiClient::tracker`] and [`ApiClient::hr`].

pub mod client;
pub mod config;
pub mod error;
pub mod hr;
pub mod session;
pub mod store;
pub mod tracker;
pub mod types;

pub use client::ApiClient;
pub use config::{ClientConfig, StorageKeys, Variant};
pub use error::{ApiError, ConfigError, StoreError};
pub use session::{Session, SessionState};
pub use store::{FileStore, MemoryStore, TokenStore};
pub use types::{MessageResponse, Page, PageQuery, Pagination};

#[cfg(test)]
#[path = "mock_backend_test.rs"]
mod mock_backend;
