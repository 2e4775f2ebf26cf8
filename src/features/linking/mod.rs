//! # Account Linking Feature
//!
//! Boundary to the external service that performs the actual account link.
//! Responses are passed through untouched; interpreting them is the
//! verification feature's job.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false

pub mod http;

pub use http::HttpAccountLinker;

use anyhow::Result;
use async_trait::async_trait;

/// External account-link operation
///
/// Returns the service's status text, or `None` when it gave no text.
/// Calls are never retried: a repeated link attempt after an ambiguous
/// failure could link twice.
#[async_trait]
pub trait AccountLinker: Send + Sync {
    async fn link(&self, code: &str, user_id: &str) -> Result<Option<String>>;
}
