//! HTTP client for the account linking service
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use anyhow::Result;
use async_trait::async_trait;
use log::{debug, warn};
use serde::Serialize;

use super::AccountLinker;

#[derive(Debug, Serialize)]
struct LinkRequestBody<'a> {
    code: &'a str,
    user_id: &'a str,
}

/// Posts link requests as JSON and returns the body text verbatim
#[derive(Clone)]
pub struct HttpAccountLinker {
    client: reqwest::Client,
    endpoint: String,
    token: Option<String>,
}

impl HttpAccountLinker {
    pub fn new(endpoint: impl Into<String>, token: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            token,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl AccountLinker for HttpAccountLinker {
    async fn link(&self, code: &str, user_id: &str) -> Result<Option<String>> {
        debug!("POST {} for user {user_id}", self.endpoint);

        let mut request = self
            .client
            .post(&self.endpoint)
            .json(&LinkRequestBody { code, user_id });
        if let Some(ref token) = self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("Linking service unreachable: {e}"))?;

        let status = response.status();
        if !status.is_success() {
            warn!("Linking service returned HTTP {status}");
            return Err(anyhow::anyhow!("Linking service returned HTTP {status}"));
        }

        let body = response
            .text()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to read linking service response: {e}"))?;

        Ok(if body.is_empty() { None } else { Some(body) })
    }
}
