//! Verification pipeline
//!
//! validate -> link -> classify -> compose, one pass per invocation.
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Bound the linking call with a timeout and reply on service failure
//! - 1.0.0: Initial implementation

use anyhow::Result;
use async_trait::async_trait;
use log::{debug, error, info};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use uuid::Uuid;

use super::classifier::{KeywordClassifier, OutcomeClassifier};
use super::composer::{compose, compose_invalid, ReplyPolicy};
use super::request::{Reply, VerificationRequest};
use super::validator::{validate, ValidationConfig, ValidationOutcome};
use crate::core::truncate_for_message;
use crate::features::linking::AccountLinker;

/// Sent when the linking service errors or can't be reached
pub const LINK_FAILURE_MESSAGE: &str =
    "❌ Sorry, I couldn't reach the account linking service. Please try again later.";
/// Sent when the linking service doesn't answer in time
pub const LINK_TIMEOUT_MESSAGE: &str =
    "⏱️ Sorry, the account linking service is taking longer than expected. Please try again in a moment.";

const DEFAULT_LINK_TIMEOUT: Duration = Duration::from_secs(15);

/// Where a reply goes; the Discord interaction in production
#[async_trait]
pub trait ReplySink: Send + Sync {
    async fn send(&self, reply: Reply) -> Result<()>;
}

/// The linking call exceeded its time budget
#[derive(Debug, Clone, Copy)]
pub struct LinkTimeout(pub Duration);

impl fmt::Display for LinkTimeout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Linking service timed out after {} seconds",
            self.0.as_secs()
        )
    }
}

impl std::error::Error for LinkTimeout {}

/// Run one request through the pipeline
///
/// Returns `Err` only when the linking service fails; invalid codes are an
/// ordinary reply and never reach the service.
pub async fn handle(
    request: &VerificationRequest,
    rules: &ValidationConfig,
    policy: &ReplyPolicy,
    linker: &dyn AccountLinker,
    classifier: &dyn OutcomeClassifier,
    link_timeout: Duration,
) -> Result<Reply> {
    if let ValidationOutcome::Invalid { reason } = validate(&request.code, rules) {
        return Ok(Reply {
            content: compose_invalid(&reason, policy),
            ephemeral: policy.ephemeral,
        });
    }

    let response = timeout(link_timeout, linker.link(&request.code, &request.user_id))
        .await
        .map_err(|_| anyhow::Error::new(LinkTimeout(link_timeout)))??;

    let is_success = classifier.is_success(response.as_deref());

    Ok(Reply {
        content: compose(is_success, response.as_deref(), request, policy),
        ephemeral: policy.ephemeral,
    })
}

/// Everything needed to answer verify invocations, shared read-only
#[derive(Clone)]
pub struct VerificationService {
    alias: String,
    rules: Arc<ValidationConfig>,
    policy: Arc<ReplyPolicy>,
    linker: Arc<dyn AccountLinker>,
    classifier: Arc<dyn OutcomeClassifier>,
    link_timeout: Duration,
}

impl VerificationService {
    pub fn new(
        alias: impl Into<String>,
        rules: ValidationConfig,
        policy: ReplyPolicy,
        linker: Arc<dyn AccountLinker>,
    ) -> Self {
        Self {
            alias: alias.into(),
            rules: Arc::new(rules),
            policy: Arc::new(policy),
            linker,
            classifier: Arc::new(KeywordClassifier),
            link_timeout: DEFAULT_LINK_TIMEOUT,
        }
    }

    pub fn with_link_timeout(mut self, link_timeout: Duration) -> Self {
        self.link_timeout = link_timeout;
        self
    }

    pub fn with_classifier(mut self, classifier: Arc<dyn OutcomeClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    /// Whether an invoked command name targets this service (case-insensitive)
    pub fn matches_command(&self, command_name: &str) -> bool {
        command_name.eq_ignore_ascii_case(&self.alias)
    }

    pub async fn handle(&self, request: &VerificationRequest) -> Result<Reply> {
        handle(
            request,
            &self.rules,
            &self.policy,
            self.linker.as_ref(),
            self.classifier.as_ref(),
            self.link_timeout,
        )
        .await
    }

    /// Answer one invocation through `sink`
    ///
    /// Returns `Ok(false)` without replying when the command isn't ours.
    /// Linking failures are logged and answered with a generic message;
    /// only a failure to deliver the reply is returned as `Err`.
    pub async fn dispatch(
        &self,
        command_name: &str,
        request: &VerificationRequest,
        sink: &dyn ReplySink,
    ) -> Result<bool> {
        if !self.matches_command(command_name) {
            debug!(
                "Ignoring command '{command_name}' (configured alias: '{}')",
                self.alias
            );
            return Ok(false);
        }

        let request_id = Uuid::new_v4();
        info!(
            "[{request_id}] 🔑 Verify requested | User: {} | Code length: {}",
            request.user_id,
            request.code.chars().count()
        );

        let reply = match self.handle(request).await {
            Ok(reply) => reply,
            Err(e) => {
                error!(
                    "[{request_id}] ❌ Linking failed for user {}: {e}",
                    request.user_id
                );
                let content = if e.downcast_ref::<LinkTimeout>().is_some() {
                    LINK_TIMEOUT_MESSAGE
                } else {
                    LINK_FAILURE_MESSAGE
                };
                Reply {
                    content: content.to_string(),
                    ephemeral: self.policy.ephemeral,
                }
            }
        };

        debug!(
            "[{request_id}] 📤 Sending reply ({} chars, ephemeral: {})",
            reply.content.chars().count(),
            reply.ephemeral
        );
        sink.send(Reply {
            content: truncate_for_message(&reply.content),
            ephemeral: reply.ephemeral,
        })
        .await?;

        info!("[{request_id}] ✅ Verify completed for user {}", request.user_id);
        Ok(true)
    }
}
