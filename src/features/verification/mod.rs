//! # Verification Feature
//!
//! Links a Discord account to an external account with a short code:
//! validate the code, hand it to the linking service, decide from the
//! service's text whether it worked, and word the reply.
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Link timeout, generic failure reply, pluggable classifier
//! - 1.0.0: Initial release with length and format checks

pub mod classifier;
pub mod composer;
pub mod pipeline;
pub mod request;
pub mod validator;

pub use classifier::{classify, KeywordClassifier, OutcomeClassifier, FAILURE_KEYWORDS};
pub use composer::{compose, compose_invalid, fill_template, ReplyPolicy};
pub use pipeline::{handle, LinkTimeout, ReplySink, VerificationService};
pub use request::{Reply, VerificationRequest};
pub use validator::{validate, ValidationConfig, ValidationOutcome};
