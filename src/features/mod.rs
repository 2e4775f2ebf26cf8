//! # Features
//!
//! Bot features, one directory each.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

pub mod linking;
pub mod verification;

pub use linking::{AccountLinker, HttpAccountLinker};
pub use verification::{
    KeywordClassifier, OutcomeClassifier, Reply, ReplyPolicy, ReplySink, ValidationConfig,
    ValidationOutcome, VerificationRequest, VerificationService,
};

/// Bot version from Cargo.toml
pub fn get_bot_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
