// Core layer - configuration and Discord message helpers
pub mod core;

// Features layer - verification pipeline and linking service
pub mod features;

// Application layer
pub mod command_handler;
pub mod commands;

pub use core::{Config, VerifySettings};

pub use features::{
    AccountLinker, HttpAccountLinker, KeywordClassifier, OutcomeClassifier, Reply, ReplyPolicy,
    ReplySink, ValidationConfig, ValidationOutcome, VerificationRequest, VerificationService,
};
