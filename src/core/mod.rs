//! # Core Module
//!
//! Configuration and Discord message helpers shared by the bot.
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Add response module with message truncation
//! - 1.0.0: Initial creation with config module

pub mod config;
pub mod response;

// Re-export commonly used items
pub use config::{Config, VerifySettings};
pub use response::{truncate_for_message, MESSAGE_LIMIT};
