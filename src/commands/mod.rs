//! # Command System
//!
//! Slash command (/) handling for Discord interactions.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false

pub mod context;
pub mod handler;
pub mod handlers;
pub mod registry;
pub mod slash;

// Re-export the CommandHandler from the handler module
pub use crate::command_handler::CommandHandler;

// Re-export handler infrastructure
pub use context::CommandContext;
pub use handler::SlashCommandHandler;
pub use registry::CommandRegistry;

pub use slash::{
    create_slash_commands, get_string_option, register_global_commands, register_guild_commands,
};
