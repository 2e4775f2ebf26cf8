//! Command handler registry
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Case-insensitive lookup with owned names
//! - 1.0.0: Initial implementation for handler dispatch

use std::collections::HashMap;
use std::sync::Arc;

use super::handler::SlashCommandHandler;

/// Registry mapping command names to handlers
///
/// Names are stored lowercased and looked up case-insensitively, so an
/// invocation of `/Verify` reaches the handler registered as `verify`.
#[derive(Clone)]
pub struct CommandRegistry {
    handlers: HashMap<String, Arc<dyn SlashCommandHandler>>,
}

impl CommandRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Register a handler under its command name
    ///
    /// A later handler with the same name replaces the earlier one.
    pub fn register(&mut self, handler: Arc<dyn SlashCommandHandler>) {
        self.handlers
            .insert(handler.command_name().to_lowercase(), handler);
    }

    /// Get handler for a command name
    pub fn get(&self, name: &str) -> Option<Arc<dyn SlashCommandHandler>> {
        self.handlers.get(&name.to_lowercase()).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(&name.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn command_names(&self) -> impl Iterator<Item = &String> {
        self.handlers.keys()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}
