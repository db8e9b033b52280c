// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command registry and handler dispatch.
//!
//! Handlers are registered explicitly under unique command names and
//! selected by the leading positional token. The integer a handler returns
//! is the process exit code; 0 signals success.

use std::collections::BTreeMap;

use trellis_core::TrellisError;

use crate::binder::{bind, CliBinding};
use crate::diagnostic::{suggest, CliError};
use crate::spec::CommandSpec;

/// A command implementation invoked with its bound options and arguments.
pub trait CliHandler: Send + Sync {
    /// Run the command. The returned integer is the process exit code.
    fn run(&self, binding: &CliBinding) -> Result<i32, TrellisError>;
}

impl<F> CliHandler for F
where
    F: Fn(&CliBinding) -> Result<i32, TrellisError> + Send + Sync,
{
    fn run(&self, binding: &CliBinding) -> Result<i32, TrellisError> {
        self(binding)
    }
}

struct CommandEntry {
    spec: CommandSpec,
    handler: Box<dyn CliHandler>,
}

/// Registry of command declarations and their handlers.
///
/// Commands are registered once at startup. Registering the same name
/// twice is an error, never resolved by registration order.
#[derive(Default)]
pub struct CommandRegistry {
    commands: BTreeMap<String, CommandEntry>,
}

impl CommandRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            commands: BTreeMap::new(),
        }
    }

    /// Register a command and its handler.
    pub fn register(
        &mut self,
        spec: CommandSpec,
        handler: Box<dyn CliHandler>,
    ) -> Result<(), CliError> {
        let name = spec.name().to_string();
        if self.commands.contains_key(&name) {
            return Err(CliError::DuplicateCommand { name });
        }
        self.commands.insert(name, CommandEntry { spec, handler });
        Ok(())
    }

    /// Registered command names, sorted.
    pub fn command_names(&self) -> Vec<&str> {
        self.commands.keys().map(String::as_str).collect()
    }

    /// Look up a command declaration by name.
    pub fn get(&self, name: &str) -> Option<&CommandSpec> {
        self.commands.get(name).map(|e| &e.spec)
    }

    /// Resolve the command named by the leading token, bind the remaining
    /// tokens, and run the handler.
    ///
    /// Returns the handler's exit code. Binding failures and handler errors
    /// surface as [`CliError`]; the caller renders them and exits non-zero
    /// before any application logic runs.
    pub fn dispatch(&self, argv: &[String]) -> Result<i32, CliError> {
        let Some(name) = argv.first() else {
            return Err(CliError::MissingCommand {
                available: self.command_names().join(", "),
            });
        };

        let Some(entry) = self.commands.get(name) else {
            let names = self.command_names();
            return Err(CliError::UnknownCommand {
                suggestion: suggest(name, &names),
                available: names.join(", "),
                name: name.clone(),
            });
        };

        let binding = bind(&entry.spec, &argv[1..])?;
        tracing::debug!(command = %name, "dispatching command");
        entry
            .handler
            .run(&binding)
            .map_err(|source| CliError::Handler {
                name: name.clone(),
                source,
            })
    }
}
