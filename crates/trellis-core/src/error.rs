// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Trellis framework.

use thiserror::Error;

/// The primary error type used across Trellis module lifecycle and core operations.
#[derive(Debug, Error)]
pub enum TrellisError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Requested module was not found in the registry.
    #[error("module not found: {name}")]
    ModuleNotFound { name: String },

    /// A module declares a dependency that is not registered or not enabled.
    #[error("module `{module}` depends on `{dependency}`, which is not available")]
    UnknownDependency { module: String, dependency: String },

    /// The module dependency graph contains a cycle.
    #[error("module dependency cycle involving: {members}")]
    DependencyCycle { members: String },

    /// A module failed during start or stop.
    #[error("lifecycle error in module `{module}`: {source}")]
    Lifecycle {
        module: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
