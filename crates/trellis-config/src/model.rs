// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Trellis framework.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Trellis configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections are optional and default to sensible
/// values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TrellisConfig {
    /// Application identity and logging settings.
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Command-line binding settings.
    #[serde(default)]
    pub cli: CliConfig,

    /// Transaction boundary defaults.
    #[serde(default)]
    pub transaction: TransactionConfig,
}

/// Application identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ApplicationConfig {
    /// Display name of the application.
    #[serde(default = "default_application_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: default_application_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_application_name() -> String {
    "trellis".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Command-line binding configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// Treatment of unrecognized options: "permissive" warns and
    /// continues, "strict" fails the binding.
    #[serde(default = "default_unknown_options")]
    pub unknown_options: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            unknown_options: default_unknown_options(),
        }
    }
}

fn default_unknown_options() -> String {
    "permissive".to_string()
}

/// Transaction boundary defaults.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TransactionConfig {
    /// Default propagation mode for boundaries that do not declare one.
    #[serde(default = "default_propagation")]
    pub default_propagation: String,

    /// Whether a participating scope's failure marks the shared
    /// transaction rollback-only.
    #[serde(default = "default_participation_failure")]
    pub rollback_on_participation_failure: bool,
}

impl Default for TransactionConfig {
    fn default() -> Self {
        Self {
            default_propagation: default_propagation(),
            rollback_on_participation_failure: default_participation_failure(),
        }
    }
}

fn default_propagation() -> String {
    "required".to_string()
}

fn default_participation_failure() -> bool {
    true
}
