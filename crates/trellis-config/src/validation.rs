// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes: enumerated string values and non-empty names. Collects all
//! errors instead of failing fast.

use crate::diagnostic::ConfigError;
use crate::model::TrellisConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

const UNKNOWN_OPTION_POLICIES: &[&str] = &["permissive", "strict"];

const PROPAGATION_MODES: &[&str] = &[
    "mandatory",
    "required",
    "requires_new",
    "supports",
    "not_supported",
    "never",
    "nested",
];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)`
/// with all collected validation errors.
pub fn validate_config(config: &TrellisConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.application.name.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "application.name must not be empty".to_string(),
        });
    }

    if !LOG_LEVELS.contains(&config.application.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "application.log_level `{}` is not one of: {}",
                config.application.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if !UNKNOWN_OPTION_POLICIES.contains(&config.cli.unknown_options.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "cli.unknown_options `{}` is not one of: {}",
                config.cli.unknown_options,
                UNKNOWN_OPTION_POLICIES.join(", ")
            ),
        });
    }

    if !PROPAGATION_MODES.contains(&config.transaction.default_propagation.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "transaction.default_propagation `{}` is not one of: {}",
                config.transaction.default_propagation,
                PROPAGATION_MODES.join(", ")
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
