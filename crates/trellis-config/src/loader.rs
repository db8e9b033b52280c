// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports the XDG hierarchy: `./trellis.toml` > `~/.config/trellis/trellis.toml`
//! > `/etc/trellis/trellis.toml`, with environment variable overrides via
//! the `TRELLIS_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::TrellisConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/trellis/trellis.toml` (system-wide)
/// 3. `~/.config/trellis/trellis.toml` (user XDG config)
/// 4. `./trellis.toml` (local directory)
/// 5. `TRELLIS_*` environment variables
pub fn load_config() -> Result<TrellisConfig, figment::Error> {
    base_figment().extract()
}

/// Load configuration from a TOML string only (defaults + string).
///
/// Used by tests and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<TrellisConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TrellisConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<TrellisConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TrellisConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

fn base_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(TrellisConfig::default()))
        .merge(Toml::file("/etc/trellis/trellis.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("trellis/trellis.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("trellis.toml"))
        .merge(env_provider())
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` so that key names
/// containing underscores stay intact: `TRELLIS_CLI_UNKNOWN_OPTIONS` must
/// map to `cli.unknown_options`, not `cli.unknown.options`.
fn env_provider() -> Env {
    Env::prefixed("TRELLIS_").map(|key| {
        // `key` is the lowercased env var name with the prefix stripped,
        // e.g. TRELLIS_APPLICATION_LOG_LEVEL -> "application_log_level".
        let mapped = key
            .as_str()
            .replacen("application_", "application.", 1)
            .replacen("cli_", "cli.", 1)
            .replacen("transaction_", "transaction.", 1);
        mapped.into()
    })
}
