// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `trellis config` command implementation.
//!
//! Prints the effective configuration after layering and validation, as
//! TOML by default or JSON with `--json`.

use trellis_config::TrellisConfig;
use trellis_core::TrellisError;

/// Run the `trellis config` command.
pub fn run_config(config: &TrellisConfig, json: bool) -> Result<i32, TrellisError> {
    let rendered = render_config(config, json)?;
    println!("{rendered}");
    Ok(0)
}

/// Render the effective configuration to a string.
pub fn render_config(config: &TrellisConfig, json: bool) -> Result<String, TrellisError> {
    if json {
        serde_json::to_string_pretty(config)
            .map_err(|e| TrellisError::Internal(format!("config serialization failed: {e}")))
    } else {
        toml::to_string_pretty(config)
            .map_err(|e| TrellisError::Internal(format!("config serialization failed: {e}")))
    }
}
