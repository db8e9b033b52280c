// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Module manifest parsing from `module.toml` content.
//!
//! Manifests describe framework modules for registration and catalog
//! display: identity, integration area, dependency names, and the config
//! keys the module reads.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use trellis_core::types::ModuleKind;
use trellis_core::TrellisError;

/// Parsed module manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleManifest {
    /// Unique name of the module (e.g., "cli", "transaction").
    pub name: String,
    /// Semantic version string.
    pub version: String,
    /// Human-readable description.
    pub description: String,
    /// Integration area this module contributes to.
    pub kind: ModuleKind,
    /// Names of modules that must start before this one.
    pub dependencies: Vec<String>,
    /// Config keys the module reads (e.g., ["cli.unknown_options"]).
    pub config_keys: Vec<String>,
    /// Minimum Trellis version required (e.g., "0.1.0").
    pub min_trellis_version: Option<String>,
}

/// Intermediate TOML deserialization struct for `module.toml`.
#[derive(Debug, Deserialize)]
struct ModuleManifestFile {
    module: ModuleSection,
}

/// The `[module]` section of a `module.toml` file.
#[derive(Debug, Deserialize)]
struct ModuleSection {
    name: String,
    version: String,
    description: String,
    kind: String,
    #[serde(default)]
    dependencies: Vec<String>,
    #[serde(default)]
    config_keys: Vec<String>,
    min_trellis_version: Option<String>,
}

/// Parse a module manifest from TOML content.
///
/// Validates that the kind is a valid `ModuleKind` variant, the name is
/// non-empty, and the version strings parse as semantic versions.
pub fn parse_module_manifest(toml_content: &str) -> Result<ModuleManifest, TrellisError> {
    let file: ModuleManifestFile = toml::from_str(toml_content)
        .map_err(|e| TrellisError::Config(format!("invalid module manifest: {e}")))?;

    let section = file.module;

    if section.name.is_empty() {
        return Err(TrellisError::Config(
            "module manifest: name must not be empty".to_string(),
        ));
    }

    if semver::Version::parse(&section.version).is_err() {
        return Err(TrellisError::Config(format!(
            "module manifest: version `{}` is not a semantic version",
            section.version
        )));
    }

    if let Some(min) = &section.min_trellis_version
        && semver::Version::parse(min).is_err()
    {
        return Err(TrellisError::Config(format!(
            "module manifest: min_trellis_version `{min}` is not a semantic version"
        )));
    }

    let kind = ModuleKind::from_str(&section.kind).map_err(|_| {
        TrellisError::Config(format!(
            "module manifest: invalid kind '{}'. Expected one of: Command, Transaction, Config, Observability, Integration",
            section.kind
        ))
    })?;

    Ok(ModuleManifest {
        name: section.name,
        version: section.version,
        description: section.description,
        kind,
        dependencies: section.dependencies,
        config_keys: section.config_keys,
        min_trellis_version: section.min_trellis_version,
    })
}
