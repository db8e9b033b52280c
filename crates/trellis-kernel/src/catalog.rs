// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Built-in module catalog.
//!
//! Returns hardcoded `ModuleManifest` entries for the framework's default
//! modules. No discovery is performed; applications register additional
//! modules explicitly through the kernel builder.

use trellis_core::types::ModuleKind;

use crate::manifest::ModuleManifest;

/// Returns manifests for all built-in framework modules.
///
/// The catalog contains 4 default modules:
/// - config (Config)
/// - cli (Command)
/// - transaction (Transaction)
/// - metrics (Observability)
pub fn builtin_catalog() -> Vec<ModuleManifest> {
    vec![
        ModuleManifest {
            name: "config".to_string(),
            version: "0.1.0".to_string(),
            description: "Layered TOML and environment configuration".to_string(),
            kind: ModuleKind::Config,
            dependencies: vec![],
            config_keys: vec![],
            min_trellis_version: Some("0.1.0".to_string()),
        },
        ModuleManifest {
            name: "cli".to_string(),
            version: "0.1.0".to_string(),
            description: "Declarative command-line option binding".to_string(),
            kind: ModuleKind::Command,
            dependencies: vec!["config".to_string()],
            config_keys: vec!["cli.unknown_options".to_string()],
            min_trellis_version: Some("0.1.0".to_string()),
        },
        ModuleManifest {
            name: "transaction".to_string(),
            version: "0.1.0".to_string(),
            description: "Transaction propagation interpretation".to_string(),
            kind: ModuleKind::Transaction,
            dependencies: vec!["config".to_string()],
            config_keys: vec![
                "transaction.default_propagation".to_string(),
                "transaction.rollback_on_participation_failure".to_string(),
            ],
            min_trellis_version: Some("0.1.0".to_string()),
        },
        ModuleManifest {
            name: "metrics".to_string(),
            version: "0.1.0".to_string(),
            description: "Metric registration for framework counters".to_string(),
            kind: ModuleKind::Observability,
            dependencies: vec![],
            config_keys: vec![],
            min_trellis_version: Some("0.1.0".to_string()),
        },
    ]
}

/// Search the built-in catalog by query string.
///
/// Filters entries whose name or description contains the query
/// (case-insensitive). If the query is empty, returns all entries.
pub fn search_catalog(query: &str) -> Vec<ModuleManifest> {
    if query.is_empty() {
        return builtin_catalog();
    }
    let query_lower = query.to_lowercase();
    builtin_catalog()
        .into_iter()
        .filter(|m| {
            m.name.to_lowercase().contains(&query_lower)
                || m.description.to_lowercase().contains(&query_lower)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_returns_four_entries() {
        assert_eq!(builtin_catalog().len(), 4);
    }

    #[test]
    fn builtin_catalog_covers_expected_kinds() {
        let kinds: std::collections::HashSet<ModuleKind> =
            builtin_catalog().iter().map(|m| m.kind).collect();

        assert!(kinds.contains(&ModuleKind::Command));
        assert!(kinds.contains(&ModuleKind::Transaction));
        assert!(kinds.contains(&ModuleKind::Config));
        assert!(kinds.contains(&ModuleKind::Observability));
    }

    #[test]
    fn builtin_modules_depend_only_on_catalog_members() {
        let catalog = builtin_catalog();
        let names: std::collections::HashSet<&str> =
            catalog.iter().map(|m| m.name.as_str()).collect();
        for manifest in &catalog {
            for dependency in &manifest.dependencies {
                assert!(
                    names.contains(dependency.as_str()),
                    "{} depends on unknown {dependency}",
                    manifest.name
                );
            }
        }
    }

    #[test]
    fn search_catalog_finds_transaction() {
        let results = search_catalog("transaction");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "transaction");
    }

    #[test]
    fn search_catalog_case_insensitive() {
        let results = search_catalog("CLI");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "cli");
    }

    #[test]
    fn search_catalog_by_description() {
        let results = search_catalog("option binding");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "cli");
    }

    #[test]
    fn search_catalog_no_match() {
        assert!(search_catalog("xyz_nonexistent").is_empty());
    }
}
