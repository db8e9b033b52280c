// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Module registry.
//!
//! The `ModuleRegistry` stores `ModuleEntry` records keyed by module name.
//! Each entry carries a manifest, a status, and optionally the module
//! instance itself. Entries without instances exist for catalog display.

use std::collections::HashMap;

use trellis_core::types::ModuleKind;
use trellis_core::{Module, TrellisError};

use crate::manifest::ModuleManifest;

/// Status of a module in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleStatus {
    /// Module is active and will be started by the kernel.
    Enabled,
    /// Module is explicitly disabled.
    Disabled,
    /// Module is registered but missing required configuration.
    NotConfigured,
}

impl std::fmt::Display for ModuleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModuleStatus::Enabled => write!(f, "enabled"),
            ModuleStatus::Disabled => write!(f, "disabled"),
            ModuleStatus::NotConfigured => write!(f, "not-configured"),
        }
    }
}

/// A single entry in the module registry.
pub struct ModuleEntry {
    /// Module manifest with metadata.
    pub manifest: ModuleManifest,
    /// Current status of the module.
    pub status: ModuleStatus,
    /// The module instance, if one was registered.
    pub module: Option<Box<dyn Module>>,
}

impl std::fmt::Debug for ModuleEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleEntry")
            .field("manifest", &self.manifest)
            .field("status", &self.status)
            .field("module", &self.module.is_some())
            .finish()
    }
}

/// Registry of framework modules, keyed by name.
///
/// Supports registration, lookup, filtering by kind, and status toggling.
#[derive(Default)]
pub struct ModuleRegistry {
    entries: HashMap<String, ModuleEntry>,
}

impl ModuleRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Register a module with default status `Enabled`.
    pub fn register(&mut self, manifest: ModuleManifest, module: Option<Box<dyn Module>>) {
        self.register_with_status(manifest, module, ModuleStatus::Enabled);
    }

    /// Register a module with an explicit status.
    pub fn register_with_status(
        &mut self,
        manifest: ModuleManifest,
        module: Option<Box<dyn Module>>,
        status: ModuleStatus,
    ) {
        let name = manifest.name.clone();
        self.entries.insert(
            name,
            ModuleEntry {
                manifest,
                status,
                module,
            },
        );
    }

    /// Get a module entry by name.
    pub fn get(&self, name: &str) -> Option<&ModuleEntry> {
        self.entries.get(name)
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut ModuleEntry> {
        self.entries.get_mut(name)
    }

    /// Get all enabled modules matching the given kind.
    pub fn get_enabled(&self, kind: ModuleKind) -> Vec<&ModuleEntry> {
        self.entries
            .values()
            .filter(|e| e.status == ModuleStatus::Enabled && e.manifest.kind == kind)
            .collect()
    }

    /// List all module entries, sorted by name.
    pub fn list_all(&self) -> Vec<&ModuleEntry> {
        let mut entries: Vec<&ModuleEntry> = self.entries.values().collect();
        entries.sort_by(|a, b| a.manifest.name.cmp(&b.manifest.name));
        entries
    }

    /// Toggle a module's enabled status.
    pub fn set_enabled(&mut self, name: &str, enabled: bool) -> Result<(), TrellisError> {
        let entry = self
            .entries
            .get_mut(name)
            .ok_or_else(|| TrellisError::ModuleNotFound {
                name: name.to_string(),
            })?;
        entry.status = if enabled {
            ModuleStatus::Enabled
        } else {
            ModuleStatus::Disabled
        };
        Ok(())
    }

    /// Returns the number of registered modules.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no modules are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
