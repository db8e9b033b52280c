// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The kernel: dependency-ordered module lifecycle.
//!
//! Modules are registered explicitly through the builder. `start` resolves
//! a deterministic topological order over the enabled modules' declared
//! dependencies (Kahn's algorithm, alphabetical among ready modules),
//! starts them in that order, and unwinds already-started modules in
//! reverse when one fails. `stop` stops in reverse start order.

use std::collections::{BTreeMap, BTreeSet};

use trellis_core::{Module, TrellisError};

use crate::manifest::ModuleManifest;
use crate::registry::{ModuleRegistry, ModuleStatus};

/// Builder assembling a [`Kernel`] from explicit registrations.
#[derive(Default)]
pub struct KernelBuilder {
    registry: ModuleRegistry,
}

impl KernelBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self {
            registry: ModuleRegistry::new(),
        }
    }

    /// Register a module instance with its manifest, enabled.
    pub fn module(mut self, manifest: ModuleManifest, module: Box<dyn Module>) -> Self {
        self.registry.register(manifest, Some(module));
        self
    }

    /// Register a manifest without an instance (catalog display only).
    pub fn manifest(mut self, manifest: ModuleManifest) -> Self {
        self.registry.register(manifest, None);
        self
    }

    /// Register a module with an explicit status.
    pub fn module_with_status(
        mut self,
        manifest: ModuleManifest,
        module: Option<Box<dyn Module>>,
        status: ModuleStatus,
    ) -> Self {
        self.registry.register_with_status(manifest, module, status);
        self
    }

    /// Finalize the kernel.
    pub fn build(self) -> Kernel {
        Kernel {
            registry: self.registry,
            started: Vec::new(),
        }
    }
}

/// Owns the module registry and drives the module lifecycle.
pub struct Kernel {
    registry: ModuleRegistry,
    started: Vec<String>,
}

impl Kernel {
    /// Start building a kernel.
    pub fn builder() -> KernelBuilder {
        KernelBuilder::new()
    }

    /// The module registry.
    pub fn registry(&self) -> &ModuleRegistry {
        &self.registry
    }

    /// Names of started modules, in start order.
    pub fn started(&self) -> &[String] {
        &self.started
    }

    /// Start all enabled modules in dependency order.
    ///
    /// If a module fails to start, the modules started before it are
    /// stopped in reverse order and the failure is returned.
    pub fn start(&mut self) -> Result<(), TrellisError> {
        let order = self.resolve_start_order()?;
        tracing::debug!(?order, "resolved module start order");

        for name in order {
            let entry = self
                .registry
                .get_mut(&name)
                .expect("resolved module is registered");
            if let Some(module) = entry.module.as_mut() {
                tracing::info!(module = %name, "starting module");
                if let Err(error) = module.start() {
                    tracing::error!(module = %name, %error, "module failed to start; unwinding");
                    self.unwind_started();
                    return Err(TrellisError::Lifecycle {
                        module: name,
                        source: Box::new(error),
                    });
                }
            }
            self.started.push(name);
        }
        Ok(())
    }

    /// Stop started modules in reverse start order.
    ///
    /// Stops every module even if one fails; the first failure is returned.
    pub fn stop(&mut self) -> Result<(), TrellisError> {
        let mut first_error = None;
        while let Some(name) = self.started.pop() {
            if let Some(entry) = self.registry.get_mut(&name)
                && let Some(module) = entry.module.as_mut()
            {
                tracing::info!(module = %name, "stopping module");
                if let Err(error) = module.stop() {
                    tracing::error!(module = %name, %error, "module failed to stop");
                    if first_error.is_none() {
                        first_error = Some(TrellisError::Lifecycle {
                            module: name.clone(),
                            source: Box::new(error),
                        });
                    }
                }
            }
        }
        match first_error {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn unwind_started(&mut self) {
        while let Some(name) = self.started.pop() {
            if let Some(entry) = self.registry.get_mut(&name)
                && let Some(module) = entry.module.as_mut()
            {
                tracing::info!(module = %name, "stopping module during unwind");
                if let Err(error) = module.stop() {
                    tracing::error!(module = %name, %error, "module failed to stop during unwind");
                }
            }
        }
    }

    /// Topologically order enabled modules by their declared dependencies.
    fn resolve_start_order(&self) -> Result<Vec<String>, TrellisError> {
        let enabled: BTreeMap<&str, &crate::registry::ModuleEntry> = self
            .registry
            .list_all()
            .into_iter()
            .filter(|e| e.status == ModuleStatus::Enabled)
            .map(|e| (e.manifest.name.as_str(), e))
            .collect();

        for (name, entry) in &enabled {
            for dependency in &entry.manifest.dependencies {
                if !enabled.contains_key(dependency.as_str()) {
                    return Err(TrellisError::UnknownDependency {
                        module: (*name).to_string(),
                        dependency: dependency.clone(),
                    });
                }
            }
        }

        let mut in_degree: BTreeMap<&str, usize> =
            enabled.keys().map(|name| (*name, 0)).collect();
        let mut dependents: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for (name, entry) in &enabled {
            for dependency in &entry.manifest.dependencies {
                *in_degree.get_mut(*name).expect("known module") += 1;
                dependents.entry(dependency.as_str()).or_default().push(*name);
            }
        }

        let mut ready: BTreeSet<&str> = in_degree
            .iter()
            .filter(|(_, degree)| **degree == 0)
            .map(|(name, _)| *name)
            .collect();
        let mut order = Vec::with_capacity(enabled.len());

        while let Some(&name) = ready.iter().next() {
            ready.remove(name);
            order.push(name.to_string());
            if let Some(children) = dependents.get(name) {
                for &dependent in children {
                    let degree = in_degree.get_mut(dependent).expect("known module");
                    *degree -= 1;
                    if *degree == 0 {
                        ready.insert(dependent);
                    }
                }
            }
        }

        if order.len() != enabled.len() {
            let members = in_degree
                .iter()
                .filter(|(_, degree)| **degree > 0)
                .map(|(name, _)| *name)
                .collect::<Vec<_>>()
                .join(", ");
            return Err(TrellisError::DependencyCycle { members });
        }

        Ok(order)
    }
}
