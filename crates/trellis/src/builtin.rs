// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Built-in framework modules wired into the launcher's kernel.

use trellis_core::types::ModuleKind;
use trellis_core::{Module, TrellisError};

/// Registers framework metric descriptions when the kernel starts.
pub struct MetricsModule;

impl Module for MetricsModule {
    fn name(&self) -> &str {
        "metrics"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn kind(&self) -> ModuleKind {
        ModuleKind::Observability
    }

    fn start(&mut self) -> Result<(), TrellisError> {
        trellis_transaction::register_metrics();
        Ok(())
    }
}

/// Reports the effective application identity at startup.
pub struct ConfigModule {
    application_name: String,
}

impl ConfigModule {
    pub fn new(application_name: impl Into<String>) -> Self {
        Self {
            application_name: application_name.into(),
        }
    }
}

impl Module for ConfigModule {
    fn name(&self) -> &str {
        "config"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn kind(&self) -> ModuleKind {
        ModuleKind::Config
    }

    fn start(&mut self) -> Result<(), TrellisError> {
        tracing::info!(application = %self.application_name, "configuration active");
        Ok(())
    }
}
