// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across the module registry and the Trellis framework.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Identifies the integration area a module contributes to.
///
/// Used by the registry for filtering and by manifests for display.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum ModuleKind {
    /// Command-line handlers and option declarations.
    Command,
    /// Transactional boundary management.
    Transaction,
    /// Configuration contribution.
    Config,
    /// Metrics and logging.
    Observability,
    /// Application-supplied integration modules.
    Integration,
}

/// Lifecycle phase a module is currently in.
///
/// Modules move `Registered` -> `Started` -> `Stopped`. A failed start leaves
/// the module in `Failed` and triggers reverse-order unwinding of the modules
/// started before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModulePhase {
    Registered,
    Started,
    Stopped,
    Failed,
}

impl std::fmt::Display for ModulePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModulePhase::Registered => write!(f, "registered"),
            ModulePhase::Started => write!(f, "started"),
            ModulePhase::Stopped => write!(f, "stopped"),
            ModulePhase::Failed => write!(f, "failed"),
        }
    }
}
