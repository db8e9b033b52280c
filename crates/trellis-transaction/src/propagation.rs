// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Propagation modes and the pure decision function.
//!
//! `interpret` maps (requested mode, current transactional state) to the
//! action the executor must take. It performs no I/O and holds no state,
//! so every transition of the seven-mode state machine is directly
//! testable.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use thiserror::Error;

/// Transaction boundary behavior requested at a call site.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Propagation {
    /// Require an existing transaction; fail if absent.
    Mandatory,
    /// Use the existing transaction, or begin one.
    Required,
    /// Always begin a new transaction, suspending any existing one.
    RequiresNew,
    /// Use the existing transaction, or run non-transactionally.
    Supports,
    /// Suspend any existing transaction and run non-transactionally.
    NotSupported,
    /// Forbid an existing transaction.
    Never,
    /// Nest within an existing transaction if present, else begin one.
    Nested,
}

/// The executor action a propagation decision resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxAction {
    /// Participate in the current transaction without owning it.
    JoinExisting,
    /// Begin a transaction owned by this call site.
    BeginNew,
    /// Set the current transaction aside, begin a new owned one, and
    /// restore the original on completion.
    SuspendAndBegin,
    /// Run the body without any transaction.
    RunWithout,
    /// Set the current transaction aside, run without one, and restore
    /// the original on completion.
    SuspendAndRunWithout,
    /// Open a savepoint-scoped nested transaction inside the current one.
    BeginNested,
}

/// A propagation constraint violation.
///
/// Raised for MANDATORY without an active transaction and NEVER with one.
/// Non-retryable and never downgraded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("propagation {propagation} {reason}")]
pub struct PropagationViolation {
    pub propagation: Propagation,
    pub reason: &'static str,
}

/// Decide the executor action for a propagation mode.
///
/// `active` reports whether the current call chain holds an active
/// transaction; `nesting_supported` reports whether the underlying
/// resource supports savepoints. NESTED without savepoint support behaves
/// as REQUIRED.
pub fn interpret(
    propagation: Propagation,
    active: bool,
    nesting_supported: bool,
) -> Result<TxAction, PropagationViolation> {
    use Propagation::*;

    match (propagation, active) {
        (Mandatory, true) => Ok(TxAction::JoinExisting),
        (Mandatory, false) => Err(PropagationViolation {
            propagation,
            reason: "requires an active transaction",
        }),
        (Required, true) => Ok(TxAction::JoinExisting),
        (Required, false) => Ok(TxAction::BeginNew),
        (RequiresNew, true) => Ok(TxAction::SuspendAndBegin),
        (RequiresNew, false) => Ok(TxAction::BeginNew),
        (Supports, true) => Ok(TxAction::JoinExisting),
        (Supports, false) => Ok(TxAction::RunWithout),
        (NotSupported, true) => Ok(TxAction::SuspendAndRunWithout),
        (NotSupported, false) => Ok(TxAction::RunWithout),
        (Never, true) => Err(PropagationViolation {
            propagation,
            reason: "forbids an active transaction",
        }),
        (Never, false) => Ok(TxAction::RunWithout),
        (Nested, true) if nesting_supported => Ok(TxAction::BeginNested),
        (Nested, true) => Ok(TxAction::JoinExisting),
        (Nested, false) => Ok(TxAction::BeginNew),
    }
}
