// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Transaction definitions: the attributes a transactional call site carries.

use crate::classify::ErrorClass;
use crate::propagation::Propagation;

/// Attributes governing one transactional boundary.
///
/// By default every error rolls the transaction back (the rollback list is
/// the catch-all root class). The first [`TransactionDef::rollback_on`]
/// call replaces the catch-all with an explicit list; later calls append
/// to it.
#[derive(Debug, Clone)]
pub struct TransactionDef {
    propagation: Propagation,
    read_only: bool,
    rollback_on_participation_failure: bool,
    rollback_on: Vec<ErrorClass>,
    no_rollback_for: Vec<ErrorClass>,
    explicit_rollback: bool,
}

impl TransactionDef {
    /// A definition with the given propagation mode and default attributes:
    /// read-write, participation failures mark rollback-only, every error
    /// rolls back.
    pub fn new(propagation: Propagation) -> Self {
        Self {
            propagation,
            read_only: false,
            rollback_on_participation_failure: true,
            rollback_on: vec![ErrorClass::root()],
            no_rollback_for: Vec::new(),
            explicit_rollback: false,
        }
    }

    /// Hint that the transaction performs no writes.
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    /// Whether a participating scope's failure marks the shared transaction
    /// rollback-only (defaults to `true`).
    pub fn rollback_on_participation_failure(mut self, value: bool) -> Self {
        self.rollback_on_participation_failure = value;
        self
    }

    /// Restrict rollback to the given error class (and its subtypes).
    ///
    /// The first call replaces the catch-all default; later calls append.
    pub fn rollback_on(mut self, class: ErrorClass) -> Self {
        if !self.explicit_rollback {
            self.rollback_on.clear();
            self.explicit_rollback = true;
        }
        self.rollback_on.push(class);
        self
    }

    /// Exclude the given error class (and its subtypes) from rollback.
    pub fn no_rollback_for(mut self, class: ErrorClass) -> Self {
        self.no_rollback_for.push(class);
        self
    }

    /// The propagation mode.
    pub fn propagation(&self) -> Propagation {
        self.propagation
    }

    /// The read-only hint.
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// The participation-failure flag.
    pub fn participation_failure_marks_rollback(&self) -> bool {
        self.rollback_on_participation_failure
    }

    /// Classes that trigger rollback.
    pub fn rollback_on_classes(&self) -> &[ErrorClass] {
        &self.rollback_on
    }

    /// Classes excluded from rollback.
    pub fn no_rollback_for_classes(&self) -> &[ErrorClass] {
        &self.no_rollback_for
    }
}

impl Default for TransactionDef {
    fn default() -> Self {
        Self::new(Propagation::Required)
    }
}
