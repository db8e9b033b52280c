// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock transactional resource for deterministic testing.
//!
//! `RecordingResource` implements `TransactionalResource` with an event
//! log, enabling tests to assert the exact begin/commit/rollback sequence
//! the executor drove. Commit failures can be scripted, and savepoint
//! support is opt-in so both nesting paths are testable.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Mutex;

use trellis_transaction::{ResourceError, TransactionDef, TransactionalResource};

/// One call the executor made against the resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxEvent {
    Begin { tx: u32, read_only: bool },
    Commit { tx: u32 },
    Rollback { tx: u32 },
    Savepoint { tx: u32, savepoint: u32 },
    ReleaseSavepoint { tx: u32, savepoint: u32 },
    RollbackToSavepoint { tx: u32, savepoint: u32 },
}

/// The mock's transaction object: an id handed out by `begin`.
#[derive(Debug, PartialEq, Eq)]
pub struct MockTransaction {
    pub id: u32,
}

/// A `TransactionalResource` that records every call.
///
/// The event log is behind a `Mutex` so a single resource can be shared
/// across threads in context-isolation tests.
pub struct RecordingResource {
    events: Mutex<Vec<TxEvent>>,
    next_tx: AtomicU32,
    next_savepoint: AtomicU32,
    savepoints_enabled: bool,
    fail_next_commit: AtomicBool,
}

impl RecordingResource {
    /// A resource without savepoint support.
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            next_tx: AtomicU32::new(1),
            next_savepoint: AtomicU32::new(1),
            savepoints_enabled: false,
            fail_next_commit: AtomicBool::new(false),
        }
    }

    /// A resource with savepoint support enabled.
    pub fn with_savepoints() -> Self {
        Self {
            savepoints_enabled: true,
            ..Self::new()
        }
    }

    /// Make the next `commit` call fail.
    pub fn fail_next_commit(&self) {
        self.fail_next_commit.store(true, Ordering::SeqCst);
    }

    /// Snapshot of the recorded events.
    pub fn events(&self) -> Vec<TxEvent> {
        self.events.lock().expect("event log poisoned").clone()
    }

    /// Events recorded for one transaction id, in order.
    pub fn events_for(&self, tx: u32) -> Vec<TxEvent> {
        self.events()
            .into_iter()
            .filter(|e| match e {
                TxEvent::Begin { tx: t, .. }
                | TxEvent::Commit { tx: t }
                | TxEvent::Rollback { tx: t }
                | TxEvent::Savepoint { tx: t, .. }
                | TxEvent::ReleaseSavepoint { tx: t, .. }
                | TxEvent::RollbackToSavepoint { tx: t, .. } => *t == tx,
            })
            .collect()
    }

    fn record(&self, event: TxEvent) {
        self.events.lock().expect("event log poisoned").push(event);
    }
}

impl Default for RecordingResource {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionalResource for RecordingResource {
    type Transaction = MockTransaction;
    type Savepoint = u32;

    fn begin(&self, def: &TransactionDef) -> Result<MockTransaction, ResourceError> {
        let id = self.next_tx.fetch_add(1, Ordering::SeqCst);
        self.record(TxEvent::Begin {
            tx: id,
            read_only: def.is_read_only(),
        });
        Ok(MockTransaction { id })
    }

    fn commit(&self, tx: &mut MockTransaction) -> Result<(), ResourceError> {
        if self.fail_next_commit.swap(false, Ordering::SeqCst) {
            return Err(ResourceError::new("scripted commit failure"));
        }
        self.record(TxEvent::Commit { tx: tx.id });
        Ok(())
    }

    fn rollback(&self, tx: &mut MockTransaction) -> Result<(), ResourceError> {
        self.record(TxEvent::Rollback { tx: tx.id });
        Ok(())
    }

    fn supports_savepoints(&self) -> bool {
        self.savepoints_enabled
    }

    fn savepoint(&self, tx: &mut MockTransaction) -> Result<u32, ResourceError> {
        if !self.savepoints_enabled {
            return Err(ResourceError::new("savepoints disabled"));
        }
        let savepoint = self.next_savepoint.fetch_add(1, Ordering::SeqCst);
        self.record(TxEvent::Savepoint {
            tx: tx.id,
            savepoint,
        });
        Ok(savepoint)
    }

    fn release_savepoint(
        &self,
        tx: &mut MockTransaction,
        savepoint: u32,
    ) -> Result<(), ResourceError> {
        self.record(TxEvent::ReleaseSavepoint {
            tx: tx.id,
            savepoint,
        });
        Ok(())
    }

    fn rollback_to_savepoint(
        &self,
        tx: &mut MockTransaction,
        savepoint: u32,
    ) -> Result<(), ResourceError> {
        self.record(TxEvent::RollbackToSavepoint {
            tx: tx.id,
            savepoint,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_hands_out_sequential_ids() {
        let resource = RecordingResource::new();
        let def = TransactionDef::default();
        let t1 = resource.begin(&def).unwrap();
        let t2 = resource.begin(&def).unwrap();
        assert_eq!(t1.id, 1);
        assert_eq!(t2.id, 2);
    }

    #[test]
    fn scripted_commit_failure_fires_once() {
        let resource = RecordingResource::new();
        let def = TransactionDef::default();
        let mut tx = resource.begin(&def).unwrap();

        resource.fail_next_commit();
        assert!(resource.commit(&mut tx).is_err());
        assert!(resource.commit(&mut tx).is_ok());
    }

    #[test]
    fn events_for_filters_by_transaction() {
        let resource = RecordingResource::new();
        let def = TransactionDef::default();
        let mut t1 = resource.begin(&def).unwrap();
        let mut t2 = resource.begin(&def).unwrap();
        resource.commit(&mut t2).unwrap();
        resource.rollback(&mut t1).unwrap();

        assert_eq!(
            resource.events_for(1),
            vec![
                TxEvent::Begin {
                    tx: 1,
                    read_only: false
                },
                TxEvent::Rollback { tx: 1 },
            ]
        );
    }

    #[test]
    fn savepoints_require_opt_in() {
        let plain = RecordingResource::new();
        let def = TransactionDef::default();
        let mut tx = plain.begin(&def).unwrap();
        assert!(!plain.supports_savepoints());
        assert!(plain.savepoint(&mut tx).is_err());

        let nesting = RecordingResource::with_savepoints();
        let mut tx = nesting.begin(&def).unwrap();
        assert!(nesting.supports_savepoints());
        assert_eq!(nesting.savepoint(&mut tx).unwrap(), 1);
    }
}
