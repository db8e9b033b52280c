// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The resource seam: the trait an integration implements to participate
//! in transaction management.
//!
//! The framework never performs commit/rollback I/O itself; it drives the
//! resource through this trait and owns only the propagation bookkeeping.
//! Transient resource errors, retries, and timeouts are the resource
//! manager's responsibility.

use thiserror::Error;

use crate::definition::TransactionDef;

/// An error surfaced by a transactional resource.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ResourceError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ResourceError {
    /// A resource error with a message only.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// A resource error wrapping an underlying cause.
    pub fn with_source(
        message: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }
}

/// A resource manager capable of transactional work.
///
/// `Transaction` is the resource's own transaction object; the framework
/// holds it for the duration of the boundary and hands it back for
/// commit/rollback. Resources without savepoint support implement only
/// `begin`/`commit`/`rollback` and use `()` for `Savepoint`; NESTED
/// propagation then behaves as REQUIRED.
pub trait TransactionalResource {
    /// The resource's transaction object.
    type Transaction;
    /// The resource's savepoint token.
    type Savepoint;

    /// Begin a new top-level transaction.
    fn begin(&self, def: &TransactionDef) -> Result<Self::Transaction, ResourceError>;

    /// Commit a transaction begun by [`TransactionalResource::begin`].
    fn commit(&self, tx: &mut Self::Transaction) -> Result<(), ResourceError>;

    /// Roll back a transaction begun by [`TransactionalResource::begin`].
    fn rollback(&self, tx: &mut Self::Transaction) -> Result<(), ResourceError>;

    /// Whether this resource supports savepoint-scoped nesting.
    fn supports_savepoints(&self) -> bool {
        false
    }

    /// Create a savepoint inside an active transaction.
    fn savepoint(&self, _tx: &mut Self::Transaction) -> Result<Self::Savepoint, ResourceError> {
        Err(ResourceError::new("savepoints are not supported by this resource"))
    }

    /// Release a savepoint after the nested scope succeeded.
    fn release_savepoint(
        &self,
        _tx: &mut Self::Transaction,
        _savepoint: Self::Savepoint,
    ) -> Result<(), ResourceError> {
        Err(ResourceError::new("savepoints are not supported by this resource"))
    }

    /// Roll back to a savepoint, undoing only the nested scope's work.
    fn rollback_to_savepoint(
        &self,
        _tx: &mut Self::Transaction,
        _savepoint: Self::Savepoint,
    ) -> Result<(), ResourceError> {
        Err(ResourceError::new("savepoints are not supported by this resource"))
    }
}

// Shared ownership of a resource is common (the manager owns it, tests or
// health checks keep another handle), so the trait forwards through Arc
// and plain references.
impl<R: TransactionalResource + ?Sized> TransactionalResource for std::sync::Arc<R> {
    type Transaction = R::Transaction;
    type Savepoint = R::Savepoint;

    fn begin(&self, def: &TransactionDef) -> Result<Self::Transaction, ResourceError> {
        (**self).begin(def)
    }

    fn commit(&self, tx: &mut Self::Transaction) -> Result<(), ResourceError> {
        (**self).commit(tx)
    }

    fn rollback(&self, tx: &mut Self::Transaction) -> Result<(), ResourceError> {
        (**self).rollback(tx)
    }

    fn supports_savepoints(&self) -> bool {
        (**self).supports_savepoints()
    }

    fn savepoint(&self, tx: &mut Self::Transaction) -> Result<Self::Savepoint, ResourceError> {
        (**self).savepoint(tx)
    }

    fn release_savepoint(
        &self,
        tx: &mut Self::Transaction,
        savepoint: Self::Savepoint,
    ) -> Result<(), ResourceError> {
        (**self).release_savepoint(tx, savepoint)
    }

    fn rollback_to_savepoint(
        &self,
        tx: &mut Self::Transaction,
        savepoint: Self::Savepoint,
    ) -> Result<(), ResourceError> {
        (**self).rollback_to_savepoint(tx, savepoint)
    }
}

impl<'r, R: TransactionalResource + ?Sized> TransactionalResource for &'r R {
    type Transaction = R::Transaction;
    type Savepoint = R::Savepoint;

    fn begin(&self, def: &TransactionDef) -> Result<Self::Transaction, ResourceError> {
        (**self).begin(def)
    }

    fn commit(&self, tx: &mut Self::Transaction) -> Result<(), ResourceError> {
        (**self).commit(tx)
    }

    fn rollback(&self, tx: &mut Self::Transaction) -> Result<(), ResourceError> {
        (**self).rollback(tx)
    }

    fn supports_savepoints(&self) -> bool {
        (**self).supports_savepoints()
    }

    fn savepoint(&self, tx: &mut Self::Transaction) -> Result<Self::Savepoint, ResourceError> {
        (**self).savepoint(tx)
    }

    fn release_savepoint(
        &self,
        tx: &mut Self::Transaction,
        savepoint: Self::Savepoint,
    ) -> Result<(), ResourceError> {
        (**self).release_savepoint(tx, savepoint)
    }

    fn rollback_to_savepoint(
        &self,
        tx: &mut Self::Transaction,
        savepoint: Self::Savepoint,
    ) -> Result<(), ResourceError> {
        (**self).rollback_to_savepoint(tx, savepoint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Minimal;

    impl TransactionalResource for Minimal {
        type Transaction = u32;
        type Savepoint = ();

        fn begin(&self, _def: &TransactionDef) -> Result<u32, ResourceError> {
            Ok(1)
        }

        fn commit(&self, _tx: &mut u32) -> Result<(), ResourceError> {
            Ok(())
        }

        fn rollback(&self, _tx: &mut u32) -> Result<(), ResourceError> {
            Ok(())
        }
    }

    #[test]
    fn minimal_resource_has_no_savepoint_support() {
        let resource = Minimal;
        let mut tx = resource.begin(&TransactionDef::default()).unwrap();
        assert!(!resource.supports_savepoints());
        assert!(resource.savepoint(&mut tx).is_err());
        assert!(resource.release_savepoint(&mut tx, ()).is_err());
        assert!(resource.rollback_to_savepoint(&mut tx, ()).is_err());
    }

    #[test]
    fn arc_resource_forwards_calls() {
        let resource = std::sync::Arc::new(Minimal);
        let mut tx = resource.begin(&TransactionDef::default()).unwrap();
        assert!(resource.commit(&mut tx).is_ok());
        assert!(!resource.supports_savepoints());
    }

    #[test]
    fn resource_error_carries_source() {
        let err = ResourceError::with_source("commit failed", std::io::Error::other("disk"));
        assert_eq!(err.to_string(), "commit failed");
        assert!(std::error::Error::source(&err).is_some());
    }
}
