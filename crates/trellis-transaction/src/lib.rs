// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Transaction propagation interpretation for the Trellis framework.
//!
//! Seven propagation modes (mandatory, required, requires_new, supports,
//! not_supported, never, nested) decide whether a transactional boundary
//! joins the current transaction, begins its own, suspends, nests, runs
//! without one, or fails. The decision function is pure; the executor
//! applies it around closures against any [`TransactionalResource`],
//! carrying the current transaction in an explicit per-call-chain
//! [`TxScope`]. Body errors are classified against hierarchical
//! rollback/no-rollback class lists to decide commit-vs-rollback, then
//! re-thrown unchanged.
//!
//! # Usage
//!
//! ```no_run
//! use trellis_transaction::{Propagation, TransactionDef, TransactionManager};
//! # use trellis_transaction::{ErrorClass, ErrorClassified, ResourceError, TransactionalResource};
//! # struct Ledger;
//! # impl TransactionalResource for Ledger {
//! #     type Transaction = ();
//! #     type Savepoint = ();
//! #     fn begin(&self, _: &TransactionDef) -> Result<(), ResourceError> { Ok(()) }
//! #     fn commit(&self, _: &mut ()) -> Result<(), ResourceError> { Ok(()) }
//! #     fn rollback(&self, _: &mut ()) -> Result<(), ResourceError> { Ok(()) }
//! # }
//! # #[derive(Debug, thiserror::Error)] #[error("oops")] struct AppError;
//! # impl ErrorClassified for AppError {
//! #     fn error_class(&self) -> ErrorClass { ErrorClass::new("app") }
//! # }
//!
//! let manager = TransactionManager::new(Ledger);
//! let def = TransactionDef::new(Propagation::Required);
//! let total: i64 = manager
//!     .execute(&def, |scope| -> Result<i64, AppError> {
//!         assert!(scope.in_transaction());
//!         Ok(40 + 2)
//!     })
//!     .expect("transaction failed");
//! ```

pub mod classify;
pub mod definition;
pub mod error;
pub mod manager;
pub mod observe;
pub mod propagation;
pub mod resource;

pub use classify::{decide_rollback, ErrorClass, ErrorClassified, RollbackDecision};
pub use definition::TransactionDef;
pub use error::TxError;
pub use manager::{TransactionManager, TxScope};
pub use observe::register_metrics;
pub use propagation::{interpret, Propagation, PropagationViolation, TxAction};
pub use resource::{ResourceError, TransactionalResource};
