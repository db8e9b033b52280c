// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The transaction executor: applies propagation decisions around a closure.
//!
//! The current transaction travels down the call chain inside a [`TxScope`]
//! rather than a process-wide static, so concurrent threads cannot observe
//! each other's context and suspension is a scoped move that restores on
//! every exit path. A call site commits or rolls back only the transaction
//! it began; joined transactions are left to their owner.

use crate::classify::{decide_rollback, ErrorClassified, RollbackDecision};
use crate::definition::TransactionDef;
use crate::error::TxError;
use crate::observe;
use crate::propagation::{interpret, TxAction};
use crate::resource::TransactionalResource;

/// A transaction owned by some call site, with its participation state.
struct ActiveTx<Tx> {
    tx: Tx,
    rollback_only: bool,
}

/// The transactional context of one call chain.
///
/// Passed to every transactional closure. Nested transactional work goes
/// through [`TxScope::execute`], which re-evaluates propagation against
/// this scope's state.
pub struct TxScope<'s, R: TransactionalResource> {
    resource: &'s R,
    current: Option<&'s mut ActiveTx<R::Transaction>>,
}

impl<'s, R: TransactionalResource> TxScope<'s, R> {
    /// Whether this scope runs inside an active transaction.
    pub fn in_transaction(&self) -> bool {
        self.current.is_some()
    }

    /// Mark the current transaction rollback-only. Its owner will roll it
    /// back at the boundary instead of committing.
    pub fn set_rollback_only(&mut self) {
        if let Some(active) = self.current.as_deref_mut() {
            active.rollback_only = true;
        }
    }

    /// Whether the current transaction has been marked rollback-only.
    pub fn is_rollback_only(&self) -> bool {
        self.current.as_deref().is_some_and(|a| a.rollback_only)
    }

    /// Execute a nested transactional boundary within this scope.
    pub fn execute<T, E>(
        &mut self,
        def: &TransactionDef,
        body: impl FnOnce(&mut TxScope<'_, R>) -> Result<T, E>,
    ) -> Result<T, TxError<E>>
    where
        E: ErrorClassified,
    {
        run_scoped(self.resource, self.current.as_deref_mut(), def, body)
    }
}

/// Owns a [`TransactionalResource`] and executes closures under
/// transaction definitions.
pub struct TransactionManager<R: TransactionalResource> {
    resource: R,
}

impl<R: TransactionalResource> TransactionManager<R> {
    /// Create a manager over the given resource.
    pub fn new(resource: R) -> Self {
        Self { resource }
    }

    /// The managed resource.
    pub fn resource(&self) -> &R {
        &self.resource
    }

    /// Execute `body` under the given transaction definition, starting
    /// from a context with no active transaction.
    pub fn execute<T, E>(
        &self,
        def: &TransactionDef,
        body: impl FnOnce(&mut TxScope<'_, R>) -> Result<T, E>,
    ) -> Result<T, TxError<E>>
    where
        E: ErrorClassified,
    {
        run_scoped(&self.resource, None, def, body)
    }
}

/// Rolls back an owned transaction abandoned by a panic in the body.
struct TxGuard<'g, R: TransactionalResource> {
    resource: &'g R,
    active: Option<ActiveTx<R::Transaction>>,
}

impl<'g, R: TransactionalResource> TxGuard<'g, R> {
    /// Take the transaction out for orderly completion.
    fn disarm(&mut self) -> ActiveTx<R::Transaction> {
        self.active.take().expect("transaction guard disarmed twice")
    }
}

impl<'g, R: TransactionalResource> Drop for TxGuard<'g, R> {
    fn drop(&mut self) {
        if let Some(mut active) = self.active.take() {
            tracing::warn!("rolling back transaction abandoned during unwind");
            if let Err(error) = self.resource.rollback(&mut active.tx) {
                tracing::error!(%error, "rollback of abandoned transaction failed");
            } else {
                observe::record_rollback("panic");
            }
        }
    }
}

fn run_scoped<R, T, E>(
    resource: &R,
    current: Option<&mut ActiveTx<R::Transaction>>,
    def: &TransactionDef,
    body: impl FnOnce(&mut TxScope<'_, R>) -> Result<T, E>,
) -> Result<T, TxError<E>>
where
    R: TransactionalResource,
    E: ErrorClassified,
{
    let action = interpret(
        def.propagation(),
        current.is_some(),
        resource.supports_savepoints(),
    )?;
    tracing::trace!(propagation = %def.propagation(), ?action, "interpreted propagation");

    match action {
        TxAction::JoinExisting => {
            let active = current.expect("join decided without an active transaction");
            join_existing(resource, active, def, body)
        }
        TxAction::BeginNew => begin_new(resource, def, body),
        TxAction::SuspendAndBegin => {
            // Suspension: the caller's context is simply not lent to the
            // inner scope; the caller's borrow restores it on return.
            observe::record_suspension();
            tracing::debug!("suspending current transaction for requires_new");
            begin_new(resource, def, body)
        }
        TxAction::RunWithout => {
            let mut scope = TxScope {
                resource,
                current: None,
            };
            body(&mut scope).map_err(TxError::Body)
        }
        TxAction::SuspendAndRunWithout => {
            observe::record_suspension();
            tracing::debug!("suspending current transaction for not_supported");
            let mut scope = TxScope {
                resource,
                current: None,
            };
            body(&mut scope).map_err(TxError::Body)
        }
        TxAction::BeginNested => {
            let active = current.expect("nested decided without an active transaction");
            begin_nested(resource, active, def, body)
        }
    }
}

/// Participate in an existing transaction without owning it.
fn join_existing<R, T, E>(
    resource: &R,
    active: &mut ActiveTx<R::Transaction>,
    def: &TransactionDef,
    body: impl FnOnce(&mut TxScope<'_, R>) -> Result<T, E>,
) -> Result<T, TxError<E>>
where
    R: TransactionalResource,
    E: ErrorClassified,
{
    let mut scope = TxScope {
        resource,
        current: Some(active),
    };
    let result = body(&mut scope);

    if let Err(error) = &result
        && decide_rollback(def, &error.error_class()) == RollbackDecision::Rollback
        && def.participation_failure_marks_rollback()
    {
        tracing::debug!(%error, "participating scope failed; marking transaction rollback-only");
        scope.set_rollback_only();
    }

    result.map_err(TxError::Body)
}

/// Begin, run, and complete a transaction owned by this call site.
fn begin_new<R, T, E>(
    resource: &R,
    def: &TransactionDef,
    body: impl FnOnce(&mut TxScope<'_, R>) -> Result<T, E>,
) -> Result<T, TxError<E>>
where
    R: TransactionalResource,
    E: ErrorClassified,
{
    let tx = resource.begin(def).map_err(TxError::Resource)?;
    observe::record_begin(def.is_read_only());
    tracing::debug!(read_only = def.is_read_only(), "began transaction");

    let mut guard = TxGuard {
        resource,
        active: Some(ActiveTx {
            tx,
            rollback_only: false,
        }),
    };

    let result = {
        let mut scope = TxScope {
            resource,
            current: guard.active.as_mut(),
        };
        body(&mut scope)
    };

    match result {
        Ok(value) => {
            let mut active = guard.disarm();
            if active.rollback_only {
                rollback_logged(resource, &mut active.tx, "participation_failure");
                Err(TxError::UnexpectedRollback)
            } else {
                resource.commit(&mut active.tx).map_err(TxError::Resource)?;
                observe::record_commit();
                tracing::debug!("committed transaction");
                Ok(value)
            }
        }
        Err(error) => {
            let mut active = guard.disarm();
            match decide_rollback(def, &error.error_class()) {
                RollbackDecision::Rollback => {
                    rollback_logged(resource, &mut active.tx, "body_error");
                }
                RollbackDecision::Commit => {
                    // The error is excluded from rollback; commit the work
                    // done so far, then re-throw.
                    if let Err(commit_error) = resource.commit(&mut active.tx) {
                        tracing::error!(%commit_error, "commit after excluded error failed");
                    } else {
                        observe::record_commit();
                    }
                }
            }
            Err(TxError::Body(error))
        }
    }
}

fn rollback_logged<R: TransactionalResource>(
    resource: &R,
    tx: &mut R::Transaction,
    cause: &'static str,
) {
    if let Err(error) = resource.rollback(tx) {
        // Secondary failure: the body error still takes precedence.
        tracing::error!(%error, "rollback failed");
    } else {
        observe::record_rollback(cause);
        tracing::debug!(cause, "rolled back transaction");
    }
}

/// Run a savepoint-scoped nested boundary inside the current transaction.
fn begin_nested<R, T, E>(
    resource: &R,
    active: &mut ActiveTx<R::Transaction>,
    def: &TransactionDef,
    body: impl FnOnce(&mut TxScope<'_, R>) -> Result<T, E>,
) -> Result<T, TxError<E>>
where
    R: TransactionalResource,
    E: ErrorClassified,
{
    let savepoint = resource.savepoint(&mut active.tx).map_err(TxError::Resource)?;
    observe::record_savepoint();
    tracing::debug!("created savepoint for nested scope");

    let result = {
        let mut scope = TxScope {
            resource,
            current: Some(&mut *active),
        };
        body(&mut scope)
    };

    match result {
        Ok(value) => {
            resource
                .release_savepoint(&mut active.tx, savepoint)
                .map_err(TxError::Resource)?;
            Ok(value)
        }
        Err(error) => {
            match decide_rollback(def, &error.error_class()) {
                RollbackDecision::Rollback => {
                    // Only the nested scope's work is undone; the outer
                    // transaction proceeds untouched.
                    if let Err(rollback_error) =
                        resource.rollback_to_savepoint(&mut active.tx, savepoint)
                    {
                        tracing::error!(%rollback_error, "rollback to savepoint failed");
                    } else {
                        observe::record_rollback("nested_body_error");
                    }
                }
                RollbackDecision::Commit => {
                    if let Err(release_error) =
                        resource.release_savepoint(&mut active.tx, savepoint)
                    {
                        tracing::error!(%release_error, "savepoint release failed");
                    }
                }
            }
            Err(TxError::Body(error))
        }
    }
}
