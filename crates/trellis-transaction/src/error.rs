// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Errors surfaced by the transaction executor.

use thiserror::Error;

use crate::propagation::PropagationViolation;
use crate::resource::ResourceError;

/// The error type returned by transactional execution.
///
/// `Body` re-throws the transactional closure's own error unchanged after
/// commit/rollback bookkeeping; the other variants originate in the
/// framework or the resource.
#[derive(Debug, Error)]
pub enum TxError<E>
where
    E: std::error::Error + 'static,
{
    /// A propagation constraint was violated. Non-retryable.
    #[error(transparent)]
    Violation(#[from] PropagationViolation),

    /// The resource failed to begin, commit, or manage savepoints.
    #[error("transactional resource error: {0}")]
    Resource(ResourceError),

    /// The transaction was marked rollback-only by a participating scope
    /// and has been rolled back instead of committed.
    #[error("transaction marked rollback-only by a participating scope")]
    UnexpectedRollback,

    /// The transactional body failed; rollback/commit bookkeeping has
    /// already run and the original error is propagated transparently.
    #[error(transparent)]
    Body(E),
}

impl<E> TxError<E>
where
    E: std::error::Error + 'static,
{
    /// The body error, if this is a transparent re-throw.
    pub fn into_body(self) -> Option<E> {
        match self {
            TxError::Body(e) => Some(e),
            _ => None,
        }
    }

    /// Whether this error is a propagation constraint violation.
    pub fn is_violation(&self) -> bool {
        matches!(self, TxError::Violation(_))
    }
}
