// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! A classified error type for rollback-classification tests.

use thiserror::Error;
use trellis_transaction::{ErrorClass, ErrorClassified};

/// Test error with a small class hierarchy: `app`, `app.validation`,
/// `io.timeout`.
#[derive(Debug, Error)]
pub enum TestError {
    /// Generic application failure (`app`).
    #[error("application failure")]
    App,

    /// Input validation failure (`app.validation`).
    #[error("validation failed: {0}")]
    Validation(String),

    /// I/O timeout (`io.timeout`).
    #[error("i/o timeout")]
    Timeout,
}

impl ErrorClassified for TestError {
    fn error_class(&self) -> ErrorClass {
        match self {
            TestError::App => ErrorClass::new("app"),
            TestError::Validation(_) => ErrorClass::new("app.validation"),
            TestError::Timeout => ErrorClass::new("io.timeout"),
        }
    }
}
