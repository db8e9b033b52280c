// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared test doubles for Trellis framework tests.
//!
//! Provides `RecordingResource`, a scripted `TransactionalResource` that
//! logs every call the executor makes, and `TestError`, a classified
//! error type with a small class hierarchy.

pub mod errors;
pub mod recording;

pub use errors::TestError;
pub use recording::{MockTransaction, RecordingResource, TxEvent};
