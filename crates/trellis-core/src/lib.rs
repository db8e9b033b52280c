// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Trellis application framework.
//!
//! This crate provides the foundational trait definitions, error types, and
//! common types used throughout the Trellis workspace. Framework modules
//! implement the traits defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::TrellisError;
pub use traits::Module;
pub use types::{ModuleKind, ModulePhase};
