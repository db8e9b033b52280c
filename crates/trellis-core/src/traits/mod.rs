// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait definitions implemented by Trellis modules.

pub mod module;

pub use module::Module;
