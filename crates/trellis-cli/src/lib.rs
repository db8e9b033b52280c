// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Declarative command-line option binding for the Trellis framework.
//!
//! Application code declares options and positional arguments through
//! builders ([`OptionSpec`], [`ArgsSpec`], [`CommandSpec`]), registers
//! handlers in a [`CommandRegistry`], and dispatches the raw argument
//! vector. Binding is a pure function of (argv, declarations): scanning
//! recognizes short/long/clustered/attached forms, decoding produces
//! booleans, single values, lists, and separator-split key/value maps,
//! and mandatory/default semantics are enforced with miette diagnostics
//! on failure.
//!
//! # Usage
//!
//! ```
//! use trellis_cli::{bind, ArgsSpec, CommandSpec, OptionSpec};
//!
//! let spec = CommandSpec::builder("copy")
//!     .option(OptionSpec::flag('v').long("verbose"))
//!     .option(OptionSpec::map('P').separator('='))
//!     .args(ArgsSpec::new("paths").mandatory(1))
//!     .build()
//!     .unwrap();
//!
//! let argv: Vec<String> = ["-v", "-Pmode=fast", "src"].iter().map(|s| s.to_string()).collect();
//! let binding = bind(&spec, &argv).unwrap();
//! assert!(binding.flag("verbose"));
//! assert_eq!(binding.map("P").get("mode").map(String::as_str), Some("fast"));
//! assert_eq!(binding.args(), &["src"]);
//! ```

pub mod binder;
pub mod command;
pub mod diagnostic;
mod scanner;
pub mod serializer;
pub mod spec;

pub use binder::{bind, BoundValue, CliBinding};
pub use command::{CliHandler, CommandRegistry};
pub use diagnostic::{render_error, CliError};
pub use serializer::render;
pub use spec::{ArgsSpec, Arity, Binding, CommandSpec, OptionSpec, UnknownOptionPolicy};
