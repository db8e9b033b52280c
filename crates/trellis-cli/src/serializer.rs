// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Serializer: bound values -> an equivalent command line.
//!
//! Rendering a binding and re-binding the result yields the same values.
//! Token order follows declaration order rather than the original scan
//! order, and positionals are emitted after a `--` marker, so the token
//! set is equivalent rather than identical.

use crate::binder::{BoundValue, CliBinding};
use crate::spec::CommandSpec;

/// Render a binding back into an argument vector for the given spec.
pub fn render(spec: &CommandSpec, binding: &CliBinding) -> Vec<String> {
    let mut tokens = Vec::new();

    for opt in spec.options() {
        let short = opt.short_name();
        match binding.bound_value(short) {
            Some(BoundValue::Flag(true)) => tokens.push(format!("-{short}")),
            Some(BoundValue::Value(Some(value))) => {
                tokens.push(format!("-{short}"));
                tokens.push(value.clone());
            }
            Some(BoundValue::List(values)) if !values.is_empty() => {
                tokens.push(format!("-{short}"));
                tokens.push(values.join(&opt.separator.to_string()));
            }
            Some(BoundValue::Map(pairs)) => {
                for (key, value) in pairs {
                    tokens.push(format!("-{short}"));
                    tokens.push(format!("{key}{}{value}", opt.separator));
                }
            }
            _ => {}
        }
    }

    if !binding.args().is_empty() {
        tokens.push("--".to_string());
        tokens.extend(binding.args().iter().cloned());
    }

    tokens
}
