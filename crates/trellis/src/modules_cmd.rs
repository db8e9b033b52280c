// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `trellis modules` command implementation.
//!
//! Lists the registered modules with version, kind, and status. Colored
//! output falls back to plain when stdout is not a TTY or `--plain` is
//! passed; `--json` emits structured output for scripting.

use std::io::IsTerminal;

use serde::Serialize;
use trellis_core::TrellisError;
use trellis_kernel::{ModuleRegistry, ModuleStatus};

/// One row of the module listing.
#[derive(Debug, Clone, Serialize)]
pub struct ModuleRow {
    pub name: String,
    pub version: String,
    pub kind: String,
    pub status: String,
    pub description: String,
}

/// Snapshot the registry into display rows, sorted by name.
pub fn collect_rows(registry: &ModuleRegistry) -> Vec<ModuleRow> {
    registry
        .list_all()
        .into_iter()
        .map(|entry| ModuleRow {
            name: entry.manifest.name.clone(),
            version: entry.manifest.version.clone(),
            kind: entry.manifest.kind.to_string(),
            status: entry.status.to_string(),
            description: entry.manifest.description.clone(),
        })
        .collect()
}

/// Run the `trellis modules` command over pre-collected rows.
pub fn run_modules(rows: &[ModuleRow], json: bool, plain: bool) -> Result<i32, TrellisError> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(rows).unwrap_or_else(|_| "[]".to_string())
        );
        return Ok(0);
    }

    let use_color = !plain && std::io::stdout().is_terminal();
    print_table(rows, use_color);
    Ok(0)
}

fn print_table(rows: &[ModuleRow], use_color: bool) {
    println!();
    println!("  trellis modules");
    println!("  {}", "-".repeat(52));

    for row in rows {
        let status = format_status(&row.status, use_color);
        println!(
            "    {:<14} {:<8} {:<14} {status}",
            row.name, row.version, row.kind
        );
    }

    println!();
}

fn format_status(status: &str, use_color: bool) -> String {
    if !use_color {
        return format!("[{status}]");
    }
    use colored::Colorize;
    let enabled = status == ModuleStatus::Enabled.to_string();
    if enabled {
        format!("{} {}", "✓".green(), status.green())
    } else {
        format!("{} {}", "✗".red(), status.red())
    }
}
