// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trellis - a modular application framework launcher.
//!
//! This is the binary entry point. It loads and validates configuration,
//! initializes logging, boots the kernel, and dispatches the process
//! argument vector through the framework's own command-line binder. The
//! exit code is whatever the invoked command handler returns.

mod builtin;
mod config_cmd;
mod modules_cmd;

use trellis_cli::{
    ArgsSpec, CommandRegistry, CommandSpec, OptionSpec, UnknownOptionPolicy,
};
use trellis_config::TrellisConfig;
use trellis_kernel::{builtin_catalog, Kernel};

use crate::builtin::{ConfigModule, MetricsModule};

fn main() {
    // Load and validate configuration before anything else runs.
    let config = match trellis_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            trellis_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config);

    let mut kernel = build_kernel(&config);
    if let Err(error) = kernel.start() {
        eprintln!("trellis: failed to start kernel: {error}");
        std::process::exit(1);
    }

    let registry = match build_commands(&config, &kernel) {
        Ok(registry) => registry,
        Err(error) => {
            trellis_cli::render_error(&error);
            std::process::exit(1);
        }
    };

    let argv: Vec<String> = std::env::args().skip(1).collect();
    if argv.is_empty() {
        println!(
            "trellis: available commands: {}",
            registry.command_names().join(", ")
        );
        let _ = kernel.stop();
        return;
    }

    let code = match registry.dispatch(&argv) {
        Ok(code) => code,
        Err(error) => {
            trellis_cli::render_error(&error);
            1
        }
    };

    if let Err(error) = kernel.stop() {
        tracing::warn!(%error, "kernel shutdown reported an error");
    }
    std::process::exit(code);
}

fn init_tracing(config: &TrellisConfig) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.application.log_level.clone()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Assemble the kernel from the built-in catalog.
///
/// Modules with lifecycle behavior get instances; the cli and transaction
/// modules are library surfaces and register manifest-only.
fn build_kernel(config: &TrellisConfig) -> Kernel {
    let mut builder = Kernel::builder();
    for manifest in builtin_catalog() {
        builder = match manifest.name.as_str() {
            "metrics" => builder.module(manifest, Box::new(MetricsModule)),
            "config" => builder.module(
                manifest,
                Box::new(ConfigModule::new(config.application.name.clone())),
            ),
            _ => builder.manifest(manifest),
        };
    }
    builder.build()
}

fn unknown_option_policy(config: &TrellisConfig) -> UnknownOptionPolicy {
    if config.cli.unknown_options == "strict" {
        UnknownOptionPolicy::Strict
    } else {
        UnknownOptionPolicy::Permissive
    }
}

/// Declare and register the built-in commands.
fn build_commands(
    config: &TrellisConfig,
    kernel: &Kernel,
) -> Result<CommandRegistry, trellis_cli::CliError> {
    let policy = unknown_option_policy(config);
    let mut registry = CommandRegistry::new();

    let rows = modules_cmd::collect_rows(kernel.registry());
    let modules_spec = CommandSpec::builder("modules")
        .description("List registered modules and their status")
        .option(OptionSpec::flag('j').long("json").description("JSON output"))
        .option(OptionSpec::flag('p').long("plain").description("Disable colors"))
        .args(ArgsSpec::new("none").max(0))
        .unknown_options(policy)
        .build()?;
    registry.register(
        modules_spec,
        Box::new(move |binding: &trellis_cli::CliBinding| {
            modules_cmd::run_modules(&rows, binding.flag("json"), binding.flag("plain"))
        }),
    )?;

    let effective = config.clone();
    let config_spec = CommandSpec::builder("config")
        .description("Print the effective configuration")
        .option(OptionSpec::flag('j').long("json").description("JSON output"))
        .args(ArgsSpec::new("none").max(0))
        .unknown_options(policy)
        .build()?;
    registry.register(
        config_spec,
        Box::new(move |binding: &trellis_cli::CliBinding| {
            config_cmd::run_config(&effective, binding.flag("json"))
        }),
    )?;

    Ok(registry)
}
