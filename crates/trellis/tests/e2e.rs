// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end integration tests for the assembled framework.
//!
//! Each test wires the real pieces together the way an application would:
//! validated configuration, a kernel with registered modules, a command
//! registry dispatching through the binder, and transactional handlers
//! over a recording resource.

use std::sync::Arc;

use trellis_cli::{ArgsSpec, CliBinding, CommandRegistry, CommandSpec, OptionSpec};
use trellis_core::types::ModuleKind;
use trellis_core::{Module, TrellisError};
use trellis_kernel::{parse_module_manifest, Kernel, ModuleManifest};
use trellis_test_utils::{RecordingResource, TestError, TxEvent};
use trellis_transaction::{Propagation, TransactionDef, TransactionManager, TxError};

fn argv(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|t| t.to_string()).collect()
}

fn manifest(name: &str, dependencies: &[&str]) -> ModuleManifest {
    ModuleManifest {
        name: name.to_string(),
        version: "0.1.0".to_string(),
        description: format!("{name} module"),
        kind: ModuleKind::Integration,
        dependencies: dependencies.iter().map(|d| d.to_string()).collect(),
        config_keys: vec![],
        min_trellis_version: None,
    }
}

struct NoopModule(&'static str);

impl Module for NoopModule {
    fn name(&self) -> &str {
        self.0
    }
    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }
    fn kind(&self) -> ModuleKind {
        ModuleKind::Integration
    }
}

// ---- Test 1: config -> command policy -> dispatch ----

#[test]
fn config_policy_flows_into_command_dispatch() {
    let config = trellis_config::load_and_validate_str(
        r#"
[cli]
unknown_options = "strict"
"#,
    )
    .unwrap();

    let policy = if config.cli.unknown_options == "strict" {
        trellis_cli::UnknownOptionPolicy::Strict
    } else {
        trellis_cli::UnknownOptionPolicy::Permissive
    };

    let spec = CommandSpec::builder("greet")
        .option(OptionSpec::flag('l').long("loud"))
        .unknown_options(policy)
        .build()
        .unwrap();

    let mut registry = CommandRegistry::new();
    registry
        .register(
            spec,
            Box::new(|binding: &CliBinding| -> Result<i32, TrellisError> {
                Ok(if binding.flag("loud") { 0 } else { 1 })
            }),
        )
        .unwrap();

    assert_eq!(registry.dispatch(&argv(&["greet", "--loud"])).unwrap(), 0);

    let err = registry.dispatch(&argv(&["greet", "--laud"])).unwrap_err();
    assert!(err.to_string().contains("unknown option"));
}

// ---- Test 2: transactional handler through the full dispatch path ----

#[test]
fn transactional_handler_commits_on_success() {
    let resource = Arc::new(RecordingResource::new());
    let manager = TransactionManager::new(Arc::clone(&resource));

    let spec = CommandSpec::builder("transfer")
        .option(OptionSpec::value('a').long("amount").mandatory())
        .args(ArgsSpec::new("accounts").mandatory(2).max(2))
        .build()
        .unwrap();

    let mut registry = CommandRegistry::new();
    registry
        .register(
            spec,
            Box::new(move |binding: &CliBinding| -> Result<i32, TrellisError> {
                let amount: i64 = binding
                    .value("amount")
                    .and_then(|v| v.parse().ok())
                    .ok_or_else(|| TrellisError::Config("amount must be an integer".into()))?;

                let def = TransactionDef::new(Propagation::Required);
                manager
                    .execute(&def, |scope| -> Result<(), TestError> {
                        assert!(scope.in_transaction());
                        if amount <= 0 {
                            return Err(TestError::Validation("amount must be positive".into()));
                        }
                        Ok(())
                    })
                    .map_err(|e| TrellisError::Internal(e.to_string()))?;
                Ok(0)
            }),
        )
        .unwrap();

    let code = registry
        .dispatch(&argv(&["transfer", "-a", "100", "alice", "bob"]))
        .unwrap();
    assert_eq!(code, 0);
    assert_eq!(
        resource.events(),
        vec![
            TxEvent::Begin { tx: 1, read_only: false },
            TxEvent::Commit { tx: 1 },
        ]
    );
}

#[test]
fn transactional_handler_rolls_back_on_body_failure() {
    let resource = Arc::new(RecordingResource::new());
    let manager = TransactionManager::new(Arc::clone(&resource));

    let spec = CommandSpec::builder("transfer")
        .option(OptionSpec::value('a').long("amount").mandatory())
        .args(ArgsSpec::new("accounts").mandatory(2))
        .build()
        .unwrap();

    let mut registry = CommandRegistry::new();
    registry
        .register(
            spec,
            Box::new(move |binding: &CliBinding| -> Result<i32, TrellisError> {
                let amount: i64 = binding
                    .value("amount")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(0);
                let def = TransactionDef::new(Propagation::Required);
                let result = manager.execute(&def, |_| -> Result<(), TestError> {
                    if amount <= 0 {
                        return Err(TestError::Validation("amount must be positive".into()));
                    }
                    Ok(())
                });
                match result {
                    Ok(()) => Ok(0),
                    Err(TxError::Body(_)) => Ok(2),
                    Err(other) => Err(TrellisError::Internal(other.to_string())),
                }
            }),
        )
        .unwrap();

    let code = registry
        .dispatch(&argv(&["transfer", "-a", "-5", "alice", "bob"]))
        .unwrap();
    assert_eq!(code, 2, "handler maps rollback to exit code 2");
    assert_eq!(
        resource.events(),
        vec![
            TxEvent::Begin { tx: 1, read_only: false },
            TxEvent::Rollback { tx: 1 },
        ]
    );
}

// ---- Test 3: binding failure stops before any transaction ----

#[test]
fn missing_mandatory_option_fails_before_handler() {
    let resource = Arc::new(RecordingResource::new());
    let manager = TransactionManager::new(Arc::clone(&resource));

    let spec = CommandSpec::builder("transfer")
        .option(OptionSpec::value('a').long("amount").mandatory())
        .args(ArgsSpec::new("accounts").mandatory(2))
        .build()
        .unwrap();

    let mut registry = CommandRegistry::new();
    registry
        .register(
            spec,
            Box::new(move |_: &CliBinding| -> Result<i32, TrellisError> {
                let def = TransactionDef::new(Propagation::Required);
                manager
                    .execute(&def, |_| -> Result<(), TestError> { Ok(()) })
                    .map_err(|e| TrellisError::Internal(e.to_string()))?;
                Ok(0)
            }),
        )
        .unwrap();

    let err = registry
        .dispatch(&argv(&["transfer", "alice", "bob"]))
        .unwrap_err();
    assert!(err.to_string().contains("missing mandatory option"));
    assert!(resource.events().is_empty(), "no transaction was begun");
}

// ---- Test 4: kernel boots application modules alongside commands ----

#[test]
fn kernel_and_commands_assemble_into_an_application() {
    let mut kernel = Kernel::builder()
        .module(manifest("storage", &[]), Box::new(NoopModule("storage")))
        .module(
            manifest("api", &["storage"]),
            Box::new(NoopModule("api")),
        )
        .build();
    kernel.start().unwrap();
    assert_eq!(kernel.started(), &["storage", "api"]);

    let spec = CommandSpec::builder("status").build().unwrap();
    let names: Vec<String> = kernel
        .registry()
        .list_all()
        .iter()
        .map(|e| e.manifest.name.clone())
        .collect();

    let mut registry = CommandRegistry::new();
    registry
        .register(
            spec,
            Box::new(move |_: &CliBinding| -> Result<i32, TrellisError> {
                Ok(names.len() as i32)
            }),
        )
        .unwrap();

    assert_eq!(registry.dispatch(&argv(&["status"])).unwrap(), 2);
    kernel.stop().unwrap();
}

// ---- Test 5: manifests parsed from TOML drive registration ----

#[test]
fn toml_manifest_registers_into_kernel() {
    let parsed = parse_module_manifest(
        r#"
[module]
name = "reporting"
version = "0.2.0"
description = "Nightly report generation"
kind = "Integration"
dependencies = []
"#,
    )
    .unwrap();

    let mut kernel = Kernel::builder()
        .module(parsed, Box::new(NoopModule("reporting")))
        .build();
    kernel.start().unwrap();
    assert_eq!(kernel.started(), &["reporting"]);

    let entry = kernel.registry().get("reporting").unwrap();
    assert_eq!(entry.manifest.version, "0.2.0");
}

// ---- Test 6: nested transactions through a dispatched handler ----

#[test]
fn nested_scope_rolls_back_only_itself_through_dispatch() {
    let resource = Arc::new(RecordingResource::with_savepoints());
    let manager = TransactionManager::new(Arc::clone(&resource));

    let spec = CommandSpec::builder("batch")
        .args(ArgsSpec::new("items"))
        .build()
        .unwrap();

    let mut registry = CommandRegistry::new();
    registry
        .register(
            spec,
            Box::new(move |binding: &CliBinding| -> Result<i32, TrellisError> {
                let outer = TransactionDef::new(Propagation::Required);
                let nested = TransactionDef::new(Propagation::Nested);
                let items: Vec<String> = binding.args().to_vec();

                let failed = manager
                    .execute(&outer, |scope| -> Result<usize, TestError> {
                        let mut failed = 0;
                        for item in &items {
                            let result: Result<(), TxError<TestError>> =
                                scope.execute(&nested, |_| {
                                    if item == "bad" {
                                        Err(TestError::App)
                                    } else {
                                        Ok(())
                                    }
                                });
                            if result.is_err() {
                                failed += 1;
                            }
                        }
                        Ok(failed)
                    })
                    .map_err(|e| TrellisError::Internal(e.to_string()))?;
                Ok(failed as i32)
            }),
        )
        .unwrap();

    let code = registry
        .dispatch(&argv(&["batch", "good", "bad", "good"]))
        .unwrap();
    assert_eq!(code, 1, "one nested item failed");

    let events = resource.events();
    // The outer transaction committed despite the failed nested item.
    assert!(events.contains(&TxEvent::Commit { tx: 1 }));
    assert!(events.contains(&TxEvent::RollbackToSavepoint { tx: 1, savepoint: 2 }));
    assert!(!events.contains(&TxEvent::Rollback { tx: 1 }));
}
