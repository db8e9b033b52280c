// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the complete declaration -> scan -> bind pipeline.

use trellis_cli::{bind, ArgsSpec, CliBinding, CommandRegistry, CommandSpec, OptionSpec};
use trellis_core::TrellisError;

fn argv(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|t| t.to_string()).collect()
}

/// A spec shaped like a typical tool invocation: two flags, a list option,
/// a map option, and free positionals.
fn tool_spec() -> CommandSpec {
    CommandSpec::builder("tool")
        .description("sample tool")
        .option(OptionSpec::flag('a').long("archive"))
        .option(OptionSpec::flag('b'))
        .option(OptionSpec::list('A').description("numbers"))
        .option(OptionSpec::map('P').separator('=').description("properties"))
        .args(ArgsSpec::new("inputs"))
        .build()
        .unwrap()
}

#[test]
fn map_and_array_views_of_the_same_occurrences() {
    let binding = bind(&tool_spec(), &argv(&["-Pkey1=value1", "-Pkey2=value2"])).unwrap();

    let map = binding.map("P");
    assert_eq!(map.len(), 2);
    assert_eq!(map["key1"], "value1");
    assert_eq!(map["key2"], "value2");

    assert_eq!(
        binding.values("P"),
        vec!["key1", "value1", "key2", "value2"]
    );
}

#[test]
fn flags_default_to_false() {
    let binding = bind(&tool_spec(), &argv(&[])).unwrap();
    assert!(!binding.flag("a"));
    assert!(!binding.flag("archive"));
    assert!(!binding.flag("b"));

    let binding = bind(&tool_spec(), &argv(&["--archive"])).unwrap();
    assert!(binding.flag("a"));
    assert!(!binding.flag("b"));
}

#[test]
fn one_mandatory_positional_with_none_supplied_fails() {
    let spec = CommandSpec::builder("needs-input")
        .args(ArgsSpec::new("input").mandatory(1))
        .build()
        .unwrap();

    let err = bind(&spec, &argv(&[])).unwrap_err();
    assert!(err.to_string().contains("at least 1"));
}

#[test]
fn mixed_invocation_binds_all_fields() {
    let binding = bind(&tool_spec(), &argv(&["-a", "-b", "babar", "zob", "-A", "5,6"])).unwrap();
    assert!(binding.flag("a"));
    assert!(binding.flag("b"));
    assert_eq!(binding.args(), &["babar", "zob"]);
    assert_eq!(binding.values("A"), vec!["5", "6"]);
    assert!(binding.map("P").is_empty());
}

#[test]
fn clustered_flags_bind_individually() {
    let binding = bind(&tool_spec(), &argv(&["-ab", "file"])).unwrap();
    assert!(binding.flag("a"));
    assert!(binding.flag("b"));
    assert_eq!(binding.args(), &["file"]);
}

#[test]
fn dispatch_binds_and_surfaces_exit_code() {
    let mut registry = CommandRegistry::new();
    registry
        .register(
            tool_spec(),
            Box::new(|binding: &CliBinding| -> Result<i32, TrellisError> {
                Ok(if binding.flag("a") { 0 } else { 3 })
            }),
        )
        .unwrap();

    assert_eq!(registry.dispatch(&argv(&["tool", "-a"])).unwrap(), 0);
    assert_eq!(registry.dispatch(&argv(&["tool"])).unwrap(), 3);
}

#[test]
fn binding_failure_reports_before_handler_runs() {
    let mut registry = CommandRegistry::new();
    let spec = CommandSpec::builder("strictly")
        .option(OptionSpec::flag('x'))
        .strict()
        .build()
        .unwrap();
    registry
        .register(
            spec,
            Box::new(|_: &CliBinding| -> Result<i32, TrellisError> {
                panic!("handler must not run on binding failure")
            }),
        )
        .unwrap();

    let err = registry.dispatch(&argv(&["strictly", "--bogus"])).unwrap_err();
    assert!(err.to_string().contains("unknown option"));
}

#[test]
fn separator_override_per_declaration() {
    // Same option shape, two different separators, fixed at declaration time.
    let comma = CommandSpec::builder("comma")
        .option(OptionSpec::map('D'))
        .build()
        .unwrap();
    let equals = CommandSpec::builder("equals")
        .option(OptionSpec::map('D').separator('='))
        .build()
        .unwrap();

    let binding = bind(&comma, &argv(&["-D", "k,v"])).unwrap();
    assert_eq!(binding.map("D")["k"], "v");

    let binding = bind(&equals, &argv(&["-D", "k=v"])).unwrap();
    assert_eq!(binding.map("D")["k"], "v");
}

#[test]
fn later_map_occurrence_overrides_earlier_key() {
    let binding = bind(&tool_spec(), &argv(&["-Pk=1", "-Pk=2"])).unwrap();
    assert_eq!(binding.map("P")["k"], "2");
    // The array view still shows both occurrences.
    assert_eq!(binding.values("P"), vec!["k", "1", "k", "2"]);
}
