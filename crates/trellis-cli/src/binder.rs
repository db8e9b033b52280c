// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Binding: (argument vector, declarations) -> typed values.
//!
//! A pure function of its inputs. Mandatory/default semantics follow the
//! declaration model: defaults apply only when an option is wholly absent,
//! or present without values under non-mandatory-value semantics; a
//! mandatory option is never satisfied by its defaults.

use std::collections::BTreeMap;

use crate::diagnostic::{suggest, CliError};
use crate::scanner;
use crate::spec::{Binding, CommandSpec, OptionSpec, UnknownOptionPolicy};

/// Decoded value of one declared option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundValue {
    /// Presence of a flag option.
    Flag(bool),
    /// First value of a single-value option.
    Value(Option<String>),
    /// All values of a list option, separator-split.
    List(Vec<String>),
    /// Key/value pairs of a map option, in occurrence order.
    Map(Vec<(String, String)>),
}

#[derive(Debug, Clone)]
struct BoundOption {
    present: bool,
    value: BoundValue,
}

/// The result of binding an argument vector against a [`CommandSpec`].
///
/// Values are read through typed accessors addressed by short (`"x"`) or
/// long (`"name"`) option name. A map-valued option can also be read as a
/// flat list (`[k1, v1, k2, v2]`) through [`CliBinding::values`].
#[derive(Debug, Clone)]
pub struct CliBinding {
    options: BTreeMap<char, BoundOption>,
    long_index: BTreeMap<String, char>,
    args: Vec<String>,
    unrecognized: Vec<String>,
}

impl CliBinding {
    fn resolve(&self, name: &str) -> Option<char> {
        let mut chars = name.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => self.long_index.get(name).copied(),
        }
    }

    fn bound(&self, name: &str) -> Option<&BoundOption> {
        self.resolve(name).and_then(|c| self.options.get(&c))
    }

    /// Whether the option appeared on the command line.
    ///
    /// For flag options this is the bound boolean: absent binds `false`.
    pub fn flag(&self, name: &str) -> bool {
        self.bound(name).is_some_and(|b| b.present)
    }

    /// First bound value of the option, if any.
    pub fn value(&self, name: &str) -> Option<String> {
        self.values(name).into_iter().next()
    }

    /// All bound values of the option.
    ///
    /// A map-valued option flattens to `[k1, v1, k2, v2, ..]`.
    pub fn values(&self, name: &str) -> Vec<String> {
        match self.bound(name).map(|b| &b.value) {
            Some(BoundValue::Value(v)) => v.iter().cloned().collect(),
            Some(BoundValue::List(values)) => values.clone(),
            Some(BoundValue::Map(pairs)) => pairs
                .iter()
                .flat_map(|(k, v)| [k.clone(), v.clone()])
                .collect(),
            Some(BoundValue::Flag(_)) | None => Vec::new(),
        }
    }

    /// Key/value view of a map-valued option.
    ///
    /// Later occurrences of a key override earlier ones. Non-map options
    /// yield an empty map.
    pub fn map(&self, name: &str) -> BTreeMap<String, String> {
        match self.bound(name).map(|b| &b.value) {
            Some(BoundValue::Map(pairs)) => pairs.iter().cloned().collect(),
            _ => BTreeMap::new(),
        }
    }

    /// Positional arguments, in command-line order.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Option-like tokens that matched no declaration (permissive mode only).
    pub fn unrecognized(&self) -> &[String] {
        &self.unrecognized
    }

    pub(crate) fn bound_value(&self, short: char) -> Option<&BoundValue> {
        self.options.get(&short).map(|b| &b.value)
    }
}

/// Bind an argument vector against a command declaration.
pub fn bind(spec: &CommandSpec, argv: &[String]) -> Result<CliBinding, CliError> {
    let scanned = scanner::scan(spec, argv);

    if !scanned.unknown.is_empty() {
        match spec.unknown_options {
            UnknownOptionPolicy::Strict => {
                let names = spec.option_names();
                let token = scanned.unknown[0].clone();
                return Err(CliError::UnknownOption {
                    suggestion: suggest(&token, &names),
                    valid: names.join(", "),
                    token,
                });
            }
            UnknownOptionPolicy::Permissive => {
                for token in &scanned.unknown {
                    tracing::warn!(command = %spec.name(), %token, "ignoring unrecognized option");
                }
            }
        }
    }

    // Merge raw values across occurrences, in scan order.
    let mut raw: BTreeMap<char, Vec<String>> = BTreeMap::new();
    for occurrence in scanned.occurrences {
        raw.entry(occurrence.short)
            .or_default()
            .extend(occurrence.values);
    }

    let mut options = BTreeMap::new();
    let mut long_index = BTreeMap::new();
    for opt in spec.options() {
        let present = raw.contains_key(&opt.short_name());
        let mut values = raw.remove(&opt.short_name()).unwrap_or_default();

        if opt.mandatory && !present {
            return Err(CliError::MissingOption {
                name: opt.display_name(),
            });
        }
        if values.is_empty() && !matches!(opt.binding, Binding::Flag) {
            if present && opt.mandatory_value {
                return Err(CliError::MissingValue {
                    name: opt.display_name(),
                });
            }
            values = opt.defaults.clone();
        }

        let value = decode(opt, present, values)?;
        options.insert(opt.short_name(), BoundOption { present, value });
        if let Some(long) = opt.long_name() {
            long_index.insert(long.to_string(), opt.short_name());
        }
    }

    let found = scanned.positionals.len();
    if found < spec.args.mandatory_count {
        return Err(CliError::MissingArguments {
            name: spec.args.name.clone(),
            expected: spec.args.mandatory_count,
            found,
        });
    }
    if let Some(max) = spec.args.max
        && found > max
    {
        return Err(CliError::TooManyArguments {
            name: spec.args.name.clone(),
            max,
            found,
        });
    }

    Ok(CliBinding {
        options,
        long_index,
        args: scanned.positionals,
        unrecognized: scanned.unknown,
    })
}

fn decode(opt: &OptionSpec, present: bool, values: Vec<String>) -> Result<BoundValue, CliError> {
    match opt.binding {
        Binding::Flag => Ok(BoundValue::Flag(present)),
        Binding::Value => Ok(BoundValue::Value(values.into_iter().next())),
        Binding::List => Ok(BoundValue::List(
            values
                .iter()
                .flat_map(|token| token.split(opt.separator).map(str::to_string))
                .collect(),
        )),
        Binding::Map => {
            let mut pairs = Vec::with_capacity(values.len());
            for token in values {
                // Split on the first separator occurrence: keys cannot
                // contain the separator, values may.
                match token.split_once(opt.separator) {
                    Some((key, value)) => pairs.push((key.to_string(), value.to_string())),
                    None => {
                        return Err(CliError::MalformedPair {
                            name: opt.display_name(),
                            separator: opt.separator,
                            token,
                        });
                    }
                }
            }
            Ok(BoundValue::Map(pairs))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::{ArgsSpec, OptionSpec};

    fn argv(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    fn sample_spec() -> CommandSpec {
        CommandSpec::builder("sample")
            .option(OptionSpec::flag('a').long("all"))
            .option(OptionSpec::flag('b'))
            .option(OptionSpec::value('n').long("name"))
            .option(OptionSpec::list('A'))
            .option(OptionSpec::map('P').separator('='))
            .args(ArgsSpec::new("files"))
            .build()
            .unwrap()
    }

    #[test]
    fn absent_flag_binds_false_present_binds_true() {
        let binding = bind(&sample_spec(), &argv(&["-a"])).unwrap();
        assert!(binding.flag("a"));
        assert!(binding.flag("all"));
        assert!(!binding.flag("b"));
    }

    #[test]
    fn map_option_binds_pairs_and_flat_list() {
        let binding = bind(&sample_spec(), &argv(&["-Pkey1=value1", "-Pkey2=value2"])).unwrap();

        let map = binding.map("P");
        assert_eq!(map.get("key1").map(String::as_str), Some("value1"));
        assert_eq!(map.get("key2").map(String::as_str), Some("value2"));

        // The same occurrences expose an array view in occurrence order.
        assert_eq!(
            binding.values("P"),
            vec!["key1", "value1", "key2", "value2"]
        );
    }

    #[test]
    fn map_value_may_contain_separator() {
        let binding = bind(&sample_spec(), &argv(&["-Pkey=a=b"])).unwrap();
        assert_eq!(binding.map("P").get("key").map(String::as_str), Some("a=b"));
    }

    #[test]
    fn malformed_pair_is_an_error() {
        let err = bind(&sample_spec(), &argv(&["-P", "no-separator"])).unwrap_err();
        assert!(matches!(err, CliError::MalformedPair { .. }));
    }

    #[test]
    fn list_option_splits_on_separator() {
        let binding = bind(&sample_spec(), &argv(&["-A", "5,6"])).unwrap();
        assert_eq!(binding.values("A"), vec!["5", "6"]);
    }

    #[test]
    fn list_option_merges_occurrences() {
        let binding = bind(&sample_spec(), &argv(&["-A", "1,2", "-A", "3"])).unwrap();
        assert_eq!(binding.values("A"), vec!["1", "2", "3"]);
    }

    #[test]
    fn missing_mandatory_option_fails() {
        let spec = CommandSpec::builder("test")
            .option(OptionSpec::value('n').mandatory())
            .build()
            .unwrap();
        let err = bind(&spec, &argv(&[])).unwrap_err();
        assert!(matches!(err, CliError::MissingOption { .. }));
    }

    #[test]
    fn mandatory_is_not_satisfied_by_defaults() {
        let spec = CommandSpec::builder("test")
            .option(OptionSpec::value('n').mandatory().defaults(["x"]))
            .build()
            .unwrap();
        assert!(bind(&spec, &argv(&[])).is_err());
    }

    #[test]
    fn defaults_apply_when_wholly_absent() {
        let spec = CommandSpec::builder("test")
            .option(OptionSpec::list('A').defaults(["5", "6"]))
            .build()
            .unwrap();
        let binding = bind(&spec, &argv(&[])).unwrap();
        assert_eq!(binding.values("A"), vec!["5", "6"]);
        assert!(!binding.flag("A"), "defaulted option was not present");
    }

    #[test]
    fn defaults_apply_when_present_without_values() {
        let spec = CommandSpec::builder("test")
            .option(OptionSpec::list('A').defaults(["5", "6"]))
            .build()
            .unwrap();
        let binding = bind(&spec, &argv(&["-A"])).unwrap();
        assert!(binding.flag("A"));
        assert_eq!(binding.values("A"), vec!["5", "6"]);
    }

    #[test]
    fn defaults_do_not_override_explicit_values() {
        let spec = CommandSpec::builder("test")
            .option(OptionSpec::list('A').defaults(["5", "6"]))
            .build()
            .unwrap();
        let binding = bind(&spec, &argv(&["-A", "9"])).unwrap();
        assert_eq!(binding.values("A"), vec!["9"]);
    }

    #[test]
    fn mandatory_value_present_without_values_fails() {
        let spec = CommandSpec::builder("test")
            .option(OptionSpec::list('A').mandatory_value())
            .build()
            .unwrap();
        let err = bind(&spec, &argv(&["-A"])).unwrap_err();
        assert!(matches!(err, CliError::MissingValue { .. }));
    }

    #[test]
    fn missing_mandatory_positional_fails() {
        let spec = CommandSpec::builder("test")
            .args(ArgsSpec::new("input").mandatory(1))
            .build()
            .unwrap();
        let err = bind(&spec, &argv(&[])).unwrap_err();
        match err {
            CliError::MissingArguments {
                expected, found, ..
            } => {
                assert_eq!(expected, 1);
                assert_eq!(found, 0);
            }
            other => panic!("expected MissingArguments, got {other:?}"),
        }
    }

    #[test]
    fn too_many_positionals_fails() {
        let spec = CommandSpec::builder("test")
            .args(ArgsSpec::new("input").max(1))
            .build()
            .unwrap();
        let err = bind(&spec, &argv(&["a", "b"])).unwrap_err();
        assert!(matches!(err, CliError::TooManyArguments { .. }));
    }

    #[test]
    fn strict_mode_fails_on_unknown_option_with_suggestion() {
        let spec = CommandSpec::builder("test")
            .option(OptionSpec::flag('v').long("verbose"))
            .strict()
            .build()
            .unwrap();
        let err = bind(&spec, &argv(&["--verbos"])).unwrap_err();
        match err {
            CliError::UnknownOption {
                token, suggestion, ..
            } => {
                assert_eq!(token, "--verbos");
                assert_eq!(suggestion.as_deref(), Some("--verbose"));
            }
            other => panic!("expected UnknownOption, got {other:?}"),
        }
    }

    #[test]
    fn permissive_mode_records_unknown_option() {
        let binding = bind(&sample_spec(), &argv(&["--verbose", "file"])).unwrap();
        assert_eq!(binding.unrecognized(), &["--verbose"]);
        assert_eq!(binding.args(), &["file"]);
    }

    #[test]
    fn full_scenario_binds_everything() {
        let binding =
            bind(&sample_spec(), &argv(&["-a", "-b", "babar", "zob", "-A", "5,6"])).unwrap();
        assert!(binding.flag("a"));
        assert!(binding.flag("b"));
        assert_eq!(binding.args(), &["babar", "zob"]);
        assert_eq!(binding.values("A"), vec!["5", "6"]);
    }

    #[test]
    fn single_value_binds_first() {
        let binding = bind(&sample_spec(), &argv(&["--name=babar"])).unwrap();
        assert_eq!(binding.value("name").as_deref(), Some("babar"));
        assert_eq!(binding.value("n").as_deref(), Some("babar"));
    }
}
