// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Declaration model for command-line options and positional arguments.
//!
//! Declarations are built through explicit builder calls supplied by
//! application code at startup. There is no runtime discovery: a command is
//! exactly the set of options and arguments its `CommandSpec` declares.

use crate::diagnostic::CliError;

/// Default separator used to split option value tokens.
///
/// Map-valued options typically override this with `=` so that occurrences
/// read `-Pkey=value`.
pub const DEFAULT_SEPARATOR: char = ',';

/// How many value tokens an option consumes per occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Presence-only, no values. Binds to a boolean.
    Flag,
    /// Exactly one value token.
    Single,
    /// Any number of value tokens, across any number of occurrences.
    Unbounded,
}

/// The shape collected values decode into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    /// Presence / absence as `bool`.
    Flag,
    /// First value as a single `String`.
    Value,
    /// All values, each token split on every separator occurrence.
    List,
    /// Values split pairwise: each token splits on its first separator
    /// occurrence into a key and a value.
    Map,
}

/// A single declared command-line option.
///
/// Constructed through [`OptionSpec::flag`], [`OptionSpec::value`],
/// [`OptionSpec::list`], or [`OptionSpec::map`], which pin the arity/binding
/// combination so that a zero-value option can only bind to a boolean.
#[derive(Debug, Clone)]
pub struct OptionSpec {
    pub(crate) short: char,
    pub(crate) long: Option<String>,
    pub(crate) description: String,
    pub(crate) arity: Arity,
    pub(crate) binding: Binding,
    pub(crate) separator: char,
    pub(crate) mandatory: bool,
    pub(crate) mandatory_value: bool,
    pub(crate) defaults: Vec<String>,
}

impl OptionSpec {
    fn new(short: char, arity: Arity, binding: Binding) -> Self {
        Self {
            short,
            long: None,
            description: String::new(),
            arity,
            binding,
            separator: DEFAULT_SEPARATOR,
            mandatory: false,
            mandatory_value: false,
            defaults: Vec::new(),
        }
    }

    /// Declare a boolean flag option (`-x`): present binds `true`, absent `false`.
    pub fn flag(short: char) -> Self {
        Self::new(short, Arity::Flag, Binding::Flag)
    }

    /// Declare a single-value option (`-n value` / `--name=value`).
    pub fn value(short: char) -> Self {
        Self::new(short, Arity::Single, Binding::Value)
    }

    /// Declare a multi-value option; each value token is split on the separator.
    pub fn list(short: char) -> Self {
        Self::new(short, Arity::Unbounded, Binding::List)
    }

    /// Declare a map-valued option; each value token splits on its first
    /// separator occurrence into a key/value pair.
    pub fn map(short: char) -> Self {
        Self::new(short, Arity::Unbounded, Binding::Map)
    }

    /// Add a long name, enabling `--name` and `--name=value` forms.
    pub fn long(mut self, name: impl Into<String>) -> Self {
        self.long = Some(name.into());
        self
    }

    /// Human-readable description used in diagnostics.
    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = text.into();
        self
    }

    /// Override the value separator for this declaration.
    ///
    /// The separator is fixed at declaration time and applies uniformly to
    /// every occurrence of the option.
    pub fn separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    /// The option must appear on the command line.
    pub fn mandatory(mut self) -> Self {
        self.mandatory = true;
        self
    }

    /// If the option appears, it must carry at least one value.
    pub fn mandatory_value(mut self) -> Self {
        self.mandatory_value = true;
        self
    }

    /// Default value tokens, applied when the option is wholly absent or
    /// present without values (under non-mandatory-value semantics).
    pub fn defaults<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.defaults = values.into_iter().map(Into::into).collect();
        self
    }

    /// The short name (`-x` form) of this option.
    pub fn short_name(&self) -> char {
        self.short
    }

    /// The long name (`--name` form) of this option, if declared.
    pub fn long_name(&self) -> Option<&str> {
        self.long.as_deref()
    }

    /// Display form used in diagnostics: `-x` or `-x/--name`.
    pub(crate) fn display_name(&self) -> String {
        match &self.long {
            Some(long) => format!("-{}/--{}", self.short, long),
            None => format!("-{}", self.short),
        }
    }

    fn validate(&self) -> Result<(), CliError> {
        if !self.short.is_ascii_alphanumeric() {
            return Err(CliError::InvalidSpec {
                message: format!("short option name `{}` must be alphanumeric", self.short),
            });
        }
        if let Some(long) = &self.long
            && (long.len() < 2 || long.starts_with('-'))
        {
            return Err(CliError::InvalidSpec {
                message: format!("long option name `{long}` must be at least two characters"),
            });
        }
        if self.arity == Arity::Flag && self.mandatory_value {
            return Err(CliError::InvalidSpec {
                message: format!("flag option `{}` cannot require a value", self.display_name()),
            });
        }
        if self.arity == Arity::Flag && !self.defaults.is_empty() {
            return Err(CliError::InvalidSpec {
                message: format!("flag option `{}` cannot carry default values", self.display_name()),
            });
        }
        if self.mandatory_value && !self.defaults.is_empty() {
            return Err(CliError::InvalidSpec {
                message: format!(
                    "option `{}` declares defaults but also requires explicit values",
                    self.display_name()
                ),
            });
        }
        if self.binding == Binding::Map && self.arity != Arity::Unbounded {
            return Err(CliError::InvalidSpec {
                message: format!("map option `{}` must accept unbounded values", self.display_name()),
            });
        }
        Ok(())
    }
}

/// Treatment of option-like tokens that match no declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownOptionPolicy {
    /// Log a warning and record the token; binding continues.
    #[default]
    Permissive,
    /// Fail the binding with a suggestion.
    Strict,
}

/// Declaration of the positional arguments a command accepts.
#[derive(Debug, Clone)]
pub struct ArgsSpec {
    pub(crate) name: String,
    pub(crate) mandatory_count: usize,
    pub(crate) max: Option<usize>,
}

impl ArgsSpec {
    /// Declare positional arguments under a display name (e.g. `files`).
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mandatory_count: 0,
            max: None,
        }
    }

    /// The first `count` positional arguments must be present.
    pub fn mandatory(mut self, count: usize) -> Self {
        self.mandatory_count = count;
        self
    }

    /// Reject more than `max` positional arguments.
    pub fn max(mut self, max: usize) -> Self {
        self.max = Some(max);
        self
    }
}

impl Default for ArgsSpec {
    fn default() -> Self {
        Self::new("args")
    }
}

/// A complete command declaration: name, options, positional arguments, and
/// the unknown-option policy.
#[derive(Debug, Clone)]
pub struct CommandSpec {
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) options: Vec<OptionSpec>,
    pub(crate) args: ArgsSpec,
    pub(crate) unknown_options: UnknownOptionPolicy,
}

impl CommandSpec {
    /// Start building a command declaration.
    pub fn builder(name: impl Into<String>) -> CommandSpecBuilder {
        CommandSpecBuilder {
            name: name.into(),
            description: String::new(),
            options: Vec::new(),
            args: ArgsSpec::default(),
            unknown_options: UnknownOptionPolicy::default(),
        }
    }

    /// The command name used for dispatch.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The command description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Declared options, in declaration order.
    pub fn options(&self) -> &[OptionSpec] {
        &self.options
    }

    pub(crate) fn find_short(&self, short: char) -> Option<&OptionSpec> {
        self.options.iter().find(|o| o.short == short)
    }

    pub(crate) fn find_long(&self, long: &str) -> Option<&OptionSpec> {
        self.options.iter().find(|o| o.long.as_deref() == Some(long))
    }

    /// All declared option names (`-x` and `--name` forms), for diagnostics.
    pub(crate) fn option_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        for opt in &self.options {
            names.push(format!("-{}", opt.short));
            if let Some(long) = &opt.long {
                names.push(format!("--{long}"));
            }
        }
        names
    }
}

/// Builder for [`CommandSpec`].
pub struct CommandSpecBuilder {
    name: String,
    description: String,
    options: Vec<OptionSpec>,
    args: ArgsSpec,
    unknown_options: UnknownOptionPolicy,
}

impl CommandSpecBuilder {
    /// Human-readable description of the command.
    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = text.into();
        self
    }

    /// Add an option declaration.
    pub fn option(mut self, option: OptionSpec) -> Self {
        self.options.push(option);
        self
    }

    /// Declare the positional arguments this command accepts.
    pub fn args(mut self, args: ArgsSpec) -> Self {
        self.args = args;
        self
    }

    /// Fail binding on unrecognized options instead of warning.
    pub fn strict(mut self) -> Self {
        self.unknown_options = UnknownOptionPolicy::Strict;
        self
    }

    /// Set the unknown-option policy explicitly (e.g. from configuration).
    pub fn unknown_options(mut self, policy: UnknownOptionPolicy) -> Self {
        self.unknown_options = policy;
        self
    }

    /// Validate the declarations and produce the immutable spec.
    pub fn build(self) -> Result<CommandSpec, CliError> {
        if self.name.is_empty() {
            return Err(CliError::InvalidSpec {
                message: "command name must not be empty".to_string(),
            });
        }

        let mut shorts = std::collections::HashSet::new();
        let mut longs = std::collections::HashSet::new();
        for opt in &self.options {
            opt.validate()?;
            if !shorts.insert(opt.short) {
                return Err(CliError::InvalidSpec {
                    message: format!("duplicate short option `-{}`", opt.short),
                });
            }
            if let Some(long) = &opt.long
                && !longs.insert(long.clone())
            {
                return Err(CliError::InvalidSpec {
                    message: format!("duplicate long option `--{long}`"),
                });
            }
        }

        if let Some(max) = self.args.max
            && max < self.args.mandatory_count
        {
            return Err(CliError::InvalidSpec {
                message: format!(
                    "args `{}`: max {} is below the mandatory count {}",
                    self.args.name, max, self.args.mandatory_count
                ),
            });
        }

        Ok(CommandSpec {
            name: self.name,
            description: self.description,
            options: self.options,
            args: self.args,
            unknown_options: self.unknown_options,
        })
    }
}
