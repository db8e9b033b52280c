// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Binding and dispatch errors with fuzzy match suggestions.
//!
//! All binding errors are startup-time configuration errors: the launcher
//! renders them as miette diagnostics and exits non-zero before any
//! application logic runs. Unknown option/command errors carry "did you
//! mean?" suggestions using Jaro-Winkler string similarity.

use miette::Diagnostic;
use thiserror::Error;
use trellis_core::TrellisError;

/// Minimum Jaro-Winkler similarity score to suggest a correction.
/// 0.75 catches common typos like `--verbos` -> `--verbose` while
/// filtering noise.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// An error raised while validating declarations, binding an argument
/// vector, or dispatching to a command handler.
#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    /// A mandatory option did not appear on the command line.
    #[error("missing mandatory option `{name}`")]
    #[diagnostic(
        code(trellis::cli::missing_option),
        help("the `{name}` option must be supplied")
    )]
    MissingOption {
        /// Display name of the option (`-x` or `-x/--name`).
        name: String,
    },

    /// An option requiring explicit values appeared without any.
    #[error("option `{name}` requires a value")]
    #[diagnostic(
        code(trellis::cli::missing_value),
        help("supply a value, e.g. `{name} <value>`")
    )]
    MissingValue { name: String },

    /// Fewer positional arguments than the declared mandatory count.
    #[error("expected at least {expected} `{name}` argument(s), got {found}")]
    #[diagnostic(code(trellis::cli::missing_arguments))]
    MissingArguments {
        name: String,
        expected: usize,
        found: usize,
    },

    /// More positional arguments than the declared maximum.
    #[error("expected at most {max} `{name}` argument(s), got {found}")]
    #[diagnostic(code(trellis::cli::too_many_arguments))]
    TooManyArguments {
        name: String,
        max: usize,
        found: usize,
    },

    /// A map-valued occurrence that does not contain the separator.
    #[error("malformed pair `{token}` for option `{name}`")]
    #[diagnostic(
        code(trellis::cli::malformed_pair),
        help("expected `key{separator}value`")
    )]
    MalformedPair {
        name: String,
        separator: char,
        token: String,
    },

    /// An option-like token matching no declaration, under strict policy.
    #[error("unknown option `{token}`")]
    #[diagnostic(
        code(trellis::cli::unknown_option),
        help("{}", format_unknown_help(suggestion.as_deref(), valid))
    )]
    UnknownOption {
        token: String,
        /// Suggested correction via fuzzy matching, if any.
        suggestion: Option<String>,
        /// Listing of the declared option names.
        valid: String,
    },

    /// The leading positional token matched no registered command.
    #[error("unknown command `{name}`")]
    #[diagnostic(
        code(trellis::cli::unknown_command),
        help("{}", format_unknown_help(suggestion.as_deref(), available))
    )]
    UnknownCommand {
        name: String,
        suggestion: Option<String>,
        available: String,
    },

    /// No command token was given at all.
    #[error("no command given")]
    #[diagnostic(
        code(trellis::cli::missing_command),
        help("available commands: {available}")
    )]
    MissingCommand { available: String },

    /// A command name was registered twice.
    #[error("command `{name}` is already registered")]
    #[diagnostic(code(trellis::cli::duplicate_command))]
    DuplicateCommand { name: String },

    /// A declaration violated the option model invariants.
    #[error("invalid declaration: {message}")]
    #[diagnostic(code(trellis::cli::invalid_spec))]
    InvalidSpec { message: String },

    /// The invoked handler returned an error.
    #[error("command `{name}` failed")]
    #[diagnostic(code(trellis::cli::handler))]
    Handler {
        name: String,
        #[source]
        source: TrellisError,
    },
}

/// Format the help message for unknown option/command errors.
fn format_unknown_help(suggestion: Option<&str>, valid: &str) -> String {
    match suggestion {
        Some(s) => format!("did you mean `{s}`? Known: {valid}"),
        None => format!("known: {valid}"),
    }
}

/// Suggest a similar name using Jaro-Winkler string similarity.
///
/// Returns the best match above the similarity threshold, or `None` if
/// no candidate is close enough.
pub fn suggest<S: AsRef<str>>(unknown: &str, candidates: &[S]) -> Option<String> {
    let mut best_score = SUGGESTION_THRESHOLD;
    let mut best_match = None;

    for candidate in candidates {
        let candidate = candidate.as_ref();
        let score = strsim::jaro_winkler(unknown, candidate);
        if score > best_score {
            best_score = score;
            best_match = Some(candidate.to_string());
        }
    }

    best_match
}

/// Render a `CliError` to stderr using miette's graphical handler.
pub fn render_error(error: &CliError) {
    use miette::GraphicalReportHandler;

    let handler = GraphicalReportHandler::new();
    let mut buf = String::new();
    let diagnostic: &dyn Diagnostic = error;
    if handler.render_report(&mut buf, diagnostic).is_ok() {
        eprint!("{buf}");
    } else {
        eprintln!("Error: {error}");
    }
}
