// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Token scanner: argument vector -> option occurrences + positionals.
//!
//! Recognizes `-x`, clustered flags `-ab`, attached values `-Pkey=value`,
//! `--name`, `--name=value`, and the `--` end-of-options marker. Tokens not
//! consumed by a declared option are positionals; option-like tokens that
//! match no declaration are collected as unknown for the binder to judge.

use crate::spec::{Arity, CommandSpec};

/// One occurrence of a declared option with its raw value tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Occurrence {
    pub short: char,
    pub values: Vec<String>,
}

/// Everything the scanner extracted from an argument vector.
#[derive(Debug, Default)]
pub(crate) struct ScanResult {
    pub occurrences: Vec<Occurrence>,
    pub positionals: Vec<String>,
    pub unknown: Vec<String>,
}

/// A token is option-like if it starts with `-` and is not exactly `-`.
///
/// A bare `-` conventionally means stdin and scans as a positional.
fn is_option_like(token: &str) -> bool {
    token.len() > 1 && token.starts_with('-')
}

/// Scan `argv` against the command's declarations.
pub(crate) fn scan(spec: &CommandSpec, argv: &[String]) -> ScanResult {
    let mut result = ScanResult::default();
    let mut iter = argv.iter().peekable();
    let mut options_ended = false;

    while let Some(token) = iter.next() {
        if options_ended {
            result.positionals.push(token.clone());
            continue;
        }
        if token == "--" {
            options_ended = true;
            continue;
        }
        if let Some(rest) = token.strip_prefix("--") {
            scan_long(spec, rest, token, &mut iter, &mut result);
        } else if is_option_like(token) {
            scan_short(spec, &token[1..], token, &mut iter, &mut result);
        } else {
            result.positionals.push(token.clone());
        }
    }

    result
}

fn scan_long<'a, I>(
    spec: &CommandSpec,
    body: &str,
    token: &str,
    iter: &mut std::iter::Peekable<I>,
    result: &mut ScanResult,
) where
    I: Iterator<Item = &'a String>,
{
    let (name, attached) = match body.split_once('=') {
        Some((name, value)) => (name, Some(value)),
        None => (body, None),
    };

    let Some(opt) = spec.find_long(name) else {
        result.unknown.push(token.to_string());
        return;
    };

    let mut values = Vec::new();
    match opt.arity {
        Arity::Flag => {
            // `--flag=anything` is tolerated; the attached text is ignored.
        }
        Arity::Single => {
            if let Some(value) = attached {
                values.push(value.to_string());
            } else {
                consume_following(iter, 1, &mut values);
            }
        }
        Arity::Unbounded => {
            if let Some(value) = attached {
                values.push(value.to_string());
            }
            consume_following(iter, usize::MAX, &mut values);
        }
    }

    result.occurrences.push(Occurrence {
        short: opt.short_name(),
        values,
    });
}

fn scan_short<'a, I>(
    spec: &CommandSpec,
    body: &str,
    token: &str,
    iter: &mut std::iter::Peekable<I>,
    result: &mut ScanResult,
) where
    I: Iterator<Item = &'a String>,
{
    let mut chars = body.chars();
    let first = chars.next().expect("short token has at least one character");
    let rest = chars.as_str();

    let Some(opt) = spec.find_short(first) else {
        result.unknown.push(token.to_string());
        return;
    };

    match opt.arity {
        Arity::Flag => {
            if rest.is_empty() {
                result.occurrences.push(Occurrence {
                    short: first,
                    values: Vec::new(),
                });
                return;
            }
            // Clustered flags: every character must be a declared flag,
            // otherwise the whole token is unrecognized.
            let cluster: Vec<char> = body.chars().collect();
            let all_flags = cluster.iter().all(|&c| {
                spec.find_short(c)
                    .is_some_and(|o| matches!(o.arity, Arity::Flag))
            });
            if all_flags {
                for c in cluster {
                    result.occurrences.push(Occurrence {
                        short: c,
                        values: Vec::new(),
                    });
                }
            } else {
                result.unknown.push(token.to_string());
            }
        }
        Arity::Single => {
            let mut values = Vec::new();
            if rest.is_empty() {
                consume_following(iter, 1, &mut values);
            } else {
                values.push(rest.to_string());
            }
            result.occurrences.push(Occurrence {
                short: first,
                values,
            });
        }
        Arity::Unbounded => {
            let mut values = Vec::new();
            if !rest.is_empty() {
                values.push(rest.to_string());
            }
            consume_following(iter, usize::MAX, &mut values);
            result.occurrences.push(Occurrence {
                short: first,
                values,
            });
        }
    }
}

/// Take up to `limit` following tokens that do not look like options.
fn consume_following<'a, I>(
    iter: &mut std::iter::Peekable<I>,
    limit: usize,
    values: &mut Vec<String>,
) where
    I: Iterator<Item = &'a String>,
{
    let mut taken = 0;
    while taken < limit {
        match iter.peek() {
            Some(next) if !is_option_like(next) && next.as_str() != "--" => {
                values.push(iter.next().expect("peeked token exists").clone());
                taken += 1;
            }
            _ => break,
        }
    }
}
