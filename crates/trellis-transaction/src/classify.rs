// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Hierarchical error classification for rollback decisions.
//!
//! Error classes are dotted paths (`io`, `io.timeout`) with subtype
//! semantics: a class matches itself and everything below it. A
//! transaction definition carries two class lists; the deepest matching
//! class across both lists decides commit-vs-rollback, and at equal depth
//! the no-rollback list takes precedence.

use std::str::FromStr;

use thiserror::Error;

use crate::definition::TransactionDef;

/// A hierarchical error class.
///
/// The root class (`*`) matches every error.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ErrorClass {
    path: String,
}

impl ErrorClass {
    /// The root class, matching every error.
    pub fn root() -> Self {
        Self { path: String::new() }
    }

    /// Build a class from a dotted path. Panics on an invalid path; use
    /// [`FromStr`] for fallible parsing of external input.
    pub fn new(path: &str) -> Self {
        path.parse().expect("invalid error class path")
    }

    /// Whether this is the root class.
    pub fn is_root(&self) -> bool {
        self.path.is_empty()
    }

    /// Number of path segments; the root has depth 0.
    pub fn depth(&self) -> usize {
        if self.path.is_empty() {
            0
        } else {
            self.path.split('.').count()
        }
    }

    /// Whether `other` is this class or one of its subtypes.
    pub fn matches(&self, other: &ErrorClass) -> bool {
        if self.path.is_empty() {
            return true;
        }
        other.path == self.path
            || (other.path.len() > self.path.len()
                && other.path.starts_with(&self.path)
                && other.path.as_bytes()[self.path.len()] == b'.')
    }
}

impl std::fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.path.is_empty() {
            write!(f, "*")
        } else {
            write!(f, "{}", self.path)
        }
    }
}

/// Error parsing an error class path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid error class `{path}`: {reason}")]
pub struct ClassParseError {
    pub path: String,
    pub reason: &'static str,
}

impl FromStr for ErrorClass {
    type Err = ClassParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || s == "*" {
            return Ok(Self::root());
        }
        for segment in s.split('.') {
            if segment.is_empty() {
                return Err(ClassParseError {
                    path: s.to_string(),
                    reason: "empty path segment",
                });
            }
            if !segment
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
            {
                return Err(ClassParseError {
                    path: s.to_string(),
                    reason: "segments must be alphanumeric, `_`, or `-`",
                });
            }
        }
        Ok(Self {
            path: s.to_string(),
        })
    }
}

/// An error type that reports its class for rollback classification.
pub trait ErrorClassified: std::error::Error {
    /// The class of this error instance.
    fn error_class(&self) -> ErrorClass;
}

/// Whether a failed transactional body commits or rolls back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollbackDecision {
    Rollback,
    Commit,
}

fn deepest_match(rules: &[ErrorClass], class: &ErrorClass) -> Option<usize> {
    rules
        .iter()
        .filter(|rule| rule.matches(class))
        .map(ErrorClass::depth)
        .max()
}

/// Classify an error against a transaction definition's rollback rules.
///
/// The deepest matching class wins; at equal depth `no_rollback_for`
/// takes precedence. An error matching neither list commits.
pub fn decide_rollback(def: &TransactionDef, class: &ErrorClass) -> RollbackDecision {
    let rollback = deepest_match(def.rollback_on_classes(), class);
    let no_rollback = deepest_match(def.no_rollback_for_classes(), class);

    match (rollback, no_rollback) {
        (Some(r), Some(n)) if r > n => RollbackDecision::Rollback,
        (Some(_), Some(_)) => RollbackDecision::Commit,
        (Some(_), None) => RollbackDecision::Rollback,
        (None, _) => RollbackDecision::Commit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::propagation::Propagation;

    #[test]
    fn root_matches_everything() {
        let root = ErrorClass::root();
        assert!(root.matches(&ErrorClass::new("io")));
        assert!(root.matches(&ErrorClass::new("io.timeout")));
        assert!(root.matches(&ErrorClass::root()));
    }

    #[test]
    fn prefix_matching_respects_segment_boundaries() {
        let io = ErrorClass::new("io");
        assert!(io.matches(&ErrorClass::new("io")));
        assert!(io.matches(&ErrorClass::new("io.timeout")));
        // `iota` is not a subtype of `io`.
        assert!(!io.matches(&ErrorClass::new("iota")));
        assert!(!ErrorClass::new("io.timeout").matches(&ErrorClass::new("io")));
    }

    #[test]
    fn depth_counts_segments() {
        assert_eq!(ErrorClass::root().depth(), 0);
        assert_eq!(ErrorClass::new("io").depth(), 1);
        assert_eq!(ErrorClass::new("io.timeout").depth(), 2);
    }

    #[test]
    fn parse_rejects_empty_segments() {
        assert!("io..timeout".parse::<ErrorClass>().is_err());
        assert!(".io".parse::<ErrorClass>().is_err());
    }

    #[test]
    fn parse_star_is_root() {
        let class: ErrorClass = "*".parse().unwrap();
        assert!(class.is_root());
        assert_eq!(class.to_string(), "*");
    }

    #[test]
    fn default_def_rolls_back_on_everything() {
        let def = TransactionDef::new(Propagation::Required);
        assert_eq!(
            decide_rollback(&def, &ErrorClass::new("anything.at_all")),
            RollbackDecision::Rollback
        );
    }

    #[test]
    fn no_rollback_exclusion_commits() {
        let def = TransactionDef::new(Propagation::Required)
            .no_rollback_for(ErrorClass::new("app.validation"));
        assert_eq!(
            decide_rollback(&def, &ErrorClass::new("app.validation")),
            RollbackDecision::Commit
        );
        // Subtypes of the exclusion commit too.
        assert_eq!(
            decide_rollback(&def, &ErrorClass::new("app.validation.length")),
            RollbackDecision::Commit
        );
        // Siblings still roll back.
        assert_eq!(
            decide_rollback(&def, &ErrorClass::new("app.other")),
            RollbackDecision::Rollback
        );
    }

    #[test]
    fn deeper_rollback_rule_beats_shallower_exclusion() {
        let def = TransactionDef::new(Propagation::Required)
            .rollback_on(ErrorClass::new("io.timeout.fatal"))
            .no_rollback_for(ErrorClass::new("io.timeout"));
        assert_eq!(
            decide_rollback(&def, &ErrorClass::new("io.timeout.fatal")),
            RollbackDecision::Rollback
        );
        assert_eq!(
            decide_rollback(&def, &ErrorClass::new("io.timeout.slow")),
            RollbackDecision::Commit
        );
    }

    #[test]
    fn equal_depth_prefers_no_rollback() {
        let def = TransactionDef::new(Propagation::Required)
            .rollback_on(ErrorClass::new("io.timeout"))
            .no_rollback_for(ErrorClass::new("io.timeout"));
        assert_eq!(
            decide_rollback(&def, &ErrorClass::new("io.timeout")),
            RollbackDecision::Commit
        );
    }

    #[test]
    fn unmatched_error_commits_under_restricted_rules() {
        let def =
            TransactionDef::new(Propagation::Required).rollback_on(ErrorClass::new("io"));
        assert_eq!(
            decide_rollback(&def, &ErrorClass::new("app")),
            RollbackDecision::Commit
        );
    }
}
