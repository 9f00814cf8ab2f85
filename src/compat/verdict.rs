//! Result types for pair and build evaluation.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const RULE_COMPONENT_NOT_FOUND: &str = "component_not_found";
pub const RULE_NO_RULES: &str = "no_rules";
pub const RULE_ALL_PASSED: &str = "all_passed";

/// Tri-state outcome. Ordering is by severity so `max` picks the worst.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Green,
    Yellow,
    Red,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Green => "green",
            Status::Yellow => "yellow",
            Status::Red => "red",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
/// Outcome of one rule, or of a whole pair.
pub struct Verdict {
    pub compatible: bool,
    pub status: Status,
    pub message: String,
    pub rule: String,
}

impl Verdict {
    pub fn pass(rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            compatible: true,
            status: Status::Green,
            message: message.into(),
            rule: rule.into(),
        }
    }

    pub fn fail(rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            compatible: false,
            status: Status::Red,
            message: message.into(),
            rule: rule.into(),
        }
    }

    /// Compatible, but worth a second look.
    pub fn caution(rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            compatible: true,
            status: Status::Yellow,
            message: message.into(),
            rule: rule.into(),
        }
    }

    pub fn component_not_found() -> Self {
        Self::fail(RULE_COMPONENT_NOT_FOUND, "component not found")
    }

    pub fn no_rules() -> Self {
        Self::pass(
            RULE_NO_RULES,
            "No compatibility rules found - assumed compatible",
        )
    }

    pub fn all_passed() -> Self {
        Self::pass(RULE_ALL_PASSED, "All compatibility checks passed")
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
/// A flagged pair inside a build verdict.
pub struct PairFinding {
    pub component1: String,
    pub component2: String,
    pub message: String,
    pub rule: String,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
/// Aggregate over every unordered pair of a build.
///
/// `issues` and `warnings` keep pair enumeration order (input order, `i < j`).
pub struct BuildVerdict {
    pub overall_compatible: bool,
    pub status: Status,
    pub issues: Vec<PairFinding>,
    pub warnings: Vec<PairFinding>,
}

impl BuildVerdict {
    pub fn from_findings(issues: Vec<PairFinding>, warnings: Vec<PairFinding>) -> Self {
        let status = if !issues.is_empty() {
            Status::Red
        } else if !warnings.is_empty() {
            Status::Yellow
        } else {
            Status::Green
        };
        Self {
            overall_compatible: issues.is_empty(),
            status,
            issues,
            warnings,
        }
    }
}
