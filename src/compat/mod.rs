//! Compatibility evaluation engine.
//!
//! - `rules`: resolves and parses the rule conditions stored between two
//!   categories.
//! - `predicates`: the six rule checks plus the unknown-rule pass-through.
//! - `evaluator`: pair verdicts (first red wins) and build aggregation.
//! - `verdict` / `error`: result and failure types shared by callers.

pub mod error;
pub mod evaluator;
pub mod predicates;
pub mod rules;
pub mod verdict;

pub use error::{CompatError, ErrorClass};
pub use evaluator::Evaluator;
pub use predicates::{POWER_HEADROOM, evaluate_rule};
pub use rules::{CachedRuleStore, RuleCondition, RuleLookup, RuleStore};
pub use verdict::{BuildVerdict, PairFinding, Status, Verdict};
