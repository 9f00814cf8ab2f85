//! Rule Store Accessor: which rule conditions apply between two categories.
//!
//! Lookup resolves both slugs to category ids, selects stored rules in either
//! direction, and parses each stored condition payload. An unknown slug means
//! "no applicable rule". A payload that does not parse is a configuration
//! error for that rule and is returned to the caller, never skipped.
//!
//! Returned conditions keep rule-table insertion order; the evaluator's
//! first-failure-wins policy depends on it.

use crate::catalog::{CatalogSource, CategorySlug, RuleKind, StoredRule};
use crate::compat::error::CompatError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::cell::RefCell;
use std::collections::BTreeMap;
use tracing::{debug, warn};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
/// Parsed rule payload: the predicate name plus whatever descriptive metadata
/// the administrator attached (`description`, ...).
pub struct RuleCondition {
    pub rule: RuleKind,
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}

impl RuleCondition {
    pub fn parse(stored: &StoredRule) -> Result<Self, CompatError> {
        serde_json::from_str(&stored.condition).map_err(|source| {
            warn!(rule_id = %stored.id, error = %source, "malformed rule condition");
            CompatError::MalformedRule {
                rule_id: stored.id,
                source,
            }
        })
    }

    pub fn description(&self) -> Option<&str> {
        self.metadata.get("description").and_then(Value::as_str)
    }
}

/// Anything that can answer "which rules apply between these two categories".
pub trait RuleLookup {
    fn rules_between(
        &self,
        first: &CategorySlug,
        second: &CategorySlug,
    ) -> Result<Vec<RuleCondition>, CompatError>;
}

/// Direct accessor: one lookup against the source per call.
pub struct RuleStore<'a, S: ?Sized> {
    source: &'a S,
}

impl<'a, S: CatalogSource + ?Sized> RuleStore<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }
}

impl<S: CatalogSource + ?Sized> RuleLookup for RuleStore<'_, S> {
    fn rules_between(
        &self,
        first: &CategorySlug,
        second: &CategorySlug,
    ) -> Result<Vec<RuleCondition>, CompatError> {
        let (Some(first_id), Some(second_id)) = (
            self.source.category_id(first),
            self.source.category_id(second),
        ) else {
            debug!(%first, %second, "unknown category slug; no rules apply");
            return Ok(Vec::new());
        };

        self.source
            .rules_for_category_ids(first_id, second_id)
            .into_iter()
            .map(RuleCondition::parse)
            .collect()
    }
}

/// Memoizing accessor for the duration of one build check.
///
/// Keys are order-normalized slug pairs; since the underlying lookup is
/// symmetric the cached answer is the same whichever side asked first.
pub struct CachedRuleStore<'a, S: ?Sized> {
    store: RuleStore<'a, S>,
    memo: RefCell<BTreeMap<(CategorySlug, CategorySlug), Vec<RuleCondition>>>,
}

impl<'a, S: CatalogSource + ?Sized> CachedRuleStore<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self {
            store: RuleStore::new(source),
            memo: RefCell::new(BTreeMap::new()),
        }
    }

    pub fn cached_pairs(&self) -> usize {
        self.memo.borrow().len()
    }
}

impl<S: CatalogSource + ?Sized> RuleLookup for CachedRuleStore<'_, S> {
    fn rules_between(
        &self,
        first: &CategorySlug,
        second: &CategorySlug,
    ) -> Result<Vec<RuleCondition>, CompatError> {
        let key = if first <= second {
            (first.clone(), second.clone())
        } else {
            (second.clone(), first.clone())
        };
        if let Some(hit) = self.memo.borrow().get(&key) {
            return Ok(hit.clone());
        }
        let rules = self.store.rules_between(first, second)?;
        self.memo.borrow_mut().insert(key, rules.clone());
        Ok(rules)
    }
}
