//! Pair and build evaluation.
//!
//! A pair verdict is decided by the rules stored between the two components'
//! categories, evaluated in store order: the first red verdict wins outright,
//! otherwise the first yellow one, otherwise the pair passed everything. A
//! build is checked pair by pair over every `i < j` combination of its
//! components.

use crate::catalog::{CatalogSource, Component, ComponentId};
use crate::compat::error::CompatError;
use crate::compat::predicates::evaluate_rule;
use crate::compat::rules::{CachedRuleStore, RuleLookup, RuleStore};
use crate::compat::verdict::{BuildVerdict, PairFinding, Status, Verdict};
use tracing::{debug, info};

pub struct Evaluator<'a, S: ?Sized> {
    source: &'a S,
}

impl<'a, S: CatalogSource + ?Sized> Evaluator<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Verdict for two possibly-missing components.
    ///
    /// A missing side is not an error; it yields the fixed
    /// `component_not_found` verdict.
    pub fn evaluate_pair(
        &self,
        first: Option<&Component>,
        second: Option<&Component>,
    ) -> Result<Verdict, CompatError> {
        let (Some(first), Some(second)) = (first, second) else {
            return Ok(Verdict::component_not_found());
        };
        evaluate_with(&RuleStore::new(self.source), first, second)
    }

    pub fn evaluate_pair_by_id(
        &self,
        first: ComponentId,
        second: ComponentId,
    ) -> Result<Verdict, CompatError> {
        let first = self.source.component(first);
        let second = self.source.component(second);
        self.evaluate_pair(first.as_ref(), second.as_ref())
    }

    /// Aggregate verdict over every unordered pair of `components`.
    ///
    /// Fewer than two components means no pairs and a green result. A
    /// malformed rule anywhere aborts the whole check.
    pub fn evaluate_build(&self, components: &[Component]) -> Result<BuildVerdict, CompatError> {
        let rules = CachedRuleStore::new(self.source);
        let mut issues = Vec::new();
        let mut warnings = Vec::new();

        for (i, first) in components.iter().enumerate() {
            for second in &components[i + 1..] {
                let verdict = evaluate_with(&rules, first, second)?;
                let finding = || PairFinding {
                    component1: first.name.clone(),
                    component2: second.name.clone(),
                    message: verdict.message.clone(),
                    rule: verdict.rule.clone(),
                };
                if !verdict.compatible {
                    issues.push(finding());
                } else if verdict.status == Status::Yellow {
                    warnings.push(finding());
                }
            }
        }

        let result = BuildVerdict::from_findings(issues, warnings);
        info!(
            components = components.len(),
            category_pairs = rules.cached_pairs(),
            issues = result.issues.len(),
            warnings = result.warnings.len(),
            status = %result.status,
            "build evaluated"
        );
        Ok(result)
    }
}

fn evaluate_with<L: RuleLookup + ?Sized>(
    rules: &L,
    first: &Component,
    second: &Component,
) -> Result<Verdict, CompatError> {
    let conditions = rules.rules_between(&first.category_slug, &second.category_slug)?;
    if conditions.is_empty() {
        debug!(first = %first.id, second = %second.id, "no rules between categories");
        return Ok(Verdict::no_rules());
    }

    let mut caution = None;
    for condition in &conditions {
        let verdict = evaluate_rule(&condition.rule, first, second);
        debug!(
            rule = %condition.rule,
            description = condition.description().unwrap_or(""),
            status = %verdict.status,
            "rule evaluated"
        );
        if !verdict.compatible {
            debug!(
                first = %first.id,
                second = %second.id,
                rule = %verdict.rule,
                "pair incompatible"
            );
            return Ok(verdict);
        }
        if verdict.status == Status::Yellow && caution.is_none() {
            caution = Some(verdict);
        }
    }
    Ok(caution.unwrap_or_else(Verdict::all_passed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogDocument, CatalogIndex};
    use crate::compat::error::ErrorClass;
    use serde_json::{Value, json};

    fn catalog(rules: Value) -> CatalogIndex {
        let document: CatalogDocument = serde_json::from_value(json!({
            "schema_version": "rigcheck_catalog_v1",
            "categories": [
                {"id": 1, "name": "CPU", "slug": "cpu"},
                {"id": 2, "name": "Motherboard", "slug": "motherboard"},
                {"id": 3, "name": "GPU", "slug": "gpu"},
                {"id": 4, "name": "Case", "slug": "case"},
                {"id": 5, "name": "RAM", "slug": "ram"}
            ],
            "vendors": [{"id": 1, "name": "Acme", "website": "https://acme.test"}],
            "components": [
                {"id": 1, "name": "Chip", "price": 300.0, "category_id": 1, "vendor_id": 1,
                 "specs": {"socket": "LGA1700"}},
                {"id": 2, "name": "Board", "price": 200.0, "category_id": 2, "vendor_id": 1,
                 "specs": {"socket": "AM5", "form_factor": "mATX"}},
                {"id": 3, "name": "Card", "price": 900.0, "category_id": 3, "vendor_id": 1,
                 "specs": {"length": 300}},
                {"id": 4, "name": "Box", "price": 90.0, "category_id": 4, "vendor_id": 1,
                 "specs": {"form_factor": "ITX", "max_gpu_length": 320}},
                {"id": 5, "name": "Sticks", "price": 80.0, "category_id": 5, "vendor_id": 1}
            ],
            "rules": rules
        }))
        .unwrap();
        CatalogIndex::from_document(document).unwrap()
    }

    fn standard_rules() -> Value {
        json!([
            {"id": 1, "source_id": 1, "target_id": 2, "condition": {"rule": "socket_match"}},
            {"id": 2, "source_id": 3, "target_id": 4, "condition": {"rule": "gpu_length_fit"}},
            {"id": 3, "source_id": 2, "target_id": 4, "condition": {"rule": "form_factor_match"}}
        ])
    }

    #[test]
    fn missing_component_yields_fixed_verdict() {
        let index = catalog(standard_rules());
        let evaluator = Evaluator::new(&index);
        let verdict = evaluator
            .evaluate_pair_by_id(ComponentId(1), ComponentId(99))
            .unwrap();
        assert_eq!(verdict, Verdict::component_not_found());
        assert_eq!(verdict.message, "component not found");
    }

    #[test]
    fn no_rules_is_open_world_green() {
        let index = catalog(standard_rules());
        let verdict = Evaluator::new(&index)
            .evaluate_pair_by_id(ComponentId(1), ComponentId(5))
            .unwrap();
        assert!(verdict.compatible);
        assert_eq!(verdict.rule, "no_rules");
    }

    #[test]
    fn all_rules_passing_reports_all_passed() {
        let index = catalog(standard_rules());
        let verdict = Evaluator::new(&index)
            .evaluate_pair_by_id(ComponentId(3), ComponentId(4))
            .unwrap();
        assert_eq!(verdict, Verdict::all_passed());
    }

    #[test]
    fn first_failure_short_circuits() {
        // The psu rule passes through, socket_match fails, and the unknown
        // rule after it is never reached.
        let index = catalog(json!([
            {"id": 1, "source_id": 1, "target_id": 2, "condition": {"rule": "psu_length_fit"}},
            {"id": 2, "source_id": 2, "target_id": 1, "condition": {"rule": "socket_match"}},
            {"id": 3, "source_id": 1, "target_id": 2, "condition": {"rule": "ram_speed_match"}}
        ]));
        let verdict = Evaluator::new(&index)
            .evaluate_pair_by_id(ComponentId(1), ComponentId(2))
            .unwrap();
        assert_eq!(verdict.status, Status::Red);
        assert_eq!(verdict.rule, "socket_match");
        assert_eq!(
            verdict.message,
            "Socket mismatch: CPU LGA1700 vs Motherboard AM5"
        );
    }

    #[test]
    fn pair_verdict_is_symmetric() {
        let index = catalog(standard_rules());
        let evaluator = Evaluator::new(&index);
        for (a, b) in [(1, 2), (3, 4), (2, 4), (1, 5)] {
            let forward = evaluator
                .evaluate_pair_by_id(ComponentId(a), ComponentId(b))
                .unwrap();
            let backward = evaluator
                .evaluate_pair_by_id(ComponentId(b), ComponentId(a))
                .unwrap();
            assert_eq!(forward, backward, "pair ({a}, {b})");
        }
    }

    #[test]
    fn malformed_rule_is_not_skipped() {
        let index = catalog(json!([
            {"id": 9, "source_id": 1, "target_id": 2, "condition": "not json"}
        ]));
        let err = Evaluator::new(&index)
            .evaluate_pair_by_id(ComponentId(1), ComponentId(2))
            .unwrap_err();
        assert_eq!(err.class(), ErrorClass::Configuration);
    }

    #[test]
    fn build_collects_every_failing_pair_in_order() {
        let index = catalog(standard_rules());
        let parts: Vec<_> = (1..=5)
            .filter_map(|id| index.component(ComponentId(id)))
            .collect();
        let verdict = Evaluator::new(&index).evaluate_build(&parts).unwrap();

        assert!(!verdict.overall_compatible);
        assert_eq!(verdict.status, Status::Red);
        let rules: Vec<_> = verdict.issues.iter().map(|i| i.rule.as_str()).collect();
        assert_eq!(rules, vec!["socket_match", "form_factor_match"]);
        assert_eq!(verdict.issues[0].component1, "Chip");
        assert_eq!(verdict.issues[0].component2, "Board");
        assert_eq!(verdict.issues[1].component1, "Board");
        assert_eq!(verdict.issues[1].component2, "Box");
        assert!(verdict.warnings.is_empty());
    }

    #[test]
    fn four_part_build_with_one_bad_pair() {
        let index = catalog(json!([
            {"id": 1, "source_id": 3, "target_id": 4, "condition": {"rule": "gpu_length_fit"}}
        ]));
        let mut card = index.component(ComponentId(3)).unwrap();
        card.specs = serde_json::from_value(json!({"length": 330})).unwrap();
        let parts = vec![
            index.component(ComponentId(1)).unwrap(),
            card,
            index.component(ComponentId(4)).unwrap(),
            index.component(ComponentId(5)).unwrap(),
        ];
        let verdict = Evaluator::new(&index).evaluate_build(&parts).unwrap();

        assert!(!verdict.overall_compatible);
        assert_eq!(verdict.status, Status::Red);
        assert_eq!(verdict.issues.len(), 1);
        assert!(verdict.warnings.is_empty());
        let issue = &verdict.issues[0];
        assert_eq!(issue.component1, "Card");
        assert_eq!(issue.component2, "Box");
        assert_eq!(issue.rule, "gpu_length_fit");
        assert_eq!(issue.message, "GPU too long: 330mm > 320mm");
    }

    #[test]
    fn build_with_one_component_is_green() {
        let index = catalog(standard_rules());
        let single: Vec<_> = index.component(ComponentId(1)).into_iter().collect();
        let verdict = Evaluator::new(&index).evaluate_build(&single).unwrap();
        assert!(verdict.overall_compatible);
        assert_eq!(verdict.status, Status::Green);
        assert!(verdict.issues.is_empty());
    }

    #[test]
    fn build_aborts_on_malformed_rule() {
        let index = catalog(json!([
            {"id": 1, "source_id": 3, "target_id": 4, "condition": {"rule": "gpu_length_fit"}},
            {"id": 2, "source_id": 1, "target_id": 5, "condition": "{"}
        ]));
        let parts: Vec<_> = (1..=5)
            .filter_map(|id| index.component(ComponentId(id)))
            .collect();
        let err = Evaluator::new(&index).evaluate_build(&parts).unwrap_err();
        assert!(matches!(err, CompatError::MalformedRule { .. }));
    }
}
