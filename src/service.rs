//! Request-facing compatibility operations.
//!
//! Wraps [`Evaluator`] with the argument checks a request handler needs:
//! missing ids are client errors, empty or unknown builds are not-found.
//! Every failure carries an [`ErrorClass`](crate::compat::ErrorClass) via
//! [`CompatError::class`].

use crate::catalog::{BuildId, CatalogSource, Component, ComponentId};
use crate::compat::{BuildVerdict, CompatError, Evaluator, Verdict};
use tracing::debug;

pub struct CompatibilityService<'a, S: ?Sized> {
    source: &'a S,
}

impl<'a, S: CatalogSource + ?Sized> CompatibilityService<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    pub fn check_pair_compatibility(
        &self,
        component1_id: Option<ComponentId>,
        component2_id: Option<ComponentId>,
    ) -> Result<Verdict, CompatError> {
        let first = component1_id.ok_or(CompatError::MissingComponentId {
            missing: "component1_id",
        })?;
        let second = component2_id.ok_or(CompatError::MissingComponentId {
            missing: "component2_id",
        })?;
        Evaluator::new(self.source).evaluate_pair_by_id(first, second)
    }

    pub fn check_build_compatibility(
        &self,
        components: &[Component],
    ) -> Result<BuildVerdict, CompatError> {
        if components.is_empty() {
            return Err(CompatError::EmptyBuild);
        }
        Evaluator::new(self.source).evaluate_build(components)
    }

    /// Check a stored build by id.
    pub fn check_saved_build(&self, build_id: BuildId) -> Result<BuildVerdict, CompatError> {
        if self.source.build(build_id).is_none() {
            return Err(CompatError::BuildNotFound(build_id));
        }
        let components = self.source.build_components(build_id);
        debug!(build = %build_id, components = components.len(), "saved build hydrated");
        self.check_build_compatibility(&components)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogDocument, CatalogIndex};
    use crate::compat::{ErrorClass, Status};
    use serde_json::json;

    fn catalog() -> CatalogIndex {
        let document: CatalogDocument = serde_json::from_value(json!({
            "schema_version": "rigcheck_catalog_v1",
            "categories": [
                {"id": 1, "name": "GPU", "slug": "gpu"},
                {"id": 2, "name": "Power Supply", "slug": "psu"}
            ],
            "vendors": [{"id": 1, "name": "Acme", "website": "https://acme.test"}],
            "components": [
                {"id": 1, "name": "Big Card", "price": 1599.99, "category_id": 1,
                 "vendor_id": 1, "specs": {"tdp": 450}},
                {"id": 2, "name": "Small PSU", "price": 69.99, "category_id": 2,
                 "vendor_id": 1, "specs": {"wattage": 600}}
            ],
            "rules": [
                {"id": 1, "source_id": 1, "target_id": 2,
                 "condition": "{\"rule\": \"power_requirement\"}"}
            ],
            "builds": [
                {"id": 1, "name": "hot", "components": [
                    {"component_id": 1}, {"component_id": 2}
                ]},
                {"id": 2, "name": "empty", "components": []}
            ]
        }))
        .unwrap();
        CatalogIndex::from_document(document).unwrap()
    }

    #[test]
    fn missing_pair_argument_is_a_client_error() {
        let index = catalog();
        let service = CompatibilityService::new(&index);
        let err = service
            .check_pair_compatibility(Some(ComponentId(1)), None)
            .unwrap_err();
        assert_eq!(err.class(), ErrorClass::ClientError);
        assert!(err.to_string().contains("component2_id"));
    }

    #[test]
    fn unknown_component_is_a_verdict_not_an_error() {
        let index = catalog();
        let verdict = CompatibilityService::new(&index)
            .check_pair_compatibility(Some(ComponentId(1)), Some(ComponentId(404)))
            .unwrap();
        assert_eq!(verdict.rule, "component_not_found");
        assert!(!verdict.compatible);
    }

    #[test]
    fn pair_check_reports_required_wattage() {
        let index = catalog();
        let verdict = CompatibilityService::new(&index)
            .check_pair_compatibility(Some(ComponentId(2)), Some(ComponentId(1)))
            .unwrap();
        assert_eq!(verdict.message, "PSU insufficient: 600W < 675W required");
    }

    #[test]
    fn empty_component_list_is_not_found() {
        let index = catalog();
        let err = CompatibilityService::new(&index)
            .check_build_compatibility(&[])
            .unwrap_err();
        assert!(matches!(err, CompatError::EmptyBuild));
        assert_eq!(err.class(), ErrorClass::NotFound);
    }

    #[test]
    fn saved_build_checks() {
        let index = catalog();
        let service = CompatibilityService::new(&index);

        let verdict = service.check_saved_build(BuildId(1)).unwrap();
        assert_eq!(verdict.status, Status::Red);
        assert_eq!(verdict.issues.len(), 1);
        assert_eq!(verdict.issues[0].component1, "Big Card");

        assert!(matches!(
            service.check_saved_build(BuildId(2)),
            Err(CompatError::EmptyBuild)
        ));
        let err = service.check_saved_build(BuildId(3)).unwrap_err();
        assert!(matches!(err, CompatError::BuildNotFound(BuildId(3))));
        assert_eq!(err.class(), ErrorClass::NotFound);
    }
}
