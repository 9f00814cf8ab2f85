//! Read-only data-access seam between the catalog and the compatibility engine.
//!
//! The evaluator never reaches for a global store: callers hand it something
//! implementing [`CatalogSource`], usually a loaded `CatalogIndex`. Tests and
//! alternative backends implement the same trait.

use crate::catalog::identity::{BuildId, CategoryId, CategorySlug, ComponentId};
use crate::catalog::model::{Build, Component, StoredRule};

pub trait CatalogSource {
    /// Hydrated component by id, or `None` when the id is not in the catalog.
    fn component(&self, id: ComponentId) -> Option<Component>;

    /// Resolve a category slug to its row id.
    fn category_id(&self, slug: &CategorySlug) -> Option<CategoryId>;

    /// Every stored rule in insertion order.
    fn stored_rules(&self) -> &[StoredRule];

    /// Saved build by id.
    fn build(&self, id: BuildId) -> Option<Build>;

    /// Rules stored between two categories in either direction, insertion
    /// order preserved.
    fn rules_for_category_ids(&self, first: CategoryId, second: CategoryId) -> Vec<&StoredRule> {
        self.stored_rules()
            .iter()
            .filter(|rule| {
                (rule.source_id == first && rule.target_id == second)
                    || (rule.source_id == second && rule.target_id == first)
            })
            .collect()
    }

    /// Hydrated components of a saved build in build order.
    ///
    /// Entries whose component no longer resolves are skipped; an unknown
    /// build yields an empty list.
    fn build_components(&self, id: BuildId) -> Vec<Component> {
        let Some(build) = self.build(id) else {
            return Vec::new();
        };
        build
            .components
            .iter()
            .filter_map(|entry| self.component(entry.component_id))
            .collect()
    }
}
