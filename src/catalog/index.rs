//! Indexed, validated view of a catalog document.
//!
//! Loading is strict: the raw JSON must satisfy the catalog schema, ids and
//! slugs must be unique, and every cross-reference (component → category,
//! component → vendor, rule → category, build → component) must resolve. The
//! index then answers the read operations the compatibility engine and the
//! catalog CLI need.

use crate::catalog::identity::{
    BuildId, CategoryId, CategorySlug, ComponentId, VendorId,
};
use crate::catalog::model::{
    Build, CatalogDocument, Category, Component, StoredRule, Vendor, load_catalog_from_path,
};
use crate::catalog::repository::CatalogSource;
use crate::schema_loader::{SchemaLoadOptions, is_version_token, load_json_schema};
use anyhow::{Context, Result, bail};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const DEFAULT_SCHEMA_VERSION: &str = "rigcheck_catalog_v1";
const SCHEMA_RELATIVE_PATH: &str = "schema/catalog.schema.json";

#[derive(Debug)]
/// Catalog rows plus derived lookups keyed by id and slug.
pub struct CatalogIndex {
    schema_version: String,
    categories: BTreeMap<CategoryId, Category>,
    category_by_slug: BTreeMap<CategorySlug, CategoryId>,
    vendors: BTreeMap<VendorId, Vendor>,
    components: BTreeMap<ComponentId, Component>,
    rules: Vec<StoredRule>,
    builds: BTreeMap<BuildId, Build>,
}

impl CatalogIndex {
    /// Load, schema-check, and index a catalog file.
    pub fn load(path: &Path) -> Result<Self> {
        validate_against_schema(path)?;

        let document = load_catalog_from_path(path)
            .with_context(|| format!("loading {}", path.display()))?;
        let index = Self::from_document(document)
            .with_context(|| format!("indexing {}", path.display()))?;

        info!(
            catalog = %path.display(),
            categories = index.categories.len(),
            components = index.components.len(),
            rules = index.rules.len(),
            builds = index.builds.len(),
            "catalog loaded"
        );
        Ok(index)
    }

    /// Index an already-parsed document, enforcing referential integrity.
    ///
    /// Skips JSON Schema validation; `load` runs that against the raw file.
    pub fn from_document(document: CatalogDocument) -> Result<Self> {
        validate_schema_version(&document.schema_version)?;

        let mut categories = BTreeMap::new();
        let mut category_by_slug = BTreeMap::new();
        for category in document.categories {
            if category.slug.as_str().trim().is_empty() {
                bail!("category {} has an empty slug", category.id.0);
            }
            if category_by_slug.contains_key(&category.slug) {
                bail!("duplicate category slug '{}'", category.slug);
            }
            if categories.contains_key(&category.id) {
                bail!("duplicate category id {}", category.id.0);
            }
            category_by_slug.insert(category.slug.clone(), category.id);
            categories.insert(category.id, category);
        }

        let mut vendors = BTreeMap::new();
        for vendor in document.vendors {
            if vendors.contains_key(&vendor.id) {
                bail!("duplicate vendor id {}", vendor.id.0);
            }
            vendors.insert(vendor.id, vendor);
        }

        let mut components = BTreeMap::new();
        for row in &document.components {
            if components.contains_key(&row.id) {
                bail!("duplicate component id {}", row.id);
            }
            if row.price.is_nan() || row.price < 0.0 {
                bail!("component {} has a negative or invalid price", row.id);
            }
            let Some(category) = categories.get(&row.category_id) else {
                bail!(
                    "component {} references unknown category {}",
                    row.id,
                    row.category_id.0
                );
            };
            let Some(vendor) = vendors.get(&row.vendor_id) else {
                bail!(
                    "component {} references unknown vendor {}",
                    row.id,
                    row.vendor_id.0
                );
            };
            components.insert(row.id, Component::hydrate(row, category, vendor));
        }

        let mut rule_ids = BTreeSet::new();
        for rule in &document.rules {
            if !rule_ids.insert(rule.id) {
                bail!("duplicate rule id {}", rule.id);
            }
            for endpoint in [rule.source_id, rule.target_id] {
                if !categories.contains_key(&endpoint) {
                    bail!(
                        "rule {} references unknown category {}",
                        rule.id,
                        endpoint.0
                    );
                }
            }
        }

        let mut builds = BTreeMap::new();
        for row in document.builds {
            if builds.contains_key(&row.id) {
                bail!("duplicate build id {}", row.id);
            }
            let mut seen = BTreeSet::new();
            for entry in &row.components {
                if !components.contains_key(&entry.component_id) {
                    bail!(
                        "build {} references unknown component {}",
                        row.id,
                        entry.component_id
                    );
                }
                if entry.quantity == 0 {
                    bail!(
                        "build {} lists component {} with quantity 0",
                        row.id,
                        entry.component_id
                    );
                }
                if !seen.insert(entry.component_id) {
                    bail!(
                        "build {} lists component {} more than once",
                        row.id,
                        entry.component_id
                    );
                }
            }
            builds.insert(row.id, Build::from(row));
        }

        Ok(Self {
            schema_version: document.schema_version,
            categories,
            category_by_slug,
            vendors,
            components,
            rules: document.rules,
            builds,
        })
    }

    pub fn schema_version(&self) -> &str {
        &self.schema_version
    }

    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.categories.values()
    }

    pub fn category_by_slug(&self, slug: &CategorySlug) -> Option<&Category> {
        self.category_by_slug
            .get(slug)
            .and_then(|id| self.categories.get(id))
    }

    pub fn vendors(&self) -> impl Iterator<Item = &Vendor> {
        self.vendors.values()
    }

    /// Components in id order.
    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.components.values()
    }

    pub fn component_ref(&self, id: ComponentId) -> Option<&Component> {
        self.components.get(&id)
    }

    pub fn components_in_category<'a>(
        &'a self,
        slug: &'a CategorySlug,
    ) -> impl Iterator<Item = &'a Component> + 'a {
        self.components
            .values()
            .filter(move |component| &component.category_slug == slug)
    }

    /// Case-insensitive substring match on component names.
    pub fn search(&self, term: &str) -> Vec<&Component> {
        let needle = term.trim().to_lowercase();
        self.components
            .values()
            .filter(|component| component.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Components priced within `[min, max]`.
    pub fn components_in_price_range(&self, min: f64, max: f64) -> Vec<&Component> {
        self.components
            .values()
            .filter(|component| component.price >= min && component.price <= max)
            .collect()
    }

    /// Sum of price × quantity over a build, rounded to cents.
    pub fn build_total_price(&self, id: BuildId) -> Option<f64> {
        let build = self.builds.get(&id)?;
        let total: f64 = build
            .components
            .iter()
            .filter_map(|entry| {
                self.components
                    .get(&entry.component_id)
                    .map(|component| component.price * f64::from(entry.quantity))
            })
            .sum();
        Some((total * 100.0).round() / 100.0)
    }

    pub fn builds(&self) -> impl Iterator<Item = &Build> {
        self.builds.values()
    }
}

impl CatalogSource for CatalogIndex {
    fn component(&self, id: ComponentId) -> Option<Component> {
        let found = self.components.get(&id).cloned();
        if found.is_none() {
            debug!(component = %id, "component not in catalog");
        }
        found
    }

    fn category_id(&self, slug: &CategorySlug) -> Option<CategoryId> {
        self.category_by_slug.get(slug).copied()
    }

    fn stored_rules(&self) -> &[StoredRule] {
        &self.rules
    }

    fn build(&self, id: BuildId) -> Option<Build> {
        self.builds.get(&id).cloned()
    }
}

fn validate_schema_version(schema_version: &str) -> Result<()> {
    if !is_version_token(schema_version) {
        bail!(
            "schema_version must match ^[A-Za-z0-9_.-]+$, got '{}'",
            schema_version
        );
    }

    let allowed = allowed_schema_versions();
    if !allowed.contains(schema_version) {
        bail!(
            "schema_version '{}' not in allowed set {:?}",
            schema_version,
            allowed
        );
    }
    Ok(())
}

fn allowed_schema_versions() -> BTreeSet<String> {
    BTreeSet::from_iter([DEFAULT_SCHEMA_VERSION.to_string()])
}

fn validate_against_schema(catalog_path: &Path) -> Result<()> {
    let catalog_file = File::open(catalog_path)
        .with_context(|| format!("opening catalog {}", catalog_path.display()))?;
    let catalog_value: Value = serde_json::from_reader(BufReader::new(catalog_file))
        .with_context(|| format!("parsing catalog {}", catalog_path.display()))?;

    let schema_path = resolve_catalog_schema_path(catalog_path);
    let allowed = allowed_schema_versions();
    let schema = load_json_schema(
        &schema_path,
        SchemaLoadOptions {
            allowed_versions: Some(&allowed),
            ..Default::default()
        },
    )
    .with_context(|| format!("loading catalog schema {}", schema_path.display()))?;
    debug!(
        schema = %schema_path.display(),
        version = %schema.schema_version,
        "catalog schema compiled"
    );

    if let Err(errors) = schema.compiled.validate(&catalog_value) {
        let details = errors
            .map(|err| err.to_string())
            .collect::<Vec<_>>()
            .join("\n");
        bail!(
            "catalog {} failed schema validation:\n{}",
            catalog_path.display(),
            details
        );
    }
    Ok(())
}

/// Prefer a schema shipped next to the catalog (`<root>/schema/`), falling
/// back to the copy in this crate.
fn resolve_catalog_schema_path(catalog_path: &Path) -> PathBuf {
    if let Some(base) = catalog_path.parent().and_then(|p| p.parent()) {
        let candidate = base.join(SCHEMA_RELATIVE_PATH);
        if candidate.exists() {
            return candidate;
        }
    }

    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(SCHEMA_RELATIVE_PATH)
}
