//! Deserializable representation of a catalog document (`catalog/parts.json`).
//!
//! Row types mirror the catalog schema one-to-one. `CatalogIndex` validates and
//! joins them; the hydrated [`Component`] is what the compatibility engine
//! consumes.

use crate::catalog::identity::{
    BuildId, CategoryId, CategorySlug, ComponentId, RuleId, VendorId,
};
use crate::catalog::specs::Specs;
use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Deserialize)]
/// Full catalog as stored on disk.
pub struct CatalogDocument {
    pub schema_version: String,
    pub categories: Vec<Category>,
    pub vendors: Vec<Vendor>,
    pub components: Vec<ComponentRow>,
    #[serde(default)]
    pub rules: Vec<StoredRule>,
    #[serde(default)]
    pub builds: Vec<BuildRow>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: CategorySlug,
    #[serde(default)]
    pub icon: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Vendor {
    pub id: VendorId,
    pub name: String,
    pub website: String,
    #[serde(default)]
    pub logo: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
/// Component row as stored, before category and vendor are joined in.
pub struct ComponentRow {
    pub id: ComponentId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    pub category_id: CategoryId,
    pub vendor_id: VendorId,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub specs: Specs,
    #[serde(default = "default_stock")]
    pub stock: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
/// Component joined with its category and vendor.
///
/// This is the record the evaluator works on; the category slug decides which
/// role a component can play in a rule.
pub struct Component {
    pub id: ComponentId,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category_id: CategoryId,
    pub category_slug: CategorySlug,
    pub category_name: String,
    pub vendor_id: VendorId,
    pub vendor_name: String,
    #[serde(default)]
    pub specs: Specs,
    pub stock: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
/// Compatibility rule row between two categories.
///
/// `condition` holds the serialized payload exactly as stored; it is only
/// parsed when the rule store resolves rules for a pair, so a corrupt payload
/// fails the evaluation that needs it rather than the whole catalog load.
pub struct StoredRule {
    pub id: RuleId,
    pub source_id: CategoryId,
    pub target_id: CategoryId,
    #[serde(deserialize_with = "condition_payload")]
    pub condition: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct BuildRow {
    pub id: BuildId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_public")]
    pub is_public: bool,
    #[serde(default)]
    pub components: Vec<BuildEntry>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
/// One line of a build: a component and how many of it.
pub struct BuildEntry {
    pub component_id: ComponentId,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub notes: String,
}

#[derive(Clone, Debug, Serialize)]
/// Saved build with its entries, as returned by catalog lookups.
pub struct Build {
    pub id: BuildId,
    pub name: String,
    pub description: String,
    pub is_public: bool,
    pub components: Vec<BuildEntry>,
}

impl From<BuildRow> for Build {
    fn from(row: BuildRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            is_public: row.is_public,
            components: row.components,
        }
    }
}

impl Component {
    /// Join a stored row with its category and vendor.
    pub fn hydrate(row: &ComponentRow, category: &Category, vendor: &Vendor) -> Self {
        Self {
            id: row.id,
            name: row.name.clone(),
            description: row.description.clone(),
            price: row.price,
            category_id: category.id,
            category_slug: category.slug.clone(),
            category_name: category.name.clone(),
            vendor_id: vendor.id,
            vendor_name: vendor.name.clone(),
            specs: row.specs.clone(),
            stock: row.stock,
        }
    }

    pub fn is_in(&self, slug: &str) -> bool {
        self.category_slug.as_str() == slug
    }
}

fn default_stock() -> i64 {
    100
}

fn default_public() -> bool {
    true
}

fn default_quantity() -> u32 {
    1
}

// Accept both the stored text form and an inline object, normalizing to text.
fn condition_payload<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(text) => Ok(text),
        other => Ok(other.to_string()),
    }
}

/// Read and parse a catalog document from disk without additional validation.
pub fn load_catalog_from_path(path: &Path) -> Result<CatalogDocument> {
    let data =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let catalog: CatalogDocument = serde_json::from_str(&data)
        .with_context(|| format!("parsing catalog rows from {}", path.display()))?;
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn inline_condition_is_reserialized_to_text() {
        let rule: StoredRule = serde_json::from_value(json!({
            "id": 1,
            "source_id": 1,
            "target_id": 2,
            "condition": {"rule": "socket_match"}
        }))
        .unwrap();
        let parsed: Value = serde_json::from_str(&rule.condition).unwrap();
        assert_eq!(parsed, json!({"rule": "socket_match"}));
    }

    #[test]
    fn text_condition_is_kept_verbatim() {
        let rule: StoredRule = serde_json::from_value(json!({
            "id": 1,
            "source_id": 1,
            "target_id": 2,
            "condition": "{\"rule\": \"socket_match\""
        }))
        .unwrap();
        assert_eq!(rule.condition, "{\"rule\": \"socket_match\"");
    }

    #[test]
    fn build_entry_defaults() {
        let entry: BuildEntry = serde_json::from_value(json!({"component_id": 4})).unwrap();
        assert_eq!(entry.quantity, 1);
        assert!(entry.notes.is_empty());
    }
}
