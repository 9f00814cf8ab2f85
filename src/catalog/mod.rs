//! Parts catalog wiring.
//!
//! This module wraps the JSON catalog under `catalog/parts.json`: categories,
//! vendors, components with their open-ended specs, the compatibility rule
//! table, and saved builds. `CatalogIndex` loads a validated snapshot; the
//! compatibility engine only sees it through [`CatalogSource`].

pub mod identity;
pub mod index;
pub mod model;
pub mod repository;
pub mod specs;

pub use identity::{
    BuildId, CategoryId, CategorySlug, ComponentId, FormFactor, RuleId, RuleKind, VendorId,
};
pub use index::{CatalogIndex, DEFAULT_SCHEMA_VERSION};
pub use model::{
    Build, BuildEntry, CatalogDocument, Category, Component, ComponentRow, StoredRule, Vendor,
};
pub use repository::CatalogSource;
pub use specs::{Specs, display_number, display_value};

pub use model::load_catalog_from_path;
