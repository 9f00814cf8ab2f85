//! Shared library for the rigcheck PC-build compatibility tools.
//!
//! The crate exposes the parts catalog (typed rows, a validated in-memory
//! index, and the `CatalogSource` read seam), the compatibility engine (rule
//! lookup, the six predicates, pair and build evaluation), and a small
//! request-facing service. Public functions here form the contract the
//! binaries depend on: repository discovery, catalog path resolution, and list
//! parsing.

use anyhow::{Result, bail};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

pub mod catalog;
pub mod compat;
pub mod runtime;
pub mod service;

mod schema_loader;

pub use catalog::{
    Build, BuildId, CatalogIndex, CatalogSource, Category, CategoryId, CategorySlug, Component,
    ComponentId, FormFactor, RuleKind, Specs, Vendor, load_catalog_from_path,
};
pub use compat::{
    BuildVerdict, CompatError, ErrorClass, Evaluator, PairFinding, RuleCondition, Status, Verdict,
};
pub use service::CompatibilityService;

const CATALOG_RELATIVE_PATH: &str = "catalog/parts.json";
const SCHEMA_SENTINEL: &str = "schema/catalog.schema.json";

/// Returns true when `candidate` holds both the catalog and its schema.
fn is_repo_root(candidate: &Path) -> bool {
    candidate.join(CATALOG_RELATIVE_PATH).is_file() && candidate.join(SCHEMA_SENTINEL).is_file()
}

fn repo_root_from_hint(hint: &str) -> Option<PathBuf> {
    if hint.is_empty() {
        return None;
    }
    let hint_path = PathBuf::from(hint);
    if !hint_path.exists() || !is_repo_root(&hint_path) {
        return None;
    }
    fs::canonicalize(hint_path).ok()
}

fn search_upwards(start: &Path) -> Option<PathBuf> {
    let mut dir = fs::canonicalize(start).ok()?;
    loop {
        if is_repo_root(&dir) {
            return Some(dir);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}

/// Locate the repository root.
///
/// Honors `RIGCHECK_ROOT` if it points at a real checkout, then climbs up from
/// the current executable, then uses the build-time hint.
pub fn find_repo_root() -> Result<PathBuf> {
    if let Some(env_root) = runtime::env_value(runtime::ROOT_ENV) {
        if let Some(root) = repo_root_from_hint(&env_root) {
            return Ok(root);
        }
    }

    if let Ok(exe_path) = env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            if let Some(root) = search_upwards(exe_dir) {
                return Ok(root);
            }
        }
    }

    if let Some(hint) = option_env!("RIGCHECK_ROOT_HINT") {
        if let Some(root) = repo_root_from_hint(hint) {
            return Ok(root);
        }
    }

    bail!(
        "Unable to locate the rigcheck repository root. Set {} to the checkout or {} to a catalog file.",
        runtime::ROOT_ENV,
        runtime::CATALOG_ENV
    );
}

pub fn default_catalog_path(repo_root: &Path) -> PathBuf {
    repo_root.join(CATALOG_RELATIVE_PATH)
}

/// Catalog file to load: explicit path, then `RIGCHECK_CATALOG`, then the
/// repository default.
pub fn resolve_catalog_path(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    if let Some(path) = runtime::env_value(runtime::CATALOG_ENV) {
        return Ok(PathBuf::from(path));
    }
    Ok(default_catalog_path(&find_repo_root()?))
}

/// Split comma- or whitespace-delimited lists into tokens.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .replace(',', " ")
        .split_whitespace()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
