#![allow(dead_code)]

use anyhow::{Context, Result, bail};
use rigcheck::{CatalogIndex, default_catalog_path, find_repo_root};
use serde_json::{Value, json};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::NamedTempFile;

pub fn repo_root() -> PathBuf {
    find_repo_root().expect("tests require repository root")
}

pub fn repo_catalog_path() -> PathBuf {
    default_catalog_path(&repo_root())
}

pub fn repo_catalog() -> CatalogIndex {
    CatalogIndex::load(&repo_catalog_path()).expect("repository catalog loads")
}

/// Write `document` to a temp file and hand it back; the file lives as long as
/// the returned handle.
pub fn catalog_file(document: &Value) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new().context("creating temp catalog")?;
    serde_json::to_writer_pretty(&mut file, document)?;
    file.flush()?;
    Ok(file)
}

/// Small catalog with one rule per predicate family the tests need.
pub fn minimal_catalog() -> Value {
    json!({
        "schema_version": "rigcheck_catalog_v1",
        "categories": [
            {"id": 1, "name": "CPU", "slug": "cpu"},
            {"id": 2, "name": "Motherboard", "slug": "motherboard"},
            {"id": 3, "name": "Case", "slug": "case"}
        ],
        "vendors": [{"id": 1, "name": "Acme", "website": "https://acme.test"}],
        "components": [
            {"id": 1, "name": "Acme CPU", "price": 100.0, "category_id": 1, "vendor_id": 1,
             "specs": {"socket": "AM5"}},
            {"id": 2, "name": "Acme Board", "price": 100.0, "category_id": 2, "vendor_id": 1,
             "specs": {"socket": "AM5", "form_factor": "ITX"}},
            {"id": 3, "name": "Acme Case", "price": 50.0, "category_id": 3, "vendor_id": 1,
             "specs": {"form_factor": "ITX"}}
        ],
        "rules": [
            {"id": 1, "source_id": 1, "target_id": 2,
             "condition": {"rule": "socket_match", "description": "sockets"}},
            {"id": 2, "source_id": 2, "target_id": 3,
             "condition": "{\"rule\": \"form_factor_match\"}"}
        ],
        "builds": [
            {"id": 1, "name": "tiny", "components": [
                {"component_id": 1}, {"component_id": 2}, {"component_id": 3}
            ]}
        ]
    })
}

/// Run a built binary and return its output without judging the exit status.
pub fn run_binary(path: &str, args: &[&str], catalog: &Path) -> Result<Output> {
    Command::new(path)
        .args(args)
        .arg("--catalog")
        .arg(catalog)
        .env_remove("RIGCHECK_LOG")
        .output()
        .with_context(|| format!("failed to run {path}"))
}

pub fn stdout_json(output: &Output) -> Result<Value> {
    if output.stdout.is_empty() {
        bail!(
            "no stdout (status {:?})\nstderr: {}",
            output.status.code(),
            String::from_utf8_lossy(&output.stderr)
        );
    }
    serde_json::from_slice(&output.stdout).context("stdout is not JSON")
}
