//! JSON Schema loading for catalog documents.
//!
//! Reads a schema file, pins its `schema_version` const against an allowed
//! set, and compiles a validator.

use anyhow::{Context, Result, anyhow, bail};
use jsonschema::JSONSchema;
use serde_json::Value;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub(crate) struct SchemaLoadResult {
    pub schema_version: String,
    pub compiled: JSONSchema,
}

pub(crate) struct SchemaLoadOptions<'a> {
    /// Where to find the schema_version const inside the schema payload.
    pub schema_version_pointer: &'a str,
    /// Allowed schema_version values; enforced when present.
    pub allowed_versions: Option<&'a BTreeSet<String>>,
}

impl Default for SchemaLoadOptions<'_> {
    fn default() -> Self {
        Self {
            schema_version_pointer: "/properties/schema_version/const",
            allowed_versions: None,
        }
    }
}

pub(crate) fn load_json_schema(
    path: &Path,
    options: SchemaLoadOptions<'_>,
) -> Result<SchemaLoadResult> {
    let file = File::open(path).with_context(|| format!("opening schema {}", path.display()))?;
    let schema: Value = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing schema {}", path.display()))?;

    let schema_version = extract_schema_version(&schema, options.schema_version_pointer)
        .ok_or_else(|| anyhow!("schema {} missing schema_version const", path.display()))?;

    if let Some(allowed) = options.allowed_versions {
        if !allowed.contains(&schema_version) {
            bail!(
                "schema_version '{}' not in allowed set {:?}",
                schema_version,
                allowed
            );
        }
    }

    // Compile errors borrow the schema, so flatten them to text before
    // handing them to anyhow.
    let compiled = JSONSchema::compile(&schema)
        .map_err(|err| anyhow!("compiling schema {}: {err}", path.display()))?;

    Ok(SchemaLoadResult {
        schema_version,
        compiled,
    })
}

pub(crate) fn extract_schema_version(schema: &Value, pointer: &str) -> Option<String> {
    let version = schema.pointer(pointer).and_then(Value::as_str)?;
    if is_version_token(version) {
        Some(version.to_string())
    } else {
        None
    }
}

pub(crate) fn is_version_token(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::NamedTempFile;

    fn schema_file(schema: Value) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        serde_json::to_writer(&mut file, &schema).unwrap();
        file
    }

    #[test]
    fn reads_version_from_const() {
        let file = schema_file(json!({
            "type": "object",
            "properties": {"schema_version": {"const": "demo_v1"}}
        }));
        let loaded = load_json_schema(file.path(), SchemaLoadOptions::default()).unwrap();
        assert_eq!(loaded.schema_version, "demo_v1");
        assert!(loaded.compiled.is_valid(&json!({"schema_version": "demo_v1"})));
        assert!(!loaded.compiled.is_valid(&json!({"schema_version": "demo_v2"})));
    }

    #[test]
    fn rejects_version_outside_allowed_set() {
        let file = schema_file(json!({
            "properties": {"schema_version": {"const": "demo_v1"}}
        }));
        let allowed = BTreeSet::from(["other_v1".to_string()]);
        let err = load_json_schema(
            file.path(),
            SchemaLoadOptions {
                allowed_versions: Some(&allowed),
                ..Default::default()
            },
        )
        .err()
        .expect("version outside allowed set should fail");
        assert!(err.to_string().contains("demo_v1"));
    }

    #[test]
    fn version_tokens_are_restricted() {
        assert!(is_version_token("rigcheck_catalog_v1"));
        assert!(!is_version_token("bad version"));
        assert!(!is_version_token(""));
    }
}
