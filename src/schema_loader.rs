//! JSON Schema validation for repository index files.
//!
//! The schema ships inside the binary so index files can be checked without
//! any repository layout on disk. YAML files are converted to JSON values
//! first, so both renderings go through the same validator.

use anyhow::{Result, anyhow, bail};
use jsonschema::JSONSchema;
use serde_json::Value;
use std::path::Path;

/// Embedded copy of `schema/repo_index.schema.json`.
pub const REPO_INDEX_SCHEMA: &str = include_str!("../schema/repo_index.schema.json");

/// Compile the embedded repository index schema.
pub(crate) fn compile_repo_index_schema() -> Result<JSONSchema> {
    let raw: Value = serde_json::from_str(REPO_INDEX_SCHEMA)
        .map_err(|err| anyhow!("parsing embedded repository index schema: {err}"))?;
    JSONSchema::compile(&raw)
        .map_err(|err| anyhow!("compiling embedded repository index schema: {err}"))
}

/// Validate an index document, reporting every violation at once.
pub(crate) fn validate_repo_index(value: &Value, source: &Path) -> Result<()> {
    let schema = compile_repo_index_schema()?;
    if let Err(errors) = schema.validate(value) {
        let details = errors
            .map(|err| format!("{} at '{}'", err, err.instance_path))
            .collect::<Vec<_>>()
            .join("\n");
        bail!(
            "repository index {} failed schema validation:\n{}",
            source.display(),
            details
        );
    }
    Ok(())
}
