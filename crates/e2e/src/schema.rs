//! Expected-schema documents
//!
//! One JSON Schema file per validated response shape, loaded by name
//! from the crate's `schemas/` directory and handed to the validator
//! verbatim.

use serde_json::Value;
use std::path::PathBuf;

use crate::error::{ApiError, ApiResult};

/// Directory the schema documents ship in
pub fn schemas_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("schemas")
}

/// Load a schema document by file name, e.g. `"product_schema.json"`
pub fn load_json_schema(name: &str) -> ApiResult<Value> {
    let path = schemas_dir().join(name);
    let content = std::fs::read_to_string(&path).map_err(|e| ApiError::SchemaLoad {
        name: name.to_string(),
        reason: format!("{}: {}", path.display(), e),
    })?;
    serde_json::from_str(&content).map_err(|e| ApiError::SchemaLoad {
        name: name.to_string(),
        reason: e.to_string(),
    })
}
