//! Contract ABI loading.
//!
//! The ABI is opaque configuration: it is parsed only far enough to know it
//! is a JSON array, then handed to the connector unmodified.

use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::error::{DappError, DappResult};

/// Read and parse the ABI file at `path`.
pub fn load_abi(path: &Path) -> DappResult<Value> {
    let data = fs::read_to_string(path)?;
    let abi = parse_abi(&data)?;
    debug!(
        path = %path.display(),
        entries = abi.as_array().map_or(0, Vec::len),
        "Loaded contract ABI"
    );
    Ok(abi)
}

pub fn parse_abi(data: &str) -> DappResult<Value> {
    let abi: Value = serde_json::from_str(data)?;
    if !abi.is_array() {
        return Err(DappError::InvalidAbi("expected a JSON array".to_string()));
    }
    Ok(abi)
}

/// Whether the ABI declares a function called `method`.
pub fn has_function(abi: &Value, method: &str) -> bool {
    abi.as_array()
        .map(|entries| {
            entries.iter().any(|entry| {
                entry.get("type").and_then(Value::as_str).unwrap_or("function") == "function"
                    && entry.get("name").and_then(Value::as_str) == Some(method)
            })
        })
        .unwrap_or(false)
}
