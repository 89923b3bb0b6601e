// src/store/payload.rs
// =============================================================================
// JSON request bodies loaded from disk.
//
// A payload is sent to the store as-is. The only change we ever make is
// adding "return": true when the user asked for the affected rows back.
// =============================================================================

use crate::error::{RbError, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct Payload {
    path: PathBuf,
    value: Value,
}

impl Payload {
    // Reads and parses a payload file
    //
    // Errors:
    //   InvalidPath if the file is missing, InvalidPayload if it is not JSON
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(RbError::InvalidPath(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;
        let value = serde_json::from_str(&content).map_err(|e| RbError::InvalidPayload {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            value,
        })
    }

    /// Adds `"return": true` so the store echoes the affected rows
    pub fn request_returned_rows(&mut self) -> Result<()> {
        match self.value.as_object_mut() {
            Some(object) => {
                object.insert("return".to_string(), Value::Bool(true));
                Ok(())
            }
            None => Err(RbError::InvalidPayload {
                path: self.path.clone(),
                reason: "a JSON object is required to request returned rows".to_string(),
            }),
        }
    }

    pub fn into_value(self) -> Value {
        self.value
    }
}
