//! Matrix decoding and canonicalization.

use crate::error::{ActionError, Result};
use serde_json::Value;

/// Decoded discovery result, ready for publication.
///
/// The schema is owned by the discovery tool; the value is carried
/// opaquely and only re-serialized here.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    value: Value,
}

impl Matrix {
    /// Decode the tool's stdout into a matrix value.
    ///
    /// Surrounding whitespace is trimmed first. When the document decodes
    /// to a bare JSON string, the tool is assumed to have double-encoded
    /// its result and that string's content is decoded once more. Exactly
    /// one unwrap pass is attempted; whatever the second pass yields is
    /// kept verbatim, so nesting beyond two levels surfaces as a string
    /// value.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        let value: Value = serde_json::from_str(trimmed).map_err(|e| ActionError::MatrixParse {
            reason: e.to_string(),
            raw: trimmed.to_string(),
        })?;

        let value = match value {
            Value::String(inner) => {
                serde_json::from_str(&inner).map_err(|e| ActionError::MatrixParse {
                    reason: format!("string-wrapped document: {e}"),
                    raw: inner.clone(),
                })?
            }
            other => other,
        };

        Ok(Self { value })
    }

    /// The decoded value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Compact single-encoded form, as published to the output channel.
    pub fn to_canonical(&self) -> String {
        self.value.to_string()
    }

    /// Pretty-printed form for the run report.
    pub fn to_pretty(&self) -> String {
        serde_json::to_string_pretty(&self.value).unwrap_or_else(|_| self.value.to_string())
    }
}
