//! Configuration for the correction loop

use serde::{Deserialize, Serialize};

/// Configuration for the correction loop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrectorConfig {
    /// Input that ends the loop (trimmed, case-insensitive)
    pub sentinel: String,

    /// Stop after this many interpretation calls; unbounded when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_edits: Option<usize>,
}

impl CorrectorConfig {
    /// Whether `command` is the termination sentinel
    pub fn is_sentinel(&self, command: &str) -> bool {
        command.trim().to_lowercase() == self.sentinel.trim().to_lowercase()
    }
}

impl Default for CorrectorConfig {
    fn default() -> Self {
        Self {
            sentinel: "ok".to_string(),
            max_edits: None,
        }
    }
}
