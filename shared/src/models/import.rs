//! Menu Import Report

use serde::{Deserialize, Serialize};

/// Outcome of one CSV data row (1-based, header excluded)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportRowResult {
    pub row: usize,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Bulk import result
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportReport {
    pub message: String,
    pub created: usize,
    pub failed: usize,
    pub rows: Vec<ImportRowResult>,
}
