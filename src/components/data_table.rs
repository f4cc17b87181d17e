//! Data table component types.
//!
//! These types define the configuration for data tables in the admin panel.

use serde::{Deserialize, Serialize};

/// Column definition for a data table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableColumn {
    /// Unique key for the column.
    pub key: String,
    /// Display label for the column header.
    pub label: String,
}

impl TableColumn {
    /// Create a new column.
    #[must_use]
    pub fn new(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
        }
    }
}
