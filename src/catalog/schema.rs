//! Table schema definitions and validation.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Table schema definition: a table name and its ordered column list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    /// Table name.
    pub name: String,
    /// Column names in declaration order.
    pub columns: Vec<String>,
}

impl TableSchema {
    /// Create a new table schema.
    pub fn new<I, S>(name: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    /// Check whether the table declares the given column. Case-sensitive.
    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Validate the schema itself.
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.columns.is_empty() {
            return Err(SchemaError::EmptyTable(self.name.clone()));
        }

        let mut seen = HashSet::new();
        for col in &self.columns {
            if !seen.insert(col.as_str()) {
                return Err(SchemaError::DuplicateColumn {
                    table: self.name.clone(),
                    column: col.clone(),
                });
            }
        }

        Ok(())
    }
}

/// Schema-related errors.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("duplicate column {column} in table {table}")]
    DuplicateColumn { table: String, column: String },

    #[error("duplicate table: {0}")]
    DuplicateTable(String),

    #[error("table has no columns: {0}")]
    EmptyTable(String),

    #[error("invalid catalog document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
