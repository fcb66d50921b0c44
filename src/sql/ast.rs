//! Clause-level representation of a parsed query.
//!
//! The extractor does not build an expression tree. Field lists and
//! conditions are kept as the text the user wrote.

use serde::{Deserialize, Serialize};

/// A table introduced by FROM or JOIN, with the alias it is bound to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRef {
    pub table: String,
    /// Defaults to the table name when no alias is written.
    pub alias: String,
}

impl TableRef {
    pub fn new(table: impl Into<String>, alias: Option<String>) -> Self {
        let table = table.into();
        let alias = alias.unwrap_or_else(|| table.clone());
        Self { table, alias }
    }
}

/// A `JOIN <table> [alias] ON <condition>` clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Join {
    pub table: String,
    pub alias: String,
    /// Condition text after ON, trimmed.
    pub condition: String,
}

impl Join {
    pub fn new(
        table: impl Into<String>,
        alias: Option<String>,
        condition: impl Into<String>,
    ) -> Self {
        let TableRef { table, alias } = TableRef::new(table, alias);
        Self {
            table,
            alias,
            condition: condition.into(),
        }
    }
}

/// The clause set extracted from one query string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedQuery {
    /// SELECT fields in textual order; duplicates are kept.
    pub select: Vec<String>,
    pub from: TableRef,
    /// JOIN clauses in left-to-right order.
    pub joins: Vec<Join>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub where_clause: Option<String>,
}

impl ParsedQuery {
    /// Every table binding in scope order: FROM first, then each JOIN.
    pub fn bindings(&self) -> impl Iterator<Item = (&str, &str)> {
        std::iter::once((self.from.alias.as_str(), self.from.table.as_str())).chain(
            self.joins
                .iter()
                .map(|j| (j.alias.as_str(), j.table.as_str())),
        )
    }
}
