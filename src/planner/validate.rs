//! Alias resolution and reference validation.
//!
//! Every SELECT field and every `alias.column` pattern found in the WHERE
//! text must resolve through the alias map to a column of the catalog.
//! JOIN conditions are not checked.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

use super::error::{PlanError, PlanResult};
use crate::catalog::SchemaCatalog;
use crate::sql::ParsedQuery;

/// Qualified-reference pattern used to scan WHERE text. This is textual:
/// it also matches inside string literals.
static QUALIFIED_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z_]+\.[A-Za-z_]+").expect("valid reference pattern"));

/// Mapping of alias to table name for one query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasMap {
    aliases: HashMap<String, String>,
}

impl AliasMap {
    /// Bind the FROM alias, then every JOIN alias in order.
    ///
    /// A rebound alias keeps its last table unless `strict` is set, in which
    /// case the second binding fails with [`PlanError::DuplicateAlias`].
    pub fn from_query(query: &ParsedQuery, strict: bool) -> PlanResult<Self> {
        let mut aliases = HashMap::new();
        for (alias, table) in query.bindings() {
            if let Some(previous) = aliases.insert(alias.to_string(), table.to_string()) {
                if strict {
                    return Err(PlanError::DuplicateAlias(alias.to_string()));
                }
                warn!(alias, previous = %previous, table, "alias rebound, last binding wins");
            }
        }
        Ok(Self { aliases })
    }

    /// Table bound to `alias`.
    pub fn resolve(&self, alias: &str) -> Option<&str> {
        self.aliases.get(alias).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

/// Every substring of `text` shaped like `identifier.identifier`.
pub fn qualified_references(text: &str) -> impl Iterator<Item = &str> {
    QUALIFIED_REF.find_iter(text).map(|m| m.as_str())
}

/// Checks qualified references against a schema catalog.
pub struct ReferenceValidator<'a> {
    catalog: &'a SchemaCatalog,
    strict_aliases: bool,
}

impl<'a> ReferenceValidator<'a> {
    pub fn new(catalog: &'a SchemaCatalog) -> Self {
        Self {
            catalog,
            strict_aliases: false,
        }
    }

    /// Reject alias collisions instead of letting the last binding win.
    pub fn strict_aliases(mut self, value: bool) -> Self {
        self.strict_aliases = value;
        self
    }

    /// Validate SELECT and WHERE references, stopping at the first failure.
    /// Returns the alias map the references were resolved against.
    pub fn validate(&self, query: &ParsedQuery) -> PlanResult<AliasMap> {
        let aliases = AliasMap::from_query(query, self.strict_aliases)?;

        for field in &query.select {
            self.check_reference(&aliases, field)?;
        }

        if let Some(condition) = &query.where_clause {
            for reference in qualified_references(condition) {
                self.check_reference(&aliases, reference)?;
            }
        }

        Ok(aliases)
    }

    fn check_reference(&self, aliases: &AliasMap, field: &str) -> PlanResult<()> {
        let (alias, column) = field
            .split_once('.')
            .filter(|(_, column)| !column.contains('.'))
            .ok_or_else(|| PlanError::MalformedField(field.to_string()))?;

        match aliases.resolve(alias) {
            Some(table) if self.catalog.has_column(table, column) => Ok(()),
            _ => Err(PlanError::InvalidField(field.to_string())),
        }
    }
}
