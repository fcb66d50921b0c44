//! Query processor - the boundary between callers and the planning pipeline.

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use super::report::QueryReport;
use crate::catalog::{SchemaCatalog, SchemaError};
use crate::planner::{PlanError, PlannerConfig, QueryPlanner};
use crate::sql::ParseError;

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Session errors. The message is meant to be shown to the user verbatim.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Plan(#[from] PlanError),

    #[error("catalog error: {0}")]
    Schema(#[from] SchemaError),
}

/// Processor configuration options.
#[derive(Debug, Clone, Default)]
pub struct ProcessorConfig {
    /// JSON catalog file; the built-in store schema is used when absent.
    pub catalog_path: Option<PathBuf>,
    pub planner: PlannerConfig,
}

impl ProcessorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the schema catalog from a JSON file.
    pub fn catalog_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalog_path = Some(path.into());
        self
    }

    /// Set strict_aliases flag.
    pub fn strict_aliases(mut self, value: bool) -> Self {
        self.planner.strict_aliases = value;
        self
    }
}

/// Processes query strings into reports. Holds no per-query state.
pub struct QueryProcessor {
    planner: QueryPlanner,
}

impl QueryProcessor {
    /// Create a processor over the given catalog with default options.
    pub fn new(catalog: Arc<SchemaCatalog>) -> Self {
        Self {
            planner: QueryPlanner::new(catalog),
        }
    }

    /// Create a processor from configuration, loading the catalog if a path
    /// is given.
    pub fn open(config: ProcessorConfig) -> SessionResult<Self> {
        let catalog = match &config.catalog_path {
            Some(path) => SchemaCatalog::from_path(path)?,
            None => SchemaCatalog::ecommerce(),
        };
        Ok(Self {
            planner: QueryPlanner::with_config(Arc::new(catalog), config.planner),
        })
    }

    pub fn planner(&self) -> &QueryPlanner {
        &self.planner
    }

    /// Run the full pipeline on one query.
    pub fn process(&self, sql: &str) -> SessionResult<QueryReport> {
        let sql = sql.trim();
        if sql.is_empty() {
            return Err(SessionError::Parse(ParseError::EmptyQuery));
        }

        debug!(len = sql.len(), "processing query");
        let plan = self.planner.plan(sql)?;
        Ok(QueryReport::new(sql, &plan))
    }
}

impl Default for QueryProcessor {
    fn default() -> Self {
        Self::new(Arc::new(SchemaCatalog::ecommerce()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_query_rejected_at_boundary() {
        let processor = QueryProcessor::default();
        let err = processor.process("   \n  ").unwrap_err();
        assert!(matches!(err, SessionError::Parse(ParseError::EmptyQuery)));
        assert_eq!(err.to_string(), "empty query");
    }

    #[test]
    fn test_semicolon_is_not_blank_input() {
        let processor = QueryProcessor::default();
        let err = processor.process(" ; ").unwrap_err();
        assert_eq!(err.to_string(), "missing or invalid SELECT clause");

        let report = processor
            .process("SELECT p.Nome FROM Produto p WHERE p.Preco > 1;")
            .unwrap();
        assert_eq!(report.algebra, "π p.Nome (σ p.Preco > 1; (p))");
    }

    #[test]
    fn test_error_message_names_field() {
        let processor = QueryProcessor::default();
        let err = processor
            .process("SELECT p.Nome FROM Produto p WHERE p.Invalido = 1")
            .unwrap_err();
        assert_eq!(err.to_string(), "invalid field: p.Invalido");
    }

    #[test]
    fn test_original_query_is_trimmed_echo() {
        let processor = QueryProcessor::default();
        let report = processor.process("\n  SELECT x.Nome FROM Produto x  \n").unwrap();
        assert_eq!(report.query, "SELECT x.Nome FROM Produto x");
    }

    #[test]
    fn test_open_with_catalog_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"tables": [{"name": "users", "columns": ["id", "name"]}]}"#)
            .unwrap();

        let processor = QueryProcessor::open(ProcessorConfig::new().catalog_path(file.path())).unwrap();
        let report = processor.process("SELECT u.name FROM users u").unwrap();
        assert_eq!(report.algebra, "π u.name (u)");
    }

    #[test]
    fn test_open_with_bad_catalog_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"not json").unwrap();

        let result = QueryProcessor::open(ProcessorConfig::new().catalog_path(file.path()));
        assert!(matches!(result, Err(SessionError::Schema(SchemaError::Json(_)))));
    }

    #[test]
    fn test_open_strict_aliases() {
        let processor = QueryProcessor::open(ProcessorConfig::new().strict_aliases(true)).unwrap();
        let err = processor
            .process("SELECT p.Nome FROM Produto p JOIN Categoria p ON p.a = p.b")
            .unwrap_err();
        assert_eq!(err.to_string(), "duplicate alias: p");
    }
}
