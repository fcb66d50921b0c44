//! Catalog module for schema metadata.
//!
//! The catalog maps every known table to its ordered column list and is the
//! reference against which qualified field references are validated.

mod manager;
mod schema;

pub use manager::SchemaCatalog;
pub use schema::{SchemaError, TableSchema};
