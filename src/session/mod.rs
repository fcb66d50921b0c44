//! High-level processing API.
//!
//! This module is the boundary the presentation layer talks to: it takes a
//! query string and returns either a [`QueryReport`] or one error message.

mod api;
mod report;

pub use api::{ProcessorConfig, QueryProcessor, SessionError, SessionResult};
pub use report::QueryReport;
