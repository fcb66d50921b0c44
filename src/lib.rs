//! relplan - a query-plan compiler for a small SQL subset
//!
//! Turns `SELECT ... FROM ... [JOIN ... ON ...]* [WHERE ...]` text into a
//! validated clause set, a relational-algebra expression and a logical
//! operator graph with a post-order execution plan. Nothing is executed;
//! the plan is symbolic.
//!
//! # Example
//!
//! ```
//! use relplan::session::QueryProcessor;
//!
//! let processor = QueryProcessor::default();
//! let report = processor.process("SELECT x.Nome FROM Produto x").unwrap();
//! assert_eq!(report.algebra, "π x.Nome (x)");
//! ```

pub mod catalog;
pub mod planner;
pub mod session;
pub mod sql;
