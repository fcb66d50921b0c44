//! SQL clause extraction for the supported query subset.
//!
//! Queries have the shape
//! `SELECT <fields> FROM <table> [alias] [JOIN <table> [alias] ON <cond>]* [WHERE <cond>]`.
//! A small token cursor splits them into clauses; conditions stay as text.

mod ast;
mod error;
mod lexer;
mod parser;

pub use ast::{Join, ParsedQuery, TableRef};
pub use error::{ParseError, ParseResult};
pub use parser::Parser;
