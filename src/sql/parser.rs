//! Clause extractor.
//!
//! Splits query text into SELECT fields, the FROM binding, JOIN clauses and
//! the WHERE condition. Steps run in that fixed order; JOIN and WHERE
//! scanning start after the FROM binding.

use tracing::{debug, warn};

use super::ast::{Join, ParsedQuery, TableRef};
use super::error::{ParseError, ParseResult};
use super::lexer::{tokenize, Token, TokenKind};

/// Words that can never be taken as a table name or alias.
const RESERVED: &[&str] = &[
    "SELECT", "FROM", "JOIN", "ON", "WHERE", "GROUP", "ORDER", "INNER", "LEFT", "RIGHT", "FULL",
    "OUTER", "CROSS", "AS",
];

/// Keywords that end a JOIN condition.
const JOIN_TERMINATORS: &[&str] = &["JOIN", "WHERE", "GROUP", "ORDER"];

/// SQL clause extractor.
pub struct Parser;

impl Parser {
    /// Extract the clause set of a query.
    pub fn parse(sql: &str) -> ParseResult<ParsedQuery> {
        let sql = sql.trim();
        if sql.is_empty() {
            return Err(ParseError::EmptyQuery);
        }

        let cursor = ClauseCursor::new(sql);
        let (select, from_keyword) = cursor.extract_select()?;
        let (from, after_from) = cursor.extract_from(from_keyword)?;
        let joins = cursor.extract_joins(after_from);
        let where_clause = cursor.extract_where(after_from);

        debug!(
            fields = select.len(),
            joins = joins.len(),
            has_where = where_clause.is_some(),
            "extracted clauses"
        );

        Ok(ParsedQuery {
            select,
            from,
            joins,
            where_clause,
        })
    }
}

fn missing(clause: &str) -> ParseError {
    ParseError::MissingClause(clause.to_string())
}

/// Token cursor over one query string.
struct ClauseCursor<'a> {
    src: &'a str,
    tokens: Vec<Token>,
}

impl<'a> ClauseCursor<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            tokens: tokenize(src),
        }
    }

    /// Index of the first `keyword` token at or after `start`.
    fn find_keyword(&self, start: usize, keyword: &str) -> Option<usize> {
        (start..self.tokens.len()).find(|&i| self.tokens[i].is_keyword(self.src, keyword))
    }

    fn is_any_keyword(&self, index: usize, keywords: &[&str]) -> bool {
        keywords
            .iter()
            .any(|kw| self.tokens[index].is_keyword(self.src, kw))
    }

    /// A non-reserved word at `index`.
    fn identifier(&self, index: usize) -> Option<&'a str> {
        let token = self.tokens.get(index)?;
        if token.kind != TokenKind::Word || self.is_any_keyword(index, RESERVED) {
            return None;
        }
        Some(token.text(self.src))
    }

    /// `<table> [[AS] alias]` starting at `index`. Returns the binding and the
    /// index of the first token after it.
    fn table_binding(&self, index: usize) -> Option<(&'a str, Option<String>, usize)> {
        let table = self.identifier(index)?;
        let next = index + 1;

        if self
            .tokens
            .get(next)
            .is_some_and(|t| t.is_keyword(self.src, "AS"))
        {
            if let Some(alias) = self.identifier(next + 1) {
                return Some((table, Some(alias.to_string()), next + 2));
            }
        }

        match self.identifier(next) {
            Some(alias) => Some((table, Some(alias.to_string()), next + 1)),
            None => Some((table, None, next)),
        }
    }

    /// SELECT fields and the index of the FROM keyword that ends them.
    fn extract_select(&self) -> ParseResult<(Vec<String>, usize)> {
        let select = self
            .find_keyword(0, "SELECT")
            .ok_or_else(|| missing("SELECT"))?;
        let from = self
            .find_keyword(select + 1, "FROM")
            .ok_or_else(|| missing("FROM"))?;

        let body = self.src[self.tokens[select].span.end..self.tokens[from].span.start].trim();
        if body.is_empty() {
            return Err(missing("SELECT"));
        }

        let fields = body.split(',').map(|f| f.trim().to_string()).collect();
        Ok((fields, from))
    }

    fn extract_from(&self, from_keyword: usize) -> ParseResult<(TableRef, usize)> {
        let (table, alias, next) = self
            .table_binding(from_keyword + 1)
            .ok_or_else(|| missing("FROM"))?;
        Ok((TableRef::new(table, alias), next))
    }

    fn extract_joins(&self, start: usize) -> Vec<Join> {
        let mut joins = Vec::new();
        let mut index = start;

        while let Some(keyword) = self.find_keyword(index, "JOIN") {
            match self.join_at(keyword) {
                Some((join, next)) => {
                    joins.push(join);
                    index = next;
                }
                None => {
                    warn!(
                        offset = self.tokens[keyword].span.start,
                        "skipping JOIN not followed by `<table> [alias] ON <condition>`"
                    );
                    index = keyword + 1;
                }
            }
        }

        joins
    }

    /// Match `JOIN <table> [alias] ON <condition>` at the JOIN keyword.
    fn join_at(&self, keyword: usize) -> Option<(Join, usize)> {
        let (table, alias, on) = self.table_binding(keyword + 1)?;
        if !self.tokens.get(on)?.is_keyword(self.src, "ON") {
            return None;
        }

        let end = (on + 1..self.tokens.len())
            .find(|&i| self.is_any_keyword(i, JOIN_TERMINATORS))
            .unwrap_or(self.tokens.len());
        let condition_end = self
            .tokens
            .get(end)
            .map_or(self.src.len(), |t| t.span.start);
        let condition = self.src[self.tokens[on].span.end..condition_end].trim();
        if condition.is_empty() {
            return None;
        }

        Some((Join::new(table, alias, condition), end))
    }

    fn extract_where(&self, start: usize) -> Option<String> {
        let keyword = self.find_keyword(start, "WHERE")?;
        let condition = self.src[self.tokens[keyword].span.end..].trim();
        (!condition.is_empty()).then(|| condition.to_string())
    }
}
