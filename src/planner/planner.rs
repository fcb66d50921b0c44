//! Query planner - turns query text into algebra, an operator graph and an
//! execution plan.
//!
//! The planner is the entry point of the pipeline.

use std::sync::Arc;

use tracing::debug;

use super::algebra::render_algebra;
use super::error::PlanResult;
use super::graph::OperatorGraph;
use super::linearize::ExecutionPlan;
use super::validate::{AliasMap, ReferenceValidator};
use crate::catalog::SchemaCatalog;
use crate::sql::{ParsedQuery, Parser};

/// Planner configuration options.
#[derive(Debug, Clone, Default)]
pub struct PlannerConfig {
    /// Fail with `DuplicateAlias` when an alias is bound twice instead of
    /// letting the last binding win.
    pub strict_aliases: bool,
}

impl PlannerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set strict_aliases flag.
    pub fn strict_aliases(mut self, value: bool) -> Self {
        self.strict_aliases = value;
        self
    }
}

/// The query planner.
pub struct QueryPlanner {
    catalog: Arc<SchemaCatalog>,
    config: PlannerConfig,
}

impl QueryPlanner {
    /// Create a new query planner.
    pub fn new(catalog: Arc<SchemaCatalog>) -> Self {
        Self::with_config(catalog, PlannerConfig::default())
    }

    /// Create a planner with custom configuration.
    pub fn with_config(catalog: Arc<SchemaCatalog>, config: PlannerConfig) -> Self {
        Self { catalog, config }
    }

    pub fn catalog(&self) -> &SchemaCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Extract, validate and plan a query string.
    pub fn plan(&self, sql: &str) -> PlanResult<QueryPlan> {
        let query = Parser::parse(sql)?;
        self.plan_query(query)
    }

    /// Validate and plan an already extracted query.
    pub fn plan_query(&self, query: ParsedQuery) -> PlanResult<QueryPlan> {
        let aliases = ReferenceValidator::new(&self.catalog)
            .strict_aliases(self.config.strict_aliases)
            .validate(&query)?;

        let algebra = render_algebra(&query);
        let graph = OperatorGraph::build(&query, &aliases);
        let execution = ExecutionPlan::linearize(&graph);

        debug!(
            operators = graph.len(),
            steps = execution.len(),
            total_cost = graph.total_cost(),
            "planned query"
        );

        Ok(QueryPlan {
            query,
            aliases,
            algebra,
            graph,
            execution,
        })
    }

    /// Explain a query plan.
    pub fn explain(&self, sql: &str) -> PlanResult<String> {
        let plan = self.plan(sql)?;
        Ok(format!(
            "=== Relational Algebra ===\n{}\n=== Operator Graph ===\n{}\n=== Execution Plan ===\n{}",
            plan.algebra,
            plan.operator_lines().join("\n"),
            plan.plan_lines().join("\n"),
        ))
    }
}

/// Everything derived from one query.
#[derive(Debug, Clone)]
pub struct QueryPlan {
    pub query: ParsedQuery,
    pub aliases: AliasMap,
    pub algebra: String,
    pub graph: OperatorGraph,
    pub execution: ExecutionPlan,
}

impl QueryPlan {
    /// Operator lines in construction order.
    pub fn operator_lines(&self) -> Vec<String> {
        self.graph.render_lines()
    }

    /// Operator lines in execution order.
    pub fn plan_lines(&self) -> Vec<String> {
        self.execution.render_lines(&self.graph)
    }
}
