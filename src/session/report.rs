//! Output artifacts for one processed query.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::planner::{GraphDescription, QueryPlan};

/// Everything a presentation layer shows for one query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryReport {
    /// The query as submitted, trimmed.
    pub query: String,
    pub algebra: String,
    /// `"<kind>: <label>"` in construction order.
    pub operators: Vec<String>,
    /// `"<kind>: <label>"` in execution order.
    pub execution_plan: Vec<String>,
    pub graph: GraphDescription,
    pub total_cost: usize,
}

impl QueryReport {
    pub fn new(query: impl Into<String>, plan: &QueryPlan) -> Self {
        Self {
            query: query.into(),
            algebra: plan.algebra.clone(),
            operators: plan.operator_lines(),
            execution_plan: plan.plan_lines(),
            graph: plan.graph.describe(),
            total_cost: plan.graph.total_cost(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Graphviz rendering of the operator graph.
    pub fn to_dot(&self) -> String {
        self.graph.to_dot()
    }
}

impl fmt::Display for QueryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Original query:")?;
        writeln!(f, "{}", self.query)?;
        writeln!(f)?;
        writeln!(f, "Relational algebra:")?;
        writeln!(f, "{}", self.algebra)?;
        writeln!(f)?;
        writeln!(f, "Operator graph:")?;
        for line in &self.operators {
            writeln!(f, "{}", line)?;
        }
        writeln!(f)?;
        writeln!(f, "Execution plan (total cost: {}):", self.total_cost)?;
        for line in &self.execution_plan {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
