//! Query planning.
//!
//! Validates extracted clauses against the schema catalog, renders them as
//! relational algebra, builds the logical operator graph and linearizes it
//! into an execution plan.

mod algebra;
mod error;
mod graph;
mod linearize;
mod planner;
mod validate;

pub use algebra::{render_algebra, NATURAL_JOIN, PROJECTION, SELECTION};
pub use error::{PlanError, PlanResult};
pub use graph::{
    estimate_cost, EdgeDescription, GraphDescription, NodeDescription, Operator, OperatorGraph,
    OperatorId, OperatorKind,
};
pub use linearize::ExecutionPlan;
pub use planner::{PlannerConfig, QueryPlan, QueryPlanner};
pub use validate::{qualified_references, AliasMap, ReferenceValidator};
