//! Execution-plan linearization.

use std::collections::HashSet;

use super::graph::{Operator, OperatorGraph, OperatorId};

/// Operators in bottom-up evaluation order: every operator appears after
/// all of its children, and each operator appears once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionPlan {
    steps: Vec<OperatorId>,
}

impl ExecutionPlan {
    /// Post-order depth-first traversal from the graph root, children in
    /// stored order. Operators reachable through several parents are
    /// emitted on first visit only.
    ///
    /// The walk keeps its own stack of `(operator, next child)` frames, so
    /// depth is bounded by memory rather than the thread stack.
    pub fn linearize(graph: &OperatorGraph) -> Self {
        let mut visited = HashSet::with_capacity(graph.len());
        let mut steps = Vec::with_capacity(graph.len());
        let mut stack = vec![(graph.root(), 0usize)];
        visited.insert(graph.root());

        while let Some((id, next)) = stack.last_mut() {
            let id = *id;
            match graph[id].children.get(*next) {
                Some(&child) => {
                    *next += 1;
                    if visited.insert(child) {
                        stack.push((child, 0));
                    }
                }
                None => {
                    stack.pop();
                    steps.push(id);
                }
            }
        }

        Self { steps }
    }

    pub fn steps(&self) -> &[OperatorId] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Resolve the steps against the graph they were computed from.
    pub fn operators<'g>(&'g self, graph: &'g OperatorGraph) -> impl Iterator<Item = &'g Operator> {
        self.steps.iter().map(move |&id| &graph[id])
    }

    /// `"<kind>: <label>"` for each step.
    pub fn render_lines(&self, graph: &OperatorGraph) -> Vec<String> {
        self.operators(graph).map(ToString::to_string).collect()
    }
}
