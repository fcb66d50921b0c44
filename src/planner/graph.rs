//! Logical operator graph.
//!
//! Operators live in an arena owned by the graph and refer to their children
//! by [`OperatorId`]. The arena order is construction order.

use std::collections::HashMap;
use std::fmt;
use std::ops::Index;

use serde::{Deserialize, Serialize};

use super::validate::AliasMap;
use crate::sql::ParsedQuery;

/// Operator kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperatorKind {
    Table,
    Join,
    Selection,
    Projection,
}

impl fmt::Display for OperatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperatorKind::Table => write!(f, "Table"),
            OperatorKind::Join => write!(f, "Join"),
            OperatorKind::Selection => write!(f, "Selection"),
            OperatorKind::Projection => write!(f, "Projection"),
        }
    }
}

/// Index of an operator in its graph's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OperatorId(usize);

impl OperatorId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A node of the operator graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operator {
    pub id: OperatorId,
    pub kind: OperatorKind,
    pub label: String,
    /// Inputs in order: left then right for joins.
    pub children: Vec<OperatorId>,
    /// Naive cost; only meaningful for joins and selections.
    pub cost: usize,
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.label)
    }
}

/// Syntactic predicate complexity: literal `AND` count plus `OR` count plus one.
///
/// Matching is case-sensitive and substring-based, so `ORDER` counts as an `OR`.
pub fn estimate_cost(condition: &str) -> usize {
    condition.matches("AND").count() + condition.matches("OR").count() + 1
}

/// Appends operators to an arena.
#[derive(Debug, Default)]
pub(crate) struct GraphBuilder {
    nodes: Vec<Operator>,
}

impl GraphBuilder {
    pub(crate) fn push(
        &mut self,
        kind: OperatorKind,
        label: impl Into<String>,
        children: Vec<OperatorId>,
        cost: usize,
    ) -> OperatorId {
        let id = OperatorId(self.nodes.len());
        self.nodes.push(Operator {
            id,
            kind,
            label: label.into(),
            children,
            cost,
        });
        id
    }

    /// The Table operator for `alias`, created on first use.
    fn table<'q>(
        &mut self,
        tables: &mut HashMap<&'q str, OperatorId>,
        aliases: &AliasMap,
        alias: &'q str,
        table: &str,
    ) -> OperatorId {
        if let Some(&id) = tables.get(alias) {
            return id;
        }
        let table = aliases.resolve(alias).unwrap_or(table);
        let id = self.push(OperatorKind::Table, format!("{alias} ({table})"), Vec::new(), 1);
        tables.insert(alias, id);
        id
    }

    pub(crate) fn finish(self, root: OperatorId) -> OperatorGraph {
        OperatorGraph {
            nodes: self.nodes,
            root,
        }
    }
}

/// DAG of operators with a single Projection root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorGraph {
    nodes: Vec<Operator>,
    root: OperatorId,
}

impl OperatorGraph {
    /// Build the graph for a validated query.
    ///
    /// Mirrors the algebra fold: the FROM table, then for each join its table
    /// and a Join over (current, table), then an optional Selection, then the
    /// Projection root. One Table operator exists per distinct alias.
    pub fn build(query: &ParsedQuery, aliases: &AliasMap) -> Self {
        let mut builder = GraphBuilder::default();
        let mut tables = HashMap::new();

        let mut current =
            builder.table(&mut tables, aliases, &query.from.alias, &query.from.table);

        for join in &query.joins {
            let right = builder.table(&mut tables, aliases, &join.alias, &join.table);
            current = builder.push(
                OperatorKind::Join,
                join.condition.as_str(),
                vec![current, right],
                estimate_cost(&join.condition),
            );
        }

        if let Some(condition) = &query.where_clause {
            current = builder.push(
                OperatorKind::Selection,
                condition.as_str(),
                vec![current],
                estimate_cost(condition),
            );
        }

        let root = builder.push(
            OperatorKind::Projection,
            query.select.join(", "),
            vec![current],
            1,
        );

        builder.finish(root)
    }

    /// Operators in construction order.
    pub fn nodes(&self) -> &[Operator] {
        &self.nodes
    }

    pub fn root(&self) -> OperatorId {
        self.root
    }

    pub fn get(&self, id: OperatorId) -> Option<&Operator> {
        self.nodes.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of operators of the given kind.
    pub fn count(&self, kind: OperatorKind) -> usize {
        self.nodes.iter().filter(|n| n.kind == kind).count()
    }

    /// Sum of all operator costs.
    pub fn total_cost(&self) -> usize {
        self.nodes.iter().map(|n| n.cost).sum()
    }

    /// Every (parent, child) pair, in construction order of the parent.
    pub fn edges(&self) -> impl Iterator<Item = (OperatorId, OperatorId)> + '_ {
        self.nodes
            .iter()
            .flat_map(|n| n.children.iter().map(move |&c| (n.id, c)))
    }

    /// `"<kind>: <label>"` for each operator in construction order.
    pub fn render_lines(&self) -> Vec<String> {
        self.nodes.iter().map(ToString::to_string).collect()
    }

    /// Serializable node and edge listing for external visualisation.
    pub fn describe(&self) -> GraphDescription {
        GraphDescription {
            nodes: self
                .nodes
                .iter()
                .map(|n| NodeDescription {
                    id: n.id,
                    kind: n.kind,
                    label: n.label.clone(),
                    cost: n.cost,
                })
                .collect(),
            edges: self
                .edges()
                .map(|(parent, child)| EdgeDescription { parent, child })
                .collect(),
            root: self.root,
        }
    }

    /// Graphviz rendering of [`describe`](Self::describe).
    pub fn to_dot(&self) -> String {
        self.describe().to_dot()
    }
}

impl Index<OperatorId> for OperatorGraph {
    type Output = Operator;

    fn index(&self, id: OperatorId) -> &Operator {
        &self.nodes[id.0]
    }
}

/// A node in a [`GraphDescription`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeDescription {
    pub id: OperatorId,
    pub kind: OperatorKind,
    pub label: String,
    pub cost: usize,
}

/// A directed parent -> child edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeDescription {
    pub parent: OperatorId,
    pub child: OperatorId,
}

/// Nodes and edges of an operator graph, detached from the arena.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphDescription {
    pub nodes: Vec<NodeDescription>,
    pub edges: Vec<EdgeDescription>,
    pub root: OperatorId,
}

impl GraphDescription {
    pub fn to_dot(&self) -> String {
        let mut out = String::from("digraph operators {\n");
        for node in &self.nodes {
            let label = format!("{}: {}\\ncost={}", node.kind, escape_dot(&node.label), node.cost);
            out.push_str(&format!("  n{} [label=\"{}\"];\n", node.id.0, label));
        }
        for edge in &self.edges {
            out.push_str(&format!("  n{} -> n{};\n", edge.parent.0, edge.child.0));
        }
        out.push_str("}\n");
        out
    }
}

fn escape_dot(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => {}
            other => escaped.push(other),
        }
    }
    escaped
}
