//! End-to-end tests for the planning pipeline.
//!
//! These cover:
//! - The reference scenarios (join + selection, single table, bad field, no FROM)
//! - Shape of the operator graph and execution plan
//! - Validation against every table of the built-in catalog

use std::sync::Arc;

use relplan::catalog::SchemaCatalog;
use relplan::planner::{OperatorKind, PlanError, QueryPlanner};
use relplan::session::{QueryProcessor, SessionError};
use relplan::sql::{ParseError, Parser};

fn planner() -> QueryPlanner {
    QueryPlanner::new(Arc::new(SchemaCatalog::ecommerce()))
}

// ============================================================================
// Scenarios
// ============================================================================

mod scenarios {
    use super::*;

    const SCENARIO_A: &str = "SELECT p.Nome, c.Descricao FROM Produto p JOIN Categoria c ON p.Categoria_idCategoria = c.idCategoria WHERE p.Preco > 100 AND c.Descricao = 'Eletrônicos'";

    #[test]
    fn join_with_selection() {
        let plan = planner().plan(SCENARIO_A).unwrap();

        assert_eq!(
            plan.algebra,
            "π p.Nome, c.Descricao (σ p.Preco > 100 AND c.Descricao = 'Eletrônicos' ((p ⨝ c)))"
        );
        assert_eq!(plan.graph.len(), 5);

        let kinds: Vec<OperatorKind> = plan.graph.nodes().iter().map(|n| n.kind).collect();
        assert_eq!(
            kinds,
            vec![
                OperatorKind::Table,
                OperatorKind::Table,
                OperatorKind::Join,
                OperatorKind::Selection,
                OperatorKind::Projection,
            ]
        );
        assert_eq!(plan.graph.nodes()[0].label, "p (Produto)");
        assert_eq!(plan.graph.nodes()[1].label, "c (Categoria)");

        let selection = plan
            .graph
            .nodes()
            .iter()
            .find(|n| n.kind == OperatorKind::Selection)
            .unwrap();
        assert_eq!(selection.cost, 2);
    }

    #[test]
    fn join_with_selection_multiline() {
        let sql = "SELECT p.Nome, c.Descricao\nFROM Produto p\nJOIN Categoria c ON p.Categoria_idCategoria = c.idCategoria\nWHERE p.Preco > 100 AND c.Descricao = 'Eletrônicos'\n";
        let multiline = planner().plan(sql).unwrap();
        let single = planner().plan(SCENARIO_A).unwrap();
        assert_eq!(multiline.algebra, single.algebra);
        assert_eq!(multiline.operator_lines(), single.operator_lines());
    }

    #[test]
    fn single_table_without_where() {
        let plan = planner().plan("SELECT x.Nome FROM Produto x").unwrap();
        assert_eq!(plan.algebra, "π x.Nome (x)");
        assert_eq!(plan.graph.count(OperatorKind::Selection), 0);
        assert_eq!(plan.graph.len(), 2);
    }

    #[test]
    fn invalid_where_field() {
        let err = planner()
            .plan("SELECT p.Nome FROM Produto p WHERE p.Invalido = 1")
            .unwrap_err();
        assert_eq!(err, PlanError::InvalidField("p.Invalido".into()));
    }

    #[test]
    fn missing_from() {
        let err = planner().plan("SELECT p.Nome").unwrap_err();
        assert_eq!(err, PlanError::Parse(ParseError::MissingClause("FROM".into())));
    }

    #[test]
    fn empty_input_at_boundary() {
        let err = QueryProcessor::default().process("").unwrap_err();
        assert!(matches!(err, SessionError::Parse(ParseError::EmptyQuery)));
    }
}

// ============================================================================
// Graph and plan shape
// ============================================================================

mod shape {
    use super::*;

    #[test]
    fn single_table_algebra_for_every_table() {
        let catalog = SchemaCatalog::ecommerce();
        for table in catalog.tables() {
            let column = &table.columns[0];
            let sql = format!("SELECT a.{column} FROM {} a", table.name);
            let plan = planner().plan(&sql).unwrap();
            assert_eq!(plan.algebra, format!("π a.{column} (a)"));
            assert_eq!(plan.graph.len(), 2);
        }
    }

    #[test]
    fn three_joins() {
        let plan = planner()
            .plan(
                "SELECT pe.idPedido, cl.Nome
                 FROM Pedido pe
                 JOIN Cliente cl ON pe.Cliente_idCliente = cl.idCliente
                 JOIN Status s ON pe.Status_idStatus = s.idStatus
                 JOIN Pedido_has_Produto pp ON pp.Pedido_idPedido = pe.idPedido AND pp.PrecoUnitario > 0
                 WHERE s.Descricao = 'Enviado' OR cl.Nome = 'Ana'",
            )
            .unwrap();

        assert_eq!(plan.graph.count(OperatorKind::Table), 4);
        assert_eq!(plan.graph.count(OperatorKind::Join), 3);
        assert_eq!(plan.graph.count(OperatorKind::Selection), 1);
        assert_eq!(plan.graph.count(OperatorKind::Projection), 1);

        assert_eq!(plan.execution.len(), plan.graph.len());
        assert_eq!(*plan.execution.steps().last().unwrap(), plan.graph.root());
        assert_eq!(
            plan.algebra,
            "π pe.idPedido, cl.Nome (σ s.Descricao = 'Enviado' OR cl.Nome = 'Ana' ((((pe ⨝ cl) ⨝ s) ⨝ pp)))"
        );

        let costs: Vec<usize> = plan
            .graph
            .nodes()
            .iter()
            .filter(|n| n.kind == OperatorKind::Join)
            .map(|n| n.cost)
            .collect();
        assert_eq!(costs, vec![1, 1, 2]);
    }

    #[test]
    fn edges_cover_every_child() {
        let plan = planner()
            .plan("SELECT p.Nome FROM Produto p JOIN Categoria c ON p.Categoria_idCategoria = c.idCategoria")
            .unwrap();
        let description = plan.graph.describe();
        let child_count: usize = plan.graph.nodes().iter().map(|n| n.children.len()).sum();
        assert_eq!(description.edges.len(), child_count);
    }
}

// ============================================================================
// Validation
// ============================================================================

mod validation {
    use super::*;

    #[test]
    fn every_column_of_every_table_accepted() {
        let catalog = SchemaCatalog::ecommerce();
        for table in catalog.tables() {
            let fields: Vec<String> = table.columns.iter().map(|c| format!("t.{c}")).collect();
            let sql = format!("SELECT {} FROM {} t", fields.join(", "), table.name);
            assert!(planner().plan(&sql).is_ok(), "{sql}");
        }
    }

    #[test]
    fn unknown_column_rejected_for_every_table() {
        let catalog = SchemaCatalog::ecommerce();
        for table in catalog.tables() {
            let sql = format!("SELECT t.NaoExiste FROM {} t", table.name);
            assert_eq!(
                planner().plan(&sql).unwrap_err(),
                PlanError::InvalidField("t.NaoExiste".into())
            );

            let sql = format!("SELECT t.{} FROM {} t WHERE t.NaoExiste = 1", table.columns[0], table.name);
            assert_eq!(
                planner().plan(&sql).unwrap_err(),
                PlanError::InvalidField("t.NaoExiste".into())
            );
        }
    }

    #[test]
    fn unbound_alias_rejected_for_every_table() {
        let catalog = SchemaCatalog::ecommerce();
        for table in catalog.tables() {
            let sql = format!("SELECT z.{} FROM {} t", table.columns[0], table.name);
            assert_eq!(
                planner().plan(&sql).unwrap_err(),
                PlanError::InvalidField(format!("z.{}", table.columns[0]))
            );
        }
    }

    #[test]
    fn extraction_is_deterministic() {
        let sql = "SELECT p.Nome, p.Nome FROM Produto p JOIN Categoria c ON p.Categoria_idCategoria = c.idCategoria WHERE p.Preco > 1";
        assert_eq!(Parser::parse(sql).unwrap(), Parser::parse(sql).unwrap());
    }
}
