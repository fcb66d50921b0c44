//! Relational-algebra rendering.

use crate::sql::ParsedQuery;

pub const PROJECTION: char = 'π';
pub const SELECTION: char = 'σ';
pub const NATURAL_JOIN: char = '⨝';

/// Render a validated query as `π fields (σ condition (join chain))`.
///
/// Joins fold into a left-deep chain of aliases; join predicates are not
/// part of the output. The selection is omitted when there is no WHERE.
pub fn render_algebra(query: &ParsedQuery) -> String {
    let mut expr = query.from.alias.clone();
    for join in &query.joins {
        expr = format!("({expr} {NATURAL_JOIN} {})", join.alias);
    }

    if let Some(condition) = &query.where_clause {
        expr = format!("{SELECTION} {condition} ({expr})");
    }

    format!("{PROJECTION} {} ({expr})", query.select.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::Parser;

    fn render(sql: &str) -> String {
        render_algebra(&Parser::parse(sql).unwrap())
    }

    #[test]
    fn test_single_table() {
        assert_eq!(render("SELECT a.c FROM t a"), "π a.c (a)");
    }

    #[test]
    fn test_join_with_selection() {
        assert_eq!(
            render(
                "SELECT p.Nome, c.Descricao FROM Produto p JOIN Categoria c ON p.Categoria_idCategoria = c.idCategoria WHERE p.Preco > 100 AND c.Descricao = 'Eletrônicos'"
            ),
            "π p.Nome, c.Descricao (σ p.Preco > 100 AND c.Descricao = 'Eletrônicos' ((p ⨝ c)))"
        );
    }

    #[test]
    fn test_left_deep_chain() {
        assert_eq!(
            render("SELECT a.x FROM A a JOIN B b ON a.x = b.x JOIN C c ON b.y = c.y JOIN D ON c.z = D.z"),
            "π a.x ((((a ⨝ b) ⨝ c) ⨝ D))"
        );
    }

    #[test]
    fn test_selection_without_join() {
        assert_eq!(
            render("SELECT x.Nome, x.Nome FROM Produto x WHERE x.Preco < 10"),
            "π x.Nome, x.Nome (σ x.Preco < 10 (x))"
        );
    }
}
