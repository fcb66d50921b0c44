//! The schema catalog: an immutable table -> columns lookup.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::schema::{SchemaError, TableSchema};

/// Tables of the built-in store schema, in declaration order.
const ECOMMERCE_TABLES: &[(&str, &[&str])] = &[
    ("Categoria", &["idCategoria", "Descricao"]),
    (
        "Produto",
        &["idProduto", "Nome", "Descricao", "Preco", "QuantEstoque", "Categoria_idCategoria"],
    ),
    ("TipoCliente", &["idTipoCliente", "Descricao"]),
    (
        "Cliente",
        &[
            "idCliente",
            "Nome",
            "Email",
            "Nascimento",
            "Senha",
            "TipoCliente_idTipoCliente",
            "DataRegistro",
        ],
    ),
    ("TipoEndereco", &["idTipoEndereco", "Descricao"]),
    (
        "Endereco",
        &[
            "idEndereco",
            "EnderecoPadrao",
            "Logradouro",
            "Numero",
            "Complemento",
            "Bairro",
            "Cidade",
            "UF",
            "CEP",
            "TipoEndereco_idTipoEndereco",
            "Cliente_idCliente",
        ],
    ),
    ("Telefone", &["Numero", "Cliente_idCliente"]),
    ("Status", &["idStatus", "Descricao"]),
    (
        "Pedido",
        &["idPedido", "Status_idStatus", "DataPedido", "ValorTotalPedido", "Cliente_idCliente"],
    ),
    (
        "Pedido_has_Produto",
        &["idPedidoProduto", "Pedido_idPedido", "Produto_idProduto", "PrecoUnitario"],
    ),
];

/// On-disk shape of a catalog file.
#[derive(Debug, Serialize, Deserialize)]
struct CatalogDocument {
    tables: Vec<TableSchema>,
}

/// Static mapping of table name to its ordered column list.
///
/// A catalog is built once and never mutated afterwards. Callers share it
/// behind an `Arc` rather than through a global.
#[derive(Debug, Clone)]
pub struct SchemaCatalog {
    tables: Vec<TableSchema>,
    index: HashMap<String, usize>,
}

impl SchemaCatalog {
    /// Build a catalog from table schemas, rejecting duplicate tables and
    /// invalid column lists.
    pub fn new(tables: Vec<TableSchema>) -> Result<Self, SchemaError> {
        let mut index = HashMap::with_capacity(tables.len());
        for (pos, table) in tables.iter().enumerate() {
            table.validate()?;
            if index.insert(table.name.clone(), pos).is_some() {
                return Err(SchemaError::DuplicateTable(table.name.clone()));
            }
        }
        Ok(Self { tables, index })
    }

    /// The built-in store schema (categories, products, customers, orders).
    pub fn ecommerce() -> Self {
        let tables = ECOMMERCE_TABLES
            .iter()
            .map(|(name, columns)| TableSchema::new(*name, columns.iter().copied()))
            .collect::<Vec<_>>();
        let index = tables
            .iter()
            .enumerate()
            .map(|(pos, t)| (t.name.clone(), pos))
            .collect();
        Self { tables, index }
    }

    /// Parse a catalog from its JSON document form.
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        let doc: CatalogDocument = serde_json::from_str(json)?;
        Self::new(doc.tables)
    }

    /// Load a catalog from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let catalog = Self::from_json(&contents)?;
        tracing::debug!(
            path = %path.as_ref().display(),
            tables = catalog.len(),
            "loaded schema catalog"
        );
        Ok(catalog)
    }

    /// Serialize the catalog back into its JSON document form.
    pub fn to_json(&self) -> Result<String, SchemaError> {
        let doc = CatalogDocument {
            tables: self.tables.clone(),
        };
        Ok(serde_json::to_string_pretty(&doc)?)
    }

    /// Get a table schema by name.
    pub fn table(&self, name: &str) -> Option<&TableSchema> {
        self.index.get(name).map(|&pos| &self.tables[pos])
    }

    /// Check whether `table` exists and declares `column`.
    pub fn has_column(&self, table: &str, column: &str) -> bool {
        self.table(table).is_some_and(|t| t.has_column(column))
    }

    /// Iterate over all table schemas in declaration order.
    pub fn tables(&self) -> impl Iterator<Item = &TableSchema> {
        self.tables.iter()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl Default for SchemaCatalog {
    fn default() -> Self {
        Self::ecommerce()
    }
}
