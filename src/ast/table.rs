//! Table references, join trees and column references.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{NodeId, Query};
use crate::catalog::{Table, View};

/// What a table reference reads from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TableSource {
    Table(Arc<Table>),
    View(Arc<View>),
    /// Derived table, optionally named
    Query { query: Query, name: Option<String> },
    /// A name resolved by the database (CTE, temporary table)
    Named(String),
}

impl TableSource {
    /// Name a table reference may reuse as its alias.
    pub fn own_name(&self) -> Option<&str> {
        match self {
            TableSource::Table(t) => Some(&t.name.name),
            TableSource::View(v) => Some(&v.name.name),
            TableSource::Query { name, .. } => name.as_deref(),
            TableSource::Named(name) => Some(name),
        }
    }

    /// Sources that are addressed by a plain name rather than a catalog object.
    pub fn is_named(&self) -> bool {
        matches!(
            self,
            TableSource::Named(_) | TableSource::Query { name: Some(_), .. }
        )
    }
}

/// One occurrence of a table in a statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRef {
    #[serde(default = "NodeId::next")]
    pub id: NodeId,
    #[serde(default)]
    pub alias: Option<String>,
    pub source: Arc<TableSource>,
}

impl TableRef {
    pub fn new(source: TableSource) -> Self {
        Self {
            id: NodeId::next(),
            alias: None,
            source: Arc::new(source),
        }
    }

    pub fn table(table: Arc<Table>) -> Self {
        Self::new(TableSource::Table(table))
    }

    pub fn view(view: Arc<View>) -> Self {
        Self::new(TableSource::View(view))
    }

    pub fn query(query: impl Into<Query>) -> Self {
        Self::new(TableSource::Query {
            query: query.into(),
            name: None,
        })
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self::new(TableSource::Named(name.into()))
    }

    /// Set an explicit alias. Keeps the node id.
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Reference a column of this table.
    pub fn column(&self, name: impl Into<String>) -> ColumnRef {
        ColumnRef {
            table: Some(self.clone()),
            name: name.into(),
        }
    }
}

/// A column, optionally bound to a table reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnRef {
    #[serde(default)]
    pub table: Option<TableRef>,
    pub name: String,
}

impl ColumnRef {
    pub fn unbound(name: impl Into<String>) -> Self {
        Self {
            table: None,
            name: name.into(),
        }
    }

    /// Whether this column belongs to the given table reference.
    pub fn is_bound_to(&self, table: &TableRef) -> bool {
        self.table.as_ref().is_some_and(|t| t.id == table.id)
    }
}

/// An item of a FROM clause: a table or a join tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FromItem {
    Table(TableRef),
    Join(Box<JoinedTable>),
}

impl FromItem {
    pub fn join(self, kind: super::JoinKind, right: impl Into<FromItem>, on: Option<super::Expr>) -> Self {
        FromItem::Join(Box::new(JoinedTable {
            kind,
            left: self,
            right: right.into(),
            on,
        }))
    }

    /// Whether the right operand of some join in this tree is itself a join.
    pub fn is_right_nested(&self) -> bool {
        match self {
            FromItem::Table(_) => false,
            FromItem::Join(j) => {
                matches!(j.right, FromItem::Join(_)) || j.left.is_right_nested() || j.right.is_right_nested()
            }
        }
    }
}

impl From<TableRef> for FromItem {
    fn from(table: TableRef) -> Self {
        FromItem::Table(table)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinedTable {
    pub kind: super::JoinKind,
    pub left: FromItem,
    pub right: FromItem,
    #[serde(default)]
    pub on: Option<super::Expr>,
}
