//! Queries, data manipulation and procedural statements.

use serde::{Deserialize, Serialize};

use super::{BinaryOp, ColumnRef, Expr, FetchDirection, FromItem, Hint, LockMode, NodeId, SetOp, Statement, TableRef};
use crate::catalog::DataType;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectItem {
    pub expr: Expr,
    #[serde(default)]
    pub alias: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub expr: Expr,
    #[serde(default = "default_true")]
    pub ascending: bool,
}

fn default_true() -> bool {
    true
}

impl OrderItem {
    pub fn asc(expr: impl Into<Expr>) -> Self {
        Self {
            expr: expr.into(),
            ascending: true,
        }
    }

    pub fn desc(expr: impl Into<Expr>) -> Self {
        Self {
            expr: expr.into(),
            ascending: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Select {
    #[serde(default = "NodeId::next")]
    pub id: NodeId,
    #[serde(default)]
    pub columns: Vec<SelectItem>,
    #[serde(default)]
    pub from: Option<FromItem>,
    #[serde(default)]
    pub where_clause: Option<Expr>,
    #[serde(default)]
    pub group_by: Vec<Expr>,
    #[serde(default)]
    pub having: Option<Expr>,
    #[serde(default)]
    pub order_by: Vec<OrderItem>,
    #[serde(default)]
    pub distinct: bool,
    #[serde(default)]
    pub limit: Option<Expr>,
    #[serde(default)]
    pub offset: Option<Expr>,
    #[serde(default)]
    pub lock: Option<LockMode>,
    #[serde(default)]
    pub hints: Vec<Hint>,
    /// Inline comment emitted after the SELECT keyword
    #[serde(default)]
    pub comment: Option<String>,
}

impl Default for Select {
    fn default() -> Self {
        Self {
            id: NodeId::next(),
            columns: Vec::new(),
            from: None,
            where_clause: None,
            group_by: Vec::new(),
            having: None,
            order_by: Vec::new(),
            distinct: false,
            limit: None,
            offset: None,
            lock: None,
            hints: Vec::new(),
            comment: None,
        }
    }
}

impl Select {
    pub fn new() -> Self {
        Self::default()
    }

    /// SELECT ... FROM the given table or join tree.
    pub fn from(from: impl Into<FromItem>) -> Self {
        Self {
            from: Some(from.into()),
            ..Self::default()
        }
    }

    pub fn column(mut self, expr: impl Into<Expr>) -> Self {
        self.columns.push(SelectItem {
            expr: expr.into(),
            alias: None,
        });
        self
    }

    pub fn column_as(mut self, expr: impl Into<Expr>, alias: impl Into<String>) -> Self {
        self.columns.push(SelectItem {
            expr: expr.into(),
            alias: Some(alias.into()),
        });
        self
    }

    /// AND a predicate into the WHERE clause.
    pub fn filter(mut self, predicate: impl Into<Expr>) -> Self {
        self.where_clause = Some(match self.where_clause.take() {
            Some(existing) => Expr::Binary {
                op: BinaryOp::And,
                left: Box::new(existing),
                right: Box::new(predicate.into()),
            },
            None => predicate.into(),
        });
        self
    }

    pub fn group_by(mut self, expr: impl Into<Expr>) -> Self {
        self.group_by.push(expr.into());
        self
    }

    pub fn having(mut self, predicate: impl Into<Expr>) -> Self {
        self.having = Some(predicate.into());
        self
    }

    pub fn order_by(mut self, item: OrderItem) -> Self {
        self.order_by.push(item);
        self
    }

    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    pub fn limit(mut self, limit: impl Into<Expr>) -> Self {
        self.limit = Some(limit.into());
        self
    }

    pub fn offset(mut self, offset: impl Into<Expr>) -> Self {
        self.offset = Some(offset.into());
        self
    }

    pub fn lock(mut self, mode: LockMode) -> Self {
        self.lock = Some(mode);
        self
    }

    pub fn hint(mut self, hint: Hint) -> Self {
        self.hints.push(hint);
        self
    }

    pub fn comment(mut self, text: impl Into<String>) -> Self {
        self.comment = Some(text.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetQuery {
    #[serde(default = "NodeId::next")]
    pub id: NodeId,
    pub op: SetOp,
    #[serde(default)]
    pub all: bool,
    pub left: Query,
    pub right: Query,
}

/// A query expression: a SELECT or a set operation over queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Query {
    Select(Box<Select>),
    Set(Box<SetQuery>),
}

impl Query {
    pub fn union(self, other: impl Into<Query>, all: bool) -> Self {
        self.set(SetOp::Union, other, all)
    }

    pub fn set(self, op: SetOp, other: impl Into<Query>, all: bool) -> Self {
        Query::Set(Box::new(SetQuery {
            id: NodeId::next(),
            op,
            all,
            left: self,
            right: other.into(),
        }))
    }
}

impl From<Select> for Query {
    fn from(select: Select) -> Self {
        Query::Select(Box::new(select))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InsertSource {
    Values(Vec<Vec<Expr>>),
    Query(Query),
    DefaultValues,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insert {
    #[serde(default = "NodeId::next")]
    pub id: NodeId,
    pub into: Option<TableRef>,
    #[serde(default)]
    pub columns: Vec<ColumnRef>,
    pub source: InsertSource,
}

impl Insert {
    pub fn into(table: TableRef) -> Self {
        Self {
            id: NodeId::next(),
            into: Some(table),
            columns: Vec::new(),
            source: InsertSource::DefaultValues,
        }
    }

    /// Add a column and its value in the first VALUES row.
    pub fn value(mut self, column: impl Into<String>, value: impl Into<Expr>) -> Self {
        let table = self.into.clone();
        self.columns.push(ColumnRef {
            table,
            name: column.into(),
        });
        match &mut self.source {
            InsertSource::Values(rows) if !rows.is_empty() => rows[0].push(value.into()),
            _ => self.source = InsertSource::Values(vec![vec![value.into()]]),
        }
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub column: ColumnRef,
    pub value: Expr,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Update {
    #[serde(default = "NodeId::next")]
    pub id: NodeId,
    pub table: Option<TableRef>,
    pub assignments: Vec<Assignment>,
    #[serde(default)]
    pub from: Option<FromItem>,
    #[serde(default)]
    pub where_clause: Option<Expr>,
    #[serde(default)]
    pub limit: Option<Expr>,
}

impl Update {
    pub fn table(table: TableRef) -> Self {
        Self {
            id: NodeId::next(),
            table: Some(table),
            assignments: Vec::new(),
            from: None,
            where_clause: None,
            limit: None,
        }
    }

    pub fn set(mut self, column: ColumnRef, value: impl Into<Expr>) -> Self {
        self.assignments.push(Assignment {
            column,
            value: value.into(),
        });
        self
    }

    pub fn filter(mut self, predicate: impl Into<Expr>) -> Self {
        self.where_clause = Some(predicate.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Delete {
    #[serde(default = "NodeId::next")]
    pub id: NodeId,
    pub table: Option<TableRef>,
    #[serde(default)]
    pub from: Option<FromItem>,
    #[serde(default)]
    pub where_clause: Option<Expr>,
    #[serde(default)]
    pub limit: Option<Expr>,
}

impl Delete {
    pub fn from(table: TableRef) -> Self {
        Self {
            id: NodeId::next(),
            table: Some(table),
            from: None,
            where_clause: None,
            limit: None,
        }
    }

    pub fn filter(mut self, predicate: impl Into<Expr>) -> Self {
        self.where_clause = Some(predicate.into());
        self
    }
}

/// Statements sent to the server as one unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Batch {
    #[serde(default = "NodeId::next")]
    pub id: NodeId,
    pub statements: Vec<Statement>,
}

impl Batch {
    pub fn new(statements: Vec<Statement>) -> Self {
        Self {
            id: NodeId::next(),
            statements,
        }
    }
}

/// BEGIN ... END
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementBlock {
    #[serde(default = "NodeId::next")]
    pub id: NodeId,
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeclareVariable {
    pub name: String,
    pub data_type: DataType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assign {
    pub variable: String,
    pub value: Expr,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct If {
    pub condition: Expr,
    pub then: Statement,
    #[serde(default)]
    pub otherwise: Option<Statement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct While {
    pub condition: Expr,
    pub body: Statement,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeclareCursor {
    pub name: String,
    pub query: Query,
    #[serde(default)]
    pub insensitive: bool,
    #[serde(default)]
    pub scroll: bool,
    #[serde(default)]
    pub read_only: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CursorRef {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fetch {
    pub cursor: String,
    pub direction: FetchDirection,
    /// Target variables
    #[serde(default)]
    pub into: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub text: String,
}
