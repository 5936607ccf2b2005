use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{
    AggregateKind, BinaryOp, ColumnRef, DatePart, FullTextKind, FunctionKind, Key, NodeId,
    OrderItem, Query, TableRef, TrimSide, UnaryOp, Value,
};
use crate::catalog::{DataType, ObjectName, Sequence};

/// A positional query parameter. Identity is its id, never its value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Parameter {
    #[serde(default = "NodeId::next")]
    pub id: NodeId,
    /// Explicit name; such parameters bypass the name provider
    #[serde(default)]
    pub name: Option<String>,
}

impl Parameter {
    pub fn new() -> Self {
        Self {
            id: NodeId::next(),
            name: None,
        }
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: NodeId::next(),
            name: Some(name.into()),
        }
    }
}

impl Default for Parameter {
    fn default() -> Self {
        Self::new()
    }
}

/// A value slot filled at render time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlaceholderRef {
    Named(Key),
    /// Discriminator of a mapped type, looked up by type name
    TypeId(String),
}

/// `expr IN (...)` over a list whose length is known only at render time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DynamicFilter {
    pub key: Key,
    pub expressions: Vec<Expr>,
    #[serde(default)]
    pub negated: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Case {
    /// Operand of a simple CASE; `None` for a searched CASE
    #[serde(default)]
    pub value: Option<Expr>,
    pub branches: Vec<(Expr, Expr)>,
    #[serde(default)]
    pub otherwise: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    Literal(Value),
    Null,
    /// The DEFAULT keyword
    Default,
    /// Raw SQL text, emitted verbatim
    Native(String),
    Parameter(Parameter),
    Placeholder(PlaceholderRef),
    Variable(String),
    Column(ColumnRef),
    /// `*` or `table.*`
    AllColumns(Option<TableRef>),
    /// Reference to a select-list alias
    AliasRef(String),
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Between {
        expr: Box<Expr>,
        low: Box<Expr>,
        high: Box<Expr>,
        negated: bool,
    },
    Like {
        expr: Box<Expr>,
        pattern: Box<Expr>,
        escape: Option<char>,
        negated: bool,
    },
    Case(Box<Case>),
    Cast {
        expr: Box<Expr>,
        to: DataType,
    },
    Collate {
        expr: Box<Expr>,
        collation: ObjectName,
    },
    Row(Vec<Expr>),
    Array(Vec<Value>),
    Aggregate {
        kind: AggregateKind,
        distinct: bool,
        /// `None` means `COUNT(*)`
        arg: Option<Box<Expr>>,
    },
    RowNumber {
        partition_by: Vec<Expr>,
        order_by: Vec<OrderItem>,
    },
    SubQuery(Box<Query>),
    Function {
        kind: FunctionKind,
        args: Vec<Expr>,
    },
    UserFunction {
        name: ObjectName,
        args: Vec<Expr>,
    },
    /// A provider-defined function the dialect must know how to spell
    CustomFunction {
        name: String,
        args: Vec<Expr>,
    },
    Trim {
        expr: Box<Expr>,
        side: TrimSide,
        chars: Option<String>,
    },
    Extract {
        part: DatePart,
        expr: Box<Expr>,
    },
    FullText {
        kind: FullTextKind,
        columns: Vec<ColumnRef>,
        search: Box<Expr>,
    },
    NextValue(Arc<Sequence>),
    DynamicFilter(DynamicFilter),
    /// Exactly one branch is rendered, chosen at render time
    Variant {
        key: Key,
        main: Box<Expr>,
        alternative: Box<Expr>,
    },
}

impl From<Value> for Expr {
    fn from(value: Value) -> Self {
        Expr::Literal(value)
    }
}

impl From<ColumnRef> for Expr {
    fn from(column: ColumnRef) -> Self {
        Expr::Column(column)
    }
}

impl From<Parameter> for Expr {
    fn from(parameter: Parameter) -> Self {
        Expr::Parameter(parameter)
    }
}

impl From<Query> for Expr {
    fn from(query: Query) -> Self {
        Expr::SubQuery(Box::new(query))
    }
}

impl From<DynamicFilter> for Expr {
    fn from(filter: DynamicFilter) -> Self {
        Expr::DynamicFilter(filter)
    }
}
