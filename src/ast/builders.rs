//! Shorthand constructors for expression trees.
//!
//! ```ignore
//! use sqldom::ast::*;
//! let users = TableRef::table(users_table);
//! let predicate = and(eq(col(&users, "Active"), lit(true)), is_not_null(col(&users, "Email")));
//! ```

use super::{
    AggregateKind, BinaryOp, DynamicFilter, Expr, FunctionKind, Key, PlaceholderRef, Query,
    TableRef, UnaryOp, Value,
};
use crate::catalog::DataType;

/// Column of a table reference.
pub fn col(table: &TableRef, name: &str) -> Expr {
    Expr::Column(table.column(name))
}

pub fn lit(value: impl Into<Value>) -> Expr {
    Expr::Literal(value.into())
}

pub fn native(text: impl Into<String>) -> Expr {
    Expr::Native(text.into())
}

pub fn binary(op: BinaryOp, left: impl Into<Expr>, right: impl Into<Expr>) -> Expr {
    Expr::Binary {
        op,
        left: Box::new(left.into()),
        right: Box::new(right.into()),
    }
}

pub fn and(left: impl Into<Expr>, right: impl Into<Expr>) -> Expr {
    binary(BinaryOp::And, left, right)
}

pub fn or(left: impl Into<Expr>, right: impl Into<Expr>) -> Expr {
    binary(BinaryOp::Or, left, right)
}

pub fn eq(left: impl Into<Expr>, right: impl Into<Expr>) -> Expr {
    binary(BinaryOp::Equals, left, right)
}

pub fn ne(left: impl Into<Expr>, right: impl Into<Expr>) -> Expr {
    binary(BinaryOp::NotEquals, left, right)
}

pub fn gt(left: impl Into<Expr>, right: impl Into<Expr>) -> Expr {
    binary(BinaryOp::GreaterThan, left, right)
}

pub fn ge(left: impl Into<Expr>, right: impl Into<Expr>) -> Expr {
    binary(BinaryOp::GreaterThanOrEquals, left, right)
}

pub fn lt(left: impl Into<Expr>, right: impl Into<Expr>) -> Expr {
    binary(BinaryOp::LessThan, left, right)
}

pub fn le(left: impl Into<Expr>, right: impl Into<Expr>) -> Expr {
    binary(BinaryOp::LessThanOrEquals, left, right)
}

pub fn concat(left: impl Into<Expr>, right: impl Into<Expr>) -> Expr {
    binary(BinaryOp::Concat, left, right)
}

pub fn unary(op: UnaryOp, operand: impl Into<Expr>) -> Expr {
    Expr::Unary {
        op,
        operand: Box::new(operand.into()),
    }
}

pub fn not(operand: impl Into<Expr>) -> Expr {
    unary(UnaryOp::Not, operand)
}

pub fn is_null(operand: impl Into<Expr>) -> Expr {
    unary(UnaryOp::IsNull, operand)
}

pub fn is_not_null(operand: impl Into<Expr>) -> Expr {
    unary(UnaryOp::IsNotNull, operand)
}

pub fn exists(query: impl Into<Query>) -> Expr {
    unary(UnaryOp::Exists, Expr::SubQuery(Box::new(query.into())))
}

/// `expr IN (v1, v2, ...)` over literal values.
pub fn in_list<V: Into<Value>>(expr: impl Into<Expr>, values: impl IntoIterator<Item = V>) -> Expr {
    let values = values.into_iter().map(Into::into).collect();
    binary(BinaryOp::In, expr, Expr::Array(values))
}

pub fn between(expr: impl Into<Expr>, low: impl Into<Expr>, high: impl Into<Expr>) -> Expr {
    Expr::Between {
        expr: Box::new(expr.into()),
        low: Box::new(low.into()),
        high: Box::new(high.into()),
        negated: false,
    }
}

pub fn like(expr: impl Into<Expr>, pattern: impl Into<Expr>) -> Expr {
    Expr::Like {
        expr: Box::new(expr.into()),
        pattern: Box::new(pattern.into()),
        escape: None,
        negated: false,
    }
}

pub fn cast(expr: impl Into<Expr>, to: DataType) -> Expr {
    Expr::Cast {
        expr: Box::new(expr.into()),
        to,
    }
}

pub fn func(kind: FunctionKind, args: Vec<Expr>) -> Expr {
    Expr::Function { kind, args }
}

pub fn count_all() -> Expr {
    Expr::Aggregate {
        kind: AggregateKind::Count,
        distinct: false,
        arg: None,
    }
}

pub fn aggregate(kind: AggregateKind, arg: impl Into<Expr>) -> Expr {
    Expr::Aggregate {
        kind,
        distinct: false,
        arg: Some(Box::new(arg.into())),
    }
}

/// IN-predicate whose value list is supplied at render time under `key`.
pub fn dynamic_filter(key: impl Into<Key>, expressions: Vec<Expr>) -> Expr {
    Expr::DynamicFilter(DynamicFilter {
        key: key.into(),
        expressions,
        negated: false,
    })
}

pub fn variant(key: impl Into<Key>, main: impl Into<Expr>, alternative: impl Into<Expr>) -> Expr {
    Expr::Variant {
        key: key.into(),
        main: Box::new(main.into()),
        alternative: Box::new(alternative.into()),
    }
}

pub fn placeholder(key: impl Into<Key>) -> Expr {
    Expr::Placeholder(PlaceholderRef::Named(key.into()))
}

pub fn type_id(type_name: impl Into<String>) -> Expr {
    Expr::Placeholder(PlaceholderRef::TypeId(type_name.into()))
}
