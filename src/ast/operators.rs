//! Operators and small enumerations shared by DOM nodes.

use serde::{Deserialize, Serialize};

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    And,
    Or,
    Equals,
    NotEquals,
    GreaterThan,
    GreaterThanOrEquals,
    LessThan,
    LessThanOrEquals,
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Concat,
    BitAnd,
    BitOr,
    BitXor,
    In,
    NotIn,
}

impl BinaryOp {
    /// Operators whose chains are associative and may be flattened.
    pub fn is_chainable(self) -> bool {
        matches!(self, BinaryOp::And | BinaryOp::Or | BinaryOp::Concat)
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOp {
    Not,
    Negate,
    BitNot,
    IsNull,
    IsNotNull,
    Exists,
    All,
    Any,
    Some,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JoinKind {
    Inner,
    LeftOuter,
    RightOuter,
    FullOuter,
    Cross,
    CrossApply,
    OuterApply,
}

impl JoinKind {
    /// Whether the join carries an ON condition.
    pub fn has_condition(self) -> bool {
        matches!(
            self,
            JoinKind::Inner | JoinKind::LeftOuter | JoinKind::RightOuter | JoinKind::FullOuter
        )
    }

    pub fn is_apply(self) -> bool {
        matches!(self, JoinKind::CrossApply | JoinKind::OuterApply)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SetOp {
    Union,
    Except,
    Intersect,
}

/// Row locking requested by a SELECT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LockMode {
    Update,
    Shared,
    Exclusive,
    /// Skip rows locked by others
    SkipLocked,
    /// Fail instead of waiting
    NoWait,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AggregateKind {
    Count,
    Sum,
    Avg,
    Min,
    Max,
}

/// Built-in functions with dialect-specific spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FunctionKind {
    Abs,
    Ceiling,
    Floor,
    Round,
    Power,
    Sqrt,
    CharLength,
    Lower,
    Upper,
    Substring,
    Replace,
    Position,
    Coalesce,
    NullIf,
    CurrentDate,
    CurrentTime,
    CurrentTimestamp,
    CurrentUser,
    NewGuid,
}

impl FunctionKind {
    /// Functions written without parentheses in ANSI SQL.
    pub fn is_niladic(self) -> bool {
        matches!(
            self,
            FunctionKind::CurrentDate
                | FunctionKind::CurrentTime
                | FunctionKind::CurrentTimestamp
                | FunctionKind::CurrentUser
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DatePart {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    Millisecond,
    DayOfWeek,
    DayOfYear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrimSide {
    Both,
    Leading,
    Trailing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FullTextKind {
    Contains,
    FreeText,
}

/// Optimizer hints attached to a SELECT.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hint {
    ForceJoinOrder,
    FastFirstRows(u32),
    Native(String),
}

/// Referential action of a foreign key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ReferentialAction {
    #[default]
    NoAction,
    Restrict,
    Cascade,
    SetNull,
    SetDefault,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FetchDirection {
    Next,
    Prior,
    First,
    Last,
    Absolute(i64),
    Relative(i64),
}
