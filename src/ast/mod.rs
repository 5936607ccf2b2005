//! The SQL DOM: a structural, dialect-independent representation of SQL.
//!
//! Nodes are plain immutable data. Statements, table references and
//! parameters carry a [`NodeId`]; cloning a node keeps its id, so every
//! clone denotes the same logical node to the compiler.

pub mod builders;
pub mod ddl;
pub mod dml;
pub mod expr;
pub mod operators;
pub mod table;
pub mod values;

pub use builders::*;
pub use ddl::*;
pub use dml::*;
pub use expr::*;
pub use operators::*;
pub use table::*;
pub use values::*;

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of an AST node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(u64);

impl NodeId {
    /// Allocate a fresh id.
    pub fn next() -> Self {
        Self(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

/// Ids read from a file are reserved, so ids allocated afterwards never
/// collide with them.
impl<'de> Deserialize<'de> for NodeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let id = u64::deserialize(deserializer)?;
        NEXT_NODE_ID.fetch_max(id.saturating_add(1), Ordering::Relaxed);
        Ok(Self(id))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Render-time key of a variant, dynamic filter or named placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Key(Arc<str>);

impl Key {
    pub fn new(key: impl AsRef<str>) -> Self {
        Self(Arc::from(key.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Key {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for Key {
    fn from(key: String) -> Self {
        Self(Arc::from(key))
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Any compilable statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Statement {
    Select(Select),
    Query(Query),
    Insert(Insert),
    Update(Update),
    Delete(Delete),
    Batch(Batch),
    Block(StatementBlock),
    DeclareVariable(DeclareVariable),
    Assign(Assign),
    If(Box<If>),
    While(Box<While>),
    DeclareCursor(DeclareCursor),
    OpenCursor(CursorRef),
    Fetch(Fetch),
    CloseCursor(CursorRef),
    Comment(Comment),
    Ddl(DdlStatement),
}

impl Statement {
    /// Short name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Statement::Select(_) => "select",
            Statement::Query(_) => "query",
            Statement::Insert(_) => "insert",
            Statement::Update(_) => "update",
            Statement::Delete(_) => "delete",
            Statement::Batch(_) => "batch",
            Statement::Block(_) => "block",
            Statement::DeclareVariable(_) => "declare",
            Statement::Assign(_) => "assign",
            Statement::If(_) => "if",
            Statement::While(_) => "while",
            Statement::DeclareCursor(_) => "declare cursor",
            Statement::OpenCursor(_) => "open cursor",
            Statement::Fetch(_) => "fetch",
            Statement::CloseCursor(_) => "close cursor",
            Statement::Comment(_) => "comment",
            Statement::Ddl(ddl) => ddl.kind(),
        }
    }
}

impl From<Select> for Statement {
    fn from(select: Select) -> Self {
        Statement::Select(select)
    }
}

impl From<Query> for Statement {
    fn from(query: Query) -> Self {
        Statement::Query(query)
    }
}

impl From<Insert> for Statement {
    fn from(insert: Insert) -> Self {
        Statement::Insert(insert)
    }
}

impl From<Update> for Statement {
    fn from(update: Update) -> Self {
        Statement::Update(update)
    }
}

impl From<Delete> for Statement {
    fn from(delete: Delete) -> Self {
        Statement::Delete(delete)
    }
}

impl From<Batch> for Statement {
    fn from(batch: Batch) -> Self {
        Statement::Batch(batch)
    }
}

impl From<DdlStatement> for Statement {
    fn from(ddl: DdlStatement) -> Self {
        Statement::Ddl(ddl)
    }
}
