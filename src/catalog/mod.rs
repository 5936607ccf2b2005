//! Descriptive schema objects consumed by DDL and table references.
//!
//! These are read-only inputs: the compiler never mutates or validates the
//! catalog beyond what a statement needs to be well formed.

mod types;

pub use types::DataType;

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::ast::{Expr, Query, ReferentialAction, Value};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Schema {
    pub name: String,
    /// Database (catalog) the schema lives in
    #[serde(default)]
    pub catalog: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
}

impl Schema {
    pub fn new(name: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            catalog: None,
            owner: None,
        })
    }

    pub fn in_catalog(name: impl Into<String>, catalog: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            catalog: Some(catalog.into()),
            owner: None,
        })
    }
}

/// A possibly schema-qualified object name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectName {
    #[serde(default)]
    pub schema: Option<Arc<Schema>>,
    pub name: String,
}

impl ObjectName {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            schema: None,
            name: name.into(),
        }
    }

    pub fn qualified(schema: Arc<Schema>, name: impl Into<String>) -> Self {
        Self {
            schema: Some(schema),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputedColumn {
    pub expr: Expr,
    #[serde(default)]
    pub persisted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableColumn {
    pub name: String,
    #[serde(default)]
    pub data_type: Option<DataType>,
    /// Domain used instead of a data type
    #[serde(default)]
    pub domain: Option<ObjectName>,
    #[serde(default = "default_true")]
    pub nullable: bool,
    #[serde(default)]
    pub default: Option<Expr>,
    #[serde(default)]
    pub computed: Option<ComputedColumn>,
    #[serde(default)]
    pub collation: Option<ObjectName>,
    /// Identity generation settings
    #[serde(default)]
    pub identity: Option<SequenceDescriptor>,
}

fn default_true() -> bool {
    true
}

impl TableColumn {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type: Some(data_type),
            domain: None,
            nullable: true,
            default: None,
            computed: None,
            collation: None,
            identity: None,
        }
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    pub fn default_value(mut self, expr: impl Into<Expr>) -> Self {
        self.default = Some(expr.into());
        self
    }

    pub fn computed(mut self, expr: Expr, persisted: bool) -> Self {
        self.computed = Some(ComputedColumn { expr, persisted });
        self
    }

    pub fn identity(mut self, descriptor: SequenceDescriptor) -> Self {
        self.identity = Some(descriptor);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForeignKey {
    pub columns: Vec<String>,
    pub referenced_table: ObjectName,
    pub referenced_columns: Vec<String>,
    #[serde(default)]
    pub on_delete: ReferentialAction,
    #[serde(default)]
    pub on_update: ReferentialAction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ConstraintKind {
    PrimaryKey {
        columns: Vec<String>,
        #[serde(default)]
        clustered: bool,
    },
    Unique {
        columns: Vec<String>,
    },
    ForeignKey(ForeignKey),
    Check(Expr),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableConstraint {
    #[serde(default)]
    pub name: Option<String>,
    pub kind: ConstraintKind,
}

impl TableConstraint {
    pub fn primary_key(name: impl Into<String>, columns: &[&str]) -> Self {
        Self {
            name: Some(name.into()),
            kind: ConstraintKind::PrimaryKey {
                columns: columns.iter().map(|c| c.to_string()).collect(),
                clustered: false,
            },
        }
    }

    pub fn foreign_key(name: impl Into<String>, key: ForeignKey) -> Self {
        Self {
            name: Some(name.into()),
            kind: ConstraintKind::ForeignKey(key),
        }
    }
}

/// Storage on a partition scheme: `ON scheme(column)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Partitioning {
    pub scheme: String,
    pub column: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub name: ObjectName,
    #[serde(default)]
    pub columns: Vec<TableColumn>,
    #[serde(default)]
    pub constraints: Vec<TableConstraint>,
    #[serde(default)]
    pub partitioning: Option<Partitioning>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: ObjectName::new(name),
            columns: Vec::new(),
            constraints: Vec::new(),
            partitioning: None,
        }
    }

    pub fn in_schema(schema: Arc<Schema>, name: impl Into<String>) -> Self {
        Self {
            name: ObjectName::qualified(schema, name),
            ..Self::new("")
        }
    }

    pub fn column(mut self, column: TableColumn) -> Self {
        self.columns.push(column);
        self
    }

    pub fn constraint(mut self, constraint: TableConstraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    pub fn build(self) -> Arc<Self> {
        Arc::new(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct View {
    pub name: ObjectName,
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub definition: Option<Query>,
    #[serde(default)]
    pub check_option: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum IndexTarget {
    Column(String),
    Expression(Expr),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexColumn {
    pub target: IndexTarget,
    #[serde(default)]
    pub descending: bool,
}

impl IndexColumn {
    pub fn column(name: impl Into<String>) -> Self {
        Self {
            target: IndexTarget::Column(name.into()),
            descending: false,
        }
    }

    pub fn expression(expr: Expr) -> Self {
        Self {
            target: IndexTarget::Expression(expr),
            descending: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Index {
    pub name: String,
    pub table: ObjectName,
    pub columns: Vec<IndexColumn>,
    #[serde(default)]
    pub unique: bool,
    #[serde(default)]
    pub clustered: bool,
    /// Partial index predicate
    #[serde(default)]
    pub filter: Option<Expr>,
    /// Non-key columns stored in the index
    #[serde(default)]
    pub include: Vec<String>,
    #[serde(default)]
    pub fill_factor: Option<u8>,
    #[serde(default)]
    pub partitioning: Option<Partitioning>,
}

impl Index {
    pub fn new(name: impl Into<String>, table: ObjectName, columns: Vec<IndexColumn>) -> Self {
        Self {
            name: name.into(),
            table,
            columns,
            unique: false,
            clustered: false,
            filter: None,
            include: Vec::new(),
            fill_factor: None,
            partitioning: None,
        }
    }
}

/// Generation settings shared by sequences and identity columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SequenceDescriptor {
    #[serde(default)]
    pub start: Option<i64>,
    #[serde(default)]
    pub increment: Option<i64>,
    #[serde(default)]
    pub min: Option<i64>,
    #[serde(default)]
    pub max: Option<i64>,
    #[serde(default)]
    pub cycle: Option<bool>,
    #[serde(default)]
    pub cache: Option<i64>,
}

impl SequenceDescriptor {
    pub fn new(start: i64, increment: i64) -> Self {
        Self {
            start: Some(start),
            increment: Some(increment),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sequence {
    pub name: ObjectName,
    #[serde(default)]
    pub data_type: Option<DataType>,
    #[serde(default)]
    pub descriptor: SequenceDescriptor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainConstraint {
    #[serde(default)]
    pub name: Option<String>,
    pub check: Expr,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    pub name: ObjectName,
    pub data_type: DataType,
    #[serde(default)]
    pub default: Option<Expr>,
    #[serde(default)]
    pub collation: Option<ObjectName>,
    #[serde(default)]
    pub constraints: Vec<DomainConstraint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoundaryType {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartitionFunction {
    pub name: String,
    pub data_type: DataType,
    pub boundary: BoundaryType,
    pub values: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PartitionScheme {
    pub name: String,
    pub function: String,
    /// One filegroup with `all` set maps every partition to it
    pub filegroups: Vec<String>,
    #[serde(default)]
    pub all: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assertion {
    pub name: ObjectName,
    pub condition: Expr,
    #[serde(default)]
    pub deferrable: bool,
    #[serde(default)]
    pub initially_deferred: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Collation {
    pub name: ObjectName,
    pub character_set: String,
    /// Existing collation this one is derived from
    pub source: String,
    #[serde(default)]
    pub pad_space: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CharacterSet {
    pub name: ObjectName,
    /// Existing character set this one is derived from
    pub source: String,
    #[serde(default)]
    pub collation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Translation {
    pub name: ObjectName,
    pub source_charset: String,
    pub target_charset: String,
    pub source: String,
}
