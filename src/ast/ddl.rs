//! Schema definition statements.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::Expr;
use crate::catalog::{
    Assertion, CharacterSet, Collation, DataType, Domain, DomainConstraint, Index, ObjectName,
    PartitionFunction, PartitionScheme, Schema, Sequence, SequenceDescriptor, Table, TableColumn,
    TableConstraint, Translation, View,
};

/// Kinds of schema objects, used by DROP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    Table,
    View,
    Domain,
    Sequence,
    Schema,
    Index,
    PartitionFunction,
    PartitionScheme,
    Assertion,
    Collation,
    CharacterSet,
    Translation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ColumnChange {
    SetDefault(Expr),
    DropDefault,
    SetType(DataType),
    SetNotNull,
    DropNotNull,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AlterTableAction {
    AddColumn(TableColumn),
    DropColumn { name: String, cascade: bool },
    AlterColumn { name: String, change: ColumnChange },
    RenameColumn { from: String, to: String },
    AddConstraint(TableConstraint),
    DropConstraint { name: String, cascade: bool },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AlterDomainAction {
    SetDefault(Expr),
    DropDefault,
    AddConstraint(DomainConstraint),
    DropConstraint(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateView {
    pub view: Arc<View>,
    #[serde(default)]
    pub or_replace: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlterSequence {
    pub sequence: Arc<Sequence>,
    /// Only the fields that are set are changed
    pub changes: SequenceDescriptor,
    #[serde(default)]
    pub restart: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropObject {
    pub kind: ObjectKind,
    pub name: ObjectName,
    /// Owning table, for dialects that scope index names by table
    #[serde(default)]
    pub table: Option<ObjectName>,
    /// `Some(true)` = CASCADE, `Some(false)` = RESTRICT
    #[serde(default)]
    pub cascade: Option<bool>,
}

impl DropObject {
    pub fn new(kind: ObjectKind, name: ObjectName) -> Self {
        Self {
            kind,
            name,
            table: None,
            cascade: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DdlStatement {
    CreateTable(Arc<Table>),
    AlterTable {
        table: ObjectName,
        action: AlterTableAction,
    },
    RenameTable {
        table: ObjectName,
        new_name: String,
    },
    TruncateTable(ObjectName),
    CreateDomain(Arc<Domain>),
    AlterDomain {
        domain: ObjectName,
        action: AlterDomainAction,
    },
    CreateSequence(Arc<Sequence>),
    AlterSequence(AlterSequence),
    CreateSchema(Arc<Schema>),
    CreateView(CreateView),
    CreateIndex(Arc<Index>),
    CreatePartitionFunction(Arc<PartitionFunction>),
    CreatePartitionScheme(Arc<PartitionScheme>),
    CreateAssertion(Arc<Assertion>),
    CreateCollation(Arc<Collation>),
    CreateCharacterSet(Arc<CharacterSet>),
    CreateTranslation(Arc<Translation>),
    Drop(DropObject),
}

impl DdlStatement {
    pub fn kind(&self) -> &'static str {
        match self {
            DdlStatement::CreateTable(_) => "create table",
            DdlStatement::AlterTable { .. } => "alter table",
            DdlStatement::RenameTable { .. } => "rename table",
            DdlStatement::TruncateTable(_) => "truncate table",
            DdlStatement::CreateDomain(_) => "create domain",
            DdlStatement::AlterDomain { .. } => "alter domain",
            DdlStatement::CreateSequence(_) => "create sequence",
            DdlStatement::AlterSequence(_) => "alter sequence",
            DdlStatement::CreateSchema(_) => "create schema",
            DdlStatement::CreateView(_) => "create view",
            DdlStatement::CreateIndex(_) => "create index",
            DdlStatement::CreatePartitionFunction(_) => "create partition function",
            DdlStatement::CreatePartitionScheme(_) => "create partition scheme",
            DdlStatement::CreateAssertion(_) => "create assertion",
            DdlStatement::CreateCollation(_) => "create collation",
            DdlStatement::CreateCharacterSet(_) => "create character set",
            DdlStatement::CreateTranslation(_) => "create translation",
            DdlStatement::Drop(_) => "drop",
        }
    }
}
