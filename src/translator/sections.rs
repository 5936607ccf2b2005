//! Positions within a construct where a translator contributes text.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BatchSection {
    Entry,
    StatementDelimiter,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowSection {
    Entry,
    ItemDelimiter,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectSection {
    Entry,
    From,
    Where,
    GroupBy,
    Having,
    OrderBy,
    Limit,
    LimitEnd,
    Offset,
    OffsetEnd,
    HintsEntry,
    HintDelimiter,
    HintsExit,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InsertSection {
    Entry,
    ColumnsEntry,
    ColumnsExit,
    Values,
    DefaultValues,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpdateSection {
    Entry,
    Limit,
    LimitEnd,
    Set,
    From,
    Where,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeleteSection {
    Entry,
    Limit,
    LimitEnd,
    Target,
    From,
    Where,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinarySection {
    Entry,
    Operator,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnarySection {
    Entry,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseSection {
    Entry,
    When,
    Then,
    Else,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastSection {
    Entry,
    As,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionSection {
    Entry,
    ArgumentDelimiter,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowNumberSection {
    Entry,
    PartitionBy,
    OrderBy,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FullTextSection {
    Entry,
    ColumnsEntry,
    ColumnsExit,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NextValueSection {
    Entry,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CreateTableSection {
    Entry,
    ElementsEntry,
    ElementDelimiter,
    ElementsExit,
    Partition,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnSection {
    DefaultValue,
    ComputedEntry,
    ComputedExit,
    Persisted,
    NotNull,
    Collate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintSection {
    Entry,
    PrimaryKey,
    Clustered,
    Unique,
    ForeignKey,
    References,
    OnDelete,
    OnUpdate,
    Check,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlterTableSection {
    Entry,
    AddColumn,
    DropColumn,
    AlterColumn,
    SetDefault,
    DropDefault,
    SetType,
    SetNotNull,
    DropNotNull,
    RenameColumn,
    RenameTo,
    AddConstraint,
    DropConstraint,
    Cascade,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomainSection {
    Entry,
    AlterEntry,
    As,
    SetDefault,
    DropDefault,
    AddConstraint,
    DropConstraint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SequenceSection {
    Entry,
    AlterEntry,
    As,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SequenceDescriptorSection {
    StartValue,
    RestartValue,
    Increment,
    MinValue,
    MaxValue,
    Cycle,
    NoCycle,
    Cache,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewSection {
    Entry,
    As,
    CheckOption,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexSection {
    Entry,
    Unique,
    Clustered,
    NonClustered,
    Index,
    On,
    Include,
    Where,
    FillFactor,
    FillFactorExit,
    Partition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DropSection {
    Entry,
    On,
    Cascade,
    Restrict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssertionSection {
    Entry,
    Check,
    Deferrable,
    InitiallyDeferred,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockSection {
    Entry,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IfSection {
    Entry,
    Then,
    Else,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WhileSection {
    Entry,
    Body,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CursorSection {
    Declare,
    Insensitive,
    Scroll,
    For,
    ReadOnly,
    Open,
    Fetch,
    FetchFrom,
    Into,
    Close,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollationSection {
    Entry,
    For,
    From,
    PadSpace,
    NoPad,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterSetSection {
    Entry,
    Source,
    Collate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TranslationSection {
    Entry,
    For,
    To,
    From,
}
