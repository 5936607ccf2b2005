//! Dialect translators.
//!
//! The compiler walks the DOM and asks a [`Translator`] for the text of every
//! keyword, operator and literal at each section of a construct. Default
//! method bodies produce ANSI SQL; a dialect overrides only where it differs.
//! Translators return text and never see the output tree.

pub mod literals;
mod quoting;
mod sections;

pub use quoting::IdentifierQuoting;
pub use sections::*;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use uuid::Uuid;

use crate::ast::{
    AggregateKind, BinaryOp, DatePart, FetchDirection, FullTextKind, FunctionKind, Hint, JoinKind,
    LockMode, ObjectKind, ReferentialAction, Select, SetOp, TrimSide, UnaryOp, Value,
};
use crate::catalog::{BoundaryType, DataType, SequenceDescriptor};
use crate::error::{SqlDomError, SqlDomResult};

/// Dialect-specific SQL text.
pub trait Translator: Send + Sync {
    /// Dialect name used in logs.
    fn name(&self) -> &'static str;

    fn quoting(&self) -> &IdentifierQuoting;

    /// Quote one identifier part.
    fn quote_identifier(&self, name: &str) -> String {
        self.quoting().quote(name)
    }

    /// Inverse of [`quote_identifier`](Self::quote_identifier); unquoted
    /// names come back unchanged.
    fn unquote_identifier(&self, quoted: &str) -> String {
        self.quoting()
            .unquote(quoted)
            .unwrap_or_else(|| quoted.to_string())
    }

    /// Quote and dot-join a multipart name.
    fn quote_path(&self, parts: &[&str]) -> String {
        self.quoting().quote_path(parts)
    }

    /// Reference to a procedural variable.
    fn variable(&self, name: &str) -> String {
        name.to_string()
    }

    fn batch(&self, section: BatchSection) -> &'static str {
        match section {
            BatchSection::Entry | BatchSection::Exit => "",
            BatchSection::StatementDelimiter => ";\n",
        }
    }

    /// Terminator a standalone statement may carry.
    fn statement_delimiter(&self) -> &'static str {
        ";"
    }

    /// Combine separately compiled statements into one command text.
    ///
    /// Each statement is stripped of the batch wrapper and terminator it may
    /// already carry, so wrapping never nests.
    fn build_batch(&self, statements: &[String]) -> String {
        let entry = self.batch(BatchSection::Entry).trim();
        let exit = self.batch(BatchSection::Exit).trim();
        let delimiter = self.statement_delimiter();

        let body: Vec<&str> = statements
            .iter()
            .map(|s| {
                let mut s = s.trim();
                if !entry.is_empty() && !exit.is_empty() {
                    if let Some(inner) = s.strip_prefix(entry).and_then(|x| x.strip_suffix(exit)) {
                        s = inner.trim();
                    }
                }
                while let Some(inner) = s.strip_suffix(delimiter) {
                    s = inner.trim_end();
                }
                s
            })
            .filter(|s| !s.is_empty())
            .collect();

        let mut out = String::new();
        out.push_str(self.batch(BatchSection::Entry));
        out.push_str(&body.join(self.batch(BatchSection::StatementDelimiter)));
        out.push_str(self.batch(BatchSection::Exit));
        out
    }

    fn row(&self, section: RowSection) -> &'static str {
        match section {
            RowSection::Entry => "(",
            RowSection::ItemDelimiter => ", ",
            RowSection::Exit => ")",
        }
    }

    /// A predicate that is always true or always false.
    fn constant_predicate(&self, value: bool) -> &'static str {
        if value { "1 = 1" } else { "1 = 0" }
    }

    // ---------------------------------------------------------------------
    // Literals
    // ---------------------------------------------------------------------

    fn literal(&self, value: &Value) -> SqlDomResult<String> {
        match value {
            Value::Bool(b) => Ok(self.bool_literal(*b)),
            Value::Int(n) => Ok(n.to_string()),
            Value::UInt(n) => Ok(n.to_string()),
            Value::Float(f) => self.float_literal(*f),
            Value::Decimal(d) => Ok(d.to_string()),
            Value::String(s) => Ok(self.string_literal(s)),
            Value::Char(c) => Ok(self.string_literal(&c.to_string())),
            Value::Date(d) => self.date_literal(*d),
            Value::Time(t) => self.time_literal(*t),
            Value::DateTime(dt) => self.date_time_literal(*dt),
            Value::DateTimeOffset(dt) => self.date_time_offset_literal(*dt),
            Value::TimeSpan(span) => self.time_span_literal(*span),
            Value::Uuid(u) => self.uuid_literal(u),
            Value::Binary(bytes) => self.binary_literal(bytes),
        }
    }

    fn bool_literal(&self, value: bool) -> String {
        (if value { "TRUE" } else { "FALSE" }).to_string()
    }

    fn float_literal(&self, value: f64) -> SqlDomResult<String> {
        literals::finite_float(value)
    }

    fn string_literal(&self, value: &str) -> String {
        literals::quote_string(value)
    }

    fn date_literal(&self, value: NaiveDate) -> SqlDomResult<String> {
        Ok(format!("DATE '{}'", value.format("%Y-%m-%d")))
    }

    fn time_literal(&self, value: NaiveTime) -> SqlDomResult<String> {
        Ok(format!("TIME '{}'", value.format("%H:%M:%S%.3f")))
    }

    fn date_time_literal(&self, value: NaiveDateTime) -> SqlDomResult<String> {
        Ok(format!("TIMESTAMP '{}'", value.format("%Y-%m-%d %H:%M:%S%.3f")))
    }

    fn date_time_offset_literal(&self, value: DateTime<FixedOffset>) -> SqlDomResult<String> {
        Ok(format!(
            "TIMESTAMP '{}'",
            value.format("%Y-%m-%d %H:%M:%S%.3f%:z")
        ))
    }

    fn time_span_literal(&self, value: TimeDelta) -> SqlDomResult<String> {
        Ok(format!(
            "INTERVAL '{}' DAY TO SECOND",
            literals::day_to_second(value)
        ))
    }

    fn uuid_literal(&self, value: &Uuid) -> SqlDomResult<String> {
        Ok(format!("'{}'", value.hyphenated()))
    }

    fn binary_literal(&self, value: &[u8]) -> SqlDomResult<String> {
        Ok(format!("X'{}'", literals::hex(value)))
    }

    fn data_type(&self, data_type: &DataType) -> SqlDomResult<String> {
        Ok(match data_type {
            DataType::Boolean => "BOOLEAN".to_string(),
            DataType::TinyInt | DataType::SmallInt => "SMALLINT".to_string(),
            DataType::Int => "INTEGER".to_string(),
            DataType::BigInt => "BIGINT".to_string(),
            DataType::Decimal { precision, scale } => format!("DECIMAL({precision}, {scale})"),
            DataType::Float => "REAL".to_string(),
            DataType::Double => "DOUBLE PRECISION".to_string(),
            DataType::Char(n) => format!("CHAR({n})"),
            DataType::VarChar(Some(n)) => format!("VARCHAR({n})"),
            DataType::VarChar(None) | DataType::Text => "CLOB".to_string(),
            DataType::Binary(n) => format!("BINARY({n})"),
            DataType::VarBinary(Some(n)) => format!("VARBINARY({n})"),
            DataType::VarBinary(None) => "BLOB".to_string(),
            DataType::Date => "DATE".to_string(),
            DataType::Time => "TIME".to_string(),
            DataType::DateTime => "TIMESTAMP".to_string(),
            DataType::DateTimeOffset => "TIMESTAMP WITH TIME ZONE".to_string(),
            DataType::Interval => "INTERVAL DAY TO SECOND".to_string(),
            DataType::Guid => "CHAR(36)".to_string(),
            DataType::Custom(name) => name.clone(),
        })
    }

    // ---------------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------------

    fn select(&self, section: SelectSection, select: &Select) -> &'static str {
        match section {
            SelectSection::Entry if select.distinct => "SELECT DISTINCT",
            SelectSection::Entry => "SELECT",
            SelectSection::From => "FROM",
            SelectSection::Where => "WHERE",
            SelectSection::GroupBy => "GROUP BY",
            SelectSection::Having => "HAVING",
            SelectSection::OrderBy => "ORDER BY",
            SelectSection::Limit => "FETCH FIRST",
            SelectSection::LimitEnd => "ROWS ONLY",
            SelectSection::Offset => "OFFSET",
            SelectSection::OffsetEnd => "ROWS",
            SelectSection::HintsEntry
            | SelectSection::HintDelimiter
            | SelectSection::HintsExit
            | SelectSection::Exit => "",
        }
    }

    /// Whether OFFSET is written before the row limit.
    fn offset_before_limit(&self) -> bool {
        true
    }

    /// Whether paging needs an ORDER BY clause to be valid.
    fn requires_order_for_paging(&self) -> bool {
        false
    }

    /// Whether a row limit needs an OFFSET clause to be valid.
    fn requires_offset_for_limit(&self) -> bool {
        false
    }

    /// Limit written when only an offset is requested and the syntax
    /// needs both.
    fn unbounded_limit(&self) -> Option<&'static str> {
        None
    }

    /// Order expression used when paging needs ORDER BY and none was given.
    fn neutral_order(&self) -> &'static str {
        "(SELECT NULL)"
    }

    fn set_operation(&self, op: SetOp, all: bool) -> SqlDomResult<&'static str> {
        Ok(match (op, all) {
            (SetOp::Union, false) => "UNION",
            (SetOp::Union, true) => "UNION ALL",
            (SetOp::Except, false) => "EXCEPT",
            (SetOp::Except, true) => "EXCEPT ALL",
            (SetOp::Intersect, false) => "INTERSECT",
            (SetOp::Intersect, true) => "INTERSECT ALL",
        })
    }

    /// Whether set operation operands may be wrapped in parentheses.
    fn parenthesize_set_operands(&self) -> bool {
        true
    }

    fn join(&self, kind: JoinKind) -> SqlDomResult<&'static str> {
        match kind {
            JoinKind::Inner => Ok("INNER JOIN"),
            JoinKind::LeftOuter => Ok("LEFT OUTER JOIN"),
            JoinKind::RightOuter => Ok("RIGHT OUTER JOIN"),
            JoinKind::FullOuter => Ok("FULL OUTER JOIN"),
            JoinKind::Cross => Ok("CROSS JOIN"),
            JoinKind::CrossApply => Err(SqlDomError::not_supported("CROSS APPLY")),
            JoinKind::OuterApply => Err(SqlDomError::not_supported("OUTER APPLY")),
        }
    }

    fn join_condition(&self) -> &'static str {
        "ON"
    }

    /// Keyword between a table and its alias.
    fn table_alias_keyword(&self) -> &'static str {
        "AS"
    }

    fn column_alias_keyword(&self) -> &'static str {
        "AS"
    }

    fn order_direction(&self, ascending: bool) -> &'static str {
        if ascending { "ASC" } else { "DESC" }
    }

    /// Trailing lock clause of a SELECT.
    fn select_lock(&self, mode: LockMode) -> SqlDomResult<&'static str> {
        match mode {
            LockMode::Update => Ok("FOR UPDATE"),
            LockMode::Shared => Err(SqlDomError::not_supported("FOR SHARE")),
            LockMode::Exclusive => Err(SqlDomError::not_supported("exclusive lock")),
            LockMode::SkipLocked => Err(SqlDomError::not_supported("SKIP LOCKED")),
            LockMode::NoWait => Err(SqlDomError::not_supported("NOWAIT")),
        }
    }

    /// Lock hint placed after every table of the FROM clause. Dialects
    /// returning `Some` here never get [`select_lock`](Self::select_lock).
    fn table_lock_hint(&self, _mode: LockMode) -> SqlDomResult<Option<&'static str>> {
        Ok(None)
    }

    /// Text of an optimizer hint. `None` drops the hint.
    fn hint(&self, _hint: &Hint) -> Option<String> {
        None
    }

    fn insert(&self, section: InsertSection) -> &'static str {
        match section {
            InsertSection::Entry => "INSERT INTO",
            InsertSection::ColumnsEntry => "(",
            InsertSection::ColumnsExit => ")",
            InsertSection::Values => "VALUES",
            InsertSection::DefaultValues => "DEFAULT VALUES",
            InsertSection::Exit => "",
        }
    }

    fn update(&self, section: UpdateSection) -> &'static str {
        match section {
            UpdateSection::Entry => "UPDATE",
            UpdateSection::Limit => "LIMIT",
            UpdateSection::LimitEnd => "",
            UpdateSection::Set => "SET",
            UpdateSection::From => "FROM",
            UpdateSection::Where => "WHERE",
            UpdateSection::Exit => "",
        }
    }

    fn delete(&self, section: DeleteSection) -> &'static str {
        match section {
            DeleteSection::Entry => "DELETE",
            DeleteSection::Limit => "LIMIT",
            DeleteSection::LimitEnd => "",
            DeleteSection::Target => "FROM",
            DeleteSection::From => "USING",
            DeleteSection::Where => "WHERE",
            DeleteSection::Exit => "",
        }
    }

    /// Whether an UPDATE/DELETE row limit precedes the target table.
    fn dml_limit_before_target(&self) -> bool {
        false
    }

    // ---------------------------------------------------------------------
    // Expressions
    // ---------------------------------------------------------------------

    fn binary(&self, op: BinaryOp, section: BinarySection) -> SqlDomResult<&'static str> {
        Ok(match section {
            BinarySection::Entry => "(",
            BinarySection::Exit => ")",
            BinarySection::Operator => match op {
                BinaryOp::And => "AND",
                BinaryOp::Or => "OR",
                BinaryOp::Equals => "=",
                BinaryOp::NotEquals => "<>",
                BinaryOp::GreaterThan => ">",
                BinaryOp::GreaterThanOrEquals => ">=",
                BinaryOp::LessThan => "<",
                BinaryOp::LessThanOrEquals => "<=",
                BinaryOp::Add => "+",
                BinaryOp::Subtract => "-",
                BinaryOp::Multiply => "*",
                BinaryOp::Divide => "/",
                BinaryOp::Modulo => "%",
                BinaryOp::Concat => "||",
                BinaryOp::BitAnd => "&",
                BinaryOp::BitOr => "|",
                BinaryOp::BitXor => "^",
                BinaryOp::In => "IN",
                BinaryOp::NotIn => "NOT IN",
            },
        })
    }

    fn unary(&self, op: UnaryOp, section: UnarySection) -> &'static str {
        match (op, section) {
            (UnaryOp::Not, UnarySection::Entry) => "NOT",
            (UnaryOp::Negate, UnarySection::Entry) => "-(",
            (UnaryOp::BitNot, UnarySection::Entry) => "~(",
            (UnaryOp::Negate | UnaryOp::BitNot, UnarySection::Exit) => ")",
            (UnaryOp::IsNull | UnaryOp::IsNotNull, UnarySection::Entry) => "(",
            (UnaryOp::IsNull, UnarySection::Exit) => "IS NULL)",
            (UnaryOp::IsNotNull, UnarySection::Exit) => "IS NOT NULL)",
            (UnaryOp::Exists, UnarySection::Entry) => "EXISTS",
            (UnaryOp::All, UnarySection::Entry) => "ALL",
            (UnaryOp::Any, UnarySection::Entry) => "ANY",
            (UnaryOp::Some, UnarySection::Entry) => "SOME",
            _ => "",
        }
    }

    fn between(&self, negated: bool) -> &'static str {
        if negated { "NOT BETWEEN" } else { "BETWEEN" }
    }

    fn like(&self, negated: bool) -> &'static str {
        if negated { "NOT LIKE" } else { "LIKE" }
    }

    fn case(&self, section: CaseSection) -> &'static str {
        match section {
            CaseSection::Entry => "CASE",
            CaseSection::When => "WHEN",
            CaseSection::Then => "THEN",
            CaseSection::Else => "ELSE",
            CaseSection::Exit => "END",
        }
    }

    fn cast(&self, section: CastSection) -> &'static str {
        match section {
            CastSection::Entry => "CAST(",
            CastSection::As => "AS",
            CastSection::Exit => ")",
        }
    }

    fn function(&self, kind: FunctionKind, section: FunctionSection) -> SqlDomResult<&'static str> {
        match section {
            FunctionSection::ArgumentDelimiter if kind == FunctionKind::Position => return Ok("IN"),
            FunctionSection::ArgumentDelimiter => return Ok(", "),
            FunctionSection::Exit if kind.is_niladic() => return Ok(""),
            FunctionSection::Exit => return Ok(")"),
            FunctionSection::Entry => {}
        }
        Ok(match kind {
            FunctionKind::Abs => "ABS(",
            FunctionKind::Ceiling => "CEILING(",
            FunctionKind::Floor => "FLOOR(",
            FunctionKind::Round => "ROUND(",
            FunctionKind::Power => "POWER(",
            FunctionKind::Sqrt => "SQRT(",
            FunctionKind::CharLength => "CHAR_LENGTH(",
            FunctionKind::Lower => "LOWER(",
            FunctionKind::Upper => "UPPER(",
            FunctionKind::Substring => "SUBSTRING(",
            FunctionKind::Replace => "REPLACE(",
            FunctionKind::Position => "POSITION(",
            FunctionKind::Coalesce => "COALESCE(",
            FunctionKind::NullIf => "NULLIF(",
            FunctionKind::CurrentDate => "CURRENT_DATE",
            FunctionKind::CurrentTime => "CURRENT_TIME",
            FunctionKind::CurrentTimestamp => "CURRENT_TIMESTAMP",
            FunctionKind::CurrentUser => "CURRENT_USER",
            FunctionKind::NewGuid => return Err(SqlDomError::not_supported("GUID generation")),
        })
    }

    /// Spelling of a provider-defined function.
    fn custom_function(&self, name: &str, _section: FunctionSection) -> SqlDomResult<String> {
        Err(SqlDomError::not_supported(format!("custom function '{name}'")))
    }

    fn aggregate(&self, kind: AggregateKind) -> &'static str {
        match kind {
            AggregateKind::Count => "COUNT(",
            AggregateKind::Sum => "SUM(",
            AggregateKind::Avg => "AVG(",
            AggregateKind::Min => "MIN(",
            AggregateKind::Max => "MAX(",
        }
    }

    fn row_number(&self, section: RowNumberSection) -> &'static str {
        match section {
            RowNumberSection::Entry => "ROW_NUMBER() OVER (",
            RowNumberSection::PartitionBy => "PARTITION BY",
            RowNumberSection::OrderBy => "ORDER BY",
            RowNumberSection::Exit => ")",
        }
    }

    /// `TRIM([side] [chars] FROM expr)`; `Entry` and `Exit` only.
    fn trim(&self, side: TrimSide, chars: Option<&str>, section: UnarySection) -> SqlDomResult<String> {
        Ok(match section {
            UnarySection::Entry => {
                let side = match side {
                    TrimSide::Both => "BOTH",
                    TrimSide::Leading => "LEADING",
                    TrimSide::Trailing => "TRAILING",
                };
                match chars {
                    Some(chars) => format!("TRIM({side} {} FROM", self.string_literal(chars)),
                    None => format!("TRIM({side} FROM"),
                }
            }
            UnarySection::Exit => ")".to_string(),
        })
    }

    fn extract(&self, part: DatePart, section: UnarySection) -> SqlDomResult<String> {
        if section == UnarySection::Exit {
            return Ok(")".to_string());
        }
        let field = match part {
            DatePart::Year => "YEAR",
            DatePart::Month => "MONTH",
            DatePart::Day => "DAY",
            DatePart::Hour => "HOUR",
            DatePart::Minute => "MINUTE",
            DatePart::Second => "SECOND",
            DatePart::Millisecond | DatePart::DayOfWeek | DatePart::DayOfYear => {
                return Err(SqlDomError::not_supported(format!("EXTRACT of {part:?}")));
            }
        };
        Ok(format!("EXTRACT({field} FROM"))
    }

    fn collate(&self) -> &'static str {
        "COLLATE"
    }

    fn full_text(&self, kind: FullTextKind, _section: FullTextSection) -> SqlDomResult<&'static str> {
        Err(SqlDomError::not_supported(match kind {
            FullTextKind::Contains => "full-text CONTAINS",
            FullTextKind::FreeText => "full-text FREETEXT",
        }))
    }

    /// Text around a sequence name in a next-value expression. A non-empty
    /// entry is followed directly by the name, so it carries its own
    /// trailing separator.
    fn next_value(&self, section: NextValueSection) -> SqlDomResult<&'static str> {
        Ok(match section {
            NextValueSection::Entry => "NEXT VALUE FOR ",
            NextValueSection::Exit => "",
        })
    }

    fn comment(&self, text: &str) -> String {
        format!("/* {text} */")
    }

    // ---------------------------------------------------------------------
    // Schema definition
    // ---------------------------------------------------------------------

    fn create_table(&self, section: CreateTableSection) -> SqlDomResult<&'static str> {
        match section {
            CreateTableSection::Entry => Ok("CREATE TABLE"),
            CreateTableSection::ElementsEntry => Ok("("),
            CreateTableSection::ElementDelimiter => Ok(", "),
            CreateTableSection::ElementsExit => Ok(")"),
            CreateTableSection::Partition => Err(SqlDomError::not_supported("table partitioning")),
            CreateTableSection::Exit => Ok(""),
        }
    }

    fn column(&self, section: ColumnSection) -> SqlDomResult<&'static str> {
        Ok(match section {
            ColumnSection::DefaultValue => "DEFAULT",
            ColumnSection::ComputedEntry => "GENERATED ALWAYS AS (",
            ColumnSection::ComputedExit => ")",
            ColumnSection::Persisted => "STORED",
            ColumnSection::NotNull => "NOT NULL",
            ColumnSection::Collate => "COLLATE",
        })
    }

    /// Identity clause of a column definition.
    fn identity(&self, descriptor: &SequenceDescriptor) -> SqlDomResult<String> {
        let options = sequence_options(self, descriptor);
        if options.is_empty() {
            Ok("GENERATED BY DEFAULT AS IDENTITY".to_string())
        } else {
            Ok(format!("GENERATED BY DEFAULT AS IDENTITY ({options})"))
        }
    }

    fn constraint(&self, section: ConstraintSection) -> &'static str {
        match section {
            ConstraintSection::Entry => "CONSTRAINT",
            ConstraintSection::PrimaryKey => "PRIMARY KEY",
            ConstraintSection::Clustered => "CLUSTERED",
            ConstraintSection::Unique => "UNIQUE",
            ConstraintSection::ForeignKey => "FOREIGN KEY",
            ConstraintSection::References => "REFERENCES",
            ConstraintSection::OnDelete => "ON DELETE",
            ConstraintSection::OnUpdate => "ON UPDATE",
            ConstraintSection::Check => "CHECK",
        }
    }

    /// `None` for the implicit default action.
    fn referential_action(&self, action: ReferentialAction) -> Option<&'static str> {
        match action {
            ReferentialAction::NoAction => None,
            ReferentialAction::Restrict => Some("RESTRICT"),
            ReferentialAction::Cascade => Some("CASCADE"),
            ReferentialAction::SetNull => Some("SET NULL"),
            ReferentialAction::SetDefault => Some("SET DEFAULT"),
        }
    }

    fn alter_table(&self, section: AlterTableSection) -> SqlDomResult<&'static str> {
        Ok(match section {
            AlterTableSection::Entry => "ALTER TABLE",
            AlterTableSection::AddColumn => "ADD COLUMN",
            AlterTableSection::DropColumn => "DROP COLUMN",
            AlterTableSection::AlterColumn => "ALTER COLUMN",
            AlterTableSection::SetDefault => "SET DEFAULT",
            AlterTableSection::DropDefault => "DROP DEFAULT",
            AlterTableSection::SetType => "SET DATA TYPE",
            AlterTableSection::SetNotNull => "SET NOT NULL",
            AlterTableSection::DropNotNull => "DROP NOT NULL",
            AlterTableSection::RenameColumn => "RENAME COLUMN",
            AlterTableSection::RenameTo => "RENAME TO",
            AlterTableSection::AddConstraint => "ADD",
            AlterTableSection::DropConstraint => "DROP CONSTRAINT",
            AlterTableSection::Cascade => "CASCADE",
        })
    }

    fn truncate_table(&self) -> &'static str {
        "TRUNCATE TABLE"
    }

    fn domain(&self, section: DomainSection) -> SqlDomResult<&'static str> {
        Ok(match section {
            DomainSection::Entry => "CREATE DOMAIN",
            DomainSection::AlterEntry => "ALTER DOMAIN",
            DomainSection::As => "AS",
            DomainSection::SetDefault => "SET DEFAULT",
            DomainSection::DropDefault => "DROP DEFAULT",
            DomainSection::AddConstraint => "ADD",
            DomainSection::DropConstraint => "DROP CONSTRAINT",
        })
    }

    fn sequence(&self, section: SequenceSection) -> SqlDomResult<&'static str> {
        Ok(match section {
            SequenceSection::Entry => "CREATE SEQUENCE",
            SequenceSection::AlterEntry => "ALTER SEQUENCE",
            SequenceSection::As => "AS",
        })
    }

    fn sequence_descriptor(&self, section: SequenceDescriptorSection) -> &'static str {
        match section {
            SequenceDescriptorSection::StartValue => "START WITH",
            SequenceDescriptorSection::RestartValue => "RESTART WITH",
            SequenceDescriptorSection::Increment => "INCREMENT BY",
            SequenceDescriptorSection::MinValue => "MINVALUE",
            SequenceDescriptorSection::MaxValue => "MAXVALUE",
            SequenceDescriptorSection::Cycle => "CYCLE",
            SequenceDescriptorSection::NoCycle => "NO CYCLE",
            SequenceDescriptorSection::Cache => "CACHE",
        }
    }

    fn create_schema(&self) -> SqlDomResult<&'static str> {
        Ok("CREATE SCHEMA")
    }

    fn schema_authorization(&self) -> &'static str {
        "AUTHORIZATION"
    }

    fn view(&self, section: ViewSection, or_replace: bool) -> SqlDomResult<&'static str> {
        Ok(match section {
            ViewSection::Entry if or_replace => "CREATE OR REPLACE VIEW",
            ViewSection::Entry => "CREATE VIEW",
            ViewSection::As => "AS",
            ViewSection::CheckOption => "WITH CHECK OPTION",
        })
    }

    fn index(&self, section: IndexSection) -> SqlDomResult<&'static str> {
        match section {
            IndexSection::Entry => Ok("CREATE"),
            IndexSection::Unique => Ok("UNIQUE"),
            IndexSection::Clustered => Ok("CLUSTERED"),
            IndexSection::NonClustered => Ok(""),
            IndexSection::Index => Ok("INDEX"),
            IndexSection::On => Ok("ON"),
            IndexSection::Include => Ok("INCLUDE"),
            IndexSection::Where => Ok("WHERE"),
            IndexSection::FillFactor => Err(SqlDomError::not_supported("index fill factor")),
            IndexSection::FillFactorExit => Ok(")"),
            IndexSection::Partition => Err(SqlDomError::not_supported("index partitioning")),
        }
    }

    /// Whether `WITH (...)` index options precede the filter predicate.
    fn index_options_before_filter(&self) -> bool {
        false
    }

    /// Complete CREATE PARTITION FUNCTION text from quoted parts.
    fn create_partition_function(
        &self,
        _name: &str,
        _data_type: &str,
        _boundary: BoundaryType,
        _values: &[String],
    ) -> SqlDomResult<String> {
        Err(SqlDomError::not_supported("partition functions"))
    }

    /// Complete CREATE PARTITION SCHEME text from quoted parts.
    fn create_partition_scheme(
        &self,
        _name: &str,
        _function: &str,
        _filegroups: &[String],
        _all: bool,
    ) -> SqlDomResult<String> {
        Err(SqlDomError::not_supported("partition schemes"))
    }

    fn assertion(&self, section: AssertionSection) -> SqlDomResult<&'static str> {
        Ok(match section {
            AssertionSection::Entry => "CREATE ASSERTION",
            AssertionSection::Check => "CHECK",
            AssertionSection::Deferrable => "DEFERRABLE",
            AssertionSection::InitiallyDeferred => "INITIALLY DEFERRED",
        })
    }

    /// An empty `For` section leaves out the character set.
    fn collation(&self, section: CollationSection) -> SqlDomResult<&'static str> {
        Ok(match section {
            CollationSection::Entry => "CREATE COLLATION",
            CollationSection::For => "FOR",
            CollationSection::From => "FROM",
            CollationSection::PadSpace => "PAD SPACE",
            CollationSection::NoPad => "NO PAD",
        })
    }

    fn character_set(&self, section: CharacterSetSection) -> SqlDomResult<&'static str> {
        Ok(match section {
            CharacterSetSection::Entry => "CREATE CHARACTER SET",
            CharacterSetSection::Source => "AS GET",
            CharacterSetSection::Collate => "COLLATE",
        })
    }

    fn translation(&self, section: TranslationSection) -> SqlDomResult<&'static str> {
        Ok(match section {
            TranslationSection::Entry => "CREATE TRANSLATION",
            TranslationSection::For => "FOR",
            TranslationSection::To => "TO",
            TranslationSection::From => "FROM",
        })
    }

    fn drop_object(&self, kind: ObjectKind, section: DropSection) -> SqlDomResult<&'static str> {
        Ok(match section {
            DropSection::Entry => match kind {
                ObjectKind::Table => "DROP TABLE",
                ObjectKind::View => "DROP VIEW",
                ObjectKind::Domain => "DROP DOMAIN",
                ObjectKind::Sequence => "DROP SEQUENCE",
                ObjectKind::Schema => "DROP SCHEMA",
                ObjectKind::Index => "DROP INDEX",
                ObjectKind::PartitionFunction => "DROP PARTITION FUNCTION",
                ObjectKind::PartitionScheme => "DROP PARTITION SCHEME",
                ObjectKind::Assertion => "DROP ASSERTION",
                ObjectKind::Collation => "DROP COLLATION",
                ObjectKind::CharacterSet => "DROP CHARACTER SET",
                ObjectKind::Translation => "DROP TRANSLATION",
            },
            DropSection::On => "",
            DropSection::Cascade => "CASCADE",
            DropSection::Restrict => "RESTRICT",
        })
    }

    // ---------------------------------------------------------------------
    // Procedural statements
    // ---------------------------------------------------------------------

    fn declare_variable(&self, name: &str, data_type: &str) -> SqlDomResult<String> {
        Ok(format!("DECLARE {} {data_type}", self.variable(name)))
    }

    /// Text before the assigned value.
    fn assign(&self, name: &str) -> String {
        format!("SET {} =", self.variable(name))
    }

    fn block(&self, section: BlockSection) -> &'static str {
        match section {
            BlockSection::Entry => "BEGIN",
            BlockSection::Exit => "END",
        }
    }

    fn if_statement(&self, section: IfSection) -> &'static str {
        match section {
            IfSection::Entry => "IF",
            IfSection::Then => "THEN",
            IfSection::Else => "ELSE",
            IfSection::Exit => "END IF",
        }
    }

    fn while_statement(&self, section: WhileSection) -> &'static str {
        match section {
            WhileSection::Entry => "WHILE",
            WhileSection::Body => "DO",
            WhileSection::Exit => "END WHILE",
        }
    }

    fn cursor(&self, section: CursorSection) -> SqlDomResult<&'static str> {
        Ok(match section {
            CursorSection::Declare => "DECLARE",
            CursorSection::Insensitive => "INSENSITIVE",
            CursorSection::Scroll => "SCROLL",
            CursorSection::For => "CURSOR FOR",
            CursorSection::ReadOnly => "FOR READ ONLY",
            CursorSection::Open => "OPEN",
            CursorSection::Fetch => "FETCH",
            CursorSection::FetchFrom => "FROM",
            CursorSection::Into => "INTO",
            CursorSection::Close => "CLOSE",
        })
    }

    fn fetch_direction(&self, direction: FetchDirection) -> SqlDomResult<String> {
        Ok(match direction {
            FetchDirection::Next => "NEXT".to_string(),
            FetchDirection::Prior => "PRIOR".to_string(),
            FetchDirection::First => "FIRST".to_string(),
            FetchDirection::Last => "LAST".to_string(),
            FetchDirection::Absolute(n) => format!("ABSOLUTE {n}"),
            FetchDirection::Relative(n) => format!("RELATIVE {n}"),
        })
    }
}

/// Space-separated sequence options in the translator's spelling.
pub fn sequence_options<T: Translator + ?Sized>(
    translator: &T,
    descriptor: &SequenceDescriptor,
) -> String {
    use SequenceDescriptorSection as S;

    let mut parts = Vec::new();
    if let Some(start) = descriptor.start {
        parts.push(format!("{} {start}", translator.sequence_descriptor(S::StartValue)));
    }
    if let Some(increment) = descriptor.increment {
        parts.push(format!("{} {increment}", translator.sequence_descriptor(S::Increment)));
    }
    if let Some(min) = descriptor.min {
        parts.push(format!("{} {min}", translator.sequence_descriptor(S::MinValue)));
    }
    if let Some(max) = descriptor.max {
        parts.push(format!("{} {max}", translator.sequence_descriptor(S::MaxValue)));
    }
    if let Some(cache) = descriptor.cache {
        parts.push(format!("{} {cache}", translator.sequence_descriptor(S::Cache)));
    }
    match descriptor.cycle {
        Some(true) => parts.push(translator.sequence_descriptor(S::Cycle).to_string()),
        Some(false) => parts.push(translator.sequence_descriptor(S::NoCycle).to_string()),
        None => {}
    }
    parts.join(" ")
}

/// Plain ANSI SQL.
pub struct AnsiTranslator {
    quoting: IdentifierQuoting,
}

impl AnsiTranslator {
    pub fn new() -> Self {
        Self::with_quoting(IdentifierQuoting::double_quotes())
    }

    pub fn with_quoting(quoting: IdentifierQuoting) -> Self {
        Self { quoting }
    }
}

impl Default for AnsiTranslator {
    fn default() -> Self {
        Self::new()
    }
}

impl Translator for AnsiTranslator {
    fn name(&self) -> &'static str {
        "ansi"
    }

    fn quoting(&self) -> &IdentifierQuoting {
        &self.quoting
    }
}
