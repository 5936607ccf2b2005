use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

use crate::ast::{
    BinaryOp, DatePart, FullTextKind, FunctionKind, Hint, JoinKind, LockMode, ObjectKind, Select,
    SetOp, TrimSide,
};
use crate::catalog::{BoundaryType, DataType, SequenceDescriptor};
use crate::error::{SqlDomError, SqlDomResult};
use crate::translator::*;

/// T-SQL for SQL Server 2017 and later.
pub struct SqlServerTranslator {
    ansi: AnsiTranslator,
}

impl SqlServerTranslator {
    pub fn new() -> Self {
        Self::with_quoting(IdentifierQuoting::brackets())
    }

    pub fn with_quoting(quoting: IdentifierQuoting) -> Self {
        Self {
            ansi: AnsiTranslator::with_quoting(quoting),
        }
    }
}

impl Default for SqlServerTranslator {
    fn default() -> Self {
        Self::new()
    }
}

impl Translator for SqlServerTranslator {
    fn name(&self) -> &'static str {
        "sqlserver"
    }

    fn quoting(&self) -> &IdentifierQuoting {
        self.ansi.quoting()
    }

    fn variable(&self, name: &str) -> String {
        format!("@{name}")
    }

    fn bool_literal(&self, value: bool) -> String {
        (if value { "1" } else { "0" }).to_string()
    }

    fn string_literal(&self, value: &str) -> String {
        format!("N{}", literals::quote_string(value))
    }

    fn date_literal(&self, value: NaiveDate) -> SqlDomResult<String> {
        Ok(format!("'{}'", value.format("%Y-%m-%d")))
    }

    fn time_literal(&self, value: NaiveTime) -> SqlDomResult<String> {
        Ok(format!("'{}'", value.format("%H:%M:%S%.3f")))
    }

    fn date_time_literal(&self, value: NaiveDateTime) -> SqlDomResult<String> {
        Ok(format!("'{}'", value.format("%Y-%m-%dT%H:%M:%S%.3f")))
    }

    fn date_time_offset_literal(&self, value: DateTime<FixedOffset>) -> SqlDomResult<String> {
        Ok(format!("'{}'", value.format("%Y-%m-%dT%H:%M:%S%.3f%:z")))
    }

    fn time_span_literal(&self, _value: TimeDelta) -> SqlDomResult<String> {
        Err(SqlDomError::not_supported("interval literal"))
    }

    fn binary_literal(&self, value: &[u8]) -> SqlDomResult<String> {
        Ok(format!("0x{}", literals::hex(value)))
    }

    fn data_type(&self, data_type: &DataType) -> SqlDomResult<String> {
        Ok(match data_type {
            DataType::Boolean => "BIT".to_string(),
            DataType::TinyInt => "TINYINT".to_string(),
            DataType::Int => "INT".to_string(),
            DataType::Double => "FLOAT".to_string(),
            DataType::Char(n) => format!("NCHAR({n})"),
            DataType::VarChar(Some(n)) => format!("NVARCHAR({n})"),
            DataType::VarChar(None) | DataType::Text => "NVARCHAR(MAX)".to_string(),
            DataType::VarBinary(None) => "VARBINARY(MAX)".to_string(),
            DataType::DateTime => "DATETIME2".to_string(),
            DataType::DateTimeOffset => "DATETIMEOFFSET".to_string(),
            DataType::Interval => return Err(SqlDomError::not_supported("interval type")),
            DataType::Guid => "UNIQUEIDENTIFIER".to_string(),
            other => return self.ansi.data_type(other),
        })
    }

    fn select(&self, section: SelectSection, select: &Select) -> &'static str {
        match section {
            SelectSection::Limit => "FETCH NEXT",
            SelectSection::HintsEntry => "OPTION (",
            SelectSection::HintDelimiter => ", ",
            SelectSection::HintsExit => ")",
            _ => self.ansi.select(section, select),
        }
    }

    fn requires_order_for_paging(&self) -> bool {
        true
    }

    fn requires_offset_for_limit(&self) -> bool {
        true
    }

    fn set_operation(&self, op: SetOp, all: bool) -> SqlDomResult<&'static str> {
        match (op, all) {
            (SetOp::Except | SetOp::Intersect, true) => {
                Err(SqlDomError::not_supported(format!("{op:?} ALL").to_uppercase()))
            }
            _ => self.ansi.set_operation(op, all),
        }
    }

    fn join(&self, kind: JoinKind) -> SqlDomResult<&'static str> {
        match kind {
            JoinKind::CrossApply => Ok("CROSS APPLY"),
            JoinKind::OuterApply => Ok("OUTER APPLY"),
            _ => self.ansi.join(kind),
        }
    }

    fn table_lock_hint(&self, mode: LockMode) -> SqlDomResult<Option<&'static str>> {
        Ok(Some(match mode {
            LockMode::Update => "WITH (UPDLOCK, ROWLOCK)",
            LockMode::Shared => "WITH (HOLDLOCK, ROWLOCK)",
            LockMode::Exclusive => "WITH (XLOCK, ROWLOCK)",
            LockMode::SkipLocked => "WITH (UPDLOCK, READPAST)",
            LockMode::NoWait => "WITH (UPDLOCK, NOWAIT)",
        }))
    }

    fn hint(&self, hint: &Hint) -> Option<String> {
        Some(match hint {
            Hint::ForceJoinOrder => "FORCE ORDER".to_string(),
            Hint::FastFirstRows(n) => format!("FAST {n}"),
            Hint::Native(text) => text.clone(),
        })
    }

    fn update(&self, section: UpdateSection) -> &'static str {
        match section {
            UpdateSection::Limit => "TOP (",
            UpdateSection::LimitEnd => ")",
            _ => self.ansi.update(section),
        }
    }

    fn delete(&self, section: DeleteSection) -> &'static str {
        match section {
            DeleteSection::Limit => "TOP (",
            DeleteSection::LimitEnd => ")",
            DeleteSection::From => "FROM",
            _ => self.ansi.delete(section),
        }
    }

    fn dml_limit_before_target(&self) -> bool {
        true
    }

    fn binary(&self, op: BinaryOp, section: BinarySection) -> SqlDomResult<&'static str> {
        match (op, section) {
            (BinaryOp::Concat, BinarySection::Operator) => Ok("+"),
            _ => self.ansi.binary(op, section),
        }
    }

    fn function(&self, kind: FunctionKind, section: FunctionSection) -> SqlDomResult<&'static str> {
        match (kind, section) {
            (FunctionKind::CharLength, FunctionSection::Entry) => Ok("LEN("),
            (FunctionKind::Position, FunctionSection::Entry) => Ok("CHARINDEX("),
            (FunctionKind::Position, FunctionSection::ArgumentDelimiter) => Ok(", "),
            (FunctionKind::CurrentDate, FunctionSection::Entry) => Ok("CAST(GETDATE() AS DATE)"),
            (FunctionKind::CurrentTime, FunctionSection::Entry) => Ok("CAST(GETDATE() AS TIME)"),
            (FunctionKind::NewGuid, FunctionSection::Entry) => Ok("NEWID("),
            _ => self.ansi.function(kind, section),
        }
    }

    fn custom_function(&self, name: &str, section: FunctionSection) -> SqlDomResult<String> {
        let entry = match name.to_ascii_lowercase().as_str() {
            "isnull" => "ISNULL(",
            "dateadd" => "DATEADD(",
            "datediff" => "DATEDIFF(",
            "format" => "FORMAT(",
            _ => return Err(SqlDomError::not_supported(format!("custom function '{name}'"))),
        };
        Ok(match section {
            FunctionSection::Entry => entry.to_string(),
            FunctionSection::ArgumentDelimiter => ", ".to_string(),
            FunctionSection::Exit => ")".to_string(),
        })
    }

    fn trim(&self, side: TrimSide, chars: Option<&str>, section: UnarySection) -> SqlDomResult<String> {
        if section == UnarySection::Exit {
            return Ok(")".to_string());
        }
        match (side, chars) {
            (TrimSide::Both, None) => Ok("TRIM(".to_string()),
            (TrimSide::Both, Some(chars)) => Ok(format!("TRIM({} FROM", self.string_literal(chars))),
            (TrimSide::Leading, None) => Ok("LTRIM(".to_string()),
            (TrimSide::Trailing, None) => Ok("RTRIM(".to_string()),
            (_, Some(_)) => Err(SqlDomError::not_supported("one-sided TRIM of specific characters")),
        }
    }

    fn extract(&self, part: DatePart, section: UnarySection) -> SqlDomResult<String> {
        let part = match part {
            DatePart::Year => "YEAR",
            DatePart::Month => "MONTH",
            DatePart::Day => "DAY",
            DatePart::Hour => "HOUR",
            DatePart::Minute => "MINUTE",
            DatePart::Second => "SECOND",
            DatePart::Millisecond => "MILLISECOND",
            DatePart::DayOfWeek => "WEEKDAY",
            DatePart::DayOfYear => "DAYOFYEAR",
        };
        Ok(match section {
            UnarySection::Entry => format!("DATEPART({part},"),
            UnarySection::Exit => ")".to_string(),
        })
    }

    fn full_text(&self, kind: FullTextKind, section: FullTextSection) -> SqlDomResult<&'static str> {
        Ok(match section {
            FullTextSection::Entry => match kind {
                FullTextKind::Contains => "CONTAINS(",
                FullTextKind::FreeText => "FREETEXT(",
            },
            FullTextSection::ColumnsEntry => "(",
            FullTextSection::ColumnsExit => "),",
            FullTextSection::Exit => ")",
        })
    }

    fn create_table(&self, section: CreateTableSection) -> SqlDomResult<&'static str> {
        match section {
            CreateTableSection::Partition => Ok("ON"),
            _ => self.ansi.create_table(section),
        }
    }

    fn column(&self, section: ColumnSection) -> SqlDomResult<&'static str> {
        match section {
            ColumnSection::ComputedEntry => Ok("AS ("),
            ColumnSection::Persisted => Ok("PERSISTED"),
            _ => self.ansi.column(section),
        }
    }

    fn identity(&self, descriptor: &SequenceDescriptor) -> SqlDomResult<String> {
        Ok(format!(
            "IDENTITY({}, {})",
            descriptor.start.unwrap_or(1),
            descriptor.increment.unwrap_or(1)
        ))
    }

    fn alter_table(&self, section: AlterTableSection) -> SqlDomResult<&'static str> {
        match section {
            AlterTableSection::AddColumn => Ok("ADD"),
            AlterTableSection::SetType => Ok(""),
            AlterTableSection::SetDefault
            | AlterTableSection::DropDefault
            | AlterTableSection::SetNotNull
            | AlterTableSection::DropNotNull => {
                Err(SqlDomError::not_supported("this ALTER COLUMN form"))
            }
            AlterTableSection::RenameColumn | AlterTableSection::RenameTo => {
                Err(SqlDomError::not_supported("RENAME (use sp_rename)"))
            }
            AlterTableSection::Cascade => Err(SqlDomError::not_supported("CASCADE")),
            _ => self.ansi.alter_table(section),
        }
    }

    fn domain(&self, _section: DomainSection) -> SqlDomResult<&'static str> {
        Err(SqlDomError::not_supported("domains"))
    }

    fn view(&self, section: ViewSection, or_replace: bool) -> SqlDomResult<&'static str> {
        match section {
            ViewSection::Entry if or_replace => Ok("CREATE OR ALTER VIEW"),
            _ => self.ansi.view(section, or_replace),
        }
    }

    fn index(&self, section: IndexSection) -> SqlDomResult<&'static str> {
        match section {
            IndexSection::NonClustered => Ok("NONCLUSTERED"),
            IndexSection::FillFactor => Ok("WITH (FILLFACTOR ="),
            IndexSection::Partition => Ok("ON"),
            _ => self.ansi.index(section),
        }
    }

    fn create_partition_function(
        &self,
        name: &str,
        data_type: &str,
        boundary: BoundaryType,
        values: &[String],
    ) -> SqlDomResult<String> {
        let boundary = match boundary {
            BoundaryType::Left => "LEFT",
            BoundaryType::Right => "RIGHT",
        };
        Ok(format!(
            "CREATE PARTITION FUNCTION {name} ({data_type}) AS RANGE {boundary} FOR VALUES ({})",
            values.join(", ")
        ))
    }

    fn create_partition_scheme(
        &self,
        name: &str,
        function: &str,
        filegroups: &[String],
        all: bool,
    ) -> SqlDomResult<String> {
        Ok(format!(
            "CREATE PARTITION SCHEME {name} AS PARTITION {function} {}TO ({})",
            if all { "ALL " } else { "" },
            filegroups.join(", ")
        ))
    }

    fn assertion(&self, _section: AssertionSection) -> SqlDomResult<&'static str> {
        Err(SqlDomError::not_supported("CREATE ASSERTION"))
    }

    fn collation(&self, _section: CollationSection) -> SqlDomResult<&'static str> {
        Err(SqlDomError::not_supported("CREATE COLLATION"))
    }

    fn character_set(&self, _section: CharacterSetSection) -> SqlDomResult<&'static str> {
        Err(SqlDomError::not_supported("CREATE CHARACTER SET"))
    }

    fn translation(&self, _section: TranslationSection) -> SqlDomResult<&'static str> {
        Err(SqlDomError::not_supported("CREATE TRANSLATION"))
    }

    fn drop_object(&self, kind: ObjectKind, section: DropSection) -> SqlDomResult<&'static str> {
        match (kind, section) {
            (ObjectKind::Index, DropSection::On) => Ok("ON"),
            (_, DropSection::Cascade) => Err(SqlDomError::not_supported("DROP ... CASCADE")),
            (_, DropSection::Restrict) => Ok(""),
            (
                ObjectKind::Domain
                | ObjectKind::Assertion
                | ObjectKind::Collation
                | ObjectKind::CharacterSet
                | ObjectKind::Translation,
                _,
            ) => Err(SqlDomError::not_supported(format!("DROP of {kind:?}"))),
            _ => self.ansi.drop_object(kind, section),
        }
    }

    fn if_statement(&self, section: IfSection) -> &'static str {
        match section {
            IfSection::Entry => "IF",
            IfSection::Else => "ELSE",
            IfSection::Then | IfSection::Exit => "",
        }
    }

    fn while_statement(&self, section: WhileSection) -> &'static str {
        match section {
            WhileSection::Entry => "WHILE",
            WhileSection::Body | WhileSection::Exit => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Value;

    #[test]
    fn test_sqlserver_literals() {
        let t = SqlServerTranslator::new();
        assert_eq!(t.literal(&Value::Bool(false)).unwrap(), "0");
        assert_eq!(t.literal(&Value::String("a'b".into())).unwrap(), "N'a''b'");
        assert_eq!(t.literal(&Value::Binary(vec![0xca, 0xfe])).unwrap(), "0xCAFE");
        assert!(
            t.literal(&Value::TimeSpan(TimeDelta::seconds(5)))
                .unwrap_err()
                .is_not_supported()
        );
    }

    #[test]
    fn test_sqlserver_partition_function() {
        let t = SqlServerTranslator::new();
        let sql = t
            .create_partition_function("[pf]", "INT", BoundaryType::Right, &["1".into(), "100".into()])
            .unwrap();
        assert_eq!(sql, "CREATE PARTITION FUNCTION [pf] (INT) AS RANGE RIGHT FOR VALUES (1, 100)");
    }
}
