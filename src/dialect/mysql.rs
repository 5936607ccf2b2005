use chrono::{DateTime, FixedOffset, TimeDelta};

use crate::ast::{BinaryOp, DatePart, FunctionKind, JoinKind, LockMode, ObjectKind, Select};
use crate::catalog::{DataType, SequenceDescriptor};
use crate::error::{SqlDomError, SqlDomResult};
use crate::translator::*;

pub struct MySqlTranslator {
    ansi: AnsiTranslator,
}

impl MySqlTranslator {
    pub fn new() -> Self {
        Self::with_quoting(IdentifierQuoting::backticks())
    }

    pub fn with_quoting(quoting: IdentifierQuoting) -> Self {
        Self {
            ansi: AnsiTranslator::with_quoting(quoting),
        }
    }
}

impl Default for MySqlTranslator {
    fn default() -> Self {
        Self::new()
    }
}

impl Translator for MySqlTranslator {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn quoting(&self) -> &IdentifierQuoting {
        self.ansi.quoting()
    }

    fn variable(&self, name: &str) -> String {
        format!("@{name}")
    }

    /// Backslash is an escape character in MySQL string literals.
    fn string_literal(&self, value: &str) -> String {
        format!("'{}'", value.replace('\\', "\\\\").replace('\'', "''"))
    }

    fn date_time_offset_literal(&self, _value: DateTime<FixedOffset>) -> SqlDomResult<String> {
        Err(SqlDomError::not_supported("timestamp with offset literal"))
    }

    fn time_span_literal(&self, _value: TimeDelta) -> SqlDomResult<String> {
        Err(SqlDomError::not_supported("interval literal"))
    }

    fn data_type(&self, data_type: &DataType) -> SqlDomResult<String> {
        Ok(match data_type {
            DataType::TinyInt => "TINYINT".to_string(),
            DataType::Int => "INT".to_string(),
            DataType::Float => "FLOAT".to_string(),
            DataType::Double => "DOUBLE".to_string(),
            DataType::VarChar(None) | DataType::Text => "LONGTEXT".to_string(),
            DataType::VarBinary(None) => "LONGBLOB".to_string(),
            DataType::DateTime => "DATETIME(3)".to_string(),
            DataType::DateTimeOffset => return Err(SqlDomError::not_supported("timestamp with time zone")),
            DataType::Interval => return Err(SqlDomError::not_supported("interval type")),
            other => return self.ansi.data_type(other),
        })
    }

    fn select(&self, section: SelectSection, select: &Select) -> &'static str {
        match section {
            SelectSection::Limit => "LIMIT",
            SelectSection::LimitEnd | SelectSection::OffsetEnd => "",
            _ => self.ansi.select(section, select),
        }
    }

    fn offset_before_limit(&self) -> bool {
        false
    }

    fn unbounded_limit(&self) -> Option<&'static str> {
        Some("18446744073709551615")
    }

    fn select_lock(&self, mode: LockMode) -> SqlDomResult<&'static str> {
        Ok(match mode {
            LockMode::Update | LockMode::Exclusive => "FOR UPDATE",
            LockMode::Shared => "FOR SHARE",
            LockMode::SkipLocked => "FOR UPDATE SKIP LOCKED",
            LockMode::NoWait => "FOR UPDATE NOWAIT",
        })
    }

    fn join(&self, kind: JoinKind) -> SqlDomResult<&'static str> {
        match kind {
            JoinKind::FullOuter => Err(SqlDomError::not_supported("FULL OUTER JOIN")),
            _ => self.ansi.join(kind),
        }
    }

    fn delete(&self, section: DeleteSection) -> &'static str {
        match section {
            DeleteSection::From => "USING",
            _ => self.ansi.delete(section),
        }
    }

    fn binary(&self, op: BinaryOp, section: BinarySection) -> SqlDomResult<&'static str> {
        match (op, section) {
            (BinaryOp::Concat, BinarySection::Entry) => Ok("CONCAT("),
            (BinaryOp::Concat, BinarySection::Operator) => Ok(","),
            _ => self.ansi.binary(op, section),
        }
    }

    fn function(&self, kind: FunctionKind, section: FunctionSection) -> SqlDomResult<&'static str> {
        match (kind, section) {
            (FunctionKind::NewGuid, FunctionSection::Entry) => Ok("UUID("),
            (FunctionKind::Position, FunctionSection::Entry) => Ok("LOCATE("),
            (FunctionKind::Position, FunctionSection::ArgumentDelimiter) => Ok(", "),
            _ => self.ansi.function(kind, section),
        }
    }

    fn custom_function(&self, name: &str, section: FunctionSection) -> SqlDomResult<String> {
        let entry = match name.to_ascii_lowercase().as_str() {
            "ifnull" => "IFNULL(",
            "group_concat" => "GROUP_CONCAT(",
            "date_format" => "DATE_FORMAT(",
            _ => return Err(SqlDomError::not_supported(format!("custom function '{name}'"))),
        };
        Ok(match section {
            FunctionSection::Entry => entry.to_string(),
            FunctionSection::ArgumentDelimiter => ", ".to_string(),
            FunctionSection::Exit => ")".to_string(),
        })
    }

    fn extract(&self, part: DatePart, section: UnarySection) -> SqlDomResult<String> {
        let function = match part {
            DatePart::Millisecond => "FLOOR(MICROSECOND(",
            DatePart::DayOfWeek => "DAYOFWEEK(",
            DatePart::DayOfYear => "DAYOFYEAR(",
            _ => return self.ansi.extract(part, section),
        };
        Ok(match (part, section) {
            (_, UnarySection::Entry) => function.to_string(),
            (DatePart::Millisecond, UnarySection::Exit) => ") / 1000)".to_string(),
            (_, UnarySection::Exit) => ")".to_string(),
        })
    }

    fn next_value(&self, _section: NextValueSection) -> SqlDomResult<&'static str> {
        Err(SqlDomError::not_supported("sequences"))
    }

    fn column(&self, section: ColumnSection) -> SqlDomResult<&'static str> {
        match section {
            ColumnSection::Persisted => Ok("STORED"),
            ColumnSection::ComputedEntry => Ok("AS ("),
            _ => self.ansi.column(section),
        }
    }

    fn identity(&self, _descriptor: &SequenceDescriptor) -> SqlDomResult<String> {
        Ok("AUTO_INCREMENT".to_string())
    }

    fn alter_table(&self, section: AlterTableSection) -> SqlDomResult<&'static str> {
        match section {
            AlterTableSection::SetType | AlterTableSection::SetNotNull | AlterTableSection::DropNotNull => {
                Err(SqlDomError::not_supported("ALTER COLUMN without a full column definition"))
            }
            _ => self.ansi.alter_table(section),
        }
    }

    fn domain(&self, _section: DomainSection) -> SqlDomResult<&'static str> {
        Err(SqlDomError::not_supported("domains"))
    }

    fn sequence(&self, _section: SequenceSection) -> SqlDomResult<&'static str> {
        Err(SqlDomError::not_supported("sequences"))
    }

    fn index(&self, section: IndexSection) -> SqlDomResult<&'static str> {
        match section {
            IndexSection::Include => Err(SqlDomError::not_supported("included index columns")),
            _ => self.ansi.index(section),
        }
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
            (ObjectKind::Table | ObjectKind::View | ObjectKind::Index | ObjectKind::Schema, _) => {
                self.ansi.drop_object(kind, section)
            }
            _ => Err(SqlDomError::not_supported(format!("DROP of {kind:?}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mysql_escapes_backslashes() {
        let t = MySqlTranslator::new();
        assert_eq!(t.string_literal(r"C:\temp\it's"), r"'C:\\temp\\it''s'");
    }

    #[test]
    fn test_mysql_rejects_offset_timestamps() {
        let t = MySqlTranslator::new();
        let err = t.data_type(&DataType::DateTimeOffset).unwrap_err();
        assert!(err.is_not_supported());
    }
}
