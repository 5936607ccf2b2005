use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

use crate::ast::{DatePart, FunctionKind, LockMode, ObjectKind, Select, SetOp, TrimSide};
use crate::catalog::{DataType, SequenceDescriptor};
use crate::error::{SqlDomError, SqlDomResult};
use crate::translator::*;

pub struct SqliteTranslator {
    ansi: AnsiTranslator,
}

impl SqliteTranslator {
    pub fn new() -> Self {
        Self::with_quoting(IdentifierQuoting::double_quotes())
    }

    pub fn with_quoting(quoting: IdentifierQuoting) -> Self {
        Self {
            ansi: AnsiTranslator::with_quoting(quoting),
        }
    }
}

impl Default for SqliteTranslator {
    fn default() -> Self {
        Self::new()
    }
}

impl Translator for SqliteTranslator {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn quoting(&self) -> &IdentifierQuoting {
        self.ansi.quoting()
    }

    fn bool_literal(&self, value: bool) -> String {
        (if value { "1" } else { "0" }).to_string()
    }

    fn date_literal(&self, value: NaiveDate) -> SqlDomResult<String> {
        Ok(format!("'{}'", value.format("%Y-%m-%d")))
    }

    fn time_literal(&self, value: NaiveTime) -> SqlDomResult<String> {
        Ok(format!("'{}'", value.format("%H:%M:%S%.3f")))
    }

    fn date_time_literal(&self, value: NaiveDateTime) -> SqlDomResult<String> {
        Ok(format!("'{}'", value.format("%Y-%m-%d %H:%M:%S%.3f")))
    }

    fn date_time_offset_literal(&self, value: DateTime<FixedOffset>) -> SqlDomResult<String> {
        Ok(format!("'{}'", value.format("%Y-%m-%d %H:%M:%S%.3f%:z")))
    }

    fn time_span_literal(&self, _value: TimeDelta) -> SqlDomResult<String> {
        Err(SqlDomError::not_supported("interval literal"))
    }

    fn data_type(&self, data_type: &DataType) -> SqlDomResult<String> {
        Ok(match data_type {
            DataType::Boolean
            | DataType::TinyInt
            | DataType::SmallInt
            | DataType::Int
            | DataType::BigInt => "INTEGER",
            DataType::Decimal { .. } => "NUMERIC",
            DataType::Float | DataType::Double => "REAL",
            DataType::Char(_)
            | DataType::VarChar(_)
            | DataType::Text
            | DataType::Date
            | DataType::Time
            | DataType::DateTime
            | DataType::DateTimeOffset
            | DataType::Guid => "TEXT",
            DataType::Binary(_) | DataType::VarBinary(_) => "BLOB",
            DataType::Interval => return Err(SqlDomError::not_supported("interval type")),
            DataType::Custom(name) => return Ok(name.clone()),
        }
        .to_string())
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
        Some("-1")
    }

    fn set_operation(&self, op: SetOp, all: bool) -> SqlDomResult<&'static str> {
        match (op, all) {
            (SetOp::Except | SetOp::Intersect, true) => {
                Err(SqlDomError::not_supported(format!("{op:?} ALL").to_uppercase()))
            }
            _ => self.ansi.set_operation(op, all),
        }
    }

    fn parenthesize_set_operands(&self) -> bool {
        false
    }

    fn select_lock(&self, mode: LockMode) -> SqlDomResult<&'static str> {
        Err(SqlDomError::not_supported(format!("row locking ({mode:?})")))
    }

    fn function(&self, kind: FunctionKind, section: FunctionSection) -> SqlDomResult<&'static str> {
        match (kind, section) {
            (FunctionKind::CharLength, FunctionSection::Entry) => Ok("LENGTH("),
            (FunctionKind::Ceiling, FunctionSection::Entry) => Ok("CEIL("),
            (FunctionKind::Substring, FunctionSection::Entry) => Ok("SUBSTR("),
            (FunctionKind::Position | FunctionKind::CurrentUser, _) => {
                Err(SqlDomError::not_supported(format!("function {kind:?}")))
            }
            _ => self.ansi.function(kind, section),
        }
    }

    fn custom_function(&self, name: &str, section: FunctionSection) -> SqlDomResult<String> {
        let entry = match name.to_ascii_lowercase().as_str() {
            "ifnull" => "IFNULL(",
            "group_concat" => "GROUP_CONCAT(",
            "strftime" => "STRFTIME(",
            "julianday" => "JULIANDAY(",
            _ => return Err(SqlDomError::not_supported(format!("custom function '{name}'"))),
        };
        Ok(match section {
            FunctionSection::Entry => entry.to_string(),
            FunctionSection::ArgumentDelimiter => ", ".to_string(),
            FunctionSection::Exit => ")".to_string(),
        })
    }

    fn trim(&self, side: TrimSide, chars: Option<&str>, section: UnarySection) -> SqlDomResult<String> {
        Ok(match section {
            UnarySection::Entry => match side {
                TrimSide::Both => "TRIM(",
                TrimSide::Leading => "LTRIM(",
                TrimSide::Trailing => "RTRIM(",
            }
            .to_string(),
            UnarySection::Exit => match chars {
                Some(chars) => format!(", {})", self.string_literal(chars)),
                None => ")".to_string(),
            },
        })
    }

    fn extract(&self, part: DatePart, section: UnarySection) -> SqlDomResult<String> {
        let format = match part {
            DatePart::Year => "%Y",
            DatePart::Month => "%m",
            DatePart::Day => "%d",
            DatePart::Hour => "%H",
            DatePart::Minute => "%M",
            DatePart::Second => "%S",
            DatePart::DayOfWeek => "%w",
            DatePart::DayOfYear => "%j",
            DatePart::Millisecond => {
                return Err(SqlDomError::not_supported("EXTRACT of Millisecond"));
            }
        };
        Ok(match section {
            UnarySection::Entry => format!("CAST(STRFTIME('{format}',"),
            UnarySection::Exit => ") AS INTEGER)".to_string(),
        })
    }

    fn next_value(&self, _section: NextValueSection) -> SqlDomResult<&'static str> {
        Err(SqlDomError::not_supported("sequences"))
    }

    /// Integer primary keys are row ids and generate values on their own.
    fn identity(&self, _descriptor: &SequenceDescriptor) -> SqlDomResult<String> {
        Ok(String::new())
    }

    fn alter_table(&self, section: AlterTableSection) -> SqlDomResult<&'static str> {
        match section {
            AlterTableSection::AlterColumn
            | AlterTableSection::SetDefault
            | AlterTableSection::DropDefault
            | AlterTableSection::SetType
            | AlterTableSection::SetNotNull
            | AlterTableSection::DropNotNull => Err(SqlDomError::not_supported("ALTER COLUMN")),
            AlterTableSection::AddConstraint | AlterTableSection::DropConstraint => {
                Err(SqlDomError::not_supported("altering table constraints"))
            }
            AlterTableSection::Cascade => Err(SqlDomError::not_supported("CASCADE")),
            _ => self.ansi.alter_table(section),
        }
    }

    fn truncate_table(&self) -> &'static str {
        "DELETE FROM"
    }

    fn domain(&self, _section: DomainSection) -> SqlDomResult<&'static str> {
        Err(SqlDomError::not_supported("domains"))
    }

    fn sequence(&self, _section: SequenceSection) -> SqlDomResult<&'static str> {
        Err(SqlDomError::not_supported("sequences"))
    }

    fn create_schema(&self) -> SqlDomResult<&'static str> {
        Err(SqlDomError::not_supported("CREATE SCHEMA"))
    }

    fn view(&self, section: ViewSection, or_replace: bool) -> SqlDomResult<&'static str> {
        match section {
            ViewSection::Entry if or_replace => Err(SqlDomError::not_supported("CREATE OR REPLACE VIEW")),
            ViewSection::CheckOption => Err(SqlDomError::not_supported("WITH CHECK OPTION")),
            _ => self.ansi.view(section, or_replace),
        }
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
            (ObjectKind::Table | ObjectKind::View | ObjectKind::Index, DropSection::Cascade) => {
                Err(SqlDomError::not_supported("DROP ... CASCADE"))
            }
            (ObjectKind::Table | ObjectKind::View | ObjectKind::Index, DropSection::Restrict) => Ok(""),
            (ObjectKind::Table | ObjectKind::View | ObjectKind::Index, _) => {
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
    fn test_sqlite_rejects_locks() {
        let t = SqliteTranslator::new();
        for mode in [LockMode::Update, LockMode::Shared, LockMode::NoWait] {
            assert!(t.select_lock(mode).unwrap_err().is_not_supported());
        }
    }

    #[test]
    fn test_sqlite_trim_with_characters() {
        let t = SqliteTranslator::new();
        assert_eq!(t.trim(TrimSide::Leading, Some("0"), UnarySection::Entry).unwrap(), "LTRIM(");
        assert_eq!(t.trim(TrimSide::Leading, Some("0"), UnarySection::Exit).unwrap(), ", '0')");
    }
}
