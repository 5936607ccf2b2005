use chrono::NaiveTime;
use uuid::Uuid;

use crate::ast::{
    BinaryOp, DatePart, FetchDirection, FunctionKind, JoinKind, LockMode, ObjectKind, SetOp,
};
use crate::catalog::DataType;
use crate::error::{SqlDomError, SqlDomResult};
use crate::translator::*;

/// Oracle 12c and later.
pub struct OracleTranslator {
    ansi: AnsiTranslator,
}

impl OracleTranslator {
    pub fn new() -> Self {
        Self::with_quoting(IdentifierQuoting::double_quotes())
    }

    pub fn with_quoting(quoting: IdentifierQuoting) -> Self {
        Self {
            ansi: AnsiTranslator::with_quoting(quoting),
        }
    }
}

impl Default for OracleTranslator {
    fn default() -> Self {
        Self::new()
    }
}

impl Translator for OracleTranslator {
    fn name(&self) -> &'static str {
        "oracle"
    }

    fn quoting(&self) -> &IdentifierQuoting {
        self.ansi.quoting()
    }

    fn batch(&self, section: BatchSection) -> &'static str {
        match section {
            BatchSection::Entry => "BEGIN\n",
            BatchSection::StatementDelimiter => ";\n",
            BatchSection::Exit => ";\nEND;",
        }
    }

    fn bool_literal(&self, value: bool) -> String {
        (if value { "1" } else { "0" }).to_string()
    }

    fn time_literal(&self, _value: NaiveTime) -> SqlDomResult<String> {
        Err(SqlDomError::not_supported("time literal"))
    }

    fn uuid_literal(&self, value: &Uuid) -> SqlDomResult<String> {
        Ok(format!("HEXTORAW('{}')", value.simple()))
    }

    fn binary_literal(&self, value: &[u8]) -> SqlDomResult<String> {
        Ok(format!("HEXTORAW('{}')", literals::hex(value)))
    }

    fn data_type(&self, data_type: &DataType) -> SqlDomResult<String> {
        Ok(match data_type {
            DataType::Boolean => "NUMBER(1)".to_string(),
            DataType::TinyInt => "NUMBER(3)".to_string(),
            DataType::SmallInt => "NUMBER(5)".to_string(),
            DataType::Int => "NUMBER(10)".to_string(),
            DataType::BigInt => "NUMBER(19)".to_string(),
            DataType::Decimal { precision, scale } => format!("NUMBER({precision}, {scale})"),
            DataType::Float => "BINARY_FLOAT".to_string(),
            DataType::Double => "BINARY_DOUBLE".to_string(),
            DataType::Char(n) => format!("NCHAR({n})"),
            DataType::VarChar(Some(n)) => format!("NVARCHAR2({n})"),
            DataType::VarChar(None) | DataType::Text => "NCLOB".to_string(),
            DataType::Binary(n) | DataType::VarBinary(Some(n)) => format!("RAW({n})"),
            DataType::VarBinary(None) => "BLOB".to_string(),
            DataType::Time => return Err(SqlDomError::not_supported("time type")),
            DataType::Guid => "RAW(16)".to_string(),
            other => return self.ansi.data_type(other),
        })
    }

    fn table_alias_keyword(&self) -> &'static str {
        ""
    }

    fn select_lock(&self, mode: LockMode) -> SqlDomResult<&'static str> {
        match mode {
            LockMode::Update | LockMode::Exclusive => Ok("FOR UPDATE"),
            LockMode::SkipLocked => Ok("FOR UPDATE SKIP LOCKED"),
            LockMode::NoWait => Ok("FOR UPDATE NOWAIT"),
            LockMode::Shared => Err(SqlDomError::not_supported("FOR SHARE")),
        }
    }

    fn set_operation(&self, op: SetOp, all: bool) -> SqlDomResult<&'static str> {
        match (op, all) {
            (SetOp::Except, false) => Ok("MINUS"),
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

    fn binary(&self, op: BinaryOp, section: BinarySection) -> SqlDomResult<&'static str> {
        match (op, section) {
            (BinaryOp::Modulo, BinarySection::Entry) => Ok("MOD("),
            (BinaryOp::BitAnd, BinarySection::Entry) => Ok("BITAND("),
            (BinaryOp::Modulo | BinaryOp::BitAnd, BinarySection::Operator) => Ok(","),
            (BinaryOp::BitOr | BinaryOp::BitXor, _) => {
                Err(SqlDomError::not_supported(format!("bitwise {op:?}")))
            }
            _ => self.ansi.binary(op, section),
        }
    }

    fn function(&self, kind: FunctionKind, section: FunctionSection) -> SqlDomResult<&'static str> {
        match (kind, section) {
            (FunctionKind::CharLength, FunctionSection::Entry) => Ok("LENGTH("),
            (FunctionKind::Ceiling, FunctionSection::Entry) => Ok("CEIL("),
            (FunctionKind::Substring, FunctionSection::Entry) => Ok("SUBSTR("),
            (FunctionKind::NewGuid, FunctionSection::Entry) => Ok("SYS_GUID("),
            (FunctionKind::CurrentUser, FunctionSection::Entry) => Ok("USER"),
            (FunctionKind::Position | FunctionKind::CurrentTime, _) => {
                Err(SqlDomError::not_supported(format!("function {kind:?}")))
            }
            _ => self.ansi.function(kind, section),
        }
    }

    fn custom_function(&self, name: &str, section: FunctionSection) -> SqlDomResult<String> {
        let entry = match name.to_ascii_lowercase().as_str() {
            "nvl" => "NVL(",
            "listagg" => "LISTAGG(",
            "to_char" => "TO_CHAR(",
            "trunc" => "TRUNC(",
            _ => return Err(SqlDomError::not_supported(format!("custom function '{name}'"))),
        };
        Ok(match section {
            FunctionSection::Entry => entry.to_string(),
            FunctionSection::ArgumentDelimiter => ", ".to_string(),
            FunctionSection::Exit => ")".to_string(),
        })
    }

    fn extract(&self, part: DatePart, section: UnarySection) -> SqlDomResult<String> {
        let format = match part {
            DatePart::DayOfWeek => "D",
            DatePart::DayOfYear => "DDD",
            _ => return self.ansi.extract(part, section),
        };
        Ok(match section {
            UnarySection::Entry => "TO_NUMBER(TO_CHAR(".to_string(),
            UnarySection::Exit => format!(", '{format}'))"),
        })
    }

    fn next_value(&self, section: NextValueSection) -> SqlDomResult<&'static str> {
        Ok(match section {
            NextValueSection::Entry => "",
            NextValueSection::Exit => ".NEXTVAL",
        })
    }

    fn column(&self, section: ColumnSection) -> SqlDomResult<&'static str> {
        match section {
            ColumnSection::Persisted => Err(SqlDomError::not_supported("stored computed columns")),
            _ => self.ansi.column(section),
        }
    }

    fn alter_table(&self, section: AlterTableSection) -> SqlDomResult<&'static str> {
        Ok(match section {
            AlterTableSection::AddColumn => "ADD",
            AlterTableSection::AlterColumn => "MODIFY",
            AlterTableSection::SetType => "",
            AlterTableSection::SetDefault => "DEFAULT",
            AlterTableSection::DropDefault => "DEFAULT NULL",
            AlterTableSection::SetNotNull => "NOT NULL",
            AlterTableSection::DropNotNull => "NULL",
            AlterTableSection::Cascade => "CASCADE CONSTRAINTS",
            _ => return self.ansi.alter_table(section),
        })
    }

    fn domain(&self, _section: DomainSection) -> SqlDomResult<&'static str> {
        Err(SqlDomError::not_supported("domains"))
    }

    fn sequence(&self, section: SequenceSection) -> SqlDomResult<&'static str> {
        match section {
            SequenceSection::As => Err(SqlDomError::not_supported("typed sequences")),
            _ => self.ansi.sequence(section),
        }
    }

    fn sequence_descriptor(&self, section: SequenceDescriptorSection) -> &'static str {
        match section {
            SequenceDescriptorSection::NoCycle => "NOCYCLE",
            _ => self.ansi.sequence_descriptor(section),
        }
    }

    fn create_schema(&self) -> SqlDomResult<&'static str> {
        Err(SqlDomError::not_supported("CREATE SCHEMA"))
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
            (ObjectKind::Table, DropSection::Cascade) => Ok("CASCADE CONSTRAINTS"),
            (_, DropSection::Restrict) => Ok(""),
            (ObjectKind::Table | ObjectKind::View | ObjectKind::Index | ObjectKind::Sequence, _) => {
                self.ansi.drop_object(kind, section)
            }
            _ => Err(SqlDomError::not_supported(format!("DROP of {kind:?}"))),
        }
    }

    fn assign(&self, name: &str) -> String {
        format!("{name} :=")
    }

    fn while_statement(&self, section: WhileSection) -> &'static str {
        match section {
            WhileSection::Entry => "WHILE",
            WhileSection::Body => "LOOP",
            WhileSection::Exit => "END LOOP",
        }
    }

    fn cursor(&self, section: CursorSection) -> SqlDomResult<&'static str> {
        match section {
            CursorSection::Declare => Ok("CURSOR"),
            CursorSection::For => Ok("IS"),
            CursorSection::FetchFrom => Ok(""),
            CursorSection::Insensitive | CursorSection::Scroll | CursorSection::ReadOnly => {
                Err(SqlDomError::not_supported(format!("{section:?} cursors")))
            }
            _ => self.ansi.cursor(section),
        }
    }

    fn fetch_direction(&self, direction: FetchDirection) -> SqlDomResult<String> {
        match direction {
            FetchDirection::Next => Ok(String::new()),
            other => Err(SqlDomError::not_supported(format!("FETCH {other:?}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oracle_batch_wraps_in_block() {
        let t = OracleTranslator::new();
        let batch = t.build_batch(&["DELETE FROM \"a\"".into(), "DELETE FROM \"b\";".into()]);
        assert_eq!(batch, "BEGIN\nDELETE FROM \"a\";\nDELETE FROM \"b\";\nEND;");

        // Already wrapped text is not wrapped twice
        assert_eq!(t.build_batch(&[batch.clone()]), batch);
    }

    #[test]
    fn test_oracle_shared_lock_not_supported() {
        let t = OracleTranslator::new();
        assert!(t.select_lock(LockMode::Shared).unwrap_err().is_not_supported());
        assert_eq!(t.select_lock(LockMode::NoWait).unwrap(), "FOR UPDATE NOWAIT");
    }
}
