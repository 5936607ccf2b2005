use crate::ast::{BinaryOp, DatePart, FunctionKind, LockMode, Select};
use crate::catalog::DataType;
use crate::error::{SqlDomError, SqlDomResult};
use crate::translator::*;

pub struct PostgresTranslator {
    ansi: AnsiTranslator,
}

impl PostgresTranslator {
    pub fn new() -> Self {
        Self::with_quoting(IdentifierQuoting::double_quotes())
    }

    pub fn with_quoting(quoting: IdentifierQuoting) -> Self {
        Self {
            ansi: AnsiTranslator::with_quoting(quoting),
        }
    }
}

impl Default for PostgresTranslator {
    fn default() -> Self {
        Self::new()
    }
}

impl Translator for PostgresTranslator {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn quoting(&self) -> &IdentifierQuoting {
        self.ansi.quoting()
    }

    fn float_literal(&self, value: f64) -> SqlDomResult<String> {
        if value.is_nan() {
            Ok("'NaN'::float8".to_string())
        } else if value.is_infinite() {
            Ok(format!("'{}Infinity'::float8", if value < 0.0 { "-" } else { "" }))
        } else {
            literals::finite_float(value)
        }
    }

    fn binary_literal(&self, value: &[u8]) -> SqlDomResult<String> {
        Ok(format!("'\\x{}'::bytea", literals::hex(value)))
    }

    fn data_type(&self, data_type: &DataType) -> SqlDomResult<String> {
        Ok(match data_type {
            DataType::Float => "REAL".to_string(),
            DataType::VarChar(None) => "VARCHAR".to_string(),
            DataType::Text => "TEXT".to_string(),
            DataType::Binary(_) | DataType::VarBinary(_) => "BYTEA".to_string(),
            DataType::DateTimeOffset => "TIMESTAMPTZ".to_string(),
            DataType::Interval => "INTERVAL".to_string(),
            DataType::Guid => "UUID".to_string(),
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

    fn select_lock(&self, mode: LockMode) -> SqlDomResult<&'static str> {
        Ok(match mode {
            LockMode::Update | LockMode::Exclusive => "FOR UPDATE",
            LockMode::Shared => "FOR SHARE",
            LockMode::SkipLocked => "FOR UPDATE SKIP LOCKED",
            LockMode::NoWait => "FOR UPDATE NOWAIT",
        })
    }

    fn binary(&self, op: BinaryOp, section: BinarySection) -> SqlDomResult<&'static str> {
        match (op, section) {
            (BinaryOp::BitXor, BinarySection::Operator) => Ok("#"),
            _ => self.ansi.binary(op, section),
        }
    }

    fn function(&self, kind: FunctionKind, section: FunctionSection) -> SqlDomResult<&'static str> {
        match (kind, section) {
            (FunctionKind::NewGuid, FunctionSection::Entry) => Ok("GEN_RANDOM_UUID("),
            (FunctionKind::Ceiling, FunctionSection::Entry) => Ok("CEIL("),
            _ => self.ansi.function(kind, section),
        }
    }

    fn custom_function(&self, name: &str, section: FunctionSection) -> SqlDomResult<String> {
        let entry = match name.to_ascii_lowercase().as_str() {
            "string_agg" => "STRING_AGG(",
            "array_agg" => "ARRAY_AGG(",
            "to_char" => "TO_CHAR(",
            "date_trunc" => "DATE_TRUNC(",
            _ => return Err(SqlDomError::not_supported(format!("custom function '{name}'"))),
        };
        Ok(match section {
            FunctionSection::Entry => entry.to_string(),
            FunctionSection::ArgumentDelimiter => ", ".to_string(),
            FunctionSection::Exit => ")".to_string(),
        })
    }

    fn extract(&self, part: DatePart, section: UnarySection) -> SqlDomResult<String> {
        let field = match part {
            DatePart::Millisecond => "MILLISECONDS",
            DatePart::DayOfWeek => "DOW",
            DatePart::DayOfYear => "DOY",
            _ => return self.ansi.extract(part, section),
        };
        Ok(match section {
            UnarySection::Entry => format!("EXTRACT({field} FROM"),
            UnarySection::Exit => ")".to_string(),
        })
    }

    fn next_value(&self, section: NextValueSection) -> SqlDomResult<&'static str> {
        Ok(match section {
            NextValueSection::Entry => "NEXTVAL('",
            NextValueSection::Exit => "')",
        })
    }

    fn alter_table(&self, section: AlterTableSection) -> SqlDomResult<&'static str> {
        match section {
            AlterTableSection::SetType => Ok("TYPE"),
            _ => self.ansi.alter_table(section),
        }
    }

    fn index(&self, section: IndexSection) -> SqlDomResult<&'static str> {
        match section {
            IndexSection::FillFactor => Ok("WITH (FILLFACTOR ="),
            _ => self.ansi.index(section),
        }
    }

    fn index_options_before_filter(&self) -> bool {
        true
    }

    fn collation(&self, section: CollationSection) -> SqlDomResult<&'static str> {
        match section {
            CollationSection::For | CollationSection::PadSpace | CollationSection::NoPad => Ok(""),
            _ => self.ansi.collation(section),
        }
    }

    fn character_set(&self, _section: CharacterSetSection) -> SqlDomResult<&'static str> {
        Err(SqlDomError::not_supported("CREATE CHARACTER SET"))
    }

    fn translation(&self, _section: TranslationSection) -> SqlDomResult<&'static str> {
        Err(SqlDomError::not_supported("CREATE TRANSLATION"))
    }

    fn assertion(&self, _section: AssertionSection) -> SqlDomResult<&'static str> {
        Err(SqlDomError::not_supported("CREATE ASSERTION"))
    }

    fn declare_variable(&self, name: &str, data_type: &str) -> SqlDomResult<String> {
        Ok(format!("DECLARE {name} {data_type}"))
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Value;

    #[test]
    fn test_postgres_specific_literals() {
        let t = PostgresTranslator::new();
        assert_eq!(t.literal(&Value::Float(f64::NAN)).unwrap(), "'NaN'::float8");
        assert_eq!(t.literal(&Value::Binary(vec![0xde, 0xad])).unwrap(), "'\\xDEAD'::bytea");
    }

    #[test]
    fn test_postgres_sequence_value() {
        let t = PostgresTranslator::new();
        assert_eq!(t.next_value(NextValueSection::Entry).unwrap(), "NEXTVAL('");
        assert_eq!(t.next_value(NextValueSection::Exit).unwrap(), "')");
    }
}
