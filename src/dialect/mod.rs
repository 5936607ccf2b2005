//! Supported SQL dialects and their feature sets.

mod mysql;
mod oracle;
mod postgres;
mod sqlite;
mod sqlserver;

pub use mysql::MySqlTranslator;
pub use oracle::OracleTranslator;
pub use postgres::PostgresTranslator;
pub use sqlite::SqliteTranslator;
pub use sqlserver::SqlServerTranslator;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SqlDomError;
use crate::translator::{AnsiTranslator, IdentifierQuoting, Translator};

/// Supported SQL dialects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[default]
    Ansi,
    Postgres,
    MySql,
    SqlServer,
    Sqlite,
    Oracle,
}

impl Dialect {
    pub const ALL: [Dialect; 6] = [
        Dialect::Ansi,
        Dialect::Postgres,
        Dialect::MySql,
        Dialect::SqlServer,
        Dialect::Sqlite,
        Dialect::Oracle,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Dialect::Ansi => "ansi",
            Dialect::Postgres => "postgres",
            Dialect::MySql => "mysql",
            Dialect::SqlServer => "sqlserver",
            Dialect::Sqlite => "sqlite",
            Dialect::Oracle => "oracle",
        }
    }

    pub fn default_quoting(self) -> IdentifierQuoting {
        match self {
            Dialect::MySql => IdentifierQuoting::backticks(),
            Dialect::SqlServer => IdentifierQuoting::brackets(),
            _ => IdentifierQuoting::double_quotes(),
        }
    }

    pub fn translator(self) -> Box<dyn Translator> {
        self.translator_with(self.default_quoting())
    }

    /// Translator using a non-default identifier quoting.
    pub fn translator_with(self, quoting: IdentifierQuoting) -> Box<dyn Translator> {
        match self {
            Dialect::Ansi => Box::new(AnsiTranslator::with_quoting(quoting)),
            Dialect::Postgres => Box::new(PostgresTranslator::with_quoting(quoting)),
            Dialect::MySql => Box::new(MySqlTranslator::with_quoting(quoting)),
            Dialect::SqlServer => Box::new(SqlServerTranslator::with_quoting(quoting)),
            Dialect::Sqlite => Box::new(SqliteTranslator::with_quoting(quoting)),
            Dialect::Oracle => Box::new(OracleTranslator::with_quoting(quoting)),
        }
    }

    pub fn capabilities(self) -> Capabilities {
        let ansi = Capabilities::default();
        match self {
            Dialect::Ansi => ansi,
            Dialect::Postgres => Capabilities {
                include_columns: true,
                update_from: true,
                delete_from: true,
                ..ansi
            },
            Dialect::MySql => Capabilities {
                multidatabase: false,
                filtered_indexes: false,
                sequences: false,
                update_limit: true,
                delete_limit: true,
                cursors: false,
                ..ansi
            },
            Dialect::SqlServer => Capabilities {
                multicolumn_in: false,
                clustered_indexes: true,
                expression_indexes: false,
                include_columns: true,
                update_limit: true,
                delete_limit: true,
                update_from: true,
                delete_from: true,
                full_text: true,
                cross_apply: true,
                ..ansi
            },
            Dialect::Sqlite => Capabilities {
                explicit_join_order: true,
                multischema: false,
                multidatabase: false,
                sequences: false,
                procedural: false,
                cursors: false,
                ..ansi
            },
            Dialect::Oracle => Capabilities {
                parameter_prefix: ":".to_string(),
                multidatabase: false,
                filtered_indexes: false,
                cross_apply: true,
                ..ansi
            },
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dialect {
    type Err = SqlDomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ansi" | "sql" => Ok(Dialect::Ansi),
            "postgres" | "postgresql" | "pg" => Ok(Dialect::Postgres),
            "mysql" => Ok(Dialect::MySql),
            "sqlserver" | "mssql" | "tsql" => Ok(Dialect::SqlServer),
            "sqlite" => Ok(Dialect::Sqlite),
            "oracle" => Ok(Dialect::Oracle),
            other => Err(SqlDomError::Config(format!("unknown dialect '{other}'"))),
        }
    }
}

/// What a target server can do. The compiler consults this before
/// emitting any construct a dialect may lack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Capabilities {
    /// Prepended to parameter names in command text
    pub parameter_prefix: String,
    /// `(a, b) IN ((1, 2), (3, 4))`
    pub multicolumn_in: bool,
    /// Joins must be written as a left-deep chain
    pub explicit_join_order: bool,
    /// CLUSTERED index keyword; ignored when unsupported
    pub clustered_indexes: bool,
    /// Schema qualification; omitted when unsupported
    pub multischema: bool,
    /// Catalog (database) qualification; omitted when unsupported
    pub multidatabase: bool,
    pub filtered_indexes: bool,
    pub expression_indexes: bool,
    pub include_columns: bool,
    pub sequences: bool,
    pub update_limit: bool,
    pub delete_limit: bool,
    /// UPDATE ... FROM
    pub update_from: bool,
    /// DELETE ... USING / FROM
    pub delete_from: bool,
    pub full_text: bool,
    /// Variables, blocks, IF and WHILE
    pub procedural: bool,
    pub cursors: bool,
    pub row_number: bool,
    pub computed_columns: bool,
    /// CROSS APPLY / OUTER APPLY
    pub cross_apply: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            parameter_prefix: "@".to_string(),
            multicolumn_in: true,
            explicit_join_order: false,
            clustered_indexes: false,
            multischema: true,
            multidatabase: true,
            filtered_indexes: true,
            expression_indexes: true,
            include_columns: false,
            sequences: true,
            update_limit: false,
            delete_limit: false,
            update_from: false,
            delete_from: false,
            full_text: false,
            procedural: true,
            cursors: true,
            row_number: true,
            computed_columns: true,
            cross_apply: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dialect_names() {
        assert_eq!("PostgreSQL".parse::<Dialect>().unwrap(), Dialect::Postgres);
        assert_eq!("mssql".parse::<Dialect>().unwrap(), Dialect::SqlServer);
        assert!("db2".parse::<Dialect>().is_err());
    }

    #[test]
    fn test_translator_names_match_dialects() {
        for dialect in Dialect::ALL {
            assert_eq!(dialect.translator().name(), dialect.name());
        }
    }

    #[test]
    fn test_capabilities_deserialize_with_defaults() {
        let caps: Capabilities = toml::from_str("multicolumn_in = false").unwrap();
        assert!(!caps.multicolumn_in);
        assert!(caps.multischema);
        assert_eq!(caps.parameter_prefix, "@");
    }

    #[test]
    fn test_capabilities_reject_unknown_flags() {
        assert!(toml::from_str::<Capabilities>("multi_column_in = false").is_err());
    }
}
