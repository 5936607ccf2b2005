//! # sqldom
//!
//! A retargetable SQL compiler. Statements are built as a dialect-neutral
//! DOM, compiled once per dialect into an output tree, and rendered to SQL
//! text as often as needed with different render-time input.
//!
//! ## Quick Example
//!
//! ```
//! use sqldom::prelude::*;
//!
//! let users = TableRef::named("users");
//! let select = Select::from(users.clone())
//!     .column(users.column("email"))
//!     .filter(eq(users.column("active"), lit(true)));
//!
//! let result = sqldom::compile(&select.into(), Dialect::Postgres).unwrap();
//! assert_eq!(
//!     result.command_text(None).unwrap(),
//!     r#"SELECT "users"."email" FROM "users" WHERE ("users"."active" = TRUE)"#
//! );
//! ```
//!
//! ## Layers
//!
//! | Module       | Role                                              |
//! |--------------|---------------------------------------------------|
//! | `ast`        | Statements and expressions                        |
//! | `catalog`    | Descriptive schema objects                        |
//! | `translator` | Per-dialect keywords, literals and quoting        |
//! | `compiler`   | DOM walk producing an output tree                 |
//! | `output`     | Output tree and its renderer                      |

pub mod ast;
pub mod catalog;
pub mod compiler;
pub mod config;
pub mod dialect;
pub mod error;
pub mod output;
pub mod result;
pub mod translator;

pub mod prelude {
    pub use crate::ast::*;
    pub use crate::catalog::*;
    pub use crate::compiler::{NamingOptions, SqlCompiler};
    pub use crate::config::{CompilerConfig, Settings};
    pub use crate::dialect::{Capabilities, Dialect};
    pub use crate::error::*;
    pub use crate::output::render::{PostCompiler, PostCompilerConfig};
    pub use crate::output::Node;
    pub use crate::result::CompilationResult;
    pub use crate::translator::Translator;
}

/// Compile a statement for a dialect with the default configuration.
///
/// # Example
///
/// ```
/// use sqldom::prelude::*;
///
/// let result = sqldom::compile(&Select::new().column(lit(1)).into(), Dialect::SqlServer).unwrap();
/// assert!(result.is_static());
/// assert_eq!(result.command_text(None).unwrap(), "SELECT 1");
/// ```
pub fn compile(
    statement: &ast::Statement,
    dialect: dialect::Dialect,
) -> error::SqlDomResult<result::CompilationResult> {
    compiler::SqlCompiler::new(dialect).compile(statement, &config::CompilerConfig::default())
}
