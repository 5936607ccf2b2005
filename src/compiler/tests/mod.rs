//! Compiler test modules.
//!
//! Tests are organized by category:
//! - `select`: queries, joins, paging and set operations
//! - `dml`: INSERT, UPDATE, DELETE, batches and procedural statements
//! - `ddl`: schema definition statements
//! - `dynamic`: variants, placeholders and dynamic filters
//! - `dialects`: capability gating and dialect-specific renderings

mod dialects;
mod dml;
mod dynamic;
mod select;

use crate::ast::Statement;
use crate::compiler::SqlCompiler;
use crate::config::CompilerConfig;
use crate::dialect::Dialect;
use crate::error::SqlDomError;
use crate::output::render::PostCompilerConfig;
use crate::result::CompilationResult;

fn compile(dialect: Dialect, statement: impl Into<Statement>, config: &CompilerConfig) -> CompilationResult {
    SqlCompiler::new(dialect)
        .compile(&statement.into(), config)
        .unwrap()
}

/// SQL text of a statement compiled with the default configuration.
pub(super) fn sql(dialect: Dialect, statement: impl Into<Statement>) -> String {
    sql_with(dialect, statement, &CompilerConfig::default())
}

pub(super) fn sql_with(dialect: Dialect, statement: impl Into<Statement>, config: &CompilerConfig) -> String {
    compile(dialect, statement, config)
        .command_text(None)
        .unwrap()
        .into_owned()
}

/// SQL text rendered against render-time values.
pub(super) fn render(dialect: Dialect, statement: impl Into<Statement>, values: &PostCompilerConfig) -> String {
    compile(dialect, statement, &CompilerConfig::default())
        .command_text(Some(values))
        .unwrap()
        .into_owned()
}

pub(super) fn compile_err(dialect: Dialect, statement: impl Into<Statement>) -> SqlDomError {
    SqlCompiler::new(dialect)
        .compile(&statement.into(), &CompilerConfig::default())
        .unwrap_err()
}
