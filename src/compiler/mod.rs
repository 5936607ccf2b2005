//! The SQL DOM compiler.
//!
//! Walks a statement once, asking the [`Translator`] for the text of each
//! section and consulting [`Capabilities`] wherever a dialect may lack a
//! construct. The product is an output tree that renders many times.

mod context;
mod ddl;
mod dml;
mod expr;
pub mod naming;
mod select;

#[cfg(test)]
mod tests;

pub use naming::{NamingOptions, ParameterNameProvider, TableNameProvider};

use tracing::debug;

use crate::ast::Statement;
use crate::catalog::{ObjectName, Schema};
use crate::config::{CompilerConfig, Settings};
use crate::dialect::{Capabilities, Dialect};
use crate::error::{SqlDomError, SqlDomResult};
use crate::output::{Node, PlaceholderId, SchemaPlaceholder};
use crate::result::CompilationResult;
use crate::translator::Translator;
use context::CompilerContext;

/// Compiles statements for one dialect.
pub struct SqlCompiler {
    translator: Box<dyn Translator>,
    capabilities: Capabilities,
}

impl SqlCompiler {
    /// Compiler with the dialect's own translator and capabilities.
    pub fn new(dialect: Dialect) -> Self {
        Self::with_translator(dialect.translator(), dialect.capabilities())
    }

    pub fn with_translator(translator: Box<dyn Translator>, capabilities: Capabilities) -> Self {
        Self {
            translator,
            capabilities,
        }
    }

    pub fn from_settings(settings: &Settings) -> SqlDomResult<Self> {
        Ok(Self::with_translator(settings.translator(), settings.capabilities()?))
    }

    pub fn translator(&self) -> &dyn Translator {
        self.translator.as_ref()
    }

    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    /// Compile a statement into a reusable result.
    pub fn compile(&self, statement: &Statement, config: &CompilerConfig) -> SqlDomResult<CompilationResult> {
        let mut ctx = CompilerContext::new(config);
        self.visit_statement(statement, &mut ctx)?;
        let (output, parameters) = ctx.finish();
        debug!(
            dialect = self.translator.name(),
            statement = statement.kind(),
            fast_path = output.is_text(),
            parameters = parameters.len(),
            "compiled"
        );
        Ok(CompilationResult::new(output, parameters))
    }

    /// Join separately compiled statements into one batch.
    pub fn build_batch(&self, statements: &[String]) -> String {
        self.translator.build_batch(statements)
    }

    fn visit_statement(&self, statement: &Statement, ctx: &mut CompilerContext) -> SqlDomResult<()> {
        match statement {
            Statement::Select(select) => self.visit_select(select, ctx),
            Statement::Query(query) => self.visit_query(query, ctx),
            Statement::Insert(insert) => self.visit_insert(insert, ctx),
            Statement::Update(update) => self.visit_update(update, ctx),
            Statement::Delete(delete) => self.visit_delete(delete, ctx),
            Statement::Batch(batch) => self.visit_batch(batch, ctx),
            Statement::Block(block) => self.visit_block(block, ctx),
            Statement::DeclareVariable(declare) => self.visit_declare_variable(declare, ctx),
            Statement::Assign(assign) => self.visit_assign(assign, ctx),
            Statement::If(if_statement) => self.visit_if(if_statement, ctx),
            Statement::While(while_statement) => self.visit_while(while_statement, ctx),
            Statement::DeclareCursor(cursor) => self.visit_declare_cursor(cursor, ctx),
            Statement::OpenCursor(cursor) => self.visit_open_cursor(cursor, ctx),
            Statement::Fetch(fetch) => self.visit_fetch(fetch, ctx),
            Statement::CloseCursor(cursor) => self.visit_close_cursor(cursor, ctx),
            Statement::Comment(comment) => self.visit_comment(&comment.text, ctx),
            Statement::Ddl(ddl) => self.visit_ddl(ddl, ctx),
        }
    }

    /// Fail with NotSupported unless the capability is present.
    fn require(&self, supported: bool, what: &str) -> SqlDomResult<()> {
        if supported {
            Ok(())
        } else {
            Err(SqlDomError::not_supported(what))
        }
    }

    /// Schema shown in qualified names, if the dialect has schemas.
    fn visible_schema<'n>(&self, name: &'n ObjectName) -> Option<&'n Schema> {
        name.schema.as_deref().filter(|_| self.capabilities.multischema)
    }

    fn visible_catalog<'s>(&self, schema: &'s Schema, ctx: &CompilerContext) -> Option<&'s str> {
        schema.catalog.as_deref().filter(|_| {
            self.capabilities.multidatabase
                && ctx.naming().contains(NamingOptions::DATABASE_QUALIFIED_OBJECTS)
        })
    }

    /// Quoted, dot-joined name of a catalog object.
    fn object_path(&self, name: &ObjectName, ctx: &CompilerContext) -> String {
        let mut parts: Vec<&str> = Vec::with_capacity(3);
        if let Some(schema) = self.visible_schema(name) {
            if let Some(catalog) = self.visible_catalog(schema, ctx) {
                parts.push(catalog);
            }
            parts.push(&schema.name);
        }
        parts.push(&name.name);
        self.translator.quote_path(&parts)
    }

    /// Emit an object name, with its schema as a render-time placeholder
    /// when schema placeholders are enabled.
    fn visit_object_name(&self, name: &ObjectName, ctx: &mut CompilerContext) {
        let schema = match self.visible_schema(name) {
            Some(schema) if ctx.schema_placeholders() => schema,
            _ => {
                let path = self.object_path(name, ctx);
                ctx.output.append_spaced(&path);
                return;
            }
        };
        let placeholder = SchemaPlaceholder {
            catalog: self.visible_catalog(schema, ctx).map(str::to_string),
            schema: schema.name.clone(),
            quoting: self.translator.quoting().clone(),
        };
        ctx.output.append_node(Node::Placeholder(PlaceholderId::Schema(placeholder)));
        ctx.output.append(".");
        ctx.output.append(&self.translator.quote_identifier(&name.name));
    }

    fn quote(&self, name: &str) -> String {
        self.translator.quote_identifier(name)
    }

    /// `(a, b, c)` of quoted names.
    fn quoted_list(&self, names: &[String]) -> String {
        let quoted: Vec<String> = names.iter().map(|n| self.quote(n)).collect();
        format!("({})", quoted.join(", "))
    }
}

/// Rejects comment text that could end the comment early or span lines.
fn validate_comment(text: &str) -> SqlDomResult<()> {
    if text.contains("*/") || text.contains("/*") || text.chars().any(char::is_control) {
        return Err(SqlDomError::InvalidComment(text.to_string()));
    }
    Ok(())
}
