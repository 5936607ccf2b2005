//! Data manipulation and procedural statements.

use super::context::CompilerContext;
use super::naming::NamingOptions;
use super::{SqlCompiler, validate_comment};
use crate::ast::{
    Assign, Batch, CursorRef, DeclareCursor, DeclareVariable, Delete, Expr, Fetch, FromItem, If,
    Insert, InsertSource, Statement, StatementBlock, TableRef, TableSource, Update, While,
};
use crate::error::{SqlDomError, SqlDomResult};
use crate::translator::*;

impl SqlCompiler {
    /// Emit the target table of a DML statement. Targets are never aliased;
    /// columns bound to them are qualified with the table's own name.
    fn visit_target(&self, table: &TableRef, ctx: &mut CompilerContext) -> SqlDomResult<()> {
        let mut ctx = ctx.enter(table.id)?;
        {
            let mut unaliased = ctx.without_naming(NamingOptions::TABLE_ALIASING);
            unaliased.table_name(table);
        }
        match table.source.as_ref() {
            TableSource::Table(target) => self.visit_object_name(&target.name, &mut ctx),
            TableSource::View(view) => self.visit_object_name(&view.name, &mut ctx),
            TableSource::Named(name) => ctx.output.append_spaced(&self.quote(name)),
            TableSource::Query { .. } => {
                return Err(SqlDomError::not_supported("derived table as a DML target"));
            }
        }
        Ok(())
    }

    /// FROM tables of an UPDATE or DELETE, registered before emission.
    fn visit_dml_from(&self, from: &FromItem, ctx: &mut CompilerContext) -> SqlDomResult<()> {
        let mut pending = vec![from];
        while let Some(item) = pending.pop() {
            match item {
                FromItem::Table(table) => {
                    ctx.table_name(table);
                }
                FromItem::Join(join) => {
                    pending.push(&join.right);
                    pending.push(&join.left);
                }
            }
        }
        self.visit_from(from, None, ctx)
    }

    pub(super) fn visit_insert(&self, insert: &Insert, ctx: &mut CompilerContext) -> SqlDomResult<()> {
        let t = self.translator.as_ref();
        let target = insert
            .into
            .as_ref()
            .ok_or(SqlDomError::MissingTarget { statement: "INSERT" })?;
        let mut ctx = ctx.enter(insert.id)?;

        ctx.output.append_spaced(t.insert(InsertSection::Entry));
        self.visit_target(target, &mut ctx)?;

        if !insert.columns.is_empty() {
            let names: Vec<String> = insert.columns.iter().map(|c| self.quote(&c.name)).collect();
            ctx.output.append_spaced(&format!(
                "{}{}{}",
                t.insert(InsertSection::ColumnsEntry),
                names.join(", "),
                t.insert(InsertSection::ColumnsExit)
            ));
        }

        match &insert.source {
            InsertSource::Values(rows) => {
                ctx.output.append_spaced(t.insert(InsertSection::Values));
                ctx.output.open_collection();
                for row in rows {
                    ctx.output.delimit(", ");
                    ctx.output.append_spaced(t.row(RowSection::Entry));
                    self.visit_list(row, t.row(RowSection::ItemDelimiter), &mut ctx)?;
                    ctx.output.append_spaced(t.row(RowSection::Exit));
                }
                ctx.output.close_collection();
            }
            InsertSource::Query(query) => self.visit_query(query, &mut ctx)?,
            InsertSource::DefaultValues => {
                ctx.output.append_spaced(t.insert(InsertSection::DefaultValues));
            }
        }

        ctx.output.append_spaced(t.insert(InsertSection::Exit));
        Ok(())
    }

    pub(super) fn visit_update(&self, update: &Update, ctx: &mut CompilerContext) -> SqlDomResult<()> {
        let t = self.translator.as_ref();
        let target = update
            .table
            .as_ref()
            .ok_or(SqlDomError::MissingTarget { statement: "UPDATE" })?;
        if let Some(unbound) = update
            .assignments
            .iter()
            .find(|a| a.column.table.is_some() && !a.column.is_bound_to(target))
        {
            return Err(SqlDomError::UnboundUpdateColumn {
                column: unbound.column.name.clone(),
            });
        }
        if update.limit.is_some() {
            self.require(self.capabilities.update_limit, "UPDATE with a row limit")?;
        }
        if update.from.is_some() {
            self.require(self.capabilities.update_from, "UPDATE ... FROM")?;
        }

        let mut ctx = ctx.enter(update.id)?;
        let limit_first = t.dml_limit_before_target();
        ctx.output.append_spaced(t.update(UpdateSection::Entry));
        if let (Some(limit), true) = (&update.limit, limit_first) {
            self.visit_dml_limit(t.update(UpdateSection::Limit), limit, t.update(UpdateSection::LimitEnd), &mut ctx)?;
        }
        self.visit_target(target, &mut ctx)?;

        ctx.output.append_spaced(t.update(UpdateSection::Set));
        ctx.output.open_collection();
        for assignment in &update.assignments {
            ctx.output.delimit(", ");
            {
                let mut unqualified = ctx.without_naming(NamingOptions::TABLE_QUALIFIED_COLUMNS);
                self.visit_column(&assignment.column, &mut unqualified);
            }
            ctx.output.append_spaced("=");
            self.visit_expr(&assignment.value, &mut ctx)?;
        }
        ctx.output.close_collection();

        if let Some(from) = &update.from {
            ctx.output.append_spaced(t.update(UpdateSection::From));
            self.visit_dml_from(from, &mut ctx)?;
        }
        if let Some(predicate) = &update.where_clause {
            ctx.output.append_spaced(t.update(UpdateSection::Where));
            self.visit_expr(predicate, &mut ctx)?;
        }
        if let (Some(limit), false) = (&update.limit, limit_first) {
            self.visit_dml_limit(t.update(UpdateSection::Limit), limit, t.update(UpdateSection::LimitEnd), &mut ctx)?;
        }
        ctx.output.append_spaced(t.update(UpdateSection::Exit));
        Ok(())
    }

    pub(super) fn visit_delete(&self, delete: &Delete, ctx: &mut CompilerContext) -> SqlDomResult<()> {
        let t = self.translator.as_ref();
        let target = delete
            .table
            .as_ref()
            .ok_or(SqlDomError::MissingTarget { statement: "DELETE" })?;
        if delete.limit.is_some() {
            self.require(self.capabilities.delete_limit, "DELETE with a row limit")?;
        }
        if delete.from.is_some() {
            self.require(self.capabilities.delete_from, "DELETE with a join source")?;
        }

        let mut ctx = ctx.enter(delete.id)?;
        let limit_first = t.dml_limit_before_target();
        ctx.output.append_spaced(t.delete(DeleteSection::Entry));
        if let (Some(limit), true) = (&delete.limit, limit_first) {
            self.visit_dml_limit(t.delete(DeleteSection::Limit), limit, t.delete(DeleteSection::LimitEnd), &mut ctx)?;
        }
        ctx.output.append_spaced(t.delete(DeleteSection::Target));
        self.visit_target(target, &mut ctx)?;

        if let Some(from) = &delete.from {
            ctx.output.append_spaced(t.delete(DeleteSection::From));
            self.visit_dml_from(from, &mut ctx)?;
        }
        if let Some(predicate) = &delete.where_clause {
            ctx.output.append_spaced(t.delete(DeleteSection::Where));
            self.visit_expr(predicate, &mut ctx)?;
        }
        if let (Some(limit), false) = (&delete.limit, limit_first) {
            self.visit_dml_limit(t.delete(DeleteSection::Limit), limit, t.delete(DeleteSection::LimitEnd), &mut ctx)?;
        }
        ctx.output.append_spaced(t.delete(DeleteSection::Exit));
        Ok(())
    }

    fn visit_dml_limit(&self, entry: &str, limit: &Expr, exit: &str, ctx: &mut CompilerContext) -> SqlDomResult<()> {
        ctx.output.append_spaced(entry);
        self.visit_expr(limit, ctx)?;
        ctx.output.append_spaced(exit);
        Ok(())
    }

    pub(super) fn visit_batch(&self, batch: &Batch, ctx: &mut CompilerContext) -> SqlDomResult<()> {
        let t = self.translator.as_ref();
        let mut ctx = ctx.enter(batch.id)?;
        ctx.output.append(t.batch(BatchSection::Entry));
        for (i, statement) in batch.statements.iter().enumerate() {
            if i > 0 {
                ctx.output.append(t.batch(BatchSection::StatementDelimiter));
            }
            let mut scope = ctx.statement_scope();
            self.visit_statement(statement, &mut scope)?;
        }
        ctx.output.append(t.batch(BatchSection::Exit));
        Ok(())
    }

    pub(super) fn visit_block(&self, block: &StatementBlock, ctx: &mut CompilerContext) -> SqlDomResult<()> {
        self.require(self.capabilities.procedural, "statement blocks")?;
        let t = self.translator.as_ref();
        let mut ctx = ctx.enter(block.id)?;
        ctx.output.append_spaced(t.block(BlockSection::Entry));
        ctx.output.indent();
        for statement in &block.statements {
            ctx.output.new_line();
            let mut scope = ctx.statement_scope();
            self.visit_statement(statement, &mut scope)?;
            scope.output.append(t.statement_delimiter());
        }
        ctx.output.unindent();
        ctx.output.new_line();
        ctx.output.append_spaced(t.block(BlockSection::Exit));
        Ok(())
    }

    /// An indented branch of IF or WHILE.
    fn visit_branch(&self, statement: &Statement, terminate: bool, ctx: &mut CompilerContext) -> SqlDomResult<()> {
        ctx.output.indent();
        ctx.output.new_line();
        {
            let mut scope = ctx.statement_scope();
            self.visit_statement(statement, &mut scope)?;
        }
        if terminate {
            ctx.output.append(self.translator.statement_delimiter());
        }
        ctx.output.unindent();
        Ok(())
    }

    pub(super) fn visit_if(&self, statement: &If, ctx: &mut CompilerContext) -> SqlDomResult<()> {
        self.require(self.capabilities.procedural, "IF")?;
        let t = self.translator.as_ref();
        let exit = t.if_statement(IfSection::Exit);
        let terminate = !exit.is_empty();

        ctx.output.append_spaced(t.if_statement(IfSection::Entry));
        self.visit_expr(&statement.condition, ctx)?;
        ctx.output.append_spaced(t.if_statement(IfSection::Then));
        self.visit_branch(&statement.then, terminate, ctx)?;
        if let Some(otherwise) = &statement.otherwise {
            ctx.output.new_line();
            ctx.output.append_spaced(t.if_statement(IfSection::Else));
            self.visit_branch(otherwise, terminate, ctx)?;
        }
        if terminate {
            ctx.output.new_line();
            ctx.output.append_spaced(exit);
        }
        Ok(())
    }

    pub(super) fn visit_while(&self, statement: &While, ctx: &mut CompilerContext) -> SqlDomResult<()> {
        self.require(self.capabilities.procedural, "WHILE")?;
        let t = self.translator.as_ref();
        let exit = t.while_statement(WhileSection::Exit);
        let terminate = !exit.is_empty();

        ctx.output.append_spaced(t.while_statement(WhileSection::Entry));
        self.visit_expr(&statement.condition, ctx)?;
        ctx.output.append_spaced(t.while_statement(WhileSection::Body));
        self.visit_branch(&statement.body, terminate, ctx)?;
        if terminate {
            ctx.output.new_line();
            ctx.output.append_spaced(exit);
        }
        Ok(())
    }

    pub(super) fn visit_declare_variable(&self, declare: &DeclareVariable, ctx: &mut CompilerContext) -> SqlDomResult<()> {
        self.require(self.capabilities.procedural, "variables")?;
        let t = self.translator.as_ref();
        let data_type = t.data_type(&declare.data_type)?;
        ctx.output.append_spaced(&t.declare_variable(&declare.name, &data_type)?);
        Ok(())
    }

    pub(super) fn visit_assign(&self, assign: &Assign, ctx: &mut CompilerContext) -> SqlDomResult<()> {
        self.require(self.capabilities.procedural, "variables")?;
        ctx.output.append_spaced(&self.translator.assign(&assign.variable));
        self.visit_expr(&assign.value, ctx)
    }

    pub(super) fn visit_declare_cursor(&self, cursor: &DeclareCursor, ctx: &mut CompilerContext) -> SqlDomResult<()> {
        self.require(self.capabilities.cursors, "cursors")?;
        let t = self.translator.as_ref();
        ctx.output.append_spaced(t.cursor(CursorSection::Declare)?);
        ctx.output.append_spaced(&self.quote(&cursor.name));
        if cursor.insensitive {
            ctx.output.append_spaced(t.cursor(CursorSection::Insensitive)?);
        }
        if cursor.scroll {
            ctx.output.append_spaced(t.cursor(CursorSection::Scroll)?);
        }
        ctx.output.append_spaced(t.cursor(CursorSection::For)?);
        {
            let mut scope = ctx.statement_scope();
            self.visit_query(&cursor.query, &mut scope)?;
        }
        if cursor.read_only {
            ctx.output.append_spaced(t.cursor(CursorSection::ReadOnly)?);
        }
        Ok(())
    }

    pub(super) fn visit_open_cursor(&self, cursor: &CursorRef, ctx: &mut CompilerContext) -> SqlDomResult<()> {
        self.require(self.capabilities.cursors, "cursors")?;
        ctx.output.append_spaced(self.translator.cursor(CursorSection::Open)?);
        ctx.output.append_spaced(&self.quote(&cursor.name));
        Ok(())
    }

    pub(super) fn visit_fetch(&self, fetch: &Fetch, ctx: &mut CompilerContext) -> SqlDomResult<()> {
        self.require(self.capabilities.cursors, "cursors")?;
        let t = self.translator.as_ref();
        ctx.output.append_spaced(t.cursor(CursorSection::Fetch)?);
        ctx.output.append_spaced(&t.fetch_direction(fetch.direction)?);
        ctx.output.append_spaced(t.cursor(CursorSection::FetchFrom)?);
        ctx.output.append_spaced(&self.quote(&fetch.cursor));
        if !fetch.into.is_empty() {
            let variables: Vec<String> = fetch.into.iter().map(|v| t.variable(v)).collect();
            ctx.output.append_spaced(t.cursor(CursorSection::Into)?);
            ctx.output.append_spaced(&variables.join(", "));
        }
        Ok(())
    }

    pub(super) fn visit_close_cursor(&self, cursor: &CursorRef, ctx: &mut CompilerContext) -> SqlDomResult<()> {
        self.require(self.capabilities.cursors, "cursors")?;
        ctx.output.append_spaced(self.translator.cursor(CursorSection::Close)?);
        ctx.output.append_spaced(&self.quote(&cursor.name));
        Ok(())
    }

    pub(super) fn visit_comment(&self, text: &str, ctx: &mut CompilerContext) -> SqlDomResult<()> {
        validate_comment(text)?;
        ctx.output.append_spaced(&self.translator.comment(text));
        Ok(())
    }
}
