//! Queries: SELECT, set operations and FROM clauses.

use super::context::CompilerContext;
use super::expr::append_delimiter;
use super::naming::is_catalog_object;
use super::{SqlCompiler, validate_comment};
use crate::ast::{BinaryOp, Expr, FromItem, JoinKind, Query, Select, SetQuery, TableRef, TableSource};
use crate::error::SqlDomResult;
use crate::translator::{BinarySection, SelectSection};

/// One table of a left-deep join sequence.
struct JoinStep<'a> {
    /// `None` for the first table
    kind: Option<JoinKind>,
    table: &'a TableRef,
    conditions: Vec<&'a Expr>,
}

/// Flatten a join tree into a left-deep sequence.
///
/// The condition of a join whose right side is itself a join moves to the
/// last table of that side, where every table it may reference is joined.
fn linearize<'a>(item: &'a FromItem, kind: Option<JoinKind>, on: Option<&'a Expr>, steps: &mut Vec<JoinStep<'a>>) {
    match item {
        FromItem::Table(table) => steps.push(JoinStep {
            kind,
            table,
            conditions: on.into_iter().collect(),
        }),
        FromItem::Join(join) => {
            linearize(&join.left, kind, None, steps);
            linearize(&join.right, Some(join.kind), join.on.as_ref(), steps);
            if let (Some(on), Some(last)) = (on, steps.last_mut()) {
                last.conditions.push(on);
            }
        }
    }
}

/// Table references of a FROM tree in textual order.
fn collect_tables<'a>(item: &'a FromItem, tables: &mut Vec<&'a TableRef>) {
    match item {
        FromItem::Table(table) => tables.push(table),
        FromItem::Join(join) => {
            collect_tables(&join.left, tables);
            collect_tables(&join.right, tables);
        }
    }
}

impl SqlCompiler {
    pub(super) fn visit_query(&self, query: &Query, ctx: &mut CompilerContext) -> SqlDomResult<()> {
        match query {
            Query::Select(select) => self.visit_select(select, ctx),
            Query::Set(set) => self.visit_set_query(set, ctx),
        }
    }

    pub(super) fn visit_select(&self, select: &Select, ctx: &mut CompilerContext) -> SqlDomResult<()> {
        let t = self.translator.as_ref();
        let mut ctx = ctx.enter(select.id)?;
        let lock_hint = match select.lock {
            Some(mode) => t.table_lock_hint(mode)?,
            None => None,
        };

        ctx.output.append_spaced(t.select(SelectSection::Entry, select));
        if let Some(comment) = &select.comment {
            validate_comment(comment)?;
            ctx.output.append_spaced(&t.comment(comment));
        }

        // FROM order decides alias order, whatever the select list mentions first
        if let Some(from) = &select.from {
            let mut tables = Vec::new();
            collect_tables(from, &mut tables);
            for table in tables {
                ctx.table_name(table);
            }
        }

        if select.columns.is_empty() {
            ctx.output.append_spaced("*");
        } else {
            ctx.output.open_collection();
            for item in &select.columns {
                ctx.output.delimit(", ");
                self.visit_expr(&item.expr, &mut ctx)?;
                if let Some(alias) = &item.alias {
                    ctx.output.append_spaced(t.column_alias_keyword());
                    ctx.output.append_spaced(&self.quote(alias));
                }
            }
            ctx.output.close_collection();
        }

        if let Some(from) = &select.from {
            ctx.output.append_spaced(t.select(SelectSection::From, select));
            self.visit_from(from, lock_hint, &mut ctx)?;
        }
        if let Some(predicate) = &select.where_clause {
            ctx.output.append_spaced(t.select(SelectSection::Where, select));
            self.visit_expr(predicate, &mut ctx)?;
        }
        if !select.group_by.is_empty() {
            ctx.output.append_spaced(t.select(SelectSection::GroupBy, select));
            self.visit_list(&select.group_by, ", ", &mut ctx)?;
        }
        if let Some(predicate) = &select.having {
            ctx.output.append_spaced(t.select(SelectSection::Having, select));
            self.visit_expr(predicate, &mut ctx)?;
        }

        let paging = select.limit.is_some() || select.offset.is_some();
        if !select.order_by.is_empty() {
            ctx.output.append_spaced(t.select(SelectSection::OrderBy, select));
            self.visit_order_items(&select.order_by, &mut ctx)?;
        } else if paging && t.requires_order_for_paging() {
            ctx.output.append_spaced(t.select(SelectSection::OrderBy, select));
            ctx.output.append_spaced(t.neutral_order());
        }
        if paging {
            self.visit_paging(select, &mut ctx)?;
        }

        if let (Some(mode), None) = (select.lock, lock_hint) {
            ctx.output.append_spaced(t.select_lock(mode)?);
        }

        let hints: Vec<String> = select.hints.iter().filter_map(|h| t.hint(h)).collect();
        if !hints.is_empty() {
            ctx.output.append_spaced(t.select(SelectSection::HintsEntry, select));
            for (i, hint) in hints.iter().enumerate() {
                if i > 0 {
                    append_delimiter(&mut ctx.output, t.select(SelectSection::HintDelimiter, select));
                }
                ctx.output.append_spaced(hint);
            }
            ctx.output.append_spaced(t.select(SelectSection::HintsExit, select));
        }

        ctx.output.append_spaced(t.select(SelectSection::Exit, select));
        Ok(())
    }

    fn visit_paging(&self, select: &Select, ctx: &mut CompilerContext) -> SqlDomResult<()> {
        let t = self.translator.as_ref();
        if t.offset_before_limit() {
            match &select.offset {
                Some(offset) => self.visit_paging_clause(select, SelectSection::Offset, offset, ctx)?,
                None if select.limit.is_some() && t.requires_offset_for_limit() => {
                    ctx.output.append_spaced(t.select(SelectSection::Offset, select));
                    ctx.output.append_spaced("0");
                    ctx.output.append_spaced(t.select(SelectSection::OffsetEnd, select));
                }
                None => {}
            }
            if let Some(limit) = &select.limit {
                self.visit_paging_clause(select, SelectSection::Limit, limit, ctx)?;
            }
        } else {
            match &select.limit {
                Some(limit) => self.visit_paging_clause(select, SelectSection::Limit, limit, ctx)?,
                None => {
                    if let Some(unbounded) = t.unbounded_limit() {
                        ctx.output.append_spaced(t.select(SelectSection::Limit, select));
                        ctx.output.append_spaced(unbounded);
                        ctx.output.append_spaced(t.select(SelectSection::LimitEnd, select));
                    }
                }
            }
            if let Some(offset) = &select.offset {
                self.visit_paging_clause(select, SelectSection::Offset, offset, ctx)?;
            }
        }
        Ok(())
    }

    fn visit_paging_clause(
        &self,
        select: &Select,
        section: SelectSection,
        value: &Expr,
        ctx: &mut CompilerContext,
    ) -> SqlDomResult<()> {
        let t = self.translator.as_ref();
        let end = match section {
            SelectSection::Offset => SelectSection::OffsetEnd,
            _ => SelectSection::LimitEnd,
        };
        ctx.output.append_spaced(t.select(section, select));
        self.visit_expr(value, ctx)?;
        ctx.output.append_spaced(t.select(end, select));
        Ok(())
    }

    fn visit_set_query(&self, set: &SetQuery, ctx: &mut CompilerContext) -> SqlDomResult<()> {
        let t = self.translator.as_ref();
        let mut ctx = ctx.enter(set.id)?;
        let operator = t.set_operation(set.op, set.all)?;
        let parenthesize = t.parenthesize_set_operands();

        for (i, operand) in [&set.left, &set.right].into_iter().enumerate() {
            if i > 0 {
                ctx.output.append_spaced(operator);
            }
            if parenthesize {
                ctx.output.append_spaced("(");
            }
            self.visit_query(operand, &mut ctx)?;
            if parenthesize {
                ctx.output.append_spaced(")");
            }
        }
        Ok(())
    }

    pub(super) fn visit_from(&self, from: &FromItem, lock_hint: Option<&str>, ctx: &mut CompilerContext) -> SqlDomResult<()> {
        if self.capabilities.explicit_join_order && from.is_right_nested() {
            return self.visit_linear_joins(from, lock_hint, ctx);
        }
        match from {
            FromItem::Table(table) => self.visit_table_ref(table, lock_hint, ctx),
            FromItem::Join(join) => {
                self.visit_from(&join.left, lock_hint, ctx)?;
                self.visit_join_kind(join.kind, ctx)?;
                match &join.right {
                    FromItem::Table(table) => self.visit_table_ref(table, lock_hint, ctx)?,
                    nested => {
                        ctx.output.append_spaced("(");
                        self.visit_from(nested, lock_hint, ctx)?;
                        ctx.output.append_spaced(")");
                    }
                }
                let conditions: Vec<&Expr> = join.on.iter().collect();
                self.visit_join_condition(join.kind, &conditions, ctx)
            }
        }
    }

    fn visit_linear_joins(&self, from: &FromItem, lock_hint: Option<&str>, ctx: &mut CompilerContext) -> SqlDomResult<()> {
        let mut steps = Vec::new();
        linearize(from, None, None, &mut steps);
        for step in steps {
            if let Some(kind) = step.kind {
                self.visit_join_kind(kind, ctx)?;
            }
            self.visit_table_ref(step.table, lock_hint, ctx)?;
            if let Some(kind) = step.kind {
                self.visit_join_condition(kind, &step.conditions, ctx)?;
            }
        }
        Ok(())
    }

    fn visit_join_kind(&self, kind: JoinKind, ctx: &mut CompilerContext) -> SqlDomResult<()> {
        if kind.is_apply() {
            self.require(self.capabilities.cross_apply, "CROSS APPLY / OUTER APPLY")?;
        }
        ctx.output.append_spaced(self.translator.join(kind)?);
        Ok(())
    }

    /// `ON` with the conditions conjoined; `ON 1 = 1` when a conditional
    /// join has none.
    fn visit_join_condition(&self, kind: JoinKind, conditions: &[&Expr], ctx: &mut CompilerContext) -> SqlDomResult<()> {
        let t = self.translator.as_ref();
        if !kind.has_condition() {
            return Ok(());
        }
        ctx.output.append_spaced(t.join_condition());
        if conditions.is_empty() {
            ctx.output.append_spaced(t.constant_predicate(true));
            return Ok(());
        }
        let and = t.binary(BinaryOp::And, BinarySection::Operator)?;
        for (i, condition) in conditions.iter().enumerate() {
            if i > 0 {
                ctx.output.append_spaced(and);
            }
            self.visit_expr(condition, ctx)?;
        }
        Ok(())
    }

    fn visit_table_ref(&self, table: &TableRef, lock_hint: Option<&str>, ctx: &mut CompilerContext) -> SqlDomResult<()> {
        let t = self.translator.as_ref();
        let mut ctx = ctx.enter(table.id)?;
        let name = ctx.table_name(table);

        match table.source.as_ref() {
            TableSource::Table(catalog_table) => self.visit_object_name(&catalog_table.name, &mut ctx),
            TableSource::View(view) => self.visit_object_name(&view.name, &mut ctx),
            TableSource::Query { query, .. } => {
                ctx.output.append_spaced("(");
                self.visit_query(query, &mut ctx)?;
                ctx.output.append_spaced(")");
            }
            TableSource::Named(own) => ctx.output.append_spaced(&self.quote(own)),
        }

        let derived = matches!(table.source.as_ref(), TableSource::Query { .. });
        if derived || table.source.own_name() != Some(name.as_str()) {
            ctx.output.append_spaced(t.table_alias_keyword());
            ctx.output.append_spaced(&self.quote(&name));
        }
        if let Some(hint) = lock_hint.filter(|_| is_catalog_object(&table.source)) {
            ctx.output.append_spaced(hint);
        }
        Ok(())
    }
}
