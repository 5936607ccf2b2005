//! Expression compilation.

use super::SqlCompiler;
use super::context::CompilerContext;
use super::naming::NamingOptions;
use crate::ast::{
    BinaryOp, Case, ColumnRef, DynamicFilter, Expr, OrderItem, Parameter, PlaceholderRef, TableRef,
    UnaryOp,
};
use crate::error::SqlDomResult;
use crate::output::{Node, OutputBuilder, PlaceholderId};
use crate::translator::*;

/// Write a list delimiter: exactly when it starts with a comma, spaced
/// like any other token otherwise.
pub(super) fn append_delimiter(output: &mut OutputBuilder, delimiter: &str) {
    if delimiter.starts_with(',') {
        output.append(delimiter);
    } else {
        output.append_spaced(delimiter);
    }
}

/// Operands of a chain of the same associative operator, left to right.
fn flatten<'e>(op: BinaryOp, left: &'e Expr, right: &'e Expr) -> Vec<&'e Expr> {
    let mut operands = Vec::new();
    let mut pending = vec![right, left];
    while let Some(expr) = pending.pop() {
        match expr {
            Expr::Binary {
                op: inner,
                left,
                right,
            } if *inner == op => {
                pending.push(right);
                pending.push(left);
            }
            other => operands.push(other),
        }
    }
    operands
}

impl SqlCompiler {
    pub(super) fn visit_expr(&self, expr: &Expr, ctx: &mut CompilerContext) -> SqlDomResult<()> {
        let t = self.translator.as_ref();
        match expr {
            Expr::Literal(value) => ctx.output.append_spaced(&t.literal(value)?),
            Expr::Null => ctx.output.append_spaced("NULL"),
            Expr::Default => ctx.output.append_spaced("DEFAULT"),
            Expr::Native(text) => ctx.output.append_spaced(text),
            Expr::Parameter(parameter) => self.visit_parameter(parameter, ctx),
            Expr::Placeholder(placeholder) => {
                let id = match placeholder {
                    PlaceholderRef::Named(key) => PlaceholderId::Named(key.clone()),
                    PlaceholderRef::TypeId(type_name) => PlaceholderId::TypeId(type_name.clone()),
                };
                ctx.output.append_node(Node::Placeholder(id));
            }
            Expr::Variable(name) => {
                self.require(self.capabilities.procedural, "variables")?;
                ctx.output.append_spaced(&t.variable(name));
            }
            Expr::Column(column) => self.visit_column(column, ctx),
            Expr::AllColumns(table) => self.visit_all_columns(table.as_ref(), ctx),
            Expr::AliasRef(alias) => ctx.output.append_spaced(&self.quote(alias)),
            Expr::Binary { op, left, right } => self.visit_binary(*op, left, right, ctx)?,
            Expr::Unary { op, operand } => {
                ctx.output.append_spaced(t.unary(*op, UnarySection::Entry));
                self.visit_expr(operand, ctx)?;
                ctx.output.append_spaced(t.unary(*op, UnarySection::Exit));
            }
            Expr::Between {
                expr,
                low,
                high,
                negated,
            } => {
                self.visit_expr(expr, ctx)?;
                ctx.output.append_spaced(t.between(*negated));
                self.visit_expr(low, ctx)?;
                ctx.output.append_spaced(t.binary(BinaryOp::And, BinarySection::Operator)?);
                self.visit_expr(high, ctx)?;
            }
            Expr::Like {
                expr,
                pattern,
                escape,
                negated,
            } => {
                self.visit_expr(expr, ctx)?;
                ctx.output.append_spaced(t.like(*negated));
                self.visit_expr(pattern, ctx)?;
                if let Some(escape) = escape {
                    ctx.output.append_spaced("ESCAPE");
                    ctx.output.append_spaced(&t.string_literal(&escape.to_string()));
                }
            }
            Expr::Case(case) => self.visit_case(case, ctx)?,
            Expr::Cast { expr, to } => {
                ctx.output.append_spaced(t.cast(CastSection::Entry));
                self.visit_expr(expr, ctx)?;
                ctx.output.append_spaced(t.cast(CastSection::As));
                ctx.output.append_spaced(&t.data_type(to)?);
                ctx.output.append_spaced(t.cast(CastSection::Exit));
            }
            Expr::Collate { expr, collation } => {
                self.visit_expr(expr, ctx)?;
                ctx.output.append_spaced(t.collate());
                self.visit_object_name(collation, ctx);
            }
            Expr::Row(items) => {
                ctx.output.append_spaced(t.row(RowSection::Entry));
                self.visit_list(items, t.row(RowSection::ItemDelimiter), ctx)?;
                ctx.output.append_spaced(t.row(RowSection::Exit));
            }
            Expr::Array(values) => {
                let items = if values.is_empty() {
                    vec!["NULL".to_string()]
                } else {
                    values.iter().map(|v| t.literal(v)).collect::<SqlDomResult<_>>()?
                };
                let delimiter = t.row(RowSection::ItemDelimiter);
                ctx.output.append_spaced(t.row(RowSection::Entry));
                ctx.output.append_spaced(&items.join(delimiter));
                ctx.output.append_spaced(t.row(RowSection::Exit));
            }
            Expr::Aggregate { kind, distinct, arg } => {
                ctx.output.append_spaced(t.aggregate(*kind));
                if *distinct {
                    ctx.output.append_spaced("DISTINCT");
                }
                match arg {
                    Some(arg) => self.visit_expr(arg, ctx)?,
                    None => ctx.output.append_spaced("*"),
                }
                ctx.output.append_spaced(")");
            }
            Expr::RowNumber {
                partition_by,
                order_by,
            } => self.visit_row_number(partition_by, order_by, ctx)?,
            Expr::SubQuery(query) => {
                ctx.output.append_spaced("(");
                self.visit_query(query, ctx)?;
                ctx.output.append_spaced(")");
            }
            Expr::Function { kind, args } => {
                ctx.output.append_spaced(t.function(*kind, FunctionSection::Entry)?);
                self.visit_list(args, t.function(*kind, FunctionSection::ArgumentDelimiter)?, ctx)?;
                ctx.output.append_spaced(t.function(*kind, FunctionSection::Exit)?);
            }
            Expr::UserFunction { name, args } => {
                self.visit_object_name(name, ctx);
                ctx.output.append("(");
                self.visit_list(args, ", ", ctx)?;
                ctx.output.append_spaced(")");
            }
            Expr::CustomFunction { name, args } => {
                ctx.output.append_spaced(&t.custom_function(name, FunctionSection::Entry)?);
                let delimiter = t.custom_function(name, FunctionSection::ArgumentDelimiter)?;
                self.visit_list(args, &delimiter, ctx)?;
                ctx.output.append_spaced(&t.custom_function(name, FunctionSection::Exit)?);
            }
            Expr::Trim { expr, side, chars } => {
                ctx.output.append_spaced(&t.trim(*side, chars.as_deref(), UnarySection::Entry)?);
                self.visit_expr(expr, ctx)?;
                ctx.output.append_spaced(&t.trim(*side, chars.as_deref(), UnarySection::Exit)?);
            }
            Expr::Extract { part, expr } => {
                ctx.output.append_spaced(&t.extract(*part, UnarySection::Entry)?);
                self.visit_expr(expr, ctx)?;
                ctx.output.append_spaced(&t.extract(*part, UnarySection::Exit)?);
            }
            Expr::FullText {
                kind,
                columns,
                search,
            } => {
                self.require(self.capabilities.full_text, "full-text predicates")?;
                ctx.output.append_spaced(t.full_text(*kind, FullTextSection::Entry)?);
                ctx.output.append_spaced(t.full_text(*kind, FullTextSection::ColumnsEntry)?);
                ctx.output.open_collection();
                for column in columns {
                    ctx.output.delimit(", ");
                    self.visit_column(column, ctx);
                }
                ctx.output.close_collection();
                ctx.output.append_spaced(t.full_text(*kind, FullTextSection::ColumnsExit)?);
                self.visit_expr(search, ctx)?;
                ctx.output.append_spaced(t.full_text(*kind, FullTextSection::Exit)?);
            }
            Expr::NextValue(sequence) => {
                self.require(self.capabilities.sequences, "sequences")?;
                let entry = t.next_value(NextValueSection::Entry)?;
                ctx.output.append_spaced(entry);
                if !entry.is_empty() {
                    ctx.output.attach();
                }
                self.visit_object_name(&sequence.name, ctx);
                ctx.output.append(t.next_value(NextValueSection::Exit)?);
            }
            Expr::DynamicFilter(filter) => self.visit_dynamic_filter(filter, ctx)?,
            Expr::Variant {
                key,
                main,
                alternative,
            } => {
                ctx.output.begin_capture();
                self.visit_expr(main, ctx)?;
                let main = ctx.output.end_capture();
                ctx.output.begin_capture();
                self.visit_expr(alternative, ctx)?;
                let alternative = ctx.output.end_capture();
                ctx.output.append_node(Node::Variant {
                    key: key.clone(),
                    main,
                    alternative,
                });
            }
        }
        Ok(())
    }

    /// Compile expressions separated by `delimiter`.
    pub(super) fn visit_list(&self, items: &[Expr], delimiter: &str, ctx: &mut CompilerContext) -> SqlDomResult<()> {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                append_delimiter(&mut ctx.output, delimiter);
            }
            self.visit_expr(item, ctx)?;
        }
        Ok(())
    }

    pub(super) fn visit_order_items(&self, items: &[OrderItem], ctx: &mut CompilerContext) -> SqlDomResult<()> {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                ctx.output.append(", ");
            }
            self.visit_expr(&item.expr, ctx)?;
            ctx.output.append_spaced(self.translator.order_direction(item.ascending));
        }
        Ok(())
    }

    fn visit_parameter(&self, parameter: &Parameter, ctx: &mut CompilerContext) {
        let name = ctx.parameter_name(parameter);
        let prefix = &self.capabilities.parameter_prefix;
        if parameter.name.is_some() && name.starts_with(prefix.as_str()) {
            ctx.output.append_spaced(&name);
        } else {
            ctx.output.append_spaced(&format!("{prefix}{name}"));
        }
    }

    pub(super) fn visit_column(&self, column: &ColumnRef, ctx: &mut CompilerContext) {
        let name = self.quote(&column.name);
        match &column.table {
            Some(table) if ctx.naming().contains(NamingOptions::TABLE_QUALIFIED_COLUMNS) => {
                let table_name = ctx.table_name(table);
                ctx.output.append_spaced(&format!("{}.{name}", self.quote(&table_name)));
            }
            _ => ctx.output.append_spaced(&name),
        }
    }

    fn visit_all_columns(&self, table: Option<&TableRef>, ctx: &mut CompilerContext) {
        match table {
            Some(table) if ctx.naming().contains(NamingOptions::TABLE_QUALIFIED_COLUMNS) => {
                let table_name = ctx.table_name(table);
                ctx.output.append_spaced(&format!("{}.*", self.quote(&table_name)));
            }
            _ => ctx.output.append_spaced("*"),
        }
    }

    fn visit_binary(&self, op: BinaryOp, left: &Expr, right: &Expr, ctx: &mut CompilerContext) -> SqlDomResult<()> {
        let t = self.translator.as_ref();
        let operands = if op.is_chainable() {
            flatten(op, left, right)
        } else {
            vec![left, right]
        };
        let operator = t.binary(op, BinarySection::Operator)?;

        ctx.output.append_spaced(t.binary(op, BinarySection::Entry)?);
        for (i, operand) in operands.into_iter().enumerate() {
            if i > 0 {
                append_delimiter(&mut ctx.output, operator);
            }
            self.visit_expr(operand, ctx)?;
        }
        ctx.output.append_spaced(t.binary(op, BinarySection::Exit)?);
        Ok(())
    }

    fn visit_case(&self, case: &Case, ctx: &mut CompilerContext) -> SqlDomResult<()> {
        let t = self.translator.as_ref();
        ctx.output.append_spaced(t.case(CaseSection::Entry));
        if let Some(value) = &case.value {
            self.visit_expr(value, ctx)?;
        }
        for (condition, result) in &case.branches {
            ctx.output.append_spaced(t.case(CaseSection::When));
            self.visit_expr(condition, ctx)?;
            ctx.output.append_spaced(t.case(CaseSection::Then));
            self.visit_expr(result, ctx)?;
        }
        if let Some(otherwise) = &case.otherwise {
            ctx.output.append_spaced(t.case(CaseSection::Else));
            self.visit_expr(otherwise, ctx)?;
        }
        ctx.output.append_spaced(t.case(CaseSection::Exit));
        Ok(())
    }

    fn visit_row_number(&self, partition_by: &[Expr], order_by: &[OrderItem], ctx: &mut CompilerContext) -> SqlDomResult<()> {
        let t = self.translator.as_ref();
        self.require(self.capabilities.row_number, "ROW_NUMBER")?;
        ctx.output.append_spaced(t.row_number(RowNumberSection::Entry));
        if !partition_by.is_empty() {
            ctx.output.append_spaced(t.row_number(RowNumberSection::PartitionBy));
            self.visit_list(partition_by, ", ", ctx)?;
        }
        ctx.output.append_spaced(t.row_number(RowNumberSection::OrderBy));
        if order_by.is_empty() {
            ctx.output.append_spaced(t.neutral_order());
        } else {
            self.visit_order_items(order_by, ctx)?;
        }
        ctx.output.append_spaced(t.row_number(RowNumberSection::Exit));
        Ok(())
    }

    /// A list whose length is only known at render time becomes a cycle.
    ///
    /// With multi-column IN the cycle expands inside `IN (...)`; otherwise
    /// each row becomes an equality disjunct. No rows renders a predicate
    /// that is false rather than unknown.
    fn visit_dynamic_filter(&self, filter: &DynamicFilter, ctx: &mut CompilerContext) -> SqlDomResult<()> {
        let t = self.translator.as_ref();
        if filter.expressions.is_empty() {
            ctx.output.append_spaced(t.constant_predicate(filter.negated));
            return Ok(());
        }

        if filter.negated {
            ctx.output.append_spaced(t.unary(UnaryOp::Not, UnarySection::Entry));
        }
        ctx.output.append_spaced("(");
        if self.capabilities.multicolumn_in {
            self.visit_dynamic_in(filter, ctx)?;
        } else {
            self.visit_dynamic_disjunction(filter, ctx)?;
        }
        ctx.output.append_spaced(")");
        Ok(())
    }

    fn visit_dynamic_in(&self, filter: &DynamicFilter, ctx: &mut CompilerContext) -> SqlDomResult<()> {
        let t = self.translator.as_ref();
        let width = filter.expressions.len();
        let delimiter = t.row(RowSection::ItemDelimiter);

        if width == 1 {
            self.visit_expr(&filter.expressions[0], ctx)?;
        } else {
            ctx.output.append_spaced(t.row(RowSection::Entry));
            self.visit_list(&filter.expressions, delimiter, ctx)?;
            ctx.output.append_spaced(t.row(RowSection::Exit));
        }
        ctx.output.append_spaced(t.binary(BinaryOp::In, BinarySection::Operator)?);
        ctx.output.append_spaced("(");

        ctx.output.begin_capture();
        if width == 1 {
            ctx.output.append_node(Node::CycleItem(0));
        } else {
            ctx.output.append_spaced(t.row(RowSection::Entry));
            for i in 0..width {
                if i > 0 {
                    append_delimiter(&mut ctx.output, delimiter);
                }
                ctx.output.append_node(Node::CycleItem(i));
            }
            ctx.output.append_spaced(t.row(RowSection::Exit));
        }
        let body = ctx.output.end_capture();

        // `x IN (NULL) AND (1 = 0)`: the list closes early so the false
        // constant is conjoined outside it.
        ctx.output.begin_capture();
        if width == 1 {
            ctx.output.append_spaced("NULL");
        } else {
            let nulls = vec!["NULL"; width].join(delimiter);
            ctx.output.append_spaced(t.row(RowSection::Entry));
            ctx.output.append_spaced(&nulls);
            ctx.output.append_spaced(t.row(RowSection::Exit));
        }
        ctx.output.append_spaced(")");
        ctx.output.append_spaced(t.binary(BinaryOp::And, BinarySection::Operator)?);
        ctx.output.append_spaced("(");
        ctx.output.append_spaced(t.constant_predicate(false));
        let empty = ctx.output.end_capture();

        ctx.output.append_node(Node::Cycle {
            key: filter.key.clone(),
            body,
            empty,
            delimiter: delimiter.to_string(),
        });
        ctx.output.append_spaced(")");
        Ok(())
    }

    fn visit_dynamic_disjunction(&self, filter: &DynamicFilter, ctx: &mut CompilerContext) -> SqlDomResult<()> {
        let t = self.translator.as_ref();
        let entry = t.binary(BinaryOp::Equals, BinarySection::Entry)?;
        let equals = t.binary(BinaryOp::Equals, BinarySection::Operator)?;
        let exit = t.binary(BinaryOp::Equals, BinarySection::Exit)?;
        let multiple = filter.expressions.len() > 1;

        ctx.output.begin_capture();
        if multiple {
            ctx.output.append_spaced(t.binary(BinaryOp::And, BinarySection::Entry)?);
        }
        for (i, expr) in filter.expressions.iter().enumerate() {
            if i > 0 {
                ctx.output.append_spaced(t.binary(BinaryOp::And, BinarySection::Operator)?);
            }
            ctx.output.append_spaced(entry);
            self.visit_expr(expr, ctx)?;
            ctx.output.append_spaced(equals);
            ctx.output.append_node(Node::CycleItem(i));
            ctx.output.append_spaced(exit);
        }
        if multiple {
            ctx.output.append_spaced(t.binary(BinaryOp::And, BinarySection::Exit)?);
        }
        let body = ctx.output.end_capture();

        ctx.output.begin_capture();
        ctx.output.append_spaced(t.constant_predicate(false));
        let empty = ctx.output.end_capture();

        let or = t.binary(BinaryOp::Or, BinarySection::Operator)?;
        ctx.output.append_node(Node::Cycle {
            key: filter.key.clone(),
            body,
            empty,
            delimiter: format!(" {or} "),
        });
        Ok(())
    }
}
