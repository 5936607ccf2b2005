//! Schema definition statements.

use super::SqlCompiler;
use super::context::CompilerContext;
use super::naming::NamingOptions;
use crate::ast::{
    AlterDomainAction, AlterSequence, AlterTableAction, ColumnChange, CreateView, DdlStatement, DropObject, Expr,
    ObjectKind,
};
use crate::catalog::{
    Assertion, ConstraintKind, Domain, DomainConstraint, ForeignKey, Index, IndexTarget, ObjectName, Partitioning,
    PartitionFunction, PartitionScheme, Schema, Sequence, SequenceDescriptor, Table, TableColumn, TableConstraint,
};
use crate::error::{SqlDomError, SqlDomResult};
use crate::translator::*;

/// Reject descriptors that could never generate a value.
fn validate_descriptor(descriptor: &SequenceDescriptor) -> SqlDomResult<()> {
    if descriptor.increment == Some(0) {
        return Err(SqlDomError::ZeroSequenceIncrement);
    }
    if let (Some(min), Some(max)) = (descriptor.min, descriptor.max) {
        if min > max {
            return Err(SqlDomError::InvalidSequenceBounds(format!(
                "MINVALUE {min} exceeds MAXVALUE {max}"
            )));
        }
    }
    if let Some(start) = descriptor.start {
        if descriptor.min.is_some_and(|min| start < min) || descriptor.max.is_some_and(|max| start > max) {
            return Err(SqlDomError::InvalidSequenceBounds(format!(
                "START WITH {start} lies outside the sequence range"
            )));
        }
    }
    Ok(())
}

fn validate_sequence_name(name: &ObjectName) -> SqlDomResult<()> {
    if name.name.trim().is_empty() {
        return Err(SqlDomError::MissingSequenceName);
    }
    if name.schema.is_none() {
        return Err(SqlDomError::MissingSequenceSchema(name.name.clone()));
    }
    Ok(())
}

fn validate_foreign_key(name: &str, key: &ForeignKey) -> SqlDomResult<()> {
    if key.columns.is_empty() {
        return Err(SqlDomError::EmptyForeignKeyColumns {
            constraint: name.to_string(),
            side: "referencing",
        });
    }
    if key.referenced_columns.is_empty() {
        return Err(SqlDomError::EmptyForeignKeyColumns {
            constraint: name.to_string(),
            side: "referenced",
        });
    }
    if key.columns.len() != key.referenced_columns.len() {
        return Err(SqlDomError::ForeignKeyColumnMismatch {
            constraint: name.to_string(),
            referencing: key.columns.len(),
            referenced: key.referenced_columns.len(),
        });
    }
    Ok(())
}

impl SqlCompiler {
    pub(super) fn visit_ddl(&self, ddl: &DdlStatement, ctx: &mut CompilerContext) -> SqlDomResult<()> {
        let t = self.translator.as_ref();
        match ddl {
            DdlStatement::CreateTable(table) => self.visit_create_table(table, ctx),
            DdlStatement::AlterTable { table, action } => self.visit_alter_table(table, action, ctx),
            DdlStatement::RenameTable { table, new_name } => {
                ctx.output.append_spaced(t.alter_table(AlterTableSection::Entry)?);
                self.visit_object_name(table, ctx);
                ctx.output.append_spaced(t.alter_table(AlterTableSection::RenameTo)?);
                ctx.output.append_spaced(&self.quote(new_name));
                Ok(())
            }
            DdlStatement::TruncateTable(table) => {
                ctx.output.append_spaced(t.truncate_table());
                self.visit_object_name(table, ctx);
                Ok(())
            }
            DdlStatement::CreateDomain(domain) => self.visit_create_domain(domain, ctx),
            DdlStatement::AlterDomain { domain, action } => self.visit_alter_domain(domain, action, ctx),
            DdlStatement::CreateSequence(sequence) => self.visit_create_sequence(sequence, ctx),
            DdlStatement::AlterSequence(alter) => self.visit_alter_sequence(alter, ctx),
            DdlStatement::CreateSchema(schema) => self.visit_create_schema(schema, ctx),
            DdlStatement::CreateView(view) => self.visit_create_view(view, ctx),
            DdlStatement::CreateIndex(index) => self.visit_create_index(index, ctx),
            DdlStatement::CreatePartitionFunction(function) => self.visit_partition_function(function, ctx),
            DdlStatement::CreatePartitionScheme(scheme) => self.visit_partition_scheme(scheme, ctx),
            DdlStatement::CreateAssertion(assertion) => self.visit_create_assertion(assertion, ctx),
            DdlStatement::CreateCollation(collation) => {
                ctx.output.append_spaced(t.collation(CollationSection::Entry)?);
                self.visit_object_name(&collation.name, ctx);
                let for_character_set = t.collation(CollationSection::For)?;
                if !for_character_set.is_empty() {
                    ctx.output.append_spaced(for_character_set);
                    ctx.output.append_spaced(&self.quote(&collation.character_set));
                }
                ctx.output.append_spaced(t.collation(CollationSection::From)?);
                ctx.output.append_spaced(&self.quote(&collation.source));
                match collation.pad_space {
                    Some(true) => ctx.output.append_spaced(t.collation(CollationSection::PadSpace)?),
                    Some(false) => ctx.output.append_spaced(t.collation(CollationSection::NoPad)?),
                    None => {}
                }
                Ok(())
            }
            DdlStatement::CreateCharacterSet(charset) => {
                ctx.output.append_spaced(t.character_set(CharacterSetSection::Entry)?);
                self.visit_object_name(&charset.name, ctx);
                ctx.output.append_spaced(t.character_set(CharacterSetSection::Source)?);
                ctx.output.append_spaced(&self.quote(&charset.source));
                if let Some(collation) = &charset.collation {
                    ctx.output.append_spaced(t.character_set(CharacterSetSection::Collate)?);
                    ctx.output.append_spaced(&self.quote(collation));
                }
                Ok(())
            }
            DdlStatement::CreateTranslation(translation) => {
                ctx.output.append_spaced(t.translation(TranslationSection::Entry)?);
                self.visit_object_name(&translation.name, ctx);
                ctx.output.append_spaced(t.translation(TranslationSection::For)?);
                ctx.output.append_spaced(&self.quote(&translation.source_charset));
                ctx.output.append_spaced(t.translation(TranslationSection::To)?);
                ctx.output.append_spaced(&self.quote(&translation.target_charset));
                ctx.output.append_spaced(t.translation(TranslationSection::From)?);
                ctx.output.append_spaced(&self.quote(&translation.source));
                Ok(())
            }
            DdlStatement::Drop(drop) => self.visit_drop(drop, ctx),
        }
    }

    /// An expression inside a schema object: columns are never qualified.
    fn visit_plain_expr(&self, expr: &Expr, ctx: &mut CompilerContext) -> SqlDomResult<()> {
        let mut plain = ctx.with_naming(NamingOptions::empty());
        self.visit_expr(expr, &mut plain)
    }

    /// `(expr)`, without doubling the parentheses a binary expression
    /// already carries.
    fn visit_parenthesized(&self, expr: &Expr, ctx: &mut CompilerContext) -> SqlDomResult<()> {
        if matches!(expr, Expr::Binary { .. }) {
            return self.visit_plain_expr(expr, ctx);
        }
        ctx.output.append_spaced("(");
        self.visit_plain_expr(expr, ctx)?;
        ctx.output.append_spaced(")");
        Ok(())
    }

    fn visit_partitioning(&self, partitioning: &Partitioning, ctx: &mut CompilerContext) {
        ctx.output.append_spaced(&format!(
            "{}({})",
            self.quote(&partitioning.scheme),
            self.quote(&partitioning.column)
        ));
    }

    fn visit_create_table(&self, table: &Table, ctx: &mut CompilerContext) -> SqlDomResult<()> {
        let t = self.translator.as_ref();
        ctx.output.append_spaced(t.create_table(CreateTableSection::Entry)?);
        self.visit_object_name(&table.name, ctx);
        ctx.output.append_spaced(t.create_table(CreateTableSection::ElementsEntry)?);

        let delimiter = t.create_table(CreateTableSection::ElementDelimiter)?;
        ctx.output.open_collection();
        for column in &table.columns {
            ctx.output.delimit(delimiter);
            self.visit_column_definition(column, ctx)?;
        }
        for constraint in &table.constraints {
            ctx.output.delimit(delimiter);
            self.visit_constraint(constraint, ctx)?;
        }
        ctx.output.close_collection();

        ctx.output.append_spaced(t.create_table(CreateTableSection::ElementsExit)?);
        if let Some(partitioning) = &table.partitioning {
            ctx.output.append_spaced(t.create_table(CreateTableSection::Partition)?);
            self.visit_partitioning(partitioning, ctx);
        }
        ctx.output.append_spaced(t.create_table(CreateTableSection::Exit)?);
        Ok(())
    }

    fn visit_column_definition(&self, column: &TableColumn, ctx: &mut CompilerContext) -> SqlDomResult<()> {
        let t = self.translator.as_ref();
        ctx.output.append_spaced(&self.quote(&column.name));

        if let Some(computed) = &column.computed {
            self.require(self.capabilities.computed_columns, "computed columns")?;
            ctx.output.append_spaced(t.column(ColumnSection::ComputedEntry)?);
            self.visit_plain_expr(&computed.expr, ctx)?;
            ctx.output.append_spaced(t.column(ColumnSection::ComputedExit)?);
            if computed.persisted {
                ctx.output.append_spaced(t.column(ColumnSection::Persisted)?);
            }
            return Ok(());
        }

        if let Some(data_type) = &column.data_type {
            ctx.output.append_spaced(&t.data_type(data_type)?);
        } else if let Some(domain) = &column.domain {
            self.visit_object_name(domain, ctx);
        }
        if let Some(identity) = &column.identity {
            validate_descriptor(identity)?;
            ctx.output.append_spaced(&t.identity(identity)?);
        }
        if let Some(default) = &column.default {
            ctx.output.append_spaced(t.column(ColumnSection::DefaultValue)?);
            self.visit_plain_expr(default, ctx)?;
        }
        if let Some(collation) = &column.collation {
            ctx.output.append_spaced(t.column(ColumnSection::Collate)?);
            self.visit_object_name(collation, ctx);
        }
        if !column.nullable {
            ctx.output.append_spaced(t.column(ColumnSection::NotNull)?);
        }
        Ok(())
    }

    fn visit_constraint(&self, constraint: &TableConstraint, ctx: &mut CompilerContext) -> SqlDomResult<()> {
        let t = self.translator.as_ref();
        if let Some(name) = &constraint.name {
            ctx.output.append_spaced(t.constraint(ConstraintSection::Entry));
            ctx.output.append_spaced(&self.quote(name));
        }
        match &constraint.kind {
            ConstraintKind::PrimaryKey { columns, clustered } => {
                ctx.output.append_spaced(t.constraint(ConstraintSection::PrimaryKey));
                if *clustered && self.capabilities.clustered_indexes {
                    ctx.output.append_spaced(t.constraint(ConstraintSection::Clustered));
                }
                ctx.output.append_spaced(&self.quoted_list(columns));
            }
            ConstraintKind::Unique { columns } => {
                ctx.output.append_spaced(t.constraint(ConstraintSection::Unique));
                ctx.output.append_spaced(&self.quoted_list(columns));
            }
            ConstraintKind::ForeignKey(key) => {
                validate_foreign_key(constraint.name.as_deref().unwrap_or_default(), key)?;
                ctx.output.append_spaced(t.constraint(ConstraintSection::ForeignKey));
                ctx.output.append_spaced(&self.quoted_list(&key.columns));
                ctx.output.append_spaced(t.constraint(ConstraintSection::References));
                self.visit_object_name(&key.referenced_table, ctx);
                ctx.output.append_spaced(&self.quoted_list(&key.referenced_columns));
                if let Some(action) = t.referential_action(key.on_delete) {
                    ctx.output.append_spaced(t.constraint(ConstraintSection::OnDelete));
                    ctx.output.append_spaced(action);
                }
                if let Some(action) = t.referential_action(key.on_update) {
                    ctx.output.append_spaced(t.constraint(ConstraintSection::OnUpdate));
                    ctx.output.append_spaced(action);
                }
            }
            ConstraintKind::Check(predicate) => {
                ctx.output.append_spaced(t.constraint(ConstraintSection::Check));
                self.visit_parenthesized(predicate, ctx)?;
            }
        }
        Ok(())
    }

    fn visit_alter_table(&self, table: &ObjectName, action: &AlterTableAction, ctx: &mut CompilerContext) -> SqlDomResult<()> {
        let t = self.translator.as_ref();
        ctx.output.append_spaced(t.alter_table(AlterTableSection::Entry)?);
        self.visit_object_name(table, ctx);

        match action {
            AlterTableAction::AddColumn(column) => {
                ctx.output.append_spaced(t.alter_table(AlterTableSection::AddColumn)?);
                self.visit_column_definition(column, ctx)?;
            }
            AlterTableAction::DropColumn { name, cascade } => {
                ctx.output.append_spaced(t.alter_table(AlterTableSection::DropColumn)?);
                ctx.output.append_spaced(&self.quote(name));
                if *cascade {
                    ctx.output.append_spaced(t.alter_table(AlterTableSection::Cascade)?);
                }
            }
            AlterTableAction::AlterColumn { name, change } => {
                ctx.output.append_spaced(t.alter_table(AlterTableSection::AlterColumn)?);
                ctx.output.append_spaced(&self.quote(name));
                match change {
                    ColumnChange::SetDefault(value) => {
                        ctx.output.append_spaced(t.alter_table(AlterTableSection::SetDefault)?);
                        self.visit_plain_expr(value, ctx)?;
                    }
                    ColumnChange::DropDefault => {
                        ctx.output.append_spaced(t.alter_table(AlterTableSection::DropDefault)?);
                    }
                    ColumnChange::SetType(data_type) => {
                        ctx.output.append_spaced(t.alter_table(AlterTableSection::SetType)?);
                        ctx.output.append_spaced(&t.data_type(data_type)?);
                    }
                    ColumnChange::SetNotNull => {
                        ctx.output.append_spaced(t.alter_table(AlterTableSection::SetNotNull)?);
                    }
                    ColumnChange::DropNotNull => {
                        ctx.output.append_spaced(t.alter_table(AlterTableSection::DropNotNull)?);
                    }
                }
            }
            AlterTableAction::RenameColumn { from, to } => {
                ctx.output.append_spaced(t.alter_table(AlterTableSection::RenameColumn)?);
                ctx.output.append_spaced(&self.quote(from));
                ctx.output.append_spaced("TO");
                ctx.output.append_spaced(&self.quote(to));
            }
            AlterTableAction::AddConstraint(constraint) => {
                ctx.output.append_spaced(t.alter_table(AlterTableSection::AddConstraint)?);
                self.visit_constraint(constraint, ctx)?;
            }
            AlterTableAction::DropConstraint { name, cascade } => {
                ctx.output.append_spaced(t.alter_table(AlterTableSection::DropConstraint)?);
                ctx.output.append_spaced(&self.quote(name));
                if *cascade {
                    ctx.output.append_spaced(t.alter_table(AlterTableSection::Cascade)?);
                }
            }
        }
        Ok(())
    }

    fn visit_domain_constraint(&self, constraint: &DomainConstraint, ctx: &mut CompilerContext) -> SqlDomResult<()> {
        let t = self.translator.as_ref();
        if let Some(name) = &constraint.name {
            ctx.output.append_spaced(t.constraint(ConstraintSection::Entry));
            ctx.output.append_spaced(&self.quote(name));
        }
        ctx.output.append_spaced(t.constraint(ConstraintSection::Check));
        self.visit_parenthesized(&constraint.check, ctx)
    }

    fn visit_create_domain(&self, domain: &Domain, ctx: &mut CompilerContext) -> SqlDomResult<()> {
        let t = self.translator.as_ref();
        ctx.output.append_spaced(t.domain(DomainSection::Entry)?);
        self.visit_object_name(&domain.name, ctx);
        ctx.output.append_spaced(t.domain(DomainSection::As)?);
        ctx.output.append_spaced(&t.data_type(&domain.data_type)?);
        if let Some(default) = &domain.default {
            ctx.output.append_spaced(t.column(ColumnSection::DefaultValue)?);
            self.visit_plain_expr(default, ctx)?;
        }
        if let Some(collation) = &domain.collation {
            ctx.output.append_spaced(t.column(ColumnSection::Collate)?);
            self.visit_object_name(collation, ctx);
        }
        for constraint in &domain.constraints {
            self.visit_domain_constraint(constraint, ctx)?;
        }
        Ok(())
    }

    fn visit_alter_domain(&self, domain: &ObjectName, action: &AlterDomainAction, ctx: &mut CompilerContext) -> SqlDomResult<()> {
        let t = self.translator.as_ref();
        ctx.output.append_spaced(t.domain(DomainSection::AlterEntry)?);
        self.visit_object_name(domain, ctx);
        match action {
            AlterDomainAction::SetDefault(value) => {
                ctx.output.append_spaced(t.domain(DomainSection::SetDefault)?);
                self.visit_plain_expr(value, ctx)?;
            }
            AlterDomainAction::DropDefault => ctx.output.append_spaced(t.domain(DomainSection::DropDefault)?),
            AlterDomainAction::AddConstraint(constraint) => {
                ctx.output.append_spaced(t.domain(DomainSection::AddConstraint)?);
                self.visit_domain_constraint(constraint, ctx)?;
            }
            AlterDomainAction::DropConstraint(name) => {
                ctx.output.append_spaced(t.domain(DomainSection::DropConstraint)?);
                ctx.output.append_spaced(&self.quote(name));
            }
        }
        Ok(())
    }

    fn visit_create_sequence(&self, sequence: &Sequence, ctx: &mut CompilerContext) -> SqlDomResult<()> {
        self.require(self.capabilities.sequences, "sequences")?;
        validate_sequence_name(&sequence.name)?;
        validate_descriptor(&sequence.descriptor)?;

        let t = self.translator.as_ref();
        ctx.output.append_spaced(t.sequence(SequenceSection::Entry)?);
        self.visit_object_name(&sequence.name, ctx);
        if let Some(data_type) = &sequence.data_type {
            ctx.output.append_spaced(t.sequence(SequenceSection::As)?);
            ctx.output.append_spaced(&t.data_type(data_type)?);
        }
        ctx.output.append_spaced(&sequence_options(t, &sequence.descriptor));
        Ok(())
    }

    fn visit_alter_sequence(&self, alter: &AlterSequence, ctx: &mut CompilerContext) -> SqlDomResult<()> {
        self.require(self.capabilities.sequences, "sequences")?;
        validate_sequence_name(&alter.sequence.name)?;
        // A changed start value restarts the sequence; an explicit restart wins
        let restart = alter.restart.or(alter.changes.start);
        // Unchanged bounds keep the sequence's current values
        let current = &alter.sequence.descriptor;
        validate_descriptor(&SequenceDescriptor {
            start: restart,
            increment: alter.changes.increment,
            min: alter.changes.min.or(current.min),
            max: alter.changes.max.or(current.max),
            cycle: None,
            cache: None,
        })?;

        let t = self.translator.as_ref();
        ctx.output.append_spaced(t.sequence(SequenceSection::AlterEntry)?);
        self.visit_object_name(&alter.sequence.name, ctx);
        if let Some(restart) = restart {
            ctx.output.append_spaced(t.sequence_descriptor(SequenceDescriptorSection::RestartValue));
            ctx.output.append_spaced(&restart.to_string());
        }
        let changes = SequenceDescriptor {
            start: None,
            ..alter.changes.clone()
        };
        ctx.output.append_spaced(&sequence_options(t, &changes));
        Ok(())
    }

    fn visit_create_schema(&self, schema: &Schema, ctx: &mut CompilerContext) -> SqlDomResult<()> {
        let t = self.translator.as_ref();
        ctx.output.append_spaced(t.create_schema()?);
        ctx.output.append_spaced(&self.quote(&schema.name));
        if let Some(owner) = &schema.owner {
            ctx.output.append_spaced(t.schema_authorization());
            ctx.output.append_spaced(&self.quote(owner));
        }
        Ok(())
    }

    fn visit_create_view(&self, create: &CreateView, ctx: &mut CompilerContext) -> SqlDomResult<()> {
        let t = self.translator.as_ref();
        let view = &create.view;
        let definition = view
            .definition
            .as_ref()
            .ok_or_else(|| SqlDomError::MissingViewDefinition(view.name.name.clone()))?;

        ctx.output.append_spaced(t.view(ViewSection::Entry, create.or_replace)?);
        self.visit_object_name(&view.name, ctx);
        if !view.columns.is_empty() {
            ctx.output.append_spaced(&self.quoted_list(&view.columns));
        }
        ctx.output.append_spaced(t.view(ViewSection::As, create.or_replace)?);
        {
            let mut scope = ctx.statement_scope();
            self.visit_query(definition, &mut scope)?;
        }
        if view.check_option {
            ctx.output.append_spaced(t.view(ViewSection::CheckOption, create.or_replace)?);
        }
        Ok(())
    }

    fn visit_create_index(&self, index: &Index, ctx: &mut CompilerContext) -> SqlDomResult<()> {
        let caps = &self.capabilities;
        if index.filter.is_some() {
            self.require(caps.filtered_indexes, "filtered indexes")?;
        }
        if index.columns.iter().any(|c| matches!(c.target, IndexTarget::Expression(_))) {
            self.require(caps.expression_indexes, "expression indexes")?;
        }
        if !index.include.is_empty() {
            self.require(caps.include_columns, "included index columns")?;
        }

        let t = self.translator.as_ref();
        ctx.output.append_spaced(t.index(IndexSection::Entry)?);
        if index.unique {
            ctx.output.append_spaced(t.index(IndexSection::Unique)?);
        }
        if caps.clustered_indexes {
            let section = if index.clustered {
                IndexSection::Clustered
            } else {
                IndexSection::NonClustered
            };
            ctx.output.append_spaced(t.index(section)?);
        }
        ctx.output.append_spaced(t.index(IndexSection::Index)?);
        ctx.output.append_spaced(&self.quote(&index.name));
        ctx.output.append_spaced(t.index(IndexSection::On)?);
        self.visit_object_name(&index.table, ctx);

        ctx.output.append_spaced("(");
        ctx.output.open_collection();
        for column in &index.columns {
            ctx.output.delimit(", ");
            match &column.target {
                IndexTarget::Column(name) => ctx.output.append_spaced(&self.quote(name)),
                IndexTarget::Expression(expr) => self.visit_parenthesized(expr, ctx)?,
            }
            if column.descending {
                ctx.output.append_spaced(t.order_direction(false));
            }
        }
        ctx.output.close_collection();
        ctx.output.append_spaced(")");

        if !index.include.is_empty() {
            ctx.output.append_spaced(t.index(IndexSection::Include)?);
            ctx.output.append_spaced(&self.quoted_list(&index.include));
        }
        if t.index_options_before_filter() {
            self.visit_fill_factor(index, ctx)?;
            self.visit_index_filter(index, ctx)?;
        } else {
            self.visit_index_filter(index, ctx)?;
            self.visit_fill_factor(index, ctx)?;
        }
        if let Some(partitioning) = &index.partitioning {
            ctx.output.append_spaced(t.index(IndexSection::Partition)?);
            self.visit_partitioning(partitioning, ctx);
        }
        Ok(())
    }

    fn visit_fill_factor(&self, index: &Index, ctx: &mut CompilerContext) -> SqlDomResult<()> {
        if let Some(fill_factor) = index.fill_factor {
            ctx.output.append_spaced(self.translator.index(IndexSection::FillFactor)?);
            ctx.output.append_spaced(&fill_factor.to_string());
            ctx.output.append_spaced(self.translator.index(IndexSection::FillFactorExit)?);
        }
        Ok(())
    }

    fn visit_index_filter(&self, index: &Index, ctx: &mut CompilerContext) -> SqlDomResult<()> {
        if let Some(filter) = &index.filter {
            ctx.output.append_spaced(self.translator.index(IndexSection::Where)?);
            self.visit_plain_expr(filter, ctx)?;
        }
        Ok(())
    }

    fn visit_partition_function(&self, function: &PartitionFunction, ctx: &mut CompilerContext) -> SqlDomResult<()> {
        let t = self.translator.as_ref();
        let values = function
            .values
            .iter()
            .map(|v| t.literal(v))
            .collect::<SqlDomResult<Vec<_>>>()?;
        let sql = t.create_partition_function(
            &self.quote(&function.name),
            &t.data_type(&function.data_type)?,
            function.boundary,
            &values,
        )?;
        ctx.output.append_spaced(&sql);
        Ok(())
    }

    fn visit_partition_scheme(&self, scheme: &PartitionScheme, ctx: &mut CompilerContext) -> SqlDomResult<()> {
        let filegroups: Vec<String> = scheme.filegroups.iter().map(|f| self.quote(f)).collect();
        let sql = self.translator.create_partition_scheme(
            &self.quote(&scheme.name),
            &self.quote(&scheme.function),
            &filegroups,
            scheme.all,
        )?;
        ctx.output.append_spaced(&sql);
        Ok(())
    }

    fn visit_create_assertion(&self, assertion: &Assertion, ctx: &mut CompilerContext) -> SqlDomResult<()> {
        let t = self.translator.as_ref();
        ctx.output.append_spaced(t.assertion(AssertionSection::Entry)?);
        self.visit_object_name(&assertion.name, ctx);
        ctx.output.append_spaced(t.assertion(AssertionSection::Check)?);
        ctx.output.append_spaced("(");
        self.visit_plain_expr(&assertion.condition, ctx)?;
        ctx.output.append_spaced(")");
        if assertion.deferrable {
            ctx.output.append_spaced(t.assertion(AssertionSection::Deferrable)?);
        }
        if assertion.initially_deferred {
            ctx.output.append_spaced(t.assertion(AssertionSection::InitiallyDeferred)?);
        }
        Ok(())
    }

    fn visit_drop(&self, drop: &DropObject, ctx: &mut CompilerContext) -> SqlDomResult<()> {
        let t = self.translator.as_ref();
        ctx.output.append_spaced(t.drop_object(drop.kind, DropSection::Entry)?);
        match drop.kind {
            ObjectKind::Schema => ctx.output.append_spaced(&self.quote(&drop.name.name)),
            _ => self.visit_object_name(&drop.name, ctx),
        }
        if let Some(table) = &drop.table {
            let on = t.drop_object(drop.kind, DropSection::On)?;
            if !on.is_empty() {
                ctx.output.append_spaced(on);
                self.visit_object_name(table, ctx);
            }
        }
        match drop.cascade {
            Some(true) => ctx.output.append_spaced(t.drop_object(drop.kind, DropSection::Cascade)?),
            Some(false) => ctx.output.append_spaced(t.drop_object(drop.kind, DropSection::Restrict)?),
            None => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_validation() {
        assert!(matches!(
            validate_descriptor(&SequenceDescriptor::new(1, 0)),
            Err(SqlDomError::ZeroSequenceIncrement)
        ));

        let inverted = SequenceDescriptor {
            min: Some(10),
            max: Some(1),
            ..SequenceDescriptor::default()
        };
        assert!(matches!(validate_descriptor(&inverted), Err(SqlDomError::InvalidSequenceBounds(_))));

        let start_below = SequenceDescriptor {
            start: Some(0),
            min: Some(1),
            ..SequenceDescriptor::default()
        };
        assert!(matches!(validate_descriptor(&start_below), Err(SqlDomError::InvalidSequenceBounds(_))));

        assert!(validate_descriptor(&SequenceDescriptor::new(5, -1)).is_ok());
    }

    #[test]
    fn test_foreign_key_validation() {
        let key = ForeignKey {
            columns: vec!["a".into(), "b".into()],
            referenced_table: ObjectName::new("t"),
            referenced_columns: vec!["id".into()],
            on_delete: Default::default(),
            on_update: Default::default(),
        };
        assert!(matches!(
            validate_foreign_key("fk", &key),
            Err(SqlDomError::ForeignKeyColumnMismatch { referencing: 2, referenced: 1, .. })
        ));
    }
}
