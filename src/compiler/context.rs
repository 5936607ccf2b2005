//! Per-compile mutable state.

use std::collections::{HashMap, HashSet};
use std::mem;
use std::ops::{Deref, DerefMut};

use super::naming::{NamingOptions, ParameterNameProvider, TableNameProvider};
use crate::ast::{NodeId, Parameter, TableRef};
use crate::config::CompilerConfig;
use crate::error::{SqlDomError, SqlDomResult};
use crate::output::{Node, OutputBuilder};

/// State of one compile: the output under construction, the open
/// traversal path, the naming options in force and both name providers.
pub(crate) struct CompilerContext {
    pub output: OutputBuilder,
    naming: NamingOptions,
    path: Vec<NodeId>,
    on_path: HashSet<NodeId>,
    tables: TableNameProvider,
    parameters: ParameterNameProvider,
    schema_placeholders: bool,
}

impl CompilerContext {
    pub fn new(config: &CompilerConfig) -> Self {
        Self {
            output: OutputBuilder::new(),
            naming: config.naming,
            path: Vec::new(),
            on_path: HashSet::new(),
            tables: TableNameProvider::new(),
            parameters: ParameterNameProvider::new(config.parameter_prefix.clone()),
            schema_placeholders: config.schema_placeholders,
        }
    }

    pub fn naming(&self) -> NamingOptions {
        self.naming
    }

    pub fn schema_placeholders(&self) -> bool {
        self.schema_placeholders
    }

    /// Put a node on the traversal path until the returned scope drops.
    pub fn enter(&mut self, id: NodeId) -> SqlDomResult<Scope<'_>> {
        if !self.on_path.insert(id) {
            return Err(SqlDomError::CircularReference(id));
        }
        self.path.push(id);
        Ok(Scope {
            ctx: self,
            restore: Some(Restore::Node(id)),
        })
    }

    /// Replace the naming options until the returned scope drops.
    pub fn with_naming(&mut self, naming: NamingOptions) -> Scope<'_> {
        let saved = mem::replace(&mut self.naming, naming);
        Scope {
            ctx: self,
            restore: Some(Restore::Naming(saved)),
        }
    }

    pub fn without_naming(&mut self, options: NamingOptions) -> Scope<'_> {
        let naming = self.naming - options;
        self.with_naming(naming)
    }

    /// Give a statement of a batch or block its own alias namespace.
    pub fn statement_scope(&mut self) -> Scope<'_> {
        let saved = mem::take(&mut self.tables);
        Scope {
            ctx: self,
            restore: Some(Restore::Tables(Box::new(saved))),
        }
    }

    pub fn table_name(&mut self, table: &TableRef) -> String {
        let aliasing = self.naming.contains(NamingOptions::TABLE_ALIASING);
        self.tables.name_for(table, aliasing)
    }

    pub fn parameter_name(&mut self, parameter: &Parameter) -> String {
        self.parameters.name_for(parameter)
    }

    pub fn depth(&self) -> usize {
        self.path.len()
    }

    /// The finished output tree and the names given to parameters.
    pub fn finish(self) -> (Node, HashMap<NodeId, String>) {
        (self.output.finish(), self.parameters.into_names())
    }
}

enum Restore {
    Node(NodeId),
    Naming(NamingOptions),
    Tables(Box<TableNameProvider>),
}

/// Undoes one context change when dropped, on every exit path.
pub(crate) struct Scope<'a> {
    ctx: &'a mut CompilerContext,
    restore: Option<Restore>,
}

impl Deref for Scope<'_> {
    type Target = CompilerContext;

    fn deref(&self) -> &CompilerContext {
        self.ctx
    }
}

impl DerefMut for Scope<'_> {
    fn deref_mut(&mut self) -> &mut CompilerContext {
        self.ctx
    }
}

impl Drop for Scope<'_> {
    fn drop(&mut self) {
        match self.restore.take() {
            Some(Restore::Node(id)) => {
                self.ctx.path.pop();
                self.ctx.on_path.remove(&id);
            }
            Some(Restore::Naming(naming)) => self.ctx.naming = naming,
            Some(Restore::Tables(tables)) => self.ctx.tables = *tables,
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> CompilerContext {
        CompilerContext::new(&CompilerConfig::default())
    }

    #[test]
    fn test_reentering_open_node_fails() {
        let mut ctx = context();
        let id = NodeId::next();
        let mut outer = ctx.enter(id).unwrap();
        assert!(matches!(outer.enter(id), Err(SqlDomError::CircularReference(found)) if found == id));
    }

    #[test]
    fn test_scope_leaves_path_on_drop() {
        let mut ctx = context();
        let id = NodeId::next();
        {
            let scope = ctx.enter(id).unwrap();
            assert_eq!(scope.depth(), 1);
        }
        assert_eq!(ctx.depth(), 0);
        // A closed node may be visited again
        assert!(ctx.enter(id).is_ok());
    }

    #[test]
    fn test_naming_restored_after_scope() {
        let mut ctx = context();
        {
            let scope = ctx.without_naming(NamingOptions::TABLE_ALIASING);
            assert!(!scope.naming().contains(NamingOptions::TABLE_ALIASING));
            assert!(scope.naming().contains(NamingOptions::TABLE_QUALIFIED_COLUMNS));
        }
        assert_eq!(ctx.naming(), NamingOptions::all());
    }

    #[test]
    fn test_statement_scope_resets_aliases() {
        let mut ctx = context();
        let users = TableRef::named("t").with_alias("x");
        assert_eq!(ctx.table_name(&users), "x");
        {
            let mut scope = ctx.statement_scope();
            let other = TableRef::named("t").with_alias("x");
            assert_eq!(scope.table_name(&other), "x");
        }
        // Outer assignments survive the inner statement
        assert_eq!(ctx.table_name(&users), "x");
        assert_eq!(ctx.table_name(&TableRef::named("t").with_alias("x")), "t");
    }
}
