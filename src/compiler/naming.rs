//! Table alias and parameter name allocation.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::trace;

use crate::ast::{NodeId, Parameter, TableRef, TableSource};

bitflags::bitflags! {
    /// Scoped switches controlling how tables and objects are named.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct NamingOptions: u8 {
        /// Give every table reference a statement-unique alias
        const TABLE_ALIASING = 0x01;
        /// Prefix column references with their table's name or alias
        const TABLE_QUALIFIED_COLUMNS = 0x02;
        /// Prefix schema names with their catalog
        const DATABASE_QUALIFIED_OBJECTS = 0x04;
    }
}

impl Default for NamingOptions {
    fn default() -> Self {
        Self::all()
    }
}

const ALIAS_POOL: &[u8; 26] = b"abcdefghijklmnopqrstuvwxyz";

/// Assigns each table reference of a statement a name no other reference
/// in that statement uses.
#[derive(Debug, Default)]
pub struct TableNameProvider {
    assigned: HashMap<NodeId, String>,
    /// Lowercased names in use
    taken: HashSet<String>,
    next: usize,
}

impl TableNameProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name of a table reference, assigned on first sight.
    pub fn name_for(&mut self, table: &TableRef, aliasing: bool) -> String {
        if let Some(name) = self.assigned.get(&table.id) {
            return name.clone();
        }

        let own = table.source.own_name();
        let name = if !aliasing {
            match own {
                Some(own) => own.to_string(),
                None => self.generate(),
            }
        } else if let Some(alias) = table.alias.as_deref().filter(|a| Some(*a) != own && !self.is_taken(a)) {
            alias.to_string()
        } else if let Some(own) = own.filter(|o| table.source.is_named() && !self.is_taken(o)) {
            own.to_string()
        } else {
            self.generate()
        };

        trace!(table = %table.id, name = %name, "table name assigned");
        self.taken.insert(name.to_ascii_lowercase());
        self.assigned.insert(table.id, name.clone());
        name
    }

    pub fn is_taken(&self, name: &str) -> bool {
        self.taken.contains(&name.to_ascii_lowercase())
    }

    /// `a`..`z`, then `a2`..`z2`, `a3`..
    fn generate(&mut self) -> String {
        loop {
            let index = self.next;
            self.next += 1;
            let letter = ALIAS_POOL[index % ALIAS_POOL.len()] as char;
            let round = index / ALIAS_POOL.len();
            let candidate = if round == 0 {
                letter.to_string()
            } else {
                format!("{letter}{}", round + 1)
            };
            if !self.is_taken(&candidate) {
                return candidate;
            }
        }
    }
}

/// Assigns positional parameters deterministic names in order of first
/// appearance.
#[derive(Debug)]
pub struct ParameterNameProvider {
    prefix: String,
    names: HashMap<NodeId, String>,
    next: usize,
}

impl ParameterNameProvider {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            names: HashMap::new(),
            next: 0,
        }
    }

    /// Name of a parameter. Explicitly named parameters keep their name and
    /// are not recorded.
    pub fn name_for(&mut self, parameter: &Parameter) -> String {
        if let Some(name) = &parameter.name {
            return name.clone();
        }
        if let Some(name) = self.names.get(&parameter.id) {
            return name.clone();
        }
        let name = format!("{}{}", self.prefix, self.next);
        self.next += 1;
        trace!(parameter = %parameter.id, name = %name, "parameter name assigned");
        self.names.insert(parameter.id, name.clone());
        name
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn into_names(self) -> HashMap<NodeId, String> {
        self.names
    }
}

/// Whether a source is a catalog object rather than a derived or named one.
pub(crate) fn is_catalog_object(source: &TableSource) -> bool {
    matches!(source, TableSource::Table(_) | TableSource::View(_))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Table;
    use pretty_assertions::assert_eq;

    fn users() -> TableRef {
        TableRef::table(Table::new("Users").build())
    }

    #[test]
    fn test_aliases_are_generated_in_order() {
        let mut provider = TableNameProvider::new();
        let names: Vec<String> = (0..3).map(|_| provider.name_for(&users(), true)).collect();
        assert_eq!(names, ["a", "b", "c"]);
    }

    #[test]
    fn test_alias_is_memoized_per_reference() {
        let mut provider = TableNameProvider::new();
        let table = users();
        let first = provider.name_for(&table, true);
        assert_eq!(provider.name_for(&table.clone(), true), first);
    }

    #[test]
    fn test_pool_wraps_with_numeric_suffix() {
        let mut provider = TableNameProvider::new();
        let names: Vec<String> = (0..28).map(|_| provider.name_for(&users(), true)).collect();
        assert_eq!(&names[25..], ["z", "a2", "b2"]);
    }

    #[test]
    fn test_explicit_alias_kept_unless_taken() {
        let mut provider = TableNameProvider::new();
        assert_eq!(provider.name_for(&users().with_alias("u"), true), "u");
        // Case-insensitive clash falls back to a generated alias
        assert_eq!(provider.name_for(&users().with_alias("U"), true), "a");
    }

    #[test]
    fn test_generated_aliases_skip_taken_names() {
        let mut provider = TableNameProvider::new();
        provider.name_for(&users().with_alias("a"), true);
        assert_eq!(provider.name_for(&users(), true), "b");
    }

    #[test]
    fn test_named_source_prefers_own_name() {
        let mut provider = TableNameProvider::new();
        assert_eq!(provider.name_for(&TableRef::named("recent"), true), "recent");
        assert_eq!(provider.name_for(&TableRef::named("recent"), true), "a");
    }

    #[test]
    fn test_disabled_aliasing_uses_raw_name() {
        let mut provider = TableNameProvider::new();
        assert_eq!(provider.name_for(&users(), false), "Users");
        assert_eq!(provider.name_for(&users(), false), "Users");
    }

    #[test]
    fn test_parameter_names() {
        let mut provider = ParameterNameProvider::new("p");
        let first = Parameter::new();
        let second = Parameter::new();
        assert_eq!(provider.name_for(&first), "p0");
        assert_eq!(provider.name_for(&second), "p1");
        assert_eq!(provider.name_for(&first.clone()), "p0");
        assert_eq!(provider.name_for(&Parameter::named("id")), "id");
        assert_eq!(provider.len(), 2);
    }
}
