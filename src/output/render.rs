//! Post-compilation: turn an output tree into final SQL text.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use super::{Container, Node, PlaceholderId, SchemaPlaceholder};
use crate::ast::Key;
use crate::error::{SqlDomError, SqlDomResult};

/// Render-time input for an output tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostCompilerConfig {
    /// Variant keys whose alternative branch is rendered
    pub alternative_branches: HashSet<Key>,
    pub placeholder_values: HashMap<Key, String>,
    /// Value rows of each dynamic filter, already rendered as SQL text
    pub dynamic_filter_values: HashMap<Key, Vec<Vec<String>>>,
    /// Type discriminators, consulted before `placeholder_values`
    pub type_ids: HashMap<String, i64>,
    pub schema_mapping: HashMap<String, String>,
    pub database_mapping: HashMap<String, String>,
}

impl PostCompilerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_alternative(mut self, key: impl Into<Key>) -> Self {
        self.alternative_branches.insert(key.into());
        self
    }

    pub fn with_placeholder(mut self, key: impl Into<Key>, value: impl Into<String>) -> Self {
        self.placeholder_values.insert(key.into(), value.into());
        self
    }

    /// Values of a single-expression dynamic filter.
    pub fn with_filter_values<I, S>(mut self, key: impl Into<Key>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let rows = values.into_iter().map(|v| vec![v.into()]).collect();
        self.dynamic_filter_values.insert(key.into(), rows);
        self
    }

    /// Value rows of a multi-expression dynamic filter.
    pub fn with_filter_rows(mut self, key: impl Into<Key>, rows: Vec<Vec<String>>) -> Self {
        self.dynamic_filter_values.insert(key.into(), rows);
        self
    }

    pub fn with_type_id(mut self, type_name: impl Into<String>, id: i64) -> Self {
        self.type_ids.insert(type_name.into(), id);
        self
    }

    pub fn with_schema_mapping(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.schema_mapping.insert(from.into(), to.into());
        self
    }

    pub fn with_database_mapping(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.database_mapping.insert(from.into(), to.into());
        self
    }
}

/// The dynamic filter row being expanded.
struct Row<'r> {
    key: &'r Key,
    values: &'r [String],
}

/// Renders an output tree against a [`PostCompilerConfig`].
pub struct PostCompiler<'a> {
    config: &'a PostCompilerConfig,
    buffer: String,
}

impl<'a> PostCompiler<'a> {
    pub fn new(config: &'a PostCompilerConfig) -> Self {
        Self::with_capacity(config, 0)
    }

    pub fn with_capacity(config: &'a PostCompilerConfig, capacity: usize) -> Self {
        Self {
            config,
            buffer: String::with_capacity(capacity),
        }
    }

    pub fn render(mut self, node: &Node) -> SqlDomResult<String> {
        self.visit_node(node, None)?;
        Ok(self.buffer)
    }

    fn visit_container(&mut self, container: &Container, row: Option<&Row<'_>>) -> SqlDomResult<()> {
        for child in &container.children {
            self.visit_node(child, row)?;
        }
        Ok(())
    }

    fn visit_node(&mut self, node: &Node, row: Option<&Row<'_>>) -> SqlDomResult<()> {
        match node {
            Node::Text(text) => self.buffer.push_str(text),
            Node::Container(container) => self.visit_container(container, row)?,
            Node::Placeholder(id) => self.visit_placeholder(id)?,
            Node::Variant {
                key,
                main,
                alternative,
            } => {
                let branch = if self.config.alternative_branches.contains(key) {
                    alternative
                } else {
                    main
                };
                self.visit_container(branch, row)?;
            }
            Node::Cycle {
                key,
                body,
                empty,
                delimiter,
            } => self.visit_cycle(key, body, empty, delimiter)?,
            Node::CycleItem(index) => {
                let row = row.ok_or_else(|| {
                    SqlDomError::UnresolvedPlaceholder(format!("cycle item {index} outside a cycle"))
                })?;
                let value = row.values.get(*index).ok_or_else(|| SqlDomError::FilterRowMismatch {
                    key: row.key.clone(),
                    width: row.values.len(),
                    index: *index,
                })?;
                self.buffer.push_str(value);
            }
        }
        Ok(())
    }

    fn visit_cycle(&mut self, key: &Key, body: &Container, empty: &Container, delimiter: &str) -> SqlDomResult<()> {
        let rows = self
            .config
            .dynamic_filter_values
            .get(key)
            .ok_or_else(|| SqlDomError::MissingFilterValues(key.clone()))?;

        if rows.is_empty() {
            return self.visit_container(empty, None);
        }
        for (i, values) in rows.iter().enumerate() {
            if i > 0 {
                self.buffer.push_str(delimiter);
            }
            let row = Row { key, values };
            self.visit_container(body, Some(&row))?;
        }
        Ok(())
    }

    fn visit_placeholder(&mut self, id: &PlaceholderId) -> SqlDomResult<()> {
        match id {
            PlaceholderId::Named(key) => {
                let value = self
                    .config
                    .placeholder_values
                    .get(key)
                    .ok_or_else(|| SqlDomError::UnresolvedPlaceholder(key.to_string()))?;
                self.buffer.push_str(value);
            }
            PlaceholderId::TypeId(type_name) => {
                if let Some(id) = self.config.type_ids.get(type_name) {
                    self.buffer.push_str(&id.to_string());
                } else {
                    let value = self
                        .config
                        .placeholder_values
                        .get(&Key::new(type_name))
                        .ok_or_else(|| SqlDomError::UnresolvedPlaceholder(type_name.clone()))?;
                    self.buffer.push_str(value);
                }
            }
            PlaceholderId::Schema(schema) => self.visit_schema(schema),
        }
        Ok(())
    }

    fn visit_schema(&mut self, placeholder: &SchemaPlaceholder) {
        if let Some(catalog) = &placeholder.catalog {
            let catalog = self.config.database_mapping.get(catalog).unwrap_or(catalog);
            self.buffer.push_str(&placeholder.quoting.quote(catalog));
            self.buffer.push('.');
        }
        let schema = self
            .config
            .schema_mapping
            .get(&placeholder.schema)
            .unwrap_or(&placeholder.schema);
        self.buffer.push_str(&placeholder.quoting.quote(schema));
    }
}
