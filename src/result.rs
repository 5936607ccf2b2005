//! The product of a compile.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::debug;

use crate::ast::{NodeId, Parameter};
use crate::error::{SqlDomError, SqlDomResult};
use crate::output::Node;
use crate::output::render::{PostCompiler, PostCompilerConfig};

#[derive(Debug)]
enum Output {
    /// Nothing depends on render-time input
    Text(String),
    Tree(Node),
}

/// A compiled statement: its output tree and the names given to its
/// positional parameters. Immutable; render it any number of times.
#[derive(Debug)]
pub struct CompilationResult {
    output: Output,
    parameters: HashMap<NodeId, String>,
    /// Length of the last rendering, used to size the next buffer
    last_length: AtomicUsize,
}

impl CompilationResult {
    pub fn new(output: Node, parameters: HashMap<NodeId, String>) -> Self {
        let output = match output {
            Node::Text(text) => Output::Text(text),
            tree => Output::Tree(tree),
        };
        Self {
            output,
            parameters,
            last_length: AtomicUsize::new(0),
        }
    }

    /// Whether the command text is fixed at compile time.
    pub fn is_static(&self) -> bool {
        matches!(self.output, Output::Text(_))
    }

    /// The output tree.
    pub fn output(&self) -> Cow<'_, Node> {
        match &self.output {
            Output::Text(text) => Cow::Owned(Node::Text(text.clone())),
            Output::Tree(tree) => Cow::Borrowed(tree),
        }
    }

    /// Final SQL text. Static results ignore the configuration; others
    /// render against it, or against an empty one when none is given.
    pub fn command_text(&self, config: Option<&PostCompilerConfig>) -> SqlDomResult<Cow<'_, str>> {
        let tree = match &self.output {
            Output::Text(text) => return Ok(Cow::Borrowed(text)),
            Output::Tree(tree) => tree,
        };
        let default = PostCompilerConfig::default();
        let config = config.unwrap_or(&default);
        let capacity = match self.last_length.load(Ordering::Relaxed) {
            0 => tree.text_len(),
            n => n,
        };
        let text = PostCompiler::with_capacity(config, capacity).render(tree)?;
        debug!(length = text.len(), "rendered command text");
        self.last_length.store(text.len(), Ordering::Relaxed);
        Ok(Cow::Owned(text))
    }

    /// Name generated for a positional parameter.
    pub fn parameter_name(&self, parameter: &Parameter) -> SqlDomResult<&str> {
        if parameter.name.is_some() {
            return Err(SqlDomError::ParameterNotFound(parameter.id));
        }
        self.parameters
            .get(&parameter.id)
            .map(String::as_str)
            .ok_or(SqlDomError::ParameterNotFound(parameter.id))
    }

    pub fn parameter_names(&self) -> &HashMap<NodeId, String> {
        &self.parameters
    }

    /// A serializable snapshot of this result.
    pub fn to_plan(&self) -> CompiledPlan {
        let mut parameters: Vec<ParameterBinding> = self
            .parameters
            .iter()
            .map(|(id, name)| ParameterBinding {
                id: *id,
                name: name.clone(),
            })
            .collect();
        parameters.sort_by_key(|p| p.id);
        CompiledPlan {
            output: self.output().into_owned(),
            parameters,
        }
    }

    pub fn from_plan(plan: CompiledPlan) -> Self {
        let parameters = plan.parameters.into_iter().map(|p| (p.id, p.name)).collect();
        Self::new(plan.output, parameters)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterBinding {
    pub id: NodeId,
    pub name: String,
}

/// Compiled output in a form that can be stored and reloaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompiledPlan {
    pub output: Node,
    pub parameters: Vec<ParameterBinding>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Key;
    use crate::output::Container;
    use pretty_assertions::assert_eq;

    fn container(children: Vec<Node>) -> Container {
        let mut container = Container::new();
        container.children = children;
        container
    }

    fn variant_tree() -> Node {
        Node::Container(container(vec![
            Node::Text("SELECT ".into()),
            Node::Variant {
                key: Key::new("v"),
                main: container(vec![Node::Text("1".into())]),
                alternative: container(vec![Node::Text("2".into())]),
            },
        ]))
    }

    #[test]
    fn test_static_text_is_borrowed() {
        let result = CompilationResult::new(Node::Text("SELECT 1".into()), HashMap::new());
        assert!(result.is_static());
        let config = PostCompilerConfig::new().with_alternative("ignored");
        assert!(matches!(result.command_text(Some(&config)).unwrap(), Cow::Borrowed("SELECT 1")));
    }

    #[test]
    fn test_tree_renders_per_config() {
        let result = CompilationResult::new(variant_tree(), HashMap::new());
        assert!(!result.is_static());
        assert_eq!(result.command_text(None).unwrap(), "SELECT 1");
        let alt = PostCompilerConfig::new().with_alternative("v");
        assert_eq!(result.command_text(Some(&alt)).unwrap(), "SELECT 2");
    }

    #[test]
    fn test_parameter_lookup() {
        let positional = Parameter::new();
        let unknown = Parameter::new();
        let named = Parameter::named("id");
        let names = HashMap::from([(positional.id, "p0".to_string())]);
        let result = CompilationResult::new(Node::Text(String::new()), names);

        assert_eq!(result.parameter_name(&positional).unwrap(), "p0");
        assert!(matches!(result.parameter_name(&unknown), Err(SqlDomError::ParameterNotFound(_))));
        assert!(matches!(result.parameter_name(&named), Err(SqlDomError::ParameterNotFound(_))));
    }

    #[test]
    fn test_plan_survives_json() {
        let p = Parameter::new();
        let result = CompilationResult::new(variant_tree(), HashMap::from([(p.id, "p0".to_string())]));
        let json = serde_json::to_string(&result.to_plan()).unwrap();
        let restored = CompilationResult::from_plan(serde_json::from_str(&json).unwrap());
        assert_eq!(restored.command_text(None).unwrap(), "SELECT 1");
        assert_eq!(restored.parameter_name(&p).unwrap(), "p0");
    }
}
