//! The compiled form of a statement.
//!
//! Compilation produces a tree of [`Node`]s: mostly literal text, plus the
//! few constructs whose text depends on render-time input. Rendering walks
//! the tree once with a [`PostCompilerConfig`](render::PostCompilerConfig).

pub mod render;

use serde::{Deserialize, Serialize};
use std::mem;

use crate::ast::Key;
use crate::translator::IdentifierQuoting;

/// A schema (and optionally catalog) name resolved through the render
/// config's mappings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SchemaPlaceholder {
    #[serde(default)]
    pub catalog: Option<String>,
    pub schema: String,
    pub quoting: IdentifierQuoting,
}

/// What a placeholder node is filled with.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlaceholderId {
    /// Caller-supplied text
    Named(Key),
    /// Discriminator of a mapped type
    TypeId(String),
    Schema(SchemaPlaceholder),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    Text(String),
    Container(Container),
    Placeholder(PlaceholderId),
    /// Renders `alternative` when its key is selected, `main` otherwise
    Variant {
        key: Key,
        main: Container,
        alternative: Container,
    },
    /// Renders `body` once per value row, or `empty` when there are none
    Cycle {
        key: Key,
        body: Container,
        empty: Container,
        delimiter: String,
    },
    /// Value at this position of the current cycle row
    CycleItem(usize),
}

impl Node {
    /// Whether rendering needs no input.
    pub fn is_text(&self) -> bool {
        matches!(self, Node::Text(_))
    }

    /// Length of the literal text in the tree, as a buffer size hint.
    pub fn text_len(&self) -> usize {
        match self {
            Node::Text(t) => t.len(),
            Node::Container(c) => c.text_len(),
            Node::Variant { main, .. } => main.text_len(),
            Node::Cycle { body, .. } => body.text_len(),
            Node::Placeholder(_) | Node::CycleItem(_) => 8,
        }
    }
}

/// An ordered run of nodes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Container {
    pub children: Vec<Node>,
    #[serde(default)]
    pub indent: usize,
    #[serde(skip)]
    start_of_collection: bool,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_indent(indent: usize) -> Self {
        Self {
            indent,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn text_len(&self) -> usize {
        self.children.iter().map(Node::text_len).sum()
    }

    /// Flatten nested containers and merge adjacent text.
    pub fn normalize(self) -> Container {
        let mut children = Vec::with_capacity(self.children.len());
        for child in self.children {
            push_normalized(&mut children, child);
        }
        Container {
            children,
            indent: self.indent,
            start_of_collection: false,
        }
    }
}

fn push_normalized(out: &mut Vec<Node>, node: Node) {
    match node {
        Node::Container(c) => {
            for child in c.children {
                push_normalized(out, child);
            }
        }
        Node::Text(text) if text.is_empty() => {}
        Node::Text(text) => match out.last_mut() {
            Some(Node::Text(prev)) => prev.push_str(&text),
            _ => out.push(Node::Text(text)),
        },
        Node::Variant {
            key,
            main,
            alternative,
        } => out.push(Node::Variant {
            key,
            main: main.normalize(),
            alternative: alternative.normalize(),
        }),
        Node::Cycle {
            key,
            body,
            empty,
            delimiter,
        } => out.push(Node::Cycle {
            key,
            body: body.normalize(),
            empty: empty.normalize(),
            delimiter,
        }),
        other => out.push(other),
    }
}

/// What the output ends with, for spacing decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tail {
    Empty,
    Char(char),
    Node,
    /// The next token follows without a separator
    Attached,
}

struct Frame {
    container: Container,
    /// Captured frames are returned to the caller instead of attached
    detached: bool,
    saved_tail: Tail,
}

/// Builds an output tree while the compiler walks the DOM.
pub struct OutputBuilder {
    root: Container,
    frames: Vec<Frame>,
    text: String,
    tail: Tail,
}

impl Default for OutputBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputBuilder {
    pub fn new() -> Self {
        Self {
            root: Container::new(),
            frames: Vec::new(),
            text: String::new(),
            tail: Tail::Empty,
        }
    }

    fn current(&mut self) -> &mut Container {
        match self.frames.last_mut() {
            Some(frame) => &mut frame.container,
            None => &mut self.root,
        }
    }

    fn flush(&mut self) {
        if !self.text.is_empty() {
            let text = mem::take(&mut self.text);
            self.current().children.push(Node::Text(text));
        }
    }

    fn needs_space(&self, next: Option<char>) -> bool {
        let after = match self.tail {
            Tail::Empty | Tail::Attached => return false,
            Tail::Char(c) => !(c.is_whitespace() || c == '(' || c == '.'),
            Tail::Node => true,
        };
        after && !matches!(next, Some(c) if c.is_whitespace() || c == ')' || c == ',')
    }

    /// Append text exactly as given.
    pub fn append(&mut self, text: &str) {
        if let Some(last) = text.chars().last() {
            self.text.push_str(text);
            self.tail = Tail::Char(last);
        }
    }

    /// Append a token, separated from the previous one by a space where
    /// SQL needs one.
    pub fn append_spaced(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if self.needs_space(text.chars().next()) {
            self.append(" ");
        }
        self.append(text);
    }

    /// Make the next token follow the current output directly.
    pub fn attach(&mut self) {
        if self.tail != Tail::Empty {
            self.tail = Tail::Attached;
        }
    }

    /// Append a non-text node as a token.
    pub fn append_node(&mut self, node: Node) {
        if self.needs_space(None) {
            self.append(" ");
        }
        self.flush();
        self.current().children.push(node);
        self.tail = Tail::Node;
    }

    /// Start a line at the current indentation.
    pub fn new_line(&mut self) {
        let indent = self.current_indent();
        self.append("\n");
        if indent > 0 {
            self.append(&"  ".repeat(indent));
        }
    }

    fn current_indent(&self) -> usize {
        match self.frames.last() {
            Some(frame) => frame.container.indent,
            None => self.root.indent,
        }
    }

    pub fn indent(&mut self) {
        self.current().indent += 1;
    }

    pub fn unindent(&mut self) {
        let container = self.current();
        container.indent = container.indent.saturating_sub(1);
    }

    /// Open a nested container for a delimited collection.
    pub fn open_collection(&mut self) {
        self.flush();
        let mut container = Container::with_indent(self.current_indent());
        container.start_of_collection = true;
        let saved_tail = self.tail;
        self.frames.push(Frame {
            container,
            detached: false,
            saved_tail,
        });
    }

    /// Write `delimiter` unless this is the first item of the collection.
    pub fn delimit(&mut self, delimiter: &str) {
        let container = self.current();
        if container.start_of_collection {
            container.start_of_collection = false;
        } else {
            self.append(delimiter);
        }
    }

    /// Close the innermost collection and attach it to its parent.
    pub fn close_collection(&mut self) {
        self.flush();
        if let Some(frame) = self.frames.pop() {
            if frame.detached {
                // Mismatched close; keep the frame for end_capture
                self.frames.push(frame);
                return;
            }
            let node = Node::Container(frame.container);
            self.current().children.push(node);
        }
    }

    /// Redirect output into a detached container, for variant branches and
    /// cycle templates.
    pub fn begin_capture(&mut self) {
        self.flush();
        let container = Container::with_indent(self.current_indent());
        self.frames.push(Frame {
            container,
            detached: true,
            saved_tail: self.tail,
        });
        self.tail = Tail::Empty;
    }

    /// Finish the innermost capture and return what it collected.
    pub fn end_capture(&mut self) -> Container {
        self.flush();
        loop {
            match self.frames.pop() {
                Some(frame) if frame.detached => {
                    self.tail = frame.saved_tail;
                    return frame.container;
                }
                Some(frame) => {
                    // Collection left open by an error inside the capture
                    self.tail = frame.saved_tail;
                }
                None => return Container::new(),
            }
        }
    }

    /// Whether nothing has been written yet.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.root.is_empty() && self.frames.is_empty()
    }

    /// Close everything and return the normalized tree. A tree of pure
    /// text comes back as a single [`Node::Text`].
    pub fn finish(mut self) -> Node {
        self.flush();
        while let Some(frame) = self.frames.pop() {
            let node = Node::Container(frame.container);
            self.current().children.push(node);
        }
        let mut root = self.root.normalize();
        match root.children.len() {
            0 => Node::Text(String::new()),
            1 if root.children[0].is_text() => root.children.remove(0),
            _ => Node::Container(root),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_spacing_rules() {
        let mut out = OutputBuilder::new();
        out.append_spaced("SELECT");
        out.append_spaced("COUNT(");
        out.append_spaced("*");
        out.append_spaced(")");
        out.append_spaced("FROM");
        out.append_spaced("\"t\"");
        out.append(".");
        out.append_spaced("\"c\"");
        assert_eq!(out.finish(), Node::Text("SELECT COUNT(*) FROM \"t\".\"c\"".into()));
    }

    #[test]
    fn test_attach_suppresses_one_separator() {
        let mut out = OutputBuilder::new();
        out.append_spaced("NEXTVAL('");
        out.attach();
        out.append_spaced("\"s\"");
        out.append("')");
        out.append_spaced("AS");
        assert_eq!(out.finish(), Node::Text("NEXTVAL('\"s\"') AS".into()));
    }

    #[test]
    fn test_collection_delimiters() {
        let mut out = OutputBuilder::new();
        out.append_spaced("(");
        out.open_collection();
        for item in ["a", "b", "c"] {
            out.delimit(", ");
            out.append_spaced(item);
        }
        out.close_collection();
        out.append_spaced(")");
        assert_eq!(out.finish(), Node::Text("(a, b, c)".into()));
    }

    #[test]
    fn test_capture_builds_detached_branches() {
        let mut out = OutputBuilder::new();
        out.append_spaced("WHERE");
        out.begin_capture();
        out.append_spaced("x = 1");
        let main = out.end_capture();
        out.begin_capture();
        out.append_spaced("y = 2");
        let alternative = out.end_capture();
        out.append_node(Node::Variant {
            key: Key::new("v"),
            main,
            alternative,
        });
        out.append_spaced("ORDER BY");

        let Node::Container(root) = out.finish() else {
            panic!("expected a container");
        };
        assert_eq!(root.children.len(), 3);
        assert_eq!(root.children[0], Node::Text("WHERE ".into()));
        assert_eq!(root.children[2], Node::Text(" ORDER BY".into()));
    }

    #[test]
    fn test_normalize_merges_nested_text() {
        let container = Container {
            children: vec![
                Node::Text("a".into()),
                Node::Container(Container {
                    children: vec![Node::Text("b".into()), Node::Text(String::new())],
                    ..Container::default()
                }),
                Node::Text("c".into()),
            ],
            ..Container::default()
        };
        assert_eq!(container.normalize().children, vec![Node::Text("abc".into())]);
    }
}
