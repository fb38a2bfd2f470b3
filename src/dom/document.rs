//! In-memory document tree used as the default [`RenderTarget`].

use super::selector::{Compound, Selector};
use super::RenderTarget;

const VOID_ELEMENTS: [&str; 13] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Handle to a node in a [`Document`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
enum NodeKind {
    Document,
    Fragment,
    Element {
        tag: String,
        attributes: Vec<(String, String)>,
    },
    Text(String),
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Arena-backed document.
///
/// Nodes are never reclaimed. `set_text`, `clear_children` and
/// `instantiate_template` leave detached nodes behind, so every render adds
/// to the arena until the document is dropped. [`NodeId`]s stay valid for
/// the document's whole life. Build a fresh document for long-running use.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                kind: NodeKind::Document,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    /// Nodes held by the arena, detached ones included
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        self.nodes.push(Node {
            kind,
            parent: None,
            children: Vec::new(),
        });
        NodeId(self.nodes.len() - 1)
    }

    fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(NodeKind::Element {
            tag: tag.to_ascii_lowercase(),
            attributes: Vec::new(),
        })
    }

    fn create_text(&mut self, text: &str) -> NodeId {
        self.push(NodeKind::Text(text.to_string()))
    }

    /// Creates an element with the given attributes under `parent`
    pub fn append_element(
        &mut self,
        parent: NodeId,
        tag: &str,
        attributes: &[(&str, &str)],
    ) -> NodeId {
        let element = self.create_element(tag);
        for (name, value) in attributes {
            self.set_attribute(element, name, value);
        }
        self.append_child(parent, element);
        element
    }

    pub fn append_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        let node = self.create_text(text);
        self.append_child(parent, node);
        node
    }

    fn tag(&self, node: NodeId) -> Option<&str> {
        match &self.node(node).kind {
            NodeKind::Element { tag, .. } => Some(tag),
            _ => None,
        }
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        match &self.node(node).kind {
            NodeKind::Element { attributes, .. } => attributes
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, v)| v.as_str()),
            _ => None,
        }
    }

    #[cfg(test)]
    pub(crate) fn children(&self, node: NodeId) -> &[NodeId] {
        &self.node(node).children
    }

    #[cfg(test)]
    pub(crate) fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).parent
    }

    /// Concatenated text of the node and its descendants
    pub fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(node, &mut out);
        out
    }

    fn collect_text(&self, node: NodeId, out: &mut String) {
        if let NodeKind::Text(text) = &self.node(node).kind {
            out.push_str(text);
        }
        for &child in &self.node(node).children {
            self.collect_text(child, out);
        }
    }

    /// Detaches a node from its parent
    pub fn remove(&mut self, node: NodeId) {
        if let Some(parent) = self.node_mut(node).parent.take() {
            self.node_mut(parent).children.retain(|&c| c != node);
        }
    }

    fn is_template(&self, node: NodeId) -> bool {
        self.tag(node) == Some("template")
    }

    fn is_inclusive_ancestor(&self, ancestor: NodeId, mut node: NodeId) -> bool {
        loop {
            if node == ancestor {
                return true;
            }
            match self.node(node).parent {
                Some(parent) => node = parent,
                None => return false,
            }
        }
    }

    /// Descendants of `scope` in document order, not entering templates
    fn descendants(&self, scope: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        if self.is_template(scope) {
            return out;
        }
        let mut stack: Vec<NodeId> = self.node(scope).children.iter().rev().copied().collect();

        while let Some(node) = stack.pop() {
            out.push(node);
            if !self.is_template(node) {
                stack.extend(self.node(node).children.iter().rev().copied());
            }
        }
        out
    }

    fn matches_compound(&self, node: NodeId, compound: &Compound) -> bool {
        let NodeKind::Element { tag, .. } = &self.node(node).kind else {
            return false;
        };

        if compound.tag.as_ref().is_some_and(|t| t != tag) {
            return false;
        }
        if let Some(id) = &compound.id {
            if self.attribute(node, "id") != Some(id.as_str()) {
                return false;
            }
        }
        if !compound.classes.is_empty() {
            let classes: Vec<&str> = self
                .attribute(node, "class")
                .map(|c| c.split_whitespace().collect())
                .unwrap_or_default();
            if !compound.classes.iter().all(|c| classes.contains(&c.as_str())) {
                return false;
            }
        }
        compound.attributes.iter().all(|attr| {
            match (self.attribute(node, &attr.name), &attr.value) {
                (Some(actual), Some(expected)) => actual == expected,
                (Some(_), None) => true,
                (None, _) => false,
            }
        })
    }

    fn matches(&self, node: NodeId, selector: &Selector) -> bool {
        let Some((last, ancestors)) = selector.compounds().split_last() else {
            return false;
        };
        if !self.matches_compound(node, last) {
            return false;
        }

        let mut current = self.node(node).parent;
        for compound in ancestors.iter().rev() {
            loop {
                let Some(candidate) = current else {
                    return false;
                };
                current = self.node(candidate).parent;
                if self.matches_compound(candidate, compound) {
                    break;
                }
            }
        }
        true
    }

    fn clone_subtree(&mut self, source: NodeId, parent: NodeId) {
        let kind = self.node(source).kind.clone();
        let copy = self.push(kind);
        self.node_mut(copy).parent = Some(parent);
        self.node_mut(parent).children.push(copy);

        let children = self.node(source).children.clone();
        for child in children {
            self.clone_subtree(child, copy);
        }
    }

    /// Serializes the whole document as HTML
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(NodeId(0), &mut out);
        out
    }

    fn write_html(&self, node: NodeId, out: &mut String) {
        let node_ref = self.node(node);
        match &node_ref.kind {
            NodeKind::Document | NodeKind::Fragment => {
                for &child in &node_ref.children {
                    self.write_html(child, out);
                }
            }
            NodeKind::Text(text) => out.push_str(&escape(text, false)),
            NodeKind::Element { tag, attributes } => {
                out.push('<');
                out.push_str(tag);
                for (name, value) in attributes {
                    out.push_str(&format!(" {name}=\"{}\"", escape(value, true)));
                }
                out.push('>');
                if VOID_ELEMENTS.contains(&tag.as_str()) {
                    return;
                }
                for &child in &node_ref.children {
                    self.write_html(child, out);
                }
                out.push_str(&format!("</{tag}>"));
            }
        }
    }
}

fn escape(s: &str, attribute: bool) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
    out
}

impl RenderTarget for Document {
    fn root(&self) -> NodeId {
        NodeId(0)
    }

    fn query(&self, scope: NodeId, selector: &Selector) -> Option<NodeId> {
        self.descendants(scope)
            .into_iter()
            .find(|&node| self.matches(node, selector))
    }

    fn query_all(&self, scope: NodeId, selector: &Selector) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|&node| self.matches(node, selector))
            .collect()
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        self.clear_children(node);
        let text = self.create_text(text);
        self.node_mut(text).parent = Some(node);
        self.node_mut(node).children.push(text);
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let NodeKind::Element { attributes, .. } = &mut self.node_mut(node).kind {
            match attributes.iter_mut().find(|(n, _)| n == name) {
                Some((_, v)) => *v = value.to_string(),
                None => attributes.push((name.to_string(), value.to_string())),
            }
        }
    }

    fn clear_children(&mut self, node: NodeId) {
        let children = std::mem::take(&mut self.node_mut(node).children);
        for child in children {
            self.node_mut(child).parent = None;
        }
    }

    fn instantiate_template(&mut self, template: NodeId) -> NodeId {
        let fragment = self.push(NodeKind::Fragment);
        let content = self.node(template).children.clone();
        for child in content {
            self.clone_subtree(child, fragment);
        }
        fragment
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if self.is_inclusive_ancestor(child, parent) {
            return;
        }

        if matches!(self.node(child).kind, NodeKind::Fragment) {
            let moved = std::mem::take(&mut self.node_mut(child).children);
            for &node in &moved {
                self.node_mut(node).parent = Some(parent);
            }
            self.node_mut(parent).children.extend(moved);
            return;
        }

        self.remove(child);
        self.node_mut(child).parent = Some(parent);
        self.node_mut(parent).children.push(child);
    }
}
