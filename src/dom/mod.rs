//! Render target abstraction over a host document.

mod document;
mod selector;

pub use document::{Document, NodeId};
pub use selector::{Selector, SelectorError};

/// Read/write access to the document the views render into.
///
/// Queries follow browser semantics: `query` returns the first match in
/// document order below `scope`, and nothing inside a `<template>` element
/// is reachable except through [`RenderTarget::instantiate_template`].
pub trait RenderTarget {
    /// The document node queries start from
    fn root(&self) -> NodeId;

    fn query(&self, scope: NodeId, selector: &Selector) -> Option<NodeId>;

    fn query_all(&self, scope: NodeId, selector: &Selector) -> Vec<NodeId>;

    /// Replaces the node's children with a single text node
    fn set_text(&mut self, node: NodeId, text: &str);

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str);

    fn clear_children(&mut self, node: NodeId);

    /// Deep-clones a template's content into a detached fragment
    fn instantiate_template(&mut self, template: NodeId) -> NodeId;

    /// Appends `child` to `parent`. A fragment hands over its children and
    /// is left empty.
    fn append_child(&mut self, parent: NodeId, child: NodeId);
}
