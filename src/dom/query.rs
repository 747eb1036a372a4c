//! Tree queries: by widget type, by concrete Rust type, by predicate.
//!
//! All queries walk depth-first from the root, so results come back in
//! document order.

use super::node::{Node, NodeId};
use super::tree::Dom;
use crate::widget::Widget;

impl Dom {
    /// All nodes whose widget type name matches.
    pub fn query_by_type(&self, widget_type: &str) -> Vec<NodeId> {
        self.query_all(|node| node.widget_type() == widget_type)
    }

    /// All nodes matching an arbitrary predicate.
    pub fn query_all(&self, predicate: impl Fn(&Node) -> bool) -> Vec<NodeId> {
        self.iter_tree()
            .filter(|(_, node)| predicate(node))
            .map(|(id, _)| id)
            .collect()
    }

    /// First widget of concrete type `W`, in document order.
    pub fn find<W: Widget>(&self) -> Option<(NodeId, &W)> {
        self.iter_tree()
            .find_map(|(id, node)| node.downcast::<W>().map(|w| (id, w)))
    }

    /// Every widget of concrete type `W`, in document order.
    pub fn find_all<W: Widget>(&self) -> Vec<(NodeId, &W)> {
        self.iter_tree()
            .filter_map(|(id, node)| node.downcast::<W>().map(|w| (id, w)))
            .collect()
    }

    /// Downcast the widget at `id`.
    pub fn downcast<W: Widget>(&self, id: NodeId) -> Option<&W> {
        self.get(id)?.downcast::<W>()
    }

    fn iter_tree(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        let order = self.root().map(|root| self.walk_depth_first(root));
        order
            .into_iter()
            .flatten()
            .filter_map(move |id| self.nodes.get(id).map(|node| (id, node)))
    }
}
