//! Tree operations: insert, attach into slots, remove, walk.

use std::collections::VecDeque;

use slotmap::{SecondaryMap, SlotMap};

use super::node::{Node, NodeId};

const EMPTY_CHILDREN: &[NodeId] = &[];

/// Outcome of attaching a node into its parent's slot.
#[derive(Debug)]
pub enum Attached {
    /// Appended to a list slot, or placed into an empty single slot.
    Added(NodeId),
    /// Placed into a single slot; the previous occupant and its subtree were
    /// removed. Holds the new id and the displaced node.
    Replaced(NodeId, Node),
}

impl Attached {
    pub fn id(&self) -> NodeId {
        match self {
            Attached::Added(id) | Attached::Replaced(id, _) => *id,
        }
    }
}

/// A widget tree backed by a slotmap arena.
///
/// Parent/child relationships live in secondary maps, so removal is
/// O(subtree size) and lookup is O(1). Children are kept in slot order.
pub struct Dom {
    pub(crate) nodes: SlotMap<NodeId, Node>,
    children: SecondaryMap<NodeId, Vec<NodeId>>,
    parent: SecondaryMap<NodeId, NodeId>,
    root: Option<NodeId>,
}

impl Dom {
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            children: SecondaryMap::new(),
            parent: SecondaryMap::new(),
            root: None,
        }
    }

    /// Insert a parentless node. The first one inserted becomes the root.
    pub fn insert(&mut self, node: Node) -> NodeId {
        let id = self.nodes.insert(node);
        self.children.insert(id, Vec::new());
        if self.root.is_none() {
            self.root = Some(id);
        }
        id
    }

    /// Attach `node` into the slot of `parent`.
    ///
    /// List slots append. Single slots keep one child: an existing occupant is
    /// removed with its subtree. Returns `None` when `parent` does not exist
    /// or is a leaf; `node` is dropped in that case.
    pub fn attach(&mut self, parent: NodeId, node: Node) -> Option<Attached> {
        let slot = self.nodes.get(parent)?.slot;
        if !slot.is_container() {
            return None;
        }

        let displaced = if slot.is_list() {
            None
        } else {
            let previous = self.children(parent).first().copied();
            previous.and_then(|old| self.remove(old))
        };

        let id = self.nodes.insert(node);
        self.children.insert(id, Vec::new());
        self.parent.insert(id, parent);
        self.children.get_mut(parent)?.push(id);

        Some(match displaced {
            Some(old) => {
                tracing::debug!(
                    parent = self.nodes[parent].widget_type(),
                    slot = %slot,
                    replaced = old.widget_type(),
                    "single slot occupant replaced"
                );
                Attached::Replaced(id, old)
            }
            None => Attached::Added(id),
        })
    }

    /// Remove a node and all its descendants.
    ///
    /// Returns the removed node, or `None` if it didn't exist.
    pub fn remove(&mut self, id: NodeId) -> Option<Node> {
        if !self.nodes.contains_key(id) {
            return None;
        }

        if let Some(parent_id) = self.parent.remove(id) {
            if let Some(siblings) = self.children.get_mut(parent_id) {
                siblings.retain(|&child| child != id);
            }
        }
        if self.root == Some(id) {
            self.root = None;
        }

        let mut queue = VecDeque::from([id]);
        let mut removed = None;
        while let Some(current) = queue.pop_front() {
            if let Some(kids) = self.children.remove(current) {
                queue.extend(kids);
            }
            self.parent.remove(current);
            let node = self.nodes.remove(current);
            if current == id {
                removed = node;
            }
        }
        removed
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parent.get(id).copied()
    }

    /// Children of a node in slot order. Empty for leaves and unknown ids.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.children
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(EMPTY_CHILDREN)
    }

    /// Ancestors from the immediate parent up to the root, excluding `id`.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut current = id;
        while let Some(p) = self.parent.get(current).copied() {
            result.push(p);
            current = p;
        }
        result
    }

    /// Number of edges between `id` and the root.
    pub fn depth(&self, id: NodeId) -> usize {
        self.ancestors(id).len()
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Pre-order depth-first traversal starting from `start`.
    pub fn walk_depth_first(&self, start: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            if !self.nodes.contains_key(current) {
                continue;
            }
            result.push(current);
            stack.extend(self.children(current).iter().rev());
        }
        result
    }

    /// Breadth-first traversal starting from `start`.
    pub fn walk_breadth_first(&self, start: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut queue = VecDeque::from([start]);
        while let Some(current) = queue.pop_front() {
            if !self.nodes.contains_key(current) {
                continue;
            }
            result.push(current);
            queue.extend(self.children(current));
        }
        result
    }
}

impl Default for Dom {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Dom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dom")
            .field("root", &self.root)
            .field("len", &self.nodes.len())
            .finish()
    }
}
