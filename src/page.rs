//! Page trees, the host view stack, and the `Host` seam.
//!
//! A [`PageTree`] is what a [`Builder`](crate::builder::Builder) produces: a
//! `View` root with its descendants, tagged with the route it was built for.
//! The host keeps built trees on a [`ViewStack`]; the top entry is what the
//! user sees.

use std::fmt;

use crate::dom::{Dom, NodeId};
use crate::widget::{SlotKind, Widget};
use crate::widgets::View;

// ---------------------------------------------------------------------------
// Host
// ---------------------------------------------------------------------------

/// The host toolkit's page object, as seen by the dispatcher.
///
/// One value per connected client. Rendering and transport are the host's
/// business; the dispatcher only manipulates the view stack and asks the host
/// to show a route.
pub trait Host: Send {
    /// The route the client currently asks for.
    fn route(&self) -> &str;

    fn views(&self) -> &ViewStack;

    fn views_mut(&mut self) -> &mut ViewStack;

    /// Commit navigation to `route`: update the current route and render the
    /// top of the view stack.
    fn go(&mut self, route: &str);

    /// Client address for request logs, if the host knows it.
    fn client_addr(&self) -> Option<&str> {
        None
    }
}

// ---------------------------------------------------------------------------
// PageTree
// ---------------------------------------------------------------------------

/// A finished widget tree rooted at a `View`.
pub struct PageTree {
    dom: Dom,
    root: NodeId,
    route: Option<String>,
}

impl PageTree {
    pub(crate) fn new(dom: Dom, root: NodeId) -> Self {
        Self {
            dom,
            root,
            route: None,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The route this tree was built for. Set by the dispatcher.
    pub fn route(&self) -> Option<&str> {
        self.route.as_deref()
    }

    pub fn set_route(&mut self, route: impl Into<String>) {
        self.route = Some(route.into());
    }

    /// The root `View` widget.
    pub fn view(&self) -> Option<&View> {
        self.dom.downcast::<View>(self.root)
    }

    pub fn dom(&self) -> &Dom {
        &self.dom
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.dom.children(id)
    }

    /// Slot kind of a node; `SlotKind::None` for unknown ids.
    pub fn slot(&self, id: NodeId) -> SlotKind {
        self.dom.get(id).map_or(SlotKind::None, |node| node.slot)
    }

    pub fn widget(&self, id: NodeId) -> Option<&dyn Widget> {
        self.dom.get(id).map(|node| node.widget.as_ref())
    }

    pub fn downcast<W: Widget>(&self, id: NodeId) -> Option<&W> {
        self.dom.downcast::<W>(id)
    }

    /// First widget of type `W` in document order.
    pub fn find<W: Widget>(&self) -> Option<(NodeId, &W)> {
        self.dom.find::<W>()
    }

    pub fn query_by_type(&self, widget_type: &str) -> Vec<NodeId> {
        self.dom.query_by_type(widget_type)
    }

    pub fn walk_depth_first(&self) -> Vec<NodeId> {
        self.dom.walk_depth_first(self.root)
    }

    pub fn walk_breadth_first(&self) -> Vec<NodeId> {
        self.dom.walk_breadth_first(self.root)
    }

    /// Number of widgets in the tree, root included.
    pub fn len(&self) -> usize {
        self.dom.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dom.is_empty()
    }

    /// Indented text outline, one widget per line.
    pub fn outline(&self) -> String {
        self.to_string()
    }

    fn write_node(&self, f: &mut fmt::Formatter<'_>, id: NodeId, depth: usize) -> fmt::Result {
        let Some(node) = self.dom.get(id) else {
            return Ok(());
        };
        write!(f, "{:indent$}{}", "", node.widget_type(), indent = depth * 2)?;
        if id == self.root {
            if let Some(route) = &self.route {
                write!(f, " route={route:?}")?;
            }
        }
        for (key, value) in node.widget.props().iter() {
            write!(f, " {key}={value}")?;
        }
        writeln!(f)?;
        for &child in self.dom.children(id) {
            self.write_node(f, child, depth + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for PageTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_node(f, self.root, 0)
    }
}

impl fmt::Debug for PageTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageTree")
            .field("route", &self.route)
            .field("len", &self.dom.len())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// ViewStack
// ---------------------------------------------------------------------------

/// Ordered stack of page trees; the last entry is on top.
#[derive(Debug, Default)]
pub struct ViewStack {
    views: Vec<PageTree>,
}

impl ViewStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, tree: PageTree) {
        self.views.push(tree);
    }

    pub fn pop(&mut self) -> Option<PageTree> {
        self.views.pop()
    }

    pub fn clear(&mut self) {
        self.views.clear();
    }

    pub fn top(&self) -> Option<&PageTree> {
        self.views.last()
    }

    pub fn top_mut(&mut self) -> Option<&mut PageTree> {
        self.views.last_mut()
    }

    pub fn get(&self, index: usize) -> Option<&PageTree> {
        self.views.get(index)
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PageTree> {
        self.views.iter()
    }

    /// Routes of the stacked trees, bottom to top.
    pub fn routes(&self) -> Vec<&str> {
        self.views.iter().filter_map(PageTree::route).collect()
    }
}
