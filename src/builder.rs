//! Page builder: construct a widget tree with nested scopes.
//!
//! A [`Builder`] owns one page's arena and an explicit cursor stack. Every
//! constructor attaches the new widget into the slot of the node on top of
//! the cursor. Opening a container pushes it onto the cursor; the returned
//! [`Scope`] guard pops it again when dropped.
//!
//! ```ignore
//! let mut b = registry.builder();
//! {
//!     let mut col = b.open(Column::new())?;
//!     col.add(Text::new("Hello"))?;
//!     col.add(Text::new("World"))?;
//! }
//! let (tree, _) = b.finish();
//! ```

use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use crate::dom::{Attached, Dom, Node, NodeId};
use crate::page::{Host, PageTree};
use crate::registry::Registry;
use crate::widget::{Props, Widget};
use crate::widgets::View;

/// Callback run by the dispatcher once the built tree is live.
pub type PostExec = Box<dyn FnOnce(&mut dyn Host) + Send>;

/// Errors raised while building a page tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    #[error("cannot place `{widget}`: `{parent}` has no child slot")]
    OrphanWidget { widget: String, parent: String },
    #[error("unknown widget: {0}")]
    UnknownWidget(String),
    #[error("unknown widget namespace: {0}")]
    UnknownNamespace(String),
    #[error("node does not belong to this page tree")]
    UnknownNode,
    #[error("cannot exit the page root")]
    CursorUnderflow,
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Builds one page tree. Never shared between pages or sessions.
pub struct Builder {
    registry: Arc<Registry>,
    dom: Dom,
    root: NodeId,
    /// Bottom entry is the root and is never popped.
    cursor: Vec<NodeId>,
    postexec: Option<PostExec>,
}

impl Builder {
    /// A builder whose root is a default `View`.
    pub fn new(registry: Arc<Registry>) -> Self {
        Self::with_view(registry, View::new())
    }

    /// A builder rooted at the given `View`.
    pub fn with_view(registry: Arc<Registry>, view: View) -> Self {
        let mut dom = Dom::new();
        let root = dom.insert(Node::from_widget(Box::new(view)));
        Self {
            registry,
            dom,
            root,
            cursor: vec![root],
            postexec: None,
        }
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The node new widgets are attached to.
    pub fn cursor(&self) -> NodeId {
        self.cursor.last().copied().unwrap_or(self.root)
    }

    /// Cursor stack height; 1 when only the root is open.
    pub fn depth(&self) -> usize {
        self.cursor.len()
    }

    /// The tree built so far.
    pub fn dom(&self) -> &Dom {
        &self.dom
    }

    /// Mutable access to an already attached widget.
    pub fn widget_mut<W: Widget>(&mut self, id: NodeId) -> Option<&mut W> {
        self.dom.get_mut(id)?.downcast_mut::<W>()
    }

    // -- constructors --------------------------------------------------------

    /// Attach `widget` under the cursor and return its id.
    pub fn add<W: Widget>(&mut self, widget: W) -> Result<NodeId, BuildError> {
        self.add_boxed(Box::new(widget))
    }

    pub fn add_boxed(&mut self, widget: Box<dyn Widget>) -> Result<NodeId, BuildError> {
        let parent = self.cursor();
        let Some(target) = self.dom.get(parent) else {
            return Err(BuildError::UnknownNode);
        };
        if !target.is_container() {
            return Err(BuildError::OrphanWidget {
                widget: widget.widget_type().to_owned(),
                parent: target.widget_type().to_owned(),
            });
        }

        let attached = self
            .dom
            .attach(parent, Node::from_widget(widget))
            .ok_or(BuildError::UnknownNode)?;
        if let Attached::Replaced(..) = attached {
            // A replaced subtree may have held entered nodes.
            let dom = &self.dom;
            self.cursor.retain(|&id| dom.contains(id));
        }
        Ok(attached.id())
    }

    /// Construct a widget by registry name (`"Text"`, `"charts.LineChart"`)
    /// and attach it under the cursor.
    pub fn create(&mut self, name: &str, props: &Props) -> Result<NodeId, BuildError> {
        let classified = self.registry.lookup(name)?;
        self.add_boxed(classified.class.instantiate(props))
    }

    // -- scopes --------------------------------------------------------------

    /// Attach `widget` and make it the cursor until the returned guard drops.
    pub fn open<W: Widget>(&mut self, widget: W) -> Result<Scope<'_>, BuildError> {
        let node = self.add(widget)?;
        Ok(self.push_scope(node))
    }

    /// Name-based form of [`open`](Self::open).
    pub fn open_named(&mut self, name: &str, props: &Props) -> Result<Scope<'_>, BuildError> {
        let node = self.create(name, props)?;
        Ok(self.push_scope(node))
    }

    /// Attach `widget` and run `f` with it as the cursor.
    pub fn scope<W, R, E>(
        &mut self,
        widget: W,
        f: impl FnOnce(&mut Builder) -> Result<R, E>,
    ) -> Result<R, E>
    where
        W: Widget,
        E: From<BuildError>,
    {
        let mut scope = self.open(widget)?;
        f(&mut *scope)
    }

    fn push_scope(&mut self, node: NodeId) -> Scope<'_> {
        let depth = self.cursor.len();
        self.cursor.push(node);
        Scope {
            builder: self,
            depth,
            node,
        }
    }

    /// Make `node` the cursor. Pair with [`exit`](Self::exit).
    pub fn enter(&mut self, node: NodeId) -> Result<(), BuildError> {
        if !self.dom.contains(node) {
            return Err(BuildError::UnknownNode);
        }
        self.cursor.push(node);
        Ok(())
    }

    /// Restore the cursor saved by the matching [`enter`](Self::enter).
    pub fn exit(&mut self) -> Result<NodeId, BuildError> {
        if self.cursor.len() <= 1 {
            return Err(BuildError::CursorUnderflow);
        }
        self.cursor.pop().ok_or(BuildError::CursorUnderflow)
    }

    // -- completion ----------------------------------------------------------

    /// Register the callback to run once the tree is live. Replaces any
    /// earlier registration.
    pub fn postexec(&mut self, f: impl FnOnce(&mut dyn Host) + Send + 'static) {
        if self.postexec.is_some() {
            tracing::debug!("postexec callback replaced");
        }
        self.postexec = Some(Box::new(f));
    }

    pub fn has_postexec(&self) -> bool {
        self.postexec.is_some()
    }

    /// Consume the builder, yielding the tree and the postexec callback.
    pub fn finish(self) -> (PageTree, Option<PostExec>) {
        (PageTree::new(self.dom, self.root), self.postexec)
    }
}

impl fmt::Debug for Builder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builder")
            .field("root", &self.root)
            .field("cursor", &self.cursor)
            .field("nodes", &self.dom.len())
            .field("postexec", &self.postexec.is_some())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Scope
// ---------------------------------------------------------------------------

/// Guard returned by [`Builder::open`]. Derefs to the builder; restores the
/// cursor when dropped, on every exit path.
#[derive(Debug)]
pub struct Scope<'b> {
    builder: &'b mut Builder,
    depth: usize,
    node: NodeId,
}

impl Scope<'_> {
    /// The container this scope opened.
    pub fn node(&self) -> NodeId {
        self.node
    }
}

impl Deref for Scope<'_> {
    type Target = Builder;

    fn deref(&self) -> &Builder {
        self.builder
    }
}

impl DerefMut for Scope<'_> {
    fn deref_mut(&mut self) -> &mut Builder {
        self.builder
    }
}

impl Drop for Scope<'_> {
    fn drop(&mut self) {
        self.builder.cursor.truncate(self.depth.max(1));
    }
}

// ===========================================================================
// Tests
// ===========================================================================
