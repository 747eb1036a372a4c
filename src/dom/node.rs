//! Node types: NodeId, Node.

use slotmap::new_key_type;

use crate::widget::{SlotKind, Widget};

new_key_type! {
    /// Unique identifier for a node in a page tree. Copy, lightweight (u64).
    pub struct NodeId;
}

/// A widget instance placed in the tree, together with the slot kind its
/// class exposes.
#[derive(Debug)]
pub struct Node {
    pub widget: Box<dyn Widget>,
    /// Where children of this node go. `SlotKind::None` for leaves.
    pub slot: SlotKind,
}

impl Node {
    pub fn new(widget: Box<dyn Widget>, slot: SlotKind) -> Self {
        Self { widget, slot }
    }

    /// A node whose slot kind is taken from the widget's own class.
    pub fn from_widget(widget: Box<dyn Widget>) -> Self {
        let slot = widget.class().slot_kind();
        Self { widget, slot }
    }

    pub fn widget_type(&self) -> &str {
        self.widget.widget_type()
    }

    pub fn is_container(&self) -> bool {
        self.slot.is_container()
    }

    /// Downcast the widget to a concrete type.
    pub fn downcast<W: Widget>(&self) -> Option<&W> {
        self.widget.as_any().downcast_ref::<W>()
    }

    pub fn downcast_mut<W: Widget>(&mut self) -> Option<&mut W> {
        self.widget.as_any_mut().downcast_mut::<W>()
    }
}
