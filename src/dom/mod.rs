//! Page tree arena: slotmap-backed widget tree with slot-aware attachment.

pub mod node;
pub mod query;
pub mod tree;

pub use node::{Node, NodeId};
pub use tree::{Attached, Dom};
