//! Widget system: trait and class descriptors, slot kinds, classification.

pub mod classify;
pub mod slot;
pub mod traits;

pub use classify::{classify, classify_class, Classification, ClassifiedWidget, Namespace, SlotAmbiguity};
pub use slot::SlotKind;
pub use traits::{construct, FromProps, Props, Value, Widget, WidgetClass};
