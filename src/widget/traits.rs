//! Widget trait, class descriptors, and property bags.
//!
//! Every widget type is described by a static [`WidgetClass`]: its name, the
//! attribute names it declares, and a constructor that builds an instance from
//! a [`Props`] bag. The attribute list is what the classifier inspects to
//! decide whether a widget can hold children.

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;

use super::slot::SlotKind;

// ---------------------------------------------------------------------------
// Value / Props
// ---------------------------------------------------------------------------

/// A single property value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "{s:?}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<u16> for Value {
    fn from(value: u16) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

/// An ordered bag of named property values.
///
/// Used both to construct widgets by name and to export a widget's current
/// properties for inspection (tree outlines, logging).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Props {
    values: BTreeMap<String, Value>,
}

impl Props {
    /// Create an empty property bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property (builder).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    /// Set a property only when `value` is `Some` (builder).
    pub fn with_opt<V: Into<Value>>(mut self, key: impl Into<String>, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.set(key, value);
        }
        self
    }

    /// Set a property, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// String value of `key`, if present and a string.
    pub fn str(&self, key: &str) -> Option<&str> {
        match self.values.get(key) {
            Some(Value::Str(s)) => Some(s),
            _ => None,
        }
    }

    /// Integer value of `key`, if present and an integer.
    pub fn int(&self, key: &str) -> Option<i64> {
        match self.values.get(key) {
            Some(Value::Int(n)) => Some(*n),
            _ => None,
        }
    }

    /// Float value of `key`. Integers are widened.
    pub fn float(&self, key: &str) -> Option<f64> {
        match self.values.get(key) {
            Some(Value::Float(x)) => Some(*x),
            Some(Value::Int(n)) => Some(*n as f64),
            _ => None,
        }
    }

    pub fn bool(&self, key: &str) -> Option<bool> {
        match self.values.get(key) {
            Some(Value::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    /// Integer value of `key` narrowed to `u16`; out-of-range values are ignored.
    pub fn u16(&self, key: &str) -> Option<u16> {
        self.int(key).and_then(|n| u16::try_from(n).ok())
    }

    /// Iterate over `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

// ---------------------------------------------------------------------------
// WidgetClass
// ---------------------------------------------------------------------------

/// Static descriptor of a widget type.
pub struct WidgetClass {
    /// Type name, unique within its namespace (e.g. "Column").
    pub name: &'static str,
    /// Attribute names the type declares. Slot detection matches against these.
    pub attributes: &'static [&'static str],
    /// Build an instance from a property bag.
    pub construct: fn(&Props) -> Box<dyn Widget>,
}

impl WidgetClass {
    /// Whether the class declares the given attribute.
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains(&name)
    }

    /// The slot kind this class exposes, by the fixed priority rule.
    pub fn slot_kind(&self) -> SlotKind {
        SlotKind::classify(self.attributes.iter().copied())
    }

    /// Construct an instance from `props`.
    pub fn instantiate(&self, props: &Props) -> Box<dyn Widget> {
        (self.construct)(props)
    }
}

impl fmt::Debug for WidgetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetClass")
            .field("name", &self.name)
            .field("attributes", &self.attributes)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Widget trait
// ---------------------------------------------------------------------------

/// Core trait implemented by every widget that can live in a page tree.
///
/// Object-safe: trees store `Box<dyn Widget>` and downcast through `as_any`.
pub trait Widget: Any + Send + fmt::Debug {
    /// The static class descriptor of this widget.
    fn class(&self) -> &'static WidgetClass;

    /// Type name, taken from the class.
    fn widget_type(&self) -> &str {
        self.class().name
    }

    /// Current property values, for inspection. Empty by default.
    fn props(&self) -> Props {
        Props::new()
    }

    /// Downcast to `&dyn Any` for runtime type inspection.
    fn as_any(&self) -> &dyn Any;

    /// Downcast to `&mut dyn Any` for mutable runtime type inspection.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Construction from a property bag, used by name-based creation.
pub trait FromProps: Sized {
    fn from_props(props: &Props) -> Self;
}

/// Generic constructor suitable for [`WidgetClass::construct`].
pub fn construct<W: Widget + FromProps>(props: &Props) -> Box<dyn Widget> {
    Box::new(W::from_props(props))
}

// ===========================================================================
// Tests
// ===========================================================================
