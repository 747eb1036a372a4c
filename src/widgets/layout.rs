//! Layout widgets: View, Column, Row, ListView, Container, Card.
//!
//! `View` is the page root. `Column`, `Row` and `ListView` hold an ordered
//! `controls` list; `Container` and `Card` hold a single `content` child.

use std::any::Any;

use crate::widget::traits::{construct, FromProps, Props, Widget, WidgetClass};

// ---------------------------------------------------------------------------
// View
// ---------------------------------------------------------------------------

pub static VIEW: WidgetClass = WidgetClass {
    name: "View",
    attributes: &["route", "controls", "appbar", "padding", "spacing", "scroll"],
    construct: construct::<View>,
};

/// Top-level container of one page. Every page tree is rooted at a `View`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct View {
    pub padding: Option<u16>,
    pub spacing: Option<u16>,
    pub scroll: bool,
}

impl View {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_padding(mut self, padding: u16) -> Self {
        self.padding = Some(padding);
        self
    }

    pub fn with_spacing(mut self, spacing: u16) -> Self {
        self.spacing = Some(spacing);
        self
    }

    pub fn with_scroll(mut self, scroll: bool) -> Self {
        self.scroll = scroll;
        self
    }
}

impl FromProps for View {
    fn from_props(props: &Props) -> Self {
        Self {
            padding: props.u16("padding"),
            spacing: props.u16("spacing"),
            scroll: props.bool("scroll").unwrap_or(false),
        }
    }
}

impl Widget for View {
    fn class(&self) -> &'static WidgetClass {
        &VIEW
    }

    fn props(&self) -> Props {
        let props = Props::new()
            .with_opt("padding", self.padding)
            .with_opt("spacing", self.spacing);
        if self.scroll {
            props.with("scroll", true)
        } else {
            props
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// ---------------------------------------------------------------------------
// Column / Row
// ---------------------------------------------------------------------------

pub static COLUMN: WidgetClass = WidgetClass {
    name: "Column",
    attributes: &["controls", "alignment", "spacing", "scroll"],
    construct: construct::<Column>,
};

pub static ROW: WidgetClass = WidgetClass {
    name: "Row",
    attributes: &["controls", "alignment", "spacing", "wrap"],
    construct: construct::<Row>,
};

/// Vertical list of controls.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Column {
    pub alignment: Option<String>,
    pub spacing: Option<u16>,
}

impl Column {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_alignment(mut self, alignment: impl Into<String>) -> Self {
        self.alignment = Some(alignment.into());
        self
    }

    pub fn with_spacing(mut self, spacing: u16) -> Self {
        self.spacing = Some(spacing);
        self
    }
}

impl FromProps for Column {
    fn from_props(props: &Props) -> Self {
        Self {
            alignment: props.str("alignment").map(str::to_owned),
            spacing: props.u16("spacing"),
        }
    }
}

impl Widget for Column {
    fn class(&self) -> &'static WidgetClass {
        &COLUMN
    }

    fn props(&self) -> Props {
        Props::new()
            .with_opt("alignment", self.alignment.clone())
            .with_opt("spacing", self.spacing)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Horizontal list of controls.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    pub alignment: Option<String>,
    pub spacing: Option<u16>,
    pub wrap: bool,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_alignment(mut self, alignment: impl Into<String>) -> Self {
        self.alignment = Some(alignment.into());
        self
    }

    pub fn with_spacing(mut self, spacing: u16) -> Self {
        self.spacing = Some(spacing);
        self
    }

    pub fn with_wrap(mut self, wrap: bool) -> Self {
        self.wrap = wrap;
        self
    }
}

impl FromProps for Row {
    fn from_props(props: &Props) -> Self {
        Self {
            alignment: props.str("alignment").map(str::to_owned),
            spacing: props.u16("spacing"),
            wrap: props.bool("wrap").unwrap_or(false),
        }
    }
}

impl Widget for Row {
    fn class(&self) -> &'static WidgetClass {
        &ROW
    }

    fn props(&self) -> Props {
        let props = Props::new()
            .with_opt("alignment", self.alignment.clone())
            .with_opt("spacing", self.spacing);
        if self.wrap {
            props.with("wrap", true)
        } else {
            props
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// ---------------------------------------------------------------------------
// ListView
// ---------------------------------------------------------------------------

pub static LIST_VIEW: WidgetClass = WidgetClass {
    name: "ListView",
    attributes: &["controls", "spacing", "padding", "auto_scroll"],
    construct: construct::<ListView>,
};

/// Scrollable list of controls.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListView {
    pub spacing: Option<u16>,
    pub auto_scroll: bool,
}

impl ListView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_spacing(mut self, spacing: u16) -> Self {
        self.spacing = Some(spacing);
        self
    }

    pub fn with_auto_scroll(mut self, auto_scroll: bool) -> Self {
        self.auto_scroll = auto_scroll;
        self
    }
}

impl FromProps for ListView {
    fn from_props(props: &Props) -> Self {
        Self {
            spacing: props.u16("spacing"),
            auto_scroll: props.bool("auto_scroll").unwrap_or(false),
        }
    }
}

impl Widget for ListView {
    fn class(&self) -> &'static WidgetClass {
        &LIST_VIEW
    }

    fn props(&self) -> Props {
        let props = Props::new().with_opt("spacing", self.spacing);
        if self.auto_scroll {
            props.with("auto_scroll", true)
        } else {
            props
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// ---------------------------------------------------------------------------
// Container / Card
// ---------------------------------------------------------------------------

pub static CONTAINER: WidgetClass = WidgetClass {
    name: "Container",
    attributes: &["content", "padding", "bgcolor", "width", "height"],
    construct: construct::<Container>,
};

pub static CARD: WidgetClass = WidgetClass {
    name: "Card",
    attributes: &["content", "elevation", "color"],
    construct: construct::<Card>,
};

/// Decorated box holding a single `content` child.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Container {
    pub padding: Option<u16>,
    pub bgcolor: Option<String>,
    pub width: Option<u16>,
    pub height: Option<u16>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_padding(mut self, padding: u16) -> Self {
        self.padding = Some(padding);
        self
    }

    pub fn with_bgcolor(mut self, bgcolor: impl Into<String>) -> Self {
        self.bgcolor = Some(bgcolor.into());
        self
    }

    pub fn with_width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_height(mut self, height: u16) -> Self {
        self.height = Some(height);
        self
    }
}

impl FromProps for Container {
    fn from_props(props: &Props) -> Self {
        Self {
            padding: props.u16("padding"),
            bgcolor: props.str("bgcolor").map(str::to_owned),
            width: props.u16("width"),
            height: props.u16("height"),
        }
    }
}

impl Widget for Container {
    fn class(&self) -> &'static WidgetClass {
        &CONTAINER
    }

    fn props(&self) -> Props {
        Props::new()
            .with_opt("padding", self.padding)
            .with_opt("bgcolor", self.bgcolor.clone())
            .with_opt("width", self.width)
            .with_opt("height", self.height)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Material card holding a single `content` child.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Card {
    pub elevation: Option<u16>,
    pub color: Option<String>,
}

impl Card {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_elevation(mut self, elevation: u16) -> Self {
        self.elevation = Some(elevation);
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

impl FromProps for Card {
    fn from_props(props: &Props) -> Self {
        Self {
            elevation: props.u16("elevation"),
            color: props.str("color").map(str::to_owned),
        }
    }
}

impl Widget for Card {
    fn class(&self) -> &'static WidgetClass {
        &CARD
    }

    fn props(&self) -> Props {
        Props::new()
            .with_opt("elevation", self.elevation)
            .with_opt("color", self.color.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// ===========================================================================
// Tests
// ===========================================================================
