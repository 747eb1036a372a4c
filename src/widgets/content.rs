//! Content widgets: Text, TextButton, ElevatedButton, TextField, Icon,
//! Checkbox, Divider.
//!
//! Buttons declare a `content` attribute and therefore classify as
//! containers; the rest are leaves.

use std::any::Any;

use crate::widget::traits::{construct, FromProps, Props, Widget, WidgetClass};

// ---------------------------------------------------------------------------
// Text
// ---------------------------------------------------------------------------

pub static TEXT: WidgetClass = WidgetClass {
    name: "Text",
    attributes: &["value", "size", "weight", "color", "selectable"],
    construct: construct::<Text>,
};

/// A run of static text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Text {
    pub value: String,
    pub size: Option<u16>,
    pub weight: Option<String>,
    pub color: Option<String>,
}

impl Text {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }

    pub fn with_size(mut self, size: u16) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_weight(mut self, weight: impl Into<String>) -> Self {
        self.weight = Some(weight.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

impl FromProps for Text {
    fn from_props(props: &Props) -> Self {
        Self {
            value: props.str("value").unwrap_or_default().to_owned(),
            size: props.u16("size"),
            weight: props.str("weight").map(str::to_owned),
            color: props.str("color").map(str::to_owned),
        }
    }
}

impl Widget for Text {
    fn class(&self) -> &'static WidgetClass {
        &TEXT
    }

    fn props(&self) -> Props {
        Props::new()
            .with("value", self.value.as_str())
            .with_opt("size", self.size)
            .with_opt("weight", self.weight.clone())
            .with_opt("color", self.color.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// ---------------------------------------------------------------------------
// Buttons
// ---------------------------------------------------------------------------

pub static TEXT_BUTTON: WidgetClass = WidgetClass {
    name: "TextButton",
    attributes: &["text", "icon", "content", "disabled"],
    construct: construct::<TextButton>,
};

pub static ELEVATED_BUTTON: WidgetClass = WidgetClass {
    name: "ElevatedButton",
    attributes: &["text", "icon", "content", "bgcolor", "disabled"],
    construct: construct::<ElevatedButton>,
};

/// Flat button with a text label.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextButton {
    pub text: String,
    pub icon: Option<String>,
    pub disabled: bool,
}

impl TextButton {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

impl FromProps for TextButton {
    fn from_props(props: &Props) -> Self {
        Self {
            text: props.str("text").unwrap_or_default().to_owned(),
            icon: props.str("icon").map(str::to_owned),
            disabled: props.bool("disabled").unwrap_or(false),
        }
    }
}

impl Widget for TextButton {
    fn class(&self) -> &'static WidgetClass {
        &TEXT_BUTTON
    }

    fn props(&self) -> Props {
        let props = Props::new()
            .with("text", self.text.as_str())
            .with_opt("icon", self.icon.clone());
        if self.disabled {
            props.with("disabled", true)
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

/// Raised button with a text label.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElevatedButton {
    pub text: String,
    pub icon: Option<String>,
    pub bgcolor: Option<String>,
    pub disabled: bool,
}

impl ElevatedButton {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_bgcolor(mut self, bgcolor: impl Into<String>) -> Self {
        self.bgcolor = Some(bgcolor.into());
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

impl FromProps for ElevatedButton {
    fn from_props(props: &Props) -> Self {
        Self {
            text: props.str("text").unwrap_or_default().to_owned(),
            icon: props.str("icon").map(str::to_owned),
            bgcolor: props.str("bgcolor").map(str::to_owned),
            disabled: props.bool("disabled").unwrap_or(false),
        }
    }
}

impl Widget for ElevatedButton {
    fn class(&self) -> &'static WidgetClass {
        &ELEVATED_BUTTON
    }

    fn props(&self) -> Props {
        let props = Props::new()
            .with("text", self.text.as_str())
            .with_opt("icon", self.icon.clone())
            .with_opt("bgcolor", self.bgcolor.clone());
        if self.disabled {
            props.with("disabled", true)
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
// TextField
// ---------------------------------------------------------------------------

pub static TEXT_FIELD: WidgetClass = WidgetClass {
    name: "TextField",
    attributes: &["label", "value", "hint_text", "password"],
    construct: construct::<TextField>,
};

/// Single-line text input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextField {
    pub label: Option<String>,
    pub value: String,
    pub hint_text: Option<String>,
    pub password: bool,
}

impl TextField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn with_hint_text(mut self, hint_text: impl Into<String>) -> Self {
        self.hint_text = Some(hint_text.into());
        self
    }

    pub fn with_password(mut self, password: bool) -> Self {
        self.password = password;
        self
    }
}

impl FromProps for TextField {
    fn from_props(props: &Props) -> Self {
        Self {
            label: props.str("label").map(str::to_owned),
            value: props.str("value").unwrap_or_default().to_owned(),
            hint_text: props.str("hint_text").map(str::to_owned),
            password: props.bool("password").unwrap_or(false),
        }
    }
}

impl Widget for TextField {
    fn class(&self) -> &'static WidgetClass {
        &TEXT_FIELD
    }

    fn props(&self) -> Props {
        let props = Props::new()
            .with_opt("label", self.label.clone())
            .with_opt("hint_text", self.hint_text.clone());
        let props = if self.value.is_empty() {
            props
        } else {
            props.with("value", self.value.as_str())
        };
        if self.password {
            props.with("password", true)
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
// Icon / Checkbox / Divider
// ---------------------------------------------------------------------------

pub static ICON: WidgetClass = WidgetClass {
    name: "Icon",
    attributes: &["name", "color", "size"],
    construct: construct::<Icon>,
};

pub static CHECKBOX: WidgetClass = WidgetClass {
    name: "Checkbox",
    attributes: &["label", "value", "disabled"],
    construct: construct::<Checkbox>,
};

pub static DIVIDER: WidgetClass = WidgetClass {
    name: "Divider",
    attributes: &["height", "thickness", "color"],
    construct: construct::<Divider>,
};

/// Named material icon.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Icon {
    pub name: String,
    pub color: Option<String>,
    pub size: Option<u16>,
}

impl Icon {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_size(mut self, size: u16) -> Self {
        self.size = Some(size);
        self
    }
}

impl FromProps for Icon {
    fn from_props(props: &Props) -> Self {
        Self {
            name: props.str("name").unwrap_or_default().to_owned(),
            color: props.str("color").map(str::to_owned),
            size: props.u16("size"),
        }
    }
}

impl Widget for Icon {
    fn class(&self) -> &'static WidgetClass {
        &ICON
    }

    fn props(&self) -> Props {
        Props::new()
            .with("name", self.name.as_str())
            .with_opt("color", self.color.clone())
            .with_opt("size", self.size)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Labelled boolean toggle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Checkbox {
    pub label: Option<String>,
    pub value: bool,
    pub disabled: bool,
}

impl Checkbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_value(mut self, value: bool) -> Self {
        self.value = value;
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

impl FromProps for Checkbox {
    fn from_props(props: &Props) -> Self {
        Self {
            label: props.str("label").map(str::to_owned),
            value: props.bool("value").unwrap_or(false),
            disabled: props.bool("disabled").unwrap_or(false),
        }
    }
}

impl Widget for Checkbox {
    fn class(&self) -> &'static WidgetClass {
        &CHECKBOX
    }

    fn props(&self) -> Props {
        let props = Props::new()
            .with_opt("label", self.label.clone())
            .with("value", self.value);
        if self.disabled {
            props.with("disabled", true)
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

/// Horizontal rule.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Divider {
    pub height: Option<u16>,
    pub thickness: Option<u16>,
}

impl Divider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_height(mut self, height: u16) -> Self {
        self.height = Some(height);
        self
    }

    pub fn with_thickness(mut self, thickness: u16) -> Self {
        self.thickness = Some(thickness);
        self
    }
}

impl FromProps for Divider {
    fn from_props(props: &Props) -> Self {
        Self {
            height: props.u16("height"),
            thickness: props.u16("thickness"),
        }
    }
}

impl Widget for Divider {
    fn class(&self) -> &'static WidgetClass {
        &DIVIDER
    }

    fn props(&self) -> Props {
        Props::new()
            .with_opt("height", self.height)
            .with_opt("thickness", self.thickness)
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::slot::SlotKind;

    #[test]
    fn leaves_have_no_slot() {
        for class in [&TEXT, &TEXT_FIELD, &ICON, &CHECKBOX, &DIVIDER] {
            assert_eq!(class.slot_kind(), SlotKind::None, "{}", class.name);
        }
    }

    #[test]
    fn buttons_are_content_containers() {
        assert_eq!(TEXT_BUTTON.slot_kind(), SlotKind::Content);
        assert_eq!(ELEVATED_BUTTON.slot_kind(), SlotKind::Content);
    }

    #[test]
    fn text_builder_and_props() {
        let text = Text::new("Hello").with_size(18).with_weight("bold");
        let props = text.props();
        assert_eq!(props.str("value"), Some("Hello"));
        assert_eq!(props.int("size"), Some(18));
        assert_eq!(props.str("weight"), Some("bold"));
        assert!(props.get("color").is_none());
    }

    #[test]
    fn text_from_props_defaults_to_empty() {
        let text = Text::from_props(&Props::new());
        assert_eq!(text.value, "");
        assert_eq!(text.size, None);
    }

    #[test]
    fn text_field_hides_empty_value() {
        let field = TextField::new().with_label("Name");
        assert!(field.props().get("value").is_none());
        let field = field.with_value("Ada");
        assert_eq!(field.props().str("value"), Some("Ada"));
    }

    #[test]
    fn checkbox_round_trip_through_class() {
        let checkbox = Checkbox::new().with_label("Agree").with_value(true);
        let rebuilt = CHECKBOX.instantiate(&checkbox.props());
        assert_eq!(rebuilt.as_any().downcast_ref::<Checkbox>(), Some(&checkbox));
    }
}
