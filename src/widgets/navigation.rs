//! Navigation and overlay widgets: AppBar, Tabs, Tab, AlertDialog.

use std::any::Any;

use crate::widget::traits::{construct, FromProps, Props, Widget, WidgetClass};

// ---------------------------------------------------------------------------
// AppBar
// ---------------------------------------------------------------------------

pub static APP_BAR: WidgetClass = WidgetClass {
    name: "AppBar",
    attributes: &["leading", "title", "actions", "bgcolor", "center_title"],
    construct: construct::<AppBar>,
};

/// Top application bar. Children built inside it land in `actions`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppBar {
    pub bgcolor: Option<String>,
    pub center_title: bool,
}

impl AppBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bgcolor(mut self, bgcolor: impl Into<String>) -> Self {
        self.bgcolor = Some(bgcolor.into());
        self
    }

    pub fn with_center_title(mut self, center_title: bool) -> Self {
        self.center_title = center_title;
        self
    }
}

impl FromProps for AppBar {
    fn from_props(props: &Props) -> Self {
        Self {
            bgcolor: props.str("bgcolor").map(str::to_owned),
            center_title: props.bool("center_title").unwrap_or(false),
        }
    }
}

impl Widget for AppBar {
    fn class(&self) -> &'static WidgetClass {
        &APP_BAR
    }

    fn props(&self) -> Props {
        let props = Props::new().with_opt("bgcolor", self.bgcolor.clone());
        if self.center_title {
            props.with("center_title", true)
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
// Tabs / Tab
// ---------------------------------------------------------------------------

pub static TABS: WidgetClass = WidgetClass {
    name: "Tabs",
    attributes: &["tabs", "selected_index", "animation_duration"],
    construct: construct::<Tabs>,
};

pub static TAB: WidgetClass = WidgetClass {
    name: "Tab",
    attributes: &["text", "icon", "content", "tab_content"],
    construct: construct::<Tab>,
};

/// Tab strip. Children built inside it land in `tabs`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tabs {
    pub selected_index: usize,
    pub animation_duration: Option<u32>,
}

impl Tabs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_selected_index(mut self, selected_index: usize) -> Self {
        self.selected_index = selected_index;
        self
    }

    pub fn with_animation_duration(mut self, millis: u32) -> Self {
        self.animation_duration = Some(millis);
        self
    }
}

impl FromProps for Tabs {
    fn from_props(props: &Props) -> Self {
        Self {
            selected_index: props
                .int("selected_index")
                .and_then(|n| usize::try_from(n).ok())
                .unwrap_or(0),
            animation_duration: props
                .int("animation_duration")
                .and_then(|n| u32::try_from(n).ok()),
        }
    }
}

impl Widget for Tabs {
    fn class(&self) -> &'static WidgetClass {
        &TABS
    }

    fn props(&self) -> Props {
        Props::new()
            .with("selected_index", self.selected_index as i64)
            .with_opt("animation_duration", self.animation_duration)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// One tab of a [`Tabs`] strip, holding a single `content` child.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tab {
    pub text: String,
    pub icon: Option<String>,
}

impl Tab {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            icon: None,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

impl FromProps for Tab {
    fn from_props(props: &Props) -> Self {
        Self {
            text: props.str("text").unwrap_or_default().to_owned(),
            icon: props.str("icon").map(str::to_owned),
        }
    }
}

impl Widget for Tab {
    fn class(&self) -> &'static WidgetClass {
        &TAB
    }

    fn props(&self) -> Props {
        Props::new()
            .with("text", self.text.as_str())
            .with_opt("icon", self.icon.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// ---------------------------------------------------------------------------
// AlertDialog
// ---------------------------------------------------------------------------

pub static ALERT_DIALOG: WidgetClass = WidgetClass {
    name: "AlertDialog",
    attributes: &["modal", "title", "content", "actions"],
    construct: construct::<AlertDialog>,
};

/// Modal dialog. Declares both `content` and `actions`, which the classifier
/// reports as ambiguous; children land in `actions`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlertDialog {
    pub modal: bool,
}

impl AlertDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_modal(mut self, modal: bool) -> Self {
        self.modal = modal;
        self
    }
}

impl FromProps for AlertDialog {
    fn from_props(props: &Props) -> Self {
        Self {
            modal: props.bool("modal").unwrap_or(false),
        }
    }
}

impl Widget for AlertDialog {
    fn class(&self) -> &'static WidgetClass {
        &ALERT_DIALOG
    }

    fn props(&self) -> Props {
        Props::new().with("modal", self.modal)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::classify::classify_class;
    use crate::widget::slot::SlotKind;

    #[test]
    fn app_bar_prefers_actions_over_title() {
        let (classified, ambiguity) = classify_class(&APP_BAR);
        assert_eq!(classified.slot, SlotKind::Actions);
        assert!(ambiguity.is_none());
    }

    #[test]
    fn tabs_and_tab_slots() {
        assert_eq!(TABS.slot_kind(), SlotKind::Tabs);
        assert_eq!(TAB.slot_kind(), SlotKind::Content);
    }

    #[test]
    fn alert_dialog_is_ambiguous_but_classified() {
        let (classified, ambiguity) = classify_class(&ALERT_DIALOG);
        assert_eq!(classified.slot, SlotKind::Actions);
        let ambiguity = ambiguity.unwrap();
        assert_eq!(ambiguity.tier_one, 2);
        assert_eq!(ambiguity.tier_two, 1);
    }

    #[test]
    fn tabs_from_props_ignores_negative_index() {
        let tabs = Tabs::from_props(&Props::new().with("selected_index", -3));
        assert_eq!(tabs.selected_index, 0);
        let tabs = Tabs::from_props(&Props::new().with("selected_index", 2));
        assert_eq!(tabs.selected_index, 2);
    }

    #[test]
    fn tab_props() {
        let tab = Tab::new("Home").with_icon("home");
        let props = tab.props();
        assert_eq!(props.str("text"), Some("Home"));
        assert_eq!(props.str("icon"), Some("home"));
    }
}
