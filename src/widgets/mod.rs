//! Built-in widgets and their static manifest.
//!
//! [`BUILTIN`] lists every built-in class. It is the namespace the default
//! [`Registry`](crate::registry::Registry) classifies.

pub mod content;
pub mod layout;
pub mod navigation;

pub use content::{Checkbox, Divider, ElevatedButton, Icon, Text, TextButton, TextField};
pub use layout::{Card, Column, Container, ListView, Row, View};
pub use navigation::{AlertDialog, AppBar, Tab, Tabs};

use crate::widget::classify::Namespace;

/// Manifest of the built-in widget classes.
pub static BUILTIN: Namespace = Namespace {
    name: "widgets",
    classes: &[
        &layout::VIEW,
        &layout::COLUMN,
        &layout::ROW,
        &layout::LIST_VIEW,
        &layout::CONTAINER,
        &layout::CARD,
        &navigation::APP_BAR,
        &navigation::TABS,
        &navigation::TAB,
        &navigation::ALERT_DIALOG,
        &content::TEXT,
        &content::TEXT_BUTTON,
        &content::ELEVATED_BUTTON,
        &content::TEXT_FIELD,
        &content::ICON,
        &content::CHECKBOX,
        &content::DIVIDER,
    ],
};
