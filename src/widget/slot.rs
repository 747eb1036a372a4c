//! Slot kinds: the child-holding attribute a widget class exposes.

use std::fmt;

/// The category of child-holding attribute a widget exposes.
///
/// Tier-1 kinds (`Controls`, `Actions`, `Content`) hold general widgets,
/// tier-2 kinds (`Tabs`, `Title`) are specialized. `None` marks a leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotKind {
    /// `controls`: ordered list of children.
    Controls,
    /// `actions`: ordered list of children.
    Actions,
    /// `content`: a single child.
    Content,
    /// `tabs`: ordered list of tabs.
    Tabs,
    /// `title`: a single child.
    Title,
    /// No child slot.
    None,
}

impl SlotKind {
    /// Detection order. The first kind whose attribute a class declares wins.
    pub const PRIORITY: [SlotKind; 5] = [
        SlotKind::Controls,
        SlotKind::Actions,
        SlotKind::Content,
        SlotKind::Tabs,
        SlotKind::Title,
    ];

    pub const TIER_ONE: [SlotKind; 3] = [SlotKind::Controls, SlotKind::Actions, SlotKind::Content];

    pub const TIER_TWO: [SlotKind; 2] = [SlotKind::Tabs, SlotKind::Title];

    /// The attribute name that indicates this slot kind.
    pub fn attribute(self) -> Option<&'static str> {
        match self {
            SlotKind::Controls => Some("controls"),
            SlotKind::Actions => Some("actions"),
            SlotKind::Content => Some("content"),
            SlotKind::Tabs => Some("tabs"),
            SlotKind::Title => Some("title"),
            SlotKind::None => None,
        }
    }

    /// 1 for general containers, 2 for specialized ones, `None` for leaves.
    pub fn tier(self) -> Option<u8> {
        match self {
            SlotKind::Controls | SlotKind::Actions | SlotKind::Content => Some(1),
            SlotKind::Tabs | SlotKind::Title => Some(2),
            SlotKind::None => None,
        }
    }

    /// Whether the slot holds an ordered list (as opposed to a single child).
    pub fn is_list(self) -> bool {
        matches!(self, SlotKind::Controls | SlotKind::Actions | SlotKind::Tabs)
    }

    /// Whether widgets of this kind can hold children at all.
    pub fn is_container(self) -> bool {
        self != SlotKind::None
    }

    /// Classify a set of attribute names: first match in [`Self::PRIORITY`].
    pub fn classify<'a>(attributes: impl IntoIterator<Item = &'a str>) -> SlotKind {
        let attributes: Vec<&str> = attributes.into_iter().collect();
        Self::PRIORITY
            .into_iter()
            .find(|kind| {
                kind.attribute()
                    .is_some_and(|name| attributes.contains(&name))
            })
            .unwrap_or(SlotKind::None)
    }
}

impl fmt::Display for SlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.attribute().unwrap_or("none"))
    }
}
