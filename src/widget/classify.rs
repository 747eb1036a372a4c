//! Widget classifier: annotate every class of a namespace with its slot kind.
//!
//! A [`Namespace`] is a static manifest of widget classes. [`classify`] scans
//! it, assigns each class the first matching [`SlotKind`] and reports classes
//! whose attribute set is ambiguous (more than one indicator within a tier).
//! Ambiguity is a warning only; classification stays deterministic.

use std::fmt;

use super::slot::SlotKind;
use super::traits::WidgetClass;

/// A named, static manifest of widget classes.
#[derive(Debug)]
pub struct Namespace {
    /// Namespace name, used as the default alias when registered as extras.
    pub name: &'static str,
    pub classes: &'static [&'static WidgetClass],
}

/// A widget class annotated with its slot kind.
#[derive(Debug, Clone, Copy)]
pub struct ClassifiedWidget {
    pub class: &'static WidgetClass,
    pub slot: SlotKind,
}

impl ClassifiedWidget {
    pub fn name(&self) -> &'static str {
        self.class.name
    }

    pub fn is_container(&self) -> bool {
        self.slot.is_container()
    }
}

/// A class that matched more than one slot indicator within a tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotAmbiguity {
    pub widget: &'static str,
    /// Number of tier-1 indicators (`controls`, `actions`, `content`) matched.
    pub tier_one: usize,
    /// Number of tier-2 indicators (`tabs`, `title`) matched.
    pub tier_two: usize,
    /// The kind that was picked anyway.
    pub chosen: SlotKind,
}

impl fmt::Display for SlotAmbiguity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} matched [{} tier-1, {} tier-2] slot attributes; using `{}`",
            self.widget, self.tier_one, self.tier_two, self.chosen
        )
    }
}

/// Result of one classifier run.
#[derive(Debug, Default)]
pub struct Classification {
    /// Classified widgets in manifest order.
    pub widgets: Vec<ClassifiedWidget>,
    pub ambiguities: Vec<SlotAmbiguity>,
}

impl Classification {
    /// Look up a classified widget by class name.
    pub fn get(&self, name: &str) -> Option<&ClassifiedWidget> {
        self.widgets.iter().find(|w| w.class.name == name)
    }

    /// Classified widgets that can hold children.
    pub fn containers(&self) -> impl Iterator<Item = &ClassifiedWidget> {
        self.widgets.iter().filter(|w| w.is_container())
    }

    /// Classified widgets without a child slot.
    pub fn leaves(&self) -> impl Iterator<Item = &ClassifiedWidget> {
        self.widgets.iter().filter(|w| !w.is_container())
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }
}

/// Classify a single class, returning the ambiguity record if any.
pub fn classify_class(class: &'static WidgetClass) -> (ClassifiedWidget, Option<SlotAmbiguity>) {
    let slot = class.slot_kind();
    let count = |tier: &[SlotKind]| {
        tier.iter()
            .filter_map(|kind| kind.attribute())
            .filter(|name| class.has_attribute(name))
            .count()
    };
    let tier_one = count(&SlotKind::TIER_ONE[..]);
    let tier_two = count(&SlotKind::TIER_TWO[..]);

    let ambiguity = (tier_one > 1 || tier_two > 1).then(|| SlotAmbiguity {
        widget: class.name,
        tier_one,
        tier_two,
        chosen: slot,
    });
    (ClassifiedWidget { class, slot }, ambiguity)
}

/// Scan a namespace. Every call re-scans; nothing is cached across runs.
pub fn classify(namespace: &Namespace) -> Classification {
    let mut result = Classification::default();
    for &class in namespace.classes {
        let (classified, ambiguity) = classify_class(class);
        if let Some(ambiguity) = ambiguity {
            tracing::warn!(
                namespace = namespace.name,
                widget = class.name,
                tier_one = ambiguity.tier_one,
                tier_two = ambiguity.tier_two,
                chosen = %ambiguity.chosen,
                "ambiguous widget slot attributes"
            );
            result.ambiguities.push(ambiguity);
        }
        result.widgets.push(classified);
    }
    result
}
