//! Widget registry: the classified base namespace plus extra-element aliases.
//!
//! The registry resolves widget names for name-based construction. Built-in
//! names are bare (`"Column"`). Third-party classes are registered under an
//! alias and addressed as `"alias.Name"`, so they never collide with built-in
//! names.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::builder::{BuildError, Builder};
use crate::widget::{classify, classify_class, ClassifiedWidget, Namespace, SlotAmbiguity, WidgetClass};
use crate::widgets::BUILTIN;

type ClassMap = HashMap<&'static str, ClassifiedWidget>;

/// Resolves widget names to classified widget classes.
#[derive(Debug, Default)]
pub struct Registry {
    base: ClassMap,
    extras: BTreeMap<String, ClassMap>,
    ambiguities: Vec<SlotAmbiguity>,
}

impl Registry {
    /// A registry over the built-in widgets.
    pub fn new() -> Self {
        Self::from_namespace(&BUILTIN)
    }

    /// A registry whose base namespace is `namespace`.
    pub fn from_namespace(namespace: &Namespace) -> Self {
        let classification = classify(namespace);
        let base = classification
            .widgets
            .iter()
            .map(|w| (w.name(), *w))
            .collect();
        Self {
            base,
            extras: BTreeMap::new(),
            ambiguities: classification.ambiguities,
        }
    }

    /// Register every class of `namespace` under `alias` (builder).
    pub fn with_namespace(mut self, alias: &str, namespace: &Namespace) -> Self {
        self.add_namespace(alias, namespace);
        self
    }

    /// Register every class of `namespace` under `alias`. An empty alias
    /// falls back to the namespace name.
    pub fn add_namespace(&mut self, alias: &str, namespace: &Namespace) {
        let alias = if alias.is_empty() { namespace.name } else { alias };
        let classification = classify(namespace);
        let entries = self.extras.entry(alias.to_owned()).or_default();
        for widget in classification.widgets {
            entries.insert(widget.name(), widget);
        }
        self.ambiguities.extend(classification.ambiguities);
    }

    /// Register a single class under `alias` (builder).
    pub fn with_extra(mut self, alias: &str, class: &'static WidgetClass) -> Self {
        self.add_extra(alias, class);
        self
    }

    pub fn add_extra(&mut self, alias: &str, class: &'static WidgetClass) {
        let (widget, ambiguity) = classify_class(class);
        if let Some(ambiguity) = ambiguity {
            tracing::warn!(alias, widget = class.name, %ambiguity, "ambiguous widget slot attributes");
            self.ambiguities.push(ambiguity);
        }
        self.extras
            .entry(alias.to_owned())
            .or_default()
            .insert(class.name, widget);
    }

    /// Resolve `"Name"` or `"alias.Name"`. Names with more than one `.` are
    /// unknown.
    pub fn lookup(&self, name: &str) -> Result<ClassifiedWidget, BuildError> {
        let (classes, short) = match name.split_once('.') {
            Some((alias, short)) => {
                let classes = self
                    .extras
                    .get(alias)
                    .ok_or_else(|| BuildError::UnknownNamespace(alias.to_owned()))?;
                (classes, short)
            }
            None => (&self.base, name),
        };
        if short.contains('.') {
            return Err(BuildError::UnknownWidget(name.to_owned()));
        }
        classes
            .get(short)
            .copied()
            .ok_or_else(|| BuildError::UnknownWidget(name.to_owned()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_ok()
    }

    /// Registered aliases, sorted.
    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.extras.keys().map(String::as_str)
    }

    /// Ambiguities reported while classifying the registered classes.
    pub fn ambiguities(&self) -> &[SlotAmbiguity] {
        &self.ambiguities
    }

    /// A fresh page builder over this registry.
    pub fn builder(self: &Arc<Self>) -> Builder {
        Builder::new(Arc::clone(self))
    }
}
