//! Route registration and the immutable route table.
//!
//! A [`Router`] collects `(pattern, page)` registrations. `finalize` takes a
//! snapshot into a [`RouteTable`] that sessions share read-only. Paths move
//! through `Unregistered → Registered → Active`; a path registered after the
//! last snapshot stays `Registered` until the next one.

use std::fmt;
use std::sync::Arc;

use super::params::Params;
use super::pattern::{Matcher, PathPattern, RouteError};
use crate::dispatch::PageFn;

/// Lifecycle state of a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteState {
    Unregistered,
    Registered,
    /// Part of the table currently being served.
    Active,
}

struct RouteEntry {
    pattern: PathPattern,
    page: Arc<dyn PageFn>,
    /// Registered or replaced since the last `finalize`.
    dirty: bool,
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Mutable route registry.
#[derive(Default)]
pub struct Router {
    entries: Vec<RouteEntry>,
    catch_all: Option<String>,
    active: Option<Arc<RouteTable>>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route to fall back to when nothing matches (builder).
    pub fn with_catch_all(mut self, route: impl Into<String>) -> Self {
        self.set_catch_all(Some(route.into()));
        self
    }

    pub fn set_catch_all(&mut self, route: Option<String>) {
        self.catch_all = route;
    }

    pub fn catch_all(&self) -> Option<&str> {
        self.catch_all.as_deref()
    }

    /// Register `page` for `path`. Registering the same path again replaces
    /// the page in place.
    pub fn register(&mut self, path: &str, page: Arc<dyn PageFn>) -> Result<(), RouteError> {
        let pattern = PathPattern::parse(path)?;
        if let Some(entry) = self.entries.iter_mut().find(|e| e.pattern.as_str() == path) {
            tracing::debug!(path, "route re-registered; replacing page");
            entry.page = page;
            entry.dirty = true;
        } else {
            self.entries.push(RouteEntry {
                pattern,
                page,
                dirty: true,
            });
        }
        Ok(())
    }

    /// Snapshot the registered routes into a new active table.
    pub fn finalize(&mut self) -> Arc<RouteTable> {
        for entry in &mut self.entries {
            entry.dirty = false;
        }
        let patterns = self.entries.iter().map(|e| e.pattern.clone()).collect();
        let table = Arc::new(RouteTable {
            matcher: Matcher::from_patterns(patterns, self.catch_all.clone()),
            pages: self.entries.iter().map(|e| Arc::clone(&e.page)).collect(),
        });
        tracing::debug!(routes = table.len(), catch_all = ?self.catch_all, "route table finalized");
        self.active = Some(Arc::clone(&table));
        table
    }

    /// The table taken by the last `finalize`, if any.
    pub fn active(&self) -> Option<&Arc<RouteTable>> {
        self.active.as_ref()
    }

    /// Lifecycle state of `path`. A path replaced since the last
    /// `finalize` is `Registered` until the next one.
    pub fn state(&self, path: &str) -> RouteState {
        let Some(entry) = self.entries.iter().find(|e| e.pattern.as_str() == path) else {
            return RouteState::Unregistered;
        };
        let served = self.active.as_ref().is_some_and(|t| t.contains(path));
        if served && !entry.dirty {
            RouteState::Active
        } else {
            RouteState::Registered
        }
    }

    /// Registered paths in registration order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.pattern.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("paths", &self.paths().collect::<Vec<_>>())
            .field("catch_all", &self.catch_all)
            .field("active", &self.active.is_some())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// RouteTable
// ---------------------------------------------------------------------------

/// Immutable snapshot of the registered routes.
pub struct RouteTable {
    matcher: Matcher,
    /// Parallel to `matcher.patterns()`.
    pages: Vec<Arc<dyn PageFn>>,
}

/// A resolved route.
pub struct RouteMatch<'t> {
    pub pattern: &'t str,
    pub params: Params,
    pub page: &'t dyn PageFn,
}

impl RouteTable {
    /// Find the page for `route`.
    pub fn resolve(&self, route: &str) -> Result<RouteMatch<'_>, RouteError> {
        let (index, params) = self.matcher.match_index(route)?;
        let page = self
            .pages
            .get(index)
            .ok_or_else(|| RouteError::NoRouteMatched {
                route: route.to_owned(),
            })?;
        Ok(RouteMatch {
            pattern: self.matcher.patterns()[index].as_str(),
            params,
            page: page.as_ref(),
        })
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    pub fn contains(&self, path: &str) -> bool {
        self.matcher.patterns().iter().any(|p| p.as_str() == path)
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.matcher.patterns().iter().map(PathPattern::as_str)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

impl fmt::Debug for RouteTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteTable")
            .field("paths", &self.paths().collect::<Vec<_>>())
            .field("catch_all", &self.matcher.catch_all())
            .finish()
    }
}

impl fmt::Debug for RouteMatch<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteMatch")
            .field("pattern", &self.pattern)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::{page_fn, PageContext, PageError};
    use crate::widgets::Text;

    fn label(text: &'static str) -> Arc<dyn PageFn> {
        page_fn(move |cx: &mut PageContext<'_>| -> Result<(), PageError> {
            cx.builder.add(Text::new(text))?;
            Ok(())
        })
    }

    fn page_label(table: &RouteTable, route: &str) -> String {
        let registry = Arc::new(crate::registry::Registry::new());
        let matched = table.resolve(route).unwrap();
        let mut host = crate::testing::HeadlessPage::new(route);
        let mut cx = PageContext {
            page: &mut host,
            builder: registry.builder(),
            route,
            params: &matched.params,
        };
        matched.page.call(&mut cx).unwrap();
        let (tree, _) = cx.builder.finish();
        tree.find::<Text>().map(|(_, t)| t.value.clone()).unwrap_or_default()
    }

    #[test]
    fn lifecycle_states() {
        let mut router = Router::new();
        assert_eq!(router.state("/"), RouteState::Unregistered);
        router.register("/", label("home")).unwrap();
        assert_eq!(router.state("/"), RouteState::Registered);
        router.finalize();
        assert_eq!(router.state("/"), RouteState::Active);

        router.register("/late", label("late")).unwrap();
        assert_eq!(router.state("/late"), RouteState::Registered);
        router.finalize();
        assert_eq!(router.state("/late"), RouteState::Active);
    }

    #[test]
    fn reregistration_replaces_in_place() {
        let mut router = Router::new();
        router.register("/a", label("first")).unwrap();
        router.register("/b", label("b")).unwrap();
        router.register("/a", label("second")).unwrap();
        assert_eq!(router.paths().collect::<Vec<_>>(), vec!["/a", "/b"]);

        let table = router.finalize();
        assert_eq!(table.len(), 2);
        assert_eq!(page_label(&table, "/a"), "second");
    }

    #[test]
    fn replaced_route_is_registered_until_next_finalize() {
        let mut router = Router::new();
        router.register("/a", label("first")).unwrap();
        let served = router.finalize();
        assert_eq!(router.state("/a"), RouteState::Active);

        router.register("/a", label("second")).unwrap();
        assert_eq!(router.state("/a"), RouteState::Registered);
        assert!(Arc::ptr_eq(router.active().unwrap(), &served));
        assert_eq!(page_label(&served, "/a"), "first");

        let table = router.finalize();
        assert_eq!(router.state("/a"), RouteState::Active);
        assert_eq!(page_label(&table, "/a"), "second");
    }

    #[test]
    fn invalid_pattern_is_rejected_at_registration() {
        let mut router = Router::new();
        let err = router.register("no-slash", label("x")).unwrap_err();
        assert!(matches!(err, RouteError::InvalidPattern { .. }));
        assert!(router.is_empty());
    }

    #[test]
    fn snapshot_is_unaffected_by_later_registration() {
        let mut router = Router::new();
        router.register("/", label("home")).unwrap();
        let table = router.finalize();
        router.register("/new", label("new")).unwrap();
        assert!(table.resolve("/new").is_err());
        assert!(router.finalize().resolve("/new").is_ok());
    }

    #[test]
    fn resolve_with_catch_all() {
        let mut router = Router::new().with_catch_all("/404");
        router.register("/users/{id}", label("user")).unwrap();
        router.register("/404", label("missing")).unwrap();
        let table = router.finalize();

        let matched = table.resolve("/users/9").unwrap();
        assert_eq!(matched.pattern, "/users/{id}");
        assert_eq!(matched.params.get("id"), Some("9"));
        assert_eq!(page_label(&table, "/nope"), "missing");
    }

    #[test]
    fn resolve_without_match() {
        let mut router = Router::new();
        router.register("/", label("home")).unwrap();
        let table = router.finalize();
        assert_eq!(
            table.resolve("/x").unwrap_err(),
            RouteError::NoRouteMatched { route: "/x".into() }
        );
    }
}
