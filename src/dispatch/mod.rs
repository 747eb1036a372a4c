//! Dispatcher: turns host navigation events into built page trees.
//!
//! On a route change the dispatcher clears the host's view stack, resolves
//! the route, runs the page function against a fresh builder, tags the tree
//! with the route, pushes it and tells the host to show it. Back navigation
//! pops the top view and re-shows the one below without rebuilding it.

pub mod context;

pub use context::{page_fn, PageContext, PageError, PageFn, PageOutput};

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::builder::Builder;
use crate::page::Host;
use crate::registry::Registry;
use crate::router::{RouteError, RouteTable};

/// Errors surfaced by navigation.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error(transparent)]
    Route(#[from] RouteError),
    #[error("page {route} failed: {source}")]
    Page {
        route: String,
        #[source]
        source: PageError,
    },
    #[error("session closed")]
    SessionClosed,
}

/// Report of one completed navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    /// The concrete route the tree was built for.
    pub route: String,
    /// The pattern that matched it.
    pub pattern: String,
    /// Widgets in the new tree, root included.
    pub nodes: usize,
    /// View stack height afterwards.
    pub depth: usize,
    pub elapsed: Duration,
}

/// Shared, read-only navigation logic. One per served application.
#[derive(Debug)]
pub struct Dispatcher {
    table: Arc<RouteTable>,
    registry: Arc<Registry>,
    verbose: bool,
}

impl Dispatcher {
    pub fn new(table: Arc<RouteTable>, registry: Arc<Registry>) -> Self {
        Self {
            table,
            registry,
            verbose: true,
        }
    }

    /// Log navigations at `info` instead of `debug` (builder).
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn table(&self) -> &Arc<RouteTable> {
        &self.table
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Replace the view stack with a freshly built tree for `route`.
    ///
    /// On error the view stack is left empty and the partial tree is dropped.
    pub fn route_change(&self, host: &mut dyn Host, route: &str) -> Result<Navigation, DispatchError> {
        host.views_mut().clear();
        self.build_and_show(host, route)
    }

    /// Build `route` and push it over the current views, keeping them for
    /// back navigation.
    pub fn push_route(&self, host: &mut dyn Host, route: &str) -> Result<Navigation, DispatchError> {
        self.build_and_show(host, route)
    }

    /// Pop the top view and show the one below, reusing its tree.
    ///
    /// Returns the route now shown. With one view or none left this is a
    /// no-op that returns `None`.
    pub fn view_pop(&self, host: &mut dyn Host) -> Option<String> {
        if host.views().len() <= 1 {
            tracing::warn!(views = host.views().len(), "view pop ignored: no view to return to");
            return None;
        }
        let popped = host.views_mut().pop();
        let top = host.views().top()?.route()?.to_owned();
        tracing::debug!(
            popped = popped.as_ref().and_then(|t| t.route()),
            top = top.as_str(),
            "view popped"
        );
        host.go(&top);
        Some(top)
    }

    fn build_and_show(&self, host: &mut dyn Host, route: &str) -> Result<Navigation, DispatchError> {
        let start = Instant::now();
        let matched = self.table.resolve(route)?;

        let mut cx = PageContext {
            page: &mut *host,
            builder: Builder::new(Arc::clone(&self.registry)),
            route,
            params: &matched.params,
        };
        let returned = matched
            .page
            .call(&mut cx)
            .map_err(|source| DispatchError::Page {
                route: route.to_owned(),
                source,
            })?;
        let PageContext { builder, .. } = cx;
        let builder = returned.unwrap_or(builder);

        let (mut tree, postexec) = builder.finish();
        tree.set_route(route);
        let nodes = tree.len();
        host.views_mut().push(tree);
        host.go(route);
        if let Some(postexec) = postexec {
            postexec(&mut *host);
        }

        let navigation = Navigation {
            route: route.to_owned(),
            pattern: matched.pattern.to_owned(),
            nodes,
            depth: host.views().len(),
            elapsed: start.elapsed(),
        };
        self.log(&*host, &navigation);
        Ok(navigation)
    }

    fn log(&self, host: &dyn Host, nav: &Navigation) {
        let client = host.client_addr().unwrap_or("-");
        let elapsed_ms = nav.elapsed.as_secs_f64() * 1000.0;
        if self.verbose {
            tracing::info!(
                route = nav.route.as_str(),
                pattern = nav.pattern.as_str(),
                nodes = nav.nodes,
                elapsed_ms,
                client,
                "route changed"
            );
        } else {
            tracing::debug!(
                route = nav.route.as_str(),
                pattern = nav.pattern.as_str(),
                nodes = nav.nodes,
                elapsed_ms,
                client,
                "route changed"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::router::Router;
    use crate::testing::HeadlessPage;
    use crate::widgets::{Column, Text};

    fn dispatcher(configure: impl FnOnce(&mut Router)) -> Dispatcher {
        let mut router = Router::new();
        configure(&mut router);
        Dispatcher::new(router.finalize(), Arc::new(Registry::new())).with_verbose(false)
    }

    fn text_page(text: &'static str) -> Arc<dyn PageFn> {
        page_fn(move |cx| {
            cx.builder.add(Text::new(text))?;
            Ok(())
        })
    }

    #[test]
    fn route_change_builds_and_shows() {
        let d = dispatcher(|r| {
            r.register("/users/{id}", page_fn(|cx| {
                let id = cx.param("id")?.to_owned();
                cx.builder.add(Text::new(format!("user {id}")))?;
                Ok(())
            }))
            .unwrap();
        });
        let mut host = HeadlessPage::new("/");
        let nav = d.route_change(&mut host, "/users/42").unwrap();

        assert_eq!(nav.pattern, "/users/{id}");
        assert_eq!(nav.route, "/users/42");
        assert_eq!(nav.nodes, 2);
        assert_eq!(host.route(), "/users/42");
        assert_eq!(host.history(), &["/users/42".to_string()]);
        let tree = host.views().top().unwrap();
        assert_eq!(tree.route(), Some("/users/42"));
        assert_eq!(tree.find::<Text>().unwrap().1.value, "user 42");
    }

    #[test]
    fn route_change_replaces_stack() {
        let d = dispatcher(|r| {
            r.register("/a", text_page("a")).unwrap();
            r.register("/b", text_page("b")).unwrap();
        });
        let mut host = HeadlessPage::new("/");
        d.route_change(&mut host, "/a").unwrap();
        d.route_change(&mut host, "/b").unwrap();
        assert_eq!(host.views().routes(), vec!["/b"]);
    }

    #[test]
    fn returned_builder_is_used() {
        let d = dispatcher(|r| {
            r.register("/", page_fn(|cx| {
                cx.builder.add(Text::new("discarded"))?;
                let mut other = cx.fresh_builder();
                other.add(Column::new())?;
                Ok(other)
            }))
            .unwrap();
        });
        let mut host = HeadlessPage::new("/");
        d.route_change(&mut host, "/").unwrap();
        let tree = host.views().top().unwrap();
        assert!(tree.find::<Text>().is_none());
        assert!(tree.find::<Column>().is_some());
        assert_eq!(tree.route(), Some("/"));
    }

    #[test]
    fn page_error_leaves_stack_cleared() {
        let d = dispatcher(|r| {
            r.register("/ok", text_page("ok")).unwrap();
            r.register("/bad", page_fn(|_| -> Result<(), PageError> {
                Err(PageError::msg("boom"))
            }))
            .unwrap();
        });
        let mut host = HeadlessPage::new("/");
        d.route_change(&mut host, "/ok").unwrap();
        let err = d.route_change(&mut host, "/bad").unwrap_err();
        assert!(matches!(err, DispatchError::Page { ref route, .. } if route == "/bad"));
        assert!(host.views().is_empty());
        assert_eq!(host.history(), &["/ok".to_string()]);
    }

    #[test]
    fn unmatched_route_is_route_error() {
        let d = dispatcher(|r| r.register("/", text_page("home")).unwrap());
        let mut host = HeadlessPage::new("/");
        let err = d.route_change(&mut host, "/nope").unwrap_err();
        assert!(matches!(
            err,
            DispatchError::Route(RouteError::NoRouteMatched { .. })
        ));
    }

    #[test]
    fn postexec_runs_after_tree_is_live() {
        static SEEN_VIEWS: AtomicUsize = AtomicUsize::new(0);
        let d = dispatcher(|r| {
            r.register("/", page_fn(|cx| {
                cx.builder.postexec(|host| {
                    SEEN_VIEWS.store(host.views().len(), Ordering::SeqCst);
                });
                Ok(())
            }))
            .unwrap();
        });
        let mut host = HeadlessPage::new("/");
        d.route_change(&mut host, "/").unwrap();
        assert_eq!(SEEN_VIEWS.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn pop_reuses_retained_tree() {
        static BUILDS: AtomicUsize = AtomicUsize::new(0);
        let d = dispatcher(|r| {
            r.register("/", page_fn(|_| {
                BUILDS.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }))
            .unwrap();
            r.register("/detail", text_page("detail")).unwrap();
        });
        let mut host = HeadlessPage::new("/");
        d.route_change(&mut host, "/").unwrap();
        d.push_route(&mut host, "/detail").unwrap();
        assert_eq!(host.views().routes(), vec!["/", "/detail"]);

        assert_eq!(d.view_pop(&mut host).as_deref(), Some("/"));
        assert_eq!(host.route(), "/");
        assert_eq!(host.views().len(), 1);
        assert_eq!(BUILDS.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn pop_on_last_view_is_noop() {
        let d = dispatcher(|r| r.register("/", text_page("home")).unwrap());
        let mut host = HeadlessPage::new("/");
        assert_eq!(d.view_pop(&mut host), None);
        d.route_change(&mut host, "/").unwrap();
        assert_eq!(d.view_pop(&mut host), None);
        assert_eq!(host.views().len(), 1);
    }
}
