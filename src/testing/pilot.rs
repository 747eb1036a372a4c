//! Pilot: drive one headless session synchronously.
//!
//! The `Pilot` connects a [`HeadlessPage`] to a [`Server`] and exposes the
//! navigation events a client would send, plus accessors for the resulting
//! view stack.

use crate::app::App;
use crate::dispatch::{DispatchError, Navigation};
use crate::page::{Host, PageTree};
use crate::session::{EventOutcome, HostEvent, Server, Session};
use crate::widget::Widget;

use super::headless::HeadlessPage;

// ---------------------------------------------------------------------------
// Pilot
// ---------------------------------------------------------------------------

/// A headless client for testing.
///
/// # Examples
///
/// ```ignore
/// use pagebox::testing::Pilot;
///
/// let mut pilot = Pilot::from_app(&mut app, "/")?;
/// pilot.navigate("/users/7")?;
/// assert_eq!(pilot.route(), "/users/7");
/// ```
#[derive(Debug)]
pub struct Pilot {
    session: Session<HeadlessPage>,
}

impl Pilot {
    /// Connect a fresh page at `route`. Fails if the first navigation does.
    pub fn connect(server: &Server, route: &str) -> Result<Self, DispatchError> {
        Self::with_page(server, HeadlessPage::new(route))
    }

    /// Connect an existing page.
    pub fn with_page(server: &Server, page: HeadlessPage) -> Result<Self, DispatchError> {
        let (session, initial) = server.session(page);
        initial?;
        Ok(Self { session })
    }

    /// Serve `app` and connect at `route`.
    pub fn from_app(app: &mut App, route: &str) -> Result<Self, DispatchError> {
        Self::connect(&app.serve(), route)
    }

    // ── Navigation ───────────────────────────────────────────────────

    /// Route change: the view stack is rebuilt for `route`.
    pub fn navigate(&mut self, route: &str) -> Result<Navigation, DispatchError> {
        self.navigated(HostEvent::RouteChange(route.to_owned()))
    }

    /// Push `route` over the current views.
    pub fn push(&mut self, route: &str) -> Result<Navigation, DispatchError> {
        self.navigated(HostEvent::Push(route.to_owned()))
    }

    /// Back navigation. Returns the route now shown.
    pub fn pop(&mut self) -> Option<String> {
        match self.session.handle(HostEvent::ViewPop) {
            Ok(EventOutcome::Popped(route)) => route,
            Ok(EventOutcome::Navigated(nav)) => Some(nav.route),
            Err(_) => None,
        }
    }

    fn navigated(&mut self, event: HostEvent) -> Result<Navigation, DispatchError> {
        match self.session.handle(event)? {
            EventOutcome::Navigated(nav) => Ok(nav),
            EventOutcome::Popped(_) => Err(DispatchError::SessionClosed),
        }
    }

    // ── Query ────────────────────────────────────────────────────────

    pub fn page(&self) -> &HeadlessPage {
        self.session.host()
    }

    pub fn page_mut(&mut self) -> &mut HeadlessPage {
        self.session.host_mut()
    }

    /// The host's current route.
    pub fn route(&self) -> &str {
        self.page().route()
    }

    /// The visible (top) tree.
    pub fn current(&self) -> Option<&PageTree> {
        self.page().views().top()
    }

    /// Routes of the stacked views, bottom first.
    pub fn routes(&self) -> Vec<&str> {
        self.page().views().routes()
    }

    /// First widget of type `W` in the visible tree.
    pub fn find<W: Widget>(&self) -> Option<&W> {
        self.current()?.find::<W>().map(|(_, w)| w)
    }

    /// Outline of the visible tree, or an empty string.
    pub fn outline(&self) -> String {
        self.current().map(PageTree::outline).unwrap_or_default()
    }

    pub fn into_page(self) -> HeadlessPage {
        self.session.into_host()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
