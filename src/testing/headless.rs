//! In-memory host page and runtime.

use std::convert::Infallible;

use crate::app::{AppConfig, Runtime};
use crate::dispatch::{DispatchError, Navigation};
use crate::page::{Host, ViewStack};
use crate::session::{Server, Session};

// ---------------------------------------------------------------------------
// HeadlessPage
// ---------------------------------------------------------------------------

/// A host page with no client behind it.
///
/// `go` updates the current route and appends it to [`history`](Self::history).
#[derive(Debug, Default)]
pub struct HeadlessPage {
    route: String,
    views: ViewStack,
    history: Vec<String>,
    client_addr: Option<String>,
}

impl HeadlessPage {
    /// A page whose client initially asked for `route`.
    pub fn new(route: impl Into<String>) -> Self {
        Self {
            route: route.into(),
            ..Self::default()
        }
    }

    /// Set the reported client address (builder).
    pub fn with_client_addr(mut self, addr: impl Into<String>) -> Self {
        self.client_addr = Some(addr.into());
        self
    }

    /// Every route passed to `go`, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }
}

impl Host for HeadlessPage {
    fn route(&self) -> &str {
        &self.route
    }

    fn views(&self) -> &ViewStack {
        &self.views
    }

    fn views_mut(&mut self) -> &mut ViewStack {
        &mut self.views
    }

    fn go(&mut self, route: &str) {
        self.route = route.to_owned();
        self.history.push(route.to_owned());
    }

    fn client_addr(&self) -> Option<&str> {
        self.client_addr.as_deref()
    }
}

// ---------------------------------------------------------------------------
// HeadlessRuntime
// ---------------------------------------------------------------------------

/// A runtime that keeps the launched server and opens a session per queued
/// client route.
#[derive(Debug, Default)]
pub struct HeadlessRuntime {
    clients: Vec<String>,
    launched: Option<(AppConfig, Server)>,
    sessions: Vec<Session<HeadlessPage>>,
    initial: Vec<Result<Navigation, DispatchError>>,
}

impl HeadlessRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a client that connects at `route` when launched (builder).
    pub fn with_client(mut self, route: impl Into<String>) -> Self {
        self.clients.push(route.into());
        self
    }

    /// The server handed to [`Runtime::launch`], if any.
    pub fn launched(&self) -> Option<&Server> {
        self.launched.as_ref().map(|(_, server)| server)
    }

    /// The config passed at launch.
    pub fn launch_config(&self) -> Option<&AppConfig> {
        self.launched.as_ref().map(|(config, _)| config)
    }

    /// Sessions opened for the queued clients, in queue order.
    pub fn sessions(&self) -> &[Session<HeadlessPage>] {
        &self.sessions
    }

    pub fn sessions_mut(&mut self) -> &mut [Session<HeadlessPage>] {
        &mut self.sessions
    }

    /// Outcome of each session's first navigation.
    pub fn initial(&self) -> &[Result<Navigation, DispatchError>] {
        &self.initial
    }
}

impl Runtime for HeadlessRuntime {
    type Error = Infallible;

    fn launch(&mut self, config: &AppConfig, server: Server) -> Result<(), Infallible> {
        for route in self.clients.drain(..) {
            let (session, initial) = server.session(HeadlessPage::new(route));
            self.sessions.push(session);
            self.initial.push(initial);
        }
        self.launched = Some((config.clone(), server));
        Ok(())
    }
}

// ===========================================================================
// Tests
// ===========================================================================
