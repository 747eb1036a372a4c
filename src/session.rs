//! Per-client sessions.
//!
//! A [`Session`] owns one host page and handles its navigation events one at
//! a time. [`Session::spawn`] moves it onto a tokio task fed by an mpsc
//! channel; the returned [`SessionHandle`] sends events and awaits replies.
//! Sessions share nothing but the read-only [`Dispatcher`].

use std::fmt;
use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::app::AppConfig;
use crate::dispatch::{DispatchError, Dispatcher, Navigation};
use crate::page::Host;

/// Navigation events a host delivers to its session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    /// The client asked for a route; rebuild the view stack for it.
    RouteChange(String),
    /// Push a route over the current views.
    Push(String),
    /// The client went back.
    ViewPop,
}

/// Result of handling one [`HostEvent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    Navigated(Navigation),
    /// The route now shown, or `None` when there was nothing to pop.
    Popped(Option<String>),
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// One connected client.
pub struct Session<H: Host> {
    host: H,
    dispatcher: Arc<Dispatcher>,
}

impl<H: Host> Session<H> {
    pub fn new(host: H, dispatcher: Arc<Dispatcher>) -> Self {
        Self { host, dispatcher }
    }

    /// Handle one event to completion.
    pub fn handle(&mut self, event: HostEvent) -> Result<EventOutcome, DispatchError> {
        match event {
            HostEvent::RouteChange(route) => self
                .dispatcher
                .route_change(&mut self.host, &route)
                .map(EventOutcome::Navigated),
            HostEvent::Push(route) => self
                .dispatcher
                .push_route(&mut self.host, &route)
                .map(EventOutcome::Navigated),
            HostEvent::ViewPop => Ok(EventOutcome::Popped(self.dispatcher.view_pop(&mut self.host))),
        }
    }

    /// Navigate to the host's current route.
    pub fn start(&mut self) -> Result<Navigation, DispatchError> {
        let route = self.host.route().to_owned();
        self.dispatcher.route_change(&mut self.host, &route)
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }
}

impl<H: Host + 'static> Session<H> {
    /// Run the session on a tokio task. Must be called within a runtime.
    pub fn spawn(self) -> SessionHandle<H> {
        let (tx, rx) = mpsc::channel(32);
        let task = tokio::spawn(self.run(rx));
        SessionHandle { tx, task }
    }

    async fn run(mut self, mut rx: mpsc::Receiver<Request<H>>) -> H {
        while let Some(request) = rx.recv().await {
            match request {
                Request::Event(event, reply) => {
                    let outcome = self.handle(event);
                    if reply.send(outcome).is_err() {
                        tracing::debug!("session reply dropped by caller");
                    }
                }
                Request::Inspect(f) => f(&mut self.host),
            }
        }
        tracing::debug!("session closed");
        self.host
    }
}

impl<H: Host> fmt::Debug for Session<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("route", &self.host.route())
            .field("views", &self.host.views().len())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// SessionHandle
// ---------------------------------------------------------------------------

type Reply = oneshot::Sender<Result<EventOutcome, DispatchError>>;

enum Request<H> {
    Event(HostEvent, Reply),
    Inspect(Box<dyn FnOnce(&mut H) + Send>),
}

/// Handle to a spawned session.
pub struct SessionHandle<H> {
    tx: mpsc::Sender<Request<H>>,
    task: JoinHandle<H>,
}

impl<H: Host + 'static> SessionHandle<H> {
    /// Deliver an event and wait for it to be handled.
    pub async fn send(&self, event: HostEvent) -> Result<EventOutcome, DispatchError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Request::Event(event, reply))
            .await
            .map_err(|_| DispatchError::SessionClosed)?;
        rx.await.map_err(|_| DispatchError::SessionClosed)?
    }

    /// Route change to `route`.
    pub async fn navigate(&self, route: impl Into<String>) -> Result<Navigation, DispatchError> {
        match self.send(HostEvent::RouteChange(route.into())).await? {
            EventOutcome::Navigated(nav) => Ok(nav),
            EventOutcome::Popped(_) => Err(DispatchError::SessionClosed),
        }
    }

    /// Push `route` over the current views.
    pub async fn push(&self, route: impl Into<String>) -> Result<Navigation, DispatchError> {
        match self.send(HostEvent::Push(route.into())).await? {
            EventOutcome::Navigated(nav) => Ok(nav),
            EventOutcome::Popped(_) => Err(DispatchError::SessionClosed),
        }
    }

    /// Back navigation.
    pub async fn pop(&self) -> Result<Option<String>, DispatchError> {
        match self.send(HostEvent::ViewPop).await? {
            EventOutcome::Popped(route) => Ok(route),
            EventOutcome::Navigated(nav) => Ok(Some(nav.route)),
        }
    }

    /// Run `f` against the session's host between events.
    pub async fn with_host<R>(&self, f: impl FnOnce(&mut H) -> R + Send + 'static) -> Result<R, DispatchError>
    where
        R: Send + 'static,
    {
        let (reply, rx) = oneshot::channel();
        let job = Box::new(move |host: &mut H| {
            let _ = reply.send(f(host));
        });
        self.tx
            .send(Request::Inspect(job))
            .await
            .map_err(|_| DispatchError::SessionClosed)?;
        rx.await.map_err(|_| DispatchError::SessionClosed)
    }

    /// Stop the session and get the host back.
    pub async fn close(self) -> Result<H, DispatchError> {
        drop(self.tx);
        self.task.await.map_err(|_| DispatchError::SessionClosed)
    }
}

impl<H> fmt::Debug for SessionHandle<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionHandle")
            .field("closed", &self.tx.is_closed())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Server
// ---------------------------------------------------------------------------

/// Per-session setup callback run against each new host before the first
/// navigation.
pub type ConnectFn = Arc<dyn Fn(&mut dyn Host) + Send + Sync>;

/// A served application: the frozen route table plus the connect callback.
#[derive(Clone)]
pub struct Server {
    dispatcher: Arc<Dispatcher>,
    on_connect: ConnectFn,
    config: Arc<AppConfig>,
}

impl Server {
    pub fn new(dispatcher: Arc<Dispatcher>, on_connect: ConnectFn, config: AppConfig) -> Self {
        Self {
            dispatcher,
            on_connect,
            config: Arc::new(config),
        }
    }

    pub fn dispatcher(&self) -> &Arc<Dispatcher> {
        &self.dispatcher
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Set up a session for `host` without spawning it: run the connect
    /// callback, then navigate to the host's current route.
    pub fn session<H: Host>(&self, mut host: H) -> (Session<H>, Result<Navigation, DispatchError>) {
        (self.on_connect)(&mut host);
        let mut session = Session::new(host, Arc::clone(&self.dispatcher));
        let initial = session.start();
        if let Err(err) = &initial {
            tracing::warn!(route = session.host().route(), error = %err, "initial navigation failed");
        }
        (session, initial)
    }

    /// Set up a session for `host` and spawn it. Must be called within a
    /// tokio runtime.
    pub fn connect<H: Host + 'static>(&self, host: H) -> (SessionHandle<H>, Result<Navigation, DispatchError>) {
        let (session, initial) = self.session(host);
        (session.spawn(), initial)
    }
}

impl fmt::Debug for Server {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Server")
            .field("dispatcher", &self.dispatcher)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
