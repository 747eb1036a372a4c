//! App struct: route registration, configuration, serving.
//!
//! [`App`] collects page functions by path, then [`App::serve`] freezes them
//! into a [`Server`]. [`App::run`] hands that server to a host [`Runtime`],
//! which connects clients and feeds their navigation events to sessions.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;

use crate::dispatch::{page_fn, Dispatcher, PageContext, PageError, PageFn, PageOutput};
use crate::page::Host;
use crate::registry::Registry;
use crate::router::{RouteError, Router};
use crate::session::{ConnectFn, Server};

/// Errors from configuration parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}: expected {expected}")]
    InvalidValue {
        key: String,
        value: String,
        expected: &'static str,
    },
}

impl ConfigError {
    fn invalid(key: &str, value: &str, expected: &'static str) -> Self {
        ConfigError::InvalidValue {
            key: key.to_owned(),
            value: value.to_owned(),
            expected,
        }
    }
}

// ---------------------------------------------------------------------------
// AppView / WebRenderer
// ---------------------------------------------------------------------------

/// How the host presents the application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AppView {
    #[default]
    WebBrowser,
    Desktop,
}

impl fmt::Display for AppView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AppView::WebBrowser => "web_browser",
            AppView::Desktop => "desktop",
        })
    }
}

impl FromStr for AppView {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "web_browser" | "web" | "browser" => Ok(AppView::WebBrowser),
            "desktop" => Ok(AppView::Desktop),
            _ => Err(ConfigError::invalid("view", s, "web_browser or desktop")),
        }
    }
}

/// Renderer used by web clients.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WebRenderer {
    #[default]
    Html,
    CanvasKit,
}

impl fmt::Display for WebRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WebRenderer::Html => "html",
            WebRenderer::CanvasKit => "canvaskit",
        })
    }
}

impl FromStr for WebRenderer {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "html" => Ok(WebRenderer::Html),
            "canvaskit" | "canvas_kit" => Ok(WebRenderer::CanvasKit),
            _ => Err(ConfigError::invalid("web_renderer", s, "html or canvaskit")),
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig
// ---------------------------------------------------------------------------

/// Configuration for the application.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub view: AppView,
    pub renderer: WebRenderer,
    /// Port web hosts listen on.
    pub port: u16,
    /// Route shown when nothing else matches.
    pub catch_all: Option<String>,
    /// Log every navigation at `info` level.
    pub verbose: bool,
    /// Host-specific settings passed through untouched.
    pub options: BTreeMap<String, String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            view: AppView::default(),
            renderer: WebRenderer::default(),
            port: 8550,
            catch_all: None,
            verbose: true,
            options: BTreeMap::new(),
        }
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_view(mut self, view: AppView) -> Self {
        self.view = view;
        self
    }

    pub fn with_renderer(mut self, renderer: WebRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_catch_all(mut self, route: impl Into<String>) -> Self {
        self.catch_all = Some(route.into());
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Set a passthrough option (builder).
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Set a setting by name. Known keys are parsed into their fields,
    /// anything else is kept in `options`.
    pub fn set_option(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "view" => self.view = value.parse()?,
            "web_renderer" | "renderer" => self.renderer = value.parse()?,
            "port" => {
                self.port = value
                    .parse()
                    .map_err(|_| ConfigError::invalid(key, value, "a port number"))?;
            }
            "catch_all" | "catchall" => {
                self.catch_all = (!value.is_empty()).then(|| value.to_owned());
            }
            "verbose" => {
                self.verbose = value
                    .parse()
                    .map_err(|_| ConfigError::invalid(key, value, "true or false"))?;
            }
            _ => {
                self.options.insert(key.to_owned(), value.to_owned());
            }
        }
        Ok(())
    }

    /// Apply several settings in order. Stops at the first invalid one.
    pub fn merge<I, K, V>(&mut self, overrides: I) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (key, value) in overrides {
            self.set_option(key.as_ref(), value.as_ref())?;
        }
        Ok(())
    }

    pub fn option(&self, key: &str) -> Option<&str> {
        self.options.get(key).map(String::as_str)
    }
}

// ---------------------------------------------------------------------------
// Runtime
// ---------------------------------------------------------------------------

/// The host toolkit's application entry point.
pub trait Runtime {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Start serving. Implementations connect clients through
    /// [`Server::connect`] or [`Server::session`].
    fn launch(&mut self, config: &AppConfig, server: Server) -> Result<(), Self::Error>;
}

/// Errors from [`App::run`].
#[derive(Debug, thiserror::Error)]
pub enum RunError<E: std::error::Error + 'static> {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("runtime failed: {0}")]
    Runtime(#[source] E),
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

/// The application: registered routes, widget registry, configuration.
pub struct App {
    config: AppConfig,
    registry: Arc<Registry>,
    router: Router,
    on_connect: ConnectFn,
    created: Instant,
}

impl App {
    /// An app over the built-in widgets.
    pub fn new(config: AppConfig) -> Self {
        Self::with_registry(config, Registry::new())
    }

    /// An app whose builders resolve names through `registry`.
    pub fn with_registry(config: AppConfig, registry: Registry) -> Self {
        Self {
            config,
            registry: Arc::new(registry),
            router: Router::new(),
            on_connect: Arc::new(|_: &mut dyn Host| {}),
            created: Instant::now(),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut AppConfig {
        &mut self.config
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Register a page function for `path`. The latest registration for a
    /// path wins.
    pub fn view<F, R>(&mut self, path: &str, page: F) -> Result<&mut Self, RouteError>
    where
        F: Fn(&mut PageContext<'_>) -> Result<R, PageError> + Send + Sync + 'static,
        R: PageOutput,
    {
        self.view_fn(path, page_fn(page))
    }

    /// Register an already boxed page function.
    pub fn view_fn(&mut self, path: &str, page: Arc<dyn PageFn>) -> Result<&mut Self, RouteError> {
        self.router.register(path, page)?;
        Ok(self)
    }

    /// Set the callback run against every new host before its first
    /// navigation.
    pub fn on_connect(&mut self, target: impl Fn(&mut dyn Host) + Send + Sync + 'static) -> &mut Self {
        self.on_connect = Arc::new(target);
        self
    }

    /// Freeze the current routes into a server. Routes registered later are
    /// picked up by the next call.
    pub fn serve(&mut self) -> Server {
        self.router.set_catch_all(self.config.catch_all.clone());
        let table = self.router.finalize();
        let dispatcher = Dispatcher::new(table, Arc::clone(&self.registry)).with_verbose(self.config.verbose);
        Server::new(Arc::new(dispatcher), Arc::clone(&self.on_connect), self.config.clone())
    }

    /// Serve and launch on `runtime`.
    pub fn run<R: Runtime>(&mut self, runtime: &mut R) -> Result<(), RunError<R::Error>> {
        self.run_with(runtime, std::iter::empty::<(&str, &str)>())
    }

    /// Apply option overrides, then serve and launch on `runtime`.
    pub fn run_with<R, I, K, V>(&mut self, runtime: &mut R, overrides: I) -> Result<(), RunError<R::Error>>
    where
        R: Runtime,
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.config.merge(overrides)?;
        let server = self.serve();
        tracing::info!(
            routes = self.router.len(),
            paths = ?self.router.paths().collect::<Vec<_>>(),
            view = %self.config.view,
            port = self.config.port,
            elapsed_ms = self.created.elapsed().as_secs_f64() * 1000.0,
            "setup completed"
        );
        runtime.launch(&self.config, server).map_err(RunError::Runtime)
    }
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("config", &self.config)
            .field("router", &self.router)
            .finish_non_exhaustive()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::RouteState;
    use crate::testing::{HeadlessPage, HeadlessRuntime};
    use crate::widgets::Text;
    use tracing_test::traced_test;

    #[test]
    fn config_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.view, AppView::WebBrowser);
        assert_eq!(config.renderer, WebRenderer::Html);
        assert_eq!(config.port, 8550);
        assert_eq!(config.catch_all, None);
        assert!(config.verbose);
        assert!(config.options.is_empty());
    }

    #[test]
    fn config_builder() {
        let config = AppConfig::new()
            .with_view(AppView::Desktop)
            .with_renderer(WebRenderer::CanvasKit)
            .with_port(9000)
            .with_catch_all("/404")
            .with_verbose(false)
            .with_option("assets_dir", "assets");
        assert_eq!(config.view, AppView::Desktop);
        assert_eq!(config.port, 9000);
        assert_eq!(config.catch_all.as_deref(), Some("/404"));
        assert_eq!(config.option("assets_dir"), Some("assets"));
    }

    #[test]
    fn enums_parse_and_display() {
        assert_eq!("desktop".parse::<AppView>(), Ok(AppView::Desktop));
        assert_eq!("WEB_BROWSER".parse::<AppView>(), Ok(AppView::WebBrowser));
        assert_eq!("canvas_kit".parse::<WebRenderer>(), Ok(WebRenderer::CanvasKit));
        assert_eq!(AppView::Desktop.to_string(), "desktop");
        assert_eq!(WebRenderer::CanvasKit.to_string(), "canvaskit");
        assert!("tv".parse::<AppView>().is_err());
    }

    #[test]
    fn merge_parses_known_keys_and_passes_the_rest() {
        let mut config = AppConfig::default();
        config
            .merge([
                ("port", "8080"),
                ("view", "desktop"),
                ("catchall", "/"),
                ("verbose", "false"),
                ("assets_dir", "static"),
            ])
            .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.view, AppView::Desktop);
        assert_eq!(config.catch_all.as_deref(), Some("/"));
        assert!(!config.verbose);
        assert_eq!(config.option("assets_dir"), Some("static"));
    }

    #[test]
    fn merge_rejects_bad_values() {
        let mut config = AppConfig::default();
        let err = config.merge([("port", "eighty")]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid value \"eighty\" for port: expected a port number"
        );
        assert_eq!(config.port, 8550);
    }

    #[test]
    fn serve_refinalizes_routes() {
        let mut app = App::new(AppConfig::default());
        app.view("/", |cx| {
            cx.builder.add(Text::new("home"))?;
            Ok(())
        })
        .unwrap();
        let first = app.serve();
        assert_eq!(app.router().state("/"), RouteState::Active);

        app.view("/late", |_| Ok(())).unwrap();
        assert_eq!(app.router().state("/late"), RouteState::Registered);
        assert!(first.dispatcher().table().resolve("/late").is_err());

        let second = app.serve();
        assert!(second.dispatcher().table().resolve("/late").is_ok());
        assert_eq!(app.router().state("/late"), RouteState::Active);
    }

    #[test]
    fn serve_uses_configured_catch_all() {
        let mut app = App::new(AppConfig::default().with_catch_all("/"));
        app.view("/", |_| Ok(())).unwrap();
        let server = app.serve();
        let (session, initial) = server.session(HeadlessPage::new("/missing"));
        assert_eq!(initial.unwrap().pattern, "/");
        assert_eq!(session.host().views().routes(), vec!["/missing"]);
    }

    #[test]
    fn on_connect_runs_per_session() {
        let mut app = App::new(AppConfig::default());
        app.view("/", |_| Ok(())).unwrap();
        app.view("/start", |_| Ok(())).unwrap();
        app.on_connect(|host| host.go("/start"));
        let server = app.serve();
        let (session, _) = server.session(HeadlessPage::new("/"));
        assert_eq!(session.host().views().routes(), vec!["/start"]);
    }

    #[test]
    fn run_launches_with_overrides() {
        let mut app = App::new(AppConfig::default());
        app.view("/", |_| Ok(())).unwrap();
        let mut runtime = HeadlessRuntime::new();
        app.run_with(&mut runtime, [("port", "9100"), ("theme", "dark")])
            .unwrap();

        let launched = runtime.launched().unwrap();
        assert_eq!(launched.config().port, 9100);
        assert_eq!(launched.config().option("theme"), Some("dark"));
        assert_eq!(app.config().port, 9100);
    }

    #[test]
    #[traced_test]
    fn setup_log_lists_routes() {
        let mut app = App::new(AppConfig::default());
        app.view("/", |_| Ok(())).unwrap();
        app.view("/about", |_| Ok(())).unwrap();
        app.run(&mut HeadlessRuntime::new()).unwrap();

        assert!(logs_contain("setup completed"));
        assert!(logs_contain(r#"paths=["/", "/about"]"#));
    }

    #[test]
    fn run_surfaces_config_errors() {
        let mut app = App::new(AppConfig::default());
        let mut runtime = HeadlessRuntime::new();
        let err = app.run_with(&mut runtime, [("verbose", "maybe")]).unwrap_err();
        assert!(matches!(err, RunError::Config(_)));
        assert!(runtime.launched().is_none());
    }

    #[test]
    fn invalid_view_path() {
        let mut app = App::new(AppConfig::default());
        assert!(app.view("relative", |_| Ok(())).is_err());
    }
}
