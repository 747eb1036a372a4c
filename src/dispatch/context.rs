//! Page functions and the context they receive.

use std::error::Error as StdError;
use std::str::FromStr;
use std::sync::Arc;

use crate::builder::{BuildError, Builder};
use crate::page::Host;
use crate::router::{ParamError, Params};

/// Errors a page function may return.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error(transparent)]
    Build(#[from] BuildError),
    #[error(transparent)]
    Param(#[from] ParamError),
    #[error("{0}")]
    Message(String),
    #[error("{0}")]
    Other(#[source] Box<dyn StdError + Send + Sync>),
}

impl PageError {
    pub fn msg(message: impl Into<String>) -> Self {
        PageError::Message(message.into())
    }

    pub fn other(err: impl StdError + Send + Sync + 'static) -> Self {
        PageError::Other(Box::new(err))
    }
}

/// Everything a page function gets for one navigation.
///
/// `page` is the host page object, `builder` the fresh builder for this
/// route's tree.
pub struct PageContext<'a> {
    pub page: &'a mut dyn Host,
    pub builder: Builder,
    /// The concrete route being built, query included.
    pub route: &'a str,
    pub params: &'a Params,
}

impl PageContext<'_> {
    /// Path parameter, or [`ParamError::Missing`].
    pub fn param(&self, name: &str) -> Result<&str, ParamError> {
        self.params.require(name)
    }

    /// Path parameter parsed into `T`.
    pub fn parse<T: FromStr>(&self, name: &str) -> Result<T, ParamError> {
        self.params.parse(name)
    }

    pub fn query(&self, name: &str) -> Option<&str> {
        self.params.query(name)
    }

    /// A new, empty builder over the same registry. Return it from the page
    /// function to replace the context's builder.
    pub fn fresh_builder(&self) -> Builder {
        Builder::new(Arc::clone(self.builder.registry()))
    }
}

/// What a page function may return.
pub trait PageOutput {
    /// `Some` replaces the context's builder.
    fn into_builder(self) -> Option<Builder>;
}

impl PageOutput for () {
    fn into_builder(self) -> Option<Builder> {
        None
    }
}

impl PageOutput for Builder {
    fn into_builder(self) -> Option<Builder> {
        Some(self)
    }
}

impl PageOutput for Option<Builder> {
    fn into_builder(self) -> Option<Builder> {
        self
    }
}

/// A route handler: populates a page tree for one navigation.
pub trait PageFn: Send + Sync {
    fn call(&self, cx: &mut PageContext<'_>) -> Result<Option<Builder>, PageError>;
}

impl<F, R> PageFn for F
where
    F: Fn(&mut PageContext<'_>) -> Result<R, PageError> + Send + Sync,
    R: PageOutput,
{
    fn call(&self, cx: &mut PageContext<'_>) -> Result<Option<Builder>, PageError> {
        self(cx).map(PageOutput::into_builder)
    }
}

/// Box a closure as a shareable page function.
pub fn page_fn<F, R>(f: F) -> Arc<dyn PageFn>
where
    F: Fn(&mut PageContext<'_>) -> Result<R, PageError> + Send + Sync + 'static,
    R: PageOutput,
{
    Arc::new(f)
}
