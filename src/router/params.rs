//! Route parameters extracted by the matcher.

use std::str::FromStr;

/// Errors from typed parameter access.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParamError {
    #[error("missing route parameter: {0}")]
    Missing(String),
    #[error("invalid value {value:?} for route parameter {name}")]
    Invalid { name: String, value: String },
}

/// Path parameters in pattern order, plus query-string parameters.
///
/// Values are percent-decoded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    path: Vec<(String, String)>,
    query: Vec<(String, String)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.path.push((name.into(), value.into()));
    }

    pub(crate) fn push_query(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.query.push((name.into(), value.into()));
    }

    /// Add a path parameter (builder). Mostly for tests and custom matchers.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(name, value);
        self
    }

    /// Add a query parameter (builder).
    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push_query(name, value);
        self
    }

    /// Path parameter value.
    pub fn get(&self, name: &str) -> Option<&str> {
        lookup(&self.path, name)
    }

    /// Path parameter value, or [`ParamError::Missing`].
    pub fn require(&self, name: &str) -> Result<&str, ParamError> {
        self.get(name)
            .ok_or_else(|| ParamError::Missing(name.to_owned()))
    }

    /// Parse a path parameter into `T`.
    pub fn parse<T: FromStr>(&self, name: &str) -> Result<T, ParamError> {
        let value = self.require(name)?;
        value.parse().map_err(|_| ParamError::Invalid {
            name: name.to_owned(),
            value: value.to_owned(),
        })
    }

    /// Query parameter value. The first occurrence wins.
    pub fn query(&self, name: &str) -> Option<&str> {
        lookup(&self.query, name)
    }

    /// Path parameters in pattern order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.path.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn query_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.query.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of path parameters.
    pub fn len(&self) -> usize {
        self.path.len()
    }

    /// No path and no query parameters.
    pub fn is_empty(&self) -> bool {
        self.path.is_empty() && self.query.is_empty()
    }
}

fn lookup<'a>(pairs: &'a [(String, String)], name: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_and_require() {
        let params = Params::new().with("id", "42");
        assert_eq!(params.get("id"), Some("42"));
        assert_eq!(params.require("id"), Ok("42"));
        assert_eq!(params.require("name"), Err(ParamError::Missing("name".into())));
    }

    #[test]
    fn typed_parse() {
        let params = Params::new().with("id", "42").with("slug", "abc");
        assert_eq!(params.parse::<u32>("id"), Ok(42));
        assert_eq!(
            params.parse::<u32>("slug"),
            Err(ParamError::Invalid {
                name: "slug".into(),
                value: "abc".into(),
            })
        );
    }

    #[test]
    fn query_is_separate_from_path() {
        let params = Params::new()
            .with("id", "1")
            .with_query("tab", "2")
            .with_query("tab", "3");
        assert_eq!(params.query("tab"), Some("2"));
        assert_eq!(params.get("tab"), None);
        assert_eq!(params.len(), 1);
        assert_eq!(params.query_pairs().count(), 2);
    }

    #[test]
    fn empty() {
        assert!(Params::new().is_empty());
        assert!(!Params::new().with_query("a", "b").is_empty());
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            ParamError::Missing("id".into()).to_string(),
            "missing route parameter: id"
        );
        assert_eq!(
            ParamError::Invalid {
                name: "id".into(),
                value: "x".into()
            }
            .to_string(),
            "invalid value \"x\" for route parameter id"
        );
    }
}
