//! Path patterns and the matcher.
//!
//! Pattern syntax: literal segments, `{name}` for exactly one segment, and a
//! trailing `{*name}` that captures the rest of the path (possibly empty).
//! Empty segments are ignored on both sides, so `/a/b/` and `/a//b` match
//! `/a/b`.
//!
//! When several patterns match, the most specific one wins: more literal
//! segments first, then patterns without a wildcard, then registration order.

use super::params::Params;
use super::tokenizer::{tokenize, Token};

/// Errors from pattern parsing and route resolution.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    #[error("no route matched: {route}")]
    NoRouteMatched { route: String },
    #[error("invalid route pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },
}

// ---------------------------------------------------------------------------
// PathPattern
// ---------------------------------------------------------------------------

/// One segment of a parsed pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Param(String),
    Wildcard(String),
}

/// A parsed route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    source: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    pub fn parse(pattern: &str) -> Result<Self, RouteError> {
        let invalid = |reason: String| RouteError::InvalidPattern {
            pattern: pattern.to_owned(),
            reason,
        };

        if !pattern.starts_with('/') {
            return Err(invalid("must start with '/'".into()));
        }
        let tokens = tokenize(pattern)
            .map_err(|span| invalid(format!("unexpected {:?} at {}", &pattern[span.clone()], span.start)))?;

        let mut segments: Vec<Segment> = Vec::new();
        let mut open = false;
        for (token, text) in tokens {
            if token == Token::Slash {
                open = true;
                continue;
            }
            if !open {
                return Err(invalid(format!("{text:?} must fill a whole segment")));
            }
            if matches!(segments.last(), Some(Segment::Wildcard(_))) {
                return Err(invalid("wildcard must be the last segment".into()));
            }
            let segment = match (token, token.param_name(text)) {
                (Token::Param, Some(name)) => Segment::Param(name.to_owned()),
                (Token::Wildcard, Some(name)) => Segment::Wildcard(name.to_owned()),
                // Route segments are decoded before comparison, so literals are too.
                _ => Segment::Literal(percent_decode(text)),
            };
            if let Some(name) = segment.param_name() {
                if segments.iter().any(|s| s.param_name() == Some(name)) {
                    return Err(invalid(format!("duplicate parameter {name:?}")));
                }
            }
            segments.push(segment);
            open = false;
        }

        Ok(Self {
            source: pattern.to_owned(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn has_wildcard(&self) -> bool {
        matches!(self.segments.last(), Some(Segment::Wildcard(_)))
    }

    /// Names of the parameters this pattern captures, in order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(Segment::param_name)
    }

    /// Ordering key: smaller sorts first.
    fn rank(&self) -> (std::cmp::Reverse<usize>, bool) {
        let literals = self
            .segments
            .iter()
            .filter(|s| matches!(s, Segment::Literal(_)))
            .count();
        (std::cmp::Reverse(literals), self.has_wildcard())
    }

    /// Match already split and decoded path segments.
    fn capture(&self, path: &[String]) -> Option<Params> {
        let mut params = Params::new();
        let mut rest = path;
        for segment in &self.segments {
            match segment {
                Segment::Wildcard(name) => {
                    params.push(name.as_str(), rest.join("/"));
                    return Some(params);
                }
                Segment::Literal(literal) => {
                    let (head, tail) = rest.split_first()?;
                    if head != literal {
                        return None;
                    }
                    rest = tail;
                }
                Segment::Param(name) => {
                    let (head, tail) = rest.split_first()?;
                    params.push(name.as_str(), head.as_str());
                    rest = tail;
                }
            }
        }
        rest.is_empty().then_some(params)
    }
}

impl Segment {
    fn param_name(&self) -> Option<&str> {
        match self {
            Segment::Param(name) | Segment::Wildcard(name) => Some(name),
            Segment::Literal(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Matcher
// ---------------------------------------------------------------------------

/// Matches concrete routes against a fixed set of patterns.
#[derive(Debug, Clone)]
pub struct Matcher {
    patterns: Vec<PathPattern>,
    /// Indices into `patterns`, most specific first.
    order: Vec<usize>,
    catch_all: Option<String>,
}

impl Matcher {
    /// Parse `patterns` and build a matcher. `catch_all` is a concrete route
    /// re-matched when nothing else matches.
    pub fn new<I, S>(patterns: I, catch_all: Option<&str>) -> Result<Self, RouteError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|p| PathPattern::parse(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_patterns(patterns, catch_all.map(str::to_owned)))
    }

    pub fn from_patterns(patterns: Vec<PathPattern>, catch_all: Option<String>) -> Self {
        let mut order: Vec<usize> = (0..patterns.len()).collect();
        // Stable sort keeps registration order among equal ranks.
        order.sort_by_key(|&i| patterns[i].rank());
        Self {
            patterns,
            order,
            catch_all,
        }
    }

    pub fn patterns(&self) -> &[PathPattern] {
        &self.patterns
    }

    pub fn catch_all(&self) -> Option<&str> {
        self.catch_all.as_deref()
    }

    /// Match `route`, returning the winning pattern and its parameters.
    pub fn matches(&self, route: &str) -> Result<(&str, Params), RouteError> {
        let (index, params) = self.match_index(route)?;
        Ok((self.patterns[index].as_str(), params))
    }

    /// Like [`matches`](Self::matches) but yields the pattern's index in
    /// registration order.
    pub fn match_index(&self, route: &str) -> Result<(usize, Params), RouteError> {
        if let Some(found) = self.find(route) {
            return Ok(found);
        }
        if let Some(catch_all) = &self.catch_all {
            if let Some((index, _)) = self.find(catch_all) {
                tracing::debug!(route, catch_all = catch_all.as_str(), "falling back to catch-all route");
                return Ok((index, Params::new()));
            }
        }
        Err(RouteError::NoRouteMatched {
            route: route.to_owned(),
        })
    }

    fn find(&self, route: &str) -> Option<(usize, Params)> {
        let (path, query) = split_route(route);
        let segments: Vec<String> = path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(percent_decode)
            .collect();

        self.order.iter().find_map(|&index| {
            let mut params = self.patterns[index].capture(&segments)?;
            for (name, value) in parse_query(query) {
                params.push_query(name, value);
            }
            Some((index, params))
        })
    }
}

// ---------------------------------------------------------------------------
// Route string helpers
// ---------------------------------------------------------------------------

/// Split a route into its path and query parts, dropping any fragment.
pub fn split_route(route: &str) -> (&str, &str) {
    let route = route.split_once('#').map_or(route, |(before, _)| before);
    route.split_once('?').unwrap_or((route, ""))
}

/// Decoded `name=value` pairs of a query string. `+` decodes to a space.
pub fn parse_query(query: &str) -> impl Iterator<Item = (String, String)> + '_ {
    query.split('&').filter(|pair| !pair.is_empty()).map(|pair| {
        let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
        (
            percent_decode(&name.replace('+', " ")),
            percent_decode(&value.replace('+', " ")),
        )
    })
}

/// Decode `%XX` escapes. Malformed escapes are kept verbatim; invalid UTF-8
/// is replaced.
pub fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = bytes.get(i + 1..i + 3).and_then(|h| std::str::from_utf8(h).ok());
            if let Some(byte) = hex.and_then(|h| u8::from_str_radix(h, 16).ok()) {
                out.push(byte);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}
