//! Routing: pattern tokenizer, matcher, parameters, and the route table.

pub mod params;
pub mod pattern;
pub mod table;
pub mod tokenizer;

pub use params::{ParamError, Params};
pub use pattern::{Matcher, PathPattern, RouteError, Segment};
pub use table::{RouteMatch, RouteState, RouteTable, Router};
