//! Headless testing support: an in-memory host, a runtime, and a Pilot.
//!
//! [`HeadlessPage`] stands in for the toolkit's page object and records every
//! route it is told to show. [`Pilot`] drives one session over it
//! synchronously, so page functions can be exercised without a client.

pub mod headless;
pub mod pilot;

pub use headless::{HeadlessPage, HeadlessRuntime};
pub use pilot::Pilot;
