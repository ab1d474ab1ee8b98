//! Host glue for the `scrollpager` crate.
//!
//! The `scrollpager` crate is headless: it decides when to fetch, what to evict and how far to
//! scroll, but never performs I/O or touches a real scroll container. This crate connects it to
//! a host:
//!
//! - [`PageSource`]: the host's async page supply
//! - [`PageView`]: mounting, unmounting and measuring rendered pages
//! - [`visibility_feed`]: a stream that carries intersection notifications into [`Driver::run`]
//! - [`Driver`]: merges fetches in settlement order and applies scroll compensation
//! - [`DebugAction`]: the manual controls surfaced when `debug` is enabled
//!
//! This crate is framework-agnostic and single-threaded (futures are `!Send`).
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod debug;
mod driver;
mod error;
mod feed;
mod source;
mod view;


pub use debug::{DebugAction, DebugOutcome};
pub use driver::Driver;
pub use error::DriverError;
pub use feed::{VisibilityFeed, VisibilitySender, visibility_feed};
pub use source::PageSource;
pub use view::PageView;
