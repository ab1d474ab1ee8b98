//! A headless engine for bidirectional, windowed pagination.
//!
//! For the async host driver (page sources, visibility streams, rendering hooks), see the
//! `scrollpager-adapter` crate.
//!
//! The engine keeps a bounded window of pages mounted, asks the host for more content when one of
//! the two edge sentinels becomes visible, evicts pages from the opposite end, and keeps the
//! visible content still when pages are inserted above it.
//!
//! It is UI-agnostic. A TUI/GUI layer is expected to provide:
//! - sentinel visibility ratios (from an intersection observer or an equivalent computation)
//! - the pages themselves, fetched however the host likes
//! - settled page heights once they are laid out
//! - a scroll offset to read and write ([`Viewport`])
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod compensator;
mod controller;
mod error;
mod gate;
mod key;
mod page;
mod sentinel;
mod settings;
mod state;
mod types;
mod viewport;
mod window;

#[cfg(test)]
mod tests;

pub use compensator::{CompensationReport, ScrollCompensator};
pub use controller::{FetchRequest, MergeOutcome, OnChangeCallback, PaginationController};
pub use error::{ControllerError, SettingsError, WindowError};
pub use gate::{ScrollGate, UnitScale, WheelScale};
pub use key::PageKey;
pub use page::Page;
pub use sentinel::{EdgeSentinels, ObserverConfig};
pub use settings::{Compensation, SettingFlag, Settings};
pub use state::{ControllerSnapshot, DirectionState};
pub use types::{Extent, LoadDirection, ScrollAnchor, SentinelEdge, Ticket, Visibility};
pub use viewport::{MemoryViewport, Viewport};
pub use window::{Evicted, Insertion, PageWindow};
