use alloc::vec::Vec;

use crate::{Settings, Ticket};

/// Loading state of one direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DirectionState {
    #[default]
    Idle,
    /// A fetch is in flight; only a result carrying this ticket is merged.
    Requesting(Ticket),
    /// The host has no more pages in this direction.
    Exhausted,
}

impl DirectionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_requesting(&self) -> bool {
        matches!(self, Self::Requesting(_))
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::Exhausted)
    }

    pub fn ticket(&self) -> Option<Ticket> {
        match self {
            Self::Requesting(ticket) => Some(*ticket),
            _ => None,
        }
    }
}

/// A lightweight, serializable snapshot of the controller, for inspection/debug views.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ControllerSnapshot<K> {
    pub settings: Settings,
    pub mounted: bool,
    pub before: DirectionState,
    pub after: DirectionState,
    /// Ids of the mounted pages, in window order.
    pub pages: Vec<K>,
    pub measured_height: u64,
    pub pending_compensations: usize,
    pub translation: i64,
}
