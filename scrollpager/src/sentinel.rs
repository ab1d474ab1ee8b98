use alloc::vec::Vec;

use crate::{LoadDirection, SentinelEdge, Settings, Visibility};

impl SentinelEdge {
    /// The load direction a sentinel on this edge requests.
    ///
    /// A bottom-up list is displayed reversed, so its leading (top) sentinel sits next to the
    /// newest page.
    pub fn direction(self, start_bottom_up: bool) -> LoadDirection {
        match (self, start_bottom_up) {
            (Self::Leading, false) | (Self::Trailing, true) => LoadDirection::Before,
            (Self::Trailing, false) | (Self::Leading, true) => LoadDirection::After,
        }
    }

    /// The edge whose sentinel requests `direction`.
    pub fn for_direction(direction: LoadDirection, start_bottom_up: bool) -> Self {
        if Self::Leading.direction(start_bottom_up) == direction {
            Self::Leading
        } else {
            Self::Trailing
        }
    }
}

/// What the host should configure on its intersection mechanism for both sentinels.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObserverConfig {
    /// Extra margin around the viewport, in the scroll axis, that still counts as visible.
    pub margin: u32,
    /// Ratios at which the host must report a notification.
    pub thresholds: Vec<f32>,
}

impl ObserverConfig {
    /// Thresholds that cover both the load trigger and the scroll gate pause point.
    pub fn for_settings(settings: &Settings) -> Self {
        let mut thresholds = alloc::vec![
            0.0,
            settings.load_threshold,
            settings.pause_threshold,
            1.0,
        ];
        thresholds.sort_by(f32::total_cmp);
        thresholds.dedup();
        Self {
            margin: 0,
            thresholds,
        }
    }

    pub fn with_margin(mut self, margin: u32) -> Self {
        self.margin = margin;
        self
    }
}

/// The last known visibility of the two edge sentinels.
///
/// Triggering is level-based: every notification above the threshold counts, so coalesced or
/// repeated notifications for the same crossing are harmless. De-duplication of loads is the
/// controller's job.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeSentinels {
    leading: f32,
    trailing: f32,
}

impl EdgeSentinels {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ratio(&self, edge: SentinelEdge) -> f32 {
        match edge {
            SentinelEdge::Leading => self.leading,
            SentinelEdge::Trailing => self.trailing,
        }
    }

    /// Records a notification. Returns `true` when the sentinel is past `threshold`.
    pub fn observe(&mut self, visibility: Visibility, threshold: f32) -> bool {
        let ratio = if visibility.ratio.is_nan() {
            0.0
        } else {
            visibility.ratio.clamp(0.0, 1.0)
        };
        match visibility.edge {
            SentinelEdge::Leading => self.leading = ratio,
            SentinelEdge::Trailing => self.trailing = ratio,
        }
        ratio > threshold
    }

    pub fn is_triggered(&self, edge: SentinelEdge, threshold: f32) -> bool {
        self.ratio(edge) > threshold
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
