use crate::{LoadDirection, SentinelEdge, Visibility};

/// Converts a raw wheel/pointer delta into content pixels.
///
/// This is device and host specific. The engine ships only [`UnitScale`]; hosts calibrate their
/// own factor against the scroll semantics of their platform.
pub trait WheelScale {
    fn scale(&self, raw_delta: f64) -> f64;
}

/// Passes deltas through unchanged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UnitScale;

impl WheelScale for UnitScale {
    fn scale(&self, raw_delta: f64) -> f64 {
        raw_delta
    }
}

impl<F: Fn(f64) -> f64> WheelScale for F {
    fn scale(&self, raw_delta: f64) -> f64 {
        self(raw_delta)
    }
}

/// Manual scroll translation for hosts without native scrolling.
///
/// Movement toward an edge stops once that edge's sentinel is more than `pause_threshold`
/// visible, and resumes when it drops back to or below it. Once a direction is exhausted, its edge
/// also stays closed whenever its sentinel is visible at all, so the content cannot be scrolled
/// past the end of the data; pages already loaded stay reachable.
///
/// Positive deltas move toward the trailing edge ("down"), negative toward the leading edge.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollGate {
    pause_threshold: f32,
    can_scroll_up: bool,
    can_scroll_down: bool,
    leading_ratio: f32,
    trailing_ratio: f32,
    leading_exhausted: bool,
    trailing_exhausted: bool,
}

impl ScrollGate {
    pub fn new(pause_threshold: f32) -> Self {
        Self {
            pause_threshold,
            can_scroll_up: true,
            can_scroll_down: true,
            leading_ratio: 0.0,
            trailing_ratio: 0.0,
            leading_exhausted: false,
            trailing_exhausted: false,
        }
    }

    pub fn pause_threshold(&self) -> f32 {
        self.pause_threshold
    }

    pub fn set_pause_threshold(&mut self, pause_threshold: f32) {
        self.pause_threshold = pause_threshold;
    }

    pub fn can_scroll_up(&self) -> bool {
        self.can_scroll_up && !(self.leading_exhausted && self.leading_ratio > 0.0)
    }

    pub fn can_scroll_down(&self) -> bool {
        self.can_scroll_down && !(self.trailing_exhausted && self.trailing_ratio > 0.0)
    }

    /// Updates the flag for the notified edge.
    pub fn on_visibility(&mut self, visibility: Visibility) {
        let ratio = if visibility.ratio.is_nan() {
            0.0
        } else {
            visibility.ratio
        };
        let open = ratio <= self.pause_threshold;
        let (flag, last) = match visibility.edge {
            SentinelEdge::Leading => (&mut self.can_scroll_up, &mut self.leading_ratio),
            SentinelEdge::Trailing => (&mut self.can_scroll_down, &mut self.trailing_ratio),
        };
        if *flag != open {
            ptrace!(edge = ?visibility.edge, open, "ScrollGate: edge flipped");
        }
        *flag = open;
        *last = ratio;
    }

    /// Closes the edge that loads `direction` whenever its sentinel is visible.
    pub fn mark_exhausted(&mut self, direction: LoadDirection, start_bottom_up: bool) {
        match SentinelEdge::for_direction(direction, start_bottom_up) {
            SentinelEdge::Leading => self.leading_exhausted = true,
            SentinelEdge::Trailing => self.trailing_exhausted = true,
        }
        pdebug!(?direction, "ScrollGate: edge exhausted");
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.pause_threshold);
    }

    /// Scales a raw delta and returns the translation to apply (`0.0` when the edge is closed).
    pub fn translate(&self, raw_delta: f64, scale: &dyn WheelScale) -> f64 {
        let delta = scale.scale(raw_delta);
        if !delta.is_finite() {
            return 0.0;
        }
        if (delta < 0.0 && !self.can_scroll_up()) || (delta > 0.0 && !self.can_scroll_down()) {
            return 0.0;
        }
        delta
    }
}

impl Default for ScrollGate {
    fn default() -> Self {
        Self::new(0.5)
    }
}
