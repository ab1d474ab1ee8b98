/// Which end of the page window a load targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LoadDirection {
    /// Older content, inserted at the start of the window.
    Before,
    /// Newer content, inserted at the end of the window.
    After,
}

impl LoadDirection {
    pub fn opposite(self) -> Self {
        match self {
            Self::Before => Self::After,
            Self::After => Self::Before,
        }
    }
}

/// The physical edge of the scroll axis a sentinel sits on.
///
/// `Leading` is the start of the scroll axis (top of a vertical list). Content inserted on the
/// leading edge pushes the visible content away and needs compensation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SentinelEdge {
    Leading,
    Trailing,
}

/// One visibility notification for a sentinel.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Visibility {
    pub edge: SentinelEdge,
    /// Intersection ratio with the viewport, `0.0..=1.0`.
    pub ratio: f32,
}

impl Visibility {
    pub fn new(edge: SentinelEdge, ratio: f32) -> Self {
        Self { edge, ratio }
    }

    pub fn leading(ratio: f32) -> Self {
        Self::new(SentinelEdge::Leading, ratio)
    }

    pub fn trailing(ratio: f32) -> Self {
        Self::new(SentinelEdge::Trailing, ratio)
    }
}

/// Viewport bounds in the scroll axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Extent {
    /// Visible size of the viewport.
    pub viewport: u32,
    /// Total scrollable content size.
    pub content: u64,
}

impl Extent {
    pub fn max_scroll_offset(&self) -> u64 {
        self.content.saturating_sub(self.viewport as u64)
    }
}

/// A scroll offset captured at a point in time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollAnchor {
    pub offset: u64,
}

/// Identity of one issued page fetch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ticket(pub(crate) u64);

impl Ticket {
    pub fn get(self) -> u64 {
        self.0
    }
}
