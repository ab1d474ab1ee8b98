use crate::{Extent, ScrollAnchor};

/// A scrollable container, as seen by the engine.
///
/// Implementations wrap whatever the host scrolls (a DOM element, a TUI pane, a GUI scroll area).
/// The offset is shared with user input, so callers read it right before writing it back.
pub trait Viewport {
    fn scroll_offset(&self) -> u64;

    fn set_scroll_offset(&mut self, offset: u64);

    fn extent(&self) -> Extent;
}

impl<V: Viewport + ?Sized> Viewport for &mut V {
    fn scroll_offset(&self) -> u64 {
        (**self).scroll_offset()
    }

    fn set_scroll_offset(&mut self, offset: u64) {
        (**self).set_scroll_offset(offset);
    }

    fn extent(&self) -> Extent {
        (**self).extent()
    }
}

/// A plain in-memory viewport.
///
/// Handy for headless hosts and simulations. Offsets are stored as given, not clamped: a host
/// applies its own clamping when it copies the offset into the real scroll container.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MemoryViewport {
    pub offset: u64,
    pub extent: Extent,
}

impl MemoryViewport {
    pub fn new(viewport: u32, content: u64) -> Self {
        Self {
            offset: 0,
            extent: Extent { viewport, content },
        }
    }

    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = offset;
        self
    }
}

impl Viewport for MemoryViewport {
    fn scroll_offset(&self) -> u64 {
        self.offset
    }

    fn set_scroll_offset(&mut self, offset: u64) {
        self.offset = offset;
    }

    fn extent(&self) -> Extent {
        self.extent
    }
}

impl ScrollAnchor {
    /// Captures the viewport's current offset.
    pub fn capture(viewport: &impl Viewport) -> Self {
        Self {
            offset: viewport.scroll_offset(),
        }
    }

    /// How far the viewport has moved since the anchor was captured.
    pub fn drift(&self, viewport: &impl Viewport) -> i64 {
        viewport.scroll_offset() as i64 - self.offset as i64
    }

    /// Writes the anchored offset back.
    pub fn restore(&self, viewport: &mut impl Viewport) {
        viewport.set_scroll_offset(self.offset);
    }
}
