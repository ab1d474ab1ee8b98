use alloc::vec::Vec;

use crate::{Compensation, Page, PageKey, PageWindow, Viewport};

#[derive(Clone, Debug, PartialEq, Eq)]
struct Pending<K> {
    inserted: K,
    evicted_height: Option<u32>,
}

/// What a call to [`ScrollCompensator::apply`] did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompensationReport {
    /// Corrections applied in this pass.
    pub applied: usize,
    /// Corrections still waiting for their page to be measured.
    pub deferred: usize,
    /// Corrections dropped because their page left the window before it was measured.
    pub dropped: usize,
    /// Net change written to the scroll offset (or to the translation, for `Translate`).
    pub delta: i64,
    /// Whether an initial anchor (bottom-up end anchor, or the mount-time translation) was applied
    /// in this pass.
    pub anchored: bool,
}

impl CompensationReport {
    pub fn is_idle(&self) -> bool {
        self.applied == 0 && self.deferred == 0 && self.dropped == 0 && !self.anchored
    }
}

/// Cancels the visual jump caused by inserting content on the leading edge.
///
/// Corrections are queued at merge time and applied after the host has committed layout, once
/// the inserted page has a real height. A correction is applied exactly once: it leaves the queue
/// when applied, and a page that has no height yet keeps its correction queued rather than
/// guessing one.
#[derive(Clone, Debug)]
pub struct ScrollCompensator<K> {
    strategy: Compensation,
    pending: Vec<Pending<K>>,
    translation: i64,
    anchor_to_end: bool,
    anchor_at_mount: bool,
}

impl<K: PageKey> ScrollCompensator<K> {
    pub fn new(strategy: Compensation) -> Self {
        Self {
            strategy,
            pending: Vec::new(),
            translation: 0,
            anchor_to_end: false,
            anchor_at_mount: false,
        }
    }

    pub fn strategy(&self) -> Compensation {
        self.strategy
    }

    pub fn set_strategy(&mut self, strategy: Compensation) {
        self.strategy = strategy;
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Accumulated container translation (only moves under [`Compensation::Translate`]).
    pub fn translation(&self) -> i64 {
        self.translation
    }

    /// Queues one correction for a page inserted on the leading edge.
    pub fn schedule(&mut self, inserted: K, evicted_height: Option<u32>) {
        ptrace!(?inserted, ?evicted_height, "ScrollCompensator::schedule");
        self.pending.push(Pending {
            inserted,
            evicted_height,
        });
    }

    /// Scrolls to the end on the first layout pass where every mounted page is measured.
    pub fn anchor_to_end_on_layout(&mut self) {
        self.anchor_to_end = true;
    }

    pub fn cancel_anchor_to_end(&mut self) {
        self.anchor_to_end = false;
    }

    /// Shifts the container so the initial anchor sits past the trailing buffer.
    ///
    /// Used by hosts that position content through the translation instead of a native scroll
    /// offset.
    pub fn anchor_at_mount(&mut self, trailing_height: u64) {
        self.translation = -(trailing_height.min(i64::MAX as u64) as i64);
        pdebug!(translation = self.translation, "ScrollCompensator::anchor_at_mount");
    }

    /// Runs [`ScrollCompensator::anchor_at_mount`] with the window's height on the first layout
    /// pass where every mounted page is measured. Only honoured under
    /// [`Compensation::Translate`].
    pub fn anchor_at_mount_on_layout(&mut self) {
        self.anchor_at_mount = true;
    }

    pub fn clear(&mut self) {
        self.pending.clear();
        self.translation = 0;
        self.anchor_to_end = false;
        self.anchor_at_mount = false;
    }

    /// Applies every queued correction whose page has settled.
    ///
    /// Call this after layout is committed (next paint), never before: the heights come from the
    /// window's measured height map.
    pub fn apply<P>(
        &mut self,
        window: &PageWindow<P>,
        viewport: &mut impl Viewport,
    ) -> CompensationReport
    where
        P: Page<Id = K>,
    {
        let mut report = CompensationReport::default();
        let strategy = self.strategy;
        let mut translation = self.translation;

        self.pending.retain(|p| {
            if !window.contains(&p.inserted) {
                report.dropped += 1;
                return false;
            }
            let Some(height) = window.height_of(&p.inserted) else {
                report.deferred += 1;
                return true;
            };

            let delta = match strategy {
                Compensation::ScrollOffset | Compensation::Translate => height as i64,
                Compensation::ScrollOffsetNetOfEviction => {
                    height as i64 - p.evicted_height.unwrap_or(0) as i64
                }
            };
            if strategy == Compensation::Translate {
                translation -= delta;
                report.delta -= delta;
            } else {
                // Read fresh: the user may have scrolled since the merge.
                let current = viewport.scroll_offset();
                viewport.set_scroll_offset(offset_by(current, delta));
                report.delta += delta;
            }
            report.applied += 1;
            false
        });
        self.translation = translation;

        if self.anchor_at_mount
            && strategy == Compensation::Translate
            && fully_measured(window)
        {
            self.anchor_at_mount(window.measured_height());
            self.anchor_at_mount = false;
            report.anchored = true;
        }

        if self.anchor_to_end && fully_measured(window) {
            let end = viewport.extent().max_scroll_offset();
            viewport.set_scroll_offset(end);
            self.anchor_to_end = false;
            report.anchored = true;
        }

        if report.deferred > 0 {
            ptrace!(deferred = report.deferred, "ScrollCompensator: waiting for layout");
        }
        if report.applied > 0 {
            pdebug!(
                applied = report.applied,
                delta = report.delta,
                ?strategy,
                "ScrollCompensator::apply"
            );
        }
        report
    }
}

fn fully_measured<P: Page>(window: &PageWindow<P>) -> bool {
    !window.is_empty() && window.iter().all(|p| window.is_measured(&p.id()))
}

fn offset_by(offset: u64, delta: i64) -> u64 {
    if delta >= 0 {
        offset.saturating_add(delta as u64)
    } else {
        offset.saturating_sub(delta.unsigned_abs())
    }
}
