use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::{
    Compensation, CompensationReport, ControllerError, ControllerSnapshot, DirectionState,
    EdgeSentinels, Evicted, LoadDirection, ObserverConfig, Page, PageWindow, ScrollCompensator,
    ScrollGate, SentinelEdge, SettingFlag, Settings, SettingsError, Ticket, Viewport, Visibility,
    WheelScale,
};

/// A callback fired after the controller's state changes (request issued, merge, exhaustion,
/// settings, reset). Hosts typically schedule a re-render from it.
pub type OnChangeCallback<P> = Arc<dyn Fn(&PaginationController<P>) + Send + Sync>;

/// A page fetch the host must perform.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchRequest<P> {
    pub ticket: Ticket,
    pub direction: LoadDirection,
    /// The current first page (`Before`) or last page (`After`); `None` for an empty window.
    pub cursor: Option<P>,
}

/// The result of handing a settled fetch back to the controller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MergeOutcome<P: Page> {
    Merged {
        direction: LoadDirection,
        inserted: P::Id,
        evicted: Option<Evicted<P>>,
        /// The next fetch in the same direction, issued because its sentinel is still past the
        /// load threshold. The host must perform it like any other request.
        next: Option<FetchRequest<P>>,
    },
    /// The host signalled the end of the dataset in this direction.
    Exhausted(LoadDirection),
    /// The result arrived after unmount or belongs to a superseded request.
    Discarded,
}

/// Orchestrates sentinel-driven loading for a [`PageWindow`].
///
/// Each direction runs its own state machine:
///
/// ```text
/// Idle --trigger--> Requesting --page--> Idle
///                        \------none----> Exhausted
/// ```
///
/// At most one fetch is in flight per direction. The controller never performs I/O itself: it
/// hands out [`FetchRequest`]s and merges whatever the host resolves through
/// [`PaginationController::resolve`]. A fetch that fails is simply never resolved; the direction
/// stays `Requesting` until [`PaginationController::reset`].
pub struct PaginationController<P: Page> {
    settings: Settings,
    window: PageWindow<P>,
    sentinels: EdgeSentinels,
    gate: ScrollGate,
    compensator: ScrollCompensator<P::Id>,
    before: DirectionState,
    after: DirectionState,
    next_ticket: u64,
    mounted: bool,
    leading_inserted: bool,
    on_change: Option<OnChangeCallback<P>>,
}

impl<P: Page + Clone> PaginationController<P> {
    /// Creates a mounted controller with an empty window.
    pub fn new(settings: Settings) -> Result<Self, SettingsError> {
        settings.validate()?;
        pdebug!(
            max_page_buffer = settings.max_page_buffer,
            start_bottom_up = settings.start_bottom_up,
            debug = settings.debug,
            "PaginationController::new"
        );
        let mut compensator = ScrollCompensator::new(settings.compensation);
        if settings.start_bottom_up {
            compensator.anchor_to_end_on_layout();
        }
        Ok(Self {
            window: PageWindow::new(settings.max_page_buffer),
            sentinels: EdgeSentinels::new(),
            gate: ScrollGate::new(settings.pause_threshold),
            compensator,
            before: DirectionState::Idle,
            after: DirectionState::Idle,
            next_ticket: 0,
            mounted: true,
            leading_inserted: false,
            on_change: None,
            settings,
        })
    }

    pub fn with_on_change(
        mut self,
        on_change: Option<impl Fn(&PaginationController<P>) + Send + Sync + 'static>,
    ) -> Self {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
        self
    }

    pub fn set_on_change(
        &mut self,
        on_change: Option<impl Fn(&PaginationController<P>) + Send + Sync + 'static>,
    ) {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
    }

    fn notify(&self) {
        if let Some(cb) = &self.on_change {
            cb(self);
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn window(&self) -> &PageWindow<P> {
        &self.window
    }

    pub fn gate(&self) -> &ScrollGate {
        &self.gate
    }

    pub fn compensator(&self) -> &ScrollCompensator<P::Id> {
        &self.compensator
    }

    pub fn observer_config(&self) -> ObserverConfig {
        ObserverConfig::for_settings(&self.settings)
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn state(&self, direction: LoadDirection) -> DirectionState {
        match direction {
            LoadDirection::Before => self.before,
            LoadDirection::After => self.after,
        }
    }

    fn state_mut(&mut self, direction: LoadDirection) -> &mut DirectionState {
        match direction {
            LoadDirection::Before => &mut self.before,
            LoadDirection::After => &mut self.after,
        }
    }

    /// The physical edge insertions in `direction` land on.
    pub fn edge_for(&self, direction: LoadDirection) -> SentinelEdge {
        SentinelEdge::for_direction(direction, self.settings.start_bottom_up)
    }

    /// Handles one sentinel visibility notification.
    ///
    /// Returns a fetch to perform when the sentinel is past the load threshold, paging is enabled,
    /// debug mode is off and the direction is idle. Repeated notifications while a fetch is in
    /// flight return `None`.
    pub fn on_visibility(&mut self, visibility: Visibility) -> Option<FetchRequest<P>> {
        if !self.mounted {
            return None;
        }
        self.gate.on_visibility(visibility);
        let triggered = self
            .sentinels
            .observe(visibility, self.settings.load_threshold);
        if !triggered || !self.settings.is_paging_enabled || self.settings.debug {
            return None;
        }
        let direction = visibility.edge.direction(self.settings.start_bottom_up);
        self.issue(direction, false)
    }

    /// Requests a page explicitly (debug "load before/after" actions).
    ///
    /// Bypasses the paging switch, debug mode and exhaustion, but still allows only one fetch in
    /// flight per direction.
    pub fn request(&mut self, direction: LoadDirection) -> Option<FetchRequest<P>> {
        if !self.mounted {
            return None;
        }
        self.issue(direction, true)
    }

    /// Re-checks the last known ratio of the sentinel that loads `direction`.
    ///
    /// Observers only report threshold crossings, so a sentinel that stays visible across a merge
    /// produces no new notification.
    fn follow_up(&mut self, direction: LoadDirection) -> Option<FetchRequest<P>> {
        if !self.mounted || !self.settings.is_paging_enabled || self.settings.debug {
            return None;
        }
        let edge = self.edge_for(direction);
        if !self.sentinels.is_triggered(edge, self.settings.load_threshold) {
            return None;
        }
        ptrace!(?direction, "sentinel still visible after merge");
        self.issue(direction, false)
    }

    fn issue(&mut self, direction: LoadDirection, manual: bool) -> Option<FetchRequest<P>> {
        match self.state(direction) {
            DirectionState::Idle => {}
            DirectionState::Exhausted if manual => {}
            DirectionState::Requesting(_) => {
                ptrace!(?direction, "request already in flight");
                return None;
            }
            DirectionState::Exhausted => {
                ptrace!(?direction, "direction exhausted; trigger ignored");
                return None;
            }
        }

        self.next_ticket = self.next_ticket.wrapping_add(1);
        let ticket = Ticket(self.next_ticket);
        *self.state_mut(direction) = DirectionState::Requesting(ticket);
        let cursor = self.window.edge(direction).cloned();
        pdebug!(
            ?direction,
            ticket = ticket.get(),
            manual,
            has_cursor = cursor.is_some(),
            "fetch issued"
        );
        self.notify();
        Some(FetchRequest {
            ticket,
            direction,
            cursor,
        })
    }

    fn direction_of(&self, ticket: Ticket) -> Option<LoadDirection> {
        if self.before.ticket() == Some(ticket) {
            Some(LoadDirection::Before)
        } else if self.after.ticket() == Some(ticket) {
            Some(LoadDirection::After)
        } else {
            None
        }
    }

    /// Merges a settled fetch.
    ///
    /// `None` marks the direction exhausted. A page is inserted on its end of the window (evicting
    /// from the opposite end when full); insertions on the leading edge queue a scroll
    /// compensation for the next [`PaginationController::on_layout_committed`]. When the sentinel
    /// for that direction is still past the load threshold, the next fetch is issued right away
    /// and returned in [`MergeOutcome::Merged`].
    ///
    /// On error the window is unchanged and the direction goes back to idle.
    pub fn resolve(
        &mut self,
        ticket: Ticket,
        page: Option<P>,
    ) -> Result<MergeOutcome<P>, ControllerError> {
        if !self.mounted {
            ptrace!(ticket = ticket.get(), "result after unmount discarded");
            return Ok(MergeOutcome::Discarded);
        }
        let Some(direction) = self.direction_of(ticket) else {
            ptrace!(ticket = ticket.get(), "stale result discarded");
            return Ok(MergeOutcome::Discarded);
        };

        let Some(page) = page else {
            *self.state_mut(direction) = DirectionState::Exhausted;
            self.gate
                .mark_exhausted(direction, self.settings.start_bottom_up);
            if self.settings.compensation == Compensation::Translate
                && self.edge_for(direction) == SentinelEdge::Leading
                && !self.leading_inserted
            {
                self.compensator.anchor_at_mount_on_layout();
            }
            pdebug!(?direction, "direction exhausted");
            self.notify();
            return Ok(MergeOutcome::Exhausted(direction));
        };

        let inserted = page.id();
        *self.state_mut(direction) = DirectionState::Idle;
        let evicted = match self.window.insert(direction, Some(page)) {
            Ok(insertion) => insertion.into_evicted(),
            Err(err) => {
                self.notify();
                return Err(err.into());
            }
        };

        if self.edge_for(direction) == SentinelEdge::Leading {
            self.leading_inserted = true;
            self.compensator
                .schedule(inserted.clone(), evicted.as_ref().and_then(|e| e.height));
        }
        pdebug!(
            ?direction,
            len = self.window.len(),
            evicted = evicted.is_some(),
            "page merged"
        );
        self.notify();
        let next = self.follow_up(direction);
        Ok(MergeOutcome::Merged {
            direction,
            inserted,
            evicted,
            next,
        })
    }

    /// Records the settled height of a mounted page.
    pub fn measure(&mut self, id: &P::Id, height: u32) -> bool {
        self.window.measure(id, height)
    }

    /// Runs scroll compensation. Call once per committed layout.
    pub fn on_layout_committed(&mut self, viewport: &mut impl Viewport) -> CompensationReport {
        if !self.mounted {
            return CompensationReport::default();
        }
        self.compensator.apply(&self.window, viewport)
    }

    /// Legacy manual scrolling: the gated translation for a raw wheel delta.
    pub fn translate_wheel(&self, raw_delta: f64, scale: &dyn WheelScale) -> f64 {
        self.gate.translate(raw_delta, scale)
    }

    /// Replaces the settings.
    ///
    /// Changing any boolean setting clears exhaustion in both directions. Shrinking
    /// `max_page_buffer` prunes the window; the pruned pages are returned so the host can unmount
    /// them.
    pub fn set_settings(&mut self, settings: Settings) -> Result<Vec<Evicted<P>>, SettingsError> {
        settings.validate()?;
        let prev = self.settings;
        self.settings = settings;
        ptrace!(
            max_page_buffer = settings.max_page_buffer,
            is_paging_enabled = settings.is_paging_enabled,
            debug = settings.debug,
            "PaginationController::set_settings"
        );

        if prev.flags_differ(&settings) {
            self.clear_exhaustion();
        }
        self.sync_end_anchor(prev.start_bottom_up);
        self.gate.set_pause_threshold(settings.pause_threshold);
        self.compensator.set_strategy(settings.compensation);
        let pruned = if prev.max_page_buffer != settings.max_page_buffer {
            self.window.set_capacity(settings.max_page_buffer)
        } else {
            Vec::new()
        };

        self.notify();
        Ok(pruned)
    }

    /// Clones the current settings, applies `f`, then delegates to `set_settings`.
    pub fn update_settings(
        &mut self,
        f: impl FnOnce(&mut Settings),
    ) -> Result<Vec<Evicted<P>>, SettingsError> {
        let mut next = self.settings;
        f(&mut next);
        self.set_settings(next)
    }

    /// Flips a boolean setting and returns its new value.
    pub fn toggle(&mut self, flag: SettingFlag) -> bool {
        let prev = self.settings.start_bottom_up;
        let value = !self.settings.flag(flag);
        self.settings.set_flag(flag, value);
        pdebug!(?flag, value, "setting toggled");
        self.clear_exhaustion();
        self.sync_end_anchor(prev);
        self.notify();
        value
    }

    /// Switching to bottom-up re-arms the end anchor; switching away cancels it.
    fn sync_end_anchor(&mut self, was_bottom_up: bool) {
        match (was_bottom_up, self.settings.start_bottom_up) {
            (false, true) => self.compensator.anchor_to_end_on_layout(),
            (true, false) => self.compensator.cancel_anchor_to_end(),
            _ => {}
        }
    }

    fn clear_exhaustion(&mut self) {
        for direction in [LoadDirection::Before, LoadDirection::After] {
            let state = self.state_mut(direction);
            if state.is_exhausted() {
                *state = DirectionState::Idle;
            }
        }
        self.gate.reset();
    }

    /// Returns both directions to idle.
    ///
    /// Outstanding fetches are abandoned: their tickets no longer match, so late results are
    /// discarded. This is also the way out of a direction stalled by a failed fetch.
    pub fn reset(&mut self) {
        self.before = DirectionState::Idle;
        self.after = DirectionState::Idle;
        self.sentinels.reset();
        self.gate.reset();
        pdebug!("PaginationController::reset");
        self.notify();
    }

    /// Drops every page and stops accepting results.
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.leading_inserted = false;
        self.window = PageWindow::new(self.settings.max_page_buffer);
        self.compensator.clear();
        self.before = DirectionState::Idle;
        self.after = DirectionState::Idle;
        self.sentinels.reset();
        self.gate.reset();
        pdebug!("PaginationController::unmount");
        self.notify();
    }

    /// Mounts again after [`PaginationController::unmount`], starting from an empty window.
    pub fn mount(&mut self) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        if self.settings.start_bottom_up {
            self.compensator.anchor_to_end_on_layout();
        }
        pdebug!("PaginationController::mount");
        self.notify();
    }

    pub fn snapshot(&self) -> ControllerSnapshot<P::Id> {
        ControllerSnapshot {
            settings: self.settings,
            mounted: self.mounted,
            before: self.before,
            after: self.after,
            pages: self.window.ids().collect(),
            measured_height: self.window.measured_height(),
            pending_compensations: self.compensator.pending_len(),
            translation: self.compensator.translation(),
        }
    }
}

impl<P: Page> core::fmt::Debug for PaginationController<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PaginationController")
            .field("settings", &self.settings)
            .field("len", &self.window.len())
            .field("before", &self.before)
            .field("after", &self.after)
            .field("mounted", &self.mounted)
            .finish_non_exhaustive()
    }
}
