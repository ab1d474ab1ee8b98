use futures::future::{self, Either, FutureExt, LocalBoxFuture};
use futures::stream::{FuturesUnordered, Stream, StreamExt};
use scrollpager::{
    CompensationReport, FetchRequest, LoadDirection, MergeOutcome, Page, PaginationController,
    SettingFlag, Settings, SettingsError, Ticket, Viewport, Visibility, WheelScale,
};

use crate::{DebugAction, DebugOutcome, DriverError, PageSource, PageView};

type Settled<P, E> = LocalBoxFuture<'static, (Ticket, LoadDirection, Result<Option<P>, E>)>;

enum Step<P, E> {
    Event(Option<Visibility>),
    Settled(Option<(Ticket, LoadDirection, Result<Option<P>, E>)>),
}

/// A framework-neutral driver that connects a [`PaginationController`] to a host.
///
/// This type does not hold any UI objects of its own. Adapters drive it by:
/// - feeding sentinel notifications (`on_visibility`, or `run` with a visibility stream)
/// - awaiting settled fetches (`next_merge`, or `run`)
/// - calling `on_layout_committed` after each layout pass, so heights are read back from the
///   view and scroll compensation is applied to the viewport
///
/// Fetches settle in whatever order the host resolves them; each one is merged as soon as it
/// settles. Everything runs on one thread.
pub struct Driver<P, S, V, W>
where
    P: Page,
    S: PageSource<P>,
{
    controller: PaginationController<P>,
    source: S,
    view: V,
    viewport: W,
    in_flight: FuturesUnordered<Settled<P, S::Error>>,
}

impl<P, S, V, W> Driver<P, S, V, W>
where
    P: Page + Clone + 'static,
    S: PageSource<P>,
    S::Error: 'static,
    V: PageView<P>,
    W: Viewport,
{
    pub fn new(
        settings: Settings,
        source: S,
        view: V,
        viewport: W,
    ) -> Result<Self, SettingsError> {
        Ok(Self::from_controller(
            PaginationController::new(settings)?,
            source,
            view,
            viewport,
        ))
    }

    pub fn from_controller(
        controller: PaginationController<P>,
        source: S,
        view: V,
        viewport: W,
    ) -> Self {
        Self {
            controller,
            source,
            view,
            viewport,
            in_flight: FuturesUnordered::new(),
        }
    }

    pub fn controller(&self) -> &PaginationController<P> {
        &self.controller
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn viewport(&self) -> &W {
        &self.viewport
    }

    /// The viewport, for host-driven scrolling.
    pub fn viewport_mut(&mut self) -> &mut W {
        &mut self.viewport
    }

    /// Number of fetches that have not settled yet (including abandoned ones).
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Handles one sentinel notification. Returns `true` when a fetch was issued.
    pub fn on_visibility(&mut self, visibility: Visibility) -> bool {
        match self.controller.on_visibility(visibility) {
            Some(req) => {
                self.spawn(req);
                true
            }
            None => false,
        }
    }

    /// Requests a page explicitly. Returns `true` when a fetch was issued.
    pub fn load(&mut self, direction: LoadDirection) -> bool {
        match self.controller.request(direction) {
            Some(req) => {
                self.spawn(req);
                true
            }
            None => false,
        }
    }

    fn spawn(&mut self, req: FetchRequest<P>) {
        let FetchRequest {
            ticket,
            direction,
            cursor,
        } = req;
        let fetch = self.source.fetch(direction, cursor.as_ref());
        ptrace!(?direction, ticket = ticket.get(), "Driver: fetch started");
        self.in_flight
            .push(fetch.map(move |result| (ticket, direction, result)).boxed_local());
    }

    /// Waits for the next fetch to settle and merges it.
    ///
    /// A follow-up fetch carried by [`MergeOutcome::Merged`] has already been started. Returns
    /// `None` when nothing is in flight.
    pub async fn next_merge(
        &mut self,
    ) -> Option<Result<MergeOutcome<P>, DriverError<S::Error>>> {
        let (ticket, direction, result) = self.in_flight.next().await?;
        Some(self.settle(ticket, direction, result))
    }

    /// Merges every outstanding fetch, stopping at the first error.
    pub async fn drain(&mut self) -> Result<(), DriverError<S::Error>> {
        while let Some(result) = self.next_merge().await {
            result?;
        }
        Ok(())
    }

    /// Processes visibility notifications and settled fetches until `events` ends.
    ///
    /// Settled fetches are handled before new notifications. Returns early with the first
    /// error; call `run` again (with the same stream) to resume. Fetches still in flight when the
    /// stream ends are left for [`Driver::next_merge`] / [`Driver::drain`].
    pub async fn run<St>(&mut self, mut events: St) -> Result<(), DriverError<S::Error>>
    where
        St: Stream<Item = Visibility> + Unpin,
    {
        loop {
            let step = if self.in_flight.is_empty() {
                Step::Event(events.next().await)
            } else {
                match future::select(self.in_flight.next(), events.next()).await {
                    Either::Left((settled, _)) => Step::Settled(settled),
                    Either::Right((event, _)) => Step::Event(event),
                }
            };

            match step {
                Step::Event(Some(visibility)) => {
                    self.on_visibility(visibility);
                }
                Step::Event(None) => return Ok(()),
                Step::Settled(Some((ticket, direction, result))) => {
                    self.settle(ticket, direction, result)?;
                }
                Step::Settled(None) => {}
            }
        }
    }

    fn settle(
        &mut self,
        ticket: Ticket,
        direction: LoadDirection,
        result: Result<Option<P>, S::Error>,
    ) -> Result<MergeOutcome<P>, DriverError<S::Error>> {
        let page = match result {
            Ok(page) => page,
            Err(source) => {
                pwarn!(?direction, ticket = ticket.get(), "Driver: fetch failed");
                return Err(DriverError::Fetch { direction, source });
            }
        };

        let outcome = self.controller.resolve(ticket, page)?;
        if let MergeOutcome::Merged {
            direction,
            inserted,
            evicted,
            next,
        } = &outcome
        {
            if let Some(evicted) = evicted {
                self.view.unmount(&evicted.page.id());
            }
            let window = self.controller.window();
            if let Some(page) = window.index_of(inserted).and_then(|i| window.get(i)) {
                self.view.mount(page, *direction);
            }
            if let Some(req) = next {
                self.spawn(req.clone());
            }
        }
        Ok(outcome)
    }

    /// Reads settled heights back from the view and applies scroll compensation.
    ///
    /// Call once per committed layout pass (after paint is scheduled), not before.
    pub fn on_layout_committed(&mut self) -> CompensationReport {
        let ids: Vec<P::Id> = self.controller.window().ids().collect();
        for id in ids {
            if let Some(height) = self.view.measure(&id) {
                self.controller.measure(&id, height);
            }
        }
        let report = self.controller.on_layout_committed(&mut self.viewport);
        if !report.is_idle() {
            pdebug!(
                applied = report.applied,
                deferred = report.deferred,
                delta = report.delta,
                anchored = report.anchored,
                "Driver: layout committed"
            );
        }
        report
    }

    /// Legacy manual scrolling: the gated translation for a raw wheel delta.
    pub fn on_wheel(&self, raw_delta: f64, scale: &dyn WheelScale) -> f64 {
        self.controller.translate_wheel(raw_delta, scale)
    }

    pub fn set_settings(&mut self, settings: Settings) -> Result<(), DriverError<S::Error>> {
        let pruned = self.controller.set_settings(settings)?;
        for evicted in pruned {
            self.view.unmount(&evicted.page.id());
        }
        Ok(())
    }

    pub fn toggle(&mut self, flag: SettingFlag) -> bool {
        self.controller.toggle(flag)
    }

    /// Abandons outstanding fetches and returns both directions to idle.
    ///
    /// Abandoned fetches still settle, but their results are discarded.
    pub fn reset(&mut self) {
        self.controller.reset();
    }

    /// Unmounts every page. Results that settle afterwards are discarded.
    pub fn unmount(&mut self) {
        let ids: Vec<P::Id> = self.controller.window().ids().collect();
        for id in &ids {
            self.view.unmount(id);
        }
        self.controller.unmount();
    }

    pub fn mount(&mut self) {
        self.controller.mount();
    }

    /// Runs a debug-surface action. Rejected unless `debug` is enabled.
    pub fn dispatch(
        &mut self,
        action: DebugAction,
    ) -> Result<DebugOutcome, DriverError<S::Error>> {
        if !self.controller.settings().debug {
            return Err(DriverError::DebugDisabled);
        }
        pdebug!(?action, "Driver::dispatch");
        Ok(match action {
            DebugAction::LoadBefore => DebugOutcome::Load(self.load(LoadDirection::Before)),
            DebugAction::LoadAfter => DebugOutcome::Load(self.load(LoadDirection::After)),
            DebugAction::Toggle(flag) => DebugOutcome::Toggled(self.toggle(flag)),
        })
    }
}

impl<P, S, V, W> core::fmt::Debug for Driver<P, S, V, W>
where
    P: Page,
    S: PageSource<P>,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Driver")
            .field("controller", &self.controller)
            .field("in_flight", &self.in_flight.len())
            .finish_non_exhaustive()
    }
}
