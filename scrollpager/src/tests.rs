use crate::*;

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, Ordering};

#[derive(Clone, Debug, PartialEq, Eq)]
struct TestPage(u32);

impl Page for TestPage {
    type Id = u32;

    fn id(&self) -> u32 {
        self.0
    }
}

fn ids(window: &PageWindow<TestPage>) -> Vec<u32> {
    window.ids().collect()
}

fn controller(settings: Settings) -> PaginationController<TestPage> {
    PaginationController::new(settings).unwrap()
}

/// Issues a fetch through the sentinel for `direction` and resolves it.
///
/// The sentinel leaves the viewport before the result arrives, so no follow-up fetch is issued.
fn load(
    c: &mut PaginationController<TestPage>,
    direction: LoadDirection,
    page: Option<TestPage>,
) -> MergeOutcome<TestPage> {
    let edge = c.edge_for(direction);
    let req = c
        .on_visibility(Visibility::new(edge, 1.0))
        .expect("sentinel should trigger a fetch");
    assert_eq!(req.direction, direction);
    assert!(c.on_visibility(Visibility::new(edge, 0.0)).is_none());
    c.resolve(req.ticket, page).unwrap()
}

#[test]
fn append_to_full_window_evicts_first_page() {
    let mut w = PageWindow::new(2);
    w.append(Some(TestPage(1))).unwrap();
    w.append(Some(TestPage(2))).unwrap();

    let ins = w.append(Some(TestPage(3))).unwrap();
    assert_eq!(ids(&w), [2, 3]);
    assert_eq!(ins.evicted().map(|e| e.page.0), Some(1));
}

#[test]
fn prepend_to_full_window_evicts_last_page_with_its_height() {
    let mut w = PageWindow::new(2);
    w.append(Some(TestPage(1))).unwrap();
    w.append(Some(TestPage(2))).unwrap();
    assert!(w.measure(&2, 70));

    let evicted = w.prepend(Some(TestPage(0))).unwrap().into_evicted().unwrap();
    assert_eq!(evicted.page, TestPage(2));
    assert_eq!(evicted.height, Some(70));
    assert_eq!(ids(&w), [0, 1]);
    assert_eq!(w.height_of(&2), None);
}

#[test]
fn absent_page_leaves_window_unchanged() {
    let mut w = PageWindow::new(3);
    w.append(Some(TestPage(1))).unwrap();

    assert!(w.prepend(None).unwrap().is_unchanged());
    assert!(w.append(None).unwrap().is_unchanged());
    assert_eq!(ids(&w), [1]);
}

#[test]
fn duplicate_page_is_rejected_without_mutation() {
    let mut w = PageWindow::new(2);
    w.append(Some(TestPage(1))).unwrap();
    w.append(Some(TestPage(2))).unwrap();

    assert_eq!(w.prepend(Some(TestPage(2))), Err(WindowError::DuplicatePage));
    assert_eq!(ids(&w), [1, 2]);
}

#[test]
fn shrinking_capacity_prunes_from_the_end() {
    let mut w = PageWindow::new(4);
    for i in 0..4 {
        w.append(Some(TestPage(i))).unwrap();
    }
    let pruned = w.set_capacity(2);
    assert_eq!(pruned.iter().map(|e| e.page.0).collect::<Vec<_>>(), [3, 2]);
    assert_eq!(ids(&w), [0, 1]);
    assert_eq!(w.capacity(), 2);
}

#[test]
fn measure_ignores_pages_outside_the_window() {
    let mut w = PageWindow::new(2);
    w.append(Some(TestPage(1))).unwrap();
    assert!(!w.measure(&9, 10));
    assert!(w.measure(&1, 10));
    assert_eq!(w.measured_height(), 10);
}

#[test]
fn empty_window_exhausts_before_on_absent_result() {
    let mut c = controller(Settings::default());
    let outcome = load(&mut c, LoadDirection::Before, None);

    assert_eq!(outcome, MergeOutcome::Exhausted(LoadDirection::Before));
    assert!(c.window().is_empty());
    assert!(c.state(LoadDirection::Before).is_exhausted());
    assert!(c.state(LoadDirection::After).is_idle());
}

#[test]
fn repeated_triggers_issue_a_single_fetch() {
    let mut c = controller(Settings::default());
    let first = c.on_visibility(Visibility::trailing(0.4));
    let second = c.on_visibility(Visibility::trailing(0.9));
    let third = c.on_visibility(Visibility::trailing(0.9));

    let first = first.unwrap();
    assert_eq!(first.direction, LoadDirection::After);
    assert_eq!(first.cursor, None);
    assert!(second.is_none());
    assert!(third.is_none());
    assert_eq!(
        c.state(LoadDirection::After),
        DirectionState::Requesting(first.ticket)
    );
}

#[test]
fn invisible_sentinel_does_not_trigger() {
    let mut c = controller(Settings::default());
    assert!(c.on_visibility(Visibility::leading(0.0)).is_none());

    let mut c = controller(Settings::default().with_load_threshold(0.05));
    assert!(c.on_visibility(Visibility::leading(0.05)).is_none());
    assert!(c.on_visibility(Visibility::leading(0.06)).is_some());
}

#[test]
fn exhaustion_is_sticky_until_a_setting_is_toggled() {
    let mut c = controller(Settings::default());
    load(&mut c, LoadDirection::After, None);

    for _ in 0..5 {
        assert!(c.on_visibility(Visibility::trailing(1.0)).is_none());
    }

    c.toggle(SettingFlag::PagingEnabled);
    c.toggle(SettingFlag::PagingEnabled);
    assert!(c.state(LoadDirection::After).is_idle());
    assert!(c.on_visibility(Visibility::trailing(1.0)).is_some());
}

#[test]
fn settings_change_without_flag_change_keeps_exhaustion() {
    let mut c = controller(Settings::default());
    load(&mut c, LoadDirection::Before, None);

    c.update_settings(|s| s.pause_threshold = 0.8).unwrap();
    assert!(c.state(LoadDirection::Before).is_exhausted());

    c.update_settings(|s| s.debug = true).unwrap();
    assert!(c.state(LoadDirection::Before).is_idle());
}

#[test]
fn merges_apply_in_settlement_order() {
    let mut c = controller(Settings::default());
    load(&mut c, LoadDirection::After, Some(TestPage(10)));
    load(&mut c, LoadDirection::After, Some(TestPage(11)));

    // Issue After first, then Before; Before settles first.
    let after = c.on_visibility(Visibility::trailing(1.0)).unwrap();
    let before = c.on_visibility(Visibility::leading(1.0)).unwrap();
    assert_eq!(after.cursor, Some(TestPage(11)));
    assert_eq!(before.cursor, Some(TestPage(10)));

    c.resolve(before.ticket, Some(TestPage(1))).unwrap();
    c.resolve(after.ticket, Some(TestPage(2))).unwrap();
    assert_eq!(ids(c.window()), [1, 10, 11, 2]);
}

#[test]
fn debug_mode_only_loads_on_request() {
    let mut c = controller(Settings::default().with_debug(true));
    assert!(c.on_visibility(Visibility::trailing(1.0)).is_none());

    let req = c.request(LoadDirection::After).unwrap();
    assert!(c.request(LoadDirection::After).is_none());
    c.resolve(req.ticket, Some(TestPage(1))).unwrap();
    assert_eq!(ids(c.window()), [1]);
}

#[test]
fn manual_request_reopens_an_exhausted_direction() {
    let mut c = controller(Settings::default());
    load(&mut c, LoadDirection::Before, None);

    let req = c.request(LoadDirection::Before).unwrap();
    c.resolve(req.ticket, Some(TestPage(5))).unwrap();
    assert!(c.state(LoadDirection::Before).is_idle());
    assert_eq!(ids(c.window()), [5]);
}

#[test]
fn paging_disabled_ignores_sentinels() {
    let mut c = controller(Settings::default().with_paging_enabled(false));
    assert!(c.on_visibility(Visibility::leading(1.0)).is_none());
    assert!(c.on_visibility(Visibility::trailing(1.0)).is_none());
}

#[test]
fn prepend_compensates_by_inserted_height_exactly_once() {
    let mut c = controller(Settings::default());
    load(&mut c, LoadDirection::After, Some(TestPage(1)));
    c.measure(&1, 300);
    let mut vp = MemoryViewport::new(200, 300).with_offset(20);
    assert_eq!(c.on_layout_committed(&mut vp).applied, 0);

    load(&mut c, LoadDirection::Before, Some(TestPage(0)));
    let anchor = ScrollAnchor::capture(&vp);
    c.measure(&0, 120);

    let report = c.on_layout_committed(&mut vp);
    assert_eq!(report.applied, 1);
    assert_eq!(report.delta, 120);
    assert_eq!(anchor.drift(&vp), 120);

    assert!(c.on_layout_committed(&mut vp).is_idle());
    assert_eq!(vp.offset, 140);
}

#[test]
fn compensation_waits_for_layout() {
    let mut c = controller(Settings::default());
    load(&mut c, LoadDirection::Before, Some(TestPage(0)));
    let mut vp = MemoryViewport::new(200, 0).with_offset(50);

    let report = c.on_layout_committed(&mut vp);
    assert_eq!(report.deferred, 1);
    assert_eq!(vp.offset, 50);
    assert_eq!(c.compensator().pending_len(), 1);

    c.measure(&0, 80);
    assert_eq!(c.on_layout_committed(&mut vp).applied, 1);
    assert_eq!(vp.offset, 130);
}

#[test]
fn compensation_reads_the_offset_at_apply_time() {
    let mut c = controller(Settings::default());
    load(&mut c, LoadDirection::Before, Some(TestPage(0)));
    let mut vp = MemoryViewport::new(200, 0).with_offset(50);

    // User scrolls between the merge and the layout commit.
    vp.offset = 75;
    c.measure(&0, 10);
    c.on_layout_committed(&mut vp);
    assert_eq!(vp.offset, 85);
}

#[test]
fn append_never_compensates() {
    let mut c = controller(Settings::default());
    load(&mut c, LoadDirection::After, Some(TestPage(1)));
    c.measure(&1, 90);
    let mut vp = MemoryViewport::new(50, 90).with_offset(10);

    assert!(c.on_layout_committed(&mut vp).is_idle());
    assert_eq!(vp.offset, 10);
}

#[test]
fn evicted_page_drops_its_pending_compensation() {
    let mut c = controller(Settings::default().with_max_page_buffer(1));
    load(&mut c, LoadDirection::Before, Some(TestPage(0)));
    load(&mut c, LoadDirection::After, Some(TestPage(1)));
    let mut vp = MemoryViewport::new(50, 0);

    let report = c.on_layout_committed(&mut vp);
    assert_eq!(report.dropped, 1);
    assert_eq!(vp.offset, 0);
}

#[test]
fn net_of_eviction_subtracts_evicted_height() {
    let settings = Settings::default()
        .with_max_page_buffer(2)
        .with_compensation(Compensation::ScrollOffsetNetOfEviction);
    let mut c = controller(settings);
    load(&mut c, LoadDirection::After, Some(TestPage(1)));
    load(&mut c, LoadDirection::After, Some(TestPage(2)));
    c.measure(&1, 100);
    c.measure(&2, 30);

    let outcome = load(&mut c, LoadDirection::Before, Some(TestPage(0)));
    let MergeOutcome::Merged { evicted, .. } = outcome else {
        panic!("expected a merge");
    };
    assert_eq!(evicted.and_then(|e| e.height), Some(30));

    c.measure(&0, 100);
    let mut vp = MemoryViewport::new(50, 200).with_offset(100);
    c.on_layout_committed(&mut vp);
    assert_eq!(vp.offset, 170);
}

#[test]
fn translate_strategy_moves_the_container_not_the_offset() {
    let mut c = controller(Settings::default().with_compensation(Compensation::Translate));
    load(&mut c, LoadDirection::Before, Some(TestPage(0)));
    c.measure(&0, 60);
    let mut vp = MemoryViewport::new(50, 60).with_offset(5);

    let report = c.on_layout_committed(&mut vp);
    assert_eq!(report.delta, -60);
    assert_eq!(c.compensator().translation(), -60);
    assert_eq!(vp.offset, 5);
}

#[test]
fn anchor_at_mount_centers_on_trailing_buffer() {
    let mut comp = ScrollCompensator::<u32>::new(Compensation::Translate);
    comp.anchor_at_mount(250);
    assert_eq!(comp.translation(), -250);
    comp.clear();
    assert_eq!(comp.translation(), 0);
}

#[test]
fn leading_edge_reached_at_mount_shifts_the_container() {
    let mut c = controller(Settings::default().with_compensation(Compensation::Translate));
    load(&mut c, LoadDirection::After, Some(TestPage(1)));
    load(&mut c, LoadDirection::After, Some(TestPage(2)));
    assert_eq!(
        load(&mut c, LoadDirection::Before, None),
        MergeOutcome::Exhausted(LoadDirection::Before)
    );
    let mut vp = MemoryViewport::new(100, 150).with_offset(7);

    c.measure(&1, 100);
    assert!(!c.on_layout_committed(&mut vp).anchored);
    c.measure(&2, 50);
    let report = c.on_layout_committed(&mut vp);
    assert!(report.anchored);
    assert_eq!(c.compensator().translation(), -150);
    assert_eq!(vp.offset, 7);

    assert!(c.on_layout_committed(&mut vp).is_idle());
    assert_eq!(c.snapshot().translation, -150);
}

#[test]
fn mount_shift_needs_translate_and_an_untouched_leading_edge() {
    let mut c = controller(Settings::default());
    load(&mut c, LoadDirection::After, Some(TestPage(1)));
    load(&mut c, LoadDirection::Before, None);
    c.measure(&1, 100);
    let mut vp = MemoryViewport::new(50, 100);
    assert!(!c.on_layout_committed(&mut vp).anchored);
    assert_eq!(c.compensator().translation(), 0);

    let mut c = controller(Settings::default().with_compensation(Compensation::Translate));
    load(&mut c, LoadDirection::Before, Some(TestPage(0)));
    load(&mut c, LoadDirection::Before, None);
    c.measure(&0, 40);
    let report = c.on_layout_committed(&mut vp);
    assert!(!report.anchored);
    assert_eq!(c.compensator().translation(), -40);
}

#[test]
fn stale_ticket_after_reset_is_discarded() {
    let mut c = controller(Settings::default());
    let stalled = c.on_visibility(Visibility::trailing(1.0)).unwrap();

    // The host fetch failed and was never resolved.
    assert!(c.on_visibility(Visibility::trailing(1.0)).is_none());

    c.reset();
    let retry = c.on_visibility(Visibility::trailing(1.0)).unwrap();
    assert_ne!(retry.ticket, stalled.ticket);

    assert_eq!(
        c.resolve(stalled.ticket, Some(TestPage(1))).unwrap(),
        MergeOutcome::Discarded
    );
    c.resolve(retry.ticket, Some(TestPage(2))).unwrap();
    assert_eq!(ids(c.window()), [2]);
}

#[test]
fn results_after_unmount_are_discarded() {
    let mut c = controller(Settings::default());
    load(&mut c, LoadDirection::After, Some(TestPage(1)));
    let req = c.on_visibility(Visibility::trailing(1.0)).unwrap();

    c.unmount();
    assert_eq!(
        c.resolve(req.ticket, Some(TestPage(2))).unwrap(),
        MergeOutcome::Discarded
    );
    assert!(c.window().is_empty());
    assert!(c.on_visibility(Visibility::trailing(1.0)).is_none());

    c.mount();
    assert!(c.on_visibility(Visibility::trailing(1.0)).is_some());
}

#[test]
fn duplicate_merge_returns_direction_to_idle() {
    let mut c = controller(Settings::default());
    load(&mut c, LoadDirection::After, Some(TestPage(1)));
    let req = c.on_visibility(Visibility::leading(1.0)).unwrap();

    let err = c.resolve(req.ticket, Some(TestPage(1))).unwrap_err();
    assert_eq!(err, ControllerError::Window(WindowError::DuplicatePage));
    assert!(c.state(LoadDirection::Before).is_idle());
    assert_eq!(ids(c.window()), [1]);
}

#[test]
fn bottom_up_swaps_edges_and_compensates_appends() {
    let mut c = controller(Settings::default().with_start_bottom_up(true));
    let req = c.on_visibility(Visibility::leading(1.0)).unwrap();
    assert_eq!(req.direction, LoadDirection::After);
    assert_eq!(c.edge_for(LoadDirection::Before), SentinelEdge::Trailing);
    c.on_visibility(Visibility::leading(0.0));

    c.resolve(req.ticket, Some(TestPage(1))).unwrap();
    c.measure(&1, 500);

    // The initial anchor overrides the compensation applied in the same pass.
    let mut vp = MemoryViewport::new(200, 500);
    let report = c.on_layout_committed(&mut vp);
    assert!(report.anchored);
    assert_eq!(report.applied, 1);
    assert_eq!(vp.offset, 300);

    load(&mut c, LoadDirection::Before, Some(TestPage(0)));
    c.measure(&0, 40);
    let report = c.on_layout_committed(&mut vp);
    assert!(report.is_idle());
}

#[test]
fn toggling_bottom_up_rearms_the_end_anchor() {
    let mut c = controller(Settings::default());
    load(&mut c, LoadDirection::After, Some(TestPage(1)));
    c.measure(&1, 400);
    let mut vp = MemoryViewport::new(100, 400);
    assert!(!c.on_layout_committed(&mut vp).anchored);

    assert!(c.toggle(SettingFlag::StartBottomUp));
    assert!(c.on_layout_committed(&mut vp).anchored);
    assert_eq!(vp.offset, 300);

    // Switching back before layout cancels a pending anchor.
    vp.offset = 0;
    assert!(!c.toggle(SettingFlag::StartBottomUp));
    assert!(c.toggle(SettingFlag::StartBottomUp));
    assert!(!c.toggle(SettingFlag::StartBottomUp));
    assert!(!c.on_layout_committed(&mut vp).anchored);
    assert_eq!(vp.offset, 0);
}

#[test]
fn scroll_anchor_restores_a_captured_offset() {
    let mut vp = MemoryViewport::new(100, 1000).with_offset(240);
    let anchor = ScrollAnchor::capture(&vp);
    vp.offset = 900;
    assert_eq!(anchor.drift(&vp), 660);

    anchor.restore(&mut vp);
    assert_eq!(vp.offset, 240);
    assert_eq!(anchor.drift(&vp), 0);
}

#[test]
fn window_reports_full_at_capacity() {
    let mut w = PageWindow::new(2);
    w.append(Some(TestPage(1))).unwrap();
    assert!(!w.is_full());
    w.append(Some(TestPage(2))).unwrap();
    assert!(w.is_full());
    w.prepend(Some(TestPage(0))).unwrap();
    assert!(w.is_full());
    assert_eq!(w.len(), 2);
}

#[test]
fn bottom_up_anchor_waits_for_every_page_to_be_measured() {
    let mut c = controller(Settings::default().with_start_bottom_up(true));
    load(&mut c, LoadDirection::Before, Some(TestPage(1)));
    let mut vp = MemoryViewport::new(100, 400);

    assert!(!c.on_layout_committed(&mut vp).anchored);
    c.measure(&1, 400);
    assert!(c.on_layout_committed(&mut vp).anchored);
    assert_eq!(vp.offset, 300);
}

#[test]
fn gate_blocks_movement_past_a_mostly_visible_sentinel() {
    let mut gate = ScrollGate::new(0.5);
    assert_eq!(gate.translate(-10.0, &UnitScale), -10.0);

    gate.on_visibility(Visibility::leading(0.6));
    assert!(!gate.can_scroll_up());
    assert!(gate.can_scroll_down());
    assert_eq!(gate.translate(-10.0, &UnitScale), 0.0);
    assert_eq!(gate.translate(10.0, &UnitScale), 10.0);

    gate.on_visibility(Visibility::leading(0.5));
    assert!(gate.can_scroll_up());
}

#[test]
fn gate_applies_host_scale() {
    let gate = ScrollGate::default();
    let double = |d: f64| d * 2.0;
    assert_eq!(gate.translate(3.0, &double), 6.0);
    assert_eq!(gate.translate(f64::NAN, &UnitScale), 0.0);
}

#[test]
fn exhausted_direction_closes_its_gate_edge_while_visible() {
    let mut c = controller(Settings::default());
    load(&mut c, LoadDirection::After, None);

    // Below the pause threshold, but the end of the data is on screen.
    c.on_visibility(Visibility::trailing(0.2));
    assert!(!c.gate().can_scroll_down());
    assert_eq!(c.translate_wheel(25.0, &UnitScale), 0.0);
    assert_eq!(c.translate_wheel(-25.0, &UnitScale), -25.0);
}

#[test]
fn exhausted_edge_reopens_after_scrolling_back() {
    let mut c = controller(Settings::default());
    for i in 0..5 {
        load(&mut c, LoadDirection::After, Some(TestPage(i)));
    }
    let req = c.on_visibility(Visibility::trailing(1.0)).unwrap();
    c.resolve(req.ticket, None).unwrap();
    assert_eq!(c.translate_wheel(50.0, &UnitScale), 0.0);

    // User scrolls back up; the trailing sentinel leaves the viewport.
    c.on_visibility(Visibility::trailing(0.0));
    assert!(c.gate().can_scroll_down());
    assert_eq!(c.translate_wheel(50.0, &UnitScale), 50.0);

    c.on_visibility(Visibility::trailing(0.1));
    assert_eq!(c.translate_wheel(50.0, &UnitScale), 0.0);
    assert!(c.on_visibility(Visibility::trailing(1.0)).is_none());
}

#[test]
fn visible_sentinel_requests_the_next_page_after_a_merge() {
    let mut c = controller(Settings::default());
    let req = c.on_visibility(Visibility::trailing(1.0)).unwrap();

    let MergeOutcome::Merged { next, .. } = c.resolve(req.ticket, Some(TestPage(1))).unwrap() else {
        panic!("expected a merge");
    };
    let next = next.expect("sentinel is still visible");
    assert_eq!(next.direction, LoadDirection::After);
    assert_eq!(next.cursor, Some(TestPage(1)));
    assert_eq!(
        c.state(LoadDirection::After),
        DirectionState::Requesting(next.ticket)
    );

    // The new page pushed the sentinel out of view.
    c.on_visibility(Visibility::trailing(0.0));
    let outcome = c.resolve(next.ticket, Some(TestPage(2))).unwrap();
    assert!(matches!(outcome, MergeOutcome::Merged { next: None, .. }));
    assert!(c.state(LoadDirection::After).is_idle());
    assert_eq!(ids(c.window()), [1, 2]);
}

#[test]
fn follow_up_respects_paging_switch() {
    let mut c = controller(Settings::default());
    let req = c.on_visibility(Visibility::leading(1.0)).unwrap();
    c.update_settings(|s| s.is_paging_enabled = false).unwrap();

    let outcome = c.resolve(req.ticket, Some(TestPage(0))).unwrap();
    assert!(matches!(outcome, MergeOutcome::Merged { next: None, .. }));
    assert!(c.state(LoadDirection::Before).is_idle());
}

#[test]
fn sentinel_edges_map_to_directions() {
    assert_eq!(SentinelEdge::Leading.direction(false), LoadDirection::Before);
    assert_eq!(SentinelEdge::Trailing.direction(false), LoadDirection::After);
    assert_eq!(SentinelEdge::Leading.direction(true), LoadDirection::After);
    assert_eq!(
        SentinelEdge::for_direction(LoadDirection::Before, true),
        SentinelEdge::Trailing
    );
}

#[test]
fn sentinels_clamp_out_of_range_ratios() {
    let mut s = EdgeSentinels::new();
    assert!(!s.observe(Visibility::leading(f32::NAN), 0.0));
    assert!(s.observe(Visibility::trailing(3.0), 0.0));
    assert_eq!(s.ratio(SentinelEdge::Trailing), 1.0);
    assert!(s.is_triggered(SentinelEdge::Trailing, 0.5));
}

#[test]
fn observer_config_covers_load_and_pause_thresholds() {
    let settings = Settings::default().with_load_threshold(0.05);
    let config = ObserverConfig::for_settings(&settings).with_margin(200);
    assert_eq!(config.thresholds, [0.0, 0.05, 0.5, 1.0]);
    assert_eq!(config.margin, 200);
}

#[test]
fn invalid_settings_are_rejected() {
    assert_eq!(
        PaginationController::<TestPage>::new(Settings::default().with_max_page_buffer(0))
            .unwrap_err(),
        SettingsError::ZeroPageBuffer
    );
    assert!(matches!(
        Settings::default().with_pause_threshold(1.5).validate(),
        Err(SettingsError::ThresholdOutOfRange {
            name: "pause_threshold",
            ..
        })
    ));

    let mut c = controller(Settings::default());
    assert!(c.update_settings(|s| s.load_threshold = f32::NAN).is_err());
    assert_eq!(c.settings().load_threshold, 0.0);
}

#[test]
fn shrinking_buffer_through_settings_returns_pruned_pages() {
    let mut c = controller(Settings::default());
    for i in 0..4 {
        load(&mut c, LoadDirection::After, Some(TestPage(i)));
    }
    let pruned = c.update_settings(|s| s.max_page_buffer = 3).unwrap();
    assert_eq!(pruned.len(), 1);
    assert_eq!(pruned[0].page, TestPage(3));
    assert_eq!(ids(c.window()), [0, 1, 2]);
}

#[test]
fn on_change_fires_for_state_transitions() {
    static CALLS: AtomicUsize = AtomicUsize::new(0);
    let seen = Arc::new(AtomicUsize::new(0));
    let seen2 = Arc::clone(&seen);

    let mut c = controller(Settings::default()).with_on_change(Some(
        move |c: &PaginationController<TestPage>| {
            seen2.store(c.window().len(), Ordering::SeqCst);
            CALLS.fetch_add(1, Ordering::SeqCst);
        },
    ));
    load(&mut c, LoadDirection::After, Some(TestPage(1)));

    // Issue + merge.
    assert_eq!(CALLS.load(Ordering::SeqCst), 2);
    assert_eq!(seen.load(Ordering::SeqCst), 1);
}

#[test]
fn snapshot_reflects_controller_state() {
    let mut c = controller(Settings::default());
    load(&mut c, LoadDirection::After, Some(TestPage(7)));
    c.measure(&7, 33);
    load(&mut c, LoadDirection::Before, None);

    let snap = c.snapshot();
    assert!(snap.mounted);
    assert_eq!(snap.pages, [7]);
    assert_eq!(snap.measured_height, 33);
    assert_eq!(snap.before, DirectionState::Exhausted);
    assert_eq!(snap.after, DirectionState::Idle);
}

#[cfg(feature = "serde")]
#[test]
fn partial_settings_merge_over_defaults() {
    let settings: Settings =
        serde_json::from_str(r#"{ "start_bottom_up": true, "max_page_buffer": 4 }"#).unwrap();
    assert!(settings.start_bottom_up);
    assert_eq!(settings.max_page_buffer, 4);
    assert!(settings.is_paging_enabled);
    assert!(!settings.debug);
    assert_eq!(settings.compensation, Compensation::ScrollOffset);

    let settings: Settings =
        serde_json::from_str(r#"{ "compensation": "translate" }"#).unwrap();
    assert_eq!(settings.compensation, Compensation::Translate);
    assert_eq!(settings.max_page_buffer, 15);
}
