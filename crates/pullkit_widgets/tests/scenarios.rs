//! End-to-end scenarios for the edge-loading controllers
//!
//! These tests drive controllers the way a host would:
//! - scroll notifications fed through the registry or straight to a controller
//! - insets observed on the container side
//! - caller-driven `stop()` / `set_exhausted()` completions

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use pullkit_core::{Edge, EdgeInsets, Point, ScrollMetrics, Size, StateTransitions};
use pullkit_widgets::prelude::*;
use pullkit_widgets::SharedInsetCoordinator;

const VIEWPORT: Size = Size::new(320.0, 500.0);

/// Container that records every inset request it receives
struct RecordingContainer {
    metrics: ScrollMetrics,
    requests: Vec<(Edge, f32)>,
}

impl RecordingContainer {
    fn new(inset: EdgeInsets) -> Self {
        Self {
            metrics: ScrollMetrics::new(VIEWPORT)
                .content_height(1000.0)
                .inset(inset),
            requests: Vec::new(),
        }
    }
}

impl ScrollContainer for RecordingContainer {
    fn content_inset(&self) -> EdgeInsets {
        self.metrics.content_inset
    }

    fn metrics(&self) -> ScrollMetrics {
        self.metrics
    }

    fn apply_inset_transition(&mut self, edge: Edge, value: f32, _transition: InsetTransition) {
        self.requests.push((edge, value));
        self.metrics.content_inset.set(edge, value);
    }

    fn scroll_to(&mut self, offset: Point, _animated: bool) {
        self.metrics.content_offset = offset;
    }
}

fn counter() -> (Arc<AtomicUsize>, impl FnMut() + Send + 'static) {
    let count = Arc::new(AtomicUsize::new(0));
    let handle = count.clone();
    (count, move || {
        handle.fetch_add(1, Ordering::SeqCst);
    })
}

fn immediate_pull() -> PullToRefresh {
    PullToRefresh::with_config(PullToRefreshConfig::immediate())
}

fn immediate_infinite() -> InfiniteScroll {
    InfiniteScroll::with_config(InfiniteScrollConfig::immediate())
}

fn recording_coordinator() -> (Arc<Mutex<RecordingContainer>>, SharedInsetCoordinator) {
    let recorder = Arc::new(Mutex::new(RecordingContainer::new(EdgeInsets::ZERO)));
    let container: SharedContainer = recorder.clone();
    let coordinator = InsetCoordinator::shared(&container);
    (recorder, coordinator)
}

#[test]
fn test_pull_to_refresh_scenario() {
    let view = Arc::new(Mutex::new(ScrollView::new(VIEWPORT)));
    let container: SharedContainer = view.clone();
    let mut registry = ControllerRegistry::new();
    let id = registry.register(&container);

    let (fired, handler) = counter();
    registry
        .install_pull_to_refresh(id, immediate_pull().on_refresh(handler))
        .unwrap();

    let event = view.lock().unwrap().drag_to(-80.0);
    registry.dispatch(id, event).unwrap();
    assert_eq!(registry.pull_to_refresh(id).unwrap().state(), RefreshState::Triggered);

    let event = view.lock().unwrap().release();
    registry.dispatch(id, event).unwrap();
    assert_eq!(registry.pull_to_refresh(id).unwrap().state(), RefreshState::Loading);
    assert_eq!(view.lock().unwrap().content_inset().top, 60.0);
    assert_eq!(fired.load(Ordering::SeqCst), 1);

    assert!(registry.pull_to_refresh_mut(id).unwrap().stop());
    assert_eq!(registry.pull_to_refresh(id).unwrap().state(), RefreshState::Stopped);
    assert_eq!(view.lock().unwrap().content_inset().top, 0.0);
}

#[test]
fn test_infinite_scroll_scenario() {
    let mut view = ScrollView::new(VIEWPORT);
    view.set_content_size(Size::new(320.0, 1000.0));
    let view = Arc::new(Mutex::new(view));
    let container: SharedContainer = view.clone();
    let mut registry = ControllerRegistry::new();
    let id = registry.register(&container);

    let (fired, handler) = counter();
    registry
        .install_infinite_scroll(id, immediate_infinite().on_load_more(handler))
        .unwrap();

    let event = view.lock().unwrap().drag_to(600.0);
    registry.dispatch(id, event).unwrap();
    assert_eq!(
        registry.infinite_scroll(id).unwrap().state(),
        InfiniteScrollState::Triggered
    );

    let event = view.lock().unwrap().release();
    registry.dispatch(id, event).unwrap();
    assert_eq!(
        registry.infinite_scroll(id).unwrap().state(),
        InfiniteScrollState::Loading
    );
    assert_eq!(view.lock().unwrap().content_inset().bottom, 60.0);
    assert_eq!(fired.load(Ordering::SeqCst), 1);

    assert!(registry.infinite_scroll_mut(id).unwrap().set_exhausted(true));
    assert_eq!(view.lock().unwrap().content_inset().bottom, 0.0);

    for _ in 0..3 {
        let event = view.lock().unwrap().drag_to(600.0);
        registry.dispatch(id, event).unwrap();
        let event = view.lock().unwrap().release();
        registry.dispatch(id, event).unwrap();
    }
    assert_eq!(
        registry.infinite_scroll(id).unwrap().state(),
        InfiniteScrollState::AllLoaded
    );
    assert_eq!(fired.load(Ordering::SeqCst), 1);
}

#[test]
fn test_infinite_scroll_boundary_does_not_trigger() {
    let (_recorder, coordinator) = recording_coordinator();
    let mut infinite = immediate_infinite();
    infinite.attach(&coordinator, 0.0).unwrap();
    // 560 + 500 - 0 == 1000 + 60
    let at_threshold = ScrollMetrics::new(VIEWPORT)
        .content_height(1000.0)
        .offset_y(560.0)
        .dragging(true);

    infinite.on_content_offset_changed(&at_threshold);
    assert_eq!(infinite.state(), InfiniteScrollState::Stopped);

    infinite.on_content_offset_changed(&at_threshold.offset_y(560.5));
    assert_eq!(infinite.state(), InfiniteScrollState::Triggered);
}

#[test]
fn test_disabled_while_triggered_holds_state() {
    let (_recorder, coordinator) = recording_coordinator();
    let mut refresh = immediate_pull();
    refresh.attach(&coordinator, 0.0).unwrap();
    let pulled = ScrollMetrics::new(VIEWPORT).offset_y(-80.0);

    refresh.on_content_offset_changed(&pulled.dragging(true));
    refresh.set_enabled(false);
    refresh.on_content_offset_changed(&pulled.dragging(false));
    assert_eq!(refresh.state(), RefreshState::Triggered);

    let mut infinite = immediate_infinite();
    infinite.attach(&coordinator, 0.0).unwrap();
    let past_end = ScrollMetrics::new(VIEWPORT)
        .content_height(1000.0)
        .offset_y(600.0);

    infinite.on_content_offset_changed(&past_end.dragging(true));
    infinite.set_enabled(false);
    infinite.on_content_offset_changed(&past_end.dragging(false));
    assert_eq!(infinite.state(), InfiniteScrollState::Triggered);
}

#[test]
fn test_double_stop_reverts_once() {
    let (recorder, coordinator) = recording_coordinator();

    let mut refresh = immediate_pull();
    refresh.attach(&coordinator, 0.0).unwrap();
    refresh.start();
    refresh.stop();
    refresh.stop();

    let requests = recorder.lock().unwrap().requests.clone();
    assert_eq!(requests, vec![(Edge::Top, 60.0), (Edge::Top, 0.0)]);
}

#[test]
fn test_attach_detach_round_trip_leaves_inset_untouched() {
    let inset = EdgeInsets::new(44.0, 34.0, 0.0, 0.0);
    let recorder = Arc::new(Mutex::new(RecordingContainer::new(inset)));
    let container: SharedContainer = recorder.clone();
    let mut registry = ControllerRegistry::new();
    let id = registry.register(&container);

    registry.install_pull_to_refresh(id, immediate_pull()).unwrap();
    registry.install_infinite_scroll(id, immediate_infinite()).unwrap();
    registry.detach(id).unwrap();

    let recorder = recorder.lock().unwrap();
    assert!(recorder.requests.is_empty());
    assert_eq!(recorder.content_inset(), inset);
}

#[test]
fn test_panicking_handler_leaves_loading_recoverable() {
    let (recorder, coordinator) = recording_coordinator();
    let mut refresh = immediate_pull().on_refresh(|| panic!("refresh request failed"));
    refresh.attach(&coordinator, 0.0).unwrap();

    let pulled = ScrollMetrics::new(VIEWPORT).offset_y(-80.0);
    refresh.on_content_offset_changed(&pulled.dragging(true));
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        refresh.on_content_offset_changed(&pulled.dragging(false));
    }));

    assert!(result.is_err());
    assert_eq!(refresh.state(), RefreshState::Loading);
    assert_eq!(recorder.lock().unwrap().content_inset().top, 60.0);

    assert!(refresh.stop());
    assert_eq!(recorder.lock().unwrap().content_inset().top, 0.0);
}

#[test]
fn test_detached_controller_is_inert() {
    let (recorder, coordinator) = recording_coordinator();
    let (fired, handler) = counter();
    let mut infinite = immediate_infinite().on_load_more(handler);
    infinite.attach(&coordinator, 0.0).unwrap();
    infinite.detach();

    let past_end = ScrollMetrics::new(VIEWPORT)
        .content_height(1000.0)
        .offset_y(600.0);
    infinite.on_content_offset_changed(&past_end.dragging(true));
    infinite.on_content_offset_changed(&past_end.dragging(false));
    assert!(!infinite.start());

    assert_eq!(infinite.state(), InfiniteScrollState::Stopped);
    assert_eq!(fired.load(Ordering::SeqCst), 0);
    assert!(recorder.lock().unwrap().requests.is_empty());
}

#[test]
fn test_dropping_controller_reverts_inset() {
    let (recorder, coordinator) = recording_coordinator();

    {
        let mut infinite = immediate_infinite();
        infinite.attach(&coordinator, 0.0).unwrap();
        infinite.start();
    }

    assert_eq!(recorder.lock().unwrap().content_inset().bottom, 0.0);
    assert!(!coordinator.lock().unwrap().is_claimed(Edge::Bottom));
}

#[test]
fn test_random_interleavings_keep_invariants() {
    let mut rng = fastrand::Rng::with_seed(0x9e37_79b9_7f4a_7c15);

    for _ in 0..50 {
        let (recorder, coordinator) = recording_coordinator();

        let (refreshes, on_refresh) = counter();
        let (loads, on_load) = counter();
        let mut refresh = immediate_pull().on_refresh(on_refresh);
        let mut infinite = immediate_infinite().on_load_more(on_load);
        refresh.attach(&coordinator, 0.0).unwrap();
        infinite.attach(&coordinator, 0.0).unwrap();

        let mut refresh_spans = 0;
        let mut load_spans = 0;

        for _ in 0..200 {
            let before = (refresh.state(), infinite.state());

            match rng.u64(..10) {
                0 => {
                    refresh.stop();
                }
                1 => {
                    infinite.stop();
                }
                2 => {
                    refresh.start();
                }
                3 => {
                    infinite.set_exhausted(rng.bool());
                }
                4 => refresh.set_enabled(rng.u64(..4) != 0),
                _ => {
                    let offset = rng.i32(-200..700) as f32;
                    let metrics = ScrollMetrics::new(VIEWPORT)
                        .content_height(1000.0)
                        .offset_y(offset)
                        .dragging(rng.bool());
                    let event = ScrollEvent::ContentOffsetChanged(metrics);
                    event.deliver(&mut refresh);
                    event.deliver(&mut infinite);
                }
            }

            if !before.0.is_loading() && refresh.state().is_loading() {
                refresh_spans += 1;
            }
            if !before.1.is_loading() && infinite.state().is_loading() {
                load_spans += 1;
            }

            let inset = recorder.lock().unwrap().content_inset();
            let expected_top = if refresh.state().is_loading() { 60.0 } else { 0.0 };
            let expected_bottom = if infinite.state().is_loading() { 60.0 } else { 0.0 };
            assert_eq!(inset.top, expected_top);
            assert_eq!(inset.bottom, expected_bottom);
        }

        assert_eq!(refreshes.load(Ordering::SeqCst), refresh_spans);
        assert_eq!(loads.load(Ordering::SeqCst), load_spans);

        for (from, to) in refresh.transitions() {
            assert!(from != to && from.can_transition_to(*to));
        }
        for (from, to) in infinite.transitions() {
            assert!(from != to && from.can_transition_to(*to));
        }
    }
}
