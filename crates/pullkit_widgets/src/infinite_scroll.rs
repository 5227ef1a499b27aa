//! Infinite-scrolling controller
//!
//! Watches the bottom edge of a scroll container. Dragging the viewport more
//! than `trigger_offset` past the end of the content arms the controller;
//! releasing while armed enters `Loading`, reserves `height` of bottom inset
//! and runs the action handler. The caller ends a page load with
//! [`InfiniteScroll::stop`], or with [`InfiniteScroll::set_exhausted`] once
//! there is nothing left to load.
//!
//! The indicator anchor is recomputed on every content-size change, in every
//! state, so the spinner keeps tracking the end of the content.

use pullkit_core::{Edge, Rect, ScrollMetrics, ScrollObserver, StateMachine};
use smallvec::SmallVec;

use crate::callbacks::{ActionHandler, StateCallback};
use crate::config::InfiniteScrollConfig;
use crate::error::Result;
use crate::indicator::InfiniteIndicator;
use crate::inset::SharedInsetCoordinator;
use crate::state::InfiniteScrollState;

/// Bottom-edge load-more controller
pub struct InfiniteScroll {
    fsm: StateMachine<InfiniteScrollState>,
    config: InfiniteScrollConfig,
    /// Gate on metrics-driven transitions only
    enabled: bool,
    /// Bottom inset captured at attach time
    original_inset: f32,
    coordinator: Option<SharedInsetCoordinator>,
    action: Option<ActionHandler>,
    state_callbacks: SmallVec<[StateCallback<InfiniteScrollState>; 2]>,
    /// Indicator position along the scroll axis
    anchor_y: f32,
    viewport_width: f32,
}

impl Default for InfiniteScroll {
    fn default() -> Self {
        Self::new()
    }
}

impl InfiniteScroll {
    pub fn new() -> Self {
        Self::with_config(InfiniteScrollConfig::default())
    }

    pub fn with_config(config: InfiniteScrollConfig) -> Self {
        Self {
            fsm: StateMachine::new(InfiniteScrollState::Stopped),
            config,
            enabled: true,
            original_inset: 0.0,
            coordinator: None,
            action: None,
            state_callbacks: SmallVec::new(),
            anchor_y: 0.0,
            viewport_width: 0.0,
        }
    }

    /// Set the action handler (builder form)
    pub fn on_load_more<F>(mut self, action: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        self.set_action_handler(action);
        self
    }

    /// Replace the action handler
    pub fn set_action_handler<F>(&mut self, action: F)
    where
        F: FnMut() + Send + 'static,
    {
        self.action = Some(Box::new(action));
    }

    /// Add a presentation listener, run on every real state change before
    /// any inset or action side effect
    pub fn on_state_change<F>(&mut self, callback: F)
    where
        F: FnMut(InfiniteScrollState) + Send + 'static,
    {
        self.state_callbacks.push(Box::new(callback));
    }

    pub fn state(&self) -> InfiniteScrollState {
        self.fsm.current()
    }

    /// Recent `(from, to)` transitions, oldest first
    pub fn transitions(
        &self,
    ) -> impl Iterator<Item = &(InfiniteScrollState, InfiniteScrollState)> {
        self.fsm.history()
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn height(&self) -> f32 {
        self.config.height
    }

    /// Takes effect on the next transition
    pub fn set_height(&mut self, height: f32) {
        self.config.height = height;
    }

    pub fn trigger_offset(&self) -> f32 {
        self.config.trigger_offset
    }

    /// Takes effect on the next transition
    pub fn set_trigger_offset(&mut self, offset: f32) {
        self.config.trigger_offset = offset;
    }

    pub fn config(&self) -> &InfiniteScrollConfig {
        &self.config
    }

    pub fn original_inset(&self) -> f32 {
        self.original_inset
    }

    pub fn is_attached(&self) -> bool {
        self.coordinator.is_some()
    }

    pub fn is_exhausted(&self) -> bool {
        self.fsm.is_in(InfiniteScrollState::AllLoaded)
    }

    /// Indicator anchor: just past the content end, or the bottom of an
    /// under-filled viewport, whichever is further
    pub fn anchor_y(&self) -> f32 {
        self.anchor_y
    }

    // =========================================================================
    // Attachment
    // =========================================================================

    /// Start managing the bottom edge through `coordinator`.
    ///
    /// `baseline` is the bottom inset the container has right now. Attaching
    /// an attached controller detaches it first. The indicator anchor is
    /// computed from the container's current metrics.
    pub fn attach(&mut self, coordinator: &SharedInsetCoordinator, baseline: f32) -> Result<()> {
        self.detach();

        let mut snapshot = None;
        if let Ok(mut guard) = coordinator.lock() {
            guard.claim(Edge::Bottom, baseline)?;
            snapshot = guard.snapshot();
        }

        self.original_inset = baseline;
        self.coordinator = Some(coordinator.clone());
        self.fsm.reset(InfiniteScrollState::Stopped);
        if let Some(metrics) = snapshot {
            self.reposition(&metrics);
        }
        tracing::debug!("infinite scroll attached, baseline {:.1}", baseline);
        Ok(())
    }

    /// Stop managing the container, reverting any inset this controller added
    pub fn detach(&mut self) {
        let Some(coordinator) = self.coordinator.take() else {
            return;
        };

        if let Ok(mut guard) = coordinator.lock() {
            guard.release(Edge::Bottom, self.config.transition);
        }
        self.fsm.reset(InfiniteScrollState::Stopped);
        tracing::debug!("infinite scroll detached");
    }

    // =========================================================================
    // Explicit control
    // =========================================================================

    /// Enter `Loading` directly. No-op once everything is loaded or while
    /// detached.
    pub fn start(&mut self) -> bool {
        if !self.is_attached() || self.is_exhausted() {
            return false;
        }
        self.set_state(InfiniteScrollState::Loading)
    }

    /// Enter `Stopped`. Does not clear `AllLoaded`. No-op while detached.
    pub fn stop(&mut self) -> bool {
        if !self.is_attached() || self.is_exhausted() {
            return false;
        }
        self.set_state(InfiniteScrollState::Stopped)
    }

    /// Enter (`true`) or leave (`false`) `AllLoaded`. No-op while detached.
    pub fn set_exhausted(&mut self, exhausted: bool) -> bool {
        if !self.is_attached() {
            tracing::debug!("infinite scroll detached, set_exhausted ignored");
            return false;
        }
        if exhausted {
            self.set_state(InfiniteScrollState::AllLoaded)
        } else if self.is_exhausted() {
            self.set_state(InfiniteScrollState::Stopped)
        } else {
            false
        }
    }

    /// Presentation hints for the current state
    pub fn indicator(&self) -> InfiniteIndicator {
        let state = self.state();
        InfiniteIndicator {
            state,
            spinner_animating: state.is_loading(),
            visible: state != InfiniteScrollState::AllLoaded,
            frame: Rect::new(0.0, self.anchor_y, self.viewport_width, self.config.height),
        }
    }

    // =========================================================================
    // Transition function
    // =========================================================================

    fn evaluate(&mut self, metrics: &ScrollMetrics) {
        if !self.is_attached() {
            return;
        }
        let metrics = self.normalized(metrics);
        self.viewport_width = metrics.viewport_size.width;

        let state = self.state();
        if !self.enabled || state.ignores_metrics() {
            return;
        }

        let leading_edge = metrics.viewport_bottom();
        let threshold = metrics.content_size.height + self.config.trigger_offset;
        tracing::trace!(
            "infinite scroll sample: leading={:.1} threshold={:.1} dragging={} state={:?}",
            leading_edge,
            threshold,
            metrics.is_dragging,
            state
        );

        let next = if leading_edge > threshold {
            if metrics.is_dragging {
                InfiniteScrollState::Triggered
            } else if state == InfiniteScrollState::Triggered {
                InfiniteScrollState::Loading
            } else {
                state
            }
        } else {
            InfiniteScrollState::Stopped
        };

        self.set_state(next);
    }

    fn reposition(&mut self, metrics: &ScrollMetrics) {
        if !self.is_attached() {
            return;
        }
        let metrics = self.normalized(metrics);
        self.viewport_width = metrics.viewport_size.width;
        self.anchor_y = metrics
            .content_size
            .height
            .max(metrics.usable_viewport_height());
        tracing::trace!("infinite scroll indicator anchored at {:.1}", self.anchor_y);
    }

    fn normalized(&self, metrics: &ScrollMetrics) -> ScrollMetrics {
        match self.coordinator.as_ref().map(|c| c.lock()) {
            Some(Ok(coordinator)) => coordinator.normalize(metrics),
            _ => *metrics,
        }
    }

    fn set_state(&mut self, next: InfiniteScrollState) -> bool {
        let Some(previous) = self.fsm.transition(next) else {
            return false;
        };
        tracing::debug!("infinite scroll {:?} -> {:?}", previous, next);

        for callback in self.state_callbacks.iter_mut() {
            callback(next);
        }

        match next {
            InfiniteScrollState::Loading => {
                self.apply_inset(self.config.height);
                if let Some(action) = self.action.as_mut() {
                    action();
                }
            }
            InfiniteScrollState::Stopped | InfiniteScrollState::AllLoaded => self.apply_inset(0.0),
            InfiniteScrollState::Triggered => {}
        }
        true
    }

    fn apply_inset(&self, delta: f32) {
        if let Some(Ok(mut coordinator)) = self.coordinator.as_ref().map(|c| c.lock()) {
            coordinator.apply_delta(Edge::Bottom, delta, self.config.transition);
        }
    }
}

impl ScrollObserver for InfiniteScroll {
    fn on_content_offset_changed(&mut self, metrics: &ScrollMetrics) {
        self.evaluate(metrics);
    }

    fn on_content_size_changed(&mut self, metrics: &ScrollMetrics) {
        self.reposition(metrics);
    }
}

impl Drop for InfiniteScroll {
    fn drop(&mut self) {
        self.detach();
    }
}
