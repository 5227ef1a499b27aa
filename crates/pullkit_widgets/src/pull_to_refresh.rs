//! Pull-to-refresh controller
//!
//! Watches the top edge of a scroll container. Pulling the content down past
//! `height` while dragging arms the controller; releasing while armed enters
//! `Loading`, reserves `height` of top inset and runs the action handler. The
//! caller ends the refresh with [`PullToRefresh::stop`].
//!
//! # Example
//!
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use pullkit_core::{ScrollMetrics, ScrollObserver, Size};
//! use pullkit_widgets::prelude::*;
//!
//! let view = Arc::new(Mutex::new(ScrollView::new(Size::new(320.0, 480.0))));
//! let container: SharedContainer = view.clone();
//! let coordinator = InsetCoordinator::shared(&container);
//!
//! let mut refresh = PullToRefresh::with_config(PullToRefreshConfig::immediate())
//!     .on_refresh(|| println!("reloading"));
//! refresh.attach(&coordinator, 0.0).unwrap();
//!
//! let pulled = ScrollMetrics::new(Size::new(320.0, 480.0)).offset_y(-80.0);
//! refresh.on_content_offset_changed(&pulled.dragging(true));
//! refresh.on_content_offset_changed(&pulled.dragging(false));
//! assert_eq!(refresh.state(), RefreshState::Loading);
//!
//! refresh.stop();
//! assert_eq!(refresh.state(), RefreshState::Stopped);
//! ```

use pullkit_core::{Edge, Point, Rect, ScrollMetrics, ScrollObserver, StateMachine};
use smallvec::SmallVec;

use crate::callbacks::{ActionHandler, StateCallback};
use crate::config::PullToRefreshConfig;
use crate::error::Result;
use crate::indicator::PullIndicator;
use crate::inset::SharedInsetCoordinator;
use crate::state::RefreshState;

/// Top-edge refresh controller
pub struct PullToRefresh {
    fsm: StateMachine<RefreshState>,
    config: PullToRefreshConfig,
    /// Gate on metrics-driven transitions only
    enabled: bool,
    /// Top inset captured at attach time
    original_inset: f32,
    coordinator: Option<SharedInsetCoordinator>,
    action: Option<ActionHandler>,
    state_callbacks: SmallVec<[StateCallback<RefreshState>; 2]>,
    /// Last seen viewport width, for the indicator frame
    viewport_width: f32,
}

impl Default for PullToRefresh {
    fn default() -> Self {
        Self::new()
    }
}

impl PullToRefresh {
    pub fn new() -> Self {
        Self::with_config(PullToRefreshConfig::default())
    }

    pub fn with_config(config: PullToRefreshConfig) -> Self {
        Self {
            fsm: StateMachine::new(RefreshState::Stopped),
            config,
            enabled: true,
            original_inset: 0.0,
            coordinator: None,
            action: None,
            state_callbacks: SmallVec::new(),
            viewport_width: 0.0,
        }
    }

    /// Set the action handler (builder form)
    pub fn on_refresh<F>(mut self, action: F) -> Self
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
        F: FnMut(RefreshState) + Send + 'static,
    {
        self.state_callbacks.push(Box::new(callback));
    }

    pub fn state(&self) -> RefreshState {
        self.fsm.current()
    }

    /// Recent `(from, to)` transitions, oldest first
    pub fn transitions(&self) -> impl Iterator<Item = &(RefreshState, RefreshState)> {
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

    pub fn config(&self) -> &PullToRefreshConfig {
        &self.config
    }

    pub fn set_title(&mut self, state: RefreshState, title: impl Into<String>) {
        self.config.titles.set(state, title);
    }

    pub fn set_subtitle(&mut self, subtitle: Option<String>) {
        self.config.subtitle = subtitle;
    }

    pub fn original_inset(&self) -> f32 {
        self.original_inset
    }

    pub fn is_attached(&self) -> bool {
        self.coordinator.is_some()
    }

    // =========================================================================
    // Attachment
    // =========================================================================

    /// Start managing the top edge through `coordinator`.
    ///
    /// `baseline` is the top inset the container has right now; it is the
    /// only value ever restored on settle. Attaching an attached controller
    /// detaches it first.
    pub fn attach(&mut self, coordinator: &SharedInsetCoordinator, baseline: f32) -> Result<()> {
        self.detach();

        let mut snapshot = None;
        if let Ok(mut guard) = coordinator.lock() {
            guard.claim(Edge::Top, baseline)?;
            snapshot = guard.snapshot();
        }

        if let Some(metrics) = snapshot {
            self.viewport_width = metrics.viewport_size.width;
        }
        self.original_inset = baseline;
        self.coordinator = Some(coordinator.clone());
        self.fsm.reset(RefreshState::Stopped);
        tracing::debug!("pull-to-refresh attached, baseline {:.1}", baseline);
        Ok(())
    }

    /// Stop managing the container, reverting any inset this controller added
    pub fn detach(&mut self) {
        let Some(coordinator) = self.coordinator.take() else {
            return;
        };

        if let Ok(mut guard) = coordinator.lock() {
            guard.release(Edge::Top, self.config.transition);
        }
        self.fsm.reset(RefreshState::Stopped);
        tracing::debug!("pull-to-refresh detached");
    }

    // =========================================================================
    // Explicit control
    // =========================================================================

    /// Enter `Loading` directly (programmatic refresh). No-op while detached.
    pub fn start(&mut self) -> bool {
        if !self.is_attached() {
            tracing::debug!("pull-to-refresh detached, start ignored");
            return false;
        }
        self.set_state(RefreshState::Loading)
    }

    /// Enter `Stopped` from any state. No-op while detached.
    pub fn stop(&mut self) -> bool {
        if !self.is_attached() {
            tracing::debug!("pull-to-refresh detached, stop ignored");
            return false;
        }
        self.set_state(RefreshState::Stopped)
    }

    /// Scroll the indicator into view, then start loading
    pub fn trigger_refresh(&mut self) -> bool {
        if !self.is_attached() || self.state().is_loading() {
            return false;
        }

        let container = self
            .coordinator
            .as_ref()
            .and_then(|coordinator| coordinator.lock().ok()?.container());
        if let Some(container) = container {
            if let Ok(mut container) = container.lock() {
                let x = container.metrics().content_offset.x;
                let y = -(self.original_inset + self.config.height);
                container.scroll_to(Point::new(x, y), true);
            }
        }

        self.start()
    }

    /// Presentation hints for the current state
    pub fn indicator(&self) -> PullIndicator<'_> {
        let state = self.state();
        let height = self.config.height;
        PullIndicator {
            state,
            title: self.config.titles.get(state),
            subtitle: self.config.subtitle.as_deref(),
            arrow_rotation: PullIndicator::arrow_rotation_for(state),
            arrow_visible: !state.is_loading(),
            spinner_animating: state.is_loading(),
            frame: Rect::new(0.0, -height, self.viewport_width, height),
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
        if !self.enabled || state.is_loading() {
            return;
        }

        let pulled = metrics.pulled_distance();
        tracing::trace!(
            "pull-to-refresh sample: pulled={:.1} dragging={} state={:?}",
            pulled,
            metrics.is_dragging,
            state
        );

        let next = if metrics.is_dragging {
            if pulled < -self.config.height {
                RefreshState::Triggered
            } else {
                RefreshState::Stopped
            }
        } else if state == RefreshState::Triggered {
            // Released while armed
            RefreshState::Loading
        } else {
            state
        };

        self.set_state(next);
    }

    fn normalized(&self, metrics: &ScrollMetrics) -> ScrollMetrics {
        match self.coordinator.as_ref().map(|c| c.lock()) {
            Some(Ok(coordinator)) => coordinator.normalize(metrics),
            _ => *metrics,
        }
    }

    fn set_state(&mut self, next: RefreshState) -> bool {
        let Some(previous) = self.fsm.transition(next) else {
            return false;
        };
        tracing::debug!("pull-to-refresh {:?} -> {:?}", previous, next);

        for callback in self.state_callbacks.iter_mut() {
            callback(next);
        }

        match next {
            RefreshState::Loading => {
                self.apply_inset(self.config.height);
                if let Some(action) = self.action.as_mut() {
                    action();
                }
            }
            RefreshState::Stopped => self.apply_inset(0.0),
            RefreshState::Triggered => {}
        }
        true
    }

    fn apply_inset(&self, delta: f32) {
        if let Some(Ok(mut coordinator)) = self.coordinator.as_ref().map(|c| c.lock()) {
            coordinator.apply_delta(Edge::Top, delta, self.config.transition);
        }
    }
}

impl ScrollObserver for PullToRefresh {
    fn on_content_offset_changed(&mut self, metrics: &ScrollMetrics) {
        self.evaluate(metrics);
    }

    fn on_content_size_changed(&mut self, metrics: &ScrollMetrics) {
        if self.is_attached() {
            self.viewport_width = metrics.viewport_size.width;
        }
    }
}

impl Drop for PullToRefresh {
    fn drop(&mut self) {
        self.detach();
    }
}
