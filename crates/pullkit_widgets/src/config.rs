//! Controller configuration

use pullkit_animation::InsetTransition;

use crate::state::RefreshState;

/// Default space reserved for an indicator
pub const DEFAULT_INDICATOR_HEIGHT: f32 = 60.0;

/// Default slack past the content end before infinite scrolling arms
pub const DEFAULT_TRIGGER_OFFSET: f32 = 60.0;

/// Indicator titles, one per refresh state
#[derive(Debug, Clone, PartialEq)]
pub struct RefreshTitles {
    pub stopped: String,
    pub triggered: String,
    pub loading: String,
}

impl Default for RefreshTitles {
    fn default() -> Self {
        Self {
            stopped: "Pull to refresh...".to_string(),
            triggered: "Release to refresh...".to_string(),
            loading: "Loading...".to_string(),
        }
    }
}

impl RefreshTitles {
    pub fn get(&self, state: RefreshState) -> &str {
        match state {
            RefreshState::Stopped => &self.stopped,
            RefreshState::Triggered => &self.triggered,
            RefreshState::Loading => &self.loading,
        }
    }

    pub fn set(&mut self, state: RefreshState, title: impl Into<String>) {
        let title = title.into();
        match state {
            RefreshState::Stopped => self.stopped = title,
            RefreshState::Triggered => self.triggered = title,
            RefreshState::Loading => self.loading = title,
        }
    }
}

/// Configuration for pull-to-refresh
#[derive(Debug, Clone, PartialEq)]
pub struct PullToRefreshConfig {
    /// Space reserved above the content while loading; also the pull
    /// distance needed to arm
    pub height: f32,
    /// Transition used for every inset change
    pub transition: InsetTransition,
    /// Indicator titles per state
    pub titles: RefreshTitles,
    /// Secondary line under the title (e.g. "Last updated ...")
    pub subtitle: Option<String>,
}

impl Default for PullToRefreshConfig {
    fn default() -> Self {
        Self {
            height: DEFAULT_INDICATOR_HEIGHT,
            transition: InsetTransition::default(),
            titles: RefreshTitles::default(),
            subtitle: None,
        }
    }
}

impl PullToRefreshConfig {
    /// Config whose inset changes apply without animation
    pub fn immediate() -> Self {
        Self {
            transition: InsetTransition::immediate(),
            ..Default::default()
        }
    }

    pub fn height(mut self, height: f32) -> Self {
        self.height = height;
        self
    }

    pub fn transition(mut self, transition: InsetTransition) -> Self {
        self.transition = transition;
        self
    }

    pub fn title(mut self, state: RefreshState, title: impl Into<String>) -> Self {
        self.titles.set(state, title);
        self
    }

    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }
}

/// Configuration for infinite scrolling
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InfiniteScrollConfig {
    /// Space reserved below the content while loading
    pub height: f32,
    /// Extra distance past the content end before arming
    pub trigger_offset: f32,
    /// Transition used for every inset change
    pub transition: InsetTransition,
}

impl Default for InfiniteScrollConfig {
    fn default() -> Self {
        Self {
            height: DEFAULT_INDICATOR_HEIGHT,
            trigger_offset: DEFAULT_TRIGGER_OFFSET,
            transition: InsetTransition::default(),
        }
    }
}

impl InfiniteScrollConfig {
    /// Config whose inset changes apply without animation
    pub fn immediate() -> Self {
        Self {
            transition: InsetTransition::immediate(),
            ..Default::default()
        }
    }

    pub fn height(mut self, height: f32) -> Self {
        self.height = height;
        self
    }

    pub fn trigger_offset(mut self, offset: f32) -> Self {
        self.trigger_offset = offset;
        self
    }

    pub fn transition(mut self, transition: InsetTransition) -> Self {
        self.transition = transition;
        self
    }
}
