//! Controller lifecycle states

use pullkit_core::StateTransitions;

/// Pull-to-refresh states
///
/// `Stopped -> Triggered -> Loading -> Stopped`, plus `Triggered -> Stopped`
/// when the pull is abandoned and `Stopped -> Loading` for programmatic
/// refreshes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RefreshState {
    #[default]
    Stopped,
    Triggered,
    Loading,
}

impl RefreshState {
    pub fn is_loading(&self) -> bool {
        matches!(self, RefreshState::Loading)
    }
}

impl StateTransitions for RefreshState {
    fn can_transition_to(&self, next: Self) -> bool {
        use RefreshState::*;
        matches!(
            (self, next),
            (Stopped, Triggered)
                | (Stopped, Loading)
                | (Triggered, Stopped)
                | (Triggered, Loading)
                | (Loading, Stopped)
        )
    }
}

/// Infinite-scrolling states
///
/// Same cycle as [`RefreshState`], plus `AllLoaded`, reachable from every
/// state and left only towards `Stopped`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InfiniteScrollState {
    #[default]
    Stopped,
    Triggered,
    Loading,
    AllLoaded,
}

impl InfiniteScrollState {
    pub fn is_loading(&self) -> bool {
        matches!(self, InfiniteScrollState::Loading)
    }

    /// Loading and exhausted states ignore scroll metrics
    pub fn ignores_metrics(&self) -> bool {
        matches!(
            self,
            InfiniteScrollState::Loading | InfiniteScrollState::AllLoaded
        )
    }
}

impl StateTransitions for InfiniteScrollState {
    fn can_transition_to(&self, next: Self) -> bool {
        use InfiniteScrollState::*;
        matches!(
            (self, next),
            (Stopped, Triggered)
                | (Stopped, Loading)
                | (Triggered, Stopped)
                | (Triggered, Loading)
                | (Loading, Stopped)
                | (_, AllLoaded)
                | (AllLoaded, Stopped)
        )
    }
}
