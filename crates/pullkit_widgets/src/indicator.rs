//! Presentation hints for loading indicators
//!
//! Drawing the spinner, arrow and labels is up to the host. Controllers only
//! describe what should be shown and where.

use std::f32::consts::PI;

use pullkit_core::Rect;

use crate::state::{InfiniteScrollState, RefreshState};

/// What a pull-to-refresh indicator should show
#[derive(Debug, Clone, PartialEq)]
pub struct PullIndicator<'a> {
    pub state: RefreshState,
    pub title: &'a str,
    pub subtitle: Option<&'a str>,
    /// Arrow rotation in radians: flipped once releasing would refresh
    pub arrow_rotation: f32,
    pub arrow_visible: bool,
    pub spinner_animating: bool,
    /// Frame in content coordinates, directly above the content
    pub frame: Rect,
}

impl PullIndicator<'_> {
    pub(crate) fn arrow_rotation_for(state: RefreshState) -> f32 {
        match state {
            RefreshState::Triggered => PI,
            RefreshState::Stopped | RefreshState::Loading => 0.0,
        }
    }
}

/// What an infinite-scrolling indicator should show
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InfiniteIndicator {
    pub state: InfiniteScrollState,
    pub spinner_animating: bool,
    /// Hidden once everything is loaded
    pub visible: bool,
    /// Frame in content coordinates, anchored past the content end
    pub frame: Rect,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_flips_only_when_triggered() {
        assert_eq!(PullIndicator::arrow_rotation_for(RefreshState::Stopped), 0.0);
        assert_eq!(PullIndicator::arrow_rotation_for(RefreshState::Triggered), PI);
        assert_eq!(PullIndicator::arrow_rotation_for(RefreshState::Loading), 0.0);
    }
}
