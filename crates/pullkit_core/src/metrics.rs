//! Scroll metrics snapshot
//!
//! A `ScrollMetrics` value is produced fresh by the container on every scroll
//! or content-size notification and is never mutated afterwards. Controllers
//! only ever read these snapshots.

use crate::geometry::{EdgeInsets, Point, Size};

/// Immutable snapshot of a scroll container's position, extent and drag state
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollMetrics {
    /// Current scroll position
    pub content_offset: Point,
    /// Total scrollable content extent
    pub content_size: Size,
    /// Visible bounds of the container
    pub viewport_size: Size,
    /// Baseline padding, excluding anything a controller added
    pub content_inset: EdgeInsets,
    /// True while the pointer actively drives the offset (false once released,
    /// even while still decelerating)
    pub is_dragging: bool,
}

impl ScrollMetrics {
    /// Metrics for a resting container of the given viewport size
    pub fn new(viewport_size: Size) -> Self {
        Self {
            viewport_size,
            ..Default::default()
        }
    }

    pub fn offset(mut self, offset: Point) -> Self {
        self.content_offset = offset;
        self
    }

    pub fn offset_y(mut self, y: f32) -> Self {
        self.content_offset.y = y;
        self
    }

    pub fn content_size(mut self, size: Size) -> Self {
        self.content_size = size;
        self
    }

    /// Set content height, keeping the current content width
    pub fn content_height(mut self, height: f32) -> Self {
        self.content_size.height = height;
        self
    }

    pub fn inset(mut self, inset: EdgeInsets) -> Self {
        self.content_inset = inset;
        self
    }

    pub fn dragging(mut self, dragging: bool) -> Self {
        self.is_dragging = dragging;
        self
    }

    /// Distance past the resting top edge (negative = pulled down)
    pub fn pulled_distance(&self) -> f32 {
        self.content_offset.y + self.content_inset.top
    }

    /// Bottom of the visible viewport in content coordinates
    pub fn viewport_bottom(&self) -> f32 {
        self.content_offset.y + self.viewport_size.height - self.content_inset.bottom
    }

    /// Viewport height left for content once vertical insets are reserved
    pub fn usable_viewport_height(&self) -> f32 {
        self.viewport_size.height - self.content_inset.vertical()
    }
}
