//! In-memory scroll container
//!
//! `ScrollView` keeps the scroll state a native view would own: offset,
//! sizes, drag flag and content inset. Inset changes requested through
//! [`ScrollContainer::apply_inset_transition`] animate through an
//! [`AnimationScheduler`] advanced by [`ScrollView::tick`].
//!
//! Every mutator returns the [`ScrollEvent`] a native view would emit, ready
//! to hand to the controllers or a registry.

use std::time::Duration;

use pullkit_animation::{AnimationScheduler, InsetAnimation, InsetAnimationId, InsetTransition};
use pullkit_core::{Edge, EdgeInsets, Point, ScrollEvent, ScrollMetrics, Size};
use rustc_hash::FxHashMap;

use crate::container::ScrollContainer;

/// Reference `ScrollContainer` with animated insets
pub struct ScrollView {
    content_offset: Point,
    content_size: Size,
    viewport_size: Size,
    /// Inset values once every running animation settles
    content_inset: EdgeInsets,
    dragging: bool,
    scheduler: AnimationScheduler,
    inset_animations: FxHashMap<Edge, InsetAnimationId>,
}

impl ScrollView {
    pub fn new(viewport_size: Size) -> Self {
        Self {
            content_offset: Point::default(),
            content_size: Size::ZERO,
            viewport_size,
            content_inset: EdgeInsets::ZERO,
            dragging: false,
            scheduler: AnimationScheduler::new(),
            inset_animations: FxHashMap::default(),
        }
    }

    /// Overwrite the inset directly, cancelling running inset animations.
    ///
    /// Host-side setup only; once controllers are attached, inset changes go
    /// through their coordinator.
    pub fn set_content_inset(&mut self, inset: EdgeInsets) {
        for (_, id) in self.inset_animations.drain() {
            self.scheduler.remove(id);
        }
        self.content_inset = inset;
    }

    /// Inset each edge is heading to
    pub fn target_inset(&self) -> EdgeInsets {
        self.content_inset
    }

    pub fn content_offset(&self) -> Point {
        self.content_offset
    }

    pub fn viewport_size(&self) -> Size {
        self.viewport_size
    }

    pub fn content_size(&self) -> Size {
        self.content_size
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn set_content_size(&mut self, size: Size) -> ScrollEvent {
        self.content_size = size;
        ScrollEvent::ContentSizeChanged(self.metrics())
    }

    pub fn set_viewport_size(&mut self, size: Size) -> ScrollEvent {
        self.viewport_size = size;
        ScrollEvent::ContentSizeChanged(self.metrics())
    }

    /// Move the content with the pointer down
    pub fn drag_to(&mut self, offset_y: f32) -> ScrollEvent {
        self.dragging = true;
        self.content_offset.y = offset_y;
        ScrollEvent::ContentOffsetChanged(self.metrics())
    }

    /// Lift the pointer, leaving the offset where it is
    pub fn release(&mut self) -> ScrollEvent {
        self.dragging = false;
        ScrollEvent::ContentOffsetChanged(self.metrics())
    }

    /// Move the content without a drag (momentum, programmatic scrolls)
    pub fn set_content_offset(&mut self, offset: Point) -> ScrollEvent {
        self.content_offset = offset;
        ScrollEvent::ContentOffsetChanged(self.metrics())
    }

    /// Advance inset animations. Returns true while any is still running.
    pub fn tick(&mut self, dt: Duration) -> bool {
        let active = self.scheduler.tick(dt.as_secs_f32() * 1000.0);
        self.collect_finished();
        active
    }

    /// Jump every inset animation to its target
    pub fn finish_animations(&mut self) {
        self.scheduler.finish_all();
        self.collect_finished();
    }

    pub fn has_active_animations(&self) -> bool {
        self.scheduler.has_active_animations()
    }

    fn animated_value(&self, edge: Edge) -> Option<f32> {
        let id = self.inset_animations.get(&edge)?;
        self.scheduler.get(*id).map(InsetAnimation::value)
    }

    fn collect_finished(&mut self) {
        let scheduler = &mut self.scheduler;
        self.inset_animations.retain(|_, id| {
            let playing = scheduler.get(*id).is_some_and(InsetAnimation::is_playing);
            if !playing {
                scheduler.remove(*id);
            }
            playing
        });
    }
}

impl ScrollContainer for ScrollView {
    fn content_inset(&self) -> EdgeInsets {
        let mut inset = self.content_inset;
        for edge in self.inset_animations.keys() {
            if let Some(value) = self.animated_value(*edge) {
                inset.set(*edge, value);
            }
        }
        inset
    }

    fn metrics(&self) -> ScrollMetrics {
        ScrollMetrics::new(self.viewport_size)
            .content_size(self.content_size)
            .inset(self.content_inset())
            .dragging(self.dragging)
            .offset(self.content_offset)
    }

    fn apply_inset_transition(&mut self, edge: Edge, value: f32, transition: InsetTransition) {
        let current = self.content_inset().get(edge);
        self.content_inset.set(edge, value);

        if let Some(id) = self.inset_animations.get(&edge).copied() {
            let animation = self.scheduler.get_mut(id);
            if let Some(animation) = animation.filter(|a| a.target() != value) {
                animation.retarget(value, transition);
            }
        } else {
            let id = self.scheduler.add(InsetAnimation::new(current, value, transition));
            self.inset_animations.insert(edge, id);
        }
        self.collect_finished();

        tracing::trace!("{} inset animating {:.1} -> {:.1}", edge, current, value);
    }

    fn scroll_to(&mut self, offset: Point, animated: bool) {
        if animated {
            tracing::trace!("animated scroll_to applied immediately");
        }
        self.content_offset = offset;
    }
}
