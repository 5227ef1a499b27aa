//! Scroll notifications
//!
//! Containers push notifications through the `ScrollObserver` interface, or a
//! polling adapter samples the container each frame and emits `ScrollEvent`s.
//! Either way the observer only ever consumes a `ScrollMetrics` snapshot.
//!
//! Notifications must be delivered on the UI thread, in the order the
//! underlying changes happened. Observers do no internal synchronization.

use crate::metrics::ScrollMetrics;

/// A single notification from a scroll container
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScrollEvent {
    /// Offset or drag state changed
    ContentOffsetChanged(ScrollMetrics),
    /// Content extent changed
    ContentSizeChanged(ScrollMetrics),
}

impl ScrollEvent {
    /// The snapshot carried by this event
    pub fn metrics(&self) -> &ScrollMetrics {
        match self {
            ScrollEvent::ContentOffsetChanged(metrics) => metrics,
            ScrollEvent::ContentSizeChanged(metrics) => metrics,
        }
    }

    /// Forward this event to the matching observer callback
    pub fn deliver<O: ScrollObserver + ?Sized>(&self, observer: &mut O) {
        match self {
            ScrollEvent::ContentOffsetChanged(metrics) => {
                observer.on_content_offset_changed(metrics)
            }
            ScrollEvent::ContentSizeChanged(metrics) => observer.on_content_size_changed(metrics),
        }
    }
}

/// Listener interface a scroll container drives
pub trait ScrollObserver {
    /// Called when the content offset or the drag state changed
    fn on_content_offset_changed(&mut self, metrics: &ScrollMetrics);

    /// Called when the content size changed
    fn on_content_size_changed(&mut self, metrics: &ScrollMetrics);
}
