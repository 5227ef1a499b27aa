//! Scroll container interface
//!
//! The scrollable view itself lives outside this crate. Hosts implement
//! `ScrollContainer` for their native view (or embed the reference
//! [`ScrollView`](crate::scroll_view::ScrollView)) and share it as
//! `Arc<Mutex<dyn ScrollContainer>>`. Controllers only keep `Weak` handles.

use std::sync::{Arc, Mutex, Weak};

use pullkit_animation::InsetTransition;
use pullkit_core::{Edge, EdgeInsets, Point, ScrollMetrics};

/// What the controllers need from a scroll container
pub trait ScrollContainer: Send {
    /// Inset currently in effect on every edge, mid-animation values included
    fn content_inset(&self) -> EdgeInsets;

    /// Raw snapshot, insets reported the same way as `content_inset`
    fn metrics(&self) -> ScrollMetrics;

    /// Move one edge inset to `value` using the given transition.
    ///
    /// The request counts as applied as soon as this returns; the animation is
    /// the container's business and never reports back.
    fn apply_inset_transition(&mut self, edge: Edge, value: f32, transition: InsetTransition);

    /// Scroll to `offset`, animated if the container supports it
    fn scroll_to(&mut self, offset: Point, animated: bool);
}

/// Owning handle hosts keep for a container
pub type SharedContainer = Arc<Mutex<dyn ScrollContainer>>;

/// Non-owning handle controllers keep
pub type WeakContainer = Weak<Mutex<dyn ScrollContainer>>;
