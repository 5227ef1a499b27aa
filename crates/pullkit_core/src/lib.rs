//! Pullkit Core
//!
//! This crate provides the foundational primitives for edge-loading controllers
//! (pull to refresh, infinite scrolling):
//!
//! - **Scroll Metrics**: immutable snapshots of a container's offset, extent and drag state
//! - **Observer Interface**: the notifications a scroll container delivers
//! - **State Machines**: flat machines that only move along declared edges
//!
//! # Example
//!
//! ```rust
//! use pullkit_core::{ScrollMetrics, Size};
//!
//! let metrics = ScrollMetrics::new(Size::new(320.0, 500.0))
//!     .content_height(1000.0)
//!     .offset_y(600.0)
//!     .dragging(true);
//!
//! assert_eq!(metrics.viewport_bottom(), 1100.0);
//! ```

pub mod events;
pub mod fsm;
pub mod geometry;
pub mod metrics;

pub use events::{ScrollEvent, ScrollObserver};
pub use fsm::{StateMachine, StateTransitions};
pub use geometry::{Edge, EdgeInsets, Point, Rect, Size};
pub use metrics::ScrollMetrics;
