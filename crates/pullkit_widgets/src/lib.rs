//! Pullkit Widgets
//!
//! Edge-loading controllers for scroll containers:
//!
//! - [`PullToRefresh`]: pulling down past the top edge reloads the content
//! - [`InfiniteScroll`]: dragging past the bottom edge loads the next page
//!
//! Both controllers observe [`ScrollMetrics`](pullkit_core::ScrollMetrics)
//! snapshots and reserve space for their indicator by padding the container
//! through a shared [`InsetCoordinator`]. The [`ControllerRegistry`] wires
//! containers, coordinators and controllers together.

pub mod callbacks;
pub mod config;
pub mod container;
pub mod error;
pub mod indicator;
pub mod infinite_scroll;
pub mod inset;
pub mod pull_to_refresh;
pub mod registry;
pub mod scroll_view;
pub mod state;

pub use config::{InfiniteScrollConfig, PullToRefreshConfig, RefreshTitles};
pub use container::{ScrollContainer, SharedContainer, WeakContainer};
pub use error::{PullkitError, Result};
pub use indicator::{InfiniteIndicator, PullIndicator};
pub use infinite_scroll::InfiniteScroll;
pub use inset::{InsetCoordinator, SharedInsetCoordinator};
pub use pull_to_refresh::PullToRefresh;
pub use registry::{ContainerId, ControllerRegistry};
pub use scroll_view::ScrollView;
pub use state::{InfiniteScrollState, RefreshState};

pub mod prelude {
    pub use crate::config::{InfiniteScrollConfig, PullToRefreshConfig};
    pub use crate::container::{ScrollContainer, SharedContainer};
    pub use crate::error::{PullkitError, Result};
    pub use crate::infinite_scroll::InfiniteScroll;
    pub use crate::inset::InsetCoordinator;
    pub use crate::pull_to_refresh::PullToRefresh;
    pub use crate::registry::{ContainerId, ControllerRegistry};
    pub use crate::scroll_view::ScrollView;
    pub use crate::state::{InfiniteScrollState, RefreshState};

    pub use pullkit_animation::{Easing, InsetTransition};
    pub use pullkit_core::{ScrollEvent, ScrollMetrics, ScrollObserver};
}
