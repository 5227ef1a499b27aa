//! Controller attachment errors

use pullkit_core::Edge;
use thiserror::Error;

/// Errors raised while wiring controllers to containers
///
/// The state machines themselves never fail; these only cover attachment
/// and registry bookkeeping.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PullkitError {
    /// Another controller already manages this edge of the container
    #[error("the {0} edge is already managed by another controller")]
    EdgeClaimed(Edge),

    /// The container was dropped while still registered
    #[error("scroll container has been dropped")]
    ContainerDropped,

    /// No registry entry for the given container id
    #[error("scroll container is not registered")]
    UnknownContainer,
}

/// Result type for attachment operations
pub type Result<T> = std::result::Result<T, PullkitError>;
