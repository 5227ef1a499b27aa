//! Inset coordination
//!
//! `InsetCoordinator` is the only writer of a container's content inset. Each
//! controller claims one edge together with its baseline (the inset that edge
//! had at attach time); afterwards it can only ask for padding *above* that
//! baseline. Top and bottom controllers share one coordinator per container,
//! so their writes never interleave on the same edge.

use std::sync::{Arc, Mutex};

use pullkit_animation::InsetTransition;
use pullkit_core::{Edge, ScrollMetrics};
use rustc_hash::FxHashMap;

use crate::container::{SharedContainer, WeakContainer};
use crate::error::{PullkitError, Result};

/// Coordinator handle shared by the controllers of one container
pub type SharedInsetCoordinator = Arc<Mutex<InsetCoordinator>>;

/// Bookkeeping for one claimed edge
#[derive(Clone, Copy, Debug, PartialEq)]
struct EdgeSlot {
    /// Inset at attach time; never committed below this
    baseline: f32,
    /// Padding currently committed above the baseline
    applied: f32,
}

/// Applies and reverts padding deltas on the edges of one container
pub struct InsetCoordinator {
    container: WeakContainer,
    slots: FxHashMap<Edge, EdgeSlot>,
}

impl InsetCoordinator {
    pub fn new(container: &SharedContainer) -> Self {
        Self {
            container: Arc::downgrade(container),
            slots: FxHashMap::default(),
        }
    }

    /// Create a coordinator wrapped for sharing between controllers
    pub fn shared(container: &SharedContainer) -> SharedInsetCoordinator {
        Arc::new(Mutex::new(Self::new(container)))
    }

    /// Strong handle to the container, if it is still alive
    pub fn container(&self) -> Option<SharedContainer> {
        self.container.upgrade()
    }

    /// Raw metrics of the container, if it is still alive
    pub fn snapshot(&self) -> Option<ScrollMetrics> {
        let container = self.container.upgrade()?;
        let metrics = container.lock().ok()?.metrics();
        Some(metrics)
    }

    /// Register `edge` with its baseline inset
    pub fn claim(&mut self, edge: Edge, baseline: f32) -> Result<()> {
        if self.slots.contains_key(&edge) {
            return Err(PullkitError::EdgeClaimed(edge));
        }
        self.slots.insert(
            edge,
            EdgeSlot {
                baseline,
                applied: 0.0,
            },
        );
        tracing::debug!("claimed {} edge with baseline {:.1}", edge, baseline);
        Ok(())
    }

    pub fn is_claimed(&self, edge: Edge) -> bool {
        self.slots.contains_key(&edge)
    }

    /// Baseline captured when `edge` was claimed
    pub fn baseline(&self, edge: Edge) -> Option<f32> {
        self.slots.get(&edge).map(|slot| slot.baseline)
    }

    /// Padding currently committed above the baseline of `edge`
    pub fn applied(&self, edge: Edge) -> f32 {
        self.slots.get(&edge).map_or(0.0, |slot| slot.applied)
    }

    /// Commit `baseline + delta` on `edge`.
    ///
    /// `delta` is the padding wanted above the baseline; negative values are
    /// clamped to zero. Returns true if a new inset was committed, false when
    /// the same delta is already applied, the edge is unclaimed, or the
    /// container is gone.
    pub fn apply_delta(&mut self, edge: Edge, delta: f32, transition: InsetTransition) -> bool {
        let Some(slot) = self.slots.get_mut(&edge) else {
            tracing::warn!("inset change on unclaimed {} edge ignored", edge);
            return false;
        };

        let delta = delta.max(0.0);
        if (slot.applied - delta).abs() <= f32::EPSILON {
            return false;
        }

        let Some(container) = self.container.upgrade() else {
            tracing::warn!("inset change on {} edge skipped: container dropped", edge);
            return false;
        };
        let Ok(mut container) = container.lock() else {
            tracing::warn!("inset change on {} edge skipped: container lock poisoned", edge);
            return false;
        };

        let current = container.content_inset().get(edge);
        let value = slot.baseline + delta;
        container.apply_inset_transition(edge, value, transition);
        slot.applied = delta;

        tracing::debug!(
            "{} inset {:.1} -> {:.1} over {:?}",
            edge,
            current,
            value,
            transition.duration
        );
        true
    }

    /// Revert `edge` to its baseline and give up the claim
    pub fn release(&mut self, edge: Edge, transition: InsetTransition) {
        self.apply_delta(edge, 0.0, transition);
        if self.slots.remove(&edge).is_some() {
            tracing::debug!("released {} edge", edge);
        }
    }

    /// Replace the inset of every claimed edge with its baseline.
    ///
    /// Containers report insets as committed, including padding the
    /// controllers added; controllers must reason about baselines only.
    pub fn normalize(&self, metrics: &ScrollMetrics) -> ScrollMetrics {
        let mut normalized = *metrics;
        for (edge, slot) in &self.slots {
            normalized.content_inset.set(*edge, slot.baseline);
        }
        normalized
    }
}
