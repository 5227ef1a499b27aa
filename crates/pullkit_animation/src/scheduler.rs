//! Animation scheduler
//!
//! Owns every running inset animation and advances them each frame.

use crate::inset_animation::InsetAnimation;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    pub struct InsetAnimationId;
}

/// The animation scheduler that ticks all active inset animations
pub struct AnimationScheduler {
    animations: SlotMap<InsetAnimationId, InsetAnimation>,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self {
            animations: SlotMap::with_key(),
        }
    }

    pub fn add(&mut self, animation: InsetAnimation) -> InsetAnimationId {
        self.animations.insert(animation)
    }

    pub fn get(&self, id: InsetAnimationId) -> Option<&InsetAnimation> {
        self.animations.get(id)
    }

    pub fn get_mut(&mut self, id: InsetAnimationId) -> Option<&mut InsetAnimation> {
        self.animations.get_mut(id)
    }

    pub fn remove(&mut self, id: InsetAnimationId) -> Option<InsetAnimation> {
        self.animations.remove(id)
    }

    /// Advance all animations by `dt_ms`. Returns true while any is still playing.
    pub fn tick(&mut self, dt_ms: f32) -> bool {
        for (_, animation) in self.animations.iter_mut() {
            animation.tick(dt_ms);
        }
        tracing::trace!(
            "ticked {} inset animations by {:.1}ms",
            self.animations.len(),
            dt_ms
        );
        self.has_active_animations()
    }

    /// Jump every animation to its target
    pub fn finish_all(&mut self) {
        for (_, animation) in self.animations.iter_mut() {
            animation.finish();
        }
    }

    /// Check if any animations are still active
    pub fn has_active_animations(&self) -> bool {
        self.animations.iter().any(|(_, a)| a.is_playing())
    }

    pub fn len(&self) -> usize {
        self.animations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}
