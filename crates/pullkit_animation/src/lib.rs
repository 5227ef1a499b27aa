//! Pullkit Animation System
//!
//! Eased, time-based inset transitions for scroll containers.
//!
//! # Features
//!
//! - **Easing**: standard curves plus CSS-style cubic bezier
//! - **Inset Transitions**: duration + easing for every committed inset change
//! - **Interruptible**: retargeting an animation starts from its current value
//! - **Scheduler**: ticks every running inset animation once per frame

pub mod easing;
pub mod inset_animation;
pub mod scheduler;
pub mod transition;

pub use easing::Easing;
pub use inset_animation::InsetAnimation;
pub use scheduler::{AnimationScheduler, InsetAnimationId};
pub use transition::InsetTransition;
