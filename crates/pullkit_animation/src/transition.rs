//! Inset transition parameters

use std::time::Duration;

use crate::easing::Easing;

/// Default inset animation length
pub const DEFAULT_DURATION: Duration = Duration::from_millis(300);

/// How a committed inset change should reach its new value
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InsetTransition {
    pub duration: Duration,
    pub easing: Easing,
}

impl Default for InsetTransition {
    fn default() -> Self {
        Self {
            duration: DEFAULT_DURATION,
            easing: Easing::EaseOut,
        }
    }
}

impl InsetTransition {
    pub fn new(duration: Duration, easing: Easing) -> Self {
        Self { duration, easing }
    }

    /// Jump straight to the new value
    pub fn immediate() -> Self {
        Self {
            duration: Duration::ZERO,
            easing: Easing::Linear,
        }
    }

    pub fn is_immediate(&self) -> bool {
        self.duration.is_zero()
    }

    /// Duration in fractional milliseconds
    pub fn duration_ms(&self) -> f32 {
        self.duration.as_secs_f32() * 1000.0
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }
}
