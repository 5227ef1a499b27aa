//! Single-value inset animation

use crate::transition::InsetTransition;

/// Animates one edge inset from its current value to a committed target
#[derive(Clone, Debug)]
pub struct InsetAnimation {
    from: f32,
    to: f32,
    transition: InsetTransition,
    /// Elapsed time in milliseconds
    current_time: f32,
    playing: bool,
}

impl InsetAnimation {
    /// Start animating `from -> to`. Immediate transitions finish on creation.
    pub fn new(from: f32, to: f32, transition: InsetTransition) -> Self {
        let playing = !transition.is_immediate() && (from - to).abs() > f32::EPSILON;
        Self {
            from,
            to,
            transition,
            current_time: 0.0,
            playing,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn target(&self) -> f32 {
        self.to
    }

    pub fn progress(&self) -> f32 {
        if !self.playing {
            return 1.0;
        }
        (self.current_time / self.transition.duration_ms()).clamp(0.0, 1.0)
    }

    /// Get the current interpolated value
    pub fn value(&self) -> f32 {
        if !self.playing {
            return self.to;
        }
        let eased = self.transition.easing.apply(self.progress());
        self.from + (self.to - self.from) * eased
    }

    /// Advance the animation by delta time (in milliseconds)
    pub fn tick(&mut self, dt_ms: f32) {
        if !self.playing {
            return;
        }

        self.current_time += dt_ms;

        if self.current_time >= self.transition.duration_ms() {
            self.finish();
        }
    }

    /// Jump to the target value
    pub fn finish(&mut self) {
        self.current_time = self.transition.duration_ms();
        self.playing = false;
    }

    /// Redirect toward a new target, starting from the current value
    pub fn retarget(&mut self, to: f32, transition: InsetTransition) {
        *self = Self::new(self.value(), to, transition);
    }
}
