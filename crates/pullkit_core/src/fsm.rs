//! State Machine Runtime
//!
//! Flat state machines over user-defined state enums. Each state type declares
//! which `(from, to)` edges are legal; the machine refuses everything else and
//! treats a transition into the current state as a no-op, so callers can hang
//! side effects off the returned previous state without ever firing them twice.

use std::collections::VecDeque;
use std::fmt::Debug;
use std::hash::Hash;

/// Number of `(from, to)` pairs kept for debugging
pub const HISTORY_LIMIT: usize = 32;

/// Trait for state enums driven by a `StateMachine`
///
/// # Example
///
/// ```rust
/// use pullkit_core::fsm::{StateMachine, StateTransitions};
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum Door {
///     Closed,
///     Open,
/// }
///
/// impl StateTransitions for Door {
///     fn can_transition_to(&self, next: Self) -> bool {
///         matches!((self, next), (Door::Closed, Door::Open) | (Door::Open, Door::Closed))
///     }
/// }
///
/// let mut door = StateMachine::new(Door::Closed);
/// assert_eq!(door.transition(Door::Open), Some(Door::Closed));
/// assert_eq!(door.transition(Door::Open), None);
/// ```
pub trait StateTransitions: Clone + Copy + PartialEq + Eq + Hash + Send + Debug + 'static {
    /// Whether `self -> next` is an enumerated edge
    fn can_transition_to(&self, next: Self) -> bool;
}

/// A state machine instance
#[derive(Clone, Debug)]
pub struct StateMachine<S: StateTransitions> {
    current_state: S,
    /// Most recent transitions, oldest first
    history: VecDeque<(S, S)>,
}

impl<S: StateTransitions> StateMachine<S> {
    pub fn new(initial_state: S) -> Self {
        Self {
            current_state: initial_state,
            history: VecDeque::with_capacity(HISTORY_LIMIT),
        }
    }

    /// Get the current state
    pub fn current(&self) -> S {
        self.current_state
    }

    /// Check if we're in a specific state
    pub fn is_in(&self, state: S) -> bool {
        self.current_state == state
    }

    /// Move to `next`, returning the previous state if the state changed.
    ///
    /// Returns `None` for self-transitions and for edges the state type does
    /// not allow.
    pub fn transition(&mut self, next: S) -> Option<S> {
        let current = self.current_state;
        if current == next {
            return None;
        }

        if !current.can_transition_to(next) {
            debug_assert!(false, "illegal transition {:?} -> {:?}", current, next);
            tracing::warn!("refusing illegal transition {:?} -> {:?}", current, next);
            return None;
        }

        self.current_state = next;
        if self.history.len() == HISTORY_LIMIT {
            self.history.pop_front();
        }
        self.history.push_back((current, next));

        Some(current)
    }

    /// Overwrite the state without validation or history (used on teardown)
    pub fn reset(&mut self, state: S) {
        self.current_state = state;
    }

    /// Get transition history
    pub fn history(&self) -> impl Iterator<Item = &(S, S)> {
        self.history.iter()
    }

    /// Clear transition history
    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}

impl<S: StateTransitions + Default> Default for StateMachine<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}
