//! Typed state machines
//!
//! Flat state machines keyed by `(state, event)`. Widgets use them to track
//! their lifecycle so that illegal calls (mounting twice, ticking after
//! unmount) are rejected by a lookup instead of ad-hoc flags.

use rustc_hash::FxHashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// Builder for creating state machines
pub struct StateMachineBuilder<S, E> {
    initial_state: S,
    transitions: FxHashMap<(S, E), S>,
}

impl<S, E> StateMachineBuilder<S, E>
where
    S: Copy + Eq + Hash + Debug,
    E: Copy + Eq + Hash + Debug,
{
    pub fn new(initial_state: S) -> Self {
        Self {
            initial_state,
            transitions: FxHashMap::default(),
        }
    }

    /// Add a transition (from, event, to)
    pub fn on(mut self, from: S, event: E, to: S) -> Self {
        self.transitions.insert((from, event), to);
        self
    }

    /// Build the state machine
    pub fn build(self) -> StateMachine<S, E> {
        StateMachine {
            current_state: self.initial_state,
            transitions: self.transitions,
        }
    }
}

/// A state machine instance
pub struct StateMachine<S, E> {
    current_state: S,
    transitions: FxHashMap<(S, E), S>,
}

impl<S, E> StateMachine<S, E>
where
    S: Copy + Eq + Hash + Debug,
    E: Copy + Eq + Hash + Debug,
{
    /// Create a builder for a state machine
    pub fn builder(initial_state: S) -> StateMachineBuilder<S, E> {
        StateMachineBuilder::new(initial_state)
    }

    pub fn current_state(&self) -> S {
        self.current_state
    }

    pub fn is_in(&self, state: S) -> bool {
        self.current_state == state
    }

    /// Send an event. Returns the new state, or `None` when the event is not
    /// accepted in the current state (the state is left unchanged).
    pub fn send(&mut self, event: E) -> Option<S> {
        let from = self.current_state;
        let to = *self.transitions.get(&(from, event))?;

        tracing::trace!(?from, ?event, ?to, "fsm transition");
        self.current_state = to;
        Some(to)
    }
}
