//! TextLoop state and reducers
//!
//! The widget's mutable state is a small `Copy` value. Every change goes
//! through one of the reducers below, which take the previous state and
//! return the next.

use std::num::NonZeroUsize;
use textloop_core::Size;

/// The generation counter wraps here to keep animation keys bounded.
///
/// A key is only reused after this many ticks; an entry still leaving under
/// the same key at that point is revived instead of re-entered.
pub const GENERATION_WRAP: u32 = 1000;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextLoopState {
    /// Index of the displayed item
    pub index: usize,
    /// Per-tick identity used to key the animation entry
    pub generation: u32,
    /// Last measured size of the displayed item
    pub size: Size,
}

impl TextLoopState {
    pub fn new(initial: Size) -> Self {
        Self {
            index: 0,
            generation: 0,
            size: initial,
        }
    }

    /// Advance index and generation together
    pub fn tick(self, item_count: NonZeroUsize) -> Self {
        Self {
            index: (self.index + 1) % item_count.get(),
            generation: (self.generation + 1) % GENERATION_WRAP,
            ..self
        }
    }

    /// Record a measurement. Invalid sizes leave the state unchanged.
    pub fn measured(self, size: Size) -> Self {
        if !size.is_valid() {
            return self;
        }
        Self { size, ..self }
    }

    /// Keep the index valid after the item list changed length
    pub fn clamped(self, item_count: NonZeroUsize) -> Self {
        Self {
            index: self.index % item_count.get(),
            ..self
        }
    }

    pub fn is_measured(&self) -> bool {
        !self.size.is_unmeasured()
    }

    /// Animation key of the displayed item
    pub fn key(&self) -> String {
        format!("step{}", self.generation)
    }
}
