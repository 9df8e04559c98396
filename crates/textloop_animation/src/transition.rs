//! Keyed enter/leave transitions
//!
//! `TransitionMotion` keeps a list of keyed entries, each carrying some data
//! and a set of named style properties. Every time the host supplies a new
//! set of target styles the engine diffs keys against what it already holds:
//!
//! - a key it has never seen **enters**: its properties start from the
//!   values produced by `will_enter` and spring toward the targets
//! - a key that is missing from the new set **leaves**: `will_leave` supplies
//!   the targets it animates toward; once every property has settled the
//!   entry is dropped (returning `None` drops it immediately)
//! - a key present in both is retargeted in place, which also revives an
//!   entry that was in the middle of leaving
//!
//! Leaving entries keep their position; entering entries are appended, so
//! the interpolated list renders outgoing content before incoming content.
//!
//! # Example
//!
//! ```rust
//! use textloop_animation::{spring, MotionEngine, MotionStyle, PlainStyle, SpringConfig,
//!     TransitionMotion, TransitionStyle};
//!
//! let mut motion = TransitionMotion::new();
//! let target = MotionStyle::new().with("opacity", spring(1.0, SpringConfig::default()));
//!
//! motion.set_styles(
//!     vec![TransitionStyle::new("a", "hello", target)],
//!     &|_| PlainStyle::new().with("opacity", 0.0),
//!     &|_| None,
//! );
//!
//! assert_eq!(motion.interpolated()[0].style.get("opacity"), Some(0.0));
//! for _ in 0..120 {
//!     motion.step(1.0 / 60.0);
//! }
//! assert_eq!(motion.interpolated()[0].style.get("opacity"), Some(1.0));
//! ```

use crate::scheduler::{AnimationScheduler, SpringId};
use crate::spring::{Spring, SpringConfig};
use indexmap::IndexMap;
use smallvec::SmallVec;

/// Target for one style property
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StyleValue {
    /// Animate toward `target` with the given spring
    Spring { target: f32, config: SpringConfig },
    /// Jump straight to the value
    Plain(f32),
}

impl StyleValue {
    /// The value this property comes to rest at
    pub fn target(&self) -> f32 {
        match *self {
            StyleValue::Spring { target, .. } => target,
            StyleValue::Plain(value) => value,
        }
    }
}

/// Named style targets
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MotionStyle {
    props: SmallVec<[(&'static str, StyleValue); 4]>,
}

impl MotionStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property, replacing an earlier value with the same name
    pub fn with(mut self, name: &'static str, value: StyleValue) -> Self {
        match self.props.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.props.push((name, value)),
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&StyleValue> {
        self.props.iter().find(|(n, _)| *n == name).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &StyleValue)> + '_ {
        self.props.iter().map(|(n, v)| (*n, v))
    }

    /// The resting values of every property
    pub fn at_rest(&self) -> PlainStyle {
        self.iter()
            .fold(PlainStyle::new(), |style, (name, value)| style.with(name, value.target()))
    }
}

/// Named concrete style values
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlainStyle {
    props: SmallVec<[(&'static str, f32); 4]>,
}

impl PlainStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &'static str, value: f32) -> Self {
        match self.props.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.props.push((name, value)),
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<f32> {
        self.props.iter().find(|(n, _)| *n == name).map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f32)> + '_ {
        self.props.iter().copied()
    }
}

/// A keyed target handed to the engine
#[derive(Clone, Debug, PartialEq)]
pub struct TransitionStyle<D> {
    pub key: String,
    pub data: D,
    pub style: MotionStyle,
}

impl<D> TransitionStyle<D> {
    pub fn new(key: impl Into<String>, data: D, style: MotionStyle) -> Self {
        Self {
            key: key.into(),
            data,
            style,
        }
    }
}

/// One frame's values for an active entry
#[derive(Clone, Debug, PartialEq)]
pub struct InterpolatedStyle<D> {
    pub key: String,
    pub data: D,
    pub style: PlainStyle,
    pub leaving: bool,
}

/// Produces the starting values for an entering entry
pub type WillEnter<'a, D> = &'a dyn Fn(&TransitionStyle<D>) -> PlainStyle;

/// Produces the leave targets for a departing entry, `None` to drop it now
pub type WillLeave<'a, D> = &'a dyn Fn(&TransitionStyle<D>) -> Option<MotionStyle>;

/// The interpolation engine contract consumed by widgets
pub trait MotionEngine<D> {
    /// Replace the set of resting targets
    fn set_styles(
        &mut self,
        styles: Vec<TransitionStyle<D>>,
        will_enter: WillEnter<'_, D>,
        will_leave: WillLeave<'_, D>,
    );

    /// Advance every active entry by `dt` seconds
    fn step(&mut self, dt: f32);

    /// Current values, in render order
    fn interpolated(&self) -> Vec<InterpolatedStyle<D>>;

    /// True while any entry is still moving or leaving
    fn is_animating(&self) -> bool;
}

#[derive(Clone, Copy, Debug)]
enum PropState {
    Animated(SpringId),
    Fixed(f32),
}

struct MotionEntry<D> {
    data: D,
    target: MotionStyle,
    props: SmallVec<[(&'static str, PropState); 4]>,
    leaving: bool,
}

/// Spring-driven implementation of [`MotionEngine`]
pub struct TransitionMotion<D> {
    entries: IndexMap<String, MotionEntry<D>>,
    scheduler: AnimationScheduler,
}

impl<D> Default for TransitionMotion<D> {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
            scheduler: AnimationScheduler::new(),
        }
    }
}

impl<D: Clone> TransitionMotion<D> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn is_leaving(&self, key: &str) -> bool {
        self.entries.get(key).is_some_and(|e| e.leaving)
    }

    fn current_value(&self, state: PropState) -> f32 {
        match state {
            PropState::Animated(id) => self.scheduler.get_spring(id).map_or(0.0, Spring::value),
            PropState::Fixed(value) => value,
        }
    }

    fn release(&mut self, entry: MotionEntry<D>) {
        for (_, state) in entry.props {
            if let PropState::Animated(id) = state {
                self.scheduler.remove_spring(id);
            }
        }
    }

    /// Point each property of `entry` at the values in `style`
    fn apply_style(
        scheduler: &mut AnimationScheduler,
        props: &mut SmallVec<[(&'static str, PropState); 4]>,
        style: &MotionStyle,
    ) {
        for (name, value) in style.iter() {
            let slot = props.iter().position(|(n, _)| *n == name);
            let current = slot.map(|i| props[i].1);

            let next = match (*value, current) {
                (StyleValue::Spring { target, config }, Some(PropState::Animated(id))) => {
                    scheduler.with_spring_mut(id, |s| {
                        s.set_config(config);
                        s.set_target(target);
                    });
                    PropState::Animated(id)
                }
                (StyleValue::Spring { target, config }, fixed) => {
                    let start = match fixed {
                        Some(PropState::Fixed(v)) => v,
                        _ => target,
                    };
                    let mut spring = Spring::new(config, start);
                    spring.set_target(target);
                    PropState::Animated(scheduler.add_spring(spring))
                }
                (StyleValue::Plain(v), Some(PropState::Animated(id))) => {
                    scheduler.remove_spring(id);
                    PropState::Fixed(v)
                }
                (StyleValue::Plain(v), _) => PropState::Fixed(v),
            };

            match slot {
                Some(i) => props[i].1 = next,
                None => props.push((name, next)),
            }
        }
    }

    fn entry_settled(&self, entry: &MotionEntry<D>) -> bool {
        entry.props.iter().all(|(_, state)| match state {
            PropState::Animated(id) => self
                .scheduler
                .get_spring(*id)
                .map_or(true, Spring::is_settled),
            PropState::Fixed(_) => true,
        })
    }
}

impl<D: Clone> MotionEngine<D> for TransitionMotion<D> {
    fn set_styles(
        &mut self,
        styles: Vec<TransitionStyle<D>>,
        will_enter: WillEnter<'_, D>,
        will_leave: WillLeave<'_, D>,
    ) {
        // Departures first, so that will_leave sees the state before any retargeting.
        let departing: Vec<String> = self
            .entries
            .iter()
            .filter(|(key, entry)| !entry.leaving && !styles.iter().any(|s| &s.key == *key))
            .map(|(key, _)| key.clone())
            .collect();

        for key in departing {
            let Some(entry) = self.entries.get(&key) else {
                continue;
            };
            let view = TransitionStyle::new(key.clone(), entry.data.clone(), entry.target.clone());

            match will_leave(&view) {
                Some(leave_style) => {
                    tracing::trace!(key = %key, "transition entry leaving");
                    if let Some(entry) = self.entries.get_mut(&key) {
                        Self::apply_style(&mut self.scheduler, &mut entry.props, &leave_style);
                        entry.target = leave_style;
                        entry.leaving = true;
                    }
                }
                None => {
                    tracing::trace!(key = %key, "transition entry removed");
                    if let Some(entry) = self.entries.shift_remove(&key) {
                        self.release(entry);
                    }
                }
            }
        }

        for style in styles {
            match self.entries.get_mut(&style.key) {
                Some(entry) => {
                    if entry.leaving {
                        tracing::trace!(key = %style.key, "transition entry revived");
                    }
                    Self::apply_style(&mut self.scheduler, &mut entry.props, &style.style);
                    entry.data = style.data;
                    entry.target = style.style;
                    entry.leaving = false;
                }
                None => {
                    let start = will_enter(&style);
                    tracing::trace!(key = %style.key, "transition entry entering");

                    let mut props: SmallVec<[(&'static str, PropState); 4]> = start
                        .iter()
                        .map(|(name, value)| (name, PropState::Fixed(value)))
                        .collect();
                    Self::apply_style(&mut self.scheduler, &mut props, &style.style);

                    self.entries.insert(
                        style.key,
                        MotionEntry {
                            data: style.data,
                            target: style.style,
                            props,
                            leaving: false,
                        },
                    );
                }
            }
        }
    }

    fn step(&mut self, dt: f32) {
        self.scheduler.tick(dt);

        let finished: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.leaving && self.entry_settled(entry))
            .map(|(key, _)| key.clone())
            .collect();

        for key in finished {
            tracing::trace!(key = %key, "transition entry left");
            if let Some(entry) = self.entries.shift_remove(&key) {
                self.release(entry);
            }
        }
    }

    fn interpolated(&self) -> Vec<InterpolatedStyle<D>> {
        self.entries
            .iter()
            .map(|(key, entry)| InterpolatedStyle {
                key: key.clone(),
                data: entry.data.clone(),
                style: entry
                    .props
                    .iter()
                    .fold(PlainStyle::new(), |style, (name, state)| {
                        style.with(*name, self.current_value(*state))
                    }),
                leaving: entry.leaving,
            })
            .collect()
    }

    fn is_animating(&self) -> bool {
        self.entries.values().any(|e| e.leaving) || self.scheduler.has_active_animations()
    }
}
