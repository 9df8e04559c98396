//! textloop animation system
//!
//! Spring physics, time-based tweens, and keyed enter/leave transitions.
//!
//! # Features
//!
//! - **Spring Physics**: RK4-integrated springs with stiffness, damping, mass
//! - **Tweens**: fixed-duration interpolation with CSS-style easing curves
//! - **Transitions**: keyed entries that spring in on enter and out on leave,
//!   behind the [`MotionEngine`] trait so hosts can swap the physics

pub mod easing;
pub mod scheduler;
pub mod spring;
pub mod transition;
pub mod tween;

pub use easing::Easing;
pub use scheduler::{AnimationScheduler, SpringId};
pub use spring::{spring, Spring, SpringConfig};
pub use transition::{
    InterpolatedStyle, MotionEngine, MotionStyle, PlainStyle, StyleValue, TransitionMotion,
    TransitionStyle, WillEnter, WillLeave,
};
pub use tween::Tween;
