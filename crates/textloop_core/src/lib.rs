//! textloop core runtime
//!
//! Foundational pieces shared by the animation engine and the widgets:
//!
//! - **Geometry**: measured box sizes
//! - **Errors**: the configuration/lifecycle error taxonomy
//! - **Timer**: a logical-clock repeating interval timer
//! - **State Machines**: typed transition tables for widget lifecycles
//!
//! # Example
//!
//! ```rust
//! use textloop_core::IntervalTimer;
//!
//! let mut timer = IntervalTimer::new(100).unwrap();
//! timer.start();
//!
//! assert_eq!(timer.advance(250), 2);
//! assert_eq!(timer.remaining_ms(), Some(50));
//! ```

pub mod error;
pub mod fsm;
pub mod geometry;
pub mod timer;

pub use error::{Result, TextLoopError};
pub use fsm::{StateMachine, StateMachineBuilder};
pub use geometry::Size;
pub use timer::IntervalTimer;
