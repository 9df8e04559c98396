//! Spring physics
//!
//! A damped harmonic oscillator integrated with RK4. Large frame deltas are
//! split into fixed sub-steps so stiff springs stay stable at low frame rates.

use crate::transition::StyleValue;

/// Longest single integration step, in seconds
const MAX_STEP: f32 = 1.0 / 120.0;

/// Spring parameters
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
    /// Distance and speed below which the spring snaps to rest
    pub precision: f32,
}

impl SpringConfig {
    pub fn new(stiffness: f32, damping: f32, mass: f32) -> Self {
        Self {
            stiffness,
            damping,
            mass,
            precision: 0.01,
        }
    }

    pub fn with_precision(mut self, precision: f32) -> Self {
        self.precision = precision;
        self
    }

    /// Soft, slow spring
    pub fn gentle() -> Self {
        Self::new(120.0, 14.0, 1.0)
    }

    /// Bouncy spring with visible overshoot
    pub fn wobbly() -> Self {
        Self::new(180.0, 12.0, 1.0)
    }

    pub fn stiff() -> Self {
        Self::new(210.0, 20.0, 1.0)
    }

    /// Fast spring with almost no overshoot
    pub fn snappy() -> Self {
        Self::new(400.0, 30.0, 1.0)
    }

    /// Stiffness, damping and mass all positive and finite
    pub fn is_valid(&self) -> bool {
        [self.stiffness, self.damping, self.mass, self.precision]
            .iter()
            .all(|v| v.is_finite())
            && self.stiffness > 0.0
            && self.damping >= 0.0
            && self.mass > 0.0
            && self.precision > 0.0
    }
}

impl Default for SpringConfig {
    /// Critically damped, no overshoot
    fn default() -> Self {
        Self::new(170.0, 26.0, 1.0)
    }
}

/// Shorthand for a spring-driven style value
pub fn spring(target: f32, config: SpringConfig) -> StyleValue {
    StyleValue::Spring { target, config }
}

/// A single animated scalar
#[derive(Clone, Debug)]
pub struct Spring {
    config: SpringConfig,
    value: f32,
    velocity: f32,
    target: f32,
}

impl Spring {
    /// Create a spring at rest at `initial`
    pub fn new(config: SpringConfig, initial: f32) -> Self {
        Self {
            config,
            value: initial,
            velocity: 0.0,
            target: initial,
        }
    }

    pub fn config(&self) -> SpringConfig {
        self.config
    }

    pub fn set_config(&mut self, config: SpringConfig) {
        self.config = config;
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    /// Retarget, keeping current position and velocity
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Jump to a value and stop
    pub fn snap_to(&mut self, value: f32) {
        self.value = value;
        self.target = value;
        self.velocity = 0.0;
    }

    pub fn is_settled(&self) -> bool {
        self.velocity == 0.0 && self.value == self.target
    }

    /// Advance the simulation by `dt` seconds
    pub fn step(&mut self, dt: f32) {
        if self.is_settled() || dt <= 0.0 {
            return;
        }

        let mut remaining = dt;
        while remaining > 0.0 {
            let h = remaining.min(MAX_STEP);
            self.integrate(h);
            remaining -= h;

            if self.velocity.abs() < self.config.precision
                && (self.value - self.target).abs() < self.config.precision
            {
                self.snap_to(self.target);
                return;
            }
        }
    }

    fn acceleration(&self, x: f32, v: f32) -> f32 {
        let spring_force = -self.config.stiffness * (x - self.target);
        let damping_force = -self.config.damping * v;
        (spring_force + damping_force) / self.config.mass
    }

    fn integrate(&mut self, h: f32) {
        let (x, v) = (self.value, self.velocity);

        let k1_x = v;
        let k1_v = self.acceleration(x, v);

        let k2_x = v + 0.5 * h * k1_v;
        let k2_v = self.acceleration(x + 0.5 * h * k1_x, k2_x);

        let k3_x = v + 0.5 * h * k2_v;
        let k3_v = self.acceleration(x + 0.5 * h * k2_x, k3_x);

        let k4_x = v + h * k3_v;
        let k4_v = self.acceleration(x + h * k3_x, k4_x);

        self.value = x + h / 6.0 * (k1_x + 2.0 * k2_x + 2.0 * k3_x + k4_x);
        self.velocity = v + h / 6.0 * (k1_v + 2.0 * k2_v + 2.0 * k3_v + k4_v);
    }
}
