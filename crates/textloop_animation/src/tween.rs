//! Fixed-duration tweens
//!
//! The headless counterpart of a CSS `transition`: a value moves from its
//! current position to a new target over a fixed duration along an easing
//! curve. Retargeting mid-flight restarts from wherever the value is.

use crate::easing::Easing;

#[derive(Clone, Debug)]
pub struct Tween {
    from: f32,
    to: f32,
    duration_ms: f32,
    elapsed_ms: f32,
    easing: Easing,
}

impl Tween {
    /// A tween at rest at `value`
    pub fn new(value: f32, duration_ms: u32, easing: Easing) -> Self {
        Self {
            from: value,
            to: value,
            duration_ms: duration_ms as f32,
            elapsed_ms: duration_ms as f32,
            easing,
        }
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    pub fn duration_ms(&self) -> u32 {
        self.duration_ms as u32
    }

    pub fn target(&self) -> f32 {
        self.to
    }

    /// Start moving toward `to`. A no-op when already heading there.
    pub fn set_target(&mut self, to: f32) {
        if to == self.to {
            return;
        }
        self.from = self.value();
        self.to = to;
        self.elapsed_ms = 0.0;
    }

    /// Jump to a value without animating
    pub fn snap_to(&mut self, value: f32) {
        self.from = value;
        self.to = value;
        self.elapsed_ms = self.duration_ms;
    }

    pub fn step(&mut self, dt_ms: f32) {
        self.elapsed_ms = (self.elapsed_ms + dt_ms).min(self.duration_ms);
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed_ms >= self.duration_ms
    }

    pub fn value(&self) -> f32 {
        if self.is_finished() {
            return self.to;
        }
        let progress = self.easing.apply(self.elapsed_ms / self.duration_ms);
        self.from + (self.to - self.from) * progress
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_progress() {
        let mut tween = Tween::new(0.0, 100, Easing::Linear);
        tween.set_target(200.0);

        tween.step(25.0);
        assert!((tween.value() - 50.0).abs() < 1e-3);

        tween.step(25.0);
        assert!((tween.value() - 100.0).abs() < 1e-3);

        tween.step(500.0);
        assert!(tween.is_finished());
        assert_eq!(tween.value(), 200.0);
    }

    #[test]
    fn test_retarget_starts_from_current_value() {
        let mut tween = Tween::new(0.0, 100, Easing::Linear);
        tween.set_target(100.0);
        tween.step(50.0);

        tween.set_target(0.0);
        assert!((tween.value() - 50.0).abs() < 1e-3);

        tween.step(50.0);
        assert!((tween.value() - 25.0).abs() < 1e-3);
    }

    #[test]
    fn test_zero_duration_jumps() {
        let mut tween = Tween::new(10.0, 0, Easing::Linear);
        tween.set_target(30.0);
        assert_eq!(tween.value(), 30.0);
    }

    #[test]
    fn test_same_target_does_not_restart() {
        let mut tween = Tween::new(0.0, 100, Easing::Linear);
        tween.set_target(100.0);
        tween.step(60.0);
        tween.set_target(100.0);

        assert!((tween.value() - 60.0).abs() < 1e-3);
    }
}
