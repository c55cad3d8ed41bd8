//! Spring physics
//!
//! A damped spring integrated with RK4. Retargeting keeps the current
//! velocity, so a navigation issued mid-transition bends the motion toward
//! the new target instead of restarting it.

/// Spring parameters
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
}

impl SpringConfig {
    /// Create a spring configuration
    pub fn new(stiffness: f32, damping: f32, mass: f32) -> Self {
        Self {
            stiffness,
            damping,
            mass,
        }
    }

    /// Track slide: quick, settles without visible overshoot
    pub fn track() -> Self {
        Self::new(300.0, 34.0, 1.0)
    }

    /// Thumbnail strip scroll: softer than the track
    pub fn strip() -> Self {
        Self::new(170.0, 26.0, 1.0)
    }

    /// Damping at which the spring stops oscillating
    pub fn critical_damping(&self) -> f32 {
        2.0 * (self.stiffness * self.mass).sqrt()
    }

    /// Returns true if the spring overshoots its target
    pub fn is_underdamped(&self) -> bool {
        self.damping < self.critical_damping()
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::track()
    }
}

/// Settling tolerance in pixels
const POSITION_EPSILON: f32 = 0.5;
/// Settling tolerance in pixels per second
const VELOCITY_EPSILON: f32 = 5.0;

/// A one-dimensional spring animator
#[derive(Clone, Copy, Debug)]
pub struct Spring {
    config: SpringConfig,
    value: f32,
    velocity: f32,
    target: f32,
}

impl Spring {
    /// Create a spring at rest on `initial`
    pub fn new(config: SpringConfig, initial: f32) -> Self {
        Self {
            config,
            value: initial,
            velocity: 0.0,
            target: initial,
        }
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

    pub fn config(&self) -> SpringConfig {
        self.config
    }

    /// Animate toward `target`, keeping the current velocity
    pub fn retarget(&mut self, target: f32) {
        self.target = target;
    }

    /// Jump to `value` and rest there
    pub fn snap_to(&mut self, value: f32) {
        self.value = value;
        self.target = value;
        self.velocity = 0.0;
    }

    /// Returns true once the spring is at rest on its target
    pub fn is_settled(&self) -> bool {
        (self.value - self.target).abs() < POSITION_EPSILON
            && self.velocity.abs() < VELOCITY_EPSILON
    }

    /// Advance the simulation by `dt` seconds
    ///
    /// Returns true while the spring is still moving.
    pub fn step(&mut self, dt: f32) -> bool {
        if self.is_settled() {
            self.snap_to(self.target);
            return false;
        }

        let half = dt * 0.5;
        let (dx1, dv1) = self.derivative(self.value, self.velocity);
        let (dx2, dv2) = self.derivative(self.value + dx1 * half, self.velocity + dv1 * half);
        let (dx3, dv3) = self.derivative(self.value + dx2 * half, self.velocity + dv2 * half);
        let (dx4, dv4) = self.derivative(self.value + dx3 * dt, self.velocity + dv3 * dt);

        self.value += (dx1 + 2.0 * dx2 + 2.0 * dx3 + dx4) * dt / 6.0;
        self.velocity += (dv1 + 2.0 * dv2 + 2.0 * dv3 + dv4) * dt / 6.0;
        true
    }

    /// (dx/dt, dv/dt) at position `x` with velocity `v`
    fn derivative(&self, x: f32, v: f32) -> (f32, f32) {
        let force = -self.config.stiffness * (x - self.target) - self.config.damping * v;
        (v, force / self.config.mass)
    }
}
