use crate::utils::Vector2;
use std::collections::VecDeque;

/// Which part a body plays in the system.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BodyRole {
    /// The dominant mass everything else orbits.
    Reference,
    /// Any other body.
    Orbiter,
}

/// Bounded history of past positions, for drawing only.
///
/// A sample is stored only once the body has moved more than
/// [`Trail::MIN_SPACING`] from the last stored sample, so trail resolution
/// does not depend on the sub-step rate.
#[derive(Clone, Debug, Default)]
pub struct Trail {
    samples: VecDeque<Vector2>,
}

impl Trail {
    pub const CAPACITY: usize = 400;
    pub const MIN_SPACING: f64 = 5.0;

    pub fn new() -> Self {
        Self {
            samples: VecDeque::with_capacity(Self::CAPACITY),
        }
    }

    /// Records `pos` if it is far enough from the last sample.
    /// Evicts the oldest sample at capacity. Returns whether `pos` was stored.
    pub fn record(&mut self, pos: Vector2) -> bool {
        if let Some(last) = self.samples.back() {
            if (pos - *last).mag() <= Self::MIN_SPACING {
                return false;
            }
        }
        self.samples.push_back(pos);
        if self.samples.len() > Self::CAPACITY {
            self.samples.pop_front();
        }
        true
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Samples from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &Vector2> {
        self.samples.iter()
    }

    pub fn oldest(&self) -> Option<Vector2> {
        self.samples.front().copied()
    }

    pub fn newest(&self) -> Option<Vector2> {
        self.samples.back().copied()
    }
}

/// Represents a celestial body in the simulation.
#[derive(Clone, Debug)]
pub struct Body {
    /// Stable identifier, e.g. "Sun" or "Earth".
    pub name: String,
    /// Position vector.
    pub pos: Vector2,
    /// Velocity vector.
    pub vel: Vector2,
    /// Acceleration vector (recomputed each sub-step).
    pub acc: Vector2,
    /// Display colour, never read by the physics.
    pub color: [u8; 3],
    /// Draw a ring around this body.
    pub has_rings: bool,
    /// Speed multiplier applied on orbit reset while relativity is on.
    pub relativity_speed_factor: f64,
    /// Static bodies never move.
    pub is_static: bool,
    mass: f64,
    radius: f64,
    role: BodyRole,
    trail: Trail,
}

impl Body {
    /// Display radius of the reference body.
    pub const REFERENCE_RADIUS: f64 = 20.0;
    /// Smallest display radius of an orbiting body.
    pub const MIN_RADIUS: f64 = 5.0;

    /// Creates a new orbiting body at rest. `mass` must be positive.
    pub fn new(name: impl Into<String>, pos: Vector2, mass: f64, color: [u8; 3]) -> Self {
        debug_assert!(mass > 0.0, "body mass must be positive");
        Self {
            name: name.into(),
            pos,
            vel: Vector2::zero(),
            acc: Vector2::zero(),
            color,
            has_rings: false,
            relativity_speed_factor: 1.0,
            is_static: false,
            mass,
            radius: Self::orbiter_radius(mass),
            role: BodyRole::Orbiter,
            trail: Trail::new(),
        }
    }

    /// Creates the reference body. It is drawn smaller than its mass would
    /// suggest so its wobble stays visible.
    pub fn reference(
        name: impl Into<String>,
        pos: Vector2,
        mass: f64,
        color: [u8; 3],
        is_static: bool,
    ) -> Self {
        Self {
            radius: Self::REFERENCE_RADIUS,
            role: BodyRole::Reference,
            is_static,
            ..Self::new(name, pos, mass, color)
        }
    }

    pub fn with_rings(mut self, has_rings: bool) -> Self {
        self.has_rings = has_rings;
        self
    }

    pub fn with_relativity_speed_factor(mut self, factor: f64) -> Self {
        self.relativity_speed_factor = factor;
        self
    }

    fn orbiter_radius(mass: f64) -> f64 {
        ((mass.ln() * 4.0) as i64 as f64).max(Self::MIN_RADIUS)
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn role(&self) -> BodyRole {
        self.role
    }

    pub fn is_reference(&self) -> bool {
        self.role == BodyRole::Reference
    }

    pub fn trail(&self) -> &Trail {
        &self.trail
    }

    pub fn clear_trail(&mut self) {
        self.trail.clear();
    }

    /// Appends the current position to the trail, subject to trail spacing.
    pub fn record_trail(&mut self) -> bool {
        self.trail.record(self.pos)
    }

    pub fn momentum(&self) -> Vector2 {
        self.vel * self.mass
    }

    pub fn speed(&self) -> f64 {
        self.vel.mag()
    }

    /// Updates the body's position and velocity based on its current acceleration and time step `dt`.
    /// Uses semi-implicit Euler integration (velocity update first, then position).
    /// Static bodies are left untouched.
    pub fn update(&mut self, dt: f64) {
        if self.is_static {
            return;
        }
        self.vel += self.acc * dt;
        self.pos += self.vel * dt;
    }
}
