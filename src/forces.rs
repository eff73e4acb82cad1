//! Pairwise gravitational force model.
//!
//! Newtonian inverse-square attraction with a minimum-distance floor, plus an
//! optional ad hoc 1/r^3 term between the reference body and everything else.
//! The extra term imitates perihelion precession for display; it is not
//! general relativity and its constants are tuned, not derived.

use crate::{
    body::Body,
    state::SimulationState,
    utils::{clamped_distance, Vector2},
};

/// Separations below this are treated as this distance.
pub const MIN_DISTANCE: f64 = 15.0;
/// Numerator constant of the relativistic correction.
pub const RELATIVITY_K: f64 = 60_000.0;
/// "Speed of light" of the relativistic correction.
pub const RELATIVITY_C: f64 = 40.0;

/// Whether `a` and `b` interact under the current settings.
/// With pairwise interactions off only pairs involving the reference body count.
pub fn interacts(a: &Body, b: &Body, state: &SimulationState) -> bool {
    state.pairwise_interactions_enabled() || a.is_reference() || b.is_reference()
}

/// Magnitude of the attraction between `a` and `b` at separation `r`
/// (already clamped to [`MIN_DISTANCE`]).
pub fn force_magnitude(a: &Body, b: &Body, r: f64, state: &SimulationState) -> f64 {
    let g = state.gravitational_constant();
    let mm = a.mass() * b.mass();
    let mut mag = g * mm / (r * r);
    if state.relativity_enabled() && (a.is_reference() || b.is_reference()) {
        mag += g * mm * RELATIVITY_K / (r * r * r * RELATIVITY_C * RELATIVITY_C);
    }
    mag
}

/// Force exerted on `target` by `other`, or `None` if the pair does not interact.
/// Always points from `target` toward `other`.
pub fn pair_force(target: &Body, other: &Body, state: &SimulationState) -> Option<Vector2> {
    if !interacts(target, other, state) {
        return None;
    }
    let d = other.pos - target.pos;
    let r = clamped_distance(d, MIN_DISTANCE);
    let mag = force_magnitude(target, other, r, state);
    // Coincident positions have no direction to pull along.
    if d.mag_sq() == 0.0 {
        return Some(Vector2::zero());
    }
    Some(d.normalized() * mag)
}

/// Acceleration of `target` due to every other body in `bodies`.
///
/// Static bodies get zero. `target` may or may not be an element of `bodies`;
/// it is skipped by identity if it is. Nothing is mutated.
pub fn compute_acceleration(target: &Body, bodies: &[Body], state: &SimulationState) -> Vector2 {
    if target.is_static {
        return Vector2::zero();
    }
    let total_force = bodies
        .iter()
        .filter(|other| !std::ptr::eq(*other, target))
        .filter_map(|other| pair_force(target, other, state))
        .fold(Vector2::zero(), |acc, f| acc + f);
    total_force / target.mass()
}
