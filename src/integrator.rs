//! Fixed-step semi-implicit Euler integration.
//!
//! Each step runs in two phases: accelerations for every body are computed
//! from one unmodified snapshot of positions, and only then are velocities
//! and positions advanced. Interleaving the two would let later bodies see
//! earlier ones already moved within the same sub-step.

use crate::{body::Body, forces, state::SimulationState, utils::Vector2};
use rayon::prelude::*;

/// Sub-steps per rendered frame unless configured otherwise.
pub const DEFAULT_SUBSTEPS: usize = 10;

/// Phase one: accelerations for every body against the current snapshot.
/// Static bodies get zero.
pub fn compute_accelerations(bodies: &[Body], state: &SimulationState, parallel: bool) -> Vec<Vector2> {
    if parallel {
        bodies
            .par_iter()
            .map(|body| forces::compute_acceleration(body, bodies, state))
            .collect()
    } else {
        bodies
            .iter()
            .map(|body| forces::compute_acceleration(body, bodies, state))
            .collect()
    }
}

/// Advances all bodies by one sub-step of `state.time_scale()`.
pub fn step(bodies: &mut [Body], state: &SimulationState, parallel: bool) {
    let accelerations = compute_accelerations(bodies, state, parallel);

    let dt = state.time_scale();
    let trails = state.trails_enabled();
    for (body, acc) in bodies.iter_mut().zip(accelerations) {
        if body.is_static {
            continue;
        }
        body.acc = acc;
        body.update(dt);
        if trails {
            body.record_trail();
        }
    }
}

/// Runs `substeps` consecutive steps.
pub fn advance(bodies: &mut [Body], state: &SimulationState, substeps: usize, parallel: bool) {
    for _ in 0..substeps {
        step(bodies, state, parallel);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn pair() -> Vec<Body> {
        vec![
            Body::reference("Sun", Vector2::zero(), 8000.0, [0; 3], true),
            Body::new("p", Vector2::new(-100.0, 0.0), 10.0, [0; 3]),
        ]
    }

    #[test]
    fn step_applies_velocity_before_position() {
        let state = SimulationState::default();
        let mut bodies = pair();
        step(&mut bodies, &state, false);

        let a = 0.4 * 8000.0 / 10_000.0;
        let dt = 0.5;
        assert_relative_eq!(bodies[1].acc.x, a, epsilon = 1e-12);
        assert_relative_eq!(bodies[1].vel.x, a * dt, epsilon = 1e-12);
        assert_relative_eq!(bodies[1].pos.x, -100.0 + a * dt * dt, epsilon = 1e-12);
        assert_eq!(bodies[0].pos, Vector2::zero());
    }

    #[test]
    fn accelerations_use_one_snapshot() {
        let mut state = SimulationState::default();
        state.set_pairwise_interactions(true);
        state.set_time_scale(1.0).unwrap();
        let mut bodies = vec![
            Body::new("a", Vector2::new(0.0, 0.0), 50.0, [0; 3]),
            Body::new("b", Vector2::new(100.0, 0.0), 50.0, [0; 3]),
        ];
        step(&mut bodies, &state, false);
        // Symmetric pair must stay symmetric about x = 50.
        assert_relative_eq!(bodies[0].pos.x + bodies[1].pos.x, 100.0, epsilon = 1e-12);
        assert_relative_eq!(bodies[0].acc.x, -bodies[1].acc.x, epsilon = 1e-12);
    }

    #[test]
    fn parallel_matches_sequential() {
        let mut state = SimulationState::default();
        state.set_pairwise_interactions(true);
        let mut seq = pair();
        seq.push(Body::new("q", Vector2::new(0.0, 250.0), 30.0, [0; 3]));
        seq[1].vel = Vector2::new(0.0, 5.0);
        let mut par = seq.clone();

        advance(&mut seq, &state, 25, false);
        advance(&mut par, &state, 25, true);
        for (a, b) in seq.iter().zip(&par) {
            assert_eq!(a.pos, b.pos);
            assert_eq!(a.vel, b.vel);
        }
    }

    #[test]
    fn zero_time_scale_freezes_motion() {
        let mut state = SimulationState::default();
        state.set_time_scale(0.0).unwrap();
        let mut bodies = pair();
        bodies[1].vel = Vector2::new(0.0, 3.0);
        advance(&mut bodies, &state, 10, false);
        assert_eq!(bodies[1].pos, Vector2::new(-100.0, 0.0));
    }

    #[test]
    fn trails_follow_the_toggle() {
        let mut state = SimulationState::default();
        let mut bodies = pair();
        bodies[1].vel = Vector2::new(0.0, 12.0);
        advance(&mut bodies, &state, 3, false);
        assert_eq!(bodies[1].trail().len(), 3);

        state.toggle_trails();
        advance(&mut bodies, &state, 3, false);
        assert_eq!(bodies[1].trail().len(), 3);
    }
}
