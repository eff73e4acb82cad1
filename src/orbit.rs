//! Initial and reset orbit velocities.
//!
//! Every orbiter is given the speed of a circular orbit around the reference
//! body, `v = sqrt(G * M / r)`, directed perpendicular to the radius vector.
//! When the reference body is unlocked it is given the velocity that makes
//! total system momentum zero ("wobble" mode).

use crate::{
    body::Body,
    error::{SimError, SimResult},
    state::SimulationState,
    utils::{perpendicular, Vector2},
};
use log::{debug, info};

/// Index of the reference body in `bodies`.
pub fn reference_index(bodies: &[Body]) -> SimResult<usize> {
    bodies
        .iter()
        .position(Body::is_reference)
        .ok_or(SimError::MissingReference)
}

/// Velocity of a circular orbit of `body` around `reference` under constant `g`.
/// Fails if the two bodies coincide.
pub fn circular_velocity(body: &Body, reference: &Body, g: f64) -> SimResult<Vector2> {
    circular_velocity_about(body, reference.pos, reference.mass(), g)
}

fn circular_velocity_about(body: &Body, center: Vector2, mass: f64, g: f64) -> SimResult<Vector2> {
    let r_vec = center - body.pos;
    let r = r_vec.mag();
    if r == 0.0 {
        return Err(SimError::CoincidentBodies(body.name.clone()));
    }
    let v = (g * mass / r).sqrt();
    Ok(perpendicular(r_vec).normalized() * v)
}

/// Sum of `velocity * mass` over `bodies`.
pub fn total_momentum<'a>(bodies: impl IntoIterator<Item = &'a Body>) -> Vector2 {
    bodies
        .into_iter()
        .fold(Vector2::zero(), |acc, b| acc + b.momentum())
}

/// Re-derives every orbit from the current positions and parameters.
///
/// 1. The reference body is moved back to `origin` and stopped.
/// 2. Every orbiter gets its circular velocity and loses its trail.
/// 3. The vertical component is mirrored so orbits run in the display's
///    chosen rotational sense.
/// 4. With relativity on, each orbiter's velocity is scaled by its
///    `relativity_speed_factor` (a visual stand-in for faster precession).
/// 5. If the reference body is unlocked it absorbs the opposite of the
///    orbiters' total momentum.
///
/// Nothing is modified if any orbiter coincides with `origin`.
pub fn reset_orbits(bodies: &mut [Body], origin: Vector2, state: &SimulationState) -> SimResult<()> {
    let ref_idx = reference_index(bodies)?;
    let ref_mass = bodies[ref_idx].mass();
    let g = state.gravitational_constant();

    let velocities = bodies
        .iter()
        .enumerate()
        .map(|(i, b)| {
            if i == ref_idx {
                return Ok(Vector2::zero());
            }
            let mut vel = circular_velocity_about(b, origin, ref_mass, g)?;
            vel.y = -vel.y;
            if state.relativity_enabled() {
                vel *= b.relativity_speed_factor;
            }
            Ok(vel)
        })
        .collect::<SimResult<Vec<_>>>()?;

    for (i, (body, vel)) in bodies.iter_mut().zip(velocities).enumerate() {
        body.vel = vel;
        body.acc = Vector2::zero();
        if i == ref_idx {
            body.pos = origin;
        } else {
            body.clear_trail();
        }
    }

    if !state.reference_locked() {
        let momentum = total_momentum(
            bodies
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != ref_idx)
                .map(|(_, b)| b),
        );
        let reference = &mut bodies[ref_idx];
        reference.vel = -(momentum / reference.mass());
    }

    debug!(
        "orbits reset: G = {}, relativity = {}, reference locked = {}",
        g,
        state.relativity_enabled(),
        state.reference_locked()
    );
    Ok(())
}

/// Locks or unlocks the reference body and re-derives all orbits.
/// Returns the new lock state. On failure the lock state is left as it was.
pub fn toggle_reference_lock(
    bodies: &mut [Body],
    origin: Vector2,
    state: &mut SimulationState,
) -> SimResult<bool> {
    let ref_idx = reference_index(bodies)?;
    let locked = !state.reference_locked;
    state.reference_locked = locked;
    bodies[ref_idx].is_static = locked;

    if let Err(e) = reset_orbits(bodies, origin, state) {
        state.reference_locked = !locked;
        bodies[ref_idx].is_static = !locked;
        return Err(e);
    }

    info!(
        "{} {}",
        bodies[ref_idx].name,
        if locked { "locked" } else { "unlocked (wobble)" }
    );
    Ok(locked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn system() -> Vec<Body> {
        vec![
            Body::reference("Sun", Vector2::new(500.0, 350.0), 8000.0, [0; 3], true),
            Body::new("Mercury", Vector2::new(400.0, 350.0), 10.0, [0; 3])
                .with_relativity_speed_factor(1.2),
            Body::new("Jupiter", Vector2::new(0.0, 350.0), 300.0, [0; 3]),
        ]
    }

    #[test]
    fn circular_velocity_magnitude_and_direction() {
        let bodies = system();
        let v = circular_velocity(&bodies[1], &bodies[0], 0.4).unwrap();
        assert_relative_eq!(v.mag(), 32.0_f64.sqrt(), epsilon = 1e-12);
        let r = bodies[0].pos - bodies[1].pos;
        assert_relative_eq!(v.dot(r), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn circular_velocity_rejects_coincident_bodies() {
        let sun = Body::reference("Sun", Vector2::zero(), 10.0, [0; 3], true);
        let p = Body::new("p", Vector2::zero(), 1.0, [0; 3]);
        assert!(matches!(
            circular_velocity(&p, &sun, 0.4),
            Err(SimError::CoincidentBodies(_))
        ));
    }

    #[test]
    fn reset_points_orbits_in_the_display_sense() {
        let mut bodies = system();
        let origin = bodies[0].pos;
        reset_orbits(&mut bodies, origin, &SimulationState::default()).unwrap();
        // Left of the sun, moving toward +y.
        assert_relative_eq!(bodies[1].vel.x, 0.0, epsilon = 1e-12);
        assert!(bodies[1].vel.y > 0.0);
        assert_eq!(bodies[0].vel, Vector2::zero());
    }

    #[test]
    fn relativity_boosts_only_flagged_bodies() {
        let mut state = SimulationState::default();
        let mut plain = system();
        let origin = plain[0].pos;
        reset_orbits(&mut plain, origin, &state).unwrap();

        state.set_relativity(true);
        let mut boosted = system();
        reset_orbits(&mut boosted, origin, &state).unwrap();

        assert_relative_eq!(boosted[1].speed(), plain[1].speed() * 1.2, epsilon = 1e-12);
        assert_relative_eq!(boosted[2].speed(), plain[2].speed(), epsilon = 1e-12);
    }

    #[test]
    fn failed_reset_changes_nothing() {
        let mut bodies = system();
        bodies[2].pos = Vector2::new(500.0, 350.0);
        bodies[1].vel = Vector2::new(1.0, 2.0);
        let origin = bodies[0].pos;
        assert!(reset_orbits(&mut bodies, origin, &SimulationState::default()).is_err());
        assert_eq!(bodies[1].vel, Vector2::new(1.0, 2.0));
    }

    #[test]
    fn missing_reference_is_an_error() {
        let mut bodies = vec![Body::new("p", Vector2::new(1.0, 0.0), 1.0, [0; 3])];
        let mut state = SimulationState::default();
        assert!(matches!(
            toggle_reference_lock(&mut bodies, Vector2::zero(), &mut state),
            Err(SimError::MissingReference)
        ));
        assert!(state.reference_locked());
    }
}
