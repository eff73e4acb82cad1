use crate::{
    body::Body,
    config::{PlanetSpec, ReferenceSpec, SystemConfig},
    error::{SimError, SimResult},
    integrator, orbit,
    state::SimulationState,
    utils::{is_finite, Vector2},
};

use log::{info, trace, warn};
use std::collections::HashSet;

/// One running orrery: a fixed set of bodies, the parameters driving them and
/// the per-frame integration schedule.
///
/// The presentation layer reads bodies through [`Simulation::bodies`] and
/// changes physics only through the mutation methods here.
#[derive(Clone, Debug)]
pub struct Simulation {
    bodies: Vec<Body>,
    state: SimulationState,
    /// Where the reference body returns on reset.
    origin: Vector2,
    reference: usize,
    /// Integrator sub-steps per call to `advance`.
    pub substeps: usize,
    /// Current frame count.
    pub frame: usize,
    /// Whether to compute accelerations with Rayon.
    pub use_rayon: bool,
    diverged: bool,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::solar_system()
    }
}

impl Simulation {
    /// The built-in eight-planet solar system with default parameters.
    pub fn solar_system() -> Self {
        let config = SystemConfig::solar_system();
        let mut sim = Self::assemble(&config.reference, &config.planets, SimulationState::default());
        // Cannot fail: the preset has a reference body and every planet sits
        // a positive distance from it. `preset_passes_validation` checks this.
        let _ = orbit::reset_orbits(&mut sim.bodies, sim.origin, &sim.state);
        sim
    }

    /// Builds the reference body and one body per planet, then derives
    /// circular orbits for all of them.
    pub fn create_system(
        reference: &ReferenceSpec,
        planets: &[PlanetSpec],
        state: SimulationState,
    ) -> SimResult<Self> {
        check_mass(&reference.name, reference.mass)?;
        let origin = origin_of(reference);
        if !is_finite(origin) {
            return Err(SimError::InvalidPosition(reference.name.clone()));
        }

        let mut names = HashSet::new();
        names.insert(reference.name.as_str());
        for p in planets {
            check_mass(&p.name, p.mass)?;
            if !(p.distance.is_finite() && p.distance > 0.0) {
                return Err(SimError::InvalidDistance {
                    name: p.name.clone(),
                    distance: p.distance,
                });
            }
            if !(p.relativity_speed_factor.is_finite() && p.relativity_speed_factor > 0.0) {
                return Err(SimError::InvalidSpeedFactor {
                    name: p.name.clone(),
                    factor: p.relativity_speed_factor,
                });
            }
            if !names.insert(p.name.as_str()) {
                return Err(SimError::DuplicateBody(p.name.clone()));
            }
        }

        let mut sim = Self::assemble(reference, planets, state);
        orbit::reset_orbits(&mut sim.bodies, sim.origin, &sim.state)?;
        info!(
            "created system around {} with {} planets",
            reference.name,
            planets.len()
        );
        Ok(sim)
    }

    /// Builds a simulation from a loaded system definition.
    pub fn from_config(config: &SystemConfig) -> SimResult<Self> {
        let state = config.physics.to_state()?;
        let mut sim = Self::create_system(&config.reference, &config.planets, state)?;
        sim.substeps = config.physics.substeps;
        Ok(sim)
    }

    /// Places the bodies without validating or deriving orbits.
    fn assemble(reference: &ReferenceSpec, planets: &[PlanetSpec], state: SimulationState) -> Self {
        let origin = origin_of(reference);
        let mut bodies = Vec::with_capacity(planets.len() + 1);
        bodies.push(reference_body(reference, state.reference_locked()));
        bodies.extend(planets.iter().map(|p| planet_body(p, origin)));
        Self {
            bodies,
            state,
            origin,
            reference: 0,
            substeps: integrator::DEFAULT_SUBSTEPS,
            frame: 0,
            use_rayon: false,
            diverged: false,
        }
    }

    /// Sets whether to use Rayon for the acceleration phase.
    pub fn set_use_rayon(&mut self, use_rayon: bool) {
        self.use_rayon = use_rayon;
    }

    /// Advances the simulation by one rendered frame (`substeps` integrator steps).
    pub fn advance(&mut self) {
        self.advance_by(self.substeps);
    }

    /// Advances the simulation by `substeps` integrator steps as one frame.
    pub fn advance_by(&mut self, substeps: usize) {
        integrator::advance(&mut self.bodies, &self.state, substeps, self.use_rayon);
        self.frame += 1;
        trace!("frame {}", self.frame);

        if !self.diverged {
            if let Some(b) = self.bodies.iter().find(|b| !is_finite(b.pos) || !is_finite(b.vel)) {
                warn!("{} left finite space at frame {}", b.name, self.frame);
                self.diverged = true;
            }
        }
    }

    /// Re-derives circular orbits for the current G and settings.
    pub fn reset_orbits(&mut self) -> SimResult<()> {
        orbit::reset_orbits(&mut self.bodies, self.origin, &self.state)?;
        self.diverged = false;
        Ok(())
    }

    /// Locks or unlocks the reference body; returns the new lock state.
    pub fn toggle_reference_lock(&mut self) -> SimResult<bool> {
        let locked = orbit::toggle_reference_lock(&mut self.bodies, self.origin, &mut self.state)?;
        self.diverged = false;
        Ok(locked)
    }

    /// Changes G for force computation. Orbits keep their current
    /// velocities until [`Simulation::reset_orbits`] is called.
    pub fn set_gravitational_constant(&mut self, g: f64) -> SimResult<()> {
        self.state.set_gravitational_constant(g)
    }

    pub fn set_time_scale(&mut self, time_scale: f64) -> SimResult<()> {
        self.state.set_time_scale(time_scale)
    }

    pub fn toggle_relativity(&mut self) -> bool {
        self.state.toggle_relativity()
    }

    pub fn toggle_pairwise_interactions(&mut self) -> bool {
        self.state.toggle_pairwise_interactions()
    }

    pub fn toggle_trails(&mut self) -> bool {
        self.state.toggle_trails()
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body(&self, name: &str) -> Option<&Body> {
        self.bodies.iter().find(|b| b.name == name)
    }

    pub fn reference(&self) -> &Body {
        &self.bodies[self.reference]
    }

    pub fn origin(&self) -> Vector2 {
        self.origin
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    /// Sum of `velocity * mass` over every body.
    pub fn total_momentum(&self) -> Vector2 {
        orbit::total_momentum(&self.bodies)
    }

    /// Distance of body `index` from the reference body.
    pub fn distance_to_reference(&self, index: usize) -> Option<f64> {
        let body = self.bodies.get(index)?;
        Some((body.pos - self.reference().pos).mag())
    }

    /// First body within `max(tolerance, radius)` of the world-space `point`.
    pub fn find_body_near(&self, point: Vector2, tolerance: f64) -> Option<&Body> {
        self.bodies
            .iter()
            .find(|b| (b.pos - point).mag() <= tolerance.max(b.radius()))
    }
}

fn check_mass(name: &str, mass: f64) -> SimResult<()> {
    if mass.is_finite() && mass > 0.0 {
        Ok(())
    } else {
        Err(SimError::InvalidMass {
            name: name.to_string(),
            mass,
        })
    }
}

fn origin_of(reference: &ReferenceSpec) -> Vector2 {
    Vector2::new(reference.position[0], reference.position[1])
}

fn reference_body(spec: &ReferenceSpec, locked: bool) -> Body {
    Body::reference(spec.name.clone(), origin_of(spec), spec.mass, spec.color, locked)
}

fn planet_body(spec: &PlanetSpec, origin: Vector2) -> Body {
    let pos = Vector2::new(origin.x - spec.distance, origin.y);
    Body::new(spec.name.clone(), pos, spec.mass, spec.color)
        .with_rings(spec.rings)
        .with_relativity_speed_factor(spec.relativity_speed_factor)
}
