//! System definitions loaded from YAML.
//!
//! A system is one reference body plus any number of planets placed along
//! the -x axis from it. An example matching these types:
//!
//! ```yaml
//! reference:
//!   name: Sun
//!   mass: 8000.0
//!   position: [500.0, 350.0]
//!   color: [255, 204, 0]
//!
//! planets:
//!   - name: Mercury
//!     distance: 100.0
//!     mass: 10.0
//!     color: [100, 100, 100]
//!     relativity_speed_factor: 1.2
//!   - name: Saturn
//!     distance: 700.0
//!     mass: 250.0
//!     color: [245, 245, 220]
//!     rings: true
//!
//! physics:
//!   gravitational_constant: 0.4
//!   time_scale: 0.5
//!   substeps: 10
//!   reference_locked: true
//! ```
//!
//! Omitted sections fall back to the built-in solar system.

use crate::{
    error::SimResult,
    integrator::DEFAULT_SUBSTEPS,
    state::SimulationState,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub type Color = [u8; 3];

pub const YELLOW: Color = [255, 204, 0];
pub const GREY: Color = [100, 100, 100];
pub const ORANGE: Color = [255, 165, 0];
pub const BLUE: Color = [50, 150, 255];
pub const RED: Color = [255, 80, 80];
pub const BEIGE: Color = [245, 245, 220];
pub const LIGHT_BLUE: Color = [173, 216, 230];
pub const DARK_BLUE: Color = [0, 0, 139];

/// The body everything else orbits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReferenceSpec {
    pub name: String,
    pub mass: f64,
    /// Canonical position; the reference body returns here on every reset.
    #[serde(default = "default_origin")]
    pub position: [f64; 2],
    #[serde(default = "default_reference_color")]
    pub color: Color,
}

impl Default for ReferenceSpec {
    fn default() -> Self {
        Self {
            name: "Sun".to_string(),
            mass: 8000.0,
            position: default_origin(),
            color: YELLOW,
        }
    }
}

fn default_origin() -> [f64; 2] {
    [500.0, 350.0]
}

fn default_reference_color() -> Color {
    YELLOW
}

/// One planet, placed `distance` units from the reference body along -x.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlanetSpec {
    pub name: String,
    pub distance: f64,
    pub mass: f64,
    #[serde(default = "default_planet_color")]
    pub color: Color,
    #[serde(default)]
    pub rings: bool,
    /// Speed multiplier applied on reset while relativity is on.
    #[serde(default = "default_speed_factor")]
    pub relativity_speed_factor: f64,
}

impl PlanetSpec {
    pub fn new(name: &str, distance: f64, mass: f64, color: Color) -> Self {
        Self {
            name: name.to_string(),
            distance,
            mass,
            color,
            rings: false,
            relativity_speed_factor: 1.0,
        }
    }
}

fn default_planet_color() -> Color {
    GREY
}

fn default_speed_factor() -> f64 {
    1.0
}

/// Initial simulation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PhysicsConfig {
    pub gravitational_constant: f64,
    pub time_scale: f64,
    pub relativity: bool,
    pub pairwise_interactions: bool,
    pub reference_locked: bool,
    pub trails: bool,
    /// Integrator sub-steps per frame.
    pub substeps: usize,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravitational_constant: SimulationState::DEFAULT_G,
            time_scale: SimulationState::DEFAULT_TIME_SCALE,
            relativity: false,
            pairwise_interactions: false,
            reference_locked: true,
            trails: true,
            substeps: DEFAULT_SUBSTEPS,
        }
    }
}

impl PhysicsConfig {
    /// Builds a validated [`SimulationState`] from these settings.
    pub fn to_state(&self) -> SimResult<SimulationState> {
        let mut state = SimulationState::new();
        state.set_gravitational_constant(self.gravitational_constant)?;
        state.set_time_scale(self.time_scale)?;
        state.set_relativity(self.relativity);
        state.set_pairwise_interactions(self.pairwise_interactions);
        state.set_trails(self.trails);
        state.reference_locked = self.reference_locked;
        Ok(state)
    }
}

/// Top-level system definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SystemConfig {
    #[serde(default)]
    pub reference: ReferenceSpec,
    #[serde(default = "solar_planets")]
    pub planets: Vec<PlanetSpec>,
    #[serde(default)]
    pub physics: PhysicsConfig,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self::solar_system()
    }
}

impl SystemConfig {
    /// The eight-planet solar system.
    pub fn solar_system() -> Self {
        Self {
            reference: ReferenceSpec::default(),
            planets: solar_planets(),
            physics: PhysicsConfig::default(),
        }
    }

    pub fn from_yaml(yaml: &str) -> SimResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> SimResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn to_yaml(&self) -> SimResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

fn solar_planets() -> Vec<PlanetSpec> {
    vec![
        PlanetSpec {
            relativity_speed_factor: 1.2,
            ..PlanetSpec::new("Mercury", 100.0, 10.0, GREY)
        },
        PlanetSpec::new("Venus", 160.0, 20.0, ORANGE),
        PlanetSpec::new("Earth", 220.0, 25.0, BLUE),
        PlanetSpec::new("Mars", 300.0, 15.0, RED),
        PlanetSpec::new("Jupiter", 500.0, 300.0, BEIGE),
        PlanetSpec {
            rings: true,
            ..PlanetSpec::new("Saturn", 700.0, 250.0, BEIGE)
        },
        PlanetSpec::new("Uranus", 900.0, 100.0, LIGHT_BLUE),
        PlanetSpec::new("Neptune", 1100.0, 110.0, DARK_BLUE),
    ]
}
