pub mod body;
pub mod c_api;
pub mod config;
pub mod error;
pub mod forces;
pub mod integrator;
pub mod orbit;
pub mod simulation;
pub mod state;
pub mod utils;

pub use body::{Body, BodyRole, Trail};
pub use config::{PhysicsConfig, PlanetSpec, ReferenceSpec, SystemConfig};
pub use error::{SimError, SimResult};
pub use simulation::Simulation;
pub use state::SimulationState;
pub use utils::Vector2;
