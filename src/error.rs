//! Error types for the orrery core.
//!
//! Invalid input is rejected where it enters the system (construction,
//! configuration setters, config loading) so the integrator never sees it.

use thiserror::Error;

/// Result type alias for orrery operations.
pub type SimResult<T> = Result<T, SimError>;

#[derive(Debug, Error)]
pub enum SimError {
    /// A tunable parameter was set outside its allowed range.
    #[error("{name} = {value} is outside [{min}, {max}]")]
    ParameterOutOfRange {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Masses must be positive and finite.
    #[error("body '{name}' has invalid mass {mass}")]
    InvalidMass { name: String, mass: f64 },

    /// Planets must sit a positive, finite distance from the reference body.
    #[error("body '{name}' has invalid distance {distance}")]
    InvalidDistance { name: String, distance: f64 },

    /// Relativity speed factors must be positive and finite.
    #[error("body '{name}' has invalid relativity speed factor {factor}")]
    InvalidSpeedFactor { name: String, factor: f64 },

    #[error("body '{0}' has a non-finite position")]
    InvalidPosition(String),

    #[error("duplicate body name '{0}'")]
    DuplicateBody(String),

    /// Circular velocity is undefined at zero separation.
    #[error("body '{0}' coincides with the reference body")]
    CoincidentBodies(String),

    #[error("system has no reference body")]
    MissingReference,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
