//! Tunable simulation parameters.
//!
//! One `SimulationState` exists per running simulation. It is passed by
//! reference into the force model, integrator and orbit solver; the UI layer
//! writes it between frames and the integrator only reads it.

use crate::error::{SimError, SimResult};
use log::debug;
use std::ops::RangeInclusive;

#[derive(Clone, Debug, PartialEq)]
pub struct SimulationState {
    gravitational_constant: f64,
    time_scale: f64,
    relativity_enabled: bool,
    pairwise_interactions_enabled: bool,
    pub(crate) reference_locked: bool,
    trails_enabled: bool,
}

impl Default for SimulationState {
    fn default() -> Self {
        Self {
            gravitational_constant: Self::DEFAULT_G,
            time_scale: Self::DEFAULT_TIME_SCALE,
            relativity_enabled: false,
            pairwise_interactions_enabled: false,
            reference_locked: true,
            trails_enabled: true,
        }
    }
}

impl SimulationState {
    pub const DEFAULT_G: f64 = 0.4;
    pub const DEFAULT_TIME_SCALE: f64 = 0.5;
    pub const G_RANGE: RangeInclusive<f64> = 0.1..=2.0;
    pub const TIME_SCALE_RANGE: RangeInclusive<f64> = 0.0..=1.0;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn gravitational_constant(&self) -> f64 {
        self.gravitational_constant
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    pub fn relativity_enabled(&self) -> bool {
        self.relativity_enabled
    }

    pub fn pairwise_interactions_enabled(&self) -> bool {
        self.pairwise_interactions_enabled
    }

    pub fn reference_locked(&self) -> bool {
        self.reference_locked
    }

    pub fn trails_enabled(&self) -> bool {
        self.trails_enabled
    }

    /// Sets G. Existing orbits are not re-derived; call `reset_orbits` for that.
    pub fn set_gravitational_constant(&mut self, g: f64) -> SimResult<()> {
        check_range("gravitational_constant", g, &Self::G_RANGE)?;
        debug!("G: {} -> {}", self.gravitational_constant, g);
        self.gravitational_constant = g;
        Ok(())
    }

    pub fn set_time_scale(&mut self, time_scale: f64) -> SimResult<()> {
        check_range("time_scale", time_scale, &Self::TIME_SCALE_RANGE)?;
        debug!("time scale: {} -> {}", self.time_scale, time_scale);
        self.time_scale = time_scale;
        Ok(())
    }

    pub fn toggle_relativity(&mut self) -> bool {
        self.relativity_enabled = !self.relativity_enabled;
        debug!("relativity: {}", self.relativity_enabled);
        self.relativity_enabled
    }

    pub fn toggle_pairwise_interactions(&mut self) -> bool {
        self.pairwise_interactions_enabled = !self.pairwise_interactions_enabled;
        debug!("pairwise interactions: {}", self.pairwise_interactions_enabled);
        self.pairwise_interactions_enabled
    }

    pub fn toggle_trails(&mut self) -> bool {
        self.trails_enabled = !self.trails_enabled;
        self.trails_enabled
    }

    pub fn set_relativity(&mut self, enabled: bool) {
        self.relativity_enabled = enabled;
    }

    pub fn set_pairwise_interactions(&mut self, enabled: bool) {
        self.pairwise_interactions_enabled = enabled;
    }

    pub fn set_trails(&mut self, enabled: bool) {
        self.trails_enabled = enabled;
    }
}

fn check_range(name: &'static str, value: f64, range: &RangeInclusive<f64>) -> SimResult<()> {
    // NaN fails `contains`
    if range.contains(&value) {
        Ok(())
    } else {
        Err(SimError::ParameterOutOfRange {
            name,
            value,
            min: *range.start(),
            max: *range.end(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let s = SimulationState::default();
        assert_eq!(s.gravitational_constant(), 0.4);
        assert_eq!(s.time_scale(), 0.5);
        assert!(!s.relativity_enabled());
        assert!(!s.pairwise_interactions_enabled());
        assert!(s.reference_locked());
        assert!(s.trails_enabled());
    }

    #[test]
    fn setters_reject_out_of_range() {
        let mut s = SimulationState::default();
        assert!(s.set_gravitational_constant(0.05).is_err());
        assert!(s.set_gravitational_constant(f64::NAN).is_err());
        assert!(s.set_time_scale(-0.1).is_err());
        assert!(s.set_time_scale(1.5).is_err());
        assert_eq!(s, SimulationState::default());

        s.set_gravitational_constant(2.0).unwrap();
        s.set_time_scale(0.0).unwrap();
        assert_eq!(s.gravitational_constant(), 2.0);
        assert_eq!(s.time_scale(), 0.0);
    }

    #[test]
    fn toggles_flip() {
        let mut s = SimulationState::default();
        assert!(s.toggle_relativity());
        assert!(!s.toggle_relativity());
        assert!(s.toggle_pairwise_interactions());
        assert!(!s.toggle_trails());
    }
}
