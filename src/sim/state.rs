//! Simulation state
//!
//! The driver owns the boat, the wind and the gates; the core components
//! only ever see what is passed into a call.

use serde::{Deserialize, Serialize};

use super::boom::BoomSide;
use super::course;
use super::gate::{Gate, GateOutcome};
use super::vessel::Vessel;
use super::wind::WindState;
use crate::settings::{ConfigError, SimConfig};

/// Something notable that happened during the last tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    /// A gate produced its score event
    GateResolved {
        gate: usize,
        outcome: GateOutcome,
        points: i32,
    },
    /// The boom tacked/gybed to this side
    BoomSwitched(BoomSide),
    /// The boat crossed a playfield edge and re-entered opposite
    Wrapped,
}

/// Complete simulation state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimState {
    pub config: SimConfig,
    pub vessel: Vessel,
    pub wind: WindState,
    /// Course gates, in the order they are meant to be sailed
    pub gates: Vec<Gate>,
    pub score: i64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events from the most recent tick
    #[serde(skip)]
    pub events: Vec<SimEvent>,
}

impl SimState {
    /// Boat at rest in the middle of the playfield, heading north
    ///
    /// The config is validated first; a config built in code gets the same
    /// checks as one loaded from JSON.
    pub fn new(config: SimConfig, gates: Vec<Gate>) -> Result<Self, ConfigError> {
        config.validate()?;
        let vessel = Vessel::with_params(
            config.playfield.center(),
            0.0,
            config.vessel,
            config.playfield,
        )?;
        Ok(Self {
            wind: WindState::from(config.wind),
            config,
            vessel,
            gates,
            score: 0,
            time_ticks: 0,
            events: Vec::new(),
        })
    }

    /// State with the standard four-gate course
    pub fn with_default_course(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let gates = course::default_course(&config)?;
        Self::new(config, gates)
    }

    /// First gate that has not been resolved yet
    pub fn next_pending_gate(&self) -> Option<(usize, &Gate)> {
        self.gates.iter().enumerate().find(|(_, g)| !g.is_scored())
    }

    /// Every gate has been resolved
    pub fn is_course_complete(&self) -> bool {
        self.gates.iter().all(Gate::is_scored)
    }

    /// Gates passed correctly so far
    pub fn gates_passed(&self) -> usize {
        self.gates.iter().filter(|g| g.passed_successfully()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;

    #[test]
    fn test_new_state() {
        let state = SimState::with_default_course(SimConfig::default()).unwrap();
        assert_eq!(state.vessel.position, DVec2::new(400.0, 300.0));
        assert_eq!(state.vessel.heading_deg, 0.0);
        assert_eq!(state.gates.len(), 4);
        assert_eq!(state.score, 0);
        assert!(!state.is_course_complete());
        assert_eq!(state.next_pending_gate().map(|(i, _)| i), Some(0));
    }

    #[test]
    fn test_pending_gate_skips_resolved() {
        let mut state = SimState::with_default_course(SimConfig::default()).unwrap();
        state.gates[0].check_passage(DVec2::new(400.0, 150.0), DVec2::new(400.0, 50.0));
        assert_eq!(state.next_pending_gate().map(|(i, _)| i), Some(1));
        assert_eq!(state.gates_passed(), 1);
    }

    #[test]
    fn test_empty_course_is_complete() {
        let state = SimState::new(SimConfig::default(), Vec::new()).unwrap();
        assert!(state.is_course_complete());
        assert!(state.next_pending_gate().is_none());
    }

    #[test]
    fn test_rejects_invalid_config_built_in_code() {
        let mut config = SimConfig::default();
        config.vessel.max_speed = -1.0;
        assert!(matches!(
            SimState::with_default_course(config.clone()),
            Err(ConfigError::Invalid(_))
        ));
        assert!(SimState::new(config, Vec::new()).is_err());

        let mut config = SimConfig::default();
        config.vessel.max_boom_deflection = f64::NAN;
        assert!(SimState::with_default_course(config).is_err());
    }
}
