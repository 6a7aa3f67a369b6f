//! Simulation tuning
//!
//! Every physics and scoring constant can be overridden from a JSON file.
//! Missing fields fall back to the values in [`crate::consts`].

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::gate::GateError;

/// Playfield bounds (toroidal, wraps on both axes)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Playfield {
    pub width: f64,
    pub height: f64,
}

impl Default for Playfield {
    fn default() -> Self {
        Self {
            width: PLAYFIELD_WIDTH,
            height: PLAYFIELD_HEIGHT,
        }
    }
}

impl Playfield {
    /// Center of the playfield
    pub fn center(&self) -> glam::DVec2 {
        glam::DVec2::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !(valid(self.width) && valid(self.height)) {
            return Err(ConfigError::invalid("playfield dimensions must be positive and finite"));
        }
        Ok(())
    }
}

/// Boat physics parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VesselParams {
    pub acceleration: f64,
    pub max_speed: f64,
    pub drag_factor: f64,
    pub hull_sail_factor: f64,
    pub max_boom_deflection: f64,
    pub default_boom_out_angle: f64,
}

impl VesselParams {
    /// Limits must be usable as clamp bounds
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.max_speed.is_finite() && self.max_speed > 0.0) {
            return Err(ConfigError::invalid("vessel.max_speed must be positive and finite"));
        }
        if !(self.max_boom_deflection.is_finite() && self.max_boom_deflection >= 0.0) {
            return Err(ConfigError::invalid(
                "vessel.max_boom_deflection must be finite and not negative",
            ));
        }
        if !(0.0..1.0).contains(&self.drag_factor) {
            return Err(ConfigError::invalid("vessel.drag_factor must be in [0, 1)"));
        }
        let finite = [self.acceleration, self.hull_sail_factor, self.default_boom_out_angle];
        if !finite.iter().all(|v| v.is_finite()) {
            return Err(ConfigError::invalid("vessel parameters must be finite"));
        }
        Ok(())
    }
}

impl Default for VesselParams {
    fn default() -> Self {
        Self {
            acceleration: BOAT_ACCELERATION,
            max_speed: BOAT_MAX_SPEED,
            drag_factor: WATER_RESISTANCE_FACTOR,
            hull_sail_factor: HULL_SAIL_EFFECT_FACTOR,
            max_boom_deflection: BOOM_MAX_DEFLECTION,
            default_boom_out_angle: DEFAULT_BOOM_OUT_ANGLE,
        }
    }
}

/// Points awarded per gate outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScoreTable {
    pub valid_passage: i32,
    pub hit_buoy: i32,
    pub passed_outside: i32,
    pub wrong_direction: i32,
}

impl Default for ScoreTable {
    fn default() -> Self {
        Self {
            valid_passage: POINTS_VALID_PASSAGE,
            hit_buoy: POINTS_HIT_BUOY,
            passed_outside: POINTS_PASSED_OUTSIDE,
            wrong_direction: POINTS_WRONG_DIRECTION,
        }
    }
}

/// Gate geometry and scoring parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GateParams {
    pub buoy_radius: f64,
    /// Half the hull width; the boat's collision radius against buoys
    pub vessel_half_width: f64,
    pub points: ScoreTable,
}

impl Default for GateParams {
    fn default() -> Self {
        Self {
            buoy_radius: GATE_BUOY_RADIUS,
            vessel_half_width: BOAT_WIDTH / 2.0,
            points: ScoreTable::default(),
        }
    }
}

/// Per-command control deltas
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ControlParams {
    /// Heading change per tick of helm (degrees)
    pub turn_speed: f64,
    /// Boom deflection change per tick of sheet (degrees)
    pub boom_adjust_speed: f64,
    /// Wind shift per rotate command (degrees)
    pub wind_step: f64,
}

impl Default for ControlParams {
    fn default() -> Self {
        Self {
            turn_speed: BOAT_TURN_SPEED,
            boom_adjust_speed: BOOM_ADJUST_SPEED,
            wind_step: WIND_STEP,
        }
    }
}

/// Initial wind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WindParams {
    pub direction_deg: f64,
    pub speed: f64,
}

impl Default for WindParams {
    fn default() -> Self {
        Self {
            direction_deg: WIND_DIRECTION,
            speed: WIND_SPEED,
        }
    }
}

/// Complete simulation configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimConfig {
    pub playfield: Playfield,
    pub vessel: VesselParams,
    pub gates: GateParams,
    pub controls: ControlParams,
    pub wind: WindParams,
}

/// Configuration loading/validation failure
#[derive(Debug)]
pub enum ConfigError {
    /// Config file could not be read
    Io(std::io::Error),
    /// Config file is not valid JSON for [`SimConfig`]
    Parse(serde_json::Error),
    /// A value is out of its allowed range
    Invalid(String),
    /// A course gate has unusable geometry
    Gate(GateError),
}

impl ConfigError {
    fn invalid(msg: &str) -> Self {
        Self::Invalid(msg.to_string())
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read config: {e}"),
            Self::Parse(e) => write!(f, "failed to parse config: {e}"),
            Self::Invalid(msg) => write!(f, "invalid config: {msg}"),
            Self::Gate(e) => write!(f, "invalid gate: {e}"),
        }
    }
}

impl core::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::Gate(e) => Some(e),
            Self::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<GateError> for ConfigError {
    fn from(e: GateError) -> Self {
        Self::Gate(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

impl SimConfig {
    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load a config file, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("{e}; using default config");
                Self::default()
            }
        }
    }

    /// Check that every value is in a range the simulation can run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.playfield.validate()?;
        self.vessel.validate()?;
        if !(self.gates.buoy_radius.is_finite() && self.gates.buoy_radius > 0.0) {
            return Err(ConfigError::invalid("gates.buoy_radius must be positive"));
        }
        if !(self.gates.vessel_half_width.is_finite() && self.gates.vessel_half_width >= 0.0) {
            return Err(ConfigError::invalid("gates.vessel_half_width must not be negative"));
        }
        if !(self.wind.speed.is_finite() && self.wind.speed >= 0.0) {
            return Err(ConfigError::invalid("wind.speed must not be negative"));
        }
        if !self.wind.direction_deg.is_finite() {
            return Err(ConfigError::invalid("wind.direction_deg must be finite"));
        }
        Ok(())
    }
}
