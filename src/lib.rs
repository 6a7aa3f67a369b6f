//! Sail Gates - a sailing gate-course simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (wind, boat dynamics, gate scoring)
//! - `settings`: Data-driven tuning loaded from JSON

pub mod settings;
pub mod sim;

pub use settings::{ConfigError, SimConfig};

use glam::DVec2;

/// Simulation constants
pub mod consts {
    /// Fixed simulation timestep (30 Hz, one tick per frame)
    pub const SIM_DT: f64 = 1.0 / 30.0;

    /// Playfield dimensions (screen space, Y grows downward)
    pub const PLAYFIELD_WIDTH: f64 = 800.0;
    pub const PLAYFIELD_HEIGHT: f64 = 600.0;

    /// Hull width; half of it is the boat's collision radius against buoys
    pub const BOAT_WIDTH: f64 = 20.0;

    /// Degrees of heading change per tick of helm input
    pub const BOAT_TURN_SPEED: f64 = 2.0;
    /// Thrust coefficient to speed conversion
    pub const BOAT_ACCELERATION: f64 = 0.02;
    /// Max speed in either direction
    pub const BOAT_MAX_SPEED: f64 = 5.0;
    /// Fraction of speed lost to water each tick
    pub const WATER_RESISTANCE_FACTOR: f64 = 0.01;
    /// How much the hull acts like a sail (0.05 = 5% of the sail's effect)
    pub const HULL_SAIL_EFFECT_FACTOR: f64 = 0.05;

    /// Max boom deflection from the aft centerline (degrees)
    pub const BOOM_MAX_DEFLECTION: f64 = 88.0;
    /// Boom deflection change per tick of sheet input (degrees)
    pub const BOOM_ADJUST_SPEED: f64 = 1.0;
    /// Deflection a centered boom swings out to when the wind picks a side
    pub const DEFAULT_BOOM_OUT_ANGLE: f64 = 15.0;

    /// Wind defaults
    pub const WIND_SPEED: f64 = 1.0;
    pub const WIND_DIRECTION: f64 = 0.0;
    /// Degrees the wind shifts per rotate command
    pub const WIND_STEP: f64 = 15.0;

    /// Gate defaults
    pub const GATE_BUOY_RADIUS: f64 = 7.0;
    pub const GATE_DEFAULT_WIDTH: f64 = 100.0;

    /// Scoring
    pub const POINTS_VALID_PASSAGE: i32 = 10;
    pub const POINTS_HIT_BUOY: i32 = -5;
    /// Correct direction, but outside the buoys
    pub const POINTS_PASSED_OUTSIDE: i32 = -2;
    /// Between the buoys, but the wrong way
    pub const POINTS_WRONG_DIRECTION: i32 = -3;
}

/// Normalize a bearing to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f64) -> f64 {
    let a = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if a >= 360.0 { 0.0 } else { a }
}

/// Normalize an angle difference to [-180, 180)
#[inline]
pub fn signed_degrees(angle: f64) -> f64 {
    normalize_degrees(angle + 180.0) - 180.0
}

/// Unit vector for a compass bearing (0 = North/up, 90 = East/right)
///
/// Screen space: forward at bearing 0 is -Y.
#[inline]
pub fn bearing_to_vec(bearing_deg: f64) -> DVec2 {
    let rad = bearing_deg.to_radians();
    DVec2::new(rad.sin(), -rad.cos())
}

/// Compass bearing of a screen-space direction vector
#[inline]
pub fn vec_to_bearing(dir: DVec2) -> f64 {
    normalize_degrees(dir.x.atan2(-dir.y).to_degrees())
}
