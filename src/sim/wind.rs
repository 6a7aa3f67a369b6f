//! Wind state
//!
//! Owned by the simulation driver and passed into each vessel update.

use serde::{Deserialize, Serialize};

use crate::normalize_degrees;
use crate::settings::WindParams;

/// Current wind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindState {
    /// Bearing the wind blows FROM (0 = from North), in [0, 360)
    pub direction_deg: f64,
    /// Magnitude (arbitrary units, non-negative by convention)
    pub speed: f64,
}

impl Default for WindState {
    fn default() -> Self {
        Self::from(WindParams::default())
    }
}

impl From<WindParams> for WindState {
    fn from(params: WindParams) -> Self {
        Self::new(params.direction_deg, params.speed)
    }
}

impl WindState {
    pub fn new(direction_deg: f64, speed: f64) -> Self {
        Self {
            direction_deg: normalize_degrees(direction_deg),
            speed,
        }
    }

    /// Shift the wind direction (positive = clockwise veer)
    pub fn rotate(&mut self, delta_deg: f64) {
        self.direction_deg = normalize_degrees(self.direction_deg + delta_deg);
    }

    pub fn set_direction(&mut self, direction_deg: f64) {
        self.direction_deg = normalize_degrees(direction_deg);
    }

    pub fn set_speed(&mut self, speed: f64) {
        self.speed = speed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotate_wraps() {
        let mut wind = WindState::new(0.0, 1.0);
        wind.rotate(-15.0);
        assert_eq!(wind.direction_deg, 345.0);
        wind.rotate(30.0);
        assert_eq!(wind.direction_deg, 15.0);
    }

    #[test]
    fn test_new_normalizes() {
        let wind = WindState::new(-90.0, 2.0);
        assert_eq!(wind.direction_deg, 270.0);
        assert_eq!(wind.speed, 2.0);
    }
}
