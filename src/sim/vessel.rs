//! Sailboat state and per-tick dynamics
//!
//! Pure data and math. Hull/boom/sail visuals are built elsewhere from the
//! published fields (see [`Telemetry`]).

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::boom::{self, BoomSide};
use super::wind::WindState;
use crate::normalize_degrees;
use crate::settings::{ConfigError, Playfield, VesselParams};
use crate::signed_degrees;

/// The player's boat
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vessel {
    /// Current position (screen space, Y down)
    pub position: DVec2,
    /// Position at the start of the last update (for gate crossing tests)
    pub previous_position: DVec2,
    /// Compass heading (0 = North, clockwise), in [0, 360)
    pub heading_deg: f64,
    /// Signed speed along the heading
    pub speed: f64,
    /// Boom offset from dead aft (positive = port, negative = starboard)
    pub boom_deflection_deg: f64,
    /// Boom angle relative to the centerline (180 = dead aft)
    pub boom_trim_deg: f64,
    /// Signed angle between the wind and the boom plane (display only)
    pub angle_of_attack_deg: f64,
    #[serde(default)]
    pub params: VesselParams,
    #[serde(default)]
    pub playfield: Playfield,
}

/// What happened to the boat during one update
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepReport {
    /// Boom changed side (the new side) this tick
    pub boom_switched: Option<BoomSide>,
    /// Where the boat left the playfield, if it wrapped this tick
    ///
    /// This is the unwrapped end of the tick's motion, just past the edge;
    /// `previous_position` to here is the real path sailed before re-entry.
    pub wrapped_from: Option<DVec2>,
}

impl StepReport {
    pub fn wrapped(&self) -> bool {
        self.wrapped_from.is_some()
    }
}

/// Snapshot of the fields the HUD/renderer reads
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Telemetry {
    pub position: (f64, f64),
    pub heading_deg: f64,
    pub speed: f64,
    pub boom_trim_deg: f64,
    pub boom_deflection_deg: f64,
    pub angle_of_attack_deg: f64,
}

impl Vessel {
    /// Boat at rest with a centered boom
    pub fn new(position: DVec2, heading_deg: f64) -> Self {
        Self::build(position, heading_deg, VesselParams::default(), Playfield::default())
    }

    /// Boat with custom physics, rejecting limits the update cannot clamp to
    pub fn with_params(
        position: DVec2,
        heading_deg: f64,
        params: VesselParams,
        playfield: Playfield,
    ) -> Result<Self, ConfigError> {
        params.validate()?;
        playfield.validate()?;
        Ok(Self::build(position, heading_deg, params, playfield))
    }

    fn build(position: DVec2, heading_deg: f64, params: VesselParams, playfield: Playfield) -> Self {
        Self {
            position,
            previous_position: position,
            heading_deg: normalize_degrees(heading_deg),
            speed: 0.0,
            boom_deflection_deg: 0.0,
            boom_trim_deg: boom::trim_from_deflection(0.0),
            angle_of_attack_deg: 0.0,
            params,
            playfield,
        }
    }

    /// Turn the bow (positive = clockwise/starboard)
    pub fn rotate(&mut self, delta_deg: f64) {
        self.heading_deg = normalize_degrees(self.heading_deg + delta_deg);
    }

    /// Add a signed delta to the boom deflection and re-clamp
    pub fn adjust_boom(&mut self, delta_deg: f64) {
        let max = self.params.max_boom_deflection;
        self.boom_deflection_deg = (self.boom_deflection_deg + delta_deg).clamp(-max, max);
    }

    /// Which side the boom currently lies on
    pub fn boom_side(&self) -> BoomSide {
        BoomSide::of(self.boom_deflection_deg)
    }

    /// Run the automatic tack/gybe rule and refresh the trim angle
    ///
    /// Returns the new side if the boom moved to a different side.
    pub fn update_boom(&mut self, wind: &WindState) -> Option<BoomSide> {
        let before = self.boom_side();
        self.boom_deflection_deg = boom::switch_side(
            self.boom_deflection_deg,
            wind.direction_deg,
            self.heading_deg,
            self.params.default_boom_out_angle,
            self.params.max_boom_deflection,
        );
        self.boom_trim_deg = boom::trim_from_deflection(self.boom_deflection_deg);

        let after = self.boom_side();
        (after != before).then_some(after)
    }

    /// Advance one tick under the given wind
    pub fn update(&mut self, wind: &WindState) -> StepReport {
        self.previous_position = self.position;

        let boom_switched = self.update_boom(wind);
        if let Some(side) = boom_switched {
            log::debug!(
                "Boom passed to {:?} (deflection {:.1})",
                side,
                self.boom_deflection_deg
            );
        }

        // Sail force, treating true wind as apparent wind
        let boom_angle_global = normalize_degrees(self.heading_deg + self.boom_trim_deg);
        let aoa = signed_degrees(wind.direction_deg - boom_angle_global);
        self.angle_of_attack_deg = aoa;

        let boom_force_coeff = aoa.to_radians().sin();
        // Sail force acts perpendicular to the boom; project onto the bow axis
        let thrust_factor = boom_force_coeff * self.boom_trim_deg.to_radians().sin();

        // Hull as a small sail: +1 dead downwind, -1 head to wind
        let hull_angle = normalize_degrees(wind.direction_deg - self.heading_deg + 180.0);
        let hull_thrust = hull_angle.to_radians().cos() * self.params.hull_sail_factor;

        let acceleration = (thrust_factor + hull_thrust) * wind.speed * self.params.acceleration;
        self.speed += acceleration;
        self.speed -= self.speed * self.params.drag_factor;
        self.speed = self
            .speed
            .clamp(-self.params.max_speed, self.params.max_speed);

        let heading = self.heading_deg.to_radians();
        self.position.x += self.speed * heading.sin();
        self.position.y -= self.speed * heading.cos();

        let wrapped_from = self.wrap_position();
        if wrapped_from.is_some() {
            log::debug!("Boat wrapped to ({:.1}, {:.1})", self.position.x, self.position.y);
        }

        StepReport {
            boom_switched,
            wrapped_from,
        }
    }

    /// Toroidal playfield: leaving one edge re-enters at the opposite one
    ///
    /// Returns the position before wrapping if a wrap happened.
    fn wrap_position(&mut self) -> Option<DVec2> {
        let Playfield { width, height } = self.playfield;
        let before = self.position;

        if self.position.x > width {
            self.position.x = 0.0;
        }
        if self.position.x < 0.0 {
            self.position.x = width;
        }
        if self.position.y > height {
            self.position.y = 0.0;
        }
        if self.position.y < 0.0 {
            self.position.y = height;
        }

        (self.position != before).then_some(before)
    }

    pub fn telemetry(&self) -> Telemetry {
        Telemetry {
            position: (self.position.x, self.position.y),
            heading_deg: self.heading_deg,
            speed: self.speed,
            boom_trim_deg: self.boom_trim_deg,
            boom_deflection_deg: self.boom_deflection_deg,
            angle_of_attack_deg: self.angle_of_attack_deg,
        }
    }
}
