//! Directional buoy gates
//!
//! A gate is a pair of buoys with a required direction of travel. Each tick
//! the boat's displacement (previous -> current position) is tested against
//! the gate line. A gate resolves exactly once: the first buoy strike or
//! gated crossing decides its outcome, after which it never scores again.

use std::fmt;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::bearing_to_vec;
use crate::settings::GateParams;

/// Which buoy of a gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Buoy {
    Port,
    Starboard,
}

/// How a gate was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GateOutcome {
    /// Crossed between the buoys in the required direction
    ValidPassage,
    /// Touched a buoy
    HitBuoy(Buoy),
    /// Crossed the gate line in the required direction, but wide of the buoys
    PassedOutside,
    /// Crossed between the buoys against the required direction
    WrongDirection,
}

/// One-shot scoring latch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GateStatus {
    #[default]
    Pending,
    Resolved(GateOutcome),
}

/// Rejected gate geometry
#[derive(Debug, Clone, PartialEq)]
pub enum GateError {
    /// Width must be positive and finite
    InvalidWidth(f64),
    /// Center and orientation must be finite
    NonFinite,
}

impl fmt::Display for GateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidWidth(w) => write!(f, "gate width must be positive, got {w}"),
            Self::NonFinite => write!(f, "gate center and orientation must be finite"),
        }
    }
}

impl core::error::Error for GateError {}

/// A scored passage between two buoys
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gate {
    pub center: DVec2,
    /// Distance between buoy centers
    pub width: f64,
    /// Bearing of the valid passage direction (0 = North)
    pub orientation_deg: f64,
    /// Unit vector along the valid passage direction
    pub passage_dir: DVec2,
    /// Unit vector along the gate line, port buoy -> starboard buoy
    pub line_dir: DVec2,
    pub port_buoy: DVec2,
    pub starboard_buoy: DVec2,
    pub params: GateParams,
    pub status: GateStatus,
}

impl Gate {
    /// Gate with default buoy size and score table
    pub fn new(center: DVec2, width: f64, orientation_deg: f64) -> Result<Self, GateError> {
        Self::with_params(center, width, orientation_deg, GateParams::default())
    }

    pub fn with_params(
        center: DVec2,
        width: f64,
        orientation_deg: f64,
        params: GateParams,
    ) -> Result<Self, GateError> {
        if !center.is_finite() || !orientation_deg.is_finite() {
            return Err(GateError::NonFinite);
        }
        if !(width.is_finite() && width > 0.0) {
            return Err(GateError::InvalidWidth(width));
        }

        let passage_dir = bearing_to_vec(orientation_deg);
        let line_dir = DVec2::new(passage_dir.y, -passage_dir.x);
        let half_width = width / 2.0;

        Ok(Self {
            center,
            width,
            orientation_deg,
            passage_dir,
            line_dir,
            port_buoy: center - line_dir * half_width,
            starboard_buoy: center + line_dir * half_width,
            params,
            status: GateStatus::Pending,
        })
    }

    /// Whether the gate has already produced its one score event
    pub fn is_scored(&self) -> bool {
        matches!(self.status, GateStatus::Resolved(_))
    }

    /// Whether the gate was passed correctly
    pub fn passed_successfully(&self) -> bool {
        self.status == GateStatus::Resolved(GateOutcome::ValidPassage)
    }

    pub fn outcome(&self) -> Option<GateOutcome> {
        match self.status {
            GateStatus::Pending => None,
            GateStatus::Resolved(outcome) => Some(outcome),
        }
    }

    /// Points for an outcome under this gate's score table
    pub fn points_for(&self, outcome: GateOutcome) -> i32 {
        let table = &self.params.points;
        match outcome {
            GateOutcome::ValidPassage => table.valid_passage,
            GateOutcome::HitBuoy(_) => table.hit_buoy,
            GateOutcome::PassedOutside => table.passed_outside,
            GateOutcome::WrongDirection => table.wrong_direction,
        }
    }

    /// Classify a displacement without touching the latch
    ///
    /// Buoy contact is checked first and wins over any crossing.
    pub fn classify(&self, prev: DVec2, curr: DVec2) -> Option<GateOutcome> {
        let contact = self.params.buoy_radius + self.params.vessel_half_width;
        if curr.distance(self.port_buoy) < contact {
            return Some(GateOutcome::HitBuoy(Buoy::Port));
        }
        if curr.distance(self.starboard_buoy) < contact {
            return Some(GateOutcome::HitBuoy(Buoy::Starboard));
        }

        // Signed distance along the passage axis; negative = behind the line
        let d_prev = (prev - self.port_buoy).dot(self.passage_dir);
        let d_curr = (curr - self.port_buoy).dot(self.passage_dir);
        let between_buoys = (curr - self.center).dot(self.line_dir).abs() < self.width / 2.0;

        if d_prev < 0.0 && d_curr >= 0.0 {
            if between_buoys {
                Some(GateOutcome::ValidPassage)
            } else {
                Some(GateOutcome::PassedOutside)
            }
        } else if d_prev >= 0.0 && d_curr < 0.0 && between_buoys {
            Some(GateOutcome::WrongDirection)
        } else {
            None
        }
    }

    /// Evaluate one tick of boat motion, latching the first outcome
    ///
    /// Returns `None` while the gate is still pending, and forever after it
    /// has resolved.
    pub fn evaluate(&mut self, prev: DVec2, curr: DVec2) -> Option<GateOutcome> {
        if self.is_scored() {
            return None;
        }

        let outcome = self.classify(prev, curr)?;
        self.status = GateStatus::Resolved(outcome);
        log::info!(
            "Gate ({:.0}, {:.0}): {:?} ({:+})",
            self.center.x,
            self.center.y,
            outcome,
            self.points_for(outcome)
        );
        Some(outcome)
    }

    /// Evaluate one tick of boat motion and return the score change (0 = no event)
    pub fn check_passage(&mut self, prev: DVec2, curr: DVec2) -> i32 {
        self.evaluate(prev, curr)
            .map(|outcome| self.points_for(outcome))
            .unwrap_or(0)
    }
}
