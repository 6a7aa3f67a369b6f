//! Automatic boom side switching (tack/gybe)
//!
//! The boom deflection is a signed offset from the aft centerline:
//! positive = boom out to port, negative = out to starboard. The player only
//! controls its magnitude; which side it lies on follows the wind instantly.

use serde::{Deserialize, Serialize};

use crate::normalize_degrees;

/// Which side of the boat the boom lies on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoomSide {
    Centered,
    Port,
    Starboard,
}

impl BoomSide {
    /// Classify a signed deflection
    pub fn of(deflection_deg: f64) -> Self {
        if deflection_deg > 0.0 {
            BoomSide::Port
        } else if deflection_deg < 0.0 {
            BoomSide::Starboard
        } else {
            BoomSide::Centered
        }
    }
}

/// Wind bearing relative to the bow, in [0, 360)
#[inline]
pub fn relative_wind(wind_direction_deg: f64, heading_deg: f64) -> f64 {
    normalize_degrees(wind_direction_deg - heading_deg + 360.0)
}

/// Side the wind pushes the boom toward, if any
///
/// Wind over the starboard side (0 < rel < 180) sends the boom to port and
/// vice versa. Head-to-wind and dead downwind favor neither side.
pub fn favored_side(wind_direction_deg: f64, heading_deg: f64) -> Option<BoomSide> {
    let rel = relative_wind(wind_direction_deg, heading_deg);
    if rel > 0.0 && rel < 180.0 {
        Some(BoomSide::Port)
    } else if rel > 180.0 && rel < 360.0 {
        Some(BoomSide::Starboard)
    } else {
        None
    }
}

/// Deflection after applying the automatic tack/gybe rule
///
/// A boom already on the favored side is left alone. A boom on the other side
/// flips sign keeping its magnitude. A centered boom swings out to
/// `default_out` (capped at `max_deflection`).
pub fn switch_side(
    deflection_deg: f64,
    wind_direction_deg: f64,
    heading_deg: f64,
    default_out: f64,
    max_deflection: f64,
) -> f64 {
    let magnitude = deflection_deg.abs();
    let out = if max_deflection > 0.0 {
        default_out.min(max_deflection)
    } else {
        0.0
    };
    let deploy = if magnitude == 0.0 { out } else { magnitude };

    match favored_side(wind_direction_deg, heading_deg) {
        Some(BoomSide::Port) if deflection_deg <= 0.0 => deploy,
        Some(BoomSide::Starboard) if deflection_deg >= 0.0 => -deploy,
        _ => deflection_deg,
    }
}

/// Boom angle relative to the boat centerline (0 = forward, 180 = dead aft)
#[inline]
pub fn trim_from_deflection(deflection_deg: f64) -> f64 {
    normalize_degrees(180.0 + deflection_deg + 360.0)
}
