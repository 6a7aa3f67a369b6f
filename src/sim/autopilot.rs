//! Demo autopilot
//!
//! Steers toward the next pending gate and trims the boom to roughly half the
//! wind angle off the bow. It turns at the normal helm rate and never beats
//! upwind, so some gates may stay out of reach.

use glam::DVec2;

use super::gate::Gate;
use super::state::SimState;
use super::tick::TickInput;
use crate::{signed_degrees, vec_to_bearing};

/// Distance behind a gate the boat lines up at before driving through
pub const APPROACH_DISTANCE: f64 = 120.0;

/// Helm and sheet commands for this tick
pub fn steer(state: &SimState) -> TickInput {
    let mut input = TickInput::default();
    let Some((_, gate)) = state.next_pending_gate() else {
        return input;
    };

    let vessel = &state.vessel;
    let controls = &state.config.controls;

    let target = waypoint(gate, vessel.position);
    let to_target = target - vessel.position;
    if to_target.length_squared() > f64::EPSILON {
        let error = signed_degrees(vec_to_bearing(to_target) - vessel.heading_deg);
        let dead_band = controls.turn_speed / 2.0;
        input.turn_right = error > dead_band;
        input.turn_left = error < -dead_band;
    }

    // Ease out on a run, sheet in close-hauled
    let off_wind = signed_degrees(state.wind.direction_deg - vessel.heading_deg).abs();
    let wanted = (off_wind / 2.0).min(vessel.params.max_boom_deflection);
    let current = vessel.boom_deflection_deg;
    let step = controls.boom_adjust_speed;

    if current.abs() + step <= wanted {
        // Ease out, away from the centerline on whichever side the boom lies
        if current >= 0.0 {
            input.boom_port = true;
        } else {
            input.boom_starboard = true;
        }
    } else if current.abs() - step >= wanted {
        if current > 0.0 {
            input.boom_starboard = true;
        } else {
            input.boom_port = true;
        }
    }

    input
}

/// Point to head for given where the boat is relative to the gate
///
/// Lined up behind the gate: aim through it. Behind but off to the side: go to
/// the approach point. Level with or past the gate line: swing wide of the
/// buoys first so the way back never threads the gate backwards.
pub fn waypoint(gate: &Gate, position: DVec2) -> DVec2 {
    let offset = position - gate.center;
    let along = offset.dot(gate.passage_dir);
    let lateral = offset.dot(gate.line_dir);
    let half_width = gate.width / 2.0;
    let behind = along < -APPROACH_DISTANCE / 2.0;

    if behind && lateral.abs() < half_width / 2.0 {
        gate.center + gate.passage_dir * APPROACH_DISTANCE
    } else if behind || lateral.abs() >= half_width + APPROACH_DISTANCE / 2.0 {
        gate.center - gate.passage_dir * APPROACH_DISTANCE
    } else {
        let side = if lateral < 0.0 { -1.0 } else { 1.0 };
        gate.center + gate.line_dir * side * (half_width + APPROACH_DISTANCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SimConfig;

    fn north_gate() -> Gate {
        Gate::new(DVec2::new(400.0, 100.0), 100.0, 0.0).unwrap()
    }

    #[test]
    fn test_waypoint_through_when_lined_up() {
        let gate = north_gate();
        let wp = waypoint(&gate, DVec2::new(405.0, 300.0));
        assert!((wp - DVec2::new(400.0, -20.0)).length() < 1e-9);
    }

    #[test]
    fn test_waypoint_approach_when_off_to_side() {
        let gate = north_gate();
        let wp = waypoint(&gate, DVec2::new(100.0, 400.0));
        assert!((wp - DVec2::new(400.0, 220.0)).length() < 1e-9);
    }

    #[test]
    fn test_waypoint_swings_wide_past_gate() {
        let gate = north_gate();
        // Just past the gate, slightly toward the west side (starboard buoy)
        let wp = waypoint(&gate, DVec2::new(380.0, 60.0));
        assert!((wp - DVec2::new(230.0, 100.0)).length() < 1e-9);
    }

    #[test]
    fn test_steer_turns_toward_target() {
        let mut state = SimState::with_default_course(SimConfig::default()).unwrap();
        // First gate is due north and the boat heads east: turn left
        state.vessel.heading_deg = 90.0;
        state.vessel.position = DVec2::new(400.0, 400.0);
        let input = steer(&state);
        assert!(input.turn_left);
        assert!(!input.turn_right);
    }

    #[test]
    fn test_steer_eases_boom_out() {
        let mut config = SimConfig::default();
        config.wind.direction_deg = 90.0;
        let mut state = SimState::with_default_course(config).unwrap();
        state.vessel.boom_deflection_deg = 10.0;
        // Wind on the beam wants ~45 degrees of boom
        let input = steer(&state);
        assert!(input.boom_port);
        assert!(!input.boom_starboard);
    }

    #[test]
    fn test_steer_idle_when_course_complete() {
        let state = SimState::new(SimConfig::default(), Vec::new()).unwrap();
        assert_eq!(steer(&state), TickInput::default());
    }
}
