//! Fixed timestep simulation tick
//!
//! Strict ordering within a tick: wind and helm/sheet commands, then the boat
//! update, then every gate against the boat's before/after positions.

use super::autopilot;
use super::state::{SimEvent, SimState};

/// Control commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Helm to port (counter-clockwise)
    pub turn_left: bool,
    /// Helm to starboard (clockwise)
    pub turn_right: bool,
    /// Swing the boom toward port (positive deflection)
    pub boom_port: bool,
    /// Swing the boom toward starboard (negative deflection)
    pub boom_starboard: bool,
    /// Back the wind one step (one-shot)
    pub wind_left: bool,
    /// Veer the wind one step (one-shot)
    pub wind_right: bool,
    /// Let the autopilot helm and trim toward the next gate
    pub autopilot: bool,
}

/// Advance the simulation by one fixed timestep
pub fn tick(state: &mut SimState, input: &TickInput) {
    state.events.clear();
    state.time_ticks += 1;

    let controls = state.config.controls;

    if input.wind_left {
        state.wind.rotate(-controls.wind_step);
    }
    if input.wind_right {
        state.wind.rotate(controls.wind_step);
    }

    let mut input = input.clone();
    if input.autopilot {
        let pilot = autopilot::steer(state);
        input.turn_left = pilot.turn_left;
        input.turn_right = pilot.turn_right;
        input.boom_port = pilot.boom_port;
        input.boom_starboard = pilot.boom_starboard;
    }
    let input = &input;

    if input.turn_left {
        state.vessel.rotate(-controls.turn_speed);
    }
    if input.turn_right {
        state.vessel.rotate(controls.turn_speed);
    }
    if input.boom_port {
        state.vessel.adjust_boom(controls.boom_adjust_speed);
    }
    if input.boom_starboard {
        state.vessel.adjust_boom(-controls.boom_adjust_speed);
    }

    let report = state.vessel.update(&state.wind);
    if let Some(side) = report.boom_switched {
        state.events.push(SimEvent::BoomSwitched(side));
    }

    let prev = state.vessel.previous_position;
    let curr = state.vessel.position;
    // On a wrap tick the boat sails prev -> exit point past the edge, then
    // reappears at curr on the opposite edge. Only the sailed leg can cross a
    // gate line; the re-entry point is still checked for buoy contact.
    if report.wrapped() {
        state.events.push(SimEvent::Wrapped);
    }

    for (index, gate) in state.gates.iter_mut().enumerate() {
        let resolved = match report.wrapped_from {
            Some(exit) => gate
                .evaluate(prev, exit)
                .or_else(|| gate.evaluate(curr, curr)),
            None => gate.evaluate(prev, curr),
        };
        if let Some(outcome) = resolved {
            let points = gate.points_for(outcome);
            state.score += i64::from(points);
            state.events.push(SimEvent::GateResolved {
                gate: index,
                outcome,
                points,
            });
            log::info!("Score updated: {} (change: {:+})", state.score, points);
        }
    }
}
