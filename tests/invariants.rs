//! Property tests for the boat and gate invariants

use glam::DVec2;
use proptest::prelude::*;

use sail_gates::SimConfig;
use sail_gates::sim::boom::switch_side;
use sail_gates::sim::{Gate, GateOutcome, SimState, TickInput, Vessel, WindState, tick};

fn tick_input() -> impl Strategy<Value = TickInput> {
    (any::<[bool; 6]>(), any::<bool>()).prop_map(|(b, autopilot)| TickInput {
        turn_left: b[0],
        turn_right: b[1],
        boom_port: b[2],
        boom_starboard: b[3],
        wind_left: b[4],
        wind_right: b[5],
        autopilot,
    })
}

proptest! {
    #[test]
    fn boom_deflection_stays_bounded(deltas in prop::collection::vec(-200.0f64..200.0, 1..100)) {
        let mut boat = Vessel::new(DVec2::new(400.0, 300.0), 0.0);
        for delta in deltas {
            boat.adjust_boom(delta);
            prop_assert!((-88.0..=88.0).contains(&boat.boom_deflection_deg));
        }
    }

    #[test]
    fn state_invariants_hold_every_tick(
        inputs in prop::collection::vec(tick_input(), 1..300),
        wind_speed in 0.0f64..50.0,
        wind_dir in 0.0f64..360.0,
    ) {
        let mut config = SimConfig::default();
        config.wind.speed = wind_speed;
        config.wind.direction_deg = wind_dir;
        let mut state = SimState::with_default_course(config).unwrap();

        for input in &inputs {
            tick(&mut state, input);
            let v = &state.vessel;
            prop_assert!((-5.0..=5.0).contains(&v.speed));
            prop_assert!((0.0..360.0).contains(&v.heading_deg));
            prop_assert!((-88.0..=88.0).contains(&v.boom_deflection_deg));
            prop_assert!((0.0..360.0).contains(&v.boom_trim_deg));
            prop_assert!((-180.0..180.0).contains(&v.angle_of_attack_deg));
            prop_assert!((0.0..=800.0).contains(&v.position.x));
            prop_assert!((0.0..=600.0).contains(&v.position.y));
            prop_assert!((0.0..360.0).contains(&state.wind.direction_deg));
        }
    }

    #[test]
    fn boom_switch_is_idempotent(
        deflection in -88.0f64..88.0,
        wind in 0.0f64..360.0,
        heading in 0.0f64..360.0,
    ) {
        let once = switch_side(deflection, wind, heading, 15.0, 88.0);
        let twice = switch_side(once, wind, heading, 15.0, 88.0);
        prop_assert_eq!(once, twice);
        prop_assert!((-88.0..=88.0).contains(&once));
    }

    #[test]
    fn gate_scores_at_most_once(
        path in prop::collection::vec((0.0f64..800.0, 0.0f64..600.0), 2..60),
        orientation in 0.0f64..360.0,
    ) {
        let mut gate = Gate::new(DVec2::new(400.0, 300.0), 100.0, orientation).unwrap();
        let mut events = 0;
        for pair in path.windows(2) {
            let prev = DVec2::new(pair[0].0, pair[0].1);
            let curr = DVec2::new(pair[1].0, pair[1].1);
            if gate.check_passage(prev, curr) != 0 {
                events += 1;
            }
        }
        prop_assert!(events <= 1);
        prop_assert_eq!(events == 1, gate.is_scored());
    }

    #[test]
    fn buoy_contact_always_wins(
        prev in (0.0f64..800.0, 0.0f64..600.0),
        angle in 0.0f64..360.0,
        dist in 0.0f64..16.9,
    ) {
        let mut gate = Gate::new(DVec2::new(400.0, 300.0), 100.0, 0.0).unwrap();
        let rad = angle.to_radians();
        let curr = gate.port_buoy + DVec2::new(rad.cos(), rad.sin()) * dist;
        prop_assert_eq!(gate.check_passage(DVec2::new(prev.0, prev.1), curr), -5);
        prop_assert!(matches!(gate.outcome(), Some(GateOutcome::HitBuoy(_))));
    }
}

#[test]
fn tack_from_starboard_to_port() {
    let mut boat = Vessel::new(DVec2::new(400.0, 300.0), 0.0);
    boat.boom_deflection_deg = -10.0;
    boat.update(&WindState::new(90.0, 1.0));
    assert_eq!(boat.boom_deflection_deg, 10.0);
}

#[test]
fn gate_scenarios() {
    let center = DVec2::new(400.0, 100.0);

    let mut gate = Gate::new(center, 100.0, 0.0).unwrap();
    assert_eq!(gate.check_passage(DVec2::new(400.0, 150.0), DVec2::new(400.0, 50.0)), 10);
    assert_eq!(gate.check_passage(DVec2::new(400.0, 150.0), DVec2::new(400.0, 50.0)), 0);

    let mut gate = Gate::new(center, 100.0, 0.0).unwrap();
    assert_eq!(gate.check_passage(DVec2::new(400.0, 50.0), DVec2::new(400.0, 150.0)), -3);

    let mut gate = Gate::new(center, 100.0, 0.0).unwrap();
    assert_eq!(gate.check_passage(DVec2::new(500.0, 150.0), DVec2::new(500.0, 50.0)), -2);
}
