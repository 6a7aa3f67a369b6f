//! Course layouts
//!
//! The standard course is four gates around the start, one per compass
//! direction. Random courses are seeded so a run can be replayed.

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::gate::{Gate, GateError};
use crate::consts::GATE_DEFAULT_WIDTH;
use crate::settings::SimConfig;

/// Distance from the playfield center to each gate of the standard course
pub const STANDARD_COURSE_RADIUS: f64 = 200.0;

/// Keep random gates this far from the playfield edges
pub const COURSE_EDGE_MARGIN: f64 = 60.0;
/// Minimum distance between random gate centers (and from the start)
pub const MIN_GATE_SPACING: f64 = 150.0;
/// Placement attempts per gate before giving up on it
const MAX_PLACEMENT_ATTEMPTS: u32 = 64;

const MIN_RANDOM_WIDTH: f64 = 80.0;
const MAX_RANDOM_WIDTH: f64 = 140.0;
/// Random orientations snap to multiples of this (degrees)
const ORIENTATION_STEP: f64 = 15.0;

/// North, east, south and west gates, each passed heading away from the center
pub fn default_course(config: &SimConfig) -> Result<Vec<Gate>, GateError> {
    let center = config.playfield.center();
    let r = STANDARD_COURSE_RADIUS;

    [
        (DVec2::new(0.0, -r), 0.0),
        (DVec2::new(r, 0.0), 90.0),
        (DVec2::new(0.0, r), 180.0),
        (DVec2::new(-r, 0.0), 270.0),
    ]
    .into_iter()
    .map(|(offset, orientation)| {
        Gate::with_params(center + offset, GATE_DEFAULT_WIDTH, orientation, config.gates)
    })
    .collect()
}

/// Seeded random course of up to `count` gates
///
/// Gates that cannot be placed clear of the others after a bounded number of
/// attempts are dropped, so small playfields may get fewer gates.
pub fn generate_course(seed: u64, count: usize, config: &SimConfig) -> Result<Vec<Gate>, GateError> {
    let mut rng = Pcg32::seed_from_u64(seed);
    let playfield = config.playfield;
    let start = playfield.center();

    let x_range = COURSE_EDGE_MARGIN..(playfield.width - COURSE_EDGE_MARGIN).max(COURSE_EDGE_MARGIN + 1.0);
    let y_range = COURSE_EDGE_MARGIN..(playfield.height - COURSE_EDGE_MARGIN).max(COURSE_EDGE_MARGIN + 1.0);
    let orientation_steps = (360.0 / ORIENTATION_STEP) as u32;

    let mut gates: Vec<Gate> = Vec::with_capacity(count);
    for index in 0..count {
        let placed = (0..MAX_PLACEMENT_ATTEMPTS).find_map(|_| {
            let center = DVec2::new(
                rng.random_range(x_range.clone()),
                rng.random_range(y_range.clone()),
            );
            let clear = center.distance(start) >= MIN_GATE_SPACING
                && gates.iter().all(|g| g.center.distance(center) >= MIN_GATE_SPACING);
            clear.then_some(center)
        });

        let Some(center) = placed else {
            log::warn!("Could not place gate {} of {}, course shortened", index + 1, count);
            continue;
        };

        let width = rng.random_range(MIN_RANDOM_WIDTH..=MAX_RANDOM_WIDTH);
        let orientation = f64::from(rng.random_range(0..orientation_steps)) * ORIENTATION_STEP;
        gates.push(Gate::with_params(center, width, orientation, config.gates)?);
    }

    log::info!("Generated course with {} gates (seed {})", gates.len(), seed);
    Ok(gates)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_course_layout() {
        let gates = default_course(&SimConfig::default()).unwrap();
        assert_eq!(gates.len(), 4);
        assert_eq!(gates[0].center, DVec2::new(400.0, 100.0));
        assert_eq!(gates[1].center, DVec2::new(600.0, 300.0));
        assert_eq!(gates[2].center, DVec2::new(400.0, 500.0));
        assert_eq!(gates[3].center, DVec2::new(200.0, 300.0));

        // Each gate is passed heading away from the start
        let start = DVec2::new(400.0, 300.0);
        for gate in &gates {
            assert!((gate.center - start).normalize().dot(gate.passage_dir) > 0.99);
            assert_eq!(gate.width, 100.0);
        }
    }

    #[test]
    fn test_generated_course_is_deterministic() {
        let config = SimConfig::default();
        let a = generate_course(42, 5, &config).unwrap();
        let b = generate_course(42, 5, &config).unwrap();
        assert_eq!(a.len(), b.len());
        for (ga, gb) in a.iter().zip(&b) {
            assert_eq!(ga.center, gb.center);
            assert_eq!(ga.width, gb.width);
            assert_eq!(ga.orientation_deg, gb.orientation_deg);
        }
    }

    #[test]
    fn test_generated_course_constraints() {
        let config = SimConfig::default();
        let gates = generate_course(7, 6, &config).unwrap();
        assert!(!gates.is_empty());
        for (i, gate) in gates.iter().enumerate() {
            assert!(gate.center.x >= COURSE_EDGE_MARGIN && gate.center.x <= 800.0 - COURSE_EDGE_MARGIN);
            assert!(gate.center.y >= COURSE_EDGE_MARGIN && gate.center.y <= 600.0 - COURSE_EDGE_MARGIN);
            assert!((80.0..=140.0).contains(&gate.width));
            assert_eq!(gate.orientation_deg % 15.0, 0.0);
            assert!(gate.center.distance(DVec2::new(400.0, 300.0)) >= MIN_GATE_SPACING);
            for other in &gates[i + 1..] {
                assert!(gate.center.distance(other.center) >= MIN_GATE_SPACING);
            }
        }
    }

    #[test]
    fn test_crowded_playfield_drops_gates() {
        let mut config = SimConfig::default();
        config.playfield.width = 300.0;
        config.playfield.height = 300.0;
        let gates = generate_course(1, 10, &config).unwrap();
        assert!(gates.len() < 10);
    }
}
