//! Deterministic simulation module
//!
//! All sailing and scoring logic lives here. This module must be pure and
//! deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (gates in course order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod boom;
pub mod course;
pub mod gate;
pub mod state;
pub mod tick;
pub mod vessel;
pub mod wind;

pub use boom::BoomSide;
pub use course::{default_course, generate_course};
pub use gate::{Buoy, Gate, GateError, GateOutcome, GateStatus};
pub use state::{SimEvent, SimState};
pub use tick::{TickInput, tick};
pub use vessel::{StepReport, Telemetry, Vessel};
pub use wind::WindState;
