//! Sail Gates headless runner
//!
//! Sails a course on autopilot for a fixed number of ticks and prints a JSON
//! summary. Rendering and keyboard input live outside this crate.
//!
//! Usage: `sail-gates [--config <path>] [--ticks <n>] [--seed <n>] [--gates <n>]`

#[cfg(not(target_arch = "wasm32"))]
use serde::Serialize;

#[cfg(not(target_arch = "wasm32"))]
use sail_gates::SimConfig;
#[cfg(not(target_arch = "wasm32"))]
use sail_gates::consts::SIM_DT;
#[cfg(not(target_arch = "wasm32"))]
use sail_gates::sim::{GateStatus, SimEvent, SimState, Telemetry, TickInput, generate_course, tick};

/// Default run length (one minute at 30 Hz)
#[cfg(not(target_arch = "wasm32"))]
const DEFAULT_TICKS: u64 = 60 * 30;
#[cfg(not(target_arch = "wasm32"))]
const DEFAULT_RANDOM_GATES: usize = 5;

/// Command line options
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default)]
struct Options {
    config: Option<String>,
    ticks: Option<u64>,
    seed: Option<u64>,
    gates: Option<usize>,
}

#[cfg(not(target_arch = "wasm32"))]
impl Options {
    fn parse(args: impl IntoIterator<Item = String>) -> Result<Self, String> {
        let mut options = Self::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            let mut value = || args.next().ok_or_else(|| format!("missing value for {arg}"));
            match arg.as_str() {
                "--config" => options.config = Some(value()?),
                "--ticks" => options.ticks = Some(parse_number(&value()?)?),
                "--seed" => options.seed = Some(parse_number(&value()?)?),
                "--gates" => options.gates = Some(parse_number(&value()?)?),
                other => return Err(format!("unknown argument: {other}")),
            }
        }
        Ok(options)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn parse_number<T: std::str::FromStr>(s: &str) -> Result<T, String> {
    s.parse().map_err(|_| format!("not a number: {s}"))
}

#[cfg(not(target_arch = "wasm32"))]
#[derive(Serialize)]
struct RunSummary {
    ticks: u64,
    seconds: f64,
    score: i64,
    gates_passed: usize,
    course_complete: bool,
    vessel: Telemetry,
    gates: Vec<GateStatus>,
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    let options = match Options::parse(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("{e}");
            eprintln!("usage: sail-gates [--config <path>] [--ticks <n>] [--seed <n>] [--gates <n>]");
            std::process::exit(2);
        }
    };

    if let Err(e) = run(&options) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn run(options: &Options) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &options.config {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };

    let mut state = match options.seed {
        Some(seed) => {
            let count = options.gates.unwrap_or(DEFAULT_RANDOM_GATES);
            let gates = generate_course(seed, count, &config)?;
            SimState::new(config, gates)?
        }
        None => SimState::with_default_course(config)?,
    };

    let ticks = options.ticks.unwrap_or(DEFAULT_TICKS);
    log::info!("Sail Gates starting: {} gates, {} ticks", state.gates.len(), ticks);

    let input = TickInput {
        autopilot: true,
        ..Default::default()
    };
    for _ in 0..ticks {
        tick(&mut state, &input);
        for event in &state.events {
            if let SimEvent::GateResolved { gate, outcome, points } = event {
                log::debug!("tick {}: gate {} {:?} ({:+})", state.time_ticks, gate, outcome, points);
            }
        }
        if state.is_course_complete() {
            log::info!("Course complete after {} ticks", state.time_ticks);
            break;
        }
    }

    let summary = RunSummary {
        ticks: state.time_ticks,
        seconds: state.time_ticks as f64 * SIM_DT,
        score: state.score,
        gates_passed: state.gates_passed(),
        course_complete: state.is_course_complete(),
        vessel: state.vessel.telemetry(),
        gates: state.gates.iter().map(|g| g.status).collect(),
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Headless runner is native only
}
