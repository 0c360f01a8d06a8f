//! soaring-bench: headless driver for the thermal soaring simulation.
//!
//! Usage:
//!   soaring-bench compare --trials 50 --seed 7 --lag 3
//!   soaring-bench watch --scenario comparison.json --seconds 30

use std::path::PathBuf;
use std::process;
use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use soaring_controllers::GliderController;
use soaring_core::config::{ControllerConfig, ScenarioConfig};
use soaring_core::constants::INITIAL_HEIGHT;
use soaring_core::enums::ControllerKind;
use soaring_core::error::Result;
use soaring_sim::{scenario, FrameClock, Simulation};

/// Wall-clock frame period of `watch`.
const FRAME_PERIOD: Duration = Duration::from_micros(16_667);

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("soaring=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let result = match args[1].as_str() {
        "compare" => cmd_compare(&args[2..]),
        "watch" => cmd_watch(&args[2..]),
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {other}");
            print_usage();
            process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn print_usage() {
    eprintln!(
        "soaring-bench: thermal soaring simulation driver\n\
         \n\
         Commands:\n\
         \n\
         compare   Fly every controller from the same seeded starts, report height gain\n\
         \n\
           --trials <N>        Starts per controller (default: 20)\n\
           --seed <N>          RNG seed for start positions (default: 42)\n\
           --duration <secs>   Simulated seconds per trial (default: 120)\n\
           --dt <secs>         Integration step (default: 1/60)\n\
           --lag <secs>        Variometer lag (default: scenario's, else 3)\n\
           --scenario <path>   Scenario JSON providing thermal and world (optional)\n\
         \n\
         watch     Run a scenario paced to the wall clock, print JSON snapshots\n\
         \n\
           --scenario <path>   Scenario JSON (default: strategy comparison preset)\n\
           --seconds <secs>    Wall-clock run time (default: 10)\n\
           --interval <secs>   Seconds between snapshots (default: 0.5)\n\
           --acceleration <x>  Override the scenario's time acceleration (optional)\n\
         \n\
         Logging is controlled with RUST_LOG (default: soaring=info).\n"
    );
}

fn parse_value(args: &[String], flag: &str) -> Option<String> {
    for i in 0..args.len() {
        if args[i] == flag && i + 1 < args.len() {
            return Some(args[i + 1].clone());
        }
    }
    None
}

fn parse_number<T: std::str::FromStr>(args: &[String], flag: &str, default: T) -> T {
    match parse_value(args, flag) {
        Some(raw) => match raw.parse() {
            Ok(value) => value,
            Err(_) => {
                eprintln!("Error: {flag} expects a number, got {raw:?}");
                process::exit(1);
            }
        },
        None => default,
    }
}

fn load_scenario(args: &[String]) -> Result<Option<ScenarioConfig>> {
    match parse_value(args, "--scenario") {
        Some(path) => {
            let path = PathBuf::from(path);
            info!(path = %path.display(), "loading scenario");
            ScenarioConfig::from_path(&path).map(Some)
        }
        None => Ok(None),
    }
}

// ---- compare ----

#[derive(Debug, Serialize)]
struct ComparisonReport {
    seed: u64,
    trials: usize,
    duration_secs: f64,
    variometer_lag: f64,
    results: Vec<ControllerResult>,
}

#[derive(Debug, Serialize)]
struct ControllerResult {
    kind: ControllerKind,
    title: &'static str,
    mean_gain: f64,
    min_gain: f64,
    max_gain: f64,
}

fn cmd_compare(args: &[String]) -> Result<()> {
    let trials: usize = parse_number(args, "--trials", 20);
    let seed: u64 = parse_number(args, "--seed", 42);
    let duration: f64 = parse_number(args, "--duration", 120.0);
    let dt: f64 = parse_number(args, "--dt", 1.0 / 60.0);

    if trials == 0 || !(duration > 0.0) || !(dt > 0.0) {
        eprintln!("Error: --trials, --duration and --dt must be positive");
        process::exit(1);
    }

    let mut base = match load_scenario(args)? {
        Some(config) => config,
        None => scenario::single_glider(
            ControllerConfig::default_for(ControllerKind::AlwaysBanking),
            3.0,
        ),
    };
    let default_lag = base.gliders.first().map_or(3.0, |g| g.variometer_lag);
    let lag: f64 = parse_number(args, "--lag", default_lag);
    for glider in &mut base.gliders {
        glider.variometer_lag = lag;
    }
    base.time_acceleration = 1.0;
    base.validate()?;

    let radius = base.thermal.radius;
    let steps = (duration / dt).ceil() as usize;
    info!(trials, seed, duration, lag, "comparing controllers");

    let mut results = Vec::with_capacity(ControllerKind::ALL.len());
    for kind in ControllerKind::ALL {
        let controller = ControllerConfig::default_for(kind);
        // Same seed per controller, so every controller flies the same starts.
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let starts = scenario::ring_starts(&mut rng, &base.thermal, trials, 0.5 * radius, radius);

        let mut gains = Vec::with_capacity(trials);
        for start in starts {
            let mut sim = Simulation::from_config(&scenario::trial(&base, controller, start))?;
            for _ in 0..steps {
                sim.update(dt);
            }
            let gain = sim.world().gliders()[0].height() - INITIAL_HEIGHT;
            debug!(?kind, x = start.x, y = start.y, gain, "trial finished");
            gains.push(gain);
        }

        let result = summarize(kind, &controller, &gains);
        info!(?kind, mean_gain = result.mean_gain, "controller finished");
        results.push(result);
    }

    let report = ComparisonReport {
        seed,
        trials,
        duration_secs: duration,
        variometer_lag: lag,
        results,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn summarize(
    kind: ControllerKind,
    controller: &ControllerConfig,
    gains: &[f64],
) -> ControllerResult {
    let mean_gain = gains.iter().sum::<f64>() / gains.len().max(1) as f64;
    let min_gain = gains.iter().copied().fold(f64::INFINITY, f64::min);
    let max_gain = gains.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    ControllerResult {
        kind,
        title: GliderController::from_config(controller).title(),
        mean_gain,
        min_gain,
        max_gain,
    }
}

// ---- watch ----

fn cmd_watch(args: &[String]) -> Result<()> {
    let seconds: f64 = parse_number(args, "--seconds", 10.0);
    let interval: f64 = parse_number(args, "--interval", 0.5);

    let config = match load_scenario(args)? {
        Some(config) => config,
        None => scenario::strategy_comparison(),
    };
    let mut sim = Simulation::from_config(&config)?;
    if let Some(acceleration) = parse_value(args, "--acceleration") {
        match acceleration.parse::<f64>() {
            Ok(x) if x.is_finite() && x > 0.0 => sim.set_time_acceleration(x),
            _ => {
                eprintln!("Error: --acceleration expects a positive number, got {acceleration:?}");
                process::exit(1);
            }
        }
    }
    let mut clock = FrameClock::new();

    info!(
        gliders = config.gliders.len(),
        time_acceleration = sim.time_acceleration(),
        "watching scenario"
    );

    let started = Instant::now();
    let mut next_frame = started;
    let mut since_emit = f64::INFINITY;

    while started.elapsed().as_secs_f64() < seconds {
        let now = Instant::now();
        let delta = clock.tick(now);
        sim.update(delta);

        since_emit += delta;
        if since_emit >= interval {
            since_emit = 0.0;
            println!("{}", serde_json::to_string(&sim.snapshot())?);
        }

        next_frame += FRAME_PERIOD;
        let now = Instant::now();
        if next_frame > now {
            std::thread::sleep(next_frame - now);
        } else {
            next_frame = now;
        }
    }

    Ok(())
}
