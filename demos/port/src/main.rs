//! port: a week of barge traffic in a six-terminal inland port.
//!
//! Barges arrive at random, each with a handful of terminals to visit.
//! Every barge plans its rotation against the terminals' waiting profiles
//! and books appointments; terminals admit barges under the reserved
//! policy and reject late ones, which then re-plan.
//!
//! Usage: `port [config.json]`.  The optional JSON file overrides the port
//! configuration and arrival profile; see [`DemoConfig`].  Set `RUST_LOG`
//! (e.g. `RUST_LOG=bp_sim=debug`) for per-event logs.

mod network;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use bp_core::{PortConfig, SlackPolicy, Tick, TravelTimeModel};
use bp_output::{CsvWriter, RunSummary, SimOutputObserver};
use bp_sim::{ArrivalProfile, BargeSummary, EventRecord, SimBuilder, SimObserver};

use network::build_network;

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:              u64 = 42;
const SIM_MINUTES:       u64 = 7 * 24 * 60; // one week, 1 tick = 1 minute
const WARMUP_MINUTES:    u64 = 24 * 60;
const MEAN_INTERARRIVAL: f64 = 40.0;
const TIME_SIGMA:        f64 = 3.0;
const OUTPUT_DIR:        &str = "output/port";

// ── Configuration ─────────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(default)]
struct DemoConfig {
    port:     PortConfig,
    arrivals: ArrivalProfile,
    /// Barges entering before this tick are excluded from the statistics.
    warmup:   Tick,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            port: PortConfig {
                slack:        SlackPolicy::Constant(5),
                travel_model: TravelTimeModel::Stochastic { sigma: TIME_SIGMA },
                end_tick:     Tick(SIM_MINUTES),
                seed:         SEED,
                ..PortConfig::default()
            },
            arrivals: ArrivalProfile {
                mean_interarrival: MEAN_INTERARRIVAL,
                ..ArrivalProfile::default()
            },
            warmup: Tick(WARMUP_MINUTES),
        }
    }
}

fn load_config(path: Option<PathBuf>) -> Result<DemoConfig> {
    let Some(path) = path else {
        return Ok(DemoConfig::default());
    };
    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

// ── Observer fan-out ──────────────────────────────────────────────────────────

/// Feeds the CSV writer and the in-memory summary, counting rows.
struct PortObserver {
    csv:        SimOutputObserver<CsvWriter>,
    summary:    RunSummary,
    event_rows: usize,
    barge_rows: usize,
}

impl SimObserver for PortObserver {
    fn on_event(&mut self, record: &EventRecord) {
        self.event_rows += 1;
        self.csv.on_event(record);
        self.summary.on_event(record);
    }

    fn on_barge_left(&mut self, summary: &BargeSummary) {
        self.barge_rows += 1;
        self.csv.on_barge_left(summary);
        self.summary.on_barge_left(summary);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.csv.on_sim_end(final_tick);
        self.summary.on_sim_end(final_tick);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = load_config(std::env::args_os().nth(1).map(PathBuf::from))?;

    println!("=== port: barge rotation planning ===");
    println!(
        "Admission: {:?}  |  Slack: {:?}  |  Horizon: {} min  |  Seed: {}",
        config.port.admission, config.port.slack, config.port.end_tick.0, config.port.seed
    );
    println!();

    // 1. Sailing matrix.
    let network = build_network()?;
    info!(terminals = network.len() - 1, "loaded sailing matrix");

    // 2. Build sim with the arrival generator.
    let mut sim = SimBuilder::new(config.port.clone(), network)
        .arrivals(config.arrivals.clone())
        .build()?;

    // 3. Set up output.
    std::fs::create_dir_all(OUTPUT_DIR)?;
    let writer = CsvWriter::new(Path::new(OUTPUT_DIR))?;
    let mut obs = PortObserver {
        csv:        SimOutputObserver::new(writer),
        summary:    RunSummary::with_warmup(config.warmup),
        event_rows: 0,
        barge_rows: 0,
    };

    // 4. Run.
    let t0 = Instant::now();
    sim.run(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.csv.take_error() {
        eprintln!("output error: {e}");
    }

    // 5. Summary.
    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  events.csv : {} rows", obs.event_rows);
    println!("  barges.csv : {} rows", obs.barge_rows);
    println!();
    println!("{}", obs.summary);
    println!();

    // 6. Terminal occupancy at the end of the horizon.
    println!("{:<10} {:<10} {:<8} {:<8}", "Terminal", "State", "Queue", "Booked");
    println!("{}", "-".repeat(38));
    for terminal in sim.terminals.iter().skip(1) {
        println!(
            "{:<10} {:<10} {:<8} {:<8}",
            terminal.id.0,
            format!("{:?}", terminal.state()),
            terminal.queue_len(),
            terminal.book().len(),
        );
    }

    Ok(())
}
