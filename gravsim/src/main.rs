use gravsim::{bench_scheduler, build_simulation, ScenarioConfig};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::time::Instant;

/// Headless runner: steps a scenario with a fixed clock and logs the result
#[derive(Parser, Debug)]
struct Args {
    /// Scenario file, resolved under `scenarios/`
    #[arg(short, default_value = "orbits.yaml")]
    file_name: String,

    /// Number of ticks to run
    #[arg(long, default_value_t = 600)]
    steps: u64,

    /// Clock delta fed to each tick (capped by the engine's max_dt)
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f64,

    /// Time the force scheduler instead of running a scenario
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    let file = File::open(&config_path)
        .with_context(|| format!("failed to open {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let scenario_cfg: ScenarioConfig = serde_yaml::from_reader(reader)
        .with_context(|| format!("failed to parse {}", config_path.display()))?;

    Ok(scenario_cfg)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.bench {
        bench_scheduler()?;
        return Ok(());
    }

    let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    let mut sim = build_simulation(&scenario_cfg).context("failed to build scenario")?;

    let mut last_log = Instant::now();
    let mut ticks_since_log = 0u64;
    for _ in 0..args.steps {
        sim.step(args.dt)?;

        ticks_since_log += 1;
        let elapsed = last_log.elapsed().as_secs_f64();
        if elapsed > 2.0 {
            info!("{:.1} ticks/s", ticks_since_log as f64 / elapsed);
            last_log = Instant::now();
            ticks_since_log = 0;
        }
    }

    info!("{} ticks, {:.3} s simulated", sim.ticks(), sim.time());
    for view in sim.snapshot() {
        info!(
            "{:>10}  x = ({:8.2}, {:8.2})  v = ({:8.2}, {:8.2})  r = {:.2}",
            view.name, view.position.x, view.position.y, view.velocity.x, view.velocity.y, view.radius
        );
    }

    Ok(())
}
