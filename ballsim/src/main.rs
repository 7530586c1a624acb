use ballsim::{bench_models, drift_curve, Comparison, ModelRun, Scenario, ScenarioConfig};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file under `scenarios/`
    #[arg(short, default_value = "head_on.yaml")]
    file_name: String,

    /// Trajectory entries kept per model (the runs are strided to fit)
    #[arg(long, default_value_t = 100)]
    frames: usize,

    /// Print the penalty drift curve and per-step timings instead of running
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<Scenario> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    let scenario_cfg = ScenarioConfig::from_path(&config_path)
        .with_context(|| format!("failed to load scenario {}", config_path.display()))?;
    let scenario = Scenario::build_scenario(scenario_cfg).context("invalid scenario")?;
    Ok(scenario)
}

fn print_run(run: &ModelRun) {
    for event in run.collisions() {
        println!("{} collision at t={:.3}", run.model, event.time);
    }
    println!("{}", run.report());
}

fn run_bench(scenario: &Scenario) -> Result<()> {
    let dts = [1e-5, 1e-4, 1e-3, 1e-2, 5e-2, 1e-1];

    println!("dt,steps,energy_drift_pct,momentum_drift");
    for point in drift_curve(scenario, &dts)? {
        println!("{:e},{},{:.6},{:.6e}", point.dt, point.steps, point.energy_drift_percent, point.momentum_drift);
    }

    let timing = bench_models(scenario, 100_000)?;
    println!(
        "steps = {}, analytical = {:.4} us/step, penalty = {:.4} us/step",
        timing.steps, timing.analytical_us, timing.penalty_us
    );
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let scenario = load_scenario_from_yaml(&args.file_name)?;

    if args.bench {
        return run_bench(&scenario);
    }

    // stride so each model keeps about `frames` entries
    let steps = scenario.parameters.steps().max(scenario.parameters.analytical_samples);
    let stride = (steps / args.frames.max(1)).max(1);

    let Comparison { analytical, penalty } = scenario.run_comparison(stride)?;

    println!("{}", "=".repeat(50));
    println!("CONSERVATION CHECK");
    println!("{}", "=".repeat(50));
    print_run(&analytical);
    print_run(&penalty);

    Ok(())
}
