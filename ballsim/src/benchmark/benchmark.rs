use std::time::Instant;

use crate::error::SimResult;
use crate::simulation::conservation::ConservationSample;
use crate::simulation::runner::{NoOpObserver, StepObserver, StepRecord};
use crate::simulation::scenario::Scenario;

/// Penalty energy/momentum drift for one step size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriftPoint {
    pub dt: f64,
    pub steps: usize,
    pub energy_drift_percent: f64, // NaN if the scenario starts at rest
    pub momentum_drift: f64,
}

/// Wall-clock cost per step of each model
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepTiming {
    pub steps: usize,
    pub analytical_us: f64, // microseconds per step
    pub penalty_us: f64,
}

/// Keeps only the last sample so long sweeps don't buffer anything
#[derive(Default)]
struct LastSample(Option<ConservationSample>);

impl StepObserver for LastSample {
    fn on_step(&mut self, record: &StepRecord<'_>) {
        self.0 = Some(record.sample);
    }
}

/// Run the penalty model of `scenario` once per step size in `dts`, keeping
/// the scenario's duration, and measure end-of-run drift.
/// Paste output directly into a spreadsheet to graph drift against dt
pub fn drift_curve(scenario: &Scenario, dts: &[f64]) -> SimResult<Vec<DriftPoint>> {
    let mut curve = Vec::with_capacity(dts.len());

    for &dt in dts {
        let mut sweep = scenario.clone();
        sweep.parameters.dt = dt;
        sweep.parameters.validate()?;

        let mut last = LastSample::default();
        let initial = sweep.stream_penalty(&mut last)?;
        let last = last.0.unwrap_or(initial);

        let energy_drift_percent = if initial.kinetic_energy > 0.0 {
            (last.kinetic_energy - initial.kinetic_energy).abs() / initial.kinetic_energy * 100.0
        } else {
            f64::NAN
        };

        curve.push(DriftPoint {
            dt,
            steps: sweep.parameters.steps(),
            energy_drift_percent,
            momentum_drift: (last.momentum - initial.momentum).norm(),
        });
    }

    Ok(curve)
}

/// Time `steps` steps of each model on `scenario`'s bodies.
/// The analytical model is stepped at the penalty `dt` so both do the same
/// number of steps.
pub fn bench_models(scenario: &Scenario, steps: usize) -> SimResult<StepTiming> {
    let mut bench = scenario.clone();
    bench.parameters.t_end = bench.parameters.dt * steps as f64;
    bench.parameters.analytical_samples = steps;
    bench.parameters.validate()?;

    let t0 = Instant::now();
    bench.stream_analytical(&mut NoOpObserver)?;
    let analytical_us = t0.elapsed().as_secs_f64() * 1e6 / steps as f64;

    let t1 = Instant::now();
    bench.stream_penalty(&mut NoOpObserver)?;
    let penalty_us = t1.elapsed().as_secs_f64() * 1e6 / steps as f64;

    Ok(StepTiming {
        steps,
        analytical_us,
        penalty_us,
    })
}
