//! Build fully-validated scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) or runtime values and produces a
//! `Scenario` holding:
//! - numerical parameters (`Parameters`)
//! - the walls (`Boundary`)
//! - the initial system (`System` with both bodies at t = 0)
//!
//! Each model gets its own clone of the initial system, so the analytical
//! and penalty runs start from identical conditions and share nothing.

use std::thread;

use crate::configuration::config::{BodyConfig, ScenarioConfig, VelocityConfig};
use crate::error::{SimError, SimResult};
use crate::simulation::analytical::AnalyticalResolver;
use crate::simulation::params::{Parameters, SampleTimes};
use crate::simulation::penalty::PenaltyResolver;
use crate::simulation::runner::{ModelRun, SimulationRunner, StepObserver};
use crate::simulation::conservation::ConservationSample;
use crate::simulation::states::{Body, Boundary, NVec2, System};

#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub parameters: Parameters,
    pub boundary: Boundary,
    pub system: System,
}

/// Both models run from the same scenario
#[derive(Debug, Clone)]
pub struct Comparison {
    pub analytical: ModelRun,
    pub penalty: ModelRun,
}

fn vec2(values: &[f64], what: &str, index: usize) -> SimResult<NVec2> {
    match values {
        [x, y] => Ok(NVec2::new(*x, *y)),
        _ => Err(SimError::Config(format!(
            "body {index}: `{what}` needs 2 components, got {}",
            values.len()
        ))),
    }
}

fn build_body(index: usize, bc: &BodyConfig) -> SimResult<Body> {
    let x = vec2(&bc.x, "x", index)?;
    let body = match bc.velocity(index)? {
        VelocityConfig::Cartesian { v } => Body::new(x, vec2(&v, "v", index)?, bc.m, bc.radius),
        VelocityConfig::Polar { speed, angle_deg } => {
            Body::with_heading(x, speed, angle_deg, bc.m, bc.radius)
        }
    };
    Ok(body)
}

impl Scenario {
    /// Validate every input before any model can run
    pub fn new(parameters: Parameters, boundary: Boundary, system: System) -> SimResult<Self> {
        parameters.validate()?;
        system.validate()?;
        Ok(Self {
            parameters,
            boundary,
            system,
        })
    }

    pub fn build_scenario(cfg: ScenarioConfig) -> SimResult<Self> {
        let [first, second] = cfg.bodies.as_slice() else {
            return Err(SimError::Config(format!(
                "exactly 2 bodies are required, got {}",
                cfg.bodies.len()
            )));
        };
        let system = System::new(build_body(0, first)?, build_body(1, second)?);

        let b = cfg.boundary;
        let boundary = Boundary::new(b.left, b.right, b.bottom, b.top)?;

        let p_cfg = cfg.parameters;
        let mut parameters = Parameters::new(p_cfg.t_end, p_cfg.dt, p_cfg.stiffness)
            .with_restitution(p_cfg.restitution);
        if let Some(samples) = p_cfg.analytical_samples {
            parameters = parameters.with_analytical_samples(samples);
        }

        Self::new(parameters, boundary, system)
    }

    /// `analytical_samples` points from 0 to `t_end` inclusive
    pub fn analytical_times(&self) -> SampleTimes {
        SampleTimes::linspace(0.0, self.parameters.t_end, self.parameters.analytical_samples)
    }

    /// `t_end / dt` steps of exactly `dt`
    pub fn penalty_times(&self) -> SampleTimes {
        SampleTimes::uniform(self.parameters.dt, self.parameters.steps())
    }

    pub fn analytical_runner(&self) -> SimResult<SimulationRunner<AnalyticalResolver>> {
        SimulationRunner::new(
            AnalyticalResolver::new(self.parameters.restitution),
            self.system.clone(),
            self.boundary,
        )
    }

    pub fn penalty_runner(&self) -> SimResult<SimulationRunner<PenaltyResolver>> {
        SimulationRunner::new(
            PenaltyResolver::new(self.parameters.stiffness),
            self.system.clone(),
            self.boundary,
        )
    }

    pub fn run_analytical(&self, stride: usize) -> SimResult<ModelRun> {
        self.analytical_runner()?.run_strided(&self.analytical_times(), stride)
    }

    pub fn run_penalty(&self, stride: usize) -> SimResult<ModelRun> {
        self.penalty_runner()?.run_strided(&self.penalty_times(), stride)
    }

    /// Stream the analytical run to `observer` without buffering it
    pub fn stream_analytical<O: StepObserver + ?Sized>(&self, observer: &mut O) -> SimResult<ConservationSample> {
        self.analytical_runner()?.run_with(&self.analytical_times(), observer)
    }

    /// Stream the penalty run to `observer` without buffering it
    pub fn stream_penalty<O: StepObserver + ?Sized>(&self, observer: &mut O) -> SimResult<ConservationSample> {
        self.penalty_runner()?.run_with(&self.penalty_times(), observer)
    }

    /// Run both models, one thread each. The runs share no mutable state.
    pub fn run_comparison(&self, stride: usize) -> SimResult<Comparison> {
        let (analytical, penalty) = thread::scope(|s| {
            let a = s.spawn(|| self.run_analytical(stride));
            let p = s.spawn(|| self.run_penalty(stride));
            (join(a), join(p))
        });
        Ok(Comparison {
            analytical: analytical?,
            penalty: penalty?,
        })
    }
}

fn join<T>(handle: thread::ScopedJoinHandle<'_, T>) -> T {
    handle
        .join()
        .unwrap_or_else(|payload| std::panic::resume_unwind(payload))
}
