pub mod error;
pub mod simulation;
pub mod configuration;
pub mod benchmark;

pub use error::{SimError, SimResult};

pub use simulation::states::{Body, System, Boundary, NVec2};
pub use simulation::params::{Parameters, SampleTimes};
pub use simulation::engine::Model;
pub use simulation::conservation::ConservationSample;
pub use simulation::resolver::{Resolver, Contact, Wall};
pub use simulation::forces::{ForceSet, ContactForce, HookeWall, HookeBodyBody};
pub use simulation::integrator::semi_implicit_euler;
pub use simulation::analytical::AnalyticalResolver;
pub use simulation::penalty::PenaltyResolver;
pub use simulation::runner::{SimulationRunner, StepObserver, StepRecord, NoOpObserver, Recorder, ModelRun, Trajectory, ContactEvent};
pub use simulation::report::ConservationReport;
pub use simulation::scenario::{Scenario, Comparison};

pub use configuration::config::{ScenarioConfig, ParametersConfig, BoundaryConfig, BodyConfig, VelocityConfig};

pub use benchmark::benchmark::{drift_curve, bench_models, DriftPoint, StepTiming};
