//! Fixed-sequence driver for either resolver
//!
//! `SimulationRunner` owns one model's `System` and the `Boundary`, walks a
//! `SampleTimes` grid, and after every step hands a [`StepRecord`] to a
//! [`StepObserver`]. [`Recorder`] is the observer that buffers trajectories,
//! conservation samples and contact events into a [`ModelRun`]; streaming
//! consumers implement the trait themselves and never buffer the run.

use tracing::{info, warn};

use crate::error::SimResult;
use crate::simulation::conservation::ConservationSample;
use crate::simulation::engine::Model;
use crate::simulation::params::SampleTimes;
use crate::simulation::report::ConservationReport;
use crate::simulation::resolver::{Contact, Resolver};
use crate::simulation::states::{Boundary, NVec2, System};

/// Everything known about one completed step
#[derive(Debug, Clone, Copy)]
pub struct StepRecord<'a> {
    pub step: usize, // 0-based step index
    pub time: f64, // sample time reached by this step
    pub positions: [NVec2; 2], // post-step centers
    pub sample: ConservationSample, // post-step energy and momentum
    pub contacts: &'a [Contact], // contacts acted on during this step
}

/// Trait for observing a run step by step.
///
/// All methods except `on_step` have no-op defaults.
pub trait StepObserver {
    /// Called once before the first step with the t = 0 reference
    fn on_start(&mut self, _model: Model, _initial: &ConservationSample, _sys: &System) {}

    /// Called after every step
    fn on_step(&mut self, record: &StepRecord<'_>);

    /// Called once after the last step with the final state
    fn on_finish(&mut self, _sys: &System) {}
}

/// An observer that ignores everything
pub struct NoOpObserver;

impl StepObserver for NoOpObserver {
    fn on_step(&mut self, _record: &StepRecord<'_>) {}
}

/// Ordered positions of one body
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trajectory {
    points: Vec<NVec2>,
}

impl Trajectory {
    pub fn push(&mut self, point: NVec2) {
        self.points.push(point);
    }

    pub fn points(&self) -> &[NVec2] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last(&self) -> Option<&NVec2> {
        self.points.last()
    }

    /// At most `frames` evenly strided points for playback.
    /// Stride is `max(1, len / frames)`, starting at the first point.
    pub fn downsample(&self, frames: usize) -> Vec<NVec2> {
        if frames == 0 || self.points.is_empty() {
            return Vec::new();
        }
        let stride = (self.points.len() / frames).max(1);
        self.points.iter().step_by(stride).take(frames).copied().collect()
    }
}

/// A contact acted on at one step: an analytical impulse or reflection, or
/// the first step of a penalty contact
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactEvent {
    pub step: usize,
    pub time: f64,
    pub contact: Contact,
}

/// Output of one model's run
#[derive(Debug, Clone)]
pub struct ModelRun {
    pub model: Model,
    pub times: Vec<f64>, // time of every recorded entry
    pub trajectories: [Trajectory; 2], // one per body
    pub samples: Vec<ConservationSample>, // one per recorded entry
    pub initial: ConservationSample, // t = 0 reference
    pub events: Vec<ContactEvent>, // contact events, in step order
    pub final_state: System, // state after the last step
}

impl ModelRun {
    pub fn final_sample(&self) -> ConservationSample {
        self.samples.last().copied().unwrap_or(self.initial)
    }

    pub fn energy_history(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.kinetic_energy)
    }

    pub fn momentum_history(&self) -> impl Iterator<Item = NVec2> + '_ {
        self.samples.iter().map(|s| s.momentum)
    }

    /// Body-body events only
    pub fn collisions(&self) -> impl Iterator<Item = &ContactEvent> + '_ {
        self.events
            .iter()
            .filter(|e| matches!(e.contact, Contact::BodyBody))
    }

    pub fn report(&self) -> ConservationReport {
        ConservationReport::new(self.model, self.initial, self.final_sample())
    }
}

/// Buffering observer building a [`ModelRun`].
///
/// With a stride above one only every `stride`-th step is kept (plus the last
/// step), trajectory and sample entries stay paired by index. Contacts are
/// tracked on every step regardless of stride.
///
/// Analytical contacts are discrete impulses and reflections, so each one is
/// an event, even on consecutive steps. Penalty contacts persist while the
/// spring acts, so only their onset is an event.
pub struct Recorder {
    stride: usize,
    times: Vec<f64>,
    trajectories: [Trajectory; 2],
    samples: Vec<ConservationSample>,
    events: Vec<ContactEvent>,
    onsets_only: bool,
    active: Vec<Contact>,
    pending: Option<(f64, [NVec2; 2], ConservationSample)>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::with_stride(1)
    }

    pub fn with_stride(stride: usize) -> Self {
        Self {
            stride: stride.max(1),
            times: Vec::new(),
            trajectories: [Trajectory::default(), Trajectory::default()],
            samples: Vec::new(),
            events: Vec::new(),
            onsets_only: true,
            active: Vec::new(),
            pending: None,
        }
    }

    fn keep(&mut self, time: f64, positions: [NVec2; 2], sample: ConservationSample) {
        self.times.push(time);
        for (traj, p) in self.trajectories.iter_mut().zip(positions) {
            traj.push(p);
        }
        self.samples.push(sample);
    }

    /// Package what was recorded together with the run's reference sample
    /// and final state
    pub fn into_run(self, model: Model, initial: ConservationSample, final_state: System) -> ModelRun {
        ModelRun {
            model,
            times: self.times,
            trajectories: self.trajectories,
            samples: self.samples,
            initial,
            events: self.events,
            final_state,
        }
    }
}

impl Default for Recorder {
    fn default() -> Self {
        Self::new()
    }
}

impl StepObserver for Recorder {
    fn on_start(&mut self, model: Model, _initial: &ConservationSample, _sys: &System) {
        self.onsets_only = model == Model::Penalty;
    }

    fn on_step(&mut self, record: &StepRecord<'_>) {
        for c in record.contacts {
            if !(self.onsets_only && self.active.contains(c)) {
                self.events.push(ContactEvent {
                    step: record.step,
                    time: record.time,
                    contact: *c,
                });
            }
        }
        self.active.clear();
        self.active.extend_from_slice(record.contacts);

        if record.step % self.stride == 0 {
            self.keep(record.time, record.positions, record.sample);
            self.pending = None;
        } else {
            self.pending = Some((record.time, record.positions, record.sample));
        }
    }

    fn on_finish(&mut self, _sys: &System) {
        if let Some((time, positions, sample)) = self.pending.take() {
            self.keep(time, positions, sample);
        }
    }
}

/// Drives one resolver over one model's bodies
pub struct SimulationRunner<R: Resolver> {
    resolver: R,
    system: System,
    boundary: Boundary,
}

impl<R: Resolver> SimulationRunner<R> {
    /// Validate the bodies before anything runs
    pub fn new(resolver: R, system: System, boundary: Boundary) -> SimResult<Self> {
        system.validate()?;
        Ok(Self {
            resolver,
            system,
            boundary,
        })
    }

    pub fn system(&self) -> &System {
        &self.system
    }

    pub fn boundary(&self) -> &Boundary {
        &self.boundary
    }

    pub fn model(&self) -> Model {
        self.resolver.model()
    }

    /// Run to completion, buffering everything
    pub fn run(&mut self, times: &SampleTimes) -> SimResult<ModelRun> {
        self.run_strided(times, 1)
    }

    /// Run to completion keeping every `stride`-th step
    pub fn run_strided(&mut self, times: &SampleTimes, stride: usize) -> SimResult<ModelRun> {
        let mut recorder = Recorder::with_stride(stride);
        let initial = self.run_with(times, &mut recorder)?;
        Ok(recorder.into_run(self.model(), initial, self.system.clone()))
    }

    /// Run to completion, streaming one record per step to `observer`.
    /// Returns the t = 0 reference sample.
    pub fn run_with<O: StepObserver + ?Sized>(&mut self, times: &SampleTimes, observer: &mut O) -> SimResult<ConservationSample> {
        let model = self.resolver.model();
        times.validate(model.name())?;

        let initial = ConservationSample::measure(&self.system);
        observer.on_start(model, &initial, &self.system);
        info!(%model, steps = times.len(), energy = initial.kinetic_energy, "run started");

        let mut contacts = Vec::new();
        for (step, (time, dt)) in times.increments().enumerate() {
            contacts.clear();
            self.resolver.step(&mut self.system, &self.boundary, dt, &mut contacts);
            self.system.t = time;

            let record = StepRecord {
                step,
                time,
                positions: self.system.positions(),
                sample: ConservationSample::measure(&self.system),
                contacts: &contacts,
            };
            observer.on_step(&record);
        }

        observer.on_finish(&self.system);

        let last = ConservationSample::measure(&self.system);
        if self.system.is_finite() {
            info!(%model, energy = last.kinetic_energy, "run finished");
        } else {
            warn!(%model, energy = last.kinetic_energy, "run finished with non-finite state");
        }
        Ok(initial)
    }
}
