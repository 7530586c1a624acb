//! Derived conservation figures for an external reporter
//!
//! Drift is measured between the t = 0 reference and the final step:
//! kinetic energy as a percentage of the initial energy, momentum as the
//! Euclidean norm of the change.

use std::fmt;

use super::conservation::ConservationSample;
use super::engine::Model;
use super::states::NVec2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConservationReport {
    pub model: Model,
    pub initial: ConservationSample,
    pub last: ConservationSample,
}

impl ConservationReport {
    pub fn new(model: Model, initial: ConservationSample, last: ConservationSample) -> Self {
        Self {
            model,
            initial,
            last,
        }
    }

    /// Signed energy change, final minus initial
    pub fn energy_change(&self) -> f64 {
        self.last.kinetic_energy - self.initial.kinetic_energy
    }

    /// |E_final - E_initial| / E_initial * 100.
    /// `None` when the system started at rest.
    pub fn energy_drift_percent(&self) -> Option<f64> {
        if self.initial.kinetic_energy > 0.0 {
            Some(self.energy_change().abs() / self.initial.kinetic_energy * 100.0)
        } else {
            None
        }
    }

    pub fn momentum_change(&self) -> NVec2 {
        self.last.momentum - self.initial.momentum
    }

    /// |P_final - P_initial|
    pub fn momentum_drift(&self) -> f64 {
        self.momentum_change().norm()
    }
}

impl fmt::Display for ConservationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} model:", self.model)?;
        writeln!(f, "  initial energy: {:.6}", self.initial.kinetic_energy)?;
        writeln!(f, "  final energy:   {:.6}", self.last.kinetic_energy)?;
        match self.energy_drift_percent() {
            Some(pct) => writeln!(f, "  energy change:  {:.4}%", pct)?,
            None => writeln!(f, "  energy change:  n/a (started at rest)")?,
        }
        writeln!(
            f,
            "  initial momentum: Px={:.6}, Py={:.6}",
            self.initial.momentum.x, self.initial.momentum.y
        )?;
        writeln!(
            f,
            "  final momentum:   Px={:.6}, Py={:.6}",
            self.last.momentum.x, self.last.momentum.y
        )?;
        write!(f, "  momentum change:  {:.6}", self.momentum_drift())
    }
}
