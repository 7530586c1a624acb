//! Numerical and physical parameters for a run
//!
//! `Parameters` holds:
//! - the fixed step `dt` and duration `t_end` of the penalty model,
//! - the spring stiffness `k` and the restitution `e` of the impulse model,
//! - how many sample times the analytical model is evaluated at
//!
//! `SampleTimes` is the strictly increasing time grid a runner walks.

use crate::error::{SimError, SimResult};

// relative slack on t_end / dt before truncating
const STEP_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub t_end: f64, // total simulated time
    pub dt: f64, // penalty model step size
    pub stiffness: f64, // Hooke constant k
    pub restitution: f64, // e for the impulse model
    pub analytical_samples: usize, // points of the analytical time grid
}

impl Parameters {
    /// Elastic parameters, analytical grid as dense as the penalty steps
    pub fn new(t_end: f64, dt: f64, stiffness: f64) -> Self {
        let mut p = Self {
            t_end,
            dt,
            stiffness,
            restitution: 1.0,
            analytical_samples: 0,
        };
        p.analytical_samples = p.steps();
        p
    }

    /// Parameters for exactly `steps` steps of `dt`
    pub fn from_steps(dt: f64, steps: usize, stiffness: f64) -> Self {
        Self::new(dt * steps as f64, dt, stiffness)
    }

    pub fn with_restitution(mut self, restitution: f64) -> Self {
        self.restitution = restitution;
        self
    }

    pub fn with_analytical_samples(mut self, samples: usize) -> Self {
        self.analytical_samples = samples;
        self
    }

    /// Number of penalty steps, t_end / dt truncated so the run never goes
    /// past `t_end`. A ratio within round-off of an integer counts as that
    /// integer (2.0 / 1e-6 is 2_000_000 steps, not 1_999_999).
    pub fn steps(&self) -> usize {
        if self.dt > 0.0 && self.t_end.is_finite() {
            let ratio = self.t_end / self.dt;
            (ratio + STEP_TOLERANCE * ratio.max(1.0)).floor().max(0.0) as usize
        } else {
            0
        }
    }

    pub fn validate(&self) -> SimResult<()> {
        let positive = |name: &'static str, value: f64| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(SimError::InvalidParameter { name, value })
            }
        };

        positive("dt", self.dt)?;
        positive("t_end", self.t_end)?;
        positive("stiffness", self.stiffness)?;

        if !(0.0..=1.0).contains(&self.restitution) {
            return Err(SimError::InvalidParameter {
                name: "restitution",
                value: self.restitution,
            });
        }
        if self.steps() == 0 {
            return Err(SimError::InvalidParameter {
                name: "steps",
                value: 0.0,
            });
        }
        if self.analytical_samples == 0 {
            return Err(SimError::InvalidParameter {
                name: "analytical_samples",
                value: 0.0,
            });
        }
        Ok(())
    }
}

/// Monotonically increasing sample times a runner walks, starting from t = 0.
///
/// - `Uniform` steps by exactly `dt` every time (the penalty model)
/// - `Explicit` steps by `times[i] - times[i - 1]`; the first increment is
///   `times[0]` itself and may be zero (the analytical model)
#[derive(Debug, Clone, PartialEq)]
pub enum SampleTimes {
    Uniform { dt: f64, steps: usize },
    Explicit(Vec<f64>),
}

impl SampleTimes {
    /// `steps` increments of exactly `dt`
    pub fn uniform(dt: f64, steps: usize) -> Self {
        Self::Uniform { dt, steps }
    }

    /// `n` evenly spaced points from `start` to `end` inclusive; the last
    /// point is exactly `end`
    pub fn linspace(start: f64, end: f64, n: usize) -> Self {
        match n {
            0 => Self::Explicit(Vec::new()),
            1 => Self::Explicit(vec![start]),
            _ => {
                let step = (end - start) / (n - 1) as f64;
                let mut times: Vec<f64> = (0..n).map(|i| start + i as f64 * step).collect();
                times[n - 1] = end;
                Self::Explicit(times)
            }
        }
    }

    pub fn from_vec(times: Vec<f64>) -> Self {
        Self::Explicit(times)
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Uniform { steps, .. } => *steps,
            Self::Explicit(times) => times.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `(time, increment)` for every step, in order
    pub fn increments(&self) -> Box<dyn Iterator<Item = (f64, f64)> + '_> {
        match self {
            Self::Uniform { dt, steps } => {
                let dt = *dt;
                Box::new((1..=*steps).map(move |i| (i as f64 * dt, dt)))
            }
            Self::Explicit(times) => Box::new(times.iter().scan(0.0, |prev, &t| {
                let dt = t - *prev;
                *prev = t;
                Some((t, dt))
            })),
        }
    }

    /// Check the grid is non-empty, starts at or after zero and strictly
    /// increases. `model` names the run in the error.
    pub fn validate(&self, model: &'static str) -> SimResult<()> {
        let fail = |step: usize, reason: String| {
            Err(SimError::InvalidSampleTimes { model, step, reason })
        };

        match self {
            Self::Uniform { dt, steps } => {
                if *steps == 0 {
                    return fail(0, "no sample times".to_string());
                }
                if !(dt.is_finite() && *dt > 0.0) {
                    return fail(0, format!("step size must be positive and finite, got {dt}"));
                }
            }
            Self::Explicit(times) => {
                let Some(&first) = times.first() else {
                    return fail(0, "no sample times".to_string());
                };
                if !(first.is_finite() && first >= 0.0) {
                    return fail(0, format!("first time must be finite and >= 0, got {first}"));
                }
                for (i, w) in times.windows(2).enumerate() {
                    if !(w[1].is_finite() && w[1] > w[0]) {
                        return fail(i + 1, format!("time {} does not follow {}", w[1], w[0]));
                    }
                }
            }
        }
        Ok(())
    }
}
