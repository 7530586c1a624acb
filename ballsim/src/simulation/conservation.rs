//! Conservation bookkeeping
//!
//! Total kinetic energy and linear momentum of a `System` at one instant.
//! Used for the t = 0 reference and for every recorded step.

use super::states::{NVec2, System};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConservationSample {
    pub kinetic_energy: f64, // sum of 1/2 m |v|^2
    pub momentum: NVec2, // sum of m v
}

impl ConservationSample {
    /// Measure both quantities from the current state of `sys`
    pub fn measure(sys: &System) -> Self {
        let mut kinetic_energy = 0.0;
        let mut momentum = NVec2::zeros();
        for b in sys.bodies.iter() {
            kinetic_energy += b.kinetic_energy();
            momentum += b.momentum();
        }
        Self {
            kinetic_energy,
            momentum,
        }
    }
}
