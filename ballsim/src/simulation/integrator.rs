//! Fixed-step time integrator for the penalty model
//!
//! Semi-implicit (symplectic) Euler driven by a `ForceSet`: velocities are
//! kicked first, then positions drift with the new velocities. The order is
//! part of the model's numerical behaviour and must not be swapped.

use super::forces::ForceSet;
use super::resolver::Contact;
use super::states::{Boundary, NVec2, System};

/// Advance `sys` by one step of size `dt`
/// Uses one force evaluation and updates positions, velocities and `sys.t`
/// in-place. Contacts that produced a force are pushed to `contacts`.
pub fn semi_implicit_euler(sys: &mut System, boundary: &Boundary, forces: &ForceSet, dt: f64, contacts: &mut Vec<Contact>) {
    // F_n from x_n
    let mut f_old = [NVec2::zeros(); 2];
    forces.accumulate_forces(sys, boundary, &mut f_old, contacts);

    // Kick: v_n+1 = v_n + dt * F_n / m
    for (b, f) in sys.bodies.iter_mut().zip(f_old.iter()) {
        let a = *f / b.m;
        b.v += a * dt;
    }

    // Drift: x_n+1 = x_n + dt * v_n+1
    for b in sys.bodies.iter_mut() {
        b.x += b.v * dt;
    }

    sys.t += dt;
}
