//! Penalty (spring-contact) resolver
//!
//! Overlap is allowed to exist and is pushed out by Hooke forces over many
//! small steps. Nothing is clamped. For explicit integration to stay stable
//! `dt` has to be well below `2 / omega` with `omega ~ sqrt(k / m)`; beyond
//! that energy diverges, which shows up in the conservation samples.

use super::engine::Model;
use super::forces::ForceSet;
use super::integrator::semi_implicit_euler;
use super::resolver::{Contact, Resolver};
use super::states::{Boundary, System};

pub struct PenaltyResolver {
    pub stiffness: f64, // k, force per unit overlap
    forces: ForceSet,
}

impl PenaltyResolver {
    pub fn new(stiffness: f64) -> Self {
        Self {
            stiffness,
            forces: ForceSet::hooke(stiffness),
        }
    }
}

impl Resolver for PenaltyResolver {
    fn model(&self) -> Model {
        Model::Penalty
    }

    fn step(&mut self, sys: &mut System, boundary: &Boundary, dt: f64, contacts: &mut Vec<Contact>) {
        semi_implicit_euler(sys, boundary, &self.forces, dt, contacts);
    }
}
