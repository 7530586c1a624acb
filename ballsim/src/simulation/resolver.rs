//! The "advance a two-body system by one increment" capability
//!
//! Both collision strategies implement [`Resolver`]; the runner loop is
//! written once against the trait. A resolver reports every contact it acted
//! on during the step into a caller-owned buffer.

use super::engine::Model;
use super::states::{Boundary, System};

/// One of the four boundary planes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Wall {
    Left,
    Right,
    Bottom,
    Top,
}

/// A contact acted on during one step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Contact {
    /// The two bodies: an impulse (analytical) or a spring force (penalty)
    BodyBody,
    /// Body `body` against `wall`: a reflection or a spring force
    Wall { body: usize, wall: Wall },
}

/// Trait for collision strategies operating on a [`System`]
///
/// `step` must advance `sys.t` by `dt` and push the contacts it resolved
/// into `contacts` (the buffer arrives empty).
pub trait Resolver {
    fn model(&self) -> Model;

    fn step(&mut self, sys: &mut System, boundary: &Boundary, dt: f64, contacts: &mut Vec<Contact>);
}
