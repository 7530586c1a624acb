//! Core state types for the two-body simulation.
//!
//! - `Body`     one circular body, position/velocity as `NVec2`
//! - `System`   the two bodies owned by one model run, plus the current time
//! - `Boundary` the axis-aligned walls, fixed once constructed

use nalgebra::Vector2;

use crate::error::{SimError, SimResult};

pub type NVec2 = Vector2<f64>;

#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub x: NVec2, // position
    pub v: NVec2, // velocity
    pub m: f64, // mass
    pub radius: f64, // radius
}

impl Body {
    pub fn new(x: NVec2, v: NVec2, m: f64, radius: f64) -> Self {
        Self { x, v, m, radius }
    }

    /// Body whose velocity is given as a speed and a heading in degrees
    /// measured counter-clockwise from +x
    pub fn with_heading(x: NVec2, speed: f64, angle_deg: f64, m: f64, radius: f64) -> Self {
        let angle = angle_deg.to_radians();
        Self::new(x, NVec2::new(speed * angle.cos(), speed * angle.sin()), m, radius)
    }

    /// Translational kinetic energy 1/2 m |v|^2
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.m * self.v.norm_squared()
    }

    /// Linear momentum m v
    pub fn momentum(&self) -> NVec2 {
        self.m * self.v
    }

    /// Check mass and radius are strictly positive and the state is finite.
    /// `index` is reported back in the error.
    pub fn validate(&self, index: usize) -> SimResult<()> {
        let fail = |reason: String| Err(SimError::InvalidBody { index, reason });

        if !(self.m.is_finite() && self.m > 0.0) {
            return fail(format!("mass must be positive and finite, got {}", self.m));
        }
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return fail(format!("radius must be positive and finite, got {}", self.radius));
        }
        if !(self.x.x.is_finite() && self.x.y.is_finite()) {
            return fail(format!("position must be finite, got ({}, {})", self.x.x, self.x.y));
        }
        if !(self.v.x.is_finite() && self.v.y.is_finite()) {
            return fail(format!("velocity must be finite, got ({}, {})", self.v.x, self.v.y));
        }
        Ok(())
    }
}

/// The two bodies of one model and the time reached so far
#[derive(Debug, Clone, PartialEq)]
pub struct System {
    pub bodies: [Body; 2], // the pair, index 0 and 1
    pub t: f64, // time
}

impl System {
    pub fn new(first: Body, second: Body) -> Self {
        Self {
            bodies: [first, second],
            t: 0.0,
        }
    }

    pub fn validate(&self) -> SimResult<()> {
        for (i, b) in self.bodies.iter().enumerate() {
            b.validate(i)?;
        }
        Ok(())
    }

    /// Center separation vector x0 - x1
    pub fn separation(&self) -> NVec2 {
        self.bodies[0].x - self.bodies[1].x
    }

    /// Distance at which the two circles touch
    pub fn contact_distance(&self) -> f64 {
        self.bodies[0].radius + self.bodies[1].radius
    }

    pub fn positions(&self) -> [NVec2; 2] {
        [self.bodies[0].x, self.bodies[1].x]
    }

    pub fn is_finite(&self) -> bool {
        self.bodies
            .iter()
            .all(|b| b.x.iter().chain(b.v.iter()).all(|c| c.is_finite()))
    }
}

/// Axis-aligned rectangular confinement.
///
/// Fields are private so the walls cannot move once a run has started.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boundary {
    left: f64,
    right: f64,
    bottom: f64,
    top: f64,
}

impl Boundary {
    pub fn new(left: f64, right: f64, bottom: f64, top: f64) -> SimResult<Self> {
        let finite = [left, right, bottom, top].iter().all(|c| c.is_finite());
        if !finite || left >= right || bottom >= top {
            return Err(SimError::InvalidBoundary {
                left,
                right,
                bottom,
                top,
            });
        }
        Ok(Self {
            left,
            right,
            bottom,
            top,
        })
    }

    /// Square box [-half, half] on both axes
    pub fn centered_square(half: f64) -> SimResult<Self> {
        Self::new(-half, half, -half, half)
    }

    pub fn left(&self) -> f64 {
        self.left
    }

    pub fn right(&self) -> f64 {
        self.right
    }

    pub fn bottom(&self) -> f64 {
        self.bottom
    }

    pub fn top(&self) -> f64 {
        self.top
    }
}
