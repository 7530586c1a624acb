//! Analytical (impulse) resolver
//!
//! Bodies fly freely between samples; contacts are resolved instantaneously
//! with an elastic impulse plus a positional correction, then walls reflect.
//!
//! Contact is only tested at the sample times handed to the runner. This is
//! not continuous event detection: with a large increment or a high closing
//! speed the bodies can pass through each other between two samples and the
//! contact is never seen. That behaviour is part of the model and is kept
//! as-is so the penalty model can be compared against the same reference.
//!
//! ```text
//! 1. x += v * dt                      (free flight)
//! 2. 0 < |d| < r0 + r1 and v_n < 0    (body-body impulse, split overlap)
//! 3. per body, x axis then y axis     (clamp to wall, force v inward)
//! ```

use tracing::debug;

use super::engine::Model;
use super::resolver::{Contact, Resolver, Wall};
use super::states::{Body, Boundary, System};

pub struct AnalyticalResolver {
    pub restitution: f64, // e, 1.0 is perfectly elastic
}

impl AnalyticalResolver {
    pub fn new(restitution: f64) -> Self {
        Self { restitution }
    }

    /// Perfectly elastic resolver (e = 1)
    pub fn elastic() -> Self {
        Self::new(1.0)
    }

    /// Impulse exchange between the two bodies.
    /// Returns true if an impulse was applied.
    fn resolve_pair(&self, sys: &mut System) -> bool {
        let d = sys.separation();
        let reach = sys.contact_distance();
        let dist = d.norm();

        // coincident centers have no normal, separated bodies no contact
        if !(dist > 0.0 && dist < reach) {
            return false;
        }

        let n = d / dist;
        let [b0, b1] = &mut sys.bodies;
        let v_n = (b0.v - b1.v).dot(&n);

        // already separating or sliding past each other
        if v_n >= 0.0 {
            return false;
        }

        let j = -(1.0 + self.restitution) * v_n / (1.0 / b0.m + 1.0 / b1.m);
        b0.v += (j / b0.m) * n;
        b1.v -= (j / b1.m) * n;

        let half_overlap = (reach - dist) * 0.5;
        b0.x += n * half_overlap;
        b1.x -= n * half_overlap;

        debug!(t = sys.t, v_n, impulse = j, "analytical body-body collision");
        true
    }
}

/// Clamp a body back inside the walls and point the offending velocity
/// component inward. Reflection is unconditional: it does not check whether
/// the body is still moving outward. x is resolved before y.
fn reflect_walls(body: &mut Body, index: usize, boundary: &Boundary, contacts: &mut Vec<Contact>) {
    let r = body.radius;

    if body.x.x - r < boundary.left() {
        body.x.x = boundary.left() + r;
        body.v.x = body.v.x.abs();
        contacts.push(Contact::Wall { body: index, wall: Wall::Left });
    } else if body.x.x + r > boundary.right() {
        body.x.x = boundary.right() - r;
        body.v.x = -body.v.x.abs();
        contacts.push(Contact::Wall { body: index, wall: Wall::Right });
    }

    if body.x.y - r < boundary.bottom() {
        body.x.y = boundary.bottom() + r;
        body.v.y = body.v.y.abs();
        contacts.push(Contact::Wall { body: index, wall: Wall::Bottom });
    } else if body.x.y + r > boundary.top() {
        body.x.y = boundary.top() - r;
        body.v.y = -body.v.y.abs();
        contacts.push(Contact::Wall { body: index, wall: Wall::Top });
    }
}

impl Resolver for AnalyticalResolver {
    fn model(&self) -> Model {
        Model::Analytical
    }

    fn step(&mut self, sys: &mut System, boundary: &Boundary, dt: f64, contacts: &mut Vec<Contact>) {
        for b in sys.bodies.iter_mut() {
            b.x += b.v * dt;
        }
        sys.t += dt;

        if self.resolve_pair(sys) {
            contacts.push(Contact::BodyBody);
        }

        for (i, b) in sys.bodies.iter_mut().enumerate() {
            reflect_walls(b, i, boundary, contacts);
        }
    }
}
