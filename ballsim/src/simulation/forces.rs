//! Penalty contact forces for the spring model
//!
//! Contacts are not resolved as events here: overlap between a body and a
//! wall, or between the two bodies, produces a Hooke spring force
//! `k * overlap` pushing the shapes apart. Terms are summed by [`ForceSet`].

use crate::simulation::resolver::{Contact, Wall};
use crate::simulation::states::{Boundary, NVec2, System};

/// Collection of contact force terms
/// Each term implements [`ContactForce`] and their contributions are summed
/// into a single force vector per body
pub struct ForceSet {
    terms: Vec<Box<dyn ContactForce + Send + Sync>>,
}

impl ForceSet {
    /// Create an empty force set
    pub fn new() -> Self {
        Self {
            terms: Vec::new()
        }
    }

    /// Walls first, then body-body, each with stiffness `k`
    pub fn hooke(k: f64) -> Self {
        Self::new().with(HookeWall { k }).with(HookeBodyBody { k })
    }

    /// Add a force term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: ContactForce + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    /// Compute total forces for both bodies in `sys`
    /// - `out[i]` will be set to the sum of contributions from all terms
    /// - every active contact is pushed to `contacts`
    pub fn accumulate_forces(&self, sys: &System, boundary: &Boundary, out: &mut [NVec2; 2], contacts: &mut Vec<Contact>) {
        // Zero buffer
        for f in out.iter_mut() {
            *f = NVec2::zeros();
        }
        for term in &self.terms {
            term.force(sys, boundary, out, contacts);
        }
    }
}

impl Default for ForceSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Trait for force sources operating on [`System`]
/// Implementations add their contribution into `out[i]` for each body
pub trait ContactForce {
    fn force(&self, sys: &System, boundary: &Boundary, out: &mut [NVec2; 2], contacts: &mut Vec<Contact>);
}

/// Spring push-back from the four walls.
///
/// Each plane is tested on its own (no else-branch), so a body in a corner
/// receives one contribution per violated plane, summed per axis.
pub struct HookeWall {
    pub k: f64, // stiffness
}

impl ContactForce for HookeWall {
    fn force(&self, sys: &System, boundary: &Boundary, out: &mut [NVec2; 2], contacts: &mut Vec<Contact>) {
        for (i, b) in sys.bodies.iter().enumerate() {
            let (x, y, r) = (b.x.x, b.x.y, b.radius);
            let f = &mut out[i];

            if x - r < boundary.left() {
                f.x += self.k * (boundary.left() - (x - r));
                contacts.push(Contact::Wall { body: i, wall: Wall::Left });
            }
            if x + r > boundary.right() {
                f.x -= self.k * ((x + r) - boundary.right());
                contacts.push(Contact::Wall { body: i, wall: Wall::Right });
            }
            if y - r < boundary.bottom() {
                f.y += self.k * (boundary.bottom() - (y - r));
                contacts.push(Contact::Wall { body: i, wall: Wall::Bottom });
            }
            if y + r > boundary.top() {
                f.y -= self.k * ((y + r) - boundary.top());
                contacts.push(Contact::Wall { body: i, wall: Wall::Top });
            }
        }
    }
}

/// Spring repulsion between the two bodies
///
/// The force on body 1 is the exact negation of the force on body 0, so the
/// pair's momentum only changes through round-off.
pub struct HookeBodyBody {
    pub k: f64, // stiffness
}

impl ContactForce for HookeBodyBody {
    fn force(&self, sys: &System, _boundary: &Boundary, out: &mut [NVec2; 2], contacts: &mut Vec<Contact>) {
        let d = sys.separation();
        let reach = sys.contact_distance();
        let dist_sq = d.norm_squared();

        // coincident centers give no usable normal
        if dist_sq <= 0.0 || dist_sq >= reach * reach {
            return;
        }

        let dist = dist_sq.sqrt();
        let overlap = reach - dist;
        if overlap <= 0.0 {
            return;
        }

        let n = d / dist;
        let f = self.k * overlap * n;
        out[0] += f;
        out[1] -= f;
        contacts.push(Contact::BodyBody);
    }
}
