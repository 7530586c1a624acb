//! Model selection
//!
//! Names the two collision-resolution strategies so runs, errors and log
//! events can say which model produced them

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Model {
    Analytical, // elastic impulses resolved at the given sample times
    Penalty, // Hooke contact springs, semi-implicit Euler with fixed dt
}

impl Model {
    pub fn name(&self) -> &'static str {
        match self {
            Model::Analytical => "analytical",
            Model::Penalty => "penalty",
        }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
