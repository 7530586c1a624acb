pub mod states;
pub mod params;
pub mod engine;
pub mod conservation;
pub mod resolver;
pub mod forces;
pub mod integrator;
pub mod analytical;
pub mod penalty;
pub mod runner;
pub mod report;
pub mod scenario;
