//! Reference world and orchestrator around `preyflock-core`.

pub mod ecosystem;
pub mod neighborhood;

pub use ecosystem::Ecosystem;
pub use neighborhood::Neighborhood;
