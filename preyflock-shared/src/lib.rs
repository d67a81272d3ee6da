//! Settings file shape and report messages shared by the simulation library
//! and the `preyflock` binary.

mod report;
mod settings;

pub use report::{DeathCounts, PopulationReport};
pub use settings::{
    EcosystemSettings, FounderGenetics, PredationSettings, SettingsError, WorldSettings,
};
