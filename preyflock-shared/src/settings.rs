use std::path::{Path, PathBuf};

use preyflock_core::{
    BoidKind, FlockConfig, Genetics, KindParams, KindTable, AGE_STEP_TICKS, BASE_SPEED,
    BOUNDARY_BAND,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from loading or validating [`EcosystemSettings`].
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: String, reason: String },
}

impl SettingsError {
    fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// The circular world and its population
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WorldSettings {
    /// Radius of the disc.
    pub radius: f32,
    pub initial_prey: usize,
    pub initial_predators: usize,
    /// How far a boid sees when the world collects its neighbors.
    pub vision_radius: f32,
    /// Births stop while the population is at this size.
    pub max_population: usize,
    /// Boids older than this many ticks die.
    pub max_age: u32,
    /// Food every prey grazes per tick.
    pub graze_per_tick: f32,
    /// RNG seed; the same seed replays the same run.
    pub seed: u64,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            radius: 400.0,
            initial_prey: 120,
            initial_predators: 8,
            vision_radius: 80.0,
            max_population: 600,
            max_age: 3000,
            graze_per_tick: 0.2,
            seed: 0,
        }
    }
}

/// How predators catch and digest prey
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PredationSettings {
    /// Added to the two body radii to get the catch distance.
    pub catch_slack: f32,
    /// Ticks a predator stays frozen after a kill.
    pub eating_ticks: u32,
    pub food_per_kill: f32,
}

impl Default for PredationSettings {
    fn default() -> Self {
        Self {
            catch_slack: 1.0,
            eating_ticks: 30,
            food_per_kill: 40.0,
        }
    }
}

/// Genetics given to the boids present at the start of a run
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct FounderGenetics {
    pub prey: Genetics,
    pub predator: Genetics,
}

impl FounderGenetics {
    pub fn get(&self, kind: BoidKind) -> &Genetics {
        match kind {
            BoidKind::Prey => &self.prey,
            BoidKind::Predator => &self.predator,
        }
    }
}

impl Default for FounderGenetics {
    fn default() -> Self {
        Self {
            prey: Genetics::prey_default(),
            predator: Genetics::predator_default(),
        }
    }
}

/// Everything needed to start an ecosystem run.
///
/// Every section is optional in the JSON file; missing sections keep their
/// defaults. Inside `kinds` and `genetics` each entry must be complete.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EcosystemSettings {
    pub world: WorldSettings,
    pub predation: PredationSettings,
    pub kinds: KindTable,
    pub genetics: FounderGenetics,
}

impl EcosystemSettings {
    pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn to_json_pretty(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let world = &self.world;
        if !(world.radius.is_finite() && world.radius > 2.0 * BOUNDARY_BAND) {
            return Err(SettingsError::invalid(
                "world.radius",
                format!("must be finite and larger than {}", 2.0 * BOUNDARY_BAND),
            ));
        }
        if !(world.vision_radius.is_finite() && world.vision_radius > 0.0) {
            return Err(SettingsError::invalid("world.vision_radius", "must be positive"));
        }
        if world.max_population == 0 {
            return Err(SettingsError::invalid("world.max_population", "must be at least 1"));
        }
        if !world.graze_per_tick.is_finite() {
            return Err(SettingsError::invalid("world.graze_per_tick", "must be finite"));
        }

        let predation = &self.predation;
        if !(predation.catch_slack.is_finite() && predation.catch_slack >= 0.0) {
            return Err(SettingsError::invalid(
                "predation.catch_slack",
                "must be zero or positive",
            ));
        }
        if !(predation.food_per_kill.is_finite() && predation.food_per_kill >= 0.0) {
            return Err(SettingsError::invalid(
                "predation.food_per_kill",
                "must be zero or positive",
            ));
        }

        for kind in [BoidKind::Prey, BoidKind::Predator] {
            validate_kind(kind, self.kinds.get(kind), world.max_age)?;
            validate_genetics(kind, self.genetics.get(kind))?;
        }
        Ok(())
    }
}

fn validate_kind(kind: BoidKind, params: &KindParams, max_age: u32) -> Result<(), SettingsError> {
    let field = |name: &str| format!("kinds.{}.{}", kind.name(), name);
    let floats = [
        ("speed_factor", params.speed_factor),
        ("radius", params.radius),
        ("max_force", params.max_force),
        ("food_eaten_per_step", params.food_eaten_per_step),
        (
            "energy_required_for_reproduction",
            params.energy_required_for_reproduction,
        ),
        ("starting_food", params.starting_food),
        ("age_factor", params.age_factor),
    ];
    for (name, value) in floats {
        if !value.is_finite() {
            return Err(SettingsError::invalid(field(name), "must be finite"));
        }
    }
    if params.speed_factor <= 0.0 {
        return Err(SettingsError::invalid(field("speed_factor"), "must be positive"));
    }
    if params.age_factor <= 0.0 {
        return Err(SettingsError::invalid(field("age_factor"), "must be positive"));
    }
    // speed keeps compounding by age_factor until the boid dies of old age
    let age_steps = (max_age as f32 / AGE_STEP_TICKS).round() as i32;
    let oldest_speed = params.speed_factor * BASE_SPEED * params.age_factor.powi(age_steps);
    if !oldest_speed.is_finite() {
        return Err(SettingsError::invalid(
            field("age_factor"),
            format!("speed overflows before world.max_age ({max_age})"),
        ));
    }
    if params.radius < 0.0 || params.max_force < 0.0 {
        return Err(SettingsError::invalid(
            field("radius/max_force"),
            "must not be negative",
        ));
    }
    Ok(())
}

fn validate_genetics(kind: BoidKind, genetics: &Genetics) -> Result<(), SettingsError> {
    let configs: [(&str, &FlockConfig); 3] = [
        ("prey_flocking", &genetics.prey_flocking),
        ("predator_flocking", &genetics.predator_flocking),
        ("closest_flocking", &genetics.closest_flocking),
    ];
    for (name, config) in configs {
        let field = format!("genetics.{}.{}", kind.name(), name);
        if !(config.separation_radius.is_finite() && config.separation_radius > 0.0) {
            return Err(SettingsError::invalid(
                format!("{field}.separation_radius"),
                "must be positive",
            ));
        }
        let weights = [
            config.separation_weight,
            config.alignment_weight,
            config.cohesion_weight,
        ];
        if weights.iter().any(|w| !w.is_finite()) {
            return Err(SettingsError::invalid(field, "weights must be finite"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        EcosystemSettings::default().validate().unwrap();
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings =
            EcosystemSettings::from_json_str(r#"{ "world": { "radius": 250.0, "seed": 7 } }"#)
                .unwrap();
        assert_eq!(settings.world.radius, 250.0);
        assert_eq!(settings.world.seed, 7);
        assert_eq!(settings.world.initial_prey, WorldSettings::default().initial_prey);
        assert_eq!(settings.kinds, KindTable::default());
        assert_eq!(settings.predation, PredationSettings::default());
    }

    #[test]
    fn test_json_round_trip() {
        let mut settings = EcosystemSettings::default();
        settings.kinds.predator.max_force = 0.3;
        let json = settings.to_json_pretty().unwrap();
        assert!(json.contains("\"predator_flocking\""));
        assert_eq!(EcosystemSettings::from_json_str(&json).unwrap(), settings);
    }

    #[test]
    fn test_rejects_tiny_world() {
        let mut settings = EcosystemSettings::default();
        settings.world.radius = 30.0;
        let err = settings.validate().unwrap_err();
        assert!(matches!(err, SettingsError::Invalid { ref field, .. } if field == "world.radius"));
    }

    #[test]
    fn test_rejects_zero_separation_radius() {
        let mut settings = EcosystemSettings::default();
        settings.genetics.predator.closest_flocking.separation_radius = 0.0;
        let err = settings.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid setting `genetics.predator.closest_flocking.separation_radius`: must be positive"
        );
    }

    #[test]
    fn test_rejects_non_positive_speed() {
        let mut settings = EcosystemSettings::default();
        settings.kinds.prey.speed_factor = 0.0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_rejects_speed_growing_past_f32() {
        let mut settings = EcosystemSettings::default();
        settings.kinds.prey.age_factor = 10.0;
        settings.world.max_age = 5000;
        let err = settings.validate().unwrap_err();
        assert!(
            matches!(err, SettingsError::Invalid { ref field, .. } if field == "kinds.prey.age_factor")
        );

        settings.world.max_age = 600;
        settings.validate().unwrap();
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = EcosystemSettings::from_json_str("{ world: ").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = EcosystemSettings::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, SettingsError::Io { .. }));
    }
}
