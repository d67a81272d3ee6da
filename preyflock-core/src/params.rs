//! Per-kind constants. Prey and predators share one [`Agent`](crate::Agent)
//! type and differ only by the [`KindParams`] they are built with.

/// Which side of the food chain a boid is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum BoidKind {
    Prey,
    Predator,
}

impl BoidKind {
    pub fn is_prey(self) -> bool {
        matches!(self, BoidKind::Prey)
    }

    pub fn name(self) -> &'static str {
        match self {
            BoidKind::Prey => "prey",
            BoidKind::Predator => "predator",
        }
    }
}

/// Numeric constants fixed for every boid of one kind
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KindParams {
    /// Multiplier on [`BASE_SPEED`](crate::BASE_SPEED).
    pub speed_factor: f32,
    /// Body radius, used by the world for contact checks.
    pub radius: f32,
    pub max_force: f32,
    pub food_eaten_per_step: f32,
    pub energy_required_for_reproduction: f32,
    pub starting_food: f32,
    pub turns_to_reproduce: u32,
    /// Speed multiplier applied once per 60 ticks of age.
    pub age_factor: f32,
}

impl KindParams {
    pub fn prey() -> Self {
        Self {
            speed_factor: 1.0,
            radius: 3.0,
            max_force: 0.1,
            food_eaten_per_step: 0.1,
            energy_required_for_reproduction: 60.0,
            starting_food: 40.0,
            turns_to_reproduce: 300,
            age_factor: 0.97,
        }
    }

    pub fn predator() -> Self {
        Self {
            speed_factor: 1.25,
            radius: 5.0,
            max_force: 0.15,
            food_eaten_per_step: 0.25,
            energy_required_for_reproduction: 150.0,
            starting_food: 100.0,
            turns_to_reproduce: 600,
            age_factor: 0.95,
        }
    }

    pub fn for_kind(kind: BoidKind) -> Self {
        match kind {
            BoidKind::Prey => Self::prey(),
            BoidKind::Predator => Self::predator(),
        }
    }
}

/// Lookup table from [`BoidKind`] to its constants
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KindTable {
    pub prey: KindParams,
    pub predator: KindParams,
}

impl KindTable {
    pub fn get(&self, kind: BoidKind) -> &KindParams {
        match kind {
            BoidKind::Prey => &self.prey,
            BoidKind::Predator => &self.predator,
        }
    }
}

impl Default for KindTable {
    fn default() -> Self {
        Self {
            prey: KindParams::prey(),
            predator: KindParams::predator(),
        }
    }
}
