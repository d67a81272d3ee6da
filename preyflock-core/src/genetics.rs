use crate::params::BoidKind;

/// Weights for one separation/alignment/cohesion reaction
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlockConfig {
    pub separation_radius: f32,
    pub separation_weight: f32,
    pub alignment_weight: f32,
    pub cohesion_weight: f32,
}

impl FlockConfig {
    pub const fn new(
        separation_radius: f32,
        separation_weight: f32,
        alignment_weight: f32,
        cohesion_weight: f32,
    ) -> Self {
        Self {
            separation_radius,
            separation_weight,
            alignment_weight,
            cohesion_weight,
        }
    }
}

/// The flocking traits of one boid.
///
/// Offspring hold the same `Arc<Genetics>` as their parent; the steering code
/// only ever reads it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Genetics {
    /// Reaction to prey neighbors, used by prey and predators alike.
    pub prey_flocking: FlockConfig,
    /// Reaction to predator neighbors.
    pub predator_flocking: FlockConfig,
    /// Predators only: extra pull towards the single nearest prey.
    pub closest_flocking: FlockConfig,
}

impl Genetics {
    /// Herding prey that scatter away from predators.
    pub fn prey_default() -> Self {
        Self {
            prey_flocking: FlockConfig::new(15.0, 1.5, 1.0, 1.0),
            predator_flocking: FlockConfig::new(60.0, 4.0, 0.0, -1.0),
            closest_flocking: FlockConfig::new(1.0, 0.0, 0.0, 0.0),
        }
    }

    /// Predators drawn to herds, spacing out from each other.
    pub fn predator_default() -> Self {
        Self {
            prey_flocking: FlockConfig::new(5.0, 0.2, 0.2, 1.0),
            predator_flocking: FlockConfig::new(40.0, 2.0, 0.3, 0.1),
            closest_flocking: FlockConfig::new(1.0, 0.0, 0.5, 3.0),
        }
    }

    pub fn for_kind(kind: BoidKind) -> Self {
        match kind {
            BoidKind::Prey => Self::prey_default(),
            BoidKind::Predator => Self::predator_default(),
        }
    }
}
