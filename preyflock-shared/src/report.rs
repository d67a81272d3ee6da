use serde::{Deserialize, Serialize};

/// Why boids left the world during a tick
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeathCounts {
    pub starved: usize,
    pub old_age: usize,
    pub eaten: usize,
}

impl DeathCounts {
    pub fn total(&self) -> usize {
        self.starved + self.old_age + self.eaten
    }
}

/// Population summary produced after each tick
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PopulationReport {
    pub tick: u64,
    pub prey: usize,
    pub predators: usize,
    pub prey_births: usize,
    pub predator_births: usize,
    pub deaths: DeathCounts,
    /// Mean food of living prey, zero when there are none.
    pub mean_prey_food: f32,
    pub mean_predator_food: f32,
    /// Predators frozen while eating at the end of the tick.
    pub predators_eating: usize,
}

impl PopulationReport {
    pub fn population(&self) -> usize {
        self.prey + self.predators
    }

    pub fn is_extinct(&self) -> bool {
        self.prey == 0 || self.predators == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_serializes_as_flat_json() {
        let report = PopulationReport {
            tick: 12,
            prey: 40,
            predators: 3,
            deaths: DeathCounts {
                starved: 1,
                old_age: 0,
                eaten: 2,
            },
            ..Default::default()
        };
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.starts_with("{\"tick\":12,\"prey\":40,\"predators\":3"));
        assert_eq!(report.deaths.total(), 3);
        assert_eq!(report.population(), 43);
        assert!(!report.is_extinct());
    }
}
