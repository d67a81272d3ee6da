use preyflock_core::{Agent, World};

/// Brute-force [`World`] over a snapshot of the population.
pub struct Neighborhood<'a> {
    agents: &'a [Agent],
    radius: f32,
    vision_radius: f32,
}

impl<'a> Neighborhood<'a> {
    pub fn new(agents: &'a [Agent], radius: f32, vision_radius: f32) -> Self {
        Self {
            agents,
            radius,
            vision_radius,
        }
    }
}

impl World for Neighborhood<'_> {
    fn radius(&self) -> f32 {
        self.radius
    }

    fn neighbors(&self, agent: &Agent, want_prey: bool) -> Vec<&Agent> {
        let mut found: Vec<(f32, &Agent)> = self
            .agents
            .iter()
            .filter(|other| other.id() != agent.id() && other.is_prey() == want_prey)
            .map(|other| (agent.position.distance(&other.position, self.radius), other))
            .filter(|(d, _)| *d <= self.vision_radius)
            .collect();
        // ties go to the older boid so the order is stable
        found.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.id().cmp(&b.1.id())));
        found.into_iter().map(|(_, other)| other).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use preyflock_core::{AgentId, BoidKind, Genetics, KindParams, Vector2D};
    use std::sync::Arc;

    fn boid(id: u64, kind: BoidKind, x: f32, y: f32) -> Agent {
        Agent::new(
            AgentId(id),
            kind,
            KindParams::for_kind(kind),
            Vector2D::new(x, y),
            Vector2D::zero(),
            Arc::new(Genetics::for_kind(kind)),
        )
    }

    fn ids(found: &[&Agent]) -> Vec<u64> {
        found.iter().map(|a| a.id().0).collect()
    }

    #[test]
    fn test_neighbors_sorted_and_filtered() {
        let agents = vec![
            boid(0, BoidKind::Prey, 0.0, 0.0),
            boid(1, BoidKind::Prey, 30.0, 0.0),
            boid(2, BoidKind::Prey, 10.0, 0.0),
            boid(3, BoidKind::Predator, 5.0, 0.0),
            boid(4, BoidKind::Prey, 0.0, 90.0),
        ];
        let world = Neighborhood::new(&agents, 200.0, 50.0);

        assert_eq!(ids(&world.neighbors(&agents[0], true)), vec![2, 1]);
        assert_eq!(ids(&world.neighbors(&agents[0], false)), vec![3]);
        assert_eq!(world.radius(), 200.0);
    }

    #[test]
    fn test_neighbors_excludes_self() {
        let agents = vec![boid(7, BoidKind::Predator, 1.0, 1.0)];
        let world = Neighborhood::new(&agents, 200.0, 50.0);
        assert!(world.neighbors(&agents[0], false).is_empty());
    }

    #[test]
    fn test_neighbors_seen_across_boundary() {
        let agents = vec![
            boid(0, BoidKind::Prey, 0.0, 98.0),
            boid(1, BoidKind::Prey, 0.0, -98.0),
        ];
        let world = Neighborhood::new(&agents, 100.0, 10.0);
        assert_eq!(ids(&world.neighbors(&agents[0], true)), vec![1]);
    }

    #[test]
    fn test_equal_distances_ordered_by_id() {
        let agents = vec![
            boid(0, BoidKind::Predator, 0.0, 0.0),
            boid(9, BoidKind::Prey, -10.0, 0.0),
            boid(4, BoidKind::Prey, 10.0, 0.0),
        ];
        let world = Neighborhood::new(&agents, 200.0, 50.0);
        assert_eq!(ids(&world.neighbors(&agents[0], true)), vec![4, 9]);
    }
}
