//! Two-phase tick: every force is computed from the same read-only snapshot
//! before any boid moves, so the outcome does not depend on iteration order.

use alloc::vec::Vec;

use rand::rngs::SmallRng;
use rand::SeedableRng;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::agent::Agent;
use crate::id::AgentId;
use crate::vector::Vector2D;
use crate::world::World;

/// Deterministic per-boid RNG for one tick.
pub fn agent_rng(seed: u64, id: AgentId) -> SmallRng {
    SmallRng::seed_from_u64(seed ^ id.0.wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// Phase one: the acceleration each boid wants, in slice order.
#[cfg(not(feature = "parallel"))]
pub fn compute_forces<W: World + ?Sized>(agents: &[Agent], world: &W, seed: u64) -> Vec<Vector2D> {
    agents
        .iter()
        .map(|agent| force_for(agent, world, seed))
        .collect()
}

/// Phase one: the acceleration each boid wants, in slice order.
#[cfg(feature = "parallel")]
pub fn compute_forces<W: World + Sync + ?Sized>(
    agents: &[Agent],
    world: &W,
    seed: u64,
) -> Vec<Vector2D> {
    agents
        .par_iter()
        .map(|agent| force_for(agent, world, seed))
        .collect()
}

fn force_for<W: World + ?Sized>(agent: &Agent, world: &W, seed: u64) -> Vector2D {
    let mut rng = agent_rng(seed, agent.id());
    agent.desired_acceleration(world, &mut rng)
}

/// Phase two: each boid applies its own force and moves.
pub fn apply_forces(agents: &mut [Agent], forces: &[Vector2D], world_radius: f32) {
    debug_assert_eq!(agents.len(), forces.len());
    for (agent, force) in agents.iter_mut().zip(forces) {
        agent.apply_acceleration(*force);
        agent.step(world_radius);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genetics::Genetics;
    use crate::id::IdGenerator;
    use crate::params::{BoidKind, KindTable};
    use alloc::sync::Arc;

    struct SliceWorld<'a> {
        radius: f32,
        agents: &'a [Agent],
    }

    impl World for SliceWorld<'_> {
        fn radius(&self) -> f32 {
            self.radius
        }

        fn neighbors(&self, agent: &Agent, want_prey: bool) -> Vec<&Agent> {
            let mut found: Vec<(f32, &Agent)> = self
                .agents
                .iter()
                .filter(|other| other.id() != agent.id() && other.is_prey() == want_prey)
                .map(|other| (agent.position.distance(&other.position, self.radius), other))
                .collect();
            found.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.id().cmp(&b.1.id())));
            found.into_iter().map(|(_, other)| other).collect()
        }
    }

    fn population() -> Vec<Agent> {
        let table = KindTable::default();
        let mut ids = IdGenerator::new();
        let mut rng = SmallRng::seed_from_u64(9);
        (0..30)
            .map(|i| {
                let kind = if i % 6 == 0 {
                    BoidKind::Predator
                } else {
                    BoidKind::Prey
                };
                Agent::random(
                    ids.allocate(),
                    kind,
                    *table.get(kind),
                    Arc::new(Genetics::for_kind(kind)),
                    120.0,
                    &mut rng,
                )
            })
            .collect()
    }

    #[test]
    fn test_forces_independent_of_order() {
        let agents = population();
        let mut reversed = agents.clone();
        reversed.reverse();

        let forward = compute_forces(&agents, &SliceWorld { radius: 120.0, agents: &agents }, 5);
        let backward =
            compute_forces(&reversed, &SliceWorld { radius: 120.0, agents: &reversed }, 5);

        for (agent, force) in agents.iter().zip(&forward) {
            let index = reversed.iter().position(|a| a.id() == agent.id()).unwrap();
            assert_eq!(*force, backward[index]);
        }
    }

    #[test]
    fn test_apply_forces_moves_everyone_once() {
        let mut agents = population();
        let forces = compute_forces(&agents, &SliceWorld { radius: 120.0, agents: &agents }, 1);

        apply_forces(&mut agents, &forces, 120.0);

        for agent in &agents {
            assert_eq!(agent.age, 1);
            assert!(agent.position.norm() <= 120.0 + 1e-3);
        }
    }

    #[test]
    fn test_eating_predator_gets_zero_force() {
        let mut agents = population();
        let hunter = agents.iter().position(|a| !a.is_prey()).unwrap();
        agents[hunter].start_eating(2);

        let forces = compute_forces(&agents, &SliceWorld { radius: 120.0, agents: &agents }, 3);
        assert_eq!(forces[hunter], Vector2D::zero());

        apply_forces(&mut agents, &forces, 120.0);
        assert_eq!(agents[hunter].busy_eating(), 1);
        assert_eq!(agents[hunter].velocity(), Vector2D::zero());
    }
}
