use std::sync::Arc;

use preyflock_core::{
    apply_forces, compute_forces, Agent, AgentId, BoidKind, Genetics, IdGenerator, Vector2D,
    BASE_SPEED,
};
use preyflock_shared::{DeathCounts, EcosystemSettings, PopulationReport, SettingsError};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::neighborhood::Neighborhood;

/// A population of prey and predators plus the rules that feed, kill, cull
/// and breed them between steering updates.
pub struct Ecosystem {
    settings: EcosystemSettings,
    agents: Vec<Agent>,
    ids: IdGenerator,
    rng: SmallRng,
    prey_genetics: Arc<Genetics>,
    predator_genetics: Arc<Genetics>,
    tick: u64,
}

impl Ecosystem {
    /// Validates `settings` and scatters the initial population.
    pub fn new(settings: EcosystemSettings) -> Result<Self, SettingsError> {
        let mut ecosystem = Self::empty(settings)?;
        let world = ecosystem.settings.world.clone();
        for _ in 0..world.initial_prey {
            ecosystem.spawn_random(BoidKind::Prey);
        }
        for _ in 0..world.initial_predators {
            ecosystem.spawn_random(BoidKind::Predator);
        }
        log::info!(
            "Ecosystem ready: {} prey, {} predators, radius {}",
            world.initial_prey,
            world.initial_predators,
            world.radius
        );
        Ok(ecosystem)
    }

    /// Validates `settings` without spawning anyone.
    pub fn empty(settings: EcosystemSettings) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(Self {
            rng: SmallRng::seed_from_u64(settings.world.seed),
            prey_genetics: Arc::new(settings.genetics.prey),
            predator_genetics: Arc::new(settings.genetics.predator),
            settings,
            agents: Vec::new(),
            ids: IdGenerator::new(),
            tick: 0,
        })
    }

    pub fn settings(&self) -> &EcosystemSettings {
        &self.settings
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.iter().find(|a| a.id() == id)
    }

    pub fn agent_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.agents.iter_mut().find(|a| a.id() == id)
    }

    pub fn count(&self, kind: BoidKind) -> usize {
        self.agents.iter().filter(|a| a.kind() == kind).count()
    }

    /// Ticks completed so far.
    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    /// Adds a founder of `kind` at a fixed spot.
    pub fn spawn(&mut self, kind: BoidKind, position: Vector2D, velocity: Vector2D) -> AgentId {
        let id = self.ids.allocate();
        let agent = Agent::new(
            id,
            kind,
            *self.settings.kinds.get(kind),
            position,
            velocity,
            self.founder_genetics(kind),
        );
        self.agents.push(agent);
        id
    }

    fn spawn_random(&mut self, kind: BoidKind) -> AgentId {
        let id = self.ids.allocate();
        let agent = Agent::random(
            id,
            kind,
            *self.settings.kinds.get(kind),
            self.founder_genetics(kind),
            self.settings.world.radius,
            &mut self.rng,
        );
        self.agents.push(agent);
        id
    }

    fn founder_genetics(&self, kind: BoidKind) -> Arc<Genetics> {
        match kind {
            BoidKind::Prey => Arc::clone(&self.prey_genetics),
            BoidKind::Predator => Arc::clone(&self.predator_genetics),
        }
    }

    /// Runs one full tick and reports the resulting population.
    pub fn tick(&mut self) -> PopulationReport {
        let radius = self.settings.world.radius;
        let seed = self.rng.gen::<u64>();

        let forces = {
            let world = Neighborhood::new(&self.agents, radius, self.settings.world.vision_radius);
            compute_forces(&self.agents, &world, seed)
        };
        apply_forces(&mut self.agents, &forces, radius);

        self.metabolize();
        let eaten = self.hunt();
        let (starved, old_age) = self.cull();
        let (prey_births, predator_births) = self.reproduce();
        self.tick += 1;

        let report = self.report(
            DeathCounts {
                starved,
                old_age,
                eaten,
            },
            prey_births,
            predator_births,
        );
        log::trace!("tick {}: {:?}", report.tick, report);
        report
    }

    fn metabolize(&mut self) {
        let graze = self.settings.world.graze_per_tick;
        for agent in &mut self.agents {
            let cost = agent.params().food_eaten_per_step;
            agent.gain_food(-cost);
            if agent.is_prey() {
                agent.gain_food(graze);
            }
        }
    }

    /// Each hunting predator takes the nearest prey in reach. Returns kills.
    fn hunt(&mut self) -> usize {
        let radius = self.settings.world.radius;
        let predation = self.settings.predation.clone();
        let mut eaten = vec![false; self.agents.len()];
        let mut kills = 0;

        for hunter in 0..self.agents.len() {
            let predator = &self.agents[hunter];
            if predator.is_prey() || predator.busy_eating() > 0 {
                continue;
            }
            let victim = self
                .agents
                .iter()
                .enumerate()
                .filter(|(i, prey)| prey.is_prey() && !eaten[*i])
                .map(|(i, prey)| {
                    let d = predator.position.distance(&prey.position, radius);
                    (i, d, predator.radius() + prey.radius() + predation.catch_slack)
                })
                .filter(|(_, d, reach)| d <= reach)
                .min_by(|a, b| a.1.total_cmp(&b.1));

            if let Some((victim, _, _)) = victim {
                eaten[victim] = true;
                kills += 1;
                log::debug!(
                    "predator {} caught prey {}",
                    self.agents[hunter].id(),
                    self.agents[victim].id()
                );
                let predator = &mut self.agents[hunter];
                predator.gain_food(predation.food_per_kill);
                predator.start_eating(predation.eating_ticks);
            }
        }

        if kills > 0 {
            let mut index = 0;
            self.agents.retain(|_| {
                let keep = !eaten[index];
                index += 1;
                keep
            });
        }
        kills
    }

    /// Removes starved and overaged boids. Returns `(starved, old_age)`.
    fn cull(&mut self) -> (usize, usize) {
        let max_age = self.settings.world.max_age;
        let mut starved = 0;
        let mut old_age = 0;
        self.agents.retain(|agent| {
            if agent.food < 0.0 {
                starved += 1;
                false
            } else if agent.age > max_age {
                old_age += 1;
                false
            } else {
                true
            }
        });
        if starved + old_age > 0 {
            log::debug!("culled {} starved, {} old", starved, old_age);
        }
        (starved, old_age)
    }

    /// Asks every boid once whether it can breed. Each parent splits its food
    /// with one child that shares its genetics. Returns `(prey, predators)`
    /// born.
    fn reproduce(&mut self) -> (usize, usize) {
        let cap = self.settings.world.max_population;
        let population = self.agents.len();
        let mut offspring = Vec::new();

        for parent in self.agents.iter_mut() {
            if !parent.can_reproduce() || population + offspring.len() >= cap {
                continue;
            }
            let share = parent.food / 2.0;
            parent.gain_food(-share);
            parent.reset_reproduction_clock();

            // newborns start at age zero, so their cap is the unaged base speed
            let base_speed = parent.params().speed_factor * BASE_SPEED;
            let speed = self.rng.gen_range(0.0..=base_speed);
            let velocity = Vector2D::random(speed, &mut self.rng);
            let mut child = Agent::new(
                self.ids.allocate(),
                parent.kind(),
                *parent.params(),
                parent.position,
                velocity,
                Arc::clone(parent.genetics()),
            );
            child.food = share;
            log::debug!("{} {} born to {}", child.kind().name(), child.id(), parent.id());
            offspring.push(child);
        }

        let prey = offspring.iter().filter(|a| a.is_prey()).count();
        let predators = offspring.len() - prey;
        self.agents.extend(offspring);
        (prey, predators)
    }

    fn report(
        &self,
        deaths: DeathCounts,
        prey_births: usize,
        predator_births: usize,
    ) -> PopulationReport {
        let mut prey = 0;
        let mut predators = 0;
        let mut prey_food = 0.0;
        let mut predator_food = 0.0;
        let mut predators_eating = 0;
        for agent in &self.agents {
            if agent.is_prey() {
                prey += 1;
                prey_food += agent.food;
            } else {
                predators += 1;
                predator_food += agent.food;
                if agent.busy_eating() > 0 {
                    predators_eating += 1;
                }
            }
        }

        PopulationReport {
            tick: self.tick,
            prey,
            predators,
            prey_births,
            predator_births,
            deaths,
            mean_prey_food: mean(prey_food, prey),
            mean_predator_food: mean(predator_food, predators),
            predators_eating,
        }
    }
}

fn mean(total: f32, count: usize) -> f32 {
    if count > 0 {
        total / count as f32
    } else {
        0.0
    }
}
