use alloc::sync::Arc;

use rand::Rng;

use crate::genetics::{FlockConfig, Genetics};
use crate::id::AgentId;
use crate::math;
use crate::params::{BoidKind, KindParams};
use crate::vector::Vector2D;
use crate::world::World;
use crate::{AGE_STEP_TICKS, ARRIVAL_DISTANCE, BASE_SPEED, BOUNDARY_BAND, NEIGHBOR_RADIUS};

/// Whether a boid is steering or frozen while it eats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MovementState {
    #[default]
    Hunting,
    Eating { remaining_ticks: u32 },
}

/// A single boid, prey or predator
#[derive(Debug, Clone)]
pub struct Agent {
    id: AgentId,
    kind: BoidKind,
    params: KindParams,
    genetics: Arc<Genetics>,
    pub position: Vector2D,
    velocity: Vector2D,
    pub age: u32,
    pub food: f32,
    steps_since_last_reproduction: u32,
    movement: MovementState,
}

impl Agent {
    pub fn new(
        id: AgentId,
        kind: BoidKind,
        params: KindParams,
        position: Vector2D,
        velocity: Vector2D,
        genetics: Arc<Genetics>,
    ) -> Self {
        let mut agent = Self {
            id,
            kind,
            params,
            genetics,
            position,
            velocity: Vector2D::zero(),
            age: 0,
            food: params.starting_food,
            steps_since_last_reproduction: 0,
            movement: MovementState::Hunting,
        };
        agent.velocity = velocity.limit(agent.max_speed());
        agent
    }

    /// A boid placed uniformly inside the disc, clear of the boundary band,
    /// with a random heading.
    pub fn random<R: Rng + ?Sized>(
        id: AgentId,
        kind: BoidKind,
        params: KindParams,
        genetics: Arc<Genetics>,
        world_radius: f32,
        rng: &mut R,
    ) -> Self {
        let usable = (world_radius - BOUNDARY_BAND).max(0.0);
        let distance = math::sqrt(rng.gen_range(0.0..=1.0f32)) * usable;
        let position = Vector2D::random(distance, rng);
        let speed = rng.gen_range(0.0..=1.0f32) * params.speed_factor * BASE_SPEED;
        let velocity = Vector2D::random(speed, rng);
        Self::new(id, kind, params, position, velocity, genetics)
    }

    pub fn id(&self) -> AgentId {
        self.id
    }

    pub fn kind(&self) -> BoidKind {
        self.kind
    }

    pub fn is_prey(&self) -> bool {
        self.kind.is_prey()
    }

    pub fn params(&self) -> &KindParams {
        &self.params
    }

    pub fn genetics(&self) -> &Arc<Genetics> {
        &self.genetics
    }

    pub fn velocity(&self) -> Vector2D {
        self.velocity
    }

    #[cfg(test)]
    pub(crate) fn set_velocity(&mut self, velocity: Vector2D) {
        self.velocity = velocity.limit(self.max_speed());
    }

    pub fn radius(&self) -> f32 {
        self.params.radius
    }

    pub fn max_force(&self) -> f32 {
        self.params.max_force
    }

    pub fn movement(&self) -> MovementState {
        self.movement
    }

    /// Ticks left in the current eating freeze, zero while hunting.
    pub fn busy_eating(&self) -> u32 {
        match self.movement {
            MovementState::Hunting => 0,
            MovementState::Eating { remaining_ticks } => remaining_ticks,
        }
    }

    pub fn steps_since_last_reproduction(&self) -> u32 {
        self.steps_since_last_reproduction
    }

    /// Speed cap, decaying by `age_factor` every 60 ticks of age.
    pub fn max_speed(&self) -> f32 {
        let age_steps = math::round(self.age as f32 / AGE_STEP_TICKS) as i32;
        self.params.speed_factor * BASE_SPEED * math::powi(self.params.age_factor, age_steps)
    }

    /// Advances the reproduction clock by one and reports eligibility.
    ///
    /// Every call counts as a tick, so call it once per tick. Use
    /// [`Agent::is_eligible_to_reproduce`] to inspect without advancing.
    pub fn can_reproduce(&mut self) -> bool {
        self.steps_since_last_reproduction += 1;
        self.is_eligible_to_reproduce()
    }

    pub fn is_eligible_to_reproduce(&self) -> bool {
        self.steps_since_last_reproduction > self.params.turns_to_reproduce
            && self.food > self.params.energy_required_for_reproduction
    }

    /// Called by whoever spawns offspring after a birth.
    pub fn reset_reproduction_clock(&mut self) {
        self.steps_since_last_reproduction = 0;
    }

    pub fn gain_food(&mut self, amount: f32) {
        self.food += amount;
    }

    /// Freezes a predator for `ticks` calls to `accelerate`.
    ///
    /// Prey never eat; for them this does nothing and returns `false`.
    pub fn start_eating(&mut self, ticks: u32) -> bool {
        if self.is_prey() {
            log::debug!("ignoring eating freeze for prey {}", self.id);
            return false;
        }
        self.movement = if ticks > 0 {
            MovementState::Eating {
                remaining_ticks: ticks,
            }
        } else {
            MovementState::Hunting
        };
        true
    }

    /// Moves one tick: boundary repulsion, integration, wrap and aging.
    pub fn step(&mut self, world_radius: f32) {
        let dist_to_edge = world_radius - self.position.norm();
        if dist_to_edge < BOUNDARY_BAND && self.position.norm() > 0.0 {
            let strength = self.params.max_force * 100.0 / dist_to_edge / dist_to_edge;
            let inward = (-self.position).with_norm(strength);
            self.velocity += inward;
        }
        self.position = (self.position + self.velocity).wrap(world_radius);
        self.age += 1;
    }

    /// Steers from the neighbors `world` reports, or counts down an eating
    /// freeze.
    pub fn accelerate<W, R>(&mut self, world: &W, rng: &mut R)
    where
        W: World + ?Sized,
        R: Rng + ?Sized,
    {
        let acceleration = self.desired_acceleration(world, rng);
        self.apply_acceleration(acceleration);
    }

    /// The acceleration `accelerate` would apply. Zero while eating, without
    /// querying the world.
    pub fn desired_acceleration<W, R>(&self, world: &W, rng: &mut R) -> Vector2D
    where
        W: World + ?Sized,
        R: Rng + ?Sized,
    {
        match self.movement {
            MovementState::Eating { .. } => Vector2D::zero(),
            MovementState::Hunting => self.compute_acceleration(world, rng),
        }
    }

    /// Applies an acceleration computed earlier, advancing the movement state.
    pub fn apply_acceleration(&mut self, acceleration: Vector2D) {
        match self.movement {
            MovementState::Eating { remaining_ticks } => {
                self.movement = if remaining_ticks > 1 {
                    MovementState::Eating {
                        remaining_ticks: remaining_ticks - 1,
                    }
                } else {
                    MovementState::Hunting
                };
                self.velocity = Vector2D::zero();
            }
            MovementState::Hunting => {
                self.velocity = (self.velocity + acceleration).limit(self.max_speed());
            }
        }
    }

    pub fn compute_acceleration<W, R>(&self, world: &W, rng: &mut R) -> Vector2D
    where
        W: World + ?Sized,
        R: Rng + ?Sized,
    {
        let world_radius = world.radius();

        let prey = world.neighbors(self, true);
        let mut flock_prey = self.flock(&prey, &self.genetics.prey_flocking, world_radius, rng);

        let predators = world.neighbors(self, false);
        let flock_predators =
            self.flock(&predators, &self.genetics.predator_flocking, world_radius, rng);

        if !self.is_prey() {
            // Averaging over many equidistant prey cancels out; the nearest
            // one gets its own pull so the predator commits to a target.
            if let Some(closest) = prey.first() {
                flock_prey += self.flock(
                    &[*closest],
                    &self.genetics.closest_flocking,
                    world_radius,
                    rng,
                );
            }
        }

        flock_prey + flock_predators
    }

    pub fn flock<R: Rng + ?Sized>(
        &self,
        neighbors: &[&Agent],
        config: &FlockConfig,
        world_radius: f32,
        rng: &mut R,
    ) -> Vector2D {
        let s = self.separate(neighbors, config.separation_radius, world_radius, rng)
            * config.separation_weight;
        let a = self.align(neighbors, world_radius) * config.alignment_weight;
        let c = self.cohere(neighbors, world_radius) * config.cohesion_weight;
        s + a + c
    }

    /// Average of unit vectors away from close neighbors, each scaled by
    /// `1 / distance`.
    ///
    /// If the only neighbors are on top of this boid, a random vector of
    /// length `max_force` breaks the tie.
    pub fn separate<R: Rng + ?Sized>(
        &self,
        neighbors: &[&Agent],
        separation_radius: f32,
        world_radius: f32,
        rng: &mut R,
    ) -> Vector2D {
        let mut separation = Vector2D::zero();
        let mut count = 0;
        let mut zero_detected = false;

        for other in neighbors {
            let d = self.position.distance(&other.position, world_radius);
            if d > 0.0 && d < separation_radius {
                let away = (self.position - other.position).normalize() / d;
                separation += away;
                count += 1;
            }
            zero_detected = zero_detected || d == 0.0;
        }

        if count > 0 {
            separation / count as f32
        } else if zero_detected {
            log::trace!("boid {} fully overlapped, separating randomly", self.id);
            Vector2D::random(self.params.max_force, rng)
        } else {
            separation
        }
    }

    /// Average velocity of neighbors within [`NEIGHBOR_RADIUS`], capped at
    /// `max_force`.
    pub fn align(&self, neighbors: &[&Agent], world_radius: f32) -> Vector2D {
        let mut sum = Vector2D::zero();
        let mut count = 0;

        for other in neighbors {
            let d = self.position.distance(&other.position, world_radius);
            if d > 0.0 && d < NEIGHBOR_RADIUS {
                sum += other.velocity;
                count += 1;
            }
        }

        if count > 0 {
            sum = sum / count as f32;
        }
        sum.limit(self.params.max_force)
    }

    /// Steers towards the average position of neighbors within
    /// [`NEIGHBOR_RADIUS`].
    pub fn cohere(&self, neighbors: &[&Agent], world_radius: f32) -> Vector2D {
        let mut sum = Vector2D::zero();
        let mut count = 0;

        for other in neighbors {
            let d = self.position.distance(&other.position, world_radius);
            if d > 0.0 && d < NEIGHBOR_RADIUS {
                sum += other.position;
                count += 1;
            }
        }

        if count > 0 {
            self.steer_to(sum / count as f32)
        } else {
            Vector2D::zero()
        }
    }

    /// Steering that brings the velocity towards `target`, slowing down
    /// linearly inside [`ARRIVAL_DISTANCE`].
    pub fn steer_to(&self, target: Vector2D) -> Vector2D {
        let desired = target - self.position;
        let d = desired.norm();
        if d > 0.0 {
            let speed = if d < ARRIVAL_DISTANCE {
                self.max_speed() * d / ARRIVAL_DISTANCE
            } else {
                self.max_speed()
            };
            let desired = desired.normalize() * speed;
            (desired - self.velocity).limit(self.params.max_force)
        } else {
            Vector2D::zero()
        }
    }
}
