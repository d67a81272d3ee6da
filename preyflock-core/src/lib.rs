#![cfg_attr(not(feature = "std"), no_std)]
//! Steering and lifecycle model for a predator-prey boid ecosystem on a
//! circular world.
//!
//! The crate owns a single agent type for both prey and predators. Kind
//! specific constants come from a [`KindTable`], identity from an
//! [`IdGenerator`], and neighbor lists from a caller supplied [`World`].
//! A simulation tick is split into a read-only force phase and a mutating
//! apply phase, see [`tick`].

extern crate alloc;

pub mod agent;
pub mod genetics;
pub mod id;
mod math;
pub mod params;
pub mod tick;
pub mod vector;
pub mod world;

pub use agent::{Agent, MovementState};
pub use genetics::{FlockConfig, Genetics};
pub use id::{AgentId, IdGenerator};
pub use params::{BoidKind, KindParams, KindTable};
pub use tick::{apply_forces, compute_forces};
pub use vector::Vector2D;
pub use world::World;

/// Base speed every kind's `speed_factor` multiplies.
pub const BASE_SPEED: f32 = 2.0;

/// Fixed radius used by alignment and cohesion.
pub const NEIGHBOR_RADIUS: f32 = 50.0;

/// Distance from the world edge at which boundary repulsion starts.
pub const BOUNDARY_BAND: f32 = 20.0;

/// Number of ticks of age per step of the speed decay curve.
pub const AGE_STEP_TICKS: f32 = 60.0;

/// Distance below which `steer_to` scales the desired speed down linearly.
pub const ARRIVAL_DISTANCE: f32 = 100.0;
