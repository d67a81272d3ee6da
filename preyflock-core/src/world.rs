use alloc::vec::Vec;

use crate::agent::Agent;

/// What an [`Agent`] needs from the world it lives in.
pub trait World {
    /// Radius of the circular world.
    fn radius(&self) -> f32;

    /// Neighbors of the requested kind, nearest first.
    ///
    /// Implementations must leave `agent` itself out of the result and sort
    /// by ascending distance; predators steer towards the first prey entry.
    fn neighbors(&self, agent: &Agent, want_prey: bool) -> Vec<&Agent>;
}
