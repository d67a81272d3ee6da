use core::fmt;

/// Identity of a boid. Unique within the [`IdGenerator`] that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentId(pub u64);

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monotonic id allocator owned by whoever spawns boids.
#[derive(Debug, Default, Clone)]
pub struct IdGenerator {
    next: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&mut self) -> AgentId {
        let id = AgentId(self.next);
        self.next += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_monotonic() {
        let mut ids = IdGenerator::new();
        let a = ids.allocate();
        let b = ids.allocate();
        let c = ids.allocate();
        assert_eq!(a, AgentId(0));
        assert!(a < b && b < c);
        assert_eq!(ids.allocate(), AgentId(3));
    }

    #[test]
    fn test_generators_are_independent() {
        let mut first = IdGenerator::new();
        let mut second = IdGenerator::new();
        first.allocate();
        assert_eq!(first.allocate(), AgentId(1));
        assert_eq!(second.allocate(), AgentId(0));
        assert_eq!(first.allocate().to_string(), "2");
    }
}
