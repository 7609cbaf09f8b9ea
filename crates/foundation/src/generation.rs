/// Monotonic level generation.
///
/// Every level load gets a fresh generation; async completions carry the
/// generation they were started under and are discarded when it is no longer
/// current.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    pub const ZERO: Generation = Generation(0);

    pub fn get(self) -> u64 {
        self.0
    }

    pub fn next(self) -> Self {
        Generation(self.0.wrapping_add(1))
    }
}

#[derive(Debug, Default)]
pub struct GenerationCounter {
    current: Generation,
}

impl GenerationCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Generation {
        self.current
    }

    /// Starts a new generation, invalidating every earlier one.
    pub fn advance(&mut self) -> Generation {
        self.current = self.current.next();
        self.current
    }

    pub fn is_current(&self, generation: Generation) -> bool {
        self.current == generation
    }
}

#[cfg(test)]
mod tests {
    use super::{Generation, GenerationCounter};

    #[test]
    fn advance_invalidates_previous_generation() {
        let mut counter = GenerationCounter::new();
        assert_eq!(counter.current(), Generation::ZERO);

        let first = counter.advance();
        assert!(counter.is_current(first));

        let second = counter.advance();
        assert!(second > first);
        assert!(!counter.is_current(first));
        assert!(counter.is_current(second));
    }
}
