//! Render fencing: only the most recently issued load may write the view.

use std::cell::Cell;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Generation(u64);

#[derive(Debug, Default)]
pub struct RenderFence {
    latest: Cell<u64>,
}

impl RenderFence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamp a new load. Every earlier generation becomes stale.
    pub fn begin(&self) -> Generation {
        let next = self.latest.get() + 1;
        self.latest.set(next);
        Generation(next)
    }

    pub fn is_current(&self, generation: Generation) -> bool {
        self.latest.get() == generation.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_generation_fences_older() {
        let fence = RenderFence::new();
        let first = fence.begin();
        assert!(fence.is_current(first));
        let second = fence.begin();
        assert!(!fence.is_current(first));
        assert!(fence.is_current(second));
    }
}
