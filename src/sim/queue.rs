//! Buffered direction changes between logic ticks
//!
//! Several key presses can land inside one tick window. They are queued so a
//! quick "up, left" is not collapsed into a single turn, and filtered on
//! insertion so the queue never holds a turn that would fold the snake back
//! onto itself.

use std::collections::VecDeque;

use super::state::Direction;
use crate::consts::MAX_QUEUED_TURNS;

#[derive(Debug, Clone, Default)]
pub struct DirectionQueue {
    pending: VecDeque<Direction>,
}

impl DirectionQueue {
    pub fn new() -> Self {
        Self {
            pending: VecDeque::with_capacity(MAX_QUEUED_TURNS),
        }
    }

    /// Queue a turn requested while running.
    ///
    /// `current` is the direction accepted on the last tick. The turn is
    /// compared against the newest queued entry, or `current` when nothing is
    /// pending. Duplicates and reversals are dropped, and so is anything past
    /// the queue depth. Returns whether the turn was queued.
    pub fn submit(&mut self, dir: Direction, current: Direction) -> bool {
        let last = self.pending.back().copied().unwrap_or(current);
        if dir == last || dir.is_reverse_of(last) {
            return false;
        }
        if self.pending.len() >= MAX_QUEUED_TURNS {
            return false;
        }
        self.pending.push_back(dir);
        true
    }

    /// Take the next usable turn for this tick.
    ///
    /// Entries that reverse `current` are discarded. Falls back to `current`
    /// once the queue is empty.
    pub fn poll(&mut self, current: Direction) -> Direction {
        while let Some(next) = self.pending.pop_front() {
            if !next.is_reverse_of(current) {
                return next;
            }
        }
        current
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Direction> {
        self.pending.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Direction::*;

    #[test]
    fn test_reverse_and_duplicate_dropped() {
        let mut queue = DirectionQueue::new();
        // Moving up: up is a duplicate, down a reversal
        assert!(!queue.submit(Up, Up));
        assert!(!queue.submit(Down, Up));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_checks_against_newest_entry() {
        let mut queue = DirectionQueue::new();
        assert!(queue.submit(Up, Right));
        // Reverse of the queued Up, even though it is fine against Right
        assert!(!queue.submit(Down, Right));
        assert!(!queue.submit(Up, Right));
        assert!(queue.submit(Left, Right));
        assert_eq!(queue.iter().copied().collect::<Vec<_>>(), vec![Up, Left]);
    }

    #[test]
    fn test_depth_bounded() {
        let mut queue = DirectionQueue::new();
        assert!(queue.submit(Up, Right));
        assert!(queue.submit(Left, Right));
        assert!(queue.submit(Down, Right));
        assert!(!queue.submit(Right, Right));
        assert_eq!(queue.len(), MAX_QUEUED_TURNS);
        // Oldest intents survive
        assert_eq!(queue.poll(Right), Up);
    }

    #[test]
    fn test_poll_empty_is_identity() {
        let mut queue = DirectionQueue::new();
        for d in Direction::ALL {
            assert_eq!(queue.poll(d), d);
        }
    }

    #[test]
    fn test_poll_skips_reversal() {
        let mut queue = DirectionQueue::new();
        queue.submit(Up, Right);
        queue.submit(Left, Right);
        // Direction changed to Right underneath; Left is now a reversal
        assert_eq!(queue.poll(Right), Up);
        assert_eq!(queue.poll(Right), Right);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_poll_one_per_tick() {
        let mut queue = DirectionQueue::new();
        queue.submit(Up, Right);
        queue.submit(Left, Right);
        assert_eq!(queue.poll(Right), Up);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.poll(Up), Left);
    }
}
