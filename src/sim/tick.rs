//! Fixed logic tick
//!
//! Advances the board by exactly one grid step.

use super::state::{Collision, Direction, GamePhase, GameState};
use crate::consts::POINTS_PER_FRUIT;

/// Outcome of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEvent {
    /// Not running, nothing happened
    Skipped,
    Moved,
    /// Ate the food and grew by one cell
    Ate,
    Died(Collision),
    /// Board is full
    Won,
}

/// Advance the game by one step heading `direction`.
///
/// `direction` is whatever the input queue yielded for this tick.
pub fn tick(state: &mut GameState, direction: Direction) -> TickEvent {
    if state.phase != GamePhase::Running || state.is_empty() {
        return TickEvent::Skipped;
    }

    state.previous.clone_from(&state.snake);
    state.direction = direction;
    state.ticks += 1;

    let head = state.head().step(direction);

    if !state.in_bounds(head) {
        state.phase = GamePhase::Dead;
        log::debug!("Wall collision at {:?}", head);
        return TickEvent::Died(Collision::Wall);
    }

    let ate = head == state.food;
    // The tail cell is vacated this tick unless the snake grows
    let body_limit = state.len() - usize::from(!ate);
    if state.snake[..body_limit].contains(&head) {
        state.phase = GamePhase::Dead;
        log::debug!("Body collision at {:?}", head);
        return TickEvent::Died(Collision::Body);
    }

    state.snake.insert(0, head);
    if !ate {
        state.snake.pop();
        return TickEvent::Moved;
    }

    state.fruits_eaten += 1;
    state.score += POINTS_PER_FRUIT * state.level as u64;
    state.level = GameState::level_for(state.fruits_eaten);

    if state.len() >= state.cell_count() || !state.respawn_food() {
        state.phase = GamePhase::Won;
        return TickEvent::Won;
    }
    debug_assert!(!state.occupies(state.food));

    TickEvent::Ate
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Position;
    use std::collections::HashSet;

    fn running(cols: u32, rows: u32) -> GameState {
        let mut state = GameState::new(cols, rows, 42);
        state.phase = GamePhase::Running;
        state
    }

    /// Serpentine walk over the whole board, row by row
    fn serpentine(cols: i32, rows: i32) -> Vec<Position> {
        (0..rows)
            .flat_map(|y| {
                let row: Vec<Position> = if y % 2 == 0 {
                    (0..cols).map(|x| Position::new(x, y)).collect()
                } else {
                    (0..cols).rev().map(|x| Position::new(x, y)).collect()
                };
                row
            })
            .collect()
    }

    #[test]
    fn test_skipped_unless_running() {
        let mut state = GameState::new(20, 20, 1);
        let before = state.snake.clone();
        assert_eq!(tick(&mut state, Direction::Right), TickEvent::Skipped);
        assert_eq!(state.snake, before);
        assert_eq!(state.ticks, 0);
    }

    #[test]
    fn test_move_and_snapshot() {
        let mut state = running(20, 20);
        state.food = Position::new(0, 0);
        assert_eq!(tick(&mut state, Direction::Right), TickEvent::Moved);
        assert_eq!(state.previous, vec![Position::new(10, 10)]);
        assert_eq!(state.snake, vec![Position::new(11, 10)]);
        assert_eq!(state.direction, Direction::Right);
    }

    #[test]
    fn test_five_ticks_to_first_fruit() {
        let mut state = running(20, 20);
        state.food = Position::new(15, 10);

        for _ in 0..4 {
            assert_eq!(tick(&mut state, Direction::Right), TickEvent::Moved);
            assert_eq!(state.len(), 1);
        }
        assert_eq!(tick(&mut state, Direction::Right), TickEvent::Ate);

        assert_eq!(state.snake, vec![Position::new(15, 10), Position::new(14, 10)]);
        assert_eq!(state.previous, vec![Position::new(14, 10)]);
        assert_eq!(state.score, 10);
        assert_eq!(state.fruits_eaten, 1);
        assert_eq!(state.level, 1);
        assert!(!state.occupies(state.food));
    }

    #[test]
    fn test_score_scales_with_level() {
        let mut state = running(20, 20);
        state.fruits_eaten = 4;
        state.score = 40;
        state.food = Position::new(11, 10);
        assert_eq!(tick(&mut state, Direction::Right), TickEvent::Ate);
        assert_eq!(state.score, 50);
        assert_eq!(state.level, 2);

        state.food = state.head().step(Direction::Right);
        tick(&mut state, Direction::Right);
        assert_eq!(state.score, 70);
    }

    #[test]
    fn test_wall_collision() {
        let mut state = running(20, 20);
        state.snake = (0..4).map(|i| Position::new(19 - i, 5)).collect();
        state.food = Position::new(0, 0);
        let before = state.snake.clone();

        assert_eq!(
            tick(&mut state, Direction::Right),
            TickEvent::Died(Collision::Wall)
        );
        assert_eq!(state.phase, GamePhase::Dead);
        assert_eq!(state.snake, before);
        assert_eq!(state.previous, before);
    }

    #[test]
    fn test_self_collision() {
        let mut state = running(10, 10);
        // Head at (5,5) with the body curling below it
        state.snake = vec![
            Position::new(5, 5),
            Position::new(4, 5),
            Position::new(4, 6),
            Position::new(5, 6),
            Position::new(6, 6),
        ];
        state.direction = Direction::Up;
        state.food = Position::new(0, 0);
        assert_eq!(
            tick(&mut state, Direction::Down),
            TickEvent::Died(Collision::Body)
        );
    }

    #[test]
    fn test_may_enter_vacating_tail() {
        let mut state = running(10, 10);
        // 2x2 loop: head chases its own tail
        state.snake = vec![
            Position::new(5, 5),
            Position::new(5, 6),
            Position::new(6, 6),
            Position::new(6, 5),
        ];
        state.food = Position::new(0, 0);
        assert_eq!(tick(&mut state, Direction::Right), TickEvent::Moved);
        assert_eq!(state.head(), Position::new(6, 5));
    }

    #[test]
    fn test_tail_blocks_when_growing() {
        let mut state = running(10, 10);
        state.snake = vec![
            Position::new(5, 5),
            Position::new(5, 6),
            Position::new(6, 6),
            Position::new(6, 5),
        ];
        // Food under the tail: the tail stays put this tick
        state.food = Position::new(6, 5);
        assert_eq!(
            tick(&mut state, Direction::Right),
            TickEvent::Died(Collision::Body)
        );
    }

    #[test]
    fn test_fill_board_wins() {
        let mut state = running(16, 12);
        let path = serpentine(16, 12);
        assert_eq!(path.len(), 192);
        state.snake = path[..191].iter().rev().copied().collect();
        state.food = path[191];
        state.direction = Direction::Left;

        assert_eq!(tick(&mut state, Direction::Left), TickEvent::Won);
        assert_eq!(state.phase, GamePhase::Won);
        assert_eq!(state.len(), 192);

        let cells: HashSet<_> = state.snake.iter().collect();
        assert_eq!(cells.len(), 192);

        let before = state.snake.clone();
        assert_eq!(tick(&mut state, Direction::Left), TickEvent::Skipped);
        assert_eq!(state.snake, before);
    }

    mod props {
        use super::*;
        use crate::sim::DirectionQueue;
        use proptest::prelude::*;

        fn direction() -> impl Strategy<Value = Direction> {
            prop::sample::select(Direction::ALL.to_vec())
        }

        proptest! {
            #[test]
            fn prop_tick_keeps_board_consistent(
                seed in any::<u64>(),
                presses in prop::collection::vec(prop::collection::vec(direction(), 0..4), 1..200),
            ) {
                let mut state = GameState::new(16, 12, seed);
                state.phase = GamePhase::Running;
                let mut queue = DirectionQueue::new();

                for batch in presses {
                    for dir in batch {
                        queue.submit(dir, state.direction);
                    }
                    let before_dir = state.direction;
                    let before_len = state.len();
                    let food_before = state.food;
                    let dir = queue.poll(state.direction);
                    prop_assert!(!dir.is_reverse_of(before_dir));

                    tick(&mut state, dir);
                    let grown = state.len() - before_len;
                    prop_assert!(grown <= 1);
                    // Growth happens exactly when the head lands on the old food cell
                    prop_assert_eq!(grown == 1, state.head() == food_before);

                    let cells: HashSet<_> = state.snake.iter().collect();
                    prop_assert_eq!(cells.len(), state.len());
                    prop_assert!(state.snake.iter().all(|p| state.in_bounds(*p)));

                    if state.phase != GamePhase::Running {
                        break;
                    }
                    prop_assert!(!state.occupies(state.food));
                }
            }
        }
    }
}
