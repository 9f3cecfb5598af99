//! Game state and core simulation types
//!
//! Everything the logic tick reads or mutates lives here.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::difficulty::Difficulty;
use crate::consts::*;

/// A cell on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Neighbouring cell one step in `dir` (may leave the grid)
    pub fn step(self, dir: Direction) -> Self {
        let (dx, dy) = dir.delta();
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Unit movement on the grid, screen coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// True for an exact 180-degree turn
    pub fn is_reverse_of(self, other: Direction) -> bool {
        self.opposite() == other
    }
}

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Waiting for the first start signal
    Idle,
    Running,
    Paused,
    /// Hit a wall or itself
    Dead,
    /// Filled the whole board
    Won,
}

impl GamePhase {
    /// Phases that have a board worth drawing
    pub fn renders_board(self) -> bool {
        matches!(self, GamePhase::Running | GamePhase::Paused | GamePhase::Dead)
    }
}

/// What ended the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    Wall,
    Body,
}

/// Complete simulation state for one game
#[derive(Debug, Clone)]
pub struct GameState {
    pub cols: u32,
    pub rows: u32,
    /// Body cells, head first
    pub snake: Vec<Position>,
    /// Snake as it was before the last tick (for interpolation)
    pub previous: Vec<Position>,
    /// Direction accepted on the last tick
    pub direction: Direction,
    pub food: Position,
    pub score: u64,
    pub fruits_eaten: u32,
    pub level: u32,
    pub phase: GamePhase,
    /// Logic ticks executed this game
    pub ticks: u64,
    rng: Pcg32,
}

impl GameState {
    /// Fresh game: one cell in the middle of the board heading right
    pub fn new(cols: u32, rows: u32, seed: u64) -> Self {
        let head = Position::new((cols / 2) as i32, (rows / 2) as i32);
        let mut state = Self {
            cols,
            rows,
            snake: vec![head],
            previous: vec![head],
            direction: Direction::Right,
            food: head,
            score: 0,
            fruits_eaten: 0,
            level: 1,
            phase: GamePhase::Idle,
            ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
        };
        state.respawn_food();
        state
    }

    pub fn head(&self) -> Position {
        self.snake[0]
    }

    pub fn len(&self) -> usize {
        self.snake.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snake.is_empty()
    }

    pub fn cell_count(&self) -> usize {
        self.cols as usize * self.rows as usize
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.cols as i32 && pos.y < self.rows as i32
    }

    pub fn occupies(&self, pos: Position) -> bool {
        self.snake.contains(&pos)
    }

    /// Level implied by the number of fruits eaten
    pub fn level_for(fruits_eaten: u32) -> u32 {
        fruits_eaten / FRUITS_PER_LEVEL + 1
    }

    /// Board completion in [0, 1]
    pub fn completion(&self) -> f32 {
        let denom = self.cell_count().saturating_sub(1).max(1);
        (self.len().saturating_sub(1)) as f32 / denom as f32
    }

    /// Current logic tick length for the given difficulty
    pub fn tick_interval_ms(&self, difficulty: Difficulty) -> f64 {
        difficulty.tick_interval_ms(self.level)
    }

    /// Place food on a uniformly random free cell.
    ///
    /// Returns false when the board has no free cell left.
    pub fn respawn_food(&mut self) -> bool {
        let free: Vec<Position> = (0..self.rows as i32)
            .flat_map(|y| (0..self.cols as i32).map(move |x| Position::new(x, y)))
            .filter(|p| !self.snake.contains(p))
            .collect();
        if free.is_empty() {
            return false;
        }
        let idx = self.rng.random_range(0..free.len());
        self.food = free[idx];
        true
    }
}
