//! Synx Snake - a grid snake game with smooth interpolated rendering
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid state, input queue, logic tick)
//! - `scheduler`: Fixed-step accumulator decoupled from the render rate
//! - `session`: Game lifecycle, events and presentation updates
//! - `renderer`: Interpolated tube renderer and WebGPU pipeline
//! - `persistence`: Key-value storage backends
//! - `platform`: Key mapping for the browser/native front ends

pub mod highscores;
pub mod hud;
pub mod layout;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod scheduler;
pub mod session;
pub mod settings;
pub mod sim;

pub use highscores::HighScore;
pub use layout::Layout;
pub use session::{FrameReport, GameSession};
pub use settings::{Settings, Theme};

/// Game configuration constants
pub mod consts {
    /// Largest frame delta fed to the accumulator (ms), avoids a catch-up burst after a stall
    pub const MAX_FRAME_DT_MS: f64 = 100.0;

    /// Fastest allowed logic tick (ms)
    pub const MIN_TICK_MS: f64 = 40.0;
    /// Tick interval reduction per level when the ramp is enabled (ms)
    pub const RAMP_PER_LEVEL_MS: f64 = 6.0;

    /// Pending direction changes kept between ticks
    pub const MAX_QUEUED_TURNS: usize = 3;

    /// Fruits needed to advance one level
    pub const FRUITS_PER_LEVEL: u32 = 5;
    /// Points per fruit, multiplied by the level
    pub const POINTS_PER_FRUIT: u64 = 10;

    /// Board layout
    pub const MIN_VIEWPORT_PX: f32 = 120.0;
    pub const MIN_CELL_PX: f32 = 18.0;
    pub const MAX_CELL_PX: f32 = 46.0;
    /// Cells across the short side of the viewport before clamping
    pub const CELLS_ACROSS: f32 = 22.0;
    pub const MIN_COLS: u32 = 16;
    pub const MIN_ROWS: u32 = 12;

    /// Tube half width as a fraction of the smaller cell side
    pub const TUBE_HALF_WIDTH: f32 = 0.46;
}

/// Linear interpolation between two scalars
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
