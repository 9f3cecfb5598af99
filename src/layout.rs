//! Board layout: grid dimensions and cell size derived from the viewport

use glam::Vec2;

use crate::consts::*;
use crate::sim::Position;

/// Grid dimensions plus the pixel size of one cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub cols: u32,
    pub rows: u32,
    /// Viewport size in pixels
    pub width: f32,
    pub height: f32,
    pub cell_w: f32,
    pub cell_h: f32,
}

impl Layout {
    /// Derive a grid from the available viewport area
    pub fn from_viewport(width: f32, height: f32) -> Self {
        let w = width.floor().max(MIN_VIEWPORT_PX);
        let h = height.floor().max(MIN_VIEWPORT_PX);
        let target = (w.min(h) / CELLS_ACROSS)
            .floor()
            .clamp(MIN_CELL_PX, MAX_CELL_PX);
        let cols = ((w / target).floor() as u32).max(MIN_COLS);
        let rows = ((h / target).floor() as u32).max(MIN_ROWS);
        Self::with_grid(cols, rows, w, h)
    }

    /// Fixed grid stretched over the given viewport
    pub fn with_grid(cols: u32, rows: u32, width: f32, height: f32) -> Self {
        Self {
            cols,
            rows,
            width,
            height,
            cell_w: width / cols as f32,
            cell_h: height / rows as f32,
        }
    }

    /// Same grid on a resized viewport
    pub fn rescaled(&self, width: f32, height: f32) -> Self {
        let w = width.floor().max(MIN_VIEWPORT_PX);
        let h = height.floor().max(MIN_VIEWPORT_PX);
        Self::with_grid(self.cols, self.rows, w, h)
    }

    pub fn cell_count(&self) -> usize {
        self.cols as usize * self.rows as usize
    }

    /// Smaller side of a cell
    pub fn cell_min(&self) -> f32 {
        self.cell_w.min(self.cell_h)
    }

    /// Pixel center of a grid cell
    pub fn cell_center(&self, pos: Position) -> Vec2 {
        Vec2::new(
            pos.x as f32 * self.cell_w + self.cell_w / 2.0,
            pos.y as f32 * self.cell_h + self.cell_h / 2.0,
        )
    }
}
