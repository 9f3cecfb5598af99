//! Scene building: game state in, pixel-space triangles out
//!
//! The snake is drawn from two discrete snapshots (before and after the last
//! tick) blended by the scheduler's progress, so motion stays smooth even
//! though the board only changes once per tick. The body is a tapered tube:
//! one quad per segment from tail to neck, circles over the joints so turns
//! have no seams, then a head with eyes facing the current direction.

use glam::Vec2;
use std::f32::consts::FRAC_PI_4;

use super::color::{Color, blend};
use super::palette::{ColorRole, Palette};
use super::shapes;
use super::vertex::Vertex;
use crate::consts::TUBE_HALF_WIDTH;
use crate::layout::Layout;
use crate::sim::{Direction, GamePhase, GameState, Position};

/// Grid line thickness in pixels
const GRID_LINE_PX: f32 = 1.0;

/// Everything the renderer needs from the simulation
#[derive(Debug, Clone, Copy)]
pub struct RenderView<'a> {
    pub snake: &'a [Position],
    pub previous: &'a [Position],
    pub food: Option<Position>,
    pub direction: Direction,
    pub phase: GamePhase,
}

impl<'a> RenderView<'a> {
    pub fn from_state(state: &'a GameState) -> Self {
        Self {
            snake: &state.snake,
            previous: &state.previous,
            // A full board has nowhere left for food
            food: (state.phase != GamePhase::Won).then_some(state.food),
            direction: state.direction,
            phase: state.phase,
        }
    }
}

/// Tube colour at `f` along the body (0 = tail, 1 = head)
pub fn snake_color(palette: &Palette, f: f32, dead: bool) -> Color {
    let f = f.clamp(0.0, 1.0);
    if dead {
        return palette.get(ColorRole::Dead).with_alpha(0.4 + f * 0.5);
    }
    let head = palette.get(ColorRole::SnakeHead);
    let body = palette.get(ColorRole::SnakeBody);
    let tail = palette.get(ColorRole::SnakeTail);
    let c = if f > 0.5 {
        blend(body, head, (f - 0.5) * 2.0)
    } else {
        blend(tail, body, f * 2.0)
    };
    c.with_alpha(0.45 + f * 0.55)
}

/// Tube half width at `f` along the body, narrow at the tail
pub fn tube_half_width(max_half_width: f32, f: f32) -> f32 {
    max_half_width * (0.28 + 0.72 * f)
}

/// Eye positions relative to the head center, in units of the eye offset
pub fn eye_offsets(direction: Direction) -> [Vec2; 2] {
    match direction {
        Direction::Right => [Vec2::new(1.0, -1.0), Vec2::new(1.0, 1.0)],
        Direction::Left => [Vec2::new(-1.0, -1.0), Vec2::new(-1.0, 1.0)],
        Direction::Up => [Vec2::new(-1.0, -1.0), Vec2::new(1.0, -1.0)],
        Direction::Down => [Vec2::new(-1.0, 1.0), Vec2::new(1.0, 1.0)],
    }
}

/// Builds frame geometry; holds only layout and resolved colours
#[derive(Debug, Clone)]
pub struct SceneBuilder {
    layout: Layout,
    palette: Palette,
}

impl SceneBuilder {
    pub fn new(layout: Layout, palette: Palette) -> Self {
        Self { layout, palette }
    }

    pub fn set_layout(&mut self, layout: Layout) {
        self.layout = layout;
    }

    pub fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn clear_color(&self, phase: GamePhase) -> Color {
        match phase {
            GamePhase::Idle => self.palette.get(ColorRole::BackgroundAlt),
            _ => self.palette.get(ColorRole::Background),
        }
    }

    /// Empty board shown before the first game
    pub fn idle(&self) -> Vec<Vertex> {
        let mut out = Vec::new();
        self.grid(&mut out);
        out
    }

    /// Full frame at interpolation `progress`; `time_ms` drives the food animation
    pub fn build(&self, view: &RenderView, progress: f32, time_ms: f64) -> Vec<Vertex> {
        let mut out = Vec::with_capacity(1024);
        self.grid(&mut out);
        if let Some(food) = view.food {
            self.food(&mut out, food, time_ms);
        }
        out.extend(self.snake_vertices(view, progress));
        out
    }

    /// Blended pixel positions of every segment, head first.
    ///
    /// Segments without a previous position (just grown) sit still at their
    /// current cell.
    pub fn spine(&self, view: &RenderView, progress: f32) -> Vec<Vec2> {
        let t = progress.clamp(0.0, 1.0);
        view.snake
            .iter()
            .enumerate()
            .map(|(i, &cell)| {
                let to = self.layout.cell_center(cell);
                let from = view
                    .previous
                    .get(i)
                    .map(|&p| self.layout.cell_center(p))
                    .unwrap_or(to);
                from.lerp(to, t)
            })
            .collect()
    }

    /// Tube, head and eyes; empty for an empty snake
    pub fn snake_vertices(&self, view: &RenderView, progress: f32) -> Vec<Vertex> {
        let pts = self.spine(view, progress);
        let mut out = Vec::new();
        let Some(&head) = pts.first() else {
            return out;
        };

        let dead = view.phase == GamePhase::Dead;
        let half = self.layout.cell_min() * TUBE_HALF_WIDTH;
        let n = pts.len();

        if n > 1 {
            let last = (n - 1) as f32;
            // Tail to neck
            for i in (1..n).rev() {
                let f = 1.0 - i as f32 / last;
                let f_next = 1.0 - (i - 1) as f32 / last;
                shapes::tapered_segment(
                    &mut out,
                    pts[i],
                    pts[i - 1],
                    tube_half_width(half, f),
                    tube_half_width(half, f_next),
                    snake_color(&self.palette, f, dead),
                );
            }

            for (i, &p) in pts.iter().enumerate().take(n - 1).skip(1) {
                let f = 1.0 - i as f32 / last;
                shapes::circle(
                    &mut out,
                    p,
                    half * (0.3 + 0.7 * f),
                    snake_color(&self.palette, f, dead),
                );
            }

            let cap = if dead {
                snake_color(&self.palette, 0.0, true)
            } else {
                self.palette.get(ColorRole::SnakeTail)
            };
            shapes::circle(&mut out, pts[n - 1], tube_half_width(half, 0.0), cap);
        }

        self.head(&mut out, head, half * 1.08, view.direction, dead);
        out
    }

    fn head(&self, out: &mut Vec<Vertex>, center: Vec2, radius: f32, direction: Direction, dead: bool) {
        let (fill, glow) = if dead {
            (
                self.palette.get(ColorRole::Dead),
                self.palette.get(ColorRole::DeadGlow),
            )
        } else {
            let head = self.palette.get(ColorRole::SnakeHead);
            (head, head.with_alpha(0.35))
        };

        shapes::radial_gradient(out, center, radius * 1.6, glow, glow.with_alpha(0.0));
        shapes::circle(out, center, radius, fill);
        // Gloss
        shapes::circle(
            out,
            center - Vec2::splat(radius * 0.2),
            radius * 0.38,
            Color::WHITE.with_alpha(0.2),
        );

        let offset = radius * 0.5 * 0.55;
        let eye_r = radius * 0.21;
        let (eye, pupil) = if dead {
            let d = self.palette.get(ColorRole::Dead);
            (d, d.with_alpha(0.9))
        } else {
            (
                self.palette.get(ColorRole::Background),
                self.palette.get(ColorRole::SnakeHead),
            )
        };
        for dir in eye_offsets(direction) {
            let p = center + dir * offset;
            shapes::circle(out, p, eye_r, eye);
            shapes::circle(out, p, eye_r * 0.52, pupil);
        }
    }

    fn grid(&self, out: &mut Vec<Vertex>) {
        let color = self.palette.get(ColorRole::GridLine);
        let Layout {
            cols,
            rows,
            width,
            height,
            cell_w,
            cell_h,
        } = self.layout;
        let half = GRID_LINE_PX / 2.0;

        for i in 0..=cols {
            let x = i as f32 * cell_w;
            shapes::rect(out, Vec2::new(x - half, 0.0), Vec2::new(x + half, height), color);
        }
        for i in 0..=rows {
            let y = i as f32 * cell_h;
            shapes::rect(out, Vec2::new(0.0, y - half), Vec2::new(width, y + half), color);
        }
    }

    fn food(&self, out: &mut Vec<Vertex>, cell: Position, time_ms: f64) {
        let color = self.palette.get(ColorRole::Food);
        let center = self.layout.cell_center(cell);
        let pulse = 0.82 + (time_ms * 0.004).sin() as f32 * 0.18;
        let r = self.layout.cell_min() * 0.34 * pulse;

        // Ambient glow
        shapes::radial_gradient(out, center, r * 2.8, color.with_alpha(0.22), color.with_alpha(0.0));

        // Rotating diamond with a shine square
        let angle = FRAC_PI_4 + (time_ms * 0.001) as f32;
        let s = r * 0.78;
        shapes::rotated_rect(out, center, Vec2::splat(-s), Vec2::splat(2.0 * s), angle, color);
        shapes::rotated_rect(
            out,
            center,
            Vec2::splat(-0.5 * s),
            Vec2::splat(0.82 * s),
            angle,
            Color::WHITE.with_alpha(0.3),
        );
    }
}
