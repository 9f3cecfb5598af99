//! Theme colours, resolved once per theme and looked up by role

use super::color::Color;
use crate::settings::Theme;

const ROLE_COUNT: usize = 9;

/// Semantic colour slots the renderer asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorRole {
    Background,
    /// Idle screen fill
    BackgroundAlt,
    GridLine,
    SnakeHead,
    SnakeBody,
    SnakeTail,
    Food,
    Dead,
    DeadGlow,
}

impl ColorRole {
    pub const ALL: [ColorRole; ROLE_COUNT] = [
        ColorRole::Background,
        ColorRole::BackgroundAlt,
        ColorRole::GridLine,
        ColorRole::SnakeHead,
        ColorRole::SnakeBody,
        ColorRole::SnakeTail,
        ColorRole::Food,
        ColorRole::Dead,
        ColorRole::DeadGlow,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

/// Colours for one theme
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: [Color; ROLE_COUNT],
}

impl Palette {
    /// Built-in palette for `theme`
    pub fn for_theme(theme: Theme) -> Self {
        let table: [(ColorRole, &str); ROLE_COUNT] = match theme {
            Theme::Dark => [
                (ColorRole::Background, "#05070d"),
                (ColorRole::BackgroundAlt, "#0a0f1a"),
                (ColorRole::GridLine, "rgba(0,245,255,0.06)"),
                (ColorRole::SnakeHead, "#00f5ff"),
                (ColorRole::SnakeBody, "#0096ff"),
                (ColorRole::SnakeTail, "#1b2f6b"),
                (ColorRole::Food, "#ff2d95"),
                (ColorRole::Dead, "#ff2244"),
                (ColorRole::DeadGlow, "rgba(255,34,68,0.6)"),
            ],
            Theme::Light => [
                (ColorRole::Background, "#eef3f8"),
                (ColorRole::BackgroundAlt, "#e2e9f2"),
                (ColorRole::GridLine, "rgba(20,40,80,0.08)"),
                (ColorRole::SnakeHead, "#0066ff"),
                (ColorRole::SnakeBody, "#2f8cff"),
                (ColorRole::SnakeTail, "#a8c8ff"),
                (ColorRole::Food, "#e0116f"),
                (ColorRole::Dead, "#ff2244"),
                (ColorRole::DeadGlow, "rgba(255,34,68,0.45)"),
            ],
        };
        Self::from_table(&table)
    }

    /// Build from role/colour-string pairs; unparseable entries stay magenta
    pub fn from_table(table: &[(ColorRole, &str)]) -> Self {
        let mut colors = [Color::rgb(1.0, 0.0, 1.0); ROLE_COUNT];
        for (role, value) in table {
            match Color::parse(value) {
                Some(color) => colors[role.index()] = color,
                None => log::warn!("Bad colour {:?} for {:?}", value, role),
            }
        }
        Self { colors }
    }

    pub fn get(&self, role: ColorRole) -> Color {
        self.colors[role.index()]
    }
}
