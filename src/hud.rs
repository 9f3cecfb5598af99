//! Presentation interface
//!
//! The session pushes HUD values and status lines through `Presenter` and
//! never touches any UI toolkit itself.

use crate::settings::Theme;

/// Values shown in the score panel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HudSnapshot {
    pub score: u64,
    pub high_score: u64,
    pub length: usize,
    pub level: u32,
    /// Board filled fraction in [0, 1]
    pub completion: f32,
}

impl HudSnapshot {
    /// Zero padded level, e.g. "03"
    pub fn level_label(&self) -> String {
        format!("{:02}", self.level)
    }

    pub fn completion_percent(&self) -> f32 {
        self.completion * 100.0
    }
}

/// Status indicator category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Idle,
    Running,
    Paused,
    Dead,
    Won,
}

impl StatusKind {
    /// CSS-style class name for the status dot
    pub fn class_name(&self) -> &'static str {
        match self {
            StatusKind::Idle | StatusKind::Running => "",
            StatusKind::Paused => "paused",
            StatusKind::Dead => "dead",
            StatusKind::Won => "win",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub kind: StatusKind,
    pub message: String,
}

impl Status {
    pub fn new(kind: StatusKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Final numbers shown on the death/win overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOverSummary {
    pub won: bool,
    pub score: u64,
    pub high_score: u64,
    pub new_record: bool,
}

/// Receiver for everything the player sees outside the board
pub trait Presenter {
    fn hud(&mut self, hud: &HudSnapshot);
    fn status(&mut self, status: &Status);
    fn game_over(&mut self, _summary: &GameOverSummary) {}
    /// Score went up this tick
    fn scored(&mut self, _score: u64) {}
    fn theme_changed(&mut self, _theme: Theme) {}
}

/// Presenter that only logs
#[derive(Debug, Default)]
pub struct LogPresenter;

impl Presenter for LogPresenter {
    fn hud(&mut self, hud: &HudSnapshot) {
        log::debug!(
            "score {} | length {} | LV {} | {:.0}%",
            hud.score,
            hud.length,
            hud.level_label(),
            hud.completion_percent()
        );
    }

    fn status(&mut self, status: &Status) {
        log::info!("[{:?}] {}", status.kind, status.message);
    }

    fn game_over(&mut self, summary: &GameOverSummary) {
        log::info!(
            "{} with {} (best {}{})",
            if summary.won { "Won" } else { "Died" },
            summary.score,
            summary.high_score,
            if summary.new_record { ", new record" } else { "" }
        );
    }

    fn theme_changed(&mut self, theme: Theme) {
        log::info!("Theme: {}", theme.as_str());
    }
}
