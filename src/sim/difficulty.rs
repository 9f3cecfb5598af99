//! Difficulty profiles (tick interval and speed ramp)

use serde::{Deserialize, Serialize};

use crate::consts::{MIN_TICK_MS, RAMP_PER_LEVEL_MS};

/// Base tick interval plus whether it shrinks with level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyProfile {
    pub tick_ms: f64,
    pub speed_ramp: bool,
}

/// Named difficulty levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Normal,
    Hard,
    Insane,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Normal,
        Difficulty::Hard,
        Difficulty::Insane,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
            Difficulty::Insane => "insane",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            "insane" => Some(Difficulty::Insane),
            _ => None,
        }
    }

    pub fn profile(&self) -> DifficultyProfile {
        match self {
            Difficulty::Easy => DifficultyProfile {
                tick_ms: 200.0,
                speed_ramp: false,
            },
            Difficulty::Normal => DifficultyProfile {
                tick_ms: 130.0,
                speed_ramp: true,
            },
            Difficulty::Hard => DifficultyProfile {
                tick_ms: 80.0,
                speed_ramp: true,
            },
            Difficulty::Insane => DifficultyProfile {
                tick_ms: 42.0,
                speed_ramp: false,
            },
        }
    }

    /// Time between logic ticks at the given level (ms)
    pub fn tick_interval_ms(&self, level: u32) -> f64 {
        let profile = self.profile();
        if profile.speed_ramp {
            let ramp = level.saturating_sub(1) as f64 * RAMP_PER_LEVEL_MS;
            (profile.tick_ms - ramp).max(MIN_TICK_MS)
        } else {
            profile.tick_ms
        }
    }
}
