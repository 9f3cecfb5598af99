//! Best score across sessions
//!
//! Persisted as a plain integer string under `synx_hi`.

use crate::persistence::{KeyValueStore, storage_get, storage_set};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HighScore {
    pub best: u64,
}

impl HighScore {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "synx_hi";

    pub fn new(best: u64) -> Self {
        Self { best }
    }

    /// Parse a stored value; anything unreadable counts as zero
    pub fn parse(raw: &str) -> Self {
        Self::new(raw.trim().parse().unwrap_or(0))
    }

    /// Load from the store, defaulting to zero
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let score = Self::parse(&storage_get(store, Self::STORAGE_KEY, "0"));
        log::info!("Loaded high score {}", score.best);
        score
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) {
        storage_set(store, Self::STORAGE_KEY, &self.best.to_string());
        log::info!("High score saved ({})", self.best);
    }

    /// Record a finished run. Returns true if it beat the previous best.
    pub fn submit(&mut self, score: u64) -> bool {
        if score > self.best {
            self.best = score;
            true
        } else {
            false
        }
    }
}
