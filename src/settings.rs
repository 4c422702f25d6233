//! Player-facing settings: difficulty and motion preferences
//!
//! Unlike [`crate::tuning::Tuning`], which holds balance numbers, these are
//! choices a player makes from the menu.

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Difficulty levels (only the hazard spawn rate changes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" | "medium" | "med" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Time between hazard spawn bursts
    pub fn spawn_interval_ms(&self, tuning: &Tuning) -> f64 {
        let intervals = &tuning.spawn.interval;
        match self {
            Difficulty::Easy => intervals.easy_ms,
            Difficulty::Normal => intervals.normal_ms,
            Difficulty::Hard => intervals.hard_ms,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub difficulty: Difficulty,
    /// Screen shake on asteroid impacts
    pub screen_shake: bool,
    /// Red overlay flash on asteroid impacts
    pub hurt_flash: bool,
    /// Reduced motion (disables shake and flashes)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,
            screen_shake: true,
            hurt_flash: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Effective hurt flash (respects reduced_motion)
    pub fn effective_hurt_flash(&self) -> bool {
        self.hurt_flash && !self.reduced_motion
    }
}
