//! Domain events emitted by a tick
//!
//! The simulation never calls audio or UI code directly. Each tick returns the
//! events it produced, in the order they happened, and the presentation layer
//! reacts to them.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Where a heal came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealSource {
    Pickup,
    Moon,
}

/// Why a comet appeared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CometReason {
    /// Random roll when a spawn window opened
    Window,
    /// Reward for a heal pickup
    HealReward,
}

/// What blew up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExplosionCause {
    /// A comet trail destroyed a hazard
    CometStrike,
    /// The ship was destroyed
    ShipDestroyed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// An asteroid struck the ship
    AsteroidHit { hit_count: u8, health: f32 },
    Healed { source: HealSource, amount: f32 },
    SpeedBoost { amount: f32 },
    CometSpawned { reason: CometReason },
    Explosion { pos: Vec2, cause: ExplosionCause },
    /// The run ended; emitted once per session
    GameOver { survived_ms: f64 },
    /// The ship started moving
    EngineStarted,
    /// The ship came to rest (or the run ended)
    EngineStopped,
    MoonAppeared { pos: Vec2 },
    MoonFaded,
}
