//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering,
//! audio and platform code:
//! - Time enters only through the tick's `now_ms`/`elapsed_ms`
//! - Seeded RNG only
//! - Side effects leave as returned [`GameEvent`]s

pub mod autopilot;
pub mod collision;
pub mod effects;
pub mod events;
pub mod player;
pub mod resolve;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{circle_rect_collision, segment_circle_collision, shockwave_impulse};
pub use effects::{Explosion, FxTimers, Particle, ParticleColor, ShockwaveRing};
pub use events::{CometReason, ExplosionCause, GameEvent, HealSource};
pub use player::{Feedback, Player};
pub use state::{Camera, Comet, GamePhase, Hazard, HazardKind, MoonOrb, SessionState, Sparkle, VisualSeed};
pub use tick::{TickInput, tick};
