//! Game state and core simulation types
//!
//! All mutable session state lives in [`SessionState`]; the loop driver owns
//! it and lends it to the tick by exclusive reference.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::effects::{Explosion, FxTimers, ShockwaveRing};
use super::player::Player;
use crate::tuning::{CometTuning, Tuning};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the start trigger
    Menu,
    /// Active gameplay
    Playing,
    /// Run ended; decorative effects still play out
    GameOver,
}

/// Spawned hazard/pickup kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HazardKind {
    /// Damages the ship
    Asteroid,
    /// Restores a little health
    Heal,
    /// Temporary speed increase
    SpeedBoost,
}

/// Rendering-only shape data for an asteroid
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VisualSeed {
    /// Current rotation (radians)
    pub rotation: f32,
    /// Rotation per tick
    pub spin: f32,
    /// Radius multiplier per evenly spaced polygon vertex
    pub vertex_jitter: Vec<f32>,
}

/// A hazard or pickup drifting across the canvas
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hazard {
    pub id: u32,
    pub kind: HazardKind,
    /// Circle center
    pub pos: Vec2,
    /// Displacement per tick
    pub vel: Vec2,
    pub radius: f32,
    pub seed: VisualSeed,
}

impl Hazard {
    /// Move one tick along the current velocity
    pub fn advance(&mut self) {
        self.pos += self.vel;
        self.seed.rotation += self.seed.spin;
    }

    /// True once the hazard is more than `margin_radii` radii past any edge
    pub fn is_off_screen(&self, bounds: Vec2, margin_radii: f32) -> bool {
        let margin = self.radius * margin_radii;
        self.pos.x < -margin
            || self.pos.y < -margin
            || self.pos.x > bounds.x + margin
            || self.pos.y > bounds.y + margin
    }
}

/// The rare healing orb ("moon") that wanes over its lifetime
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoonOrb {
    pub pos: Vec2,
    pub radius: f32,
    pub spawn_ms: f64,
    pub lifetime_ms: f64,
}

impl MoonOrb {
    /// Remaining-lifetime fraction: 1 = full moon, 0 = gone
    pub fn phase(&self, now_ms: f64) -> f32 {
        if self.lifetime_ms <= 0.0 {
            return 0.0;
        }
        let remaining = (self.lifetime_ms - (now_ms - self.spawn_ms)).max(0.0);
        (remaining / self.lifetime_ms).min(1.0) as f32
    }

    pub fn is_expired(&self, now_ms: f64) -> bool {
        now_ms - self.spawn_ms >= self.lifetime_ms
    }
}

/// A dust mote shed by a comet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sparkle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub life_ticks: u32,
    /// Hue in degrees (pale cyan-blue)
    pub hue: f32,
}

/// A comet streaking across the screen; its trail destroys hazards
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comet {
    pub head: Vec2,
    /// Displacement per tick
    pub vel: Vec2,
    /// Trail length behind the head
    pub length: f32,
    /// Beam half-width used for collisions
    pub thickness: f32,
    pub glow: f32,
    pub life_ticks: i32,
    pub alive: bool,
    pub sparkles: Vec<Sparkle>,
}

impl Comet {
    /// End of the trail
    pub fn tail(&self) -> Vec2 {
        self.head - self.vel.normalize_or_zero() * self.length
    }

    /// Move one tick, shed and age sparkles, and die when spent or far off screen
    pub fn update<R: Rng + ?Sized>(&mut self, bounds: Vec2, tuning: &CometTuning, rng: &mut R) {
        self.head += self.vel;
        self.life_ticks -= 1;

        let every = tuning.sparkle_every_ticks.max(1) as i32;
        if self.life_ticks % every == 0 {
            let jitter = Vec2::new(rng.random::<f32>() - 0.5, rng.random::<f32>() - 0.5) * 0.4;
            self.sparkles.push(Sparkle {
                pos: self.head,
                vel: -self.vel * 0.1 + jitter,
                size: tuning.sparkle_size.sample(rng),
                life_ticks: tuning.sparkle_life_ticks.sample_floor(rng) as u32,
                hue: 205.0 + rng.random::<f32>() * 15.0,
            });
        }

        for s in &mut self.sparkles {
            s.pos += s.vel;
            s.vel *= tuning.sparkle_drag;
            s.life_ticks = s.life_ticks.saturating_sub(1);
        }
        self.sparkles.retain(|s| s.life_ticks > 0);

        let m = tuning.kill_margin;
        let off = self.head.x < -m || self.head.y < -m || self.head.x > bounds.x + m || self.head.y > bounds.y + m;
        if self.life_ticks <= 0 || off {
            self.alive = false;
        }
    }
}

/// Parallax camera following the ship
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Camera {
    pub offset: Vec2,
    /// Total parallax distance travelled this session
    pub world_distance: f32,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Canvas size
    pub bounds: Vec2,
    pub phase: GamePhase,
    /// Timestamp of the current tick (ms)
    pub now_ms: f64,
    pub start_ms: f64,
    /// Survival time frozen at game over
    pub final_duration_ms: f64,
    pub tick_count: u64,
    pub player: Player,
    /// Active hazards in spawn order
    pub hazards: Vec<Hazard>,
    pub last_spawn_ms: f64,
    pub spawn_interval_ms: f64,
    pub moon: Option<MoonOrb>,
    pub moon_cooldown_until_ms: f64,
    pub comet: Option<Comet>,
    pub next_comet_at_ms: f64,
    /// Heal count that last granted a comet (prevents double rewards)
    pub last_comet_heal_trigger: u32,
    pub explosion: Option<Explosion>,
    pub shockwaves: Vec<ShockwaveRing>,
    pub fx: FxTimers,
    pub camera: Camera,
    pub heals_consumed: u32,
    /// Heals that count toward permanent speed
    pub speed_bonus_heals: u32,
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl SessionState {
    /// Fresh session in the menu
    pub fn new(bounds: Vec2, tuning: &Tuning, spawn_interval_ms: f64, seed: u64) -> Self {
        Self {
            bounds,
            phase: GamePhase::Menu,
            now_ms: 0.0,
            start_ms: 0.0,
            final_duration_ms: 0.0,
            tick_count: 0,
            player: Player::spawn(bounds, tuning),
            hazards: Vec::new(),
            last_spawn_ms: 0.0,
            spawn_interval_ms,
            moon: None,
            moon_cooldown_until_ms: 0.0,
            comet: None,
            next_comet_at_ms: 0.0,
            last_comet_heal_trigger: 0,
            explosion: None,
            shockwaves: Vec::new(),
            fx: FxTimers::default(),
            camera: Camera::default(),
            heals_consumed: 0,
            speed_bonus_heals: 0,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_started(&self) -> bool {
        self.phase != GamePhase::Menu
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Survival time shown on the HUD
    pub fn survival_ms(&self) -> f64 {
        match self.phase {
            GamePhase::Menu => 0.0,
            GamePhase::Playing => (self.now_ms - self.start_ms).max(0.0),
            GamePhase::GameOver => self.final_duration_ms,
        }
    }

    /// Menu -> Playing
    pub fn start(&mut self, now_ms: f64) -> bool {
        if self.phase != GamePhase::Menu {
            return false;
        }
        self.phase = GamePhase::Playing;
        self.start_ms = now_ms;
        self.now_ms = now_ms;
        true
    }

    /// Clear every entity and timer and begin a fresh run
    ///
    /// The RNG stream continues so consecutive runs differ.
    pub fn restart(&mut self, now_ms: f64, tuning: &Tuning) {
        self.hazards.clear();
        self.moon = None;
        self.comet = None;
        self.explosion = None;
        self.shockwaves.clear();
        self.fx = FxTimers::default();
        self.camera = Camera::default();
        self.player = Player::spawn(self.bounds, tuning);
        self.last_spawn_ms = 0.0;
        self.moon_cooldown_until_ms = 0.0;
        self.next_comet_at_ms = 0.0;
        self.last_comet_heal_trigger = 0;
        self.heals_consumed = 0;
        self.speed_bonus_heals = 0;
        self.final_duration_ms = 0.0;
        self.phase = GamePhase::Playing;
        self.start_ms = now_ms;
        self.now_ms = now_ms;
    }
}
