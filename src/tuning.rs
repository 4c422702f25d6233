//! Data-driven game balance
//!
//! Every numeric knob of the game lives in [`Tuning`]. Defaults reproduce the
//! shipped balance; a JSON document can override any subset of fields, and
//! missing keys fall back to the defaults (`#[serde(default)]` on every
//! section).
//!
//! Spatial values are in canvas pixels, speeds in pixels per reference tick
//! (60 Hz), durations in milliseconds unless the name says `ticks`.

use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{TuningError, TuningResult, ensure_positive, ensure_probability, ensure_range};

/// A closed `[min, max]` interval, written as a two-element array in JSON.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 2]", into = "[f32; 2]")]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Uniform sample in `[min, max)`
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        self.min + rng.random::<f32>() * (self.max - self.min)
    }

    /// Uniform sample rounded down to a whole number
    pub fn sample_floor<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        self.min + (rng.random::<f32>() * (self.max - self.min)).floor()
    }

    fn check(&self, name: &'static str) -> TuningResult<()> {
        ensure_range(name, self.min as f64, self.max as f64)
    }
}

impl From<[f32; 2]> for Span {
    fn from([min, max]: [f32; 2]) -> Self {
        Self { min, max }
    }
}

impl From<Span> for [f32; 2] {
    fn from(span: Span) -> Self {
        [span.min, span.max]
    }
}

/// Ship handling
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub width: f32,
    pub height: f32,
    /// Gap between the ship and the bottom edge at spawn
    pub spawn_bottom_margin: f32,
    /// Velocity added per reference tick at full input
    pub acceleration: f32,
    /// Velocity retained per reference tick (applied as `friction^(dt*60)`)
    pub friction: f32,
    /// Linear drag subtracted from each axis once per tick (not time-scaled)
    pub deceleration: f32,
    /// Fraction of the remaining heading error closed each tick
    pub rotation_smoothing: f32,
    pub max_health: f32,
    pub health_drain_per_tick: f32,
    pub feedback_ticks: u32,
    /// Thrust animation phase advance per tick
    pub thrust_phase_step: f32,
    /// Per-axis speed above which the engine counts as running
    pub moving_threshold: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            width: 52.0,
            height: 26.0,
            spawn_bottom_margin: 20.0,
            acceleration: 1.0,
            friction: 0.88,
            deceleration: 0.2,
            rotation_smoothing: 0.1,
            max_health: 1.0,
            health_drain_per_tick: 0.0001,
            feedback_ticks: 12,
            thrust_phase_step: 0.3,
            moving_threshold: 0.1,
        }
    }
}

/// Speed-boost pickup effect
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedBoostTuning {
    pub duration_ms: f64,
    /// Fraction of base speed added for a ship of reference size
    pub amount_factor: f32,
    pub reference_width: f32,
    pub reference_height: f32,
    /// Scale by diagonal ratio (true) or area ratio (false)
    pub use_diagonal: bool,
}

impl Default for SpeedBoostTuning {
    fn default() -> Self {
        Self {
            duration_ms: 3500.0,
            amount_factor: 0.5,
            reference_width: 52.0,
            reference_height: 26.0,
            use_diagonal: true,
        }
    }
}

/// Hazard spawn interval per difficulty
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnIntervals {
    pub easy_ms: f64,
    pub normal_ms: f64,
    pub hard_ms: f64,
}

impl Default for SpawnIntervals {
    fn default() -> Self {
        Self {
            easy_ms: 1200.0,
            normal_ms: 800.0,
            hard_ms: 500.0,
        }
    }
}

/// Hazard and pickup spawning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnTuning {
    pub interval: SpawnIntervals,
    pub burst_min: u32,
    pub burst_max: u32,
    pub speed_boost_chance: f32,
    /// Share of non-boost spawns that are asteroids (rest are heals)
    pub asteroid_chance: f32,
    pub small_weight: f32,
    pub medium_weight: f32,
    pub small_radius: Span,
    pub medium_radius: Span,
    pub large_radius: Span,
    pub pickup_radius: Span,
    pub speed: Span,
    pub asteroid_speed_multiplier: f32,
    /// Radius at which an asteroid moves at the unscaled speed
    pub asteroid_reference_radius: f32,
    pub asteroid_min_size_factor: f32,
    pub asteroid_vertices_min: u32,
    pub asteroid_vertices_max: u32,
    pub asteroid_jitter: Span,
    /// Max spin in radians per tick (sampled in `[-spin, spin)`)
    pub asteroid_spin: f32,
    /// Entities are spawned this many radii outside the edge
    pub edge_offset_radii: f32,
    /// Entities are culled once this many radii beyond any edge
    pub cull_margin_radii: f32,
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self {
            interval: SpawnIntervals::default(),
            burst_min: 1,
            burst_max: 3,
            speed_boost_chance: 0.12,
            asteroid_chance: 0.9,
            small_weight: 0.5,
            medium_weight: 0.35,
            small_radius: Span::new(8.0, 16.0),
            medium_radius: Span::new(16.0, 30.0),
            large_radius: Span::new(30.0, 50.0),
            pickup_radius: Span::new(10.0, 26.0),
            speed: Span::new(1.5, 3.7),
            asteroid_speed_multiplier: 2.0,
            asteroid_reference_radius: 22.0,
            asteroid_min_size_factor: 0.6,
            asteroid_vertices_min: 8,
            asteroid_vertices_max: 12,
            asteroid_jitter: Span::new(0.6, 1.2),
            asteroid_spin: 0.01,
            edge_offset_radii: 2.0,
            cull_margin_radii: 3.0,
        }
    }
}

/// Rare healing "moon" orb
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MoonTuning {
    /// Per-tick spawn probability while eligible
    pub spawn_chance: f32,
    pub cooldown_ms: Span,
    pub radius: f32,
    pub lifetime_ms: Span,
    pub edge_padding: f32,
}

impl Default for MoonTuning {
    fn default() -> Self {
        Self {
            spawn_chance: 0.003,
            cooldown_ms: Span::new(10_000.0, 20_000.0),
            radius: 40.0,
            lifetime_ms: Span::new(8_000.0, 14_000.0),
            edge_padding: 4.0,
        }
    }
}

/// Comets
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CometTuning {
    /// Probability of a comet when a spawn window opens
    pub window_chance: f32,
    pub window_delay_ms: Span,
    /// A comet is also granted every N cumulative heals
    pub heal_trigger_every: u32,
    pub length: Span,
    pub thickness: Span,
    pub speed: Span,
    pub life_ticks: Span,
    pub glow: f32,
    pub min_margin: f32,
    /// Comets die once this far outside the canvas
    pub kill_margin: f32,
    pub sparkle_every_ticks: u32,
    pub sparkle_life_ticks: Span,
    pub sparkle_size: Span,
    pub sparkle_drag: f32,
}

impl Default for CometTuning {
    fn default() -> Self {
        Self {
            window_chance: 0.01,
            window_delay_ms: Span::new(5_000.0, 15_000.0),
            heal_trigger_every: 5,
            length: Span::new(180.0, 300.0),
            thickness: Span::new(3.0, 5.0),
            speed: Span::new(9.0, 15.0),
            life_ticks: Span::new(160.0, 240.0),
            glow: 18.0,
            min_margin: 40.0,
            kill_margin: 200.0,
            sparkle_every_ticks: 3,
            sparkle_life_ticks: Span::new(18.0, 32.0),
            sparkle_size: Span::new(1.0, 3.0),
            sparkle_drag: 0.98,
        }
    }
}

/// Feedback effects
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FxTuning {
    pub shockwave_radius: f32,
    pub shockwave_strength: f32,
    pub ring_max_radius: f32,
    pub ring_growth_per_tick: f32,
    pub shake_duration_ms: f64,
    pub shake_intensity_px: f32,
    /// Timer value at which shake and flash reach full strength
    pub fx_full_strength_ms: f64,
    pub hurt_flash_duration_ms: f64,
    pub hurt_flash_max_alpha: f32,
    pub explosion_particles: u32,
    pub particle_speed: Span,
    pub particle_life_ticks: Span,
    pub particle_size: Span,
    pub particle_drag: f32,
    pub particle_gravity: f32,
}

impl Default for FxTuning {
    fn default() -> Self {
        Self {
            shockwave_radius: 200.0,
            shockwave_strength: 8.0,
            ring_max_radius: 220.0,
            ring_growth_per_tick: 6.0,
            shake_duration_ms: 250.0,
            shake_intensity_px: 6.0,
            fx_full_strength_ms: 300.0,
            hurt_flash_duration_ms: 180.0,
            hurt_flash_max_alpha: 0.35,
            explosion_particles: 80,
            particle_speed: Span::new(2.0, 7.0),
            particle_life_ticks: Span::new(40.0, 70.0),
            particle_size: Span::new(2.0, 5.0),
            particle_drag: 0.98,
            particle_gravity: 0.02,
        }
    }
}

/// Damage, healing and run-ending rules
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatTuning {
    pub asteroid_damage: f32,
    pub heal_amount: f32,
    pub max_hits: u8,
}

impl Default for CombatTuning {
    fn default() -> Self {
        Self {
            asteroid_damage: 1.0 / 3.0,
            heal_amount: 0.1,
            max_hits: 3,
        }
    }
}

/// Permanent speed gained from heals
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedScalingTuning {
    pub base: f32,
    pub per_heal: f32,
    pub cap: f32,
}

impl Default for SpeedScalingTuning {
    fn default() -> Self {
        Self {
            base: 25.0,
            per_heal: 0.3,
            cap: 35.0,
        }
    }
}

impl SpeedScalingTuning {
    /// Base max speed after `bonus_heals` cumulative heals
    pub fn speed_for(&self, bonus_heals: u32) -> f32 {
        (self.base + bonus_heals as f32 * self.per_heal).min(self.cap)
    }
}

/// Complete game tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub player: PlayerTuning,
    pub speed_boost: SpeedBoostTuning,
    pub spawn: SpawnTuning,
    pub moon: MoonTuning,
    pub comet: CometTuning,
    pub fx: FxTuning,
    pub combat: CombatTuning,
    pub speed: SpeedScalingTuning,
    /// Background movement relative to ship movement
    pub parallax_factor: f32,
    /// Simulation ticks per second the loop driver aims for
    pub target_tick_hz: f64,
    /// Health fraction at or below which the HUD shows the critical state
    pub critical_health: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player: PlayerTuning::default(),
            speed_boost: SpeedBoostTuning::default(),
            spawn: SpawnTuning::default(),
            moon: MoonTuning::default(),
            comet: CometTuning::default(),
            fx: FxTuning::default(),
            combat: CombatTuning::default(),
            speed: SpeedScalingTuning::default(),
            parallax_factor: 0.5,
            target_tick_hz: 100.0,
            critical_health: 0.25,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON tuning document and validate it
    pub fn from_json(json: &str) -> TuningResult<Self> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read and validate a JSON tuning file
    pub fn load(path: impl AsRef<Path>) -> TuningResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| TuningError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> TuningResult<()> {
        let p = &self.player;
        ensure_positive("player.width", p.width as f64)?;
        ensure_positive("player.height", p.height as f64)?;
        ensure_positive("player.max_health", p.max_health as f64)?;
        ensure_positive("speed_boost.reference_width", self.speed_boost.reference_width as f64)?;
        ensure_positive("speed_boost.reference_height", self.speed_boost.reference_height as f64)?;

        let s = &self.spawn;
        ensure_positive("spawn.interval.easy_ms", s.interval.easy_ms)?;
        ensure_positive("spawn.interval.normal_ms", s.interval.normal_ms)?;
        ensure_positive("spawn.interval.hard_ms", s.interval.hard_ms)?;
        ensure_range("spawn.burst", s.burst_min as f64, s.burst_max as f64)?;
        ensure_probability("spawn.speed_boost_chance", s.speed_boost_chance as f64)?;
        ensure_probability("spawn.asteroid_chance", s.asteroid_chance as f64)?;
        ensure_probability(
            "spawn.small_weight + spawn.medium_weight",
            (s.small_weight + s.medium_weight) as f64,
        )?;
        s.small_radius.check("spawn.small_radius")?;
        s.medium_radius.check("spawn.medium_radius")?;
        s.large_radius.check("spawn.large_radius")?;
        s.pickup_radius.check("spawn.pickup_radius")?;
        s.speed.check("spawn.speed")?;
        s.asteroid_jitter.check("spawn.asteroid_jitter")?;
        ensure_positive("spawn.small_radius.min", s.small_radius.min as f64)?;
        ensure_positive("spawn.pickup_radius.min", s.pickup_radius.min as f64)?;
        ensure_positive("spawn.asteroid_reference_radius", s.asteroid_reference_radius as f64)?;
        ensure_range(
            "spawn.asteroid_vertices",
            s.asteroid_vertices_min as f64,
            s.asteroid_vertices_max as f64,
        )?;

        let m = &self.moon;
        ensure_probability("moon.spawn_chance", m.spawn_chance as f64)?;
        ensure_positive("moon.radius", m.radius as f64)?;
        m.cooldown_ms.check("moon.cooldown_ms")?;
        m.lifetime_ms.check("moon.lifetime_ms")?;
        ensure_positive("moon.lifetime_ms.min", m.lifetime_ms.min as f64)?;

        let c = &self.comet;
        ensure_probability("comet.window_chance", c.window_chance as f64)?;
        ensure_positive("comet.heal_trigger_every", c.heal_trigger_every as f64)?;
        ensure_positive("comet.sparkle_every_ticks", c.sparkle_every_ticks as f64)?;
        c.window_delay_ms.check("comet.window_delay_ms")?;
        c.length.check("comet.length")?;
        c.thickness.check("comet.thickness")?;
        c.speed.check("comet.speed")?;
        ensure_positive("comet.speed.min", c.speed.min as f64)?;
        c.life_ticks.check("comet.life_ticks")?;

        let fx = &self.fx;
        ensure_positive("fx.shockwave_radius", fx.shockwave_radius as f64)?;
        ensure_positive("fx.ring_max_radius", fx.ring_max_radius as f64)?;
        ensure_positive("fx.ring_growth_per_tick", fx.ring_growth_per_tick as f64)?;
        ensure_positive("fx.fx_full_strength_ms", fx.fx_full_strength_ms)?;
        fx.particle_speed.check("fx.particle_speed")?;
        fx.particle_life_ticks.check("fx.particle_life_ticks")?;

        ensure_positive("combat.max_hits", self.combat.max_hits as f64)?;
        ensure_range("speed.base..cap", self.speed.base as f64, self.speed.cap as f64)?;
        ensure_positive("target_tick_hz", self.target_tick_hz)?;
        Ok(())
    }

    /// Minimum time between accepted ticks
    pub fn target_interval_ms(&self) -> f64 {
        1000.0 / self.target_tick_hz
    }
}
