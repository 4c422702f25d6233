//! Visual feedback state: explosions, shockwave rings, shake and hurt flash
//!
//! None of this affects gameplay except the shockwave impulse, which lives in
//! `collision` and is applied by the resolver.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::tuning::FxTuning;

/// Explosion particle palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleColor {
    Yellow,
    Orange,
    White,
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: ParticleColor,
    /// Ticks remaining
    pub life: i32,
    pub size: f32,
}

/// A one-shot particle burst
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explosion {
    pub particles: Vec<Particle>,
    pub done: bool,
}

impl Explosion {
    /// Burst of particles flying out from `center` in random directions
    pub fn burst<R: Rng + ?Sized>(center: Vec2, tuning: &FxTuning, rng: &mut R) -> Self {
        let particles = (0..tuning.explosion_particles)
            .map(|i| {
                let angle = rng.random::<f32>() * std::f32::consts::TAU;
                let speed = tuning.particle_speed.sample(rng);
                let color = match i % 3 {
                    0 => ParticleColor::Yellow,
                    1 => ParticleColor::Orange,
                    _ => ParticleColor::White,
                };
                Particle {
                    pos: center,
                    vel: crate::direction(angle) * speed,
                    color,
                    life: tuning.particle_life_ticks.sample_floor(rng) as i32,
                    size: tuning.particle_size.sample(rng),
                }
            })
            .collect();
        Self {
            particles,
            done: false,
        }
    }

    /// Advance live particles one tick; `done` once every particle is spent
    pub fn update(&mut self, tuning: &FxTuning) {
        for p in self.particles.iter_mut().filter(|p| p.life > 0) {
            p.pos += p.vel;
            p.vel *= tuning.particle_drag;
            p.vel.y += tuning.particle_gravity;
            p.life -= 1;
        }
        self.done = self.particles.iter().all(|p| p.life <= 0);
    }
}

/// Expanding ring drawn where a comet destroyed something
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShockwaveRing {
    pub center: Vec2,
    pub radius: f32,
    pub max_radius: f32,
}

impl ShockwaveRing {
    pub fn new(center: Vec2, max_radius: f32) -> Self {
        Self {
            center,
            radius: 0.0,
            max_radius,
        }
    }

    pub fn update(&mut self, growth: f32) {
        self.radius += growth;
    }

    pub fn is_done(&self) -> bool {
        self.radius >= self.max_radius
    }

    /// Remaining strength, 1 at birth to 0 at full size
    pub fn life(&self) -> f32 {
        (1.0 - self.radius / self.max_radius).max(0.0)
    }
}

/// Millisecond timers for screen shake and the red hurt overlay
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct FxTimers {
    pub shake_ms: f64,
    pub hurt_flash_ms: f64,
}

impl FxTimers {
    /// Start both impact effects
    pub fn trigger_hit(&mut self, tuning: &FxTuning) {
        self.shake_ms = tuning.shake_duration_ms;
        self.hurt_flash_ms = tuning.hurt_flash_duration_ms;
    }

    pub fn decay(&mut self, elapsed_ms: f64) {
        self.shake_ms = (self.shake_ms - elapsed_ms).max(0.0);
        self.hurt_flash_ms = (self.hurt_flash_ms - elapsed_ms).max(0.0);
    }

    /// Maximum shake offset in pixels for this frame
    pub fn shake_intensity(&self, tuning: &FxTuning) -> f32 {
        if self.shake_ms <= 0.0 {
            return 0.0;
        }
        let t = (self.shake_ms / tuning.fx_full_strength_ms).min(1.0) as f32;
        tuning.shake_intensity_px * t
    }

    /// Alpha of the red overlay
    pub fn hurt_alpha(&self, tuning: &FxTuning) -> f32 {
        if self.hurt_flash_ms <= 0.0 {
            return 0.0;
        }
        let a = (self.hurt_flash_ms / tuning.fx_full_strength_ms) as f32 * tuning.hurt_flash_max_alpha;
        a.clamp(0.0, tuning.hurt_flash_max_alpha)
    }
}
