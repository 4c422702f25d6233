//! The player's ship
//!
//! Motion is integrated with time-scaled acceleration and friction, but the
//! tuning constants were calibrated against a 60 Hz tick, so displacement is
//! `velocity * dt * 60`. The linear drag applied after friction is per tick,
//! not per second, which makes it relatively stronger at low tick rates.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::angle_delta;
use crate::consts::REFERENCE_TICK_HZ;
use crate::tuning::{PlayerTuning, SpeedBoostTuning, Tuning};

/// Colour tag for the short flash after a pickup or impact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Feedback {
    Hit,
    Heal,
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Center of the ship
    pub pos: Vec2,
    pub vel: Vec2,
    /// Width and height of the (unrotated) ship
    pub size: Vec2,
    pub rotation: f32,
    pub target_rotation: f32,
    /// Current speed cap, including any active boost
    pub max_speed: f32,
    /// Speed cap without boost (grows with heals)
    pub base_max_speed: f32,
    /// Extra speed while the boost timer runs
    pub boost_amount: f32,
    pub boost_remaining_ms: f64,
    pub health: f32,
    pub max_health: f32,
    pub hit_count: u8,
    pub feedback: Option<Feedback>,
    pub feedback_ticks: u32,
    /// Thruster flicker animation phase
    pub thrust_phase: f32,
    /// Whether the ship was moving at the end of the last tick
    pub engine_on: bool,
}

impl Player {
    /// New ship centered horizontally near the bottom of the canvas
    pub fn spawn(bounds: Vec2, tuning: &Tuning) -> Self {
        let p = &tuning.player;
        let size = Vec2::new(p.width, p.height);
        let pos = Vec2::new(
            bounds.x / 2.0,
            bounds.y - p.spawn_bottom_margin - p.height / 2.0,
        );
        Self {
            pos,
            vel: Vec2::ZERO,
            size,
            rotation: 0.0,
            target_rotation: 0.0,
            max_speed: tuning.speed.base,
            base_max_speed: tuning.speed.base,
            boost_amount: 0.0,
            boost_remaining_ms: 0.0,
            health: p.max_health,
            max_health: p.max_health,
            hit_count: 0,
            feedback: None,
            feedback_ticks: 0,
            thrust_phase: 0.0,
            engine_on: false,
        }
    }

    /// Top-left corner of the axis-aligned collision box
    pub fn rect_min(&self) -> Vec2 {
        self.pos - self.size / 2.0
    }

    /// Half of the bounding-box diagonal (keeps a rotated sprite on screen)
    pub fn half_diagonal(&self) -> f32 {
        self.size.length() / 2.0
    }

    pub fn is_boosting(&self) -> bool {
        self.boost_remaining_ms > 0.0
    }

    /// Thruster intensity for rendering (0..~1.5)
    pub fn thrust_intensity(&self) -> f32 {
        let speed = self.vel.length();
        let cap = if self.max_speed > 0.0 { self.max_speed } else { 1.0 };
        let boost = if self.is_boosting() { 0.4 } else { 0.0 };
        (speed / cap).min(1.0) * 1.1 + boost
    }

    /// Advance the ship by one tick
    ///
    /// `axis` must already be sanitized to [-1, 1]².
    pub fn integrate(&mut self, dt: f32, axis: Vec2, bounds: Vec2, tuning: &PlayerTuning) {
        let ticks = dt * REFERENCE_TICK_HZ;

        if axis != Vec2::ZERO {
            self.target_rotation = axis.y.atan2(axis.x);
        }

        // Acceleration from input (per-second feel)
        let accel = tuning.acceleration * REFERENCE_TICK_HZ;
        self.vel += axis * accel * dt;
        self.vel = clamp_speed(self.vel, self.max_speed);

        // Exponential friction
        self.vel *= tuning.friction.powf(ticks);

        self.pos += self.vel * ticks;
        self.thrust_phase += tuning.thrust_phase_step;
        self.clamp_to_bounds(bounds);

        // First-order low-pass toward the target heading
        let diff = angle_delta(self.rotation, self.target_rotation);
        self.rotation += diff * tuning.rotation_smoothing;

        // Per-tick linear drag, independent of dt
        self.vel.x = approach_zero(self.vel.x, tuning.deceleration);
        self.vel.y = approach_zero(self.vel.y, tuning.deceleration);

        if self.health > 0.0 {
            self.health = (self.health - tuning.health_drain_per_tick).max(0.0);
        }

        if self.feedback_ticks > 0 {
            self.feedback_ticks -= 1;
            if self.feedback_ticks == 0 {
                self.feedback = None;
            }
        }

        if self.boost_remaining_ms > 0.0 {
            self.boost_remaining_ms = (self.boost_remaining_ms - dt as f64 * 1000.0).max(0.0);
            self.max_speed = self.base_max_speed + self.boost_amount;
        } else {
            self.max_speed = self.base_max_speed;
        }
    }

    /// Keep the ship center at least half a diagonal inside the canvas
    fn clamp_to_bounds(&mut self, bounds: Vec2) {
        let margin = self.half_diagonal();
        // Sequential min/max rather than `clamp`, which panics when the
        // canvas is narrower than the ship.
        self.pos.x = self.pos.x.max(margin).min(bounds.x - margin);
        self.pos.y = self.pos.y.max(margin).min(bounds.y - margin);
    }

    /// Start (or extend) a speed boost scaled by ship size
    pub fn apply_speed_boost(&mut self, tuning: &SpeedBoostTuning) {
        let size_scale = if tuning.use_diagonal {
            self.size.length() / tuning.reference_width.hypot(tuning.reference_height)
        } else {
            (self.size.x * self.size.y) / (tuning.reference_width * tuning.reference_height)
        };
        let base = if self.base_max_speed > 0.0 {
            self.base_max_speed
        } else {
            self.max_speed
        };

        self.boost_amount = base * tuning.amount_factor * size_scale;
        self.boost_remaining_ms = self.boost_remaining_ms.max(tuning.duration_ms);
    }

    /// Start the short colour flash used by the renderer
    pub fn trigger_feedback(&mut self, kind: Feedback, ticks: u32) {
        self.feedback = Some(kind);
        self.feedback_ticks = ticks;
    }

    /// Add health, capped at max
    pub fn heal(&mut self, amount: f32) {
        self.health = (self.health + amount).min(self.max_health);
    }

    /// Set a new base speed; the live cap follows unless a boost is active
    pub fn set_base_speed(&mut self, speed: f32) {
        self.base_max_speed = speed;
        if !self.is_boosting() {
            self.max_speed = speed;
        }
    }

    /// Whether either velocity component is above the threshold
    pub fn is_moving(&self, threshold: f32) -> bool {
        self.vel.x.abs() > threshold || self.vel.y.abs() > threshold
    }
}

/// Rescale `vel` so its magnitude does not exceed `max` (direction kept)
pub fn clamp_speed(vel: Vec2, max: f32) -> Vec2 {
    let speed = vel.length();
    if speed > max && speed > 0.0 {
        vel * (max / speed)
    } else {
        vel
    }
}

/// Move `v` toward zero by `step` without crossing it
fn approach_zero(v: f32, step: f32) -> f32 {
    if v > 0.0 {
        (v - step).max(0.0)
    } else if v < 0.0 {
        (v + step).min(0.0)
    } else {
        v
    }
}
