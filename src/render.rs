//! Per-frame render snapshot
//!
//! Drawing belongs to the host. Each accepted frame the game captures a
//! [`FrameView`] with everything a renderer needs (poses, effects, HUD values
//! and state flags) and hands it to a [`Renderer`]. The view is plain data and
//! serializes to JSON for headless inspection.

use std::error::Error;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::settings::Settings;
use crate::sim::{Camera, Feedback, GamePhase, HazardKind, Particle, SessionState, Sparkle};
use crate::tuning::Tuning;

/// Host-side drawing surface
pub trait Renderer {
    fn draw(&mut self, view: &FrameView) -> Result<(), Box<dyn Error>>;
}

/// Ship pose and visual state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipView {
    pub pos: Vec2,
    pub size: Vec2,
    pub rotation: f32,
    pub thrust_intensity: f32,
    pub thrust_phase: f32,
    pub boosting: bool,
    pub feedback: Option<Feedback>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HazardView {
    pub id: u32,
    pub kind: HazardKind,
    pub pos: Vec2,
    pub radius: f32,
    pub rotation: f32,
    /// Per-vertex radius multipliers (asteroids only)
    pub vertex_jitter: Vec<f32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoonView {
    pub pos: Vec2,
    pub radius: f32,
    /// 1 = full, 0 = gone
    pub phase: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CometView {
    pub head: Vec2,
    pub tail: Vec2,
    pub thickness: f32,
    pub glow: f32,
    pub life_ticks: i32,
    pub sparkles: Vec<Sparkle>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RingView {
    pub center: Vec2,
    pub radius: f32,
    pub max_radius: f32,
    /// Fades from 1 to 0 as the ring reaches full size
    pub life: f32,
}

/// Heads-up display values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hud {
    pub health_percent: u8,
    /// Health at or below the critical threshold
    pub critical: bool,
    pub hits: u8,
    pub max_hits: u8,
    pub heals: u32,
    pub survival_ms: f64,
    /// `mm:ss`
    pub survival_text: String,
}

impl Hud {
    pub fn capture(state: &SessionState, tuning: &Tuning) -> Self {
        let player = &state.player;
        let fraction = if player.max_health > 0.0 {
            player.health / player.max_health
        } else {
            0.0
        };
        let survival_ms = state.survival_ms();
        Self {
            health_percent: (fraction * 100.0).round().clamp(0.0, 100.0) as u8,
            critical: fraction <= tuning.critical_health,
            hits: player.hit_count,
            max_hits: tuning.combat.max_hits,
            heals: state.heals_consumed,
            survival_ms,
            survival_text: format_survival_time(survival_ms),
        }
    }
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameView {
    pub bounds: Vec2,
    pub phase: GamePhase,
    pub started: bool,
    pub over: bool,
    pub camera: Camera,
    /// Max shake offset in px (0 when disabled in settings)
    pub shake_intensity: f32,
    /// Red overlay alpha (0 when disabled in settings)
    pub hurt_alpha: f32,
    pub ship: ShipView,
    pub hazards: Vec<HazardView>,
    pub moon: Option<MoonView>,
    pub comet: Option<CometView>,
    pub particles: Vec<Particle>,
    pub rings: Vec<RingView>,
    pub hud: Hud,
}

impl FrameView {
    pub fn capture(state: &SessionState, tuning: &Tuning, settings: &Settings) -> Self {
        let player = &state.player;
        let ship = ShipView {
            pos: player.pos,
            size: player.size,
            rotation: player.rotation,
            thrust_intensity: player.thrust_intensity(),
            thrust_phase: player.thrust_phase,
            boosting: player.is_boosting(),
            feedback: player.feedback,
        };

        let hazards = state
            .hazards
            .iter()
            .map(|h| HazardView {
                id: h.id,
                kind: h.kind,
                pos: h.pos,
                radius: h.radius,
                rotation: h.seed.rotation,
                vertex_jitter: h.seed.vertex_jitter.clone(),
            })
            .collect();

        let moon = state.moon.as_ref().map(|m| MoonView {
            pos: m.pos,
            radius: m.radius,
            phase: m.phase(state.now_ms),
        });

        let comet = state.comet.as_ref().map(|c| CometView {
            head: c.head,
            tail: c.tail(),
            thickness: c.thickness,
            glow: c.glow,
            life_ticks: c.life_ticks,
            sparkles: c.sparkles.clone(),
        });

        let particles = state
            .explosion
            .as_ref()
            .map(|e| e.particles.iter().filter(|p| p.life > 0).cloned().collect())
            .unwrap_or_default();

        let rings = state
            .shockwaves
            .iter()
            .map(|r| RingView {
                center: r.center,
                radius: r.radius,
                max_radius: r.max_radius,
                life: r.life(),
            })
            .collect();

        let shake_intensity = if settings.effective_screen_shake() {
            state.fx.shake_intensity(&tuning.fx)
        } else {
            0.0
        };
        let hurt_alpha = if settings.effective_hurt_flash() {
            state.fx.hurt_alpha(&tuning.fx)
        } else {
            0.0
        };

        Self {
            bounds: state.bounds,
            phase: state.phase,
            started: state.is_started(),
            over: state.is_over(),
            camera: state.camera,
            shake_intensity,
            hurt_alpha,
            ship,
            hazards,
            moon,
            comet,
            particles,
            rings,
            hud: Hud::capture(state, tuning),
        }
    }
}

/// Survival time as zero-padded `mm:ss`
pub fn format_survival_time(ms: f64) -> String {
    let total_secs = (ms.max(0.0) / 1000.0).floor() as u64;
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}
