//! Astro Dodge - a survival arcade game
//!
//! Core modules:
//! - `sim`: Simulation (ship physics, spawning, collisions, game state)
//! - `game`: Loop driver and control surface (start, restart, difficulty)
//! - `platform`: Frame clock and input provider abstraction
//! - `render`: Per-frame view handed to an external renderer
//! - `audio`: Routing of simulation events to sound cues
//! - `tuning`: Data-driven game balance
//! - `settings`: Difficulty and player preferences

pub mod audio;
pub mod error;
pub mod game;
pub mod platform;
pub mod render;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::TuningError;
pub use game::Game;
pub use settings::{Difficulty, Settings};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Tick rate the per-tick tuning constants were calibrated against
    pub const REFERENCE_TICK_HZ: f32 = 60.0;

    /// Default canvas size used when the host does not supply one
    pub const DEFAULT_CANVAS_WIDTH: f32 = 1280.0;
    pub const DEFAULT_CANVAS_HEIGHT: f32 = 720.0;

    /// Pointer/touch drag distance (px) that maps to full input
    pub const DRAG_RADIUS: f32 = 60.0;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    if !angle.is_finite() {
        return 0.0;
    }
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Shortest signed rotation taking `from` to `to`, in [-π, π)
#[inline]
pub fn angle_delta(from: f32, to: f32) -> f32 {
    normalize_angle(to - from)
}

/// Unit vector for an angle
#[inline]
pub fn direction(theta: f32) -> Vec2 {
    Vec2::new(theta.cos(), theta.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_normalize_angle() {
        assert!((normalize_angle(3.0 * PI + 0.5) - (-PI + 0.5)).abs() < 1e-5);
        assert!((normalize_angle(-3.0 * PI - 0.5) - (PI - 0.5)).abs() < 1e-5);
        // Odd multiples of π land on either side of the seam after rounding
        assert!((normalize_angle(3.0 * PI).abs() - PI).abs() < 1e-5);
        assert!((normalize_angle(-PI / 2.0) + PI / 2.0).abs() < 1e-6);
        assert_eq!(normalize_angle(f32::NAN), 0.0);
    }

    #[test]
    fn test_angle_delta_takes_short_way() {
        // From just below +π to just above -π is a small positive step
        let d = angle_delta(PI - 0.1, -PI + 0.1);
        assert!((d - 0.2).abs() < 1e-5);
        let d = angle_delta(0.0, -PI / 2.0);
        assert!((d + PI / 2.0).abs() < 1e-6);
    }
}
