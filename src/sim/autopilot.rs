//! Demo-mode pilot
//!
//! Produces an input axis the same way a player would: dodge asteroids whose
//! short-term path passes near the ship, otherwise chase the nearest pickup,
//! otherwise drift back to a resting spot low on the screen.

use glam::Vec2;

use super::collision::closest_point_on_segment;
use super::state::{HazardKind, SessionState};

/// How far ahead (in ticks) asteroid paths are projected
const LOOKAHEAD_TICKS: f32 = 30.0;
/// Clearance below which an asteroid path starts to repel
const DANGER_RADIUS: f32 = 90.0;
/// Distance to a target that counts as arrived
const ARRIVE_RADIUS: f32 = 8.0;

/// Input axis for the current state, each component in [-1, 1]
pub fn steer(state: &SessionState) -> Vec2 {
    let ship = state.player.pos;

    let mut push = Vec2::ZERO;
    for hazard in state.hazards.iter().filter(|h| h.kind == HazardKind::Asteroid) {
        let ahead = hazard.pos + hazard.vel * LOOKAHEAD_TICKS;
        let closest = closest_point_on_segment(ship, hazard.pos, ahead);
        let away = ship - closest;
        let clearance = away.length() - hazard.radius;
        if clearance >= DANGER_RADIUS {
            continue;
        }
        let weight = 1.0 - clearance.max(0.0) / DANGER_RADIUS;
        // Dead on the path: sidestep
        let dir = away.try_normalize().unwrap_or_else(|| hazard.vel.perp().normalize_or_zero());
        push += dir * weight;
    }
    if push.length_squared() > 0.01 {
        return push.clamp(Vec2::NEG_ONE, Vec2::ONE);
    }

    let pickups = state
        .hazards
        .iter()
        .filter(|h| h.kind != HazardKind::Asteroid)
        .map(|h| h.pos);
    let target = pickups
        .chain(state.moon.as_ref().map(|m| m.pos))
        .filter(|p| p.x >= 0.0 && p.y >= 0.0 && p.x <= state.bounds.x && p.y <= state.bounds.y)
        .min_by(|a, b| a.distance_squared(ship).total_cmp(&b.distance_squared(ship)))
        .unwrap_or(state.bounds * Vec2::new(0.5, 0.75));

    let to = target - ship;
    if to.length() < ARRIVE_RADIUS {
        return Vec2::ZERO;
    }
    to.normalize_or_zero()
}
