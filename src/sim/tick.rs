//! Per-frame simulation tick
//!
//! One accepted frame advances the session exactly once, in a fixed order:
//! camera, ship, spawners, hazards, moon, comet, explosion, timers, rings.
//! Later stages observe the effects of earlier ones within the same tick.

use glam::Vec2;

use super::collision::{circle_rect_collision, segment_circle_collision};
use super::events::GameEvent;
use super::resolve::{comet_strike, consume_moon, player_contact};
use super::spawn::{comet_window_delay, open_comet_window, retire_moon, spawn_hazards, spawn_moon};
use super::state::{GamePhase, SessionState};
use crate::consts::REFERENCE_TICK_HZ;
use crate::tuning::Tuning;

/// Input for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Steering axis, each component already sanitized to [-1, 1]
    pub axis: Vec2,
}

/// Advance the session by one tick
///
/// `now_ms` is the frame timestamp and `elapsed_ms` the time since the
/// previously accepted frame. Returns the events produced, in order.
pub fn tick(state: &mut SessionState, tuning: &Tuning, input: &TickInput, now_ms: f64, elapsed_ms: f64) -> Vec<GameEvent> {
    let mut events = Vec::new();
    state.now_ms = now_ms;
    state.tick_count += 1;
    let dt = (elapsed_ms / 1000.0) as f32;

    if state.phase == GamePhase::Playing {
        follow_camera(state, tuning, dt);
        state.player.integrate(dt, input.axis, state.bounds, &tuning.player);
        update_engine(state, tuning, &mut events);

        spawn_hazards(state, tuning);
        spawn_moon(state, tuning, &mut events);
        open_comet_window(state, tuning, &mut events);
    }

    update_hazards(state, tuning, &mut events);
    update_moon(state, tuning, &mut events);
    update_comet(state, tuning, &mut events);

    if let Some(explosion) = state.explosion.as_mut() {
        explosion.update(&tuning.fx);
        if explosion.done {
            state.explosion = None;
        }
    }

    state.fx.decay(elapsed_ms);

    for ring in &mut state.shockwaves {
        ring.update(tuning.fx.ring_growth_per_tick);
    }
    state.shockwaves.retain(|r| !r.is_done());

    events
}

/// Scroll the background by the ship's last screen displacement
fn follow_camera(state: &mut SessionState, tuning: &Tuning, dt: f32) {
    let shift = state.player.vel * dt * REFERENCE_TICK_HZ * tuning.parallax_factor;
    state.camera.offset += shift;
    state.camera.world_distance += shift.length();
}

fn update_engine(state: &mut SessionState, tuning: &Tuning, events: &mut Vec<GameEvent>) {
    let moving = state.player.is_moving(tuning.player.moving_threshold);
    if moving == state.player.engine_on {
        return;
    }
    state.player.engine_on = moving;
    events.push(if moving {
        GameEvent::EngineStarted
    } else {
        GameEvent::EngineStopped
    });
}

/// Move, cull and collide hazards, newest first so removal is safe
fn update_hazards(state: &mut SessionState, tuning: &Tuning, events: &mut Vec<GameEvent>) {
    for i in (0..state.hazards.len()).rev() {
        // Motion freezes once the run is over; the phase can change mid-loop
        if !state.is_over() {
            state.hazards[i].advance();
        }

        let hazard = &state.hazards[i];
        if hazard.is_off_screen(state.bounds, tuning.spawn.cull_margin_radii) {
            state.hazards.remove(i);
            continue;
        }

        if state.phase != GamePhase::Playing {
            continue;
        }
        let hit = circle_rect_collision(hazard.pos, hazard.radius, state.player.rect_min(), state.player.size);
        if hit {
            let hazard = state.hazards.remove(i);
            player_contact(state, tuning, &hazard, events);
        }
    }
}

/// Collect the moon on contact, or let it fade when its lifetime runs out
fn update_moon(state: &mut SessionState, tuning: &Tuning, events: &mut Vec<GameEvent>) {
    let Some(moon) = state.moon.as_ref() else {
        return;
    };
    let touching = state.phase == GamePhase::Playing
        && circle_rect_collision(moon.pos, moon.radius, state.player.rect_min(), state.player.size);

    if touching {
        consume_moon(state, tuning, events);
    } else if moon.is_expired(state.now_ms) {
        log::debug!("Moon faded");
        events.push(GameEvent::MoonFaded);
        retire_moon(state, tuning);
    }
}

/// Fly the comet and let its trail destroy any hazard it crosses
fn update_comet(state: &mut SessionState, tuning: &Tuning, events: &mut Vec<GameEvent>) {
    let Some(comet) = state.comet.as_mut() else {
        return;
    };
    comet.update(state.bounds, &tuning.comet, &mut state.rng);
    let (head, tail, thickness, alive) = (comet.head, comet.tail(), comet.thickness, comet.alive);

    for i in (0..state.hazards.len()).rev() {
        let hazard = &state.hazards[i];
        if segment_circle_collision(head, tail, hazard.pos, hazard.radius, thickness) {
            comet_strike(state, tuning, i, events);
        }
    }

    if !alive {
        state.comet = None;
        state.next_comet_at_ms = state.now_ms + comet_window_delay(&tuning.comet, &mut state.rng);
    }
}
