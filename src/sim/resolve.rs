//! Gameplay consequences of collisions
//!
//! Detection lives in `collision`; the functions here apply damage, healing,
//! boosts and comet strikes to the session and record what happened as
//! [`GameEvent`]s.

use glam::Vec2;

use super::collision::shockwave_impulse;
use super::effects::{Explosion, ShockwaveRing};
use super::events::{ExplosionCause, GameEvent, HealSource};
use super::player::Feedback;
use super::spawn::{retire_moon, reward_comet};
use super::state::{GamePhase, Hazard, HazardKind, SessionState};
use crate::tuning::Tuning;

/// Apply a hazard the ship touched; the caller has already removed it
pub fn player_contact(state: &mut SessionState, tuning: &Tuning, hazard: &Hazard, events: &mut Vec<GameEvent>) {
    match hazard.kind {
        HazardKind::SpeedBoost => {
            let player = &mut state.player;
            player.apply_speed_boost(&tuning.speed_boost);
            player.trigger_feedback(Feedback::Heal, tuning.player.feedback_ticks);
            events.push(GameEvent::SpeedBoost {
                amount: player.boost_amount,
            });
        }
        HazardKind::Asteroid => asteroid_hit(state, tuning, events),
        HazardKind::Heal => {
            let amount = tuning.combat.heal_amount;
            state.player.heal(amount);
            state.player.trigger_feedback(Feedback::Heal, tuning.player.feedback_ticks);
            record_heal(state, tuning, HealSource::Pickup, amount, events);
        }
    }
}

/// Damage the ship; ends the run on the final hit
pub fn asteroid_hit(state: &mut SessionState, tuning: &Tuning, events: &mut Vec<GameEvent>) {
    let player = &mut state.player;
    player.hit_count = player.hit_count.saturating_add(1);
    player.health = (player.health - tuning.combat.asteroid_damage).max(0.0);
    player.trigger_feedback(Feedback::Hit, tuning.player.feedback_ticks);
    state.fx.trigger_hit(&tuning.fx);

    let (hit_count, health) = (player.hit_count, player.health);
    events.push(GameEvent::AsteroidHit { hit_count, health });
    log::debug!("Asteroid hit {}/{} (health {:.2})", hit_count, tuning.combat.max_hits, health);

    if state.phase == GamePhase::Playing && (hit_count >= tuning.combat.max_hits || health <= 0.0) {
        game_over(state, tuning, events);
    }
}

/// Playing -> GameOver; the only way a run ends
fn game_over(state: &mut SessionState, tuning: &Tuning, events: &mut Vec<GameEvent>) {
    state.phase = GamePhase::GameOver;
    state.final_duration_ms = (state.now_ms - state.start_ms).max(0.0);

    let pos = state.player.pos;
    state.explosion = Some(Explosion::burst(pos, &tuning.fx, &mut state.rng));
    events.push(GameEvent::Explosion {
        pos,
        cause: ExplosionCause::ShipDestroyed,
    });

    state.player.engine_on = false;
    events.push(GameEvent::EngineStopped);
    events.push(GameEvent::GameOver {
        survived_ms: state.final_duration_ms,
    });

    log::info!(
        "Game over after {:.1}s ({} heals)",
        state.final_duration_ms / 1000.0,
        state.heals_consumed
    );
}

/// Moon collected: heal by its current phase and forgive hits by the rest
pub fn consume_moon(state: &mut SessionState, tuning: &Tuning, events: &mut Vec<GameEvent>) {
    let Some(moon) = state.moon.as_ref() else {
        return;
    };
    let phase = moon.phase(state.now_ms);

    let player = &mut state.player;
    player.heal(phase);
    player.hit_count = (player.hit_count as f32 * (1.0 - phase)).floor() as u8;
    player.trigger_feedback(Feedback::Heal, tuning.player.feedback_ticks);

    record_heal(state, tuning, HealSource::Moon, phase, events);
    retire_moon(state, tuning);
}

/// Heal bookkeeping shared by pickups and the moon
fn record_heal(state: &mut SessionState, tuning: &Tuning, source: HealSource, amount: f32, events: &mut Vec<GameEvent>) {
    state.heals_consumed += 1;
    state.speed_bonus_heals += 1;
    apply_speed_scaling(state, tuning);
    events.push(GameEvent::Healed { source, amount });
    reward_comet(state, tuning, source, events);
}

/// Recompute the permanent base speed from cumulative heals
pub fn apply_speed_scaling(state: &mut SessionState, tuning: &Tuning) {
    let speed = tuning.speed.speed_for(state.speed_bonus_heals);
    state.player.set_base_speed(speed);
}

/// Push every asteroid within `radius` of `center` away from it
pub fn apply_shockwave(hazards: &mut [Hazard], center: Vec2, radius: f32, strength: f32) {
    for hazard in hazards.iter_mut().filter(|h| h.kind == HazardKind::Asteroid) {
        if let Some(push) = shockwave_impulse(center, hazard.pos, radius, strength) {
            hazard.vel += push;
        }
    }
}

/// A comet trail destroyed the hazard at `index`
pub fn comet_strike(state: &mut SessionState, tuning: &Tuning, index: usize, events: &mut Vec<GameEvent>) {
    let hazard = state.hazards.remove(index);
    let pos = hazard.pos;
    let fx = &tuning.fx;

    state.explosion = Some(Explosion::burst(pos, fx, &mut state.rng));
    events.push(GameEvent::Explosion {
        pos,
        cause: ExplosionCause::CometStrike,
    });
    apply_shockwave(&mut state.hazards, pos, fx.shockwave_radius, fx.shockwave_strength);
    state.shockwaves.push(ShockwaveRing::new(pos, fx.ring_max_radius));
}
