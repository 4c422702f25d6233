//! Time- and probability-driven spawning of hazards, moons and comets

use std::f32::consts::{FRAC_1_SQRT_2, TAU};

use glam::Vec2;
use rand::Rng;

use super::events::{CometReason, GameEvent, HealSource};
use super::state::{Comet, Hazard, HazardKind, MoonOrb, SessionState, VisualSeed};
use crate::tuning::{CometTuning, MoonTuning, SpawnTuning, Tuning};

/// Roll one hazard/pickup just outside an edge or corner, aimed inward
pub fn roll_hazard<R: Rng + ?Sized>(id: u32, bounds: Vec2, tuning: &SpawnTuning, rng: &mut R) -> Hazard {
    let kind = if rng.random::<f32>() < tuning.speed_boost_chance {
        HazardKind::SpeedBoost
    } else if rng.random::<f32>() < tuning.asteroid_chance {
        HazardKind::Asteroid
    } else {
        HazardKind::Heal
    };

    let radius = match kind {
        HazardKind::Asteroid => {
            let bucket = rng.random::<f32>();
            if bucket < tuning.small_weight {
                tuning.small_radius.sample_floor(rng)
            } else if bucket < tuning.small_weight + tuning.medium_weight {
                tuning.medium_radius.sample_floor(rng)
            } else {
                tuning.large_radius.sample_floor(rng)
            }
        }
        HazardKind::Heal | HazardKind::SpeedBoost => tuning.pickup_radius.sample_floor(rng),
    };

    let mut speed = tuning.speed.sample(rng);
    if kind == HazardKind::Asteroid {
        // Smaller rocks move faster
        let size_factor = (tuning.asteroid_reference_radius / radius).max(tuning.asteroid_min_size_factor);
        speed *= tuning.asteroid_speed_multiplier * size_factor;
    }

    let (pos, vel) = edge_placement(rng.random_range(0..8), radius, speed, bounds, tuning, rng);

    let seed = if kind == HazardKind::Asteroid {
        let vertices = rng.random_range(tuning.asteroid_vertices_min..=tuning.asteroid_vertices_max);
        VisualSeed {
            rotation: rng.random::<f32>() * TAU,
            spin: (rng.random::<f32>() * 2.0 - 1.0) * tuning.asteroid_spin,
            vertex_jitter: (0..vertices).map(|_| tuning.asteroid_jitter.sample(rng)).collect(),
        }
    } else {
        VisualSeed::default()
    };

    Hazard {
        id,
        kind,
        pos,
        vel,
        radius,
        seed,
    }
}

/// Start position and per-tick velocity for one of 4 edges (0..4) or 4 corners (4..8)
fn edge_placement<R: Rng + ?Sized>(
    side: u32,
    radius: f32,
    speed: f32,
    bounds: Vec2,
    tuning: &SpawnTuning,
    rng: &mut R,
) -> (Vec2, Vec2) {
    let off = radius * tuning.edge_offset_radii;
    let along_x = (rng.random::<f32>() * (bounds.x - radius * 2.0).max(1.0)).floor();
    let along_y = (rng.random::<f32>() * (bounds.y - radius * 2.0).max(1.0)).floor();
    let d = speed * FRAC_1_SQRT_2;

    match side {
        0 => (Vec2::new(along_x, -off), Vec2::new(0.0, speed)),
        1 => (Vec2::new(along_x, bounds.y + off), Vec2::new(0.0, -speed)),
        2 => (Vec2::new(-off, along_y), Vec2::new(speed, 0.0)),
        3 => (Vec2::new(bounds.x + off, along_y), Vec2::new(-speed, 0.0)),
        4 => (Vec2::new(-off, -off), Vec2::new(d, d)),
        5 => (Vec2::new(bounds.x + off, -off), Vec2::new(-d, d)),
        6 => (Vec2::new(-off, bounds.y + off), Vec2::new(d, -d)),
        _ => (Vec2::new(bounds.x + off, bounds.y + off), Vec2::new(-d, -d)),
    }
}

/// Spawn a burst of hazards once the spawn interval has elapsed
///
/// Returns the number spawned.
pub fn spawn_hazards(state: &mut SessionState, tuning: &Tuning) -> usize {
    if state.now_ms - state.last_spawn_ms <= state.spawn_interval_ms {
        return 0;
    }
    let spawn = &tuning.spawn;
    let batch = state.rng.random_range(spawn.burst_min..=spawn.burst_max);
    for _ in 0..batch {
        let id = state.next_entity_id();
        let hazard = roll_hazard(id, state.bounds, spawn, &mut state.rng);
        state.hazards.push(hazard);
    }
    state.last_spawn_ms = state.now_ms;
    batch as usize
}

/// Place a moon fully on screen with a random lifetime
pub fn roll_moon<R: Rng + ?Sized>(now_ms: f64, bounds: Vec2, tuning: &MoonTuning, rng: &mut R) -> MoonOrb {
    let pad = tuning.radius + tuning.edge_padding;
    let x = (pad + rng.random::<f32>() * (bounds.x - pad * 2.0).max(1.0)).floor();
    let y = (pad + rng.random::<f32>() * (bounds.y - pad * 2.0).max(1.0)).floor();
    MoonOrb {
        pos: Vec2::new(x, y),
        radius: tuning.radius,
        spawn_ms: now_ms,
        lifetime_ms: tuning.lifetime_ms.sample_floor(rng) as f64,
    }
}

/// Per-tick chance of a moon while none is active and the cooldown is over
pub fn spawn_moon(state: &mut SessionState, tuning: &Tuning, events: &mut Vec<GameEvent>) {
    if state.moon.is_some() || state.now_ms <= state.moon_cooldown_until_ms {
        return;
    }
    if state.rng.random::<f32>() >= tuning.moon.spawn_chance {
        return;
    }
    let moon = roll_moon(state.now_ms, state.bounds, &tuning.moon, &mut state.rng);
    log::debug!("Moon at ({:.0}, {:.0}) for {:.0} ms", moon.pos.x, moon.pos.y, moon.lifetime_ms);
    events.push(GameEvent::MoonAppeared { pos: moon.pos });
    state.moon = Some(moon);
}

/// Remove the moon and start a new cooldown window
pub fn retire_moon(state: &mut SessionState, tuning: &Tuning) {
    state.moon = None;
    state.moon_cooldown_until_ms = state.now_ms + tuning.moon.cooldown_ms.sample(&mut state.rng) as f64;
}

/// Comet entering at one edge and aimed at a random point on the opposite edge
pub fn roll_comet<R: Rng + ?Sized>(bounds: Vec2, tuning: &CometTuning, rng: &mut R) -> Comet {
    let length = tuning.length.sample(rng);
    let thickness = tuning.thickness.sample(rng);
    let speed = tuning.speed.sample(rng);

    // Keep the head visibly on screen at both ends
    let margin = tuning.min_margin.max(thickness * 5.0 + tuning.glow);
    let mut across_x = || margin + rng.random::<f32>() * (bounds.x - margin * 2.0);
    let (x0, x1) = (across_x(), across_x());
    let mut across_y = || margin + rng.random::<f32>() * (bounds.y - margin * 2.0);
    let (y0, y1) = (across_y(), across_y());

    let (start, end) = match rng.random_range(0..4) {
        0 => (Vec2::new(x0, margin), Vec2::new(x1, bounds.y - margin)),
        1 => (Vec2::new(x0, bounds.y - margin), Vec2::new(x1, margin)),
        2 => (Vec2::new(margin, y0), Vec2::new(bounds.x - margin, y1)),
        _ => (Vec2::new(bounds.x - margin, y0), Vec2::new(margin, y1)),
    };

    let dir = end - start;
    let len = dir.length();
    let len = if len > 0.0 { len } else { 1.0 };

    Comet {
        head: start,
        vel: dir / len * speed,
        length,
        thickness,
        glow: tuning.glow,
        life_ticks: tuning.life_ticks.sample_floor(rng) as i32,
        alive: true,
        sparkles: Vec::new(),
    }
}

/// Random delay before the next comet window
pub fn comet_window_delay<R: Rng + ?Sized>(tuning: &CometTuning, rng: &mut R) -> f64 {
    tuning.window_delay_ms.sample(rng) as f64
}

fn launch_comet(state: &mut SessionState, tuning: &Tuning, reason: CometReason, events: &mut Vec<GameEvent>) {
    let comet = roll_comet(state.bounds, &tuning.comet, &mut state.rng);
    log::debug!("Comet launched ({:?})", reason);
    state.comet = Some(comet);
    events.push(GameEvent::CometSpawned { reason });
}

/// One roll per opened window; a failed roll closes it for another delay
pub fn open_comet_window(state: &mut SessionState, tuning: &Tuning, events: &mut Vec<GameEvent>) {
    if state.comet.is_some() || state.now_ms < state.next_comet_at_ms {
        return;
    }
    if state.rng.random::<f32>() < tuning.comet.window_chance {
        launch_comet(state, tuning, CometReason::Window, events);
    } else {
        state.next_comet_at_ms = state.now_ms + comet_window_delay(&tuning.comet, &mut state.rng);
    }
}

/// Grant a comet for a heal, if none is flying
///
/// A pickup heal always earns one; any heal also earns one on every
/// `heal_trigger_every`-th cumulative heal, at most once per heal count.
pub fn reward_comet(state: &mut SessionState, tuning: &Tuning, source: HealSource, events: &mut Vec<GameEvent>) {
    if state.comet.is_some() {
        return;
    }
    let every = tuning.comet.heal_trigger_every.max(1);
    let heals = state.heals_consumed;
    let pickup = source == HealSource::Pickup;
    let milestone = heals > 0 && heals % every == 0 && state.last_comet_heal_trigger != heals;
    if !(pickup || milestone) {
        return;
    }

    launch_comet(state, tuning, CometReason::HealReward, events);
    state.last_comet_heal_trigger = heals;
    state.next_comet_at_ms = state.now_ms + comet_window_delay(&tuning.comet, &mut state.rng);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const BOUNDS: Vec2 = Vec2::new(800.0, 600.0);

    fn playing() -> (SessionState, Tuning) {
        let tuning = Tuning::default();
        let mut state = SessionState::new(BOUNDS, &tuning, 800.0, 11);
        state.start(0.0);
        (state, tuning)
    }

    #[test]
    fn test_hazards_start_outside_and_move_inward() {
        let tuning = SpawnTuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        for id in 0..500 {
            let h = roll_hazard(id, BOUNDS, &tuning, &mut rng);
            let outside = h.pos.x < 0.0 || h.pos.y < 0.0 || h.pos.x > BOUNDS.x || h.pos.y > BOUNDS.y;
            assert!(outside, "{:?} spawned on screen", h.pos);

            // One step along the velocity brings it closer to the canvas center
            let center = BOUNDS / 2.0;
            assert!((h.pos + h.vel).distance(center) < h.pos.distance(center));
        }
    }

    #[test]
    fn test_corner_velocity_is_diagonal() {
        let tuning = SpawnTuning::default();
        let mut rng = Pcg32::seed_from_u64(2);
        let (pos, vel) = edge_placement(5, 10.0, 4.0, BOUNDS, &tuning, &mut rng);
        assert_eq!(pos, Vec2::new(820.0, -20.0));
        assert!((vel.length() - 4.0).abs() < 1e-5);
        assert!((vel.x + vel.y).abs() < 1e-6);
    }

    #[test]
    fn test_kind_and_size_distribution() {
        let tuning = SpawnTuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let hazards: Vec<_> = (0..5000).map(|i| roll_hazard(i, BOUNDS, &tuning, &mut rng)).collect();
        let count = |k| hazards.iter().filter(|h| h.kind == k).count() as f32 / 5000.0;

        // 12% boost, 88% * 90% asteroid, 88% * 10% heal
        assert!((count(HazardKind::SpeedBoost) - 0.12).abs() < 0.03);
        assert!((count(HazardKind::Asteroid) - 0.792).abs() < 0.03);
        assert!((count(HazardKind::Heal) - 0.088).abs() < 0.03);

        for h in &hazards {
            match h.kind {
                HazardKind::Asteroid => {
                    assert!((8.0..50.0).contains(&h.radius));
                    assert!((8..=12).contains(&h.seed.vertex_jitter.len()));
                    assert!(h.seed.spin.abs() <= 0.01);
                }
                _ => assert!((10.0..26.0).contains(&h.radius)),
            }
        }
    }

    #[test]
    fn test_small_asteroids_are_faster() {
        let mut tuning = SpawnTuning::default();
        tuning.speed_boost_chance = 0.0;
        tuning.asteroid_chance = 1.0;
        tuning.speed = crate::tuning::Span::new(2.0, 2.0);
        let mut rng = Pcg32::seed_from_u64(4);
        for i in 0..200 {
            let h = roll_hazard(i, BOUNDS, &tuning, &mut rng);
            let expected = 2.0 * 2.0 * (22.0 / h.radius).max(0.6);
            assert!((h.vel.length() - expected).abs() < 1e-4);
        }
    }

    #[test]
    fn test_spawn_waits_for_interval() {
        let (mut state, tuning) = playing();
        state.now_ms = 900.0;
        let n = spawn_hazards(&mut state, &tuning);
        assert!((1..=3).contains(&n));
        assert_eq!(state.hazards.len(), n);
        assert_eq!(state.last_spawn_ms, 900.0);

        state.now_ms = 1700.0;
        assert_eq!(spawn_hazards(&mut state, &tuning), 0);
        state.now_ms = 1701.0;
        assert!(spawn_hazards(&mut state, &tuning) > 0);
    }

    #[test]
    fn test_moon_respects_cooldown() {
        let (mut state, mut tuning) = playing();
        tuning.moon.spawn_chance = 1.0;
        let mut events = Vec::new();

        state.now_ms = 100.0;
        state.moon_cooldown_until_ms = 500.0;
        spawn_moon(&mut state, &tuning, &mut events);
        assert!(state.moon.is_none());

        state.now_ms = 600.0;
        spawn_moon(&mut state, &tuning, &mut events);
        let moon = state.moon.clone().unwrap();
        assert!(moon.pos.x >= 44.0 && moon.pos.x <= BOUNDS.x - 44.0);
        assert!((8000.0..14000.0).contains(&moon.lifetime_ms));
        assert_eq!(events.len(), 1);

        retire_moon(&mut state, &tuning);
        assert!(state.moon.is_none());
        let wait = state.moon_cooldown_until_ms - 600.0;
        assert!((10_000.0..=20_000.0).contains(&wait));
    }

    #[test]
    fn test_comet_crosses_screen() {
        let tuning = CometTuning::default();
        let mut rng = Pcg32::seed_from_u64(5);
        for _ in 0..100 {
            let c = roll_comet(BOUNDS, &tuning, &mut rng);
            assert!(c.head.x >= 0.0 && c.head.x <= BOUNDS.x);
            assert!(c.head.y >= 0.0 && c.head.y <= BOUNDS.y);
            let speed = c.vel.length();
            assert!((9.0..=15.0).contains(&speed));
            assert!((160..240).contains(&c.life_ticks));
        }
    }

    #[test]
    fn test_failed_window_roll_schedules_next() {
        let (mut state, mut tuning) = playing();
        tuning.comet.window_chance = 0.0;
        let mut events = Vec::new();
        state.now_ms = 1000.0;
        open_comet_window(&mut state, &tuning, &mut events);
        assert!(state.comet.is_none());
        assert!((6000.0..=16000.0).contains(&state.next_comet_at_ms));

        tuning.comet.window_chance = 1.0;
        state.now_ms = state.next_comet_at_ms;
        open_comet_window(&mut state, &tuning, &mut events);
        assert!(state.comet.is_some());
        assert_eq!(events, vec![GameEvent::CometSpawned { reason: CometReason::Window }]);
    }

    #[test]
    fn test_moon_heal_reward_only_on_milestone() {
        let (mut state, tuning) = playing();
        let mut events = Vec::new();

        state.heals_consumed = 4;
        reward_comet(&mut state, &tuning, HealSource::Moon, &mut events);
        assert!(state.comet.is_none());

        state.heals_consumed = 5;
        reward_comet(&mut state, &tuning, HealSource::Moon, &mut events);
        assert!(state.comet.is_some());
        assert_eq!(state.last_comet_heal_trigger, 5);

        // Same heal count never pays twice
        state.comet = None;
        reward_comet(&mut state, &tuning, HealSource::Moon, &mut events);
        assert!(state.comet.is_none());
    }

    #[test]
    fn test_pickup_heal_always_rewards_when_sky_is_clear() {
        let (mut state, tuning) = playing();
        let mut events = Vec::new();
        state.heals_consumed = 1;
        reward_comet(&mut state, &tuning, HealSource::Pickup, &mut events);
        assert!(state.comet.is_some());
        assert_eq!(events, vec![GameEvent::CometSpawned { reason: CometReason::HealReward }]);

        // Already flying: no second comet
        events.clear();
        state.heals_consumed = 2;
        reward_comet(&mut state, &tuning, HealSource::Pickup, &mut events);
        assert!(events.is_empty());
    }
}
