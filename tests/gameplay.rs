//! End-to-end gameplay scenarios driven through the public API.

use astro_dodge::audio::NullAudio;
use astro_dodge::platform::InputProvider;
use astro_dodge::render::{FrameView, Renderer};
use astro_dodge::sim::resolve::apply_shockwave;
use astro_dodge::sim::{
    Comet, CometReason, GameEvent, GamePhase, Hazard, HazardKind, MoonOrb, SessionState, ShockwaveRing, TickInput,
    VisualSeed, autopilot, tick,
};
use astro_dodge::{Difficulty, Game, Settings, Tuning};
use glam::Vec2;

const BOUNDS: Vec2 = Vec2::new(800.0, 600.0);

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Default tuning with the random moon and comet rolls disabled
fn quiet_tuning() -> Tuning {
    let mut tuning = Tuning::default();
    tuning.moon.spawn_chance = 0.0;
    tuning.comet.window_chance = 0.0;
    tuning
}

fn playing(tuning: &Tuning) -> SessionState {
    let mut state = SessionState::new(BOUNDS, tuning, 800.0, 2024);
    state.start(0.0);
    state
}

fn hazard(kind: HazardKind, pos: Vec2, radius: f32) -> Hazard {
    Hazard {
        id: 500,
        kind,
        pos,
        vel: Vec2::ZERO,
        radius,
        seed: VisualSeed::default(),
    }
}

/// One 10 ms tick with no steering
fn step(state: &mut SessionState, tuning: &Tuning) -> Vec<GameEvent> {
    let now = state.now_ms + 10.0;
    tick(state, tuning, &TickInput::default(), now, 10.0)
}

struct Pilot(Vec2);

impl InputProvider for Pilot {
    fn axis(&mut self) -> Option<Vec2> {
        Some(self.0)
    }
}

struct Discard;

impl Renderer for Discard {
    fn draw(&mut self, _view: &FrameView) -> Result<(), Box<dyn std::error::Error>> {
        Ok(())
    }
}

// ── Scenarios ─────────────────────────────────────────────────────────────────

#[test]
fn asteroid_overlapping_ship_costs_a_third_of_health() {
    let tuning = quiet_tuning();
    let mut state = playing(&tuning);
    state.hazards.push(hazard(HazardKind::Asteroid, state.player.pos, 12.0));

    step(&mut state, &tuning);

    assert_eq!(state.player.hit_count, 1);
    // One tick of passive drain on top of the hit
    assert!((state.player.health - (2.0 / 3.0)).abs() < 1e-3);
    assert!(state.hazards.is_empty());
}

#[test]
fn fifth_heal_launches_a_comet() {
    let tuning = quiet_tuning();
    let mut state = playing(&tuning);
    state.heals_consumed = 4;
    state.moon = Some(MoonOrb {
        pos: state.player.pos,
        radius: 40.0,
        spawn_ms: 0.0,
        lifetime_ms: 1.0e6,
    });

    let events = step(&mut state, &tuning);

    assert_eq!(state.heals_consumed, 5);
    assert!(state.comet.is_some());
    assert!(events.contains(&GameEvent::CometSpawned {
        reason: CometReason::HealReward
    }));
}

#[test]
fn moon_heals_by_its_phase() {
    let tuning = quiet_tuning();
    let mut state = playing(&tuning);
    state.player.health = 0.4;
    state.player.hit_count = 2;
    // Half of its 20 ms life is gone at the first tick
    state.moon = Some(MoonOrb {
        pos: state.player.pos,
        radius: 40.0,
        spawn_ms: 0.0,
        lifetime_ms: 20.0,
    });

    step(&mut state, &tuning);

    assert!((state.player.health - 0.9).abs() < 1e-3);
    assert_eq!(state.player.hit_count, 1);
    assert!(state.moon.is_none());
}

#[test]
fn shockwave_pushes_with_linear_falloff() {
    let mut hazards = vec![
        hazard(HazardKind::Asteroid, Vec2::new(100.0, 0.0), 10.0),
        hazard(HazardKind::Heal, Vec2::new(0.0, 100.0), 10.0),
        hazard(HazardKind::Asteroid, Vec2::new(0.0, 250.0), 10.0),
    ];

    apply_shockwave(&mut hazards, Vec2::ZERO, 200.0, 8.0);

    assert!((hazards[0].vel - Vec2::new(4.0, 0.0)).length() < 1e-5);
    assert_eq!(hazards[1].vel, Vec2::ZERO);
    assert_eq!(hazards[2].vel, Vec2::ZERO);
}

#[test]
fn third_hit_ends_the_run_once() {
    let tuning = quiet_tuning();
    let mut state = playing(&tuning);
    let ship = state.player.pos;
    for offset in [-8.0, 0.0, 8.0, 16.0] {
        state.hazards.push(hazard(HazardKind::Asteroid, ship + Vec2::new(offset, 0.0), 6.0));
    }
    state.player.hit_count = 1;

    let mut game_overs = 0;
    for _ in 0..50 {
        game_overs += step(&mut state, &tuning)
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
    }

    assert_eq!(game_overs, 1);
    assert_eq!(state.phase, GamePhase::GameOver);
    assert_eq!(state.player.hit_count, 3);
    assert_eq!(state.final_duration_ms, 10.0);
}

#[test]
fn restart_clears_the_session() {
    let tuning = quiet_tuning();
    let mut state = playing(&tuning);

    // A fatal hit while drifting leaves debris, shake and a moved camera
    state.player.hit_count = 2;
    state.player.vel = Vec2::new(3.0, -2.0);
    state.hazards.push(hazard(HazardKind::Asteroid, state.player.pos, 12.0));
    state.hazards.push(hazard(HazardKind::Heal, Vec2::new(60.0, 60.0), 10.0));
    step(&mut state, &tuning);

    state.speed_bonus_heals = 10;
    state.last_comet_heal_trigger = 10;
    state.heals_consumed = 10;
    state.player.set_base_speed(tuning.speed.speed_for(10));
    state.moon = Some(MoonOrb {
        pos: Vec2::new(200.0, 200.0),
        radius: 40.0,
        spawn_ms: 0.0,
        lifetime_ms: 1.0e6,
    });
    state.comet = Some(Comet {
        head: Vec2::new(400.0, 300.0),
        vel: Vec2::new(8.0, 2.0),
        length: 200.0,
        thickness: 4.0,
        glow: 18.0,
        life_ticks: 50,
        alive: true,
        sparkles: Vec::new(),
    });
    state.shockwaves.push(ShockwaveRing::new(Vec2::new(300.0, 200.0), 120.0));

    assert_eq!(state.phase, GamePhase::GameOver);
    assert!(state.explosion.is_some());
    assert!(!state.hazards.is_empty());
    assert!(state.fx.shake_ms > 0.0);
    assert!(state.fx.hurt_flash_ms > 0.0);
    assert_ne!(state.camera.offset, Vec2::ZERO);
    assert!(state.camera.world_distance > 0.0);
    assert!(state.player.max_speed > tuning.speed.base);

    state.restart(10_000.0, &tuning);

    assert_eq!(state.phase, GamePhase::Playing);
    assert_eq!(state.survival_ms(), 0.0);
    assert_eq!(state.player.health, state.player.max_health);
    assert_eq!(state.player.hit_count, 0);
    assert_eq!(state.player.max_speed, tuning.speed.base);
    assert_eq!(state.heals_consumed, 0);
    assert_eq!(state.speed_bonus_heals, 0);
    assert_eq!(state.last_comet_heal_trigger, 0);
    assert!(state.hazards.is_empty());
    assert!(state.moon.is_none());
    assert!(state.comet.is_none());
    assert!(state.explosion.is_none());
    assert!(state.shockwaves.is_empty());
    assert_eq!(state.fx.shake_ms, 0.0);
    assert_eq!(state.fx.hurt_flash_ms, 0.0);
    assert_eq!(state.camera.offset, Vec2::ZERO);
    assert_eq!(state.camera.world_distance, 0.0);

    // The fresh run plays on normally
    let events = step(&mut state, &tuning);
    assert!(!events.iter().any(|e| matches!(e, GameEvent::GameOver { .. })));
    assert_eq!(state.phase, GamePhase::Playing);
}

#[test]
fn draining_to_empty_does_not_end_the_run() {
    let tuning = quiet_tuning();
    let mut state = playing(&tuning);
    // Keep the spawner quiet so only the drain acts
    state.spawn_interval_ms = f64::INFINITY;

    // Full health drains away in a little over 10 000 ticks
    let mut events = Vec::new();
    for _ in 0..10_100 {
        events.extend(step(&mut state, &tuning));
    }

    assert_eq!(state.player.health, 0.0);
    assert_eq!(state.phase, GamePhase::Playing);
    assert!(!events.iter().any(|e| matches!(e, GameEvent::GameOver { .. })));
    assert!(state.explosion.is_none());
    assert!(state.survival_ms() > 0.0);
}

#[test]
fn difficulty_changes_spawn_interval() {
    let mut game = Game::new(Tuning::default(), Settings::default(), BOUNDS, 3);
    for (level, interval) in [
        (Difficulty::Easy, 1200.0),
        (Difficulty::Normal, 800.0),
        (Difficulty::Hard, 500.0),
    ] {
        game.set_difficulty(level);
        assert_eq!(game.state().spawn_interval_ms, interval);
    }
}

#[test]
fn autopilot_run_respects_bounds() {
    for seed in [1, 7, 42] {
        let mut game = Game::new(Tuning::default(), Settings::default(), BOUNDS, seed);
        game.start(0.0);
        let mut game_overs = 0;

        for i in 0..6000 {
            let axis = autopilot::steer(game.state());
            let events = game
                .frame(i as f64 * 1000.0 / 60.0, &mut Pilot(axis), &mut Discard, &mut NullAudio)
                .unwrap_or_default();
            game_overs += events
                .iter()
                .filter(|e| matches!(e, GameEvent::GameOver { .. }))
                .count();

            let player = &game.state().player;
            assert!((0.0..=1.0).contains(&player.health));
            assert!(player.hit_count <= 3);
            assert!(game.state().hazards.iter().all(|h| h.pos.is_finite()));
        }
        assert!(game_overs <= 1, "seed {} ended {} times", seed, game_overs);
    }
}
