//! Loop driver and control surface
//!
//! [`Game`] owns the session, the frame clock and the audio routing. The host
//! feeds it display-rate timestamps through [`Game::frame`]; each accepted
//! frame runs one tick, routes that tick's sounds and draws once.

use glam::Vec2;

use crate::audio::{AudioManager, AudioSink};
use crate::platform::{FrameClock, InputProvider, sanitize_axis};
use crate::render::{FrameView, Renderer};
use crate::settings::{Difficulty, Settings};
use crate::sim::{GameEvent, SessionState, TickInput, tick};
use crate::tuning::Tuning;

pub struct Game {
    tuning: Tuning,
    settings: Settings,
    clock: FrameClock,
    state: SessionState,
    audio: AudioManager,
}

impl Game {
    /// New session waiting in the menu
    pub fn new(tuning: Tuning, settings: Settings, bounds: Vec2, seed: u64) -> Self {
        let interval = settings.difficulty.spawn_interval_ms(&tuning);
        let state = SessionState::new(bounds, &tuning, interval, seed);
        let clock = FrameClock::new(tuning.target_interval_ms());
        log::info!(
            "Game initialized with seed {} ({} difficulty)",
            seed,
            settings.difficulty.as_str()
        );
        Self {
            tuning,
            settings,
            clock,
            state,
            audio: AudioManager::new(),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Volume and mute controls
    pub fn audio_mut(&mut self) -> &mut AudioManager {
        &mut self.audio
    }

    /// Leave the menu; no-op once a run has begun
    pub fn start(&mut self, now_ms: f64) -> bool {
        let started = self.state.start(now_ms);
        if started {
            log::info!("Run started");
        }
        started
    }

    /// Throw the current run away and begin a fresh one
    pub fn restart(&mut self, now_ms: f64, sink: &mut dyn AudioSink) {
        self.audio.stop_all(sink);
        self.clock.reset();
        self.state.restart(now_ms, &self.tuning);
        self.state.spawn_interval_ms = self.settings.difficulty.spawn_interval_ms(&self.tuning);
        log::info!("Run restarted");
    }

    /// Change the spawn rate; takes effect on the next spawn check
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.settings.difficulty = difficulty;
        self.state.spawn_interval_ms = difficulty.spawn_interval_ms(&self.tuning);
        log::info!(
            "Difficulty set to {} ({} ms spawn interval)",
            difficulty.as_str(),
            self.state.spawn_interval_ms
        );
    }

    /// The canvas changed size
    pub fn resize(&mut self, bounds: Vec2) {
        if bounds.x <= 0.0 || bounds.y <= 0.0 || !bounds.is_finite() {
            log::warn!("Ignoring invalid canvas size {:?}", bounds);
            return;
        }
        self.state.bounds = bounds;
    }

    /// Stop the loop; every later frame is ignored
    pub fn stop(&mut self, sink: &mut dyn AudioSink) {
        if !self.clock.is_cancelled() {
            self.clock.cancel();
            self.audio.stop_all(sink);
            log::info!("Loop stopped");
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.clock.is_cancelled()
    }

    /// Snapshot of the current frame
    pub fn view(&self) -> FrameView {
        FrameView::capture(&self.state, &self.tuning, &self.settings)
    }

    /// Offer a host frame callback
    ///
    /// Returns the tick's events when the frame was accepted, `None` when it
    /// was throttled (or the loop is stopped).
    pub fn frame(
        &mut self,
        timestamp_ms: f64,
        input: &mut dyn InputProvider,
        renderer: &mut dyn Renderer,
        sink: &mut dyn AudioSink,
    ) -> Option<Vec<GameEvent>> {
        let step = self.clock.accept(timestamp_ms)?;

        let input = TickInput {
            axis: sanitize_axis(input.axis()),
        };
        let events = tick(&mut self.state, &self.tuning, &input, step.now_ms, step.elapsed_ms);
        self.audio.dispatch(&events, sink);

        if let Err(e) = renderer.draw(&self.view()) {
            log::warn!("Render error: {}", e);
        }
        Some(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{AudioCommand, RecordingAudio, SoundEffect};
    use crate::sim::{GamePhase, Hazard, HazardKind, VisualSeed};
    use std::error::Error;

    struct Fixed(Option<Vec2>);

    impl InputProvider for Fixed {
        fn axis(&mut self) -> Option<Vec2> {
            self.0
        }
    }

    #[derive(Default)]
    struct Counting {
        frames: usize,
        fail: bool,
    }

    impl Renderer for Counting {
        fn draw(&mut self, _view: &FrameView) -> Result<(), Box<dyn Error>> {
            self.frames += 1;
            if self.fail {
                return Err("surface lost".into());
            }
            Ok(())
        }
    }

    fn game() -> Game {
        let mut tuning = Tuning::default();
        tuning.moon.spawn_chance = 0.0;
        tuning.comet.window_chance = 0.0;
        Game::new(tuning, Settings::default(), Vec2::new(800.0, 600.0), 5)
    }

    #[test]
    fn test_frames_are_throttled() {
        let mut game = game();
        game.start(0.0);
        let mut renderer = Counting::default();
        let mut sink = RecordingAudio::default();
        let mut input = Fixed(None);

        // 1 s of 144 Hz callbacks against a 100 Hz target
        let accepted = (0..=144)
            .filter_map(|i| game.frame(i as f64 * 1000.0 / 144.0, &mut input, &mut renderer, &mut sink))
            .count();
        assert_eq!(renderer.frames, accepted);
        assert!((70..=73).contains(&accepted));
        assert_eq!(game.state().tick_count as usize, accepted);
    }

    #[test]
    fn test_missing_input_is_zero() {
        let mut game = game();
        game.start(0.0);
        let start = game.state().player.pos;
        let mut sink = RecordingAudio::default();
        game.frame(0.0, &mut Fixed(None), &mut Counting::default(), &mut sink);
        game.frame(16.0, &mut Fixed(Some(Vec2::NAN)), &mut Counting::default(), &mut sink);
        assert_eq!(game.state().player.pos, start);
        assert!(sink.commands.is_empty());
    }

    #[test]
    fn test_render_errors_do_not_stop_the_loop() {
        let mut game = game();
        game.start(0.0);
        let mut renderer = Counting {
            fail: true,
            ..Default::default()
        };
        let mut sink = RecordingAudio::default();
        for i in 0..10 {
            game.frame(i as f64 * 16.0, &mut Fixed(Some(Vec2::X)), &mut renderer, &mut sink);
        }
        assert_eq!(renderer.frames, 9);
        assert_eq!(game.state().tick_count, 9);
    }

    #[test]
    fn test_hit_routes_audio() {
        let mut game = game();
        game.start(0.0);
        let pos = game.state().player.pos;
        game.state.hazards.push(Hazard {
            id: 1,
            kind: HazardKind::Asteroid,
            pos,
            vel: Vec2::ZERO,
            radius: 10.0,
            seed: VisualSeed::default(),
        });
        let mut sink = RecordingAudio::default();
        let mut renderer = Counting::default();
        game.frame(0.0, &mut Fixed(None), &mut renderer, &mut sink);
        let events = game.frame(16.0, &mut Fixed(None), &mut renderer, &mut sink);

        assert!(matches!(events.as_deref(), Some([GameEvent::AsteroidHit { .. }])));
        assert!(matches!(
            sink.commands.as_slice(),
            [AudioCommand::Play {
                effect: SoundEffect::Zap,
                ..
            }]
        ));
    }

    #[test]
    fn test_muted_game_only_stops() {
        let mut game = game();
        game.audio_mut().set_muted(true);
        game.start(0.0);
        let pos = game.state().player.pos;
        game.state.hazards.push(Hazard {
            id: 1,
            kind: HazardKind::Asteroid,
            pos,
            vel: Vec2::ZERO,
            radius: 10.0,
            seed: VisualSeed::default(),
        });
        let mut sink = RecordingAudio::default();
        let mut renderer = Counting::default();
        game.frame(0.0, &mut Fixed(None), &mut renderer, &mut sink);
        let events = game.frame(16.0, &mut Fixed(None), &mut renderer, &mut sink);
        assert!(matches!(events.as_deref(), Some([GameEvent::AsteroidHit { .. }])));
        assert!(sink.commands.is_empty());

        game.restart(100.0, &mut sink);
        assert_eq!(
            sink.commands,
            vec![AudioCommand::Stop {
                effect: SoundEffect::SpaceMusic
            }]
        );
    }

    #[test]
    fn test_difficulty_and_restart() {
        let mut game = game();
        game.set_difficulty(Difficulty::Hard);
        assert_eq!(game.state().spawn_interval_ms, 500.0);

        game.start(0.0);
        game.state.player.hit_count = 2;
        game.state.phase = GamePhase::GameOver;

        let mut sink = RecordingAudio::default();
        game.restart(1000.0, &mut sink);
        assert_eq!(game.state().phase, GamePhase::Playing);
        assert_eq!(game.state().player.hit_count, 0);
        assert_eq!(game.state().spawn_interval_ms, 500.0);
        assert_eq!(
            sink.commands,
            vec![AudioCommand::Stop {
                effect: SoundEffect::SpaceMusic
            }]
        );
    }

    #[test]
    fn test_restart_reprimes_the_clock() {
        let mut game = game();
        game.start(0.0);
        let mut sink = RecordingAudio::default();
        let mut renderer = Counting::default();
        game.frame(0.0, &mut Fixed(None), &mut renderer, &mut sink);
        assert!(game.frame(16.0, &mut Fixed(None), &mut renderer, &mut sink).is_some());

        let ticks = game.state().tick_count;
        game.restart(5000.0, &mut sink);
        // The gap since the last frame is not one long tick
        assert!(game.frame(5000.0, &mut Fixed(None), &mut renderer, &mut sink).is_none());
        assert_eq!(game.state().tick_count, ticks);
        let events = game.frame(5016.0, &mut Fixed(None), &mut renderer, &mut sink);
        assert!(events.is_some());
        assert_eq!(game.state().tick_count, ticks + 1);
        assert_eq!(game.state().now_ms, 5016.0);
    }

    #[test]
    fn test_stop_ignores_later_frames() {
        let mut game = game();
        game.start(0.0);
        let mut sink = RecordingAudio::default();
        let mut renderer = Counting::default();
        game.frame(0.0, &mut Fixed(None), &mut renderer, &mut sink);
        game.stop(&mut sink);
        assert!(game.is_stopped());
        assert!(game.frame(100.0, &mut Fixed(None), &mut renderer, &mut sink).is_none());
        assert_eq!(renderer.frames, 0);
    }

    #[test]
    fn test_resize_rejects_nonsense() {
        let mut game = game();
        game.resize(Vec2::new(1024.0, 768.0));
        assert_eq!(game.state().bounds, Vec2::new(1024.0, 768.0));
        game.resize(Vec2::new(0.0, 768.0));
        assert_eq!(game.state().bounds, Vec2::new(1024.0, 768.0));
    }
}
