//! Headless runner
//!
//! Plays one session with the demo autopilot at a simulated 60 Hz display
//! rate, logging sound cues and printing a summary.
//!
//! ```text
//! astro-dodge [--config FILE] [--seed N] [--frames N] [--difficulty LEVEL] [--volume V] [--mute] [--dump]
//! ```

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::error::Error;
    use std::process::ExitCode;

    use astro_dodge::audio::{AudioCommand, AudioSink};
    use astro_dodge::consts::{DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH};
    use astro_dodge::platform::InputProvider;
    use astro_dodge::render::{FrameView, Renderer};
    use astro_dodge::sim::{GameEvent, SessionState, autopilot};
    use astro_dodge::{Difficulty, Game, Settings, Tuning};
    use glam::Vec2;

    /// Simulated display refresh interval
    const DISPLAY_INTERVAL_MS: f64 = 1000.0 / 60.0;

    const USAGE: &str =
        "usage: astro-dodge [--config FILE] [--seed N] [--frames N] [--difficulty easy|normal|hard] [--volume 0-1] [--mute] [--dump]";

    struct Options {
        config: Option<String>,
        seed: u64,
        frames: u32,
        difficulty: Difficulty,
        volume: Option<f32>,
        mute: bool,
        dump: bool,
    }

    impl Options {
        fn parse(mut args: impl Iterator<Item = String>) -> Result<Self, String> {
            let mut opts = Options {
                config: None,
                seed: 1,
                frames: 3600,
                difficulty: Difficulty::Normal,
                volume: None,
                mute: false,
                dump: false,
            };
            while let Some(arg) = args.next() {
                let mut value = |name: &str| args.next().ok_or_else(|| format!("{} needs a value", name));
                match arg.as_str() {
                    "--config" => opts.config = Some(value("--config")?),
                    "--seed" => {
                        let v = value("--seed")?;
                        opts.seed = v.parse().map_err(|_| format!("invalid seed '{}'", v))?;
                    }
                    "--frames" => {
                        let v = value("--frames")?;
                        opts.frames = v.parse().map_err(|_| format!("invalid frame count '{}'", v))?;
                    }
                    "--difficulty" => {
                        let v = value("--difficulty")?;
                        opts.difficulty =
                            Difficulty::from_str(&v).ok_or_else(|| format!("unknown difficulty '{}'", v))?;
                    }
                    "--volume" => {
                        let v = value("--volume")?;
                        let volume: f32 = v.parse().map_err(|_| format!("invalid volume '{}'", v))?;
                        opts.volume = Some(volume);
                    }
                    "--mute" => opts.mute = true,
                    "--dump" => opts.dump = true,
                    "-h" | "--help" => return Err(String::new()),
                    other => return Err(format!("unexpected argument '{}'", other)),
                }
            }
            Ok(opts)
        }
    }

    /// Autopilot steering, recomputed from the state before every frame
    #[derive(Default)]
    struct Autopilot {
        axis: Vec2,
    }

    impl Autopilot {
        fn aim(&mut self, state: &SessionState) {
            self.axis = autopilot::steer(state);
        }
    }

    impl InputProvider for Autopilot {
        fn axis(&mut self) -> Option<Vec2> {
            Some(self.axis)
        }
    }

    /// Logs the HUD every 100 drawn frames
    #[derive(Default)]
    struct HudLogger {
        frames: u64,
    }

    impl Renderer for HudLogger {
        fn draw(&mut self, view: &FrameView) -> Result<(), Box<dyn Error>> {
            self.frames += 1;
            if self.frames % 100 == 0 {
                let hud = &view.hud;
                log::debug!(
                    "{} | health {}% | hits {}/{} | heals {} | hazards {}",
                    hud.survival_text,
                    hud.health_percent,
                    hud.hits,
                    hud.max_hits,
                    hud.heals,
                    view.hazards.len()
                );
            }
            Ok(())
        }
    }

    /// Logs every sound the host would play
    #[derive(Default)]
    struct CueLogger {
        played: usize,
    }

    impl AudioSink for CueLogger {
        fn submit(&mut self, command: AudioCommand) {
            if matches!(command, AudioCommand::Play { .. }) {
                self.played += 1;
            }
            log::info!("Audio: {:?}", command);
        }
    }

    #[derive(Default)]
    struct Tally {
        hits: u32,
        heals: u32,
        comets: u32,
        strikes: u32,
    }

    impl Tally {
        fn record(&mut self, events: &[GameEvent]) {
            for event in events {
                match event {
                    GameEvent::AsteroidHit { .. } => self.hits += 1,
                    GameEvent::Healed { .. } => self.heals += 1,
                    GameEvent::CometSpawned { .. } => self.comets += 1,
                    GameEvent::Explosion { .. } => self.strikes += 1,
                    _ => {}
                }
            }
        }
    }

    fn run(opts: Options) -> Result<(), Box<dyn Error>> {
        let tuning = match &opts.config {
            Some(path) => Tuning::load(path)?,
            None => Tuning::default(),
        };
        let settings = Settings {
            difficulty: opts.difficulty,
            ..Settings::default()
        };
        let bounds = Vec2::new(DEFAULT_CANVAS_WIDTH, DEFAULT_CANVAS_HEIGHT);
        let mut game = Game::new(tuning, settings, bounds, opts.seed);
        if let Some(volume) = opts.volume {
            game.audio_mut().set_master_volume(volume);
        }
        game.audio_mut().set_muted(opts.mute);

        let mut pilot = Autopilot::default();
        let mut renderer = HudLogger::default();
        let mut audio = CueLogger::default();
        let mut tally = Tally::default();

        game.start(0.0);
        for frame in 0..opts.frames {
            pilot.aim(game.state());
            let now = frame as f64 * DISPLAY_INTERVAL_MS;
            if let Some(events) = game.frame(now, &mut pilot, &mut renderer, &mut audio) {
                tally.record(&events);
            }
            if game.state().is_over() && game.state().explosion.is_none() {
                break;
            }
        }
        game.stop(&mut audio);

        let view = game.view();
        println!(
            "seed {} | {} | survived {} | ticks {} | hits {} | heals {} | comets {} | explosions {} | sounds {}",
            opts.seed,
            if view.over { "game over" } else { "still flying" },
            view.hud.survival_text,
            game.state().tick_count,
            tally.hits,
            tally.heals,
            tally.comets,
            tally.strikes,
            audio.played
        );
        if opts.dump {
            println!("{}", serde_json::to_string_pretty(&view)?);
        }
        Ok(())
    }

    pub fn main() -> ExitCode {
        env_logger::init();
        log::info!("Astro Dodge (headless) starting...");

        let opts = match Options::parse(std::env::args().skip(1)) {
            Ok(opts) => opts,
            Err(msg) => {
                if !msg.is_empty() {
                    eprintln!("error: {}", msg);
                }
                eprintln!("{}", USAGE);
                return ExitCode::from(2);
            }
        };

        match run(opts) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                log::error!("{}", e);
                eprintln!("error: {}", e);
                ExitCode::FAILURE
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    native::main()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Web hosts drive `astro_dodge::Game` directly
}
