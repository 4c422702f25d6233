//! Audio cue routing
//!
//! The simulation reports what happened; this module decides which sounds
//! that implies and hands them to a host [`AudioSink`] with the right volume.
//! Playback itself (files, Web Audio, a mixer) belongs to the host.

use crate::sim::{ExplosionCause, GameEvent};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Asteroid struck the ship
    Zap,
    /// A comet trail destroyed something
    Explosion,
    /// A comet appeared
    CometWhoosh,
    /// The run ended
    GameOver,
    /// Ambient space music, looped while the ship is moving
    SpaceMusic,
}

impl SoundEffect {
    /// Per-cue mix level
    pub fn base_volume(self) -> f32 {
        match self {
            SoundEffect::Zap => 0.8,
            SoundEffect::Explosion => 0.7,
            SoundEffect::CometWhoosh => 0.6,
            SoundEffect::GameOver => 0.9,
            SoundEffect::SpaceMusic => 0.4,
        }
    }
}

/// What the host should do
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AudioCommand {
    /// Play once from the start
    Play { effect: SoundEffect, volume: f32 },
    /// Start looping (no-op if already looping)
    Loop { effect: SoundEffect, volume: f32 },
    Stop { effect: SoundEffect },
}

/// Host-side playback
pub trait AudioSink {
    fn submit(&mut self, command: AudioCommand);
}

/// Discards everything
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn submit(&mut self, _command: AudioCommand) {}
}

/// Records commands; handy for hosts that batch and for tests
#[derive(Debug, Default)]
pub struct RecordingAudio {
    pub commands: Vec<AudioCommand>,
}

impl AudioSink for RecordingAudio {
    fn submit(&mut self, command: AudioCommand) {
        self.commands.push(command);
    }
}

/// Cues implied by an event, in playback order
pub fn cues_for(event: &GameEvent) -> &'static [Cue] {
    match event {
        GameEvent::AsteroidHit { .. } => &[Cue::Play(SoundEffect::Zap)],
        GameEvent::Explosion {
            cause: ExplosionCause::CometStrike,
            ..
        } => &[Cue::Play(SoundEffect::Explosion)],
        GameEvent::CometSpawned { .. } => &[Cue::Play(SoundEffect::CometWhoosh)],
        GameEvent::GameOver { .. } => &[Cue::Play(SoundEffect::GameOver)],
        GameEvent::EngineStarted => &[Cue::Loop(SoundEffect::SpaceMusic)],
        GameEvent::EngineStopped => &[Cue::Stop(SoundEffect::SpaceMusic)],
        _ => &[],
    }
}

/// Volume-free form of [`AudioCommand`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Play(SoundEffect),
    Loop(SoundEffect),
    Stop(SoundEffect),
}

/// Volume settings and event dispatch
#[derive(Debug, Clone)]
pub struct AudioManager {
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Turn a cue into a command at the current volume
    ///
    /// Silent plays are dropped; stops always go through.
    pub fn command(&self, cue: Cue) -> Option<AudioCommand> {
        let vol = self.effective_volume();
        match cue {
            Cue::Stop(effect) => Some(AudioCommand::Stop { effect }),
            _ if vol <= 0.0 => None,
            Cue::Play(effect) => Some(AudioCommand::Play {
                effect,
                volume: vol * effect.base_volume(),
            }),
            Cue::Loop(effect) => Some(AudioCommand::Loop {
                effect,
                volume: vol * effect.base_volume(),
            }),
        }
    }

    /// Forward the sounds for a tick's events to the sink
    pub fn dispatch(&self, events: &[GameEvent], sink: &mut dyn AudioSink) {
        for cue in events.iter().flat_map(cues_for) {
            if let Some(command) = self.command(*cue) {
                log::trace!("Audio: {:?}", command);
                sink.submit(command);
            }
        }
    }

    /// Silence every loop (restart, shutdown)
    pub fn stop_all(&self, sink: &mut dyn AudioSink) {
        sink.submit(AudioCommand::Stop {
            effect: SoundEffect::SpaceMusic,
        });
    }
}
