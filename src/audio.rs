//! Sound effect routing
//!
//! The simulation never plays sounds. It records [`GameEvent`]s, and the
//! session hands each tick's events to an [`AudioManager`], which turns them
//! into fire-and-forget calls on whatever [`AudioSink`] the platform provides.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Laser fired
    Laser,
    /// Asteroid blown up by a laser
    AsteroidExplosion,
    /// Asteroid crashed into the ship
    ShipHit,
    /// Game over
    GameOver,
}

impl SoundEffect {
    /// The sound an event makes, if any
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::LaserFired => Some(SoundEffect::Laser),
            GameEvent::ObstacleDestroyed { .. } => Some(SoundEffect::AsteroidExplosion),
            GameEvent::ShipHit { .. } => Some(SoundEffect::ShipHit),
            GameEvent::GameOver { .. } => Some(SoundEffect::GameOver),
            GameEvent::ObstaclePassed { .. } | GameEvent::TierChanged { .. } => None,
        }
    }

    /// Per-effect mix level relative to the sfx volume
    pub fn base_gain(&self) -> f32 {
        match self {
            SoundEffect::Laser => 0.5,
            SoundEffect::AsteroidExplosion => 0.75,
            SoundEffect::ShipHit => 1.0,
            SoundEffect::GameOver => 0.5,
        }
    }
}

/// Something that can play a sound. Failures stay inside the sink.
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect, volume: f32);
}

/// Sink that only logs, for headless runs
#[derive(Debug, Default)]
pub struct LogAudioSink;

impl AudioSink for LogAudioSink {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        log::debug!("sfx {:?} at {:.2}", effect, volume);
    }
}

/// Audio manager for the game
pub struct AudioManager<A: AudioSink> {
    sink: A,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl<A: AudioSink> AudioManager<A> {
    pub fn new(sink: A) -> Self {
        Self {
            sink,
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

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn sink(&self) -> &A {
        &self.sink
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        self.sink.play(effect, vol * effect.base_gain());
    }

    /// Play the sounds for one tick's events. Each effect plays at most once per call.
    pub fn handle_events(&mut self, events: &[GameEvent]) {
        let mut played: Vec<SoundEffect> = Vec::with_capacity(4);
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            if !played.contains(&effect) {
                played.push(effect);
                self.play(effect);
            }
        }
    }
}
