//! A play session: one simulation plus its outside collaborators
//!
//! The session owns the [`GameState`], latches input between frames, runs
//! fixed-timestep ticks, forwards events to audio and reports the final
//! score exactly once.

use crate::audio::{AudioManager, AudioSink};
use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::highscores::ScoreStore;
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, InputEvent, InputState, Snapshot, tick};

pub struct Session<S: ScoreStore, A: AudioSink> {
    state: GameState,
    input: InputState,
    audio: AudioManager<A>,
    store: S,
    player: String,
    /// Best score on record when the session started
    high_score: u64,
    accumulator: f32,
    score_reported: bool,
}

impl<S: ScoreStore, A: AudioSink> Session<S, A> {
    pub fn new(settings: &Settings, store: S, sink: A) -> Self {
        let seed = settings.seed.unwrap_or_else(random_seed);
        let state = GameState::with_ship(seed, settings.ship, settings.ship_speed);
        log::info!(
            "Session started for {} flying {} (seed {})",
            settings.player,
            settings.ship.as_str(),
            seed
        );

        let mut audio = AudioManager::new(sink);
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_muted(settings.muted);

        let high_score = match store.fetch_high_score(&settings.player) {
            Ok(score) => score,
            Err(e) => {
                log::warn!("Could not fetch high score for {}: {}", settings.player, e);
                0
            }
        };

        Self {
            state,
            input: InputState::default(),
            audio,
            store,
            player: settings.player.clone(),
            high_score,
            accumulator: 0.0,
            score_reported: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn audio(&self) -> &AudioManager<A> {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut AudioManager<A> {
        &mut self.audio
    }

    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    /// Latch an input event; it takes effect on the next tick
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.apply(event);
    }

    /// Drop held keys (focus lost)
    pub fn clear_input(&mut self) {
        self.input.clear();
    }

    /// Run exactly one tick
    pub fn step(&mut self) -> Snapshot {
        let input = self.input.take_tick_input();
        let snapshot = tick(&mut self.state, &input, SIM_DT);
        self.after_tick(&snapshot.events);
        snapshot
    }

    /// Run as many ticks as `frame_dt` covers (capped), returning the latest snapshot.
    ///
    /// Events from every tick in the frame are merged into the returned snapshot.
    pub fn frame(&mut self, frame_dt: f32) -> Snapshot {
        // A NaN would poison the accumulator for good
        let frame_dt = if frame_dt.is_finite() { frame_dt.clamp(0.0, 0.1) } else { 0.0 };
        self.accumulator += frame_dt;

        let mut events: Vec<GameEvent> = Vec::new();
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let snapshot = self.step();
            events.extend(snapshot.events);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        if substeps == MAX_SUBSTEPS {
            // Drop the backlog rather than spiral
            self.accumulator = self.accumulator.min(SIM_DT);
        }

        let mut snapshot = self.state.snapshot();
        events.append(&mut snapshot.events);
        snapshot.events = events;
        snapshot
    }

    /// Start a new run. The score can be reported again afterwards.
    pub fn reset(&mut self, seed: Option<u64>) {
        let seed = seed.unwrap_or_else(random_seed);
        if self.score_reported {
            self.high_score = self.high_score.max(self.state.score.score());
        }
        self.state.reset(seed);
        self.input.clear();
        self.accumulator = 0.0;
        self.score_reported = false;
        log::info!("Session reset (seed {})", seed);
    }

    fn after_tick(&mut self, events: &[GameEvent]) {
        self.audio.handle_events(events);

        if self.state.is_game_over() && !self.score_reported {
            self.score_reported = true;
            let score = self.state.score.score();
            if score > self.high_score {
                log::info!("New high score for {}: {}", self.player, score);
            }
            if let Err(e) = self.store.report_score(&self.player, score) {
                log::warn!("Failed to report score {} for {}: {}", score, self.player, e);
            }
        }
    }
}

fn random_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x5eed)
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::audio::SoundEffect;
    use crate::highscores::{HighScores, StoreError};
    use crate::sim::{Control, ShipModel};

    #[derive(Default)]
    struct Recorder(Vec<SoundEffect>);

    impl AudioSink for Recorder {
        fn play(&mut self, effect: SoundEffect, _volume: f32) {
            self.0.push(effect);
        }
    }

    /// Store whose backend is always down
    #[derive(Default)]
    struct Offline {
        attempts: u32,
    }

    impl ScoreStore for Offline {
        fn report_score(&mut self, _player: &str, _score: u64) -> Result<(), StoreError> {
            self.attempts += 1;
            Err(StoreError::Io(std::io::Error::other("offline")))
        }

        fn fetch_high_score(&self, _player: &str) -> Result<u64, StoreError> {
            Err(StoreError::Io(std::io::Error::other("offline")))
        }
    }

    fn settings() -> Settings {
        Settings {
            player: "ann".to_string(),
            seed: Some(4242),
            ..Default::default()
        }
    }

    fn park_obstacles(state: &mut GameState) {
        for (i, o) in state.obstacles.iter_mut().enumerate() {
            o.position = Vec3::new(35.0, i as f32, -55.0);
        }
    }

    /// Crash into slot 0 until the run ends
    fn crash_until_over<S: ScoreStore, A: AudioSink>(session: &mut Session<S, A>) {
        for _ in 0..100 {
            park_obstacles(session.state_mut());
            session.state_mut().obstacles[0].position = Vec3::new(0.0, 0.0, -0.1);
            session.step();
        }
    }

    #[test]
    fn test_new_session_uses_settings() {
        let mut board = HighScores::new();
        board.add_score("ann", 12);
        let settings = Settings {
            ship: ShipModel::Destroyer,
            ..settings()
        };
        let session = Session::new(&settings, board, Recorder::default());
        assert_eq!(session.high_score(), 12);
        assert_eq!(session.state().seed, 4242);
        assert_eq!(session.state().ship.as_ref().map(|s| s.model), Some(ShipModel::Destroyer));
    }

    #[test]
    fn test_input_latched_until_tick() {
        let mut session = Session::new(&settings(), HighScores::new(), Recorder::default());
        park_obstacles(session.state_mut());
        session.push_input(InputEvent::Key {
            control: Control::Up,
            pressed: true,
        });
        session.push_input(InputEvent::Fire);
        let snap = session.step();
        assert_eq!(snap.projectiles.len(), 1);
        assert!(snap.ship.unwrap().position.y > 0.0);
        assert_eq!(session.audio().sink().0, vec![SoundEffect::Laser]);

        // Fire was one-shot, up is still held
        let snap = session.step();
        assert_eq!(snap.projectiles.len(), 1);
        assert!((snap.ship.unwrap().position.y - 0.6).abs() < 1e-5);
    }

    #[test]
    fn test_fire_while_paused_is_dropped() {
        let mut session = Session::new(&settings(), HighScores::new(), Recorder::default());
        session.push_input(InputEvent::PauseToggle);
        session.step();
        session.push_input(InputEvent::Fire);
        let snap = session.step();
        assert!(snap.paused);
        assert!(snap.projectiles.is_empty());

        session.push_input(InputEvent::PauseToggle);
        park_obstacles(session.state_mut());
        let snap = session.step();
        assert!(!snap.paused);
        assert!(snap.projectiles.is_empty());
    }

    #[test]
    fn test_fire_inside_pause_window_is_dropped() {
        let mut session = Session::new(&settings(), HighScores::new(), Recorder::default());
        park_obstacles(session.state_mut());
        session.push_input(InputEvent::PauseToggle);
        session.step();

        session.push_input(InputEvent::Fire);
        session.push_input(InputEvent::PauseToggle);
        let snap = session.step();
        assert!(!snap.paused);
        assert!(snap.projectiles.is_empty());
        assert!(session.audio().sink().0.is_empty());
    }

    #[test]
    fn test_score_reported_once() {
        let mut session = Session::new(&settings(), HighScores::new(), Recorder::default());
        session.state_mut().score.on_obstacle_destroyed();
        crash_until_over(&mut session);

        assert!(session.state().is_game_over());
        assert_eq!(session.store().best_for("ann"), Some(1));
        let game_over_sounds = session
            .audio()
            .sink()
            .0
            .iter()
            .filter(|e| **e == SoundEffect::GameOver)
            .count();
        assert_eq!(game_over_sounds, 1);
    }

    #[test]
    fn test_store_failure_does_not_affect_game() {
        let mut session = Session::new(&settings(), Offline::default(), Recorder::default());
        assert_eq!(session.high_score(), 0);
        crash_until_over(&mut session);
        assert!(session.state().is_game_over());
        assert_eq!(session.state().health.health(), 0);
        assert_eq!(session.store().attempts, 1);
    }

    #[test]
    fn test_reset_starts_fresh_run() {
        let mut session = Session::new(&settings(), HighScores::new(), Recorder::default());
        crash_until_over(&mut session);
        session.reset(Some(7));

        let state = session.state();
        assert!(!state.is_game_over());
        assert_eq!(state.health.health(), 100);
        assert_eq!(state.obstacles.len(), 15);
        assert_eq!(state.seed, 7);
    }

    #[test]
    fn test_frame_caps_substeps() {
        let mut session = Session::new(&settings(), HighScores::new(), Recorder::default());
        park_obstacles(session.state_mut());
        session.frame(1.0);
        assert_eq!(session.state().time_ticks, MAX_SUBSTEPS as u64);

        // A tiny frame runs nothing
        let mut session = Session::new(&settings(), HighScores::new(), Recorder::default());
        session.frame(SIM_DT * 0.25);
        assert_eq!(session.state().time_ticks, 0);
    }

    #[test]
    fn test_non_finite_frame_does_not_stall() {
        let mut session = Session::new(&settings(), HighScores::new(), Recorder::default());
        park_obstacles(session.state_mut());
        session.frame(f32::NAN);
        session.frame(f32::INFINITY);
        assert_eq!(session.state().time_ticks, 0);

        for _ in 0..120 {
            session.frame(SIM_DT);
        }
        assert!(session.state().time_ticks >= 119);
    }

    #[test]
    fn test_frame_merges_events() {
        let mut session = Session::new(&settings(), HighScores::new(), Recorder::default());
        park_obstacles(session.state_mut());
        session.push_input(InputEvent::Fire);
        let snap = session.frame(SIM_DT * 2.5);
        assert_eq!(snap.events, vec![GameEvent::LaserFired]);
        assert_eq!(session.state().time_ticks, 2);
    }
}
