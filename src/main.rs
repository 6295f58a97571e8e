//! Space Explorer headless runner
//!
//! Flies an autopilot through a full session without a renderer, which is
//! handy for soak-testing the simulation and checking the difficulty curve.
//!
//! Usage: `space-explorer [settings.json] [highscores.json]`

use space_explorer::audio::LogAudioSink;
use space_explorer::consts::SIM_DT;
use space_explorer::highscores::FileScoreStore;
use glam::Vec3;
use space_explorer::sim::{InputEvent, Snapshot};
use space_explorer::{Session, Settings};

/// Give up after this many simulated seconds
const MAX_SECONDS: u32 = 600;
/// Fire every this many frames
const FIRE_INTERVAL: u32 = 8;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Space Explorer (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings = args
        .next()
        .map(Settings::load_or_default)
        .unwrap_or_default();
    let scores_path = args.next().unwrap_or_else(|| "highscores.json".to_string());
    let store = FileScoreStore::open_or_empty(&scores_path);

    let mut session = Session::new(&settings, store, LogAudioSink);
    log::info!("Best score on record for {}: {}", settings.player, session.high_score());

    let max_frames = MAX_SECONDS * (1.0 / SIM_DT).round() as u32;
    let mut snapshot = session.frame(0.0);
    for frame in 0..max_frames {
        steer(&mut session, &snapshot);
        if frame % FIRE_INTERVAL == 0 {
            press(&mut session, " ", true);
        }

        snapshot = session.frame(SIM_DT);
        if snapshot.game_over {
            break;
        }
        if frame % 600 == 0 {
            log::info!(
                "t={}s score={} health={} obstacles={}",
                frame / 60,
                snapshot.score,
                snapshot.health,
                snapshot.obstacles.len()
            );
        }
    }

    log::info!(
        "Run finished: score {} health {} ({} ticks)",
        snapshot.score,
        snapshot.health,
        session.state().time_ticks
    );
    if let Some(top) = session.store().board().top_score() {
        log::info!("Leaderboard top score: {}", top);
    }
}

type HeadlessSession = Session<FileScoreStore, LogAudioSink>;

/// Feed a key through the same bindings a keyboard would use
fn press(session: &mut HeadlessSession, key: &str, pressed: bool) {
    if let Some(event) = InputEvent::from_key(key, pressed) {
        session.push_input(event);
    }
}

/// Line up the cannon with the nearest obstacle ahead
fn steer(session: &mut HeadlessSession, snapshot: &Snapshot) {
    let Some(ship) = snapshot.ship else { return };
    let cannon = session
        .state()
        .ship
        .as_ref()
        .map_or(Vec3::ZERO, |s| s.model.cannon_offset());
    let muzzle = ship.position + cannon;
    let target = snapshot
        .obstacles
        .iter()
        .filter(|o| o.position.z < ship.position.z - 5.0)
        .max_by(|a, b| {
            a.position
                .z
                .partial_cmp(&b.position.z)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    let (dx, dy) = match target {
        Some(o) => (o.position.x - muzzle.x, o.position.y - muzzle.y),
        None => (0.0, 0.0),
    };
    let dead_zone = 0.5;
    let keys = [
        ("d", dx > dead_zone),
        ("a", dx < -dead_zone),
        ("w", dy > dead_zone),
        ("s", dy < -dead_zone),
    ];
    for (key, pressed) in keys {
        press(session, key, pressed);
    }
}
