//! Ekrixiphobia headless entry point
//!
//! Runs the play mode at a fixed frame rate with a scripted player that
//! flees each telegraphed target, then logs how it fared.

use std::time::{SystemTime, UNIX_EPOCH};

use ekrixiphobia::audio::{AudioCue, RecordingSink};
use ekrixiphobia::sim::{CyclePhase, PlayMode};
use ekrixiphobia::{Scene, Settings, Tuning};

const FRAME_DT: f32 = 1.0 / 60.0;
const RUN_SECONDS: f32 = 120.0;

/// Holds whichever movement keys point away from the last target
#[derive(Default)]
struct FleeBot {
    held: Vec<&'static str>,
}

impl FleeBot {
    fn steer(&mut self, mode: &mut PlayMode<RecordingSink>) {
        let away = mode.camera_pose().position - mode.cycle().target();
        let mut want = Vec::new();
        if mode.phase() == CyclePhase::Telegraph || mode.is_hit() {
            if away.x.abs() > 0.5 {
                want.push(if away.x > 0.0 { "d" } else { "a" });
            }
            if away.y.abs() > 0.5 {
                want.push(if away.y > 0.0 { "w" } else { "s" });
            }
        }

        for key in self.held.iter().filter(|k| !want.contains(*k)) {
            mode.handle_key_up(key);
        }
        for key in want.iter().filter(|k| !self.held.contains(*k)) {
            mode.handle_key_down(key);
        }
        self.held = want;
    }
}

fn main() {
    env_logger::init();

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    let tuning = Tuning::default();
    let scene = Scene::stage(tuning.home);
    let settings = Settings::default();
    let mut mode = match PlayMode::new(scene, &tuning, settings, RecordingSink::new(), seed) {
        Ok(mode) => mode,
        Err(err) => {
            log::error!("Failed to start play mode: {err}");
            std::process::exit(1);
        }
    };
    mode.resize(1280, 720);

    let mut bot = FleeBot::default();
    let frames = (RUN_SECONDS / FRAME_DT) as u32;
    for _ in 0..frames {
        bot.steer(&mut mode);
        mode.update(FRAME_DT);
    }

    for line in mode.hud_lines() {
        log::info!("{line}");
    }
    println!(
        "score {} after {RUN_SECONDS}s: {} warnings, {} hits",
        mode.score(),
        mode.sink().count(AudioCue::Alarm),
        mode.sink().count(AudioCue::Hit)
    );
}
