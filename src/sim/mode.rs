//! The play mode: owns the simulation state and runs one frame per `update`.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use thiserror::Error;

use super::camera::CameraController;
use super::cycle::{CycleEvent, CyclePhase, ExplosionCycle};
use super::hit::HitDetector;
use super::score::ScoreTracker;
use crate::audio::{AudioCue, CueHandle, CueSink};
use crate::consts::{ALARM_VOLUME, BACKGROUND_VOLUME, EXPLOSION_NAME, HIT_VOLUME};
use crate::input::InputState;
use crate::scene::{Pose, Scene, SceneError, Transform, TransformId};
use crate::settings::Settings;
use crate::tuning::{ConfigError, Tuning};

/// Reasons the mode cannot start
#[derive(Error, Debug)]
pub enum ModeError {
    /// A required scene object is missing or duplicated.
    #[error(transparent)]
    Scene(#[from] SceneError),

    /// The tuning values cannot drive a simulation.
    #[error(transparent)]
    Tuning(#[from] ConfigError),
}

pub struct PlayMode<S: CueSink> {
    scene: Scene,
    camera: TransformId,
    explosion: TransformId,
    /// Resolved for the renderer; the simulation never moves it
    light: TransformId,

    pub input: InputState,
    tuning: Tuning,
    settings: Settings,
    controller: CameraController,
    cycle: ExplosionCycle,
    hits: HitDetector,
    score: ScoreTracker,
    rng: Pcg32,

    sink: S,
    background_loop: CueHandle,
}

impl<S: CueSink> PlayMode<S> {
    /// Resolve the scene handles and start the music. Fails if the tuning is
    /// invalid, the scene has no explosion, or it does not hold exactly one
    /// camera and one light.
    pub fn new(
        scene: Scene,
        tuning: &Tuning,
        settings: Settings,
        mut sink: S,
        seed: u64,
    ) -> Result<Self, ModeError> {
        tuning.validate()?;
        let explosion = scene.find(EXPLOSION_NAME)?;
        let camera = scene.cameras[scene.single_camera()?].transform;
        let light = scene.lights[scene.single_light()?].transform;

        let background_loop =
            sink.loop_ambient(AudioCue::Background, settings.music(BACKGROUND_VOLUME), 0.0);

        log::info!("Play mode started (seed {seed})");

        Ok(Self {
            scene,
            camera,
            explosion,
            light,
            input: InputState::new(settings.bindings.clone()),
            tuning: tuning.clone(),
            controller: CameraController::new(tuning),
            cycle: ExplosionCycle::new(tuning),
            hits: HitDetector::new(tuning),
            score: ScoreTracker::new(tuning),
            rng: Pcg32::seed_from_u64(seed),
            settings,
            sink,
            background_loop,
        })
    }

    /// Raw key-down event; true if the key is bound
    pub fn handle_key_down(&mut self, key: &str) -> bool {
        self.input.on_key_down(key)
    }

    /// Raw key-up event; true if the key is bound
    pub fn handle_key_up(&mut self, key: &str) -> bool {
        self.input.on_key_up(key)
    }

    /// Advance one frame
    pub fn update(&mut self, elapsed: f32) {
        // Camera first: the hit test below must see this frame's pose
        let camera = self.scene.transform_mut(self.camera);
        self.controller.update(elapsed, &self.input, &mut camera.pose);
        let (ears, right) = (camera.world_position(), camera.pose.right());
        self.sink.set_listener(ears, right);

        let difficulty = self.tuning.difficulty(self.score.points());
        if let Some(event) = self.cycle.advance(elapsed, difficulty, &mut self.rng) {
            self.apply(event);
        }

        let camera_pos = self.scene.transform(self.camera).pose.position;
        let explosion_pos = self.scene.transform(self.explosion).pose.position;
        if self.hits.evaluate(camera_pos, explosion_pos, self.score.points()) {
            self.sink
                .play_ambient(AudioCue::Hit, self.settings.sfx(HIT_VOLUME), 0.0);
        }

        self.input.consume_frame();
    }

    fn apply(&mut self, event: CycleEvent) {
        match event {
            CycleEvent::Telegraphed { target } => {
                let at = target.extend(self.tuning.warning_cue_height);
                self.sink.play_positioned(
                    AudioCue::Alarm,
                    self.settings.sfx(ALARM_VOLUME),
                    at,
                    self.tuning.warning_falloff_radius,
                );
            }
            CycleEvent::Detonated { position, scale } => {
                let explosion = self.scene.transform_mut(self.explosion);
                explosion.pose.position = position;
                explosion.scale = Vec3::splat(scale);
            }
            CycleEvent::Settled { home } => {
                self.scene.transform_mut(self.explosion).pose.position = home;
                let was_hit = self.hits.take();
                self.score.apply_result(was_hit);
                log::info!(
                    "Round over: {} -> {} points",
                    if was_hit { "hit" } else { "dodged" },
                    self.score.points()
                );
            }
        }
    }

    /// Recompute the camera aspect ratio for a drawable of the given pixel size
    pub fn resize(&mut self, width: u32, height: u32) {
        let aspect = width as f32 / height.max(1) as f32;
        for camera in &mut self.scene.cameras {
            camera.aspect = aspect;
        }
    }

    /// Overlay text, bottom line first, title last
    pub fn hud_lines(&self) -> [String; 3] {
        [
            "WASD to move; KL to turn.".to_string(),
            format!("Your current points: {}", self.score.points()),
            "Ekrixiphobia the Game!!!!!!!".to_string(),
        ]
    }

    pub fn score(&self) -> i32 {
        self.score.points()
    }

    pub fn difficulty(&self) -> f32 {
        self.tuning.difficulty(self.score.points())
    }

    pub fn phase(&self) -> CyclePhase {
        self.cycle.phase()
    }

    pub fn cycle(&self) -> &ExplosionCycle {
        &self.cycle
    }

    pub fn is_hit(&self) -> bool {
        self.hits.is_hit()
    }

    pub fn camera_pose(&self) -> Pose {
        self.scene.transform(self.camera).pose
    }

    #[cfg(test)]
    pub(crate) fn camera_pose_mut(&mut self) -> &mut Pose {
        &mut self.scene.transform_mut(self.camera).pose
    }

    pub fn explosion(&self) -> &Transform {
        self.scene.transform(self.explosion)
    }

    pub fn light(&self) -> &Transform {
        self.scene.transform(self.light)
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn background_loop(&self) -> CueHandle {
        self.background_loop
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{CueRequest, RecordingSink};
    use glam::Vec2;

    const DT: f32 = 1.0 / 60.0;

    fn mode() -> PlayMode<RecordingSink> {
        let tuning = Tuning::default();
        PlayMode::new(
            Scene::stage(tuning.home),
            &tuning,
            Settings::default(),
            RecordingSink::new(),
            42,
        )
        .unwrap()
    }

    /// Run until the cycle reports `phase` on a fresh entry
    fn run_until_entered(mode: &mut PlayMode<RecordingSink>, phase: CyclePhase) {
        for _ in 0..10_000 {
            mode.update(DT);
            if mode.phase() == phase && mode.cycle().phase_just_entered() {
                return;
            }
        }
        panic!("never entered {phase:?}");
    }

    #[test]
    fn test_construction_errors() {
        let tuning = Tuning::default();

        let mut no_explosion = Scene::new();
        let cam = no_explosion.add_transform(Transform::new("Camera", Vec2::ZERO, 1.0));
        no_explosion.add_camera(cam);
        no_explosion.add_light(cam);
        let settings = Settings::default();
        let err = PlayMode::new(no_explosion, &tuning, settings, RecordingSink::new(), 1).err();
        assert!(matches!(
            err,
            Some(ModeError::Scene(SceneError::MissingTransform(name))) if name == "Explosion"
        ));

        let mut two_lights = Scene::stage(tuning.home);
        let extra = two_lights.add_transform(Transform::new("Light2", Vec2::ZERO, 5.0));
        two_lights.add_light(extra);
        let settings = Settings::default();
        let err = PlayMode::new(two_lights, &tuning, settings, RecordingSink::new(), 1).err();
        assert!(matches!(err, Some(ModeError::Scene(SceneError::LightCount(2)))));
    }

    #[test]
    fn test_invalid_tuning_rejected_at_startup() {
        let tuning = Tuning {
            spawn_extent: -1.0,
            ..Default::default()
        };
        let scene = Scene::stage(tuning.home);
        let settings = Settings::default();
        let err = PlayMode::new(scene, &tuning, settings, RecordingSink::new(), 1).err();
        assert!(matches!(
            err,
            Some(ModeError::Tuning(ConfigError::Invalid {
                field: "spawn_extent",
                ..
            }))
        ));
    }

    #[test]
    fn test_background_loop_started() {
        let mode = mode();
        assert_eq!(mode.sink().requests.len(), 1);
        assert!(matches!(
            mode.sink().requests[0],
            CueRequest::Loop {
                cue: AudioCue::Background,
                ..
            }
        ));
        assert_eq!(mode.score(), 0);
        assert_eq!(mode.phase(), CyclePhase::Telegraph);
    }

    #[test]
    fn test_first_frame_warns_without_moving_explosion() {
        let mut mode = mode();
        mode.update(DT);

        let target = mode.cycle().target();
        assert_eq!(mode.sink().count(AudioCue::Alarm), 1);
        assert_eq!(
            mode.sink().requests[1],
            CueRequest::Positioned {
                cue: AudioCue::Alarm,
                volume: 0.8,
                position: target.extend(2.0),
                falloff_radius: 20.0,
            }
        );
        assert_eq!(mode.explosion().pose.position, Vec2::new(50.0, 0.0));
    }

    /// Pick the next target; expects a telegraph to be pending
    fn start_round(mode: &mut PlayMode<RecordingSink>) -> Vec2 {
        assert!(mode.cycle().phase_just_entered());
        mode.update(DT);
        mode.cycle().target()
    }

    /// One full round spent in the corner opposite the target
    fn dodge_round(mode: &mut PlayMode<RecordingSink>) {
        let target = start_round(mode);
        mode.camera_pose_mut().position = -target.signum() * 29.5;
        run_until_entered(mode, CyclePhase::Telegraph);
    }

    #[test]
    fn test_detonation_moves_and_scales() {
        let mut mode = mode();
        run_until_entered(&mut mode, CyclePhase::Detonate);

        let explosion = mode.explosion();
        assert_eq!(explosion.pose.position, mode.cycle().target());
        assert_eq!(explosion.scale, Vec3::ONE);
    }

    #[test]
    fn test_dodged_round_scores() {
        let mut mode = mode();
        dodge_round(&mut mode);
        assert_eq!(mode.score(), 1);
        assert_eq!(mode.explosion().pose.position, Vec2::new(50.0, 0.0));
        assert!(!mode.is_hit());
        assert_eq!(mode.sink().count(AudioCue::Hit), 0);
    }

    #[test]
    fn test_hit_round_costs_point_and_cues_once() {
        let mut mode = mode();
        dodge_round(&mut mode);
        dodge_round(&mut mode);
        assert_eq!(mode.score(), 2);

        let target = start_round(&mut mode);
        mode.camera_pose_mut().position = target.clamp(Vec2::splat(-29.5), Vec2::splat(29.5));
        run_until_entered(&mut mode, CyclePhase::Detonate);
        // Stand in the blast for a while
        for _ in 0..120 {
            mode.update(DT);
        }
        assert!(mode.is_hit());
        assert_eq!(mode.sink().count(AudioCue::Hit), 1);

        run_until_entered(&mut mode, CyclePhase::Telegraph);
        assert_eq!(mode.score(), 1);
        assert!(!mode.is_hit());
        assert_eq!(mode.sink().count(AudioCue::Hit), 1);
    }

    #[test]
    fn test_score_never_exceeds_max() {
        let mut mode = mode();
        for _ in 0..12 {
            dodge_round(&mut mode);
        }
        assert_eq!(mode.score(), 10);
        assert!((mode.difficulty() - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_scale_tracks_difficulty() {
        let mut mode = mode();
        for _ in 0..3 {
            dodge_round(&mut mode);
        }
        run_until_entered(&mut mode, CyclePhase::Detonate);
        assert_eq!(mode.explosion().scale, Vec3::splat(mode.difficulty()));
        assert!((mode.explosion().scale.x - 1.3).abs() < 1e-6);
    }

    #[test]
    fn test_input_edges_cleared_each_frame() {
        let mut mode = mode();
        assert!(mode.handle_key_down("d"));
        assert!(!mode.handle_key_down("z"));
        mode.update(DT);
        assert_eq!(mode.input.right.down_edge_count, 0);
        assert!(mode.input.right.held);
        assert!(mode.camera_pose().position.x > 0.0);

        assert!(mode.handle_key_up("d"));
        let x = mode.camera_pose().position.x;
        mode.update(DT);
        assert_eq!(mode.camera_pose().position.x, x);
    }

    #[test]
    fn test_listener_follows_camera() {
        let mut mode = mode();
        mode.handle_key_down("w");
        mode.update(0.5);
        let (ears, right) = mode.sink().listener.unwrap();
        assert!(ears.truncate().abs_diff_eq(Vec2::new(0.0, 10.0), 1e-4));
        assert_eq!(right, Vec2::X);
    }

    #[test]
    fn test_resize_and_hud() {
        let mut mode = mode();
        mode.resize(1920, 1080);
        assert!((mode.scene().cameras[0].aspect - 16.0 / 9.0).abs() < 1e-5);
        mode.resize(10, 0);
        assert_eq!(mode.scene().cameras[0].aspect, 10.0);

        assert_eq!(mode.hud_lines()[1], "Your current points: 0");
    }
}
