//! Camera movement from held buttons

use glam::Vec2;

use crate::input::InputState;
use crate::normalize_angle;
use crate::scene::Pose;
use crate::tuning::Tuning;

/// Moves and turns the camera, keeping it inside the play area
#[derive(Debug, Clone, Copy)]
pub struct CameraController {
    /// Units per second
    pub speed: f32,
    /// Radians per second
    pub rotation_speed: f32,
    /// Half-extents of the play area
    pub bounds: Vec2,
}

impl CameraController {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            speed: tuning.player_speed,
            rotation_speed: tuning.rotation_speed.to_radians(),
            bounds: Vec2::new(tuning.max_x, tuning.max_y),
        }
    }

    pub fn update(&self, dt: f32, input: &InputState, pose: &mut Pose) {
        let mut step = Vec2::new(
            InputState::axis(&input.left, &input.right),
            InputState::axis(&input.down, &input.up),
        );
        // Diagonals are no faster than a single axis
        if step != Vec2::ZERO {
            step = step.normalize() * self.speed * dt;
        }

        pose.position += step.x * pose.right() + step.y * pose.forward();
        pose.position = pose.position.clamp(-self.bounds, self.bounds);

        let turn = InputState::axis(&input.rotate_cw, &input.rotate_ccw);
        if turn != 0.0 {
            pose.yaw = normalize_angle(pose.yaw + turn * self.rotation_speed * dt);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn controller() -> CameraController {
        CameraController::new(&Tuning::default())
    }

    fn held(keys: &[&str]) -> InputState {
        let mut input = InputState::default();
        for key in keys {
            input.on_key_down(key);
        }
        input
    }

    #[test]
    fn test_single_axis_speed() {
        let mut pose = Pose::default();
        controller().update(0.5, &held(&["d"]), &mut pose);
        assert!(pose.position.abs_diff_eq(Vec2::new(10.0, 0.0), 1e-5));
    }

    #[test]
    fn test_opposing_buttons_cancel() {
        let mut pose = Pose::default();
        controller().update(1.0, &held(&["a", "d", "w", "s", "k", "l"]), &mut pose);
        assert_eq!(pose, Pose::default());
    }

    #[test]
    fn test_diagonal_normalized() {
        let mut pose = Pose::default();
        controller().update(0.5, &held(&["d", "w"]), &mut pose);
        assert!((pose.position.length() - 10.0).abs() < 1e-4);
        assert!((pose.position.x - pose.position.y).abs() < 1e-5);
    }

    #[test]
    fn test_moves_in_local_frame() {
        let mut pose = Pose {
            position: Vec2::ZERO,
            yaw: std::f32::consts::FRAC_PI_2,
        };
        // Facing -x after a quarter turn counter-clockwise
        controller().update(0.5, &held(&["w"]), &mut pose);
        assert!(pose.position.abs_diff_eq(Vec2::new(-10.0, 0.0), 1e-4));
    }

    #[test]
    fn test_rotation_direction() {
        let mut pose = Pose::default();
        controller().update(0.5, &held(&["k"]), &mut pose);
        assert!((pose.yaw - 20f32.to_radians()).abs() < 1e-5);

        let mut pose = Pose::default();
        controller().update(0.5, &held(&["l"]), &mut pose);
        assert!((pose.yaw + 20f32.to_radians()).abs() < 1e-5);
    }

    #[test]
    fn test_clamped_even_without_input() {
        let mut pose = Pose {
            position: Vec2::new(100.0, -100.0),
            yaw: 0.0,
        };
        controller().update(0.016, &InputState::default(), &mut pose);
        assert_eq!(pose.position, Vec2::new(29.5, -29.5));
    }

    proptest! {
        #[test]
        fn prop_camera_stays_in_bounds(
            frames in prop::collection::vec((0.0f32..0.5, 0u8..64), 1..200)
        ) {
            let ctl = controller();
            let mut pose = Pose::default();
            let keys = ["a", "d", "w", "s", "k", "l"];
            for (dt, mask) in frames {
                let mut input = InputState::default();
                for (bit, key) in keys.iter().enumerate() {
                    if mask & (1 << bit) != 0 {
                        input.on_key_down(key);
                    }
                }
                ctl.update(dt, &input, &mut pose);
                prop_assert!(pose.position.x.abs() <= 29.5);
                prop_assert!(pose.position.y.abs() <= 29.5);
            }
        }

        #[test]
        fn prop_diagonal_matches_axis_speed(dt in 0.001f32..0.2, yaw in -3.0f32..3.0) {
            let ctl = controller();
            let start = Pose { position: Vec2::ZERO, yaw };

            let mut axis = start;
            ctl.update(dt, &held(&["w"]), &mut axis);
            let mut diag = start;
            ctl.update(dt, &held(&["w", "a"]), &mut diag);

            prop_assert!((axis.position.length() - diag.position.length()).abs() < 1e-4);
        }
    }
}
