//! Minimal scene graph
//!
//! Loading and drawing scenes happens elsewhere; the mode only needs named
//! transforms, the camera, and the light. Handles are plain indices that are
//! validated once when the mode is built.

use glam::{Vec2, Vec3};
use thiserror::Error;

/// Scene lookups that stop the mode from starting
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// No transform carries the required name.
    #[error("{0} not found.")]
    MissingTransform(String),

    /// The scene must hold exactly one camera.
    #[error("Expecting scene to have exactly one camera, but it has {0}")]
    CameraCount(usize),

    /// The scene must hold exactly one light.
    #[error("Expecting scene to have exactly one light, but it has {0}.")]
    LightCount(usize),
}

/// Index of a transform inside its [`Scene`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransformId(usize);

/// Planar position plus yaw (radians, counter-clockwise)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Pose {
    pub position: Vec2,
    pub yaw: f32,
}

impl Pose {
    /// Local +x in world space
    pub fn right(&self) -> Vec2 {
        Vec2::from_angle(self.yaw)
    }

    /// Local forward in world space (+y at yaw 0)
    pub fn forward(&self) -> Vec2 {
        self.right().perp()
    }
}

#[derive(Debug, Clone)]
pub struct Transform {
    pub name: String,
    pub pose: Pose,
    /// Height above the floor
    pub height: f32,
    pub scale: Vec3,
}

impl Transform {
    pub fn new(name: impl Into<String>, position: Vec2, height: f32) -> Self {
        Self {
            name: name.into(),
            pose: Pose {
                position,
                yaw: 0.0,
            },
            height,
            scale: Vec3::ONE,
        }
    }

    pub fn world_position(&self) -> Vec3 {
        self.pose.position.extend(self.height)
    }
}

#[derive(Debug, Clone)]
pub struct Camera {
    pub transform: TransformId,
    /// Width / height of the output surface
    pub aspect: f32,
}

#[derive(Debug, Clone)]
pub struct Light {
    pub transform: TransformId,
}

#[derive(Debug, Clone, Default)]
pub struct Scene {
    transforms: Vec<Transform>,
    pub cameras: Vec<Camera>,
    pub lights: Vec<Light>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_transform(&mut self, transform: Transform) -> TransformId {
        self.transforms.push(transform);
        TransformId(self.transforms.len() - 1)
    }

    pub fn add_camera(&mut self, transform: TransformId) {
        self.cameras.push(Camera {
            transform,
            aspect: 1.0,
        });
    }

    pub fn add_light(&mut self, transform: TransformId) {
        self.lights.push(Light { transform });
    }

    pub fn find(&self, name: &str) -> Result<TransformId, SceneError> {
        self.transforms
            .iter()
            .position(|t| t.name == name)
            .map(TransformId)
            .ok_or_else(|| SceneError::MissingTransform(name.to_string()))
    }

    pub fn transform(&self, id: TransformId) -> &Transform {
        &self.transforms[id.0]
    }

    pub fn transform_mut(&mut self, id: TransformId) -> &mut Transform {
        &mut self.transforms[id.0]
    }

    /// Index of the only camera
    pub fn single_camera(&self) -> Result<usize, SceneError> {
        match self.cameras.len() {
            1 => Ok(0),
            n => Err(SceneError::CameraCount(n)),
        }
    }

    /// Index of the only light
    pub fn single_light(&self) -> Result<usize, SceneError> {
        match self.lights.len() {
            1 => Ok(0),
            n => Err(SceneError::LightCount(n)),
        }
    }

    /// The stage the mode is designed around: a camera above the origin,
    /// one overhead light, and the explosion parked at `home`.
    pub fn stage(home: Vec2) -> Self {
        let mut scene = Scene::new();
        let camera = scene.add_transform(Transform::new("Camera", Vec2::ZERO, 1.5));
        scene.add_camera(camera);
        let light = scene.add_transform(Transform::new("Light", Vec2::ZERO, 30.0));
        scene.add_light(light);
        scene.add_transform(Transform::new(crate::consts::EXPLOSION_NAME, home, 0.0));
        scene
    }
}
