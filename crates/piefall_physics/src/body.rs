//! Falling object records

use piefall_math::Vec3;
use rand::Rng;
use serde::{Serialize, Deserialize};
use slotmap::new_key_type;

use crate::config::{KindConfig, KindConfigError};

new_key_type! {
    /// Key to a falling object in the [`FallWorld`](crate::FallWorld)
    ///
    /// Objects are never removed, so a key stays valid for the lifetime of
    /// the world and doubles as the identity used to skip self-comparison.
    pub struct ObjectKey;

    /// Handle to a loaded asset template (mesh or glyph geometry)
    ///
    /// Every object instantiated from the same template shares its handle.
    pub struct TemplateId;
}

/// What kind of falling object this is
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    /// Instance of the loaded 3D model
    Model,
    /// Extruded text slab
    Text,
}

impl ObjectKind {
    /// All kinds, in spawn order
    pub const ALL: [ObjectKind; 2] = [ObjectKind::Model, ObjectKind::Text];

    /// Lowercase name used in config and logs
    pub fn name(&self) -> &'static str {
        match self {
            ObjectKind::Model => "model",
            ObjectKind::Text => "text",
        }
    }
}

impl std::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Position, Euler rotation and uniform scale of an object
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Position in world space
    pub position: Vec3,
    /// XYZ Euler angles in radians
    pub rotation: Vec3,
    /// Uniform scale factor
    pub scale: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self::from_position(Vec3::ZERO)
    }
}

impl Transform {
    /// Create a transform with just a position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            rotation: Vec3::ZERO,
            scale: 1.0,
        }
    }

    /// Model matrix for rendering
    pub fn matrix(&self) -> piefall_math::Mat4 {
        piefall_math::mat4::model_matrix(self.position, self.rotation, self.scale)
    }
}

/// A decorative object that falls, spins and respawns forever
///
/// `rotation_speed` and `fall_speed` are fixed at creation; only the
/// transform changes afterwards.
#[derive(Clone, Debug)]
pub struct FallingBody {
    /// Current transform (mutated by integration, separation and recycling)
    pub transform: Transform,
    rotation_speed: Vec3,
    fall_speed: f32,
    kind: ObjectKind,
    template: TemplateId,
}

impl FallingBody {
    /// Create a body with explicit motion parameters
    ///
    /// `fall_speed` must be positive and finite so the body always reaches
    /// its recycle bound.
    pub fn new(
        kind: ObjectKind,
        template: TemplateId,
        position: Vec3,
        rotation_speed: Vec3,
        fall_speed: f32,
    ) -> Result<Self, KindConfigError> {
        if !(fall_speed > 0.0 && fall_speed.is_finite()) {
            return Err(KindConfigError::NonPositiveFallSpeed(fall_speed));
        }
        Ok(Self {
            transform: Transform::from_position(position),
            rotation_speed,
            fall_speed,
            kind,
            template,
        })
    }

    /// Create a body with speeds and position drawn from a kind configuration
    ///
    /// Fails only if the configuration was not validated and produced a
    /// non-positive fall speed.
    pub fn spawn<R: Rng + ?Sized>(
        kind: ObjectKind,
        template: TemplateId,
        config: &KindConfig,
        rng: &mut R,
    ) -> Result<Self, KindConfigError> {
        let position = config.sample_spawn_position(rng);
        let rotation_speed = Vec3::new(
            config.rotation_speed_range.sample(rng),
            config.rotation_speed_range.sample(rng),
            config.rotation_speed_range.sample(rng),
        );
        let fall_speed = config.fall_speed_range.sample(rng);
        Ok(Self::new(kind, template, position, rotation_speed, fall_speed)?.with_scale(config.scale))
    }

    /// Set the uniform scale of this body
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.transform.scale = scale;
        self
    }

    /// Set the initial rotation of this body
    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.transform.rotation = rotation;
        self
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    #[inline]
    pub fn rotation(&self) -> Vec3 {
        self.transform.rotation
    }

    /// Per-tick Euler angle increments
    #[inline]
    pub fn rotation_speed(&self) -> Vec3 {
        self.rotation_speed
    }

    /// Per-tick downward distance
    #[inline]
    pub fn fall_speed(&self) -> f32 {
        self.fall_speed
    }

    #[inline]
    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    #[inline]
    pub fn template(&self) -> TemplateId {
        self.template
    }
}
