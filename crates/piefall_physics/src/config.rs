//! Per-kind simulation parameters
//!
//! Every numeric constant of the falling loop lives here as a configuration
//! default: counts, speed ranges, separation threshold and gain, recycle
//! bound and spawn ranges.

use piefall_math::{UniformRange, Vec3};
use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::body::ObjectKind;

/// Parameters shared by every object of one kind
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KindConfig {
    /// Number of instances created when the kind's template arrives
    pub count: usize,
    /// Per-axis rotation speed range (radians per tick)
    pub rotation_speed_range: UniformRange,
    /// Fall speed range (units per tick); must be strictly positive
    pub fall_speed_range: UniformRange,
    /// Distance below which an object is pushed away from another
    pub separation_threshold: f32,
    /// Fraction of the per-axis displacement applied as the push
    pub separation_gain: f32,
    /// Objects strictly below this height are respawned; `None` never recycles
    pub recycle_bound_y: Option<f32>,
    /// Horizontal spawn range
    pub spawn_range_x: UniformRange,
    /// Vertical spawn range, above the visible area
    pub spawn_range_y: UniformRange,
    /// Depth spawn range
    pub spawn_range_z: UniformRange,
    /// Uniform scale applied to every instance
    #[serde(default = "default_scale")]
    pub scale: f32,
}

fn default_scale() -> f32 {
    1.0
}

impl Default for KindConfig {
    fn default() -> Self {
        Self::base_model()
    }
}

impl KindConfig {
    /// Ten model instances, short separation radius, recycled below -30
    pub fn base_model() -> Self {
        Self {
            count: 10,
            rotation_speed_range: UniformRange::symmetric(0.01),
            fall_speed_range: UniformRange::new(0.02, 0.05),
            separation_threshold: 1.0,
            separation_gain: 0.01,
            recycle_bound_y: Some(-30.0),
            spawn_range_x: UniformRange::symmetric(20.0),
            spawn_range_y: UniformRange::new(25.0, 35.0),
            spawn_range_z: UniformRange::symmetric(25.0),
            scale: 1.0,
        }
    }

    /// Five model instances sharing the scene with text, recycled below -50
    pub fn extended_model() -> Self {
        Self {
            count: 5,
            separation_threshold: 3.0,
            recycle_bound_y: Some(-50.0),
            ..Self::base_model()
        }
    }

    /// Two "COMING SOON" slabs, recycled below -40
    pub fn extended_text() -> Self {
        Self {
            count: 2,
            rotation_speed_range: UniformRange::symmetric(0.005),
            fall_speed_range: UniformRange::new(0.02, 0.04),
            separation_threshold: 3.0,
            separation_gain: 0.01,
            recycle_bound_y: Some(-40.0),
            spawn_range_x: UniformRange::symmetric(12.0),
            spawn_range_y: UniformRange::new(30.0, 40.0),
            spawn_range_z: UniformRange::symmetric(10.0),
            scale: 1.0,
        }
    }

    /// Check the invariants the tick relies on
    pub fn validate(&self) -> Result<(), KindConfigError> {
        let ranges = [
            ("rotation_speed_range", &self.rotation_speed_range),
            ("fall_speed_range", &self.fall_speed_range),
            ("spawn_range_x", &self.spawn_range_x),
            ("spawn_range_y", &self.spawn_range_y),
            ("spawn_range_z", &self.spawn_range_z),
        ];
        for (name, range) in ranges {
            if !range.is_valid() {
                return Err(KindConfigError::InvalidRange {
                    field: name,
                    min: range.min,
                    max: range.max,
                });
            }
        }

        if self.fall_speed_range.min <= 0.0 {
            return Err(KindConfigError::NonPositiveFallSpeed(self.fall_speed_range.min));
        }
        if !(self.separation_threshold >= 0.0 && self.separation_threshold.is_finite()) {
            return Err(KindConfigError::InvalidSeparation {
                field: "separation_threshold",
                value: self.separation_threshold,
            });
        }
        if !(self.separation_gain >= 0.0 && self.separation_gain.is_finite()) {
            return Err(KindConfigError::InvalidSeparation {
                field: "separation_gain",
                value: self.separation_gain,
            });
        }
        if let Some(bound) = self.recycle_bound_y {
            if !bound.is_finite() {
                return Err(KindConfigError::InvalidRecycleBound(bound));
            }
            // A respawn below the bound would be recycled again next tick
            if self.spawn_range_y.min < bound {
                return Err(KindConfigError::SpawnBelowBound {
                    spawn_min: self.spawn_range_y.min,
                    bound,
                });
            }
        }
        if !(self.scale > 0.0 && self.scale.is_finite()) {
            return Err(KindConfigError::InvalidScale(self.scale));
        }
        Ok(())
    }

    /// Draw a spawn position with independent per-axis samples
    pub fn sample_spawn_position<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3 {
        Vec3::new(
            self.spawn_range_x.sample(rng),
            self.spawn_range_y.sample(rng),
            self.spawn_range_z.sample(rng),
        )
    }
}

/// Configuration for every object kind in the scene
///
/// `text` is `None` in deployments that only drop models.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FallConfig {
    /// Model instances
    pub model: KindConfig,
    /// Text instances (optional)
    #[serde(default)]
    pub text: Option<KindConfig>,
}

impl Default for FallConfig {
    fn default() -> Self {
        Self::base()
    }
}

impl FallConfig {
    /// Models only
    pub fn base() -> Self {
        Self {
            model: KindConfig::base_model(),
            text: None,
        }
    }

    /// Fewer models plus falling text
    pub fn extended() -> Self {
        Self {
            model: KindConfig::extended_model(),
            text: Some(KindConfig::extended_text()),
        }
    }

    /// Configuration for a kind, if that kind is enabled
    pub fn kind(&self, kind: ObjectKind) -> Option<&KindConfig> {
        match kind {
            ObjectKind::Model => Some(&self.model),
            ObjectKind::Text => self.text.as_ref(),
        }
    }

    /// Validate every enabled kind
    pub fn validate(&self) -> Result<(), KindConfigError> {
        for kind in ObjectKind::ALL {
            if let Some(config) = self.kind(kind) {
                config.validate()?;
            }
        }
        Ok(())
    }
}

/// Error type for invalid kind configuration
#[derive(Debug, Clone, PartialEq)]
pub enum KindConfigError {
    /// A range has `min > max`, a non-finite bound or a non-finite width
    InvalidRange { field: &'static str, min: f32, max: f32 },
    /// Fall speeds must be strictly positive and finite
    NonPositiveFallSpeed(f32),
    /// Separation threshold or gain is negative or non-finite
    InvalidSeparation { field: &'static str, value: f32 },
    /// Recycle bound is non-finite
    InvalidRecycleBound(f32),
    /// Spawn height range starts below the recycle bound
    SpawnBelowBound { spawn_min: f32, bound: f32 },
    /// Scale is not a positive finite number
    InvalidScale(f32),
}

impl std::fmt::Display for KindConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KindConfigError::InvalidRange { field, min, max } => {
                write!(f, "Invalid range for {}: [{}, {})", field, min, max)
            }
            KindConfigError::NonPositiveFallSpeed(speed) => {
                write!(f, "Fall speed must be positive and finite, got {}", speed)
            }
            KindConfigError::InvalidSeparation { field, value } => {
                write!(f, "Invalid {}: {}", field, value)
            }
            KindConfigError::InvalidRecycleBound(bound) => {
                write!(f, "Invalid recycle bound: {}", bound)
            }
            KindConfigError::SpawnBelowBound { spawn_min, bound } => write!(
                f,
                "Spawn height {} is below the recycle bound {}",
                spawn_min, bound
            ),
            KindConfigError::InvalidScale(scale) => write!(f, "Invalid scale: {}", scale),
        }
    }
}

impl std::error::Error for KindConfigError {}
