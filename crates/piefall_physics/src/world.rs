//! Object registry and per-tick stepping

use crate::body::{FallingBody, ObjectKey, ObjectKind};
use crate::config::FallConfig;
use crate::{integrate, recycle, separation};
use piefall_math::Vec3;
use rand::Rng;
use slotmap::SlotMap;

/// Counters produced by one [`FallWorld::step`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepStats {
    /// Number of objects integrated
    pub moved: usize,
    /// Number of (i, j) pushes applied by the separator
    pub nudges: usize,
    /// Number of objects respawned above the visible area
    pub recycled: usize,
}

/// The registry of falling objects
///
/// Objects are stored in insertion order and never removed, so keys and
/// iteration order stay stable across ticks.
pub struct FallWorld {
    /// All objects (using generational keys)
    pub(crate) bodies: SlotMap<ObjectKey, FallingBody>,
    /// Per-kind parameters
    pub config: FallConfig,
    /// Position snapshot reused by the separator every tick
    pub(crate) scratch: Vec<(ObjectKey, Vec3)>,
}

impl FallWorld {
    /// Create an empty world with the models-only configuration
    pub fn new() -> Self {
        Self::with_config(FallConfig::default())
    }

    /// Create an empty world with a custom configuration
    pub fn with_config(config: FallConfig) -> Self {
        Self {
            bodies: SlotMap::with_key(),
            config,
            scratch: Vec::new(),
        }
    }

    /// Add an object and return its key
    pub fn add(&mut self, body: FallingBody) -> ObjectKey {
        self.bodies.insert(body)
    }

    /// Get an immutable reference to an object by key
    pub fn get(&self, key: ObjectKey) -> Option<&FallingBody> {
        self.bodies.get(key)
    }

    /// Get a mutable reference to an object by key
    pub fn get_mut(&mut self, key: ObjectKey) -> Option<&mut FallingBody> {
        self.bodies.get_mut(key)
    }

    /// Get the number of objects
    #[inline]
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Check if the world has no objects yet
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Number of objects of one kind
    pub fn count_of(&self, kind: ObjectKind) -> usize {
        self.bodies.values().filter(|b| b.kind() == kind).count()
    }

    /// Iterate over all object keys
    pub fn keys(&self) -> impl Iterator<Item = ObjectKey> + '_ {
        self.bodies.keys()
    }

    /// Iterate over keys and objects
    pub fn iter(&self) -> impl Iterator<Item = (ObjectKey, &FallingBody)> {
        self.bodies.iter()
    }

    /// Iterate over keys and objects mutably
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (ObjectKey, &mut FallingBody)> {
        self.bodies.iter_mut()
    }

    /// Advance every object by one tick
    ///
    /// This performs, in order:
    /// 1. Fall and spin integration
    /// 2. Pairwise separation
    /// 3. Recycling of objects below their kind's bound
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> StepStats {
        if self.bodies.is_empty() {
            return StepStats::default();
        }

        let moved = integrate::integrate_all(self);
        let nudges = separation::separate_all(self);
        let recycled = recycle::recycle_all(self, rng);

        StepStats { moved, nudges, recycled }
    }
}

impl Default for FallWorld {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::TemplateId;
    use rand::{rngs::SmallRng, SeedableRng};

    fn template() -> TemplateId {
        let mut templates: SlotMap<TemplateId, ()> = SlotMap::with_key();
        templates.insert(())
    }

    fn body_at(t: TemplateId, position: Vec3, fall_speed: f32) -> FallingBody {
        FallingBody::new(ObjectKind::Model, t, position, Vec3::new(0.01, 0.0, -0.01), fall_speed).unwrap()
    }

    #[test]
    fn test_world_add() {
        let mut world = FallWorld::new();
        assert!(world.is_empty());

        let key = world.add(body_at(template(), Vec3::ZERO, 0.02));
        assert!(world.get(key).is_some());
        assert_eq!(world.len(), 1);
        assert_eq!(world.count_of(ObjectKind::Model), 1);
        assert_eq!(world.count_of(ObjectKind::Text), 0);
    }

    #[test]
    fn test_iteration_order_is_insertion_order() {
        let mut world = FallWorld::new();
        let t = template();
        let keys: Vec<ObjectKey> = (0..5)
            .map(|i| world.add(body_at(t, Vec3::new(i as f32 * 10.0, 0.0, 0.0), 0.02)))
            .collect();

        let iterated: Vec<ObjectKey> = world.keys().collect();
        assert_eq!(iterated, keys);

        // Stepping does not reorder
        let mut rng = SmallRng::seed_from_u64(1);
        world.step(&mut rng);
        let iterated: Vec<ObjectKey> = world.keys().collect();
        assert_eq!(iterated, keys);
    }

    #[test]
    fn test_empty_step_is_noop() {
        let mut world = FallWorld::new();
        let mut rng = SmallRng::seed_from_u64(1);
        assert_eq!(world.step(&mut rng), StepStats::default());
        assert!(world.is_empty());
    }

    #[test]
    fn test_step_stats() {
        let mut world = FallWorld::new();
        let t = template();
        // Two overlapping-ish bodies and one about to cross the bound
        world.add(body_at(t, Vec3::new(0.0, 0.0, 0.0), 0.02));
        world.add(body_at(t, Vec3::new(0.5, 0.0, 0.0), 0.02));
        world.add(body_at(t, Vec3::new(10.0, -29.99, 0.0), 0.05));

        let mut rng = SmallRng::seed_from_u64(3);
        let stats = world.step(&mut rng);
        assert_eq!(stats.moved, 3);
        assert_eq!(stats.nudges, 2);
        assert_eq!(stats.recycled, 1);
    }

    #[test]
    fn test_unconfigured_kind_still_moves() {
        // Text bodies in a models-only world fall but never separate or recycle
        let mut world = FallWorld::with_config(crate::FallConfig::base());
        let t = template();
        let body = FallingBody::new(ObjectKind::Text, t, Vec3::new(0.0, -100.0, 0.0), Vec3::ZERO, 1.0).unwrap();
        let key = world.add(body);

        let mut rng = SmallRng::seed_from_u64(1);
        world.step(&mut rng);
        assert_eq!(world.get(key).unwrap().position().y, -101.0);
        assert!(world.config.kind(ObjectKind::Text).is_none());
    }
}
