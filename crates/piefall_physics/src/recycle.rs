//! Respawning objects that fell out of view
//!
//! An object strictly below its kind's bound gets a fresh position drawn from
//! the kind's spawn ranges. Rotation and both speeds are kept, so a recycled
//! object keeps its character and only reappears somewhere new.

use crate::world::FallWorld;
use rand::Rng;

/// Respawn every object below its kind's recycle bound. Returns the number
/// of objects respawned.
pub fn recycle_all<R: Rng + ?Sized>(world: &mut FallWorld, rng: &mut R) -> usize {
    let mut recycled = 0;

    for (key, body) in world.bodies.iter_mut() {
        let Some(params) = world.config.kind(body.kind()) else {
            continue;
        };
        let Some(bound) = params.recycle_bound_y else {
            continue;
        };
        if body.transform.position.y >= bound {
            continue;
        }

        let fell_to = body.transform.position.y;
        body.transform.position = params.sample_spawn_position(rng);
        recycled += 1;

        log::trace!(
            "recycled {} {:?} at y={:.2} -> {:?}",
            body.kind(),
            key,
            fell_to,
            body.transform.position
        );
    }

    if recycled > 0 {
        log::debug!("recycled {} objects", recycled);
    }
    recycled
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::{FallingBody, ObjectKind, TemplateId};
    use crate::config::{FallConfig, KindConfig};
    use piefall_math::{UniformRange, Vec3};
    use rand::{rngs::SmallRng, SeedableRng};
    use slotmap::SlotMap;

    fn template() -> TemplateId {
        let mut templates: SlotMap<TemplateId, ()> = SlotMap::with_key();
        templates.insert(())
    }

    fn model_at(position: Vec3) -> FallingBody {
        FallingBody::new(ObjectKind::Model, template(), position, Vec3::ZERO, 0.02).unwrap()
    }

    #[test]
    fn test_just_below_bound_is_recycled() {
        let mut world = FallWorld::with_config(FallConfig::base());
        let config = world.config.model.clone();
        let bound = config.recycle_bound_y.unwrap();
        let body = FallingBody::new(
            ObjectKind::Model,
            template(),
            Vec3::new(3.0, bound - 0.001, -7.0),
            Vec3::new(0.01, 0.0, 0.0),
            0.04,
        )
        .unwrap();
        let key = world.add(body);

        let mut rng = SmallRng::seed_from_u64(9);
        assert_eq!(recycle_all(&mut world, &mut rng), 1);

        let body = world.get(key).unwrap();
        let p = body.position();
        assert!(config.spawn_range_x.contains(p.x));
        assert!(config.spawn_range_y.contains(p.y));
        assert!(config.spawn_range_z.contains(p.z));
        assert_eq!(body.rotation_speed(), Vec3::new(0.01, 0.0, 0.0));
    }

    #[test]
    fn test_at_bound_is_kept() {
        let mut world = FallWorld::with_config(FallConfig::base());
        let key = world.add(model_at(Vec3::new(0.0, -30.0, 0.0)));

        let mut rng = SmallRng::seed_from_u64(9);
        assert_eq!(recycle_all(&mut world, &mut rng), 0);
        assert_eq!(world.get(key).unwrap().position().y, -30.0);
    }

    #[test]
    fn test_recycling_keeps_rotation_and_speeds() {
        let mut world = FallWorld::with_config(FallConfig::base());
        let rotation = Vec3::new(0.3, -1.2, 2.0);
        let rotation_speed = Vec3::new(0.004, -0.008, 0.001);
        let key = world.add(
            FallingBody::new(
                ObjectKind::Model,
                template(),
                Vec3::new(0.0, -45.0, 0.0),
                rotation_speed,
                0.033,
            )
            .unwrap()
            .with_rotation(rotation),
        );

        let mut rng = SmallRng::seed_from_u64(5);
        recycle_all(&mut world, &mut rng);

        let body = world.get(key).unwrap();
        assert_eq!(body.rotation(), rotation);
        assert_eq!(body.rotation_speed(), rotation_speed);
        assert_eq!(body.fall_speed(), 0.033);
    }

    #[test]
    fn test_fixed_spawn_height() {
        let mut world = FallWorld::with_config(FallConfig {
            model: KindConfig {
                spawn_range_y: UniformRange::fixed(25.0),
                ..KindConfig::base_model()
            },
            text: None,
        });
        let key = world.add(model_at(Vec3::new(0.0, -31.0, 0.0)));

        let mut rng = SmallRng::seed_from_u64(0);
        recycle_all(&mut world, &mut rng);
        assert_eq!(world.get(key).unwrap().position().y, 25.0);
    }

    #[test]
    fn test_no_bound_never_recycles() {
        let mut world = FallWorld::with_config(FallConfig {
            model: KindConfig {
                recycle_bound_y: None,
                ..KindConfig::base_model()
            },
            text: None,
        });
        let key = world.add(model_at(Vec3::new(0.0, -1.0e6, 0.0)));

        let mut rng = SmallRng::seed_from_u64(0);
        assert_eq!(recycle_all(&mut world, &mut rng), 0);
        assert_eq!(world.get(key).unwrap().position().y, -1.0e6);
    }

    #[test]
    fn test_bounds_are_per_kind() {
        let mut world = FallWorld::with_config(FallConfig::extended());
        let t = template();
        // -45 is below the text bound (-40) but above the model bound (-50)
        let model = world.add(FallingBody::new(ObjectKind::Model, t, Vec3::new(0.0, -45.0, 0.0), Vec3::ZERO, 0.02).unwrap());
        let text = world.add(FallingBody::new(ObjectKind::Text, t, Vec3::new(0.0, -45.0, 0.0), Vec3::ZERO, 0.02).unwrap());

        let mut rng = SmallRng::seed_from_u64(2);
        assert_eq!(recycle_all(&mut world, &mut rng), 1);
        assert_eq!(world.get(model).unwrap().position().y, -45.0);
        assert!(world.get(text).unwrap().position().y >= 30.0);
    }
}
