//! Pairwise proximity separation
//!
//! Every ordered pair (i, j) with i != j is checked. When the 3D distance
//! between them is below i's threshold, i is pushed away from j on X and Z
//! by `(i - j) * gain`. The push is one-sided: j gets its own, separately
//! computed push when the pair (j, i) is visited, so the two displacements
//! are generally not equal and opposite.
//!
//! The other body's position is read from a snapshot taken at the start of
//! the pass, while i accumulates its own pushes as it goes. Exactly
//! overlapping bodies have zero displacement and therefore do not move.
//!
//! This is a naive O(n²) pass with no spatial partitioning; object counts are
//! in the tens.

use crate::world::FallWorld;
use piefall_math::Vec3;

/// Push `position` away from `other` on X and Z if it is closer than
/// `threshold`. Returns the new position, or `None` if out of range.
#[inline]
pub fn push_away(position: Vec3, other: Vec3, threshold: f32, gain: f32) -> Option<Vec3> {
    if position.distance(other) >= threshold {
        return None;
    }
    Some(Vec3::new(
        position.x + (position.x - other.x) * gain,
        position.y,
        position.z + (position.z - other.z) * gain,
    ))
}

/// Run one separation pass over the world. Returns the number of pushes.
pub fn separate_all(world: &mut FallWorld) -> usize {
    if world.bodies.len() < 2 {
        return 0;
    }

    // Reuse the scratch buffer so steady-state ticks do not allocate
    let mut snapshot = std::mem::take(&mut world.scratch);
    snapshot.clear();
    snapshot.extend(world.bodies.iter().map(|(key, body)| (key, body.position())));

    let mut nudges = 0;
    for (key, body) in world.bodies.iter_mut() {
        let Some(params) = world.config.kind(body.kind()) else {
            continue;
        };
        let (threshold, gain) = (params.separation_threshold, params.separation_gain);

        for &(other_key, other_position) in &snapshot {
            if other_key == key {
                continue;
            }
            if let Some(pushed) = push_away(body.transform.position, other_position, threshold, gain) {
                body.transform.position = pushed;
                nudges += 1;
            }
        }
    }

    world.scratch = snapshot;
    log::trace!("separation pass applied {} pushes", nudges);
    nudges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::{FallingBody, ObjectKey, ObjectKind, TemplateId};
    use crate::config::{FallConfig, KindConfig};
    use slotmap::SlotMap;

    const EPSILON: f32 = 1e-6;

    fn template() -> TemplateId {
        let mut templates: SlotMap<TemplateId, ()> = SlotMap::with_key();
        templates.insert(())
    }

    fn world_with(threshold: f32, gain: f32) -> FallWorld {
        FallWorld::with_config(FallConfig {
            model: KindConfig {
                separation_threshold: threshold,
                separation_gain: gain,
                ..KindConfig::base_model()
            },
            text: None,
        })
    }

    fn add(world: &mut FallWorld, t: TemplateId, position: Vec3) -> ObjectKey {
        world.add(FallingBody::new(ObjectKind::Model, t, position, Vec3::ZERO, 0.02).unwrap())
    }

    #[test]
    fn test_push_away_out_of_range() {
        assert_eq!(push_away(Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0), 1.0, 0.01), None);
        // Exactly at the threshold is not "below" it
        assert_eq!(push_away(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0), 1.0, 0.01), None);
    }

    #[test]
    fn test_push_away_ignores_y() {
        let pushed = push_away(Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.2, 0.5, -0.2), 1.0, 0.5).unwrap();
        assert!((pushed.x - -0.1).abs() < EPSILON);
        assert_eq!(pushed.y, 0.0);
        assert!((pushed.z - 0.1).abs() < EPSILON);
    }

    #[test]
    fn test_pair_is_pushed_apart_asymmetrically() {
        // Threshold 2, so the pair at distance 1 is at half the threshold
        let gain = 0.01;
        let mut world = world_with(2.0, gain);
        let t = template();
        let a = add(&mut world, t, Vec3::new(0.0, 0.0, 0.0));
        let b = add(&mut world, t, Vec3::new(1.0, 0.0, 0.0));

        assert_eq!(separate_all(&mut world), 2);

        let ax = world.get(a).unwrap().position().x;
        let bx = world.get(b).unwrap().position().x;
        assert!((ax - (0.0 + (0.0 - 1.0) * gain)).abs() < EPSILON, "a.x = {}", ax);
        // B is pushed relative to A's position before the pass
        assert!((bx - (1.0 + (1.0 - 0.0) * gain)).abs() < EPSILON, "b.x = {}", bx);
    }

    #[test]
    fn test_exact_overlap_does_not_move() {
        let mut world = world_with(1.0, 0.01);
        let t = template();
        let a = add(&mut world, t, Vec3::new(4.0, 1.0, 4.0));
        let b = add(&mut world, t, Vec3::new(4.0, 1.0, 4.0));

        // Both pairs count as in range, but the push is zero
        assert_eq!(separate_all(&mut world), 2);
        assert_eq!(world.get(a).unwrap().position(), Vec3::new(4.0, 1.0, 4.0));
        assert_eq!(world.get(b).unwrap().position(), Vec3::new(4.0, 1.0, 4.0));
    }

    #[test]
    fn test_far_apart_untouched() {
        let mut world = world_with(1.0, 0.01);
        let t = template();
        let a = add(&mut world, t, Vec3::new(0.0, 0.0, 0.0));
        let b = add(&mut world, t, Vec3::new(0.0, 5.0, 0.0));

        assert_eq!(separate_all(&mut world), 0);
        assert_eq!(world.get(a).unwrap().position(), Vec3::ZERO);
        assert_eq!(world.get(b).unwrap().position(), Vec3::new(0.0, 5.0, 0.0));
    }

    #[test]
    fn test_distance_uses_all_three_axes() {
        // Close on X/Z but far on Y: no push
        let mut world = world_with(1.0, 0.01);
        let t = template();
        add(&mut world, t, Vec3::new(0.0, 0.0, 0.0));
        add(&mut world, t, Vec3::new(0.1, 3.0, 0.1));
        assert_eq!(separate_all(&mut world), 0);
    }

    #[test]
    fn test_single_body_is_noop() {
        let mut world = world_with(1.0, 0.01);
        add(&mut world, template(), Vec3::ZERO);
        assert_eq!(separate_all(&mut world), 0);
    }

    #[test]
    fn test_threshold_is_per_kind() {
        let mut world = FallWorld::with_config(FallConfig {
            model: KindConfig {
                separation_threshold: 0.5,
                ..KindConfig::base_model()
            },
            text: Some(KindConfig {
                separation_threshold: 3.0,
                ..KindConfig::extended_text()
            }),
        });
        let t = template();
        let model = add(&mut world, t, Vec3::new(0.0, 0.0, 0.0));
        let text = world.add(FallingBody::new(ObjectKind::Text, t, Vec3::new(2.0, 0.0, 0.0), Vec3::ZERO, 0.02).unwrap());

        // Only the text body is within its own threshold
        assert_eq!(separate_all(&mut world), 1);
        assert_eq!(world.get(model).unwrap().position(), Vec3::ZERO);
        assert!(world.get(text).unwrap().position().x > 2.0);
    }
}
