//! Fall and spin integration

use crate::body::FallingBody;
use crate::world::FallWorld;

/// Advance one body by one tick: drop by its fall speed, spin by its
/// rotation speed on each axis.
#[inline]
pub fn integrate(body: &mut FallingBody) {
    body.transform.position.y -= body.fall_speed();
    body.transform.rotation += body.rotation_speed();
}

/// Integrate every body in the world. Returns the number of bodies moved.
pub fn integrate_all(world: &mut FallWorld) -> usize {
    for body in world.bodies.values_mut() {
        integrate(body);
    }
    world.bodies.len()
}
