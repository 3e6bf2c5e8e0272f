//! Integration tests for the falling loop
//!
//! These tests drive a populated simulation through the frame driver and
//! check the behaviour a viewer would see:
//! 1. Objects fall monotonically when nothing recycles them
//! 2. Objects that fall out of view come back at the spawn height
//! 3. Per-object speeds never change, across recycles too
//! 4. Empty registries still render every frame
//! 5. Renderer errors and stop requests end the loop

use std::collections::HashMap;
use std::fmt;

use piefall_core::{
    FallConfig, FallWorld, FrameDriver, FrameLimit, KindConfig, NullRenderer, ObjectKey,
    ObjectKind, Renderer, Simulation, UniformRange, Vec3,
};

// ==================== Helpers ====================

fn driver_with(model: KindConfig, seed: u64) -> FrameDriver {
    let mut sim = Simulation::with_seed(FallConfig { model, text: None }, seed);
    let template = sim.register_template(ObjectKind::Model, "pie");
    sim.populate(template).expect("model config should be valid");
    FrameDriver::new(sim)
}

fn snapshot(world: &FallWorld) -> Vec<(ObjectKey, Vec3, Vec3, Vec3, f32)> {
    world
        .iter()
        .map(|(key, b)| (key, b.position(), b.rotation(), b.rotation_speed(), b.fall_speed()))
        .collect()
}

// ==================== Motion Tests ====================

/// Without a recycle bound every object falls on every tick
#[test]
fn test_fall_is_monotone_without_bound() {
    let config = KindConfig {
        count: 10,
        fall_speed_range: UniformRange::new(0.02, 0.05),
        recycle_bound_y: None,
        ..KindConfig::base_model()
    };
    let mut driver = driver_with(config, 11);
    assert_eq!(driver.simulation().world().len(), 10);

    let ticks = (55.0_f32 / 0.02).ceil() as u64;
    let mut previous: HashMap<ObjectKey, f32> = driver
        .simulation()
        .world()
        .iter()
        .map(|(key, b)| (key, b.position().y))
        .collect();

    for _ in 0..ticks {
        driver.tick(&mut NullRenderer).unwrap();
        for (key, body) in driver.simulation().world().iter() {
            let y = body.position().y;
            assert!(y < previous[&key], "{:?} did not fall: {} -> {}", key, previous[&key], y);
            previous.insert(key, y);
        }
    }
}

/// With bound -30 and spawn height fixed at 25, every object comes back
/// to the spawn height within (25 - (-30)) / 0.02 ticks
#[test]
fn test_every_object_returns_to_spawn_height() {
    let config = KindConfig {
        count: 10,
        fall_speed_range: UniformRange::new(0.02, 0.05),
        recycle_bound_y: Some(-30.0),
        spawn_range_y: UniformRange::fixed(25.0),
        ..KindConfig::base_model()
    };
    let mut driver = driver_with(config, 5);

    let mut last_y: HashMap<ObjectKey, f32> = HashMap::new();
    let mut returned: HashMap<ObjectKey, bool> = HashMap::new();
    let mut renderer = |world: &FallWorld| {
        for (key, body) in world.iter() {
            let y = body.position().y;
            if let Some(&prev) = last_y.get(&key) {
                if y > prev {
                    assert!(y >= 25.0, "respawned at {}", y);
                    returned.insert(key, true);
                }
            }
            last_y.insert(key, y);
        }
    };

    let ticks = ((25.0_f32 - -30.0) / 0.02).ceil() as u64;
    let frames = driver.run(&mut FrameLimit::new(ticks), &mut renderer).unwrap();
    assert_eq!(frames, ticks);

    let keys: Vec<ObjectKey> = driver.simulation().world().keys().collect();
    assert_eq!(keys.len(), 10);
    for key in keys {
        assert_eq!(returned.get(&key), Some(&true), "{:?} never came back", key);
    }
}

/// Fall and rotation speeds are fixed at creation
#[test]
fn test_speeds_survive_recycling() {
    let mut driver = driver_with(KindConfig::base_model(), 21);
    let before = snapshot(driver.simulation().world());

    // Long enough for every object to be recycled at least once
    driver.run(&mut FrameLimit::new(4000), &mut NullRenderer).unwrap();

    let after = snapshot(driver.simulation().world());
    assert_eq!(before.len(), after.len());
    for (b, a) in before.iter().zip(after.iter()) {
        assert_eq!(b.0, a.0);
        assert_eq!(b.3, a.3, "rotation speed changed");
        assert_eq!(b.4, a.4, "fall speed changed");
    }
}

/// Zero ticks leave the registry exactly as populated
#[test]
fn test_zero_ticks_change_nothing() {
    let mut sim = Simulation::with_seed(FallConfig::base(), 3);
    let template = sim.register_template(ObjectKind::Model, "pie");
    sim.populate(template).unwrap();
    let before = snapshot(sim.world());

    let mut driver = FrameDriver::new(sim);
    let frames = driver.run(&mut FrameLimit::new(0), &mut NullRenderer).unwrap();

    assert_eq!(frames, 0);
    assert_eq!(snapshot(driver.simulation().world()), before);
}

// ==================== Frame Tests ====================

/// An empty registry is a no-op tick that still renders once
#[test]
fn test_empty_registry_renders_each_frame() {
    let mut driver = FrameDriver::new(Simulation::with_seed(FallConfig::base(), 1));
    let mut renders = 0;

    let report = driver
        .tick(&mut |world: &FallWorld| {
            assert!(world.is_empty());
            renders += 1;
        })
        .unwrap();

    assert_eq!(renders, 1);
    assert_eq!(report.stats.moved, 0);
    assert!(driver.simulation().world().is_empty());
}

/// Objects populated between ticks join the loop on the next frame
#[test]
fn test_late_population() {
    let mut driver = FrameDriver::new(Simulation::with_seed(FallConfig::extended(), 9));
    driver.run(&mut FrameLimit::new(5), &mut NullRenderer).unwrap();

    let sim = driver.simulation_mut();
    let text = sim.register_template(ObjectKind::Text, "COMING SOON");
    sim.populate(text).unwrap();

    let report = driver.tick(&mut NullRenderer).unwrap();
    assert_eq!(report.frame, 5);
    assert_eq!(report.stats.moved, 2);
}

#[derive(Debug)]
struct SurfaceGone;

impl fmt::Display for SurfaceGone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "surface gone")
    }
}

impl std::error::Error for SurfaceGone {}

struct FailingRenderer {
    fail_on: u32,
    frames: u32,
}

impl Renderer for FailingRenderer {
    type Error = SurfaceGone;

    fn render(&mut self, _world: &FallWorld) -> Result<(), Self::Error> {
        self.frames += 1;
        if self.frames == self.fail_on {
            return Err(SurfaceGone);
        }
        Ok(())
    }
}

/// A renderer error ends the run and is handed back to the host
#[test]
fn test_renderer_error_ends_run() {
    let mut driver = driver_with(KindConfig::base_model(), 2);
    let mut renderer = FailingRenderer { fail_on: 4, frames: 0 };

    let result = driver.run(&mut FrameLimit::new(10), &mut renderer);
    assert!(result.is_err());
    assert_eq!(renderer.frames, 4);
    // The failed frame is not counted
    assert_eq!(driver.frame_index(), 3);
}

/// A stop requested from another thread ends the run
#[test]
fn test_stop_from_another_thread() {
    let mut driver = driver_with(KindConfig::base_model(), 4);
    let stop = driver.stop_handle();

    let stopper = std::thread::spawn(move || stop.stop());
    stopper.join().unwrap();

    let frames = driver.run(&mut FrameLimit::new(1_000), &mut NullRenderer).unwrap();
    assert_eq!(frames, 0);
    assert!(driver.stop_handle().is_stopped());
}
