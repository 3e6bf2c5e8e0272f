//! Simulation system
//!
//! Owns the frame driver and feeds it templates as the loader finishes them:
//! - Template registration and population
//! - One driver tick per frame
//! - Periodic frame statistics

use std::time::Instant;
use piefall_core::{
    FrameDriver, FramePacer, ObjectKind, Renderer, Simulation, StopHandle, TemplateId, TickReport,
};
use crate::config::AppConfig;
use crate::loader::{AssetLoader, LoadedTemplate};

/// Manages the falling-object simulation
pub struct SimulationSystem {
    driver: FrameDriver,
    loader: AssetLoader,
    stats: FrameStats,
}

/// Frame rate measured over a fixed number of frames
struct FrameStats {
    interval: u64,
    started: Instant,
    frames: u64,
    fps: f32,
}

impl FrameStats {
    fn new(interval: u64) -> Self {
        Self {
            interval,
            started: Instant::now(),
            frames: 0,
            fps: 0.0,
        }
    }

    fn record(&mut self, objects: usize) {
        self.frames += 1;
        if self.interval == 0 || self.frames < self.interval {
            return;
        }

        let elapsed = self.started.elapsed().as_secs_f32();
        if elapsed > 0.0 {
            self.fps = self.frames as f32 / elapsed;
        }
        log::debug!("{} objects, {:.1} fps", objects, self.fps);
        self.started = Instant::now();
        self.frames = 0;
    }
}

/// Register one template with the simulation and create its objects
///
/// A kind with no (or invalid) configuration is registered but gets no
/// objects.
fn add_template_to(simulation: &mut Simulation, kind: ObjectKind, name: &str) -> TemplateId {
    let id = simulation.register_template(kind, name);
    match simulation.populate(id) {
        Ok(keys) => log::info!("Populated {} '{}' objects", keys.len(), name),
        Err(e) => log::warn!("Template '{}' not populated: {}", name, e),
    }
    id
}

impl SimulationSystem {
    /// Create the simulation and start loading templates
    pub fn new(config: &AppConfig) -> Self {
        let loader = AssetLoader::from_config(&config.assets, config.simulation.variant);
        Self::with_loader(config, loader)
    }

    /// Create the simulation around an existing loader
    pub fn with_loader(config: &AppConfig, loader: AssetLoader) -> Self {
        let fall_config = config.simulation.fall_config();
        let simulation = Simulation::from_seed(fall_config, config.simulation.seed);
        log::info!(
            "Simulation ready ({:?} variant, seed {})",
            config.simulation.variant,
            simulation.seed()
        );

        Self {
            driver: FrameDriver::new(simulation),
            loader,
            stats: FrameStats::new(config.debug.stats_interval),
        }
    }

    /// Register every template the loader has finished and populate it
    ///
    /// Returns the new templates so their meshes can be uploaded.
    pub fn receive_templates(&mut self) -> Vec<(TemplateId, LoadedTemplate)> {
        let simulation = self.driver.simulation_mut();
        self.loader
            .poll_all()
            .into_iter()
            .map(|loaded| (add_template_to(simulation, loaded.kind, &loaded.name), loaded))
            .collect()
    }

    /// Register one template and create its objects
    pub fn add_template(&mut self, kind: ObjectKind, name: &str) -> TemplateId {
        add_template_to(self.driver.simulation_mut(), kind, name)
    }

    /// Run one frame through the driver
    pub fn tick<R: Renderer + ?Sized>(&mut self, renderer: &mut R) -> Result<TickReport, R::Error> {
        let report = self.driver.tick(renderer)?;
        self.stats.record(self.driver.simulation().world().len());
        Ok(report)
    }

    /// Drive frames until the pacer runs out or a stop is requested
    ///
    /// Templates finished by the loader are registered and populated before
    /// the frame that first draws them. Meshes are not uploaded anywhere, so
    /// this suits renderers that do not draw meshes.
    pub fn run<P, R>(&mut self, pacer: &mut P, renderer: &mut R) -> Result<u64, R::Error>
    where
        P: FramePacer + ?Sized,
        R: Renderer + ?Sized,
    {
        let Self { driver, loader, stats } = self;
        driver.run_with(pacer, renderer, |simulation| {
            for loaded in loader.poll_all() {
                add_template_to(simulation, loaded.kind, &loaded.name);
            }
            stats.record(simulation.world().len());
        })
    }

    /// Frame rate measured over the last stats interval
    pub fn fps(&self) -> f32 {
        self.stats.fps
    }

    /// Number of live objects
    pub fn object_count(&self) -> usize {
        self.driver.simulation().world().len()
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.driver.stop_handle()
    }

    pub fn driver(&self) -> &FrameDriver {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut FrameDriver {
        &mut self.driver
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Variant;
    use piefall_core::{IntervalPacer, NullRenderer};
    use std::time::Duration;

    fn config(variant: Variant) -> AppConfig {
        let mut config = AppConfig::default();
        config.simulation.variant = variant;
        config.simulation.seed = Some(17);
        config
    }

    #[test]
    fn test_empty_until_templates_arrive() {
        let mut system = SimulationSystem::with_loader(&config(Variant::Base), AssetLoader::default());
        let report = system.tick(&mut NullRenderer).unwrap();
        assert_eq!(report.frame, 0);
        assert_eq!(system.object_count(), 0);
    }

    #[test]
    fn test_add_template_populates_kind() {
        let mut system = SimulationSystem::with_loader(&config(Variant::Extended), AssetLoader::default());
        system.add_template(ObjectKind::Model, "pie");
        system.add_template(ObjectKind::Text, "COMING SOON");
        assert_eq!(system.object_count(), 7);
    }

    #[test]
    fn test_unconfigured_kind_gets_no_objects() {
        let mut system = SimulationSystem::with_loader(&config(Variant::Base), AssetLoader::default());
        let id = system.add_template(ObjectKind::Text, "COMING SOON");
        assert_eq!(system.object_count(), 0);
        assert!(system.driver().simulation().template(id).is_some());
    }

    #[test]
    fn test_receive_templates_from_loader() {
        let mut system = SimulationSystem::new(&config(Variant::Extended));

        let mut received = Vec::new();
        let deadline = Instant::now() + Duration::from_secs(5);
        while received.len() < 2 && Instant::now() < deadline {
            received.extend(system.receive_templates());
            std::thread::sleep(Duration::from_millis(5));
        }

        assert_eq!(received.len(), 2);
        assert!(received.iter().all(|(_, loaded)| !loaded.mesh.is_empty()));
        assert_eq!(system.object_count(), 7);
    }

    #[test]
    fn test_stats_reset_each_interval() {
        let mut cfg = config(Variant::Base);
        cfg.debug.stats_interval = 3;
        let mut system = SimulationSystem::with_loader(&cfg, AssetLoader::default());

        for _ in 0..7 {
            system.tick(&mut NullRenderer).unwrap();
        }
        assert_eq!(system.stats.frames, 1);
        assert_eq!(system.driver().frame_index(), 7);
    }

    #[test]
    fn test_run_registers_loaded_templates() {
        let mut system = SimulationSystem::new(&config(Variant::Extended));
        let stop = system.stop_handle();

        // Run until both templates have been populated and drawn
        let mut drawn = Vec::new();
        let mut renderer = |w: &piefall_core::FallWorld| {
            drawn.push(w.len());
            if w.len() == 7 {
                stop.stop();
            }
        };
        let mut pacer = IntervalPacer::from_hz(200.0).with_limit(1000);
        let frames = system.run(&mut pacer, &mut renderer).unwrap();

        assert_eq!(drawn.last(), Some(&7));
        assert_eq!(frames, drawn.len() as u64);
        assert_eq!(system.object_count(), 7);
        assert_eq!(system.driver().simulation().templates().count(), 2);
    }
}
