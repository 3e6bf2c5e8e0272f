//! Simulation context
//!
//! Owns the object registry together with everything the tick needs to draw
//! random numbers and instantiate templates. There is no global state: hosts
//! hold a [`Simulation`] (usually inside a [`FrameDriver`](crate::FrameDriver))
//! and pass it around by reference.

use piefall_physics::{
    FallConfig, FallWorld, FallingBody, KindConfig, ObjectKey, ObjectKind, StepStats, TemplateId,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use slotmap::SlotMap;

use crate::error::PopulateError;

/// Metadata about a loaded asset template
#[derive(Clone, Debug, PartialEq)]
pub struct TemplateInfo {
    /// Which kind of object the template instantiates
    pub kind: ObjectKind,
    /// Human-readable name, for logs
    pub name: String,
}

/// The object registry plus its configuration, RNG and template handles
pub struct Simulation {
    world: FallWorld,
    templates: SlotMap<TemplateId, TemplateInfo>,
    rng: SmallRng,
    seed: u64,
}

impl Simulation {
    /// Create a simulation seeded from entropy
    pub fn new(config: FallConfig) -> Self {
        Self::with_seed(config, rand::random())
    }

    /// Create a simulation with a fixed seed for reproducible runs
    pub fn with_seed(config: FallConfig, seed: u64) -> Self {
        Self {
            world: FallWorld::with_config(config),
            templates: SlotMap::with_key(),
            rng: SmallRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a simulation from an optional seed
    pub fn from_seed(config: FallConfig, seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::with_seed(config, seed),
            None => Self::new(config),
        }
    }

    /// Seed the RNG was created with
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Register a loaded asset template and get its handle
    pub fn register_template(&mut self, kind: ObjectKind, name: impl Into<String>) -> TemplateId {
        let name = name.into();
        log::debug!("Registered {} template '{}'", kind, name);
        self.templates.insert(TemplateInfo { kind, name })
    }

    /// Look up a registered template
    pub fn template(&self, id: TemplateId) -> Option<&TemplateInfo> {
        self.templates.get(id)
    }

    /// Iterate over registered templates
    pub fn templates(&self) -> impl Iterator<Item = (TemplateId, &TemplateInfo)> {
        self.templates.iter()
    }

    /// Instantiate the configured number of objects from a template
    ///
    /// Each object gets an independent spawn position, rotation speed and fall
    /// speed drawn from its kind's configuration. The configuration is
    /// validated first, so no object is ever created with a non-positive fall
    /// speed. Returns the keys of the new objects.
    pub fn populate(&mut self, template: TemplateId) -> Result<Vec<ObjectKey>, PopulateError> {
        let count = self.kind_config_for(template)?.count;
        self.populate_n(template, count)
    }

    /// Instantiate `count` objects from a template, ignoring the configured count
    pub fn populate_n(
        &mut self,
        template: TemplateId,
        count: usize,
    ) -> Result<Vec<ObjectKey>, PopulateError> {
        let config = self.kind_config_for(template)?.clone();
        let kind = self.templates[template].kind;

        // Spawn everything before touching the world so a failure adds nothing
        let bodies = (0..count)
            .map(|_| FallingBody::spawn(kind, template, &config, &mut self.rng))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|source| PopulateError::InvalidConfig { kind, source })?;
        let keys: Vec<ObjectKey> = bodies.into_iter().map(|body| self.world.add(body)).collect();

        log::info!(
            "Populated {} {} objects from '{}' ({} total)",
            keys.len(),
            kind,
            self.templates[template].name,
            self.world.len()
        );
        Ok(keys)
    }

    /// Resolve and validate the kind configuration for a template
    fn kind_config_for(&self, template: TemplateId) -> Result<&KindConfig, PopulateError> {
        let info = self
            .templates
            .get(template)
            .ok_or(PopulateError::UnknownTemplate(template))?;
        let config = self
            .world
            .config
            .kind(info.kind)
            .ok_or(PopulateError::KindNotConfigured(info.kind))?;
        config.validate().map_err(|source| PopulateError::InvalidConfig {
            kind: info.kind,
            source,
        })?;
        Ok(config)
    }

    /// Advance the registry by one tick (integrate, separate, recycle)
    pub fn step(&mut self) -> StepStats {
        self.world.step(&mut self.rng)
    }

    /// Get a reference to the object registry
    pub fn world(&self) -> &FallWorld {
        &self.world
    }

    /// Get a mutable reference to the object registry
    pub fn world_mut(&mut self) -> &mut FallWorld {
        &mut self.world
    }

    /// Get the per-kind configuration
    pub fn config(&self) -> &FallConfig {
        &self.world.config
    }
}
