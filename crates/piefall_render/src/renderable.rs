//! Renderable instances - bridges the object registry to GPU buffers
//!
//! Objects are grouped by template so each template's mesh is drawn with a
//! single instanced call. Groups appear in the order their template is
//! first seen in the registry, and objects keep registry order within a
//! group.

use std::ops::Range;

use piefall_physics::{FallWorld, ObjectKind, TemplateId};

use crate::pipeline::InstanceRaw;

/// Convert a `0xRRGGBB` sRGB color to linear RGBA
pub fn color_from_hex(hex: u32) -> [f32; 4] {
    let channel = |shift: u32| {
        let c = ((hex >> shift) & 0xff) as f32 / 255.0;
        if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    [channel(16), channel(8), channel(0), 1.0]
}

/// Instance color per object kind (linear RGBA)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KindPalette {
    pub model: [f32; 4],
    pub text: [f32; 4],
}

impl Default for KindPalette {
    fn default() -> Self {
        Self {
            model: color_from_hex(0xc4a160),
            text: color_from_hex(0xffffff),
        }
    }
}

impl KindPalette {
    pub fn color(&self, kind: ObjectKind) -> [f32; 4] {
        match kind {
            ObjectKind::Model => self.model,
            ObjectKind::Text => self.text,
        }
    }
}

/// A run of instances sharing one template
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InstanceBatch {
    pub template: TemplateId,
    pub range: Range<u32>,
}

/// Per-frame instance data collected from the registry
#[derive(Default)]
pub struct InstanceBatches {
    /// Instance data, contiguous per batch
    pub instances: Vec<InstanceRaw>,
    /// Batches in draw order
    pub batches: Vec<InstanceBatch>,
    /// Reused per-template buckets
    buckets: Vec<(TemplateId, Vec<InstanceRaw>)>,
}

impl InstanceBatches {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect instances from every object in a world
    pub fn from_world(world: &FallWorld, palette: &KindPalette) -> Self {
        let mut batches = Self::new();
        batches.rebuild(world, palette);
        batches
    }

    /// Clear and refill from the current state of the registry
    pub fn rebuild(&mut self, world: &FallWorld, palette: &KindPalette) {
        for (_, bucket) in &mut self.buckets {
            bucket.clear();
        }

        for (_, body) in world.iter() {
            let instance = InstanceRaw {
                model: body.transform.matrix(),
                color: palette.color(body.kind()),
            };
            match self.buckets.iter_mut().position(|(t, _)| *t == body.template()) {
                Some(i) => self.buckets[i].1.push(instance),
                None => self.buckets.push((body.template(), vec![instance])),
            }
        }

        self.instances.clear();
        self.batches.clear();
        for (template, bucket) in &self.buckets {
            if bucket.is_empty() {
                continue;
            }
            let start = self.instances.len() as u32;
            self.instances.extend_from_slice(bucket);
            self.batches.push(InstanceBatch {
                template: *template,
                range: start..self.instances.len() as u32,
            });
        }
    }

    /// Get the number of instances
    #[inline]
    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    /// Get the number of draw batches
    #[inline]
    pub fn batch_count(&self) -> usize {
        self.batches.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}
