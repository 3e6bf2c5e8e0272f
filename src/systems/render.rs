//! GPU rendering system
//!
//! Manages GPU rendering including:
//! - Render context and surface
//! - The instanced mesh pipeline and per-template meshes
//! - Frame rendering of the object registry

use std::sync::Arc;
use winit::window::Window;
use piefall_core::{FallWorld, Renderer, TemplateId, Vec3};
use piefall_render::{
    context::RenderContext,
    pipeline::{MeshPipeline, RenderUniforms},
    Camera, InstanceBatches, KindPalette, MeshData, RenderError,
};
use crate::config::{CameraConfig, RenderingConfig};

/// Manages GPU rendering
pub struct RenderSystem {
    context: RenderContext,
    pipeline: MeshPipeline,
    batches: InstanceBatches,
    camera: Camera,
    palette: KindPalette,
    render_config: RenderingConfig,
}

impl RenderSystem {
    /// Create render system from window and config
    pub fn new(
        window: Arc<Window>,
        render_config: RenderingConfig,
        camera_config: &CameraConfig,
        vsync: bool,
    ) -> Result<Self, RenderError> {
        let context = pollster::block_on(RenderContext::with_vsync(window, vsync))?;

        let mut pipeline = MeshPipeline::new(
            &context.device,
            context.config.format,
            render_config.max_instances as usize,
        );
        pipeline.ensure_depth_texture(&context.device, context.size.width, context.size.height);

        Ok(Self {
            context,
            pipeline,
            batches: InstanceBatches::new(),
            camera: camera_from_config(camera_config),
            palette: render_config.palette(),
            render_config,
        })
    }

    /// Handle window resize
    pub fn resize(&mut self, width: u32, height: u32) {
        self.context
            .resize(winit::dpi::PhysicalSize::new(width, height));
        self.pipeline.ensure_depth_texture(&self.context.device, width, height);
    }

    /// Reconfigure the surface after it was lost or went stale
    pub fn reconfigure(&mut self) {
        self.context.reconfigure();
    }

    /// Upload a template's mesh to the GPU
    pub fn upload_template(&mut self, template: TemplateId, name: &str, mesh: &MeshData) {
        self.pipeline.upload_mesh(&self.context.device, template, name, mesh);
        log::info!(
            "Uploaded template '{}': {} vertices, {} triangles",
            name,
            mesh.vertex_count(),
            mesh.triangle_count()
        );
    }

    /// Get current surface size
    pub fn size(&self) -> (u32, u32) {
        (self.context.size.width, self.context.size.height)
    }

    fn clear_color(&self) -> wgpu::Color {
        let bg = &self.render_config.background_color;
        wgpu::Color {
            r: bg[0] as f64,
            g: bg[1] as f64,
            b: bg[2] as f64,
            a: bg[3] as f64,
        }
    }
}

impl Renderer for RenderSystem {
    type Error = RenderError;

    /// Render a single frame
    fn render(&mut self, world: &FallWorld) -> Result<(), RenderError> {
        // Every object moves every tick, so instances are rebuilt each frame
        self.batches.rebuild(world, &self.palette);
        self.pipeline.upload_instances(&self.context.queue, &self.batches);

        let uniforms = build_uniforms(&self.camera, &self.render_config, self.context.aspect_ratio());
        self.pipeline.update_uniforms(&self.context.queue, &uniforms);

        let output = self.context.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        self.pipeline
            .render(&mut encoder, &view, &self.batches, self.clear_color())?;

        self.context.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

/// Camera placed according to config
pub fn camera_from_config(config: &CameraConfig) -> Camera {
    Camera {
        position: Vec3::from(config.position),
        target: Vec3::from(config.target),
        fov: config.fov,
        near: config.near,
        far: config.far,
        ..Camera::new()
    }
}

/// Uniforms for one frame
pub fn build_uniforms(camera: &Camera, config: &RenderingConfig, aspect: f32) -> RenderUniforms {
    let light = Vec3::from(config.light_dir);
    let light = if light.length() > 0.0 { light.normalized() } else { Vec3::Y };

    RenderUniforms {
        view_matrix: camera.view_matrix(),
        projection_matrix: camera.projection_matrix(aspect),
        light_dir: light.to_array(),
        ambient_strength: config.ambient_strength,
        diffuse_strength: config.diffuse_strength,
        _padding: [0.0; 3],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_from_default_config() {
        let camera = camera_from_config(&CameraConfig::default());
        assert_eq!(camera, Camera::new());
    }

    #[test]
    fn test_light_is_normalized() {
        let uniforms = build_uniforms(&Camera::new(), &RenderingConfig::default(), 16.0 / 9.0);
        let [x, y, z] = uniforms.light_dir;
        assert_eq!(x, 0.0);
        assert!((y - z).abs() < 1e-6);
        assert!(((x * x + y * y + z * z) - 1.0).abs() < 1e-5);
        assert_eq!(uniforms.ambient_strength, 0.5);
    }

    #[test]
    fn test_zero_light_falls_back_to_up() {
        let config = RenderingConfig {
            light_dir: [0.0; 3],
            ..Default::default()
        };
        let uniforms = build_uniforms(&Camera::new(), &config, 1.0);
        assert_eq!(uniforms.light_dir, [0.0, 1.0, 0.0]);
    }
}
