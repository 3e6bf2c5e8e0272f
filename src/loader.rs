//! Background template loading
//!
//! The [`AssetLoader`] spawns a worker thread that builds template meshes and
//! returns them via a channel, so the frame loop keeps ticking (and drawing
//! an empty scene) until the templates arrive.

use std::cell::Cell;
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread;
use std::time::Duration;

use piefall_core::ObjectKind;
use piefall_render::geometry::{pie_mesh, text_mesh, PieShape};
use piefall_render::MeshData;

use crate::config::{AssetsConfig, Variant};

/// Template to build in the background
#[derive(Clone, Debug, PartialEq)]
pub enum TemplateRequest {
    /// The falling model
    Pie(PieShape),
    /// An extruded text slab
    Text {
        text: String,
        pixel: f32,
        depth: f32,
    },
}

impl TemplateRequest {
    /// Kind of object the template instantiates
    pub fn kind(&self) -> ObjectKind {
        match self {
            TemplateRequest::Pie(_) => ObjectKind::Model,
            TemplateRequest::Text { .. } => ObjectKind::Text,
        }
    }

    fn name(&self) -> String {
        match self {
            TemplateRequest::Pie(_) => "pie".to_string(),
            TemplateRequest::Text { text, .. } => text.clone(),
        }
    }

    fn build(&self) -> MeshData {
        match self {
            TemplateRequest::Pie(shape) => pie_mesh(shape),
            TemplateRequest::Text { text, pixel, depth } => text_mesh(text, *pixel, *depth),
        }
    }
}

/// A finished template
#[derive(Debug)]
pub struct LoadedTemplate {
    pub kind: ObjectKind,
    /// Name to register the template under
    pub name: String,
    pub mesh: MeshData,
}

/// Background template loader using a dedicated worker thread
///
/// Submit work with [`load_async`](AssetLoader::load_async) and collect it
/// with [`poll`](AssetLoader::poll) or [`poll_all`](AssetLoader::poll_all).
/// Each request is delivered after the configured delay.
pub struct AssetLoader {
    sender: Sender<TemplateRequest>,
    receiver: Receiver<LoadedTemplate>,
    disconnected: Cell<bool>,
}

impl AssetLoader {
    /// Create a loader whose worker waits `delay` before delivering each template
    ///
    /// The worker thread runs until the loader is dropped.
    pub fn new(delay: Duration) -> Self {
        let (request_tx, request_rx) = channel::<TemplateRequest>();
        let (result_tx, result_rx) = channel::<LoadedTemplate>();

        thread::spawn(move || {
            while let Ok(request) = request_rx.recv() {
                if !delay.is_zero() {
                    thread::sleep(delay);
                }
                let loaded = LoadedTemplate {
                    kind: request.kind(),
                    name: request.name(),
                    mesh: request.build(),
                };
                log::debug!(
                    "Built template '{}' ({} triangles)",
                    loaded.name,
                    loaded.mesh.triangle_count()
                );
                if result_tx.send(loaded).is_err() {
                    break;
                }
            }
        });

        Self::from_channels(request_tx, result_rx)
    }

    fn from_channels(sender: Sender<TemplateRequest>, receiver: Receiver<LoadedTemplate>) -> Self {
        Self {
            sender,
            receiver,
            disconnected: Cell::new(false),
        }
    }

    /// Create a loader and queue every template the variant needs
    pub fn from_config(config: &AssetsConfig, variant: Variant) -> Self {
        let loader = Self::new(Duration::from_millis(config.load_delay_ms));
        for request in requests_for(config, variant) {
            loader.load_async(request);
        }
        loader
    }

    /// Queue a template to be built in the background
    pub fn load_async(&self, request: TemplateRequest) {
        // Only fails if the worker has exited
        let _ = self.sender.send(request);
    }

    /// Check for a finished template (non-blocking)
    ///
    /// If the worker thread has died, this logs an error once and keeps
    /// returning `None`; templates still pending will never arrive.
    pub fn poll(&self) -> Option<LoadedTemplate> {
        match self.receiver.try_recv() {
            Ok(loaded) => Some(loaded),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.mark_disconnected();
                None
            }
        }
    }

    /// Collect every template finished so far (non-blocking)
    pub fn poll_all(&self) -> Vec<LoadedTemplate> {
        std::iter::from_fn(|| self.poll()).collect()
    }

    /// Check whether the worker thread has gone away
    ///
    /// Only updated when a receive finds the channel closed.
    pub fn is_disconnected(&self) -> bool {
        self.disconnected.get()
    }

    fn mark_disconnected(&self) {
        if !self.disconnected.replace(true) {
            log::error!("Asset loader worker stopped; no more templates will load");
        }
    }

    /// Block until a template is finished or `timeout` passes
    pub fn wait(&self, timeout: Duration) -> Option<LoadedTemplate> {
        match self.receiver.recv_timeout(timeout) {
            Ok(loaded) => Some(loaded),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => {
                self.mark_disconnected();
                None
            }
        }
    }
}

impl Default for AssetLoader {
    fn default() -> Self {
        Self::new(Duration::ZERO)
    }
}

/// Templates needed by a variant, model first
pub fn requests_for(config: &AssetsConfig, variant: Variant) -> Vec<TemplateRequest> {
    let mut requests = vec![TemplateRequest::Pie(PieShape {
        radius: config.pie_radius,
        thickness: config.pie_thickness,
        segments: config.pie_segments,
        ..PieShape::default()
    })];
    if variant == Variant::Extended {
        requests.push(TemplateRequest::Text {
            text: config.text.clone(),
            pixel: config.text_pixel,
            depth: config.text_depth,
        });
    }
    requests
}
