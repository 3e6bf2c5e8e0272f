//! Render error types

use std::fmt;

/// Error type for GPU setup and frame rendering
#[derive(Debug)]
pub enum RenderError {
    /// Surface was lost (window resized, minimized, etc.)
    SurfaceLost,
    /// GPU out of memory
    OutOfMemory,
    /// No adapter is compatible with the surface
    NoAdapter,
    /// The surface could not be created for the window
    SurfaceCreation(String),
    /// The adapter refused to create a device
    DeviceRequest(String),
    /// Other surface error
    Other(String),
}

impl RenderError {
    /// True if reconfiguring the surface is enough to recover
    pub fn is_recoverable(&self) -> bool {
        matches!(self, RenderError::SurfaceLost | RenderError::Other(_))
    }
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::SurfaceLost => write!(f, "Surface lost"),
            RenderError::OutOfMemory => write!(f, "Out of memory"),
            RenderError::NoAdapter => write!(f, "No compatible GPU adapter"),
            RenderError::SurfaceCreation(msg) => write!(f, "Surface creation failed: {}", msg),
            RenderError::DeviceRequest(msg) => write!(f, "Device request failed: {}", msg),
            RenderError::Other(msg) => write!(f, "Render error: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {}

impl From<wgpu::SurfaceError> for RenderError {
    fn from(err: wgpu::SurfaceError) -> Self {
        match err {
            wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => RenderError::SurfaceLost,
            wgpu::SurfaceError::OutOfMemory => RenderError::OutOfMemory,
            other => RenderError::Other(format!("{:?}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_error_display() {
        assert_eq!(format!("{}", RenderError::SurfaceLost), "Surface lost");
        assert_eq!(format!("{}", RenderError::OutOfMemory), "Out of memory");
        assert_eq!(
            format!("{}", RenderError::Other("test".to_string())),
            "Render error: test"
        );
    }

    #[test]
    fn test_from_surface_error() {
        assert!(matches!(RenderError::from(wgpu::SurfaceError::Lost), RenderError::SurfaceLost));
        assert!(matches!(RenderError::from(wgpu::SurfaceError::Outdated), RenderError::SurfaceLost));
        assert!(matches!(RenderError::from(wgpu::SurfaceError::OutOfMemory), RenderError::OutOfMemory));
        assert!(matches!(RenderError::from(wgpu::SurfaceError::Timeout), RenderError::Other(_)));
    }

    #[test]
    fn test_recoverable() {
        assert!(RenderError::SurfaceLost.is_recoverable());
        assert!(!RenderError::OutOfMemory.is_recoverable());
        assert!(!RenderError::NoAdapter.is_recoverable());
    }
}
