//! Error types for the render engine.

use thiserror::Error;

/// Errors from GPU setup and presentation.
#[derive(Error, Debug)]
pub enum RenderError {
    /// No compatible GPU adapter was found.
    #[error("no compatible GPU adapter found")]
    AdapterUnavailable,

    /// Device request failed.
    #[error("device request failed: {0}")]
    DeviceRequest(#[from] wgpu::RequestDeviceError),

    /// Surface creation failed.
    #[error("surface creation failed: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    /// Surface acquisition/presentation failed.
    #[error("surface error: {0}")]
    Surface(#[from] wgpu::SurfaceError),
}

/// A specialized Result type for render operations.
pub type RenderResult<T> = std::result::Result<T, RenderError>;
