//! wgpu render engine for sparseview.
//!
//! Owns the device, surface and pipelines, the orbit camera, and the GPU
//! resource types used by scene structures. Scene structures hold their own
//! [`PointCloudRenderData`]/[`FrustumRenderData`] and the application drives
//! the render passes.

#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_possible_truncation)]

pub mod camera;
pub mod engine;
pub mod error;
pub mod frustum_render;
pub mod point_cloud_render;

pub use camera::Camera;
pub use engine::{CameraUniforms, RenderEngine};
pub use error::{RenderError, RenderResult};
pub use frustum_render::{FrustumRenderData, FrustumUniforms};
pub use point_cloud_render::{PointCloudRenderData, PointUniforms};
