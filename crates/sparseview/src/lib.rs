//! sparseview: a native viewer for sparse structure-from-motion reconstructions.
//!
//! Sparseview fetches named workspaces (a colored point cloud plus per-image
//! camera poses) from a REST backend and renders them in an interactive 3D
//! view: sphere-impostor points, wireframe camera frusta, turntable orbit
//! controls, and an egui side panel with workspace selection and size sliders.
//!
//! # Quick Start
//!
//! ```no_run
//! use sparseview::*;
//!
//! fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
//!     init()?;
//!
//!     let client = ApiClient::new("http://127.0.0.1:5000")?;
//!     show_with_client(client);
//!
//!     Ok(())
//! }
//! ```
//!
//! Structures can also be registered directly, without a backend:
//!
//! ```no_run
//! use sparseview::*;
//!
//! fn main() -> Result<()> {
//!     init()?;
//!     let points = vec![Vec3::ZERO, Vec3::X, Vec3::Y];
//!     let colors = vec![Vec3::ONE; 3];
//!     register_point_cloud("my points", points, colors)?;
//!     show();
//!     Ok(())
//! }
//! ```

#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_possible_truncation)]

mod app;
pub mod workspace;

// Re-export core types
pub use sparseview_core::{
    error::{Result, SparseviewError},
    options::Options,
    pose,
    registry::Registry,
    state::{with_context, with_context_mut, Context},
    structure::Structure,
    workspace::{ImagePose, Point, Workspace, WorkspaceList},
    Mat3, Mat4, Quat, Vec2, Vec3, Vec4,
};

// Re-export the API client and render/structure types
pub use sparseview_client::{ApiClient, ClientError};
pub use sparseview_render::{Camera, RenderEngine};
pub use sparseview_structures::{CameraMarker, PointCloud};

pub use workspace::{apply_workspace, SceneSummary};

/// Initializes sparseview with default settings.
///
/// This must be called before any other sparseview functions.
pub fn init() -> Result<()> {
    sparseview_core::state::init_context()?;
    log::info!("sparseview initialized");
    Ok(())
}

/// Returns whether sparseview has been initialized.
pub fn is_initialized() -> bool {
    sparseview_core::state::is_initialized()
}

/// Shuts down sparseview and releases all resources.
pub fn shutdown() {
    sparseview_core::state::shutdown_context();
    log::info!("sparseview shut down");
}

/// Shows the viewer window without a backend connection.
///
/// This function blocks until the window is closed.
pub fn show() {
    let _ = env_logger::try_init();
    app::run_app(None);
}

/// Shows the viewer window connected to a workspace API backend.
///
/// The workspace list is fetched on startup; selecting a workspace in the
/// panel fetches and displays it. Blocks until the window is closed.
pub fn show_with_client(client: ApiClient) {
    let _ = env_logger::try_init();
    app::run_app(Some(client));
}

/// Handle to a registered point cloud.
pub struct PointCloudHandle {
    /// Name of the point cloud.
    pub name: String,
}

/// Handle to a registered camera marker.
pub struct CameraMarkerHandle {
    /// Name of the camera marker.
    pub name: String,
}

/// Registers a colored point cloud.
///
/// `points` and `colors` must have the same length; colors are RGB in [0, 1].
pub fn register_point_cloud(
    name: impl Into<String>,
    points: Vec<Vec3>,
    colors: Vec<Vec3>,
) -> Result<PointCloudHandle> {
    if points.len() != colors.len() {
        return Err(SparseviewError::SizeMismatch {
            expected: points.len(),
            actual: colors.len(),
        });
    }

    let name = name.into();
    let colors: Vec<Vec4> = colors.into_iter().map(|c| c.extend(1.0)).collect();
    let cloud = PointCloud::new(name.clone(), points, colors);

    with_context_mut(|ctx| -> Result<()> {
        ctx.registry.register(Box::new(cloud))?;
        if ctx.options.auto_compute_scene_extents {
            ctx.update_extents();
        }
        Ok(())
    })?;

    Ok(PointCloudHandle { name })
}

/// Registers a camera marker for an image pose.
pub fn register_camera_marker(
    name: impl Into<String>,
    pose: ImagePose,
) -> Result<CameraMarkerHandle> {
    let name = name.into();
    let marker = CameraMarker::new(name.clone(), pose);

    with_context_mut(|ctx| -> Result<()> {
        ctx.registry.register(Box::new(marker))?;
        if ctx.options.auto_compute_scene_extents {
            ctx.update_extents();
        }
        Ok(())
    })?;

    Ok(CameraMarkerHandle { name })
}

/// Gets a registered point cloud by name.
pub fn get_point_cloud(name: &str) -> Option<PointCloudHandle> {
    with_context(|ctx| {
        ctx.registry
            .contains("PointCloud", name)
            .then(|| PointCloudHandle {
                name: name.to_string(),
            })
    })
}

/// Gets a registered camera marker by name.
pub fn get_camera_marker(name: &str) -> Option<CameraMarkerHandle> {
    with_context(|ctx| {
        ctx.registry
            .contains("CameraMarker", name)
            .then(|| CameraMarkerHandle {
                name: name.to_string(),
            })
    })
}

/// Removes a structure by name, whichever type it is.
pub fn remove_structure(name: &str) {
    with_context_mut(|ctx| {
        ctx.registry.remove("PointCloud", name);
        ctx.registry.remove("CameraMarker", name);
        if ctx.options.auto_compute_scene_extents {
            ctx.update_extents();
        }
    });
}

/// Removes all structures.
pub fn remove_all_structures() {
    with_context_mut(|ctx| {
        ctx.registry.clear();
        if ctx.options.auto_compute_scene_extents {
            ctx.update_extents();
        }
    });
}

/// Sets the rendered radius of every point cloud, in world units.
pub fn set_all_point_radii(radius: f32) {
    with_context_mut(|ctx| {
        ctx.options.point_radius = radius;
        for structure in ctx.registry.iter_mut() {
            if let Some(pc) = structure.as_any_mut().downcast_mut::<PointCloud>() {
                pc.set_point_radius(radius);
            }
        }
    });
}

/// Sets the scale of every camera marker, as a fraction of the scene length
/// scale.
pub fn set_all_marker_scales(scale: f32) {
    with_context_mut(|ctx| {
        ctx.options.marker_scale = scale;
        for structure in ctx.registry.iter_mut() {
            if let Some(marker) = structure.as_any_mut().downcast_mut::<CameraMarker>() {
                marker.set_scale(scale);
            }
        }
    });
}
