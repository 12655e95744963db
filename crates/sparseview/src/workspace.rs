//! Workspace-to-scene synchronization.
//!
//! A workspace load replaces the whole scene: all point clouds and camera
//! markers are removed, then the new data is registered. There is no
//! incremental diffing, so a reload can never leave stale structures behind.

use sparseview_core::state::with_context_mut;
use sparseview_core::workspace::Workspace;
use sparseview_core::Result;
use sparseview_structures::{CameraMarker, PointCloud};

/// What a workspace load placed into the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneSummary {
    /// Number of points in the registered cloud (0 if the cloud was empty).
    pub num_points: usize,
    /// Number of camera markers registered.
    pub num_markers: usize,
}

/// Rebuilds the scene from a fetched workspace.
///
/// Registers one point cloud named `{name}/points` (only if the point list is
/// non-empty) and one camera marker per image, named `{name}/camera/{key}` in
/// sorted key order. Scene extents are recomputed afterwards.
pub fn apply_workspace(name: &str, workspace: &Workspace) -> Result<SceneSummary> {
    let num_points = workspace.points.len();
    let num_markers = workspace.images.len();

    with_context_mut(|ctx| -> Result<()> {
        ctx.registry.remove_all_of_type("PointCloud");
        ctx.registry.remove_all_of_type("CameraMarker");

        if !workspace.points.is_empty() {
            let positions = workspace.points.iter().map(|p| p.position()).collect();
            let colors = workspace
                .points
                .iter()
                .map(|p| p.color().extend(1.0))
                .collect();
            let cloud = PointCloud::new(format!("{name}/points"), positions, colors);
            ctx.registry.register(Box::new(cloud))?;
        }

        // BTreeMap iteration is key-sorted, so marker names are deterministic.
        for (key, pose) in &workspace.images {
            let marker = CameraMarker::new(format!("{name}/camera/{key}"), *pose);
            ctx.registry.register(Box::new(marker))?;
        }

        if ctx.options.auto_compute_scene_extents {
            ctx.update_extents();
        }
        Ok(())
    })?;

    log::info!("workspace '{name}' loaded: {num_points} points, {num_markers} cameras");

    Ok(SceneSummary {
        num_points,
        num_markers,
    })
}
