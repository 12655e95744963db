//! Configuration options for sparseview.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Global configuration options for the viewer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Options {
    /// Whether to automatically compute scene extents after registration.
    pub auto_compute_scene_extents: bool,

    /// Whether the view camera re-frames the scene after a workspace load.
    pub auto_fit_camera: bool,

    /// Background color.
    pub background_color: Vec3,

    /// World-space radius of rendered points.
    pub point_radius: f32,

    /// Camera-marker size as a fraction of the scene length scale.
    pub marker_scale: f32,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            auto_compute_scene_extents: true,
            auto_fit_camera: true,
            background_color: Vec3::new(0.1, 0.1, 0.1),
            point_radius: 0.01,
            marker_scale: 0.05,
        }
    }
}
