//! Wire data model for reconstruction workspaces.
//!
//! These types mirror the JSON served by the workspace API. Unknown fields
//! (such as per-camera intrinsics blocks) are tolerated and ignored.

use std::collections::BTreeMap;

use glam::Vec3;
use serde::Deserialize;

/// A single colored 3D point.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Point {
    /// Position in world space.
    pub fn position(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// Color as linear-ish RGB in [0, 1].
    pub fn color(&self) -> Vec3 {
        Vec3::new(
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        )
    }
}

/// Extrinsic pose of a registered image: world-to-camera rotation as a unit
/// quaternion plus a translation.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ImagePose {
    pub qw: f32,
    pub qx: f32,
    pub qy: f32,
    pub qz: f32,
    pub tx: f32,
    pub ty: f32,
    pub tz: f32,
}

impl ImagePose {
    /// Translation component of the world-to-camera transform.
    pub fn translation(&self) -> Vec3 {
        Vec3::new(self.tx, self.ty, self.tz)
    }
}

/// A named reconstruction workspace: sparse point cloud plus camera poses.
///
/// The images map is a `BTreeMap` so scene construction iterates keys in
/// sorted order and marker naming stays deterministic.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Workspace {
    #[serde(default)]
    pub points: Vec<Point>,
    #[serde(default)]
    pub images: BTreeMap<String, ImagePose>,
}

/// Response body of the workspace-list endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkspaceList {
    pub workspaces: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_color_normalizes_to_unit_range() {
        let p = Point {
            x: 1.0,
            y: 2.0,
            z: 3.0,
            r: 255,
            g: 0,
            b: 51,
        };
        assert_eq!(p.position(), Vec3::new(1.0, 2.0, 3.0));
        let c = p.color();
        assert!((c.x - 1.0).abs() < 1e-6);
        assert!(c.y.abs() < 1e-6);
        assert!((c.z - 0.2).abs() < 1e-6);
    }

    #[test]
    fn workspace_decodes_with_unknown_fields() {
        let json = r#"{
            "points": [
                {"x": 0.5, "y": -1.0, "z": 2.0, "r": 200, "g": 100, "b": 50}
            ],
            "images": {
                "IMG_0001.jpg": {"qw": 1.0, "qx": 0.0, "qy": 0.0, "qz": 0.0,
                                 "tx": 0.1, "ty": 0.2, "tz": 0.3}
            },
            "cameras": {"1": {"model": "PINHOLE", "width": 640, "height": 480}}
        }"#;
        let ws: Workspace = serde_json::from_str(json).unwrap();
        assert_eq!(ws.points.len(), 1);
        assert_eq!(ws.images.len(), 1);
        let pose = ws.images["IMG_0001.jpg"];
        assert_eq!(pose.translation(), Vec3::new(0.1, 0.2, 0.3));
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let ws: Workspace = serde_json::from_str("{}").unwrap();
        assert!(ws.points.is_empty());
        assert!(ws.images.is_empty());
    }

    #[test]
    fn image_keys_iterate_sorted() {
        let json = r#"{
            "images": {
                "b.jpg": {"qw": 1.0, "qx": 0.0, "qy": 0.0, "qz": 0.0, "tx": 0.0, "ty": 0.0, "tz": 0.0},
                "a.jpg": {"qw": 1.0, "qx": 0.0, "qy": 0.0, "qz": 0.0, "tx": 0.0, "ty": 0.0, "tz": 0.0}
            }
        }"#;
        let ws: Workspace = serde_json::from_str(json).unwrap();
        let keys: Vec<&str> = ws.images.keys().map(String::as_str).collect();
        assert_eq!(keys, ["a.jpg", "b.jpg"]);
    }
}
