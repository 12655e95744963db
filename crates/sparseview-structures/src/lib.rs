//! Scene structures for sparseview.
//!
//! Each structure implements [`sparseview_core::Structure`], owns its GPU
//! render data, and contributes a sub-panel to the egui UI.

#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_possible_truncation)]

pub mod camera_marker;
pub mod point_cloud;

pub use camera_marker::CameraMarker;
pub use point_cloud::PointCloud;
