//! Core abstractions for sparseview.
//!
//! This crate provides the fundamental traits and types used throughout sparseview:
//! - [`Structure`] trait for objects placed in the scene (point clouds, camera markers)
//! - Global state management and structure registry
//! - The workspace wire data model ([`Workspace`], [`Point`], [`ImagePose`])
//! - Extrinsic-pose math (quaternion to rotation matrix, camera center recovery)

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]

pub mod error;
pub mod options;
pub mod pose;
pub mod registry;
pub mod state;
pub mod structure;
pub mod workspace;

pub use error::{Result, SparseviewError};
pub use options::Options;
pub use pose::{camera_center, look_dir, rotation_from_quaternion, up_dir};
pub use registry::Registry;
pub use state::{with_context, with_context_mut, Context};
pub use structure::Structure;
pub use workspace::{ImagePose, Point, Workspace, WorkspaceList};

// Re-export glam types for convenience
pub use glam::{Mat3, Mat4, Quat, Vec2, Vec3, Vec4};
