//! Structure trait and related types.
//!
//! A [`Structure`] represents an object placed in the scene, such as a point
//! cloud or a camera marker.

use std::any::Any;

use glam::{Mat4, Vec3};

/// An object that can be visualized in sparseview.
///
/// Structures are the primary objects managed by the viewer. Each structure has:
/// - A unique name within its type
/// - A transform matrix for positioning in the scene
/// - Visibility state
/// - Methods for refreshing GPU state and building UI
pub trait Structure: Any + Send + Sync {
    /// Returns a reference to self as `Any` for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Returns a mutable reference to self as `Any` for downcasting.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Returns the unique name of this structure.
    fn name(&self) -> &str;

    /// Returns the type name of this structure (e.g., "`PointCloud`", "`CameraMarker`").
    fn type_name(&self) -> &'static str;

    /// Returns the axis-aligned bounding box in world coordinates.
    ///
    /// Returns `None` if the structure has no spatial extent.
    fn bounding_box(&self) -> Option<(Vec3, Vec3)>;

    /// Returns a characteristic length scale for this structure.
    fn length_scale(&self) -> f32;

    /// Returns the current model transform matrix.
    fn transform(&self) -> Mat4;

    /// Sets the model transform matrix.
    fn set_transform(&mut self, transform: Mat4);

    /// Returns whether this structure is currently visible.
    fn is_enabled(&self) -> bool;

    /// Sets the visibility of this structure.
    fn set_enabled(&mut self, enabled: bool);

    /// Marks GPU resources as stale after data changes.
    fn refresh(&mut self);

    /// Resets the transform to identity.
    fn reset_transform(&mut self) {
        self.set_transform(Mat4::IDENTITY);
    }
}
