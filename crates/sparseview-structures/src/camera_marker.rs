//! Camera marker structure for visualizing image poses.

use glam::{Mat4, Vec3};
use sparseview_core::pose;
use sparseview_core::structure::Structure;
use sparseview_core::workspace::ImagePose;
use sparseview_render::FrustumRenderData;

/// Default vertical field of view for the marker wireframe, in degrees.
/// The workspace API carries no intrinsics, so every marker uses the same
/// plausible frame shape.
const DEFAULT_FOV_DEGREES: f32 = 50.0;
const DEFAULT_ASPECT_RATIO: f32 = 1.5;

/// A wireframe frustum marking one registered image's camera pose.
pub struct CameraMarker {
    name: String,
    pose: ImagePose,
    enabled: bool,
    transform: Mat4,
    color: Vec3,
    /// Marker size as a fraction of the scene length scale.
    scale: f32,
    fov_degrees: f32,
    aspect_ratio: f32,
    render_data: Option<FrustumRenderData>,
    /// Focal length the cached geometry was built with.
    built_focal: Option<f32>,
}

impl CameraMarker {
    /// Creates a new camera marker from an extrinsic pose.
    pub fn new(name: impl Into<String>, pose: ImagePose) -> Self {
        Self {
            name: name.into(),
            pose,
            enabled: true,
            transform: Mat4::IDENTITY,
            color: Vec3::new(1.0, 0.2, 0.2),
            scale: 0.05,
            fov_degrees: DEFAULT_FOV_DEGREES,
            aspect_ratio: DEFAULT_ASPECT_RATIO,
            render_data: None,
            built_focal: None,
        }
    }

    /// The extrinsic pose.
    #[must_use]
    pub fn pose(&self) -> &ImagePose {
        &self.pose
    }

    /// World-space camera center derived from the pose.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        pose::camera_center(&self.pose)
    }

    /// Gets the marker color.
    #[must_use]
    pub fn color(&self) -> Vec3 {
        self.color
    }

    /// Sets the marker color.
    pub fn set_color(&mut self, color: Vec3) {
        self.color = color;
    }

    /// Gets the marker scale (relative to the scene length scale).
    #[must_use]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Sets the marker scale and invalidates the cached geometry.
    pub fn set_scale(&mut self, scale: f32) {
        if (scale - self.scale).abs() > f32::EPSILON {
            self.scale = scale;
            self.render_data = None;
            self.built_focal = None;
        }
    }

    fn compute_focal(&self, length_scale: f32) -> f32 {
        self.scale * length_scale
    }

    /// Whether the cached geometry is stale for the given scene length scale.
    #[must_use]
    pub fn needs_reinit(&self, length_scale: f32) -> bool {
        match self.built_focal {
            None => true,
            Some(focal) => (focal - self.compute_focal(length_scale)).abs() > 1e-6,
        }
    }

    /// Generates the frustum wireframe geometry.
    ///
    /// Nodes: 0=camera center, 1-4=image-plane corners, 5-7=up-indicator
    /// triangle above the frame.
    fn generate_wireframe(&self, length_scale: f32) -> (Vec<Vec3>, Vec<[u32; 2]>) {
        let focal = self.compute_focal(length_scale);

        let root = self.center();
        let look_dir = pose::look_dir(&self.pose);
        let up_dir = pose::up_dir(&self.pose);
        let right_dir = pose::rotation_from_quaternion(&self.pose).transpose() * Vec3::X;

        let frame_center = root + look_dir * focal;

        let half_height = focal * (self.fov_degrees.to_radians() / 2.0).tan();
        let half_width = self.aspect_ratio * half_height;

        let frame_up = up_dir * half_height;
        let frame_right = right_dir * half_width;

        let upper_left = frame_center + frame_up - frame_right;
        let upper_right = frame_center + frame_up + frame_right;
        let lower_left = frame_center - frame_up - frame_right;
        let lower_right = frame_center - frame_up + frame_right;

        // Orientation triangle (above frame)
        let tri_left = frame_center + frame_up * 1.2 - frame_right * 0.7;
        let tri_right = frame_center + frame_up * 1.2 + frame_right * 0.7;
        let tri_top = frame_center + frame_up * 2.0;

        let nodes = vec![
            root,        // 0
            upper_left,  // 1
            upper_right, // 2
            lower_left,  // 3
            lower_right, // 4
            tri_left,    // 5
            tri_right,   // 6
            tri_top,     // 7
        ];

        let edges = vec![
            // From root to corners
            [0, 1],
            [0, 2],
            [0, 3],
            [0, 4],
            // Frame rectangle
            [1, 2],
            [2, 4],
            [4, 3],
            [3, 1],
            // Orientation triangle
            [5, 6],
            [6, 7],
            [7, 5],
        ];

        (nodes, edges)
    }

    /// (Re)builds GPU render data for the given scene length scale.
    pub fn init_render_data(
        &mut self,
        device: &wgpu::Device,
        bind_group_layout: &wgpu::BindGroupLayout,
        camera_buffer: &wgpu::Buffer,
        queue: &wgpu::Queue,
        length_scale: f32,
    ) {
        let (nodes, edges) = self.generate_wireframe(length_scale);

        let render_data =
            FrustumRenderData::new(device, bind_group_layout, camera_buffer, &nodes, &edges);
        render_data.update_uniforms(queue, self.color.extend(1.0));

        self.render_data = Some(render_data);
        self.built_focal = Some(self.compute_focal(length_scale));
    }

    /// Returns the render data if available.
    #[must_use]
    pub fn render_data(&self) -> Option<&FrustumRenderData> {
        self.render_data.as_ref()
    }

    /// Pushes the current color to the GPU.
    pub fn update_gpu_buffers(&self, queue: &wgpu::Queue) {
        if let Some(render_data) = &self.render_data {
            render_data.update_uniforms(queue, self.color.extend(1.0));
        }
    }

    /// Builds the egui UI for this marker.
    pub fn build_egui_ui(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Color:");
            let mut color = [self.color.x, self.color.y, self.color.z];
            if ui.color_edit_button_rgb(&mut color).changed() {
                self.set_color(Vec3::new(color[0], color[1], color[2]));
            }
        });

        let c = self.center();
        ui.label(format!("Position: ({:.2}, {:.2}, {:.2})", c.x, c.y, c.z));
    }
}

impl Structure for CameraMarker {
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn type_name(&self) -> &'static str {
        "CameraMarker"
    }

    fn bounding_box(&self) -> Option<(Vec3, Vec3)> {
        // Only the camera center; the wireframe is sized relative to the
        // scene and should not feed back into the extents.
        let c = self.transform.transform_point3(self.center());
        Some((c, c))
    }

    fn length_scale(&self) -> f32 {
        0.0
    }

    fn transform(&self) -> Mat4 {
        self.transform
    }

    fn set_transform(&mut self, transform: Mat4) {
        self.transform = transform;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn refresh(&mut self) {
        self.render_data = None;
        self.built_focal = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity_pose(t: Vec3) -> ImagePose {
        ImagePose {
            qw: 1.0,
            qx: 0.0,
            qy: 0.0,
            qz: 0.0,
            tx: t.x,
            ty: t.y,
            tz: t.z,
        }
    }

    #[test]
    fn center_is_negated_translation_for_identity_rotation() {
        let marker = CameraMarker::new("cam", identity_pose(Vec3::new(1.0, 2.0, 3.0)));
        assert!((marker.center() - Vec3::new(-1.0, -2.0, -3.0)).length() < 1e-6);
    }

    #[test]
    fn wireframe_has_expected_topology() {
        let marker = CameraMarker::new("cam", identity_pose(Vec3::ZERO));
        let (nodes, edges) = marker.generate_wireframe(10.0);
        assert_eq!(nodes.len(), 8);
        assert_eq!(edges.len(), 11);
        // All edge indices reference valid nodes.
        for &[a, b] in &edges {
            assert!((a as usize) < nodes.len());
            assert!((b as usize) < nodes.len());
        }
    }

    #[test]
    fn wireframe_apex_sits_at_camera_center() {
        let marker = CameraMarker::new("cam", identity_pose(Vec3::new(0.5, -0.5, 2.0)));
        let (nodes, _) = marker.generate_wireframe(4.0);
        assert!((nodes[0] - marker.center()).length() < 1e-6);
    }

    #[test]
    fn frame_center_lies_along_look_direction() {
        let marker = CameraMarker::new("cam", identity_pose(Vec3::ZERO));
        let (nodes, _) = marker.generate_wireframe(10.0);
        // Identity pose looks down +z; corners average to the frame center.
        let frame_center = (nodes[1] + nodes[2] + nodes[3] + nodes[4]) / 4.0;
        let expected = marker.center() + Vec3::Z * marker.compute_focal(10.0);
        assert!((frame_center - expected).length() < 1e-5);
    }

    #[test]
    fn scale_change_invalidates_geometry() {
        let mut marker = CameraMarker::new("cam", identity_pose(Vec3::ZERO));
        assert!(marker.needs_reinit(1.0));
        // Simulate a build
        marker.built_focal = Some(marker.compute_focal(1.0));
        assert!(!marker.needs_reinit(1.0));
        marker.set_scale(0.1);
        assert!(marker.needs_reinit(1.0));
    }

    #[test]
    fn length_scale_change_requires_rebuild() {
        let mut marker = CameraMarker::new("cam", identity_pose(Vec3::ZERO));
        marker.built_focal = Some(marker.compute_focal(1.0));
        assert!(marker.needs_reinit(2.0));
    }
}
