//! Point cloud structure.

use glam::{Mat4, Vec3, Vec4};
use sparseview_core::structure::Structure;
use sparseview_render::{PointCloudRenderData, PointUniforms};

/// A colored point cloud.
pub struct PointCloud {
    name: String,
    points: Vec<Vec3>,
    colors: Vec<Vec4>,
    enabled: bool,
    transform: Mat4,
    render_data: Option<PointCloudRenderData>,
    point_radius: f32,
}

impl PointCloud {
    /// Creates a new point cloud with per-point colors.
    ///
    /// `points` and `colors` must have equal length; the registration API in
    /// the top-level crate enforces this before construction.
    pub fn new(name: impl Into<String>, points: Vec<Vec3>, colors: Vec<Vec4>) -> Self {
        debug_assert_eq!(points.len(), colors.len());
        Self {
            name: name.into(),
            points,
            colors,
            enabled: true,
            transform: Mat4::IDENTITY,
            render_data: None,
            point_radius: 0.01,
        }
    }

    /// Returns the number of points.
    #[must_use]
    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    /// Returns the points.
    #[must_use]
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Sets the point radius (world units).
    pub fn set_point_radius(&mut self, radius: f32) {
        self.point_radius = radius;
    }

    /// Gets the point radius.
    #[must_use]
    pub fn point_radius(&self) -> f32 {
        self.point_radius
    }

    /// Initializes GPU resources for this point cloud.
    pub fn init_gpu_resources(
        &mut self,
        device: &wgpu::Device,
        bind_group_layout: &wgpu::BindGroupLayout,
        camera_buffer: &wgpu::Buffer,
    ) {
        self.render_data = Some(PointCloudRenderData::new(
            device,
            bind_group_layout,
            camera_buffer,
            &self.points,
            &self.colors,
        ));
    }

    /// Returns the render data if initialized.
    #[must_use]
    pub fn render_data(&self) -> Option<&PointCloudRenderData> {
        self.render_data.as_ref()
    }

    /// Pushes the current transform and radius to the GPU.
    pub fn update_gpu_buffers(&self, queue: &wgpu::Queue) {
        if let Some(render_data) = &self.render_data {
            let uniforms = PointUniforms {
                model_matrix: self.transform.to_cols_array_2d(),
                point_radius: self.point_radius,
                _padding: [0.0; 3],
            };
            render_data.update_uniforms(queue, &uniforms);
        }
    }

    /// Builds the egui UI for this point cloud.
    pub fn build_egui_ui(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let mut enabled = self.enabled;
            if ui.checkbox(&mut enabled, "").changed() {
                self.enabled = enabled;
            }
            ui.label(format!("{} ({} points)", self.name, self.points.len()));
        });

        ui.horizontal(|ui| {
            ui.label("Radius:");
            ui.add(
                egui::Slider::new(&mut self.point_radius, 0.0005..=0.05)
                    .logarithmic(true)
                    .show_value(false),
            );
        });
    }
}

impl Structure for PointCloud {
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
        "PointCloud"
    }

    fn bounding_box(&self) -> Option<(Vec3, Vec3)> {
        if self.points.is_empty() {
            return None;
        }

        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);

        for &p in &self.points {
            min = min.min(p);
            max = max.max(p);
        }

        // Apply transform
        let transform = self.transform;
        let corners = [
            transform.transform_point3(Vec3::new(min.x, min.y, min.z)),
            transform.transform_point3(Vec3::new(max.x, min.y, min.z)),
            transform.transform_point3(Vec3::new(min.x, max.y, min.z)),
            transform.transform_point3(Vec3::new(max.x, max.y, min.z)),
            transform.transform_point3(Vec3::new(min.x, min.y, max.z)),
            transform.transform_point3(Vec3::new(max.x, min.y, max.z)),
            transform.transform_point3(Vec3::new(min.x, max.y, max.z)),
            transform.transform_point3(Vec3::new(max.x, max.y, max.z)),
        ];

        let mut world_min = Vec3::splat(f32::MAX);
        let mut world_max = Vec3::splat(f32::MIN);
        for corner in corners {
            world_min = world_min.min(corner);
            world_max = world_max.max(corner);
        }

        Some((world_min, world_max))
    }

    fn length_scale(&self) -> f32 {
        self.bounding_box()
            .map_or(0.0, |(min, max)| (max - min).length())
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
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounding_box_covers_points() {
        let cloud = PointCloud::new(
            "test",
            vec![Vec3::new(-1.0, 0.0, 2.0), Vec3::new(3.0, -2.0, 0.5)],
            vec![Vec4::ONE, Vec4::ONE],
        );
        let (min, max) = cloud.bounding_box().unwrap();
        assert_eq!(min, Vec3::new(-1.0, -2.0, 0.5));
        assert_eq!(max, Vec3::new(3.0, 0.0, 2.0));
    }

    #[test]
    fn empty_cloud_has_no_extent() {
        let cloud = PointCloud::new("empty", vec![], vec![]);
        assert!(cloud.bounding_box().is_none());
        assert_eq!(cloud.length_scale(), 0.0);
    }

    #[test]
    fn transform_moves_bounding_box() {
        let mut cloud = PointCloud::new("test", vec![Vec3::ZERO, Vec3::ONE], vec![
            Vec4::ONE,
            Vec4::ONE,
        ]);
        cloud.set_transform(Mat4::from_translation(Vec3::new(10.0, 0.0, 0.0)));
        let (min, max) = cloud.bounding_box().unwrap();
        assert_eq!(min, Vec3::new(10.0, 0.0, 0.0));
        assert_eq!(max, Vec3::new(11.0, 1.0, 1.0));
    }
}
