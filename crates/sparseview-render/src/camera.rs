//! View camera and turntable navigation.

use glam::{Mat4, Vec3};

/// A perspective camera orbiting a target point.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera position in world space.
    pub position: Vec3,
    /// Point the camera is looking at.
    pub target: Vec3,
    /// Up vector.
    pub up: Vec3,
    /// Field of view in radians.
    pub fov: f32,
    /// Aspect ratio (width / height).
    pub aspect_ratio: f32,
    /// Near clipping plane.
    pub near: f32,
    /// Far clipping plane.
    pub far: f32,
}

impl Camera {
    /// Creates a new camera with default settings.
    #[must_use]
    pub fn new(aspect_ratio: f32) -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 3.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov: std::f32::consts::FRAC_PI_4, // 45 degrees
            aspect_ratio,
            near: 0.01,
            far: 1000.0,
        }
    }

    /// Sets the aspect ratio.
    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.aspect_ratio = aspect_ratio;
    }

    /// Returns the view matrix.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    /// Returns the projection matrix.
    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect_ratio, self.near, self.far)
    }

    /// Returns the combined view-projection matrix.
    #[must_use]
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Returns the camera's forward direction.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize()
    }

    /// Returns the camera's right direction.
    #[must_use]
    pub fn right(&self) -> Vec3 {
        self.forward().cross(self.up).normalize()
    }

    /// Orbits the camera around the target (turntable style, constrained to up).
    pub fn orbit(&mut self, delta_x: f32, delta_y: f32) {
        let radius = (self.position - self.target).length();
        let mut theta = (self.position.x - self.target.x).atan2(self.position.z - self.target.z);
        let mut phi = ((self.position.y - self.target.y) / radius).acos();

        theta -= delta_x;
        phi = (phi - delta_y).clamp(0.01, std::f32::consts::PI - 0.01);

        self.position = self.target
            + Vec3::new(
                radius * phi.sin() * theta.sin(),
                radius * phi.cos(),
                radius * phi.sin() * theta.cos(),
            );
    }

    /// Pans the camera and its target in the view plane.
    pub fn pan(&mut self, delta_x: f32, delta_y: f32) {
        let right = self.right();
        let up = self.up;
        let offset = right * delta_x + up * delta_y;
        self.position += offset;
        self.target += offset;
    }

    /// Zooms the camera toward/away from the target.
    pub fn zoom(&mut self, delta: f32) {
        let direction = self.forward();
        let distance = (self.position - self.target).length();
        let new_distance = (distance - delta).max(0.1);
        self.position = self.target - direction * new_distance;
    }

    /// Resets the camera to frame the given bounding box.
    ///
    /// A degenerate box (a single point) is floored to a small size so the
    /// view and projection matrices stay finite.
    pub fn look_at_box(&mut self, min: Vec3, max: Vec3) {
        let center = (min + max) * 0.5;
        let size = (max - min).length().max(0.1);

        self.target = center;
        self.position = center + Vec3::new(0.0, 0.0, size * 1.5);
        self.near = size * 0.001;
        self.far = size * 100.0;
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(16.0 / 9.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_defaults() {
        let camera = Camera::default();
        assert_eq!(camera.up, Vec3::Y);
        assert!((camera.fov - std::f32::consts::FRAC_PI_4).abs() < 1e-6);
    }

    #[test]
    fn test_zoom_decreases_distance() {
        let mut camera = Camera::new(1.0);
        camera.position = Vec3::new(0.0, 0.0, 5.0);
        camera.target = Vec3::ZERO;

        let initial_distance = camera.position.distance(camera.target);
        camera.zoom(1.0);
        let new_distance = camera.position.distance(camera.target);

        assert!(new_distance < initial_distance);
    }

    #[test]
    fn test_zoom_never_passes_target() {
        let mut camera = Camera::new(1.0);
        camera.position = Vec3::new(0.0, 0.0, 0.5);
        camera.target = Vec3::ZERO;
        camera.zoom(10.0);
        assert!(camera.position.distance(camera.target) >= 0.1);
    }

    #[test]
    fn test_orbit_preserves_radius() {
        let mut camera = Camera::new(1.0);
        camera.position = Vec3::new(0.0, 1.0, 5.0);
        camera.target = Vec3::ZERO;

        let radius = camera.position.distance(camera.target);
        camera.orbit(0.3, -0.2);
        let new_radius = camera.position.distance(camera.target);

        assert!((radius - new_radius).abs() < 1e-4);
    }

    #[test]
    fn test_pan_moves_target_with_position() {
        let mut camera = Camera::new(1.0);
        let offset_before = camera.position - camera.target;
        camera.pan(0.5, -0.25);
        let offset_after = camera.position - camera.target;
        assert!((offset_before - offset_after).length() < 1e-6);
    }

    #[test]
    fn test_look_at_single_point_box_stays_finite() {
        let p = Vec3::splat(2.0);
        let mut camera = Camera::new(1.0);
        camera.look_at_box(p, p);

        assert_eq!(camera.target, p);
        assert!(camera.position.distance(camera.target) > 0.0);
        assert!(camera.near > 0.0 && camera.near < camera.far);
        assert!(!camera.view_matrix().is_nan());
        assert!(!camera.projection_matrix().is_nan());
    }

    #[test]
    fn test_look_at_box_frames_center() {
        let mut camera = Camera::new(1.0);
        camera.look_at_box(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(3.0, 3.0, 3.0));
        assert_eq!(camera.target, Vec3::new(1.0, 1.0, 1.0));
        assert!(camera.position.z > camera.target.z);
        assert!(camera.far > camera.near);
    }
}
