//! A synthetic reconstruction rendered without a backend: a colored sphere of
//! points ringed by camera markers looking inward.
//!
//! Run with: cargo run --example synthetic_scene

use sparseview::{ImagePose, Quat, Vec3};

fn main() -> sparseview::Result<()> {
    env_logger::init();
    sparseview::init()?;

    // Fibonacci sphere, colored by position
    let n = 5000;
    let mut points = Vec::with_capacity(n);
    let mut colors = Vec::with_capacity(n);
    let golden_angle = std::f32::consts::PI * (3.0 - 5.0_f32.sqrt());
    #[allow(clippy::cast_precision_loss)]
    for i in 0..n {
        let t = (i as f32 + 0.5) / n as f32;
        let y = 1.0 - 2.0 * t;
        let radius = (1.0 - y * y).sqrt();
        let theta = golden_angle * i as f32;
        let p = Vec3::new(radius * theta.cos(), y, radius * theta.sin());
        points.push(p);
        colors.push((p + Vec3::ONE) * 0.5);
    }
    sparseview::register_point_cloud("sphere", points, colors)?;

    // A ring of cameras at radius 3, each looking at the origin. The pose
    // convention maps world to camera space, so the rotation takes the
    // camera's viewing direction to +z and t = -R * center.
    let num_cameras = 12;
    #[allow(clippy::cast_precision_loss)]
    for i in 0..num_cameras {
        let angle = std::f32::consts::TAU * i as f32 / num_cameras as f32;
        let center = Vec3::new(3.0 * angle.cos(), 0.5, 3.0 * angle.sin());

        let look = (-center).normalize();
        let rotation = Quat::from_rotation_arc(look, Vec3::Z);
        let t = -(rotation * center);

        let pose = ImagePose {
            qw: rotation.w,
            qx: rotation.x,
            qy: rotation.y,
            qz: rotation.z,
            tx: t.x,
            ty: t.y,
            tz: t.z,
        };
        sparseview::register_camera_marker(format!("cam_{i:02}"), pose)?;
    }

    sparseview::show();
    Ok(())
}
