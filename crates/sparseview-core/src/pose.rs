//! Extrinsic-pose math.
//!
//! Poses follow the usual SfM convention: `x_cam = R * x_world + t`, with the
//! camera looking down +z and image y pointing down. The rotation is given as
//! a unit quaternion (w, x, y, z).

use glam::{Mat3, Vec3};

use crate::workspace::ImagePose;

/// Builds the world-to-camera rotation matrix from the pose quaternion.
///
/// The quaternion is normalized first, so slightly denormalized input (as
/// produced by float round-tripping through JSON) still yields an orthonormal
/// matrix.
pub fn rotation_from_quaternion(pose: &ImagePose) -> Mat3 {
    let norm = (pose.qw * pose.qw + pose.qx * pose.qx + pose.qy * pose.qy + pose.qz * pose.qz)
        .sqrt()
        .max(f32::EPSILON);
    let w = pose.qw / norm;
    let x = pose.qx / norm;
    let y = pose.qy / norm;
    let z = pose.qz / norm;

    Mat3::from_cols(
        Vec3::new(
            1.0 - 2.0 * (y * y + z * z),
            2.0 * (x * y + w * z),
            2.0 * (x * z - w * y),
        ),
        Vec3::new(
            2.0 * (x * y - w * z),
            1.0 - 2.0 * (x * x + z * z),
            2.0 * (y * z + w * x),
        ),
        Vec3::new(
            2.0 * (x * z + w * y),
            2.0 * (y * z - w * x),
            1.0 - 2.0 * (x * x + y * y),
        ),
    )
}

/// World-space camera center, `c = -R^T * t`.
///
/// `R` is orthonormal, so its inverse is the transpose.
pub fn camera_center(pose: &ImagePose) -> Vec3 {
    let r = rotation_from_quaternion(pose);
    -(r.transpose() * pose.translation())
}

/// World-space viewing direction of the camera (`R^T * ẑ`).
pub fn look_dir(pose: &ImagePose) -> Vec3 {
    rotation_from_quaternion(pose).transpose() * Vec3::Z
}

/// World-space up direction of the camera (`R^T * -ŷ`, image y points down).
pub fn up_dir(pose: &ImagePose) -> Vec3 {
    rotation_from_quaternion(pose).transpose() * Vec3::NEG_Y
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Quat;
    use proptest::prelude::*;

    fn pose(qw: f32, qx: f32, qy: f32, qz: f32, t: Vec3) -> ImagePose {
        ImagePose {
            qw,
            qx,
            qy,
            qz,
            tx: t.x,
            ty: t.y,
            tz: t.z,
        }
    }

    #[test]
    fn identity_rotation_center_is_negated_translation() {
        let p = pose(1.0, 0.0, 0.0, 0.0, Vec3::new(1.0, -2.0, 3.0));
        let c = camera_center(&p);
        assert!((c - Vec3::new(-1.0, 2.0, -3.0)).length() < 1e-6);
    }

    #[test]
    fn rotation_matches_glam() {
        let q = Quat::from_axis_angle(Vec3::new(1.0, 2.0, -0.5).normalize(), 1.2);
        let p = pose(q.w, q.x, q.y, q.z, Vec3::ZERO);
        let ours = rotation_from_quaternion(&p);
        let theirs = Mat3::from_quat(q);
        for col in 0..3 {
            assert!((ours.col(col) - theirs.col(col)).length() < 1e-5);
        }
    }

    #[test]
    fn identity_pose_looks_down_positive_z() {
        let p = pose(1.0, 0.0, 0.0, 0.0, Vec3::ZERO);
        assert!((look_dir(&p) - Vec3::Z).length() < 1e-6);
        assert!((up_dir(&p) - Vec3::NEG_Y).length() < 1e-6);
    }

    proptest! {
        /// Projecting the derived center through the pose lands at the
        /// camera-frame origin: R*c + t == 0.
        #[test]
        fn center_projects_to_origin(
            ax in -1.0f32..1.0,
            ay in -1.0f32..1.0,
            az in -1.0f32..1.0,
            angle in -3.1f32..3.1,
            tx in -100.0f32..100.0,
            ty in -100.0f32..100.0,
            tz in -100.0f32..100.0,
        ) {
            let axis = Vec3::new(ax, ay, az);
            prop_assume!(axis.length() > 1e-3);
            let q = Quat::from_axis_angle(axis.normalize(), angle);
            let t = Vec3::new(tx, ty, tz);
            let p = pose(q.w, q.x, q.y, q.z, t);

            let r = rotation_from_quaternion(&p);
            let c = camera_center(&p);
            let residual = r * c + t;
            prop_assert!(residual.length() < 1e-3 * (1.0 + t.length()));
        }

        /// The hand-built matrix stays orthonormal for any unit quaternion.
        #[test]
        fn rotation_is_orthonormal(
            ax in -1.0f32..1.0,
            ay in -1.0f32..1.0,
            az in -1.0f32..1.0,
            angle in -3.1f32..3.1,
        ) {
            let axis = Vec3::new(ax, ay, az);
            prop_assume!(axis.length() > 1e-3);
            let q = Quat::from_axis_angle(axis.normalize(), angle);
            let p = pose(q.w, q.x, q.y, q.z, Vec3::ZERO);

            let r = rotation_from_quaternion(&p);
            let should_be_identity = r * r.transpose();
            for col in 0..3 {
                let expected = Mat3::IDENTITY.col(col);
                prop_assert!((should_be_identity.col(col) - expected).length() < 1e-4);
            }
        }
    }
}
