//! End-to-end tests against the global context.
//!
//! The context is a process-wide singleton, so everything runs in one test
//! function to avoid ordering issues between parallel tests.

use sparseview::{SparseviewError, Vec3, Workspace};

const WORKSPACE_JSON: &str = r#"{
    "points": [
        {"x": 0.0, "y": 0.0, "z": 0.0, "r": 255, "g": 0, "b": 0},
        {"x": 1.0, "y": 2.0, "z": 3.0, "r": 0, "g": 255, "b": 0},
        {"x": -1.0, "y": 0.5, "z": 2.0, "r": 0, "g": 0, "b": 255}
    ],
    "images": {
        "frame_002.jpg": {"qw": 1.0, "qx": 0.0, "qy": 0.0, "qz": 0.0,
                          "tx": 0.0, "ty": 0.0, "tz": -4.0},
        "frame_001.jpg": {"qw": 1.0, "qx": 0.0, "qy": 0.0, "qz": 0.0,
                          "tx": 1.0, "ty": 0.0, "tz": -4.0}
    }
}"#;

fn cloud_count() -> usize {
    sparseview::with_context(|ctx| ctx.registry.count_of_type("PointCloud"))
}

fn marker_count() -> usize {
    sparseview::with_context(|ctx| ctx.registry.count_of_type("CameraMarker"))
}

#[test]
fn lifecycle_registration_and_workspace_loading() {
    sparseview::init().unwrap();
    assert!(sparseview::is_initialized());

    // Double init is an error.
    assert!(matches!(
        sparseview::init(),
        Err(SparseviewError::AlreadyInitialized)
    ));

    // Direct registration
    let points = vec![Vec3::ZERO, Vec3::X, Vec3::Y];
    let colors = vec![Vec3::ONE; 3];
    let handle = sparseview::register_point_cloud("cloud", points.clone(), colors).unwrap();
    assert_eq!(handle.name, "cloud");
    assert!(sparseview::get_point_cloud("cloud").is_some());
    assert!(sparseview::get_point_cloud("missing").is_none());

    // Mismatched lengths are rejected.
    assert!(matches!(
        sparseview::register_point_cloud("bad", points.clone(), vec![Vec3::ONE; 2]),
        Err(SparseviewError::SizeMismatch {
            expected: 3,
            actual: 2
        })
    ));

    // Duplicate names are rejected.
    assert!(matches!(
        sparseview::register_point_cloud("cloud", points, vec![Vec3::ONE; 3]),
        Err(SparseviewError::StructureExists(_))
    ));

    // Loading a workspace replaces the whole scene.
    let workspace: Workspace = serde_json::from_str(WORKSPACE_JSON).unwrap();
    let summary = sparseview::apply_workspace("demo", &workspace).unwrap();
    assert_eq!(summary.num_points, 3);
    assert_eq!(summary.num_markers, 2);
    assert_eq!(cloud_count(), 1);
    assert_eq!(marker_count(), 2);
    assert!(sparseview::get_point_cloud("demo/points").is_some());
    assert!(sparseview::get_camera_marker("demo/camera/frame_001.jpg").is_some());
    assert!(sparseview::get_camera_marker("demo/camera/frame_002.jpg").is_some());
    // The directly registered cloud is gone.
    assert!(sparseview::get_point_cloud("cloud").is_none());

    // Loading again does not accumulate structures.
    sparseview::apply_workspace("demo", &workspace).unwrap();
    assert_eq!(cloud_count(), 1);
    assert_eq!(marker_count(), 2);

    // A workspace with no points registers no cloud.
    let empty: Workspace = serde_json::from_str(r#"{"images": {}}"#).unwrap();
    let summary = sparseview::apply_workspace("empty", &empty).unwrap();
    assert_eq!(summary.num_points, 0);
    assert_eq!(summary.num_markers, 0);
    assert_eq!(cloud_count(), 0);
    assert_eq!(marker_count(), 0);

    // Scene extents follow the loaded data.
    sparseview::apply_workspace("demo", &workspace).unwrap();
    let (min, max) = sparseview::with_context(|ctx| ctx.bounding_box);
    assert!(min.x <= -1.0 && max.x >= 1.0);
    // Camera centers (at -t for identity rotation) extend the box to z=4.
    assert!(max.z >= 4.0);

    // Display options are the single source of truth for sizes.
    sparseview::set_all_point_radii(0.02);
    sparseview::set_all_marker_scales(0.2);
    sparseview::with_context(|ctx| {
        assert_eq!(ctx.options.point_radius, 0.02);
        assert_eq!(ctx.options.marker_scale, 0.2);
        let pc = ctx.registry.get("PointCloud", "demo/points").unwrap();
        let pc = pc.as_any().downcast_ref::<sparseview::PointCloud>().unwrap();
        assert_eq!(pc.point_radius(), 0.02);
    });

    // Extents freeze while auto-compute is disabled.
    sparseview::with_context_mut(|ctx| ctx.options.auto_compute_scene_extents = false);
    sparseview::register_point_cloud("far", vec![Vec3::splat(100.0)], vec![Vec3::ONE]).unwrap();
    let (_, max) = sparseview::with_context(|ctx| ctx.bounding_box);
    assert!(max.x < 100.0);
    sparseview::with_context_mut(|ctx| {
        ctx.options.auto_compute_scene_extents = true;
        ctx.update_extents();
    });
    let (_, max) = sparseview::with_context(|ctx| ctx.bounding_box);
    assert!(max.x >= 100.0);
    sparseview::remove_structure("far");

    // A workspace that collapses to a single point keeps a usable scale.
    let single: Workspace = serde_json::from_str(
        r#"{"points": [{"x": 2.0, "y": 2.0, "z": 2.0, "r": 255, "g": 255, "b": 255}]}"#,
    )
    .unwrap();
    sparseview::apply_workspace("single", &single).unwrap();
    let (bbox, length_scale) =
        sparseview::with_context(|ctx| (ctx.bounding_box, ctx.length_scale));
    assert_eq!(bbox.0, bbox.1);
    assert!(length_scale > 0.0);

    sparseview::apply_workspace("demo", &workspace).unwrap();
    sparseview::remove_structure("demo/camera/frame_001.jpg");
    assert_eq!(marker_count(), 1);

    sparseview::remove_all_structures();
    assert_eq!(cloud_count(), 0);
    assert_eq!(marker_count(), 0);

    sparseview::shutdown();
    assert!(!sparseview::is_initialized());
}
