// Host-side tests for asset framing.

use arview_core::*;
use glam::Vec3;

fn mesh(id: NodeId, min: [f32; 3], max: [f32; 3]) -> SceneNode {
    SceneNode {
        id,
        bounds: Some(Aabb::new(Vec3::from(min), Vec3::from(max))),
    }
}

fn group(id: NodeId) -> SceneNode {
    SceneNode { id, bounds: None }
}

#[test]
fn offset_box_is_centered_and_fit_to_target() {
    let n = normalize(&[mesh(0, [2.0, 4.0, 6.0], [6.0, 6.0, 7.0])]);
    assert_eq!(n.center, Vec3::new(4.0, 5.0, 6.5));
    assert_eq!(n.translation, -n.center);
    // largest axis is x (4 units) -> 2 / 4
    assert!((n.scale - 0.5).abs() < 1e-6);

    let lo = n.apply_point(Vec3::new(2.0, 4.0, 6.0));
    let hi = n.apply_point(Vec3::new(6.0, 6.0, 7.0));
    assert!((lo + hi).length() < 1e-5, "not centered: {lo:?} {hi:?}");
    assert!(((hi - lo).max_element() - TARGET_EXTENT).abs() < 1e-5);
}

#[test]
fn union_spans_all_meshes_and_skips_groups() {
    let n = normalize(&[
        group(0),
        mesh(1, [-1.0, 0.0, 0.0], [0.0, 1.0, 1.0]),
        group(2),
        mesh(3, [3.0, 0.0, 0.0], [4.0, 1.0, 1.0]),
    ]);
    assert_eq!(n.center, Vec3::new(1.5, 0.5, 0.5));
    assert!((n.scale - TARGET_EXTENT / 5.0).abs() < 1e-6);
    let ids: Vec<NodeId> = n.mesh_flags.iter().map(|f| f.node).collect();
    assert_eq!(ids, vec![1, 3]);
    assert!(n.mesh_flags.iter().all(|f| f.cast_shadow && f.receive_shadow));
}

#[test]
fn any_non_zero_dimension_gives_centered_finite_scale() {
    let boxes = [
        ([0.0, 0.0, 0.0], [1e-4, 0.0, 0.0]),
        ([-5.0, 2.0, 2.0], [-5.0, 9.0, 2.0]),
        ([1e3, 1e3, 1e3], [1e3, 1e3, 1.5e3]),
        ([-0.25, -0.1, -3.0], [0.25, 0.1, 3.0]),
        ([10.0, 20.0, 30.0], [11.0, 22.0, 33.0]),
    ];
    for (min, max) in boxes {
        let n = normalize(&[mesh(0, min, max)]);
        assert!(n.scale.is_finite() && n.scale > 0.0, "bad scale for {min:?}..{max:?}");
        let c = n.apply_point((Vec3::from(min) + Vec3::from(max)) * 0.5);
        assert!(c.length() < 1e-3, "center maps to {c:?}");
    }
}

#[test]
fn single_point_uses_fallback_extent() {
    let n = normalize(&[mesh(7, [3.0, 3.0, 3.0], [3.0, 3.0, 3.0])]);
    assert_eq!(n.center, Vec3::splat(3.0));
    assert_eq!(n.scale, TARGET_EXTENT / FALLBACK_EXTENT);
    assert_eq!(n.mesh_flags.len(), 1);
}

#[test]
fn empty_scene_uses_fallback_extent_at_origin() {
    let n = normalize(&[]);
    assert_eq!(n.center, Vec3::ZERO);
    assert_eq!(n.scale, TARGET_EXTENT / FALLBACK_EXTENT);
    assert!(n.mesh_flags.is_empty());

    let only_groups = normalize(&[group(0), group(1)]);
    assert_eq!(only_groups.center, Vec3::ZERO);
    assert_eq!(only_groups.scale, TARGET_EXTENT / FALLBACK_EXTENT);
}

#[test]
fn matrix_matches_apply_point() {
    let n = normalize(&[mesh(0, [-2.0, 1.0, 0.0], [2.0, 3.0, 1.0])]);
    let m = n.to_mat4();
    for p in [Vec3::ZERO, Vec3::new(2.0, 3.0, 1.0), Vec3::new(-1.0, 0.5, 7.0)] {
        let a = m.transform_point3(p);
        let b = n.apply_point(p);
        assert!((a - b).length() < 1e-5, "{a:?} != {b:?}");
    }
}

#[test]
fn custom_target_extent_is_respected_and_invalid_one_ignored() {
    let nodes = [mesh(0, [0.0, 0.0, 0.0], [4.0, 1.0, 1.0])];
    assert!((normalize_to(&nodes, 8.0).scale - 2.0).abs() < 1e-6);
    assert!((normalize_to(&nodes, 0.0).scale - TARGET_EXTENT / 4.0).abs() < 1e-6);
    assert!((normalize_to(&nodes, f32::NAN).scale - TARGET_EXTENT / 4.0).abs() < 1e-6);
}

#[test]
fn viewer_asset_frames_once_per_load() {
    let mut asset = ViewerAsset::new("models/chair.glb");
    assert!(asset.normalization().is_none());

    let first = asset.frame(&[mesh(0, [0.0, 0.0, 0.0], [1.0, 1.0, 1.0])], TARGET_EXTENT).clone();
    // Different nodes for the same load do not re-run the framing
    let second = asset.frame(&[mesh(0, [0.0, 0.0, 0.0], [9.0, 9.0, 9.0])], TARGET_EXTENT).clone();
    assert_eq!(first, second);

    assert!(!asset.replace("models/chair.glb"));
    assert!(asset.normalization().is_some());

    assert!(asset.replace("models/lamp.glb"));
    assert_eq!(asset.source(), "models/lamp.glb");
    assert!(asset.normalization().is_none());
    let third = asset.frame(&[mesh(0, [0.0, 0.0, 0.0], [9.0, 9.0, 9.0])], TARGET_EXTENT);
    assert!((third.scale - TARGET_EXTENT / 9.0).abs() < 1e-6);
}

#[test]
fn reload_of_same_source_frames_again() {
    let mut asset = ViewerAsset::new("models/chair.glb");
    asset.frame(&[mesh(0, [0.0, 0.0, 0.0], [1.0, 1.0, 1.0])], TARGET_EXTENT);

    asset.reload();
    assert_eq!(asset.source(), "models/chair.glb");
    assert!(asset.normalization().is_none());
    let again = asset.frame(&[mesh(0, [0.0, 0.0, 0.0], [4.0, 4.0, 4.0])], TARGET_EXTENT);
    assert!((again.scale - TARGET_EXTENT / 4.0).abs() < 1e-6);
}

#[test]
fn aabb_new_orders_corners() {
    let b = Aabb::new(Vec3::new(1.0, -1.0, 5.0), Vec3::new(-1.0, 1.0, 2.0));
    assert_eq!(b.min, Vec3::new(-1.0, -1.0, 2.0));
    assert_eq!(b.max, Vec3::new(1.0, 1.0, 5.0));
    assert!(!b.is_empty());
    assert!(Aabb::EMPTY.is_empty());
}
