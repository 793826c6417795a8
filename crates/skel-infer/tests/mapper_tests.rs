use skel_infer::{map_keypoints, AxisOrder, CoordinateSpace, RawKeypoint, RawKeypoints};

fn normalized(points: &[(f32, f32, f32)]) -> RawKeypoints {
    RawKeypoints::new(
        points
            .iter()
            .map(|&(x, y, confidence)| RawKeypoint { x, y, confidence })
            .collect(),
        CoordinateSpace::Normalized,
    )
}

#[test]
fn test_map_scales_normalized_points_to_canvas() {
    let raw = normalized(
        &(0..17)
            .map(|i| (i as f32 / 16.0, 1.0 - i as f32 / 16.0, 0.6))
            .collect::<Vec<_>>(),
    );
    let frame = map_keypoints(&raw, 192.0, 192.0, 390.0, 844.0);

    assert_eq!(frame.len(), 17);
    for (joint, point) in frame.iter().zip(&raw.points) {
        assert!((joint.position.x - point.x * 390.0).abs() < 1e-3);
        assert!((joint.position.y - point.y * 844.0).abs() < 1e-3);
        assert_eq!(joint.confidence, point.confidence);
    }
}

#[test]
fn test_map_empty_input_returns_empty_frame() {
    let frame = map_keypoints(&RawKeypoints::empty(), 192.0, 192.0, 640.0, 480.0);
    assert!(frame.is_empty());
}

#[test]
fn test_map_malformed_flat_buffer_returns_empty_frame() {
    let raw = RawKeypoints::from_flat(&[0.1, 0.2, 0.3, 0.4], AxisOrder::YxConfidence, CoordinateSpace::Normalized);
    assert!(raw.is_empty());
    assert!(map_keypoints(&raw, 1.0, 1.0, 640.0, 480.0).is_empty());
}

#[test]
fn test_map_does_not_clamp_out_of_bounds() {
    let raw = normalized(&[(1.5, -0.25, 0.9)]);
    let frame = map_keypoints(&raw, 1.0, 1.0, 100.0, 200.0);
    assert_eq!(frame.joints[0].position.x, 150.0);
    assert_eq!(frame.joints[0].position.y, -50.0);
}

#[test]
fn test_map_pixel_space_divides_by_source_size() {
    let raw = RawKeypoints::new(
        vec![RawKeypoint { x: 96.0, y: 48.0, confidence: 0.7 }],
        CoordinateSpace::Pixels,
    );
    let frame = map_keypoints(&raw, 192.0, 192.0, 400.0, 800.0);
    assert!((frame.joints[0].position.x - 200.0).abs() < 1e-3);
    assert!((frame.joints[0].position.y - 200.0).abs() < 1e-3);
}

#[test]
fn test_map_pixel_space_with_zero_source_is_empty() {
    let raw = RawKeypoints::new(
        vec![RawKeypoint { x: 1.0, y: 1.0, confidence: 0.7 }],
        CoordinateSpace::Pixels,
    );
    assert!(map_keypoints(&raw, 0.0, 192.0, 400.0, 800.0).is_empty());
}

#[test]
fn test_from_flat_unswaps_yx_order() {
    let raw = RawKeypoints::from_flat(
        &[0.25, 0.75, 0.9, 0.1, 0.2, 0.3],
        AxisOrder::YxConfidence,
        CoordinateSpace::Normalized,
    );
    assert_eq!(raw.len(), 2);
    assert_eq!(raw.points[0], RawKeypoint { x: 0.75, y: 0.25, confidence: 0.9 });
    assert_eq!(raw.points[1], RawKeypoint { x: 0.2, y: 0.1, confidence: 0.3 });

    let frame = map_keypoints(&raw, 1.0, 1.0, 100.0, 100.0);
    assert_eq!(frame.joints[0].position.x, 75.0);
    assert_eq!(frame.joints[0].position.y, 25.0);
}

#[test]
fn test_from_flat_keeps_xy_order() {
    let raw = RawKeypoints::from_flat(&[0.25, 0.75, 0.9], AxisOrder::XyConfidence, CoordinateSpace::Normalized);
    assert_eq!(raw.points[0], RawKeypoint { x: 0.25, y: 0.75, confidence: 0.9 });
}
