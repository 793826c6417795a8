use skel_infer::{COCO_KEYPOINT_COUNT, COCO_SCHEMA, CoordinateSpace, RawKeypoint, RawKeypoints};
use skel_base::Vec2;
use skel_overlay::{OverlayConfig, OverlayPipeline, OverlaySink};

mod overlay {
    include!("../src/overlay.rs");
}

use overlay::*;

fn tick_output() -> skel_overlay::TickOutput {
    let config = OverlayConfig::default().with_canvas(40, 40).with_joint_radius(2.0).with_opacity(1.0);
    let mut pipeline = OverlayPipeline::new(&COCO_SCHEMA, &config).unwrap();
    let raw = RawKeypoints::new(
        vec![RawKeypoint { x: 0.5, y: 0.5, confidence: 1.0 }; COCO_KEYPOINT_COUNT],
        CoordinateSpace::Normalized,
    );
    pipeline.process(&raw, Vec2::new(1.0, 1.0)).unwrap()
}

#[test]
fn test_shared_overlay_tracks_latest_tick() {
    let overlay = SharedOverlay::default();
    assert_eq!(overlay.latest().0, 0);
    assert!(overlay.latest().1.is_none());

    let mut sink = overlay.clone();
    let output = tick_output();
    sink.present(&output);
    sink.present(&output);

    let (seq, latest) = overlay.latest();
    assert_eq!(seq, 2);
    assert_eq!(latest, Some(output));
}

#[test]
fn test_compose_paints_over_background() {
    let background = vec![0u8; 40 * 40 * 3];
    let output = tick_output();

    let plain = compose(&background, 40, 40, None).unwrap();
    assert!(plain.data().iter().all(|&b| b == 0));

    let painted = compose(&background, 40, 40, Some(&output)).unwrap();
    // the last marker drawn at the shared center is the right ankle
    assert_eq!(painted.pixel(20, 20), Some([0xDD, 0xA0, 0xDD]));
    assert_eq!(painted.pixel(0, 0), Some([0, 0, 0]));
}

#[test]
fn test_compose_rejects_mismatched_background() {
    assert!(compose(&[0u8; 12], 40, 40, None).is_err());
}
