use skel_infer::{smooth, Frame, InferError, Joint, DEFAULT_SMOOTHING_ALPHA};

fn frame(joints: &[(f32, f32, f32)]) -> Frame {
    joints.iter().map(|&(x, y, c)| Joint::new(x, y, c)).collect::<Vec<_>>().into()
}

#[test]
fn test_default_alpha() {
    assert_eq!(DEFAULT_SMOOTHING_ALPHA, 0.7);
}

#[test]
fn test_smooth_without_previous_is_identity() {
    let current = frame(&[(10.0, 20.0, 0.9), (30.0, 40.0, 0.1)]);
    assert_eq!(smooth(&current, None, 0.7).unwrap(), current);
}

#[test]
fn test_smooth_alpha_one_is_current() {
    let current = frame(&[(10.0, 20.0, 0.9)]);
    let previous = frame(&[(50.0, 60.0, 0.2)]);
    assert_eq!(smooth(&current, Some(&previous), 1.0).unwrap(), current);
}

#[test]
fn test_smooth_blends_positions() {
    let current = frame(&[(100.0, 100.0, 0.9)]);
    let previous = frame(&[(90.0, 90.0, 0.9)]);
    let out = smooth(&current, Some(&previous), 0.7).unwrap();
    assert!((out.joints[0].position.x - 97.0).abs() < 1e-4);
    assert!((out.joints[0].position.y - 97.0).abs() < 1e-4);
    assert_eq!(out.joints[0].confidence, 0.9);
}

#[test]
fn test_smooth_does_not_damp_confidence() {
    let current = frame(&[(0.0, 0.0, 0.1)]);
    let previous = frame(&[(0.0, 0.0, 0.95)]);
    let out = smooth(&current, Some(&previous), 0.3).unwrap();
    assert_eq!(out.joints[0].confidence, 0.1);
}

#[test]
fn test_smooth_length_mismatch_passes_through() {
    let current = frame(&[(1.0, 1.0, 0.9), (2.0, 2.0, 0.9)]);
    let previous = frame(&[(5.0, 5.0, 0.9)]);
    assert_eq!(smooth(&current, Some(&previous), 0.7).unwrap(), current);
}

#[test]
fn test_smooth_empty_current_after_full_previous() {
    let previous = frame(&[(5.0, 5.0, 0.9)]);
    assert!(smooth(&Frame::empty(), Some(&previous), 0.7).unwrap().is_empty());
}

#[test]
fn test_smooth_rejects_alpha_outside_range() {
    let current = frame(&[(1.0, 1.0, 0.9)]);
    for alpha in [0.0, -0.5, 1.0001, f32::NAN] {
        assert!(matches!(
            smooth(&current, None, alpha),
            Err(InferError::InvalidAlpha(_))
        ));
    }
}
