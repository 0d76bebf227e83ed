use super::*;
use crate::foundation::core::{Point, Size};
use crate::scene::{
    object::{AxisLock, ObjectKind, ObjectRole, PlacedObject},
    testing::{Recording, user_box},
};

fn hub() -> GestureHub {
    GestureHub::new(Canvas::new(1000, 1000).unwrap(), SnapConfig::default())
}

#[test]
fn unregistered_hub_ignores_everything() {
    let mut h = hub();
    let mut obj = Recording::new(user_box(440.0, 0.0, 100.0, 100.0).with_angle(1.0));
    assert_eq!(h.on_object_moving(Some(&mut obj)), GestureOutcome::Ignored);
    assert_eq!(h.on_object_rotating(Some(&mut obj)), GestureOutcome::Ignored);
    assert_eq!(obj.mutations, 0);
}

#[test]
fn registration_is_idempotent() {
    let mut h = hub();
    h.apply_snap(None);
    h.apply_snap(None);
    h.apply_rotation_snap(None);
    h.apply_rotation_snap(None);

    let mut obj = Recording::new(user_box(440.0, 0.0, 100.0, 100.0));
    let out = h.on_object_moving(Some(&mut obj));
    assert!(matches!(out, GestureOutcome::Moved { centered: true, .. }));
    // One snap means exactly one position write, not one per registration.
    assert_eq!(obj.mutations, 1);
}

#[test]
fn moving_runs_center_snap_for_user_content_only() {
    let mut h = hub();
    h.apply_snap(None);

    let mut logo = Recording::new(PlacedObject::new(
        ObjectKind::Image,
        ObjectRole::Logo,
        Point::new(440.0, 0.0),
        Size::new(100.0, 100.0),
    ));
    let out = h.on_object_moving(Some(&mut logo));
    assert!(matches!(out, GestureOutcome::Moved { centered: false, .. }));
    assert_eq!(logo.mutations, 0);
    assert_eq!(h.on_object_moving(None), GestureOutcome::Ignored);
}

#[test]
fn zone_override_and_template_reset() {
    let mut h = hub();
    h.apply_snap(Some(5.0));
    assert_eq!(h.center_rule().unwrap().zone, 5.0);

    h.apply_snap(None);
    assert_eq!(h.center_rule().unwrap().zone, 50.0);
    h.reset_template(Canvas::new(2000, 500).unwrap(), None);
    let rule = h.center_rule().unwrap();
    assert_eq!(rule.zone, 100.0);
    assert_eq!(rule.center_x, 1000.0);
}

#[test]
fn moving_background_applies_containment() {
    let mut h = hub();
    h.apply_snap(None);
    h.apply_containment(ContentRegion::new(0.0, 0.0, 1000.0, 600.0).unwrap());

    let mut bg = Recording::new(PlacedObject::background(
        Point::new(0.0, 40.0),
        Size::new(1000.0, 1500.0),
        1.0,
        AxisLock { x: true, y: false },
    ));
    let out = h.on_object_moving(Some(&mut bg));
    let GestureOutcome::Moved { centered, clamp } = out else {
        panic!("expected a move outcome, got {out:?}");
    };
    assert!(!centered);
    assert!(clamp.pinned_top);
    assert_eq!(bg.position(), Point::new(0.0, 0.0));
}

#[test]
fn rotation_memo_lives_for_the_gesture() {
    let mut h = hub();
    h.apply_rotation_snap(None);
    let mut obj = Recording::new(user_box(100.0, 100.0, 50.0, 20.0).with_angle(179.0));
    let id = obj.id();

    let out = h.on_object_rotating(Some(&mut obj));
    assert!(matches!(
        out,
        GestureOutcome::Rotated(RotationSnapOutcome::Snapped { entered: true, .. })
    ));
    assert!(h.is_snapped(id));

    obj.inner.angle = 181.0;
    let out = h.on_object_rotating(Some(&mut obj));
    assert!(matches!(
        out,
        GestureOutcome::Rotated(RotationSnapOutcome::Snapped { entered: false, .. })
    ));

    h.on_gesture_end(id);
    assert!(!h.is_snapped(id));
}

#[test]
fn leaving_tolerance_drops_memo() {
    let mut h = hub();
    h.apply_rotation_snap(Some(1.0));
    let mut obj = Recording::new(user_box(0.0, 0.0, 50.0, 20.0).with_angle(0.5));
    let id = obj.id();
    h.on_object_rotating(Some(&mut obj));
    assert!(h.is_snapped(id));

    obj.inner.angle = 1.5;
    assert_eq!(
        h.on_object_rotating(Some(&mut obj)),
        GestureOutcome::Rotated(RotationSnapOutcome::Unsnapped)
    );
    assert!(!h.is_snapped(id));
}

#[test]
fn hubs_are_independent_per_canvas() {
    let mut small = GestureHub::new(Canvas::new(200, 200).unwrap(), SnapConfig::default());
    let mut large = hub();
    small.apply_snap(None);

    let mut obj = Recording::new(user_box(440.0, 0.0, 100.0, 100.0));
    // Not registered on the large canvas, so nothing happens there.
    assert_eq!(large.on_object_moving(Some(&mut obj)), GestureOutcome::Ignored);
    // On the small canvas the center line is at x = 100, far outside the 10px zone.
    assert!(matches!(
        small.on_object_moving(Some(&mut obj)),
        GestureOutcome::Moved { centered: false, .. }
    ));
    assert_eq!(obj.mutations, 0);
}

#[test]
fn nan_rotation_tolerance_uses_configured_default() {
    let mut h = hub();
    h.apply_rotation_snap(Some(f64::NAN));

    let mut far = Recording::new(user_box(100.0, 100.0, 80.0, 30.0).with_angle(40.0));
    let out = h.on_object_rotating(Some(&mut far));
    assert_eq!(out, GestureOutcome::Rotated(RotationSnapOutcome::Unsnapped));
    assert_eq!(far.inner.angle, 40.0);
    assert_eq!(far.mutations, 0);

    let mut near = Recording::new(user_box(100.0, 100.0, 80.0, 30.0).with_angle(1.5));
    let out = h.on_object_rotating(Some(&mut near));
    assert!(matches!(
        out,
        GestureOutcome::Rotated(RotationSnapOutcome::Snapped { angle, .. }) if angle == 0.0
    ));
}

#[test]
fn nan_zone_override_keeps_far_objects_in_place() {
    let mut h = hub();
    h.apply_snap(Some(f64::NAN));
    assert_eq!(h.center_rule().unwrap().zone, 50.0);

    // Center at x = 20 on a 1000px canvas.
    let mut obj = Recording::new(user_box(0.0, 0.0, 40.0, 40.0));
    let out = h.on_object_moving(Some(&mut obj));
    assert!(matches!(out, GestureOutcome::Moved { centered: false, .. }));
    assert_eq!(obj.inner.left, 0.0);
    assert_eq!(obj.mutations, 0);
}
