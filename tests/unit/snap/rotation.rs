use super::*;
use crate::foundation::core::Size;
use crate::scene::{
    object::{ObjectKind, ObjectRole, PlacedObject},
    testing::{Centerless, Recording, user_box},
};

fn assert_point_close(a: Point, b: Point) {
    assert!((a - b).hypot() < 1e-9, "{a:?} != {b:?}");
}

#[test]
fn nearest_cardinal_handles_wraparound() {
    assert_eq!(nearest_cardinal(-1.0), (0.0, 1.0));
    assert_eq!(nearest_cardinal(361.0), (0.0, 1.0));
    assert_eq!(nearest_cardinal(359.5).0, 0.0);
    assert_eq!(nearest_cardinal(91.0), (90.0, 1.0));
    assert_eq!(nearest_cardinal(-92.0), (270.0, 2.0));
}

#[test]
fn nearest_cardinal_ties_prefer_earlier_candidate() {
    assert_eq!(nearest_cardinal(45.0).0, 0.0);
    assert_eq!(nearest_cardinal(135.0).0, 90.0);
    assert_eq!(nearest_cardinal(315.0).0, 0.0);
}

#[test]
fn negative_and_overflowing_angles_snap_identically() {
    for deg in [-1.0, 359.0, 361.0, 719.0, -361.0] {
        let mut obj = user_box(100.0, 100.0, 80.0, 30.0).with_angle(deg);
        let out = snap_rotation_once(Some(&mut obj));
        assert!(
            matches!(out, RotationSnapOutcome::Snapped { angle, .. } if angle == 0.0),
            "{deg} -> {out:?}"
        );
        assert_eq!(obj.angle, 0.0);
    }
}

#[test]
fn snapping_preserves_visual_center() {
    for deg in [1.5, 88.2, 181.9, 268.0, -2.0] {
        let mut obj = user_box(300.0, 200.0, 120.0, 45.0).with_angle(deg);
        let before = obj.center_point().unwrap();
        let out = snap_rotation_once(Some(&mut obj));
        assert!(matches!(out, RotationSnapOutcome::Snapped { .. }), "{deg}");
        assert_point_close(obj.center_point().unwrap(), before);
    }
}

#[test]
fn tolerance_is_inclusive() {
    let mut obj = user_box(0.0, 0.0, 10.0, 10.0).with_angle(92.0);
    assert!(matches!(
        snap_rotation(Some(&mut obj), 2.0, &mut SnapMemo::default()),
        RotationSnapOutcome::Snapped { angle, .. } if angle == 90.0
    ));
}

#[test]
fn outside_tolerance_is_idempotent_and_mutation_free() {
    let mut obj = Recording::new(user_box(50.0, 50.0, 40.0, 20.0).with_angle(10.0));
    let mut memo = SnapMemo::default();
    for _ in 0..4 {
        assert_eq!(
            snap_rotation(Some(&mut obj), 2.0, &mut memo),
            RotationSnapOutcome::Unsnapped
        );
    }
    assert_eq!(obj.mutations, 0);
    assert_eq!(obj.coord_refreshes, 0);
    assert_eq!(obj.inner.angle, 10.0);
}

#[test]
fn memo_gates_only_the_entered_flag() {
    let mut obj = Recording::new(user_box(50.0, 50.0, 40.0, 20.0).with_angle(1.0));
    let mut memo = SnapMemo::default();

    let first = snap_rotation(Some(&mut obj), 2.0, &mut memo);
    assert!(matches!(first, RotationSnapOutcome::Snapped { entered: true, .. }));
    assert!(memo.is_snapped());

    // The user keeps dragging within tolerance; correction must still run.
    obj.inner.angle = 1.8;
    let refreshes = obj.coord_refreshes;
    let second = snap_rotation(Some(&mut obj), 2.0, &mut memo);
    assert!(matches!(second, RotationSnapOutcome::Snapped { entered: false, .. }));
    assert_eq!(obj.inner.angle, 0.0);
    assert_eq!(obj.coord_refreshes, refreshes + 1);

    // Leaving tolerance clears the memo.
    obj.inner.angle = 30.0;
    assert_eq!(
        snap_rotation(Some(&mut obj), 2.0, &mut memo),
        RotationSnapOutcome::Unsnapped
    );
    assert!(!memo.is_snapped());

    // Re-entering counts as a fresh snap.
    obj.inner.angle = 89.0;
    assert!(matches!(
        snap_rotation(Some(&mut obj), 2.0, &mut memo),
        RotationSnapOutcome::Snapped { entered: true, angle, .. } if angle == 90.0
    ));
}

#[test]
fn skips_missing_protected_and_centerless_targets() {
    let mut memo = SnapMemo::default();
    assert_eq!(
        snap_rotation(None, 2.0, &mut memo),
        RotationSnapOutcome::Skipped
    );

    let mut c = Centerless::new(Point::new(0.0, 0.0), 1.0);
    assert_eq!(
        snap_rotation(Some(&mut c), 2.0, &mut memo),
        RotationSnapOutcome::Skipped
    );
    assert_eq!(c.mutations, 0);

    let mut text = Recording::new(
        PlacedObject::new(
            ObjectKind::Text,
            ObjectRole::LogoText,
            Point::new(0.0, 0.0),
            Size::new(50.0, 10.0),
        )
        .with_angle(1.0),
    );
    assert_eq!(
        snap_rotation(Some(&mut text), 2.0, &mut memo),
        RotationSnapOutcome::Skipped
    );
    assert_eq!(text.mutations, 0);
}

#[test]
fn non_finite_angle_is_skipped() {
    let mut obj = user_box(0.0, 0.0, 10.0, 10.0).with_angle(f64::NAN);
    assert_eq!(
        snap_rotation_once(Some(&mut obj)),
        RotationSnapOutcome::Skipped
    );
}

#[test]
fn nan_tolerance_never_snaps() {
    let mut obj = Recording::new(user_box(100.0, 100.0, 80.0, 30.0).with_angle(1.0));
    let mut memo = SnapMemo::default();
    let out = snap_rotation(Some(&mut obj), f64::NAN, &mut memo);
    assert_eq!(out, RotationSnapOutcome::Unsnapped);
    assert_eq!(obj.inner.angle, 1.0);
    assert_eq!(obj.mutations, 0);
    assert!(!memo.is_snapped());
}
