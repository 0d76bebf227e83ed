use crate::{
    config::SnapConfig,
    foundation::{
        core::{Point, Vec2},
        math::{circular_distance, normalize_degrees},
    },
    scene::object::SceneObject,
};

/// Angles a rotating object is pulled onto, in tie-break order.
pub const CARDINAL_ANGLES: [f64; 4] = [0.0, 90.0, 180.0, 270.0];

/// Snap bookkeeping for one in-progress rotation gesture.
///
/// Only used to decide whether a snap is "new" (for one-time diagnostics); the geometric
/// correction is applied on every frame regardless.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SnapMemo {
    /// Angle the object is currently held at.
    pub snapped_to: Option<f64>,
}

impl SnapMemo {
    /// Whether a snap is active.
    pub fn is_snapped(&self) -> bool {
        self.snapped_to.is_some()
    }
}

/// Result of one rotation snap evaluation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RotationSnapOutcome {
    /// Target missing, protected, or without a center query.
    Skipped,
    /// Outside tolerance; nothing was touched.
    Unsnapped,
    /// Held at a right angle this frame.
    Snapped {
        /// Cardinal angle the object now has.
        angle: f64,
        /// `true` only on the frame that entered this snapped state.
        entered: bool,
        /// Position correction applied to keep the visual center fixed.
        shift: Vec2,
    },
}

/// Closest cardinal angle to `deg` and its circular distance. Ties go to the earlier
/// candidate in [`CARDINAL_ANGLES`].
pub fn nearest_cardinal(deg: f64) -> (f64, f64) {
    let normalized = normalize_degrees(deg);
    let mut best = (CARDINAL_ANGLES[0], circular_distance(normalized, CARDINAL_ANGLES[0]));
    for &candidate in &CARDINAL_ANGLES[1..] {
        let d = circular_distance(normalized, candidate);
        if d < best.1 {
            best = (candidate, d);
        }
    }
    best
}

/// Pull the object's rotation onto the nearest right angle when within `tolerance_deg`,
/// preserving the visual center.
///
/// The center correction is measured, not derived: the center is queried before and after
/// the angle assignment and the position is shifted by the difference. That keeps the
/// correction right whatever anchor the scene library rotates about.
pub fn snap_rotation(
    target: Option<&mut dyn SceneObject>,
    tolerance_deg: f64,
    memo: &mut SnapMemo,
) -> RotationSnapOutcome {
    let Some(obj) = target else {
        return RotationSnapOutcome::Skipped;
    };
    if obj.role().is_protected() {
        return RotationSnapOutcome::Skipped;
    }
    let Some(center_before) = obj.center_point() else {
        return RotationSnapOutcome::Skipped;
    };

    let current = obj.rotation_degrees();
    if !current.is_finite() {
        return RotationSnapOutcome::Skipped;
    }

    let (angle, distance) = nearest_cardinal(current);
    // NaN tolerance compares false here and reads as "outside".
    let within = distance <= tolerance_deg;
    if !within {
        if let Some(prev) = memo.snapped_to.take() {
            tracing::debug!(id = obj.id().0, from = prev, "rotation snap released");
        }
        return RotationSnapOutcome::Unsnapped;
    }

    obj.set_rotation_degrees(angle);
    let center_after = obj.center_point().unwrap_or(center_before);
    let shift = center_before - center_after;
    let p = obj.position();
    obj.set_position(Point::new(p.x + shift.x, p.y + shift.y));
    obj.set_coords();

    let entered = memo.snapped_to != Some(angle);
    if entered {
        memo.snapped_to = Some(angle);
        tracing::debug!(id = obj.id().0, angle, "rotation snapped");
    }

    RotationSnapOutcome::Snapped {
        angle,
        entered,
        shift,
    }
}

/// [`snap_rotation`] with the default tolerance and a throwaway memo.
pub fn snap_rotation_once(target: Option<&mut dyn SceneObject>) -> RotationSnapOutcome {
    let mut memo = SnapMemo::default();
    snap_rotation(
        target,
        SnapConfig::default().rotation_tolerance_deg,
        &mut memo,
    )
}

#[cfg(test)]
#[path = "../../tests/unit/snap/rotation.rs"]
mod tests;
