use crate::{
    config::SnapConfig,
    foundation::{
        core::{Canvas, Point},
        math::is_positive_finite,
    },
    scene::object::SceneObject,
};

/// Horizontal center snap rule for one canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CenterSnap {
    /// Half-width of the band around the canvas center line, in canvas pixels.
    pub zone: f64,
    /// X of the canvas center line.
    pub center_x: f64,
}

impl CenterSnap {
    /// Rule with `zone = canvas_width / divisor`, or `zone_override` when it is finite
    /// and > 0.
    pub fn for_canvas(canvas: Canvas, divisor: f64, zone_override: Option<f64>) -> Self {
        let zone = zone_override
            .filter(|z| is_positive_finite(*z))
            .unwrap_or_else(|| f64::from(canvas.width) / divisor);
        Self {
            zone,
            center_x: canvas.center_x(),
        }
    }

    /// Pull the object's center onto the vertical center line when it is inside the zone.
    ///
    /// Returns `true` when the object was moved. Outside the zone the object is not touched
    /// at all, so repeated calls on a resting object are free of side effects.
    pub fn apply(&self, obj: &mut dyn SceneObject) -> bool {
        let Some(center) = obj.center_point() else {
            return false;
        };
        let dx = self.center_x - center.x;
        let inside = dx.abs() < self.zone;
        if !dx.is_finite() || !inside {
            return false;
        }
        if dx == 0.0 {
            return false;
        }

        let p = obj.position();
        obj.set_position(Point::new(p.x + dx, p.y));
        obj.set_coords();
        true
    }
}

/// One-shot center snap of `target` on a canvas.
///
/// `None` targets and objects that cannot report a center are ignored.
pub fn snap_to_center(
    target: Option<&mut dyn SceneObject>,
    canvas: Canvas,
    zone: Option<f64>,
) -> bool {
    let Some(obj) = target else {
        return false;
    };
    if obj.role().is_protected() {
        return false;
    }
    CenterSnap::for_canvas(canvas, SnapConfig::default().center_zone_divisor, zone).apply(obj)
}

#[cfg(test)]
#[path = "../../tests/unit/snap/center.rs"]
mod tests;
