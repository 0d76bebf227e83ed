//! Cover-style panning of the template background inside its crop window.

use crate::{
    foundation::{
        core::{Rect, Size},
        error::{BrandkitError, BrandkitResult},
        math::is_positive_finite,
    },
    scene::object::{ObjectRole, SceneObject},
};

/// Crop window the background image must fill. Fixed for the lifetime of a template.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ContentRegion {
    /// Top edge in canvas pixels.
    pub top: f64,
    /// Left edge in canvas pixels.
    pub left: f64,
    /// Window width.
    pub width: f64,
    /// Window height.
    pub height: f64,
}

impl ContentRegion {
    /// Validated window: finite origin, positive finite size.
    pub fn new(top: f64, left: f64, width: f64, height: f64) -> BrandkitResult<Self> {
        if !top.is_finite() || !left.is_finite() {
            return Err(BrandkitError::validation(
                "content region origin must be finite",
            ));
        }
        if !is_positive_finite(width) || !is_positive_finite(height) {
            return Err(BrandkitError::validation(
                "content region width and height must be finite and > 0",
            ));
        }
        Ok(Self {
            top,
            left,
            width,
            height,
        })
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Right edge.
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// The window as a kurbo rectangle.
    pub fn to_rect(&self) -> Rect {
        Rect::new(self.left, self.top, self.right(), self.bottom())
    }
}

/// Size of the background once scaled to fill the region along each axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoverExtent {
    /// Height after scaling the image to the region width.
    pub related_height: f64,
    /// Width after scaling the image to the region height.
    pub related_width: f64,
}

impl CoverExtent {
    /// `None` when the natural size is not positive and finite.
    pub fn new(region: &ContentRegion, natural: Size) -> Option<Self> {
        if !is_positive_finite(natural.width) || !is_positive_finite(natural.height) {
            return None;
        }
        Some(Self {
            related_height: natural.height * (region.width / natural.width),
            related_width: natural.width * (region.height / natural.height),
        })
    }

    /// Whether the cover-scaled image is taller than the window.
    pub fn overflows_vertically(&self, region: &ContentRegion) -> bool {
        self.related_height > region.height
    }

    /// Whether the cover-scaled image is wider than the window.
    pub fn overflows_horizontally(&self, region: &ContentRegion) -> bool {
        self.related_width > region.width
    }
}

/// Which clamp rules fired during one move frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClampReport {
    /// Top edge was pulled up to the window top.
    pub pinned_top: bool,
    /// Left edge was pulled to the window left.
    pub pinned_left: bool,
    /// Bottom edge was pushed down to the window bottom.
    pub pinned_bottom: bool,
    /// Right edge was pushed out to the window right.
    pub pinned_right: bool,
}

impl ClampReport {
    /// Whether any rule fired.
    pub fn any(&self) -> bool {
        self.pinned_top || self.pinned_left || self.pinned_bottom || self.pinned_right
    }
}

/// Keep the background covering `region` while the user pans it.
///
/// The four edge rules are evaluated independently in order (top, left, bottom, right),
/// each against the position left by the previous rule. A rule only runs on an axis the
/// object is free to move along. Objects that are not the background, or that have no
/// usable natural size, are left alone.
pub fn clamp_background(
    target: Option<&mut dyn SceneObject>,
    region: &ContentRegion,
) -> ClampReport {
    let mut report = ClampReport::default();
    let Some(obj) = target else {
        return report;
    };
    if obj.role() != ObjectRole::Background {
        return report;
    }
    let Some(extent) = obj
        .natural_size()
        .and_then(|natural| CoverExtent::new(region, natural))
    else {
        return report;
    };

    let lock = obj.movement_lock();
    let start = obj.position();
    let mut pos = start;

    let vertical = !lock.y && extent.overflows_vertically(region);
    let horizontal = !lock.x && extent.overflows_horizontally(region);

    if vertical && pos.y > region.top {
        pos.y = region.top;
        report.pinned_top = true;
    }
    if horizontal && pos.x > region.left {
        pos.x = region.left;
        report.pinned_left = true;
    }

    let min_top = region.bottom() - extent.related_height;
    if vertical && pos.y < min_top {
        pos.y = min_top;
        report.pinned_bottom = true;
    }
    let min_left = region.right() - extent.related_width;
    if horizontal && pos.x < min_left {
        pos.x = min_left;
        report.pinned_right = true;
    }

    if pos != start {
        obj.set_position(pos);
        obj.set_coords();
    }
    report
}

#[cfg(test)]
#[path = "../tests/unit/containment/containment.rs"]
mod tests;
