use std::collections::HashMap;

use crate::{
    config::SnapConfig,
    containment::{ClampReport, ContentRegion, clamp_background},
    foundation::core::Canvas,
    scene::object::{ObjectId, SceneObject},
    snap::{
        center::CenterSnap,
        rotation::{RotationSnapOutcome, SnapMemo, snap_rotation},
    },
};

/// What a single gesture frame changed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureOutcome {
    /// No target, or no registered rule applied to it.
    Ignored,
    /// A move frame was processed.
    Moved {
        /// Center snap moved the object.
        centered: bool,
        /// Containment rules that fired.
        clamp: ClampReport,
    },
    /// A rotation frame was processed.
    Rotated(RotationSnapOutcome),
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct CenterRule {
    zone_override: Option<f64>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct RotationRule {
    tolerance_deg: f64,
}

/// Interaction corrections for one canvas.
///
/// The host owns one hub per canvas and forwards that canvas's `object:moving` and
/// `object:rotating` callbacks into it. Registering a rule twice replaces the earlier
/// registration, so re-running template setup does not stack handlers.
#[derive(Clone, Debug)]
pub struct GestureHub {
    canvas: Canvas,
    config: SnapConfig,
    center: Option<CenterRule>,
    rotation: Option<RotationRule>,
    containment: Option<ContentRegion>,
    memos: HashMap<ObjectId, SnapMemo>,
}

impl GestureHub {
    /// Hub with no rules registered.
    pub fn new(canvas: Canvas, config: SnapConfig) -> Self {
        Self {
            canvas,
            config,
            center: None,
            rotation: None,
            containment: None,
            memos: HashMap::new(),
        }
    }

    /// Current canvas size.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Enable center snapping. `zone` overrides `canvas_width / center_zone_divisor` when it
    /// is finite and > 0.
    pub fn apply_snap(&mut self, zone: Option<f64>) {
        self.center = Some(CenterRule {
            zone_override: zone,
        });
    }

    /// Enable right-angle snapping. A missing, negative or non-finite tolerance falls back
    /// to the configured one.
    pub fn apply_rotation_snap(&mut self, tolerance_deg: Option<f64>) {
        let tolerance_deg = tolerance_deg
            .filter(|t| t.is_finite() && *t >= 0.0)
            .unwrap_or(self.config.rotation_tolerance_deg);
        self.rotation = Some(RotationRule { tolerance_deg });
    }

    /// Keep the background covering `region` while it is panned.
    pub fn apply_containment(&mut self, region: ContentRegion) {
        self.containment = Some(region);
    }

    /// Registered crop window, if any.
    pub fn content_region(&self) -> Option<ContentRegion> {
        self.containment
    }

    /// Template switch: new canvas size and crop window, stale gesture memos dropped.
    ///
    /// A center rule registered with an explicit zone keeps that zone; otherwise the zone
    /// follows the new width.
    pub fn reset_template(&mut self, canvas: Canvas, region: Option<ContentRegion>) {
        self.canvas = canvas;
        self.containment = region;
        self.memos.clear();
    }

    /// The center snap rule as it applies to the current canvas, if registered.
    pub fn center_rule(&self) -> Option<CenterSnap> {
        self.center.map(|rule| {
            CenterSnap::for_canvas(
                self.canvas,
                self.config.center_zone_divisor,
                rule.zone_override,
            )
        })
    }

    /// One `object:moving` frame: center snap for user content, then containment for the
    /// background.
    pub fn on_object_moving(&mut self, target: Option<&mut dyn SceneObject>) -> GestureOutcome {
        let Some(obj) = target else {
            return GestureOutcome::Ignored;
        };

        let mut centered = false;
        if let Some(rule) = self.center_rule()
            && !obj.role().is_protected()
        {
            centered = rule.apply(obj);
        }

        let clamp = match &self.containment {
            Some(region) => clamp_background(Some(obj), region),
            None => ClampReport::default(),
        };

        if self.center.is_none() && self.containment.is_none() {
            return GestureOutcome::Ignored;
        }
        GestureOutcome::Moved { centered, clamp }
    }

    /// One `object:rotating` frame.
    pub fn on_object_rotating(&mut self, target: Option<&mut dyn SceneObject>) -> GestureOutcome {
        let (Some(rule), Some(obj)) = (self.rotation, target) else {
            return GestureOutcome::Ignored;
        };
        let id = obj.id();
        let memo = self.memos.entry(id).or_default();
        let outcome = snap_rotation(Some(obj), rule.tolerance_deg, memo);
        if !memo.is_snapped() {
            self.memos.remove(&id);
        }
        GestureOutcome::Rotated(outcome)
    }

    /// The drag on `id` ended; forget its snap memo.
    pub fn on_gesture_end(&mut self, id: ObjectId) {
        self.memos.remove(&id);
    }

    /// Whether `id` is currently held at a right angle.
    pub fn is_snapped(&self, id: ObjectId) -> bool {
        self.memos.get(&id).is_some_and(SnapMemo::is_snapped)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/gesture.rs"]
mod tests;
