use std::sync::atomic::{AtomicU64, Ordering};

use crate::foundation::core::{Affine, Point, Size, Vec2};

/// Stable identity of a placed object, assigned by the host.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ObjectId(pub u64);

impl ObjectId {
    /// Allocate a process-unique id.
    pub fn fresh() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Broad object category, as reported by the scene library.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    /// Editable text box.
    Text,
    /// Raster image.
    Image,
    /// Vector shape or group.
    Shape,
}

/// What the object is for on the template.
///
/// Template-owned objects (background, logo image, logo label) are exempt from every
/// interactive correction. The host re-tags objects whenever a template switch regenerates
/// them, so the exemption never depends on which handle happens to be current.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectRole {
    /// Template background image.
    Background,
    /// Template logo artwork.
    Logo,
    /// Label rendered under the logo.
    LogoText,
    /// Anything the user added.
    UserContent,
}

impl ObjectRole {
    /// Template-owned objects are protected from snapping.
    pub fn is_protected(self) -> bool {
        !matches!(self, Self::UserContent)
    }
}

/// Per-axis movement lock, mirroring the scene library's `lockMovementX/Y` flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AxisLock {
    /// Horizontal movement locked.
    pub x: bool,
    /// Vertical movement locked.
    pub y: bool,
}

/// The transform surface the engines need from a scene library object.
///
/// `position` is the top-left anchor in canvas coordinates and `rotation_degrees` is
/// clockwise. Capabilities that not every object offers return `None`; the engines treat
/// that as "skip", never as an error.
pub trait SceneObject {
    /// Stable identity.
    fn id(&self) -> ObjectId;
    /// Object category.
    fn kind(&self) -> ObjectKind;
    /// Template role.
    fn role(&self) -> ObjectRole;

    /// Top-left anchor.
    fn position(&self) -> Point;
    /// Move the anchor. Cached corners stay stale until [`SceneObject::set_coords`].
    fn set_position(&mut self, p: Point);

    /// Clockwise rotation, not normalized.
    fn rotation_degrees(&self) -> f64;
    /// Set the rotation about the anchor.
    fn set_rotation_degrees(&mut self, deg: f64);

    /// Post-scale, unrotated size.
    fn bounding_size(&self) -> Size;

    /// Re-derive cached corner coordinates after a transform change.
    fn set_coords(&mut self);

    /// Visual center in canvas coordinates.
    fn center_point(&self) -> Option<Point> {
        None
    }

    /// Intrinsic pixel size of the image source, if this object has one.
    fn natural_size(&self) -> Option<Size> {
        None
    }

    /// Axes the user may not drag along.
    fn movement_lock(&self) -> AxisLock {
        AxisLock::default()
    }
}

/// A plain rectangle-backed scene object.
///
/// Rotation is applied about the top-left anchor, so changing the angle moves the visual
/// center. Corner coordinates are cached and only refreshed by [`SceneObject::set_coords`].
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedObject {
    /// Identity.
    pub id: ObjectId,
    /// Category.
    pub kind: ObjectKind,
    /// Template role.
    pub role: ObjectRole,
    /// Anchor x.
    pub left: f64,
    /// Anchor y.
    pub top: f64,
    /// Unscaled width.
    pub width: f64,
    /// Unscaled height.
    pub height: f64,
    /// Per-axis scale.
    pub scale: Vec2,
    /// Clockwise degrees.
    pub angle: f64,
    /// Intrinsic image size, for images.
    pub natural: Option<Size>,
    /// Drag locks.
    pub lock: AxisLock,
    coords: [Point; 4],
}

impl PlacedObject {
    /// Unrotated, unscaled object with a fresh id.
    pub fn new(kind: ObjectKind, role: ObjectRole, origin: Point, size: Size) -> Self {
        let mut obj = Self {
            id: ObjectId::fresh(),
            kind,
            role,
            left: origin.x,
            top: origin.y,
            width: size.width,
            height: size.height,
            scale: Vec2::new(1.0, 1.0),
            angle: 0.0,
            natural: None,
            lock: AxisLock::default(),
            coords: [Point::ZERO; 4],
        };
        obj.set_coords();
        obj
    }

    /// Background image scaled by `scale` from its natural pixel size.
    pub fn background(origin: Point, natural: Size, scale: f64, lock: AxisLock) -> Self {
        let mut obj = Self::new(ObjectKind::Image, ObjectRole::Background, origin, natural);
        obj.scale = Vec2::new(scale, scale);
        obj.natural = Some(natural);
        obj.lock = lock;
        obj.set_coords();
        obj
    }

    /// Builder-style rotation, corners refreshed.
    pub fn with_angle(mut self, deg: f64) -> Self {
        self.angle = deg;
        self.set_coords();
        self
    }

    /// Object-to-canvas transform.
    pub fn transform(&self) -> Affine {
        Affine::translate(Vec2::new(self.left, self.top))
            * Affine::rotate(self.angle.to_radians())
            * Affine::scale_non_uniform(self.scale.x, self.scale.y)
    }

    /// Cached corners (top-left, top-right, bottom-right, bottom-left) as of the last
    /// [`SceneObject::set_coords`].
    pub fn coords(&self) -> [Point; 4] {
        self.coords
    }
}

impl SceneObject for PlacedObject {
    fn id(&self) -> ObjectId {
        self.id
    }

    fn kind(&self) -> ObjectKind {
        self.kind
    }

    fn role(&self) -> ObjectRole {
        self.role
    }

    fn position(&self) -> Point {
        Point::new(self.left, self.top)
    }

    fn set_position(&mut self, p: Point) {
        self.left = p.x;
        self.top = p.y;
    }

    fn rotation_degrees(&self) -> f64 {
        self.angle
    }

    fn set_rotation_degrees(&mut self, deg: f64) {
        self.angle = deg;
    }

    fn bounding_size(&self) -> Size {
        Size::new(self.width * self.scale.x, self.height * self.scale.y)
    }

    fn set_coords(&mut self) {
        let t = self.transform();
        self.coords = [
            t * Point::new(0.0, 0.0),
            t * Point::new(self.width, 0.0),
            t * Point::new(self.width, self.height),
            t * Point::new(0.0, self.height),
        ];
    }

    fn center_point(&self) -> Option<Point> {
        Some(self.transform() * Point::new(self.width * 0.5, self.height * 0.5))
    }

    fn natural_size(&self) -> Option<Size> {
        self.natural
    }

    fn movement_lock(&self) -> AxisLock {
        self.lock
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/object.rs"]
mod tests;
