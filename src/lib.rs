//! Brandkit is the layout-correction and render-preparation core of a template-based
//! graphic editor (social posts, posters, QR flyers).
//!
//! The host UI owns the scene library and the wizard; this crate owns the parts with real
//! invariants:
//!
//! - **Gesture corrections**: center snapping while dragging, right-angle snapping while
//!   rotating, and cover-style clamping of the background inside its crop window. All of it
//!   is driven through a per-canvas [`GestureHub`] that receives the scene library's
//!   moving/rotating callbacks.
//! - **Logo label layout**: [`LogoLayoutPlanner`] turns free label text into a
//!   [`LogoLayoutPlan`] (artwork variant, line break, text squeeze, vertical offset).
//! - **QR styling**: [`QrCompositor`] colors a generator's [`ModuleBitmap`], including the
//!   white-on-transparent case.
//! - **Export sizing**: [`compute_export_multiplier`] picks a DPI-driven multiplier that
//!   stays inside a pixel budget.
//!
//! Nothing here performs IO except [`EngineConfig::from_path`]. The gesture paths never
//! allocate per frame beyond the snap memo map and never fail: missing targets and missing
//! capabilities are skipped.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod config;
mod containment;
mod export;
mod foundation;
mod logo;
mod qr;
mod scene;
mod snap;

pub use config::{EngineConfig, ExportConfig, LogoConfig, QrConfig, SnapConfig};
pub use containment::{ClampReport, ContentRegion, CoverExtent, clamp_background};
pub use export::{ExportScale, ExportScaler, compute_export_multiplier, encode_png};
pub use foundation::core::{Affine, Canvas, Point, Rect, Rgb8, Size, Vec2};
pub use foundation::error::{BrandkitError, BrandkitResult};
pub use logo::layout::{
    AssetVariant, BreakSource, LogoLayoutPlan, LogoLayoutPlanner, plan_logo_layout,
};
pub use qr::bitmap::{ModuleBitmap, ModuleGenerator};
pub use qr::compositor::{ColorSpec, QrBackground, QrCompositor, composite_qr_colors};
pub use scene::gesture::{GestureHub, GestureOutcome};
pub use scene::object::{AxisLock, ObjectId, ObjectKind, ObjectRole, PlacedObject, SceneObject};
pub use snap::center::{CenterSnap, snap_to_center};
pub use snap::rotation::{
    CARDINAL_ANGLES, RotationSnapOutcome, SnapMemo, nearest_cardinal, snap_rotation,
    snap_rotation_once,
};
