//! Tunable constants for every engine, loadable from JSON.
//!
//! All fields default to the values the interactive editor has always shipped with, so an
//! empty JSON object (`{}`) is a valid configuration.

use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::foundation::{
    core::Rgb8,
    error::{BrandkitError, BrandkitResult},
    math::is_positive_finite,
};

/// Every tunable constant, grouped by engine.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Center and rotation snapping.
    pub snap: SnapConfig,
    /// Logo label planning.
    pub logo: LogoConfig,
    /// QR color compositing.
    pub qr: QrConfig,
    /// Export raster sizing.
    pub export: ExportConfig,
}

/// Snap rule defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapConfig {
    /// Center snap zone is `canvas_width / center_zone_divisor`.
    pub center_zone_divisor: f64,
    /// Rotation snap tolerance in degrees (inclusive).
    pub rotation_tolerance_deg: f64,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            center_zone_divisor: 20.0,
            rotation_tolerance_deg: 2.0,
        }
    }
}

/// Label breaking and squeeze parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogoConfig {
    /// Labels longer than this (in characters) are broken onto two lines.
    pub length_threshold: usize,
    /// Character the user types to force a line break.
    pub delimiter: char,
    /// Label top offset as a fraction of the logo's rendered width.
    pub vertical_offset_ratio: f64,
    /// Maximum distance (in characters) between the break and the label midpoint before
    /// the text box gets squeezed.
    pub balance_window: usize,
    /// Lower bound for the horizontal text squeeze.
    pub min_text_width_scale: f64,
}

impl Default for LogoConfig {
    fn default() -> Self {
        Self {
            length_threshold: 16,
            delimiter: '%',
            vertical_offset_ratio: 0.56,
            balance_window: 4,
            min_text_width_scale: 0.6,
        }
    }
}

/// Keying thresholds for transparent QR backgrounds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QrConfig {
    /// A color is near-white when every channel is strictly above this value.
    pub near_white_threshold: u8,
    /// Light fill used while compositing a near-white foreground onto transparency.
    pub placeholder: Rgb8,
    /// Per-channel tolerance when keying the placeholder hue.
    pub placeholder_tolerance: u8,
}

impl Default for QrConfig {
    fn default() -> Self {
        Self {
            near_white_threshold: 250,
            placeholder: Rgb8::MAGENTA,
            placeholder_tolerance: 8,
        }
    }
}

/// Export resolution and pixel budget.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// DPI corresponding to a multiplier of 1.0.
    pub base_dpi: f64,
    /// DPI requested for print exports.
    pub target_dpi: f64,
    /// Upper bound on `width * height` of the exported raster.
    pub max_pixels: u64,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            base_dpi: 72.0,
            target_dpi: 300.0,
            max_pixels: 36_000_000,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json_str(s: &str) -> BrandkitResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON configuration file.
    pub fn from_path(path: &Path) -> BrandkitResult<Self> {
        let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_reader(BufReader::new(f))
            .with_context(|| format!("parse config '{}'", path.display()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values that would make an engine misbehave, e.g. a zero divisor or a
    /// whitespace delimiter.
    pub fn validate(&self) -> BrandkitResult<()> {
        if !is_positive_finite(self.snap.center_zone_divisor) {
            return Err(BrandkitError::validation(
                "snap.center_zone_divisor must be finite and > 0",
            ));
        }
        if !self.snap.rotation_tolerance_deg.is_finite()
            || !(0.0..45.0).contains(&self.snap.rotation_tolerance_deg)
        {
            return Err(BrandkitError::validation(
                "snap.rotation_tolerance_deg must be in [0, 45)",
            ));
        }
        if self.logo.length_threshold == 0 {
            return Err(BrandkitError::validation(
                "logo.length_threshold must be > 0",
            ));
        }
        if self.logo.delimiter.is_whitespace() {
            return Err(BrandkitError::validation(
                "logo.delimiter must not be whitespace",
            ));
        }
        if !self.logo.vertical_offset_ratio.is_finite() {
            return Err(BrandkitError::validation(
                "logo.vertical_offset_ratio must be finite",
            ));
        }
        if !is_positive_finite(self.logo.min_text_width_scale)
            || self.logo.min_text_width_scale > 1.0
        {
            return Err(BrandkitError::validation(
                "logo.min_text_width_scale must be in (0, 1]",
            ));
        }
        if self.qr.placeholder.all_channels_above(self.qr.near_white_threshold) {
            return Err(BrandkitError::validation(
                "qr.placeholder must not itself be near-white",
            ));
        }
        if !is_positive_finite(self.export.base_dpi) || !is_positive_finite(self.export.target_dpi)
        {
            return Err(BrandkitError::validation(
                "export.base_dpi and export.target_dpi must be finite and > 0",
            ));
        }
        if self.export.max_pixels == 0 {
            return Err(BrandkitError::validation("export.max_pixels must be > 0"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config/config.rs"]
mod tests;
