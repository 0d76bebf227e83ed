//! Export-time raster sizing and encoding.

use std::io::Cursor;

use image::{ImageFormat, RgbaImage};

use crate::{
    config::ExportConfig,
    foundation::{
        error::{BrandkitError, BrandkitResult},
        math::is_positive_finite,
    },
};

/// Raster multiplier chosen for an export.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ExportScale {
    /// Factor applied to canvas dimensions.
    pub multiplier: f64,
    /// DPI actually delivered; lower than requested when `clamped`.
    pub actual_dpi: f64,
    /// The pixel budget forced a lower multiplier than requested.
    pub clamped: bool,
}

impl ExportScale {
    /// Pixel dimensions of a `canvas_w` x `canvas_h` canvas exported at this scale.
    pub fn output_size(&self, canvas_w: f64, canvas_h: f64) -> (u64, u64) {
        (
            scaled_floor(canvas_w, self.multiplier),
            scaled_floor(canvas_h, self.multiplier),
        )
    }
}

fn scaled_floor(len: f64, m: f64) -> u64 {
    (len * m).floor().max(0.0) as u64
}

fn pixel_count(canvas_w: f64, canvas_h: f64, m: f64) -> u128 {
    u128::from(scaled_floor(canvas_w, m)) * u128::from(scaled_floor(canvas_h, m))
}

/// Chooses export multipliers for a fixed reference DPI.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExportScaler {
    /// DPI that corresponds to a multiplier of 1.0.
    pub base_dpi: f64,
}

impl Default for ExportScaler {
    fn default() -> Self {
        Self {
            base_dpi: ExportConfig::default().base_dpi,
        }
    }
}

impl ExportScaler {
    /// Scaler with an explicit reference DPI.
    pub fn new(base_dpi: f64) -> Self {
        Self { base_dpi }
    }

    /// Multiplier that renders the canvas at `target_dpi`, reduced when the result would
    /// exceed `max_pixels`.
    ///
    /// Overflow is not an error: the multiplier is shrunk to fit the pixel budget and the
    /// reduced DPI is reported back.
    #[tracing::instrument(skip(self))]
    pub fn compute(
        &self,
        canvas_w: f64,
        canvas_h: f64,
        target_dpi: f64,
        max_pixels: u64,
    ) -> BrandkitResult<ExportScale> {
        if !is_positive_finite(canvas_w) || !is_positive_finite(canvas_h) {
            return Err(BrandkitError::validation(
                "export canvas dimensions must be finite and > 0",
            ));
        }
        if !is_positive_finite(target_dpi) || !is_positive_finite(self.base_dpi) {
            return Err(BrandkitError::validation(
                "export DPI values must be finite and > 0",
            ));
        }
        if max_pixels == 0 {
            return Err(BrandkitError::validation("max_pixels must be > 0"));
        }

        let requested = target_dpi / self.base_dpi;
        let budget = max_pixels as f64;
        let mut multiplier = requested;
        let mut clamped = false;

        if canvas_w * canvas_h * requested * requested > budget {
            multiplier = (budget / (canvas_w * canvas_h)).sqrt();
            clamped = true;
        }
        // Float rounding can leave the floored raster one row or column over budget.
        while pixel_count(canvas_w, canvas_h, multiplier) > u128::from(max_pixels) {
            multiplier = f64::from_bits(multiplier.to_bits() - 1) * (1.0 - 1e-12);
            clamped = true;
        }

        let scale = ExportScale {
            multiplier,
            actual_dpi: multiplier * self.base_dpi,
            clamped,
        };
        if clamped {
            tracing::warn!(
                requested_dpi = target_dpi,
                actual_dpi = scale.actual_dpi,
                max_pixels,
                "export exceeds pixel budget; reducing resolution"
            );
        }
        Ok(scale)
    }

    /// Scaler whose reference DPI is `config.base_dpi`.
    pub fn from_config(config: &ExportConfig) -> Self {
        Self::new(config.base_dpi)
    }

    /// Compute entirely from `config`: reference DPI, target DPI and pixel budget.
    pub fn compute_with(
        canvas_w: f64,
        canvas_h: f64,
        config: &ExportConfig,
    ) -> BrandkitResult<ExportScale> {
        Self::from_config(config).compute(
            canvas_w,
            canvas_h,
            config.target_dpi,
            config.max_pixels,
        )
    }
}

/// [`ExportScaler::compute`] against the default 72 DPI reference.
pub fn compute_export_multiplier(
    canvas_w: f64,
    canvas_h: f64,
    target_dpi: f64,
    max_pixels: u64,
) -> BrandkitResult<ExportScale> {
    ExportScaler::default().compute(canvas_w, canvas_h, target_dpi, max_pixels)
}

/// Encode a finished raster as PNG bytes for the host.
pub fn encode_png(img: &RgbaImage) -> BrandkitResult<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png)?;
    Ok(buf.into_inner())
}

#[cfg(test)]
#[path = "../tests/unit/export/export.rs"]
mod tests;
