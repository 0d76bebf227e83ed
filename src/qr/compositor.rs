use std::{fmt, str::FromStr};

use image::{Rgba, RgbaImage};

use crate::{
    config::QrConfig,
    foundation::{
        core::Rgb8,
        error::{BrandkitError, BrandkitResult},
    },
    qr::bitmap::{ModuleBitmap, ModuleGenerator},
};

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// QR background: an opaque color or none at all.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum QrBackground {
    /// No background; light modules become fully transparent.
    Transparent,
    /// Opaque fill.
    Solid(Rgb8),
}

impl FromStr for QrBackground {
    type Err = BrandkitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("transparent") {
            return Ok(Self::Transparent);
        }
        Ok(Self::Solid(s.parse()?))
    }
}

impl TryFrom<String> for QrBackground {
    type Error = BrandkitError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<QrBackground> for String {
    fn from(value: QrBackground) -> Self {
        value.to_string()
    }
}

impl fmt::Display for QrBackground {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transparent => f.write_str("transparent"),
            Self::Solid(c) => write!(f, "{c}"),
        }
    }
}

/// Requested QR colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ColorSpec {
    /// Module color.
    pub foreground: Rgb8,
    /// Fill behind the modules.
    pub background: QrBackground,
}

impl ColorSpec {
    /// Pair a foreground with a background.
    pub fn new(foreground: Rgb8, background: QrBackground) -> Self {
        Self {
            foreground,
            background,
        }
    }
}

/// Styles a [`ModuleBitmap`] with a foreground/background pair.
///
/// Output pixels are either fully opaque (alpha 255) or fully transparent (`[0, 0, 0, 0]`).
#[derive(Clone, Debug, Default)]
pub struct QrCompositor {
    config: QrConfig,
}

impl QrCompositor {
    /// Compositor with custom keying thresholds.
    pub fn new(config: QrConfig) -> Self {
        Self { config }
    }

    /// Color `bitmap`. Fails with [`BrandkitError::Configuration`] when the code would be
    /// invisible.
    #[tracing::instrument(skip(self, bitmap), fields(w = bitmap.width(), h = bitmap.height()))]
    pub fn composite(&self, bitmap: &ModuleBitmap, spec: &ColorSpec) -> BrandkitResult<RgbaImage> {
        match spec.background {
            QrBackground::Solid(bg) => {
                if bg == spec.foreground {
                    return Err(BrandkitError::configuration(format!(
                        "QR foreground and background are both {bg}; the code would be invisible"
                    )));
                }
                Ok(render(bitmap, spec.foreground, bg))
            }
            QrBackground::Transparent => self.composite_transparent(bitmap, spec.foreground),
        }
    }

    /// Render onto a light fill, then key the fill out to alpha 0.
    ///
    /// A near-white foreground cannot be keyed against white without erasing the modules
    /// themselves, so in that case the light fill is the placeholder hue and only pixels
    /// matching it are keyed.
    fn composite_transparent(&self, bitmap: &ModuleBitmap, fg: Rgb8) -> BrandkitResult<RgbaImage> {
        let cfg = &self.config;
        let near_white = fg.all_channels_above(cfg.near_white_threshold);

        let mut out = if near_white {
            if fg.within(cfg.placeholder, cfg.placeholder_tolerance) {
                return Err(BrandkitError::configuration(format!(
                    "QR foreground {fg} collides with the placeholder hue {}",
                    cfg.placeholder
                )));
            }
            tracing::debug!(%fg, placeholder = %cfg.placeholder, "keying via placeholder hue");
            render(bitmap, fg, cfg.placeholder)
        } else {
            render(bitmap, fg, Rgb8::WHITE)
        };

        let mut keyed = 0usize;
        for px in out.pixels_mut() {
            let rgb = Rgb8::new(px[0], px[1], px[2]);
            let is_fill = if near_white {
                rgb.within(cfg.placeholder, cfg.placeholder_tolerance)
            } else {
                rgb.all_channels_above(cfg.near_white_threshold)
            };
            if is_fill {
                *px = TRANSPARENT;
                keyed += 1;
            }
        }
        tracing::debug!(keyed, near_white, "transparent QR composited");
        Ok(out)
    }

    /// Generate the module bitmap for `payload` and style it.
    pub fn render_payload(
        &self,
        generator: &dyn ModuleGenerator,
        payload: &str,
        size_px: u32,
        spec: &ColorSpec,
    ) -> BrandkitResult<RgbaImage> {
        if spec.background == QrBackground::Solid(spec.foreground) {
            return Err(BrandkitError::configuration(
                "QR foreground and background must differ",
            ));
        }
        let bitmap = generator.generate_module_bitmap(payload, size_px)?;
        self.composite(&bitmap, spec)
    }
}

fn render(bitmap: &ModuleBitmap, fg: Rgb8, light: Rgb8) -> RgbaImage {
    let dark = Rgba(fg.to_rgba(255));
    let light = Rgba(light.to_rgba(255));
    RgbaImage::from_fn(bitmap.width(), bitmap.height(), |x, y| {
        if bitmap.is_dark(x, y) { dark } else { light }
    })
}

/// Composite with the default thresholds and placeholder hue.
pub fn composite_qr_colors(bitmap: &ModuleBitmap, spec: &ColorSpec) -> BrandkitResult<RgbaImage> {
    QrCompositor::default().composite(bitmap, spec)
}

#[cfg(test)]
#[path = "../../tests/unit/qr/compositor.rs"]
mod tests;
