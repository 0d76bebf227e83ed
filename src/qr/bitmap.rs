use image::{GrayImage, Luma};

use crate::foundation::error::{BrandkitError, BrandkitResult};

/// Dark/light raster produced by a QR generator before any color styling.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleBitmap {
    width: u32,
    height: u32,
    dark: Vec<bool>,
}

impl ModuleBitmap {
    /// Row-major cells; `dark.len()` must equal `width * height`.
    pub fn new(width: u32, height: u32, dark: Vec<bool>) -> BrandkitResult<Self> {
        if width == 0 || height == 0 {
            return Err(BrandkitError::validation(
                "module bitmap dimensions must be > 0",
            ));
        }
        let expected = (width as usize) * (height as usize);
        if dark.len() != expected {
            return Err(BrandkitError::validation(format!(
                "module bitmap expects {expected} cells, got {}",
                dark.len()
            )));
        }
        Ok(Self {
            width,
            height,
            dark,
        })
    }

    /// Text-art constructor: `#` is dark, `.` or space is light. Rows must be equally long.
    pub fn from_rows(rows: &[&str]) -> BrandkitResult<Self> {
        let height = u32::try_from(rows.len())
            .map_err(|_| BrandkitError::validation("too many module rows"))?;
        let width = rows.first().map_or(0, |r| r.chars().count());
        let mut dark = Vec::with_capacity(width * rows.len());
        for (idx, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return Err(BrandkitError::validation(format!(
                    "module row {idx} has a different width"
                )));
            }
            for c in row.chars() {
                match c {
                    '#' => dark.push(true),
                    '.' | ' ' => dark.push(false),
                    other => {
                        return Err(BrandkitError::validation(format!(
                            "unexpected module character {other:?}"
                        )));
                    }
                }
            }
        }
        let width =
            u32::try_from(width).map_err(|_| BrandkitError::validation("module row too wide"))?;
        Self::new(width, height, dark)
    }

    /// Threshold a grayscale raster: pixels darker than `threshold` are dark modules.
    pub fn from_luma(img: &GrayImage, threshold: u8) -> BrandkitResult<Self> {
        let (width, height) = img.dimensions();
        let dark = img.pixels().map(|Luma([l])| *l < threshold).collect();
        Self::new(width, height, dark)
    }

    /// Width in cells.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in cells.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Out-of-range cells read as light.
    pub fn is_dark(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.dark[(y as usize) * (self.width as usize) + (x as usize)]
    }

    /// Number of dark cells.
    pub fn dark_count(&self) -> usize {
        self.dark.iter().filter(|&&d| d).count()
    }

    /// Nearest-neighbour upscale of a module grid to a square `size_px` raster, surrounded
    /// by `quiet_zone` light modules on every side.
    pub fn upscale(&self, size_px: u32, quiet_zone: u32) -> BrandkitResult<Self> {
        if size_px == 0 {
            return Err(BrandkitError::validation("size_px must be > 0"));
        }
        let span_x = u64::from(self.width) + 2 * u64::from(quiet_zone);
        let span_y = u64::from(self.height) + 2 * u64::from(quiet_zone);
        let qz = u64::from(quiet_zone);

        let mut dark = Vec::with_capacity((size_px as usize) * (size_px as usize));
        for py in 0..u64::from(size_px) {
            let my = py * span_y / u64::from(size_px);
            for px in 0..u64::from(size_px) {
                let mx = px * span_x / u64::from(size_px);
                let inside = mx >= qz && my >= qz;
                let cell = inside
                    && self.is_dark(
                        u32::try_from(mx - qz).unwrap_or(u32::MAX),
                        u32::try_from(my - qz).unwrap_or(u32::MAX),
                    );
                dark.push(cell);
            }
        }
        Self::new(size_px, size_px, dark)
    }

    /// Black-on-white rendering, mostly for diagnostics.
    pub fn to_luma(&self) -> GrayImage {
        GrayImage::from_fn(self.width, self.height, |x, y| {
            Luma([if self.is_dark(x, y) { 0 } else { 255 }])
        })
    }
}

/// Seam for the external QR encoder.
pub trait ModuleGenerator {
    /// Encode `payload` into a `size_px` square dark/light raster.
    fn generate_module_bitmap(&self, payload: &str, size_px: u32) -> BrandkitResult<ModuleBitmap>;
}

impl<F> ModuleGenerator for F
where
    F: Fn(&str, u32) -> BrandkitResult<ModuleBitmap>,
{
    fn generate_module_bitmap(&self, payload: &str, size_px: u32) -> BrandkitResult<ModuleBitmap> {
        self(payload, size_px)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/qr/bitmap.rs"]
mod tests;
