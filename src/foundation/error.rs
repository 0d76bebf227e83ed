/// Result alias used across the crate.
pub type BrandkitResult<T> = Result<T, BrandkitError>;

/// Errors returned by brandkit.
#[derive(thiserror::Error, Debug)]
pub enum BrandkitError {
    /// The caller asked for something that cannot be rendered meaningfully (for example a QR
    /// code whose foreground and background are the same opaque color).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Malformed input, such as a non-finite number or a bad color string.
    #[error("validation error: {0}")]
    Validation(String),

    /// JSON (de)serialization failed.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Raster decode or encode failed.
    #[error("image error: {0}")]
    Image(String),

    /// Context-carrying failure from IO helpers.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BrandkitError {
    /// Build a [`BrandkitError::Configuration`].
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`BrandkitError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`BrandkitError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Build a [`BrandkitError::Image`].
    pub fn image(msg: impl Into<String>) -> Self {
        Self::Image(msg.into())
    }

    /// Whether this blocks asset generation outright.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

impl From<image::ImageError> for BrandkitError {
    fn from(value: image::ImageError) -> Self {
        Self::Image(value.to_string())
    }
}

impl From<serde_json::Error> for BrandkitError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serde(value.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
