use thiserror::Error;

use crate::imageops_draw::options::OptionValue;

/// Error type for option validation
///
/// Returned by [`FromOptions::from_options`](crate::FromOptions::from_options)
/// for the first entry of an option list that cannot be accepted.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OptionError {
    /// The value is not one of the names an enumerated option accepts
    ///
    /// `valid` lists every accepted name in declaration order.
    #[error("invalid value {value} for option {key}, expected one of: {}", .valid.join(", "))]
    InvalidChoice {
        key: String,
        value: OptionValue,
        valid: Vec<&'static str>,
    },

    /// The value has the wrong shape for the option
    #[error("invalid value {value} for option {key}: expected {expected}")]
    InvalidValue {
        key: String,
        value: OptionValue,
        expected: &'static str,
    },
}

/// Error type for crop box normalization
///
/// Each variant names the first field that failed and carries the value
/// the caller supplied for it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BoxError {
    #[error("width must be a percentage in (0, 1] or a positive integer, got {0}")]
    Width(OptionValue),

    #[error("height must be a percentage in (0, 1] or a positive integer, got {0}")]
    Height(OptionValue),

    #[error("left must be a percentage in [-1, 1] or an integer, got {0}")]
    Left(OptionValue),

    #[error("top must be a percentage in [-1, 1] or an integer, got {0}")]
    Top(OptionValue),
}

impl BoxError {
    /// Name of the offending box field
    pub const fn field(&self) -> &'static str {
        match self {
            Self::Width(_) => "width",
            Self::Height(_) => "height",
            Self::Left(_) => "left",
            Self::Top(_) => "top",
        }
    }

    /// The value the caller supplied for the offending field
    pub const fn value(&self) -> &OptionValue {
        match self {
            Self::Width(value) | Self::Height(value) | Self::Left(value) | Self::Top(value) => {
                value
            }
        }
    }
}

/// Error type for cropping operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CropError {
    #[error(transparent)]
    InvalidOptions(#[from] OptionError),

    #[error(transparent)]
    InvalidBox(#[from] BoxError),

    /// The resolved box does not lie inside the image
    #[error("Crop box {left},{top} {width}x{height} does not fit inside {image_width}x{image_height} image")]
    OutOfBounds {
        left: i64,
        top: i64,
        width: u32,
        height: u32,
        image_width: u32,
        image_height: u32,
    },

    /// The requested smart-crop size exceeds the image
    #[error("Target size {target:?} is larger than image size {actual:?}")]
    TargetTooLarge {
        /// Requested dimensions (width, height)
        target: (u32, u32),
        /// Image dimensions (width, height)
        actual: (u32, u32),
    },

    /// The requested smart-crop size has a zero dimension
    #[error("Target size must be non-zero, got {0:?}")]
    EmptyTarget((u32, u32)),
}

/// Error type for drawing operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DrawError {
    #[error(transparent)]
    InvalidOptions(#[from] OptionError),

    /// The pixel type has neither 3 nor 4 bands
    ///
    /// Colours are expressed as RGB or RGBA, so only pixel types with three
    /// or four channels can receive ink.
    #[error("Pixel type with {channels} channels cannot be drawn on, expected 3 or 4")]
    UnsupportedPixel { channels: u8 },

    /// A shape has a zero or negative extent
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),
}
