//! Internal utility functions for imageops-draw.
//!
//! This module contains the channel scaling helpers shared by the per-pixel
//! operations.

use image::{Pixel, Primitive};
use imageproc::definitions::Clamp;

use crate::error::DrawError;

/// Scales a subpixel value to the range [0, 1] using a pre-computed max value.
///
/// # Arguments
///
/// * `value` - The subpixel value to normalize
/// * `max_value` - The pre-computed maximum value for the type
#[inline]
pub fn normalize_with_max<S>(value: S, max_value: f32) -> f32
where
    S: Into<f32> + Primitive,
{
    value.into() / max_value
}

/// Scales a value in [0, 1] back to a subpixel, clamping to its range.
#[inline]
pub fn denormalize_with_max<S>(value: f32, max_value: f32) -> S
where
    S: Primitive + Clamp<f32>,
{
    to_subpixel(value * max_value, max_value)
}

/// Converts a value already in subpixel scale, clamping to its range.
///
/// Integer subpixels (max above 1) are rounded to nearest, halves away from
/// zero; float subpixels are kept as is.
#[inline]
pub fn to_subpixel<S>(value: f32, max_value: f32) -> S
where
    S: Primitive + Clamp<f32>,
{
    if max_value > 1.0 {
        S::clamp(value.round())
    } else {
        S::clamp(value)
    }
}

/// Checks that a pixel type is RGB or RGBA and reports whether it has alpha.
pub fn rgb_alpha_layout<P: Pixel>() -> Result<bool, DrawError> {
    match P::CHANNEL_COUNT {
        3 => Ok(false),
        4 => Ok(true),
        channels => Err(DrawError::UnsupportedPixel { channels }),
    }
}
