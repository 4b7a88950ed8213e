use std::fmt;

use image::{Pixel, Primitive, Rgb, Rgba};
use imageproc::definitions::Clamp;

use crate::error::DrawError;
use crate::utils::{rgb_alpha_layout, to_subpixel};

/// A drawing colour with three or four bands
///
/// Band values are expressed in the native scale of the subpixel type that
/// will eventually receive them: `0..=255` for `u8`, `0..=65535` for `u16`
/// and `0.0..=1.0` for `f32`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Color {
    Rgb([f32; 3]),
    Rgba([f32; 4]),
}

impl Color {
    pub const BLACK: Self = Self::Rgb([0.0, 0.0, 0.0]);

    /// Whether the colour carries an alpha band
    pub const fn has_alpha(&self) -> bool {
        matches!(self, Self::Rgba(_))
    }

    /// Band values in order
    pub fn bands(&self) -> &[f32] {
        match self {
            Self::Rgb(bands) => bands,
            Self::Rgba(bands) => bands,
        }
    }

    /// Adapts the colour to an image with or without an alpha band
    ///
    /// An RGB colour drawn on an image with alpha gains `opaque` as its alpha
    /// band; an RGBA colour drawn on an image without alpha loses it. Any
    /// other combination is returned unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use imageops_draw::Color;
    ///
    /// let red = Color::Rgb([255.0, 0.0, 0.0]);
    /// assert_eq!(red.reconcile(true, 255.0), Color::Rgba([255.0, 0.0, 0.0, 255.0]));
    /// assert_eq!(red.reconcile(false, 255.0), red);
    /// ```
    pub fn reconcile(self, has_alpha: bool, opaque: f32) -> Self {
        match (self, has_alpha) {
            (Self::Rgb([red, green, blue]), true) => Self::Rgba([red, green, blue, opaque]),
            (Self::Rgba([red, green, blue, _]), false) => Self::Rgb([red, green, blue]),
            (color, _) => color,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (index, band) in self.bands().iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{band}")?;
        }
        f.write_str("]")
    }
}

impl From<[f32; 3]> for Color {
    fn from(bands: [f32; 3]) -> Self {
        Self::Rgb(bands)
    }
}

impl From<[f32; 4]> for Color {
    fn from(bands: [f32; 4]) -> Self {
        Self::Rgba(bands)
    }
}

impl From<Rgb<u8>> for Color {
    fn from(Rgb([red, green, blue]): Rgb<u8>) -> Self {
        Self::Rgb([red.into(), green.into(), blue.into()])
    }
}

impl From<Rgba<u8>> for Color {
    fn from(Rgba([red, green, blue, alpha]): Rgba<u8>) -> Self {
        Self::Rgba([red.into(), green.into(), blue.into(), alpha.into()])
    }
}

/// Converts a colour into a pixel of type `P`
///
/// The colour is first reconciled with the alpha presence of `P` (missing
/// alpha becomes the subpixel's maximum value), then each band is rounded
/// to the nearest integer subpixel and clamped into the subpixel range.
///
/// # Errors
///
/// * `DrawError::UnsupportedPixel` - When `P` has neither 3 nor 4 channels
pub fn ink<P>(color: Color) -> Result<P, DrawError>
where
    P: Pixel,
    P::Subpixel: Into<f32> + Clamp<f32>,
{
    let has_alpha = rgb_alpha_layout::<P>()?;
    let opaque = P::Subpixel::DEFAULT_MAX_VALUE.into();
    let bands: Vec<P::Subpixel> = color
        .reconcile(has_alpha, opaque)
        .bands()
        .iter()
        .map(|&band| to_subpixel(band, opaque))
        .collect();

    Ok(*P::from_slice(&bands))
}
