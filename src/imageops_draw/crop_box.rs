//! Crop boxes given in mixed pixel / percentage coordinates.
//!
//! A [`BoxSpec`] field holding an integer is an absolute pixel value; a
//! field holding a float is a fraction of the matching image dimension
//! (`left` and `width` scale with the image width, `top` and `height` with
//! its height). [`BoxSpec::normalize`] resolves every fraction to pixels and
//! checks the result:
//!
//! * `width`/`height` must end up as positive integers,
//! * `left`/`top` must end up as integers of either sign. A negative offset
//!   is measured from the opposite edge when the crop is performed.
//!
//! Fractions are converted with `f64::round`, i.e. halves round away from
//! zero.

use image::{imageops, Pixel};

use crate::error::{BoxError, CropError};
use crate::imageops_draw::options::OptionValue;
use crate::Image;

/// Requested crop region, possibly containing percentages
#[derive(Debug, Clone, PartialEq)]
pub struct BoxSpec {
    pub left: OptionValue,
    pub top: OptionValue,
    pub width: OptionValue,
    pub height: OptionValue,
}

/// Crop region resolved to pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropBox {
    pub left: i64,
    pub top: i64,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy)]
enum Field {
    Left,
    Top,
    Width,
    Height,
}

impl BoxSpec {
    pub fn new(
        left: impl Into<OptionValue>,
        top: impl Into<OptionValue>,
        width: impl Into<OptionValue>,
        height: impl Into<OptionValue>,
    ) -> Self {
        Self {
            left: left.into(),
            top: top.into(),
            width: width.into(),
            height: height.into(),
        }
    }

    /// Resolves the box against an image of the given size
    ///
    /// # Errors
    ///
    /// Fields are checked in the order width, height, left, top and the
    /// first failure is reported:
    ///
    /// * `BoxError::Width` / `BoxError::Height` - When the extent is not a positive integer or positive fraction
    /// * `BoxError::Left` / `BoxError::Top` - When the offset is neither an integer nor a fraction
    ///
    /// # Examples
    ///
    /// ```
    /// use imageops_draw::{BoxSpec, CropBox};
    ///
    /// let spec = BoxSpec::new(0.5, 0.5, 0.5, 0.5);
    /// let resolved = spec.normalize(200, 100).unwrap();
    /// assert_eq!(resolved, CropBox { left: 100, top: 50, width: 100, height: 50 });
    /// ```
    pub fn normalize(&self, image_width: u32, image_height: u32) -> Result<CropBox, BoxError> {
        let mut resolved = self.clone();

        // Each pass turns one float into an integer, so this runs at most four times.
        while let Some((field, fraction)) = resolved.next_percentage() {
            match field {
                Field::Left => resolved.left = to_pixels(fraction, image_width),
                Field::Top => resolved.top = to_pixels(fraction, image_height),
                Field::Width => resolved.width = to_pixels(fraction, image_width),
                Field::Height => resolved.height = to_pixels(fraction, image_height),
            }
        }

        resolved.classify(self)
    }

    fn next_percentage(&self) -> Option<(Field, f64)> {
        if let Some(fraction) = percentage(&self.left) {
            return Some((Field::Left, fraction));
        }
        if let Some(fraction) = percentage(&self.top) {
            return Some((Field::Top, fraction));
        }
        if let Some(fraction) = percentage(&self.width).filter(|fraction| *fraction > 0.0) {
            return Some((Field::Width, fraction));
        }
        percentage(&self.height)
            .filter(|fraction| *fraction > 0.0)
            .map(|fraction| (Field::Height, fraction))
    }

    /// Checks the resolved fields, reporting failures with the value the
    /// caller wrote in `requested`
    fn classify(&self, requested: &Self) -> Result<CropBox, BoxError> {
        let width = extent(&self.width).ok_or_else(|| BoxError::Width(requested.width.clone()))?;
        let height =
            extent(&self.height).ok_or_else(|| BoxError::Height(requested.height.clone()))?;
        let left = offset(&self.left).ok_or_else(|| BoxError::Left(requested.left.clone()))?;
        let top = offset(&self.top).ok_or_else(|| BoxError::Top(requested.top.clone()))?;

        Ok(CropBox {
            left,
            top,
            width,
            height,
        })
    }
}

impl CropBox {
    /// Top-left corner of the box inside an image of the given size
    ///
    /// Negative offsets count back from the right or bottom edge. Returns
    /// `None` when the box does not fit entirely inside the image.
    pub fn origin_within(&self, image_width: u32, image_height: u32) -> Option<(u32, u32)> {
        let x = anchor(self.left, self.width, image_width)?;
        let y = anchor(self.top, self.height, image_height)?;
        Some((x, y))
    }
}

fn anchor(offset: i64, extent: u32, image_extent: u32) -> Option<u32> {
    let image_extent = i64::from(image_extent);
    let start = if offset < 0 {
        image_extent + offset
    } else {
        offset
    };

    let end = start.checked_add(i64::from(extent))?;
    if start < 0 || end > image_extent {
        return None;
    }
    u32::try_from(start).ok()
}

fn percentage(value: &OptionValue) -> Option<f64> {
    match value {
        OptionValue::Float(fraction) if fraction.is_finite() => Some(*fraction),
        _ => None,
    }
}

fn to_pixels(fraction: f64, dimension: u32) -> OptionValue {
    OptionValue::Int((fraction * f64::from(dimension)).round() as i64)
}

fn extent(value: &OptionValue) -> Option<u32> {
    match value {
        OptionValue::Int(pixels) if *pixels > 0 => u32::try_from(*pixels).ok(),
        _ => None,
    }
}

fn offset(value: &OptionValue) -> Option<i64> {
    match value {
        OptionValue::Int(pixels) => Some(*pixels),
        _ => None,
    }
}

/// Trait providing box cropping
pub trait Crop {
    type Output;

    /// Crops the region described by `spec`
    ///
    /// # Errors
    ///
    /// * `CropError::InvalidBox` - When the box cannot be normalized
    /// * `CropError::OutOfBounds` - When the resolved box does not fit inside the image
    ///
    /// # Examples
    ///
    /// ```
    /// use imageops_draw::{BoxSpec, Crop, Image};
    /// use image::Rgb;
    ///
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let image: Image<Rgb<u8>> = Image::new(200, 100);
    /// let cropped = image.crop_box(&BoxSpec::new(0.25, 0, 0.5, 1.0))?;
    /// assert_eq!(cropped.dimensions(), (100, 100));
    /// # Ok(())
    /// # }
    /// ```
    fn crop_box(&self, spec: &BoxSpec) -> Result<Self::Output, CropError>;
}

impl<P> Crop for Image<P>
where
    P: Pixel + 'static,
{
    type Output = Self;

    fn crop_box(&self, spec: &BoxSpec) -> Result<Self, CropError> {
        let (image_width, image_height) = self.dimensions();
        let resolved = spec.normalize(image_width, image_height)?;

        let (x, y) = resolved
            .origin_within(image_width, image_height)
            .ok_or(CropError::OutOfBounds {
                left: resolved.left,
                top: resolved.top,
                width: resolved.width,
                height: resolved.height,
                image_width,
                image_height,
            })?;

        Ok(imageops::crop_imm(self, x, y, resolved.width, resolved.height).to_image())
    }
}
