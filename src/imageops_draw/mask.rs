use image::{Luma, Pixel, Primitive};
use imageproc::definitions::Clamp;
use itertools::iproduct;

use crate::error::DrawError;
use crate::imageops_draw::color::ink;
use crate::imageops_draw::options::{FromOptions, Options};
use crate::imageops_draw::shapes::InkOptions;
use crate::utils::{denormalize_with_max, normalize_with_max};
use crate::Image;

pub type MaskOptions = InkOptions;

/// Trait providing in-place drawing of ink through a coverage mask
pub trait DrawMask {
    type Mask;

    /// Draws the ink colour through `mask` with the mask's top-left corner
    /// at (`x`, `y`)
    ///
    /// Each covered pixel moves towards the ink in proportion to the mask
    /// value: zero leaves it untouched, the subpixel maximum replaces it.
    /// Parts of the mask outside the image are clipped.
    ///
    /// # Errors
    ///
    /// * `DrawError::InvalidOptions` - When the option list does not validate
    /// * `DrawError::UnsupportedPixel` - When the pixel type cannot take a colour
    ///
    /// # Examples
    ///
    /// ```
    /// use imageops_draw::{Color, DrawMask, Image, Options};
    /// use image::{Luma, Rgb};
    ///
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut image: Image<Rgb<u8>> = Image::new(4, 4);
    /// let mask: Image<Luma<u8>> = Image::from_pixel(2, 2, Luma([255]));
    /// let options = Options::new().with("color", Color::Rgb([0.0, 0.0, 255.0]));
    /// image.draw_mask(&mask, 1, 1, &options)?;
    /// assert_eq!(image.get_pixel(2, 2), &Rgb([0, 0, 255]));
    /// # Ok(())
    /// # }
    /// ```
    fn draw_mask(
        &mut self,
        mask: &Self::Mask,
        x: i64,
        y: i64,
        options: &Options,
    ) -> Result<&mut Self, DrawError>;
}

impl<P> DrawMask for Image<P>
where
    P: Pixel,
    P::Subpixel: Into<f32> + Clamp<f32>,
{
    type Mask = Image<Luma<P::Subpixel>>;

    fn draw_mask(
        &mut self,
        mask: &Self::Mask,
        x: i64,
        y: i64,
        options: &Options,
    ) -> Result<&mut Self, DrawError> {
        let MaskOptions { color } = MaskOptions::from_options(options)?;
        let pixel = ink::<P>(color)?;

        let (width, height) = self.dimensions();
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = x.saturating_add(i64::from(mask.width())).min(i64::from(width));
        let y1 = y.saturating_add(i64::from(mask.height())).min(i64::from(height));
        if x0 >= x1 || y0 >= y1 {
            return Ok(self);
        }

        let max = P::Subpixel::DEFAULT_MAX_VALUE.into();
        for (target_y, target_x) in iproduct!(y0..y1, x0..x1) {
            let Luma([value]) = *mask.get_pixel((target_x - x) as u32, (target_y - y) as u32);
            let coverage = normalize_with_max(value, max);
            if coverage <= 0.0 {
                continue;
            }

            let target = self.get_pixel_mut(target_x as u32, target_y as u32);
            for (channel, &ink_channel) in target.channels_mut().iter_mut().zip(pixel.channels()) {
                let current = normalize_with_max(*channel, max);
                let wanted = normalize_with_max(ink_channel, max);
                *channel = denormalize_with_max(current + (wanted - current) * coverage, max);
            }
        }
        Ok(self)
    }
}
