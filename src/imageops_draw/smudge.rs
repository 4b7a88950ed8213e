use image::{Pixel, Primitive};
use imageproc::definitions::Clamp;
use itertools::iproduct;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::error::DrawError;
use crate::utils::to_subpixel;
use crate::Image;

/// Trait providing in-place smudging of a rectangular area
pub trait Smudge {
    /// Softens the area by replacing each pixel with the mean of its 3x3
    /// neighbourhood
    ///
    /// Means are taken from the image as it was before the call, and the
    /// neighbourhood is cut short at the image edges. The area itself is
    /// clipped to the image.
    ///
    /// # Errors
    ///
    /// * `DrawError::InvalidGeometry` - When `width` or `height` is zero
    ///
    /// # Examples
    ///
    /// ```
    /// use imageops_draw::{Image, Smudge};
    /// use image::Rgb;
    ///
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut image: Image<Rgb<u8>> = Image::new(3, 3);
    /// image.put_pixel(1, 1, Rgb([90, 90, 90]));
    /// image.smudge(0, 0, 3, 3)?;
    /// assert_eq!(image.get_pixel(1, 1), &Rgb([10, 10, 10]));
    /// # Ok(())
    /// # }
    /// ```
    fn smudge(
        &mut self,
        left: u32,
        top: u32,
        width: u32,
        height: u32,
    ) -> Result<&mut Self, DrawError>;
}

impl<P> Smudge for Image<P>
where
    P: Pixel + Send + Sync,
    P::Subpixel: Into<f32> + Clamp<f32>,
{
    fn smudge(
        &mut self,
        left: u32,
        top: u32,
        width: u32,
        height: u32,
    ) -> Result<&mut Self, DrawError> {
        if width == 0 || height == 0 {
            return Err(DrawError::InvalidGeometry(format!(
                "smudge area must be non-zero, got {width}x{height}"
            )));
        }

        let right = left.saturating_add(width).min(self.width());
        let bottom = top.saturating_add(height).min(self.height());
        if left >= right || top >= bottom {
            return Ok(self);
        }

        let max = P::Subpixel::DEFAULT_MAX_VALUE.into();
        let source: &Self = self;
        let smudge_row = |y: u32| -> Vec<P> {
            (left..right)
                .map(|x| neighbourhood_mean(source, x, y, max))
                .collect()
        };

        #[cfg(feature = "rayon")]
        let rows: Vec<Vec<P>> = (top..bottom).into_par_iter().map(smudge_row).collect();

        #[cfg(not(feature = "rayon"))]
        let rows: Vec<Vec<P>> = (top..bottom).map(smudge_row).collect();

        for (y, row) in (top..bottom).zip(rows) {
            for (x, pixel) in (left..right).zip(row) {
                self.put_pixel(x, y, pixel);
            }
        }
        Ok(self)
    }
}

/// Mean of the in-bounds pixels of the 3x3 block centred on (`x`, `y`)
fn neighbourhood_mean<P>(image: &Image<P>, x: u32, y: u32, max: f32) -> P
where
    P: Pixel,
    P::Subpixel: Into<f32> + Clamp<f32>,
{
    let (width, height) = image.dimensions();
    let columns = x.saturating_sub(1)..(x + 2).min(width);
    let rows = y.saturating_sub(1)..(y + 2).min(height);

    let mut sums = [0.0f32; 4];
    let mut count = 0.0f32;
    for (row, column) in iproduct!(rows, columns) {
        for (sum, &channel) in sums.iter_mut().zip(image.get_pixel(column, row).channels()) {
            *sum += channel.into();
        }
        count += 1.0;
    }

    let mut result = *image.get_pixel(x, y);
    for (channel, sum) in result.channels_mut().iter_mut().zip(sums) {
        *channel = to_subpixel(sum / count, max);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, Rgba};

    fn spot_image() -> Image<Rgb<u8>> {
        let mut image: Image<Rgb<u8>> = Image::new(3, 3);
        image.put_pixel(1, 1, Rgb([255, 255, 255]));
        image
    }

    #[test]
    fn test_smudge_averages_neighbourhood() {
        let mut image = spot_image();
        image.smudge(0, 0, 3, 3).unwrap();

        // 255 / 9, 255 / 4 and 255 / 6, rounded half away from zero.
        assert_eq!(image.get_pixel(1, 1), &Rgb([28, 28, 28]));
        assert_eq!(image.get_pixel(0, 0), &Rgb([64, 64, 64]));
        assert_eq!(image.get_pixel(1, 0), &Rgb([43, 43, 43]));
    }

    #[test]
    fn test_smudge_only_touches_area() {
        let mut image = spot_image();
        image.smudge(0, 0, 1, 1).unwrap();

        assert_eq!(image.get_pixel(0, 0), &Rgb([64, 64, 64]));
        assert_eq!(image.get_pixel(1, 1), &Rgb([255, 255, 255]));
        assert_eq!(image.get_pixel(2, 2), &Rgb([0, 0, 0]));
    }

    #[test]
    fn test_smudge_area_is_clipped() {
        let mut image = spot_image();
        image.smudge(2, 2, 10, 10).unwrap();
        assert_eq!(image.get_pixel(2, 2), &Rgb([64, 64, 64]));

        let before = image.clone();
        image.smudge(5, 5, 2, 2).unwrap();
        assert_eq!(image, before);
    }

    #[test]
    fn test_smudge_uniform_image_is_unchanged() {
        let mut image: Image<Rgba<u8>> = Image::from_pixel(4, 4, Rgba([10, 20, 30, 40]));
        let before = image.clone();
        image.smudge(0, 0, 4, 4).unwrap();
        assert_eq!(image, before);
    }

    #[test]
    fn test_smudge_rejects_empty_area() {
        let mut image = spot_image();
        assert!(matches!(
            image.smudge(0, 0, 0, 2),
            Err(DrawError::InvalidGeometry(_))
        ));
    }
}
