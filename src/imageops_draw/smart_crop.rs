use image::{imageops, GrayImage, Luma, Pixel, Primitive};
use imageproc::definitions::Clamp;
use imageproc::gradients::sobel_gradients;
use imageproc::map::map_colors;
use itertools::iproduct;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::error::CropError;
use crate::imageops_draw::crop_focus::{CropOptions, Interesting};
use crate::imageops_draw::options::{FromOptions, Options};
use crate::Image;

/// Widest strip the entropy search removes in one step
const ENTROPY_STRIP: u32 = 8;

/// Trait providing crop-to-size with a region-selection strategy
pub trait SmartCrop {
    type Output;

    /// Crops the image to `width` x `height`, choosing the kept region by the
    /// `focus` option
    ///
    /// # Arguments
    ///
    /// * `width` - Target width in pixels
    /// * `height` - Target height in pixels
    /// * `options` - Option list; see [`CropOptions`]
    ///
    /// # Errors
    ///
    /// * `CropError::InvalidOptions` - When the option list does not validate
    /// * `CropError::EmptyTarget` - When either target dimension is zero
    /// * `CropError::TargetTooLarge` - When the target exceeds the image
    ///
    /// # Examples
    ///
    /// ```
    /// use imageops_draw::{Image, Options, SmartCrop};
    /// use image::Rgb;
    ///
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let image: Image<Rgb<u8>> = Image::new(64, 48);
    /// let options = Options::new().with("focus", "attention");
    /// let cropped = image.smart_crop(32, 32, &options)?;
    /// assert_eq!(cropped.dimensions(), (32, 32));
    /// # Ok(())
    /// # }
    /// ```
    fn smart_crop(
        &self,
        width: u32,
        height: u32,
        options: &Options,
    ) -> Result<Self::Output, CropError>;
}

impl<P> SmartCrop for Image<P>
where
    P: Pixel + 'static,
    P::Subpixel: Into<f32> + Clamp<f32>,
{
    type Output = Self;

    fn smart_crop(&self, width: u32, height: u32, options: &Options) -> Result<Self, CropError> {
        let CropOptions { focus } = CropOptions::from_options(options)?;
        let (image_width, image_height) = self.dimensions();

        if width == 0 || height == 0 {
            return Err(CropError::EmptyTarget((width, height)));
        }
        if width > image_width || height > image_height {
            return Err(CropError::TargetTooLarge {
                target: (width, height),
                actual: (image_width, image_height),
            });
        }

        let (x, y) = match focus {
            Interesting::None | Interesting::Low => (0, 0),
            Interesting::Centre => ((image_width - width) / 2, (image_height - height) / 2),
            Interesting::High => (image_width - width, image_height - height),
            Interesting::Entropy => entropy_window(&to_gray(self), width, height),
            Interesting::Attention => attention_window(self, width, height),
        };

        Ok(imageops::crop_imm(self, x, y, width, height).to_image())
    }
}

fn to_gray<P>(image: &Image<P>) -> GrayImage
where
    P: Pixel,
    P::Subpixel: Into<f32> + Clamp<f32>,
{
    let max = P::Subpixel::DEFAULT_MAX_VALUE.into();
    map_colors(image, |pixel| {
        let Luma([luma]) = pixel.to_luma();
        Luma([<u8 as Clamp<f32>>::clamp(luma.into() / max * 255.0)])
    })
}

/// Shaves the lower-entropy edge strip until the target size is reached
fn entropy_window(gray: &GrayImage, width: u32, height: u32) -> (u32, u32) {
    let (mut right, mut bottom) = gray.dimensions();
    let (mut left, mut top) = (0, 0);

    while right - left > width {
        let strip = (right - left - width).min(ENTROPY_STRIP);
        let leading = region_entropy(gray, left, top, strip, bottom - top);
        let trailing = region_entropy(gray, right - strip, top, strip, bottom - top);
        if leading < trailing {
            left += strip;
        } else {
            right -= strip;
        }
    }

    while bottom - top > height {
        let strip = (bottom - top - height).min(ENTROPY_STRIP);
        let leading = region_entropy(gray, left, top, right - left, strip);
        let trailing = region_entropy(gray, left, bottom - strip, right - left, strip);
        if leading < trailing {
            top += strip;
        } else {
            bottom -= strip;
        }
    }

    (left, top)
}

/// Shannon entropy of the grey-level histogram of a region, in bits
fn region_entropy(gray: &GrayImage, x: u32, y: u32, width: u32, height: u32) -> f64 {
    let mut histogram = [0u32; 256];
    for (row, column) in iproduct!(y..y + height, x..x + width) {
        histogram[usize::from(gray.get_pixel(column, row)[0])] += 1;
    }

    let total = f64::from(width * height);
    histogram
        .iter()
        .filter(|&&count| count > 0)
        .map(|&count| {
            let probability = f64::from(count) / total;
            -probability * probability.log2()
        })
        .sum()
}

/// Summed-area table over the per-pixel interest score
///
/// `data` has one extra leading row and column of zeros so that window sums
/// need no bounds checks.
struct ScoreTable {
    data: Vec<f64>,
    stride: usize,
}

impl ScoreTable {
    fn new(scores: &[f64], width: u32, height: u32) -> Self {
        let stride = width as usize + 1;
        let mut data = vec![0.0; stride * (height as usize + 1)];

        for y in 0..height as usize {
            let mut row_sum = 0.0;
            for x in 0..width as usize {
                row_sum += scores[y * width as usize + x];
                data[(y + 1) * stride + x + 1] = data[y * stride + x + 1] + row_sum;
            }
        }

        Self { data, stride }
    }

    fn window_sum(&self, x: u32, y: u32, width: u32, height: u32) -> f64 {
        let (x0, y0) = (x as usize, y as usize);
        let (x1, y1) = (x0 + width as usize, y0 + height as usize);
        self.data[y1 * self.stride + x1] - self.data[y0 * self.stride + x1]
            - self.data[y1 * self.stride + x0]
            + self.data[y0 * self.stride + x0]
    }
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    score: f64,
    x: u32,
    y: u32,
}

impl Candidate {
    /// Higher score wins; ties go to the smaller (y, x)
    fn better(self, other: Self) -> Self {
        if other.score > self.score
            || (other.score == self.score && (other.y, other.x) < (self.y, self.x))
        {
            other
        } else {
            self
        }
    }
}

/// Picks the window with the largest sum of edge strength and saturation
fn attention_window<P>(image: &Image<P>, width: u32, height: u32) -> (u32, u32)
where
    P: Pixel,
    P::Subpixel: Into<f32> + Clamp<f32>,
{
    let (image_width, image_height) = image.dimensions();
    let edges = sobel_gradients(&to_gray(image));
    let max = P::Subpixel::DEFAULT_MAX_VALUE.into();

    let scores: Vec<f64> = image
        .enumerate_pixels()
        .map(|(x, y, pixel)| {
            let bands = pixel.to_rgb();
            let channels = &bands.0;
            let (low, high) = channels.iter().fold((f32::MAX, f32::MIN), |(low, high), &band| {
                let value = band.into() / max;
                (low.min(value), high.max(value))
            });
            let saturation = f64::from(high - low) * 255.0;
            f64::from(edges.get_pixel(x, y)[0]) + saturation
        })
        .collect();

    let table = ScoreTable::new(&scores, image_width, image_height);
    let best_in_row = |y: u32| {
        (0..=image_width - width)
            .map(|x| Candidate {
                score: table.window_sum(x, y, width, height),
                x,
                y,
            })
            .reduce(Candidate::better)
    };

    let rows = 0..=image_height - height;

    #[cfg(feature = "rayon")]
    let best = rows
        .into_par_iter()
        .filter_map(best_in_row)
        .reduce_with(Candidate::better);

    #[cfg(not(feature = "rayon"))]
    let best = rows.filter_map(best_in_row).reduce(Candidate::better);

    best.map_or((0, 0), |candidate| (candidate.x, candidate.y))
}
