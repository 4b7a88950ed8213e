use image::Pixel;
use imageproc::definitions::Clamp;

use crate::error::{DrawError, OptionError};
use crate::imageops_draw::color::{ink, Color};
use crate::imageops_draw::options::{expect_bool, expect_color, FromOptions, OptionValue, Options};
use crate::Image;

/// Validated options for [`FloodFill`]
///
/// Recognized keys:
///
/// * `color` - [`Color`] of the fill (default black)
/// * `equal` - fill pixels equal to the seed instead of stopping at the ink colour (default `false`)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloodOptions {
    pub color: Color,
    pub equal: bool,
}

impl Default for FloodOptions {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            equal: false,
        }
    }
}

impl FromOptions for FloodOptions {
    fn apply(&mut self, key: &str, value: &OptionValue) -> Result<(), OptionError> {
        match key {
            "color" => self.color = expect_color(key, value)?,
            "equal" => self.equal = expect_bool(key, value)?,
            _ => {}
        }
        Ok(())
    }
}

/// Bounding box of the pixels a flood fill painted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FloodRegion {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

impl FloodRegion {
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Trait providing in-place flood fill
pub trait FloodFill {
    /// Fills the 4-connected region around (`x`, `y`) with the ink colour
    ///
    /// With `equal = false` the fill spreads over every pixel that differs
    /// from the ink, so pixels already in the ink colour act as the boundary.
    /// With `equal = true` it spreads over pixels equal to the seed pixel.
    ///
    /// Returns the bounding box of the filled region, which is empty when
    /// the seed lies off the canvas or does not qualify for filling.
    ///
    /// # Errors
    ///
    /// * `DrawError::InvalidOptions` - When the option list does not validate
    /// * `DrawError::UnsupportedPixel` - When the pixel type cannot take a colour
    ///
    /// # Examples
    ///
    /// ```
    /// use imageops_draw::{Color, FloodFill, Image, Options};
    /// use image::Rgb;
    ///
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut image: Image<Rgb<u8>> = Image::new(4, 4);
    /// let options = Options::new().with("color", Color::Rgb([0.0, 255.0, 0.0]));
    /// let region = image.flood(0, 0, &options)?;
    /// assert_eq!((region.width, region.height), (4, 4));
    /// # Ok(())
    /// # }
    /// ```
    fn flood(&mut self, x: i32, y: i32, options: &Options) -> Result<FloodRegion, DrawError>;
}

impl<P> FloodFill for Image<P>
where
    P: Pixel + PartialEq,
    P::Subpixel: Into<f32> + Clamp<f32>,
{
    fn flood(&mut self, x: i32, y: i32, options: &Options) -> Result<FloodRegion, DrawError> {
        let FloodOptions { color, equal } = FloodOptions::from_options(options)?;
        let pixel = ink::<P>(color)?;

        let (width, height) = self.dimensions();
        let (Ok(start_x), Ok(start_y)) = (u32::try_from(x), u32::try_from(y)) else {
            return Ok(FloodRegion::default());
        };
        if start_x >= width || start_y >= height {
            return Ok(FloodRegion::default());
        }

        let seed = *self.get_pixel(start_x, start_y);
        let fillable = |candidate: &P| {
            if equal {
                *candidate == seed
            } else {
                *candidate != pixel
            }
        };
        if !fillable(&seed) {
            return Ok(FloodRegion::default());
        }

        let columns = width as usize;
        // Doubles as the visited set.
        let mut filled = vec![false; columns * height as usize];
        let mut stack = Vec::with_capacity(1024);
        filled[start_y as usize * columns + start_x as usize] = true;
        stack.push((start_x, start_y));

        let (mut min_x, mut min_y, mut max_x, mut max_y) = (start_x, start_y, start_x, start_y);

        while let Some((cx, cy)) = stack.pop() {
            min_x = min_x.min(cx);
            min_y = min_y.min(cy);
            max_x = max_x.max(cx);
            max_y = max_y.max(cy);

            let neighbours = [
                (cx.checked_sub(1), Some(cy)),
                (cx.checked_add(1).filter(|&nx| nx < width), Some(cy)),
                (Some(cx), cy.checked_sub(1)),
                (Some(cx), cy.checked_add(1).filter(|&ny| ny < height)),
            ];
            for (nx, ny) in neighbours {
                let (Some(nx), Some(ny)) = (nx, ny) else {
                    continue;
                };
                let index = ny as usize * columns + nx as usize;
                if !filled[index] && fillable(self.get_pixel(nx, ny)) {
                    filled[index] = true;
                    stack.push((nx, ny));
                }
            }
        }

        // Paint after the search so the fill cannot see its own ink.
        for (index, _) in filled.iter().enumerate().filter(|(_, done)| **done) {
            let fx = (index % columns) as u32;
            let fy = (index / columns) as u32;
            self.put_pixel(fx, fy, pixel);
        }

        Ok(FloodRegion {
            left: min_x,
            top: min_y,
            width: max_x - min_x + 1,
            height: max_y - min_y + 1,
        })
    }
}
