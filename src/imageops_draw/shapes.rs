use image::Pixel;
use imageproc::definitions::Clamp;
use imageproc::drawing::{draw_filled_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;
use itertools::iproduct;

use crate::error::{DrawError, OptionError};
use crate::imageops_draw::color::{ink, Color};
use crate::imageops_draw::options::{
    expect_bool, expect_color, expect_positive_int, FromOptions, OptionValue, Options,
};
use crate::Image;

/// Options for operations that only take an ink colour
///
/// Recognized keys:
///
/// * `color` - [`Color`] (default black)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InkOptions {
    pub color: Color,
}

pub type PointOptions = InkOptions;
pub type LineOptions = InkOptions;

impl Default for InkOptions {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
        }
    }
}

impl FromOptions for InkOptions {
    fn apply(&mut self, key: &str, value: &OptionValue) -> Result<(), OptionError> {
        if key == "color" {
            self.color = expect_color(key, value)?;
        }
        Ok(())
    }
}

/// Options for rectangles and circles
///
/// Recognized keys:
///
/// * `color` - [`Color`] (default black)
/// * `fill` - whether to fill the shape (default `true`)
/// * `stroke_width` - outline thickness in pixels when not filled (default `1`)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeOptions {
    pub color: Color,
    pub fill: bool,
    pub stroke_width: u32,
}

pub type RectOptions = ShapeOptions;
pub type CircleOptions = ShapeOptions;

impl Default for ShapeOptions {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            fill: true,
            stroke_width: 1,
        }
    }
}

impl FromOptions for ShapeOptions {
    fn apply(&mut self, key: &str, value: &OptionValue) -> Result<(), OptionError> {
        match key {
            "color" => self.color = expect_color(key, value)?,
            "fill" => self.fill = expect_bool(key, value)?,
            "stroke_width" => self.stroke_width = expect_positive_int(key, value)?,
            _ => {}
        }
        Ok(())
    }
}

/// Trait providing in-place drawing of simple shapes
///
/// Coordinates may lie partly or entirely off the canvas; whatever falls
/// outside is clipped.
pub trait DrawShapes {
    /// Sets a single pixel
    ///
    /// # Errors
    ///
    /// * `DrawError::InvalidOptions` - When the option list does not validate
    /// * `DrawError::UnsupportedPixel` - When the pixel type cannot take a colour
    fn draw_point(&mut self, x: i32, y: i32, options: &Options) -> Result<&mut Self, DrawError>;

    /// Draws a rectangle with its top-left corner at (`left`, `top`)
    ///
    /// Unfilled rectangles are outlined with `stroke_width` pixels measured
    /// inwards from the edge.
    ///
    /// # Errors
    ///
    /// * `DrawError::InvalidGeometry` - When `width` or `height` is zero
    /// * `DrawError::InvalidOptions` - When the option list does not validate
    /// * `DrawError::UnsupportedPixel` - When the pixel type cannot take a colour
    ///
    /// # Examples
    ///
    /// ```
    /// use imageops_draw::{Color, DrawShapes, Image, Options};
    /// use image::Rgb;
    ///
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut image: Image<Rgb<u8>> = Image::new(10, 10);
    /// let options = Options::new()
    ///     .with("color", Color::Rgb([255.0, 255.0, 255.0]))
    ///     .with("fill", false);
    /// image.draw_rect(2, 2, 6, 6, &options)?;
    /// assert_eq!(image.get_pixel(2, 2), &Rgb([255, 255, 255]));
    /// assert_eq!(image.get_pixel(4, 4), &Rgb([0, 0, 0]));
    /// # Ok(())
    /// # }
    /// ```
    fn draw_rect(
        &mut self,
        left: i32,
        top: i32,
        width: u32,
        height: u32,
        options: &Options,
    ) -> Result<&mut Self, DrawError>;

    /// Draws a circle centred on (`cx`, `cy`)
    ///
    /// Unfilled circles are drawn as a ring `stroke_width` pixels thick
    /// inside the given radius.
    ///
    /// # Errors
    ///
    /// * `DrawError::InvalidGeometry` - When `radius` is not positive
    /// * `DrawError::InvalidOptions` - When the option list does not validate
    /// * `DrawError::UnsupportedPixel` - When the pixel type cannot take a colour
    fn draw_circle(
        &mut self,
        cx: i32,
        cy: i32,
        radius: i32,
        options: &Options,
    ) -> Result<&mut Self, DrawError>;

    /// Draws a straight line between two points
    ///
    /// # Errors
    ///
    /// * `DrawError::InvalidOptions` - When the option list does not validate
    /// * `DrawError::UnsupportedPixel` - When the pixel type cannot take a colour
    fn draw_line(
        &mut self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        options: &Options,
    ) -> Result<&mut Self, DrawError>;
}

impl<P> DrawShapes for Image<P>
where
    P: Pixel + 'static,
    P::Subpixel: Into<f32> + Clamp<f32>,
{
    fn draw_point(&mut self, x: i32, y: i32, options: &Options) -> Result<&mut Self, DrawError> {
        let PointOptions { color } = PointOptions::from_options(options)?;
        let pixel = ink::<P>(color)?;

        if let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) {
            if x < self.width() && y < self.height() {
                self.put_pixel(x, y, pixel);
            }
        }
        Ok(self)
    }

    fn draw_rect(
        &mut self,
        left: i32,
        top: i32,
        width: u32,
        height: u32,
        options: &Options,
    ) -> Result<&mut Self, DrawError> {
        if width == 0 || height == 0 {
            return Err(DrawError::InvalidGeometry(format!(
                "rectangle size must be non-zero, got {width}x{height}"
            )));
        }

        let RectOptions {
            color,
            fill,
            stroke_width,
        } = RectOptions::from_options(options)?;
        let pixel = ink::<P>(color)?;

        if fill {
            fill_clipped(
                self,
                i64::from(left),
                i64::from(top),
                i64::from(width),
                i64::from(height),
                pixel,
            );
            return Ok(self);
        }

        // Outline as four strips; a stroke wider than the rectangle fills it.
        let (left, top) = (i64::from(left), i64::from(top));
        let (width, height) = (i64::from(width), i64::from(height));
        let stroke = i64::from(stroke_width).min(width).min(height);
        fill_clipped(self, left, top, width, stroke, pixel);
        fill_clipped(self, left, top + height - stroke, width, stroke, pixel);
        fill_clipped(self, left, top, stroke, height, pixel);
        fill_clipped(self, left + width - stroke, top, stroke, height, pixel);
        Ok(self)
    }

    fn draw_circle(
        &mut self,
        cx: i32,
        cy: i32,
        radius: i32,
        options: &Options,
    ) -> Result<&mut Self, DrawError> {
        if radius <= 0 {
            return Err(DrawError::InvalidGeometry(format!(
                "circle radius must be positive, got {radius}"
            )));
        }

        let CircleOptions {
            color,
            fill,
            stroke_width,
        } = CircleOptions::from_options(options)?;
        let pixel = ink::<P>(color)?;

        let outer = i64::from(radius);
        let inner = if fill {
            0
        } else {
            (outer - i64::from(stroke_width)).max(0)
        };

        // Only the visible part of the bounding box is visited.
        let (cx, cy) = (i64::from(cx), i64::from(cy));
        let (image_width, image_height) = self.dimensions();
        let x0 = (cx - outer).max(0);
        let y0 = (cy - outer).max(0);
        let x1 = (cx + outer).min(i64::from(image_width) - 1);
        let y1 = (cy + outer).min(i64::from(image_height) - 1);
        if x0 > x1 || y0 > y1 {
            return Ok(self);
        }

        // |x - cx| and |y - cy| are at most i32::MAX here, so the squares fit.
        for (y, x) in iproduct!(y0..=y1, x0..=x1) {
            let distance = (x - cx).pow(2) + (y - cy).pow(2);
            if distance <= outer * outer && (inner == 0 || distance > inner * inner) {
                self.put_pixel(x as u32, y as u32, pixel);
            }
        }
        Ok(self)
    }

    fn draw_line(
        &mut self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        options: &Options,
    ) -> Result<&mut Self, DrawError> {
        let LineOptions { color } = LineOptions::from_options(options)?;
        let pixel = ink::<P>(color)?;

        draw_line_segment_mut(self, (x1 as f32, y1 as f32), (x2 as f32, y2 as f32), pixel);
        Ok(self)
    }
}

/// Fills the part of a rectangle that lies on the image
fn fill_clipped<P>(image: &mut Image<P>, left: i64, top: i64, width: i64, height: i64, pixel: P)
where
    P: Pixel + 'static,
{
    let x0 = left.max(0);
    let y0 = top.max(0);
    let x1 = (left + width).min(i64::from(image.width()));
    let y1 = (top + height).min(i64::from(image.height()));
    if x0 >= x1 || y0 >= y1 {
        return;
    }
    let (Ok(x), Ok(y)) = (i32::try_from(x0), i32::try_from(y0)) else {
        return;
    };

    let rect = Rect::at(x, y).of_size((x1 - x0) as u32, (y1 - y0) as u32);
    draw_filled_rect_mut(image, rect, pixel);
}
