//! Synthetic test payloads
//!
//! Draws the colour test image and the circular mask sent with the
//! inpaint check. Shapes follow the inclusive bounding-box convention:
//! a box `(x0, y0, x1, y1)` covers pixels `x0..=x1` and `y0..=y1`.

use image::{GrayImage, ImageBuffer, Luma, Pixel, Rgb, RgbImage};

/// Side length of the generated image and mask
pub const TEST_IMAGE_SIZE: u32 = 256;

const LIGHT_BLUE: Rgb<u8> = Rgb([173, 216, 230]);
const RED: Rgb<u8> = Rgb([255, 0, 0]);
const YELLOW: Rgb<u8> = Rgb([255, 255, 0]);
const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

const MASK_KEEP: Luma<u8> = Luma([0]);
const MASK_FILL: Luma<u8> = Luma([255]);

/// Outline width of the drawn shapes
const OUTLINE_WIDTH: u32 = 2;

/// Inclusive pixel bounding box
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundingBox {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl BoundingBox {
    pub const fn new(x0: u32, y0: u32, x1: u32, y1: u32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        (self.x0..=self.x1).contains(&x) && (self.y0..=self.y1).contains(&y)
    }

    /// Box shrunk by `by` pixels on every side, `None` once it collapses
    pub fn inset(&self, by: u32) -> Option<Self> {
        let inner = Self::new(
            self.x0 + by,
            self.y0 + by,
            self.x1.checked_sub(by)?,
            self.y1.checked_sub(by)?,
        );
        (inner.x0 <= inner.x1 && inner.y0 <= inner.y1).then_some(inner)
    }

    pub fn center(&self) -> (f64, f64) {
        (
            f64::from(self.x0 + self.x1) / 2.0,
            f64::from(self.y0 + self.y1) / 2.0,
        )
    }

    /// Whether the pixel lies on or inside the ellipse inscribed in this box
    pub fn ellipse_contains(&self, x: u32, y: u32) -> bool {
        let (cx, cy) = self.center();
        let rx = f64::from(self.x1 - self.x0) / 2.0;
        let ry = f64::from(self.y1 - self.y0) / 2.0;
        if rx == 0.0 || ry == 0.0 {
            return self.contains(x, y);
        }
        let dx = (f64::from(x) - cx) / rx;
        let dy = (f64::from(y) - cy) / ry;
        dx * dx + dy * dy <= 1.0
    }
}

fn paint<P: Pixel>(
    image: &mut ImageBuffer<P, Vec<P::Subpixel>>,
    color: P,
    inside: impl Fn(u32, u32) -> bool,
) {
    for (x, y, pixel) in image.enumerate_pixels_mut() {
        if inside(x, y) {
            *pixel = color;
        }
    }
}

fn draw_rectangle(image: &mut RgbImage, bbox: BoundingBox, fill: Rgb<u8>, outline: Rgb<u8>) {
    paint(image, outline, |x, y| bbox.contains(x, y));
    if let Some(inner) = bbox.inset(OUTLINE_WIDTH) {
        paint(image, fill, |x, y| inner.contains(x, y));
    }
}

fn draw_ellipse(image: &mut RgbImage, bbox: BoundingBox, fill: Rgb<u8>, outline: Rgb<u8>) {
    paint(image, outline, |x, y| bbox.ellipse_contains(x, y));
    if let Some(inner) = bbox.inset(OUTLINE_WIDTH) {
        paint(image, fill, |x, y| inner.ellipse_contains(x, y));
    }
}

/// Light-blue canvas with a red square and an overlapping yellow disc
pub fn create_test_image(width: u32, height: u32) -> RgbImage {
    let mut image = RgbImage::from_pixel(width, height, LIGHT_BLUE);
    draw_rectangle(&mut image, BoundingBox::new(50, 50, 150, 150), RED, BLACK);
    draw_ellipse(&mut image, BoundingBox::new(100, 100, 200, 200), YELLOW, BLACK);
    image
}

/// Black mask with a white disc in the middle; white is reconstructed
pub fn create_test_mask(width: u32, height: u32) -> GrayImage {
    let mut mask = GrayImage::from_pixel(width, height, MASK_KEEP);
    let disc = BoundingBox::new(100, 100, 156, 156);
    paint(&mut mask, MASK_FILL, |x, y| disc.ellipse_contains(x, y));
    mask
}
