// roi.rs — Centered region of interest.
//
// The ROI spans the middle half of the frame in each axis:
//   x in [W/4, 3W/4),  y in [H/4, 3H/4)   (integer division)
// which is a quarter of the pixels. Anything outside is assumed to be
// background that does not need processing.

use crate::draw::draw_rect_outline;
use crate::image::{Image, ImageView, Pixel, Rgb};

/// Outline color drawn around the ROI.
pub const ROI_COLOR: Rgb = Rgb::GREEN;
/// Outline thickness in pixels.
pub const ROI_THICKNESS: usize = 2;

/// An axis-aligned rectangle, half-open on the right and bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Roi {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Roi {
    /// The centered ROI for a `width` × `height` frame.
    pub fn centered(width: usize, height: usize) -> Self {
        let (x1, y1) = (width / 4, height / 4);
        let (x2, y2) = (3 * width / 4, 3 * height / 4);
        Roi {
            x: x1,
            y: y1,
            width: x2 - x1,
            height: y2 - y1,
        }
    }

    /// Exclusive right edge.
    #[inline]
    pub fn x_end(&self) -> usize {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    #[inline]
    pub fn y_end(&self) -> usize {
        self.y + self.height
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        x >= self.x && x < self.x_end() && y >= self.y && y < self.y_end()
    }

    pub fn area(&self) -> usize {
        self.width * self.height
    }

    /// Borrow the ROI pixels of `img`.
    ///
    /// # Panics
    /// Panics if the ROI does not fit inside `img`.
    pub fn crop<'a, T: Pixel>(&self, img: &'a Image<T>) -> ImageView<'a, T> {
        img.sub_image(self.x, self.y, self.width, self.height)
    }
}

/// Output of ROI mode.
pub struct RoiOutput {
    /// Full frame with the ROI outlined.
    pub display: Image<Rgb>,
    pub roi: Roi,
}

/// Outline the centered ROI on a copy of `frame`.
///
/// The outline is drawn through the corner points (W/4, H/4) and
/// (3W/4, 3H/4), so its right and bottom edges sit on the first column
/// and row just outside the crop.
pub fn roi_processing(frame: &Image<Rgb>) -> RoiOutput {
    let roi = Roi::centered(frame.width(), frame.height());
    let mut display = frame.clone();
    draw_rect_outline(
        &mut display,
        (roi.x as isize, roi.y as isize),
        (roi.x_end() as isize, roi.y_end() as isize),
        ROI_COLOR,
        ROI_THICKNESS,
    );
    RoiOutput { display, roi }
}
