// image.rs — Runtime-sized image container, generic over pixel type.
//
// Two concrete pixel types flow through the demo loop:
//   Image<Rgb> — a captured camera frame (3 channels, 8 bits each)
//   Image<u8>  — single-channel results: luma, edge maps, motion masks
//
// Pixels are stored row-major with no padding, so the buffer length is
// always width * height. Sub-regions (the ROI crop) are borrowed through
// `ImageView` instead of copied.
//
// NEW RUST CONCEPTS:
// - A trait (`Pixel`) implemented for both primitives and a newtype (`Rgb`)
// - Lifetime-parameterized views (`ImageView<'a, T>`)
// - `impl Iterator` return types

use std::fmt;

// ---------------------------------------------------------------------------
// Pixel Trait
// ---------------------------------------------------------------------------

/// Trait for types that can serve as pixel values in an Image.
///
/// `to_f32` collapses a pixel to a single intensity. For `Rgb` that is
/// BT.601 luma, so any generic filter (convolution, Sobel) can run
/// directly on a color frame.
pub trait Pixel: Copy + Default + PartialEq + Send + Sync + 'static {
    /// Intensity of this pixel as a raw (not normalized) f32.
    fn to_f32(self) -> f32;

    /// Build a pixel from a raw intensity, clamping and rounding as needed.
    fn from_f32(v: f32) -> Self;
}

impl Pixel for u8 {
    #[inline]
    fn to_f32(self) -> f32 {
        self as f32
    }

    #[inline]
    fn from_f32(v: f32) -> Self {
        v.clamp(0.0, 255.0).round() as u8
    }
}

impl Pixel for f32 {
    #[inline]
    fn to_f32(self) -> f32 {
        self
    }

    #[inline]
    fn from_f32(v: f32) -> Self {
        v
    }
}

/// An 8-bit RGB pixel, channels in R, G, B order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    pub const BLACK: Rgb = Rgb([0, 0, 0]);
    pub const WHITE: Rgb = Rgb([255, 255, 255]);
    pub const GREEN: Rgb = Rgb([0, 255, 0]);
    pub const YELLOW: Rgb = Rgb([255, 255, 0]);
    pub const CYAN: Rgb = Rgb([0, 255, 255]);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb([r, g, b])
    }

    /// Same value in all three channels.
    #[inline]
    pub const fn gray(v: u8) -> Self {
        Rgb([v, v, v])
    }

    #[inline]
    pub fn r(self) -> u8 {
        self.0[0]
    }

    #[inline]
    pub fn g(self) -> u8 {
        self.0[1]
    }

    #[inline]
    pub fn b(self) -> u8 {
        self.0[2]
    }

    /// BT.601 luma, rounded to nearest: Y = 0.299 R + 0.587 G + 0.114 B.
    ///
    /// Computed in 14-bit fixed point so the result is exact for gray
    /// inputs (R = G = B = v gives Y = v).
    #[inline]
    pub fn luma(self) -> u8 {
        const R: u32 = 4899; // 0.299 * 2^14
        const G: u32 = 9617; // 0.587 * 2^14
        const B: u32 = 1868; // 0.114 * 2^14
        let y = R * self.r() as u32 + G * self.g() as u32 + B * self.b() as u32;
        ((y + (1 << 13)) >> 14) as u8
    }

    /// Per-channel absolute difference.
    #[inline]
    pub fn abs_diff(self, other: Rgb) -> Rgb {
        Rgb([
            self.0[0].abs_diff(other.0[0]),
            self.0[1].abs_diff(other.0[1]),
            self.0[2].abs_diff(other.0[2]),
        ])
    }

    /// Pack as 0x00RRGGBB, the layout minifb expects.
    #[inline]
    pub fn to_u32(self) -> u32 {
        ((self.r() as u32) << 16) | ((self.g() as u32) << 8) | self.b() as u32
    }
}

impl Pixel for Rgb {
    #[inline]
    fn to_f32(self) -> f32 {
        self.luma() as f32
    }

    #[inline]
    fn from_f32(v: f32) -> Self {
        Rgb::gray(u8::from_f32(v))
    }
}

// ---------------------------------------------------------------------------
// Image<T>
// ---------------------------------------------------------------------------

/// A 2D image with runtime dimensions, generic over pixel type `T`.
pub struct Image<T: Pixel> {
    /// Row-major pixels. Length = width * height.
    data: Vec<T>,
    width: usize,
    height: usize,
}

// Clone is written out so call sites read as an explicit (heap) copy.
impl<T: Pixel> Clone for Image<T> {
    fn clone(&self) -> Self {
        Image {
            data: self.data.clone(),
            width: self.width,
            height: self.height,
        }
    }
}

impl<T: Pixel> PartialEq for Image<T> {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height && self.data == other.data
    }
}

impl<T: Pixel> Image<T> {
    /// Create a zero-initialized image.
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, T::default())
    }

    /// Create an image with every pixel set to `value`.
    pub fn filled(width: usize, height: usize, value: T) -> Self {
        Image {
            data: vec![value; width * height],
            width,
            height,
        }
    }

    /// Create an image from an existing row-major pixel vector.
    ///
    /// # Panics
    /// Panics if `data.len() != width * height`.
    pub fn from_vec(width: usize, height: usize, data: Vec<T>) -> Self {
        assert_eq!(
            data.len(),
            width * height,
            "data length ({}) must equal width * height ({})",
            data.len(),
            width * height,
        );
        Image { data, width, height }
    }

    /// Build an image by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Image { data, width, height }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of pixels.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get the pixel value at (x, y). x is column, y is row.
    ///
    /// # Panics
    /// Panics if (x, y) is out of bounds.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> T {
        self.bounds_check(x, y);
        self.data[y * self.width + x]
    }

    /// Bounds-checked access returning `None` outside the image.
    /// Takes signed coordinates so drawing code can clip freely.
    #[inline]
    pub fn try_get(&self, x: isize, y: isize) -> Option<T> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(self.data[y as usize * self.width + x as usize])
    }

    #[inline]
    pub fn get_mut(&mut self, x: usize, y: usize) -> &mut T {
        self.bounds_check(x, y);
        let idx = y * self.width + x;
        &mut self.data[idx]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: T) {
        *self.get_mut(x, y) = value;
    }

    /// Write a pixel if (x, y) lies inside the image; silently ignore
    /// anything outside. Used by all raster drawing.
    #[inline]
    pub fn put_clipped(&mut self, x: isize, y: isize, value: T) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            let idx = y as usize * self.width + x as usize;
            self.data[idx] = value;
        }
    }

    #[inline]
    pub fn row(&self, y: usize) -> &[T] {
        assert!(y < self.height, "row {y} out of bounds (height {})", self.height);
        let start = y * self.width;
        &self.data[start..start + self.width]
    }

    #[inline]
    pub fn row_mut(&mut self, y: usize) -> &mut [T] {
        assert!(y < self.height, "row {y} out of bounds (height {})", self.height);
        let start = y * self.width;
        &mut self.data[start..start + self.width]
    }

    /// Borrow a rectangular sub-region as an `ImageView`.
    ///
    /// The view cannot outlive `&self`, so the parent frame can't be
    /// dropped or mutated while a crop of it is alive.
    ///
    /// # Panics
    /// Panics if the sub-region extends beyond image bounds.
    pub fn sub_image(&self, x: usize, y: usize, w: usize, h: usize) -> ImageView<'_, T> {
        assert!(
            x + w <= self.width && y + h <= self.height,
            "sub_image region ({x},{y},{w},{h}) exceeds image bounds ({},{})",
            self.width,
            self.height,
        );
        ImageView {
            parent: self,
            x0: x,
            y0: y,
            width: w,
            height: h,
        }
    }

    /// Iterate over all pixels as `(x, y, value)` tuples.
    pub fn pixels(&self) -> impl Iterator<Item = (usize, usize, T)> + '_ {
        let w = self.width;
        self.data
            .iter()
            .enumerate()
            .map(move |(i, &v)| (i % w, i / w, v))
    }

    /// Apply `f` to every pixel, producing a new image of possibly
    /// different pixel type.
    pub fn map<U: Pixel>(&self, f: impl Fn(T) -> U) -> Image<U> {
        Image {
            data: self.data.iter().map(|&v| f(v)).collect(),
            width: self.width,
            height: self.height,
        }
    }

    /// Combine two same-sized images pixel by pixel.
    ///
    /// # Panics
    /// Panics if the dimensions differ.
    pub fn zip_map<U: Pixel, V: Pixel>(&self, other: &Image<U>, f: impl Fn(T, U) -> V) -> Image<V> {
        assert!(
            self.width == other.width && self.height == other.height,
            "dimension mismatch: {}×{} vs {}×{}",
            self.width,
            self.height,
            other.width,
            other.height,
        );
        Image {
            data: self
                .data
                .iter()
                .zip(other.data.iter())
                .map(|(&a, &b)| f(a, b))
                .collect(),
            width: self.width,
            height: self.height,
        }
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    #[inline]
    fn bounds_check(&self, x: usize, y: usize) {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x},{y}) out of bounds for image {}×{}",
            self.width,
            self.height,
        );
    }
}

// Debug formatting — prints the top-left corner, enough for test failures.
impl<T: Pixel + fmt::Debug> fmt::Debug for Image<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Image<{}> {{ {}×{} }}",
            std::any::type_name::<T>(),
            self.width,
            self.height,
        )?;
        for y in 0..self.height.min(8) {
            write!(f, "  row {y}: [")?;
            for x in 0..self.width.min(16) {
                if x > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{:?}", self.get(x, y))?;
            }
            if self.width > 16 {
                write!(f, ", ...")?;
            }
            writeln!(f, "]")?;
        }
        if self.height > 8 {
            writeln!(f, "  ...")?;
        }
        Ok(())
    }
}

impl<T: Pixel> std::ops::Index<(usize, usize)> for Image<T> {
    type Output = T;

    #[inline]
    fn index(&self, (x, y): (usize, usize)) -> &T {
        self.bounds_check(x, y);
        &self.data[y * self.width + x]
    }
}

impl<T: Pixel> std::ops::IndexMut<(usize, usize)> for Image<T> {
    #[inline]
    fn index_mut(&mut self, (x, y): (usize, usize)) -> &mut T {
        self.get_mut(x, y)
    }
}

// ---------------------------------------------------------------------------
// ImageView<'a, T> — Borrowed sub-region of an Image
// ---------------------------------------------------------------------------

/// A borrowed, read-only view into a rectangular region of an `Image<T>`.
pub struct ImageView<'a, T: Pixel> {
    parent: &'a Image<T>,
    /// Top-left corner of the view in parent coordinates.
    x0: usize,
    y0: usize,
    width: usize,
    height: usize,
}

impl<'a, T: Pixel> ImageView<'a, T> {
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Top-left corner of the view within its parent.
    #[inline]
    pub fn origin(&self) -> (usize, usize) {
        (self.x0, self.y0)
    }

    /// Get the pixel at (x, y) within the view's coordinate system.
    /// (0, 0) is the top-left of the view, NOT the parent image.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> T {
        assert!(
            x < self.width && y < self.height,
            "ImageView pixel ({x},{y}) out of bounds for view {}×{}",
            self.width,
            self.height,
        );
        self.parent.get(self.x0 + x, self.y0 + y)
    }

    /// Borrow row `y` of the view as a contiguous slice.
    #[inline]
    pub fn row(&self, y: usize) -> &'a [T] {
        assert!(y < self.height, "row {y} out of bounds (height {})", self.height);
        let parent: &'a Image<T> = self.parent;
        &parent.row(self.y0 + y)[self.x0..self.x0 + self.width]
    }

    pub fn pixels(&self) -> impl Iterator<Item = (usize, usize, T)> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| (x, y, self.get(x, y))))
    }

    /// Copy the view's pixels into a new owned Image.
    pub fn to_owned_image(&self) -> Image<T> {
        let mut data = Vec::with_capacity(self.width * self.height);
        for y in 0..self.height {
            data.extend_from_slice(self.row(y));
        }
        Image::from_vec(self.width, self.height, data)
    }
}

impl<'a, T: Pixel + fmt::Debug> fmt::Debug for ImageView<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ImageView<{}> {{ {}×{} at ({}, {}) }}",
            std::any::type_name::<T>(),
            self.width,
            self.height,
            self.x0,
            self.y0,
        )
    }
}
