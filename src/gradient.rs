// gradient.rs — Image gradients via 3×3 Sobel operators.
//
// Sobel kernels are separable:
//   Sobel_x: row [-1, 0, 1] (derivative), col [1, 2, 1] (smoothing)
//   Sobel_y: row [ 1, 2, 1] (smoothing),  col [-1, 0, 1] (derivative)
//
// Border handling (clamp) comes from convolution.rs.

use crate::convolution::convolve_separable;
use crate::image::{Image, Pixel};

const SOBEL_DERIV: [f32; 3] = [-1.0, 0.0, 1.0];
const SOBEL_SMOOTH: [f32; 3] = [1.0, 2.0, 1.0];

/// Horizontal gradient Ix. Positive where intensity increases to the right.
/// Unnormalized: roughly [-1020, 1020] for u8 input.
pub fn sobel_x<T: Pixel>(src: &Image<T>) -> Image<f32> {
    convolve_separable(src, &SOBEL_DERIV, &SOBEL_SMOOTH)
}

/// Vertical gradient Iy. Positive where intensity increases downward.
pub fn sobel_y<T: Pixel>(src: &Image<T>) -> Image<f32> {
    convolve_separable(src, &SOBEL_SMOOTH, &SOBEL_DERIV)
}

/// Both gradients at once.
pub fn sobel_xy<T: Pixel>(src: &Image<T>) -> (Image<f32>, Image<f32>) {
    (sobel_x(src), sobel_y(src))
}

/// L1 gradient magnitude |Ix| + |Iy|.
///
/// This is the norm the edge detector thresholds against, so its
/// thresholds are in the same units as the classic (non-L2) Canny.
pub fn l1_magnitude(ix: &Image<f32>, iy: &Image<f32>) -> Image<f32> {
    ix.zip_map(iy, |gx, gy| gx.abs() + gy.abs())
}
