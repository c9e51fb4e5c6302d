// edges.rs — Canny edge detector.
//
//   1. Sobel gradients Ix, Iy (gradient.rs), L1 magnitude |Ix| + |Iy|
//   2. Quantize gradient direction to 0°, 45°, 90°, 135°
//   3. Non-maximum suppression along the gradient direction
//   4. Double threshold: > high is a strong edge, > low is a weak candidate
//   5. Hysteresis: weak pixels 8-connected to a strong pixel become edges
//
// No pre-blur; the Sobel smoothing taps are the only low-pass step. The
// one-pixel image border never produces edges.

use crate::convert::rgb_to_gray;
use crate::gradient::{l1_magnitude, sobel_xy};
use crate::image::{Image, Rgb};

/// Lower hysteresis threshold used by the live demo.
pub const CANNY_LOW: f32 = 50.0;
/// Upper hysteresis threshold used by the live demo.
pub const CANNY_HIGH: f32 = 150.0;

/// Value written for edge pixels in the output map.
pub const EDGE: u8 = 255;

/// tan(22.5°): boundary between the axis-aligned and diagonal sectors.
const TAN_22_5: f32 = 0.414_213_56;

/// Quantized gradient direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    /// Gradient along x; compare left/right neighbors.
    Horizontal,
    /// Gradient along y; compare up/down neighbors.
    Vertical,
    /// Gx and Gy share a sign (down-right in image coordinates).
    DiagonalDown,
    /// Gx and Gy have opposite signs.
    DiagonalUp,
}

impl Direction {
    fn quantize(gx: f32, gy: f32) -> Self {
        let (ax, ay) = (gx.abs(), gy.abs());
        if ay <= ax * TAN_22_5 {
            Direction::Horizontal
        } else if ax <= ay * TAN_22_5 {
            Direction::Vertical
        } else if gx * gy > 0.0 {
            Direction::DiagonalDown
        } else {
            Direction::DiagonalUp
        }
    }

    /// Offsets (dx, dy) of the two neighbors across the edge.
    fn neighbors(self) -> [(isize, isize); 2] {
        match self {
            Direction::Horizontal => [(-1, 0), (1, 0)],
            Direction::Vertical => [(0, -1), (0, 1)],
            Direction::DiagonalDown => [(-1, -1), (1, 1)],
            Direction::DiagonalUp => [(1, -1), (-1, 1)],
        }
    }
}

/// Run Canny on a single-channel image.
///
/// Returns a binary map: `EDGE` on edge pixels, 0 elsewhere.
/// Thresholds are in L1 Sobel-magnitude units; `high` is raised to `low`
/// if given smaller.
pub fn canny(gray: &Image<u8>, low: f32, high: f32) -> Image<u8> {
    let (w, h) = (gray.width(), gray.height());
    let high = high.max(low);
    if w < 3 || h < 3 {
        return Image::new(w, h);
    }

    let (ix, iy) = sobel_xy(gray);
    let mag = l1_magnitude(&ix, &iy);
    let thin = non_max_suppression(&mag, &ix, &iy);
    hysteresis(&thin, low, high)
}

/// Edge map of a color frame with the fixed demo thresholds.
pub fn edge_detection(frame: &Image<Rgb>) -> Image<u8> {
    canny(&rgb_to_gray(frame), CANNY_LOW, CANNY_HIGH)
}

/// Keep only pixels that are local maxima across the edge. Ties are
/// broken toward the "earlier" neighbor (strict `>` on one side) so a
/// plateau two pixels wide yields a one-pixel line.
fn non_max_suppression(mag: &Image<f32>, ix: &Image<f32>, iy: &Image<f32>) -> Image<f32> {
    let (w, h) = (mag.width(), mag.height());
    let mut out = Image::<f32>::new(w, h);

    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let m = mag.get(x, y);
            if m == 0.0 {
                continue;
            }
            let [(ax, ay), (bx, by)] = Direction::quantize(ix.get(x, y), iy.get(x, y)).neighbors();
            let m1 = mag.get((x as isize + ax) as usize, (y as isize + ay) as usize);
            let m2 = mag.get((x as isize + bx) as usize, (y as isize + by) as usize);
            if m > m1 && m >= m2 {
                out.set(x, y, m);
            }
        }
    }
    out
}

fn hysteresis(thin: &Image<f32>, low: f32, high: f32) -> Image<u8> {
    const WEAK: u8 = 1;

    let (w, h) = (thin.width(), thin.height());
    let mut state = Image::<u8>::new(w, h);
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for (x, y, v) in thin.pixels() {
        if v > high {
            state.set(x, y, EDGE);
            stack.push((x, y));
        } else if v > low {
            state.set(x, y, WEAK);
        }
    }

    // Flood from every strong pixel through weak ones.
    while let Some((x, y)) = stack.pop() {
        for ny in y.saturating_sub(1)..=(y + 1).min(h - 1) {
            for nx in x.saturating_sub(1)..=(x + 1).min(w - 1) {
                if state.get(nx, ny) == WEAK {
                    state.set(nx, ny, EDGE);
                    stack.push((nx, ny));
                }
            }
        }
    }

    // Unconnected weak pixels are dropped.
    state.map(|s| if s == EDGE { EDGE } else { 0 })
}
