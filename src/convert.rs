// convert.rs — Conversions between frame representations.
//
//   Image<Rgb> → Image<u8>   luma (what edge and motion filters consume)
//   Image<u8>  → Image<Rgb>  replicate to 3 channels for uniform display
//   Image<Rgb> → [u32]       packed 0x00RRGGBB framebuffer for minifb
//   raw RGB24 bytes → Image<Rgb>  camera decode output

use crate::image::{Image, Rgb};

/// Convert a color frame to single-channel intensity (BT.601 luma).
pub fn rgb_to_gray(src: &Image<Rgb>) -> Image<u8> {
    src.map(Rgb::luma)
}

/// Replicate a single-channel image into all three color channels.
pub fn gray_to_rgb(src: &Image<u8>) -> Image<Rgb> {
    src.map(Rgb::gray)
}

/// Build a frame from tightly packed RGB24 bytes (R, G, B per pixel).
///
/// Returns `None` when the byte count does not match `width * height * 3`,
/// which is how a truncated camera buffer shows up.
pub fn frame_from_rgb24(width: usize, height: usize, bytes: &[u8]) -> Option<Image<Rgb>> {
    if bytes.len() != width * height * 3 {
        return None;
    }
    let data = bytes
        .chunks_exact(3)
        .map(|c| Rgb([c[0], c[1], c[2]]))
        .collect();
    Some(Image::from_vec(width, height, data))
}

/// Convert an `image` crate RGB buffer into a frame.
pub fn frame_from_rgb_image(img: &::image::RgbImage) -> Image<Rgb> {
    let (w, h) = img.dimensions();
    let data = img.pixels().map(|p| Rgb(p.0)).collect();
    Image::from_vec(w as usize, h as usize, data)
}

/// Write `src` into a packed framebuffer. `fb` must hold exactly
/// `width * height` entries.
///
/// # Panics
/// Panics if the framebuffer length does not match the frame.
pub fn frame_to_framebuffer(src: &Image<Rgb>, fb: &mut [u32]) {
    assert_eq!(
        fb.len(),
        src.len(),
        "framebuffer length ({}) must equal frame pixel count ({})",
        fb.len(),
        src.len(),
    );
    for (dst, &px) in fb.iter_mut().zip(src.as_slice()) {
        *dst = px.to_u32();
    }
}
