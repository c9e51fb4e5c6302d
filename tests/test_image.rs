// tests/test_image.rs — Integration tests for Image<T>, ImageView, Rgb, and conversions.
//
// These run with `cargo test --test test_image`.
// Integration tests live in tests/ and only see the crate's public API.

use frugal_cam::convert;
use frugal_cam::image::{Image, Rgb};

// ===== Image construction & basic access =====

#[test]
fn image_new_zero_initialized() {
    let img: Image<u8> = Image::new(100, 50);
    assert_eq!(img.width(), 100);
    assert_eq!(img.height(), 50);
    assert_eq!(img.get(0, 0), 0);
    assert_eq!(img.get(99, 49), 0);
}

#[test]
fn image_set_get_consistency() {
    let mut img: Image<u8> = Image::new(10, 10);
    // Checkerboard.
    for y in 0..10 {
        for x in 0..10 {
            let val = if (x + y) % 2 == 0 { 255u8 } else { 0u8 };
            img.set(x, y, val);
        }
    }
    for y in 0..10 {
        for x in 0..10 {
            let expected = if (x + y) % 2 == 0 { 255u8 } else { 0u8 };
            assert_eq!(img.get(x, y), expected, "mismatch at ({x}, {y})");
        }
    }
}

#[test]
fn image_from_vec_layout() {
    // 3×2 image, row-major:
    //  [10, 20, 30]
    //  [40, 50, 60]
    let img = Image::from_vec(3, 2, vec![10u8, 20, 30, 40, 50, 60]);
    assert_eq!(img.get(0, 0), 10);
    assert_eq!(img.get(2, 0), 30);
    assert_eq!(img.get(0, 1), 40);
    assert_eq!(img.get(2, 1), 60);
    assert_eq!(img.row(1), &[40, 50, 60]);
}

#[test]
fn image_from_fn_matches_coordinates() {
    let img = Image::from_fn(4, 3, |x, y| Rgb::new(x as u8, y as u8, 0));
    assert_eq!(img.get(3, 2), Rgb::new(3, 2, 0));
    assert_eq!(img.len(), 12);
}

#[test]
fn try_get_outside_is_none() {
    let img: Image<u8> = Image::filled(3, 3, 7);
    assert_eq!(img.try_get(1, 1), Some(7));
    assert_eq!(img.try_get(-1, 0), None);
    assert_eq!(img.try_get(0, 3), None);
}

#[test]
fn put_clipped_ignores_outside_writes() {
    let mut img: Image<u8> = Image::new(2, 2);
    img.put_clipped(-1, 0, 9);
    img.put_clipped(2, 1, 9);
    img.put_clipped(1, 1, 9);
    assert_eq!(img.as_slice(), &[0, 0, 0, 9]);
}

// ===== Sub-image views =====

#[test]
fn sub_image_coordinates() {
    // 5×5 image with pixel value = x * 10 + y
    let img = Image::from_fn(5, 5, |x, y| (x * 10 + y) as u8);

    // 3×3 view starting at (1, 2)
    let view = img.sub_image(1, 2, 3, 3);
    assert_eq!(view.width(), 3);
    assert_eq!(view.height(), 3);
    assert_eq!(view.origin(), (1, 2));

    // view(0,0) is img(1,2) = 12, view(2,2) is img(3,4) = 34
    assert_eq!(view.get(0, 0), 12);
    assert_eq!(view.get(2, 2), 34);
}

#[test]
fn sub_image_to_owned_decoupled() {
    let data: Vec<u8> = (0..16).collect();
    let img = Image::from_vec(4, 4, data);
    let view = img.sub_image(1, 1, 2, 2);
    let owned = view.to_owned_image();

    assert_eq!(owned.width(), 2);
    assert_eq!(owned.height(), 2);
    assert_eq!(owned.as_slice(), &[5, 6, 9, 10]);
}

// ===== Iterator =====

#[test]
fn pixels_iterator_order() {
    let img = Image::from_vec(2, 2, vec![1u8, 2, 3, 4]);
    let pixels: Vec<_> = img.pixels().collect();
    assert_eq!(pixels, vec![(0, 0, 1), (1, 0, 2), (0, 1, 3), (1, 1, 4)]);
}

// ===== Rgb =====

#[test]
fn rgb_luma_of_primaries() {
    assert_eq!(Rgb::new(255, 0, 0).luma(), 76);
    assert_eq!(Rgb::new(0, 255, 0).luma(), 150);
    assert_eq!(Rgb::new(0, 0, 255).luma(), 29);
    for v in [0u8, 1, 77, 128, 254, 255] {
        assert_eq!(Rgb::gray(v).luma(), v);
    }
}

#[test]
fn rgb_abs_diff_is_symmetric() {
    let a = Rgb::new(10, 200, 30);
    let b = Rgb::new(50, 100, 30);
    assert_eq!(a.abs_diff(b), Rgb::new(40, 100, 0));
    assert_eq!(b.abs_diff(a), a.abs_diff(b));
}

// ===== Conversions =====

#[test]
fn gray_to_rgb_and_back() {
    let gray = Image::from_vec(3, 1, vec![0u8, 99, 255]);
    let rgb = convert::gray_to_rgb(&gray);
    assert!(rgb.as_slice().iter().all(|p| p.r() == p.g() && p.g() == p.b()));
    assert!(convert::rgb_to_gray(&rgb) == gray);
}

#[test]
fn rgb24_bytes_must_match_dimensions() {
    let bytes = [1u8, 2, 3, 4, 5, 6];
    let frame = convert::frame_from_rgb24(2, 1, &bytes).unwrap();
    assert_eq!(frame.get(1, 0), Rgb::new(4, 5, 6));
    assert!(convert::frame_from_rgb24(2, 2, &bytes).is_none());
}

#[test]
fn framebuffer_packing() {
    let frame = Image::from_vec(2, 1, vec![Rgb::new(0x12, 0x34, 0x56), Rgb::WHITE]);
    let mut fb = vec![0u32; 2];
    convert::frame_to_framebuffer(&frame, &mut fb);
    assert_eq!(fb, vec![0x0012_3456, 0x00ff_ffff]);
}

// ===== Clone =====

#[test]
fn clone_is_independent() {
    let mut img: Image<u8> = Image::new(4, 4);
    img.set(0, 0, 42);
    let img2 = img.clone();
    img.set(0, 0, 99);
    assert_eq!(img2.get(0, 0), 42);
    assert_eq!(img.get(0, 0), 99);
}

// ===== Edge cases =====

#[test]
fn empty_dimension_image() {
    let img: Image<u8> = Image::new(0, 0);
    assert_eq!(img.width(), 0);
    assert_eq!(img.height(), 0);
    assert!(img.is_empty());
    assert_eq!(img.pixels().count(), 0);
}

#[test]
fn single_pixel_image() {
    let mut img: Image<u8> = Image::new(1, 1);
    img.set(0, 0, 123);
    assert_eq!(img.get(0, 0), 123);
    assert_eq!(img.row(0), &[123]);

    let view = img.sub_image(0, 0, 1, 1);
    assert_eq!(view.get(0, 0), 123);
}
