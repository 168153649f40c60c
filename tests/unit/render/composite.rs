use super::*;
use crate::foundation::core::Resolution;

fn frame(h: u32, w: u32, v: f64) -> FrameAccum {
    FrameAccum::filled(Resolution::new(h, w).unwrap(), [v; 3])
}

#[test]
fn over_alpha_extremes() {
    assert_eq!(over_straight(40.0, 200, 0.0), 40.0);
    assert_eq!(over_straight(40.0, 200, 1.0), 200.0);
    assert_eq!(over_straight(0.0, 200, 0.5), 100.0);
}

#[test]
fn opaque_sprite_replaces_destination_exactly() {
    let mut dst = frame(4, 4, 77.3);
    let sprite = RgbaImage::from_pixel(2, 2, image::Rgba([10, 20, 30, 255]));
    composite_sprite(
        &mut dst,
        &sprite,
        PixelRect {
            row: 0,
            col: 0,
            height: 2,
            width: 2,
        },
        1,
        2,
    );
    for row in 0..4 {
        for col in 0..4 {
            let inside = (1..3).contains(&row) && (2..4).contains(&col);
            let expect = if inside { [10.0, 20.0, 30.0] } else { [77.3f32; 3] };
            assert_eq!(dst.pixel(row, col), expect, "({row},{col})");
        }
    }
}

#[test]
fn transparent_pixels_leave_background_untouched() {
    let mut dst = frame(2, 2, 50.0);
    let sprite = RgbaImage::from_pixel(2, 2, image::Rgba([255, 255, 255, 0]));
    let before = dst.clone();
    composite_sprite(
        &mut dst,
        &sprite,
        PixelRect {
            row: 0,
            col: 0,
            height: 2,
            width: 2,
        },
        0,
        0,
    );
    assert_eq!(dst, before);
}

#[test]
fn sub_rectangle_offsets_into_the_sprite() {
    let mut dst = frame(1, 1, 0.0);
    let mut sprite = RgbaImage::from_pixel(3, 3, image::Rgba([0, 0, 0, 255]));
    sprite.put_pixel(2, 1, image::Rgba([9, 8, 7, 255]));
    composite_sprite(
        &mut dst,
        &sprite,
        PixelRect {
            row: 1,
            col: 2,
            height: 1,
            width: 1,
        },
        0,
        0,
    );
    assert_eq!(dst.pixel(0, 0), [9.0, 8.0, 7.0]);
}
