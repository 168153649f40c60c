use image::RgbaImage;

use crate::render::frame::FrameAccum;

/// Rectangle in pixel units, rows first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelRect {
    pub row: u32,
    pub col: u32,
    pub height: u32,
    pub width: u32,
}

/// Straight-alpha "over" of one RGB channel value: `dst * (1 - a) + src * a`.
pub fn over_straight(dst: f32, src: u8, alpha: f32) -> f32 {
    dst * (1.0 - alpha) + f32::from(src) * alpha
}

/// Composite `src_rect` of `sprite` onto `dst` with its top-left at `(dst_row, dst_col)`.
///
/// The caller clips `src_rect` so that it lies inside both images; alpha is the sprite's own
/// alpha channel divided by 255.
pub fn composite_sprite(
    dst: &mut FrameAccum,
    sprite: &RgbaImage,
    src_rect: PixelRect,
    dst_row: u32,
    dst_col: u32,
) {
    debug_assert!(src_rect.row + src_rect.height <= sprite.height());
    debug_assert!(src_rect.col + src_rect.width <= sprite.width());
    debug_assert!(dst_row + src_rect.height <= dst.height());
    debug_assert!(dst_col + src_rect.width <= dst.width());

    for dy in 0..src_rect.height {
        for dx in 0..src_rect.width {
            let s = sprite.get_pixel(src_rect.col + dx, src_rect.row + dy).0;
            if s[3] == 0 {
                continue;
            }
            let alpha = f32::from(s[3]) / 255.0;
            let d = dst.pixel_mut(dst_row + dy, dst_col + dx);
            for c in 0..3 {
                d[c] = over_straight(d[c], s[c], alpha);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
