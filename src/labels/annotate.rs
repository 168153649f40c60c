use crate::{foundation::core::FrameRgb8, labels::record::Label};

pub const ANNOTATION_RGB: [u8; 3] = [255, 0, 0];

/// Outline every label's box with a one-pixel rectangle.
///
/// The outline is drawn on the box's outermost pixels, so it never leaves the frame. Empty
/// boxes are skipped.
pub fn annotate_frame(frame: &mut FrameRgb8, labels: &[Label]) {
    for label in labels {
        let b = label.bbox;
        if b.is_empty() {
            continue;
        }
        let bottom = b.bottom.min(frame.height);
        let right = b.right.min(frame.width);
        if b.top >= bottom || b.left >= right {
            continue;
        }
        for col in b.left..right {
            frame.set_pixel(b.top, col, ANNOTATION_RGB);
            frame.set_pixel(bottom - 1, col, ANNOTATION_RGB);
        }
        for row in b.top..bottom {
            frame.set_pixel(row, b.left, ANNOTATION_RGB);
            frame.set_pixel(row, right - 1, ANNOTATION_RGB);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/labels/annotate.rs"]
mod tests;
