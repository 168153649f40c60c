use crate::foundation::error::{SynthError, SynthResult};

/// Zero-based position of a frame inside a generated sequence.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Frame size in pixels. Rows come first everywhere in this crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Resolution {
    pub height: u32,
    pub width: u32,
}

impl Resolution {
    pub fn new(height: u32, width: u32) -> SynthResult<Self> {
        if height == 0 || width == 0 {
            return Err(SynthError::validation(
                "resolution height/width must be non-zero",
            ));
        }
        Ok(Self { height, width })
    }

    pub fn pixel_count(self) -> usize {
        self.height as usize * self.width as usize
    }
}

/// Axis-aligned pixel box, `top..bottom` rows and `left..right` columns (end-exclusive).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct BoundingBox {
    pub top: u32,
    pub bottom: u32,
    pub left: u32,
    pub right: u32,
}

impl BoundingBox {
    pub fn height(self) -> u32 {
        self.bottom.saturating_sub(self.top)
    }

    pub fn width(self) -> u32 {
        self.right.saturating_sub(self.left)
    }

    /// A box that covers no pixels (zero-sized footprint or a sliver exactly on the edge).
    pub fn is_empty(self) -> bool {
        self.height() == 0 || self.width() == 0
    }

    pub fn fits_within(self, res: Resolution) -> bool {
        self.top <= self.bottom
            && self.bottom <= res.height
            && self.left <= self.right
            && self.right <= res.width
    }
}

/// One finished frame: tightly packed RGB8, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRgb8 {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl FrameRgb8 {
    pub fn resolution(&self) -> Resolution {
        Resolution {
            height: self.height,
            width: self.width,
        }
    }

    pub fn pixel(&self, row: u32, col: u32) -> [u8; 3] {
        let i = (row as usize * self.width as usize + col as usize) * 3;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    pub fn set_pixel(&mut self, row: u32, col: u32, rgb: [u8; 3]) {
        let i = (row as usize * self.width as usize + col as usize) * 3;
        self.data[i..i + 3].copy_from_slice(&rgb);
    }

    pub fn into_image(self) -> SynthResult<image::RgbImage> {
        image::RgbImage::from_raw(self.width, self.height, self.data)
            .ok_or_else(|| SynthError::validation("frame data does not match width*height*3"))
    }

    pub fn from_image(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            data: img.into_raw(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
