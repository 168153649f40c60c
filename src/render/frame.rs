use crate::foundation::{
    core::{FrameRgb8, Resolution},
    rng::SceneRng,
};

/// Unquantized RGB working buffer for one frame, row-major, three `f32` per pixel.
///
/// Values may leave `[0, 255]` while noise and sprites accumulate; [`Self::quantize`] clamps.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameAccum {
    res: Resolution,
    data: Vec<f32>,
}

impl FrameAccum {
    pub fn filled(res: Resolution, rgb: [f64; 3]) -> Self {
        let px = [rgb[0] as f32, rgb[1] as f32, rgb[2] as f32];
        let mut data = Vec::with_capacity(res.pixel_count() * 3);
        for _ in 0..res.pixel_count() {
            data.extend_from_slice(&px);
        }
        Self { res, data }
    }

    pub fn resolution(&self) -> Resolution {
        self.res
    }

    pub fn height(&self) -> u32 {
        self.res.height
    }

    pub fn width(&self) -> u32 {
        self.res.width
    }

    pub fn pixel(&self, row: u32, col: u32) -> [f32; 3] {
        let i = self.offset(row, col);
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    pub(crate) fn pixel_mut(&mut self, row: u32, col: u32) -> &mut [f32] {
        let i = self.offset(row, col);
        &mut self.data[i..i + 3]
    }

    fn offset(&self, row: u32, col: u32) -> usize {
        (row as usize * self.res.width as usize + col as usize) * 3
    }

    /// Add zero-mean Gaussian noise independently to every channel of every pixel.
    pub fn add_gaussian_noise(&mut self, rng: &mut SceneRng, sigma: f64) {
        if sigma <= 0.0 {
            return;
        }
        let sigma = sigma as f32;
        for v in &mut self.data {
            *v += rng.standard_normal_f32() * sigma;
        }
    }

    /// Clamp to `[0, 255]` and truncate to 8 bits.
    pub fn quantize(&self) -> FrameRgb8 {
        FrameRgb8 {
            width: self.res.width,
            height: self.res.height,
            data: self.data.iter().map(|v| v.clamp(0.0, 255.0) as u8).collect(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
