use std::sync::Arc;

use image::RgbaImage;

use crate::foundation::error::{SynthError, SynthResult};

/// A labeled source sprite and its orientation variants.
///
/// Images are straight-alpha RGBA8 and shared read-only by every actor spawned from the
/// template.
#[derive(Clone, Debug)]
pub struct SpriteTemplate {
    kind: Arc<str>,
    variants: Vec<Arc<RgbaImage>>,
}

impl SpriteTemplate {
    /// Template with a single orientation.
    pub fn new(kind: impl Into<Arc<str>>, image: RgbaImage) -> Self {
        Self {
            kind: kind.into(),
            variants: vec![Arc::new(image)],
        }
    }

    /// Template with the base image plus its horizontal mirror.
    pub fn with_mirrored(kind: impl Into<Arc<str>>, image: RgbaImage) -> Self {
        let mirrored = image::imageops::flip_horizontal(&image);
        Self {
            kind: kind.into(),
            variants: vec![Arc::new(image), Arc::new(mirrored)],
        }
    }

    pub fn from_variants(kind: impl Into<Arc<str>>, images: Vec<RgbaImage>) -> SynthResult<Self> {
        let t = Self {
            kind: kind.into(),
            variants: images.into_iter().map(Arc::new).collect(),
        };
        t.validate()?;
        Ok(t)
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub(crate) fn kind_shared(&self) -> Arc<str> {
        Arc::clone(&self.kind)
    }

    pub fn variants(&self) -> &[Arc<RgbaImage>] {
        &self.variants
    }

    pub fn validate(&self) -> SynthResult<()> {
        if self.variants.is_empty() {
            return Err(SynthError::validation(format!(
                "sprite template '{}' has no images",
                self.kind
            )));
        }
        for img in &self.variants {
            let (w, h) = img.dimensions();
            if w == 0 || h == 0 {
                return Err(SynthError::validation(format!(
                    "sprite template '{}' contains a zero-sized image ({w}x{h})",
                    self.kind
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sprite/template.rs"]
mod tests;
