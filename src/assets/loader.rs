use std::path::{Path, PathBuf};

use anyhow::Context as _;
use image::{RgbaImage, imageops::FilterType};

use crate::{
    foundation::error::{SynthError, SynthResult},
    sprite::template::SpriteTemplate,
};

/// Sprite category encoded in a file name: everything before the first `_` of the stem.
///
/// `car_01.png` and `car_red.png` are both `car`; `tree.png` is `tree`.
pub fn sprite_kind_from_path(path: &Path) -> Option<&str> {
    let stem = path.file_stem()?.to_str()?;
    let kind = stem.split('_').next()?;
    (!kind.is_empty()).then_some(kind)
}

/// Resize `img` so its width is `target_width`, keeping the aspect ratio.
pub fn scale_to_width(img: &RgbaImage, target_width: u32) -> RgbaImage {
    let (w, h) = img.dimensions();
    if w == target_width || w == 0 {
        return img.clone();
    }
    let factor = f64::from(target_width) / f64::from(w);
    let new_h = ((f64::from(h) * factor) as u32).max(1);
    image::imageops::resize(img, target_width, new_h, FilterType::Triangle)
}

pub fn load_sprite_image(path: &Path, target_width: u32) -> SynthResult<RgbaImage> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read sprite '{}'", path.display()))?;
    let img = image::load_from_memory(&bytes)
        .map_err(|e| SynthError::asset(format!("decode sprite '{}': {e}", path.display())))?
        .to_rgba8();
    if img.width() == 0 || img.height() == 0 {
        return Err(SynthError::asset(format!(
            "sprite '{}' is empty",
            path.display()
        )));
    }
    Ok(scale_to_width(&img, target_width))
}

/// Load every image in `dir` as a template with a mirrored variant, sorted by file name.
pub fn load_sprite_dir(dir: &Path, target_width: u32) -> SynthResult<Vec<SpriteTemplate>> {
    if target_width == 0 {
        return Err(SynthError::validation("sprite target width must be non-zero"));
    }

    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("list sprite dir '{}'", dir.display()))?;
    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("list sprite dir '{}'", dir.display()))?
            .path();
        if path.is_file() && image::ImageFormat::from_path(&path).is_ok() {
            paths.push(path);
        }
    }
    paths.sort();

    let mut templates = Vec::with_capacity(paths.len());
    for path in &paths {
        let Some(kind) = sprite_kind_from_path(path) else {
            tracing::warn!(path = %path.display(), "skipping sprite without a type prefix");
            continue;
        };
        let img = load_sprite_image(path, target_width)?;
        templates.push(SpriteTemplate::with_mirrored(kind, img));
    }

    if templates.is_empty() {
        return Err(SynthError::asset(format!(
            "no sprite images found in '{}'",
            dir.display()
        )));
    }
    tracing::info!(dir = %dir.display(), count = templates.len(), "loaded sprites");
    Ok(templates)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/loader.rs"]
mod tests;
