use crate::foundation::{
    core::Resolution,
    error::{SynthError, SynthResult},
};

/// Tunables for one generated sequence.
///
/// All rates are expressed per second and converted to per-frame amounts with [`Self::fps`], so
/// changing the frame rate does not change how fast the scene evolves.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub resolution: Resolution,
    pub fps: u32,
    /// Lower clamp for either scale axis. Sprites are never rendered larger than 1.0.
    pub sprite_min_scale: f64,
    /// Population the spawn feedback settles around.
    pub average_sprite_count: f64,
    /// Scale rows and columns independently.
    pub allow_sprite_shearing: bool,
    /// Mean speed in pixels per second; sampled with sigma = mean / 2.
    pub mean_sprite_movement_speed: f64,
    /// Mean scale change per second; sampled with sigma = mean / 2.
    pub mean_sprite_scale_speed: f64,
    /// Max per-channel background drift, color units per second.
    pub background_component_drift: f64,
    /// Max shared brightness drift, color units per second.
    pub background_brightness_drift: f64,
    pub background_noise_sigma: f64,
    pub overall_noise_sigma: f64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            resolution: Resolution {
                height: 240,
                width: 320,
            },
            fps: 24,
            sprite_min_scale: 0.2,
            average_sprite_count: 3.0,
            allow_sprite_shearing: false,
            mean_sprite_movement_speed: 80.0,
            mean_sprite_scale_speed: 0.1,
            background_component_drift: 120.0,
            background_brightness_drift: 210.0,
            background_noise_sigma: 20.0,
            overall_noise_sigma: 15.0,
        }
    }
}

impl SceneConfig {
    /// Upper bound for the initial scale drawn at spawn.
    pub fn max_initial_scale(&self) -> f64 {
        if self.allow_sprite_shearing { 1.0 } else { 0.8 }
    }

    pub fn frame_duration_secs(&self) -> f64 {
        1.0 / f64::from(self.fps)
    }

    pub fn component_max_delta(&self) -> f64 {
        self.background_component_drift / f64::from(self.fps)
    }

    pub fn brightness_max_delta(&self) -> f64 {
        self.background_brightness_drift / f64::from(self.fps)
    }

    pub fn validate(&self) -> SynthResult<()> {
        Resolution::new(self.resolution.height, self.resolution.width)?;
        if self.fps == 0 {
            return Err(SynthError::validation("fps must be non-zero"));
        }
        let upper = self.max_initial_scale();
        if !(self.sprite_min_scale > 0.0 && self.sprite_min_scale <= upper) {
            return Err(SynthError::validation(format!(
                "sprite_min_scale must be in (0, {upper}], got {}",
                self.sprite_min_scale
            )));
        }
        if !(self.average_sprite_count > 0.0 && self.average_sprite_count.is_finite()) {
            return Err(SynthError::validation(
                "average_sprite_count must be positive and finite",
            ));
        }
        let non_negative = [
            ("mean_sprite_movement_speed", self.mean_sprite_movement_speed),
            ("mean_sprite_scale_speed", self.mean_sprite_scale_speed),
            ("background_component_drift", self.background_component_drift),
            ("background_brightness_drift", self.background_brightness_drift),
            ("background_noise_sigma", self.background_noise_sigma),
            ("overall_noise_sigma", self.overall_noise_sigma),
        ];
        for (name, v) in non_negative {
            if !(v >= 0.0 && v.is_finite()) {
                return Err(SynthError::validation(format!(
                    "{name} must be finite and >= 0, got {v}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/config.rs"]
mod tests;
