use crate::foundation::rng::SceneRng;

/// Slowly drifting solid background color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Background {
    color: [f64; 3],
}

impl Background {
    /// Components are clamped to `[0, 255]`.
    pub fn new(color: [f64; 3]) -> Self {
        Self {
            color: color.map(|c| c.clamp(0.0, 255.0)),
        }
    }

    /// Uniform color with every component in `[0, 255)`.
    pub fn random(rng: &mut SceneRng) -> Self {
        Self::new([
            rng.uniform() * 255.0,
            rng.uniform() * 255.0,
            rng.uniform() * 255.0,
        ])
    }

    pub fn color(&self) -> [f64; 3] {
        self.color
    }

    /// One frame of drift: independent per-channel deltas in `[-component_max, component_max]`,
    /// then one shared brightness delta in `[-brightness_max, brightness_max]`, then clamp.
    pub fn drift(&mut self, rng: &mut SceneRng, component_max: f64, brightness_max: f64) {
        for c in &mut self.color {
            *c += (rng.uniform() - 0.5) * 2.0 * component_max;
        }
        let brightness = (rng.uniform() - 0.5) * 2.0 * brightness_max;
        for c in &mut self.color {
            *c = (*c + brightness).clamp(0.0, 255.0);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/background.rs"]
mod tests;
