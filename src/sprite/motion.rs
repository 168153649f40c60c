use crate::foundation::rng::SceneRng;

/// `(row, col)` pair used for positions, velocities and per-axis scales.
pub type RowCol = [f64; 2];

/// Trajectory of a sprite's top-left corner over its lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementFn {
    /// `initial + velocity * t`
    Linear,
    /// Stays at `initial`; velocity is ignored.
    Stationary,
}

impl MovementFn {
    pub const ALL: &'static [MovementFn] = &[MovementFn::Linear, MovementFn::Stationary];

    pub fn position(self, initial: RowCol, lifetime: f64, velocity: RowCol) -> RowCol {
        match self {
            MovementFn::Linear => [
                initial[0] + velocity[0] * lifetime,
                initial[1] + velocity[1] * lifetime,
            ],
            MovementFn::Stationary => initial,
        }
    }
}

/// Per-axis scale over a sprite's lifetime, always clamped to `[min_scale, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleFn {
    /// `clamp(initial + speed * t)`
    Linear,
    /// `clamp(initial)`; speed is ignored.
    Constant,
}

impl ScaleFn {
    pub const ALL: &'static [ScaleFn] = &[ScaleFn::Linear, ScaleFn::Constant];

    pub fn scale(self, initial: RowCol, lifetime: f64, speed: RowCol, min_scale: f64) -> RowCol {
        let raw = match self {
            ScaleFn::Linear => [
                initial[0] + speed[0] * lifetime,
                initial[1] + speed[1] * lifetime,
            ],
            ScaleFn::Constant => initial,
        };
        [raw[0].clamp(min_scale, 1.0), raw[1].clamp(min_scale, 1.0)]
    }
}

/// The strategies a simulator may assign to newly spawned sprites, sampled uniformly.
///
/// The default palette holds only the linear strategies.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StrategyPalette {
    movement: Vec<MovementFn>,
    scale: Vec<ScaleFn>,
}

impl Default for StrategyPalette {
    fn default() -> Self {
        Self {
            movement: vec![MovementFn::Linear],
            scale: vec![ScaleFn::Linear],
        }
    }
}

impl StrategyPalette {
    /// Returns `None` when either list is empty.
    pub fn new(movement: Vec<MovementFn>, scale: Vec<ScaleFn>) -> Option<Self> {
        if movement.is_empty() || scale.is_empty() {
            return None;
        }
        Some(Self { movement, scale })
    }

    pub fn movement(&self) -> &[MovementFn] {
        &self.movement
    }

    pub fn scale(&self) -> &[ScaleFn] {
        &self.scale
    }

    pub(crate) fn sample(&self, rng: &mut SceneRng) -> (MovementFn, ScaleFn) {
        let m = self.movement[rng.index(self.movement.len())];
        let s = self.scale[rng.index(self.scale.len())];
        (m, s)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sprite/motion.rs"]
mod tests;
