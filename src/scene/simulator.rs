use std::f64::consts::TAU;

use crate::{
    foundation::{
        core::{FrameIndex, FrameRgb8},
        error::{SynthError, SynthResult},
        rng::SceneRng,
    },
    labels::record::Label,
    render::frame::FrameAccum,
    scene::{background::Background, config::SceneConfig},
    sprite::{
        actor::{Kinematics, RenderOutcome, SpriteActor},
        motion::StrategyPalette,
        template::SpriteTemplate,
    },
};

/// Spawn chance when the scene is empty.
pub const EMPTY_SCENE_SPAWN_PROBABILITY: f64 = 0.5;
/// Spawn chance once the population reaches the configured average.
pub const AVERAGE_SCENE_SPAWN_PROBABILITY: f64 = 0.2;

/// Per-frame spawn probability for a scene currently holding `population` sprites.
///
/// Linear in the population, so crowded scenes spawn less and the count settles around
/// `average_sprite_count`. Values outside `[0, 1]` are not clamped here; they simply mean
/// "never" or "always" to the spawn draw.
pub fn spawn_probability(population: usize, average_sprite_count: f64) -> f64 {
    let slope =
        (AVERAGE_SCENE_SPAWN_PROBABILITY - EMPTY_SCENE_SPAWN_PROBABILITY) / average_sprite_count;
    slope * population as f64 + EMPTY_SCENE_SPAWN_PROBABILITY
}

/// A produced frame with its position in the sequence.
#[derive(Clone, Debug)]
pub struct SceneFrame {
    pub index: FrameIndex,
    pub frame: FrameRgb8,
    pub labels: Vec<Label>,
}

/// Stateful scene: sprite population, drifting background and the per-frame pipeline.
///
/// Frames must be produced strictly in order; every call depends on all previous ones.
/// Independent sequences are independent simulators and may run on different threads.
#[derive(Clone, Debug)]
pub struct SceneSimulator {
    config: SceneConfig,
    templates: Vec<SpriteTemplate>,
    palette: StrategyPalette,
    rng: SceneRng,
    background: Background,
    active: Vec<SpriteActor>,
    next_index: FrameIndex,
    peak_population: usize,
}

impl SceneSimulator {
    /// Validates `config` and `templates` up front; after this succeeds frame production
    /// cannot fail.
    pub fn new(templates: Vec<SpriteTemplate>, config: SceneConfig, seed: u64) -> SynthResult<Self> {
        config.validate()?;
        if templates.is_empty() {
            return Err(SynthError::validation(
                "scene needs at least one sprite template",
            ));
        }
        for t in &templates {
            t.validate()?;
        }

        let mut rng = SceneRng::seed_from_u64(seed);
        let background = Background::random(&mut rng);
        Ok(Self {
            config,
            templates,
            palette: StrategyPalette::default(),
            rng,
            background,
            active: Vec::new(),
            next_index: FrameIndex(0),
            peak_population: 0,
        })
    }

    pub fn with_palette(mut self, palette: StrategyPalette) -> Self {
        self.palette = palette;
        self
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn templates(&self) -> &[SpriteTemplate] {
        &self.templates
    }

    /// Active sprites in spawn order.
    pub fn active_sprites(&self) -> &[SpriteActor] {
        &self.active
    }

    pub fn population(&self) -> usize {
        self.active.len()
    }

    pub fn peak_population(&self) -> usize {
        self.peak_population
    }

    pub fn background_color(&self) -> [f64; 3] {
        self.background.color()
    }

    /// Index the next produced frame will carry.
    pub fn next_index(&self) -> FrameIndex {
        self.next_index
    }

    /// Put a hand-built actor into the scene, as if it had just spawned.
    pub fn insert_actor(&mut self, actor: SpriteActor) {
        self.active.push(actor);
        self.peak_population = self.peak_population.max(self.active.len());
    }

    /// Advance the scene by one frame and render it.
    ///
    /// Labels come out in draw order, which is newest sprite first.
    pub fn produce_next_frame(&mut self) -> (FrameRgb8, Vec<Label>) {
        for actor in &mut self.active {
            actor.increase_lifetime();
        }

        let p = spawn_probability(self.active.len(), self.config.average_sprite_count);
        let draw = self.rng.uniform();
        if p > 0.0 && draw <= p {
            let actor = self.spawn_actor();
            self.insert_actor(actor);
        }

        self.background.drift(
            &mut self.rng,
            self.config.component_max_delta(),
            self.config.brightness_max_delta(),
        );

        let mut frame = FrameAccum::filled(self.config.resolution, self.background.color());
        frame.add_gaussian_noise(&mut self.rng, self.config.background_noise_sigma);

        // Pass one: draw newest-first and remember each outcome.
        let outcomes: Vec<RenderOutcome> = self
            .active
            .iter_mut()
            .rev()
            .map(|actor| actor.render(&mut frame))
            .collect();

        // Pass two: labels in draw order, then drop expired actors keeping spawn order.
        let labels = self
            .active
            .iter()
            .rev()
            .zip(&outcomes)
            .filter_map(|(actor, outcome)| match outcome {
                RenderOutcome::Visible(bbox) => Some(Label {
                    kind: actor.kind().to_string(),
                    bbox: *bbox,
                }),
                RenderOutcome::OffScreen => None,
            })
            .collect();
        self.active.retain(SpriteActor::is_active);

        frame.add_gaussian_noise(&mut self.rng, self.config.overall_noise_sigma);

        self.next_index = FrameIndex(self.next_index.0 + 1);
        (frame.quantize(), labels)
    }

    /// [`Self::produce_next_frame`] tagged with the frame's index.
    pub fn next_frame(&mut self) -> SceneFrame {
        let index = self.next_index;
        let (frame, labels) = self.produce_next_frame();
        SceneFrame {
            index,
            frame,
            labels,
        }
    }

    fn spawn_actor(&mut self) -> SpriteActor {
        let cfg = &self.config;
        let rng = &mut self.rng;

        let template = &self.templates[rng.index(self.templates.len())];
        let variants = template.variants();
        let image = std::sync::Arc::clone(&variants[rng.index(variants.len())]);

        let half_h = f64::from(image.height()) / 2.0;
        let half_w = f64::from(image.width()) / 2.0;
        let initial_position = [
            rng.index(cfg.resolution.height as usize) as f64 - half_h,
            rng.index(cfg.resolution.width as usize) as f64 - half_w,
        ];

        let angle = rng.uniform() * TAU;
        let speed = rng.gauss(
            cfg.mean_sprite_movement_speed,
            cfg.mean_sprite_movement_speed / 2.0,
        );
        let velocity = [angle.sin() * speed, angle.cos() * speed];

        let upper = cfg.max_initial_scale();
        let mean_scale_speed = cfg.mean_sprite_scale_speed;
        let (initial_scale, mut scale_speed) = if cfg.allow_sprite_shearing {
            (
                [
                    rng.uniform_range(cfg.sprite_min_scale, upper),
                    rng.uniform_range(cfg.sprite_min_scale, upper),
                ],
                [
                    rng.gauss(mean_scale_speed, mean_scale_speed / 2.0),
                    rng.gauss(mean_scale_speed, mean_scale_speed / 2.0),
                ],
            )
        } else {
            let s = rng.uniform_range(cfg.sprite_min_scale, upper);
            let v = rng.gauss(mean_scale_speed, mean_scale_speed / 2.0);
            ([s, s], [v, v])
        };
        if rng.coin() {
            scale_speed = scale_speed.map(|v| -v);
        }

        let (movement, scale) = self.palette.sample(rng);

        tracing::debug!(
            kind = template.kind(),
            row = initial_position[0],
            col = initial_position[1],
            speed,
            "spawned sprite"
        );

        SpriteActor::new(
            template.kind_shared(),
            image,
            Kinematics {
                initial_position,
                initial_scale,
                velocity,
                scale_speed,
                movement,
                scale,
            },
            cfg.frame_duration_secs(),
            cfg.sprite_min_scale,
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/simulator.rs"]
mod tests;
