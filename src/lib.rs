//! framesynth generates labeled, video-like image sequences for training object detectors.
//!
//! Sprites (labeled RGBA images) are spawned into a scene, move and scale along simple
//! trajectories, and are alpha-composited over a drifting, noisy background. Every frame comes
//! with the clipped pixel bounding box of each visible sprite.
//!
//! # Pipeline overview
//!
//! Each [`SceneSimulator::produce_next_frame`] call:
//!
//! 1. ages every active sprite by one frame tick
//! 2. spawns at most one sprite, with a probability that falls as the population grows
//! 3. drifts the background color
//! 4. fills the frame with the background and adds background noise
//! 5. renders sprites newest-first, retiring the ones that left the frame
//! 6. adds a final noise pass, clamps and quantizes to RGB8
//!
//! Around the engine sit the IO helpers: sprite loading ([`load_sprite_dir`]), label files
//! ([`write_labels`]), annotation overlays ([`annotate_frame`]), MP4 encoding via the system
//! `ffmpeg` ([`FfmpegEncoder`]) and dataset orchestration ([`generate_dataset`]).
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: all randomness comes from a per-simulator seeded [`SceneRng`].
//! - **Fail fast**: configuration and templates are validated when a simulator is built; frame
//!   production itself cannot fail.
#![forbid(unsafe_code)]

mod assets;
mod dataset;
mod encode;
mod foundation;
mod labels;
mod render;
mod scene;
mod sprite;

pub use assets::loader::{
    load_sprite_dir, load_sprite_image, scale_to_width, sprite_kind_from_path,
};
pub use dataset::plan::{
    DatasetPlan, SplitSpec, TEST_SPLIT, TRAINING_SPLIT, VALIDATION_SPLIT, generate_dataset,
};
pub use dataset::sequence::{
    IMAGES_ANNOTATED_DIR, IMAGES_DIR, LABELS_FILE, SequenceOptions, SequenceStats,
    VIDEO_ANNOTATED_FILE, VIDEO_FILE, frame_file_name, generate_sequence,
};
pub use encode::ffmpeg::{
    EncodeConfig, FfmpegEncoder, default_mp4_config, ensure_parent_dir, is_ffmpeg_on_path,
};
pub use foundation::core::{BoundingBox, FrameIndex, FrameRgb8, Resolution};
pub use foundation::error::{SynthError, SynthResult};
pub use foundation::rng::SceneRng;
pub use labels::annotate::{ANNOTATION_RGB, annotate_frame};
pub use labels::io::{read_labels, write_labels};
pub use labels::record::{FrameLabels, Label, SequenceLabels};
pub use render::composite::{PixelRect, composite_sprite, over_straight};
pub use render::frame::FrameAccum;
pub use scene::background::Background;
pub use scene::config::SceneConfig;
pub use scene::simulator::{
    AVERAGE_SCENE_SPAWN_PROBABILITY, EMPTY_SCENE_SPAWN_PROBABILITY, SceneFrame, SceneSimulator,
    spawn_probability,
};
pub use sprite::actor::{ActorState, Kinematics, RenderOutcome, SpriteActor};
pub use sprite::motion::{MovementFn, RowCol, ScaleFn, StrategyPalette};
pub use sprite::template::SpriteTemplate;
