use std::{path::Path, time::Instant};

use anyhow::Context as _;

use crate::{
    encode::ffmpeg::{FfmpegEncoder, default_mp4_config},
    foundation::{
        core::{FrameIndex, FrameRgb8},
        error::SynthResult,
    },
    labels::{annotate::annotate_frame, io::write_labels, record::SequenceLabels},
    scene::{config::SceneConfig, simulator::SceneSimulator},
    sprite::template::SpriteTemplate,
};

pub const IMAGES_DIR: &str = "images";
pub const IMAGES_ANNOTATED_DIR: &str = "images_annotated";
pub const LABELS_FILE: &str = "labels.json";
pub const VIDEO_FILE: &str = "video.mp4";
pub const VIDEO_ANNOTATED_FILE: &str = "video_annotated.mp4";

pub fn frame_file_name(index: FrameIndex) -> String {
    format!("frame_{:06}.png", index.0)
}

/// What to write next to the plain frame images.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SequenceOptions {
    /// Encode `video.mp4` with the system ffmpeg.
    pub write_video: bool,
    /// Write `images_annotated/` with label outlines (and `video_annotated.mp4` with video).
    pub write_annotated: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SequenceStats {
    pub frames: u64,
    pub objects: u64,
    pub peak_population: usize,
    /// Wall-clock seconds spent generating and writing the sequence.
    pub elapsed_secs: f64,
}

/// Generate `frame_count` frames of one sequence into `out_dir`.
///
/// Layout: `images/frame_NNNNNN.png`, `labels.json`, plus the optional outputs selected in
/// `opts`. A zero frame count writes nothing.
#[tracing::instrument(skip(templates, config, out_dir, opts), fields(out = %out_dir.display()))]
pub fn generate_sequence(
    templates: &[SpriteTemplate],
    config: &SceneConfig,
    seed: u64,
    frame_count: u64,
    out_dir: &Path,
    opts: &SequenceOptions,
) -> SynthResult<SequenceStats> {
    let mut sim = SceneSimulator::new(templates.to_vec(), config.clone(), seed)?;
    if frame_count == 0 {
        return Ok(SequenceStats::default());
    }

    let images_dir = out_dir.join(IMAGES_DIR);
    create_dir(&images_dir)?;
    let annotated_dir = out_dir.join(IMAGES_ANNOTATED_DIR);
    if opts.write_annotated {
        create_dir(&annotated_dir)?;
    }

    let res = config.resolution;
    let mut video = None;
    let mut annotated_video = None;
    if opts.write_video {
        video = Some(FfmpegEncoder::new(default_mp4_config(
            out_dir.join(VIDEO_FILE),
            res.width,
            res.height,
            config.fps,
        ))?);
        if opts.write_annotated {
            annotated_video = Some(FfmpegEncoder::new(default_mp4_config(
                out_dir.join(VIDEO_ANNOTATED_FILE),
                res.width,
                res.height,
                config.fps,
            ))?);
        }
    }

    let started = Instant::now();
    let mut labels = SequenceLabels::default();
    let mut stats = SequenceStats::default();

    for _ in 0..frame_count {
        let out = sim.next_frame();
        let name = frame_file_name(out.index);
        save_png(&images_dir.join(&name), &out.frame)?;
        if let Some(enc) = video.as_mut() {
            enc.encode_frame(&out.frame)?;
        }

        if opts.write_annotated {
            let mut annotated = out.frame;
            annotate_frame(&mut annotated, &out.labels);
            save_png(&annotated_dir.join(&name), &annotated)?;
            if let Some(enc) = annotated_video.as_mut() {
                enc.encode_frame(&annotated)?;
            }
        }

        stats.frames += 1;
        stats.objects += out.labels.len() as u64;
        labels.push(out.index, out.labels);
    }
    stats.peak_population = sim.peak_population();

    let frame_secs = started.elapsed().as_secs_f64();
    tracing::info!(
        frames = stats.frames,
        secs = frame_secs,
        per_frame = frame_secs / stats.frames as f64,
        "frames generated"
    );

    if let Some(enc) = video {
        enc.finish()?;
        tracing::info!("video file generated");
    }
    if let Some(enc) = annotated_video {
        enc.finish()?;
    }

    write_labels(&out_dir.join(LABELS_FILE), &labels)?;
    tracing::info!(objects = stats.objects, "labels saved");
    stats.elapsed_secs = started.elapsed().as_secs_f64();
    Ok(stats)
}

fn create_dir(dir: &Path) -> SynthResult<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("create output dir '{}'", dir.display()))?;
    Ok(())
}

fn save_png(path: &Path, frame: &FrameRgb8) -> SynthResult<()> {
    image::save_buffer_with_format(
        path,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgb8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}
