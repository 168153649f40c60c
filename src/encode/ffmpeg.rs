use std::{
    path::{Path, PathBuf},
    process::{Child, ChildStdin, Command, Stdio},
};

use crate::foundation::{
    core::FrameRgb8,
    error::{SynthError, SynthResult},
};

#[derive(Clone, Debug)]
pub struct EncodeConfig {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    pub out_path: PathBuf,
    pub overwrite: bool,
}

impl EncodeConfig {
    pub fn validate(&self) -> SynthResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(SynthError::validation(
                "encode width/height must be non-zero",
            ));
        }
        if self.fps == 0 {
            return Err(SynthError::validation("encode fps must be non-zero"));
        }
        if !self.width.is_multiple_of(2) || !self.height.is_multiple_of(2) {
            // yuv420p subsamples chroma 2x2
            return Err(SynthError::validation(
                "encode width/height must be even (required for yuv420p mp4 output)",
            ));
        }
        Ok(())
    }
}

pub fn default_mp4_config(
    out_path: impl Into<PathBuf>,
    width: u32,
    height: u32,
    fps: u32,
) -> EncodeConfig {
    EncodeConfig {
        width,
        height,
        fps,
        out_path: out_path.into(),
        overwrite: true,
    }
}

pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

pub fn ensure_parent_dir(path: &Path) -> SynthResult<()> {
    if let Some(parent) = path.parent() {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Streams raw RGB8 frames into a system `ffmpeg` process producing an H.264 MP4.
///
/// Dropping an encoder without calling [`FfmpegEncoder::finish`] abandons the video: the pipe is
/// closed, ffmpeg is reaped, its stderr is logged and the partial output file is removed.
pub struct FfmpegEncoder {
    cfg: EncodeConfig,
    child: Option<Child>,
    stdin: Option<ChildStdin>,
    frames: u64,
}

impl FfmpegEncoder {
    pub fn new(cfg: EncodeConfig) -> SynthResult<Self> {
        cfg.validate()?;
        ensure_parent_dir(&cfg.out_path)?;

        if !cfg.overwrite && cfg.out_path.exists() {
            return Err(SynthError::validation(format!(
                "output file '{}' already exists",
                cfg.out_path.display()
            )));
        }

        if !is_ffmpeg_on_path() {
            return Err(SynthError::encode(
                "ffmpeg is required for MP4 encoding, but was not found on PATH",
            ));
        }

        let mut cmd = Command::new("ffmpeg");
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        if cfg.overwrite {
            cmd.arg("-y");
        } else {
            cmd.arg("-n");
        }

        cmd.args([
            "-loglevel",
            "error",
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgb24",
            "-s",
            &format!("{}x{}", cfg.width, cfg.height),
            "-r",
            &cfg.fps.to_string(),
            "-i",
            "pipe:0",
            "-an",
            "-c:v",
            "libx264",
            "-pix_fmt",
            "yuv420p",
            "-movflags",
            "+faststart",
        ])
        .arg(&cfg.out_path);

        let child = cmd.spawn().map_err(|e| {
            SynthError::encode(format!(
                "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
            ))
        })?;

        tracing::debug!(out = %cfg.out_path.display(), "ffmpeg encoder started");
        Self::with_child(cfg, child)
    }

    /// Wrap an already spawned encoder process whose stdin and stderr are piped.
    fn with_child(cfg: EncodeConfig, mut child: Child) -> SynthResult<Self> {
        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| SynthError::encode("failed to open ffmpeg stdin (unexpected)"))?;

        Ok(Self {
            cfg,
            child: Some(child),
            stdin: Some(stdin),
            frames: 0,
        })
    }

    pub fn encode_frame(&mut self, frame: &FrameRgb8) -> SynthResult<()> {
        check_frame(&self.cfg, frame)?;

        let Some(stdin) = self.stdin.as_mut() else {
            return Err(SynthError::encode("ffmpeg encoder is already finalized"));
        };

        use std::io::Write as _;
        stdin.write_all(&frame.data).map_err(|e| {
            SynthError::encode(format!("failed to write frame to ffmpeg stdin: {e}"))
        })?;
        self.frames += 1;
        Ok(())
    }

    /// Close the pipe and wait for ffmpeg; returns the number of frames written.
    pub fn finish(mut self) -> SynthResult<u64> {
        drop(self.stdin.take());

        let Some(child) = self.child.take() else {
            return Err(SynthError::encode("ffmpeg encoder is already finalized"));
        };
        let output = child.wait_with_output().map_err(|e| {
            SynthError::encode(format!("failed to wait for ffmpeg to finish: {e}"))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SynthError::encode(format!(
                "ffmpeg exited with status {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        Ok(self.frames)
    }
}

impl Drop for FfmpegEncoder {
    fn drop(&mut self) {
        drop(self.stdin.take());
        let Some(child) = self.child.take() else {
            return;
        };

        let out = self.cfg.out_path.display();
        match child.wait_with_output() {
            Ok(output) => tracing::warn!(
                out = %out,
                frames = self.frames,
                status = %output.status,
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "ffmpeg encoder abandoned before finish"
            ),
            Err(e) => tracing::warn!(out = %out, error = %e, "failed to reap abandoned ffmpeg"),
        }
        if let Err(e) = std::fs::remove_file(&self.cfg.out_path)
            && e.kind() != std::io::ErrorKind::NotFound
        {
            tracing::warn!(out = %out, error = %e, "failed to remove partial video");
        }
    }
}

fn check_frame(cfg: &EncodeConfig, frame: &FrameRgb8) -> SynthResult<()> {
    if frame.width != cfg.width || frame.height != cfg.height {
        return Err(SynthError::validation(format!(
            "frame size mismatch: got {}x{}, expected {}x{}",
            frame.width, frame.height, cfg.width, cfg.height
        )));
    }
    if frame.data.len() != (cfg.width as usize) * (cfg.height as usize) * 3 {
        return Err(SynthError::validation(
            "frame.data size mismatch with width*height*3",
        ));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
