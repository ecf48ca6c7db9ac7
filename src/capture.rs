//! Video export: captures a rendered-frame stream into an encoded artifact.
//!
//! The concrete sink pipes raw RGBA frames into the system `ffmpeg` binary
//! rather than linking a native encoder, which keeps the build free of FFmpeg
//! dev headers. A sink is exclusively owned for the duration of one recording
//! session; the playback state machine enforces that only one recording is
//! active at a time.

use std::{
    path::{Path, PathBuf},
    process::{Child, ChildStdin, Command, Stdio},
};

use anyhow::Context as _;

use crate::{
    error::{PlayscopeError, PlayscopeResult},
    model::Play,
    render::FrameRgba,
};

/// The capture lifecycle: `arm` once, stream frames, `finalize` to obtain the
/// artifact path. `finalize` without an armed capture is a no-op.
pub trait CaptureSink {
    fn arm(&mut self, play: &Play) -> PlayscopeResult<()>;
    fn write_frame(&mut self, frame: &FrameRgba) -> PlayscopeResult<()>;
    fn finalize(&mut self) -> PlayscopeResult<Option<PathBuf>>;
}

/// Encoder settings for one capture session.
#[derive(Clone, Debug)]
pub struct CaptureConfig {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    pub out_dir: PathBuf,
}

impl CaptureConfig {
    pub fn new(out_dir: impl Into<PathBuf>, width: u32, height: u32, fps: u32) -> Self {
        Self {
            width,
            height,
            fps,
            out_dir: out_dir.into(),
        }
    }

    pub fn validate(&self) -> PlayscopeResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(PlayscopeError::validation(
                "capture width/height must be non-zero",
            ));
        }
        if self.fps == 0 {
            return Err(PlayscopeError::validation("capture fps must be non-zero"));
        }
        if !self.width.is_multiple_of(2) || !self.height.is_multiple_of(2) {
            // The default settings target yuv420p output for maximum compatibility.
            return Err(PlayscopeError::validation(
                "capture width/height must be even (required for yuv420p mp4 output)",
            ));
        }
        Ok(())
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

/// Artifact filename derived from the play identity, with anything hostile to
/// filesystems squashed to underscores.
pub fn artifact_file_name(play: &Play) -> String {
    let mut name = format!(
        "play_{}_{}_{}",
        play.key.game_id, play.key.play_id, play.description
    );
    name = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    name.push_str(".mp4");
    name
}

struct ActiveEncode {
    child: Child,
    stdin: Option<ChildStdin>,
    out_path: PathBuf,
}

/// [`CaptureSink`] backed by a piped system-`ffmpeg` child process.
pub struct FfmpegCapture {
    cfg: CaptureConfig,
    active: Option<ActiveEncode>,
}

impl FfmpegCapture {
    pub fn new(cfg: CaptureConfig) -> PlayscopeResult<Self> {
        cfg.validate()?;
        Ok(Self { cfg, active: None })
    }
}

impl CaptureSink for FfmpegCapture {
    fn arm(&mut self, play: &Play) -> PlayscopeResult<()> {
        if self.active.is_some() {
            return Err(PlayscopeError::capture("capture is already armed"));
        }
        if !is_ffmpeg_on_path() {
            return Err(PlayscopeError::capture(
                "ffmpeg is required for video export, but was not found on PATH",
            ));
        }

        std::fs::create_dir_all(&self.cfg.out_dir)
            .with_context(|| {
                format!(
                    "failed to create output directory '{}'",
                    self.cfg.out_dir.display()
                )
            })
            .map_err(|e| PlayscopeError::capture(format!("{e:#}")))?;

        let out_path = self.cfg.out_dir.join(artifact_file_name(play));

        let mut cmd = Command::new("ffmpeg");
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());
        cmd.args([
            "-y",
            "-loglevel",
            "error",
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgba",
            "-s",
            &format!("{}x{}", self.cfg.width, self.cfg.height),
            "-r",
            &self.cfg.fps.to_string(),
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
        .arg(&out_path);

        let mut child = cmd.spawn().map_err(|e| {
            PlayscopeError::capture(format!(
                "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
            ))
        })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| PlayscopeError::capture("failed to open ffmpeg stdin (unexpected)"))?;

        tracing::debug!(out = %out_path.display(), "capture armed");
        self.active = Some(ActiveEncode {
            child,
            stdin: Some(stdin),
            out_path,
        });
        Ok(())
    }

    fn write_frame(&mut self, frame: &FrameRgba) -> PlayscopeResult<()> {
        let Some(active) = self.active.as_mut() else {
            return Err(PlayscopeError::capture("capture is not armed"));
        };

        if frame.width != self.cfg.width || frame.height != self.cfg.height {
            return Err(PlayscopeError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, self.cfg.width, self.cfg.height
            )));
        }
        if frame.data.len() != (self.cfg.width * self.cfg.height * 4) as usize {
            return Err(PlayscopeError::validation(
                "frame.data size mismatch with width*height*4",
            ));
        }

        let Some(stdin) = active.stdin.as_mut() else {
            return Err(PlayscopeError::capture("capture is already finalized"));
        };

        use std::io::Write as _;
        stdin.write_all(&frame.data).map_err(|e| {
            PlayscopeError::capture(format!("failed to write frame to ffmpeg stdin: {e}"))
        })?;
        Ok(())
    }

    fn finalize(&mut self) -> PlayscopeResult<Option<PathBuf>> {
        let Some(mut active) = self.active.take() else {
            return Ok(None);
        };

        drop(active.stdin.take());

        let output = active.child.wait_with_output().map_err(|e| {
            PlayscopeError::capture(format!("failed to wait for ffmpeg to finish: {e}"))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(PlayscopeError::capture(format!(
                "ffmpeg exited with status {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        tracing::debug!(out = %active.out_path.display(), "capture finalized");
        Ok(Some(active.out_path))
    }
}

/// In-memory sink for tests and headless runs: counts lifecycle calls and
/// retains the streamed frames.
#[derive(Debug, Default)]
pub struct BufferCapture {
    pub armed_for: Option<String>,
    pub frames: Vec<FrameRgba>,
    pub finalized: usize,
}

impl CaptureSink for BufferCapture {
    fn arm(&mut self, play: &Play) -> PlayscopeResult<()> {
        if self.armed_for.is_some() {
            return Err(PlayscopeError::capture("capture is already armed"));
        }
        self.armed_for = Some(play.key.to_string());
        Ok(())
    }

    fn write_frame(&mut self, frame: &FrameRgba) -> PlayscopeResult<()> {
        if self.armed_for.is_none() {
            return Err(PlayscopeError::capture("capture is not armed"));
        }
        self.frames.push(frame.clone());
        Ok(())
    }

    fn finalize(&mut self) -> PlayscopeResult<Option<PathBuf>> {
        if self.armed_for.take().is_none() {
            return Ok(None);
        }
        self.finalized += 1;
        Ok(None)
    }
}
