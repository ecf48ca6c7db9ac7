//! playscope reconstructs NFL player-tracking plays from three CSV sources
//! and drives a deterministic, frame-indexed playback engine with MP4 export.
//!
//! # Pipeline overview
//!
//! 1. **Ingest**: three CSV tables (input tracking, predicted output tracking,
//!    per-play supplementary metadata) -> row streams
//! 2. **Assemble**: join by `(game_id, play_id)`, merge input/output rows,
//!    attach supplementary metadata
//! 3. **Synthesize**: group rows into frames, classify ball vs. player,
//!    compute receiver-to-nearest-defender separation
//! 4. **Play back**: a timer-driven state machine over the frame sequence,
//!    with a capture lifecycle that streams rendered frames to `ffmpeg`
//!
//! Loading is all-or-nothing; row-level anomalies are absorbed with defaults.
//! The reconstructed catalog is immutable; all mutable viewer state lives in
//! [`PlaybackController`].
#![forbid(unsafe_code)]

pub mod assemble;
pub mod capture;
pub mod catalog;
pub mod clock;
pub mod core;
pub mod error;
pub mod ingest;
pub mod model;
pub mod playback;
pub mod record;
pub mod render;
pub mod session;
pub mod synth;

pub use assemble::{Assembled, assemble};
pub use capture::{
    BufferCapture, CaptureConfig, CaptureSink, FfmpegCapture, artifact_file_name,
    is_ffmpeg_on_path,
};
pub use catalog::PlayCatalog;
pub use clock::{Clock, ImmediateClock, SystemClock};
pub use self::core::{FIELD_LENGTH_YD, FIELD_WIDTH_YD, FieldPos, PlayKey, Role};
pub use error::{PlayscopeError, PlayscopeResult};
pub use ingest::load_catalog;
pub use model::{Frame, Game, Play, PlayerSnapshot};
pub use playback::{CaptureCmd, DEFAULT_PERIOD_MS, Mode, PlaybackController, TickOutcome};
pub use record::{SourceTable, SupplementaryRow, TrackingRow};
pub use render::{FieldPainter, FrameRenderer, FrameRgba};
pub use session::PlaybackSession;
