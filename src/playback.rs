//! The playback state machine over a selected play's frame sequence.
//!
//! All mutable viewer state lives here: selected game, selected play, frame
//! index, speed, mode, recording flag. Transitions are plain methods with
//! observable outcomes; there are no timers inside. A [`crate::clock::Clock`]
//! paces calls to [`PlaybackController::tick`] from the outside.

use crate::{catalog::PlayCatalog, model::Play};

/// Default tick period in milliseconds (one tracking frame is 100 ms).
pub const DEFAULT_PERIOD_MS: u64 = 100;

/// Playback mode. `Idle` means nothing has played yet in the current
/// play/game context; once playback has run, stopping lands in `Paused`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Mode {
    Idle,
    Playing,
    Paused,
}

impl Mode {
    fn is_stopped(self) -> bool {
        matches!(self, Mode::Idle | Mode::Paused)
    }
}

/// Capture lifecycle commands emitted by recording transitions. The caller
/// owns the sink and must honor these in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaptureCmd {
    Arm,
    Finalize,
}

/// What one timer tick did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// The frame index changed; a render should follow.
    pub advanced: bool,
    /// Set when this tick reached the final frame while recording.
    pub capture: Option<CaptureCmd>,
}

/// The single owner of all playback state, including the catalog it plays.
#[derive(Clone, Debug)]
pub struct PlaybackController {
    catalog: PlayCatalog,
    selected_game: Option<String>,
    /// Indices into the catalog's play list for the selected game.
    filtered: Vec<usize>,
    play_index: usize,
    frame_index: usize,
    mode: Mode,
    recording: bool,
    period_ms: u64,
}

impl PlaybackController {
    /// Builds a controller over an assembled catalog, selecting the first
    /// game (if any) exactly like a fresh viewer session.
    pub fn new(catalog: PlayCatalog) -> Self {
        let first_game = catalog.games().first().map(|g| g.game_id.clone());
        let mut controller = Self {
            catalog,
            selected_game: None,
            filtered: Vec::new(),
            play_index: 0,
            frame_index: 0,
            mode: Mode::Idle,
            recording: false,
            period_ms: DEFAULT_PERIOD_MS,
        };
        if let Some(game_id) = first_game {
            controller.apply_game_selection(&game_id);
            controller.mode = Mode::Idle;
        }
        controller
    }

    pub fn catalog(&self) -> &PlayCatalog {
        &self.catalog
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_recording(&self) -> bool {
        self.recording
    }

    pub fn selected_game(&self) -> Option<&str> {
        self.selected_game.as_deref()
    }

    pub fn play_index(&self) -> usize {
        self.play_index
    }

    pub fn frame_index(&self) -> usize {
        self.frame_index
    }

    pub fn period_ms(&self) -> u64 {
        self.period_ms
    }

    pub fn play_count(&self) -> usize {
        self.filtered.len()
    }

    pub fn current_play(&self) -> Option<&Play> {
        let idx = *self.filtered.get(self.play_index)?;
        self.catalog.plays().get(idx)
    }

    fn frame_count(&self) -> usize {
        self.current_play().map_or(0, Play::frame_count)
    }

    fn last_index(&self) -> usize {
        self.frame_count().saturating_sub(1)
    }

    /// Starts playback. Refused when recording, when no play is loaded, or
    /// when already at the final frame (playback never wraps).
    pub fn play(&mut self) -> bool {
        if self.recording || !self.mode.is_stopped() {
            return false;
        }
        if self.frame_count() == 0 || self.frame_index >= self.last_index() {
            return false;
        }
        self.mode = Mode::Playing;
        true
    }

    /// Pauses playback. Refused while recording (stop the recording instead).
    pub fn pause(&mut self) -> bool {
        if self.recording || self.mode != Mode::Playing {
            return false;
        }
        self.mode = Mode::Paused;
        true
    }

    /// Rewinds to frame 0 and pauses. Refused while recording.
    pub fn reset(&mut self) -> bool {
        if self.recording {
            return false;
        }
        self.frame_index = 0;
        self.mode = Mode::Paused;
        true
    }

    /// Jumps straight to a frame index, clamped to the valid range. Does not
    /// touch the mode. Refused while recording.
    pub fn scrub(&mut self, index: usize) -> bool {
        if self.recording || self.frame_count() == 0 {
            return false;
        }
        self.frame_index = index.min(self.last_index());
        true
    }

    /// Adjusts the tick period. Takes effect on the next tick. Refused while
    /// recording.
    pub fn set_period_ms(&mut self, period_ms: u64) -> bool {
        if self.recording || period_ms == 0 {
            return false;
        }
        self.period_ms = period_ms;
        true
    }

    /// One timer tick. Advances while `Playing`; reaching the final index
    /// auto-stops (never wraps) and, when recording, finalizes the capture.
    pub fn tick(&mut self) -> TickOutcome {
        if self.mode != Mode::Playing {
            return TickOutcome::default();
        }

        let last = self.last_index();
        if self.frame_index >= last {
            // A single-frame play starts at its final frame; stop right away.
            self.mode = Mode::Paused;
            return TickOutcome {
                advanced: false,
                capture: self.finish_recording(),
            };
        }

        self.frame_index += 1;
        let capture = if self.frame_index == last {
            self.mode = Mode::Paused;
            self.finish_recording()
        } else {
            None
        };

        TickOutcome {
            advanced: true,
            capture,
        }
    }

    /// Selects a game: reloads the filtered play list, resets play and frame
    /// to 0, forces `Paused`. Refused while recording.
    pub fn select_game(&mut self, game_id: &str) -> bool {
        if self.recording {
            return false;
        }
        self.apply_game_selection(game_id);
        true
    }

    fn apply_game_selection(&mut self, game_id: &str) {
        self.selected_game = Some(game_id.to_string());
        self.filtered = self.catalog.play_indices_for_game(game_id);
        self.play_index = 0;
        self.frame_index = 0;
        self.mode = Mode::Paused;
    }

    /// Moves to the next play in the current game; a no-op at the last play.
    pub fn next_play(&mut self) -> bool {
        if self.recording || self.play_index + 1 >= self.filtered.len() {
            return false;
        }
        self.play_index += 1;
        self.frame_index = 0;
        self.mode = Mode::Paused;
        true
    }

    /// Moves to the previous play; a no-op at play index 0.
    pub fn prev_play(&mut self) -> bool {
        if self.recording || self.play_index == 0 {
            return false;
        }
        self.play_index -= 1;
        self.frame_index = 0;
        self.mode = Mode::Paused;
        true
    }

    /// Selects a play of the current game by its play id.
    pub fn select_play(&mut self, play_id: &str) -> bool {
        if self.recording {
            return false;
        }
        let found = self.filtered.iter().position(|&idx| {
            self.catalog
                .plays()
                .get(idx)
                .is_some_and(|p| p.key.play_id == play_id)
        });
        let Some(position) = found else {
            return false;
        };
        self.play_index = position;
        self.frame_index = 0;
        self.mode = Mode::Paused;
        true
    }

    /// Arms a recording: only valid from `Idle`/`Paused` with a play loaded.
    /// Rewinds to frame 0 and starts playing with the recording flag set;
    /// every other control is disabled until the capture finalizes.
    pub fn start_recording(&mut self) -> Option<CaptureCmd> {
        if self.recording || !self.mode.is_stopped() || self.frame_count() == 0 {
            return None;
        }
        self.frame_index = 0;
        self.mode = Mode::Playing;
        self.recording = true;
        tracing::debug!(play = %self.current_play().map(|p| p.key.to_string()).unwrap_or_default(),
            "recording armed");
        Some(CaptureCmd::Arm)
    }

    /// Stops an active recording and pauses. Idempotent when not recording.
    pub fn stop_recording(&mut self) -> Option<CaptureCmd> {
        if !self.recording {
            return None;
        }
        self.mode = Mode::Paused;
        self.finish_recording()
    }

    /// Capture-failure rollback: drops the recording flag and pauses without
    /// asking for a finalize.
    pub fn abort_recording(&mut self) {
        self.recording = false;
        self.mode = Mode::Paused;
    }

    fn finish_recording(&mut self) -> Option<CaptureCmd> {
        if !self.recording {
            return None;
        }
        self.recording = false;
        tracing::debug!("recording finished");
        Some(CaptureCmd::Finalize)
    }
}
