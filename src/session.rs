//! Wires the playback controller to a renderer, a capture sink, and a clock.

use std::{path::PathBuf, time::Duration};

use crate::{
    clock::Clock,
    error::{PlayscopeError, PlayscopeResult},
    playback::{CaptureCmd, Mode, PlaybackController},
    render::FrameRenderer,
};

/// One playback/recording session: the controller owns all state, the session
/// owns the collaborators and runs the cooperative tick loop.
pub struct PlaybackSession<R, S, C> {
    pub controller: PlaybackController,
    pub renderer: R,
    pub sink: S,
    pub clock: C,
}

impl<R, S, C> PlaybackSession<R, S, C>
where
    R: FrameRenderer,
    S: crate::capture::CaptureSink,
    C: Clock,
{
    pub fn new(controller: PlaybackController, renderer: R, sink: S, clock: C) -> Self {
        Self {
            controller,
            renderer,
            sink,
            clock,
        }
    }

    /// Records the currently selected play from its first frame to its last,
    /// finalizing the capture automatically at the final index. Returns the
    /// artifact path when the sink produces one.
    ///
    /// A sink failure rolls the controller back to `Paused` and surfaces as a
    /// capture error; playback state and the catalog are otherwise untouched.
    #[tracing::instrument(skip_all)]
    pub fn record_current_play(&mut self) -> PlayscopeResult<Option<PathBuf>> {
        let Some(CaptureCmd::Arm) = self.controller.start_recording() else {
            return Err(PlayscopeError::validation(
                "recording requires a loaded play and a stopped (idle/paused) controller",
            ));
        };

        if let Err(err) = self.arm_sink() {
            self.controller.abort_recording();
            return Err(err);
        }

        // Frame 0 first, then one frame per advance, so the artifact covers
        // the play start to finish with no duplicates.
        self.emit_or_rollback()?;
        loop {
            let outcome = self.controller.tick();
            if outcome.advanced {
                self.emit_or_rollback()?;
            }
            if outcome.capture == Some(CaptureCmd::Finalize) {
                debug_assert_eq!(self.controller.mode(), Mode::Paused);
                return self.sink.finalize();
            }

            let period = Duration::from_millis(self.controller.period_ms());
            self.clock.sleep(period);
        }
    }

    /// Runs plain (non-recording) playback to the end of the current play.
    /// Each tick renders; renders for incomplete frames are skipped.
    pub fn play_to_end(&mut self) -> PlayscopeResult<()> {
        if !self.controller.play() {
            return Ok(());
        }
        while self.controller.mode() == Mode::Playing {
            let _ = self.render_current_frame();
            self.controller.tick();
            let period = Duration::from_millis(self.controller.period_ms());
            self.clock.sleep(period);
        }
        Ok(())
    }

    fn arm_sink(&mut self) -> PlayscopeResult<()> {
        let Some(play) = self.controller.current_play() else {
            return Err(PlayscopeError::validation("no play selected"));
        };
        self.sink.arm(play)
    }

    fn render_current_frame(&mut self) -> Option<crate::render::FrameRgba> {
        let play = self.controller.current_play()?;
        self.renderer.render(play, self.controller.frame_index())
    }

    fn emit_current_frame(&mut self) -> PlayscopeResult<()> {
        // A frame index outside bounds renders nothing; the tick is skipped.
        let Some(frame) = self.render_current_frame() else {
            return Ok(());
        };
        self.sink.write_frame(&frame)
    }

    fn emit_or_rollback(&mut self) -> PlayscopeResult<()> {
        if let Err(err) = self.emit_current_frame() {
            self.controller.abort_recording();
            let _ = self.sink.finalize();
            return Err(err);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        assemble::assemble,
        capture::BufferCapture,
        catalog::PlayCatalog,
        clock::ImmediateClock,
        record::TrackingRow,
        render::FieldPainter,
    };

    fn controller(frames: usize) -> PlaybackController {
        let mut input = Vec::new();
        for f in 1..=frames {
            input.push(TrackingRow {
                game_id: "1".to_string(),
                play_id: "10".to_string(),
                frame_id: f.to_string(),
                display_name: "WR".to_string(),
                player_role: "Targeted Receiver".to_string(),
                x: "50".to_string(),
                y: "20".to_string(),
                ..TrackingRow::default()
            });
        }
        PlaybackController::new(PlayCatalog::new(assemble(input, vec![], vec![])))
    }

    #[test]
    fn records_exactly_one_frame_per_index() {
        let mut session = PlaybackSession::new(
            controller(5),
            FieldPainter::new(80, 44),
            BufferCapture::default(),
            ImmediateClock,
        );

        let artifact = session.record_current_play().unwrap();
        assert_eq!(artifact, None);
        assert_eq!(session.sink.frames.len(), 5);
        assert_eq!(session.sink.finalized, 1);
        assert_eq!(session.controller.mode(), Mode::Paused);
        assert!(!session.controller.is_recording());
        assert_eq!(session.controller.frame_index(), 4);
    }

    #[test]
    fn single_frame_play_records_exactly_one_frame() {
        let mut session = PlaybackSession::new(
            controller(1),
            FieldPainter::new(80, 44),
            BufferCapture::default(),
            ImmediateClock,
        );

        session.record_current_play().unwrap();
        assert_eq!(session.sink.frames.len(), 1);
        assert_eq!(session.sink.finalized, 1);
    }

    #[test]
    fn recording_twice_reuses_the_sink_cleanly() {
        let mut session = PlaybackSession::new(
            controller(3),
            FieldPainter::new(80, 44),
            BufferCapture::default(),
            ImmediateClock,
        );

        session.record_current_play().unwrap();
        session.controller.reset();
        session.record_current_play().unwrap();

        assert_eq!(session.sink.frames.len(), 6);
        assert_eq!(session.sink.finalized, 2);
    }

    #[test]
    fn recording_without_a_play_is_a_validation_error() {
        let mut c = controller(3);
        c.select_game("404");
        let mut session = PlaybackSession::new(
            c,
            FieldPainter::new(80, 44),
            BufferCapture::default(),
            ImmediateClock,
        );

        let err = session.record_current_play().unwrap_err();
        assert!(matches!(err, PlayscopeError::Validation(_)));
    }

    #[test]
    fn arm_failure_rolls_back_to_paused() {
        struct FailingSink;
        impl crate::capture::CaptureSink for FailingSink {
            fn arm(&mut self, _play: &crate::model::Play) -> PlayscopeResult<()> {
                Err(PlayscopeError::capture("disk full"))
            }
            fn write_frame(&mut self, _frame: &crate::render::FrameRgba) -> PlayscopeResult<()> {
                unreachable!("never armed")
            }
            fn finalize(&mut self) -> PlayscopeResult<Option<PathBuf>> {
                Ok(None)
            }
        }

        let mut session = PlaybackSession::new(
            controller(3),
            FieldPainter::new(80, 44),
            FailingSink,
            ImmediateClock,
        );

        let err = session.record_current_play().unwrap_err();
        assert!(matches!(err, PlayscopeError::Capture(_)));
        assert_eq!(session.controller.mode(), Mode::Paused);
        assert!(!session.controller.is_recording());
    }

    #[test]
    fn play_to_end_stops_at_the_final_frame() {
        let mut session = PlaybackSession::new(
            controller(4),
            FieldPainter::new(80, 44),
            BufferCapture::default(),
            ImmediateClock,
        );

        session.play_to_end().unwrap();
        assert_eq!(session.controller.frame_index(), 3);
        assert_eq!(session.controller.mode(), Mode::Paused);
        // Plain playback never wrote to the sink.
        assert!(session.sink.frames.is_empty());
    }
}
