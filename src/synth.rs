//! Frame synthesis: turns a play's merged, frame-sorted row list into frames.

use crate::{
    core::{FieldPos, Role, parse_or_zero},
    model::{Frame, PlayerSnapshot},
    record::TrackingRow,
};

/// Sentinel display name marking the ball row in the tracking tables.
const BALL_DISPLAY_NAME: &str = "football";
/// Sentinel player identifier marking the ball row.
const BALL_NFL_ID: &str = "ball";

/// A tracking row paired with its parsed frame id, ready for grouping.
///
/// The assembler pre-parses `frame_id` once so that sorting and grouping agree
/// on the exact numeric value. Input rows are concatenated before output rows,
/// so the stable sort keeps input first at equal ids.
#[derive(Clone, Debug)]
pub struct MergedRow {
    pub frame_id: f64,
    pub row: TrackingRow,
}

/// Groups merged rows into frames and computes per-frame separation.
///
/// Rows merge into one frame only on exact `frame_id` equality; no tolerance
/// or snapping is applied. The input must already be sorted ascending by
/// `frame_id`, which makes equal ids adjacent.
pub fn synthesize_frames(rows: &[MergedRow]) -> Vec<Frame> {
    let mut frames: Vec<Frame> = Vec::new();

    for merged in rows {
        let start_new = frames
            .last()
            .is_none_or(|f| f.frame_id != merged.frame_id);
        if start_new {
            frames.push(Frame::new(merged.frame_id));
        }
        if let Some(frame) = frames.last_mut() {
            classify_row(frame, &merged.row);
        }
    }

    for frame in &mut frames {
        frame.separation = separation(frame);
    }

    frames
}

/// Classifies one row as the ball or a player snapshot, first match wins.
///
/// A row is the ball when it carries the sentinel display name, the sentinel
/// player id, or no role at all (the ball rows in the tracking exports leave
/// the role column blank).
fn classify_row(frame: &mut Frame, row: &TrackingRow) {
    let pos = FieldPos::new(parse_or_zero(&row.x), parse_or_zero(&row.y));

    let is_ball = row.display_name.trim() == BALL_DISPLAY_NAME
        || row.nfl_id.trim() == BALL_NFL_ID
        || row.player_role.trim().is_empty();

    if is_ball {
        // Last ball row wins if a frame somehow carries more than one.
        frame.ball = Some(pos);
        return;
    }

    frame.players.push(PlayerSnapshot {
        pos,
        role: Role::from_tag(&row.player_role, &row.player_side),
        side: row.player_side.trim().to_string(),
        position: row.player_position.trim().to_string(),
        name: row.name().trim().to_string(),
        nfl_id: row.nfl_id.trim().to_string(),
        jersey: row.jersey().trim().to_string(),
        speed: parse_or_zero(&row.s),
        acceleration: parse_or_zero(&row.a),
        direction: parse_or_zero(&row.dir),
        orientation: parse_or_zero(&row.o),
    });
}

/// Receiver-to-nearest-defender distance for one frame, from that frame's own
/// snapshots only. Duplicate targeted receivers: the first one found is used.
fn separation(frame: &Frame) -> f64 {
    let Some(wr) = frame.targeted_receiver() else {
        return 0.0;
    };

    frame
        .defenders()
        .map(|def| wr.pos.distance_to(def.pos))
        .min_by(f64::total_cmp)
        .unwrap_or(0.0)
}
