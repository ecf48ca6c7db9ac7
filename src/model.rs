//! The reconstructed play model: what assembly produces and playback consumes.
//!
//! Everything here is immutable after assembly. Playback state (selected play,
//! selected frame) lives in the controller, never on these types.

use crate::core::{FieldPos, PlayKey, Role};

/// One player's instantaneous state within a frame.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct PlayerSnapshot {
    pub pos: FieldPos,
    pub role: Role,
    pub side: String,
    pub position: String,
    pub name: String,
    pub nfl_id: String,
    pub jersey: String,
    pub speed: f64,
    pub acceleration: f64,
    pub direction: f64,
    pub orientation: f64,
}

/// One discrete timestep of a play.
///
/// `frame_id` is proportional to tenths of a second since play start; the
/// sequence is monotonic but may be sparse. Playback steps by array index,
/// never by `frame_id` value.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Frame {
    pub frame_id: f64,
    pub players: Vec<PlayerSnapshot>,
    pub ball: Option<FieldPos>,
    /// Yards from the targeted receiver to the nearest coverage defender,
    /// 0 when either role is missing from this frame.
    pub separation: f64,
}

impl Frame {
    pub fn new(frame_id: f64) -> Self {
        Self {
            frame_id,
            players: Vec::new(),
            ball: None,
            separation: 0.0,
        }
    }

    pub fn targeted_receiver(&self) -> Option<&PlayerSnapshot> {
        self.players.iter().find(|p| p.role == Role::TargetedReceiver)
    }

    pub fn passer(&self) -> Option<&PlayerSnapshot> {
        self.players.iter().find(|p| p.role == Role::Passer)
    }

    pub fn defenders(&self) -> impl Iterator<Item = &PlayerSnapshot> {
        self.players
            .iter()
            .filter(|p| p.role == Role::DefensiveCoverage)
    }
}

/// One reconstructed play: denormalized metadata plus its ordered frames.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Play {
    pub key: PlayKey,
    /// Route of the targeted receiver, or `Play {play_id}` when no
    /// supplementary row joined.
    pub description: String,
    /// Pass result code (`C`, `I`, `IN`, ...), `N/A` when unjoined.
    pub pass_result: String,
    pub yards_to_go: String,
    pub down: String,
    pub quarter: String,
    pub yards_gained: String,
    pub pass_length: String,
    pub targeted_yard_line: String,
    /// Target receiver identity, resolved from frame 0 only.
    pub wr_name: String,
    pub wr_jersey: String,
    pub wr_position: String,
    /// Passer identity, resolved from frame 0 only.
    pub qb_name: String,
    pub qb_jersey: String,
    /// Strictly ascending by `frame_id`; never empty in the catalog.
    pub frames: Vec<Frame>,
}

impl Play {
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn frame(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }
}

/// A derived grouping key: one distinct `game_id` observed in the input table.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Game {
    pub game_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Role;

    fn snapshot(role: Role) -> PlayerSnapshot {
        PlayerSnapshot {
            pos: FieldPos::new(0.0, 0.0),
            role,
            side: String::new(),
            position: String::new(),
            name: String::new(),
            nfl_id: String::new(),
            jersey: String::new(),
            speed: 0.0,
            acceleration: 0.0,
            direction: 0.0,
            orientation: 0.0,
        }
    }

    #[test]
    fn frame_role_lookups_take_first_match() {
        let mut frame = Frame::new(1.0);
        frame.players.push(snapshot(Role::Passer));
        let mut first = snapshot(Role::TargetedReceiver);
        first.name = "first".to_string();
        let mut second = snapshot(Role::TargetedReceiver);
        second.name = "second".to_string();
        frame.players.push(first);
        frame.players.push(second);

        assert_eq!(frame.targeted_receiver().unwrap().name, "first");
        assert!(frame.passer().is_some());
        assert_eq!(frame.defenders().count(), 0);
    }
}
