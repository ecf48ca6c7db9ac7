//! Transient row types deserialized straight from the CSV sources.
//!
//! Every field is kept as a raw `String`; numeric interpretation and
//! defaulting happen during assembly, never during parsing. Rows are
//! consumed by one assembly pass and not retained.

/// Which of the three source tables a row came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum SourceTable {
    Input,
    Output,
    Supplementary,
}

impl SourceTable {
    pub fn as_str(self) -> &'static str {
        match self {
            SourceTable::Input => "input",
            SourceTable::Output => "output",
            SourceTable::Supplementary => "supplementary",
        }
    }
}

/// One per-frame, per-player tracking row (input and output tables share this shape).
#[derive(Clone, Debug, Default, serde::Deserialize)]
pub struct TrackingRow {
    #[serde(default)]
    pub game_id: String,
    #[serde(default)]
    pub play_id: String,
    #[serde(default)]
    pub frame_id: String,
    #[serde(default)]
    pub nfl_id: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub player_name: String,
    #[serde(default)]
    pub x: String,
    #[serde(default)]
    pub y: String,
    #[serde(default)]
    pub s: String,
    #[serde(default)]
    pub a: String,
    #[serde(default)]
    pub dir: String,
    #[serde(default)]
    pub o: String,
    #[serde(default)]
    pub player_role: String,
    #[serde(default)]
    pub player_position: String,
    #[serde(default)]
    pub player_side: String,
    #[serde(default)]
    pub jersey_number: String,
    #[serde(default)]
    pub jersey: String,
}

impl TrackingRow {
    /// A row with no usable composite key cannot be grouped into any play.
    pub fn has_play_key(&self) -> bool {
        !self.game_id.trim().is_empty() && !self.play_id.trim().is_empty()
    }

    /// The tracking files carry the display name; some exports use
    /// `player_name` instead. Prefer the latter when both exist.
    pub fn name(&self) -> &str {
        if self.player_name.trim().is_empty() {
            &self.display_name
        } else {
            &self.player_name
        }
    }

    pub fn jersey(&self) -> &str {
        if self.jersey_number.trim().is_empty() {
            &self.jersey
        } else {
            &self.jersey_number
        }
    }
}

/// One per-play metadata row from the supplementary table.
#[derive(Clone, Debug, Default, serde::Deserialize)]
pub struct SupplementaryRow {
    #[serde(default)]
    pub game_id: String,
    #[serde(default)]
    pub play_id: String,
    #[serde(default)]
    pub route_of_targeted_receiver: String,
    #[serde(default)]
    pub pass_result: String,
    #[serde(default)]
    pub yards_to_go: String,
    #[serde(default)]
    pub down: String,
    #[serde(default)]
    pub quarter: String,
    #[serde(default)]
    pub yards_gained: String,
    #[serde(default)]
    pub pass_length: String,
    #[serde(default)]
    pub targeted_yard_line: String,
}

impl SupplementaryRow {
    pub fn has_play_key(&self) -> bool {
        !self.game_id.trim().is_empty() && !self.play_id.trim().is_empty()
    }
}
