//! Small value types shared across the reconstruction pipeline.

/// Field length in yards, end zone to end zone.
pub const FIELD_LENGTH_YD: f64 = 120.0;
/// Field width in yards.
pub const FIELD_WIDTH_YD: f64 = 53.3;

/// Composite identifier naming one play across all three source tables.
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct PlayKey {
    pub game_id: String,
    pub play_id: String,
}

impl PlayKey {
    pub fn new(game_id: impl Into<String>, play_id: impl Into<String>) -> Self {
        Self {
            game_id: game_id.into(),
            play_id: play_id.into(),
        }
    }
}

impl std::fmt::Display for PlayKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}_{}", self.game_id, self.play_id)
    }
}

/// A position on the field, in yards.
#[derive(Clone, Copy, Debug, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct FieldPos {
    pub x: f64,
    pub y: f64,
}

impl FieldPos {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(self, other: FieldPos) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Per-snapshot player role, closed over the tags the tracking data uses.
///
/// Unrecognized (non-blank) tags fall back to a side-based bucket so that
/// downstream consumers never see a free-form string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Role {
    TargetedReceiver,
    Passer,
    DefensiveCoverage,
    OtherOffense,
    OtherDefense,
}

impl Role {
    /// Maps the verbatim role tag, using `side` to bucket anything unrecognized.
    pub fn from_tag(tag: &str, side: &str) -> Self {
        match tag.trim() {
            "Targeted Receiver" => Role::TargetedReceiver,
            "Passer" => Role::Passer,
            "Defensive Coverage" => Role::DefensiveCoverage,
            "Other Offense" | "Offense" => Role::OtherOffense,
            "Other Defense" | "Defense" => Role::OtherDefense,
            _ => {
                if side.trim().eq_ignore_ascii_case("defense") {
                    Role::OtherDefense
                } else {
                    Role::OtherOffense
                }
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::TargetedReceiver => "Targeted Receiver",
            Role::Passer => "Passer",
            Role::DefensiveCoverage => "Defensive Coverage",
            Role::OtherOffense => "Other Offense",
            Role::OtherDefense => "Other Defense",
        }
    }
}

/// Parses a numeric field, substituting 0 for anything absent or malformed.
pub fn parse_or_zero(raw: &str) -> f64 {
    raw.trim().parse::<f64>().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn distance_is_euclidean() {
        let a = FieldPos::new(50.0, 20.0);
        let b = FieldPos::new(53.0, 24.0);
        assert_relative_eq!(a.distance_to(b), 5.0);
    }

    #[test]
    fn role_tags_map_exactly() {
        assert_eq!(
            Role::from_tag("Targeted Receiver", ""),
            Role::TargetedReceiver
        );
        assert_eq!(Role::from_tag("Passer", ""), Role::Passer);
        assert_eq!(
            Role::from_tag("Defensive Coverage", ""),
            Role::DefensiveCoverage
        );
        assert_eq!(Role::from_tag("Other Offense", ""), Role::OtherOffense);
        assert_eq!(Role::from_tag("Other Defense", ""), Role::OtherDefense);
    }

    #[test]
    fn explicit_other_tags_win_over_the_side_field() {
        // The tag is authoritative even when the side column is blank or
        // contradicts it.
        assert_eq!(Role::from_tag("Other Defense", ""), Role::OtherDefense);
        assert_eq!(Role::from_tag("Defense", ""), Role::OtherDefense);
        assert_eq!(Role::from_tag("Other Offense", "Defense"), Role::OtherOffense);
        assert_eq!(Role::from_tag("Offense", "Defense"), Role::OtherOffense);
    }

    #[test]
    fn unrecognized_role_buckets_by_side() {
        assert_eq!(
            Role::from_tag("Other Route Runner", "Offense"),
            Role::OtherOffense
        );
        assert_eq!(Role::from_tag("Spy", "Defense"), Role::OtherDefense);
        assert_eq!(Role::from_tag("???", ""), Role::OtherOffense);
    }

    #[test]
    fn parse_or_zero_absorbs_garbage() {
        assert_eq!(parse_or_zero("12.5"), 12.5);
        assert_eq!(parse_or_zero("  3 "), 3.0);
        assert_eq!(parse_or_zero(""), 0.0);
        assert_eq!(parse_or_zero("n/a"), 0.0);
    }

    #[test]
    fn play_key_display_is_stable() {
        assert_eq!(PlayKey::new("2023090700", "101").to_string(), "2023090700_101");
    }
}
