//! Play assembly: joins the three record streams into reconstructed plays.

use std::collections::HashMap;

use crate::{
    core::{PlayKey, parse_or_zero},
    model::{Game, Play},
    record::{SupplementaryRow, TrackingRow},
    synth::{MergedRow, synthesize_frames},
};

/// The assembly result: plays in first-appearance order plus the derived game list.
#[derive(Clone, Debug, Default)]
pub struct Assembled {
    pub plays: Vec<Play>,
    pub games: Vec<Game>,
}

#[derive(Debug, Default)]
struct PlayBuilder {
    input_rows: Vec<TrackingRow>,
    output_rows: Vec<TrackingRow>,
    info: Option<SupplementaryRow>,
}

/// Joins input, output, and supplementary rows by `(game_id, play_id)`.
///
/// Input rows create plays; output rows are additive and join only existing
/// keys; supplementary rows cannot create a play on their own and orphans are
/// dropped. Rows with a blank key component are skipped. Plays that synthesize
/// zero frames never reach the result.
#[tracing::instrument(skip_all)]
pub fn assemble(
    input: Vec<TrackingRow>,
    output: Vec<TrackingRow>,
    supplementary: Vec<SupplementaryRow>,
) -> Assembled {
    let mut order: Vec<PlayKey> = Vec::new();
    let mut builders: HashMap<PlayKey, PlayBuilder> = HashMap::new();
    let mut games: Vec<Game> = Vec::new();
    let mut skipped = 0usize;

    for row in input {
        if !row.has_play_key() {
            skipped += 1;
            continue;
        }
        let key = PlayKey::new(row.game_id.trim(), row.play_id.trim());
        if !games.iter().any(|g| g.game_id == key.game_id) {
            games.push(Game {
                game_id: key.game_id.clone(),
            });
        }
        let builder = builders.entry(key.clone()).or_insert_with(|| {
            order.push(key);
            PlayBuilder::default()
        });
        builder.input_rows.push(row);
    }

    for row in output {
        if !row.has_play_key() {
            skipped += 1;
            continue;
        }
        let key = PlayKey::new(row.game_id.trim(), row.play_id.trim());
        if let Some(builder) = builders.get_mut(&key) {
            builder.output_rows.push(row);
        }
    }

    for row in supplementary {
        if !row.has_play_key() {
            skipped += 1;
            continue;
        }
        let key = PlayKey::new(row.game_id.trim(), row.play_id.trim());
        if let Some(builder) = builders.get_mut(&key) {
            // Last supplementary row wins on duplicates.
            builder.info = Some(row);
        }
    }

    if skipped > 0 {
        tracing::warn!(skipped, "rows without a usable (game_id, play_id) key were dropped");
    }

    let mut plays = Vec::with_capacity(order.len());
    for key in order {
        let Some(builder) = builders.remove(&key) else {
            continue;
        };
        if let Some(play) = build_play(key, builder) {
            plays.push(play);
        }
    }

    tracing::debug!(
        plays = plays.len(),
        games = games.len(),
        "assembly complete"
    );

    Assembled { plays, games }
}

fn build_play(key: PlayKey, builder: PlayBuilder) -> Option<Play> {
    let merged = merge_rows(builder.input_rows, builder.output_rows);
    let frames = synthesize_frames(&merged);
    if frames.is_empty() {
        return None;
    }

    // WR/QB identity is fixed from frame 0 only; later frames never revise it.
    let first = &frames[0];
    let wr = first.targeted_receiver();
    let qb = first.passer();

    let wr_name = wr
        .map(|p| p.name.clone())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| "Unknown".to_string());
    let wr_jersey = wr.map(|p| p.jersey.clone()).unwrap_or_default();
    let wr_position = wr
        .map(|p| p.position.clone())
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| "WR".to_string());
    let qb_name = qb
        .map(|p| p.name.clone())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| "Unknown".to_string());
    let qb_jersey = qb.map(|p| p.jersey.clone()).unwrap_or_default();

    let info = builder.info.unwrap_or_default();
    let description = if info.route_of_targeted_receiver.trim().is_empty() {
        format!("Play {}", key.play_id)
    } else {
        info.route_of_targeted_receiver.trim().to_string()
    };
    let pass_result = if info.pass_result.trim().is_empty() {
        "N/A".to_string()
    } else {
        info.pass_result.trim().to_string()
    };

    Some(Play {
        key,
        description,
        pass_result,
        yards_to_go: info.yards_to_go.trim().to_string(),
        down: info.down.trim().to_string(),
        quarter: info.quarter.trim().to_string(),
        yards_gained: info.yards_gained.trim().to_string(),
        pass_length: info.pass_length.trim().to_string(),
        targeted_yard_line: info.targeted_yard_line.trim().to_string(),
        wr_name,
        wr_jersey,
        wr_position,
        qb_name,
        qb_jersey,
        frames,
    })
}

/// Concatenates input rows before output rows, then stable-sorts by parsed
/// `frame_id` so input precedes output at equal ids.
fn merge_rows(input: Vec<TrackingRow>, output: Vec<TrackingRow>) -> Vec<MergedRow> {
    let mut merged: Vec<MergedRow> = Vec::with_capacity(input.len() + output.len());

    for row in input.into_iter().chain(output) {
        merged.push(MergedRow {
            frame_id: parse_or_zero(&row.frame_id),
            row,
        });
    }

    merged.sort_by(|a, b| a.frame_id.total_cmp(&b.frame_id));
    merged
}
