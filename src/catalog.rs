//! Read-only post-assembly view over the reconstructed plays.

use crate::{
    assemble::Assembled,
    core::PlayKey,
    model::{Game, Play},
};

/// The ordered collection of reconstructed plays, indexed by game.
///
/// There is no mutation API: any change requires a full reassembly from the
/// source records.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct PlayCatalog {
    plays: Vec<Play>,
    games: Vec<Game>,
}

impl PlayCatalog {
    pub fn new(assembled: Assembled) -> Self {
        Self {
            plays: assembled.plays,
            games: assembled.games,
        }
    }

    pub fn games(&self) -> &[Game] {
        &self.games
    }

    pub fn plays(&self) -> &[Play] {
        &self.plays
    }

    pub fn is_empty(&self) -> bool {
        self.plays.is_empty()
    }

    /// Plays for one game, in assembly order.
    pub fn plays_for_game(&self, game_id: &str) -> Vec<&Play> {
        self.plays
            .iter()
            .filter(|p| p.key.game_id == game_id)
            .collect()
    }

    /// Indices into `plays()` for one game, in assembly order.
    pub fn play_indices_for_game(&self, game_id: &str) -> Vec<usize> {
        self.plays
            .iter()
            .enumerate()
            .filter(|(_, p)| p.key.game_id == game_id)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn find(&self, key: &PlayKey) -> Option<&Play> {
        self.plays.iter().find(|p| &p.key == key)
    }
}
