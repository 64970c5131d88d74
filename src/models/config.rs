//! Tournament configuration supplied by the organizer.

use crate::models::tournament::TournamentError;
use serde::{Deserialize, Serialize};

/// Largest supported playoff: 4 rounds = 16 pairs.
pub const MAX_ELIMINATION_ROUNDS: u32 = 4;

/// Minimum roster size for generating pairs.
pub const MIN_PLAYERS: usize = 4;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TournamentConfig {
    pub courts: u32,
    pub groups: u32,
    pub max_players_per_group: u32,
    /// 0 disables the playoff stage; 1..=4 gives a bracket of 2, 4, 8 or 16 pairs.
    pub elimination_rounds: u32,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            courts: 3,
            groups: 2,
            max_players_per_group: 8,
            elimination_rounds: 2,
        }
    }
}

impl TournamentConfig {
    pub fn validate(&self) -> Result<(), TournamentError> {
        if self.courts == 0 {
            return Err(TournamentError::InvalidCourtCount);
        }
        if self.groups == 0 {
            return Err(TournamentError::InvalidGroupCount);
        }
        if self.max_players_per_group < MIN_PLAYERS as u32 {
            return Err(TournamentError::InvalidMaxPlayersPerGroup);
        }
        if self.elimination_rounds > MAX_ELIMINATION_ROUNDS {
            return Err(TournamentError::InvalidEliminationRounds(self.elimination_rounds));
        }
        Ok(())
    }

    /// Check a roster size against this config before any pairing runs.
    pub fn validate_roster(&self, players: usize) -> Result<(), TournamentError> {
        self.validate()?;
        if players < MIN_PLAYERS {
            return Err(TournamentError::NotEnoughPlayers { required: MIN_PLAYERS });
        }
        if players % 2 != 0 {
            return Err(TournamentError::OddPlayerCount(players));
        }
        let groups = self.groups as usize;
        let needed = players.div_ceil(groups);
        if needed > self.max_players_per_group as usize {
            return Err(TournamentError::GroupTooLarge {
                max: self.max_players_per_group,
                needed,
            });
        }
        Ok(())
    }
}
