//! Tournament and TournamentState.

use crate::models::config::TournamentConfig;
use crate::models::game::{GameMatch, MatchId};
use crate::models::pair::{Group, Pair};
use crate::models::player::{Player, PlayerId, RankTier};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Roster too small to generate pairs.
    NotEnoughPlayers { required: usize },
    /// Odd roster: one player would be left without a partner.
    OddPlayerCount(usize),
    InvalidCourtCount,
    InvalidGroupCount,
    InvalidMaxPlayersPerGroup,
    /// Elimination rounds must be 0..=4.
    InvalidEliminationRounds(u32),
    /// Roster would put more players in a group than allowed.
    GroupTooLarge { max: u32, needed: usize },
    /// Tournament is not in a state that allows this action.
    InvalidState,
    PlayerNotFound(PlayerId),
    /// A player with this name already exists (names are unique, case-insensitive).
    DuplicatePlayerName,
    EmptyPlayerName,
    MatchNotFound(MatchId),
    /// Both sides reported the same score.
    DrawNotAllowed,
    /// A reported score is above the accepted maximum.
    ScoreOutOfRange { max: u32, got: u32 },
    /// A side of the match is still a placeholder.
    UnresolvedSide(MatchId),
    /// Changing this winner would rewrite a successor match that already has a result.
    DownstreamAlreadyPlayed(MatchId),
    /// Roster file could not be read.
    InvalidRoster(String),
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::NotEnoughPlayers { required } => {
                write!(f, "Need at least {} players to generate pairs", required)
            }
            TournamentError::OddPlayerCount(n) => {
                write!(f, "Need an even number of players to form pairs (have {})", n)
            }
            TournamentError::InvalidCourtCount => write!(f, "Number of courts must be at least 1"),
            TournamentError::InvalidGroupCount => write!(f, "Number of groups must be at least 1"),
            TournamentError::InvalidMaxPlayersPerGroup => {
                write!(f, "Max players per group must be at least 4")
            }
            TournamentError::InvalidEliminationRounds(n) => {
                write!(f, "Elimination rounds must be between 0 and 4 (got {})", n)
            }
            TournamentError::GroupTooLarge { max, needed } => write!(
                f,
                "Groups would need {} players each but the limit is {}",
                needed, max
            ),
            TournamentError::InvalidState => write!(f, "Invalid state for this action"),
            TournamentError::PlayerNotFound(id) => write!(f, "Player {} not found", id),
            TournamentError::DuplicatePlayerName => write!(f, "A player with this name already exists"),
            TournamentError::EmptyPlayerName => write!(f, "Player name must not be empty"),
            TournamentError::MatchNotFound(id) => write!(f, "Match {} not found", id),
            TournamentError::DrawNotAllowed => write!(f, "Scores must differ, draws are not allowed"),
            TournamentError::ScoreOutOfRange { max, got } => {
                write!(f, "Score {} is out of range (maximum {})", got, max)
            }
            TournamentError::UnresolvedSide(id) => {
                write!(f, "Match {} does not have both pairs yet", id)
            }
            TournamentError::DownstreamAlreadyPlayed(id) => write!(
                f,
                "Cannot change the winner: next match {} already has a result",
                id
            ),
            TournamentError::InvalidRoster(msg) => write!(f, "Could not read roster: {}", msg),
        }
    }
}

impl std::error::Error for TournamentError {}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Current phase of the tournament.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentState {
    /// Registering players and editing config.
    #[default]
    Setup,
    /// Pairs and groups generated; may be re-rolled.
    Pairing,
    /// Group stage scheduled; scores and playoff bracket.
    Schedule,
}

/// Full tournament state: roster, pairs, groups, matches, and phase.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub created_at: DateTime<Utc>,
    pub config: TournamentConfig,
    pub players: Vec<Player>,
    pub pairs: Vec<Pair>,
    pub groups: Vec<Group>,
    /// Group-stage matches followed by elimination matches.
    pub matches: Vec<GameMatch>,
    pub state: TournamentState,
    /// Registration counter; player ids never get reused after a removal.
    pub next_player_index: usize,
}

impl Tournament {
    /// Create a new tournament in Setup state with no players.
    pub fn new(config: TournamentConfig) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            config,
            players: Vec::new(),
            pairs: Vec::new(),
            groups: Vec::new(),
            matches: Vec::new(),
            state: TournamentState::Setup,
            next_player_index: 0,
        }
    }

    /// Register a player (Setup only). Names must be unique (case-insensitive).
    /// Exclusion ids are trimmed and upper-cased; blanks are dropped.
    pub fn add_player(
        &mut self,
        name: impl Into<String>,
        rank: RankTier,
        exclusions: &[String],
    ) -> Result<PlayerId, TournamentError> {
        if self.state != TournamentState::Setup {
            return Err(TournamentError::InvalidState);
        }
        let name = name.into();
        let name_trimmed = name.trim();
        if name_trimmed.is_empty() {
            return Err(TournamentError::EmptyPlayerName);
        }
        let is_duplicate = self
            .players
            .iter()
            .any(|p| p.name.eq_ignore_ascii_case(name_trimmed));
        if is_duplicate {
            return Err(TournamentError::DuplicatePlayerName);
        }
        let exclusions = exclusions
            .iter()
            .map(|s| s.trim().to_uppercase())
            .filter(|s| !s.is_empty());
        let player =
            Player::new(self.next_player_index, name_trimmed, rank).with_exclusions(exclusions);
        let id = player.id.clone();
        self.next_player_index += 1;
        self.players.push(player);
        Ok(id)
    }

    /// Remove a player by id (Setup only).
    pub fn remove_player(&mut self, player_id: &str) -> Result<(), TournamentError> {
        if self.state != TournamentState::Setup {
            return Err(TournamentError::InvalidState);
        }
        let idx = self
            .players
            .iter()
            .position(|p| p.id == player_id)
            .ok_or_else(|| TournamentError::PlayerNotFound(player_id.to_string()))?;
        self.players.remove(idx);
        Ok(())
    }

    /// Replace the config (Setup only).
    pub fn set_config(&mut self, config: TournamentConfig) -> Result<(), TournamentError> {
        if self.state != TournamentState::Setup {
            return Err(TournamentError::InvalidState);
        }
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Back to Setup with the same roster and config; pairs, groups and matches are dropped.
    pub fn restart(&mut self) {
        self.pairs.clear();
        self.groups.clear();
        self.matches.clear();
        self.state = TournamentState::Setup;
    }

    pub fn group_stage_matches(&self) -> impl Iterator<Item = &GameMatch> {
        self.matches.iter().filter(|m| !m.elimination)
    }

    pub fn elimination_matches(&self) -> impl Iterator<Item = &GameMatch> {
        self.matches.iter().filter(|m| m.elimination)
    }
}
