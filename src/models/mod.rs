//! Data structures for the doubles tournament: players, pairs, groups, matches, standings, tournament state.

mod config;
mod game;
mod pair;
mod player;
mod standings;
mod tournament;

pub use config::{TournamentConfig, MAX_ELIMINATION_ROUNDS, MIN_PLAYERS};
pub use game::{
    Entrant, ForwardLink, GameMatch, MatchId, MatchScore, Team, GROUP_STAGE, MAX_SCORE,
};
pub use pair::{Group, GroupId, Pair, PairId};
pub use player::{player_id_for, Player, PlayerId, RankTier};
pub use standings::StandingsRow;
pub use tournament::{Tournament, TournamentError, TournamentId, TournamentState};
