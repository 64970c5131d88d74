//! Doubles tournament organizer: library with models and business logic.

pub mod import;
pub mod logic;
pub mod models;

pub use import::{parse_roster, RosterEntry};
pub use logic::{
    apply_score, build_bracket, build_schedule, compare_rows, compute_pair_standings,
    compute_player_standings, confirm_schedule, generate_elimination_stage, generate_pairings,
    generate_pairings_with_rng, generate_pairs, generate_pairs_with_rng, group_standings,
    pair_standings, player_standings, rank_standings, report_score, seed_order,
};
pub use models::{
    Entrant, ForwardLink, GameMatch, Group, MatchId, MatchScore, Pair, PairId, Player, PlayerId,
    RankTier, StandingsRow, Team, Tournament, TournamentConfig, TournamentError, TournamentId,
    TournamentState, MAX_SCORE,
};
