//! Tournament business logic: pairing, scheduling, standings, playoff bracket, score entry.

mod bracket;
mod pairing;
mod schedule;
mod scoring;
mod setup;
mod standings;

pub use bracket::{build_bracket, round_name, seed_order, strength};
pub use pairing::{generate_pairs, generate_pairs_with_rng, snake_index};
pub use schedule::{build_schedule, last_slot, round_robin_backlog, MAX_CONSECUTIVE_SLOTS};
pub use scoring::report_score as apply_score;
pub use setup::{
    confirm_schedule, generate_elimination_stage, generate_pairings, generate_pairings_with_rng,
    report_score,
};
pub use standings::{
    compare_rows, compute_pair_standings, compute_player_standings, group_standings,
    pair_standings, player_standings, rank_standings,
};
