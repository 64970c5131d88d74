//! Playoff bracket: qualify pairs from group standings, seed them, and build a linked single-elimination tree.

use crate::models::{
    Entrant, ForwardLink, GameMatch, Group, Pair, StandingsRow, Team, TournamentError,
    MAX_ELIMINATION_ROUNDS,
};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

/// Round names indexed from the final backwards.
const ROUND_NAMES: [&str; 4] = ["Final", "Semi Final", "Quarter Final", "Round of 16"];

/// First elimination match number (`E1000`).
const FIRST_MATCH_NUMBER: u32 = 1000;

/// Canonical seeding order for a bracket of `size` (a power of two, at least 2):
/// each expansion of length L replaces seed s with (s, 2L + 1 - s).
pub fn seed_order(size: usize) -> Vec<usize> {
    let mut seeds = vec![1, 2];
    while seeds.len() < size {
        let len = seeds.len();
        seeds = seeds.iter().flat_map(|&s| [s, 2 * len + 1 - s]).collect();
    }
    seeds
}

/// Name of round `round` (0 = first round) in a bracket with `rounds` rounds.
pub fn round_name(rounds: u32, round: u32) -> &'static str {
    ROUND_NAMES
        .get((rounds - 1 - round) as usize)
        .copied()
        .unwrap_or("Elimination")
}

/// Seeding strength: wins dominate, differential breaks ties.
pub fn strength(row: &StandingsRow) -> i64 {
    i64::from(row.wins) * 1000 + row.diff()
}

/// Build the elimination matches. `rounds == 0` yields an empty bracket.
///
/// Each group sends its top `bracket_size / groups` pairs (wins, then differential); leftover
/// places go to the best remaining pairs overall (wins, differential, points for, pair id).
/// Qualifiers are seeded by [`strength`], then points for, then pair id. Seats without a
/// qualifier keep a "Seed k" placeholder; that match cannot be scored until the seat is filled by hand.
pub fn build_bracket(
    groups: &[Group],
    standings: &[StandingsRow],
    pairs: &[Pair],
    rounds: u32,
    start_slot: u32,
) -> Result<Vec<GameMatch>, TournamentError> {
    if rounds == 0 {
        return Ok(Vec::new());
    }
    if rounds > MAX_ELIMINATION_ROUNDS {
        return Err(TournamentError::InvalidEliminationRounds(rounds));
    }
    let size = 1usize << rounds;

    let qualifiers = select_qualifiers(groups, standings, pairs, size);
    if qualifiers.len() < size {
        log::warn!(
            "Only {} qualifiers for a bracket of {}; open seats stay as placeholders",
            qualifiers.len(),
            size
        );
    }

    let order = seed_order(size);
    let mut bracket: Vec<GameMatch> = Vec::with_capacity(size - 1);
    let mut next_number = FIRST_MATCH_NUMBER;
    let mut previous: Vec<usize> = Vec::with_capacity(size / 2);

    let seat = |seed: usize| match qualifiers.get(seed - 1) {
        Some(row) => Entrant::Pair(row.subject_id.clone()),
        None => Entrant::Pending(format!("Seed {}", seed)),
    };
    for (i, seeds) in order.chunks_exact(2).enumerate() {
        let m = GameMatch::elimination(
            format!("E{}", next_number),
            round_name(rounds, 0),
            seat(seeds[0]),
            seat(seeds[1]),
            i as u32 + 1,
            start_slot,
        );
        next_number += 1;
        previous.push(bracket.len());
        bracket.push(m);
    }

    for round in 1..rounds {
        let mut current = Vec::with_capacity(previous.len() / 2);
        for (i, feeders) in previous.chunks_exact(2).enumerate() {
            let id = format!("E{}", next_number);
            next_number += 1;
            let m = GameMatch::elimination(
                id.clone(),
                round_name(rounds, round),
                Entrant::Pending(format!("Winner of {}", bracket[feeders[0]].id)),
                Entrant::Pending(format!("Winner of {}", bracket[feeders[1]].id)),
                i as u32 + 1,
                start_slot + round,
            );
            bracket[feeders[0]].next = Some(ForwardLink {
                match_id: id.clone(),
                side: Team::One,
            });
            bracket[feeders[1]].next = Some(ForwardLink {
                match_id: id,
                side: Team::Two,
            });
            current.push(bracket.len());
            bracket.push(m);
        }
        previous = current;
    }

    log::info!(
        "Built {}-pair bracket: {} matches from slot {}",
        size,
        bracket.len(),
        start_slot
    );
    Ok(bracket)
}

/// Qualifying rows in seed order (index 0 = seed 1). At most `size` entries.
fn select_qualifiers<'a>(
    groups: &[Group],
    standings: &'a [StandingsRow],
    pairs: &[Pair],
    size: usize,
) -> Vec<&'a StandingsRow> {
    let group_of: HashMap<&str, &str> = pairs
        .iter()
        .filter_map(|p| p.group_id.as_deref().map(|g| (p.id.as_str(), g)))
        .collect();
    let per_group = if groups.is_empty() { 0 } else { size / groups.len() };

    let mut qualifiers: Vec<&StandingsRow> = Vec::with_capacity(size);
    let mut chosen: HashSet<&str> = HashSet::new();

    for group in groups {
        let mut rows: Vec<&StandingsRow> = standings
            .iter()
            .filter(|r| group_of.get(r.subject_id.as_str()) == Some(&group.id.as_str()))
            .collect();
        rows.sort_by(|a, b| b.wins.cmp(&a.wins).then_with(|| b.diff().cmp(&a.diff())));
        for row in rows.into_iter().take(per_group) {
            if qualifiers.len() < size && chosen.insert(row.subject_id.as_str()) {
                qualifiers.push(row);
            }
        }
    }

    if qualifiers.len() < size {
        let mut overall: Vec<&StandingsRow> = standings.iter().collect();
        overall.sort_by(|a, b| wildcard_order(a, b));
        for row in overall {
            if qualifiers.len() >= size {
                break;
            }
            if chosen.insert(row.subject_id.as_str()) {
                log::debug!("Wildcard qualifier {}", row.subject_id);
                qualifiers.push(row);
            }
        }
    }

    qualifiers.sort_by(|a, b| {
        strength(b)
            .cmp(&strength(a))
            .then_with(|| b.points_for.cmp(&a.points_for))
            .then_with(|| a.subject_id.cmp(&b.subject_id))
    });
    qualifiers
}

fn wildcard_order(a: &StandingsRow, b: &StandingsRow) -> Ordering {
    b.wins
        .cmp(&a.wins)
        .then_with(|| b.diff().cmp(&a.diff()))
        .then_with(|| b.points_for.cmp(&a.points_for))
        .then_with(|| a.subject_id.cmp(&b.subject_id))
}
