//! Standings: pair and individual tables recomputed from finished group-stage matches.

use crate::models::{GameMatch, Group, Pair, StandingsRow};
use std::cmp::Ordering;
use std::collections::HashMap;

/// One row per pair, in `pairs` order, unranked.
pub fn compute_pair_standings(matches: &[GameMatch], pairs: &[Pair]) -> Vec<StandingsRow> {
    let mut rows: Vec<StandingsRow> = pairs
        .iter()
        .map(|p| StandingsRow::new(p.id.clone(), p.name()))
        .collect();
    let index: HashMap<&str, usize> = pairs
        .iter()
        .enumerate()
        .map(|(i, p)| (p.id.as_str(), i))
        .collect();

    for (m, s1, s2) in finished_results(matches) {
        let Some((a, b)) = m.pair_ids() else { continue };
        let (Some(&ia), Some(&ib)) = (index.get(a.as_str()), index.get(b.as_str())) else {
            continue;
        };
        rows[ia].record(s1, s2);
        rows[ib].record(s2, s1);
    }
    rows
}

/// One row per distinct player. Each player is credited with every result of their pair.
pub fn compute_player_standings(matches: &[GameMatch], pairs: &[Pair]) -> Vec<StandingsRow> {
    let mut rows: Vec<StandingsRow> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for player in pairs.iter().flat_map(|p| p.players()) {
        if !index.contains_key(&player.id) {
            index.insert(player.id.clone(), rows.len());
            rows.push(StandingsRow::new(player.id.clone(), player.name.clone()));
        }
    }
    let by_id: HashMap<&str, &Pair> = pairs.iter().map(|p| (p.id.as_str(), p)).collect();

    for (m, s1, s2) in finished_results(matches) {
        let Some((a, b)) = m.pair_ids() else { continue };
        let (Some(pa), Some(pb)) = (by_id.get(a.as_str()), by_id.get(b.as_str())) else {
            continue;
        };
        for player in pa.players() {
            rows[index[&player.id]].record(s1, s2);
        }
        for player in pb.players() {
            rows[index[&player.id]].record(s2, s1);
        }
    }
    rows
}

/// Finished group-stage matches with their scores. Missing scores count as 0.
fn finished_results(matches: &[GameMatch]) -> impl Iterator<Item = (&GameMatch, u32, u32)> {
    matches
        .iter()
        .filter(|m| m.counts_for_standings())
        .map(|m| (m, m.score.side_1.unwrap_or(0), m.score.side_2.unwrap_or(0)))
}

/// Ranking rule: wins, then head-to-head (pairs only, when exactly one direct finished
/// match exists), then point differential, then points for. `Less` means `a` ranks higher.
pub fn compare_rows(
    a: &StandingsRow,
    b: &StandingsRow,
    matches: &[GameMatch],
    head_to_head: bool,
) -> Ordering {
    let by_wins = b.wins.cmp(&a.wins);
    if by_wins != Ordering::Equal {
        return by_wins;
    }
    if head_to_head {
        let mut direct = matches
            .iter()
            .filter(|m| m.counts_for_standings() && m.is_between(&a.subject_id, &b.subject_id));
        if let (Some(only), None) = (direct.next(), direct.next()) {
            match only.winner.as_deref() {
                Some(w) if w == a.subject_id => return Ordering::Less,
                Some(w) if w == b.subject_id => return Ordering::Greater,
                _ => {}
            }
        }
    }
    b.diff()
        .cmp(&a.diff())
        .then_with(|| b.points_for.cmp(&a.points_for))
}

/// Sort rows by [`compare_rows`] and fill in `rank` (1 = best).
pub fn rank_standings(rows: &mut [StandingsRow], matches: &[GameMatch], head_to_head: bool) {
    // Head-to-head is not transitive, so use an insertion sort rather than `sort_by`,
    // which may panic on an inconsistent ordering.
    for i in 1..rows.len() {
        let mut j = i;
        while j > 0
            && compare_rows(&rows[j], &rows[j - 1], matches, head_to_head) == Ordering::Less
        {
            rows.swap(j, j - 1);
            j -= 1;
        }
    }
    for (i, row) in rows.iter_mut().enumerate() {
        row.rank = i as u32 + 1;
    }
}

/// Ranked pair table.
pub fn pair_standings(matches: &[GameMatch], pairs: &[Pair]) -> Vec<StandingsRow> {
    let mut rows = compute_pair_standings(matches, pairs);
    rank_standings(&mut rows, matches, true);
    rows
}

/// Ranked individual table.
pub fn player_standings(matches: &[GameMatch], pairs: &[Pair]) -> Vec<StandingsRow> {
    let mut rows = compute_player_standings(matches, pairs);
    rank_standings(&mut rows, matches, false);
    rows
}

/// Ranked pair table for each group, in group order.
pub fn group_standings(
    groups: &[Group],
    matches: &[GameMatch],
    pairs: &[Pair],
) -> Vec<(Group, Vec<StandingsRow>)> {
    let all = compute_pair_standings(matches, pairs);
    groups
        .iter()
        .map(|g| {
            let mut rows: Vec<StandingsRow> = all
                .iter()
                .filter(|r| g.pair_ids.contains(&r.subject_id))
                .cloned()
                .collect();
            rank_standings(&mut rows, matches, true);
            (g.clone(), rows)
        })
        .collect()
}
