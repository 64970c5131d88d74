//! Group stage schedule: full round robin per group, packed greedily into slots and courts.

use crate::models::{GameMatch, Group, Pair, PairId, TournamentError};
use std::collections::{HashMap, HashSet};

/// A pair that has played this many slots in a row sits out until it rests.
pub const MAX_CONSECUTIVE_SLOTS: u32 = 3;

/// Every pair-vs-pair matchup within each group, ids `M1`, `M2`, ... in enumeration order.
pub fn round_robin_backlog(groups: &[Group]) -> Vec<GameMatch> {
    let mut backlog = Vec::new();
    for group in groups {
        let ids = &group.pair_ids;
        for i in 0..ids.len() {
            for j in (i + 1)..ids.len() {
                backlog.push(GameMatch::group_stage(
                    format!("M{}", backlog.len() + 1),
                    group.id.clone(),
                    ids[i].clone(),
                    ids[j].clone(),
                ));
            }
        }
    }
    backlog
}

/// Assign every round-robin match to a (slot, court), slots starting at 1.
///
/// For each slot, each court takes the first backlog match whose pairs are free this slot
/// and below the fatigue ceiling; courts with no eligible match stay idle. If a whole slot
/// would stay empty, the first backlog match is forced onto court 1 so the backlog always drains.
pub fn build_schedule(
    groups: &[Group],
    pairs: &[Pair],
    courts: u32,
) -> Result<Vec<GameMatch>, TournamentError> {
    if courts == 0 {
        return Err(TournamentError::InvalidCourtCount);
    }

    let mut backlog = round_robin_backlog(groups);
    let mut consecutive: HashMap<PairId, u32> = pairs.iter().map(|p| (p.id.clone(), 0)).collect();
    for id in groups.iter().flat_map(|g| g.pair_ids.iter()) {
        consecutive.entry(id.clone()).or_insert(0);
    }

    let mut scheduled = Vec::with_capacity(backlog.len());
    let mut slot = 1;

    while !backlog.is_empty() {
        let mut busy: HashSet<PairId> = HashSet::new();
        let mut placed = 0;

        for court in 1..=courts {
            let pick = backlog.iter().position(|m| {
                let Some((a, b)) = m.pair_ids() else {
                    return false;
                };
                let fresh = |id: &PairId| {
                    consecutive.get(id).copied().unwrap_or(0) < MAX_CONSECUTIVE_SLOTS
                };
                !busy.contains(a) && !busy.contains(b) && fresh(a) && fresh(b)
            });
            if let Some(idx) = pick {
                let m = backlog.remove(idx);
                scheduled.push(place(m, slot, court, &mut busy));
                placed += 1;
            }
        }

        if placed == 0 {
            let m = backlog.remove(0);
            log::debug!("Slot {}: no eligible match, forcing {} onto court 1", slot, m.id);
            scheduled.push(place(m, slot, 1, &mut busy));
        }

        for (id, count) in consecutive.iter_mut() {
            if busy.contains(id) {
                *count += 1;
            } else {
                *count = 0;
            }
        }
        slot += 1;
    }

    log::info!(
        "Scheduled {} group matches over {} slots on {} courts",
        scheduled.len(),
        slot - 1,
        courts
    );
    Ok(scheduled)
}

fn place(mut m: GameMatch, slot: u32, court: u32, busy: &mut HashSet<PairId>) -> GameMatch {
    m.slot = slot;
    m.court = court;
    if let Some((a, b)) = m.pair_ids() {
        busy.insert(a.clone());
        busy.insert(b.clone());
    }
    m
}

/// Highest slot used by the group stage, or 0 if there is none.
pub fn last_slot<'a>(matches: impl IntoIterator<Item = &'a GameMatch>) -> u32 {
    matches.into_iter().map(|m| m.slot).max().unwrap_or(0)
}
