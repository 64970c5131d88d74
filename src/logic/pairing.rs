//! Pair generation: balance strong with weak players, then snake-draft pairs into groups.

use crate::models::{Group, Pair, Player, TournamentError};
use rand::seq::SliceRandom;
use rand::Rng;

/// Pair up `players` and split the pairs into `group_count` groups, using the thread RNG.
pub fn generate_pairs(
    players: &[Player],
    group_count: usize,
) -> Result<(Vec<Pair>, Vec<Group>), TournamentError> {
    generate_pairs_with_rng(players, group_count, &mut rand::thread_rng())
}

/// Same as [`generate_pairs`] with a caller-supplied RNG.
///
/// 1. Shuffle, then stable-sort by skill descending (ties stay in random order).
/// 2. Take the strongest remaining player and partner them with the weakest one they
///    are not excluded with; if every candidate is excluded, take the weakest anyway.
/// 3. Shuffle pairs, stable-sort by combined skill descending, snake-draft into groups.
pub fn generate_pairs_with_rng<R: Rng + ?Sized>(
    players: &[Player],
    group_count: usize,
    rng: &mut R,
) -> Result<(Vec<Pair>, Vec<Group>), TournamentError> {
    if players.len() < 2 {
        return Err(TournamentError::NotEnoughPlayers { required: 2 });
    }
    if players.len() % 2 != 0 {
        return Err(TournamentError::OddPlayerCount(players.len()));
    }
    if group_count == 0 {
        return Err(TournamentError::InvalidGroupCount);
    }

    let mut pool: Vec<Player> = players.to_vec();
    pool.shuffle(rng);
    pool.sort_by(|a, b| b.skill().cmp(&a.skill()));

    let mut pairs: Vec<Pair> = Vec::with_capacity(pool.len() / 2);
    while pool.len() >= 2 {
        let first = pool.remove(0);
        let partner_idx = match pool.iter().rposition(|c| !first.excludes(c)) {
            Some(idx) => idx,
            None => {
                log::debug!(
                    "No compatible partner for {}; pairing with weakest remaining",
                    first.id
                );
                pool.len() - 1
            }
        };
        let second = pool.remove(partner_idx);
        pairs.push(Pair::new(pairs.len(), first, second));
    }

    pairs.shuffle(rng);
    pairs.sort_by(|a, b| b.skill.cmp(&a.skill));

    let mut groups: Vec<Group> = (0..group_count).map(Group::new).collect();
    for (index, pair) in pairs.iter_mut().enumerate() {
        let group_idx = snake_index(index, group_count);
        pair.group_id = Some(groups[group_idx].id.clone());
        groups[group_idx].pair_ids.push(pair.id.clone());
    }

    log::info!(
        "Generated {} pairs across {} groups",
        pairs.len(),
        groups.len()
    );
    Ok((pairs, groups))
}

/// Group index for the `index`-th drafted pair: left-to-right on even passes, right-to-left on odd ones.
pub fn snake_index(index: usize, group_count: usize) -> usize {
    let pass = index / group_count;
    let pos = index % group_count;
    if pass % 2 == 0 {
        pos
    } else {
        group_count - 1 - pos
    }
}
