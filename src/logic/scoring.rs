//! Score reporting: record a result and push the winner into the linked playoff match.

use crate::models::{Entrant, GameMatch, MatchScore, PairId, Team, TournamentError, MAX_SCORE};

/// Record `score_1`–`score_2` for `match_id` and return the winning pair id.
///
/// Rejects unknown matches, scores above [`MAX_SCORE`], draws, and matches with a placeholder
/// side, without mutating anything. Reporting the same score again leaves the state unchanged. When the match
/// has a forward link, the winner replaces the linked side of the next match.
pub fn report_score(
    matches: &mut [GameMatch],
    match_id: &str,
    score_1: u32,
    score_2: u32,
) -> Result<PairId, TournamentError> {
    let idx = matches
        .iter()
        .position(|m| m.id == match_id)
        .ok_or_else(|| TournamentError::MatchNotFound(match_id.to_string()))?;
    if let Some(&got) = [score_1, score_2].iter().find(|&&s| s > MAX_SCORE) {
        return Err(TournamentError::ScoreOutOfRange { max: MAX_SCORE, got });
    }
    if score_1 == score_2 {
        return Err(TournamentError::DrawNotAllowed);
    }
    let (pair_1, pair_2) = matches[idx]
        .pair_ids()
        .ok_or_else(|| TournamentError::UnresolvedSide(match_id.to_string()))?;
    let winner = if score_1 > score_2 {
        pair_1.clone()
    } else {
        pair_2.clone()
    };

    let link = matches[idx].next.clone();
    let next_idx = match &link {
        Some(link) => {
            let next_idx = matches
                .iter()
                .position(|m| m.id == link.match_id)
                .ok_or_else(|| TournamentError::MatchNotFound(link.match_id.clone()))?;
            let winner_changes = matches[idx].winner.as_ref() != Some(&winner);
            if matches[next_idx].finished && winner_changes {
                return Err(TournamentError::DownstreamAlreadyPlayed(link.match_id.clone()));
            }
            Some(next_idx)
        }
        None => None,
    };

    let m = &mut matches[idx];
    m.score = MatchScore {
        side_1: Some(score_1),
        side_2: Some(score_2),
    };
    m.winner = Some(winner.clone());
    m.finished = true;

    if let (Some(next_idx), Some(link)) = (next_idx, link) {
        advance(&mut matches[next_idx], link.side, &winner);
    }
    log::debug!("Match {} reported {}-{}, winner {}", match_id, score_1, score_2, winner);
    Ok(winner)
}

fn advance(next: &mut GameMatch, side: Team, winner: &PairId) {
    *next.side_mut(side) = Entrant::Pair(winner.clone());
}
