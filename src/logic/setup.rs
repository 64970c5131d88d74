//! Stage transitions on a Tournament: pairing, scheduling, score entry, playoff generation.

use crate::logic::bracket::build_bracket;
use crate::logic::pairing::generate_pairs_with_rng;
use crate::logic::schedule::{build_schedule, last_slot};
use crate::logic::scoring;
use crate::logic::standings::{
    compute_pair_standings, group_standings, pair_standings, player_standings,
};
use crate::models::{
    GameMatch, Group, PairId, StandingsRow, Tournament, TournamentError, TournamentState,
};
use rand::Rng;

/// Gap between the last group-stage slot and the first playoff slot.
const PLAYOFF_SLOT_GAP: u32 = 2;

/// Generate (or re-roll) pairs and groups. Valid in Setup or Pairing; moves to Pairing.
pub fn generate_pairings(tournament: &mut Tournament) -> Result<(), TournamentError> {
    generate_pairings_with_rng(tournament, &mut rand::thread_rng())
}

/// Same as [`generate_pairings`] with a caller-supplied RNG.
pub fn generate_pairings_with_rng<R: Rng + ?Sized>(
    tournament: &mut Tournament,
    rng: &mut R,
) -> Result<(), TournamentError> {
    if !matches!(
        tournament.state,
        TournamentState::Setup | TournamentState::Pairing
    ) {
        return Err(TournamentError::InvalidState);
    }
    tournament.config.validate_roster(tournament.players.len())?;
    let (pairs, groups) =
        generate_pairs_with_rng(&tournament.players, tournament.config.groups as usize, rng)?;
    tournament.pairs = pairs;
    tournament.groups = groups;
    tournament.matches.clear();
    tournament.state = TournamentState::Pairing;
    log::info!("Tournament {}: pairs generated", tournament.id);
    Ok(())
}

/// Build the group-stage schedule from the confirmed pairs. Pairing -> Schedule.
pub fn confirm_schedule(tournament: &mut Tournament) -> Result<(), TournamentError> {
    if tournament.state != TournamentState::Pairing {
        return Err(TournamentError::InvalidState);
    }
    tournament.matches =
        build_schedule(&tournament.groups, &tournament.pairs, tournament.config.courts)?;
    tournament.state = TournamentState::Schedule;
    log::info!(
        "Tournament {}: {} group matches scheduled",
        tournament.id,
        tournament.matches.len()
    );
    Ok(())
}

/// Report a score (Schedule only). See [`scoring::report_score`].
pub fn report_score(
    tournament: &mut Tournament,
    match_id: &str,
    score_1: u32,
    score_2: u32,
) -> Result<PairId, TournamentError> {
    if tournament.state != TournamentState::Schedule {
        return Err(TournamentError::InvalidState);
    }
    scoring::report_score(&mut tournament.matches, match_id, score_1, score_2)
}

/// Build the playoff bracket from current group standings, replacing any previous one.
/// Starts two slots after the last group-stage slot.
pub fn generate_elimination_stage(tournament: &mut Tournament) -> Result<(), TournamentError> {
    if tournament.state != TournamentState::Schedule {
        return Err(TournamentError::InvalidState);
    }
    let group_matches: Vec<GameMatch> = tournament.group_stage_matches().cloned().collect();
    let unfinished = group_matches.iter().filter(|m| !m.finished).count();
    if unfinished > 0 {
        log::warn!(
            "Tournament {}: building bracket with {} group matches unfinished",
            tournament.id,
            unfinished
        );
    }
    let standings = compute_pair_standings(&group_matches, &tournament.pairs);
    let start_slot = last_slot(&group_matches) + PLAYOFF_SLOT_GAP;
    let bracket = build_bracket(
        &tournament.groups,
        &standings,
        &tournament.pairs,
        tournament.config.elimination_rounds,
        start_slot,
    )?;
    tournament.matches = group_matches;
    tournament.matches.extend(bracket);
    Ok(())
}

impl Tournament {
    /// Ranked pair standings from finished group-stage matches.
    pub fn pair_standings(&self) -> Vec<StandingsRow> {
        pair_standings(&self.matches, &self.pairs)
    }

    /// Ranked individual standings from finished group-stage matches.
    pub fn player_standings(&self) -> Vec<StandingsRow> {
        player_standings(&self.matches, &self.pairs)
    }

    /// Ranked pair standings per group.
    pub fn group_standings(&self) -> Vec<(Group, Vec<StandingsRow>)> {
        group_standings(&self.groups, &self.matches, &self.pairs)
    }
}
