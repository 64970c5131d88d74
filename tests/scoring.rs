//! Integration tests for score reporting and winner propagation through the bracket.

use pickleball_tournament_web::{
    apply_score, build_bracket, Entrant, GameMatch, Group, Pair, Player, RankTier, StandingsRow,
    Team, TournamentError, MAX_SCORE,
};

/// Four-pair bracket: E1000 = PR01 vs PR04, E1001 = PR02 vs PR03, E1002 = final.
fn bracket() -> Vec<GameMatch> {
    let mut group = Group::new(0);
    let mut pairs = Vec::new();
    let mut rows = Vec::new();
    for n in 0..4 {
        let mut pair = Pair::new(
            n,
            Player::new(2 * n, format!("L{}", n), RankTier::A),
            Player::new(2 * n + 1, format!("R{}", n), RankTier::B),
        );
        pair.group_id = Some(group.id.clone());
        group.pair_ids.push(pair.id.clone());
        let mut row = StandingsRow::new(pair.id.clone(), pair.name());
        row.wins = 3 - n as u32;
        rows.push(row);
        pairs.push(pair);
    }
    build_bracket(&[group], &rows, &pairs, 2, 5).unwrap()
}

#[test]
fn winner_moves_into_linked_side_only() {
    let mut matches = bracket();
    let winner = apply_score(&mut matches, "E1000", 11, 7).unwrap();
    assert_eq!(winner, "PR01");

    let played = &matches[0];
    assert!(played.finished);
    assert_eq!((played.score.side_1, played.score.side_2), (Some(11), Some(7)));
    assert_eq!(played.winner.as_deref(), Some("PR01"));

    let final_ = &matches[2];
    assert_eq!(final_.side_1, Entrant::Pair("PR01".to_string()));
    assert_eq!(final_.side_2, Entrant::Pending("Winner of E1001".to_string()));
}

#[test]
fn second_side_winner_fills_side_two() {
    let mut matches = bracket();
    apply_score(&mut matches, "E1001", 4, 11).unwrap();
    assert_eq!(matches[2].side(Team::Two), &Entrant::Pair("PR03".to_string()));
    assert!(matches[2].side(Team::One).pair_id().is_none());
}

#[test]
fn reporting_the_same_score_twice_is_idempotent() {
    let mut matches = bracket();
    apply_score(&mut matches, "E1000", 11, 5).unwrap();
    let after_first = matches.clone();
    apply_score(&mut matches, "E1000", 11, 5).unwrap();
    assert_eq!(matches, after_first);
}

#[test]
fn draws_and_unknown_matches_are_rejected_without_changes() {
    let mut matches = bracket();
    let before = matches.clone();
    assert_eq!(
        apply_score(&mut matches, "E1000", 9, 9),
        Err(TournamentError::DrawNotAllowed)
    );
    assert_eq!(
        apply_score(&mut matches, "E4242", 11, 9),
        Err(TournamentError::MatchNotFound("E4242".to_string()))
    );
    assert_eq!(matches, before);
}

#[test]
fn placeholder_sides_cannot_be_scored() {
    let mut matches = bracket();
    assert_eq!(
        apply_score(&mut matches, "E1002", 11, 9),
        Err(TournamentError::UnresolvedSide("E1002".to_string()))
    );
    assert!(!matches[2].finished);
}

#[test]
fn corrections_respect_a_finished_successor() {
    let mut matches = bracket();
    apply_score(&mut matches, "E1000", 11, 7).unwrap();
    apply_score(&mut matches, "E1001", 11, 7).unwrap();

    // Before the final is played, flipping the semi result re-routes the winner.
    apply_score(&mut matches, "E1000", 7, 11).unwrap();
    assert_eq!(matches[2].side_1, Entrant::Pair("PR04".to_string()));

    apply_score(&mut matches, "E1002", 11, 3).unwrap();
    let before = matches.clone();
    assert_eq!(
        apply_score(&mut matches, "E1000", 11, 7),
        Err(TournamentError::DownstreamAlreadyPlayed("E1002".to_string()))
    );
    assert_eq!(matches, before);

    // Same winner, corrected score: still allowed.
    apply_score(&mut matches, "E1000", 9, 11).unwrap();
    assert_eq!(matches[0].score.side_1, Some(9));
    assert_eq!(matches[2].side_1, Entrant::Pair("PR04".to_string()));
}

#[test]
fn group_stage_scores_have_no_forward_effect() {
    let mut matches = vec![GameMatch::group_stage(
        "M1",
        "G1".to_string(),
        "PR01".to_string(),
        "PR02".to_string(),
    )];
    let winner = apply_score(&mut matches, "M1", 8, 11).unwrap();
    assert_eq!(winner, "PR02");
    assert_eq!(matches[0].winner.as_deref(), Some("PR02"));
    assert!(matches[0].next.is_none());
}

#[test]
fn scores_above_the_maximum_are_rejected_without_changes() {
    let mut matches = vec![GameMatch::group_stage(
        "M1",
        "G1".to_string(),
        "PR01".to_string(),
        "PR02".to_string(),
    )];
    let before = matches.clone();
    assert_eq!(
        apply_score(&mut matches, "M1", 3_000_000_000, 1),
        Err(TournamentError::ScoreOutOfRange {
            max: MAX_SCORE,
            got: 3_000_000_000
        })
    );
    assert_eq!(
        apply_score(&mut matches, "M1", 11, MAX_SCORE + 1),
        Err(TournamentError::ScoreOutOfRange {
            max: MAX_SCORE,
            got: MAX_SCORE + 1
        })
    );
    assert_eq!(matches, before);

    assert_eq!(apply_score(&mut matches, "M1", MAX_SCORE, 0).unwrap(), "PR01");
}
