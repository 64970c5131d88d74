//! Integration tests for qualification, seeding and linking of the playoff bracket.

use pickleball_tournament_web::logic::round_name;
use pickleball_tournament_web::{
    apply_score, build_bracket, seed_order, Entrant, GameMatch, Group, Pair, Player, RankTier,
    StandingsRow, Team, TournamentError,
};
use std::collections::HashMap;

/// Pairs PR01.. spread over groups of the given sizes, plus one standings row per pair
/// built from (wins, points_for, points_against).
fn field(sizes: &[usize], records: &[(u32, u32, u32)]) -> (Vec<Group>, Vec<Pair>, Vec<StandingsRow>) {
    let mut groups = Vec::new();
    let mut pairs = Vec::new();
    let mut rows = Vec::new();
    for (g, &size) in sizes.iter().enumerate() {
        let mut group = Group::new(g);
        for _ in 0..size {
            let n = pairs.len();
            let mut pair = Pair::new(
                n,
                Player::new(2 * n, format!("L{}", n), RankTier::A),
                Player::new(2 * n + 1, format!("R{}", n), RankTier::B),
            );
            pair.group_id = Some(group.id.clone());
            group.pair_ids.push(pair.id.clone());

            let (wins, points_for, points_against) = records[n];
            let mut row = StandingsRow::new(pair.id.clone(), pair.name());
            row.wins = wins;
            row.points_for = points_for;
            row.points_against = points_against;
            rows.push(row);
            pairs.push(pair);
        }
        groups.push(group);
    }
    (groups, pairs, rows)
}

fn pair_on(m: &GameMatch, team: Team) -> &str {
    m.side(team).pair_id().map(String::as_str).unwrap_or("-")
}

#[test]
fn seed_order_expands_from_one_two() {
    assert_eq!(seed_order(2), vec![1, 2]);
    assert_eq!(seed_order(4), vec![1, 4, 2, 3]);
    assert_eq!(seed_order(8), vec![1, 8, 4, 5, 2, 7, 3, 6]);
    assert_eq!(
        seed_order(16),
        vec![1, 16, 8, 9, 4, 13, 5, 12, 2, 15, 7, 10, 3, 14, 6, 11]
    );
}

#[test]
fn round_names_count_back_from_the_final() {
    assert_eq!(round_name(1, 0), "Final");
    assert_eq!(round_name(3, 0), "Quarter Final");
    assert_eq!(round_name(3, 1), "Semi Final");
    assert_eq!(round_name(4, 0), "Round of 16");
}

#[test]
fn zero_rounds_is_an_empty_bracket_and_five_is_rejected() {
    let (groups, pairs, rows) = field(&[2], &[(1, 11, 5), (0, 5, 11)]);
    assert!(build_bracket(&groups, &rows, &pairs, 0, 9).unwrap().is_empty());
    assert_eq!(
        build_bracket(&groups, &rows, &pairs, 5, 9),
        Err(TournamentError::InvalidEliminationRounds(5))
    );
}

#[test]
fn top_two_per_group_are_seeded_by_strength_and_linked() {
    let records = [
        (3, 33, 10), // PR01
        (2, 30, 20), // PR02
        (1, 20, 30),
        (0, 10, 33),
        (3, 33, 20), // PR05
        (2, 30, 25), // PR06
        (1, 25, 30),
        (0, 20, 33),
    ];
    let (groups, pairs, rows) = field(&[4, 4], &records);
    let bracket = build_bracket(&groups, &rows, &pairs, 2, 10).unwrap();
    assert_eq!(bracket.len(), 3);

    // Strength: PR01 3023, PR05 3013, PR02 2010, PR06 2005.
    let semi_1 = &bracket[0];
    let semi_2 = &bracket[1];
    let final_ = &bracket[2];
    assert_eq!(semi_1.id, "E1000");
    assert_eq!((pair_on(semi_1, Team::One), pair_on(semi_1, Team::Two)), ("PR01", "PR06"));
    assert_eq!((pair_on(semi_2, Team::One), pair_on(semi_2, Team::Two)), ("PR05", "PR02"));
    assert_eq!(semi_1.round_name, "Semi Final");
    assert_eq!((semi_1.slot, semi_2.slot), (10, 10));
    assert_ne!(semi_1.court, semi_2.court);

    assert_eq!(final_.id, "E1002");
    assert_eq!(final_.round_name, "Final");
    assert_eq!(final_.slot, 11);
    assert_eq!(final_.side_1, Entrant::Pending("Winner of E1000".to_string()));
    assert_eq!(final_.side_2, Entrant::Pending("Winner of E1001".to_string()));
    assert_eq!(final_.next, None);

    let link_1 = semi_1.next.as_ref().unwrap();
    let link_2 = semi_2.next.as_ref().unwrap();
    assert_eq!((link_1.match_id.as_str(), link_1.side), ("E1002", Team::One));
    assert_eq!((link_2.match_id.as_str(), link_2.side), ("E1002", Team::Two));
    assert!(bracket.iter().all(|m| m.elimination && m.group_id.is_none() && !m.finished));
}

#[test]
fn leftover_places_go_to_best_wildcard() {
    // Three groups, bracket of four: one guaranteed place each plus one wildcard.
    let records = [
        (2, 22, 10), // PR01 G1 winner
        (1, 20, 12), // PR02 wildcard candidate, diff +8
        (0, 5, 22),
        (2, 22, 15), // PR04 G2 winner
        (1, 18, 15), // PR05 diff +3
        (0, 10, 20),
        (2, 22, 18), // PR07 G3 winner
        (1, 20, 12), // PR08 ties PR02 on wins, diff, points for; id decides
        (0, 9, 21),
    ];
    let (groups, pairs, rows) = field(&[3, 3, 3], &records);
    let bracket = build_bracket(&groups, &rows, &pairs, 2, 1).unwrap();

    let entrants: Vec<&str> = bracket[..2]
        .iter()
        .flat_map(|m| [pair_on(m, Team::One), pair_on(m, Team::Two)])
        .collect();
    assert!(entrants.contains(&"PR02"));
    assert!(!entrants.contains(&"PR08"));
    assert!(!entrants.contains(&"PR05"));
    for winner in ["PR01", "PR04", "PR07"] {
        assert!(entrants.contains(&winner));
    }
}

#[test]
fn short_field_leaves_seed_placeholders() {
    let (groups, pairs, rows) = field(&[2], &[(1, 11, 5), (0, 5, 11)]);
    let bracket = build_bracket(&groups, &rows, &pairs, 2, 4).unwrap();
    assert_eq!(bracket.len(), 3);
    assert_eq!(pair_on(&bracket[0], Team::One), "PR01");
    assert_eq!(bracket[0].side_2, Entrant::Pending("Seed 4".to_string()));
    assert_eq!(pair_on(&bracket[1], Team::One), "PR02");
    assert_eq!(bracket[1].side_2, Entrant::Pending("Seed 3".to_string()));

    let mut matches = bracket;
    assert_eq!(
        apply_score(&mut matches, "E1000", 11, 0),
        Err(TournamentError::UnresolvedSide("E1000".to_string()))
    );
    matches[0].side_2 = Entrant::Pair("PR02".to_string());
    assert_eq!(apply_score(&mut matches, "E1000", 11, 0).unwrap(), "PR01");
    assert_eq!(matches[2].side_1, Entrant::Pair("PR01".to_string()));
}

#[test]
fn sixteen_pair_bracket_forms_a_tree() {
    let records: Vec<(u32, u32, u32)> = (0..16u32).map(|i| (i % 4, 40 + i, 40)).collect();
    let (groups, pairs, rows) = field(&[4, 4, 4, 4], &records);
    let bracket = build_bracket(&groups, &rows, &pairs, 4, 20).unwrap();
    assert_eq!(bracket.len(), 15);

    let mut per_round: HashMap<&str, usize> = HashMap::new();
    for m in &bracket {
        *per_round.entry(m.round_name.as_str()).or_default() += 1;
    }
    assert_eq!(per_round["Round of 16"], 8);
    assert_eq!(per_round["Quarter Final"], 4);
    assert_eq!(per_round["Semi Final"], 2);
    assert_eq!(per_round["Final"], 1);

    let mut incoming: HashMap<&str, Vec<Team>> = HashMap::new();
    for m in &bracket {
        if let Some(link) = &m.next {
            let target = bracket.iter().find(|t| t.id == link.match_id).unwrap();
            assert_eq!(target.slot, m.slot + 1);
            incoming.entry(link.match_id.as_str()).or_default().push(link.side);
        }
    }
    assert_eq!(incoming.len(), 7);
    assert!(incoming.values().all(|sides| sides == &vec![Team::One, Team::Two]));
    assert_eq!(bracket.iter().filter(|m| m.next.is_none()).count(), 1);

    let first_round: Vec<_> = bracket.iter().filter(|m| m.slot == 20).collect();
    assert_eq!(first_round.len(), 8);
    assert!(first_round.iter().all(|m| m.pair_ids().is_some()));
}
