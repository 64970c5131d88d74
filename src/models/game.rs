//! Match (game), its two sides, score, and the forward link used by the playoff bracket.

use crate::models::pair::{GroupId, PairId};
use serde::{Deserialize, Serialize};

/// Identifier for a match (`M1`.. for group stage, `E1000`.. for elimination).
pub type MatchId = String;

/// Round label used for every group-stage match.
pub const GROUP_STAGE: &str = "Group Stage";

/// Highest score accepted for one side of a match.
pub const MAX_SCORE: u32 = 99;

/// One of the two sides of a match.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Team {
    #[default]
    One,
    Two,
}

/// What occupies a side: a known pair, or a label waiting to be resolved ("Seed 3", "Winner of E1002").
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Entrant {
    Pair(PairId),
    Pending(String),
}

impl Entrant {
    pub fn pair_id(&self) -> Option<&PairId> {
        match self {
            Entrant::Pair(id) => Some(id),
            Entrant::Pending(_) => None,
        }
    }

    pub fn is(&self, pair_id: &str) -> bool {
        self.pair_id().is_some_and(|id| id == pair_id)
    }
}

/// Both sides' points. Both None until reported.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchScore {
    pub side_1: Option<u32>,
    pub side_2: Option<u32>,
}

/// Where the winner of an elimination match goes next.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ForwardLink {
    pub match_id: MatchId,
    pub side: Team,
}

/// A single match between two pairs.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameMatch {
    pub id: MatchId,
    pub round_name: String,
    pub elimination: bool,
    /// None for elimination matches.
    pub group_id: Option<GroupId>,
    pub side_1: Entrant,
    pub side_2: Entrant,
    pub score: MatchScore,
    /// None until reported.
    pub winner: Option<PairId>,
    pub court: u32,
    pub slot: u32,
    pub finished: bool,
    /// Elimination only.
    pub next: Option<ForwardLink>,
}

impl GameMatch {
    /// A round-robin match between two known pairs; court and slot are filled in by the scheduler.
    pub fn group_stage(
        id: impl Into<MatchId>,
        group_id: GroupId,
        pair_1: PairId,
        pair_2: PairId,
    ) -> Self {
        Self {
            id: id.into(),
            round_name: GROUP_STAGE.to_string(),
            elimination: false,
            group_id: Some(group_id),
            side_1: Entrant::Pair(pair_1),
            side_2: Entrant::Pair(pair_2),
            score: MatchScore::default(),
            winner: None,
            court: 0,
            slot: 0,
            finished: false,
            next: None,
        }
    }

    /// An elimination match with no forward link yet.
    pub fn elimination(
        id: impl Into<MatchId>,
        round_name: impl Into<String>,
        side_1: Entrant,
        side_2: Entrant,
        court: u32,
        slot: u32,
    ) -> Self {
        Self {
            id: id.into(),
            round_name: round_name.into(),
            elimination: true,
            group_id: None,
            side_1,
            side_2,
            score: MatchScore::default(),
            winner: None,
            court,
            slot,
            finished: false,
            next: None,
        }
    }

    pub fn side(&self, team: Team) -> &Entrant {
        match team {
            Team::One => &self.side_1,
            Team::Two => &self.side_2,
        }
    }

    pub fn side_mut(&mut self, team: Team) -> &mut Entrant {
        match team {
            Team::One => &mut self.side_1,
            Team::Two => &mut self.side_2,
        }
    }

    /// Both pair ids, if both sides are resolved.
    pub fn pair_ids(&self) -> Option<(&PairId, &PairId)> {
        Some((self.side_1.pair_id()?, self.side_2.pair_id()?))
    }

    /// True if `pair_id` plays on either side.
    pub fn involves(&self, pair_id: &str) -> bool {
        self.side_1.is(pair_id) || self.side_2.is(pair_id)
    }

    /// True if the match is between exactly these two pairs, in either orientation.
    pub fn is_between(&self, a: &str, b: &str) -> bool {
        (self.side_1.is(a) && self.side_2.is(b)) || (self.side_1.is(b) && self.side_2.is(a))
    }

    /// Finished group-stage match: the only kind that feeds standings.
    pub fn counts_for_standings(&self) -> bool {
        self.finished && !self.elimination
    }
}
