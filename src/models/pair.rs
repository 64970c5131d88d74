//! Pair (doubles team) and Group (round-robin pool).

use crate::models::player::Player;
use serde::{Deserialize, Serialize};

/// Identifier for a pair (`PR01`, `PR02`, ...).
pub type PairId = String;

/// Identifier for a group (`G1`, `G2`, ...).
pub type GroupId = String;

/// Two players competing together.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Pair {
    pub id: PairId,
    pub player_1: Player,
    pub player_2: Player,
    /// Sum of both players' skill scores.
    pub skill: u32,
    /// None until groups are drafted.
    pub group_id: Option<GroupId>,
    /// Reserved for manual editing; carried through untouched.
    #[serde(default)]
    pub manual_override: bool,
}

impl Pair {
    pub fn new(index: usize, player_1: Player, player_2: Player) -> Self {
        let skill = player_1.skill() + player_2.skill();
        Self {
            id: format!("PR{:02}", index + 1),
            player_1,
            player_2,
            skill,
            group_id: None,
            manual_override: false,
        }
    }

    /// Display name, e.g. "Anna & Binh".
    pub fn name(&self) -> String {
        format!("{} & {}", self.player_1.name, self.player_2.name)
    }

    pub fn players(&self) -> [&Player; 2] {
        [&self.player_1, &self.player_2]
    }
}

/// A pool of pairs that all play each other once.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    pub pair_ids: Vec<PairId>,
}

impl Group {
    /// Group at zero-based `index`: id `G{index+1}`, name `Group A` .. `Group Z`, then `Group AA`, ...
    pub fn new(index: usize) -> Self {
        Self {
            id: format!("G{}", index + 1),
            name: format!("Group {}", group_letters(index)),
            pair_ids: Vec::new(),
        }
    }
}

/// Spreadsheet-style column letters: 0 -> A, 25 -> Z, 26 -> AA.
fn group_letters(index: usize) -> String {
    let mut letters = Vec::new();
    let mut n = index + 1;
    while n > 0 {
        n -= 1;
        letters.push(char::from(b'A' + (n % 26) as u8));
        n /= 26;
    }
    letters.iter().rev().collect()
}
