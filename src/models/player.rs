//! Player and RankTier data structures.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Identifier for a player, derived from registration order (`P01`, `P02`, ...).
pub type PlayerId = String;

/// Build the player id for the given zero-based registration index.
pub fn player_id_for(index: usize) -> PlayerId {
    format!("P{:02}", index + 1)
}

/// Skill tier, strongest first.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum RankTier {
    #[serde(rename = "A+")]
    APlus,
    #[default]
    #[serde(rename = "A")]
    A,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "B")]
    B,
}

impl RankTier {
    /// Integer skill score used for pairing balance.
    pub fn skill(self) -> u32 {
        match self {
            RankTier::APlus => 4,
            RankTier::A => 3,
            RankTier::BPlus => 2,
            RankTier::B => 1,
        }
    }

    /// Parse a tier label such as `"a+"` or `" B "`. Returns None for anything unknown.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_uppercase().as_str() {
            "A+" => Some(RankTier::APlus),
            "A" => Some(RankTier::A),
            "B+" => Some(RankTier::BPlus),
            "B" => Some(RankTier::B),
            _ => None,
        }
    }
}

/// A registered player. Immutable once pairs reference it.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub rank: RankTier,
    /// Players this one should not be paired with. Checked in both directions.
    #[serde(default)]
    pub exclusions: BTreeSet<PlayerId>,
}

impl Player {
    /// Create a player registered at the given zero-based index.
    pub fn new(index: usize, name: impl Into<String>, rank: RankTier) -> Self {
        Self {
            id: player_id_for(index),
            name: name.into(),
            rank,
            exclusions: BTreeSet::new(),
        }
    }

    /// Builder-style helper to set the exclusion list.
    pub fn with_exclusions<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<PlayerId>,
    {
        self.exclusions = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn skill(&self) -> u32 {
        self.rank.skill()
    }

    /// True if either player lists the other as an exclusion.
    pub fn excludes(&self, other: &Player) -> bool {
        self.exclusions.contains(&other.id) || other.exclusions.contains(&self.id)
    }
}
