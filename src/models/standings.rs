//! StandingsRow: one ranked line for a pair or a player.

use serde::ser::{Serialize, SerializeStruct, Serializer};

/// Counters for one subject (pair id or player id). The two views share this shape.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct StandingsRow {
    pub subject_id: String,
    pub name: String,
    pub matches_played: u32,
    pub wins: u32,
    pub losses: u32,
    pub points_for: u32,
    pub points_against: u32,
    /// 0 until the caller ranks the rows.
    pub rank: u32,
}

impl StandingsRow {
    pub fn new(subject_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            subject_id: subject_id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Points for minus points against.
    pub fn diff(&self) -> i64 {
        i64::from(self.points_for) - i64::from(self.points_against)
    }

    /// Credit one finished match from this subject's point of view.
    pub(crate) fn record(&mut self, scored: u32, conceded: u32) {
        self.matches_played = self.matches_played.saturating_add(1);
        self.points_for = self.points_for.saturating_add(scored);
        self.points_against = self.points_against.saturating_add(conceded);
        if scored > conceded {
            self.wins = self.wins.saturating_add(1);
        } else {
            self.losses = self.losses.saturating_add(1);
        }
    }
}

// Hand-written so `diff` is emitted from its inputs instead of being a stored field.
impl Serialize for StandingsRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("StandingsRow", 9)?;
        s.serialize_field("subject_id", &self.subject_id)?;
        s.serialize_field("name", &self.name)?;
        s.serialize_field("matches_played", &self.matches_played)?;
        s.serialize_field("wins", &self.wins)?;
        s.serialize_field("losses", &self.losses)?;
        s.serialize_field("points_for", &self.points_for)?;
        s.serialize_field("points_against", &self.points_against)?;
        s.serialize_field("diff", &self.diff())?;
        s.serialize_field("rank", &self.rank)?;
        s.end()
    }
}
