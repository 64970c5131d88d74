//! Roster import from CSV (English or Vietnamese headers).

use crate::models::{RankTier, Tournament, TournamentError};
use std::io::Read;

const NAME_HEADERS: [&str; 2] = ["Name", "Tên"];
const RANK_HEADERS: [&str; 2] = ["Rank", "Hạng"];
const EXCLUSION_HEADERS: [&str; 2] = ["Exclusions", "Tránh gặp"];

/// One roster line, ready for [`Tournament::add_player`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RosterEntry {
    pub name: String,
    pub rank: RankTier,
    pub exclusions: Vec<String>,
}

/// Read roster rows. Rows without a name are skipped; unknown or missing ranks become `A`;
/// exclusions are a comma-separated list of player ids.
pub fn parse_roster<R: Read>(reader: R) -> Result<Vec<RosterEntry>, TournamentError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| TournamentError::InvalidRoster(e.to_string()))?
        .clone();
    let column = |names: &[&str]| {
        headers
            .iter()
            .position(|h| names.iter().any(|n| h.to_lowercase() == n.to_lowercase()))
    };
    let name_col = column(&NAME_HEADERS)
        .ok_or_else(|| TournamentError::InvalidRoster("missing Name column".to_string()))?;
    let rank_col = column(&RANK_HEADERS);
    let exclusion_col = column(&EXCLUSION_HEADERS);

    let mut entries = Vec::new();
    for record in rdr.records() {
        let record = record.map_err(|e| TournamentError::InvalidRoster(e.to_string()))?;
        let name = record.get(name_col).unwrap_or_default();
        if name.is_empty() {
            continue;
        }
        let rank = rank_col
            .and_then(|c| record.get(c))
            .and_then(RankTier::parse)
            .unwrap_or_default();
        let exclusions = exclusion_col
            .and_then(|c| record.get(c))
            .map(|s| {
                s.split(',')
                    .map(|id| id.trim().to_uppercase())
                    .filter(|id| !id.is_empty())
                    .collect()
            })
            .unwrap_or_default();
        entries.push(RosterEntry {
            name: name.to_string(),
            rank,
            exclusions,
        });
    }
    Ok(entries)
}

impl Tournament {
    /// Register every roster entry (Setup only). Stops at the first rejected entry and
    /// leaves the roster as it was.
    pub fn import_roster(&mut self, entries: &[RosterEntry]) -> Result<usize, TournamentError> {
        let mut staged = self.clone();
        for entry in entries {
            staged.add_player(entry.name.as_str(), entry.rank, &entry.exclusions)?;
        }
        *self = staged;
        Ok(entries.len())
    }
}
