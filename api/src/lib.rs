pub mod client;
pub mod wire;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// ---------------------------------------------------------------------------
// Domain types — clean model, independent of the NBA feed wire format
// ---------------------------------------------------------------------------

/// One season's full playoff bracket.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Bracket {
    pub season: String,
    pub series: Vec<Series>,
}

impl Bracket {
    /// Distinct team ids referenced in either row of any series.
    /// Empty ids (unseeded slots in early feeds) are skipped.
    pub fn team_ids(&self) -> HashSet<&str> {
        self.series
            .iter()
            .flat_map(|s| [s.top.team_id.as_str(), s.bottom.team_id.as_str()])
            .filter(|id| !id.is_empty())
            .collect()
    }
}

/// One best-of-seven playoff matchup between two seeded teams.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Series {
    /// Playoff round, 1 through 4 (4 = the championship).
    pub round: u8,
    /// "East", "West", or "NBA Finals" for the championship series.
    pub conference: String,
    pub top: SeriesSlot,
    pub bottom: SeriesSlot,
    /// Upstream free-text status, e.g. "BOS wins 4-2" or "MIA leads 3-2".
    pub status_text: String,
    pub schedule_available: bool,
    /// Stable per-conference, per-round slot key ("westseries3", "finals").
    /// Derived per request, never fetched.
    pub series_key: Option<String>,
    /// Normalized summary ("BOS(1) beat MIA(8) 4-2"). Derived per request.
    pub series_summary: Option<String>,
}

/// One participant row of a series.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeriesSlot {
    pub team_id: String,
    pub seed: u8,
}

/// Team profile from the upstream feed. Present in the team map only when
/// the payload carried a well-formed details section — never a partial
/// placeholder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    pub abbreviation: String, // "BOS"
    pub city: String,         // "Boston"
    pub nickname: String,     // "Celtics"
    pub conference: String,   // "East"
    pub wins: u16,
    pub losses: u16,
}

impl Team {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.city, self.nickname)
    }
}

/// The four page buckets a series can land in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RoundGroup {
    One,
    Two,
    Three,
    Finals,
}

impl RoundGroup {
    pub fn from_round(round: u8) -> Option<Self> {
        match round {
            1 => Some(RoundGroup::One),
            2 => Some(RoundGroup::Two),
            3 => Some(RoundGroup::Three),
            4 => Some(RoundGroup::Finals),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RoundGroup::One => "First Round",
            RoundGroup::Two => "Conference Semifinals",
            RoundGroup::Three => "Conference Finals",
            RoundGroup::Finals => "NBA Finals",
        }
    }
}
