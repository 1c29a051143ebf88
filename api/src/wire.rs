/// NBA feed raw wire types — serde shapes for deserializing upstream
/// responses. These map to our clean domain types in client.rs. The feeds
/// are third-party, uncontrolled schemas, so every field is optional and
/// numbers frequently arrive as strings.
///
/// Wire types also serialize: the bracket payload is cached on disk in the
/// shape it arrived in.
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Playoffs bracket  (data.nba.net, prod/v1/{season}/playoffsBracket.json)
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct BracketResponse {
    pub series: Option<Vec<WireSeries>>,
}

#[derive(Debug, Serialize, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WireSeries {
    pub series_id: Option<String>,
    /// "1" through "4" — the feed sends round numbers as strings.
    pub round_num: Option<String>,
    pub conf_name: Option<String>,
    pub is_schedule_available: Option<bool>,
    /// Free text, e.g. "BOS wins 4-2" or "MIA leads 3-2".
    pub summary_status_text: Option<String>,
    pub top_row: Option<WireSeriesRow>,
    pub bottom_row: Option<WireSeriesRow>,
}

#[derive(Debug, Serialize, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WireSeriesRow {
    pub team_id: Option<String>,
    /// Seed number, also sent as a string ("1").
    pub seed_num: Option<String>,
    pub is_series_winner: Option<bool>,
}

// ---------------------------------------------------------------------------
// Team profile  (stats.nba.com, feeds/teams/profile/{id}_TeamProfile.js)
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct TeamProfileResponse {
    #[serde(rename = "TeamDetails")]
    pub team_details: Option<Vec<TeamDetails>>,
}

#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct TeamDetails {
    #[serde(rename = "Details")]
    pub details: Option<Vec<TeamDetailsRow>>,
}

#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct TeamDetailsRow {
    #[serde(rename = "Abbreviation")]
    pub abbreviation: Option<String>,
    #[serde(rename = "City")]
    pub city: Option<String>,
    #[serde(rename = "Nickname")]
    pub nickname: Option<String>,
    #[serde(rename = "Conference")]
    pub conference: Option<String>,
    #[serde(rename = "W")]
    pub wins: Option<u16>,
    #[serde(rename = "L")]
    pub losses: Option<u16>,
}
