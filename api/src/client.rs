use crate::wire::{BracketResponse, TeamProfileResponse, WireSeries, WireSeriesRow};
use crate::{Bracket, Series, SeriesSlot, Team};
use reqwest::Client;
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

const DATA_NBA: &str = "http://data.nba.net";
const STATS_NBA: &str = "http://stats.nba.com";

/// NBA feed client backed by the public data.nba.net / stats.nba.com
/// endpoints. Read-only; no auth, no retries.
#[derive(Debug, Clone)]
pub struct NbaApi {
    client: Client,
    timeout: Duration,
    data_base: String,
    stats_base: String,
}

impl Default for NbaApi {
    fn default() -> Self {
        Self {
            client: Client::builder()
                .user_agent("nbabracket/0.1 (playoffs bracket page)")
                .build()
                .unwrap_or_default(),
            timeout: Duration::from_secs(10),
            data_base: DATA_NBA.to_owned(),
            stats_base: STATS_NBA.to_owned(),
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Api(reqwest::Error, String),
    Parsing(reqwest::Error, String),
    /// Well-formed JSON missing the expected structure. Team endpoint only;
    /// callers treat this as absence, not failure.
    Validation(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api(e, url) => write!(f, "API error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::Validation(msg) => write!(f, "Validation error: {msg}"),
        }
    }
}

impl NbaApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point both feeds at alternate hosts. Used by tests against a mock
    /// server.
    pub fn with_base_urls(data_base: impl Into<String>, stats_base: impl Into<String>) -> Self {
        Self {
            data_base: data_base.into(),
            stats_base: stats_base.into(),
            ..Self::default()
        }
    }

    /// Source URL for a season's bracket document. Cache keys derive from
    /// this, so it must be stable for a given season.
    pub fn bracket_url(&self, season: &str) -> String {
        format!("{}/prod/v1/{season}/playoffsBracket.json", self.data_base)
    }

    /// Source URL for a team's profile document.
    pub fn team_url(&self, team_id: &str) -> String {
        format!("{}/feeds/teams/profile/{team_id}_TeamProfile.js", self.stats_base)
    }

    /// Fetch a season's bracket in wire form. Any failure here is fatal to
    /// the caller's request — a bracket page cannot render partially.
    pub async fn fetch_bracket(&self, season: &str) -> ApiResult<BracketResponse> {
        self.get(&self.bracket_url(season)).await
    }

    /// Fetch a team profile and extract its details section. A payload
    /// without a well-formed details section is a `Validation` error, which
    /// callers convert to absence.
    pub async fn fetch_team(&self, team_id: &str) -> ApiResult<Team> {
        let url = self.team_url(team_id);
        let raw: TeamProfileResponse = self.get(&url).await?;

        let details = raw
            .team_details
            .and_then(|mut d| if d.is_empty() { None } else { Some(d.swap_remove(0)) })
            .and_then(|d| d.details)
            .and_then(|mut rows| if rows.is_empty() { None } else { Some(rows.swap_remove(0)) })
            .ok_or_else(|| {
                ApiError::Validation(format!("team {team_id}: profile has no details section"))
            })?;

        Ok(Team {
            id: team_id.to_owned(),
            abbreviation: details.abbreviation.unwrap_or_default(),
            city: details.city.unwrap_or_default(),
            nickname: details.nickname.unwrap_or_default(),
            conference: details.conference.unwrap_or_default(),
            wins: details.wins.unwrap_or_default(),
            losses: details.losses.unwrap_or_default(),
        })
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_owned()))?;

        response
            .error_for_status()
            .map_err(|e| ApiError::Api(e, url.to_owned()))?
            .json::<T>()
            .await
            .map_err(|e| ApiError::Parsing(e, url.to_owned()))
    }
}

// ---------------------------------------------------------------------------
// Mapping: NBA feed wire types → clean domain types
// ---------------------------------------------------------------------------

/// Map a wire bracket response to the domain model. The feed sends round
/// and seed numbers as strings; unparsable values map to 0.
pub fn map_bracket(season: &str, raw: &BracketResponse) -> Bracket {
    let series = raw
        .series
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(map_series)
        .collect();
    Bracket { season: season.to_owned(), series }
}

fn map_series(s: &WireSeries) -> Series {
    Series {
        round: parse_num(s.round_num.as_deref()),
        conference: s.conf_name.clone().unwrap_or_default(),
        top: map_slot(s.top_row.as_ref()),
        bottom: map_slot(s.bottom_row.as_ref()),
        status_text: s.summary_status_text.clone().unwrap_or_default(),
        schedule_available: s.is_schedule_available.unwrap_or(false),
        series_key: None,
        series_summary: None,
    }
}

fn map_slot(row: Option<&WireSeriesRow>) -> SeriesSlot {
    let Some(row) = row else {
        return SeriesSlot::default();
    };
    SeriesSlot {
        team_id: row.team_id.clone().unwrap_or_default(),
        seed: parse_num(row.seed_num.as_deref()),
    }
}

fn parse_num(value: Option<&str>) -> u8 {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(0)
}
