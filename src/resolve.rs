use crate::cache::{CachePolicy, DiskCache};
use chrono::{DateTime, Utc};
use futures_util::future::join_all;
use log::{debug, warn};
use nba_api::client::{ApiResult, NbaApi, map_bracket};
use nba_api::wire::BracketResponse;
use nba_api::{Bracket, Team};
use std::collections::HashMap;

/// Cache-aware lookups over the two upstream feeds.
///
/// The asymmetry is deliberate: bracket failures propagate and abort the
/// request, team failures degrade to absence so the page always renders.
#[derive(Debug, Clone)]
pub struct Resolver {
    api: NbaApi,
    cache: DiskCache,
}

impl Resolver {
    pub fn new(api: NbaApi, cache: DiskCache) -> Self {
        Self { api, cache }
    }

    /// Resolve a season's bracket, either from cache or the network, along
    /// with its fetch timestamp.
    ///
    /// Policy: a cached entry is returned unless `force_refresh` is set and
    /// the entry was written `Refreshable`. Past seasons (`is_current` false)
    /// are written `Permanent` — finished playoffs cannot change, so even a
    /// later hard refresh keeps using them.
    pub async fn resolve_bracket(
        &self,
        season: &str,
        force_refresh: bool,
        is_current: bool,
    ) -> ApiResult<(Bracket, DateTime<Utc>)> {
        let url = self.api.bracket_url(season);

        if self.cache.exists(&url).await {
            match self.cache.get::<BracketResponse>(&url).await {
                Ok(entry) if !force_refresh || entry.policy == CachePolicy::Permanent => {
                    debug!("bracket for {season} served from cache");
                    return Ok((map_bracket(season, &entry.data), entry.created));
                }
                Ok(_) => debug!("hard refresh requested, refetching bracket for {season}"),
                Err(err) => warn!("discarding unreadable bracket cache entry for {season}: {err}"),
            }
        }

        let raw = self.api.fetch_bracket(season).await?;
        let policy = if is_current { CachePolicy::Refreshable } else { CachePolicy::Permanent };
        let created = match self.cache.set(&url, &raw, policy).await {
            Ok(created) => created,
            Err(err) => {
                warn!("failed to cache bracket for {season}: {err}");
                Utc::now()
            }
        };
        Ok((map_bracket(season, &raw), created))
    }

    /// Resolve one team profile. Absence is a normal outcome — a profile
    /// the feed cannot produce (network error, missing details section) is
    /// logged and the team simply stays out of the map.
    pub async fn resolve_team(&self, team_id: &str) -> Option<Team> {
        let url = self.api.team_url(team_id);

        if self.cache.exists(&url).await {
            match self.cache.get::<Team>(&url).await {
                Ok(entry) => return Some(entry.data),
                Err(err) => warn!("discarding unreadable team cache entry for {team_id}: {err}"),
            }
        }

        match self.api.fetch_team(team_id).await {
            Ok(team) => {
                // Profiles are treated as immutable once seen.
                if let Err(err) = self.cache.set(&url, &team, CachePolicy::Permanent).await {
                    warn!("failed to cache team {team_id}: {err}");
                }
                Some(team)
            }
            Err(err) => {
                warn!("team {team_id} unavailable: {err}");
                None
            }
        }
    }

    /// Fan-out join: resolve every team referenced in the bracket
    /// concurrently and wait for all of them to settle. Failed lookups are
    /// absent from the map; the join always completes.
    pub async fn resolve_teams(&self, bracket: &Bracket) -> HashMap<String, Team> {
        let lookups = bracket
            .team_ids()
            .into_iter()
            .map(|id| async move { (id, self.resolve_team(id).await) });

        let mut teams = HashMap::new();
        for (id, team) in join_all(lookups).await {
            if let Some(team) = team {
                teams.insert(id.to_owned(), team);
            }
        }
        teams
    }
}
