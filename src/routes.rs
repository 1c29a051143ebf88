use crate::cache::DiskCache;
use crate::config::Config;
use crate::organize::organize;
use crate::resolve::Resolver;
use crate::summary::attach_summaries;
use crate::view::{self, BracketPage};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Json, Response};
use chrono::Utc;
use log::error;
use nba_api::client::{ApiResult, NbaApi};
use serde::Deserialize;

#[derive(Clone)]
pub struct AppState {
    pub resolver: Resolver,
    pub latest_season: String,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            resolver: Resolver::new(NbaApi::new(), DiskCache::new(config.cache_dir.clone())),
            latest_season: config.latest_season.clone(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct BracketQuery {
    pub season: Option<String>,
    #[serde(rename = "hardRefresh")]
    pub hard_refresh: Option<String>,
}

fn is_truthy(value: Option<&str>) -> bool {
    value.is_some_and(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
}

/// The per-request pipeline: resolve the bracket, fan out team lookups,
/// bucket by round, derive summaries, assemble the view model. Bracket
/// failures abort the request; team failures only thin the page.
async fn build_page(state: &AppState, query: BracketQuery) -> ApiResult<BracketPage> {
    let season = query.season.unwrap_or_else(|| state.latest_season.clone());
    let is_current = season == state.latest_season;
    // hardRefresh is only honored for the latest season.
    let force_refresh = is_current && is_truthy(query.hard_refresh.as_deref());

    let (bracket, created) = state
        .resolver
        .resolve_bracket(&season, force_refresh, is_current)
        .await?;
    let teams = state.resolver.resolve_teams(&bracket).await;

    let mut organized = organize(bracket.series);
    attach_summaries(&mut organized, &teams);

    Ok(BracketPage::new(season, &state.latest_season, organized, teams, created, Utc::now()))
}

pub async fn bracket_page(
    State(state): State<AppState>,
    Query(query): Query<BracketQuery>,
) -> Response {
    match build_page(&state, query).await {
        Ok(page) => Html(view::render_html(&page)).into_response(),
        Err(err) => {
            error!("bracket request failed: {err}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

pub async fn bracket_json(
    State(state): State<AppState>,
    Query(query): Query<BracketQuery>,
) -> Response {
    match build_page(&state, query).await {
        Ok(page) => Json(page).into_response(),
        Err(err) => {
            error!("bracket request failed: {err}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

pub async fn healthz() -> &'static str {
    "ok"
}
