use crate::organize::OrganizedBracket;
use chrono::{DateTime, Utc};
use nba_api::Team;
use serde::Serialize;
use std::collections::HashMap;

/// Earliest season the feed carries a playoffs bracket for.
const FIRST_SEASON: i32 = 2015;

/// Everything the page needs, assembled per request and rendered either as
/// HTML or verbatim as JSON.
#[derive(Debug, Serialize)]
pub struct BracketPage {
    pub title: String,
    pub season: String,
    pub seasons: Vec<String>,
    pub bracket: OrganizedBracket,
    pub teams: HashMap<String, Team>,
    pub last_updated: LastUpdated,
}

#[derive(Debug, Serialize)]
pub struct LastUpdated {
    pub pretty: String,
    pub date: String,
}

impl BracketPage {
    pub fn new(
        season: String,
        latest_season: &str,
        bracket: OrganizedBracket,
        teams: HashMap<String, Team>,
        created: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            title: page_title(&season),
            seasons: season_options(latest_season),
            season,
            bracket,
            teams,
            last_updated: LastUpdated {
                pretty: pretty_ago(created, now),
                date: created.to_rfc2822(),
            },
        }
    }
}

/// The page is titled after the playoff year, one ahead of the season's
/// starting year ("2017" season → "2018 NBA Playoffs Bracket").
fn page_title(season: &str) -> String {
    match season.parse::<i32>() {
        Ok(year) => format!("{} NBA Playoffs Bracket", year + 1),
        Err(_) => "NBA Playoffs Bracket".to_owned(),
    }
}

/// Season selector options, latest first.
fn season_options(latest_season: &str) -> Vec<String> {
    let latest = latest_season.parse::<i32>().unwrap_or(FIRST_SEASON);
    (FIRST_SEASON..=latest.max(FIRST_SEASON)).rev().map(|y| y.to_string()).collect()
}

/// Human-relative timestamp ("4 minutes ago") for the last-updated line.
pub fn pretty_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - then).num_seconds().max(0);
    let mins = secs / 60;
    let hours = mins / 60;
    let days = hours / 24;

    if secs < 45 {
        "just now".to_owned()
    } else if secs < 90 {
        "a minute ago".to_owned()
    } else if mins < 45 {
        format!("{mins} minutes ago")
    } else if mins < 90 {
        "an hour ago".to_owned()
    } else if hours < 22 {
        format!("{hours} hours ago")
    } else if hours < 36 {
        "a day ago".to_owned()
    } else {
        format!("{days} days ago")
    }
}

// ---------------------------------------------------------------------------
// HTML rendering — a thin formatter over the view model, nothing more
// ---------------------------------------------------------------------------

pub fn render_html(page: &BracketPage) -> String {
    let mut html = String::with_capacity(8 * 1024);

    html.push_str("<!doctype html>\n<html>\n<head>\n");
    html.push_str(&format!("<title>{}</title>\n", escape(&page.title)));
    html.push_str("<meta charset=\"utf-8\">\n</head>\n<body>\n");
    html.push_str(&format!("<h1>{}</h1>\n", escape(&page.title)));

    html.push_str("<form method=\"get\">\n<select name=\"season\">\n");
    for season in &page.seasons {
        let selected = if *season == page.season { " selected" } else { "" };
        html.push_str(&format!(
            "<option value=\"{season}\"{selected}>{}-{}</option>\n",
            season,
            season.parse::<i32>().map(|y| y + 1).unwrap_or_default()
        ));
    }
    html.push_str("</select>\n<button type=\"submit\">Go</button>\n</form>\n");

    for (group, series_list) in page.bracket.rounds() {
        html.push_str(&format!("<h2>{}</h2>\n<table>\n", group.label()));
        for series in series_list {
            let key = series.series_key.as_deref().unwrap_or("");
            let summary = series.series_summary.as_deref().unwrap_or(crate::summary::NO_SUMMARY);
            let top = team_label(&page.teams, &series.top.team_id);
            let bottom = team_label(&page.teams, &series.bottom.team_id);
            html.push_str(&format!(
                "<tr id=\"{}\"><td>{}({}) vs {}({})</td><td>{}</td></tr>\n",
                escape(key),
                escape(&top),
                series.top.seed,
                escape(&bottom),
                series.bottom.seed,
                escape(summary)
            ));
        }
        html.push_str("</table>\n");
    }

    html.push_str("<h2>Teams</h2>\n<table>\n");
    let mut teams: Vec<&Team> = page.teams.values().collect();
    teams.sort_by(|a, b| a.abbreviation.cmp(&b.abbreviation));
    for team in teams {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}-{}</td></tr>\n",
            escape(&team.abbreviation),
            escape(&team.display_name()),
            team.wins,
            team.losses
        ));
    }
    html.push_str("</table>\n");

    html.push_str(&format!(
        "<footer>Last updated {} ({})</footer>\n</body>\n</html>\n",
        escape(&page.last_updated.pretty),
        escape(&page.last_updated.date)
    ));

    html
}

fn team_label(teams: &HashMap<String, Team>, team_id: &str) -> String {
    teams
        .get(team_id)
        .map(|t| t.abbreviation.clone())
        .unwrap_or_else(|| "TBD".to_owned())
}

fn escape(raw: &str) -> String {
    raw.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> (DateTime<Utc>, DateTime<Utc>) {
        let now = Utc.with_ymd_and_hms(2018, 5, 1, 12, 0, 0).unwrap();
        (now - chrono::Duration::seconds(secs), now)
    }

    #[test]
    fn pretty_ago_buckets() {
        for (secs, expect) in [
            (0, "just now"),
            (44, "just now"),
            (60, "a minute ago"),
            (10 * 60, "10 minutes ago"),
            (75 * 60, "an hour ago"),
            (5 * 3600, "5 hours ago"),
            (24 * 3600, "a day ago"),
            (3 * 24 * 3600, "3 days ago"),
        ] {
            let (then, now) = at(secs);
            assert_eq!(pretty_ago(then, now), expect, "at {secs}s");
        }
    }

    #[test]
    fn pretty_ago_never_reports_the_future() {
        let (then, now) = at(-300);
        assert_eq!(pretty_ago(then, now), "just now");
    }

    #[test]
    fn title_is_named_for_the_playoff_year() {
        assert_eq!(page_title("2017"), "2018 NBA Playoffs Bracket");
        assert_eq!(page_title("latest"), "NBA Playoffs Bracket");
    }

    #[test]
    fn season_options_run_latest_first_down_to_2015() {
        let seasons = season_options("2017");
        assert_eq!(seasons, vec!["2017", "2016", "2015"]);
    }

    #[test]
    fn rendered_page_carries_keys_and_summaries() {
        use nba_api::{Series, SeriesSlot};

        let mut series = Series {
            round: 1,
            conference: "East".into(),
            top: SeriesSlot { team_id: "1".into(), seed: 1 },
            bottom: SeriesSlot { team_id: "2".into(), seed: 8 },
            status_text: "BOS wins 4-2".into(),
            schedule_available: true,
            ..Default::default()
        };
        series.series_key = Some("eastseries1".into());
        series.series_summary = Some("BOS(1) beat MIA(8) 4-2".into());

        let teams: HashMap<String, Team> = [
            ("1".to_owned(), Team { id: "1".into(), abbreviation: "BOS".into(), city: "Boston".into(), nickname: "Celtics".into(), ..Default::default() }),
            ("2".to_owned(), Team { id: "2".into(), abbreviation: "MIA".into(), city: "Miami".into(), nickname: "Heat".into(), ..Default::default() }),
        ]
        .into();

        let bracket = OrganizedBracket { one: vec![series], ..Default::default() };
        let now = Utc.with_ymd_and_hms(2018, 5, 1, 12, 0, 0).unwrap();
        let page = BracketPage::new("2017".into(), "2017", bracket, teams, now, now);

        let html = render_html(&page);
        assert!(html.contains("2018 NBA Playoffs Bracket"));
        assert!(html.contains("id=\"eastseries1\""));
        assert!(html.contains("BOS(1) beat MIA(8) 4-2"));
        assert!(html.contains("Boston Celtics"));
        assert!(html.contains("just now"));
    }

    #[test]
    fn markup_in_upstream_text_is_escaped() {
        assert_eq!(escape("<b>BOS & MIA</b>"), "&lt;b&gt;BOS &amp; MIA&lt;/b&gt;");
    }
}
