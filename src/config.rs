use anyhow::Context;
use chrono::{DateTime, Datelike, Utc};
use std::path::PathBuf;

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub cache_dir: PathBuf,
    /// Season identifier of the latest known playoffs ("2017" is the
    /// 2017-18 season, whose playoffs run in spring 2018). hardRefresh is
    /// only honored for this season.
    pub latest_season: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let port = match std::env::var("BRACKET_PORT") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("BRACKET_PORT is not a valid port: {raw}"))?,
            Err(_) => 3000,
        };

        let cache_dir = std::env::var("BRACKET_CACHE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("cache"));

        let latest_season = std::env::var("BRACKET_LATEST_SEASON")
            .unwrap_or_else(|_| latest_season_for(Utc::now()).to_string());

        Ok(Self { port, cache_dir, latest_season })
    }
}

/// Season whose playoffs are most recent. A season is named for its
/// starting year; before October the current season is still last year's.
fn latest_season_for(now: DateTime<Utc>) -> i32 {
    if now.month() >= 10 { now.year() } else { now.year() - 1 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn season_is_previous_year_before_october() {
        let spring = Utc.with_ymd_and_hms(2018, 5, 15, 12, 0, 0).unwrap();
        assert_eq!(latest_season_for(spring), 2017);
    }

    #[test]
    fn season_rolls_forward_in_october() {
        let oct = Utc.with_ymd_and_hms(2018, 10, 1, 0, 0, 0).unwrap();
        let dec = Utc.with_ymd_and_hms(2018, 12, 31, 23, 59, 59).unwrap();
        assert_eq!(latest_season_for(oct), 2018);
        assert_eq!(latest_season_for(dec), 2018);
    }
}
