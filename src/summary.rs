use crate::organize::OrganizedBracket;
use nba_api::{Series, Team};
use std::collections::HashMap;

/// Placeholder summary for a series whose schedule is not yet available.
pub const NO_SUMMARY: &str = "-";

/// Attach a derived summary to every series in the bracket.
pub fn attach_summaries(bracket: &mut OrganizedBracket, teams: &HashMap<String, Team>) {
    for series in bracket.series_mut() {
        series.series_summary = Some(derive_summary(series, teams));
    }
}

/// Derive the normalized summary for one series from the upstream free-text
/// status, e.g. "BOS wins 4-2" → "BOS(1) beat MIA(8) 4-2".
///
/// The status field is a fragile third-party contract: a three-token,
/// space-delimited `<ABBRV> <verb> <score>` string. Anything that does not
/// fit that shape (wrong token count, an abbreviation matching neither
/// participant, an unresolved team record) passes through verbatim rather
/// than failing the request.
pub fn derive_summary(series: &Series, teams: &HashMap<String, Team>) -> String {
    if !series.schedule_available {
        return NO_SUMMARY.to_owned();
    }

    let status = series.status_text.trim();
    let mut tokens = status.split_whitespace();
    let (Some(abbrv), Some(verb), Some(score), None) =
        (tokens.next(), tokens.next(), tokens.next(), tokens.next())
    else {
        return status.to_owned();
    };

    let top = teams.get(&series.top.team_id);
    let bottom = teams.get(&series.bottom.team_id);

    // The leading team is whichever participant the feed named first; the
    // other one is trailing.
    let (lead_slot, trail_slot, lead, trail) = if top.is_some_and(|t| t.abbreviation == abbrv) {
        (&series.top, &series.bottom, top, bottom)
    } else if bottom.is_some_and(|t| t.abbreviation == abbrv) {
        (&series.bottom, &series.top, bottom, top)
    } else {
        return status.to_owned();
    };
    let (Some(lead), Some(trail)) = (lead, trail) else {
        return status.to_owned();
    };

    let relation = if verb == "wins" { "beat" } else { verb };
    format!(
        "{}({}) {} {}({}) {}",
        lead.abbreviation, lead_slot.seed, relation, trail.abbreviation, trail_slot.seed, score
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use nba_api::SeriesSlot;

    fn team(id: &str, abbrv: &str) -> Team {
        Team { id: id.into(), abbreviation: abbrv.into(), ..Default::default() }
    }

    fn teams(entries: &[(&str, &str)]) -> HashMap<String, Team> {
        entries.iter().map(|(id, a)| ((*id).to_owned(), team(id, a))).collect()
    }

    fn series(status: &str, top: (&str, u8), bottom: (&str, u8)) -> Series {
        Series {
            round: 1,
            conference: "East".into(),
            top: SeriesSlot { team_id: top.0.into(), seed: top.1 },
            bottom: SeriesSlot { team_id: bottom.0.into(), seed: bottom.1 },
            status_text: status.into(),
            schedule_available: true,
            ..Default::default()
        }
    }

    #[test]
    fn finished_series_uses_beat() {
        let teams = teams(&[("1", "BOS"), ("2", "MIA")]);
        let s = series("BOS wins 4-2", ("1", 1), ("2", 8));
        assert_eq!(derive_summary(&s, &teams), "BOS(1) beat MIA(8) 4-2");
    }

    #[test]
    fn in_progress_series_passes_the_verb_through() {
        let teams = teams(&[("1", "BOS"), ("2", "MIA")]);
        let s = series("MIA leads 3-2", ("1", 1), ("2", 8));
        assert_eq!(derive_summary(&s, &teams), "MIA(8) leads BOS(1) 3-2");
    }

    #[test]
    fn unavailable_schedule_is_a_dash_regardless_of_other_fields() {
        let teams = teams(&[("1", "BOS"), ("2", "MIA")]);
        let mut s = series("BOS wins 4-0", ("1", 1), ("2", 8));
        s.schedule_available = false;
        assert_eq!(derive_summary(&s, &teams), "-");
    }

    #[test]
    fn malformed_status_passes_through_verbatim() {
        let teams = teams(&[("1", "BOS"), ("2", "MIA")]);
        for status in ["", "BOS", "BOS wins", "BOS wins 4-2 tonight"] {
            let s = series(status, ("1", 1), ("2", 8));
            assert_eq!(derive_summary(&s, &teams), status);
        }
    }

    #[test]
    fn unmatched_abbreviation_passes_through() {
        let teams = teams(&[("1", "BOS"), ("2", "MIA")]);
        let s = series("LAL wins 4-2", ("1", 1), ("2", 8));
        assert_eq!(derive_summary(&s, &teams), "LAL wins 4-2");
    }

    #[test]
    fn unresolved_trailing_team_passes_through() {
        // Team 2 never made it into the map (failed lookup).
        let teams = teams(&[("1", "BOS")]);
        let s = series("BOS wins 4-2", ("1", 1), ("2", 8));
        assert_eq!(derive_summary(&s, &teams), "BOS wins 4-2");
    }

    #[test]
    fn attach_summaries_covers_every_bucket() {
        let teams = teams(&[("1", "BOS"), ("2", "MIA")]);
        let mut unscheduled = series("", ("3", 0), ("4", 0));
        unscheduled.schedule_available = false;
        unscheduled.round = 4;
        unscheduled.conference = "NBA Finals".into();

        let mut bracket =
            crate::organize::organize(vec![series("BOS wins 4-2", ("1", 1), ("2", 8)), unscheduled]);
        attach_summaries(&mut bracket, &teams);

        assert_eq!(bracket.one[0].series_summary.as_deref(), Some("BOS(1) beat MIA(8) 4-2"));
        assert_eq!(bracket.finals[0].series_summary.as_deref(), Some("-"));
    }
}
