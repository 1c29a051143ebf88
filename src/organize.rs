use log::warn;
use nba_api::{RoundGroup, Series};
use serde::Serialize;

/// Key for the championship series, and for any series whose conference
/// matches neither east nor west.
const FINALS_KEY: &str = "finals";

/// The bracket partitioned into its four page buckets, each series carrying
/// its derived `series_key`.
#[derive(Debug, Default, Serialize)]
pub struct OrganizedBracket {
    pub one: Vec<Series>,
    pub two: Vec<Series>,
    pub three: Vec<Series>,
    pub finals: Vec<Series>,
}

impl OrganizedBracket {
    pub fn rounds(&self) -> [(RoundGroup, &[Series]); 4] {
        [
            (RoundGroup::One, self.one.as_slice()),
            (RoundGroup::Two, self.two.as_slice()),
            (RoundGroup::Three, self.three.as_slice()),
            (RoundGroup::Finals, self.finals.as_slice()),
        ]
    }

    /// Every series across all buckets, mutably, in bucket order.
    pub fn series_mut(&mut self) -> impl Iterator<Item = &mut Series> {
        self.one
            .iter_mut()
            .chain(self.two.iter_mut())
            .chain(self.three.iter_mut())
            .chain(self.finals.iter_mut())
    }
}

/// Partition series by round number and assign each a stable slot key.
///
/// Keys number conference series continuously across rounds: round 2
/// counters start at 4 (round 1 occupies 1-4 per conference) and round 3 at
/// 6. The seeds are a fixed numbering scheme, not computed from round 1
/// data — a first-round field other than 4 series per conference would
/// mis-number later rounds.
pub fn organize(series: Vec<Series>) -> OrganizedBracket {
    let mut bracket = OrganizedBracket::default();

    for s in series {
        match RoundGroup::from_round(s.round) {
            Some(RoundGroup::One) => bracket.one.push(s),
            Some(RoundGroup::Two) => bracket.two.push(s),
            Some(RoundGroup::Three) => bracket.three.push(s),
            Some(RoundGroup::Finals) => bracket.finals.push(s),
            None => warn!("dropping series with out-of-range round {}", s.round),
        }
    }

    assign_keys(&mut bracket.one, 0);
    assign_keys(&mut bracket.two, 4);
    assign_keys(&mut bracket.three, 6);
    for s in &mut bracket.finals {
        s.series_key = Some(FINALS_KEY.to_owned());
    }

    bracket
}

/// Walk a bucket in document order, keeping one running counter per
/// conference. A conference matching neither east nor west falls through to
/// the finals key (the feed labels the championship "NBA Finals").
fn assign_keys(round: &mut [Series], seed: u32) {
    let mut east = seed;
    let mut west = seed;

    for s in round {
        let conf = s.conference.to_lowercase();
        let counter = match conf.as_str() {
            "east" => {
                east += 1;
                east
            }
            "west" => {
                west += 1;
                west
            }
            _ => {
                s.series_key = Some(FINALS_KEY.to_owned());
                continue;
            }
        };
        s.series_key = Some(format!("{conf}series{counter}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(round: u8, conference: &str) -> Series {
        Series { round, conference: conference.into(), ..Default::default() }
    }

    fn keys(bucket: &[Series]) -> Vec<&str> {
        bucket.iter().map(|s| s.series_key.as_deref().unwrap()).collect()
    }

    #[test]
    fn partition_is_total_and_disjoint() {
        let input: Vec<Series> = (1..=4)
            .flat_map(|round| vec![series(round, "West"), series(round, "East")])
            .collect();
        let total = input.len();

        let bracket = organize(input);
        let spread =
            bracket.one.len() + bracket.two.len() + bracket.three.len() + bracket.finals.len();
        assert_eq!(spread, total);
        assert!(bracket.one.iter().all(|s| s.round == 1));
        assert!(bracket.finals.iter().all(|s| s.round == 4));
    }

    #[test]
    fn round_one_keys_number_each_conference_in_document_order() {
        let input = vec![
            series(1, "West"),
            series(1, "East"),
            series(1, "West"),
            series(1, "East"),
            series(1, "West"),
            series(1, "East"),
            series(1, "West"),
            series(1, "East"),
        ];
        let bracket = organize(input);
        assert_eq!(
            keys(&bracket.one),
            vec![
                "westseries1", "eastseries1", "westseries2", "eastseries2", "westseries3",
                "eastseries3", "westseries4", "eastseries4",
            ]
        );
    }

    #[test]
    fn round_two_counters_start_at_four() {
        let bracket = organize(vec![series(2, "West"), series(2, "East"), series(2, "West")]);
        assert_eq!(keys(&bracket.two), vec!["westseries5", "eastseries5", "westseries6"]);
    }

    #[test]
    fn round_three_counters_start_at_six() {
        let bracket = organize(vec![series(3, "East"), series(3, "West")]);
        assert_eq!(keys(&bracket.three), vec!["eastseries7", "westseries7"]);
    }

    #[test]
    fn championship_series_gets_the_finals_key() {
        let bracket = organize(vec![series(4, "NBA Finals")]);
        assert_eq!(keys(&bracket.finals), vec!["finals"]);
    }

    #[test]
    fn unrecognized_conference_falls_to_the_finals_rule() {
        let bracket = organize(vec![series(2, "West"), series(2, "NBA Finals"), series(2, "West")]);
        // The stray series takes the finals key and never bumps a counter.
        assert_eq!(keys(&bracket.two), vec!["westseries5", "finals", "westseries6"]);
    }

    #[test]
    fn conference_match_is_case_insensitive() {
        let bracket = organize(vec![series(1, "EAST"), series(1, "west")]);
        assert_eq!(keys(&bracket.one), vec!["eastseries1", "westseries1"]);
    }

    #[test]
    fn out_of_range_rounds_are_dropped() {
        let bracket = organize(vec![series(0, "East"), series(5, "West"), series(1, "East")]);
        assert_eq!(bracket.one.len(), 1);
        assert!(bracket.two.is_empty() && bracket.three.is_empty() && bracket.finals.is_empty());
    }
}
