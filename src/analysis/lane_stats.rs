use super::classifier::{percentage, FetchedMatches};
use super::queue::is_ranked;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lane {
    Top,
    Jungle,
    Mid,
    Adc,
    Support,
}

impl Lane {
    pub const ALL: [Lane; 5] = [Lane::Top, Lane::Jungle, Lane::Mid, Lane::Adc, Lane::Support];

    /// Maps the API's `individualPosition` onto a canonical bucket.
    pub fn from_position(raw: &str) -> Option<Lane> {
        match raw.trim().to_uppercase().as_str() {
            "TOP" => Some(Lane::Top),
            "JUNGLE" => Some(Lane::Jungle),
            "MIDDLE" | "MID" => Some(Lane::Mid),
            "BOTTOM" | "ADC" => Some(Lane::Adc),
            "UTILITY" | "SUPPORT" => Some(Lane::Support),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Lane::Top => "TOP",
            Lane::Jungle => "JUNGLE",
            Lane::Mid => "MID",
            Lane::Adc => "ADC",
            Lane::Support => "SUPPORT",
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LaneStats {
    pub lane: Lane,
    pub games: usize,
    pub wins: usize,
}

impl LaneStats {
    pub fn win_rate(&self) -> f64 {
        percentage(self.wins, self.games)
    }
}

/// One entry per lane in canonical order, including unplayed lanes.
pub fn analyze_lanes(matches: &FetchedMatches, puuid: &str) -> Vec<LaneStats> {
    let mut stats: Vec<LaneStats> = Lane::ALL
        .iter()
        .map(|&lane| LaneStats { lane, games: 0, wins: 0 })
        .collect();

    for m in matches.values().filter(|m| is_ranked(m)) {
        let Some(p) = m.participant(puuid) else { continue };
        let Some(lane) = Lane::from_position(&p.individual_position) else { continue };
        let entry = &mut stats[lane.index()];
        entry.games += 1;
        if p.win {
            entry.wins += 1;
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::classifier::fixtures::{ranked_match, ME};
    use std::sync::Arc;

    #[test]
    fn normalizes_api_positions() {
        assert_eq!(Lane::from_position("MIDDLE"), Some(Lane::Mid));
        assert_eq!(Lane::from_position("bottom"), Some(Lane::Adc));
        assert_eq!(Lane::from_position("UTILITY"), Some(Lane::Support));
        assert_eq!(Lane::from_position("Invalid"), None);
        assert_eq!(Lane::from_position(""), None);
    }

    #[test]
    fn all_lanes_reported_in_canonical_order() {
        let mut matches = FetchedMatches::new();
        for (id, pos, won) in [("EUW1_1", "UTILITY", true), ("EUW1_2", "UTILITY", false), ("EUW1_3", "Invalid", true)] {
            let mut m = ranked_match(id, 1, won, &[]);
            m.info.participants[0].individual_position = pos.to_string();
            matches.insert(id.to_string(), Arc::new(m));
        }

        let stats = analyze_lanes(&matches, ME);
        let labels: Vec<&str> = stats.iter().map(|s| s.lane.label()).collect();
        assert_eq!(labels, vec!["TOP", "JUNGLE", "MID", "ADC", "SUPPORT"]);
        assert_eq!(stats[4].games, 2);
        assert_eq!(stats[4].win_rate(), 50.0);
        assert_eq!(stats.iter().map(|s| s.games).sum::<usize>(), 2);
        assert_eq!(stats[0].win_rate(), 0.0);
    }
}
