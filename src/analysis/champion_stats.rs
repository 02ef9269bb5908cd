use std::collections::HashMap;

use super::classifier::{percentage, FetchedMatches};
use super::queue::is_ranked;

#[derive(Debug, Clone, PartialEq)]
pub struct ChampionStats {
    pub name: String,
    pub games: usize,
    pub wins: usize,
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
}

impl ChampionStats {
    pub fn new(name: String) -> Self {
        ChampionStats {
            name,
            games: 0,
            wins: 0,
            kills: 0,
            deaths: 0,
            assists: 0,
        }
    }

    pub fn win_rate(&self) -> f64 {
        percentage(self.wins, self.games)
    }

    /// (kills + assists) / max(deaths, 1)
    pub fn kda(&self) -> f64 {
        (self.kills + self.assists) as f64 / self.deaths.max(1) as f64
    }
}

pub struct ChampionStatsTracker {
    stats: HashMap<String, ChampionStats>,
}

impl ChampionStatsTracker {
    pub fn new() -> Self {
        ChampionStatsTracker {
            stats: HashMap::new(),
        }
    }

    pub fn add_game(&mut self, champion_name: &str, won: bool, kills: u32, deaths: u32, assists: u32) {
        let name = if champion_name.is_empty() { "Unknown" } else { champion_name };
        let entry = self
            .stats
            .entry(name.to_string())
            .or_insert_with(|| ChampionStats::new(name.to_string()));

        entry.games += 1;
        if won {
            entry.wins += 1;
        }
        entry.kills += kills;
        entry.deaths += deaths;
        entry.assists += assists;
    }

    /// Most played first, then by name.
    pub fn get_stats(&self) -> Vec<ChampionStats> {
        let mut stats: Vec<ChampionStats> = self.stats.values().cloned().collect();
        stats.sort_by(|a, b| b.games.cmp(&a.games).then_with(|| a.name.cmp(&b.name)));
        stats
    }
}

/// Per-champion record of `puuid` over the ranked games in `matches`.
pub fn analyze_champions(matches: &FetchedMatches, puuid: &str) -> Vec<ChampionStats> {
    let mut tracker = ChampionStatsTracker::new();
    for m in matches.values().filter(|m| is_ranked(m)) {
        if let Some(p) = m.participant(puuid) {
            tracker.add_game(&p.champion_name, p.win, p.kills, p.deaths, p.assists);
        }
    }
    tracker.get_stats()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::classifier::fixtures::{ranked_match, ME};
    use std::sync::Arc;

    #[test]
    fn kda_treats_zero_deaths_as_one() {
        let mut tracker = ChampionStatsTracker::new();
        tracker.add_game("Ahri", true, 7, 0, 5);
        let ahri = &tracker.get_stats()[0];
        assert_eq!(ahri.kda(), 12.0);
        assert_eq!(ahri.win_rate(), 100.0);
    }

    #[test]
    fn groups_ranked_games_by_champion() {
        let mut matches = FetchedMatches::new();
        for (id, champ, won, k, d, a) in [
            ("EUW1_1", "Ahri", true, 10, 2, 4),
            ("EUW1_2", "Ahri", false, 2, 6, 3),
            ("EUW1_3", "Zed", true, 8, 1, 1),
        ] {
            let mut m = ranked_match(id, 1, won, &[]);
            let me = m.info.participants.iter_mut().find(|p| p.puuid == ME).unwrap();
            me.champion_name = champ.to_string();
            me.kills = k;
            me.deaths = d;
            me.assists = a;
            matches.insert(id.to_string(), Arc::new(m));
        }
        let mut aram = ranked_match("EUW1_4", 1, true, &[]);
        aram.info.queue_id = 450;
        matches.insert("EUW1_4".into(), Arc::new(aram));

        let stats = analyze_champions(&matches, ME);
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].name, "Ahri");
        assert_eq!(stats[0].games, 2);
        assert_eq!(stats[0].win_rate(), 50.0);
        assert_eq!(stats[0].kda(), 19.0 / 8.0);
        assert_eq!(stats[1].name, "Zed");
        assert_eq!(stats[1].kda(), 9.0);
    }
}
