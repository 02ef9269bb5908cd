//! Solo/duo classification of ranked games from recurring teammates.
//!
//! A teammate who shows up in at least two of the player's ranked games is a
//! duo candidate. Each game is attributed to its most frequent candidate, or
//! counted as solo queue when it has none.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;

use super::queue::is_ranked;
use crate::api::models::MatchDto;

/// Minimum co-occurrences for a teammate to count as a duo partner.
pub const DUO_FREQUENCY_THRESHOLD: usize = 2;

/// Below this many duo games the duo win rate is withheld.
pub const MIN_DUO_GAMES_FOR_RATE: usize = 3;

/// Fetched match details keyed by match id.
pub type FetchedMatches = BTreeMap<String, Arc<MatchDto>>;

/// Resolves a display name for a participant whose payload carries none.
pub trait NameResolver {
    fn resolve(&self, puuid: &str) -> String;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueueKind {
    Solo,
    Duo(String),
}

impl fmt::Display for QueueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueueKind::Solo => write!(f, "SoloQ"),
            QueueKind::Duo(partner) => write!(f, "DuoQ: {}", partner),
        }
    }
}

/// The target player's view of one ranked game.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedGame {
    pub match_id: String,
    pub created_at: i64,
    pub duration_secs: i64,
    pub won: bool,
    pub teammates: Vec<String>,
}

/// Ranked games the player took part in, newest first.
pub fn ranked_games<R>(matches: &FetchedMatches, puuid: &str, resolver: &R) -> Vec<RankedGame>
where
    R: NameResolver + ?Sized,
{
    let mut games: Vec<RankedGame> = matches
        .iter()
        .filter(|(_, m)| is_ranked(m))
        .filter_map(|(match_id, m)| {
            let me = m.participant(puuid)?;
            let teammates = m
                .teammates_of(puuid)
                .into_iter()
                .map(|p| p.display_name().unwrap_or_else(|| resolver.resolve(&p.puuid)))
                .collect();
            Some(RankedGame {
                match_id: match_id.clone(),
                created_at: m.info.game_creation,
                duration_secs: m.info.game_duration,
                won: me.win,
                teammates,
            })
        })
        .collect();

    sort_newest_first(&mut games);
    games
}

pub fn sort_newest_first(games: &mut [RankedGame]) {
    games.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| a.match_id.cmp(&b.match_id))
    });
}

/// Number of games each teammate name appears in.
pub fn teammate_frequencies(games: &[RankedGame]) -> HashMap<String, usize> {
    let mut freq = HashMap::new();
    for game in games {
        let distinct: BTreeSet<&String> = game.teammates.iter().collect();
        for name in distinct {
            *freq.entry(name.clone()).or_insert(0) += 1;
        }
    }
    freq
}

pub fn classify(games: &[RankedGame]) -> BTreeMap<String, QueueKind> {
    let freq = teammate_frequencies(games);

    games
        .iter()
        .map(|game| {
            let partner = game
                .teammates
                .iter()
                .filter_map(|name| {
                    let count = freq.get(name).copied().unwrap_or(0);
                    (count >= DUO_FREQUENCY_THRESHOLD).then_some((name, count))
                })
                // highest frequency, alphabetically first on ties
                .min_by(|(a_name, a_count), (b_name, b_count)| {
                    b_count.cmp(a_count).then_with(|| a_name.cmp(b_name))
                });

            let kind = match partner {
                Some((name, _)) => QueueKind::Duo(name.clone()),
                None => QueueKind::Solo,
            };
            (game.match_id.clone(), kind)
        })
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartnerRecord {
    pub games: usize,
    pub wins: usize,
}

impl PartnerRecord {
    pub fn win_ratio(&self) -> f64 {
        percentage(self.wins, self.games)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueueSummary {
    pub total_ranked: usize,
    pub solo_games: usize,
    pub solo_wins: usize,
    pub duo_games: usize,
    pub duo_wins: usize,
    pub partners: BTreeMap<String, PartnerRecord>,
}

impl QueueSummary {
    pub fn solo_win_rate(&self) -> f64 {
        percentage(self.solo_wins, self.solo_games)
    }

    /// `None` means there is not enough data for a meaningful rate.
    pub fn duo_win_rate(&self) -> Option<f64> {
        (self.duo_games >= MIN_DUO_GAMES_FOR_RATE).then(|| percentage(self.duo_wins, self.duo_games))
    }
}

pub fn summarize(games: &[RankedGame], classification: &BTreeMap<String, QueueKind>) -> QueueSummary {
    let mut summary = QueueSummary {
        total_ranked: games.len(),
        ..Default::default()
    };

    for game in games {
        match classification.get(&game.match_id) {
            Some(QueueKind::Duo(partner)) => {
                summary.duo_games += 1;
                let record = summary.partners.entry(partner.clone()).or_default();
                record.games += 1;
                if game.won {
                    summary.duo_wins += 1;
                    record.wins += 1;
                }
            }
            _ => {
                summary.solo_games += 1;
                if game.won {
                    summary.solo_wins += 1;
                }
            }
        }
    }

    summary
}

pub(crate) fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}
