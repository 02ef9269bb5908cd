//! Per-player analysis session.
//!
//! The analyzer owns the API client and the memo tables for match details and
//! resolved player names, so two analyzers never share state. Match details
//! are kept for the analyzer's whole lifetime; `cache_size` bounds only the
//! name table.

use indicatif::ProgressBar;
use rayon::prelude::*;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use crate::analysis::champion_stats::{analyze_champions, ChampionStats};
use crate::analysis::classifier::{
    classify, ranked_games, summarize, FetchedMatches, NameResolver, QueueKind, QueueSummary,
    RankedGame,
};
use crate::analysis::lane_stats::{analyze_lanes, LaneStats};
use crate::analysis::queue::mode_distribution;
use crate::api::client::RiotApiClient;
use crate::api::endpoints::MATCH_IDS_PAGE_SIZE;
use crate::api::models::{AccountDto, MatchDto};
use crate::cache::MemoTable;
use crate::config::Config;
use crate::error::AppError;

const ID_PAGE_WORKERS: usize = 5;
const DETAIL_WORKERS: usize = 10;

pub struct Analyzer {
    client: RiotApiClient,
    match_cache: MemoTable<Arc<MatchDto>>,
    name_cache: MemoTable<String>,
}

impl Analyzer {
    pub fn new(config: &Config) -> Self {
        Self::with_client(RiotApiClient::new(config), config.cache_size)
    }

    pub fn with_client(client: RiotApiClient, cache_size: usize) -> Self {
        Analyzer {
            client,
            match_cache: MemoTable::unbounded(),
            name_cache: MemoTable::new(cache_size),
        }
    }

    pub fn find_account(&self, game_name: &str, tag_line: &str) -> Result<AccountDto, AppError> {
        self.client.get_account(game_name, tag_line)
    }

    /// Account lookup, id listing and detail fetch for one Riot ID, folded
    /// into a report. An empty match history is `NoMatches`.
    pub fn analyze_player(
        &self,
        game_name: &str,
        tag_line: &str,
        games: usize,
        progress: &ProgressBar,
    ) -> Result<AnalysisReport, AppError> {
        let account = self.find_account(game_name, tag_line)?;
        let display_name = format!(
            "{}#{}",
            account.game_name.as_deref().unwrap_or(game_name),
            account.tag_line.as_deref().unwrap_or(tag_line)
        );
        tracing::info!(player = %display_name, puuid = %account.puuid, "account found");

        let ids = self.fetch_match_ids(&account.puuid, games);
        if ids.is_empty() {
            return Err(AppError::NoMatches);
        }

        progress.set_length(ids.len() as u64);
        let matches = self.fetch_match_details(&ids, progress);
        Ok(AnalysisReport::build(display_name, &account.puuid, games, &matches, self))
    }

    /// Lists up to `count` match ids, newest first, in pages of at most 100.
    /// Pages that fail are logged and contribute nothing.
    pub fn fetch_match_ids(&self, puuid: &str, count: usize) -> Vec<String> {
        let pages: Vec<(usize, usize)> = (0..count)
            .step_by(MATCH_IDS_PAGE_SIZE)
            .map(|start| (start, MATCH_IDS_PAGE_SIZE.min(count - start)))
            .collect();

        let batches = run_bounded(ID_PAGE_WORKERS, &pages, |&(start, size)| {
            match self.client.get_match_ids(puuid, start, size) {
                Ok(ids) => ids,
                Err(e) => {
                    tracing::error!(start, size, error = %e, "failed to fetch match id page");
                    Vec::new()
                }
            }
        });

        let mut ids: Vec<String> = batches.into_iter().flatten().collect();
        ids.truncate(count);
        tracing::info!(requested = count, pages = pages.len(), found = ids.len(), "match ids listed");
        ids
    }

    /// Fetches details for every distinct id. Failed ids are left out.
    pub fn fetch_match_details(&self, ids: &[String], progress: &ProgressBar) -> FetchedMatches {
        let mut seen = HashSet::new();
        let unique: Vec<&String> = ids.iter().filter(|id| seen.insert(id.as_str())).collect();

        let fetched = run_bounded(DETAIL_WORKERS, &unique, |id| {
            let details = self.match_details(id);
            progress.inc(1);
            details.map(|m| ((*id).clone(), m))
        });

        let matches: FetchedMatches = fetched.into_iter().flatten().collect();
        tracing::info!(
            requested = unique.len(),
            fetched = matches.len(),
            cached = self.match_cache.len(),
            "match details retrieved"
        );
        matches
    }

    /// Cache-or-fetch for one match.
    pub fn match_details(&self, match_id: &str) -> Option<Arc<MatchDto>> {
        if let Some(hit) = self.match_cache.get(match_id) {
            tracing::debug!(match_id, "match served from cache");
            return Some(hit);
        }

        match self.client.get_match(match_id) {
            Ok(details) => {
                let details = Arc::new(details);
                self.match_cache.insert(match_id, details.clone());
                Some(details)
            }
            Err(e) => {
                tracing::error!(match_id, error = %e, "failed to fetch match details");
                None
            }
        }
    }
}

impl NameResolver for Analyzer {
    fn resolve(&self, puuid: &str) -> String {
        if let Some(name) = self.name_cache.get(puuid) {
            return name;
        }

        match self.client.get_account_by_puuid(puuid) {
            Ok(account) => {
                let name = account.riot_id();
                self.name_cache.insert(puuid, name.clone());
                name
            }
            Err(e) => {
                tracing::warn!(puuid, error = %e, "could not resolve player name");
                puuid.to_string()
            }
        }
    }
}

/// Runs `f` over `items` on a pool of `workers` threads that lives only for
/// this batch. Output order matches input order.
fn run_bounded<T, R, F>(workers: usize, items: &[T], f: F) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Sync + Send,
{
    match rayon::ThreadPoolBuilder::new().num_threads(workers).build() {
        Ok(pool) => pool.install(|| items.par_iter().map(&f).collect()),
        Err(e) => {
            tracing::warn!(error = %e, "worker pool unavailable, fetching sequentially");
            items.iter().map(&f).collect()
        }
    }
}

/// Everything the report renderer needs for one player.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub display_name: String,
    pub puuid: String,
    pub requested: usize,
    pub fetched: usize,
    /// Ranked games, newest first.
    pub games: Vec<RankedGame>,
    pub classification: BTreeMap<String, QueueKind>,
    pub summary: QueueSummary,
    pub modes: BTreeMap<i32, usize>,
    pub champions: Vec<ChampionStats>,
    pub lanes: Vec<LaneStats>,
}

impl AnalysisReport {
    pub fn build<R>(
        display_name: String,
        puuid: &str,
        requested: usize,
        matches: &FetchedMatches,
        resolver: &R,
    ) -> Self
    where
        R: NameResolver + ?Sized,
    {
        let games = ranked_games(matches, puuid, resolver);
        let classification = classify(&games);
        let summary = summarize(&games, &classification);

        AnalysisReport {
            display_name,
            puuid: puuid.to_string(),
            requested,
            fetched: matches.len(),
            modes: mode_distribution(matches.values().map(|m| m.as_ref())),
            champions: analyze_champions(matches, puuid),
            lanes: analyze_lanes(matches, puuid),
            games,
            classification,
            summary,
        }
    }

    pub fn kind_of(&self, match_id: &str) -> Option<&QueueKind> {
        self.classification.get(match_id)
    }
}
