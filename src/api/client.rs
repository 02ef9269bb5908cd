use crate::config::Config;
use crate::error::AppError;
use crate::rate_limit::RequestPacer;
use serde::de::DeserializeOwned;
use std::sync::Arc;

use super::endpoints;
use super::models::*;
use super::retry::{RetryClient, RetryPolicy, Sleeper, ThreadSleeper};
use super::transport::{Transport, UreqTransport};

const NOT_FOUND: u16 = 404;

pub struct RiotApiClient {
    http: RetryClient,
    pacer: RequestPacer,
    routing: &'static str,
}

impl RiotApiClient {
    pub fn new(config: &Config) -> Self {
        let transport = Arc::new(UreqTransport::new(&config.api_key, config.network_timeout));
        Self::with_transport(config, transport, Arc::new(ThreadSleeper))
    }

    pub fn with_transport(config: &Config, transport: Arc<dyn Transport>, sleeper: Arc<dyn Sleeper>) -> Self {
        RiotApiClient {
            http: RetryClient::new(transport, sleeper, RetryPolicy::new(config.max_retries)),
            pacer: RequestPacer::per_second(config.requests_per_second),
            routing: config.regional_routing(),
        }
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str, query: &[(&'static str, String)]) -> Result<T, AppError> {
        self.pacer.wait();

        let resp = self.http.get(url, query)?;
        if !resp.is_success() {
            return Err(AppError::ApiStatus {
                status: resp.status,
                url: url.to_string(),
            });
        }

        serde_json::from_str(&resp.body).map_err(|e| AppError::JsonError(format!("{}: {}", url, e)))
    }

    pub fn get_account(&self, game_name: &str, tag_line: &str) -> Result<AccountDto, AppError> {
        let url = endpoints::account_by_riot_id(self.routing, game_name, tag_line);
        self.get_json(&url, &[]).map_err(|e| match e {
            AppError::ApiStatus { status: NOT_FOUND, .. } => {
                AppError::PlayerNotFound(format!("{}#{}", game_name, tag_line))
            }
            other => other,
        })
    }

    pub fn get_account_by_puuid(&self, puuid: &str) -> Result<AccountDto, AppError> {
        let url = endpoints::account_by_puuid(self.routing, puuid);
        self.get_json(&url, &[])
    }

    /// One page of match ids, newest first, starting at offset `start`.
    pub fn get_match_ids(&self, puuid: &str, start: usize, count: usize) -> Result<Vec<String>, AppError> {
        let url = endpoints::match_ids_by_puuid(self.routing, puuid);
        let query = [("start", start.to_string()), ("count", count.to_string())];
        self.get_json(&url, &query)
    }

    pub fn get_match(&self, match_id: &str) -> Result<MatchDto, AppError> {
        let url = endpoints::match_by_id(self.routing, match_id);
        self.get_json(&url, &[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::retry::testing::RecordingSleeper;
    use crate::api::transport::mock::{ok, status, MockTransport};

    fn client_with(transport: MockTransport) -> (RiotApiClient, Arc<MockTransport>) {
        let transport = Arc::new(transport);
        let client = RiotApiClient::with_transport(
            &Config::for_tests(),
            transport.clone(),
            Arc::new(RecordingSleeper::default()),
        );
        (client, transport)
    }

    #[test]
    fn account_404_maps_to_player_not_found() {
        let (client, _) = client_with(MockTransport::scripted(vec![status(404)]));
        let err = client.get_account("Nobody", "EUW").unwrap_err();
        assert!(matches!(err, AppError::PlayerNotFound(ref id) if id == "Nobody#EUW"));
    }

    #[test]
    fn match_ids_send_paging_query() {
        let (client, transport) = client_with(MockTransport::scripted(vec![ok(r#"["EUW1_1","EUW1_2"]"#)]));
        let ids = client.get_match_ids("puuid-1", 200, 50).unwrap();
        assert_eq!(ids, vec!["EUW1_1", "EUW1_2"]);

        let calls = transport.calls();
        assert!(calls[0].0.starts_with("https://europe.api.riotgames.com/lol/match/v5/matches/by-puuid/puuid-1/ids"));
        assert_eq!(calls[0].1, vec![("start", "200".to_string()), ("count", "50".to_string())]);
    }

    #[test]
    fn server_error_and_bad_json_are_distinct() {
        let (client, _) = client_with(MockTransport::scripted(vec![status(503), ok("{not json")]));
        assert!(matches!(
            client.get_match("EUW1_1"),
            Err(AppError::ApiStatus { status: 503, .. })
        ));
        assert!(matches!(client.get_match("EUW1_1"), Err(AppError::JsonError(_))));
    }
}
