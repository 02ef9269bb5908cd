use crate::error::AppError;
use std::time::Duration;

/// The parts of an HTTP response the client cares about.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    /// Parsed `Retry-After` header, in seconds.
    pub retry_after: Option<u64>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

/// One GET request, no retries. Transport-level failures are `Err`; every
/// HTTP status, including errors, is `Ok`.
pub trait Transport: Send + Sync {
    fn get(&self, url: &str, query: &[(&'static str, String)]) -> Result<HttpResponse, AppError>;
}

pub struct UreqTransport {
    agent: ureq::Agent,
    api_key: String,
}

impl UreqTransport {
    pub fn new(api_key: &str, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(timeout)
            .user_agent(concat!("duo_detect/", env!("CARGO_PKG_VERSION")))
            .build();
        UreqTransport {
            agent,
            api_key: api_key.to_string(),
        }
    }

    fn read(resp: ureq::Response) -> Result<HttpResponse, AppError> {
        let status = resp.status();
        let retry_after = resp
            .header("Retry-After")
            .and_then(|value| value.trim().parse().ok());
        let body = resp
            .into_string()
            .map_err(|e| AppError::HttpError(e.to_string()))?;
        Ok(HttpResponse {
            status,
            retry_after,
            body,
        })
    }
}

impl Transport for UreqTransport {
    fn get(&self, url: &str, query: &[(&'static str, String)]) -> Result<HttpResponse, AppError> {
        let mut request = self.agent.get(url).set("X-Riot-Token", &self.api_key);
        for (key, value) in query {
            request = request.query(key, value);
        }

        match request.call() {
            Ok(resp) => Self::read(resp),
            Err(ureq::Error::Status(_, resp)) => Self::read(resp),
            Err(ureq::Error::Transport(e)) => Err(AppError::HttpError(e.to_string())),
        }
    }
}
