use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("API returned status {status} for {url}")]
    ApiStatus { status: u16, url: String },

    #[error("No response from {url} after {attempts} attempts: {last_error}")]
    RetriesExhausted {
        url: String,
        attempts: u32,
        last_error: String,
    },

    #[error("Player not found: {0}")]
    PlayerNotFound(String),

    #[error("No matches found for this player")]
    NoMatches,

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("HTTP error: {0}")]
    HttpError(String),

    #[error("JSON parsing error: {0}")]
    JsonError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
