use std::path::PathBuf;
use std::sync::OnceLock;

static TRACING_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();
static TRACING_INIT: OnceLock<()> = OnceLock::new();

pub fn default_log_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".duo_detect")
        .join("logs")
}

/// Routes `tracing` events to a daily log file so console reports stay clean.
/// `RUST_LOG` overrides the default `info` filter.
pub fn init_logging() {
    TRACING_INIT.get_or_init(|| {
        let log_dir = default_log_dir();
        if let Err(err) = std::fs::create_dir_all(&log_dir) {
            eprintln!("failed to create log directory {}: {err}", log_dir.display());
            return;
        }

        let file_appender = tracing_appender::rolling::daily(log_dir, "duo_detect.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        let _ = TRACING_GUARD.set(guard);

        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(non_blocking)
            .with_ansi(false)
            .init();
    });
}
