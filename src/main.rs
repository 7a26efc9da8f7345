//! Leafscan binary entrypoint: parse arguments, set up logging, run one command.

mod args;

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::{Arc, OnceLock};

use clap::Parser;

use leafscan::paths;
use leafscan::prefs::{PreferencesStore, StoreConfig};
use leafscan::storage::FileStore;
use leafscan::translate::{CachingTranslator, GoogleTranslator, StaticOnly, Translator};

struct LeafscanTimer;

impl tracing_subscriber::fmt::time::FormatTime for LeafscanTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> fmt::Result {
        w.write_str(&leafscan::util::log_timestamp())
    }
}

static LOG_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// What: Install the global tracing subscriber.
///
/// Inputs:
/// - `config_dir`: Base directory; logs go to `<config_dir>/logs/leafscan.log`.
/// - `level`: Default filter when `RUST_LOG` is unset.
///
/// Details:
/// - Falls back to stderr when the log file cannot be opened.
fn init_logging(config_dir: &Path, level: &str) {
    let mut log_path = paths::logs_dir(config_dir);
    log_path.push("leafscan.log");
    let env_filter = || {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level))
    };
    match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .with_ansi(false)
                .with_writer(non_blocking)
                .with_timer(LeafscanTimer)
                .init();
            let _ = LOG_GUARD.set(guard);
            tracing::info!(path = %log_path.display(), "logging initialized");
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .with_ansi(true)
                .with_writer(std::io::stderr)
                .with_timer(LeafscanTimer)
                .init();
            tracing::warn!(error = %e, "failed to open log file; using stderr");
        }
    }
}

/// Hydrate a store over `storage` with `translator` and run `command`.
async fn run_with<T: Translator>(
    storage: Arc<FileStore>,
    translator: T,
    config: StoreConfig,
    command: &args::Command,
) -> ExitCode {
    let store = PreferencesStore::new(storage, translator, config);
    store.initialize().await;
    args::execute(&store, command).await
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = args::Args::parse();
    let config_dir = args
        .config_dir
        .as_deref()
        .map_or_else(paths::config_dir, PathBuf::from);
    init_logging(&config_dir, &args::determine_log_level(&args));

    let config = StoreConfig::from_env();
    let storage = Arc::new(FileStore::new(paths::preferences_path(&config_dir)));
    tracing::info!(path = %storage.path().display(), command = ?args.command, "Leafscan starting");

    let offline = matches!(args.command, args::Command::SetLanguage { offline: true, .. });
    let code = if offline {
        run_with(storage, StaticOnly, config, &args.command).await
    } else {
        match GoogleTranslator::new(config.translation_timeout) {
            Ok(google) => {
                let translator = CachingTranslator::new(google, config.translation_cache_capacity);
                run_with(storage, translator, config, &args.command).await
            }
            Err(e) => {
                tracing::warn!(error = %e, "live translation unavailable; using built-in strings");
                run_with(storage, StaticOnly, config, &args.command).await
            }
        }
    };
    tracing::info!("Leafscan exited");
    code
}
