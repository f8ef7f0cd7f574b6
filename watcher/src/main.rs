//! Homework watcher: polls the homework status API and relays review
//! verdicts to a Telegram chat.
//!
//! Missing credentials stop the process at startup. Past that point nothing
//! is fatal: the watcher keeps polling until it receives Ctrl-C.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use common::config::{WatcherConfig, DEFAULT_ENDPOINT, DEFAULT_RETRY_PERIOD_SECS};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

mod api;
mod error;
mod gate;
mod poller;
mod validate;
mod verdict;

use api::PracticumClient;
use poller::PollLoop;
use telegram::TelegramNotifier;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Status endpoint to poll.
    #[arg(long, env = "WATCHER_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,
    /// Seconds to wait between two polls.
    #[arg(long, env = "WATCHER_RETRY_PERIOD_SECS", default_value_t = DEFAULT_RETRY_PERIOD_SECS)]
    retry_period_secs: u64,
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "homework_watcher=info,telegram=info".into());
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);
    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine; the variables may come from the environment.
    dotenv::dotenv().ok();

    let args = Args::parse();
    init_tracing(args.log_format);

    info!("📚 Homework watcher v{}", env!("CARGO_PKG_VERSION"));

    let config = WatcherConfig::from_env()
        .inspect_err(|e| error!("{}, watcher halted", e))
        .context("Failed to load watcher configuration")?;

    let source = Arc::new(PracticumClient::new(&args.endpoint, &config.api_credential));
    let notifier = Arc::new(TelegramNotifier::new(&config.telegram));
    let mut poll = PollLoop::new(
        source,
        notifier,
        Duration::from_secs(args.retry_period_secs),
    );

    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutdown requested, finishing current cycle");
            on_signal.cancel();
        }
    });

    poll.run(cancel).await;

    Ok(())
}
