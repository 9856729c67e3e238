//! Staffbot - entry point
//!
//! Runs the Telegram bot against the configured Yandex Tracker
//! organization. Configuration comes from the environment (or `.env`).

use staffbot::Config;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment
    dotenvy::dotenv().ok();

    let log_level = std::env::var("RUST_LOG")
        .map(|s| match s.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        })
        .unwrap_or(Level::INFO);

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_ansi(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Staffbot v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env()?;
    staffbot::telegram::run_bot(config).await
}
