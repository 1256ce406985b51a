//! Homework status bot.
//!
//! Polls the Practicum homework API and posts review status changes to a
//! Telegram chat. Failures inside a poll cycle are reported to the same
//! chat; only missing credentials stop the process at startup.

use anyhow::{Context, Result};
use common::config::{self, BotConfig};
use telegram::TelegramNotifier;
use tracing::{error, info};
use watcher::api::PracticumClient;
use watcher::PollLoop;

mod logging;

type Poller = PollLoop<PracticumClient, TelegramNotifier>;

/// Validate the config and only then hand it to `build`. Nothing that
/// talks to the network exists until the config is complete.
fn startup<L, B, T>(lookup: L, build: B) -> Result<T>
where
    L: Fn(&str) -> Option<String>,
    B: FnOnce(BotConfig) -> T,
{
    let config = match BotConfig::from_lookup(lookup) {
        Ok(config) => config,
        Err(e) => {
            error!("Startup aborted: {}", e);
            return Err(e).context("Invalid configuration");
        }
    };
    info!(?config, "Configuration loaded");
    Ok(build(config))
}

fn build_poller(config: BotConfig) -> Poller {
    let api = PracticumClient::new(config.endpoint.clone(), config.practicum_token.clone());
    let notifier = TelegramNotifier::new(&config.telegram_token, &config.telegram_chat_id);
    PollLoop::new(api, notifier, config.retry_interval())
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine; the variables may come from the environment.
    dotenv::dotenv().ok();

    logging::init(config::log_file_from_env().as_deref())?;

    info!("Homework bot v{}", env!("CARGO_PKG_VERSION"));

    let poller = startup(|key| std::env::var(key).ok(), build_poller)?;

    poller
        .run()
        .await
        .context("Failure notice could not be delivered")
}
