//! Runtime wiring for each run mode.
//!
//! Every long-running piece (HTTP API, pair refresher, bot dispatcher,
//! notification scheduler) is a task watching one shutdown channel. The
//! process stops on Ctrl-C, or as soon as any service task ends on its own.

use std::sync::Arc;

use futures_util::future::{join_all, select_all};
use tokio::net::TcpListener;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::adapter::inbound::cli::command::RunMode;
use crate::adapter::inbound::http;
use crate::adapter::outbound::binance::BinanceClient;
use crate::adapter::outbound::memory::InMemoryWatchlistStore;
use crate::adapter::outbound::scrapper::ScrapperClient;
use crate::adapter::outbound::sqlite::database::connection::{create_pool, run_migrations};
use crate::adapter::outbound::sqlite::SqliteWatchlistStore;
use crate::application::cache::price::PriceCache;
use crate::application::pairs::{spawn_refresher, PairRegistry, RefreshSchedule};
use crate::application::tracker::TrackerService;
use crate::error::{Error, Result};
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::config::storage::{StorageBackend, StorageConfig};
use crate::port::inbound::tracker::TrackerApi;
use crate::port::outbound::exchange::ExchangeGateway;
use crate::port::outbound::watchlist::WatchlistStore;

/// Run `mode` until Ctrl-C or until a service stops.
///
/// # Errors
/// Returns an error if wiring fails (bad storage path, listener bind, missing
/// bot token) or if a service stops without being asked to.
pub async fn run(mode: RunMode, config: Config) -> Result<()> {
    info!(%mode, "tickerbot starting");
    let (shutdown_tx, shutdown) = watch::channel(false);
    let mut tasks = Vec::new();

    match mode {
        RunMode::Scrapper => {
            let tracker = build_tracker(&config, &shutdown, &mut tasks).await?;
            tasks.push(spawn_api(&config, tracker, shutdown.clone()).await?);
        }
        RunMode::Bot => {
            let tracker =
                ScrapperClient::from_config(&config.scrapper, config.exchange.quote_asset.clone())?;
            info!(base_url = %config.scrapper.base_url, "Using remote scrapper");
            spawn_bot(&config, Arc::new(tracker), &shutdown, &mut tasks)?;
        }
        RunMode::Standalone => {
            let tracker = build_tracker(&config, &shutdown, &mut tasks).await?;
            let api: Arc<dyn TrackerApi> = Arc::clone(&tracker) as Arc<dyn TrackerApi>;
            tasks.push(spawn_api(&config, api, shutdown.clone()).await?);
            spawn_bot(&config, tracker, &shutdown, &mut tasks)?;
        }
    }

    let result = supervise(tasks, shutdown_tx).await;
    info!("tickerbot stopped");
    result
}

/// Load the trading pairs once and return how many the exchange lists.
///
/// # Errors
/// Returns an error if the exchange cannot be reached.
pub async fn check_exchange(config: &Config) -> Result<usize> {
    let client = BinanceClient::from_config(&config.exchange)?;
    let registry = PairRegistry::new(config.exchange.quote_asset.clone());
    registry.refresh(&client).await
}

/// Build the watchlist store selected by `[storage]`.
///
/// # Errors
/// Returns an error if the SQLite database cannot be opened or migrated.
pub fn build_store(config: &StorageConfig) -> Result<Arc<dyn WatchlistStore>> {
    match config.backend {
        StorageBackend::Sqlite => {
            let pool = create_pool(&config.database)?;
            run_migrations(&pool)?;
            info!(database = %config.database, "SQLite watchlist store ready");
            Ok(Arc::new(SqliteWatchlistStore::new(pool)))
        }
        StorageBackend::Memory => {
            warn!("Using in-memory watchlist store, watchlists are lost on restart");
            Ok(Arc::new(InMemoryWatchlistStore::new()))
        }
    }
}

async fn build_tracker(
    config: &Config,
    shutdown: &watch::Receiver<bool>,
    tasks: &mut Vec<JoinHandle<()>>,
) -> Result<Arc<TrackerService>> {
    let store = build_store(&config.storage)?;
    let gateway: Arc<dyn ExchangeGateway> = Arc::new(BinanceClient::from_config(&config.exchange)?);
    let pairs = Arc::new(PairRegistry::new(config.exchange.quote_asset.clone()));

    match pairs.refresh(gateway.as_ref()).await {
        Ok(count) => info!(pairs = count, exchange = gateway.name(), "Trading pairs loaded"),
        Err(e) => warn!(
            error = %e,
            retry_secs = config.pairs.retry_interval_secs,
            "Initial trading pair load failed, every ticker is invalid until a refresh succeeds"
        ),
    }

    let schedule = RefreshSchedule {
        interval: config.pairs.refresh_interval(),
        retry_interval: config.pairs.retry_interval(),
    };
    tasks.push(spawn_refresher(
        Arc::clone(&pairs),
        Arc::clone(&gateway),
        schedule,
        shutdown.clone(),
    ));

    Ok(Arc::new(TrackerService::new(
        gateway,
        store,
        pairs,
        PriceCache::new(config.cache.price_ttl()),
    )))
}

async fn spawn_api(
    config: &Config,
    tracker: Arc<dyn TrackerApi>,
    shutdown: watch::Receiver<bool>,
) -> Result<JoinHandle<()>> {
    let listener = TcpListener::bind(config.bind_addr()?).await?;
    let app = http::router(tracker);
    Ok(tokio::spawn(async move {
        if let Err(e) = http::serve(listener, app, shutdown).await {
            error!(error = %e, "HTTP API failed");
        }
    }))
}

#[cfg(feature = "telegram")]
fn spawn_bot(
    config: &Config,
    tracker: Arc<dyn TrackerApi>,
    shutdown: &watch::Receiver<bool>,
    tasks: &mut Vec<JoinHandle<()>>,
) -> Result<()> {
    use crate::adapter::inbound::telegram::bot::run_bot;
    use crate::adapter::inbound::telegram::CommandRouter;
    use crate::adapter::outbound::telegram::TelegramMessenger;
    use crate::application::notification::NotificationScheduler;

    let bot = teloxide::Bot::new(config.telegram.token()?);
    let router = Arc::new(CommandRouter::new(Arc::clone(&tracker)));
    tasks.push(tokio::spawn(run_bot(
        bot.clone(),
        router,
        config.telegram.register_commands,
        shutdown.clone(),
    )));

    if config.notification.enabled {
        let scheduler = Arc::new(NotificationScheduler::new(
            tracker,
            Arc::new(TelegramMessenger::new(bot)),
            config.notification.interval(),
        ));
        tasks.push(scheduler.spawn(shutdown.clone()));
    } else {
        info!("Scheduled notifications disabled");
    }
    Ok(())
}

#[cfg(not(feature = "telegram"))]
fn spawn_bot(
    _config: &Config,
    _tracker: Arc<dyn TrackerApi>,
    _shutdown: &watch::Receiver<bool>,
    _tasks: &mut Vec<JoinHandle<()>>,
) -> Result<()> {
    Err(crate::error::ConfigError::Other(
        "this build has no Telegram support (enable the `telegram` feature)".into(),
    )
    .into())
}

/// Wait for Ctrl-C or the first task to finish, then stop everything.
async fn supervise(mut tasks: Vec<JoinHandle<()>>, shutdown: watch::Sender<bool>) -> Result<()> {
    let signal = tokio::spawn(async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Shutdown signal received"),
            Err(e) => error!(error = %e, "Failed to listen for Ctrl-C"),
        }
    });
    let signal_abort = signal.abort_handle();
    tasks.insert(0, signal);

    let (finished, index, rest) = select_all(tasks).await;
    let result = if index == 0 {
        Ok(())
    } else {
        match finished {
            Ok(()) => warn!("A service stopped unexpectedly, shutting down"),
            Err(e) => error!(error = %e, "A service task panicked, shutting down"),
        }
        Err(Error::Connection("service stopped unexpectedly".into()))
    };

    let _ = shutdown.send(true);
    signal_abort.abort();
    for joined in join_all(rest).await {
        if let Err(e) = joined {
            if !e.is_cancelled() {
                error!(error = %e, "Task failed during shutdown");
            }
        }
    }
    result
}
