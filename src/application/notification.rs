//! Periodic watchlist price notifications.
//!
//! Every run walks all chats with a non-empty watchlist and pushes one
//! message per chat listing the current price of each watched symbol. One
//! chat failing never affects another.

use std::fmt::Write as _;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use crate::domain::{ChatId, Symbol};
use crate::port::inbound::tracker::{TrackerApi, TrackerError};
use crate::port::outbound::messenger::Messenger;

/// Default delay between notification runs.
pub const DEFAULT_NOTIFICATION_INTERVAL: Duration = Duration::from_secs(3600);

const HEADER: &str = "📈 Watchlist prices:\n";

/// Outcome of a single run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotificationReport {
    /// Chats enumerated at the start of the run.
    pub chats: usize,
    /// Messages delivered.
    pub sent: usize,
    /// Chats skipped because their watchlist turned out empty.
    pub skipped: usize,
    /// Chats where listing or sending failed.
    pub failed: usize,
}

/// Pushes watchlist prices to every chat on a fixed interval.
pub struct NotificationScheduler {
    tracker: Arc<dyn TrackerApi>,
    messenger: Arc<dyn Messenger>,
    interval: Duration,
}

impl NotificationScheduler {
    #[must_use]
    pub fn new(
        tracker: Arc<dyn TrackerApi>,
        messenger: Arc<dyn Messenger>,
        interval: Duration,
    ) -> Self {
        Self {
            tracker,
            messenger,
            interval,
        }
    }

    /// Notify every chat once.
    ///
    /// # Errors
    /// Fails only when the chat list itself cannot be fetched; per-chat
    /// failures are counted in the report.
    pub async fn run_once(&self) -> Result<NotificationReport, TrackerError> {
        let chat_ids = self.tracker.chat_ids().await?;
        let mut report = NotificationReport {
            chats: chat_ids.len(),
            ..NotificationReport::default()
        };

        for chat_id in chat_ids {
            match self.notify_chat(chat_id).await {
                ChatOutcome::Sent => report.sent += 1,
                ChatOutcome::Skipped => report.skipped += 1,
                ChatOutcome::Failed => report.failed += 1,
            }
        }
        Ok(report)
    }

    async fn notify_chat(&self, chat_id: ChatId) -> ChatOutcome {
        let watchlist = match self.tracker.watchlist(chat_id).await {
            Ok(list) => list,
            Err(e) => {
                error!(chat_id = %chat_id, error = %e, "Failed to load watchlist");
                return ChatOutcome::Failed;
            }
        };
        if watchlist.is_empty() {
            debug!(chat_id = %chat_id, "Empty watchlist, skipping");
            return ChatOutcome::Skipped;
        }

        let mut text = String::from(HEADER);
        for symbol in &watchlist {
            let line = self.price_line(symbol).await;
            text.push_str(&line);
            text.push('\n');
        }

        match self.messenger.send(chat_id, text.trim_end()).await {
            Ok(()) => {
                info!(chat_id = %chat_id, symbols = watchlist.len(), "Sent price notification");
                ChatOutcome::Sent
            }
            Err(e) => {
                error!(chat_id = %chat_id, error = %e, "Failed to send price notification");
                ChatOutcome::Failed
            }
        }
    }

    async fn price_line(&self, symbol: &Symbol) -> String {
        let mut line = String::new();
        match self.tracker.price(symbol.as_str(), false).await {
            Ok(quote) => {
                let _ = write!(line, "{}: ${}", quote.symbol, quote.price);
            }
            Err(e) => {
                warn!(symbol = %symbol, error = %e, "Price unavailable for notification");
                let _ = write!(line, "{symbol}: price unavailable ({e})");
            }
        }
        line
    }

    /// Run on the configured interval until `shutdown` flips. The first
    /// run happens one interval after start.
    pub fn spawn(self: Arc<Self>, mut shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + self.interval, self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            info!(interval_secs = self.interval.as_secs(), "Notification scheduler started");

            loop {
                tokio::select! {
                    _ = ticker.tick() => {}
                    _ = shutdown.changed() => break,
                }

                match self.run_once().await {
                    Ok(report) => info!(
                        chats = report.chats,
                        sent = report.sent,
                        skipped = report.skipped,
                        failed = report.failed,
                        "Notification run complete"
                    ),
                    Err(e) => error!(error = %e, "Failed to enumerate chats, skipping run"),
                }
            }
            info!("Notification scheduler stopped");
        })
    }
}

enum ChatOutcome {
    Sent,
    Skipped,
    Failed,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::exchange::ScriptedGateway;
    use crate::testkit::messenger::RecordingMessenger;
    use crate::testkit::tracker::service_with;
    use rust_decimal_macros::dec;
    use std::collections::BTreeSet;

    use crate::adapter::outbound::memory::InMemoryWatchlistStore;
    use crate::application::cache::price::PriceCache;
    use crate::application::pairs::PairRegistry;
    use crate::application::tracker::TrackerService;
    use crate::domain::{QuoteAsset, Watchlist};
    use crate::error::Error;
    use crate::port::outbound::watchlist::WatchlistStore;
    use async_trait::async_trait;

    async fn setup(
        messenger: RecordingMessenger,
    ) -> (NotificationScheduler, Arc<dyn TrackerApi>, ScriptedGateway) {
        let gateway = ScriptedGateway::new()
            .with_price("BTCUSDT", dec!(65000.01000000))
            .with_price("ETHUSDT", dec!(3500))
            .with_pairs(["SOLUSDT"]);
        let (service, gateway) = service_with(gateway).await;
        let tracker: Arc<dyn TrackerApi> = service;
        let scheduler = NotificationScheduler::new(
            Arc::clone(&tracker),
            Arc::new(messenger),
            DEFAULT_NOTIFICATION_INTERVAL,
        );
        (scheduler, tracker, gateway)
    }

    #[tokio::test]
    async fn one_message_per_chat_with_all_symbols() {
        let messenger = RecordingMessenger::new();
        let (scheduler, tracker, _) = setup(messenger.clone()).await;
        tracker.add(ChatId::new(1), "btc").await.unwrap();
        tracker.add(ChatId::new(1), "eth").await.unwrap();
        tracker.add(ChatId::new(2), "eth").await.unwrap();

        let report = scheduler.run_once().await.unwrap();

        assert_eq!(report.chats, 2);
        assert_eq!(report.sent, 2);
        let first = messenger.sent_to(ChatId::new(1));
        assert_eq!(first.len(), 1);
        assert_eq!(
            first[0],
            "📈 Watchlist prices:\nBTCUSDT: $65000.01\nETHUSDT: $3500"
        );
    }

    #[tokio::test]
    async fn failed_price_becomes_error_line() {
        let messenger = RecordingMessenger::new();
        let (scheduler, tracker, _) = setup(messenger.clone()).await;
        tracker.add(ChatId::new(1), "btc").await.unwrap();
        tracker.add(ChatId::new(1), "sol").await.unwrap();

        let report = scheduler.run_once().await.unwrap();

        assert_eq!(report.sent, 1);
        let text = &messenger.sent_to(ChatId::new(1))[0];
        assert!(text.contains("BTCUSDT: $65000.01"));
        assert!(text.contains("SOLUSDT: price unavailable"));
    }

    #[tokio::test]
    async fn send_failure_does_not_stop_other_chats() {
        let messenger = RecordingMessenger::new().failing_for(ChatId::new(1));
        let (scheduler, tracker, _) = setup(messenger.clone()).await;
        tracker.add(ChatId::new(1), "btc").await.unwrap();
        tracker.add(ChatId::new(2), "btc").await.unwrap();

        let report = scheduler.run_once().await.unwrap();

        assert_eq!(report.failed, 1);
        assert_eq!(report.sent, 1);
        assert_eq!(messenger.sent_to(ChatId::new(2)).len(), 1);
    }

    /// Store whose `list` fails for one chat.
    struct BrokenListStore {
        inner: InMemoryWatchlistStore,
        broken: ChatId,
    }

    #[async_trait]
    impl WatchlistStore for BrokenListStore {
        async fn add(&self, chat_id: ChatId, symbol: &Symbol) -> crate::error::Result<bool> {
            self.inner.add(chat_id, symbol).await
        }

        async fn remove(&self, chat_id: ChatId, symbol: &Symbol) -> crate::error::Result<bool> {
            self.inner.remove(chat_id, symbol).await
        }

        async fn list(&self, chat_id: ChatId) -> crate::error::Result<Watchlist> {
            if chat_id == self.broken {
                return Err(Error::Database("disk I/O error".into()));
            }
            self.inner.list(chat_id).await
        }

        async fn chat_ids(&self) -> crate::error::Result<BTreeSet<ChatId>> {
            self.inner.chat_ids().await
        }
    }

    #[tokio::test]
    async fn list_failure_does_not_stop_other_chats() {
        let gateway = ScriptedGateway::new().with_price("BTCUSDT", dec!(65000));
        let pairs = Arc::new(PairRegistry::new(QuoteAsset::default()));
        pairs.refresh(&gateway).await.unwrap();
        let store = BrokenListStore {
            inner: InMemoryWatchlistStore::new(),
            broken: ChatId::new(1),
        };
        let tracker = Arc::new(TrackerService::new(
            Arc::new(gateway),
            Arc::new(store),
            pairs,
            PriceCache::default(),
        ));
        tracker.add(ChatId::new(1), "btc").await.unwrap();
        tracker.add(ChatId::new(2), "btc").await.unwrap();
        let messenger = RecordingMessenger::new();
        let scheduler = NotificationScheduler::new(
            tracker,
            Arc::new(messenger.clone()),
            DEFAULT_NOTIFICATION_INTERVAL,
        );

        let report = scheduler.run_once().await.unwrap();

        assert_eq!(
            report,
            NotificationReport {
                chats: 2,
                sent: 1,
                skipped: 0,
                failed: 1,
            }
        );
        assert!(messenger.sent_to(ChatId::new(1)).is_empty());
        assert_eq!(
            messenger.sent_to(ChatId::new(2)),
            vec!["📈 Watchlist prices:\nBTCUSDT: $65000".to_string()]
        );
    }

    #[tokio::test]
    async fn exchange_outage_still_notifies() {
        let messenger = RecordingMessenger::new();
        let (scheduler, tracker, gateway) = setup(messenger.clone()).await;
        tracker.add(ChatId::new(1), "btc").await.unwrap();
        gateway.set_unreachable(true);

        let report = scheduler.run_once().await.unwrap();

        assert_eq!(report.sent, 1);
        assert!(messenger.sent_to(ChatId::new(1))[0].contains("price unavailable"));
    }

    #[tokio::test]
    async fn no_chats_sends_nothing() {
        let messenger = RecordingMessenger::new();
        let (scheduler, _, _) = setup(messenger.clone()).await;

        let report = scheduler.run_once().await.unwrap();

        assert_eq!(report, NotificationReport::default());
        assert!(messenger.sent().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn spawned_scheduler_waits_one_interval() {
        let messenger = RecordingMessenger::new();
        let (scheduler, tracker, _) = setup(messenger.clone()).await;
        tracker.add(ChatId::new(1), "btc").await.unwrap();
        let (tx, rx) = watch::channel(false);

        let handle = Arc::new(scheduler).spawn(rx);

        tokio::time::sleep(Duration::from_secs(3599)).await;
        assert!(messenger.sent().is_empty());

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(messenger.sent().len(), 1);

        tx.send(true).unwrap();
        handle.await.unwrap();
    }
}
