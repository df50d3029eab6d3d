//! Scrapper REST API exercised over real sockets through `ScrapperClient`.

mod support;

use std::sync::Arc;

use rust_decimal_macros::dec;

use support::scrapper::RunningScrapper;
use tickerbot::adapter::inbound::telegram::CommandRouter;
use tickerbot::application::notification::{NotificationReport, NotificationScheduler};
use tickerbot::domain::{ChatId, Price, Symbol};
use tickerbot::port::inbound::tracker::{TrackerApi, TrackerError};
use tickerbot::testkit::exchange::ScriptedGateway;
use tickerbot::testkit::messenger::RecordingMessenger;

fn gateway() -> ScriptedGateway {
    ScriptedGateway::new()
        .with_price("BTCUSDT", dec!(65000.01))
        .with_price("ETHUSDT", dec!(3500))
}

#[tokio::test]
async fn watchlist_scenario_over_http() {
    let scrapper = RunningScrapper::start(gateway()).await;
    let client = scrapper.client();
    let chat = ChatId::new(42);

    assert_eq!(client.add(chat, "btc").await.unwrap(), Symbol::new("BTCUSDT"));
    assert_eq!(
        client.watchlist(chat).await.unwrap().into_iter().collect::<Vec<_>>(),
        vec![Symbol::new("BTCUSDT")]
    );

    let quote = client.price("btc", false).await.unwrap();
    assert_eq!(quote.symbol, Symbol::new("BTCUSDT"));
    assert_eq!(quote.price, Price::new(dec!(65000.01)));

    assert!(!client.remove(chat, "eth").await.unwrap());
    assert!(client.remove(chat, "btc").await.unwrap());
    assert!(client.watchlist(chat).await.unwrap().is_empty());

    scrapper.stop().await;
}

#[tokio::test]
async fn errors_keep_their_kind_across_the_wire() {
    let scrapper = RunningScrapper::start(gateway().with_pairs(["SOLUSDT"])).await;
    let client = scrapper.client();

    assert_eq!(
        client.price("doge", false).await.unwrap_err(),
        TrackerError::invalid("doge")
    );
    assert_eq!(
        client.price("sol", false).await.unwrap_err(),
        TrackerError::PriceNotFound {
            symbol: "SOLUSDT".into()
        }
    );

    scrapper.gateway.set_unreachable(true);
    let err = client.price("eth", true).await.unwrap_err();
    assert!(matches!(err, TrackerError::UpstreamUnavailable(_)), "{err:?}");

    scrapper.stop().await;
}

#[tokio::test]
async fn refresh_bypasses_the_cache() {
    let scrapper = RunningScrapper::start(gateway()).await;
    let client = scrapper.client();

    client.price("btc", false).await.unwrap();
    scrapper.gateway.set_price("BTCUSDT", dec!(70000));

    let cached = client.price("btc", false).await.unwrap();
    let fresh = client.price("btc", true).await.unwrap();

    assert_eq!(cached.price, Price::new(dec!(65000.01)));
    assert_eq!(fresh.price, Price::new(dec!(70000)));

    scrapper.stop().await;
}

#[tokio::test]
async fn chat_ids_and_pairs() {
    let scrapper = RunningScrapper::start(gateway()).await;
    let client = scrapper.client();

    client.add(ChatId::new(42), "eth").await.unwrap();
    client.add(ChatId::new(-7), "btc").await.unwrap();
    client.add(ChatId::new(42), "btc").await.unwrap();

    let ids: Vec<_> = client.chat_ids().await.unwrap().into_iter().collect();
    assert_eq!(ids, vec![ChatId::new(-7), ChatId::new(42)]);

    assert_eq!(client.pair_count().await.unwrap(), 2);
    assert_eq!(
        client.pairs(0, 20).await.unwrap(),
        vec![Symbol::new("BTCUSDT"), Symbol::new("ETHUSDT")]
    );
    assert_eq!(client.pairs(1, 1).await.unwrap(), vec![Symbol::new("ETHUSDT")]);
    assert!(client.pairs(3, 20).await.unwrap().is_empty());

    scrapper.stop().await;
}

#[tokio::test]
async fn stopped_scrapper_is_upstream_unavailable() {
    let scrapper = RunningScrapper::start(gateway()).await;
    let client = scrapper.client();
    scrapper.stop().await;

    let err = client.watchlist(ChatId::new(1)).await.unwrap_err();

    assert!(matches!(err, TrackerError::UpstreamUnavailable(_)), "{err:?}");
}

#[tokio::test]
async fn chat_commands_through_remote_tracker() {
    let scrapper = RunningScrapper::start(gateway()).await;
    let router = CommandRouter::new(Arc::new(scrapper.client()));
    let chat = ChatId::new(5);

    let added = router.route(chat, "/add btc").await;
    let listed = router.route(chat, "/list").await;
    let priced = router.route(chat, "/price eth").await;
    let unknown = router.route(chat, "/add doge").await;
    let unknown_price = router.route(chat, "/price doge").await;
    let removed = router.route(chat, "/remove btc").await;

    assert_eq!(added.text, "✅ BTCUSDT added to your watchlist.");
    assert_eq!(listed.text, "📋 Your watchlist: BTCUSDT");
    assert_eq!(priced.text, "💰 ETHUSDT: $3500");
    assert!(unknown.text.contains("DOGE"), "{}", unknown.text);
    assert_eq!(
        unknown_price.text,
        "❌ Unknown ticker: DOGE. Use /pairs to see available pairs."
    );
    assert_eq!(removed.text, "🗑️ BTCUSDT removed from your watchlist.");

    scrapper.stop().await;
}

#[tokio::test]
async fn notifications_through_remote_tracker() {
    let scrapper = RunningScrapper::start(gateway()).await;
    let client = scrapper.client();
    client.add(ChatId::new(1), "btc").await.unwrap();
    client.add(ChatId::new(1), "eth").await.unwrap();
    client.add(ChatId::new(2), "eth").await.unwrap();
    client.remove(ChatId::new(2), "eth").await.unwrap();

    let messenger = RecordingMessenger::new();
    let scheduler = NotificationScheduler::new(
        Arc::new(client),
        Arc::new(messenger.clone()),
        std::time::Duration::from_secs(3600),
    );

    let report = scheduler.run_once().await.unwrap();

    assert_eq!(
        report,
        NotificationReport {
            chats: 1,
            sent: 1,
            skipped: 0,
            failed: 0,
        }
    );
    assert_eq!(
        messenger.sent_to(ChatId::new(1)),
        vec!["📈 Watchlist prices:\nBTCUSDT: $65000.01\nETHUSDT: $3500".to_string()]
    );

    scrapper.stop().await;
}

#[tokio::test]
async fn notification_run_fails_when_chats_cannot_be_listed() {
    let scrapper = RunningScrapper::start(gateway()).await;
    let client = scrapper.client();
    scrapper.stop().await;

    let messenger = RecordingMessenger::new();
    let scheduler = NotificationScheduler::new(
        Arc::new(client),
        Arc::new(messenger.clone()),
        std::time::Duration::from_secs(3600),
    );

    let err = scheduler.run_once().await.unwrap_err();

    assert!(matches!(err, TrackerError::UpstreamUnavailable(_)), "{err:?}");
    assert!(messenger.sent_to(ChatId::new(1)).is_empty());
}
