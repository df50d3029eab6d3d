//! Wiring helpers for [`TrackerService`] in tests.

use std::sync::Arc;

use crate::adapter::outbound::memory::InMemoryWatchlistStore;
use crate::application::cache::price::PriceCache;
use crate::application::pairs::PairRegistry;
use crate::application::tracker::TrackerService;
use crate::domain::QuoteAsset;

use super::exchange::ScriptedGateway;

/// Build a tracker over `gateway` and a fresh in-memory store.
///
/// Pairs are loaded once from the gateway; an unreachable gateway leaves
/// the registry empty, like a failed startup load.
pub async fn service_with(gateway: ScriptedGateway) -> (Arc<TrackerService>, ScriptedGateway) {
    let registry = Arc::new(PairRegistry::new(QuoteAsset::default()));
    let _ = registry.refresh(&gateway).await;

    let service = TrackerService::new(
        Arc::new(gateway.clone()),
        Arc::new(InMemoryWatchlistStore::new()),
        registry,
        PriceCache::default(),
    );
    (Arc::new(service), gateway)
}
