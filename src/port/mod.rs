//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports define the extension points of the application. Adapters implement
//! them to integrate with external systems (exchange, database, chat).
//!
//! # Architecture
//!
//! ```text
//!        ┌──────────────┐        ┌─────────────────────┐
//!        │  Telegram    │        │   HTTP (axum) API   │
//!        │  router      │        │                     │
//!        └──────┬───────┘        └──────────┬──────────┘
//!               │      inbound::TrackerApi  │
//!               ▼                           ▼
//!        ┌─────────────────────────────────────────────┐
//!        │          application::TrackerService        │
//!        └──────┬──────────────────┬───────────────────┘
//!               ▼                  ▼
//!        ┌─────────────┐    ┌─────────────┐    ┌───────────┐
//!        │  Exchange   │    │  Watchlist  │    │ Messenger │
//!        │  Gateway    │    │  Store      │    │           │
//!        └─────────────┘    └─────────────┘    └───────────┘
//! ```

pub mod inbound;
pub mod outbound;
