//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`exchange`] — [`ScriptedGateway`](exchange::ScriptedGateway), an
//!   in-memory exchange with call counters and an outage switch.
//! - [`messenger`] — [`RecordingMessenger`](messenger::RecordingMessenger),
//!   collects sent messages and can fail for chosen chats.
//! - [`tracker`] — helpers that wire a `TrackerService` over in-memory
//!   adapters.

pub mod exchange;
pub mod messenger;
pub mod tracker;
