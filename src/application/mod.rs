//! Application services (use cases).
//!
//! These services orchestrate domain logic and coordinate adapters
//! through the ports in [`crate::port`].

pub mod cache;
pub mod notification;
pub mod pairs;
pub mod tracker;
