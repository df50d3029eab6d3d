//! SQLite database modules.
//!
//! Connection management, schema definitions and Diesel model types.

pub mod connection;
pub mod model;
pub mod schema;
