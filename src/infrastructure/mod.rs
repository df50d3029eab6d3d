//! Infrastructure layer.
//!
//! Configuration loading and the composition root that wires adapters and
//! application services for each run mode.
//!
//! # Submodules
//!
//! - [`bootstrap`] - Runtime wiring and shutdown supervision
//! - [`config`] - Configuration loading and validation

pub mod bootstrap;
pub mod config;
