//! ShowerWatch library.
//!
//! Shower detection from a boolean hot-water-tap signal, with an optional
//! cold-shot alert that briefly cuts hot water when a shower runs long.
//!
//! Exposes the pure-logic modules for integration testing.  All
//! ESP-IDF-specific code is guarded by `#[cfg(target_os = "espidf")]`
//! within each module.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod error;
pub mod fsm;
pub mod pins;
