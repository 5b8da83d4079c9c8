//! Tap-tempo metronome firmware library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod api;
pub mod app;
pub mod config;
pub mod metronome;
pub mod pins;

// ESPidf-only code lives behind cfg attributes inside these modules so
// the crate still compiles for host-side tests.
pub mod adapters;
pub mod drivers;
