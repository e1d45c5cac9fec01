//! Tree-PLRU cache simulator library.
//!
//! This crate models the replacement logic of a set-associative cache with
//! the following:
//! 1. **Encoding:** Tree-PLRU masks, match values, and next values generated for any power-of-two associativity.
//! 2. **Cache:** Sets of valid/tag way metadata with bit-exact hit and miss state transitions.
//! 3. **Addressing:** Fixed-width offset/index/tag decoding.
//! 4. **Simulation:** Configuration, statistics, a matrix-multiply workload, and trace replay.

/// Cache, sets, and the Tree-PLRU encoding.
pub mod cache;
/// Common types (address decoding, errors).
pub mod common;
/// Simulator configuration (defaults, geometry, workload).
pub mod config;
/// Workload drivers, trace parsing, and the simulator.
pub mod sim;
/// Hit/miss statistics.
pub mod stats;

/// Main cache type; construct with `Cache::new`.
pub use crate::cache::Cache;
/// Root configuration type; use `Config::default()` or `Config::from_file`.
pub use crate::config::Config;
/// Top-level simulator; construct with `Simulator::new`.
pub use crate::sim::Simulator;
