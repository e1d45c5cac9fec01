//! Simulation drivers.
//!
//! Provides the address sources fed through the cache (a synthetic
//! matrix-multiply workload and text traces) and the `Simulator` that
//! replays them.

/// Simulator owning the cache and its configuration.
pub mod simulator;

/// Address trace file parsing.
pub mod trace;

/// Synthetic matrix-multiply address stream.
pub mod workload;

pub use simulator::Simulator;
pub use workload::MatMul;
