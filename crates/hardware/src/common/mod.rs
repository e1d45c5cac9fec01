//! Common utilities and types shared across the simulator.
//!
//! This module provides the building blocks used by every other component:
//! 1. **Address Decoding:** Splitting flat addresses into offset, set index, and tag.
//! 2. **Error Handling:** Configuration and trace error types.

/// Address decomposition into offset/index/tag fields.
pub mod addr;

/// Error types for configuration and trace loading.
pub mod error;

pub use addr::{AddressDecoder, DecodedAddr};
pub use error::{ConfigError, TraceError};
