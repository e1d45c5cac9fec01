//! Error definitions.
//!
//! This module defines the error types surfaced by the simulator. It provides:
//! 1. **Configuration Errors:** Rejected cache geometries and unreadable config files.
//! 2. **Trace Errors:** Malformed or unreadable address traces.
//!
//! Neither error can occur mid-access: a `Cache` that fails validation is never
//! constructed, and a trace is fully parsed before it is replayed.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building or loading a cache configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Associativity has no Tree-PLRU encoding.
    ///
    /// The width must be a power of two between 1 and 64 so that the
    /// `ways - 1` tree bits fit a `u64` state word.
    #[error("invalid associativity {0}: ways must be a power of two in 1..=64")]
    InvalidWays(usize),

    /// Set count cannot be addressed by a whole number of index bits.
    #[error("invalid set count {0}: sets must be a non-zero power of two")]
    InvalidSets(usize),

    /// Offset and index fields do not fit in a 64-bit address.
    #[error("address fields overflow 64 bits: offset {offset_bits} + index {index_bits}")]
    AddressWidth {
        /// Width of the line offset field.
        offset_bits: u32,
        /// Width of the set index field.
        index_bits: u32,
    },

    /// Configuration JSON could not be deserialized.
    #[error("malformed configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// Configuration file could not be read.
    #[error("cannot read configuration {}: {source}", path.display())]
    Io {
        /// File that failed to open.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
}

/// Errors raised while reading an address trace.
#[derive(Debug, Error)]
pub enum TraceError {
    /// A line is neither blank, a comment, nor an address.
    #[error("line {line}: cannot parse address {text:?}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// Offending text, trimmed.
        text: String,
    },

    /// Trace source could not be read.
    #[error("cannot read trace: {0}")]
    Io(#[from] io::Error),
}
