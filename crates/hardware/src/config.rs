//! Configuration system for the cache simulator.
//!
//! This module defines the configuration structures used to parameterize
//! the simulator. It provides:
//! 1. **Defaults:** Baseline geometry (8-way, 256 sets, 64-byte lines) and workload constants.
//! 2. **Structures:** Cache geometry and workload configuration.
//! 3. **Enums:** Victim selection mode.
//!
//! Configuration is supplied as JSON (`Config::from_file`) or built from `Config::default()`.
//! Geometry is fixed once a `Cache` is constructed.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::error::ConfigError;

/// Default configuration constants for the simulator.
///
/// These values define the baseline configuration when not explicitly
/// overridden in a JSON configuration file.
mod defaults {
    /// Default associativity (8 ways, 7 tree bits per set).
    pub const WAYS: usize = 8;

    /// Default number of sets (256, i.e. 8 index bits).
    pub const SETS: usize = 256;

    /// Default offset width (64-byte lines: 2 word-select bits + 4 word-offset bits).
    pub const OFFSET_BITS: u32 = 6;

    /// Default square matrix dimension for the matmul workload.
    pub const MATRIX_SIZE: usize = 32;

    /// Default matrix element width in bytes (32-bit words).
    pub const ELEMENT_BYTES: u64 = 4;

    /// Base address of the left operand matrix.
    pub const A_BASE: u64 = 0xFACE_00A0_0000_0000;

    /// Base address of the right operand matrix.
    pub const B_BASE: u64 = 0xFACE_00B0_0000_0000;

    /// Base address of the result matrix.
    pub const C_BASE: u64 = 0xFACE_00C0_0000_0000;
}

/// How a set chooses the way to fill on a miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum VictimSelection {
    /// Follow the Tree-PLRU bits unconditionally.
    ///
    /// Invalid ways receive no priority, so a valid line may be evicted while
    /// an empty way remains in the set. This is the bit-exact reference
    /// behavior.
    #[default]
    Tree,
    /// Fill the lowest-index invalid way before consulting the tree.
    ///
    /// Models the "use an invalid line" branch of a hardware controller.
    /// Identical to `Tree` once every way is valid.
    #[serde(alias = "InvalidWayFirst")]
    InvalidFirst,
}

/// Root configuration.
///
/// # Examples
///
/// ```
/// use plru_core::config::{Config, VictimSelection};
///
/// let json = r#"{
///     "cache": { "ways": 4, "sets": 64, "victim_selection": "InvalidFirst" },
///     "workload": { "matrix_size": 8 }
/// }"#;
///
/// let config = Config::from_json_str(json).unwrap();
/// assert_eq!(config.cache.ways, 4);
/// assert_eq!(config.cache.offset_bits, 6);
/// assert_eq!(config.cache.victim_selection, VictimSelection::InvalidFirst);
/// assert_eq!(config.workload.matrix_size, 8);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Cache geometry and replacement settings
    #[serde(default)]
    pub cache: CacheConfig,
    /// Synthetic workload parameters
    #[serde(default)]
    pub workload: WorkloadConfig,
}

impl Config {
    /// Parses a configuration from JSON text.
    ///
    /// Missing sections and fields take their defaults. The result is not
    /// validated; [`CacheConfig::validate`] runs when the cache is built.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the JSON is malformed or has
    /// fields of the wrong type.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read and
    /// [`ConfigError::Parse`] if its contents are malformed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }
}

/// Cache geometry configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CacheConfig {
    /// Associativity (number of ways per set)
    #[serde(default = "CacheConfig::default_ways")]
    pub ways: usize,

    /// Number of sets
    #[serde(default = "CacheConfig::default_sets")]
    pub sets: usize,

    /// Width of the line offset field in bits
    #[serde(default = "CacheConfig::default_offset_bits")]
    pub offset_bits: u32,

    /// Victim selection on a miss
    #[serde(default)]
    pub victim_selection: VictimSelection,
}

impl CacheConfig {
    /// Returns the default associativity.
    fn default_ways() -> usize {
        defaults::WAYS
    }

    /// Returns the default set count.
    fn default_sets() -> usize {
        defaults::SETS
    }

    /// Returns the default offset width.
    fn default_offset_bits() -> u32 {
        defaults::OFFSET_BITS
    }

    /// Number of index bits, `log2(sets)`.
    ///
    /// Only meaningful once [`Self::validate`] has accepted `sets`.
    pub const fn index_bits(&self) -> u32 {
        self.sets.trailing_zeros()
    }

    /// Checks that the geometry is simulatable.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::InvalidWays`] if `ways` is zero, not a power of two, or above 64.
    /// - [`ConfigError::InvalidSets`] if `sets` is zero or not a power of two.
    /// - [`ConfigError::AddressWidth`] if offset and index bits exceed 64.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.ways.is_power_of_two() || self.ways > 64 {
            return Err(ConfigError::InvalidWays(self.ways));
        }
        if !self.sets.is_power_of_two() {
            return Err(ConfigError::InvalidSets(self.sets));
        }
        if self.offset_bits.saturating_add(self.index_bits()) > u64::BITS {
            return Err(ConfigError::AddressWidth {
                offset_bits: self.offset_bits,
                index_bits: self.index_bits(),
            });
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    /// Creates the reference geometry: 8-way, 256 sets, 64-byte lines,
    /// literal Tree-PLRU victim selection.
    fn default() -> Self {
        Self {
            ways: defaults::WAYS,
            sets: defaults::SETS,
            offset_bits: defaults::OFFSET_BITS,
            victim_selection: VictimSelection::default(),
        }
    }
}

/// Matrix-multiply workload configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorkloadConfig {
    /// Square matrix dimension
    #[serde(default = "WorkloadConfig::default_matrix_size")]
    pub matrix_size: usize,

    /// Element width in bytes
    #[serde(default = "WorkloadConfig::default_element_bytes")]
    pub element_bytes: u64,

    /// Base address of the left operand
    #[serde(default = "WorkloadConfig::default_a_base")]
    pub a_base: u64,

    /// Base address of the right operand
    #[serde(default = "WorkloadConfig::default_b_base")]
    pub b_base: u64,

    /// Base address of the result
    #[serde(default = "WorkloadConfig::default_c_base")]
    pub c_base: u64,
}

impl WorkloadConfig {
    fn default_matrix_size() -> usize {
        defaults::MATRIX_SIZE
    }

    fn default_element_bytes() -> u64 {
        defaults::ELEMENT_BYTES
    }

    fn default_a_base() -> u64 {
        defaults::A_BASE
    }

    fn default_b_base() -> u64 {
        defaults::B_BASE
    }

    fn default_c_base() -> u64 {
        defaults::C_BASE
    }
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            matrix_size: defaults::MATRIX_SIZE,
            element_bytes: defaults::ELEMENT_BYTES,
            a_base: defaults::A_BASE,
            b_base: defaults::B_BASE,
            c_base: defaults::C_BASE,
        }
    }
}
