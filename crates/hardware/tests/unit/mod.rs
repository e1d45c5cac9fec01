//! # Unit Components
//!
//! Groups the unit tests by simulator component: address decoding, the
//! Tree-PLRU encoding and cache, configuration, statistics, and drivers.
