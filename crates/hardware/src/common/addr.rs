//! Address decomposition.
//!
//! A flat 64-bit address is split into three fixed-width fields:
//!
//! ```text
//!  63                    offset+index   offset      0
//! +---------------------+--------------+------------+
//! |         tag         |    index     |   offset   |
//! +---------------------+--------------+------------+
//! ```
//!
//! The fields always cover the whole address, so decoding cannot fail.

use crate::common::error::ConfigError;

/// Fields of a decoded address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DecodedAddr {
    /// Byte offset within the line.
    pub offset: u64,
    /// Set index.
    pub index: usize,
    /// Remaining high-order bits.
    pub tag: u64,
}

/// Splits addresses into `{offset, index, tag}` using fixed field widths.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddressDecoder {
    offset_bits: u32,
    index_bits: u32,
}

/// Low-bit mask of `bits` ones; saturates at a full word.
#[inline(always)]
const fn low_mask(bits: u32) -> u64 {
    if bits >= u64::BITS {
        u64::MAX
    } else {
        (1 << bits) - 1
    }
}

impl AddressDecoder {
    /// Creates a decoder for the given field widths.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::AddressWidth`] if `offset_bits + index_bits`
    /// exceeds 64.
    pub fn new(offset_bits: u32, index_bits: u32) -> Result<Self, ConfigError> {
        if offset_bits.saturating_add(index_bits) > u64::BITS {
            return Err(ConfigError::AddressWidth {
                offset_bits,
                index_bits,
            });
        }
        Ok(Self {
            offset_bits,
            index_bits,
        })
    }

    /// Width of the offset field.
    #[inline(always)]
    pub const fn offset_bits(&self) -> u32 {
        self.offset_bits
    }

    /// Width of the index field.
    #[inline(always)]
    pub const fn index_bits(&self) -> u32 {
        self.index_bits
    }

    /// Width of the tag field.
    #[inline(always)]
    pub const fn tag_bits(&self) -> u32 {
        u64::BITS - self.offset_bits - self.index_bits
    }

    /// Splits `addr` into its fields.
    #[inline]
    pub const fn decode(&self, addr: u64) -> DecodedAddr {
        let tag_shift = self.offset_bits + self.index_bits;
        DecodedAddr {
            offset: addr & low_mask(self.offset_bits),
            index: (shr(addr, self.offset_bits) & low_mask(self.index_bits)) as usize,
            tag: shr(addr, tag_shift),
        }
    }

    /// Builds an address from its fields; the inverse of [`Self::decode`].
    ///
    /// Bits of each field beyond its width are discarded.
    #[inline]
    pub const fn compose(&self, tag: u64, index: usize, offset: u64) -> u64 {
        let tag_shift = self.offset_bits + self.index_bits;
        shl(tag & low_mask(self.tag_bits()), tag_shift)
            | shl(index as u64 & low_mask(self.index_bits), self.offset_bits)
            | (offset & low_mask(self.offset_bits))
    }
}

/// Right shift that yields zero instead of overflowing at 64.
#[inline(always)]
const fn shr(value: u64, bits: u32) -> u64 {
    match value.checked_shr(bits) {
        Some(v) => v,
        None => 0,
    }
}

/// Left shift that yields zero instead of overflowing at 64.
#[inline(always)]
const fn shl(value: u64, bits: u32) -> u64 {
    match value.checked_shl(bits) {
        Some(v) => v,
        None => 0,
    }
}
