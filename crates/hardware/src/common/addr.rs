//! Address decomposition.
//!
//! A 64-bit address is split into three fields, high to low:
//!
//! ```text
//! | tag (64 - s - b bits) | set index (s bits) | block offset (b bits) |
//! ```
//!
//! The block offset is discarded; the model never looks inside a line.

/// Width of a trace address in bits.
pub const ADDRESS_BITS: u32 = u64::BITS;

/// An address split into its set index and tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DecodedAddr {
    /// Index of the set the address maps to, in `[0, 2^s - 1]`.
    pub set_index: u64,
    /// High-order bits identifying the block within its set.
    pub tag: u64,
}

/// Splits `address` into set index and tag.
///
/// Computes `tag = address >> (s + b)` and `set_index = (address >> b) & ((1 << s) - 1)`.
/// Shifts by the full address width yield zero instead of overflowing, so
/// `s + b == 64` gives a tag of 0 and `s == 0` always selects set 0.
///
/// # Arguments
///
/// * `address` - The raw 64-bit address.
/// * `set_index_bits` - Number of set index bits (`s`).
/// * `block_offset_bits` - Number of block offset bits (`b`).
#[inline]
pub const fn decode(address: u64, set_index_bits: u32, block_offset_bits: u32) -> DecodedAddr {
    let tag = shr(address, set_index_bits.saturating_add(block_offset_bits));
    let set_index = shr(address, block_offset_bits) & low_mask(set_index_bits);
    DecodedAddr { set_index, tag }
}

/// Mask with the low `bits` bits set.
#[inline]
const fn low_mask(bits: u32) -> u64 {
    if bits == 0 {
        0
    } else if bits >= ADDRESS_BITS {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

#[inline]
const fn shr(value: u64, amount: u32) -> u64 {
    if amount >= ADDRESS_BITS {
        0
    } else {
        value >> amount
    }
}
