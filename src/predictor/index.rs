//! Index hashing shared by the history-indexed counter tables.

/// Prime multiplier folding the upper history bits across the index.
const HIST_FOLD_PRIME: usize = 7919;

/// Multipliers mixing shifted address and history bits into the low index
/// bits.
const ADDR_MIX: usize = 31;
const HIST_MIX: usize = 13;

/// Hash a branch address and a history value into a `table_bits`-wide index.
///
/// Deterministic, and always below `2^table_bits`. Address bits carry the
/// spatial component and history bits the temporal one; XORing each with a
/// shifted copy of itself breaks the linear correlation between nearby
/// addresses and similar histories. Widths are expected to be validated at
/// predictor construction (nonzero, below the machine word).
pub fn compute_index(
    address: usize,
    history: usize,
    table_bits: usize,
    history_length: usize,
) -> usize {
    let mut index = address ^ (address >> (table_bits / 2));
    index ^= history ^ (history << (table_bits / 3));
    index ^= (history >> (history_length / 2)).wrapping_mul(HIST_FOLD_PRIME);
    index ^= (address >> (table_bits / 2)).wrapping_mul(ADDR_MIX)
        ^ (history >> (history_length / 3)).wrapping_mul(HIST_MIX);
    index & ((1 << table_bits) - 1)
}
