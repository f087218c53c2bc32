use cosmwasm_std::Uint256;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SampleError {
    #[error("exclusive upper bound must be greater than zero")]
    InvalidBound,
}

/// Draw a uniformly distributed index in `[0, exclusive_upper_bound)` from a
/// finite entropy source via rejection sampling.
///
/// Candidates are the low `k` bits of the remaining entropy, where `k` is the
/// bit length of `bound - 1` (the smallest power-of-two superset of the
/// range). A candidate `>= bound` is discarded together with its `k` bits and
/// the next `k` bits are tried. Every accepted outcome therefore carries
/// identical probability mass; there is no modulo reduction and no bias.
///
/// Returns `Ok(None)` when the entropy runs out before a candidate is
/// accepted. Callers must surface that as "try again once more entropy has
/// accrued", never substitute another randomness source.
///
/// Pure and deterministic: identical inputs always yield identical output.
pub fn fair_index(
    exclusive_upper_bound: Uint256,
    entropy: Uint256,
) -> Result<Option<Uint256>, SampleError> {
    if exclusive_upper_bound.is_zero() {
        return Err(SampleError::InvalidBound);
    }
    if exclusive_upper_bound == Uint256::one() {
        // Degenerate range: no entropy consumed.
        return Ok(Some(Uint256::zero()));
    }

    let k = bit_length(exclusive_upper_bound - Uint256::one());

    let mut remaining = entropy;
    while !remaining.is_zero() {
        let candidate = low_bits(remaining, k);
        if candidate < exclusive_upper_bound {
            return Ok(Some(candidate));
        }
        remaining = drop_bits(remaining, k);
    }
    Ok(None)
}

/// Number of bits needed to represent `v`; zero for zero.
fn bit_length(mut v: Uint256) -> u32 {
    let mut bits = 0u32;
    while !v.is_zero() {
        v = v >> 1u32;
        bits += 1;
    }
    bits
}

/// The low `k` bits of `v`. `k` may be 256 when the bound occupies the whole
/// entropy width; a plain shift would overflow there.
fn low_bits(v: Uint256, k: u32) -> Uint256 {
    if k >= 256 {
        v
    } else {
        v % (Uint256::one() << k)
    }
}

/// `v` with its low `k` bits discarded.
fn drop_bits(v: Uint256, k: u32) -> Uint256 {
    if k >= 256 {
        Uint256::zero()
    } else {
        v >> k
    }
}
