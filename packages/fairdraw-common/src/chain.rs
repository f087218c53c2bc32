use cosmwasm_std::{Timestamp, Uint256};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// Digests are 256-bit values, hex-encoded.
pub const DIGEST_BYTES: usize = 32;
pub const DIGEST_HEX_LEN: usize = DIGEST_BYTES * 2;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ChainError {
    #[error("digest is not valid hex")]
    InvalidHex,

    #[error("digest must be 32 bytes, got {got}")]
    InvalidLength { got: usize },
}

/// Fold one message into the hash chain.
///
/// `new_digest = HMAC-SHA256(key = previous_digest, msg = message)`, hex-encoded
/// lowercase. The key is the UTF-8 text of the previous digest's hex form, not
/// its decoded bytes: the chain is defined over the printable state, so two
/// implementations agree as long as they agree on the hex string.
pub fn advance_digest(previous_digest: &str, message: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(previous_digest.as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(message.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// The last six decimal digits of the wall-clock time in microseconds,
/// without zero-padding. This is the per-advance message: a fragment no
/// caller controls to the microsecond across the whole chain history.
pub fn timestamp_micros_part(time: Timestamp) -> String {
    ((time.nanos() / 1_000) % 1_000_000).to_string()
}

/// Interpret a hex digest as a big-endian 256-bit unsigned entropy source.
///
/// A failure here means the stored digest is corrupt, which is a bug in
/// whatever produced it, never a caller error.
pub fn digest_entropy(digest_hex: &str) -> Result<Uint256, ChainError> {
    let raw = hex::decode(digest_hex).map_err(|_| ChainError::InvalidHex)?;
    if raw.len() != DIGEST_BYTES {
        return Err(ChainError::InvalidLength { got: raw.len() });
    }
    let mut buf = [0u8; DIGEST_BYTES];
    buf.copy_from_slice(&raw);
    Ok(Uint256::from_be_bytes(buf))
}
