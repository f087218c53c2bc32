use cosmwasm_std::{OverflowError, StdError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Overflow(#[from] OverflowError),

    #[error("unauthorized: {reason}")]
    Unauthorized { reason: String },

    #[error("invalid hex input: {field}")]
    InvalidHex { field: String },

    #[error("invalid digest length: expected 32 bytes, got {got}")]
    InvalidDigestLength { got: usize },

    #[error("pool name must not be empty")]
    EmptyPoolName,

    #[error("population for pool {pool} must be greater than zero")]
    InvalidBound { pool: String },

    #[error("entropy decoding failed for pool {pool}: {reason}")]
    InvalidEntropy { pool: String, reason: String },

    #[error(
        "draw unavailable for pool {pool}: entropy exhausted before an index was accepted"
    )]
    DrawUnavailable { pool: String },

    #[error("no participant at offset {offset} for pool {pool}")]
    PopulationNotFound { pool: String, offset: u32 },

    #[error("no reward token for participant {participant} in pool {pool}")]
    TokenNotFound { pool: String, participant: String },

    #[error("accepted index does not fit the population width for pool {pool}")]
    IndexOutOfRange { pool: String },
}
