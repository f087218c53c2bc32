use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Decimal, Timestamp};

use crate::state::{DrawResult, EntropyState, PoolConfig};

#[cw_serde]
pub struct InstantiateMsg {
    pub operators: Vec<String>,
    pub registry: String,
    /// Seed digest for new pools, 64 hex chars (a 256-bit value).
    pub init_digest: String,
    pub init_counter: Decimal,
    pub counter_increment: Decimal,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Fold fresh timestamp material into a pool's hash chain. Called by an
    /// operator or by the registry on each qualifying event.
    Advance { pool: String },
    /// Select the winner for a pool. Operator only, idempotent: the first
    /// successful selection is cached and returned by every later call.
    Draw { pool: String },
    /// Update operator list (admin only).
    UpdateOperators {
        add: Vec<String>,
        remove: Vec<String>,
    },
    /// Update configuration (admin only). The seed digest and seed counter
    /// are deliberately not updatable: changing them would break
    /// replayability of existing chains.
    UpdateConfig {
        registry: Option<String>,
        counter_increment: Option<Decimal>,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(PoolConfig)]
    Config {},

    /// Current digest of a pool; the configured seed if the pool has never
    /// been advanced.
    #[returns(String)]
    Digest { pool: String },

    /// Current entropy counter of a pool; the configured seed if the pool
    /// has never been advanced.
    #[returns(Decimal)]
    Counter { pool: String },

    #[returns(Option<EntropyState>)]
    PoolState { pool: String },

    #[returns(Option<DrawResult>)]
    Winner { pool: String },

    #[returns(WinnersResponse)]
    Winners {
        start_after: Option<String>,
        limit: Option<u32>,
    },
}

#[cw_serde]
pub struct WinnersResponse {
    pub winners: Vec<WinnerEntry>,
}

#[cw_serde]
pub struct WinnerEntry {
    pub pool: String,
    pub result: DrawResult,
}

/// Queries this contract sends to the registry at draw time.
/// Mirrors the registry contract's `QueryMsg` variants.
#[cw_serde]
pub enum RegistryQueryMsg {
    Count { event: String },
    ParticipantAt { event: String, offset: u32 },
    TokenOf { event: String, participant: String },
}

/// Mirrors the registry contract's `Participant` struct.
#[cw_serde]
pub struct ParticipantResponse {
    pub id: String,
    pub seq: u32,
    pub registered_at: Timestamp,
}
