use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Decimal, Timestamp};
use cw_storage_plus::{Item, Map};

pub const CONFIG: Item<PoolConfig> = Item::new("config");

/// Entropy state per pool name. Created lazily on first mutating access,
/// never deleted.
pub const POOLS: Map<&str, EntropyState> = Map::new("pools");

/// Winner per pool name. Written at most once; once present it is
/// authoritative and later draws return it unchanged.
pub const WINNERS: Map<&str, DrawResult> = Map::new("winners");

#[cw_serde]
pub struct PoolConfig {
    pub admin: Addr,
    /// Addresses allowed to advance pools and trigger draws.
    pub operators: Vec<Addr>,
    /// Participant registry; may also advance pools (it does so on every
    /// registration) and is the population/token source at draw time.
    pub registry: Addr,
    /// Seed digest for new pools, 64 lowercase hex chars.
    pub init_digest: String,
    /// Seed value for the entropy counter of new pools.
    pub init_counter: Decimal,
    /// Added to the counter on every advance (estimated units of injected
    /// entropy per call). The counter is a progress indicator, not the
    /// randomness source.
    pub counter_increment: Decimal,
}

#[cw_serde]
pub struct EntropyState {
    /// Latest chained digest, 64 lowercase hex chars. Only ever produced by
    /// `fairdraw_common::chain::advance_digest`; no caller sets it directly.
    pub digest: String,
    /// Monotonic entropy counter.
    pub counter: Decimal,
    /// How many times the chain has been advanced.
    pub advances: u64,
    pub updated_at: Timestamp,
}

#[cw_serde]
pub struct DrawResult {
    /// The winner's reward token.
    pub token: String,
    pub participant: String,
    /// 0-based offset into the registration-ordered population.
    pub index: u32,
    /// Population size at draw time.
    pub population: u32,
    /// The digest the draw consumed, recorded so the selection can be
    /// replayed and audited.
    pub digest: String,
    pub drawn_at: Timestamp,
}
