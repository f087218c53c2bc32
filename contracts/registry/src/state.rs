use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Timestamp};
use cw_storage_plus::{Item, Map};

pub const CONFIG: Item<RegistryConfig> = Item::new("config");

/// Population size per event name.
pub const COUNTS: Map<&str, u32> = Map::new("counts");

/// (event, seq) -> participant. Sequence numbers are assigned from the count
/// at registration time and entries are never removed, so iteration order is
/// registration order, forever. Draws depend on that stability.
pub const PARTICIPANTS: Map<(&str, u32), Participant> = Map::new("participants");

/// (event, participant id) -> seq, for duplicate detection.
pub const SEQS: Map<(&str, &str), u32> = Map::new("seqs");

/// (event, participant id) -> reward token.
pub const TOKENS: Map<(&str, &str), String> = Map::new("tokens");

#[cw_serde]
pub struct RegistryConfig {
    pub admin: Addr,
    /// Addresses allowed to register participants (the application backend,
    /// after it has validated the human behind the request).
    pub registrars: Vec<Addr>,
    /// Entropy pool contract, advanced on every registration.
    pub entropy_pool: Addr,
}

#[cw_serde]
pub struct Participant {
    /// Opaque participant identifier.
    pub id: String,
    /// 0-based registration order within the event.
    pub seq: u32,
    pub registered_at: Timestamp,
}
