use cosmwasm_schema::{cw_serde, QueryResponses};

use crate::state::{Participant, RegistryConfig};

#[cw_serde]
pub struct InstantiateMsg {
    pub registrars: Vec<String>,
    pub entropy_pool: String,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Append a participant to an event's draw population and record their
    /// reward token. Registrar only. Also advances the event's entropy pool.
    Register {
        event: String,
        participant: String,
        token: String,
    },
    /// Update registrar list (admin only).
    UpdateRegistrars {
        add: Vec<String>,
        remove: Vec<String>,
    },
    /// Update configuration (admin only).
    UpdateConfig { entropy_pool: Option<String> },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(RegistryConfig)]
    Config {},

    /// Population size of an event.
    #[returns(u32)]
    Count { event: String },

    /// Participant at a 0-based offset in registration order.
    #[returns(Option<Participant>)]
    ParticipantAt { event: String, offset: u32 },

    /// Reward token of a participant.
    #[returns(Option<String>)]
    TokenOf { event: String, participant: String },

    #[returns(ParticipantsResponse)]
    Participants {
        event: String,
        start_after: Option<u32>,
        limit: Option<u32>,
    },
}

#[cw_serde]
pub struct ParticipantsResponse {
    pub participants: Vec<Participant>,
}

/// Message this contract sends to the entropy pool on each registration.
/// Mirrors the pool contract's `ExecuteMsg::Advance` variant.
#[cw_serde]
pub enum PoolExecuteMsg {
    Advance { pool: String },
}
