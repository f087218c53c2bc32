use cosmwasm_std::{to_json_binary, Binary, Deps, Order, StdResult};
use cw_storage_plus::Bound;

use crate::msg::ParticipantsResponse;
use crate::state::{CONFIG, COUNTS, PARTICIPANTS, TOKENS};

pub fn query_config(deps: Deps) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    to_json_binary(&config)
}

pub fn query_count(deps: Deps, event: String) -> StdResult<Binary> {
    let count = COUNTS.may_load(deps.storage, &event)?.unwrap_or(0);
    to_json_binary(&count)
}

pub fn query_participant_at(deps: Deps, event: String, offset: u32) -> StdResult<Binary> {
    let participant = PARTICIPANTS.may_load(deps.storage, (&event, offset))?;
    to_json_binary(&participant)
}

pub fn query_token_of(deps: Deps, event: String, participant: String) -> StdResult<Binary> {
    let token = TOKENS.may_load(deps.storage, (&event, &participant))?;
    to_json_binary(&token)
}

pub fn query_participants(
    deps: Deps,
    event: String,
    start_after: Option<u32>,
    limit: Option<u32>,
) -> StdResult<Binary> {
    let limit = limit.unwrap_or(20).min(100) as usize;
    let start = start_after.map(Bound::exclusive);

    // A corrupt entry must fail the listing, not vanish from it.
    let participants = PARTICIPANTS
        .prefix(&event)
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| item.map(|(_, participant)| participant))
        .collect::<StdResult<Vec<_>>>()?;

    to_json_binary(&ParticipantsResponse { participants })
}
