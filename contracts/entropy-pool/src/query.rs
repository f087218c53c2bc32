use cosmwasm_std::{to_json_binary, Binary, Deps, Order, StdResult};
use cw_storage_plus::Bound;

use crate::msg::{WinnerEntry, WinnersResponse};
use crate::state::{CONFIG, POOLS, WINNERS};

pub fn query_config(deps: Deps) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    to_json_binary(&config)
}

/// Digest of a pool. An unseeded pool answers with the configured seed: the
/// value it would hold after lazy initialization, which only a mutating call
/// may persist.
pub fn query_digest(deps: Deps, pool: String) -> StdResult<Binary> {
    let digest = match POOLS.may_load(deps.storage, &pool)? {
        Some(state) => state.digest,
        None => CONFIG.load(deps.storage)?.init_digest,
    };
    to_json_binary(&digest)
}

pub fn query_counter(deps: Deps, pool: String) -> StdResult<Binary> {
    let counter = match POOLS.may_load(deps.storage, &pool)? {
        Some(state) => state.counter,
        None => CONFIG.load(deps.storage)?.init_counter,
    };
    to_json_binary(&counter)
}

pub fn query_pool_state(deps: Deps, pool: String) -> StdResult<Binary> {
    let state = POOLS.may_load(deps.storage, &pool)?;
    to_json_binary(&state)
}

pub fn query_winner(deps: Deps, pool: String) -> StdResult<Binary> {
    let winner = WINNERS.may_load(deps.storage, &pool)?;
    to_json_binary(&winner)
}

pub fn query_winners(
    deps: Deps,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<Binary> {
    let limit = limit.unwrap_or(20).min(100) as usize;
    let start = start_after.as_deref().map(Bound::exclusive);

    // A corrupt entry must fail the listing, not vanish from it.
    let winners = WINNERS
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| item.map(|(pool, result)| WinnerEntry { pool, result }))
        .collect::<StdResult<Vec<_>>>()?;

    to_json_binary(&WinnersResponse { winners })
}
