use cosmwasm_std::{entry_point, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult};
use cw2::set_contract_version;
use fairdraw_common::chain::DIGEST_BYTES;

use crate::error::ContractError;
use crate::execute;
use crate::msg::{ExecuteMsg, InstantiateMsg, QueryMsg};
use crate::query;
use crate::state::{PoolConfig, CONFIG};

const CONTRACT_NAME: &str = "crates.io:fairdraw-entropy-pool";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[entry_point]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    // The seed digest must decode to exactly 256 bits; a malformed seed
    // would make every later draw fail at entropy decoding.
    let seed_bytes = hex::decode(&msg.init_digest).map_err(|_| ContractError::InvalidHex {
        field: "init_digest".to_string(),
    })?;
    if seed_bytes.len() != DIGEST_BYTES {
        return Err(ContractError::InvalidDigestLength {
            got: seed_bytes.len(),
        });
    }

    let mut operators = Vec::new();
    for op in &msg.operators {
        operators.push(deps.api.addr_validate(op)?);
    }

    let config = PoolConfig {
        admin: info.sender.clone(),
        operators,
        registry: deps.api.addr_validate(&msg.registry)?,
        init_digest: msg.init_digest.to_lowercase(),
        init_counter: msg.init_counter,
        counter_increment: msg.counter_increment,
    };
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("contract", "entropy-pool")
        .add_attribute("admin", info.sender.to_string()))
}

#[entry_point]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Advance { pool } => execute::advance(deps, env, info, pool),
        ExecuteMsg::Draw { pool } => execute::draw(deps, env, info, pool),
        ExecuteMsg::UpdateOperators { add, remove } => {
            execute::update_operators(deps, env, info, add, remove)
        }
        ExecuteMsg::UpdateConfig {
            registry,
            counter_increment,
        } => execute::update_config(deps, env, info, registry, counter_increment),
    }
}

#[entry_point]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => query::query_config(deps),
        QueryMsg::Digest { pool } => query::query_digest(deps, pool),
        QueryMsg::Counter { pool } => query::query_counter(deps, pool),
        QueryMsg::PoolState { pool } => query::query_pool_state(deps, pool),
        QueryMsg::Winner { pool } => query::query_winner(deps, pool),
        QueryMsg::Winners { start_after, limit } => {
            query::query_winners(deps, start_after, limit)
        }
    }
}
