use cosmwasm_std::{entry_point, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::execute;
use crate::msg::{ExecuteMsg, InstantiateMsg, QueryMsg};
use crate::query;
use crate::state::{RegistryConfig, CONFIG};

const CONTRACT_NAME: &str = "crates.io:fairdraw-registry";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[entry_point]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let mut registrars = Vec::new();
    for addr in &msg.registrars {
        registrars.push(deps.api.addr_validate(addr)?);
    }

    let config = RegistryConfig {
        admin: info.sender.clone(),
        registrars,
        entropy_pool: deps.api.addr_validate(&msg.entropy_pool)?,
    };
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("contract", "registry")
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
        ExecuteMsg::Register {
            event,
            participant,
            token,
        } => execute::register(deps, env, info, event, participant, token),
        ExecuteMsg::UpdateRegistrars { add, remove } => {
            execute::update_registrars(deps, env, info, add, remove)
        }
        ExecuteMsg::UpdateConfig { entropy_pool } => {
            execute::update_config(deps, env, info, entropy_pool)
        }
    }
}

#[entry_point]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => query::query_config(deps),
        QueryMsg::Count { event } => query::query_count(deps, event),
        QueryMsg::ParticipantAt { event, offset } => {
            query::query_participant_at(deps, event, offset)
        }
        QueryMsg::TokenOf { event, participant } => {
            query::query_token_of(deps, event, participant)
        }
        QueryMsg::Participants {
            event,
            start_after,
            limit,
        } => query::query_participants(deps, event, start_after, limit),
    }
}
