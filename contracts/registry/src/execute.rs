use cosmwasm_std::{
    to_json_binary, DepsMut, Env, Event, MessageInfo, Response, WasmMsg,
};

use crate::error::ContractError;
use crate::msg::PoolExecuteMsg;
use crate::state::{Participant, CONFIG, COUNTS, PARTICIPANTS, SEQS, TOKENS};

fn ensure_nonempty(field: &str, value: &str) -> Result<(), ContractError> {
    if value.is_empty() {
        return Err(ContractError::EmptyField {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Append a participant to an event's draw population.
///
/// Sequence numbers are handed out from the running count, so the stored
/// order is registration order and never changes afterwards. The entropy
/// pool is advanced in the same transaction: every registration is a
/// qualifying event that folds fresh material into the chain.
pub fn register(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    event: String,
    participant: String,
    token: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if !config.registrars.contains(&info.sender) {
        return Err(ContractError::Unauthorized {
            reason: "only registrars can register participants".to_string(),
        });
    }

    ensure_nonempty("event", &event)?;
    ensure_nonempty("participant", &participant)?;
    ensure_nonempty("token", &token)?;

    if SEQS.has(deps.storage, (&event, &participant)) {
        return Err(ContractError::AlreadyRegistered { event, participant });
    }

    let seq = COUNTS.may_load(deps.storage, &event)?.unwrap_or(0);
    let record = Participant {
        id: participant.clone(),
        seq,
        registered_at: env.block.time,
    };
    PARTICIPANTS.save(deps.storage, (&event, seq), &record)?;
    SEQS.save(deps.storage, (&event, &participant), &seq)?;
    TOKENS.save(deps.storage, (&event, &participant), &token)?;
    COUNTS.save(deps.storage, &event, &(seq + 1))?;

    let advance_msg = WasmMsg::Execute {
        contract_addr: config.entropy_pool.to_string(),
        msg: to_json_binary(&PoolExecuteMsg::Advance {
            pool: event.clone(),
        })?,
        funds: vec![],
    };

    Ok(Response::new()
        .add_message(advance_msg)
        .add_attribute("action", "register")
        .add_attribute("event", &event)
        .add_attribute("participant", &participant)
        .add_event(
            Event::new("fairdraw_participant_registered")
                .add_attribute("event", &event)
                .add_attribute("participant", &participant)
                .add_attribute("seq", seq.to_string())
                .add_attribute("count", (seq + 1).to_string()),
        ))
}

/// Update registrar list (admin only).
pub fn update_registrars(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    add: Vec<String>,
    remove: Vec<String>,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized {
            reason: "only admin can update registrars".to_string(),
        });
    }

    for addr in remove {
        let addr = deps.api.addr_validate(&addr)?;
        config.registrars.retain(|r| *r != addr);
    }
    for addr in add {
        let addr = deps.api.addr_validate(&addr)?;
        if !config.registrars.contains(&addr) {
            config.registrars.push(addr);
        }
    }

    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "update_registrars")
        .add_attribute("registrars", config.registrars.len().to_string()))
}

/// Update configuration (admin only).
pub fn update_config(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    entropy_pool: Option<String>,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized {
            reason: "only admin can update config".to_string(),
        });
    }

    if let Some(pool) = entropy_pool {
        config.entropy_pool = deps.api.addr_validate(&pool)?;
    }

    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new().add_attribute("action", "update_config"))
}
