use cosmwasm_std::{
    to_json_binary, Addr, DepsMut, Env, Event, MessageInfo, QueryRequest, Response, Storage,
    Uint256, WasmQuery,
};
use fairdraw_common::chain::{advance_digest, digest_entropy, timestamp_micros_part};
use fairdraw_common::sampler::{fair_index, SampleError};

use crate::error::ContractError;
use crate::msg::{ParticipantResponse, RegistryQueryMsg};
use crate::state::{DrawResult, EntropyState, PoolConfig, CONFIG, POOLS, WINNERS};

/// Load a pool's entropy state, seeding it from config on first access.
/// Runs inside a serialized execute call, so first accesses cannot race.
fn load_or_seed(
    storage: &mut dyn Storage,
    config: &PoolConfig,
    env: &Env,
    pool: &str,
) -> Result<EntropyState, ContractError> {
    if let Some(state) = POOLS.may_load(storage, pool)? {
        return Ok(state);
    }
    let state = EntropyState {
        digest: config.init_digest.clone(),
        counter: config.init_counter,
        advances: 0,
        updated_at: env.block.time,
    };
    POOLS.save(storage, pool, &state)?;
    Ok(state)
}

fn ensure_feeder(config: &PoolConfig, sender: &Addr) -> Result<(), ContractError> {
    if config.operators.contains(sender) || *sender == config.registry {
        return Ok(());
    }
    Err(ContractError::Unauthorized {
        reason: "only operators or the registry can advance a pool".to_string(),
    })
}

fn ensure_operator(config: &PoolConfig, sender: &Addr) -> Result<(), ContractError> {
    if config.operators.contains(sender) {
        return Ok(());
    }
    Err(ContractError::Unauthorized {
        reason: "only operators can draw a winner".to_string(),
    })
}

fn ensure_pool_name(pool: &str) -> Result<(), ContractError> {
    if pool.is_empty() {
        return Err(ContractError::EmptyPoolName);
    }
    Ok(())
}

/// Fold fresh timestamp material into the pool's hash chain.
///
/// The message is the last six decimal digits of the block time in
/// microseconds: no caller controls it to that granularity, so forcing the
/// digest to a chosen value would require controlling the exact invocation
/// time of every advance in the chain's history. Digest and counter are
/// persisted together; the runtime reverts both on failure.
pub fn advance(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    pool: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    ensure_feeder(&config, &info.sender)?;
    ensure_pool_name(&pool)?;

    let mut state = load_or_seed(deps.storage, &config, &env, &pool)?;

    let message = timestamp_micros_part(env.block.time);
    state.digest = advance_digest(&state.digest, &message);
    state.counter = state.counter.checked_add(config.counter_increment)?;
    state.advances = state.advances.saturating_add(1);
    state.updated_at = env.block.time;
    POOLS.save(deps.storage, &pool, &state)?;

    Ok(Response::new()
        .add_attribute("action", "advance")
        .add_attribute("pool", &pool)
        .add_event(
            Event::new("fairdraw_entropy_advanced")
                .add_attribute("pool", &pool)
                .add_attribute("digest", &state.digest)
                .add_attribute("counter", state.counter.to_string())
                .add_attribute("advances", state.advances.to_string()),
        ))
}

/// Select the winner for a pool, exactly once.
///
/// 1. Cache check: a recorded winner is returned as-is, no re-sampling.
/// 2. Read the population size from the registry.
/// 3. Interpret the pool digest as a 256-bit entropy source.
/// 4. Rejection-sample an unbiased index; exhausted entropy surfaces as
///    `DrawUnavailable` rather than any biased fallback.
/// 5. Resolve the index to a participant in registration order.
/// 6. Resolve the participant to their reward token.
/// 7. Record the result.
///
/// All seven steps run inside one serialized, transactional execute call, so
/// two concurrent first draws cannot both sample: the index is computed
/// exactly once per pool.
pub fn draw(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    pool: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    ensure_operator(&config, &info.sender)?;
    ensure_pool_name(&pool)?;

    if let Some(result) = WINNERS.may_load(deps.storage, &pool)? {
        return Ok(Response::new()
            .add_attribute("action", "draw")
            .add_attribute("pool", &pool)
            .add_attribute("cached", "true")
            .add_attribute("token", result.token));
    }

    let population: u32 = deps.querier.query(&QueryRequest::Wasm(WasmQuery::Smart {
        contract_addr: config.registry.to_string(),
        msg: to_json_binary(&RegistryQueryMsg::Count {
            event: pool.clone(),
        })?,
    }))?;

    let state = load_or_seed(deps.storage, &config, &env, &pool)?;
    let entropy = digest_entropy(&state.digest).map_err(|err| ContractError::InvalidEntropy {
        pool: pool.clone(),
        reason: err.to_string(),
    })?;

    let index = match fair_index(Uint256::from(population), entropy) {
        Ok(Some(index)) => index,
        Ok(None) => return Err(ContractError::DrawUnavailable { pool }),
        Err(SampleError::InvalidBound) => return Err(ContractError::InvalidBound { pool }),
    };
    let offset = index_to_offset(index, &pool)?;

    let participant: Option<ParticipantResponse> =
        deps.querier.query(&QueryRequest::Wasm(WasmQuery::Smart {
            contract_addr: config.registry.to_string(),
            msg: to_json_binary(&RegistryQueryMsg::ParticipantAt {
                event: pool.clone(),
                offset,
            })?,
        }))?;
    let participant = participant.ok_or_else(|| ContractError::PopulationNotFound {
        pool: pool.clone(),
        offset,
    })?;

    let token: Option<String> = deps.querier.query(&QueryRequest::Wasm(WasmQuery::Smart {
        contract_addr: config.registry.to_string(),
        msg: to_json_binary(&RegistryQueryMsg::TokenOf {
            event: pool.clone(),
            participant: participant.id.clone(),
        })?,
    }))?;
    let token = token.ok_or_else(|| ContractError::TokenNotFound {
        pool: pool.clone(),
        participant: participant.id.clone(),
    })?;

    let result = DrawResult {
        token: token.clone(),
        participant: participant.id.clone(),
        index: offset,
        population,
        digest: state.digest.clone(),
        drawn_at: env.block.time,
    };
    WINNERS.save(deps.storage, &pool, &result)?;

    Ok(Response::new()
        .add_attribute("action", "draw")
        .add_attribute("pool", &pool)
        .add_attribute("cached", "false")
        .add_attribute("token", &token)
        .add_event(
            Event::new("fairdraw_winner_drawn")
                .add_attribute("pool", &pool)
                .add_attribute("index", offset.to_string())
                .add_attribute("population", population.to_string())
                .add_attribute("digest", &state.digest)
                .add_attribute("participant", &participant.id)
                .add_attribute("token", &token),
        ))
}

/// An accepted index is below the population and the population is a `u32`,
/// so this cannot fail; the error variant stands in for an unwrap.
fn index_to_offset(index: Uint256, pool: &str) -> Result<u32, ContractError> {
    let bytes = index.to_be_bytes();
    if bytes[..28].iter().any(|b| *b != 0) {
        return Err(ContractError::IndexOutOfRange {
            pool: pool.to_string(),
        });
    }
    let mut low = [0u8; 4];
    low.copy_from_slice(&bytes[28..]);
    Ok(u32::from_be_bytes(low))
}

/// Update operator list (admin only).
pub fn update_operators(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    add: Vec<String>,
    remove: Vec<String>,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized {
            reason: "only admin can update operators".to_string(),
        });
    }

    for addr in remove {
        let addr = deps.api.addr_validate(&addr)?;
        config.operators.retain(|op| *op != addr);
    }
    for addr in add {
        let addr = deps.api.addr_validate(&addr)?;
        if !config.operators.contains(&addr) {
            config.operators.push(addr);
        }
    }

    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "update_operators")
        .add_attribute("operators", config.operators.len().to_string()))
}

/// Update configuration (admin only). Seed values stay fixed for the life of
/// the contract so recorded chains remain replayable.
pub fn update_config(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    registry: Option<String>,
    counter_increment: Option<cosmwasm_std::Decimal>,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized {
            reason: "only admin can update config".to_string(),
        });
    }

    if let Some(registry) = registry {
        config.registry = deps.api.addr_validate(&registry)?;
    }
    if let Some(increment) = counter_increment {
        config.counter_increment = increment;
    }

    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new().add_attribute("action", "update_config"))
}
