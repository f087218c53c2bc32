//! Integration tests for the FairDraw contracts.
//!
//! These tests exercise the contract entry points directly using
//! `cosmwasm_std::testing` mocks. Each contract is tested via its
//! `instantiate` / `execute` / `query` entry points.
//!
//! For cross-contract interactions (the entropy pool querying the registry
//! at draw time), we route the pool's wasm queries to a live registry
//! instance using `MockQuerier::update_wasm`. Registration-triggered
//! advances are delivered by hand: the mocks do not dispatch submessages,
//! so the `Advance` message the registry emits is executed against the pool
//! explicitly, with the registry as sender.
//!
//! Run:
//! ```bash
//! cargo test -p fairdraw-integration-tests
//! ```

use cosmwasm_std::testing::{message_info, mock_dependencies, mock_env, MockApi, MockQuerier};
use cosmwasm_std::{
    from_json, ContractResult, CosmosMsg, Decimal, OwnedDeps, SystemResult, Uint256, WasmMsg,
    WasmQuery,
};

use fairdraw_common::chain::{advance_digest, digest_entropy};
use fairdraw_common::sampler::fair_index;

// ─── Constants ───

const ZERO_SEED: &str = "0000000000000000000000000000000000000000000000000000000000000000";

/// Pool name doubles as the registry event name.
const POOL: &str = "launch-raffle";

/// Digest after one advance from the zero seed at the default mock_env block
/// time (message "879305").
const DIGEST_AFTER_1: &str = "c37995d03f2586729997ad80f1581328d67590ec281941d4da3c04ccbfb338c7";

/// Digest after three such advances.
const DIGEST_AFTER_3: &str = "9fde123742d6d955881a3c039a3da46d277b4052a94bee3c4fd623f525f3b006";

type MockDeps = OwnedDeps<cosmwasm_std::MemoryStorage, MockApi, MockQuerier>;

// ─── Registry helpers ───

fn setup_registry(deps: &mut MockDeps) {
    let admin = deps.api.addr_make("admin");
    let msg = fairdraw_registry::msg::InstantiateMsg {
        registrars: vec![deps.api.addr_make("registrar").to_string()],
        entropy_pool: deps.api.addr_make("entropy-pool").to_string(),
    };
    let info = message_info(&admin, &[]);
    fairdraw_registry::contract::instantiate(deps.as_mut(), mock_env(), info, msg).unwrap();
}

fn register(deps: &mut MockDeps, participant: &str, token: &str) -> cosmwasm_std::Response {
    let registrar = deps.api.addr_make("registrar");
    let info = message_info(&registrar, &[]);
    fairdraw_registry::contract::execute(
        deps.as_mut(),
        mock_env(),
        info,
        fairdraw_registry::msg::ExecuteMsg::Register {
            event: POOL.to_string(),
            participant: participant.to_string(),
            token: token.to_string(),
        },
    )
    .unwrap()
}

// ─── Pool helpers ───

fn setup_pool(deps: &mut MockDeps) {
    let admin = deps.api.addr_make("admin");
    let msg = fairdraw_entropy_pool::msg::InstantiateMsg {
        operators: vec![deps.api.addr_make("operator").to_string()],
        registry: deps.api.addr_make("registry").to_string(),
        init_digest: ZERO_SEED.to_string(),
        init_counter: Decimal::zero(),
        counter_increment: Decimal::percent(250),
    };
    let info = message_info(&admin, &[]);
    fairdraw_entropy_pool::contract::instantiate(deps.as_mut(), mock_env(), info, msg).unwrap();
}

/// Deliver the registration-triggered advance: execute `Advance` on the pool
/// with the registry as sender, the way the chain would after dispatching
/// the registry's `WasmMsg`.
fn advance_as_registry(deps: &mut MockDeps) {
    let registry = deps.api.addr_make("registry");
    let info = message_info(&registry, &[]);
    fairdraw_entropy_pool::contract::execute(
        deps.as_mut(),
        mock_env(),
        info,
        fairdraw_entropy_pool::msg::ExecuteMsg::Advance {
            pool: POOL.to_string(),
        },
    )
    .unwrap();
}

/// Route the pool's registry queries to a live registry instance.
fn route_registry_queries(pool_deps: &mut MockDeps, registry_deps: MockDeps) {
    pool_deps.querier.update_wasm(move |request| match request {
        WasmQuery::Smart { msg, .. } => {
            let parsed: fairdraw_registry::msg::QueryMsg = from_json(msg).unwrap();
            let response =
                fairdraw_registry::contract::query(registry_deps.as_ref(), mock_env(), parsed)
                    .unwrap();
            SystemResult::Ok(ContractResult::Ok(response))
        }
        _ => SystemResult::Err(cosmwasm_std::SystemError::InvalidRequest {
            error: "only smart queries supported".to_string(),
            request: Default::default(),
        }),
    });
}

fn query_pool_digest(deps: &MockDeps) -> String {
    let res = fairdraw_entropy_pool::contract::query(
        deps.as_ref(),
        mock_env(),
        fairdraw_entropy_pool::msg::QueryMsg::Digest {
            pool: POOL.to_string(),
        },
    )
    .unwrap();
    from_json(&res).unwrap()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[test]
fn test_full_registration_and_draw_cycle() {
    let mut registry_deps = mock_dependencies();
    setup_registry(&mut registry_deps);

    let mut pool_deps = mock_dependencies();
    setup_pool(&mut pool_deps);

    // ── Step 1: three registrations, each advancing the pool ──
    let entropy_pool = registry_deps.api.addr_make("entropy-pool");
    for (participant, token) in [
        ("alice", "INV-001"),
        ("bob", "INV-002"),
        ("carol", "INV-003"),
    ] {
        let res = register(&mut registry_deps, participant, token);

        // The registry emits exactly one Advance message at the pool.
        assert_eq!(res.messages.len(), 1);
        match &res.messages[0].msg {
            CosmosMsg::Wasm(WasmMsg::Execute { contract_addr, .. }) => {
                assert_eq!(contract_addr, entropy_pool.as_str());
            }
            other => panic!("expected wasm execute, got {other:?}"),
        }

        advance_as_registry(&mut pool_deps);
    }

    // ── Step 2: the chain is in a known state ──
    assert_eq!(query_pool_digest(&pool_deps), DIGEST_AFTER_3);

    let res = fairdraw_entropy_pool::contract::query(
        pool_deps.as_ref(),
        mock_env(),
        fairdraw_entropy_pool::msg::QueryMsg::Counter {
            pool: POOL.to_string(),
        },
    )
    .unwrap();
    let counter: Decimal = from_json(&res).unwrap();
    assert_eq!(counter, Decimal::percent(750));

    // ── Step 3: draw ──
    route_registry_queries(&mut pool_deps, registry_deps);

    let operator = pool_deps.api.addr_make("operator");
    let info = message_info(&operator, &[]);
    let res = fairdraw_entropy_pool::contract::execute(
        pool_deps.as_mut(),
        mock_env(),
        info.clone(),
        fairdraw_entropy_pool::msg::ExecuteMsg::Draw {
            pool: POOL.to_string(),
        },
    )
    .unwrap();

    let event = res
        .events
        .iter()
        .find(|e| e.ty == "fairdraw_winner_drawn")
        .expect("winner event");
    let attr = |key: &str| {
        event
            .attributes
            .iter()
            .find(|a| a.key == key)
            .map(|a| a.value.clone())
            .expect("attribute")
    };
    // The low bits of DIGEST_AFTER_3 select index 2 out of 3: carol.
    assert_eq!(attr("index"), "2");
    assert_eq!(attr("population"), "3");
    assert_eq!(attr("digest"), DIGEST_AFTER_3);
    assert_eq!(attr("participant"), "carol");
    assert_eq!(attr("token"), "INV-003");

    // ── Step 4: the draw is idempotent, even as the chain moves on ──
    fairdraw_entropy_pool::contract::execute(
        pool_deps.as_mut(),
        mock_env(),
        info.clone(),
        fairdraw_entropy_pool::msg::ExecuteMsg::Advance {
            pool: POOL.to_string(),
        },
    )
    .unwrap();

    let res = fairdraw_entropy_pool::contract::execute(
        pool_deps.as_mut(),
        mock_env(),
        info,
        fairdraw_entropy_pool::msg::ExecuteMsg::Draw {
            pool: POOL.to_string(),
        },
    )
    .unwrap();
    assert!(res
        .attributes
        .iter()
        .any(|a| a.key == "cached" && a.value == "true"));
    assert!(res
        .attributes
        .iter()
        .any(|a| a.key == "token" && a.value == "INV-003"));

    // ── Step 5: the recorded result is queryable ──
    let res = fairdraw_entropy_pool::contract::query(
        pool_deps.as_ref(),
        mock_env(),
        fairdraw_entropy_pool::msg::QueryMsg::Winner {
            pool: POOL.to_string(),
        },
    )
    .unwrap();
    let winner: Option<fairdraw_entropy_pool::state::DrawResult> = from_json(&res).unwrap();
    let winner = winner.expect("recorded winner");
    assert_eq!(winner.token, "INV-003");
    assert_eq!(winner.participant, "carol");
    assert_eq!(winner.index, 2);
    assert_eq!(winner.population, 3);
    assert_eq!(winner.digest, DIGEST_AFTER_3);
}

#[test]
fn test_draw_waits_for_entropy() {
    let mut registry_deps = mock_dependencies();
    setup_registry(&mut registry_deps);
    register(&mut registry_deps, "alice", "INV-001");
    register(&mut registry_deps, "bob", "INV-002");

    let mut pool_deps = mock_dependencies();
    setup_pool(&mut pool_deps);
    route_registry_queries(&mut pool_deps, registry_deps);

    // Zero seed and no advances: the entropy source is empty, and the draw
    // must refuse rather than fall back to anything biased.
    let operator = pool_deps.api.addr_make("operator");
    let info = message_info(&operator, &[]);
    let err = fairdraw_entropy_pool::contract::execute(
        pool_deps.as_mut(),
        mock_env(),
        info.clone(),
        fairdraw_entropy_pool::msg::ExecuteMsg::Draw {
            pool: POOL.to_string(),
        },
    )
    .unwrap_err();
    assert!(matches!(
        err,
        fairdraw_entropy_pool::error::ContractError::DrawUnavailable { .. }
    ));

    // One advance accrues enough bits for a population of two.
    advance_as_registry(&mut pool_deps);
    assert_eq!(query_pool_digest(&pool_deps), DIGEST_AFTER_1);

    fairdraw_entropy_pool::contract::execute(
        pool_deps.as_mut(),
        mock_env(),
        info,
        fairdraw_entropy_pool::msg::ExecuteMsg::Draw {
            pool: POOL.to_string(),
        },
    )
    .unwrap();

    let res = fairdraw_entropy_pool::contract::query(
        pool_deps.as_ref(),
        mock_env(),
        fairdraw_entropy_pool::msg::QueryMsg::Winner {
            pool: POOL.to_string(),
        },
    )
    .unwrap();
    let winner: Option<fairdraw_entropy_pool::state::DrawResult> = from_json(&res).unwrap();
    let winner = winner.expect("recorded winner");
    // DIGEST_AFTER_1 ends in 0xc7; its low bit selects index 1 of 2: bob.
    assert_eq!(winner.index, 1);
    assert_eq!(winner.token, "INV-002");
}

#[test]
fn test_draw_rejects_empty_population() {
    let mut registry_deps = mock_dependencies();
    setup_registry(&mut registry_deps);

    let mut pool_deps = mock_dependencies();
    setup_pool(&mut pool_deps);
    route_registry_queries(&mut pool_deps, registry_deps);

    advance_as_registry(&mut pool_deps);

    let operator = pool_deps.api.addr_make("operator");
    let info = message_info(&operator, &[]);
    let err = fairdraw_entropy_pool::contract::execute(
        pool_deps.as_mut(),
        mock_env(),
        info,
        fairdraw_entropy_pool::msg::ExecuteMsg::Draw {
            pool: POOL.to_string(),
        },
    )
    .unwrap_err();
    assert!(matches!(
        err,
        fairdraw_entropy_pool::error::ContractError::InvalidBound { .. }
    ));
}

#[test]
fn test_chain_and_sampler_end_to_end() {
    // This test runs the core pipeline without any contract plumbing:
    // chain two messages, decode the digest, sample an index.
    let d1 = advance_digest(ZERO_SEED, "123456");
    let d2 = advance_digest(&d1, "123456");
    assert_ne!(d1, d2);

    let entropy = digest_entropy(&d2).unwrap();
    let index = fair_index(Uint256::from(10u32), entropy)
        .unwrap()
        .expect("256 bits are ample for a bound of 10");
    assert!(index < Uint256::from(10u32));

    // Deterministic: the same digest yields the same index.
    let again = fair_index(Uint256::from(10u32), digest_entropy(&d2).unwrap())
        .unwrap()
        .unwrap();
    assert_eq!(index, again);
}
