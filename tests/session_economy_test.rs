//! Integration test: Session economy
//!
//! Bombs, streak multipliers, collectibles, cashout and the bounds that must
//! hold after any sequence of actions.

use nftuklas::core::config::EngineConfig;
use nftuklas::core::constants::UNLIMITED_LIVES;
use nftuklas::economy::{apply, SessionState};
use nftuklas::loot::{DrawResult, ScriptedRolls, Tier, Variant};
use nftuklas::persistence::{KeyValueStore, MemoryStore};
use nftuklas::Session;
use proptest::prelude::*;

// Prospect table boundaries: Dud (0, .08], Common (.08, .53], Uncommon (.53, .78],
// Rare (.78, .90], Bomb (.90, .95], Epic (.95, .98], Legendary (.98, .995],
// Mythic (.995, .999], Divine (.999, 1).
const DUD: f64 = 0.04;
const COMMON: f64 = 0.30;
const RARE: f64 = 0.85;
const BOMB: f64 = 0.93;
const DIVINE: f64 = 0.9995;

fn connected(variant: Variant) -> Session<MemoryStore> {
    let mut session =
        Session::open_at(EngineConfig::instant(variant), MemoryStore::new(), 0).unwrap();
    session.connect();
    session
}

/// Draw with a scripted outcome roll followed by a value roll.
fn draw(session: &mut Session<MemoryStore>, outcome: f64, value: f64) -> DrawResult {
    let mut rng = ScriptedRolls::new(vec![outcome, value]);
    session.draw_now(&mut rng).unwrap().0
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_bomb_wipes_run_of_forty() {
    let mut session = connected(Variant::Prospect);
    // Rare at the top of 20..=35 twice: 35 + 5 = 40 with no streak bonus yet.
    draw(&mut session, RARE, 0.99);
    draw(&mut session, COMMON, 0.99);
    assert_eq!(session.state().active_run_currency, 40);
    let banked_before = session.state().banked_currency;

    let result = draw(&mut session, BOMB, 0.0);

    assert!(result.is_hazard);
    let state = session.state();
    assert_eq!(state.active_run_currency, 0);
    assert!(!state.in_active_run);
    assert_eq!(state.lives, 4);
    assert_eq!(state.streak, 0);
    assert!((state.multiplier() - 1.0).abs() < f64::EPSILON);
    assert_eq!(state.banked_currency, banked_before);
}

#[test]
fn test_fifth_streak_draw_earns_ten_percent() {
    let mut session = connected(Variant::Prospect);
    for _ in 0..5 {
        draw(&mut session, COMMON, 0.0);
    }
    assert_eq!(session.state().streak, 5);
    assert_eq!(session.state().active_run_currency, 5);

    // Rare at the bottom of its range pays 20, multiplied to 22.
    let mut rng = ScriptedRolls::new(vec![RARE, 0.0]);
    let (result, report) = session.draw_now(&mut rng).unwrap();

    assert_eq!(result.currency_awarded, 20);
    assert!((report.multiplier_used - 1.1).abs() < 1e-9);
    assert_eq!(report.credited_to_run, 22);
    assert_eq!(session.state().active_run_currency, 27);
}

#[test]
fn test_divine_collectible_banks_thousand_and_leaves_run() {
    let mut session = connected(Variant::Prospect);
    draw(&mut session, COMMON, 0.99);
    let run_before = session.state().active_run_currency;

    let result = draw(&mut session, DIVINE, 0.0);

    assert_eq!(result.tier, Tier::Divine);
    let state = session.state();
    assert_eq!(state.collected_items.len(), 1);
    assert_eq!(state.collected_items[0], result);
    assert_eq!(state.banked_currency, 1000);
    assert_eq!(state.active_run_currency, run_before);
}

#[test]
fn test_dud_breaks_streak_only() {
    let mut session = connected(Variant::Prospect);
    draw(&mut session, COMMON, 0.5);
    draw(&mut session, COMMON, 0.5);
    let run = session.state().active_run_currency;

    let result = draw(&mut session, DUD, 0.0);

    assert!(result.is_dud());
    assert_eq!(session.state().streak, 0);
    assert_eq!(session.state().active_run_currency, run);
    assert_eq!(session.state().lives, 5);
}

#[test]
fn test_cashout_banks_run_once() {
    let mut session = connected(Variant::Prospect);
    draw(&mut session, RARE, 0.0);
    assert_eq!(session.cashout(), Ok(20));
    assert_eq!(session.state().banked_currency, 20);
    assert!(!session.state().in_active_run);
    assert_eq!(session.cashout(), Ok(0));
    assert_eq!(session.state().banked_currency, 20);
}

#[test]
fn test_cashout_with_empty_run_leaves_state_unchanged() {
    let mut session = connected(Variant::Prospect);
    draw(&mut session, DUD, 0.0);
    let before = session.state().clone();
    assert_eq!(session.cashout(), Ok(0));
    assert_eq!(session.state(), &before);
}

#[test]
fn test_basic_variant_banks_directly() {
    let mut session = connected(Variant::Basic);
    // Basic: Uncommon (0, .2], Rare (.2, .28], Epic (.28, .30], Common after.
    let result = draw(&mut session, 0.25, 0.0);
    assert_eq!(result.tier, Tier::Rare);
    assert_eq!(session.state().banked_currency, 20);
    assert_eq!(session.state().active_run_currency, 0);

    let result = draw(&mut session, 0.9, 0.0);
    assert_eq!(result.tier, Tier::Common);
    assert_eq!(session.state().banked_currency, 21);
}

#[test]
fn test_unlimited_lives_survive_bombs() {
    let mut session = connected(Variant::Prospect);
    session.buy_lives(UNLIMITED_LIVES);
    for _ in 0..10 {
        draw(&mut session, BOMB, 0.0);
    }
    assert_eq!(session.state().lives, 5);
    assert!(session.snapshot().unlimited_lives);
}

#[test]
fn test_lives_never_drop_below_zero() {
    let mut session = connected(Variant::Prospect);
    for _ in 0..8 {
        draw(&mut session, BOMB, 0.0);
    }
    assert_eq!(session.state().lives, 0);
    assert!(session.state().is_out_of_lives());
    assert_eq!(session.state().total_draws, 8);
}

#[test]
fn test_apply_is_usable_without_a_session() {
    let mut state = SessionState::new(3);
    let gem = DrawResult {
        tier: Tier::Epic,
        reward: "50-100 Coins".to_string(),
        currency_awarded: 60,
        is_collectible: false,
        is_hazard: false,
        collectible_name: None,
    };
    let report = apply(&mut state, &gem, true);
    assert_eq!(report.credited_to_run, 60);
    assert_eq!(state.active_run_currency, 60);
}

// =============================================================================
// Bounds after arbitrary action sequences
// =============================================================================

#[derive(Debug, Clone)]
enum Op {
    Draw(f64, f64, f64),
    Cashout,
    Buy(u32),
    Tick(f64),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0.0f64..1.0, 0.0f64..1.0, 0.0f64..1.0).prop_map(|(a, b, c)| Op::Draw(a, b, c)),
        2 => Just(Op::Cashout),
        1 => prop_oneof![0u32..12, Just(UNLIMITED_LIVES)].prop_map(Op::Buy),
        2 => (0.0f64..90.0).prop_map(Op::Tick),
    ]
}

proptest! {
    #[test]
    fn prop_state_stays_in_bounds(
        variant in prop_oneof![Just(Variant::Basic), Just(Variant::Collector), Just(Variant::Prospect)],
        ops in prop::collection::vec(op_strategy(), 1..80),
    ) {
        let mut session = connected(variant);
        let mut draws = 0u64;
        let mut banked = 0u64;
        let mut collected = 0usize;

        for op in ops {
            match op {
                Op::Draw(a, b, c) => {
                    let mut rng = ScriptedRolls::new(vec![a, b, c]);
                    session.draw_now(&mut rng).unwrap();
                    draws += 1;
                }
                Op::Cashout => {
                    let _ = session.cashout();
                }
                Op::Buy(n) => {
                    session.buy_lives(n);
                }
                Op::Tick(dt) => {
                    let mut rng = ScriptedRolls::new(vec![0.5]);
                    let tick = session.tick(dt, &mut rng);
                    prop_assert!(tick.draw.is_none());
                }
            }

            let state = session.state();
            prop_assert!(state.is_consistent());
            prop_assert!(state.lives <= state.max_lives);
            prop_assert!(state.multiplier() >= 1.0);
            prop_assert!(state.banked_currency >= banked);
            prop_assert!(state.collected_items.len() >= collected);
            prop_assert_eq!(state.total_draws, draws);
            if !variant.has_run_mechanic() {
                prop_assert_eq!(state.active_run_currency, 0);
            }
            banked = state.banked_currency;
            collected = state.collected_items.len();
        }

        let saved = session.into_store();
        prop_assert!(saved.get("nftuklas-lives").unwrap().is_some() || draws == 0);
    }
}
