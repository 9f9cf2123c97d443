//! End-to-end decisions through the public brain API

use energon_brain::brain::{
    decide_action, BrainRng, HealthStage, MonsterAi, MonsterState, NpcBrain, PlayerState,
    ScriptedRng, SeededRng,
};
use energon_brain::core::config::load_profile;
use energon_brain::core::types::{Action, Strategy};
use serde_json::json;

fn monster_from(value: serde_json::Value) -> MonsterState {
    serde_json::from_value(value).expect("monster records always deserialize")
}

fn players_from(value: serde_json::Value) -> Vec<PlayerState> {
    serde_json::from_value(value).expect("player records always deserialize")
}

#[test]
fn test_seed_42_duel_regression() {
    let monster = monster_from(json!({
        "hp": 100, "max_hp": 100, "charge_multiplier": 1.0, "last_action": null, "seed": 42
    }));
    let players = players_from(json!([
        {"hp": 50, "max_hp": 100, "alive": true, "charging": false}
    ]));

    let decision = decide_action(&monster, &players);
    assert_eq!(decision.action, Action::Attack);
    assert_eq!(decision.strategy, Strategy::Spread);
    assert!(decision.rationale.starts_with("stage=full, n_alive=1"));

    let report = NpcBrain::default().deliberate(&monster, &players, &mut SeededRng::new(0));
    let trace = report.trace.expect("opponents present");
    assert_eq!(trace.stage, HealthStage::Full);
    assert_eq!(
        (trace.adjusted.attack, trace.adjusted.defend, trace.adjusted.charge),
        (10, 0, 3)
    );
    assert_eq!(report.decision, decision);
}

#[test]
fn test_no_opponents_alive() {
    let monster = monster_from(json!({"hp": 0, "max_hp": 1}));
    let players = players_from(json!([{"hp": 30, "max_hp": 100, "alive": false}]));

    let decision = decide_action(&monster, &players);
    assert_eq!(decision.action, Action::Defend);
    assert_eq!(decision.strategy, Strategy::Spread);
    assert_eq!(decision.rationale, "No opponents alive");
}

#[test]
fn test_same_seed_same_decision() {
    let brain = NpcBrain::default();
    let players = vec![
        PlayerState::alive(70.0, 100.0),
        PlayerState::alive(55.0, 80.0).with_charging(true),
        PlayerState::alive(90.0, 120.0),
    ];

    for seed in 0..64 {
        for hp in [100, 80, 55, 40, 20, 5] {
            let monster = MonsterState::new(hp, 100)
                .with_prev_hp(hp + 10)
                .with_seed(seed);
            let first = brain.decide_action(&monster, &players);
            let second = brain.decide_action(&monster, &players);
            assert_eq!(first, second, "seed {seed} hp {hp}");
        }
    }
}

#[test]
fn test_concurrent_battles_do_not_interfere() {
    let brain = NpcBrain::default();
    let players = vec![PlayerState::alive(60.0, 100.0), PlayerState::alive(65.0, 100.0)];
    let monsters: Vec<MonsterState> = (0..8)
        .map(|seed| MonsterState::new(62, 100).with_seed(seed))
        .collect();

    let sequential: Vec<_> = monsters
        .iter()
        .map(|m| brain.decide_action(m, &players))
        .collect();

    let (brain, players) = (&brain, &players);
    let concurrent: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = monsters
            .iter()
            .map(|m| scope.spawn(move || brain.decide_action(m, players)))
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().expect("decision thread panicked"))
            .collect()
    });

    assert_eq!(sequential, concurrent);
}

#[test]
fn test_cornered_monster_braces() {
    // critical, two opponents charging, swung last round
    let monster = MonsterState::new(5, 100).with_last_action(Action::Attack);
    let players = vec![
        PlayerState::alive(100.0, 100.0).with_charging(true),
        PlayerState::alive(100.0, 100.0).with_charging(true),
    ];

    for seed in 0..32 {
        let decision = NpcBrain::default().decide_action(&monster.clone().with_seed(seed), &players);
        assert_eq!(decision.action, Action::Defend);
        assert_eq!(decision.strategy, Strategy::Spread);
    }
}

#[test]
fn test_surrounded_monster_cashes_in() {
    let monster = MonsterState::new(100, 100).with_charge_multiplier(4.0);
    let players = vec![PlayerState::alive(80.0, 100.0); 4];

    let mut rng = SeededRng::new(9);
    for _ in 0..32 {
        let decision = NpcBrain::default().decide_with_rng(&monster, &players, &mut rng);
        assert_eq!(decision.action, Action::Attack);
        // attacking into a crowd from full health spreads damage
        assert_eq!(decision.strategy, Strategy::Spread);
        assert!(decision.rationale.contains("charge_mult=x4.0"));
    }
}

#[test]
fn test_finisher_range_focuses_weakest() {
    let players = vec![
        PlayerState::alive(20.0, 100.0),
        PlayerState::alive(95.0, 100.0).with_charging(true),
    ];
    let mut rng = SeededRng::new(3);
    for hp in [100, 70, 30, 12, 3] {
        let decision =
            NpcBrain::default().decide_with_rng(&MonsterState::new(hp, 100), &players, &mut rng);
        assert_eq!(decision.strategy, Strategy::FocusWeakest, "hp {hp}");
    }
}

#[test]
fn test_brink_never_charges_across_seeds() {
    let players = vec![PlayerState::alive(100.0, 100.0); 4];
    for seed in 0..128 {
        for hp in [0, 8, 15] {
            let monster = MonsterState::new(hp, 100).with_seed(seed);
            assert_ne!(decide_action(&monster, &players).action, Action::Charge);
        }
    }
}

#[test]
fn test_loose_json_matches_typed_input() {
    let loose = monster_from(json!({
        "hp": "60", "max_hp": 100.9, "charge_multiplier": "2", "last_action": "defend",
        "seed": "7", "prev_hp": 75, "attack_stat": true, "defense_stat": null
    }));
    let typed = MonsterState::new(60, 100)
        .with_charge_multiplier(2.0)
        .with_last_action(Action::Defend)
        .with_seed(7)
        .with_prev_hp(75)
        .with_stats(1.0, 1.0);
    assert_eq!(loose, typed);

    let players = players_from(json!([{"hp": "45.5", "max_hp": 100, "alive": true}, {"alive": false}]));
    assert_eq!(decide_action(&loose, &players), decide_action(&typed, &players));
}

#[test]
fn test_profiles_drive_the_brain() {
    let reckless = NpcBrain::new(load_profile("reckless").expect("reckless profile ships"))
        .expect("reckless profile is valid");
    let cautious = NpcBrain::new(load_profile("cautious").expect("cautious profile ships"))
        .expect("cautious profile is valid");
    assert_eq!(reckless.config().name, "reckless");

    // 22% sits inside the cautious brink but above the default one
    let monster = MonsterState::new(22, 100);
    let players = vec![PlayerState::alive(100.0, 100.0)];

    let report = cautious.deliberate(&monster, &players, &mut ScriptedRng::constant(0.5));
    let roll = report.trace.and_then(|t| t.roll).expect("weights are positive");
    assert_eq!(roll.noisy.charge, 0.0);

    let report = NpcBrain::default().deliberate(&monster, &players, &mut ScriptedRng::constant(0.5));
    let roll = report.trace.and_then(|t| t.roll).expect("weights are positive");
    assert!(roll.noisy.charge > 0.0);
}

#[test]
fn test_scripted_rng_through_trait_object() {
    let brain = NpcBrain::default();
    let ai: Box<dyn MonsterAi> = Box::new(brain);
    let mut rng = ScriptedRng::constant(0.0);

    // zero noise leaves attack at 6 against defend at 7
    let monster = MonsterState::new(10, 100);
    let players = vec![PlayerState::alive(50.0, 100.0)];
    let decision = ai.decide(&monster, &players, &mut rng);
    assert_eq!(decision.action, Action::Defend);
    assert_eq!(rng.draws(), 4);

    rng.reseed(0);
    assert_eq!(rng.draws(), 0);
}

#[test]
fn test_opposite_signed_stats_follow_the_bias() {
    let players = vec![PlayerState::alive(50.0, 100.0)];

    let turtle = monster_from(json!({
        "hp": 40, "max_hp": 100, "attack_stat": -1e9, "defense_stat": 1e9, "seed": 5
    }));
    let brute = MonsterState::new(40, 100).with_stats(1e9, -1e9).with_seed(5);

    assert_eq!(decide_action(&turtle, &players).action, Action::Defend);
    assert_eq!(decide_action(&brute, &players).action, Action::Attack);

    let extreme = MonsterState::new(40, 100).with_stats(-f64::MAX, f64::MAX);
    let mut rng = SeededRng::new(17);
    for _ in 0..16 {
        let decision = NpcBrain::default().decide_with_rng(&extreme, &players, &mut rng);
        assert_eq!(decision.action, Action::Defend);
    }
}
