//! Risk, luck, noise and the final pick
//!
//! Randomness only sets how much noise lands on each weight. When noisy
//! weights end up close together the pick is deterministic, preferring
//! attack, then defend, then charge.

use serde::{Deserialize, Serialize};

use crate::brain::context::BattleContext;
use crate::brain::rng::BrainRng;
use crate::brain::weights::{ActionWeights, NoisyWeights};
use crate::core::config::{RiskConfig, ThresholdConfig};
use crate::core::types::{Action, Strategy};

/// Everything the random source decided for one round
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskRoll {
    pub risk: f64,
    pub luck_triggered: bool,
    /// Weights after the luck swing
    pub weights: ActionWeights,
    pub noisy: NoisyWeights,
}

/// Noise amplitude: stage appetite, nudged by pressure advantage and jitter
pub fn roll_risk<R: BrainRng + ?Sized>(
    ctx: &BattleContext,
    config: &RiskConfig,
    rng: &mut R,
) -> f64 {
    let cap = config.advantage_cap;
    let adv_factor = (ctx.pressure_advantage() / 100.0).clamp(-cap, cap);
    let jitter = (rng.random() - 0.5) * config.jitter;
    (ctx.stage.base_risk() + adv_factor + jitter).clamp(config.min_risk, config.max_risk)
}

/// Rare swing that makes the monster feel less mechanical
///
/// Returns whether the swing happened.
pub fn apply_luck<R: BrainRng + ?Sized>(
    weights: &mut ActionWeights,
    ctx: &BattleContext,
    config: &RiskConfig,
    rng: &mut R,
) -> bool {
    if rng.random() >= config.luck_chance {
        return false;
    }

    if ctx.stage.is_opening() && weights.charge > 0 {
        weights.charge += 2;
    } else if ctx.pressure_advantage() >= 0.0 {
        weights.attack += 1;
    } else {
        weights.defend += 1;
    }
    true
}

/// Add `risk * U(0, 1)` to each weight, drawing in attack, defend, charge order
///
/// Charge at or below the brink is pinned to zero without a draw.
pub fn add_noise<R: BrainRng + ?Sized>(
    weights: &ActionWeights,
    risk: f64,
    ctx: &BattleContext,
    thresholds: &ThresholdConfig,
    rng: &mut R,
) -> NoisyWeights {
    let mut perturb = |w: i32| (w as f64 + risk * rng.uniform(0.0, 1.0)).max(0.0);

    let attack = perturb(weights.attack);
    let defend = perturb(weights.defend);
    let charge = if ctx.health_pct <= thresholds.brink_pct {
        0.0
    } else {
        perturb(weights.charge)
    };

    NoisyWeights::new(attack, defend, charge)
}

/// Pick the action with the highest noisy weight
///
/// Every action strictly within `margin` of the top is a candidate, and the
/// first candidate in preference order wins. Only if nothing qualifies (a
/// zero margin, say) does the pick fall back to sampling by weight.
pub fn select_action<R: BrainRng + ?Sized>(
    noisy: &NoisyWeights,
    margin: f64,
    rng: &mut R,
) -> Action {
    let top = noisy.top();
    let preferred = Action::PREFERENCE
        .into_iter()
        .find(|action| (noisy.get(*action) - top).abs() < margin);

    match preferred {
        Some(action) => action,
        None => rng
            .weighted_choice(&noisy.values())
            .map(|i| Action::PREFERENCE[i])
            .unwrap_or(Action::Attack),
    }
}

/// Final targeting hint once the action is known
pub fn refine_strategy(strategy: Strategy, action: Action, ctx: &BattleContext) -> Strategy {
    if ctx.any_player_finisher_range {
        Strategy::FocusWeakest
    } else if ctx.charging_count >= 1 && ctx.health_pct >= 50.0 {
        Strategy::FocusStrongest
    } else if ctx.many_players && ctx.stage.is_opening() && action == Action::Attack {
        Strategy::Spread
    } else {
        strategy
    }
}
