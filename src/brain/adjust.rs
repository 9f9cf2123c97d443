//! Situational weight adjustments
//!
//! A `Deliberation` starts from the stage baseline and is pushed through a
//! fixed sequence of heuristics. Order matters: later steps read weights and
//! strategy left by earlier ones, so `Deliberation::run` is the only place
//! the sequence is spelled out.

use serde::{Deserialize, Serialize};

use crate::brain::context::BattleContext;
use crate::brain::weights::ActionWeights;
use crate::core::config::ThresholdConfig;
use crate::core::types::{Action, Strategy};

/// Ceiling on stat-bias steps; dwarfs every other adjustment
const MAX_BIAS_STEPS: f64 = 1_000_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deliberation {
    pub weights: ActionWeights,
    pub strategy: Strategy,
}

impl Deliberation {
    /// Stage baseline with the default spread strategy
    pub fn open(ctx: &BattleContext, thresholds: &ThresholdConfig) -> Self {
        Self {
            weights: ctx.stage.baseline(
                ctx.many_players,
                ctx.health_pct,
                ctx.loss_rate,
                thresholds.heavy_loss_rate,
            ),
            strategy: Strategy::Spread,
        }
    }

    /// Baseline followed by every adjustment, clamped
    pub fn run(ctx: &BattleContext, thresholds: &ThresholdConfig) -> Self {
        let mut d = Self::open(ctx, thresholds);
        d.adjust_for_party_size(ctx);
        d.exploit_vulnerable(ctx);
        d.weigh_pressure(ctx, thresholds);
        d.gate_charge(ctx);
        d.cash_in_charge(ctx, thresholds);
        d.react_to_chargers(ctx, thresholds);
        d.follow_momentum(ctx);
        d.press_eliminations(ctx);
        d.apply_stat_bias(ctx);
        d.charge_synergy(ctx, thresholds);
        d.brink_override(ctx, thresholds);
        d.weights.clamp_non_negative();
        d
    }

    /// Fewer opponents invite aggression; a full party of four rewards charge
    pub fn adjust_for_party_size(&mut self, ctx: &BattleContext) {
        let w = &mut self.weights;
        match ctx.n_alive {
            1 => {
                w.attack += 2;
                if w.defend > 0 {
                    w.defend -= 1;
                }
            }
            2 => w.attack += 1,
            4 if ctx.stage.is_healthy() => w.charge += 1,
            _ => {}
        }
    }

    pub fn exploit_vulnerable(&mut self, ctx: &BattleContext) {
        if ctx.any_player_finisher_range {
            self.weights.attack += 2;
            self.strategy = Strategy::FocusWeakest;
        } else if ctx.avg_player_pct < 50.0 && !ctx.many_players {
            self.weights.attack += 1;
        }
    }

    /// Ahead on health: press. Behind: brace.
    pub fn weigh_pressure(&mut self, ctx: &BattleContext, thresholds: &ThresholdConfig) {
        let advantage = ctx.pressure_advantage();
        if advantage >= thresholds.pressure_margin {
            self.weights.attack += 2;
            if ctx.stage.is_opening() && ctx.many_players {
                self.weights.charge += 1;
            }
        } else if advantage <= -thresholds.pressure_margin {
            self.weights.defend += 2;
            self.weights.drain_charge(1);
        }
    }

    /// Charging is only safe while healthy, facing healthy opponents, and
    /// with nobody charging back
    pub fn gate_charge(&mut self, ctx: &BattleContext) {
        let safe_to_charge = ctx.stage.is_healthy()
            && ctx.avg_player_pct >= 50.0
            && !ctx.any_player_critical
            && ctx.charging_count == 0;
        if !safe_to_charge {
            self.weights.drain_charge(2);
        }
    }

    pub fn cash_in_charge(&mut self, ctx: &BattleContext, thresholds: &ThresholdConfig) {
        if ctx.charge_multiplier < thresholds.cash_in_multiplier {
            return;
        }
        self.weights.attack += 2;
        self.weights.drain_charge(2);
        if ctx.many_players && ctx.health_pct >= 50.0 && !ctx.any_player_finisher_range {
            self.strategy = Strategy::FocusStrongest;
        }
    }

    pub fn react_to_chargers(&mut self, ctx: &BattleContext, thresholds: &ThresholdConfig) {
        if ctx.charging_count >= 2 && ctx.health_pct <= 50.0 {
            self.weights.defend += 2;
            self.weights.charge = 0;
        } else if ctx.charging_count == 1 && ctx.stage.is_healthy() {
            self.weights.attack += 1;
            if ctx.strongest_pct >= thresholds.strongest_focus_pct {
                self.strategy = Strategy::FocusStrongest;
            }
        }
    }

    /// Attack after charging, don't turtle forever, don't swing wildly when low
    pub fn follow_momentum(&mut self, ctx: &BattleContext) {
        use crate::brain::stage::HealthStage::*;

        match ctx.last_action {
            Some(Action::Charge) => {
                self.weights.attack += 2;
                if matches!(ctx.stage, Quarter | Critical) {
                    self.weights.defend += 1;
                }
                self.weights.drain_charge(2);
            }
            Some(Action::Defend) => self.weights.attack += 1,
            Some(Action::Attack) if matches!(ctx.stage, Quarter | TenPercent | Critical) => {
                self.weights.defend += 1;
            }
            _ => {}
        }
    }

    pub fn press_eliminations(&mut self, ctx: &BattleContext) {
        if ctx.eliminations >= 1 && ctx.health_pct >= 25.0 {
            self.weights.attack += 1;
        }
    }

    /// Lean toward the monster's stronger stat, twice as hard at half health
    ///
    /// Negative stats push the bias outside `[-1, 1]`; the step count is
    /// capped so the bonus stays far inside `i32`.
    pub fn apply_stat_bias(&mut self, ctx: &BattleContext) {
        let bias = ctx.attack_bias();
        let steps = (bias.abs() * 3.0).round_ties_even().min(MAX_BIAS_STEPS) as i32;
        let bonus = 1 + steps * ctx.bias_scale();
        if bias > 0.0 {
            self.weights.attack += bonus;
        } else if bias < 0.0 {
            self.weights.defend += bonus;
        }
    }

    /// Balanced, uncharged monsters in good health build charge
    pub fn charge_synergy(&mut self, ctx: &BattleContext, thresholds: &ThresholdConfig) {
        if ctx.health_pct >= 50.0
            && ctx.attack_bias().abs() < thresholds.balanced_bias
            && ctx.charge_multiplier < thresholds.cash_in_multiplier
        {
            self.weights.charge += 1;
        }
    }

    /// At the brink, charge is off the table and stat lean doubles down
    pub fn brink_override(&mut self, ctx: &BattleContext, thresholds: &ThresholdConfig) {
        if ctx.health_pct > thresholds.brink_pct {
            return;
        }
        self.weights.charge = 0;
        let bias = ctx.attack_bias();
        if bias > 0.0 {
            self.weights.attack += 2;
        } else if bias < 0.0 {
            self.weights.defend += 2;
        }
    }
}
