//! NPC brain - picks a monster's action for one battle round
//!
//! Pure with respect to the caller: every call builds its view of the round
//! from scratch and touches nothing but the random source it is given.

use serde::Serialize;

use crate::brain::adjust::Deliberation;
use crate::brain::context::BattleContext;
use crate::brain::rng::{BrainRng, SeededRng};
use crate::brain::select::{
    add_noise, apply_luck, refine_strategy, roll_risk, select_action, RiskRoll,
};
use crate::brain::stage::HealthStage;
use crate::brain::state::{Decision, MonsterState, PlayerState};
use crate::brain::weights::ActionWeights;
use crate::core::config::BrainConfig;
use crate::core::error::Result;
use crate::core::types::{Action, Strategy};

pub const NO_OPPONENTS_RATIONALE: &str = "No opponents alive";
pub const FALLBACK_RATIONALE: &str = "Fallback decision";

/// Trait for monster decision makers
pub trait MonsterAi {
    /// Choose this round's action, drawing randomness from `rng`
    fn decide(
        &self,
        monster: &MonsterState,
        players: &[PlayerState],
        rng: &mut dyn BrainRng,
    ) -> Decision;

    /// Get the profile driving this AI
    fn profile(&self) -> &BrainConfig;
}

/// How a decision was reached
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeliberationTrace {
    pub stage: HealthStage,
    pub baseline: ActionWeights,
    /// Weights after every situational adjustment
    pub adjusted: ActionWeights,
    /// None when the adjusted weights summed to zero
    pub roll: Option<RiskRoll>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecisionReport {
    pub decision: Decision,
    /// None when there were no opponents to weigh
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<DeliberationTrace>,
}

/// Adaptive, risk-aware decision engine for monster actions
#[derive(Debug, Clone, Default)]
pub struct NpcBrain {
    config: BrainConfig,
}

impl NpcBrain {
    /// Create a brain from a validated profile
    pub fn new(config: BrainConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &BrainConfig {
        &self.config
    }

    /// Decide with a private random source
    ///
    /// A monster seed makes the result reproducible; without one the source
    /// is seeded from OS entropy.
    pub fn decide_action(&self, monster: &MonsterState, players: &[PlayerState]) -> Decision {
        let mut rng = match monster.seed {
            Some(seed) => SeededRng::new(seed as u64),
            None => SeededRng::from_entropy(),
        };
        self.decide_with_rng(monster, players, &mut rng)
    }

    /// Decide using a caller-owned random source
    pub fn decide_with_rng<R: BrainRng + ?Sized>(
        &self,
        monster: &MonsterState,
        players: &[PlayerState],
        rng: &mut R,
    ) -> Decision {
        self.deliberate(monster, players, rng).decision
    }

    /// Decide and keep every intermediate result
    ///
    /// A monster seed reseeds `rng` before the first draw.
    pub fn deliberate<R: BrainRng + ?Sized>(
        &self,
        monster: &MonsterState,
        players: &[PlayerState],
        rng: &mut R,
    ) -> DecisionReport {
        if let Some(seed) = monster.seed {
            tracing::trace!("Reseeding brain rng with {}", seed);
            rng.reseed(seed as u64);
        }

        let thresholds = &self.config.thresholds;
        let Some(ctx) = BattleContext::assess(monster, players, thresholds) else {
            tracing::debug!("No opponents alive among {} players, defending", players.len());
            return DecisionReport {
                decision: Decision::new(Action::Defend, Strategy::Spread, NO_OPPONENTS_RATIONALE),
                trace: None,
            };
        };

        let baseline = Deliberation::open(&ctx, thresholds).weights;
        let deliberation = Deliberation::run(&ctx, thresholds);
        tracing::trace!(
            "Stage {} baseline {:?} adjusted {:?}",
            ctx.stage,
            baseline,
            deliberation.weights
        );

        if deliberation.weights.total() <= 0 {
            tracing::debug!("All weights zero at stage {}, falling back to attack", ctx.stage);
            return DecisionReport {
                decision: Decision::new(Action::Attack, deliberation.strategy, FALLBACK_RATIONALE),
                trace: Some(DeliberationTrace {
                    stage: ctx.stage,
                    baseline,
                    adjusted: deliberation.weights,
                    roll: None,
                }),
            };
        }

        let risk = roll_risk(&ctx, &self.config.risk, rng);
        let mut weights = deliberation.weights;
        let luck_triggered = apply_luck(&mut weights, &ctx, &self.config.risk, rng);
        let noisy = add_noise(&weights, risk, &ctx, thresholds, rng);
        let action = select_action(&noisy, self.config.selection.near_tie_margin, rng);
        let strategy = refine_strategy(deliberation.strategy, action, &ctx);

        tracing::trace!("Noisy weights {:?} (luck: {})", noisy, luck_triggered);
        tracing::debug!(
            "Monster at {} ({:.0}%) chose {} / {} with risk {:.2}",
            ctx.stage,
            ctx.health_pct,
            action,
            strategy,
            risk
        );

        DecisionReport {
            decision: Decision::new(action, strategy, rationale(&ctx, risk)),
            trace: Some(DeliberationTrace {
                stage: ctx.stage,
                baseline,
                adjusted: deliberation.weights,
                roll: Some(RiskRoll {
                    risk,
                    luck_triggered,
                    weights,
                    noisy,
                }),
            }),
        }
    }
}

impl MonsterAi for NpcBrain {
    fn decide(
        &self,
        monster: &MonsterState,
        players: &[PlayerState],
        rng: &mut dyn BrainRng,
    ) -> Decision {
        self.decide_with_rng(monster, players, rng)
    }

    fn profile(&self) -> &BrainConfig {
        &self.config
    }
}

fn rationale(ctx: &BattleContext, risk: f64) -> String {
    format!(
        "stage={}, n_alive={}, avg_player_pct={:.0}, weakest_pct={:.0}, strongest_pct={:.0}, \
         charge_mult=x{:.1}, charging_count={}, risk={:.2}, att={:.1}, def={:.1}, bias={:.2}, \
         loss_rate={:.2}",
        ctx.stage,
        ctx.n_alive,
        ctx.avg_player_pct,
        ctx.weakest_pct,
        ctx.strongest_pct,
        ctx.charge_multiplier,
        ctx.charging_count,
        risk,
        ctx.attack_stat,
        ctx.defense_stat,
        ctx.attack_bias(),
        ctx.loss_rate
    )
}
