//! The brain's normalized view of one battle round
//!
//! Folds the monster record and the opponent list into the handful of
//! derived quantities every heuristic reads.

use serde::Serialize;

use crate::brain::stage::HealthStage;
use crate::brain::state::{MonsterState, PlayerState};
use crate::core::config::ThresholdConfig;
use crate::core::types::Action;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BattleContext {
    // Monster
    pub hp: i64,
    pub max_hp: i64,
    pub health_pct: f64,
    /// Fraction of max HP lost since the previous round, never negative
    pub loss_rate: f64,
    pub charge_multiplier: f64,
    pub last_action: Option<Action>,
    pub attack_stat: f64,
    pub defense_stat: f64,
    pub stage: HealthStage,

    // Opponents
    pub n_alive: usize,
    pub total_players: usize,
    pub eliminations: usize,
    pub avg_player_pct: f64,
    pub weakest_pct: f64,
    pub strongest_pct: f64,
    pub any_player_critical: bool,
    pub any_player_finisher_range: bool,
    pub charging_count: usize,
    pub many_players: bool,
}

impl BattleContext {
    /// Build the round view
    ///
    /// Returns None when no opponent is both flagged alive and above 0 HP.
    pub fn assess(
        monster: &MonsterState,
        players: &[PlayerState],
        thresholds: &ThresholdConfig,
    ) -> Option<Self> {
        let hp = monster.hp.max(0);
        let max_hp = monster.max_hp.max(1);
        let health_pct = hp as f64 / max_hp as f64 * 100.0;

        let loss_rate = monster
            .prev_hp
            .map(|prev| ((prev.max(0) - hp) as f64 / max_hp as f64).max(0.0))
            .unwrap_or(0.0);

        let alive: Vec<&PlayerState> = players.iter().filter(|p| p.is_active()).collect();
        if alive.is_empty() {
            return None;
        }

        let n_alive = alive.len();
        let total_players = players.len();
        let pcts: Vec<f64> = alive.iter().map(|p| p.health_pct()).collect();
        let avg_player_pct = pcts.iter().sum::<f64>() / n_alive as f64;
        let weakest_pct = pcts.iter().copied().fold(f64::INFINITY, f64::min);
        let strongest_pct = pcts.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Some(Self {
            hp,
            max_hp,
            health_pct,
            loss_rate,
            charge_multiplier: finite_or(monster.charge_multiplier, 1.0),
            last_action: monster.last_action,
            attack_stat: finite_or(monster.attack_stat, 1.0),
            defense_stat: finite_or(monster.defense_stat, 1.0),
            stage: HealthStage::classify(hp, max_hp, health_pct),
            n_alive,
            total_players,
            eliminations: total_players.saturating_sub(n_alive),
            avg_player_pct,
            weakest_pct,
            strongest_pct,
            any_player_critical: weakest_pct <= thresholds.critical_target_pct,
            any_player_finisher_range: weakest_pct <= thresholds.finisher_pct,
            charging_count: alive.iter().filter(|p| p.charging).count(),
            many_players: n_alive >= thresholds.many_players,
        })
    }

    /// Monster health percent minus average opponent health percent
    pub fn pressure_advantage(&self) -> f64 {
        self.health_pct - self.avg_player_pct
    }

    /// Offensive lean of the stat line in `[-1, 1]` for non-negative stats
    pub fn attack_bias(&self) -> f64 {
        let den = (self.attack_stat + self.defense_stat).max(1.0);
        (self.attack_stat - self.defense_stat) / den
    }

    /// Stat bias counts double once the monster is at half health or worse
    pub fn bias_scale(&self) -> i32 {
        if self.health_pct <= 50.0 {
            2
        } else {
            1
        }
    }
}

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}
