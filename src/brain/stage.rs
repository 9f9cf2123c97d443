//! Health stages: the ladder a monster descends as it loses HP
//!
//! Each stage sets the baseline action weights and base risk appetite.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::brain::weights::ActionWeights;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStage {
    /// Untouched: `hp == max_hp`
    Full,
    /// 75% and above
    ThreeQuarters,
    /// 50% and above
    Half,
    /// 25% and above
    Quarter,
    /// 10% and above
    TenPercent,
    /// Below 10%
    Critical,
}

impl HealthStage {
    /// Classify a monster's health; lower bounds are inclusive
    ///
    /// An exact `hp == max_hp` is always `Full`, whatever the percent.
    pub fn classify(hp: i64, max_hp: i64, health_pct: f64) -> Self {
        if hp == max_hp {
            HealthStage::Full
        } else if health_pct >= 75.0 {
            HealthStage::ThreeQuarters
        } else if health_pct >= 50.0 {
            HealthStage::Half
        } else if health_pct >= 25.0 {
            HealthStage::Quarter
        } else if health_pct >= 10.0 {
            HealthStage::TenPercent
        } else {
            HealthStage::Critical
        }
    }

    /// Full or three quarters
    pub fn is_opening(&self) -> bool {
        matches!(self, HealthStage::Full | HealthStage::ThreeQuarters)
    }

    /// Full, three quarters or half
    pub fn is_healthy(&self) -> bool {
        matches!(
            self,
            HealthStage::Full | HealthStage::ThreeQuarters | HealthStage::Half
        )
    }

    /// Baseline weights before any situational adjustment
    ///
    /// In the quarter stage charge decays by one for every 12 points below
    /// 50%, and heavy damage since last round trades two charge for one
    /// defend.
    pub fn baseline(
        &self,
        many_players: bool,
        health_pct: f64,
        loss_rate: f64,
        heavy_loss_rate: f64,
    ) -> ActionWeights {
        let opening_charge = if many_players { 3 } else { 2 };

        match self {
            HealthStage::Full => ActionWeights::new(6, 1, opening_charge),
            HealthStage::ThreeQuarters => ActionWeights::new(6, 2, opening_charge),
            HealthStage::Half => ActionWeights::new(5, 3, 2),
            HealthStage::Quarter => {
                let decay = ((50.0 - health_pct) / 12.0).max(0.0).floor() as i32;
                let mut weights = ActionWeights::new(5, 5, (2 - decay).max(0));
                if loss_rate >= heavy_loss_rate {
                    weights.drain_charge(2);
                    weights.defend += 1;
                }
                weights
            }
            HealthStage::TenPercent => ActionWeights::new(4, 6, 0),
            HealthStage::Critical => ActionWeights::new(2, 7, 0),
        }
    }

    /// Appetite for noise before advantage and jitter are applied
    pub fn base_risk(&self) -> f64 {
        match self {
            HealthStage::Full => 0.70,
            HealthStage::ThreeQuarters => 0.65,
            HealthStage::Half => 0.55,
            HealthStage::Quarter => 0.40,
            HealthStage::TenPercent => 0.30,
            HealthStage::Critical => 0.25,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStage::Full => "full",
            HealthStage::ThreeQuarters => "three_quarters",
            HealthStage::Half => "half",
            HealthStage::Quarter => "quarter",
            HealthStage::TenPercent => "ten_percent",
            HealthStage::Critical => "critical",
        }
    }
}

impl fmt::Display for HealthStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
