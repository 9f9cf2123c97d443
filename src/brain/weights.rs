//! Weight accumulators for the three actions

use serde::{Deserialize, Serialize};

use crate::core::types::Action;

/// Integer preference score per action, built up step by step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ActionWeights {
    pub attack: i32,
    pub defend: i32,
    pub charge: i32,
}

impl ActionWeights {
    pub fn new(attack: i32, defend: i32, charge: i32) -> Self {
        Self {
            attack,
            defend,
            charge,
        }
    }

    pub fn get(&self, action: Action) -> i32 {
        match action {
            Action::Attack => self.attack,
            Action::Defend => self.defend,
            Action::Charge => self.charge,
        }
    }

    /// Lower charge by `amount`, never below zero
    pub fn drain_charge(&mut self, amount: i32) {
        self.charge = (self.charge - amount).max(0);
    }

    /// Floor every weight at zero
    pub fn clamp_non_negative(&mut self) {
        self.attack = self.attack.max(0);
        self.defend = self.defend.max(0);
        self.charge = self.charge.max(0);
    }

    pub fn total(&self) -> i32 {
        self.attack
            .saturating_add(self.defend)
            .saturating_add(self.charge)
    }

    pub fn is_non_negative(&self) -> bool {
        self.attack >= 0 && self.defend >= 0 && self.charge >= 0
    }
}

/// Weights after risk-scaled noise, used for the final pick
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NoisyWeights {
    pub attack: f64,
    pub defend: f64,
    pub charge: f64,
}

impl NoisyWeights {
    pub fn new(attack: f64, defend: f64, charge: f64) -> Self {
        Self {
            attack,
            defend,
            charge,
        }
    }

    pub fn get(&self, action: Action) -> f64 {
        match action {
            Action::Attack => self.attack,
            Action::Defend => self.defend,
            Action::Charge => self.charge,
        }
    }

    /// Values in preference order: attack, defend, charge
    pub fn values(&self) -> [f64; 3] {
        [self.attack, self.defend, self.charge]
    }

    /// Highest noisy weight
    pub fn top(&self) -> f64 {
        self.values().into_iter().fold(f64::NEG_INFINITY, f64::max)
    }
}
