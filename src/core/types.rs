//! Core action and targeting types shared by the brain and its callers

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An action a monster can take in a single battle round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Attack,
    Defend,
    Charge,
}

impl Action {
    /// Preference order used to break near-ties
    pub const PREFERENCE: [Action; 3] = [Action::Attack, Action::Defend, Action::Charge];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Attack => "attack",
            Action::Defend => "defend",
            Action::Charge => "charge",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = String;

    /// Only the exact lowercase names are accepted
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "attack" => Ok(Action::Attack),
            "defend" => Ok(Action::Defend),
            "charge" => Ok(Action::Charge),
            other => Err(format!("unknown action: {other:?}")),
        }
    }
}

/// Targeting hint handed back to the battle engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Spread damage across all opponents
    #[default]
    Spread,
    /// Finish off the lowest-health opponent
    FocusWeakest,
    /// Break the healthiest (or most threatening) opponent
    FocusStrongest,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Spread => "spread",
            Strategy::FocusWeakest => "focus_weakest",
            Strategy::FocusStrongest => "focus_strongest",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
