//! Round state handed to the brain, and the decision it hands back
//!
//! Callers often build these records from loosely-typed JSON (battle logs,
//! bot command payloads). Deserialization therefore never fails on field
//! content: anything missing, null or unparseable falls back to a default.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::core::types::{Action, Strategy};

/// The acting monster's condition for the current round
///
/// `prev_hp` and `last_action` are the caller's memory of the previous
/// round; the brain itself keeps nothing between calls.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonsterState {
    pub hp: i64,
    pub max_hp: i64,
    pub charge_multiplier: f64,
    /// Accepted for completeness; does not influence decisions
    pub defending: bool,
    pub last_action: Option<Action>,
    /// Seeds the random source for this decision only
    pub seed: Option<i64>,
    pub prev_hp: Option<i64>,
    pub attack_stat: f64,
    pub defense_stat: f64,
}

impl Default for MonsterState {
    fn default() -> Self {
        Self {
            hp: 0,
            max_hp: 1,
            charge_multiplier: 1.0,
            defending: false,
            last_action: None,
            seed: None,
            prev_hp: None,
            attack_stat: 1.0,
            defense_stat: 1.0,
        }
    }
}

impl MonsterState {
    /// Monster at `hp` of `max_hp`, clamped to `hp >= 0` and `max_hp >= 1`
    pub fn new(hp: i64, max_hp: i64) -> Self {
        Self {
            hp: hp.max(0),
            max_hp: max_hp.max(1),
            ..Self::default()
        }
    }

    pub fn with_charge_multiplier(mut self, multiplier: f64) -> Self {
        self.charge_multiplier = multiplier;
        self
    }

    pub fn with_defending(mut self, defending: bool) -> Self {
        self.defending = defending;
        self
    }

    pub fn with_last_action(mut self, action: Action) -> Self {
        self.last_action = Some(action);
        self
    }

    pub fn with_seed(mut self, seed: i64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_prev_hp(mut self, prev_hp: i64) -> Self {
        self.prev_hp = Some(prev_hp);
        self
    }

    pub fn with_stats(mut self, attack: f64, defense: f64) -> Self {
        self.attack_stat = attack;
        self.defense_stat = defense;
        self
    }

    /// Build from an arbitrary JSON value, coercing every field
    pub fn from_value(value: &Value) -> Self {
        let defaults = Self::default();
        Self {
            hp: field(value, "hp").and_then(coerce_i64).unwrap_or(0).max(0),
            max_hp: field(value, "max_hp").and_then(coerce_i64).unwrap_or(1).max(1),
            charge_multiplier: field(value, "charge_multiplier")
                .and_then(coerce_f64)
                .unwrap_or(defaults.charge_multiplier),
            defending: field(value, "defending").and_then(coerce_bool).unwrap_or(false),
            last_action: field(value, "last_action")
                .and_then(Value::as_str)
                .and_then(|s| s.parse().ok()),
            seed: field(value, "seed").and_then(coerce_i64),
            prev_hp: field(value, "prev_hp").and_then(coerce_i64),
            attack_stat: field(value, "attack_stat")
                .and_then(coerce_f64)
                .unwrap_or(defaults.attack_stat),
            defense_stat: field(value, "defense_stat")
                .and_then(coerce_f64)
                .unwrap_or(defaults.defense_stat),
        }
    }
}

impl<'de> Deserialize<'de> for MonsterState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}

/// One opponent's condition for the current round
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerState {
    pub hp: f64,
    pub max_hp: f64,
    pub alive: bool,
    pub charging: bool,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            hp: 0.0,
            max_hp: 1.0,
            alive: false,
            charging: false,
        }
    }
}

impl PlayerState {
    /// Living opponent at `hp` of `max_hp`
    pub fn alive(hp: f64, max_hp: f64) -> Self {
        Self {
            hp,
            max_hp,
            alive: true,
            charging: false,
        }
    }

    /// Eliminated opponent
    pub fn downed(max_hp: f64) -> Self {
        Self {
            hp: 0.0,
            max_hp,
            alive: false,
            charging: false,
        }
    }

    pub fn with_charging(mut self, charging: bool) -> Self {
        self.charging = charging;
        self
    }

    /// Counts toward the fight only when flagged alive with HP left
    pub fn is_active(&self) -> bool {
        self.alive && self.hp > 0.0
    }

    /// Health percent in `[0, 100]`; max HP below 1 is treated as 1
    pub fn health_pct(&self) -> f64 {
        (self.hp / self.max_hp.max(1.0) * 100.0).clamp(0.0, 100.0)
    }

    /// Build from an arbitrary JSON value, coercing every field
    pub fn from_value(value: &Value) -> Self {
        Self {
            hp: field(value, "hp").and_then(coerce_f64).unwrap_or(0.0),
            max_hp: field(value, "max_hp").and_then(coerce_f64).unwrap_or(1.0),
            alive: field(value, "alive").and_then(coerce_bool).unwrap_or(false),
            charging: field(value, "charging").and_then(coerce_bool).unwrap_or(false),
        }
    }
}

impl<'de> Deserialize<'de> for PlayerState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}

/// The brain's answer for one round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub action: Action,
    /// Diagnostic trace of the inputs; not meant to be parsed
    pub rationale: String,
    pub strategy: Strategy,
}

impl Decision {
    pub fn new(action: Action, strategy: Strategy, rationale: impl Into<String>) -> Self {
        Self {
            action,
            rationale: rationale.into(),
            strategy,
        }
    }
}

fn field<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    value.get(key).filter(|v| !v.is_null())
}

/// Integer view of a JSON value; floats truncate toward zero
fn coerce_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>().ok().or_else(|| {
                s.parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite())
                    .map(|f| f.trunc() as i64)
            })
        }
        Value::Bool(b) => Some(i64::from(*b)),
        _ => None,
    }
}

fn coerce_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
    .filter(|f| f.is_finite())
}

fn coerce_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Some(true),
            "false" | "0" | "no" | "" => Some(false),
            _ => None,
        },
        _ => None,
    }
}
