//! Brain configuration with documented constants
//!
//! All tunable thresholds of the decision engine are collected here with
//! explanations of their purpose and how they interact. Profiles can be
//! loaded from TOML; every section falls back to the defaults below.
//!
//! The stage baseline table and base risk table are not configurable; they
//! live next to `HealthStage` in `brain::stage`.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::error::{BrainError, Result};

/// Situational thresholds read while adjusting weights
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdConfig {
    // === PARTY ===
    /// Alive opponents at which the monster counts as surrounded
    ///
    /// Surrounded monsters value charge in the opening stages and prefer
    /// spreading damage when attacking from a healthy position.
    pub many_players: usize,

    // === TARGET HEALTH (percent) ===
    /// Weakest opponent at or below this is in finishing range
    pub finisher_pct: f64,

    /// Weakest opponent at or below this is critical; charging is unsafe
    pub critical_target_pct: f64,

    /// Strongest opponent at or above this draws focus when one opponent charges
    pub strongest_focus_pct: f64,

    // === MONSTER CONDITION ===
    /// Health-percent gap (either direction) that counts as pressure advantage
    pub pressure_margin: f64,

    /// Fraction of max HP lost since last round that counts as heavy damage
    ///
    /// Only consulted in the quarter stage, where it suppresses charge
    /// and nudges toward defending.
    pub heavy_loss_rate: f64,

    /// Charge multiplier at which the monster cashes in with attacks
    pub cash_in_multiplier: f64,

    /// Health percent at or below which charging is locked out entirely
    ///
    /// This lock is enforced twice: on the integer weights and again on the
    /// noisy weights, so neither luck nor noise can revive charge.
    pub brink_pct: f64,

    /// Absolute stat bias below which attack and defense count as balanced
    pub balanced_bias: f64,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            many_players: 3,
            finisher_pct: 25.0,
            critical_target_pct: 10.0,
            strongest_focus_pct: 60.0,
            pressure_margin: 15.0,
            heavy_loss_rate: 0.20,
            cash_in_multiplier: 4.0,
            brink_pct: 15.0,
            balanced_bias: 0.15,
        }
    }
}

/// Risk appetite and luck
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    /// Maximum swing (either direction) pressure advantage adds to base risk
    ///
    /// Advantage is divided by 100 before capping, so a 20-point lead
    /// already saturates the default cap of 0.2.
    pub advantage_cap: f64,

    /// Width of the uniform jitter added to risk, centred on zero
    pub jitter: f64,

    /// Lower bound on final risk
    pub min_risk: f64,

    /// Upper bound on final risk
    pub max_risk: f64,

    /// Probability of a luck swing on any given decision
    pub luck_chance: f64,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            advantage_cap: 0.2,
            jitter: 0.1,
            min_risk: 0.05,
            max_risk: 0.95,
            luck_chance: 0.08,
        }
    }
}

/// Final action selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Noisy weights strictly closer than this to the top count as tied
    ///
    /// Ties resolve attack > defend > charge, so randomness only decides
    /// between actions when their weights are clearly apart. A margin of
    /// zero disables tie-breaking and samples by weight instead.
    pub near_tie_margin: f64,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            near_tie_margin: 0.75,
        }
    }
}

/// Complete brain profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrainConfig {
    /// Name of this profile (set from filename)
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub thresholds: ThresholdConfig,
    #[serde(default)]
    pub risk: RiskConfig,
    #[serde(default)]
    pub selection: SelectionConfig,
}

impl Default for BrainConfig {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            thresholds: ThresholdConfig::default(),
            risk: RiskConfig::default(),
            selection: SelectionConfig::default(),
        }
    }
}

impl BrainConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a profile from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: BrainConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a profile from a TOML file
    ///
    /// An unnamed profile takes the file stem as its name.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&contents)?;
        if config.name.is_empty() {
            config.name = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
        }
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        let t = &self.thresholds;
        let r = &self.risk;

        if t.many_players == 0 {
            return Err(BrainError::InvalidConfig(
                "many_players must be at least 1".into(),
            ));
        }

        let bounds = [
            t.finisher_pct,
            t.critical_target_pct,
            t.strongest_focus_pct,
            t.brink_pct,
            t.cash_in_multiplier,
        ];
        if bounds.iter().any(|v| !v.is_finite()) {
            return Err(BrainError::InvalidConfig(
                "thresholds must be finite numbers".into(),
            ));
        }

        // Target thresholds should be ordered
        if !(0.0..=100.0).contains(&t.finisher_pct) || t.critical_target_pct > t.finisher_pct {
            return Err(BrainError::InvalidConfig(format!(
                "critical_target_pct ({}) should be <= finisher_pct ({}) <= 100",
                t.critical_target_pct, t.finisher_pct
            )));
        }

        if ![t.pressure_margin, t.heavy_loss_rate, t.balanced_bias]
            .into_iter()
            .all(non_negative)
        {
            return Err(BrainError::InvalidConfig(
                "margins and rates must be non-negative".into(),
            ));
        }

        if !(0.0..=1.0).contains(&r.min_risk)
            || !(0.0..=1.0).contains(&r.max_risk)
            || r.min_risk > r.max_risk
        {
            return Err(BrainError::InvalidConfig(format!(
                "risk bounds must satisfy 0 <= min_risk ({}) <= max_risk ({}) <= 1",
                r.min_risk, r.max_risk
            )));
        }

        if !(0.0..=1.0).contains(&r.luck_chance) {
            return Err(BrainError::InvalidConfig(format!(
                "luck_chance ({}) must be a probability",
                r.luck_chance
            )));
        }

        if ![r.advantage_cap, r.jitter, self.selection.near_tie_margin]
            .into_iter()
            .all(non_negative)
        {
            return Err(BrainError::InvalidConfig(
                "advantage_cap, jitter and near_tie_margin must be non-negative".into(),
            ));
        }

        Ok(())
    }
}

fn non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

/// Load a named profile
///
/// Loads from `data/brain_profiles/{name}.toml`
pub fn load_profile(name: &str) -> Result<BrainConfig> {
    let path = profile_path(name);
    if !path.is_file() {
        return Err(BrainError::ProfileNotFound(name.to_string()));
    }

    let mut config = BrainConfig::load_from_file(&path)?;
    config.name = name.to_string();
    Ok(config)
}

/// Get path to profile file
fn profile_path(name: &str) -> PathBuf {
    PathBuf::from("data/brain_profiles").join(format!("{}.toml", name))
}
