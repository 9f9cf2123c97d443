//! NPC brain for Energon Pets monster battles
//!
//! Architecture: pure decision function + injected randomness
//! - MonsterState / PlayerState describe one round
//! - BattleContext derives the quantities every heuristic reads
//! - Deliberation walks stage baseline and situational adjustments
//! - select rolls risk, luck and noise, then picks the action
//! - NpcBrain ties it together behind the MonsterAi trait

pub mod adjust;
pub mod context;
pub mod engine;
pub mod rng;
pub mod select;
pub mod stage;
pub mod state;
pub mod weights;

pub use adjust::Deliberation;
pub use context::BattleContext;
pub use engine::{DecisionReport, DeliberationTrace, MonsterAi, NpcBrain};
pub use rng::{BrainRng, ScriptedRng, SeededRng};
pub use select::RiskRoll;
pub use stage::HealthStage;
pub use state::{Decision, MonsterState, PlayerState};
pub use weights::{ActionWeights, NoisyWeights};

/// Decide with the default profile
pub fn decide_action(monster: &MonsterState, players: &[PlayerState]) -> Decision {
    NpcBrain::default().decide_action(monster, players)
}
