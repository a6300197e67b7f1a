//! Battle limits and tunables.
//!
//! The wave ceiling guards a single effect-queue drain against trigger cycles
//! and is fatal when exceeded. The round ceiling bounds a whole battle and
//! ends it as a draw.
use serde::{Deserialize, Serialize};

use crate::roster::ROSTER_SIZE;
use crate::scheduler::PriorityRule;

pub const MAX_WAVES_PER_DRAIN: u32 = 64;
pub const MAX_ROUNDS: u32 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BattleConfig {
    /// Slots per roster.
    pub capacity: usize,
    /// Waves a single drain may run before the battle is abandoned.
    pub max_waves: u32,
    /// Attack rounds before the battle is called a draw.
    pub max_rounds: u32,
    /// Overrides any seed carried by the rosters.
    pub seed: Option<u64>,
    pub start_priority: PriorityRule,
    pub hurt_priority: PriorityRule,
    pub end_turn_priority: PriorityRule,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            capacity: ROSTER_SIZE,
            max_waves: MAX_WAVES_PER_DRAIN,
            max_rounds: MAX_ROUNDS,
            seed: None,
            start_priority: PriorityRule::StrongestFirst,
            hurt_priority: PriorityRule::FrontFirst,
            end_turn_priority: PriorityRule::FrontFirst,
        }
    }
}

impl BattleConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_max_waves(mut self, max_waves: u32) -> Self {
        self.max_waves = max_waves;
        self
    }

    pub fn with_max_rounds(mut self, max_rounds: u32) -> Self {
        self.max_rounds = max_rounds;
        self
    }
}
