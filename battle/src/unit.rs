//! Unit: a single pet instance with mutable combat attributes.

use alloc::format;
use alloc::string::String;
use core::fmt;

use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

use crate::abilities::{ability_for, Ability};
use crate::pets::PetKind;
use crate::types::{Status, TriggerKind, UnitId, MAX_STAT};

/// Experience needed to reach level 2 and level 3.
pub const LEVEL_THRESHOLDS: [u8; 2] = [2, 5];
/// Experience ceiling (a level 3 pet cannot gain more).
pub const MAX_EXPERIENCE: u8 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    pub kind: PetKind,
    /// Assigned by the battle; `UnitId(0)` until then.
    #[serde(default)]
    pub id: UnitId,
    pub attack: i32,
    pub health: i32,
    #[serde(default)]
    pub experience: u8,
    #[serde(default)]
    pub ability_counter: i32,
    #[serde(default)]
    pub status: Option<Status>,
}

impl Unit {
    /// A level 1 pet with its base stats.
    pub fn new(kind: PetKind) -> Self {
        let stats = kind.base_stats();
        Self {
            kind,
            id: UnitId::default(),
            attack: stats.attack,
            health: stats.health,
            experience: 0,
            ability_counter: 0,
            status: None,
        }
    }

    pub fn with_stats(mut self, attack: i32, health: i32) -> Self {
        self.attack = attack;
        self.health = health;
        self
    }

    /// Sets experience to the threshold of `level` (clamped to 1..=3).
    pub fn with_level(mut self, level: u8) -> Self {
        self.experience = match level {
            0 | 1 => 0,
            2 => LEVEL_THRESHOLDS[0],
            _ => LEVEL_THRESHOLDS[1],
        };
        self
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    pub fn level(&self) -> u8 {
        if self.experience >= LEVEL_THRESHOLDS[1] {
            3
        } else if self.experience >= LEVEL_THRESHOLDS[0] {
            2
        } else {
            1
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Attack as used in combat and in attack-scaled abilities.
    pub fn combat_attack(&self) -> i32 {
        self.attack.max(0)
    }

    /// The ability this pet has for `trigger`, if any.
    pub fn ability(&self, trigger: TriggerKind) -> Option<&'static Ability> {
        ability_for(self.kind, trigger)
    }

    /// Applies a stat delta, clamping both stats into `0..=MAX_STAT`.
    pub fn modify_stats(&mut self, attack: i32, health: i32) {
        self.attack = (self.attack + attack).clamp(0, MAX_STAT);
        self.health = (self.health + health).clamp(0, MAX_STAT);
    }

    /// Reduces health by `amount`; health never goes below zero.
    pub fn take_damage(&mut self, amount: i32) {
        self.health = (self.health - amount.max(0)).max(0);
    }

    /// The visible stats in the form stored by the history log.
    pub fn snapshot(&self) -> String {
        format!("{self}")
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "< Pet {} {}-{} {} L{} c{} >",
            self.kind.name(),
            self.attack.max(0),
            self.health.max(0),
            self.status.map(Status::name).unwrap_or("none"),
            self.level(),
            self.ability_counter,
        )
    }
}
