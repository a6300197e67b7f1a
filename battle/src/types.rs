//! Small shared types: teams, unit ids, held items, trigger kinds and charge rules.

use core::fmt;

use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

/// Stat ceiling applied whenever attack or health is modified.
pub const MAX_STAT: i32 = 50;

/// Which side of the battle a unit fights for.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Encode, Decode, TypeInfo, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum Team {
    Player,
    Enemy,
}

impl Team {
    pub fn opponent(self) -> Team {
        match self {
            Team::Player => Team::Enemy,
            Team::Enemy => Team::Player,
        }
    }

    /// Index into `[player, enemy]` pairs.
    pub fn index(self) -> usize {
        match self {
            Team::Player => 0,
            Team::Enemy => 1,
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Team::Player => f.write_str("PLAYER"),
            Team::Enemy => f.write_str("ENEMY"),
        }
    }
}

/// Stable per-battle identity of a unit instance. Never a position.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Encode, Decode, TypeInfo, Serialize, Deserialize,
)]
pub struct UnitId(pub u32);

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Held item carried into battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    /// Spawns a 1/1 Bee in the fainted slot.
    Honey,
    /// Respawns the same pet as a 1/1.
    ExtraLife,
    /// Absorbs up to 20 damage once.
    MelonArmor,
    /// Negates one damage instance.
    Coconut,
    /// Reduces every hit by 2, minimum 1.
    Garlic,
    /// Every hit taken deals 3 more.
    Weak,
    /// +3 damage when attacking.
    MeatBone,
    /// Attacks also splash 5 damage onto the second enemy.
    Chili,
}

impl Status {
    pub fn name(self) -> &'static str {
        match self {
            Status::Honey => "honey",
            Status::ExtraLife => "extra-life",
            Status::MelonArmor => "melon-armor",
            Status::Coconut => "coconut",
            Status::Garlic => "garlic",
            Status::Weak => "weak",
            Status::MeatBone => "meat-bone",
            Status::Chili => "chili",
        }
    }

    /// Statuses that are used up after modifying a single hit.
    pub fn consumed_on_hit(self) -> bool {
        matches!(self, Status::MelonArmor | Status::Coconut)
    }
}

/// Conditions that make abilities fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TriggerKind {
    StartOfBattle,
    BeforeAttack,
    Hurt,
    Faint,
    FriendFaint,
    FriendAheadFaint,
    FriendAheadAttacks,
    FriendSummoned,
    KnockOut,
    EndOfTurn,
    /// Evaluated synchronously inside damage application, never queued.
    BeforeFatalHit,
}

impl TriggerKind {
    /// Hook kinds run inline with damage and must never reach the queue.
    pub fn is_hook(self) -> bool {
        matches!(self, TriggerKind::BeforeFatalHit)
    }
}

/// Which sides react to a broadcast trigger, relative to its origin team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Scope {
    Own,
    Enemy,
    Both,
}

impl Scope {
    pub fn includes(self, origin: Team, team: Team) -> bool {
        match self {
            Scope::Own => team == origin,
            Scope::Enemy => team != origin,
            Scope::Both => true,
        }
    }

    /// Teams covered by this scope, player first.
    pub fn teams(self, origin: Team) -> impl Iterator<Item = Team> {
        [Team::Player, Team::Enemy]
            .into_iter()
            .filter(move |team| self.includes(origin, *team))
    }
}

/// How an ability's charge counter gates firing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Charge {
    Unlimited,
    /// Fires while the counter is below `n`; each firing increments it.
    Uses { n: u8 },
    /// Like `Uses`, with the limit multiplied by the unit's level.
    UsesPerLevel { n: u8 },
    /// Every trigger increments the counter; fires when it reaches `n`, then resets.
    Every { n: u8 },
}

impl Charge {
    /// Upper bound the counter may legally hold for a unit at `level`.
    pub fn threshold(self, level: u8) -> Option<i32> {
        match self {
            Charge::Unlimited => None,
            Charge::Uses { n } => Some(i32::from(n)),
            Charge::UsesPerLevel { n } => Some(i32::from(n) * i32::from(level)),
            Charge::Every { n } => Some(i32::from(n)),
        }
    }
}
