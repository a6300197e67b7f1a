//! Pet catalogue: base stats, tiers and display names.
//!
//! Abilities are kept separately in [`crate::abilities`], keyed by
//! `(PetKind, TriggerKind)`.

use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PetKind {
    Ant,
    Cricket,
    Mosquito,
    Fish,
    Horse,
    Camel,
    Dolphin,
    Dodo,
    Blowfish,
    Badger,
    Hedgehog,
    Flamingo,
    Sheep,
    Spider,
    Turtle,
    Kangaroo,
    Ox,
    Fly,
    Shark,
    Rhino,
    Peacock,
    Giraffe,
    Boar,
    Hive,
    Tortoise,
    // Tokens
    ZombieCricket,
    ZombieFly,
    Ram,
    Bee,
}

/// Base attack and health of a freshly created pet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaseStats {
    pub attack: i32,
    pub health: i32,
}

/// Pets a Spider may summon.
pub const TIER_THREE_POOL: &[PetKind] = &[
    PetKind::Blowfish,
    PetKind::Camel,
    PetKind::Dodo,
    PetKind::Kangaroo,
    PetKind::Ox,
    PetKind::Sheep,
    PetKind::Badger,
    PetKind::Giraffe,
    PetKind::Turtle,
];

impl PetKind {
    pub fn name(self) -> &'static str {
        match self {
            PetKind::Ant => "ant",
            PetKind::Cricket => "cricket",
            PetKind::Mosquito => "mosquito",
            PetKind::Fish => "fish",
            PetKind::Horse => "horse",
            PetKind::Camel => "camel",
            PetKind::Dolphin => "dolphin",
            PetKind::Dodo => "dodo",
            PetKind::Blowfish => "blowfish",
            PetKind::Badger => "badger",
            PetKind::Hedgehog => "hedgehog",
            PetKind::Flamingo => "flamingo",
            PetKind::Sheep => "sheep",
            PetKind::Spider => "spider",
            PetKind::Turtle => "turtle",
            PetKind::Kangaroo => "kangaroo",
            PetKind::Ox => "ox",
            PetKind::Fly => "fly",
            PetKind::Shark => "shark",
            PetKind::Rhino => "rhino",
            PetKind::Peacock => "peacock",
            PetKind::Giraffe => "giraffe",
            PetKind::Boar => "boar",
            PetKind::Hive => "hive",
            PetKind::Tortoise => "tortoise",
            PetKind::ZombieCricket => "zombie-cricket",
            PetKind::ZombieFly => "zombie-fly",
            PetKind::Ram => "ram",
            PetKind::Bee => "bee",
        }
    }

    pub fn base_stats(self) -> BaseStats {
        let (attack, health) = match self {
            PetKind::Ant => (2, 1),
            PetKind::Cricket => (1, 2),
            PetKind::Mosquito => (2, 2),
            PetKind::Fish => (2, 2),
            PetKind::Horse => (2, 1),
            PetKind::Camel => (2, 6),
            PetKind::Dolphin => (4, 6),
            PetKind::Dodo => (2, 3),
            PetKind::Blowfish => (3, 5),
            PetKind::Badger => (5, 4),
            PetKind::Hedgehog => (3, 2),
            PetKind::Flamingo => (4, 2),
            PetKind::Sheep => (2, 2),
            PetKind::Spider => (2, 2),
            PetKind::Turtle => (1, 2),
            PetKind::Kangaroo => (1, 2),
            PetKind::Ox => (1, 3),
            PetKind::Fly => (5, 5),
            PetKind::Shark => (4, 4),
            PetKind::Rhino => (5, 8),
            PetKind::Peacock => (2, 5),
            PetKind::Giraffe => (2, 5),
            PetKind::Boar => (8, 6),
            PetKind::Hive => (1, 4),
            PetKind::Tortoise => (2, 4),
            PetKind::ZombieCricket => (1, 1),
            PetKind::ZombieFly => (4, 4),
            PetKind::Ram => (2, 2),
            PetKind::Bee => (1, 1),
        };
        BaseStats { attack, health }
    }

    /// Shop tier, 0 for summoned tokens.
    pub fn tier(self) -> u8 {
        match self {
            PetKind::Ant | PetKind::Cricket | PetKind::Mosquito | PetKind::Fish | PetKind::Horse => 1,
            PetKind::Camel | PetKind::Dolphin | PetKind::Flamingo | PetKind::Hedgehog | PetKind::Peacock => 2,
            PetKind::Blowfish
            | PetKind::Dodo
            | PetKind::Kangaroo
            | PetKind::Ox
            | PetKind::Sheep
            | PetKind::Badger
            | PetKind::Giraffe
            | PetKind::Turtle => 3,
            PetKind::Spider | PetKind::Hive | PetKind::Tortoise => 2,
            PetKind::Fly | PetKind::Shark | PetKind::Rhino | PetKind::Boar => 5,
            PetKind::ZombieCricket | PetKind::ZombieFly | PetKind::Ram | PetKind::Bee => 0,
        }
    }

    pub fn is_token(self) -> bool {
        self.tier() == 0
    }

    /// Parses the kebab-case name used in unit strings and JSON rosters.
    pub fn from_name(name: &str) -> Option<PetKind> {
        ALL_PETS.iter().copied().find(|kind| kind.name() == name)
    }
}

/// Every pet kind, in declaration order.
pub const ALL_PETS: &[PetKind] = &[
    PetKind::Ant,
    PetKind::Cricket,
    PetKind::Mosquito,
    PetKind::Fish,
    PetKind::Horse,
    PetKind::Camel,
    PetKind::Dolphin,
    PetKind::Dodo,
    PetKind::Blowfish,
    PetKind::Badger,
    PetKind::Hedgehog,
    PetKind::Flamingo,
    PetKind::Sheep,
    PetKind::Spider,
    PetKind::Turtle,
    PetKind::Kangaroo,
    PetKind::Ox,
    PetKind::Fly,
    PetKind::Shark,
    PetKind::Rhino,
    PetKind::Peacock,
    PetKind::Giraffe,
    PetKind::Boar,
    PetKind::Hive,
    PetKind::Tortoise,
    PetKind::ZombieCricket,
    PetKind::ZombieFly,
    PetKind::Ram,
    PetKind::Bee,
];
