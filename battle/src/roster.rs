//! Roster: one side's ordered, fixed-capacity line of units.
//!
//! Position 0 is the front. A roster never holds gaps once a battle has
//! started: fainted units are removed with [`Roster::remove_fainted`] and the
//! units behind slide forward.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

use crate::error::{BattleError, BattleResult};
use crate::pets::PetKind;
use crate::types::{UnitId, MAX_STAT};
use crate::unit::{Unit, MAX_EXPERIENCE};

/// Number of roster slots
pub const ROSTER_SIZE: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Roster {
    units: Vec<Unit>,
    capacity: u8,
    #[serde(default)]
    seed: Option<u64>,
}

impl Roster {
    /// Builds a roster with the default capacity.
    pub fn new(units: Vec<Unit>) -> BattleResult<Self> {
        Self::with_capacity(units, ROSTER_SIZE)
    }

    pub fn with_capacity(units: Vec<Unit>, capacity: usize) -> BattleResult<Self> {
        let capacity = u8::try_from(capacity).map_err(|_| BattleError::MalformedRoster {
            reason: format!("capacity {capacity} is too large"),
        })?;
        let roster = Self {
            units,
            capacity,
            seed: None,
        };
        roster.validate()?;
        Ok(roster)
    }

    /// Builds a roster from shop-style slots, closing any gaps.
    pub fn from_slots(slots: Vec<Option<Unit>>, capacity: usize) -> BattleResult<Self> {
        if slots.len() > capacity {
            return Err(BattleError::MalformedRoster {
                reason: format!("{} slots exceed capacity {capacity}", slots.len()),
            });
        }
        Self::with_capacity(slots.into_iter().flatten().collect(), capacity)
    }

    /// Level 1 pets with base stats, front first.
    pub fn from_kinds(kinds: &[PetKind]) -> BattleResult<Self> {
        Self::new(kinds.iter().copied().map(Unit::new).collect())
    }

    /// Attaches the seed the battle should draw its randomness from.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Checks the construction-time invariants.
    pub fn validate(&self) -> BattleResult<()> {
        let malformed = |reason: String| Err(BattleError::MalformedRoster { reason });

        if self.capacity == 0 {
            return malformed(String::from("capacity must be at least 1"));
        }
        if self.units.len() > self.capacity() {
            return malformed(format!(
                "{} units exceed capacity {}",
                self.units.len(),
                self.capacity
            ));
        }
        for (position, unit) in self.units.iter().enumerate() {
            if unit.experience > MAX_EXPERIENCE {
                return malformed(format!(
                    "{} at {position} has experience {} (max {MAX_EXPERIENCE})",
                    unit.kind.name(),
                    unit.experience
                ));
            }
            if unit.attack < 0 || unit.health < 0 {
                return malformed(format!(
                    "{} at {position} has negative stats",
                    unit.kind.name()
                ));
            }
            if unit.attack > MAX_STAT || unit.health > MAX_STAT {
                return malformed(format!(
                    "{} at {position} is above the stat ceiling {MAX_STAT}",
                    unit.kind.name()
                ));
            }
            if unit.health == 0 {
                return malformed(format!("{} at {position} has no health", unit.kind.name()));
            }
            if unit.ability_counter < 0 {
                return malformed(format!(
                    "{} at {position} has negative charge counter {}",
                    unit.kind.name(),
                    unit.ability_counter
                ));
            }
        }
        Ok(())
    }

    pub fn capacity(&self) -> usize {
        usize::from(self.capacity)
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.units.len() >= self.capacity()
    }

    pub fn get(&self, position: usize) -> Option<&Unit> {
        self.units.get(position)
    }

    pub fn get_mut(&mut self, position: usize) -> Option<&mut Unit> {
        self.units.get_mut(position)
    }

    pub fn front(&self) -> Option<&Unit> {
        self.units.first()
    }

    pub fn position_of(&self, id: UnitId) -> Option<usize> {
        self.units.iter().position(|unit| unit.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Unit> {
        self.units.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Unit> {
        self.units.iter_mut()
    }

    /// Units with health left, front first, paired with their positions.
    pub fn living(&self) -> impl Iterator<Item = (usize, &Unit)> {
        self.units.iter().enumerate().filter(|(_, unit)| unit.is_alive())
    }

    /// Inserts `unit` at `position` (clamped to the back). Returns `false`
    /// and leaves the roster untouched when it is already full.
    pub fn insert(&mut self, position: usize, unit: Unit) -> bool {
        if self.is_full() {
            return false;
        }
        let position = position.min(self.units.len());
        self.units.insert(position, unit);
        true
    }

    /// Removes every unit at or below zero health, preserving the order of
    /// the survivors. Returns the removed units with the positions they
    /// occupied before removal, front first.
    pub fn remove_fainted(&mut self) -> Vec<(usize, Unit)> {
        let mut fainted = Vec::new();
        let mut survivors = Vec::with_capacity(self.units.len());
        for (position, unit) in self.units.drain(..).enumerate() {
            if unit.is_alive() {
                survivors.push(unit);
            } else {
                fainted.push((position, unit));
            }
        }
        self.units = survivors;
        fainted
    }

    /// One display string per unit, front first.
    pub fn snapshot(&self) -> Vec<String> {
        self.units.iter().map(Unit::snapshot).collect()
    }
}
