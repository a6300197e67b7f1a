//! The mutable state a battle resolves against: both rosters, the single
//! seeded generator and the unit id allocator.
//!
//! Units refer to each other only through [`UnitId`] or by position lookup at
//! the moment an effect needs them.
//!
//! Rosters are always compact. While a drain is running, every unit that
//! fainted during it also leaves a [`Grave`]: a marker for where it stood
//! among the living units and the other graves. Spawns owed to a fainted
//! unit are placed against its grave, so several deaths in one cascade keep
//! their relative order. Slots in this module index the combined line of
//! living units and graves; positions index the roster.

use alloc::vec::Vec;

use crate::history::Snapshot;
use crate::rng::XorShiftRng;
use crate::roster::Roster;
use crate::types::{Status, Team, UnitId};
use crate::unit::Unit;

/// Where a unit that fainted during the current drain stood.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grave {
    pub unit: UnitId,
    slot: usize,
    /// A held item still owed its spawn. Reserves one roster slot.
    pub item: Option<Status>,
}

#[derive(Debug, Clone)]
pub struct Arena {
    teams: [Roster; 2],
    pub(crate) rng: XorShiftRng,
    next_id: u32,
    /// (victim, attacker) pairs for lethal hits not yet reaped.
    kills: Vec<(UnitId, UnitId)>,
    /// Per team, sorted by slot.
    graves: [Vec<Grave>; 2],
}

impl Arena {
    /// Takes ownership of both rosters and assigns ids, player units first.
    pub fn new(player: Roster, enemy: Roster, seed: u64) -> Self {
        let mut arena = Self {
            teams: [player, enemy],
            rng: XorShiftRng::seed_from_u64(seed),
            next_id: 1,
            kills: Vec::new(),
            graves: [Vec::new(), Vec::new()],
        };
        for index in 0..2 {
            let mut next_id = arena.next_id;
            for unit in arena.teams[index].iter_mut() {
                unit.id = UnitId(next_id);
                next_id += 1;
            }
            arena.next_id = next_id;
        }
        arena
    }

    pub fn team(&self, team: Team) -> &Roster {
        &self.teams[team.index()]
    }

    pub fn team_mut(&mut self, team: Team) -> &mut Roster {
        &mut self.teams[team.index()]
    }

    /// Team and current position of a unit still on a roster.
    pub fn locate(&self, id: UnitId) -> Option<(Team, usize)> {
        [Team::Player, Team::Enemy].into_iter().find_map(|team| {
            self.team(team)
                .position_of(id)
                .map(|position| (team, position))
        })
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.locate(id)
            .and_then(|(team, position)| self.team(team).get(position))
    }

    pub fn unit_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        let (team, position) = self.locate(id)?;
        self.team_mut(team).get_mut(position)
    }

    /// True if the unit is on a roster with health left.
    pub fn is_alive(&self, id: UnitId) -> bool {
        self.unit(id).is_some_and(Unit::is_alive)
    }

    pub fn allocate_id(&mut self) -> UnitId {
        let id = UnitId(self.next_id);
        self.next_id += 1;
        id
    }

    pub(crate) fn record_kill(&mut self, victim: UnitId, attacker: UnitId) {
        self.kills.push((victim, attacker));
    }

    pub(crate) fn take_kills(&mut self) -> Vec<(UnitId, UnitId)> {
        core::mem::take(&mut self.kills)
    }

    /// Slot of the living unit at roster `position`.
    pub(crate) fn slot_of(&self, team: Team, position: usize) -> usize {
        let mut slot = position;
        for grave in &self.graves[team.index()] {
            if grave.slot > slot {
                break;
            }
            slot += 1;
        }
        slot
    }

    /// Roster position a unit placed at `slot` ends up in.
    fn position_at(&self, team: Team, slot: usize) -> usize {
        let before = self.graves[team.index()]
            .iter()
            .filter(|grave| grave.slot < slot)
            .count();
        slot - before
    }

    pub fn grave(&self, team: Team, unit: UnitId) -> Option<&Grave> {
        self.graves[team.index()]
            .iter()
            .find(|grave| grave.unit == unit)
    }

    /// Slot of a unit's grave.
    pub(crate) fn grave_slot(&self, team: Team, unit: UnitId) -> Option<usize> {
        self.grave(team, unit).map(|grave| grave.slot)
    }

    /// Roster position of the first living unit behind a grave, which is
    /// also the number of living units ahead of it.
    pub fn grave_position(&self, team: Team, unit: UnitId) -> Option<usize> {
        self.grave_slot(team, unit)
            .map(|slot| self.position_at(team, slot))
    }

    /// Marks a unit that was at `slot` before its removal from the roster.
    pub(crate) fn bury(&mut self, team: Team, slot: usize, unit: &Unit) {
        let item = unit
            .status
            .filter(|status| matches!(status, Status::Honey | Status::ExtraLife));
        let graves = &mut self.graves[team.index()];
        let at = graves.partition_point(|grave| grave.slot < slot);
        graves.insert(
            at,
            Grave {
                unit: unit.id,
                slot,
                item,
            },
        );
    }

    /// Hands out the item a grave still owes, releasing its reserved slot.
    pub(crate) fn take_item(&mut self, team: Team, unit: UnitId) -> Option<Status> {
        self.graves[team.index()]
            .iter_mut()
            .find(|grave| grave.unit == unit)
            .and_then(|grave| grave.item.take())
    }

    /// Roster slots held back for pending held-item spawns.
    pub fn reserved(&self, team: Team) -> usize {
        self.graves[team.index()]
            .iter()
            .filter(|grave| grave.item.is_some())
            .count()
    }

    /// True if one more unit fits once pending items are accounted for.
    pub fn has_room(&self, team: Team) -> bool {
        let roster = self.team(team);
        roster.len() + self.reserved(team) < roster.capacity()
    }

    /// Inserts `unit` at `slot`, pushing every grave at or behind it back.
    /// Returns the roster position it took, or `None` if there was no room.
    pub(crate) fn place(&mut self, team: Team, slot: usize, unit: Unit) -> Option<usize> {
        if !self.has_room(team) {
            return None;
        }
        let position = self.position_at(team, slot).min(self.team(team).len());
        if !self.team_mut(team).insert(position, unit) {
            return None;
        }
        for grave in self.graves[team.index()].iter_mut() {
            if grave.slot >= slot {
                grave.slot += 1;
            }
        }
        Some(position)
    }

    /// Forgets every grave. Called once a drain has settled.
    pub(crate) fn clear_graves(&mut self) {
        for graves in self.graves.iter_mut() {
            graves.clear();
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot(
            self.team(Team::Player).snapshot(),
            self.team(Team::Enemy).snapshot(),
        )
    }

    pub fn into_teams(self) -> (Roster, Roster) {
        let [player, enemy] = self.teams;
        (player, enemy)
    }
}
