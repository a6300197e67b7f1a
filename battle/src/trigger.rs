//! Trigger events: immutable records of something that happened, queued
//! for ability dispatch and consumed exactly once by the queue loop.

use alloc::boxed::Box;

use crate::types::{Scope, Status, Team, TriggerKind, UnitId};
use crate::unit::Unit;

/// Who gets to react to an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    /// Only the source unit (hurt, faint, knock-out, before-attack).
    Source,
    /// Every unit of the sides in scope, except the source.
    Scope(Scope),
    /// One specific unit (e.g. the friend behind).
    Unit(UnitId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    None,
    /// The unit as it was when removed, with the roster position it held.
    /// Where it stands now is tracked by its grave in the arena.
    Fainted { unit: Box<Unit>, position: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerEvent {
    pub kind: TriggerKind,
    /// Team of the source, or the origin team of a broadcast.
    pub team: Team,
    pub source: Option<UnitId>,
    pub audience: Audience,
    pub payload: Payload,
}

impl TriggerEvent {
    /// A phase-wide trigger with no source unit, e.g. start of battle.
    pub fn broadcast(kind: TriggerKind, origin: Team, scope: Scope) -> Self {
        Self {
            kind,
            team: origin,
            source: None,
            audience: Audience::Scope(scope),
            payload: Payload::None,
        }
    }

    /// A trigger only the source itself reacts to.
    pub fn own(kind: TriggerKind, team: Team, source: UnitId) -> Self {
        Self {
            kind,
            team,
            source: Some(source),
            audience: Audience::Source,
            payload: Payload::None,
        }
    }

    /// A trigger every other unit on the source's side reacts to.
    pub fn friends(kind: TriggerKind, team: Team, source: UnitId) -> Self {
        Self {
            kind,
            team,
            source: Some(source),
            audience: Audience::Scope(Scope::Own),
            payload: Payload::None,
        }
    }

    /// A trigger addressed to a single unit.
    pub fn to_unit(kind: TriggerKind, team: Team, source: UnitId, target: UnitId) -> Self {
        Self {
            kind,
            team,
            source: Some(source),
            audience: Audience::Unit(target),
            payload: Payload::None,
        }
    }

    pub fn with_payload(mut self, payload: Payload) -> Self {
        self.payload = payload;
        self
    }

    /// The fainted unit carried by faint-family events, with the position
    /// it held when it fainted.
    pub fn fainted(&self) -> Option<(&Unit, usize)> {
        match &self.payload {
            Payload::Fainted { unit, position } => Some((unit.as_ref(), *position)),
            Payload::None => None,
        }
    }

    /// A `Faint` whose unit still owes a held-item spawn.
    pub fn owes_item(&self) -> bool {
        self.kind == TriggerKind::Faint
            && self.fainted().is_some_and(|(unit, _)| {
                matches!(unit.status, Some(Status::Honey | Status::ExtraLife))
            })
    }
}
