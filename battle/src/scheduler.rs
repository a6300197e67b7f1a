//! Priority scheduler: decides the order in which units react to a wave of
//! trigger events.
//!
//! Within one roster, reactions always run front to back. Between the two
//! rosters a caller-supplied [`PriorityFn`] picks which side's next
//! reaction goes first, so different phases can use different side rules
//! without touching the queue loop.

use alloc::vec::Vec;
use core::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::abilities::Ability;
use crate::arena::Arena;
use crate::trigger::{Audience, TriggerEvent};
use crate::types::{Scope, Status, Team, TriggerKind, UnitId};
use crate::unit::Unit;

/// What the scheduler knows about a reaction when ordering it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub team: Team,
    pub position: usize,
    pub attack: i32,
    pub health: i32,
}

/// Decides between the next player reaction and the next enemy reaction.
/// `Less` or `Equal` runs the first argument first.
pub type PriorityFn = fn(&Candidate, &Candidate) -> Ordering;

/// Named side rules, selectable from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PriorityRule {
    /// Lower position first; ties go to the player.
    #[default]
    FrontFirst,
    /// Higher attack, then higher health first; ties go to the player.
    StrongestFirst,
    /// The whole player side before the enemy side.
    PlayerFirst,
}

impl PriorityRule {
    pub fn as_fn(self) -> PriorityFn {
        match self {
            PriorityRule::FrontFirst => front_first,
            PriorityRule::StrongestFirst => strongest_first,
            PriorityRule::PlayerFirst => player_first,
        }
    }
}

pub fn front_first(a: &Candidate, b: &Candidate) -> Ordering {
    a.position.cmp(&b.position).then(a.team.cmp(&b.team))
}

pub fn strongest_first(a: &Candidate, b: &Candidate) -> Ordering {
    b.attack
        .cmp(&a.attack)
        .then(b.health.cmp(&a.health))
        .then(a.team.cmp(&b.team))
}

pub fn player_first(a: &Candidate, b: &Candidate) -> Ordering {
    a.team.cmp(&b.team)
}

/// The part of a unit that reacts.
#[derive(Debug, Clone, Copy)]
pub enum Responder {
    Ability(&'static Ability),
    /// A held item reacting to its holder fainting.
    Item(Status),
}

/// One scheduled reaction: a unit answering one event of the wave.
#[derive(Debug, Clone)]
pub struct Reaction {
    /// Index of the event within the wave.
    pub event: usize,
    pub unit: UnitId,
    pub responder: Responder,
    pub candidate: Candidate,
    /// Reacting from a faint payload rather than from a roster.
    pub fainted: bool,
}

/// Which responders a scheduling pass collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    Abilities,
    /// Held items of fainted units. Runs once the ability chain is quiet.
    Items,
}

/// Orders every ability reaction owed for `events`.
pub fn schedule(events: &[TriggerEvent], arena: &Arena, priority: PriorityFn) -> Vec<Reaction> {
    order(events, arena, priority, Pass::Abilities)
}

/// Orders the held-item spawns owed for the `Faint` events in `events`.
pub fn schedule_items(
    events: &[TriggerEvent],
    arena: &Arena,
    priority: PriorityFn,
) -> Vec<Reaction> {
    order(events, arena, priority, Pass::Items)
}

fn order(events: &[TriggerEvent], arena: &Arena, priority: PriorityFn, pass: Pass) -> Vec<Reaction> {
    let mut per_team: [Vec<Reaction>; 2] = [Vec::new(), Vec::new()];

    for (index, event) in events.iter().enumerate() {
        debug_assert!(!event.kind.is_hook(), "hook triggers are never queued");
        collect_reactions(index, event, arena, pass, &mut per_team);
    }

    // Stable: one unit answering several events keeps event order.
    for reactions in per_team.iter_mut() {
        reactions.sort_by_key(|reaction| reaction.candidate.position);
    }

    let [player, enemy] = per_team;
    merge(player, enemy, priority)
}

/// Units that would react to a broadcast of `kind`, in resolution order.
pub fn units_for(
    kind: TriggerKind,
    scope: Scope,
    origin: Team,
    arena: &Arena,
    priority: PriorityFn,
) -> Vec<UnitId> {
    schedule(&[TriggerEvent::broadcast(kind, origin, scope)], arena, priority)
        .into_iter()
        .map(|reaction| reaction.unit)
        .collect()
}

fn collect_reactions(
    index: usize,
    event: &TriggerEvent,
    arena: &Arena,
    pass: Pass,
    per_team: &mut [Vec<Reaction>; 2],
) {
    let mut push = |team: Team, position: usize, unit: &Unit, fainted: bool| {
        let responder = match pass {
            Pass::Abilities => unit.ability(event.kind).map(Responder::Ability),
            Pass::Items if event.owes_item() => unit.status.map(Responder::Item),
            Pass::Items => None,
        };
        let Some(responder) = responder else {
            return;
        };
        per_team[team.index()].push(Reaction {
            event: index,
            unit: unit.id,
            responder,
            candidate: Candidate {
                team,
                position,
                attack: unit.combat_attack(),
                health: unit.health,
            },
            fainted,
        });
    };

    match event.audience {
        Audience::Source => {
            let Some(source) = event.source else {
                return;
            };
            match event.fainted() {
                Some((unit, position)) if unit.id == source => {
                    push(event.team, position, unit, true);
                }
                _ => {
                    if let Some((team, position)) = arena.locate(source) {
                        if let Some(unit) = arena.team(team).get(position) {
                            if unit.is_alive() {
                                push(team, position, unit, false);
                            }
                        }
                    }
                }
            }
        }
        Audience::Scope(scope) => {
            for team in scope.teams(event.team) {
                for (position, unit) in arena.team(team).living() {
                    if Some(unit.id) != event.source {
                        push(team, position, unit, false);
                    }
                }
            }
        }
        Audience::Unit(target) => {
            if let Some((team, position)) = arena.locate(target) {
                if let Some(unit) = arena.team(team).get(position) {
                    if unit.is_alive() {
                        push(team, position, unit, false);
                    }
                }
            }
        }
    }
}

/// Interleaves two front-to-back lists, asking `priority` only about heads,
/// so each side's own order is never disturbed.
fn merge(player: Vec<Reaction>, enemy: Vec<Reaction>, priority: PriorityFn) -> Vec<Reaction> {
    let mut merged = Vec::with_capacity(player.len() + enemy.len());
    let mut player = player.into_iter().peekable();
    let mut enemy = enemy.into_iter().peekable();

    loop {
        let take_player = match (player.peek(), enemy.peek()) {
            (Some(p), Some(e)) => priority(&p.candidate, &e.candidate) != Ordering::Greater,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => break,
        };
        let next = if take_player { player.next() } else { enemy.next() };
        merged.extend(next);
    }

    merged
}
