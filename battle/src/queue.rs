//! The effect queue: drains trigger events in waves until none are left.
//!
//! A wave is every event produced by the previous wave. Its reactions are
//! scheduled once, up front; anything they produce waits for the next wave.
//! Fainted units are reaped after every single reaction.
//!
//! Held items of fainted units (honey, extra life) wait until the ability
//! chain goes quiet, then resolve together as one more wave.

use alloc::string::String;
use alloc::vec::Vec;
use core::mem;

use crate::arena::Arena;
use crate::error::{BattleError, BattleResult};
use crate::history::PhaseLog;
use crate::resolver::{reap, resolve_reaction};
use crate::scheduler::{schedule, schedule_items, PriorityFn};
use crate::trigger::TriggerEvent;
use crate::types::{Scope, Team, TriggerKind};

/// Broadcasts `kind` to the sides in `scope` and drains the result.
pub fn drain_triggers(
    kind: TriggerKind,
    scope: Scope,
    origin: Team,
    arena: &mut Arena,
    priority: PriorityFn,
    max_waves: u32,
    log: &mut PhaseLog,
) -> BattleResult<u32> {
    drain(
        alloc::vec![TriggerEvent::broadcast(kind, origin, scope)],
        arena,
        priority,
        max_waves,
        log,
    )
}

/// Resolves `frontier` and everything it causes. Records a snapshot after
/// every wave that ran at least one reaction, and returns the number of
/// waves processed. Graves left by this drain are dropped when it returns.
pub fn drain(
    frontier: Vec<TriggerEvent>,
    arena: &mut Arena,
    priority: PriorityFn,
    max_waves: u32,
    log: &mut PhaseLog,
) -> BattleResult<u32> {
    let result = drain_waves(frontier, arena, priority, max_waves, log);
    arena.clear_graves();
    result
}

fn drain_waves(
    mut frontier: Vec<TriggerEvent>,
    arena: &mut Arena,
    priority: PriorityFn,
    max_waves: u32,
    log: &mut PhaseLog,
) -> BattleResult<u32> {
    let mut waves = 0;
    let mut next = Vec::new();
    // Faint events whose unit still owes its held item.
    let mut deferred: Vec<TriggerEvent> = Vec::new();

    while !frontier.is_empty() || !deferred.is_empty() {
        if waves >= max_waves {
            log::warn!(
                target: "battle",
                "phase {} still has {} events after {waves} waves",
                log.phase,
                frontier.len() + deferred.len()
            );
            return Err(BattleError::ResolutionOverflow {
                phase: String::from(log.phase.as_str()),
                waves,
            });
        }
        waves += 1;

        let reactions = if frontier.is_empty() {
            frontier = mem::take(&mut deferred);
            schedule_items(&frontier, arena, priority)
        } else {
            deferred.extend(frontier.iter().filter(|event| event.owes_item()).cloned());
            schedule(&frontier, arena, priority)
        };
        log::trace!(
            target: "battle",
            "{} wave {waves}: {} events, {} reactions",
            log.phase,
            frontier.len(),
            reactions.len()
        );

        for reaction in &reactions {
            // Units that fainted earlier in this wave no longer react.
            if !reaction.fainted && !arena.is_alive(reaction.unit) {
                continue;
            }
            resolve_reaction(reaction, &frontier[reaction.event], arena, &mut next)?;
            reap(arena, &mut next);
        }

        if !reactions.is_empty() {
            log.record(arena.snapshot());
        }
        frontier = mem::take(&mut next);
    }

    Ok(waves)
}
