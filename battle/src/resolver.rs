//! Applies one reaction at a time: charge gating, effect application, the
//! pre-damage hook and reaping of fainted units into graves.
//!
//! Every event produced here goes into the caller's `next` buffer, never into
//! the wave currently being resolved.

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::abilities::{Ability, AbilityContext, Effect, SpawnAt};
use crate::arena::Arena;
use crate::error::{BattleError, BattleResult};
use crate::pets::PetKind;
use crate::scheduler::{Reaction, Responder};
use crate::trigger::{Payload, TriggerEvent};
use crate::types::{Charge, Status, Team, TriggerKind, UnitId};
use crate::unit::Unit;

/// What the charge counter allows for one trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Gate {
    /// Run the effect. `counter` is stored once it applies anything, or
    /// unconditionally when `always` is set.
    Fire { counter: i32, always: bool },
    /// Do not run; store `counter`.
    Hold { counter: i32 },
}

fn gate(charge: Charge, unit: &Unit) -> BattleResult<Gate> {
    let counter = unit.ability_counter;
    let corrupt = counter < 0
        || match charge {
            Charge::Every { n } => counter >= i32::from(n),
            _ => charge
                .threshold(unit.level())
                .is_some_and(|limit| counter > limit),
        };
    if corrupt {
        return Err(BattleError::ChargeInvariant {
            unit: unit.id,
            counter,
        });
    }

    Ok(match charge {
        // Tallies how often it fired.
        Charge::Unlimited => Gate::Fire {
            counter: counter.saturating_add(1),
            always: false,
        },
        Charge::Uses { .. } | Charge::UsesPerLevel { .. } => {
            let limit = charge.threshold(unit.level()).unwrap_or(i32::MAX);
            if counter >= limit {
                Gate::Hold { counter }
            } else {
                Gate::Fire {
                    counter: counter + 1,
                    always: false,
                }
            }
        }
        Charge::Every { n } => {
            let counter = counter + 1;
            if counter >= i32::from(n) {
                Gate::Fire {
                    counter: 0,
                    always: true,
                }
            } else {
                Gate::Hold { counter }
            }
        }
    })
}

fn store_counter(arena: &mut Arena, id: UnitId, counter: i32) {
    if let Some(unit) = arena.unit_mut(id) {
        unit.ability_counter = counter;
    }
}

/// Calls an effect function against the current arena. The RNG is lent out
/// for the call and written back afterwards.
fn run_effect(
    ability: &Ability,
    unit: &Unit,
    team: Team,
    position: usize,
    fainted: bool,
    event: &TriggerEvent,
    arena: &mut Arena,
) -> Vec<Effect> {
    let mut rng = arena.rng.clone();
    let effects = {
        let ctx = AbilityContext {
            unit,
            team,
            position,
            fainted,
            event,
            arena: &*arena,
        };
        (ability.effect)(&ctx, &mut rng)
    };
    arena.rng = rng;
    effects
}

/// Resolves one scheduled reaction to `event`.
pub fn resolve_reaction(
    reaction: &Reaction,
    event: &TriggerEvent,
    arena: &mut Arena,
    next: &mut Vec<TriggerEvent>,
) -> BattleResult<()> {
    let (unit, team, position) = if reaction.fainted {
        let (unit, position) = event.fainted().ok_or(BattleError::UnitNotFound {
            unit: reaction.unit,
        })?;
        let position = arena
            .grave_position(event.team, unit.id)
            .unwrap_or(position);
        (unit.clone(), event.team, position)
    } else {
        let Some((team, position)) = arena.locate(reaction.unit) else {
            return Ok(());
        };
        match arena.team(team).get(position) {
            Some(unit) if unit.is_alive() => (unit.clone(), team, position),
            _ => return Ok(()),
        }
    };

    match reaction.responder {
        Responder::Ability(ability) => {
            let counter = match gate(ability.charge, &unit)? {
                Gate::Hold { counter } => {
                    log::trace!(target: "battle", "{} {} held (counter {counter})", ability.name, unit.id);
                    store_counter(arena, unit.id, counter);
                    return Ok(());
                }
                Gate::Fire { counter, always } => {
                    if always {
                        store_counter(arena, unit.id, counter);
                    }
                    counter
                }
            };

            log::debug!(target: "battle", "{} {} resolves {:?}", ability.name, unit.id, event.kind);
            let effects = run_effect(ability, &unit, team, position, reaction.fainted, event, arena);
            if apply_effects(effects, unit.id, arena, next)? {
                store_counter(arena, unit.id, counter);
            }
        }
        Responder::Item(_) => {
            let Some(status) = arena.take_item(team, unit.id) else {
                return Ok(());
            };
            let template = match status {
                Status::Honey => Unit::new(PetKind::Bee),
                Status::ExtraLife => {
                    let mut revived = Unit::new(unit.kind).with_stats(1, 1);
                    revived.experience = unit.experience;
                    revived
                }
                _ => return Ok(()),
            };
            log::debug!(target: "battle", "{} {} item {}", unit.kind.name(), unit.id, status.name());
            spawn(arena, team, SpawnAt::BeforeGrave(unit.id), &template, 1, next);
        }
    }

    Ok(())
}

/// Applies effects in order. Returns whether any of them changed the arena.
pub fn apply_effects(
    effects: Vec<Effect>,
    source: UnitId,
    arena: &mut Arena,
    next: &mut Vec<TriggerEvent>,
) -> BattleResult<bool> {
    let mut applied = false;
    for effect in effects {
        applied |= apply_effect(effect, source, arena, next)?;
    }
    Ok(applied)
}

fn apply_effect(
    effect: Effect,
    source: UnitId,
    arena: &mut Arena,
    next: &mut Vec<TriggerEvent>,
) -> BattleResult<bool> {
    match effect {
        Effect::ModifyStats {
            target,
            attack,
            health,
        } => match arena.unit_mut(target) {
            Some(unit) if unit.is_alive() => {
                unit.modify_stats(attack, health);
                Ok(true)
            }
            _ => Ok(false),
        },
        Effect::Damage { target, amount } => deal_damage(arena, Some(source), target, amount, next),
        Effect::SetStatus { target, status } => match arena.unit_mut(target) {
            Some(unit) if unit.is_alive() => {
                unit.status = Some(status);
                Ok(true)
            }
            _ => Ok(false),
        },
        Effect::Spawn {
            team,
            at,
            template,
            count,
        } => Ok(spawn(arena, team, at, &template, count, next) > 0),
        // Only the pre-damage hook interprets this.
        Effect::Endure { .. } => Ok(false),
    }
}

/// Inserts up to `count` copies of `template`, each with a fresh id. Copies
/// that do not fit are dropped; existing units are never displaced, and
/// slots reserved for pending held items are left free.
pub fn spawn(
    arena: &mut Arena,
    team: Team,
    at: SpawnAt,
    template: &Unit,
    count: u8,
    next: &mut Vec<TriggerEvent>,
) -> usize {
    let start = match at {
        SpawnAt::Behind(anchor) => arena
            .team(team)
            .position_of(anchor)
            .map(|position| arena.slot_of(team, position) + 1),
        SpawnAt::BeforeGrave(fainted) => arena.grave_slot(team, fainted),
        SpawnAt::AfterGrave(fainted) => arena.grave_slot(team, fainted).map(|slot| slot + 1),
    };
    let Some(mut slot) = start else {
        log::debug!(target: "battle", "{team} has no anchor {at:?} for {}", template.kind.name());
        return 0;
    };

    let mut spawned = 0;
    for _ in 0..count {
        if !arena.has_room(team) {
            log::debug!(
                target: "battle",
                "{team} roster full, dropping {} spawn(s) of {}",
                usize::from(count) - spawned,
                template.kind.name()
            );
            break;
        }
        let mut unit = template.clone();
        unit.id = arena.allocate_id();
        let id = unit.id;
        let Some(position) = arena.place(team, slot, unit) else {
            break;
        };
        log::debug!(target: "battle", "{team} spawns {} {id} at {position}", template.kind.name());
        next.push(TriggerEvent::friends(TriggerKind::FriendSummoned, team, id));
        slot += 1;
        spawned += 1;
    }
    spawned
}

/// Deals one damage instance. Held items modify it and the fatal-hit hook
/// runs before health drops. Returns false if the target was not a living
/// unit.
pub fn deal_damage(
    arena: &mut Arena,
    attacker: Option<UnitId>,
    target: UnitId,
    amount: i32,
    next: &mut Vec<TriggerEvent>,
) -> BattleResult<bool> {
    let Some((team, position)) = arena.locate(target) else {
        return Ok(false);
    };
    let amount = match arena.team_mut(team).get_mut(position) {
        Some(unit) if unit.is_alive() => absorb(unit, amount),
        _ => return Ok(false),
    };
    let amount = endure(arena, team, position, amount)?;

    let Some(unit) = arena.team_mut(team).get_mut(position) else {
        return Err(BattleError::UnitNotFound { unit: target });
    };
    if amount <= 0 {
        return Ok(true);
    }
    unit.take_damage(amount);
    log::trace!(target: "battle", "{target} takes {amount}, {} left", unit.health);

    if unit.is_alive() {
        next.push(TriggerEvent::own(TriggerKind::Hurt, team, target));
    } else if let Some(attacker) = attacker {
        arena.record_kill(target, attacker);
    }
    Ok(true)
}

/// Held item modifiers for a single hit.
fn absorb(unit: &mut Unit, amount: i32) -> i32 {
    let Some(status) = unit.status else {
        return amount;
    };
    if amount <= 0 {
        return amount;
    }
    let amount = match status {
        Status::Coconut => 0,
        Status::MelonArmor => (amount - 20).max(0),
        Status::Garlic => (amount - 2).max(1),
        Status::Weak => amount + 3,
        _ => amount,
    };
    if status.consumed_on_hit() {
        unit.status = None;
    }
    amount
}

/// Runs the holder's `BeforeFatalHit` ability if `amount` would kill it.
/// Returns the damage that should actually be dealt.
fn endure(arena: &mut Arena, team: Team, position: usize, amount: i32) -> BattleResult<i32> {
    let Some(unit) = arena.team(team).get(position).cloned() else {
        return Ok(amount);
    };
    if amount < unit.health {
        return Ok(amount);
    }
    let Some(ability) = unit.ability(TriggerKind::BeforeFatalHit) else {
        return Ok(amount);
    };

    let counter = match gate(ability.charge, &unit)? {
        Gate::Hold { counter } => {
            store_counter(arena, unit.id, counter);
            return Ok(amount);
        }
        Gate::Fire { counter, .. } => counter,
    };

    let event = TriggerEvent::own(TriggerKind::BeforeFatalHit, team, unit.id);
    let effects = run_effect(ability, &unit, team, position, false, &event, arena);
    let survive_at = effects.iter().find_map(|effect| match effect {
        Effect::Endure { health } => Some(*health),
        _ => None,
    });

    match survive_at {
        Some(health) => {
            store_counter(arena, unit.id, counter);
            log::debug!(target: "battle", "{} {} endures at {health}", ability.name, unit.id);
            Ok((unit.health - health.max(1)).max(0))
        }
        None => Ok(amount),
    }
}

/// Moves every fainted unit from its roster into a grave and queues the
/// faint family of events plus one knock-out per living attacker.
pub fn reap(arena: &mut Arena, next: &mut Vec<TriggerEvent>) {
    let kills = arena.take_kills();
    let mut knockouts: Vec<UnitId> = Vec::new();

    for team in [Team::Player, Team::Enemy] {
        let roster = arena.team(team);
        // (slot, living unit behind) for each fainted unit, front first.
        let marks: Vec<(usize, Option<UnitId>)> = roster
            .iter()
            .enumerate()
            .filter(|(_, unit)| !unit.is_alive())
            .map(|(position, _)| {
                let behind = roster
                    .iter()
                    .skip(position + 1)
                    .find(|unit| unit.is_alive())
                    .map(|unit| unit.id);
                (arena.slot_of(team, position), behind)
            })
            .collect();

        let fainted = arena.team_mut(team).remove_fainted();
        for ((position, unit), (slot, behind)) in fainted.into_iter().zip(marks) {
            let id = unit.id;
            log::debug!(target: "battle", "{team} {} {id} faints at {position}", unit.kind.name());
            arena.bury(team, slot, &unit);

            for (_, attacker) in kills.iter().filter(|(victim, _)| *victim == id) {
                let hostile = arena
                    .locate(*attacker)
                    .is_some_and(|(attacker_team, _)| attacker_team != team);
                if hostile && !knockouts.contains(attacker) {
                    knockouts.push(*attacker);
                }
            }

            let payload = Payload::Fainted {
                unit: Box::new(unit),
                position,
            };
            next.push(TriggerEvent::own(TriggerKind::Faint, team, id).with_payload(payload.clone()));
            next.push(
                TriggerEvent::friends(TriggerKind::FriendFaint, team, id)
                    .with_payload(payload.clone()),
            );
            if let Some(behind) = behind {
                next.push(
                    TriggerEvent::to_unit(TriggerKind::FriendAheadFaint, team, id, behind)
                        .with_payload(payload),
                );
            }
        }
    }

    for attacker in knockouts {
        if let Some((team, position)) = arena.locate(attacker) {
            if arena.team(team).get(position).is_some_and(Unit::is_alive) {
                next.push(TriggerEvent::own(TriggerKind::KnockOut, team, attacker));
            }
        }
    }
}
