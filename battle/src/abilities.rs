//! Ability table and the per-pet effect functions.
//!
//! An ability is pure data plus one effect function. Effect functions only
//! read the arena and draw from the battle RNG; they return [`Effect`]s which
//! the resolver applies. Targets are chosen by position at the moment the
//! ability resolves and carried as [`UnitId`]s.

use alloc::vec;
use alloc::vec::Vec;

use crate::arena::Arena;
use crate::pets::{PetKind, TIER_THREE_POOL};
use crate::rng::BattleRng;
use crate::roster::Roster;
use crate::trigger::TriggerEvent;
use crate::types::{Charge, Status, Team, TriggerKind, UnitId};
use crate::unit::Unit;

pub type EffectFn = fn(&AbilityContext<'_>, &mut dyn BattleRng) -> Vec<Effect>;

#[derive(Debug)]
pub struct Ability {
    pub name: &'static str,
    pub trigger: TriggerKind,
    pub charge: Charge,
    pub effect: EffectFn,
}

/// Where spawned units go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnAt {
    /// Directly behind a unit still on the roster.
    Behind(UnitId),
    /// Directly in front of the grave of a unit that fainted this drain.
    BeforeGrave(UnitId),
    /// Directly behind the grave of a unit that fainted this drain.
    AfterGrave(UnitId),
}

/// A state change requested by an ability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    ModifyStats {
        target: UnitId,
        attack: i32,
        health: i32,
    },
    Damage {
        target: UnitId,
        amount: i32,
    },
    SetStatus {
        target: UnitId,
        status: Status,
    },
    /// Up to `count` copies of `template`; copies that do not fit are dropped.
    Spawn {
        team: Team,
        at: SpawnAt,
        template: Unit,
        count: u8,
    },
    /// Only meaningful from a `BeforeFatalHit` hook: the hit leaves the
    /// holder at `health` instead of killing it.
    Endure { health: i32 },
}

/// Everything an effect function may look at.
pub struct AbilityContext<'a> {
    /// The reacting unit, taken from the faint payload when it has fainted.
    pub unit: &'a Unit,
    pub team: Team,
    /// Current position. For a fainted unit, the position of the first
    /// living friend behind its grave.
    pub position: usize,
    pub fainted: bool,
    pub event: &'a TriggerEvent,
    pub arena: &'a Arena,
}

impl<'a> AbilityContext<'a> {
    pub fn level(&self) -> i32 {
        i32::from(self.unit.level())
    }

    fn allies(&self) -> &'a Roster {
        self.arena.team(self.team)
    }

    fn enemies(&self) -> &'a Roster {
        self.arena.team(self.team.opponent())
    }

    fn living_ally_at(&self, index: usize) -> Option<UnitId> {
        self.allies()
            .get(index)
            .filter(|unit| unit.is_alive() && unit.id != self.unit.id)
            .map(|unit| unit.id)
    }

    /// Up to `count` living friends directly behind, nearest first.
    pub fn friends_behind(&self, count: usize) -> Vec<UnitId> {
        let start = if self.fainted {
            self.position
        } else {
            self.position + 1
        };
        (start..self.allies().len())
            .filter_map(|index| self.living_ally_at(index))
            .take(count)
            .collect()
    }

    /// Up to `count` living friends directly ahead, nearest first.
    pub fn friends_ahead(&self, count: usize) -> Vec<UnitId> {
        let end = self.position.min(self.allies().len());
        (0..end)
            .rev()
            .filter_map(|index| self.living_ally_at(index))
            .take(count)
            .collect()
    }

    pub fn living_friends(&self) -> Vec<UnitId> {
        self.allies()
            .living()
            .filter(|(_, unit)| unit.id != self.unit.id)
            .map(|(_, unit)| unit.id)
            .collect()
    }

    pub fn living_enemies(&self) -> Vec<UnitId> {
        self.enemies().living().map(|(_, unit)| unit.id).collect()
    }

    pub fn front_enemy(&self) -> Option<UnitId> {
        self.enemies().living().next().map(|(_, unit)| unit.id)
    }

    pub fn random_friends(&self, rng: &mut dyn BattleRng, count: usize) -> Vec<UnitId> {
        pick(self.living_friends(), rng, count)
    }

    pub fn random_enemies(&self, rng: &mut dyn BattleRng, count: usize) -> Vec<UnitId> {
        pick(self.living_enemies(), rng, count)
    }
}

fn pick(pool: Vec<UnitId>, rng: &mut dyn BattleRng, count: usize) -> Vec<UnitId> {
    rng.sample_indices(pool.len(), count)
        .into_iter()
        .map(|index| pool[index])
        .collect()
}

/// The ability `kind` has for `trigger`, if any.
pub fn ability_for(kind: PetKind, trigger: TriggerKind) -> Option<&'static Ability> {
    abilities(kind)
        .iter()
        .find(|ability| ability.trigger == trigger)
}

pub fn abilities(kind: PetKind) -> &'static [Ability] {
    match kind {
        PetKind::Ant => ANT,
        PetKind::Cricket => CRICKET,
        PetKind::Mosquito => MOSQUITO,
        PetKind::Horse => HORSE,
        PetKind::Camel => CAMEL,
        PetKind::Dolphin => DOLPHIN,
        PetKind::Dodo => DODO,
        PetKind::Blowfish => BLOWFISH,
        PetKind::Badger => BADGER,
        PetKind::Hedgehog => HEDGEHOG,
        PetKind::Flamingo => FLAMINGO,
        PetKind::Sheep => SHEEP,
        PetKind::Spider => SPIDER,
        PetKind::Turtle => TURTLE,
        PetKind::Kangaroo => KANGAROO,
        PetKind::Ox => OX,
        PetKind::Fly => FLY,
        PetKind::Shark => SHARK,
        PetKind::Rhino => RHINO,
        PetKind::Peacock => PEACOCK,
        PetKind::Giraffe => GIRAFFE,
        PetKind::Boar => BOAR,
        PetKind::Hive => HIVE,
        PetKind::Tortoise => TORTOISE,
        PetKind::Fish
        | PetKind::ZombieCricket
        | PetKind::ZombieFly
        | PetKind::Ram
        | PetKind::Bee => &[],
    }
}

static ANT: &[Ability] = &[Ability {
    name: "Ant Faint",
    trigger: TriggerKind::Faint,
    charge: Charge::Unlimited,
    effect: ant_faint,
}];

static CRICKET: &[Ability] = &[Ability {
    name: "Cricket Faint",
    trigger: TriggerKind::Faint,
    charge: Charge::Unlimited,
    effect: cricket_faint,
}];

static MOSQUITO: &[Ability] = &[Ability {
    name: "Mosquito Start",
    trigger: TriggerKind::StartOfBattle,
    charge: Charge::Unlimited,
    effect: mosquito_start,
}];

static HORSE: &[Ability] = &[Ability {
    name: "Horse Summon",
    trigger: TriggerKind::FriendSummoned,
    charge: Charge::Unlimited,
    effect: horse_summon,
}];

static CAMEL: &[Ability] = &[Ability {
    name: "Camel Hurt",
    trigger: TriggerKind::Hurt,
    charge: Charge::Unlimited,
    effect: camel_hurt,
}];

static DOLPHIN: &[Ability] = &[Ability {
    name: "Dolphin Start",
    trigger: TriggerKind::StartOfBattle,
    charge: Charge::Unlimited,
    effect: dolphin_start,
}];

static DODO: &[Ability] = &[Ability {
    name: "Dodo Start",
    trigger: TriggerKind::StartOfBattle,
    charge: Charge::Unlimited,
    effect: dodo_start,
}];

static BLOWFISH: &[Ability] = &[Ability {
    name: "Blowfish Hurt",
    trigger: TriggerKind::Hurt,
    charge: Charge::Unlimited,
    effect: blowfish_hurt,
}];

static BADGER: &[Ability] = &[Ability {
    name: "Badger Faint",
    trigger: TriggerKind::Faint,
    charge: Charge::Unlimited,
    effect: badger_faint,
}];

static HEDGEHOG: &[Ability] = &[Ability {
    name: "Hedgehog Faint",
    trigger: TriggerKind::Faint,
    charge: Charge::Unlimited,
    effect: hedgehog_faint,
}];

static FLAMINGO: &[Ability] = &[Ability {
    name: "Flamingo Faint",
    trigger: TriggerKind::Faint,
    charge: Charge::Unlimited,
    effect: flamingo_faint,
}];

static SHEEP: &[Ability] = &[Ability {
    name: "Sheep Faint",
    trigger: TriggerKind::Faint,
    charge: Charge::Unlimited,
    effect: sheep_faint,
}];

static SPIDER: &[Ability] = &[Ability {
    name: "Spider Faint",
    trigger: TriggerKind::Faint,
    charge: Charge::Unlimited,
    effect: spider_faint,
}];

static TURTLE: &[Ability] = &[Ability {
    name: "Turtle Faint",
    trigger: TriggerKind::Faint,
    charge: Charge::Unlimited,
    effect: turtle_faint,
}];

static KANGAROO: &[Ability] = &[Ability {
    name: "Kangaroo Friend Attacks",
    trigger: TriggerKind::FriendAheadAttacks,
    charge: Charge::Unlimited,
    effect: kangaroo_friend_attacks,
}];

static OX: &[Ability] = &[Ability {
    name: "Ox Friend Ahead Faint",
    trigger: TriggerKind::FriendAheadFaint,
    charge: Charge::Unlimited,
    effect: ox_friend_ahead_faint,
}];

static FLY: &[Ability] = &[Ability {
    name: "Fly Friend Faint",
    trigger: TriggerKind::FriendFaint,
    charge: Charge::Uses { n: 3 },
    effect: fly_friend_faint,
}];

static SHARK: &[Ability] = &[Ability {
    name: "Shark Friend Faint",
    trigger: TriggerKind::FriendFaint,
    charge: Charge::Unlimited,
    effect: shark_friend_faint,
}];

static RHINO: &[Ability] = &[Ability {
    name: "Rhino Knock Out",
    trigger: TriggerKind::KnockOut,
    charge: Charge::Unlimited,
    effect: rhino_knock_out,
}];

static PEACOCK: &[Ability] = &[Ability {
    name: "Peacock Hurt",
    trigger: TriggerKind::Hurt,
    charge: Charge::UsesPerLevel { n: 1 },
    effect: peacock_hurt,
}];

static GIRAFFE: &[Ability] = &[Ability {
    name: "Giraffe End Turn",
    trigger: TriggerKind::EndOfTurn,
    charge: Charge::Unlimited,
    effect: giraffe_end_turn,
}];

static BOAR: &[Ability] = &[Ability {
    name: "Boar Before Attack",
    trigger: TriggerKind::BeforeAttack,
    charge: Charge::Unlimited,
    effect: boar_before_attack,
}];

static HIVE: &[Ability] = &[Ability {
    name: "Hive Friend Faint",
    trigger: TriggerKind::FriendFaint,
    charge: Charge::Every { n: 2 },
    effect: hive_friend_faint,
}];

static TORTOISE: &[Ability] = &[Ability {
    name: "Tortoise Endure",
    trigger: TriggerKind::BeforeFatalHit,
    charge: Charge::Uses { n: 2 },
    effect: tortoise_endure,
}];

// ==========================================
// EFFECT FUNCTIONS
// ==========================================

fn buff(targets: Vec<UnitId>, attack: i32, health: i32) -> Vec<Effect> {
    targets
        .into_iter()
        .map(|target| Effect::ModifyStats {
            target,
            attack,
            health,
        })
        .collect()
}

fn hit(targets: Vec<UnitId>, amount: i32) -> Vec<Effect> {
    targets
        .into_iter()
        .map(|target| Effect::Damage { target, amount })
        .collect()
}

/// Faint spawns go behind the unit's own grave, so a held item or a fly
/// can still claim the spot in front of it.
fn spawn_behind_grave(ctx: &AbilityContext<'_>, template: Unit, count: u8) -> Vec<Effect> {
    vec![Effect::Spawn {
        team: ctx.team,
        at: SpawnAt::AfterGrave(ctx.unit.id),
        template,
        count,
    }]
}

fn ant_faint(ctx: &AbilityContext<'_>, rng: &mut dyn BattleRng) -> Vec<Effect> {
    let level = ctx.level();
    buff(ctx.random_friends(rng, 1), 2 * level, level)
}

fn cricket_faint(ctx: &AbilityContext<'_>, _rng: &mut dyn BattleRng) -> Vec<Effect> {
    let level = ctx.level();
    let zombie = Unit::new(PetKind::ZombieCricket).with_stats(level, level);
    spawn_behind_grave(ctx, zombie, 1)
}

fn mosquito_start(ctx: &AbilityContext<'_>, rng: &mut dyn BattleRng) -> Vec<Effect> {
    let count = usize::from(ctx.unit.level());
    hit(ctx.random_enemies(rng, count), 1)
}

fn horse_summon(ctx: &AbilityContext<'_>, _rng: &mut dyn BattleRng) -> Vec<Effect> {
    match ctx.event.source {
        Some(summoned) if ctx.arena.is_alive(summoned) => buff(vec![summoned], ctx.level(), 0),
        _ => Vec::new(),
    }
}

fn camel_hurt(ctx: &AbilityContext<'_>, _rng: &mut dyn BattleRng) -> Vec<Effect> {
    let level = ctx.level();
    buff(ctx.friends_behind(1), level, 2 * level)
}

fn dolphin_start(ctx: &AbilityContext<'_>, _rng: &mut dyn BattleRng) -> Vec<Effect> {
    // Lowest health first; ties go to the unit nearer the front.
    let mut enemies: Vec<(i32, usize, UnitId)> = ctx
        .enemies()
        .living()
        .map(|(position, unit)| (unit.health, position, unit.id))
        .collect();
    enemies.sort();
    let targets = enemies
        .into_iter()
        .take(usize::from(ctx.unit.level()))
        .map(|(_, _, id)| id)
        .collect();
    hit(targets, 5)
}

fn dodo_start(ctx: &AbilityContext<'_>, _rng: &mut dyn BattleRng) -> Vec<Effect> {
    let share = ctx.unit.combat_attack() * ctx.level() / 2;
    if share == 0 {
        return Vec::new();
    }
    buff(ctx.friends_ahead(1), share, 0)
}

fn blowfish_hurt(ctx: &AbilityContext<'_>, rng: &mut dyn BattleRng) -> Vec<Effect> {
    hit(ctx.random_enemies(rng, 1), 2 * ctx.level())
}

fn badger_faint(ctx: &AbilityContext<'_>, _rng: &mut dyn BattleRng) -> Vec<Effect> {
    let amount = (ctx.unit.combat_attack() * ctx.level() / 2).max(1);
    let mut targets = ctx.friends_ahead(1);
    if targets.is_empty() {
        // Nothing ahead on our side: the neighbour is across the front line.
        targets.extend(ctx.front_enemy());
    }
    targets.extend(ctx.friends_behind(1));
    hit(targets, amount)
}

fn hedgehog_faint(ctx: &AbilityContext<'_>, _rng: &mut dyn BattleRng) -> Vec<Effect> {
    let mut targets = ctx.living_friends();
    targets.extend(ctx.living_enemies());
    hit(targets, 2 * ctx.level())
}

fn flamingo_faint(ctx: &AbilityContext<'_>, _rng: &mut dyn BattleRng) -> Vec<Effect> {
    let level = ctx.level();
    buff(ctx.friends_behind(2), level, level)
}

fn sheep_faint(ctx: &AbilityContext<'_>, _rng: &mut dyn BattleRng) -> Vec<Effect> {
    let level = ctx.level();
    let ram = Unit::new(PetKind::Ram).with_stats(2 * level, 2 * level);
    spawn_behind_grave(ctx, ram, 2)
}

fn spider_faint(ctx: &AbilityContext<'_>, rng: &mut dyn BattleRng) -> Vec<Effect> {
    let kind = TIER_THREE_POOL[rng.gen_range(TIER_THREE_POOL.len())];
    let summoned = Unit::new(kind).with_stats(2, 2).with_level(ctx.unit.level());
    spawn_behind_grave(ctx, summoned, 1)
}

fn turtle_faint(ctx: &AbilityContext<'_>, _rng: &mut dyn BattleRng) -> Vec<Effect> {
    ctx.friends_behind(usize::from(ctx.unit.level()))
        .into_iter()
        .map(|target| Effect::SetStatus {
            target,
            status: Status::MelonArmor,
        })
        .collect()
}

fn kangaroo_friend_attacks(ctx: &AbilityContext<'_>, _rng: &mut dyn BattleRng) -> Vec<Effect> {
    let level = ctx.level();
    buff(vec![ctx.unit.id], 2 * level, 2 * level)
}

fn ox_friend_ahead_faint(ctx: &AbilityContext<'_>, _rng: &mut dyn BattleRng) -> Vec<Effect> {
    vec![
        Effect::SetStatus {
            target: ctx.unit.id,
            status: Status::MelonArmor,
        },
        Effect::ModifyStats {
            target: ctx.unit.id,
            attack: ctx.level(),
            health: 0,
        },
    ]
}

fn fly_friend_faint(ctx: &AbilityContext<'_>, _rng: &mut dyn BattleRng) -> Vec<Effect> {
    let Some((fainted, _)) = ctx.event.fainted() else {
        return Vec::new();
    };
    if fainted.kind == PetKind::ZombieFly {
        return Vec::new();
    }
    let power = 4 * ctx.level();
    vec![Effect::Spawn {
        team: ctx.team,
        at: SpawnAt::BeforeGrave(fainted.id),
        template: Unit::new(PetKind::ZombieFly).with_stats(power, power),
        count: 1,
    }]
}

fn shark_friend_faint(ctx: &AbilityContext<'_>, _rng: &mut dyn BattleRng) -> Vec<Effect> {
    let level = ctx.level();
    buff(vec![ctx.unit.id], 2 * level, 2 * level)
}

fn rhino_knock_out(ctx: &AbilityContext<'_>, _rng: &mut dyn BattleRng) -> Vec<Effect> {
    hit(ctx.front_enemy().into_iter().collect(), 4 * ctx.level())
}

fn peacock_hurt(ctx: &AbilityContext<'_>, _rng: &mut dyn BattleRng) -> Vec<Effect> {
    buff(vec![ctx.unit.id], 4, 0)
}

fn giraffe_end_turn(ctx: &AbilityContext<'_>, _rng: &mut dyn BattleRng) -> Vec<Effect> {
    buff(ctx.friends_ahead(usize::from(ctx.unit.level())), 1, 1)
}

fn boar_before_attack(ctx: &AbilityContext<'_>, _rng: &mut dyn BattleRng) -> Vec<Effect> {
    let level = ctx.level();
    buff(vec![ctx.unit.id], 2 * level, 2 * level)
}

fn hive_friend_faint(ctx: &AbilityContext<'_>, _rng: &mut dyn BattleRng) -> Vec<Effect> {
    vec![Effect::Spawn {
        team: ctx.team,
        at: SpawnAt::Behind(ctx.unit.id),
        template: Unit::new(PetKind::Bee),
        count: ctx.unit.level(),
    }]
}

fn tortoise_endure(_ctx: &AbilityContext<'_>, _rng: &mut dyn BattleRng) -> Vec<Effect> {
    vec![Effect::Endure { health: 1 }]
}
