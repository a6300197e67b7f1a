//! Battle driver: start of battle, then attack rounds until one side is
//! empty or the round ceiling is hit.
//!
//! Every phase goes through the effect queue in [`crate::queue`] and leaves
//! a labelled entry in the battle [`History`]: `init`, `start`, then
//! `attack 0`, `attack 1` and so on.

use alloc::format;
use alloc::vec::Vec;

use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

use crate::arena::Arena;
use crate::error::{BattleError, BattleResult};
use crate::history::{History, PhaseLog};
use crate::limits::BattleConfig;
use crate::queue::{drain, drain_triggers};
use crate::resolver::{deal_damage, reap};
use crate::rng::DEFAULT_SEED;
use crate::roster::Roster;
use crate::trigger::TriggerEvent;
use crate::types::{Scope, Status, Team, TriggerKind, UnitId};

/// Extra damage dealt by a unit holding a meat bone.
pub const MEAT_BONE_BONUS: i32 = 3;
/// Damage a chili splashes onto the unit behind the defender.
pub const CHILI_SPLASH: i32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Outcome {
    Winner(Team),
    Draw,
}

impl Outcome {
    pub fn winner(self) -> Option<Team> {
        match self {
            Outcome::Winner(team) => Some(team),
            Outcome::Draw => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Start,
    /// The next round to fight, counted from 0.
    Attacking { round: u32 },
    Resolved(Outcome),
    /// A drain failed; the battle cannot continue.
    Failed(BattleError),
}

impl Phase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Resolved(_) | Phase::Failed(_))
    }
}

/// Final state of a battle run to completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleReport {
    pub outcome: Outcome,
    pub seed: u64,
    pub rounds: u32,
    pub player: Roster,
    pub enemy: Roster,
    pub history: History,
}

pub struct Battle {
    arena: Arena,
    config: BattleConfig,
    seed: u64,
    phase: Phase,
    rounds: u32,
    history: History,
}

impl Battle {
    pub fn new(player: Roster, enemy: Roster) -> BattleResult<Self> {
        Self::with_config(player, enemy, BattleConfig::default())
    }

    /// Validates both rosters and fixes the seed: the config seed, else the
    /// player roster's, else the enemy roster's.
    pub fn with_config(player: Roster, enemy: Roster, config: BattleConfig) -> BattleResult<Self> {
        for (team, roster) in [(Team::Player, &player), (Team::Enemy, &enemy)] {
            roster.validate()?;
            if roster.len() > config.capacity {
                return Err(BattleError::MalformedRoster {
                    reason: format!(
                        "{team} fields {} units, battle capacity is {}",
                        roster.len(),
                        config.capacity
                    ),
                });
            }
        }

        let seed = config
            .seed
            .or(player.seed())
            .or(enemy.seed())
            .unwrap_or(DEFAULT_SEED);
        log::info!(
            target: "battle",
            "battle {} vs {} units, seed {seed}",
            player.len(),
            enemy.len()
        );

        Ok(Self {
            arena: Arena::new(player, enemy, seed),
            config,
            seed,
            phase: Phase::Start,
            rounds: 0,
            history: History::new(),
        })
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            Phase::Resolved(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn team(&self, team: Team) -> &Roster {
        self.arena.team(team)
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Attack rounds fought so far.
    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    /// Advances by one phase. Terminal phases are left as they are.
    pub fn step(&mut self) -> BattleResult<&Phase> {
        match self.phase {
            Phase::Start => self.run_start_of_battle()?,
            Phase::Attacking { round } => self.run_attack_round(round)?,
            Phase::Resolved(_) | Phase::Failed(_) => {}
        }
        Ok(&self.phase)
    }

    /// Steps until the battle is decided.
    pub fn run(&mut self) -> BattleResult<Outcome> {
        loop {
            match self.step()? {
                Phase::Resolved(outcome) => return Ok(*outcome),
                Phase::Failed(error) => return Err(error.clone()),
                Phase::Start | Phase::Attacking { .. } => {}
            }
        }
    }

    /// Runs to completion and hands back the final rosters with the history.
    pub fn into_report(mut self) -> BattleResult<BattleReport> {
        let outcome = self.run()?;
        let (player, enemy) = self.arena.into_teams();
        Ok(BattleReport {
            outcome,
            seed: self.seed,
            rounds: self.rounds,
            player,
            enemy,
            history: self.history,
        })
    }

    /// Records `init`, then resolves every start-of-battle ability under the
    /// `start` label. Does nothing outside [`Phase::Start`].
    pub fn run_start_of_battle(&mut self) -> BattleResult<()> {
        if self.phase != Phase::Start {
            return Ok(());
        }
        self.history.begin("init").record(self.arena.snapshot());

        let mut log = PhaseLog::new("start");
        log.record(self.arena.snapshot());
        let result = drain_triggers(
            TriggerKind::StartOfBattle,
            Scope::Both,
            Team::Player,
            &mut self.arena,
            self.config.start_priority.as_fn(),
            self.config.max_waves,
            &mut log,
        );
        self.history.push(log);
        self.settle(result)?;

        self.phase = Phase::Attacking { round: 0 };
        Ok(())
    }

    fn run_attack_round(&mut self, round: u32) -> BattleResult<()> {
        if let Some(outcome) = self.decided() {
            self.resolve(outcome);
            return Ok(());
        }
        if round >= self.config.max_rounds {
            log::warn!(target: "battle", "no winner after {} rounds, calling a draw", self.config.max_rounds);
            self.resolve(Outcome::Draw);
            return Ok(());
        }

        let mut log = PhaseLog::new(format!("attack {round}"));
        log.record(self.arena.snapshot());
        let result = self.attack(&mut log);
        self.history.push(log);
        self.settle(result)?;
        self.rounds = round + 1;

        match self.decided() {
            Some(outcome) => self.resolve(outcome),
            None => self.phase = Phase::Attacking { round: round + 1 },
        }
        Ok(())
    }

    /// Before-attack abilities, the simultaneous clash of the two front
    /// units, then everything the clash set off.
    fn attack(&mut self, log: &mut PhaseLog) -> BattleResult<()> {
        let priority = self.config.hurt_priority.as_fn();
        let max_waves = self.config.max_waves;

        let before: Vec<TriggerEvent> = [Team::Player, Team::Enemy]
            .into_iter()
            .filter_map(|team| {
                self.arena
                    .team(team)
                    .front()
                    .map(|unit| TriggerEvent::own(TriggerKind::BeforeAttack, team, unit.id))
            })
            .collect();
        drain(before, &mut self.arena, priority, max_waves, log)?;

        // Both hits are computed from the pre-clash state.
        let mut hits: Vec<(UnitId, UnitId, i32)> = Vec::new();
        let mut next = Vec::new();
        for team in [Team::Player, Team::Enemy] {
            let own = self.arena.team(team);
            let foes = self.arena.team(team.opponent());
            let (Some(attacker), Some(defender)) = (own.front(), foes.front()) else {
                return Ok(());
            };

            let mut damage = attacker.combat_attack();
            if attacker.status == Some(Status::MeatBone) {
                damage += MEAT_BONE_BONUS;
            }
            hits.push((attacker.id, defender.id, damage));
            if attacker.status == Some(Status::Chili) {
                if let Some(splashed) = foes.get(1) {
                    hits.push((attacker.id, splashed.id, CHILI_SPLASH));
                }
            }
            if let Some(behind) = own.get(1) {
                next.push(TriggerEvent::to_unit(
                    TriggerKind::FriendAheadAttacks,
                    team,
                    attacker.id,
                    behind.id,
                ));
            }
        }

        for (attacker, defender, damage) in hits {
            log::trace!(target: "battle", "{attacker} hits {defender} for {damage}");
            deal_damage(&mut self.arena, Some(attacker), defender, damage, &mut next)?;
        }
        reap(&mut self.arena, &mut next);
        log.record(self.arena.snapshot());

        drain(next, &mut self.arena, priority, max_waves, log)?;
        Ok(())
    }

    fn decided(&self) -> Option<Outcome> {
        let player = self.arena.team(Team::Player).is_empty();
        let enemy = self.arena.team(Team::Enemy).is_empty();
        match (player, enemy) {
            (true, true) => Some(Outcome::Draw),
            (false, true) => Some(Outcome::Winner(Team::Player)),
            (true, false) => Some(Outcome::Winner(Team::Enemy)),
            (false, false) => None,
        }
    }

    fn resolve(&mut self, outcome: Outcome) {
        log::info!(target: "battle", "battle over after {} rounds: {:?}", self.rounds, outcome);
        self.phase = Phase::Resolved(outcome);
    }

    fn settle<T>(&mut self, result: BattleResult<T>) -> BattleResult<T> {
        if let Err(error) = &result {
            log::error!(target: "battle", "battle failed: {error}");
            self.phase = Phase::Failed(error.clone());
        }
        result
    }
}

/// Builds a battle and runs it to completion.
pub fn resolve_battle(
    player: Roster,
    enemy: Roster,
    config: BattleConfig,
) -> BattleResult<BattleReport> {
    Battle::with_config(player, enemy, config)?.into_report()
}

/// Resolves end-of-turn abilities for a single roster outside of battle.
/// Returns the updated roster and the log of the drain.
pub fn run_end_of_turn(roster: Roster, config: &BattleConfig) -> BattleResult<(Roster, PhaseLog)> {
    roster.validate()?;
    let seed = config.seed.or(roster.seed()).unwrap_or(DEFAULT_SEED);
    let capacity = roster.capacity();
    let mut arena = Arena::new(roster, Roster::with_capacity(Vec::new(), capacity)?, seed);

    let mut log = PhaseLog::new("end turn");
    log.record(arena.snapshot());
    drain_triggers(
        TriggerKind::EndOfTurn,
        Scope::Own,
        Team::Player,
        &mut arena,
        config.end_turn_priority.as_fn(),
        config.max_waves,
        &mut log,
    )?;

    let (roster, _) = arena.into_teams();
    Ok((roster, log))
}
