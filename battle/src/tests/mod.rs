mod ordering;
mod scenarios;
mod statuses;

use alloc::string::String;
use alloc::vec::Vec;

use crate::battle::{resolve_battle, Battle, BattleReport};
use crate::limits::BattleConfig;
use crate::pets::PetKind;
use crate::roster::Roster;
use crate::types::{Status, Team};
use crate::unit::Unit;

// ==========================================
// HELPER FUNCTIONS (Boilerplate Reduction)
// ==========================================

fn pet(kind: PetKind) -> Unit {
    Unit::new(kind)
}

fn pet_with(kind: PetKind, attack: i32, health: i32) -> Unit {
    Unit::new(kind).with_stats(attack, health)
}

fn holding(unit: Unit, status: Status) -> Unit {
    unit.with_status(status)
}

fn roster(units: Vec<Unit>) -> Roster {
    Roster::new(units).expect("test roster should be valid")
}

fn config(seed: u64) -> BattleConfig {
    BattleConfig::default().with_seed(seed)
}

fn create_battle(player: Vec<Unit>, enemy: Vec<Unit>) -> Battle {
    Battle::with_config(roster(player), roster(enemy), config(42)).expect("battle should build")
}

/// A battle that has resolved its start phase and nothing else.
fn start_only(player: Vec<Unit>, enemy: Vec<Unit>) -> Battle {
    let mut battle = create_battle(player, enemy);
    battle
        .run_start_of_battle()
        .expect("start of battle should settle");
    battle
}

/// Steps through the start phase and the first `rounds` attack rounds.
fn after_rounds(player: Vec<Unit>, enemy: Vec<Unit>, rounds: usize) -> Battle {
    let mut battle = start_only(player, enemy);
    for _ in 0..rounds {
        battle.step().expect("attack round should settle");
    }
    battle
}

fn run_battle(player: Vec<Unit>, enemy: Vec<Unit>, seed: u64) -> BattleReport {
    resolve_battle(roster(player), roster(enemy), config(seed)).expect("battle should resolve")
}

fn snapshot(battle: &Battle, team: Team) -> Vec<String> {
    battle.team(team).snapshot()
}

fn line(name: &str, attack: i32, health: i32, status: &str, level: u8, counter: i32) -> String {
    alloc::format!("< Pet {name} {attack}-{health} {status} L{level} c{counter} >")
}
