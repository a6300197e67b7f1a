#![cfg_attr(not(feature = "std"), no_std)]

//! Deterministic battle engine for Super Auto Battler.
//!
//! Two rosters of pets fight front to back. Every ability is routed through
//! a wave-based effect queue with a pluggable priority scheduler, so the same
//! rosters and seed always produce the same battle and the same history.

extern crate alloc;

pub mod abilities;
pub mod arena;
pub mod battle;
pub mod error;
pub mod history;
pub mod limits;
pub mod pets;
pub mod queue;
pub mod resolver;
pub mod rng;
pub mod roster;
pub mod scheduler;
pub mod trigger;
pub mod types;
pub mod unit;

#[cfg(test)]
mod tests;

pub use battle::{resolve_battle, run_end_of_turn, Battle, BattleReport, Outcome, Phase};
pub use error::{BattleError, BattleResult};
pub use history::{History, PhaseLog, Snapshot};
pub use limits::BattleConfig;
pub use pets::PetKind;
pub use roster::Roster;
pub use scheduler::PriorityRule;
pub use types::*;
pub use unit::Unit;
