//! Phase history: ordered snapshots of both rosters, grouped by phase label.
//!
//! Each entry of a [`PhaseLog`] is the state at a wave boundary, so the
//! before/after pair of wave `k` is entries `k` and `k + 1`.

use alloc::string::String;
use alloc::vec::Vec;

use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

/// Unit display strings of (player, enemy), front first.
#[derive(Debug, Clone, PartialEq, Eq, Default, Encode, Decode, TypeInfo, Serialize, Deserialize)]
pub struct Snapshot(pub Vec<String>, pub Vec<String>);

#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseLog {
    pub phase: String,
    pub snapshots: Vec<Snapshot>,
}

impl PhaseLog {
    pub fn new(phase: impl Into<String>) -> Self {
        Self {
            phase: phase.into(),
            snapshots: Vec::new(),
        }
    }

    pub fn record(&mut self, snapshot: Snapshot) {
        self.snapshots.push(snapshot);
    }

    pub fn first(&self) -> Option<&Snapshot> {
        self.snapshots.first()
    }

    pub fn last(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }
}

/// Phase logs in the order the phases ran.
#[derive(Debug, Clone, PartialEq, Eq, Default, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    entries: Vec<PhaseLog>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a new phase entry and returns it for recording.
    pub fn begin(&mut self, phase: impl Into<String>) -> &mut PhaseLog {
        self.entries.push(PhaseLog::new(phase));
        let last = self.entries.len() - 1;
        &mut self.entries[last]
    }

    pub fn push(&mut self, log: PhaseLog) {
        self.entries.push(log);
    }

    /// The first entry recorded under `phase`.
    pub fn get(&self, phase: &str) -> Option<&PhaseLog> {
        self.entries.iter().find(|log| log.phase == phase)
    }

    pub fn last(&self) -> Option<&PhaseLog> {
        self.entries.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PhaseLog> {
        self.entries.iter()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|log| log.phase.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
