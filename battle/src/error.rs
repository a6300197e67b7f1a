//! Error types for battle resolution
//!
//! Game-legal situations (an ability with no eligible target, a spawn into a
//! full roster) are never errors. Everything here ends the battle run.

use alloc::string::String;

use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

use crate::types::UnitId;

#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize, thiserror::Error)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BattleError {
    /// The effect queue did not settle within the wave ceiling.
    #[error("phase `{phase}` did not settle within {waves} waves")]
    ResolutionOverflow { phase: String, waves: u32 },
    /// A roster was rejected before resolution began.
    #[error("malformed roster: {reason}")]
    MalformedRoster { reason: String },
    /// A charge counter was negative or past its threshold.
    #[error("unit {unit} has inconsistent charge counter {counter}")]
    ChargeInvariant { unit: UnitId, counter: i32 },
    /// An effect referred to a unit that is neither on a roster nor fainting.
    #[error("unit {unit} not found")]
    UnitNotFound { unit: UnitId },
}

/// Result type alias for battle operations
pub type BattleResult<T> = Result<T, BattleError>;
