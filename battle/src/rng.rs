//! The battle's single source of randomness.
//!
//! The arena owns one generator, seeded from the config or a roster, and
//! lends it to each effect function in resolution order. Random targets
//! (ant, mosquito, blowfish) and spider summons are the only draws, so the
//! same seed and rosters always replay the same history.

use alloc::vec::Vec;

use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;

/// Seed used when neither the config nor a roster supplies one.
pub const DEFAULT_SEED: u64 = 0x5eed;

/// What effect functions may draw from. Object safe, so abilities take
/// `&mut dyn BattleRng` and tests can script the draws.
pub trait BattleRng {
    fn next_u32(&mut self) -> u32;

    /// A draw from `0..max`; `max == 0` yields 0 without advancing.
    fn gen_range(&mut self, max: usize) -> usize {
        if max == 0 {
            return 0;
        }
        (self.next_u32() as usize) % max
    }

    /// Up to `count` distinct indices from `0..len`, in draw order.
    fn sample_indices(&mut self, len: usize, count: usize) -> Vec<usize> {
        let mut pool: Vec<usize> = (0..len).collect();
        let count = count.min(len);
        for i in 0..count {
            let j = i + self.gen_range(len - i);
            pool.swap(i, j);
        }
        pool.truncate(count);
        pool
    }
}

/// XorShift32 generator. Cloned into effect calls and written back, so its
/// state is part of the arena.
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo)]
pub struct XorShiftRng {
    state: u32,
}

impl XorShiftRng {
    /// Folds both halves of `seed` into the 32-bit state. Zero is not a
    /// valid xorshift state and becomes 1.
    pub fn seed_from_u64(seed: u64) -> Self {
        let state = ((seed as u32) ^ ((seed >> 32) as u32)).max(1);
        Self { state }
    }
}

impl BattleRng for XorShiftRng {
    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }
}
