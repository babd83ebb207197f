//! RNG oracle for deterministic random number generation.
//!
//! Every random decision a monster makes (wander angles, move and stop
//! timers, tie-breaking coin flips, sampled state durations, shooting rolls)
//! draws from the room's [`RngOracle`]. Given the same seed and the same
//! sequence of calls the simulation replays identically.

/// Stateful source of deterministic random numbers.
pub trait RngOracle: Send {
    /// Advances the generator and returns the next 32 random bits.
    fn next_u32(&mut self) -> u32;

    /// Roll a d100 (1-100 inclusive).
    fn roll_d100(&mut self) -> u32 {
        (self.next_u32() % 100) + 1
    }

    /// True with the given percent probability. 0 never succeeds and 100 or
    /// more always does.
    fn chance(&mut self, percent: u8) -> bool {
        self.roll_d100() <= u32::from(percent)
    }

    /// Fair coin flip taken from the most significant bit, which has the best
    /// statistical quality for PCG output.
    fn coin_flip(&mut self) -> bool {
        self.next_u32() >> 31 == 1
    }

    /// Generate a random value in range [min, max] inclusive.
    fn range(&mut self, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let range = max - min + 1;
        min + (self.next_u32() % range)
    }

    /// Uniform index in `[0, len)`. Returns 0 for an empty range.
    fn index(&mut self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        (self.next_u32() as usize) % len
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// This implementation uses PCG-XSH-RR, which produces 32-bit output from
/// 64-bit state.
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PcgRng {
    state: u64,
}

impl PcgRng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    pub fn new(seed: u64) -> Self {
        let mut rng = Self {
            state: Self::INCREMENT.wrapping_add(seed),
        };
        rng.state = Self::pcg_step(rng.state);
        rng
    }

    /// Advance the PCG state by one step.
    ///
    /// `state' = (state * multiplier + increment) mod 2^64`
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// PCG output function using XSH-RR (xorshift high, random rotate).
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&mut self) -> u32 {
        let previous = self.state;
        self.state = Self::pcg_step(previous);
        Self::pcg_output(previous)
    }
}

/// Compute a deterministic seed from a base seed and identifying context.
///
/// Rooms derive their generator seed from the session seed and the room id
/// so each room replays independently of the order rooms are visited in.
///
/// # Arguments
///
/// * `game_seed` - Base seed set at session start
/// * `room` - Identifier of the room being simulated
/// * `context` - Extra discriminator when one room needs several streams
pub fn compute_seed(game_seed: u64, room: u32, context: u32) -> u64 {
    let mut hash = game_seed;

    hash ^= (room as u64).wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (context as u64).wrapping_mul(0x517cc1b727220a95);

    // Final avalanche step
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}
