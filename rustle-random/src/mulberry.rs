use crate::{Random, TWO_POW_32};

/// Increment applied to the state before every draw.
const INCREMENT: u32 = 0x6D2B_79F5;

/// Mixes a state word into a double in `[0, 1)`.
#[inline]
fn mix(state: u32) -> f64 {
    let mut t = (state ^ (state >> 15)).wrapping_mul(state | 1);
    t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
    f64::from(t ^ (t >> 14)) / TWO_POW_32
}

/// Mulberry32 pseudo-random number generator.
///
/// The whole state is one `u32`, so the type is `Copy`: [`Mulberry32::step`]
/// returns the next value together with a new generator and leaves the
/// receiver untouched, which allows branching and replaying a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    /// Creates a generator from an integer seed.
    #[must_use]
    pub const fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Functional entry point: the first value for `seed` and the generator for the rest.
    #[must_use]
    pub fn functional(seed: u32) -> (f64, Self) {
        Self::new(seed).step()
    }

    /// Returns the next value and the generator that follows it, without mutating `self`.
    #[must_use]
    pub fn step(self) -> (f64, Self) {
        let state = self.state.wrapping_add(INCREMENT);
        (mix(state), Self { state })
    }

    /// Returns the current state word.
    #[must_use]
    pub const fn state(&self) -> u32 {
        self.state
    }
}

impl Random for Mulberry32 {
    #[inline]
    fn next_f64(&mut self) -> f64 {
        self.state = self.state.wrapping_add(INCREMENT);
        mix(self.state)
    }
}
